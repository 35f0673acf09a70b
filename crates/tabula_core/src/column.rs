//! Column metadata.

use serde::{Deserialize, Serialize};

/// One column of a table, as reported by `INFORMATION_SCHEMA.COLUMNS`.
///
/// Columns are kept in physical order. The first column of a table is
/// treated as its primary key.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ColumnMeta {
    /// Column name
    name: String,
    /// Declared data type (e.g. `nvarchar`)
    data_type: String,
    /// Whether NULL is allowed
    #[builder(default)]
    nullable: bool,
    /// Default value expression, if any
    #[builder(default)]
    default_value: Option<String>,
}

impl ColumnMeta {
    /// Creates column metadata.
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        nullable: bool,
        default_value: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
            default_value,
        }
    }

    /// Creates a builder for ColumnMeta.
    pub fn builder() -> ColumnMetaBuilder {
        ColumnMetaBuilder::default()
    }

    /// Form label, `name (type)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_matches_new() {
        let built = ColumnMeta::builder()
            .name("Status")
            .data_type("varchar")
            .nullable(true)
            .default_value(Some("('open')".to_string()))
            .build()
            .unwrap();
        assert_eq!(
            built,
            ColumnMeta::new("Status", "varchar", true, Some("('open')".to_string()))
        );
        assert_eq!(built.default_value().as_deref(), Some("('open')"));
    }

    #[test]
    fn test_builder_defaults() {
        let built = ColumnMeta::builder()
            .name("Id")
            .data_type("int")
            .build()
            .unwrap();
        assert!(!built.nullable());
        assert!(built.default_value().is_none());
        assert_eq!(built.label(), "Id (int)");
    }
}

//! Single-choice list used for database, schema and table selection.

/// A titled list with one highlighted entry.
///
/// `labels` are shown; `values` are what the selection returns. They differ
/// for tables, which show their kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picker {
    title: String,
    labels: Vec<String>,
    values: Vec<String>,
    selected: usize,
}

impl Picker {
    /// A picker whose labels are its values, highlighting `current` if present.
    pub fn new(title: impl Into<String>, values: Vec<String>, current: Option<&str>) -> Self {
        Self::labelled(title, values.clone(), values, current)
    }

    /// A picker with separate display labels.
    pub fn labelled(
        title: impl Into<String>,
        labels: Vec<String>,
        values: Vec<String>,
        current: Option<&str>,
    ) -> Self {
        let selected = current
            .and_then(|c| values.iter().position(|v| v == c))
            .unwrap_or(0);
        Self {
            title: title.into(),
            labels,
            values,
            selected,
        }
    }

    /// Title shown on the list border.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Highlighted index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether there is nothing to choose.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Moves the highlight down, wrapping.
    pub fn next(&mut self) {
        if !self.values.is_empty() {
            self.selected = (self.selected + 1) % self.values.len();
        }
    }

    /// Moves the highlight up, wrapping.
    pub fn previous(&mut self) {
        if !self.values.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.values.len() - 1);
        }
    }

    /// The highlighted value.
    pub fn value(&self) -> Option<&str> {
        self.values.get(self.selected).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> Picker {
        Picker::new(
            "Schemas",
            vec!["dbo".into(), "hr".into(), "sales".into()],
            Some("hr"),
        )
    }

    #[test]
    fn test_starts_on_current() {
        assert_eq!(picker().value(), Some("hr"));
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut p = picker();
        p.next();
        p.next();
        assert_eq!(p.value(), Some("dbo"));
        p.previous();
        assert_eq!(p.value(), Some("sales"));
    }

    #[test]
    fn test_empty_picker() {
        let mut p = Picker::new("Tables", Vec::new(), None);
        p.next();
        p.previous();
        assert!(p.is_empty());
        assert_eq!(p.value(), None);
    }
}

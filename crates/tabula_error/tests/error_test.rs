//! Tests for error construction and display.

use tabula_error::{
    ConfigError, DatabaseError, DatabaseErrorKind, TabulaError, TuiError, TuiErrorKind,
};

#[test]
fn test_database_error_tracks_location() {
    let err = DatabaseError::new(DatabaseErrorKind::NoTableSelected);
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.line > 0);
    assert!(format!("{}", err).contains("Please select a table first."));
}

#[test]
fn test_query_error_message_is_verbatim() {
    let err = DatabaseError::query("Invalid object name 'dbo.Missing'.");
    assert_eq!(err.message(), "Invalid object name 'dbo.Missing'.");
    assert!(!err.kind.is_warning());
}

#[test]
fn test_warning_kinds() {
    assert!(DatabaseErrorKind::NoChanges.is_warning());
    assert!(DatabaseErrorKind::EmptyFilter.is_warning());
    assert!(DatabaseErrorKind::NoRecordSelected.is_warning());
    assert!(!DatabaseErrorKind::Connection("refused".to_string()).is_warning());
}

#[test]
fn test_tabula_error_from_conversions() {
    let err: TabulaError = DatabaseError::new(DatabaseErrorKind::NoChanges).into();
    assert_eq!(err.message(), "No changes to save.");

    let err: TabulaError = ConfigError::new("missing host").into();
    assert_eq!(err.message(), "missing host");

    let err: TabulaError = TuiError::new(TuiErrorKind::Render("boom".to_string())).into();
    assert_eq!(err.message(), "Render error: boom");
}

//! Connection settings parsing tests.

use tabula_database::ConnectionSettings;

#[test]
fn test_empty_table_takes_defaults() {
    let settings: ConnectionSettings = toml::from_str("").unwrap();
    assert_eq!(settings, ConnectionSettings::default());
    assert_eq!(settings.host, "localhost");
    assert_eq!(settings.port, 1433);
    assert!(settings.trust_cert);
    assert_eq!(settings.target(), "localhost:1433");
}

#[test]
fn test_discrete_fields_parse() {
    let settings: ConnectionSettings = toml::from_str(
        r#"
        host = "sql.internal"
        port = 1533
        username = "browser"
        password = "s3cret"
        trust_cert = false
        "#,
    )
    .unwrap();

    assert_eq!(settings.host, "sql.internal");
    assert_eq!(settings.port, 1533);
    assert_eq!(settings.username.as_deref(), Some("browser"));
    assert!(!settings.trust_cert);
    assert!(settings.to_config().is_ok());
}

#[test]
fn test_connection_string_hides_target() {
    let settings: ConnectionSettings = toml::from_str(
        r#"connection_string = "server=tcp:10.0.0.5,1433;user=sa;password=pw""#,
    )
    .unwrap();

    assert_eq!(settings.target(), "connection string");
    assert!(settings.to_config().is_ok());
}

#[test]
fn test_blank_username_is_rejected() {
    let settings: ConnectionSettings = toml::from_str(r#"username = """#).unwrap();
    assert!(settings.to_config().is_err());
}

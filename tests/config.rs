use matwork::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.server.base_url, "http://localhost:8000");
    assert!(config.server.cookie.is_empty());
    assert!(config.ui.show_media);
    assert!(config.ui.show_notes);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.file, "matwork.log");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Empty base URL should fail
    config.server.base_url = String::new();
    assert!(config.validate().is_err());

    // A URL without a scheme should fail
    config.server.base_url = "media.example.org".to_string();
    assert!(config.validate().is_err());

    // Reset and test logging with no file
    config.server.base_url = "https://media.example.org".to_string();
    config.logging.enabled = true;
    config.logging.file = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[server]
base_url = "https://media.example.org"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.server.base_url, "https://media.example.org");
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert!(config.server.cookie.is_empty()); // default value
    assert!(config.ui.show_media); // default value
    assert_eq!(config.logging.file, "matwork.log"); // default value
}

#[test]
fn test_empty_config_deserialization() {
    // Empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.server.base_url, default_config.server.base_url);
    assert_eq!(config.ui.show_notes, default_config.ui.show_notes);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("base_url = \"http://localhost:8000\""));
    assert!(toml_str.contains("show_media = true"));
}

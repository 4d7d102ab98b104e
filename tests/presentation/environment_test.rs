use lipsync::presentation::Environment;

#[test]
fn given_known_names_when_parsing_then_maps_to_environment() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("local".to_string()),
        Ok(Environment::Local)
    );
    assert_eq!(
        Environment::try_from("test".to_string()),
        Ok(Environment::Test)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_suffix() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
}

pub mod error;
pub mod load;
pub mod settings;

pub use error::ConfigError;
pub use load::load_settings;
pub use settings::{
    EditorSettings, DEFAULT_API_BASE, DEFAULT_LOAD_PATH, DEFAULT_SAVE_PATH,
    MAX_NOTIFICATION_TTL_SECS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let temp = tempdir().expect("temp dir");
        let settings =
            load_settings(&temp.path().join("modeled.yaml")).expect("defaults for absent file");
        assert_eq!(settings, EditorSettings::default());
        assert_eq!(settings.load_url(), "http://localhost:6741/api/models");
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("modeled.yaml");
        fs::write(&path, "api_base: http://10.0.0.2:8080\nnotification_ttl_secs: 9\n")
            .expect("write settings");

        let settings = load_settings(&path).expect("load settings");

        assert_eq!(settings.save_url(), "http://10.0.0.2:8080/api/models/save");
        assert_eq!(settings.notification_ttl_secs, 9);
        assert_eq!(settings.models_file, None);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("modeled.yaml");
        fs::write(&path, "notification_ttl_secs: 0\n").expect("write settings");

        let err = load_settings(&path).expect_err("zero ttl must fail");
        match err {
            ConfigError::Settings(message) => {
                assert!(message.contains("notification_ttl_secs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        fs::write(&path, "api_base: [oops\n").expect("write settings");
        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}

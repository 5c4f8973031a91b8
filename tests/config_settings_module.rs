use modeled::config::{load_settings, ConfigError, EditorSettings};
use modeled::document::Configuration;
use modeled::editor::{EditorAction, EditorController, EditTarget, FormEdit};
use modeled::gateway::gateway_from_settings;
use std::fs;
use tempfile::tempdir;

#[test]
fn settings_file_drives_the_file_gateway_and_banner_ttl() {
    let temp = tempdir().expect("tempdir");
    let models = temp.path().join("models.json");
    fs::write(
        &models,
        r#"{"current_version":1,"models":[{"name":"GPT","command":"gpt"}]}"#,
    )
    .expect("seed models");
    let settings_path = temp.path().join("modeled.yaml");
    fs::write(
        &settings_path,
        format!(
            "models_file: {}\nnotification_ttl_secs: 30\n",
            models.display()
        ),
    )
    .expect("write settings");

    let settings = load_settings(&settings_path).expect("load settings");
    let mut controller =
        EditorController::with_ttl(gateway_from_settings(&settings), settings.notification_ttl());
    controller.load().expect("load models");

    controller
        .dispatch(EditorAction::OpenModelForm(EditTarget::New))
        .expect("open form");
    controller
        .dispatch(EditorAction::EditForm(FormEdit::Name("Qwen".to_string())))
        .expect("name");
    controller
        .dispatch(EditorAction::EditForm(FormEdit::Command("qwen".to_string())))
        .expect("command");
    controller
        .dispatch(EditorAction::SubmitModelForm)
        .expect("submit");
    controller.save().expect("save");

    let notification = controller.notification().expect("notification");
    assert_eq!(
        notification.expires_at - notification.raised_at,
        chrono::Duration::seconds(30)
    );
    let reloaded = Configuration::from_json(
        &fs::read_to_string(&models).expect("read models"),
    )
    .expect("parse models");
    let added = &reloaded.models[1];
    assert_eq!((added.name.as_str(), added.command.as_str()), ("Qwen", "qwen"));
    assert_eq!(added.providers, Some(Default::default()));
    assert_eq!(added.vision, None);
}

#[test]
fn file_gateway_refusal_is_reported_and_document_kept() {
    let temp = tempdir().expect("tempdir");
    let models = temp.path().join("models.json");
    let original = r#"{"models":[{"name":"GPT","command":"gpt"}],"default_vision_models":[]}"#;
    fs::write(&models, original).expect("seed models");
    let settings = EditorSettings {
        models_file: Some(models.clone()),
        ..EditorSettings::default()
    };
    let mut controller = EditorController::new(gateway_from_settings(&settings));
    controller.load().expect("load");

    controller
        .dispatch(EditorAction::OpenModelForm(EditTarget::Existing(0)))
        .expect("open");
    controller
        .dispatch(EditorAction::DeleteModel { confirmed: true })
        .expect("delete");
    assert!(controller.save().is_err());

    assert_eq!(
        controller.notification().expect("notification").message,
        "Error saving configuration: Invalid configuration: at least one model must be defined"
    );
    assert!(controller.config().expect("config").models.is_empty());
    assert_eq!(fs::read_to_string(&models).expect("unchanged"), original);
}

#[test]
fn unreadable_settings_surface_typed_errors() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("modeled.yaml");
    fs::write(&path, "load_path: api/models\n").expect("write settings");

    match load_settings(&path) {
        Err(ConfigError::Settings(message)) => assert!(message.contains("load_path")),
        other => panic!("unexpected result: {other:?}"),
    }

    fs::create_dir(temp.path().join("dir.yaml")).expect("mkdir");
    assert!(matches!(
        load_settings(&temp.path().join("dir.yaml")),
        Err(ConfigError::Read { .. })
    ));
}

use super::{ConfigError, EditorSettings};
use std::path::Path;

/// Reads and validates the settings file. A missing file means defaults.
pub fn load_settings(path: &Path) -> Result<EditorSettings, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file absent, using defaults");
        return Ok(EditorSettings::default());
    }
    let settings = EditorSettings::from_path(path)?;
    settings.validate()?;
    Ok(settings)
}

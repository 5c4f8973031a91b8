use super::{Configuration, DefaultList, ALL_DEFAULT_LISTS};
use std::collections::HashSet;

/// Reasons a document is refused for persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one model must be defined")]
    NoModels,
    #[error("duplicate model name: {0}")]
    DuplicateModelName(String),
    #[error("{} model not found: {name}", list_label(.list))]
    UnknownListEntry { list: DefaultList, name: String },
    #[error("vision model {0} does not have vision capability")]
    MissingVisionCapability(String),
}

fn list_label(list: &DefaultList) -> &'static str {
    match list {
        DefaultList::General => "default",
        DefaultList::Narrator => "narrator",
        DefaultList::Vision => "vision",
    }
}

/// Checks applied before a document replaces the stored one.
///
/// The editor itself never runs these; it tolerates dangling names and
/// non-vision entries so that hand-crafted documents stay editable.
pub fn validate_for_persistence(config: &Configuration) -> Result<(), ValidationError> {
    if config.models.is_empty() {
        return Err(ValidationError::NoModels);
    }

    let mut names = HashSet::new();
    for model in &config.models {
        if !names.insert(model.name.as_str()) {
            return Err(ValidationError::DuplicateModelName(model.name.clone()));
        }
    }

    for list in ALL_DEFAULT_LISTS {
        for name in config.list(list) {
            let Some(model) = config.model_named(name) else {
                return Err(ValidationError::UnknownListEntry {
                    list,
                    name: name.clone(),
                });
            };
            if list == DefaultList::Vision && !model.vision.unwrap_or(false) {
                return Err(ValidationError::MissingVisionCapability(name.clone()));
            }
        }
    }

    Ok(())
}

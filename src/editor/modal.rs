use crate::document::{Configuration, DefaultList};

/// Short-lived secondary forms. At most one is open at a time; opening another
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidedModal {
    AddProvider,
    AddToList {
        list: DefaultList,
        options: Vec<String>,
    },
    EditVersion {
        current: Option<u64>,
    },
}

impl GuidedModal {
    pub fn add_to_list(config: &Configuration, list: DefaultList) -> Self {
        Self::AddToList {
            list,
            options: config
                .list_candidates(list)
                .into_iter()
                .map(|model| model.name.clone())
                .collect(),
        }
    }

    pub fn edit_version(config: &Configuration) -> Self {
        Self::EditVersion {
            current: config.current_version,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddProvider => "add-provider",
            Self::AddToList { .. } => "add-to-list",
            Self::EditVersion { .. } => "edit-version",
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::AddProvider => "Add Provider".to_string(),
            Self::AddToList { list, .. } => format!("Add Model to {}", list.title()),
            Self::EditVersion { .. } => "Edit Version".to_string(),
        }
    }
}

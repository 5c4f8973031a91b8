use super::{Configuration, Model};

/// The three curated, name-keyed selections over `models`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefaultList {
    General,
    Narrator,
    Vision,
}

pub const ALL_DEFAULT_LISTS: [DefaultList; 3] =
    [DefaultList::General, DefaultList::Narrator, DefaultList::Vision];

impl DefaultList {
    /// Wire key of the backing field.
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "default_models",
            Self::Narrator => "narrator_models",
            Self::Vision => "default_vision_models",
        }
    }

    /// Region and drag-group identifier.
    pub fn container_id(self) -> &'static str {
        match self {
            Self::General => "default-models",
            Self::Narrator => "narrator-models",
            Self::Vision => "vision-models",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::General => "Default Models",
            Self::Narrator => "Narrator Models",
            Self::Vision => "Default Vision Models",
        }
    }

    /// Whether a model may be offered by the guided add flow for this list.
    pub fn admits(self, model: &Model) -> bool {
        match self {
            Self::Vision => model.vision.unwrap_or(false),
            Self::General | Self::Narrator => true,
        }
    }
}

impl std::fmt::Display for DefaultList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A list entry looked up against `models`. Dangling names are tolerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelRef<'a> {
    Resolved(&'a Model),
    Dangling(&'a str),
}

impl<'a> ModelRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Resolved(model) => &model.name,
            Self::Dangling(name) => name,
        }
    }

    pub fn model(&self) -> Option<&'a Model> {
        match self {
            Self::Resolved(model) => Some(model),
            Self::Dangling(_) => None,
        }
    }
}

impl Configuration {
    pub fn list(&self, list: DefaultList) -> &[String] {
        match list {
            DefaultList::General => &self.default_models,
            DefaultList::Narrator => &self.narrator_models,
            DefaultList::Vision => &self.default_vision_models,
        }
    }

    pub fn list_mut(&mut self, list: DefaultList) -> &mut Vec<String> {
        match list {
            DefaultList::General => &mut self.default_models,
            DefaultList::Narrator => &mut self.narrator_models,
            DefaultList::Vision => &mut self.default_vision_models,
        }
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> ModelRef<'a> {
        match self.model_named(name) {
            Some(model) => ModelRef::Resolved(model),
            None => ModelRef::Dangling(name),
        }
    }

    pub fn resolve_list(&self, list: DefaultList) -> Vec<ModelRef<'_>> {
        self.list(list)
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    /// Models the guided add flow offers for `list`, in `models` order.
    pub fn list_candidates(&self, list: DefaultList) -> Vec<&Model> {
        let current = self.list(list);
        self.models
            .iter()
            .filter(|model| list.admits(model))
            .filter(|model| !current.iter().any(|name| *name == model.name))
            .collect()
    }

    pub fn dangling_references(&self) -> Vec<(DefaultList, String)> {
        let mut dangling = Vec::new();
        for list in ALL_DEFAULT_LISTS {
            for entry in self.resolve_list(list) {
                if let ModelRef::Dangling(name) = entry {
                    dangling.push((list, name.to_string()));
                }
            }
        }
        dangling
    }
}

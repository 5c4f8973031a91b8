use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Root of `models.json`.
///
/// Keys the editor does not know about are kept in `extra` so that a document
/// loaded and saved without edits is submitted unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<Model>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub providers_order: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_models: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub narrator_models: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_vision_models: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document revisions seen in the wild. The later one carries a version
/// counter and the `is_llama` capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRevision {
    Legacy,
    Versioned,
}

impl SchemaRevision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Versioned => "versioned",
        }
    }

    pub fn supports(self, capability: Capability) -> bool {
        capability != Capability::Llama || self == Self::Versioned
    }
}

impl Configuration {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn revision(&self) -> SchemaRevision {
        if self.current_version.is_some() {
            SchemaRevision::Versioned
        } else {
            SchemaRevision::Legacy
        }
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers_order.iter().any(|name| name == provider)
    }

    pub fn model_named(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Model {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_llama: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_markov: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_eliza: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<BTreeMap<String, ProviderBinding>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Boolean capability flags carried by a [`Model`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    Vision,
    Reasoning,
    Llama,
    Markov,
    Eliza,
    Limited,
}

pub const ALL_CAPABILITIES: [Capability; 6] = [
    Capability::Vision,
    Capability::Reasoning,
    Capability::Llama,
    Capability::Markov,
    Capability::Eliza,
    Capability::Limited,
];

impl Capability {
    /// Wire key of the flag.
    pub fn key(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::Reasoning => "reasoning",
            Self::Llama => "is_llama",
            Self::Markov => "is_markov",
            Self::Eliza => "is_eliza",
            Self::Limited => "limited",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vision => "Vision",
            Self::Reasoning => "Reasoning",
            Self::Llama => "Llama",
            Self::Markov => "Markov",
            Self::Eliza => "Eliza",
            Self::Limited => "Limited",
        }
    }

    /// Extra tag class for the flags that get their own colour.
    pub fn tag_class(self) -> Option<&'static str> {
        match self {
            Self::Vision => Some("vision"),
            Self::Reasoning => Some("reasoning"),
            Self::Llama => Some("llama"),
            Self::Markov | Self::Eliza | Self::Limited => None,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Model {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn flag(&self, capability: Capability) -> Option<bool> {
        match capability {
            Capability::Vision => self.vision,
            Capability::Reasoning => self.reasoning,
            Capability::Llama => self.is_llama,
            Capability::Markov => self.is_markov,
            Capability::Eliza => self.is_eliza,
            Capability::Limited => self.limited,
        }
    }

    pub fn set_flag(&mut self, capability: Capability, value: Option<bool>) {
        let slot = match capability {
            Capability::Vision => &mut self.vision,
            Capability::Reasoning => &mut self.reasoning,
            Capability::Llama => &mut self.is_llama,
            Capability::Markov => &mut self.is_markov,
            Capability::Eliza => &mut self.is_eliza,
            Capability::Limited => &mut self.limited,
        };
        *slot = value;
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.flag(capability).unwrap_or(false)
    }

    pub fn enabled_capabilities(&self) -> Vec<Capability> {
        ALL_CAPABILITIES
            .into_iter()
            .filter(|capability| self.has(*capability))
            .collect()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .flat_map(|providers| providers.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn with_provider(mut self, provider: &str, codenames: &[&str]) -> Self {
        self.providers.get_or_insert_with(BTreeMap::new).insert(
            provider.to_string(),
            ProviderBinding::new(codenames.iter().map(|c| c.to_string()).collect()),
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProviderBinding {
    #[serde(default, deserialize_with = "null_as_default")]
    pub codenames: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderBinding {
    pub fn new(codenames: Vec<String>) -> Self {
        Self {
            codenames,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "current_version": 3,
        "models": [
            {"name": "GPT", "command": "gpt", "vision": true, "providers": {}},
            {"name": "Llama", "command": "llama", "is_llama": false, "whitelisted": true,
             "providers": {"groq": {"codenames": ["llama-3.3-70b", "llama3"]}}}
        ],
        "providers_order": ["openrouter"],
        "default_models": ["GPT"],
        "narrator_models": [],
        "default_vision_models": ["GPT"],
        "motd": "hello"
    }"#;

    #[test]
    fn configuration_round_trips_without_losing_unknown_keys() {
        let original: Value = serde_json::from_str(SAMPLE).expect("sample json");
        let config = Configuration::from_json(SAMPLE).expect("parse config");
        let encoded = serde_json::to_value(&config).expect("encode config");
        assert_eq!(encoded, original);
        assert_eq!(config.extra.get("motd"), Some(&Value::from("hello")));
        assert_eq!(
            config.models[1].extra.get("whitelisted"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn explicit_false_flags_stay_distinct_from_absent_flags() {
        let config = Configuration::from_json(SAMPLE).expect("parse config");
        let llama = &config.models[1];
        assert_eq!(llama.flag(Capability::Llama), Some(false));
        assert_eq!(llama.flag(Capability::Vision), None);
        assert!(!llama.has(Capability::Llama));
    }

    #[test]
    fn revision_follows_version_counter_presence() {
        let versioned = Configuration::from_json(SAMPLE).expect("parse config");
        assert_eq!(versioned.revision(), SchemaRevision::Versioned);
        assert_eq!(
            Configuration::default().revision(),
            SchemaRevision::Legacy
        );
        assert!(!SchemaRevision::Legacy.supports(Capability::Llama));
        assert!(SchemaRevision::Legacy.supports(Capability::Vision));
    }

    #[test]
    fn null_sequences_read_as_empty() {
        let config = Configuration::from_json(
            r#"{"models":null,"providers_order":null,"default_models":null,"narrator_models":null,"default_vision_models":null}"#,
        )
        .expect("parse nulls");
        assert!(config.models.is_empty());
        assert!(config.providers_order.is_empty());
        assert!(config.default_vision_models.is_empty());
    }

    #[test]
    fn provider_names_follow_map_order() {
        let model = Model::new("GPT", "gpt")
            .with_provider("openrouter", &["openai/gpt-4o"])
            .with_provider("github", &["gpt-4o"]);
        assert_eq!(model.provider_names(), vec!["github", "openrouter"]);
    }
}

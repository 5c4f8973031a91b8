use crate::document::{Capability, Model, ProviderBinding, SchemaRevision, ALL_CAPABILITIES};
use serde_json::Map;
use std::collections::{BTreeMap, BTreeSet};

/// Which model the form writes to on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(usize),
}

/// One repeatable provider sub-form: a provider name and its comma-separated
/// codenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRow {
    pub id: u32,
    pub provider: String,
    pub codenames: String,
}

/// A single field change coming from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    Name(String),
    Command(String),
    Encoding(String),
    Flag(Capability, bool),
    RowProvider { row: u32, value: String },
    RowCodenames { row: u32, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Model name and command are required")]
    MissingRequired,
    #[error("provider row {0} does not exist")]
    UnknownRow(u32),
    #[error("capability `{0}` is not part of this form")]
    UnsupportedCapability(Capability),
}

pub fn parse_codenames(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelForm {
    pub revision: SchemaRevision,
    pub name: String,
    pub command: String,
    pub encoding: String,
    checked: BTreeSet<Capability>,
    rows: Vec<ProviderRow>,
    next_row_id: u32,
    base: Option<Model>,
}

impl ModelForm {
    pub fn blank(revision: SchemaRevision) -> Self {
        Self {
            revision,
            name: String::new(),
            command: String::new(),
            encoding: String::new(),
            checked: BTreeSet::new(),
            rows: Vec::new(),
            next_row_id: 1,
            base: None,
        }
    }

    pub fn populated(model: &Model, revision: SchemaRevision) -> Self {
        let mut form = Self::blank(revision);
        form.name = model.name.clone();
        form.command = model.command.clone();
        form.encoding = model.encoding.clone().unwrap_or_default();
        form.checked = model.enabled_capabilities().into_iter().collect();
        for (provider, binding) in model.providers.iter().flatten() {
            form.add_row(provider, &binding.codenames.join(", "));
        }
        form.base = Some(model.clone());
        form
    }

    /// Checkboxes shown for this document revision.
    pub fn capabilities(&self) -> Vec<Capability> {
        ALL_CAPABILITIES
            .into_iter()
            .filter(|capability| self.revision.supports(*capability))
            .collect()
    }

    pub fn is_checked(&self, capability: Capability) -> bool {
        self.checked.contains(&capability)
    }

    pub fn rows(&self) -> &[ProviderRow] {
        &self.rows
    }

    pub fn add_row(&mut self, provider: &str, codenames: &str) -> u32 {
        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(ProviderRow {
            id,
            provider: provider.to_string(),
            codenames: codenames.to_string(),
        });
        id
    }

    pub fn remove_row(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn apply(&mut self, edit: FormEdit) -> Result<(), FormError> {
        match edit {
            FormEdit::Name(value) => self.name = value,
            FormEdit::Command(value) => self.command = value,
            FormEdit::Encoding(value) => self.encoding = value,
            FormEdit::Flag(capability, checked) => {
                if !self.revision.supports(capability) {
                    return Err(FormError::UnsupportedCapability(capability));
                }
                if checked {
                    self.checked.insert(capability);
                } else {
                    self.checked.remove(&capability);
                }
            }
            FormEdit::RowProvider { row, value } => self.row_mut(row)?.provider = value,
            FormEdit::RowCodenames { row, value } => self.row_mut(row)?.codenames = value,
        }
        Ok(())
    }

    fn row_mut(&mut self, id: u32) -> Result<&mut ProviderRow, FormError> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(FormError::UnknownRow(id))
    }

    /// Builds the model the form describes. Name and command are stored as
    /// typed; whitespace only counts when checking that they are present.
    ///
    /// Fields the form does not show (unknown keys, flags hidden by the
    /// revision) carry over from the model being edited. An unchecked flag is
    /// written as `false` only when the edited model spelled it out.
    pub fn submit(&self) -> Result<Model, FormError> {
        if self.name.trim().is_empty() || self.command.trim().is_empty() {
            return Err(FormError::MissingRequired);
        }

        let base = self.base.as_ref();
        let mut model = Model {
            name: self.name.clone(),
            command: self.command.clone(),
            extra: base.map(|b| b.extra.clone()).unwrap_or_default(),
            ..Model::default()
        };

        for capability in ALL_CAPABILITIES {
            let previous = base.and_then(|b| b.flag(capability));
            let value = if !self.revision.supports(capability) {
                previous
            } else if self.is_checked(capability) {
                Some(true)
            } else {
                previous.map(|_| false)
            };
            model.set_flag(capability, value);
        }

        let encoding = self.encoding.trim();
        model.encoding = if encoding.is_empty() {
            base.and_then(|b| b.encoding.clone())
                .filter(|previous| previous.is_empty())
        } else {
            Some(encoding.to_string())
        };

        let mut providers = BTreeMap::new();
        for row in &self.rows {
            let provider = row.provider.trim();
            if provider.is_empty() {
                continue;
            }
            let extra = base
                .and_then(|b| b.providers.as_ref())
                .and_then(|existing| existing.get(provider))
                .map(|binding| binding.extra.clone())
                .unwrap_or_else(Map::new);
            providers.insert(
                provider.to_string(),
                ProviderBinding {
                    codenames: parse_codenames(&row.codenames),
                    extra,
                },
            );
        }
        let omit_providers =
            providers.is_empty() && base.is_some_and(|b| b.providers.is_none());
        model.providers = if omit_providers { None } else { Some(providers) };

        Ok(model)
    }
}

use crate::document::{Configuration, DefaultList};
use crate::editor::form::{EditTarget, FormEdit, FormError, ModelForm};
use crate::editor::modal::GuidedModal;
use crate::editor::reorder::{self, ReorderError, ReorderableList};
use crate::editor::state::EditorSession;
use crate::editor::surface::Surface;

/// Every UI event the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    OpenModelForm(EditTarget),
    EditForm(FormEdit),
    AddProviderRow,
    RemoveProviderRow(u32),
    SubmitModelForm,
    DeleteModel { confirmed: bool },
    CloseModelForm,
    OpenAddProvider,
    SubmitAddProvider(String),
    RemoveProvider(String),
    OpenAddToList(DefaultList),
    SubmitAddToList { list: DefaultList, name: String },
    RemoveFromList { list: DefaultList, name: String },
    OpenEditVersion,
    SubmitEditVersion(String),
    CloseModal,
    DragEnd(ReorderableList),
}

impl EditorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenModelForm(_) => "open_model_form",
            Self::EditForm(_) => "edit_form",
            Self::AddProviderRow => "add_provider_row",
            Self::RemoveProviderRow(_) => "remove_provider_row",
            Self::SubmitModelForm => "submit_model_form",
            Self::DeleteModel { .. } => "delete_model",
            Self::CloseModelForm => "close_model_form",
            Self::OpenAddProvider => "open_add_provider",
            Self::SubmitAddProvider(_) => "submit_add_provider",
            Self::RemoveProvider(_) => "remove_provider",
            Self::OpenAddToList(_) => "open_add_to_list",
            Self::SubmitAddToList { .. } => "submit_add_to_list",
            Self::RemoveFromList { .. } => "remove_from_list",
            Self::OpenEditVersion => "open_edit_version",
            Self::SubmitEditVersion(_) => "submit_edit_version",
            Self::CloseModal => "close_modal",
            Self::DragEnd(_) => "drag_end",
        }
    }
}

/// Page sections a transition may invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Models,
    Providers,
    Defaults(DefaultList),
    Version,
    ModelForm,
    Modal,
}

pub const ALL_SECTIONS: [Section; 8] = [
    Section::Models,
    Section::Providers,
    Section::Defaults(DefaultList::General),
    Section::Defaults(DefaultList::Narrator),
    Section::Defaults(DefaultList::Vision),
    Section::Version,
    Section::ModelForm,
    Section::Modal,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub rerender: Vec<Section>,
    pub feedback: Option<String>,
}

impl Transition {
    fn quiet(rerender: Vec<Section>) -> Self {
        Self {
            rerender,
            feedback: None,
        }
    }

    fn with_feedback(rerender: Vec<Section>, feedback: impl Into<String>) -> Self {
        Self {
            rerender,
            feedback: Some(feedback.into()),
        }
    }

    pub fn no_op() -> Self {
        Self::quiet(Vec::new())
    }
}

/// Rejections. None of them changes the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Configuration is not loaded")]
    NotLoaded,
    #[error("No model form is open")]
    NoOpenForm,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Model #{0} does not exist")]
    UnknownModel(usize),
    #[error("Only an existing model can be deleted")]
    DeleteWithoutModel,
    #[error("Provider name is required")]
    EmptyProviderName,
    #[error("Provider `{0}` already exists")]
    DuplicateProvider(String),
    #[error("Select a model to add")]
    EmptySelection,
    #[error("Model `{name}` cannot be added to {list}")]
    UnavailableSelection { list: DefaultList, name: String },
    #[error("Version must be a whole number of at least 1")]
    InvalidVersion(String),
    #[error("Failed to apply new order: {0}")]
    Reorder(#[from] ReorderError),
}

pub fn parse_version(raw: &str) -> Result<u64, EditorError> {
    match raw.trim().parse::<u64>() {
        Ok(version) if version >= 1 => Ok(version),
        _ => Err(EditorError::InvalidVersion(raw.to_string())),
    }
}

/// Runs one action against the session. On `Err` nothing was changed.
pub fn apply_action(
    session: &mut EditorSession,
    surface: &Surface,
    action: EditorAction,
) -> Result<Transition, EditorError> {
    match action {
        EditorAction::OpenModelForm(target) => {
            let config = session.loaded()?;
            let revision = config.revision();
            let form = match target {
                EditTarget::New => ModelForm::blank(revision),
                EditTarget::Existing(index) => {
                    let model = config
                        .models
                        .get(index)
                        .ok_or(EditorError::UnknownModel(index))?;
                    ModelForm::populated(model, revision)
                }
            };
            session.open_form(target, form);
            Ok(Transition::quiet(vec![Section::ModelForm]))
        }
        EditorAction::EditForm(edit) => {
            session.form_mut()?.form.apply(edit)?;
            Ok(Transition::quiet(vec![Section::ModelForm]))
        }
        EditorAction::AddProviderRow => {
            session.form_mut()?.form.add_row("", "");
            Ok(Transition::quiet(vec![Section::ModelForm]))
        }
        EditorAction::RemoveProviderRow(row) => {
            if session.form_mut()?.form.remove_row(row) {
                Ok(Transition::quiet(vec![Section::ModelForm]))
            } else {
                Ok(Transition::no_op())
            }
        }
        EditorAction::SubmitModelForm => submit_model_form(session),
        EditorAction::DeleteModel { confirmed } => delete_model(session, confirmed),
        EditorAction::CloseModelForm => {
            session.close_form();
            Ok(Transition::quiet(vec![Section::ModelForm]))
        }
        EditorAction::OpenAddProvider => {
            session.loaded()?;
            session.open_modal(GuidedModal::AddProvider);
            Ok(Transition::quiet(vec![Section::Modal]))
        }
        EditorAction::SubmitAddProvider(name) => {
            let config = session.loaded_mut()?;
            let name = name.trim();
            if name.is_empty() {
                return Err(EditorError::EmptyProviderName);
            }
            if config.has_provider(name) {
                return Err(EditorError::DuplicateProvider(name.to_string()));
            }
            config.providers_order.push(name.to_string());
            let feedback = format!("Provider `{name}` added");
            session.close_modal();
            Ok(Transition::with_feedback(
                vec![Section::Providers, Section::Modal],
                feedback,
            ))
        }
        EditorAction::RemoveProvider(name) => {
            let config = session.loaded_mut()?;
            let Some(position) = config.providers_order.iter().position(|p| *p == name) else {
                return Ok(Transition::no_op());
            };
            config.providers_order.remove(position);
            Ok(Transition::with_feedback(
                vec![Section::Providers],
                format!("Provider `{name}` removed"),
            ))
        }
        EditorAction::OpenAddToList(list) => {
            let modal = GuidedModal::add_to_list(session.loaded()?, list);
            session.open_modal(modal);
            Ok(Transition::quiet(vec![Section::Modal]))
        }
        EditorAction::SubmitAddToList { list, name } => {
            let config = session.loaded_mut()?;
            if name.trim().is_empty() {
                return Err(EditorError::EmptySelection);
            }
            if !offered_for(config, list, &name) {
                return Err(EditorError::UnavailableSelection { list, name });
            }
            config.list_mut(list).push(name.clone());
            session.close_modal();
            Ok(Transition::with_feedback(
                vec![Section::Defaults(list), Section::Modal],
                format!("Added `{name}` to {}", list.title()),
            ))
        }
        EditorAction::RemoveFromList { list, name } => {
            let entries = session.loaded_mut()?.list_mut(list);
            let Some(position) = entries.iter().position(|entry| *entry == name) else {
                return Ok(Transition::no_op());
            };
            entries.remove(position);
            Ok(Transition::with_feedback(
                vec![Section::Defaults(list)],
                format!("Removed `{name}` from {}", list.title()),
            ))
        }
        EditorAction::OpenEditVersion => {
            let modal = GuidedModal::edit_version(session.loaded()?);
            session.open_modal(modal);
            Ok(Transition::quiet(vec![Section::Modal]))
        }
        EditorAction::SubmitEditVersion(raw) => {
            let config = session.loaded_mut()?;
            let version = parse_version(&raw)?;
            let promoted = config.current_version.is_none();
            config.current_version = Some(version);
            let revision = config.revision();
            session.close_modal();
            // The llama checkbox appears with the version counter, so an open
            // form is switched over and redrawn.
            let rerender = if promoted {
                if let Ok(open) = session.form_mut() {
                    open.form.revision = revision;
                }
                vec![Section::Version, Section::Modal, Section::ModelForm]
            } else {
                vec![Section::Version, Section::Modal]
            };
            Ok(Transition::with_feedback(
                rerender,
                format!("Version set to {version}"),
            ))
        }
        EditorAction::CloseModal => {
            session.close_modal();
            Ok(Transition::quiet(vec![Section::Modal]))
        }
        EditorAction::DragEnd(list) => {
            let config = session.loaded_mut()?;
            reorder::finish_drag(config, surface, list)?;
            if list.requires_rerender() {
                Ok(Transition::quiet(vec![Section::Models]))
            } else {
                Ok(Transition::no_op())
            }
        }
    }
}

fn offered_for(config: &Configuration, list: DefaultList, name: &str) -> bool {
    config
        .list_candidates(list)
        .iter()
        .any(|model| model.name == name)
}

fn submit_model_form(session: &mut EditorSession) -> Result<Transition, EditorError> {
    let form_session = session.form().ok_or(EditorError::NoOpenForm)?;
    let target = form_session.target;
    let model = form_session.form.submit()?;
    let config = session.loaded_mut()?;
    match target {
        EditTarget::New => config.models.push(model),
        EditTarget::Existing(index) => {
            let slot = config
                .models
                .get_mut(index)
                .ok_or(EditorError::UnknownModel(index))?;
            *slot = model;
        }
    }
    session.close_form();
    Ok(Transition::with_feedback(
        full_rerender(),
        "Model saved successfully",
    ))
}

fn delete_model(session: &mut EditorSession, confirmed: bool) -> Result<Transition, EditorError> {
    let target = session.editing_target().ok_or(EditorError::NoOpenForm)?;
    let EditTarget::Existing(index) = target else {
        return Err(EditorError::DeleteWithoutModel);
    };
    if !confirmed {
        return Ok(Transition::no_op());
    }
    let config = session.loaded_mut()?;
    if index >= config.models.len() {
        return Err(EditorError::UnknownModel(index));
    }
    config.models.remove(index);
    session.close_form();
    Ok(Transition::with_feedback(
        full_rerender(),
        "Model deleted successfully",
    ))
}

/// Sections touched when a whole document is installed.
pub fn full_rerender() -> Vec<Section> {
    ALL_SECTIONS.to_vec()
}

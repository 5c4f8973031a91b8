use crate::document::Configuration;
use crate::editor::actions::EditorError;
use crate::editor::form::{EditTarget, ModelForm};
use crate::editor::modal::GuidedModal;
use crate::editor::notification::Banner;

/// The open model form together with the entry it edits.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub target: EditTarget,
    pub form: ModelForm,
}

/// Everything the editor holds between events: the live document, the model
/// form, the guided modal and the status banner.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    config: Option<Configuration>,
    form: Option<FormSession>,
    modal: Option<GuidedModal>,
    banner: Banner,
}

impl EditorSession {
    pub fn new(banner: Banner) -> Self {
        Self {
            banner,
            ..Self::default()
        }
    }

    pub fn config(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    pub fn loaded(&self) -> Result<&Configuration, EditorError> {
        self.config.as_ref().ok_or(EditorError::NotLoaded)
    }

    pub fn loaded_mut(&mut self) -> Result<&mut Configuration, EditorError> {
        self.config.as_mut().ok_or(EditorError::NotLoaded)
    }

    /// Installs a freshly loaded document. Form and modal state refer to the
    /// previous document's positions, so both are discarded.
    pub fn replace_config(&mut self, config: Configuration) {
        self.config = Some(config);
        self.form = None;
        self.modal = None;
    }

    pub fn editing_target(&self) -> Option<EditTarget> {
        self.form.as_ref().map(|session| session.target)
    }

    pub fn form(&self) -> Option<&FormSession> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Result<&mut FormSession, EditorError> {
        self.form.as_mut().ok_or(EditorError::NoOpenForm)
    }

    pub fn open_form(&mut self, target: EditTarget, form: ModelForm) {
        self.form = Some(FormSession { target, form });
    }

    pub fn close_form(&mut self) -> Option<FormSession> {
        self.form.take()
    }

    pub fn modal(&self) -> Option<&GuidedModal> {
        self.modal.as_ref()
    }

    pub fn open_modal(&mut self, modal: GuidedModal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) -> Option<GuidedModal> {
        self.modal.take()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut Banner {
        &mut self.banner
    }
}

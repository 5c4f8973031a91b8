use crate::document::Configuration;
use crate::editor::actions::{apply_action, full_rerender, EditorAction, EditorError};
use crate::editor::notification::{Banner, Notification, Severity};
use crate::editor::render;
use crate::editor::reorder::{ReorderError, ReorderableList};
use crate::editor::state::EditorSession;
use crate::editor::surface::Surface;
use crate::gateway::{GatewayError, PersistenceGateway};
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Owns the live document and drives it from UI events: load, edit, reorder,
/// save. Every outcome lands in the status banner.
pub struct EditorController<G> {
    gateway: G,
    session: EditorSession,
    surface: Surface,
}

impl<G: PersistenceGateway> EditorController<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_banner(gateway, Banner::default())
    }

    pub fn with_ttl(gateway: G, ttl: chrono::Duration) -> Self {
        Self::with_banner(gateway, Banner::new(ttl))
    }

    fn with_banner(gateway: G, banner: Banner) -> Self {
        Self {
            gateway,
            session: EditorSession::new(banner),
            surface: Surface::new(),
        }
    }

    /// Fetches the document. On failure the current document, if any, stays.
    pub fn load(&mut self) -> Result<(), ControllerError> {
        match self.gateway.load() {
            Ok(config) => {
                tracing::info!(
                    models = config.models.len(),
                    providers = config.providers_order.len(),
                    revision = config.revision().as_str(),
                    "configuration loaded"
                );
                self.session.replace_config(config);
                render::render_sections(&self.session, &full_rerender(), &mut self.surface);
                self.notify(Severity::Success, "Configuration loaded successfully");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration load failed");
                self.notify(
                    Severity::Error,
                    format!("Error loading configuration: {err}"),
                );
                Err(err.into())
            }
        }
    }

    /// Sends the whole document back. The document itself is never modified.
    pub fn save(&mut self) -> Result<(), ControllerError> {
        let result = match self.session.loaded() {
            Ok(config) => self.gateway.save(config).map_err(ControllerError::from),
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(()) => {
                tracing::info!("configuration saved");
                self.notify(Severity::Success, "Configuration saved successfully");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration save failed");
                self.notify(
                    Severity::Error,
                    format!("Error saving configuration: {err}"),
                );
                Err(err)
            }
        }
    }

    pub fn dispatch(&mut self, action: EditorAction) -> Result<(), EditorError> {
        let name = action.as_str();
        match apply_action(&mut self.session, &self.surface, action) {
            Ok(transition) => {
                tracing::debug!(action = name, sections = transition.rerender.len(), "action applied");
                render::render_sections(&self.session, &transition.rerender, &mut self.surface);
                if let Some(feedback) = transition.feedback {
                    self.notify(Severity::Success, feedback);
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(action = name, error = %err, "action rejected");
                self.notify(Severity::Error, err.to_string());
                Err(err)
            }
        }
    }

    /// Performs a drag on the rendered list and then fires its drag-end
    /// callback.
    pub fn drag(&mut self, list: ReorderableList, from: usize, to: usize) -> Result<(), EditorError> {
        if let Err(err) = self.surface.drag(list.region(), from, to) {
            let err = EditorError::Reorder(ReorderError::Surface(err));
            tracing::warn!(list = %list, error = %err, "drag rejected");
            self.notify(Severity::Error, err.to_string());
            return Err(err);
        }
        self.dispatch(EditorAction::DragEnd(list))
    }

    /// Clears the banner once its notification has expired.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.session.banner_mut().dismiss_expired(now) {
            render::render_status(None, &mut self.surface);
        }
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.session.banner_mut().show(severity, message);
        render::render_status(self.session.banner().latest(), &mut self.surface);
    }

    pub fn config(&self) -> Option<&Configuration> {
        self.session.config()
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.session.banner().latest()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Model;
    use crate::editor::surface::RegionId;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryGateway {
        stored: RefCell<Option<Configuration>>,
        fail_load: bool,
    }

    impl PersistenceGateway for MemoryGateway {
        fn load(&self) -> Result<Configuration, GatewayError> {
            if self.fail_load {
                return Err(GatewayError::LoadStatus { status: 500 });
            }
            self.stored
                .borrow()
                .clone()
                .ok_or_else(|| GatewayError::Transport("connection refused".to_string()))
        }

        fn save(&self, config: &Configuration) -> Result<(), GatewayError> {
            *self.stored.borrow_mut() = Some(config.clone());
            Ok(())
        }
    }

    #[test]
    fn save_before_load_reports_error() {
        let mut controller = EditorController::new(MemoryGateway::default());
        assert!(controller.save().is_err());
        let notification = controller.notification().expect("notification");
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(
            notification.message,
            "Error saving configuration: Configuration is not loaded"
        );
    }

    #[test]
    fn failed_load_keeps_previous_document() {
        let gateway = MemoryGateway {
            stored: RefCell::new(Some(Configuration {
                models: vec![Model::new("GPT", "gpt")],
                ..Configuration::default()
            })),
            fail_load: false,
        };
        let mut controller = EditorController::new(gateway);
        controller.load().expect("first load");

        controller.gateway.fail_load = true;
        assert!(controller.load().is_err());

        assert_eq!(controller.config().expect("config").models.len(), 1);
        assert_eq!(
            controller.notification().expect("notification").message,
            "Error loading configuration: Failed to load configuration"
        );
        assert!(controller
            .surface()
            .html(RegionId::Status)
            .expect("status")
            .contains("status-error"));
    }

    #[test]
    fn expired_notification_is_cleared_on_tick() {
        let mut controller =
            EditorController::with_ttl(MemoryGateway::default(), chrono::Duration::seconds(1));
        let _ = controller.load();
        assert!(controller.surface().contains(RegionId::Status));

        controller.tick(Utc::now() + chrono::Duration::seconds(2));

        assert!(!controller.surface().contains(RegionId::Status));
        assert!(controller.notification().is_none());
    }
}

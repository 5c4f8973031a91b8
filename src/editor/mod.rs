pub mod actions;
pub mod controller;
pub mod form;
pub mod modal;
pub mod notification;
pub mod render;
pub mod reorder;
pub mod state;
pub mod surface;

pub use actions::{apply_action, EditorAction, EditorError, Section, Transition, ALL_SECTIONS};
pub use controller::{ControllerError, EditorController};
pub use form::{parse_codenames, EditTarget, FormEdit, FormError, ModelForm, ProviderRow};
pub use modal::GuidedModal;
pub use notification::{Banner, Notification, Severity, DEFAULT_NOTIFICATION_TTL_SECS};
pub use reorder::{ReorderError, ReorderableList, SortableOptions, ALL_REORDERABLE_LISTS};
pub use state::{EditorSession, FormSession};
pub use surface::{Region, RegionId, RegionItem, Surface, SurfaceError};

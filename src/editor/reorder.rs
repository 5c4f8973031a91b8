use crate::document::{Configuration, DefaultList, Model};
use crate::editor::surface::{RegionId, Surface, SurfaceError};

const ANIMATION_MS: u32 = 150;
const GHOST_CLASS: &str = "sortable-ghost";
const CHOSEN_CLASS: &str = "sortable-chosen";

/// Options handed to the drag-and-drop list when it is attached to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortableOptions {
    pub animation_ms: u32,
    pub ghost_class: &'static str,
    pub chosen_class: &'static str,
    /// Items only move between containers that share a group.
    pub group: Option<&'static str>,
}

/// Document fields whose order the user controls by dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderableList {
    Models,
    Providers,
    Defaults(DefaultList),
}

pub const ALL_REORDERABLE_LISTS: [ReorderableList; 5] = [
    ReorderableList::Models,
    ReorderableList::Providers,
    ReorderableList::Defaults(DefaultList::General),
    ReorderableList::Defaults(DefaultList::Narrator),
    ReorderableList::Defaults(DefaultList::Vision),
];

impl ReorderableList {
    pub fn key(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Providers => "providers_order",
            Self::Defaults(list) => list.key(),
        }
    }

    pub fn region(self) -> RegionId {
        match self {
            Self::Models => RegionId::ModelsList,
            Self::Providers => RegionId::ProvidersList,
            Self::Defaults(list) => RegionId::DefaultList(list),
        }
    }

    pub fn options(self) -> SortableOptions {
        SortableOptions {
            animation_ms: ANIMATION_MS,
            ghost_class: GHOST_CLASS,
            chosen_class: CHOSEN_CLASS,
            group: match self {
                Self::Models | Self::Providers => None,
                Self::Defaults(list) => Some(list.container_id()),
            },
        }
    }

    /// Model cards embed their position, so a reorder invalidates every card.
    pub fn requires_rerender(self) -> bool {
        self == Self::Models
    }
}

impl std::fmt::Display for ReorderableList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("dragged order does not match the models list: {0}")]
    ModelMismatch(String),
}

/// Attaches the drag capability to the list's region. Re-attaching replaces
/// the previous binding, so renderers call this after every redraw.
pub fn attach(surface: &mut Surface, list: ReorderableList) -> Result<(), SurfaceError> {
    surface.bind_sortable(list.region(), list.options())
}

/// Drag-end callback: reads the container's child order and writes it into
/// the matching document field.
pub fn finish_drag(
    config: &mut Configuration,
    surface: &Surface,
    list: ReorderableList,
) -> Result<(), ReorderError> {
    let order = surface.item_ids(list.region())?;
    write_back(config, list, order)
}

pub fn write_back(
    config: &mut Configuration,
    list: ReorderableList,
    order: Vec<String>,
) -> Result<(), ReorderError> {
    match list {
        ReorderableList::Models => reorder_models(&mut config.models, &order),
        ReorderableList::Providers => {
            config.providers_order = order;
            Ok(())
        }
        ReorderableList::Defaults(default_list) => {
            *config.list_mut(default_list) = order;
            Ok(())
        }
    }
}

/// Model cards are keyed by their position at render time, so the dragged
/// order is a permutation of `0..models.len()`.
fn reorder_models(models: &mut Vec<Model>, order: &[String]) -> Result<(), ReorderError> {
    if order.len() != models.len() {
        return Err(ReorderError::ModelMismatch(format!(
            "expected {} cards, found {}",
            models.len(),
            order.len()
        )));
    }

    let mut taken = vec![false; models.len()];
    let mut permutation = Vec::with_capacity(order.len());
    for id in order {
        let index = id
            .parse::<usize>()
            .ok()
            .filter(|index| *index < models.len())
            .ok_or_else(|| ReorderError::ModelMismatch(format!("unknown card `{id}`")))?;
        if taken[index] {
            return Err(ReorderError::ModelMismatch(format!(
                "card `{id}` appears twice"
            )));
        }
        taken[index] = true;
        permutation.push(index);
    }

    let mut slots: Vec<Option<Model>> = models.drain(..).map(Some).collect();
    for index in permutation {
        if let Some(model) = slots[index].take() {
            models.push(model);
        }
    }
    Ok(())
}

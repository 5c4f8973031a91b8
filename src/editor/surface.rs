use crate::document::DefaultList;
use crate::editor::reorder::SortableOptions;
use std::collections::BTreeMap;

/// Named places on the page that renderers fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    ModelsList,
    ProvidersList,
    DefaultList(DefaultList),
    Version,
    ModelForm,
    Modal,
    Status,
}

impl RegionId {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::ModelsList => "models-list",
            Self::ProvidersList => "providers-list",
            Self::DefaultList(list) => list.container_id(),
            Self::Version => "current-version",
            Self::ModelForm => "modelModal",
            Self::Modal => "guided-modal",
            Self::Status => "status",
        }
    }
}

/// One child element of a list region. `id` is the identifier the reorder
/// adapter reads back after a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionItem {
    pub id: String,
    pub html: String,
}

impl RegionItem {
    pub fn new(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    body: String,
    items: Vec<RegionItem>,
    sortable: Option<SortableOptions>,
}

impl Region {
    /// A region with fixed markup and no children.
    pub fn fragment(html: impl Into<String>) -> Self {
        Self {
            body: html.into(),
            ..Self::default()
        }
    }

    /// A list region; `empty_state` is shown while `items` is empty.
    pub fn list(items: Vec<RegionItem>, empty_state: impl Into<String>) -> Self {
        Self {
            body: empty_state.into(),
            items,
            sortable: None,
        }
    }

    pub fn html(&self) -> String {
        if self.items.is_empty() {
            return self.body.clone();
        }
        self.items.iter().map(|item| item.html.as_str()).collect()
    }

    pub fn items(&self) -> &[RegionItem] {
        &self.items
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn sortable(&self) -> Option<&SortableOptions> {
        self.sortable.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("region `{0}` is not rendered")]
    MissingRegion(&'static str),
    #[error("region `{0}` is not sortable")]
    NotSortable(&'static str),
    #[error("drag position {index} is out of range for region `{region}` with {len} items")]
    OutOfRange {
        region: &'static str,
        index: usize,
        len: usize,
    },
}

/// Headless page: every rendered region keyed by where it lives.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    regions: BTreeMap<RegionId, Region>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the region wholesale. Any sortable binding belonged to the old
    /// elements and is dropped with them.
    pub fn replace(&mut self, id: RegionId, region: Region) {
        self.regions.insert(id, region);
    }

    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        self.regions.remove(&id)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    pub fn html(&self, id: RegionId) -> Option<String> {
        self.region(id).map(Region::html)
    }

    pub fn item_ids(&self, id: RegionId) -> Result<Vec<String>, SurfaceError> {
        self.region(id)
            .map(Region::item_ids)
            .ok_or(SurfaceError::MissingRegion(id.element_id()))
    }

    pub fn bind_sortable(
        &mut self,
        id: RegionId,
        options: SortableOptions,
    ) -> Result<(), SurfaceError> {
        let region = self
            .regions
            .get_mut(&id)
            .ok_or(SurfaceError::MissingRegion(id.element_id()))?;
        region.sortable = Some(options);
        Ok(())
    }

    /// Moves the child at `from` so that it ends up at `to`, the way a
    /// completed drag leaves the container.
    pub fn drag(&mut self, id: RegionId, from: usize, to: usize) -> Result<(), SurfaceError> {
        let element_id = id.element_id();
        let region = self
            .regions
            .get_mut(&id)
            .ok_or(SurfaceError::MissingRegion(element_id))?;
        if region.sortable.is_none() {
            return Err(SurfaceError::NotSortable(element_id));
        }
        let len = region.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(SurfaceError::OutOfRange {
                    region: element_id,
                    index,
                    len,
                });
            }
        }
        let item = region.items.remove(from);
        region.items.insert(to, item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::reorder::ReorderableList;

    fn sortable_list(ids: &[&str]) -> Surface {
        let mut surface = Surface::new();
        let items = ids
            .iter()
            .map(|id| RegionItem::new(*id, format!("<li>{id}</li>")))
            .collect();
        surface.replace(RegionId::ProvidersList, Region::list(items, "<p>empty</p>"));
        surface
            .bind_sortable(
                RegionId::ProvidersList,
                ReorderableList::Providers.options(),
            )
            .expect("bind");
        surface
    }

    #[test]
    fn drag_moves_item_to_target_position() {
        let mut surface = sortable_list(&["a", "b", "c"]);
        surface
            .drag(RegionId::ProvidersList, 0, 2)
            .expect("drag forward");
        assert_eq!(
            surface.item_ids(RegionId::ProvidersList).expect("ids"),
            vec!["b", "c", "a"]
        );
        surface.drag(RegionId::ProvidersList, 2, 0).expect("drag back");
        assert_eq!(
            surface.html(RegionId::ProvidersList).expect("html"),
            "<li>a</li><li>b</li><li>c</li>"
        );
    }

    #[test]
    fn drag_requires_binding_and_valid_positions() {
        let mut surface = sortable_list(&["a"]);
        assert_eq!(
            surface.drag(RegionId::ProvidersList, 0, 1),
            Err(SurfaceError::OutOfRange {
                region: "providers-list",
                index: 1,
                len: 1
            })
        );

        surface.replace(
            RegionId::ProvidersList,
            Region::list(vec![RegionItem::new("a", "a"), RegionItem::new("b", "b")], ""),
        );
        assert_eq!(
            surface.drag(RegionId::ProvidersList, 0, 1),
            Err(SurfaceError::NotSortable("providers-list"))
        );
        assert_eq!(
            surface.drag(RegionId::ModelsList, 0, 1),
            Err(SurfaceError::MissingRegion("models-list"))
        );
    }

    #[test]
    fn empty_list_region_shows_its_empty_state() {
        let region = Region::list(Vec::new(), "<p>nothing</p>");
        assert!(region.is_empty());
        assert_eq!(region.html(), "<p>nothing</p>");
    }
}

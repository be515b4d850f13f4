//! Cell classification values.
//!
//! A [`Region`] is the tagged classification of one cell. Merge decisions
//! only ever look at the derived [`RegionKey`]; the [`EdgeLabel`] and
//! auxiliary id ride along on emitted segments for the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used when a group has no usable type name.
pub const DEFAULT_GROUP_LABEL: &str = "town";

/// Tagged classification of a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Unclaimed land
    Wilderness,
    /// Claimed by an owner, outside any group
    Owned { owner: String },
    /// Part of an owner-defined group
    Group {
        owner: String,
        group: String,
        type_name: String,
    },
    /// The owner's designated home cell
    Home { owner: String },
    /// Member of a caller-supplied selection
    Selection,
    /// Anything not in the selection
    Outside,
}

/// Merge identity of a cell. Adjacent cells with equal keys never border.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKey {
    Wilderness,
    Owner(String),
    Group(String),
    Home(String),
    Selection,
    Outside,
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionKey::Wilderness => write!(f, "wilderness"),
            RegionKey::Owner(owner) => write!(f, "owner:{}", owner),
            RegionKey::Group(group) => write!(f, "group:{}", group),
            RegionKey::Home(owner) => write!(f, "home:{}", owner),
            RegionKey::Selection => write!(f, "selection"),
            RegionKey::Outside => write!(f, "outside"),
        }
    }
}

/// Render classification attached to emitted segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EdgeLabel {
    Wilderness,
    Town,
    Homeblock,
    /// Lowercased group type name
    GroupType(String),
    Selection,
    Outside,
}

impl EdgeLabel {
    /// Label for a group with the given type name.
    ///
    /// Lowercases the name and falls back to `town` when it is blank.
    pub fn for_group_type(type_name: &str) -> Self {
        let trimmed = type_name.trim();
        if trimmed.is_empty() {
            return EdgeLabel::Town;
        }
        Self::from(trimmed.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        match self {
            EdgeLabel::Wilderness => "wilderness",
            EdgeLabel::Town => DEFAULT_GROUP_LABEL,
            EdgeLabel::Homeblock => "homeblock",
            EdgeLabel::GroupType(name) => name,
            EdgeLabel::Selection => "selection",
            EdgeLabel::Outside => "outside",
        }
    }
}

impl From<String> for EdgeLabel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "wilderness" => EdgeLabel::Wilderness,
            "town" => EdgeLabel::Town,
            "homeblock" => EdgeLabel::Homeblock,
            "selection" => EdgeLabel::Selection,
            "outside" => EdgeLabel::Outside,
            _ => EdgeLabel::GroupType(s),
        }
    }
}

impl From<EdgeLabel> for String {
    fn from(label: EdgeLabel) -> Self {
        match label {
            EdgeLabel::GroupType(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one cell, as produced by a classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellDescriptor {
    region: Region,
}

impl CellDescriptor {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    pub fn wilderness() -> Self {
        Self::new(Region::Wilderness)
    }

    pub fn owned(owner: impl Into<String>) -> Self {
        Self::new(Region::Owned {
            owner: owner.into(),
        })
    }

    pub fn home(owner: impl Into<String>) -> Self {
        Self::new(Region::Home {
            owner: owner.into(),
        })
    }

    pub fn group(
        owner: impl Into<String>,
        group: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(Region::Group {
            owner: owner.into(),
            group: group.into(),
            type_name: type_name.into(),
        })
    }

    pub fn selection() -> Self {
        Self::new(Region::Selection)
    }

    pub fn outside() -> Self {
        Self::new(Region::Outside)
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Merge identity.
    pub fn region_key(&self) -> RegionKey {
        match &self.region {
            Region::Wilderness => RegionKey::Wilderness,
            Region::Owned { owner } => RegionKey::Owner(owner.clone()),
            Region::Group { group, .. } => RegionKey::Group(group.clone()),
            Region::Home { owner } => RegionKey::Home(owner.clone()),
            Region::Selection => RegionKey::Selection,
            Region::Outside => RegionKey::Outside,
        }
    }

    /// Whether two cells belong to the same region.
    ///
    /// Equivalent to comparing `region_key()` without allocating.
    pub fn same_region(&self, other: &CellDescriptor) -> bool {
        match (&self.region, &other.region) {
            (Region::Wilderness, Region::Wilderness)
            | (Region::Selection, Region::Selection)
            | (Region::Outside, Region::Outside) => true,
            (Region::Owned { owner: a }, Region::Owned { owner: b }) => a == b,
            (Region::Home { owner: a }, Region::Home { owner: b }) => a == b,
            (Region::Group { group: a, .. }, Region::Group { group: b, .. }) => a == b,
            _ => false,
        }
    }

    pub fn edge_label(&self) -> EdgeLabel {
        match &self.region {
            Region::Wilderness => EdgeLabel::Wilderness,
            Region::Owned { .. } => EdgeLabel::Town,
            Region::Group { type_name, .. } => EdgeLabel::for_group_type(type_name),
            Region::Home { .. } => EdgeLabel::Homeblock,
            Region::Selection => EdgeLabel::Selection,
            Region::Outside => EdgeLabel::Outside,
        }
    }

    /// Secondary identifier carried on segments (the group id).
    pub fn aux_id(&self) -> Option<&str> {
        match &self.region {
            Region::Group { group, .. } => Some(group),
            _ => None,
        }
    }
}

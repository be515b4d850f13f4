//! Read-only ownership data consulted by the full classifier.
//!
//! [`LandSnapshot`] resolves a [`LandDocument`] once into a flat index from
//! cell to [`CellClaim`], so classification never walks owner or group
//! records again.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coords::GridCoordinate;
use crate::error::{LookupError, OutlineError, Result};

/// Ownership of a single claimed cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellClaim {
    pub owner: String,
    pub group: Option<GroupClaim>,
    /// The cell is the owner's designated home cell
    pub is_home: bool,
}

/// Group a claimed cell belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupClaim {
    pub id: String,
    pub type_name: String,
}

/// Source of ownership answers, keyed by grid cell.
///
/// Implementations are best-effort read snapshots: answers may be stale,
/// and a lookup that cannot be answered returns a [`LookupError`].
pub trait OwnershipOracle: Sync {
    /// `Ok(None)` for unclaimed cells.
    fn claim_at(&self, coord: GridCoordinate) -> std::result::Result<Option<CellClaim>, LookupError>;
}

/// An owner and its optional home cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<GridCoordinate>,
}

/// A group of cells inside one owner's land.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: String,
    pub owner: String,
    #[serde(default)]
    pub type_name: String,
}

/// A claimed cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimEntry {
    pub x: i32,
    pub z: i32,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Serialized ownership data, as exchanged with the surrounding system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandDocument {
    #[serde(default)]
    pub owners: Vec<OwnerEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub claims: Vec<ClaimEntry>,
    /// Cells whose ownership data is not available
    #[serde(default)]
    pub unloaded: Vec<GridCoordinate>,
}

/// Indexed, immutable ownership snapshot.
#[derive(Clone, Debug, Default)]
pub struct LandSnapshot {
    claims: HashMap<GridCoordinate, CellClaim>,
    unloaded: HashSet<GridCoordinate>,
}

impl LandSnapshot {
    /// Resolve a document into an index.
    ///
    /// Fails on duplicate claims, unknown owners or groups, and claims
    /// placing a cell in another owner's group.
    pub fn from_document(doc: &LandDocument) -> Result<Self> {
        let mut homes: HashMap<&str, Option<GridCoordinate>> = HashMap::new();
        for owner in &doc.owners {
            if homes.insert(owner.name.as_str(), owner.home).is_some() {
                return Err(OutlineError::Snapshot(format!(
                    "owner '{}' is listed twice",
                    owner.name
                )));
            }
        }

        let mut groups: HashMap<&str, &GroupEntry> = HashMap::new();
        for group in &doc.groups {
            if !homes.contains_key(group.owner.as_str()) {
                return Err(OutlineError::Snapshot(format!(
                    "group '{}' belongs to unknown owner '{}'",
                    group.id, group.owner
                )));
            }
            if groups.insert(group.id.as_str(), group).is_some() {
                return Err(OutlineError::Snapshot(format!(
                    "group '{}' is listed twice",
                    group.id
                )));
            }
        }

        let mut claims = HashMap::with_capacity(doc.claims.len());
        for entry in &doc.claims {
            let coord = GridCoordinate::new(entry.x, entry.z);
            let home = homes.get(entry.owner.as_str()).ok_or_else(|| {
                OutlineError::Snapshot(format!(
                    "claim at {} names unknown owner '{}'",
                    coord, entry.owner
                ))
            })?;

            let group = match &entry.group {
                None => None,
                Some(id) => {
                    let group = groups.get(id.as_str()).ok_or_else(|| {
                        OutlineError::Snapshot(format!(
                            "claim at {} names unknown group '{}'",
                            coord, id
                        ))
                    })?;
                    if group.owner != entry.owner {
                        return Err(OutlineError::Snapshot(format!(
                            "claim at {} by '{}' uses group '{}' of '{}'",
                            coord, entry.owner, id, group.owner
                        )));
                    }
                    Some(GroupClaim {
                        id: group.id.clone(),
                        type_name: group.type_name.clone(),
                    })
                }
            };

            let claim = CellClaim {
                owner: entry.owner.clone(),
                group,
                is_home: *home == Some(coord),
            };
            if claims.insert(coord, claim).is_some() {
                return Err(OutlineError::Snapshot(format!(
                    "cell {} is claimed twice",
                    coord
                )));
            }
        }

        // Homes pointing at cells the owner does not hold are dropped
        for owner in &doc.owners {
            if let Some(home) = owner.home {
                let held = claims.get(&home).is_some_and(|c| c.owner == owner.name);
                if !held {
                    warn!("home cell {} of '{}' is not claimed by it, ignoring", home, owner.name);
                }
            }
        }

        debug!(
            "indexed {} claims for {} owners and {} groups",
            claims.len(),
            doc.owners.len(),
            doc.groups.len()
        );

        Ok(Self {
            claims,
            unloaded: doc.unloaded.iter().copied().collect(),
        })
    }

    /// Read a JSON document from disk and index it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let doc: LandDocument = serde_json::from_str(&text)?;
        Self::from_document(&doc)
    }

    /// Number of claimed cells.
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Mark a cell as unavailable; later lookups for it fail.
    pub fn mark_unloaded(&mut self, coord: GridCoordinate) {
        self.unloaded.insert(coord);
    }

    /// Iterate over all claimed cells.
    pub fn claimed_cells(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.claims.keys().copied()
    }
}

impl OwnershipOracle for LandSnapshot {
    fn claim_at(&self, coord: GridCoordinate) -> std::result::Result<Option<CellClaim>, LookupError> {
        if self.unloaded.contains(&coord) {
            return Err(LookupError::Unloaded(coord));
        }
        Ok(self.claims.get(&coord).cloned())
    }
}

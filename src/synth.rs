//! Synthetic land generation.
//!
//! Grows owner claims outward from seed cells with a randomized flood fill,
//! assigns home cells and carves some claims into groups. Used for demos
//! and for exercising the extractor on irregular layouts.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::coords::{GridCoordinate, GridWindow};
use crate::registry::{ClaimEntry, GroupEntry, LandDocument, OwnerEntry};

/// Group type names handed out to generated groups. The blank entry
/// exercises the `town` fallback label.
const GROUP_TYPES: &[&str] = &["shop", "arena", "embassy", "farm", "inn", ""];

/// Parameters for synthetic land generation.
#[derive(Clone, Debug)]
pub struct SynthParams {
    /// Area the claims are generated in
    pub window: GridWindow,
    /// Number of owners to place
    pub owners: usize,
    /// Range of claim sizes per owner, in cells
    pub claim_size: (usize, usize),
    /// Chance that a claimed neighbour is accepted during growth
    pub spread: f64,
    /// Maximum number of groups per owner
    pub max_groups: usize,
    /// Chance that a cell is reported as unloaded
    pub unloaded_chance: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            window: GridWindow {
                min_x: -32,
                max_x: 31,
                min_z: -32,
                max_z: 31,
            },
            owners: 6,
            claim_size: (20, 80),
            spread: 0.7,
            max_groups: 2,
            unloaded_chance: 0.0,
        }
    }
}

/// Generate a land document from a seed.
///
/// The same seed and parameters always produce the same document.
pub fn generate_land(params: &SynthParams, seed: u64) -> LandDocument {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(0x1A4D_C1A1));
    let window = params.window;

    let mut taken: HashMap<GridCoordinate, usize> = HashMap::new();
    let mut doc = LandDocument::default();

    for index in 0..params.owners {
        let name = format!("owner{}", index);

        // A few tries to land on a free cell, then give up on this owner
        let center = (0..16)
            .map(|_| {
                GridCoordinate::new(
                    rng.gen_range(window.min_x..=window.max_x),
                    rng.gen_range(window.min_z..=window.max_z),
                )
            })
            .find(|c| !taken.contains_key(c));
        let Some(center) = center else {
            debug!("no free cell for {}, skipping", name);
            continue;
        };

        let (lo, hi) = params.claim_size;
        let target = rng.gen_range(lo.max(1)..=hi.max(lo.max(1)));
        let cells = grow_claim(center, target, params.spread, &window, &taken, &mut rng);
        for &cell in &cells {
            taken.insert(cell, index);
        }

        let groups = assign_groups(&name, &cells, center, params.max_groups, &mut rng);

        let mut ordered: Vec<_> = cells.into_iter().collect();
        ordered.sort();
        for cell in ordered {
            let group = groups
                .iter()
                .find(|(_, members)| members.contains(&cell))
                .map(|(entry, _)| entry.id.clone());
            doc.claims.push(ClaimEntry {
                x: cell.x,
                z: cell.z,
                owner: name.clone(),
                group,
            });
        }
        doc.groups.extend(groups.into_iter().map(|(entry, _)| entry));
        doc.owners.push(OwnerEntry {
            name,
            home: Some(center),
        });
    }

    if params.unloaded_chance > 0.0 {
        doc.unloaded = window
            .iter()
            .filter(|_| rng.gen_bool(params.unloaded_chance.min(1.0)))
            .collect();
    }

    debug!(
        "generated {} owners, {} groups, {} claims",
        doc.owners.len(),
        doc.groups.len(),
        doc.claims.len()
    );
    doc
}

/// Randomized 4-connected flood fill from `center`.
fn grow_claim(
    center: GridCoordinate,
    target: usize,
    spread: f64,
    window: &GridWindow,
    taken: &HashMap<GridCoordinate, usize>,
    rng: &mut ChaCha8Rng,
) -> HashSet<GridCoordinate> {
    let mut cells = HashSet::new();
    let mut queue = VecDeque::new();

    cells.insert(center);
    queue.push_back(center);

    while let Some(cell) = queue.pop_front() {
        if cells.len() >= target {
            break;
        }

        for next in cell.neighbors() {
            if cells.contains(&next) || taken.contains_key(&next) || !window.contains(next) {
                continue;
            }
            if rng.gen_bool(spread.clamp(0.0, 1.0)) {
                cells.insert(next);
                queue.push_back(next);
                if cells.len() >= target {
                    break;
                }
            }
        }

        // Keep growing from the frontier if the fill stalled early
        if queue.is_empty() && cells.len() < target && spread > 0.0 {
            let mut frontier: Vec<_> = cells.iter().copied().collect();
            frontier.sort();
            frontier.shuffle(rng);
            if let Some(&restart) = frontier.iter().find(|c| {
                c.neighbors()
                    .iter()
                    .any(|n| !cells.contains(n) && !taken.contains_key(n) && window.contains(*n))
            }) {
                queue.push_back(restart);
            }
        }
    }

    cells
}

/// Carve up to `max_groups` small groups out of an owner's cells, never
/// touching the home cell.
fn assign_groups(
    owner: &str,
    cells: &HashSet<GridCoordinate>,
    home: GridCoordinate,
    max_groups: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<(GroupEntry, HashSet<GridCoordinate>)> {
    let mut available: Vec<_> = cells.iter().copied().filter(|&c| c != home).collect();
    available.sort();

    let count = if max_groups == 0 {
        0
    } else {
        rng.gen_range(0..=max_groups)
    };

    let mut used: HashSet<GridCoordinate> = HashSet::new();
    let mut groups = Vec::new();
    for index in 0..count {
        let free: Vec<_> = available.iter().copied().filter(|c| !used.contains(c)).collect();
        let Some(&seed) = free.choose(rng) else {
            break;
        };

        // Group is the seed plus whichever free owned neighbours it has
        let mut members = HashSet::new();
        members.insert(seed);
        for n in seed.neighbors() {
            if cells.contains(&n) && n != home && !used.contains(&n) && rng.gen_bool(0.5) {
                members.insert(n);
            }
        }
        used.extend(members.iter().copied());

        let type_name = GROUP_TYPES.choose(rng).copied().unwrap_or_default();
        groups.push((
            GroupEntry {
                id: format!("{}-g{}", owner, index),
                owner: owner.to_string(),
                type_name: type_name.to_string(),
            },
            members,
        ));
    }
    groups
}

use crate::domain::model::ShelfRecord;
use crate::utils::error::{AllocError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static GROUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid literal pattern"));

/// Derives the grouping key from a shelf identifier: the first maximal run
/// of decimal digits, or the empty string when the id has none. Computed
/// once at index-build time.
pub fn extract_group(id: &str) -> String {
    GROUP_PATTERN
        .find(id)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    pub id: String,
    pub group: String,
    pub count: u32,
}

/// In-memory view of the shelf set: a dense array sorted by (group, id)
/// plus an id lookup. All occupancy mutation goes through `increment`;
/// counts only ever grow within a run.
#[derive(Debug, Clone)]
pub struct ShelfIndex {
    shelves: Vec<Shelf>,
    by_id: HashMap<String, usize>,
}

impl ShelfIndex {
    pub fn build(records: &[ShelfRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(AllocError::EmptyShelfSet);
        }

        let mut shelves: Vec<Shelf> = records
            .iter()
            .map(|r| Shelf {
                id: r.id.clone(),
                group: extract_group(&r.id),
                count: r.count,
            })
            .collect();
        shelves.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.id.cmp(&b.id)));

        let mut by_id = HashMap::with_capacity(shelves.len());
        for (pos, shelf) in shelves.iter().enumerate() {
            if by_id.insert(shelf.id.clone(), pos).is_some() {
                return Err(AllocError::DuplicateShelfId {
                    id: shelf.id.clone(),
                });
            }
        }

        Ok(Self { shelves, by_id })
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    /// Non-empty groups in index order, deduplicated. The empty group is
    /// a placeholder for shelves without a derivable key and never takes
    /// part in group-level balancing.
    pub fn groups(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for shelf in &self.shelves {
            if shelf.group.is_empty() {
                continue;
            }
            if out.last().copied() != Some(shelf.group.as_str()) {
                out.push(&shelf.group);
            }
        }
        out
    }

    /// Sum of counts over one group; `None` when the group is absent or
    /// would only match the empty-group placeholder.
    pub fn group_total(&self, group: &str) -> Option<u32> {
        if group.is_empty() {
            return None;
        }
        let mut total = None;
        for shelf in &self.shelves {
            if shelf.group == group {
                *total.get_or_insert(0u32) += shelf.count;
            }
        }
        total
    }

    /// Group with the minimal occupancy total; ties go to the first group
    /// in index order.
    pub fn least_loaded_group(&self) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for group in self.groups() {
            let total = self.group_total(group).unwrap_or(0);
            let better = match best {
                None => true,
                Some((_, t)) => total < t,
            };
            if better {
                best = Some((group, total));
            }
        }
        best.map(|(group, _)| group)
    }

    pub fn min_by_count(&self) -> Option<&Shelf> {
        self.min_shelf(|_| true)
    }

    pub fn min_in_group(&self, group: &str) -> Option<&Shelf> {
        self.min_shelf(|shelf| shelf.group == group)
    }

    // Strict comparison keeps the earliest candidate on ties, so the
    // pre-sorted (group, id) order is the tie-break.
    fn min_shelf<F: Fn(&Shelf) -> bool>(&self, keep: F) -> Option<&Shelf> {
        let mut best: Option<&Shelf> = None;
        for shelf in self.shelves.iter().filter(|s| keep(s)) {
            let better = match best {
                None => true,
                Some(b) => shelf.count < b.count,
            };
            if better {
                best = Some(shelf);
            }
        }
        best
    }

    pub fn increment(&mut self, shelf_id: &str) -> Result<()> {
        let pos = self
            .by_id
            .get(shelf_id)
            .copied()
            .ok_or_else(|| AllocError::UnknownShelf {
                id: shelf_id.to_string(),
            })?;
        self.shelves[pos].count += 1;
        Ok(())
    }

    /// Final occupancy snapshot in index order.
    pub fn snapshot(&self) -> Vec<ShelfRecord> {
        self.shelves
            .iter()
            .map(|s| ShelfRecord {
                id: s.id.clone(),
                count: s.count,
            })
            .collect()
    }
}

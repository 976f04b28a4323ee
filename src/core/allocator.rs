use crate::core::index::ShelfIndex;
use crate::domain::model::{AllocationMode, AllocationOutcome, Assignment, ItemRecord, ShelfRecord};
use crate::utils::error::{AllocError, Result};

/// Places every item on a shelf, strictly in input order. Each decision
/// increments the chosen shelf before the next item is considered, so
/// later placements see the updated occupancy landscape. Assignments are
/// never revisited.
pub fn allocate(
    shelves: &[ShelfRecord],
    items: &[ItemRecord],
    mode: AllocationMode,
) -> Result<AllocationOutcome> {
    let mut index = ShelfIndex::build(shelves)?;

    let mut assignments = Vec::with_capacity(items.len());
    for (item_index, item) in items.iter().enumerate() {
        let shelf_id = select_shelf(&index, mode, item.group_hint.as_deref())?;
        index.increment(&shelf_id)?;
        tracing::debug!(item = item_index, shelf = %shelf_id, "placed item");
        assignments.push(Assignment {
            item_index,
            shelf_id,
        });
    }

    Ok(AllocationOutcome {
        assignments,
        shelves: index.snapshot(),
    })
}

// Resolution chain, first match wins: explicit hint (hinted mode only),
// least-loaded group, global least-loaded shelf.
fn select_shelf(index: &ShelfIndex, mode: AllocationMode, hint: Option<&str>) -> Result<String> {
    if mode == AllocationMode::Ungrouped {
        return global_pick(index);
    }

    let hinted = match (mode, hint) {
        (AllocationMode::GroupedHinted, Some(h)) if !h.trim().is_empty() => {
            resolve_hint(index, h)
        }
        _ => None,
    };

    let group = hinted.or_else(|| index.least_loaded_group().map(str::to_string));

    match group {
        Some(group) => match index.min_in_group(&group) {
            Some(shelf) => Ok(shelf.id.clone()),
            None => {
                // Group total existed but no member shelves enumerate to it.
                // Recover for this item only; the batch continues.
                tracing::debug!(%group, "group resolved with no member shelves, using global fallback");
                global_pick(index)
            }
        },
        None => global_pick(index),
    }
}

/// Maps a hint to an existing group: exact match first, then the first
/// group in index order whose name ends with the hint (covers numeric
/// padding mismatches such as hint "1" against group "001"). The hint is
/// matched verbatim, no normalization. An unresolvable hint is not an
/// error; the caller falls through to balancing.
fn resolve_hint(index: &ShelfIndex, hint: &str) -> Option<String> {
    let groups = index.groups();
    if groups.iter().any(|g| *g == hint) {
        return Some(hint.to_string());
    }
    groups
        .iter()
        .find(|g| g.ends_with(hint))
        .map(|g| g.to_string())
}

fn global_pick(index: &ShelfIndex) -> Result<String> {
    index
        .min_by_count()
        .map(|shelf| shelf.id.clone())
        .ok_or(AllocError::EmptyShelfSet)
}

use serde::{Deserialize, Serialize};

/// One storage location as it appears in the input snapshot and in the
/// final occupancy snapshot: identifier plus current number of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRecord {
    pub id: String,
    pub count: u32,
}

/// One item to place. `group_hint` is the caller-supplied target group,
/// matched verbatim by the allocator; `fields` carries the raw input
/// columns through to the output, aligned with
/// `AllocationInput::item_headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub group_hint: Option<String>,
    pub fields: Vec<String>,
}

/// Placement decision for one item, positionally aligned with the input
/// item sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub item_index: usize,
    pub shelf_id: String,
}

/// Which resolution chain the allocator runs for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum AllocationMode {
    /// Global least-loaded shelf, groups ignored entirely.
    Ungrouped,
    /// Least-loaded group by total, then least-loaded shelf within it.
    GroupedBalanced,
    /// Per-item group hint when resolvable, otherwise balanced.
    GroupedHinted,
}

#[derive(Debug, Clone)]
pub struct AllocationInput {
    pub shelves: Vec<ShelfRecord>,
    pub items: Vec<ItemRecord>,
    pub item_headers: Vec<String>,
}

/// Result of one allocation run: assignments in item order plus the
/// shelf snapshot with all increments applied, in (group, id) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub assignments: Vec<Assignment>,
    pub shelves: Vec<ShelfRecord>,
}

/// Headline numbers for the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub shelf_count: usize,
    pub total_occupancy: u64,
    pub placed_items: usize,
    pub fullest_shelf: String,
    pub emptiest_shelf: String,
    pub fill_gap: u32,
}

#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub outcome: AllocationOutcome,
    pub summary: Summary,
    pub assignments_csv: String,
    pub shelves_csv: String,
    pub ranking_csv: String,
    pub summary_csv: String,
}

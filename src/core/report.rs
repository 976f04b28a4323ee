use crate::domain::model::{ShelfRecord, Summary};

/// Headline numbers computed from the final snapshot, mirroring the
/// summary sheet of the result workbook. `None` only when the snapshot is
/// empty, which an allocation run never produces.
pub fn summarize(shelves: &[ShelfRecord], placed_items: usize) -> Option<Summary> {
    let mut fullest: Option<&ShelfRecord> = None;
    let mut emptiest: Option<&ShelfRecord> = None;

    for shelf in shelves {
        // Strict comparisons keep the first occurrence on ties.
        if fullest.map(|s| shelf.count > s.count).unwrap_or(true) {
            fullest = Some(shelf);
        }
        if emptiest.map(|s| shelf.count < s.count).unwrap_or(true) {
            emptiest = Some(shelf);
        }
    }

    let (fullest, emptiest) = (fullest?, emptiest?);

    Some(Summary {
        shelf_count: shelves.len(),
        total_occupancy: shelves.iter().map(|s| u64::from(s.count)).sum(),
        placed_items,
        fullest_shelf: fullest.id.clone(),
        emptiest_shelf: emptiest.id.clone(),
        fill_gap: fullest.count - emptiest.count,
    })
}

/// Occupancy relative to the maximum observed count, as a percentage
/// rounded to one decimal. Zero when nothing is stored anywhere.
pub fn occupancy_percent(count: u32, max_count: u32) -> f64 {
    if max_count == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(max_count) * 1000.0).round() / 10.0
}

/// Shelves ordered by descending occupancy. The sort is stable, so ties
/// keep the snapshot's (group, id) order.
pub fn occupancy_ranking(shelves: &[ShelfRecord]) -> Vec<ShelfRecord> {
    let mut ranked = shelves.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelves(data: &[(&str, u32)]) -> Vec<ShelfRecord> {
        data.iter()
            .map(|(id, count)| ShelfRecord {
                id: id.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&shelves(&[("001A", 3), ("001B", 5), ("002A", 2)]), 4).unwrap();

        assert_eq!(summary.shelf_count, 3);
        assert_eq!(summary.total_occupancy, 10);
        assert_eq!(summary.placed_items, 4);
        assert_eq!(summary.fullest_shelf, "001B");
        assert_eq!(summary.emptiest_shelf, "002A");
        assert_eq!(summary.fill_gap, 3);
    }

    #[test]
    fn test_summarize_tie_takes_first_occurrence() {
        let summary = summarize(&shelves(&[("001A", 2), ("001B", 2)]), 0).unwrap();
        assert_eq!(summary.fullest_shelf, "001A");
        assert_eq!(summary.emptiest_shelf, "001A");
        assert_eq!(summary.fill_gap, 0);
    }

    #[test]
    fn test_summarize_empty_snapshot() {
        assert!(summarize(&[], 0).is_none());
    }

    #[test]
    fn test_occupancy_percent() {
        assert_eq!(occupancy_percent(5, 10), 50.0);
        assert_eq!(occupancy_percent(1, 3), 33.3);
        assert_eq!(occupancy_percent(10, 10), 100.0);
        assert_eq!(occupancy_percent(0, 0), 0.0);
    }

    #[test]
    fn test_occupancy_ranking_is_stable() {
        let ranked = occupancy_ranking(&shelves(&[("001A", 2), ("001B", 7), ("002A", 2)]));
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["001B", "001A", "002A"]);
    }
}

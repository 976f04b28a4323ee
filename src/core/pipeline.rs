use crate::core::allocator::allocate;
use crate::core::report::{occupancy_percent, occupancy_ranking, summarize};
use crate::core::{AllocationInput, AllocationReport, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Assignment, ItemRecord, ShelfRecord, Summary};
use crate::utils::error::{AllocError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const SHELF_COLUMN: &str = "shelf_id";
const COUNT_COLUMN: &str = "count";
const ASSIGNED_COLUMN: &str = "assigned_shelf";

/// Reads the shelf and item sheets as CSV through `Storage`, runs the
/// allocator, and bundles the result tables into one zip archive.
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    async fn extract(&self) -> Result<AllocationInput> {
        tracing::debug!("Reading shelf sheet from: {}", self.config.shelves_file());
        let shelf_bytes = self.storage.read_file(self.config.shelves_file()).await?;
        let shelves = parse_shelves(&shelf_bytes)?;

        tracing::debug!("Reading item sheet from: {}", self.config.items_file());
        let item_bytes = self.storage.read_file(self.config.items_file()).await?;
        let (items, item_headers) = parse_items(&item_bytes, self.config.hint_column())?;

        Ok(AllocationInput {
            shelves,
            items,
            item_headers,
        })
    }

    async fn transform(&self, input: AllocationInput) -> Result<AllocationReport> {
        let outcome = allocate(&input.shelves, &input.items, self.config.mode())?;

        let summary = summarize(&outcome.shelves, input.items.len()).ok_or_else(|| {
            AllocError::ProcessingError {
                message: "allocation produced an empty shelf snapshot".to_string(),
            }
        })?;

        let assignments_csv = render_assignments(&input, &outcome.assignments)?;
        let shelves_csv = render_shelves(&outcome.shelves)?;
        let ranking_csv = render_ranking(&outcome.shelves)?;
        let summary_csv = render_summary(&summary)?;

        Ok(AllocationReport {
            outcome,
            summary,
            assignments_csv,
            shelves_csv,
            ranking_csv,
            summary_csv,
        })
    }

    async fn load(&self, report: AllocationReport) -> Result<String> {
        let output_path = format!("{}/allocation_output.zip", self.config.output_path());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("assignments.csv", FileOptions::default())?;
            zip.write_all(report.assignments_csv.as_bytes())?;

            zip.start_file::<_, ()>("shelves_updated.csv", FileOptions::default())?;
            zip.write_all(report.shelves_csv.as_bytes())?;

            zip.start_file::<_, ()>("occupancy_ranking.csv", FileOptions::default())?;
            zip.write_all(report.ranking_csv.as_bytes())?;

            zip.start_file::<_, ()>("summary.csv", FileOptions::default())?;
            zip.write_all(report.summary_csv.as_bytes())?;

            zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&report.summary)?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing zip archive ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&output_path, &zip_data).await?;

        Ok(output_path)
    }
}

fn parse_shelves(data: &[u8]) -> Result<Vec<ShelfRecord>> {
    let mut reader = csv::Reader::from_reader(data);
    let headers = reader.headers()?.clone();

    let shelf_idx = headers
        .iter()
        .position(|h| h.trim() == SHELF_COLUMN)
        .ok_or_else(|| AllocError::MissingInputColumn {
            column: SHELF_COLUMN.to_string(),
            sheet: "shelves".to_string(),
        })?;
    let count_idx = headers
        .iter()
        .position(|h| h.trim() == COUNT_COLUMN)
        .ok_or_else(|| AllocError::MissingInputColumn {
            column: COUNT_COLUMN.to_string(),
            sheet: "shelves".to_string(),
        })?;

    let mut shelves = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = record.get(shelf_idx).unwrap_or("").trim().to_string();
        if id.is_empty() {
            continue;
        }
        let raw_count = record.get(count_idx).unwrap_or("").trim();
        let count = raw_count
            .parse::<u32>()
            .map_err(|_| AllocError::ProcessingError {
                message: format!("invalid count '{}' for shelf '{}'", raw_count, id),
            })?;
        shelves.push(ShelfRecord { id, count });
    }

    Ok(shelves)
}

fn parse_items(data: &[u8], hint_column: &str) -> Result<(Vec<ItemRecord>, Vec<String>)> {
    let mut reader = csv::Reader::from_reader(data);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    // The hint column is optional; without it every hint is absent.
    let hint_idx = headers.iter().position(|h| h.trim() == hint_column);

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();
        let group_hint = hint_idx
            .map(|i| record.get(i).unwrap_or("").trim())
            .filter(|hint| !hint.is_empty())
            .map(str::to_string);
        items.push(ItemRecord { group_hint, fields });
    }

    Ok((items, headers))
}

fn render_assignments(input: &AllocationInput, assignments: &[Assignment]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header_row = input.item_headers.clone();
    header_row.push(ASSIGNED_COLUMN.to_string());
    writer.write_record(&header_row)?;

    for assignment in assignments {
        let item = &input.items[assignment.item_index];
        let mut row = item.fields.clone();
        row.push(assignment.shelf_id.clone());
        writer.write_record(&row)?;
    }

    into_csv_string(writer)
}

fn render_shelves(shelves: &[ShelfRecord]) -> Result<String> {
    let max_count = shelves.iter().map(|s| s.count).max().unwrap_or(0);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([SHELF_COLUMN, COUNT_COLUMN, "occupancy_pct"])?;
    for shelf in shelves {
        writer.write_record([
            shelf.id.as_str(),
            &shelf.count.to_string(),
            &format!("{:.1}", occupancy_percent(shelf.count, max_count)),
        ])?;
    }

    into_csv_string(writer)
}

fn render_ranking(shelves: &[ShelfRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([SHELF_COLUMN, COUNT_COLUMN])?;
    for shelf in occupancy_ranking(shelves) {
        writer.write_record([shelf.id.as_str(), &shelf.count.to_string()])?;
    }

    into_csv_string(writer)
}

fn render_summary(summary: &Summary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "shelf_count",
        "total_occupancy",
        "placed_items",
        "fullest_shelf",
        "emptiest_shelf",
        "fill_gap",
    ])?;
    writer.write_record([
        summary.shelf_count.to_string(),
        summary.total_occupancy.to_string(),
        summary.placed_items.to_string(),
        summary.fullest_shelf.clone(),
        summary.emptiest_shelf.clone(),
        summary.fill_gap.to_string(),
    ])?;

    into_csv_string(writer)
}

fn into_csv_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AllocError::ProcessingError {
            message: format!("failed to flush CSV output: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| AllocError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

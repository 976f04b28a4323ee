use shelf_alloc::domain::model::AllocationMode;
use shelf_alloc::{AllocEngine, CliConfig, CsvPipeline, LocalStorage};
use std::io::Read;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn read_zip_entry(zip_path: &std::path::Path, entry: &str) -> String {
    let zip_data = std::fs::read(zip_path).unwrap();
    let cursor = std::io::Cursor::new(zip_data);
    let mut archive = zip::ZipArchive::new(cursor).unwrap();
    let mut file = archive.by_name(entry).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_grouped_hinted_run() {
    let temp_dir = TempDir::new().unwrap();

    write_input(&temp_dir, "shelves.csv", "shelf_id,count\n001A,2\n001B,5\n002A,0\n");
    write_input(
        &temp_dir,
        "items.csv",
        "key,requested_group\nK-1,001\nK-2,\nK-3,9\n",
    );

    let config = CliConfig {
        shelves_file: "shelves.csv".to_string(),
        items_file: "items.csv".to_string(),
        output_path: "out".to_string(),
        mode: AllocationMode::GroupedHinted,
        hint_column: "requested_group".to_string(),
        verbose: false,
    };

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = CsvPipeline::new(storage, config);
    let engine = AllocEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    assert_eq!(output_path, "out/allocation_output.zip");

    let zip_path = temp_dir.path().join("out").join("allocation_output.zip");
    assert!(zip_path.exists());

    // K-1 follows its hint into group 001; K-2 balances into the emptier
    // group 002; K-3's hint resolves nowhere and balances there too.
    let assignments = read_zip_entry(&zip_path, "assignments.csv");
    let lines: Vec<&str> = assignments.lines().collect();
    assert_eq!(lines[0], "key,requested_group,assigned_shelf");
    assert_eq!(lines[1], "K-1,001,001A");
    assert_eq!(lines[2], "K-2,,002A");
    assert_eq!(lines[3], "K-3,9,002A");

    let shelves = read_zip_entry(&zip_path, "shelves_updated.csv");
    let shelf_lines: Vec<&str> = shelves.lines().collect();
    assert_eq!(shelf_lines[1], "001A,3,60.0");
    assert_eq!(shelf_lines[2], "001B,5,100.0");
    assert_eq!(shelf_lines[3], "002A,2,40.0");

    let summary: serde_json::Value =
        serde_json::from_str(&read_zip_entry(&zip_path, "summary.json")).unwrap();
    assert_eq!(summary["shelf_count"], 3);
    assert_eq!(summary["total_occupancy"], 10);
    assert_eq!(summary["placed_items"], 3);
    assert_eq!(summary["fullest_shelf"], "001B");
    assert_eq!(summary["emptiest_shelf"], "002A");
    assert_eq!(summary["fill_gap"], 3);
}

#[tokio::test]
async fn test_end_to_end_ungrouped_run() {
    let temp_dir = TempDir::new().unwrap();

    write_input(&temp_dir, "shelves.csv", "shelf_id,count\n001A,2\n001B,5\n002A,0\n");
    write_input(&temp_dir, "items.csv", "key\nK-1\nK-2\nK-3\n");

    let config = CliConfig {
        shelves_file: "shelves.csv".to_string(),
        items_file: "items.csv".to_string(),
        output_path: "out".to_string(),
        mode: AllocationMode::Ungrouped,
        hint_column: "requested_group".to_string(),
        verbose: false,
    };

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = CsvPipeline::new(storage, config);
    let engine = AllocEngine::new(pipeline);

    engine.run().await.unwrap();

    let zip_path = temp_dir.path().join("out").join("allocation_output.zip");
    let assignments = read_zip_entry(&zip_path, "assignments.csv");
    let lines: Vec<&str> = assignments.lines().collect();
    assert_eq!(lines[1], "K-1,002A");
    assert_eq!(lines[2], "K-2,002A");
    assert_eq!(lines[3], "K-3,001A");

    let ranking = read_zip_entry(&zip_path, "occupancy_ranking.csv");
    let ranking_lines: Vec<&str> = ranking.lines().collect();
    assert_eq!(ranking_lines[1], "001B,5");
    assert_eq!(ranking_lines[2], "001A,3");
    assert_eq!(ranking_lines[3], "002A,2");
}

#[tokio::test]
async fn test_missing_shelf_column_aborts_run() {
    let temp_dir = TempDir::new().unwrap();

    write_input(&temp_dir, "shelves.csv", "location,count\n001A,2\n");
    write_input(&temp_dir, "items.csv", "key\nK-1\n");

    let config = CliConfig {
        shelves_file: "shelves.csv".to_string(),
        items_file: "items.csv".to_string(),
        output_path: "out".to_string(),
        mode: AllocationMode::GroupedHinted,
        hint_column: "requested_group".to_string(),
        verbose: false,
    };

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = CsvPipeline::new(storage, config);
    let engine = AllocEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_err());

    // All-or-nothing: no output was produced.
    assert!(!temp_dir.path().join("out").exists());
}

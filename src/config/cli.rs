use crate::core::{ConfigProvider, Storage};
use crate::domain::model::AllocationMode;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "shelf-alloc")]
#[command(about = "Assigns incoming items to the least-loaded shelves")]
pub struct CliConfig {
    #[arg(long, default_value = "shelves.csv")]
    pub shelves_file: String,

    #[arg(long, default_value = "items.csv")]
    pub items_file: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = AllocationMode::GroupedHinted)]
    pub mode: AllocationMode,

    #[arg(long, default_value = "requested_group")]
    pub hint_column: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn shelves_file(&self) -> &str {
        &self.shelves_file
    }

    fn items_file(&self) -> &str {
        &self.items_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn mode(&self) -> AllocationMode {
        self.mode
    }

    fn hint_column(&self) -> &str {
        &self.hint_column
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("shelves_file", &self.shelves_file)?;
        validate_non_empty_string("items_file", &self.items_file)?;
        validate_non_empty_string("hint_column", &self.hint_column)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_extensions(
            "input_files",
            &[self.shelves_file.clone(), self.items_file.clone()],
            &["csv"],
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use core::{allocator::allocate, engine::AllocEngine, pipeline::CsvPipeline};
pub use domain::model::{AllocationMode, Assignment, ItemRecord, ShelfRecord};
pub use utils::error::{AllocError, Result};

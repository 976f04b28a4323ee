pub mod allocator;
pub mod engine;
pub mod index;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    AllocationInput, AllocationMode, AllocationOutcome, AllocationReport, Summary,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives one allocation run end to end: extract the sheets, place every
/// item, write the result archive.
pub struct AllocEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AllocEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting allocation run");

        let input = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} shelves and {} items",
            input.shelves.len(),
            input.items.len()
        );

        let report = self.pipeline.transform(input).await?;
        tracing::info!(
            "Placed {} items, total occupancy now {}",
            report.summary.placed_items,
            report.summary.total_occupancy
        );

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

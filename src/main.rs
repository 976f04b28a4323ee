use clap::Parser;
use shelf_alloc::utils::{logger, validation::Validate};
use shelf_alloc::{AllocEngine, CliConfig, CsvPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting shelf-alloc CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = CsvPipeline::new(storage, config);

    let engine = AllocEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Allocation completed successfully");
            println!("✅ Allocation completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Allocation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

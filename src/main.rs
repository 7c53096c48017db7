use std::process::ExitCode;
use std::sync::Arc;

use kart_frontier::adapters::{
    CsvCatalogSource, CsvFrontierExporter, JsonReportExporter, YamlCatalogSource,
};
use kart_frontier::application::FrontierPipeline;
use kart_frontier::config::AppConfig;
use kart_frontier::domain::foundation::CancellationToken;
use kart_frontier::ports::{CatalogFormat, CatalogSource, FrontierExporter};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let json = config.logging.json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("kart-frontier: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let data = &config.data;
    let source: Arc<dyn CatalogSource> = match data.resolved_format() {
        Some(CatalogFormat::Csv) => Arc::new(
            CsvCatalogSource::new(&data.catalog_path).with_layout(data.sections.layout()),
        ),
        Some(CatalogFormat::Yaml) => Arc::new(YamlCatalogSource::new(&data.catalog_path)),
        None => {
            error!(path = %data.catalog_path.display(), "Unknown catalog format");
            return ExitCode::FAILURE;
        }
    };
    let exporters: Vec<Arc<dyn FrontierExporter>> = vec![
        Arc::new(CsvFrontierExporter::new(&data.output_dir)),
        Arc::new(JsonReportExporter::new(&data.output_dir)),
    ];

    let mut pipeline = FrontierPipeline::new(source, exporters, config.engine.driver_config());
    if let Some(dims) = config.engine.dimensions_list() {
        pipeline = pipeline.with_dimensions(dims);
    }

    match pipeline.run(&CancellationToken::new()) {
        Ok(report) => {
            for skipped in &report.skipped_modes {
                warn!(mode = %skipped.mode, code = %skipped.error_code, "Projection mode skipped");
            }
            for failure in report.failures() {
                warn!(
                    projection = %failure.key,
                    code = failure.error_code.as_deref().unwrap_or("unknown"),
                    "Projection failed"
                );
            }
            info!(
                output_dir = %data.output_dir.display(),
                combinations = report.combination_count,
                projections = report.projections.len(),
                "Frontiers written"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Frontier run failed");
            ExitCode::FAILURE
        }
    }
}

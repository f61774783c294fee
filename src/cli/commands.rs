use anyhow::{bail, Context};
use tracing::error;

use crate::analyzers::SnowmanCalculator;
use crate::api::run_server;
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::SnowmanError;
use crate::processors::{ImportRequest, Importer, RegionRegistry};
use crate::readers::SnowReader;
use crate::store::SnowStore;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref()).context("failed to open log file")?;

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    let store = SnowStore::from_config(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.path.display()))?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(store.clone(), &config.bind_address()).await?;
        }

        Commands::Import {
            name,
            area,
            daily,
            monthly,
            encoding,
        } => {
            let reader = SnowReader::with_encoding(&encoding)?;
            let registry = RegionRegistry::new(store.clone(), config.region_table());
            let importer = Importer::new(registry).with_reader(reader);

            let progress = ProgressReporter::new_spinner(&format!("Importing {}...", name), false);
            let request = ImportRequest::new(&name, area, &daily, &monthly);
            let result = importer.import(&request).await;
            progress.finish_with_message("Import finished");

            match result {
                Ok(report) => println!("Imported {}", report.summary()),
                Err(e) => {
                    let failure = SnowmanError::import_failed(&name, e);
                    error!("{}", failure);
                    bail!(failure);
                }
            }
        }

        Commands::ImportBatch {
            manifest,
            encoding,
            quiet,
        } => {
            let requests = ImportRequest::read_manifest(&manifest)
                .with_context(|| format!("failed to read manifest {}", manifest.display()))?;
            let reader = SnowReader::with_encoding(&encoding)?;
            let registry = RegionRegistry::new(store.clone(), config.region_table());
            let importer = Importer::new(registry).with_reader(reader);

            let progress = ProgressReporter::new(requests.len() as u64, "Importing regions", quiet);
            let outcome = importer.import_all(&requests, &progress).await;
            progress.finish_with_message("Batch finished");

            for report in &outcome.imported {
                println!("✅ {}", report.summary());
            }
            for failure in &outcome.failed {
                println!("❌ {}", failure);
            }

            if !outcome.is_success() {
                bail!(
                    "{} of {} regions failed to import",
                    outcome.failed.len(),
                    requests.len()
                );
            }
        }

        Commands::InitDb => {
            println!("Database ready at {}", config.database.path.display());
        }

        Commands::Regions => {
            let regions = SnowmanCalculator::new(store.clone()).list_regions().await?;
            if regions.is_empty() {
                println!("No regions imported yet");
            }
            for region in regions {
                println!("{:>3}  {}  ({} km²)", region.code, region.name, region.area);
            }
        }
    }

    store.close().await;
    Ok(())
}

//! Txsweep main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use txsweep_api::start_server;
use txsweep_config::Config;
use txsweep_store::DocumentStore;

#[derive(Parser, Debug)]
#[command(name = "txsweep")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight transaction deduplication service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = match Config::load(args.config.clone()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "[WARN] Could not load {}: {} (using defaults)",
                    args.config.display(),
                    e
                );
                Config::default()
            }
        };

        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.logging.level.clone()),
        )
        .init();

        eprintln!(
            "[INFO] Config loaded: data path={}, main_file={}",
            config.data.path.to_string_lossy(),
            config.data.main_file
        );

        let store = Arc::new(DocumentStore::new());

        let data_path = config.document_path();
        eprintln!("[INFO] Looking for document file: {}", data_path.display());

        if data_path.exists() {
            match store.load(data_path.clone()).await {
                Ok(count) => eprintln!("[INFO] Loaded {} transactions", count),
                Err(e) => eprintln!("[ERROR] Failed to load transactions: {:?}", e),
            }
        } else {
            eprintln!("[WARN] Document file not found: {}", data_path.display());
        }

        start_server(config, store).await;
    });

    Ok(())
}

use clap::Parser;
use menurec_api::RestApi;
use menurec_core::{RecommenderConfig, SelfExclusion};
use menurec_storage::{ModelManager, ModelSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Menu item recommendations from a precomputed similarity matrix
#[derive(Parser, Debug)]
#[command(name = "menurec")]
#[command(about = "Serve menu item recommendations", long_about = None)]
struct Args {
    /// Directory holding item_index, similarity_scores, menu and popular artifacts
    #[arg(short, long, default_value = "./models")]
    models_dir: PathBuf,

    /// Load a single bundle file instead of the models directory
    #[arg(long)]
    bundle: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// How the query item is excluded from its own results (drop-head, skip-query)
    #[arg(long, default_value = "drop-head")]
    self_exclusion: SelfExclusion,

    /// Recommendations returned when a request gives no count
    #[arg(long, default_value_t = 5)]
    default_count: usize,

    /// Write the loaded catalog to a bundle in this directory and exit
    #[arg(long)]
    write_bundle: Option<PathBuf>,

    /// Name prefix of the bundle written by --write-bundle
    #[arg(long, default_value = "menu")]
    bundle_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.default_count == 0 {
        anyhow::bail!("--default-count must be at least 1");
    }

    info!("Starting MenuRec v{}", env!("CARGO_PKG_VERSION"));
    info!("Self exclusion: {:?}", args.self_exclusion);

    let source = match args.bundle {
        Some(path) => ModelSource::Bundle(path),
        None => ModelSource::Directory(args.models_dir),
    };
    let config = RecommenderConfig {
        default_count: args.default_count,
        self_exclusion: args.self_exclusion,
        ..RecommenderConfig::default()
    };

    let models = Arc::new(ModelManager::new(source, config)?);
    info!("Models loaded: {} items", models.catalog().item_count());

    if let Some(bundle_dir) = args.write_bundle {
        let description = models.create_bundle(&bundle_dir, &args.bundle_name)?;
        info!(
            "Bundle written: {} ({} bytes)",
            bundle_dir.join(&description.name).display(),
            description.size
        );
        return Ok(());
    }

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(models, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["menurec"]).unwrap();
        assert_eq!(args.models_dir, PathBuf::from("./models"));
        assert_eq!(args.self_exclusion, SelfExclusion::DropHead);
        assert_eq!(args.default_count, 5);
        assert!(args.write_bundle.is_none());
    }

    #[test]
    fn test_write_bundle_flags() {
        let args = Args::try_parse_from([
            "menurec",
            "--write-bundle",
            "./bundles",
            "--bundle-name",
            "nightly",
            "--self-exclusion",
            "skip-query",
        ]).unwrap();
        assert_eq!(args.write_bundle, Some(PathBuf::from("./bundles")));
        assert_eq!(args.bundle_name, "nightly");
        assert_eq!(args.self_exclusion, SelfExclusion::SkipQuery);
    }
}

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use mesh_hollow::config::{CliArgs, HollowConfig};
use mesh_hollow::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("mesh_hollow=debug")
    } else {
        EnvFilter::new("mesh_hollow=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config: HollowConfig = args.into();

    match Pipeline::run(&config) {
        Ok(summary) => {
            if summary.written {
                println!(
                    "Done: wrote {} ({} bytes) in {:.2}s",
                    summary.output.display(),
                    summary.bytes_written,
                    summary.elapsed_ms as f64 / 1000.0
                );
            } else {
                println!("Dry run complete: nothing written");
            }
            Ok(())
        }
        Err(e) => {
            error!(%e, "Pipeline failed");
            Err(anyhow::anyhow!(e)).context("mesh-hollow pipeline failed")
        }
    }
}

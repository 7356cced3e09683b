use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Merge same-named PNGs across folders by pixel-wise maximum.
#[derive(Parser, Debug)]
#[command(name = "maxstack", version)]
struct Cli {
    /// Folders to search. The first is the root: its files name the groups,
    /// and every folder is searched for same-named files to stack.
    #[arg(long = "image_folders", num_args = 1.., required = true)]
    image_folders: Vec<PathBuf>,

    /// Output directory for the merged PNGs (created if missing).
    #[arg(long = "output_path")]
    output_path: PathBuf,

    /// Keep stacking the remaining groups after a failure, then exit non-zero.
    #[arg(long, default_value_t = false)]
    keep_going: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cmd_stack(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_stack(cli: Cli) -> anyhow::Result<bool> {
    let opts = maxstack::StackOpts {
        on_error: if cli.keep_going {
            maxstack::FailurePolicy::Continue
        } else {
            maxstack::FailurePolicy::Abort
        },
        ..maxstack::StackOpts::default()
    };

    let report = maxstack::run(&cli.image_folders, &cli.output_path, opts)
        .with_context(|| format!("stack into '{}'", cli.output_path.display()))?;

    for failed in &report.failed {
        eprintln!("failed {}: {}", failed.root_file.display(), failed.error);
    }
    eprintln!(
        "wrote {} image(s) to {}",
        report.stacked.len(),
        cli.output_path.display()
    );
    Ok(report.is_success())
}

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use face_assets::{AssetCategory, DescriptorFormat, ExtractCommand, ExtractOptions, PipelineReport};
use face_assets_cli::{ExtractJob, load_options};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Options file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Wrap fragments in a fixed-viewport <svg> container
    #[arg(long, global = true)]
    wrap: bool,
    /// Descriptor format: tagged or legacy
    #[arg(long, global = true)]
    format: Option<DescriptorFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair guide shapes with numbered feature layers
    Features {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Extract skull template geometry into <destination>/skulls
    Skulls {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Emit category asset fragments
    Assets {
        source: PathBuf,
        destination: PathBuf,
        /// Restrict to these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<AssetCategory>,
    },
    /// Run a job file naming the source, destination and commands
    Run {
        #[arg(short, long)]
        job: PathBuf,
    },
    /// Print the JSON schema of the command type
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let command = match &cli.command {
        Commands::Features { source, destination } => {
            Some((ExtractCommand::Features, source, destination))
        }
        Commands::Skulls { source, destination } => {
            Some((ExtractCommand::Skulls, source, destination))
        }
        Commands::Assets { source, destination, categories } => Some((
            ExtractCommand::Assets { categories: categories.clone() },
            source,
            destination,
        )),
        Commands::Run { job } => {
            let mut job = ExtractJob::from_file(job)?;
            apply_flags(&cli, &mut job.options)?;
            log_report(&job.run()?);
            None
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ExtractCommand::schema())?);
            None
        }
    };

    if let Some((command, source, destination)) = command {
        run_single(&cli, command, source, destination)?;
    }

    Ok(())
}

/// Command-line flags override the options file
fn apply_flags(cli: &Cli, options: &mut ExtractOptions) -> Result<()> {
    if let Some(path) = &cli.config {
        *options = load_options(path)?;
    }
    if cli.wrap {
        options.wrap_fragments = true;
    }
    if let Some(format) = cli.format {
        options.descriptor_format = format;
    }
    Ok(())
}

fn run_single(cli: &Cli, command: ExtractCommand, source: &Path, destination: &Path) -> Result<()> {
    info!("{}: {}", command, command.description());
    let mut job = ExtractJob {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        commands: vec![command],
        options: ExtractOptions::default(),
    };
    apply_flags(cli, &mut job.options)?;
    log_report(&job.run()?);
    Ok(())
}

fn log_report(report: &PipelineReport) {
    info!(
        "Wrote {} descriptors and {} fragments for [{}]",
        report.emitted.descriptors,
        report.emitted.fragments,
        report.extractors.join(", ")
    );
    for directory in &report.emitted.directories {
        info!("  {}", directory.display());
    }
}

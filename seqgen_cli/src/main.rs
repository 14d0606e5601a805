use clap::{Args, Parser, Subcommand};
use seqgen_core::export::{stored_groups, stored_keys};
use seqgen_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "seqgen")]
#[command(about = "Self-summing sequence generator", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print extra information during calculation
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sequences and export them (default)
    Generate(GenerateArgs),

    /// List the keys held in a structured store
    Inspect {
        /// Store file (defaults to the configured output directory)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Only list this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Largest recurrence order; orders 2 through this value are generated
    #[arg(short = 'm', long = "max-number")]
    max_number: Option<usize>,

    /// Number of terms in each sequence
    #[arg(short, long)]
    length: Option<usize>,

    /// Output file (text and csv default to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: text, csv or store
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Batch document (.toml, .json or .yml) with `init_list` and `length`
    #[arg(long, conflicts_with_all = ["max_number", "length"])]
    input: Option<PathBuf>,

    /// Store group to write into
    #[arg(long)]
    group: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        seqgen_core::logging::init_with_level("debug");
    } else {
        seqgen_core::logging::init();
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(args, &config),
        Some(Commands::Inspect { store, group }) => cmd_inspect(store, group, &config),
        Some(Commands::Config { write }) => cmd_config(write, &config, &config_path),
        // Default to "generate" with top-level flags
        None => cmd_generate(cli.generate, &config),
    }
}

fn cmd_generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let request = match &args.input {
        Some(path) => BatchDocument::load(path)?.into_request()?,
        None => BatchRequest::range(
            args.max_number.unwrap_or(config.defaults.max_number),
            args.length.unwrap_or(config.defaults.length),
        ),
    };

    let format = args.format.unwrap_or(config.output.format);
    let group = args
        .group
        .unwrap_or_else(|| config.output.store_group.clone());

    tracing::info!(
        "Generating {} sequences of length {} as {}",
        request.initials.len(),
        request.length,
        format
    );

    let collection = request.run_with(&TracingSink)?;

    let output = match (format, args.output) {
        (OutputFormat::Store, None) => Some(config.output.default_store_path()),
        (_, output) => output,
    };

    let count = export_collection(&collection, format, output.as_deref(), &group)?;

    if let Some(path) = output {
        match format {
            OutputFormat::Store => {
                println!("✓ Stored {} new sequences in group '{}'", count, group);
                println!("  Store: {}", path.display());
            }
            _ => {
                println!("✓ Wrote {} sequences", count);
                println!("  {}: {}", format, path.display());
            }
        }
    }

    Ok(())
}

fn cmd_inspect(store: Option<PathBuf>, group: Option<String>, config: &Config) -> Result<()> {
    let store_path = store.unwrap_or_else(|| config.output.default_store_path());

    let groups: Vec<String> = match group {
        Some(group) => vec![group],
        None => stored_groups(&store_path)?.into_iter().collect(),
    };

    let mut total = 0;
    for group in &groups {
        let keys = stored_keys(&store_path, group)?;
        if keys.is_empty() {
            continue;
        }
        total += keys.len();

        println!("{} ({} sequences)", group, keys.len());
        for key in keys {
            println!("  {}", key);
        }
    }

    if total == 0 {
        println!("No sequences stored in {}", store_path.display());
    }

    Ok(())
}

fn cmd_config(write: bool, config: &Config, config_path: &Path) -> Result<()> {
    print!("{}", config.to_toml()?);

    if write {
        config.save_to(config_path)?;
        println!("\n✓ Saved config to {}", config_path.display());
    }

    Ok(())
}

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use svfilter::plugin::HookRegistry;
use svfilter::{FilterConfig, InputFormat, SvFilter};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "svfilter.log";

#[derive(Parser, Debug)]
#[command(
    name = "svfilter",
    version,
    about = "Filter structural variants to a set of genomic coordinates"
)]
struct Cli {
    /// Region file (`chrom start end [name]` rows or a labelled table).
    #[arg(long, value_name = "FILE")]
    coords: Option<PathBuf>,
    /// Type of structural variant file to filter.
    #[arg(long = "type", value_enum, required_unless_present = "list_custom")]
    format: Option<FormatArg>,
    /// Drop variants that overlap no region.
    #[arg(long)]
    filter: bool,
    /// Annotate variants with the names of overlapping regions.
    #[arg(long)]
    annotate: bool,
    /// Registered custom filter to run after the coordinate filter.
    #[arg(long, value_name = "NAME")]
    custom: Option<String>,
    /// List the registered custom filters and exit.
    #[arg(long)]
    list_custom: bool,
    /// Sample identifier added to every output record.
    #[arg(long, value_name = "STR")]
    sample: Option<String>,
    /// Log progress to FILE.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    log: PathBuf,
    /// Input file containing variant calls (`-` for stdin).
    #[arg(value_name = "FILE", required_unless_present = "list_custom")]
    variants: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Vcf,
    Socrates,
}

impl From<FormatArg> for InputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Vcf => InputFormat::Vcf,
            FormatArg::Socrates => InputFormat::Socrates,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = HookRegistry::with_builtins();

    if cli.list_custom {
        for hook in registry.list() {
            println!("{}\t{}", hook.name, hook.description);
        }
        return Ok(());
    }

    start_log(&cli.log)?;

    let format = cli
        .format
        .ok_or_else(|| anyhow!("--type is required"))?;
    let variants = cli
        .variants
        .ok_or_else(|| anyhow!("missing variants file"))?;

    // Without an explicit mode the tool both filters and annotates.
    let (filter, annotate) = if cli.filter || cli.annotate {
        (cli.filter, cli.annotate)
    } else {
        (true, true)
    };

    let config = FilterConfig {
        regions: cli.coords,
        format: format.into(),
        filter,
        annotate,
        sample: cli.sample,
        custom: cli.custom,
    };

    let filter = SvFilter::from_config(config, &registry).context("failed to set up filter")?;
    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    filter
        .run_path(&variants, output)
        .with_context(|| format!("failed to filter {}", variants.display()))?;

    Ok(())
}

fn start_log(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise logging: {err}"))?;

    info!("program started");
    info!(
        "command line: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );
    Ok(())
}

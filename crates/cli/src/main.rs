use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use genelist_pipeline::{AnnotateOptions, Annotator, Verbosity};
use genelist_sanity::validate_file;
use genelist_sources::{
    CoordinateTable, NomenclatureDump, PhenotypeDump, ProteinDump, SymbolTable,
};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

mod config;

use config::SourceConfig;

#[derive(Parser)]
#[command(name = "genelist")]
#[command(about = "Curate and validate clinical gene lists", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a gene list against the configured sources
    Fetch(FetchArgs),
    /// Validate finished gene lists
    Validate(ValidateArgs),
}

#[derive(Args)]
struct FetchArgs {
    /// Input gene list
    infile: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Source dump configuration (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Emit informational diagnostics into the output
    #[arg(long)]
    info: bool,

    /// Emit reconciliation warnings into the output
    #[arg(long)]
    warn: bool,

    /// Emit resolution errors into the output
    #[arg(long)]
    error: bool,

    /// Report value conflicts even when the existing field was empty
    #[arg(long)]
    report_empty: bool,

    /// Give up on a record after the first empty lookup instead of
    /// trying the remaining candidate symbols
    #[arg(long)]
    stop_on_first_empty: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Gene lists to validate
    #[arg(required = true)]
    infiles: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Fetch(args) => run_fetch(args),
        Commands::Validate(args) => run_validate(args),
    }
}

fn run_fetch(args: FetchArgs) -> Result<()> {
    let config = SourceConfig::load(&args.config)?;
    let mut coordinates =
        CoordinateTable::from_files(&config.genes, config.transcripts.as_deref())?;
    let mut phenotypes = PhenotypeDump::from_file(&config.phenotypes)?;
    let mut nomenclature = NomenclatureDump::from_file(&config.nomenclature)?;
    let mut proteins = ProteinDump::from_file(&config.proteins)?;
    let symbol_table = SymbolTable::from_file(&config.symbol_table)?;

    let content = fs::read_to_string(&args.infile)
        .with_context(|| format!("cannot read {}", args.infile.display()))?;

    let options = AnnotateOptions {
        verbosity: Verbosity {
            info: args.info,
            warn: args.warn,
            error: args.error,
            report_empty: args.report_empty,
        },
        stop_on_first_empty: args.stop_on_first_empty,
    };
    let mut annotator = Annotator {
        coordinates: &mut coordinates,
        phenotypes: &mut phenotypes,
        nomenclature: &mut nomenclature,
        proteins: &mut proteins,
        symbol_table: &symbol_table,
    };
    let lines = annotator.annotate(content.lines(), options)?;

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    match &args.outfile {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut failed = false;
    for infile in &args.infiles {
        let report = validate_file(infile);
        for line in report.lines() {
            println!("{line}");
        }
        if report.passed() {
            log::info!("{}: OK", infile.display());
        } else {
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

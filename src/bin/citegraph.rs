//! citegraph CLI: build citation graphs and histograms from paper metadata.
//!
//! Usage:
//!   citegraph metadata [--crawled path] [--bibtex path] [--export path]
//!   citegraph extract (--refs file.json | --command prog [--arg a]...)
//!   citegraph link | graphs | histograms
//!   citegraph reduce [--relabel]
//!   citegraph run <metadata and extract options> [--relabel]
//!
//! Artifacts are read from and written to `--data-dir` (default
//! `~/.local/share/citegraph`).

use clap::{Args, Parser, Subcommand};
use citegraph::input::load_raw_records;
use citegraph::logging::init_tracing;
use citegraph::record::RecordResult;
use citegraph::{
    BatchReport, CommandExtractor, CoreConfig, DataPaths, FileStore, Pipeline,
    PrecomputedReferences, RawRecord, ReferenceExtractor, SourceKind,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "citegraph",
    version,
    about = "Deduplicated citation graphs over academic paper corpora"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding the pipeline artifacts
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Keep only the N most cited nodes when reducing graphs
    #[arg(long, global = true)]
    max_nodes: Option<usize>,
    /// Keep word histogram entries at or above this percentile
    #[arg(long, global = true)]
    percentile: Option<f64>,
    /// Write word histograms as fractions of the total
    #[arg(long, global = true)]
    normalize: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the deduplicated metadata collection from raw sources
    Metadata(SourceArgs),
    /// Extract raw references for every record
    Extract(ExtractArgs),
    /// Link raw references to corpus titles
    Link,
    /// Build title and author citation graphs and their reverses
    Graphs,
    /// Build word-frequency and citation-count histograms
    Histograms,
    /// Reduce graphs to their most cited nodes for plotting
    Reduce {
        /// Replace node keys by integer labels and save the mapping
        #[arg(long)]
        relabel: bool,
    },
    /// Run every stage in order
    Run {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        extract: ExtractArgs,
        /// Replace node keys by integer labels in reduced graphs
        #[arg(long)]
        relabel: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Crawled result file or directory (JSON)
    #[arg(long)]
    crawled: Vec<PathBuf>,
    /// BibTeX entries converted to JSON field maps
    #[arg(long)]
    bibtex: Vec<PathBuf>,
    /// Bibliography manager export converted to JSON field maps
    #[arg(long)]
    export: Vec<PathBuf>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Precomputed references: JSON object mapping uid to references
    #[arg(long, conflicts_with = "extractor")]
    refs: Option<PathBuf>,
    /// Program run as `<command> [args] <pdf> <out.json>`
    #[arg(long = "command")]
    extractor: Option<PathBuf>,
    /// Extra argument passed to the command before the pdf path
    #[arg(long = "arg", allow_hyphen_values = true)]
    args: Vec<String>,
}

fn load_config(cli: &Cli) -> Result<CoreConfig, String> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::from_yaml_file(path).map_err(|e| e.to_string())?,
        None => CoreConfig::default(),
    };
    if let Some(max_nodes) = cli.max_nodes {
        config = config.with_max_nodes(max_nodes);
    }
    if let Some(percentile) = cli.percentile {
        config = config.with_percentile(percentile);
    }
    if cli.normalize {
        config = config.with_normalized_histograms(true);
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn open_pipeline(cli: &Cli) -> Result<Pipeline<FileStore>, String> {
    let config = load_config(cli)?;
    let paths = cli
        .data_dir
        .clone()
        .map(DataPaths::new)
        .unwrap_or_default();
    let store = FileStore::with_paths(paths)
        .map_err(|e| format!("Failed to open data directory: {}", e))?;
    Ok(Pipeline::new(store, config))
}

fn load_sources(sources: &SourceArgs) -> Result<Vec<RecordResult<RawRecord>>, String> {
    let inputs = sources
        .crawled
        .iter()
        .map(|p| (p, SourceKind::CrawledResult))
        .chain(sources.bibtex.iter().map(|p| (p, SourceKind::BibliographyFileEntry)))
        .chain(sources.export.iter().map(|p| (p, SourceKind::BibliographyManagerExport)));

    let mut raws = Vec::new();
    for (path, kind) in inputs {
        let loaded = load_raw_records(path, kind)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        raws.extend(loaded);
    }
    if raws.is_empty() {
        return Err("no input records; pass --crawled, --bibtex or --export".to_string());
    }
    Ok(raws)
}

fn make_extractor(args: &ExtractArgs, paths: &DataPaths) -> Result<Box<dyn ReferenceExtractor>, String> {
    match (&args.refs, &args.extractor) {
        (Some(refs), _) => {
            let pre = PrecomputedReferences::from_json_file(refs)
                .map_err(|e| format!("Failed to read '{}': {}", refs.display(), e))?;
            Ok(Box::new(pre))
        }
        (None, Some(command)) => Ok(Box::new(
            CommandExtractor::new(command)
                .with_args(args.args.iter().cloned())
                .with_pdfs_dir(paths.pdfs_dir()),
        )),
        (None, None) => Err("pass --refs or --command to extract references".to_string()),
    }
}

fn print_report(stage: &str, report: &BatchReport) {
    println!(
        "{:<10} accepted {:>6}  rejected {:>4}  issues {:>4}",
        stage,
        report.accepted,
        report.rejected(),
        report.issues.len()
    );
    if report.linked_references > 0 || report.unresolved_references > 0 {
        println!(
            "{:<10} linked {:>8}  unresolved {:>6}",
            "", report.linked_references, report.unresolved_references
        );
    }
    for issue in &report.issues {
        match serde_json::to_string(issue) {
            Ok(line) => println!("  {}", line),
            Err(_) => println!("  {:?}", issue),
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let pipeline = open_pipeline(cli)?;
    let data_dir = pipeline.store().paths().clone();
    match &cli.command {
        Commands::Metadata(sources) => {
            let raws = load_sources(sources)?;
            let report = pipeline.preprocess_metadata(raws).map_err(|e| e.to_string())?;
            print_report("metadata", &report);
        }
        Commands::Extract(args) => {
            let extractor = make_extractor(args, &data_dir)?;
            let report = pipeline
                .extract_references(extractor.as_ref())
                .map_err(|e| e.to_string())?;
            print_report("extract", &report);
        }
        Commands::Link => {
            let report = pipeline.link_references().map_err(|e| e.to_string())?;
            print_report("link", &report);
        }
        Commands::Graphs => {
            let graphs = pipeline.make_graphs().map_err(|e| e.to_string())?;
            println!(
                "titles: {} nodes, {} edges; authors: {} nodes, {} edges",
                graphs.titles.node_count(),
                graphs.titles.edge_count(),
                graphs.authors.node_count(),
                graphs.authors.edge_count()
            );
        }
        Commands::Histograms => {
            pipeline.make_histograms().map_err(|e| e.to_string())?;
            println!("Saved histograms to '{}'", data_dir.root().display());
        }
        Commands::Reduce { relabel } => {
            pipeline.reduce_graphs(*relabel).map_err(|e| e.to_string())?;
            println!("Saved reduced graphs to '{}'", data_dir.root().display());
        }
        Commands::Run {
            sources,
            extract,
            relabel,
        } => {
            let raws = load_sources(sources)?;
            let extractor = make_extractor(extract, &data_dir)?;
            let report = pipeline
                .run(raws, extractor.as_ref(), *relabel)
                .map_err(|e| e.to_string())?;
            print_report("metadata", &report.metadata);
            print_report("extract", &report.extraction);
            print_report("link", &report.linking);
            println!("Saved artifacts to '{}'", data_dir.root().display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    std::process::exit(code);
}

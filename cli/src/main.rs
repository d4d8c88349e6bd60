//! tristream CLI: stream an edge list through the triangle estimator
//!
//! Reads `src dst` records, derives each edge's rank with a seeded hash,
//! feeds the estimator in arrival order and reports the estimates.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tristream::output::{read_local_values_from_path, write_local_estimates_to_path};
use tristream::{
    metrics, CountingMode, Edge, EdgeHasher, EdgeListReader, EstimatorConfig, RankSource,
    TriangleEstimator,
};

#[derive(Parser)]
#[command(name = "tristream", version, about = "Streaming triangle estimation")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Binary,
    Weighted,
}

impl From<ModeArg> for CountingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Binary => CountingMode::Binary,
            ModeArg::Weighted => CountingMode::Weighted,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate local and global triangle counts of an edge list
    Run(RunArgs),
    /// Print the rank the hasher assigns to an edge
    Rank {
        u: u32,
        v: u32,

        /// Hash seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Edge list file, one `src dst` pair per line
    input: PathBuf,

    /// YAML estimator configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reservoir capacity (number of sampled edges)
    #[arg(long, short = 'm')]
    capacity: Option<usize>,

    /// Counting mode
    #[arg(long)]
    mode: Option<ModeArg>,

    /// Enable ensemble smoothing
    #[arg(long)]
    ensemble: bool,

    /// Decay factor for past estimations
    #[arg(long)]
    decay: Option<f64>,

    /// Bucket length between ensemble refreshes
    #[arg(long)]
    bucket_length: Option<u64>,

    /// Hash seed for edge ranks
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write per-vertex estimates to this file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Export the smoothed estimate instead of the raw one
    #[arg(long)]
    smoothed: bool,

    /// Per-vertex ground truth (`id value` lines) to compute LAPE against
    #[arg(long)]
    ground_truth: Option<PathBuf>,

    /// Log progress every N edges
    #[arg(long, default_value_t = 10_000_000)]
    progress_every: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run_estimate(args, &cli.format),
        Commands::Rank { u, v, seed } => run_rank(u, v, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn build_config(args: &RunArgs) -> Result<EstimatorConfig> {
    let mut config = match &args.config {
        Some(path) => EstimatorConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EstimatorConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if args.ensemble {
        config.ensemble = true;
    }
    if let Some(decay) = args.decay {
        config.decay = decay;
    }
    if let Some(j) = args.bucket_length {
        config.bucket_length = j;
    }
    config.validate()?;
    Ok(config)
}

fn run_estimate(args: RunArgs, format: &OutputFormat) -> Result<()> {
    let mut estimator = TriangleEstimator::new(build_config(&args)?)?;
    let hasher = EdgeHasher::with_seed(args.seed);

    let config = estimator.config();
    info!(
        "Streaming {} (mode {:?}, capacity {}, ensemble {}, seed {})",
        args.input.display(),
        config.mode,
        config.capacity,
        config.ensemble,
        hasher.seed()
    );
    if args.smoothed && !config.ensemble {
        warn!("--smoothed without --ensemble exports an all-zero smoothed estimate");
    }

    let mut reader = EdgeListReader::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let progress_every = args.progress_every.max(1);
    let start = Instant::now();

    for edge in reader.by_ref() {
        let edge: Edge = edge.with_context(|| format!("reading {}", args.input.display()))?;
        estimator.update(edge, hasher.rank(&edge));

        if estimator.time() % progress_every == 0 {
            info!(
                "Processed {} edges, global triangle estimate {:.4}",
                estimator.time(),
                estimator.triangle_estimate()
            );
        }
    }

    let elapsed = start.elapsed();
    let reader_stats = reader.stats();
    info!(
        "Finished in {:.3}s: {} edges, {} self-loops dropped, {} malformed lines",
        elapsed.as_secs_f64(),
        reader_stats.edges,
        reader_stats.self_loops,
        reader_stats.malformed
    );

    let local = if args.smoothed {
        estimator.smoothed_estimate()
    } else {
        estimator.raw_estimate()
    };

    if let Some(path) = &args.output {
        write_local_estimates_to_path(path, &local)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {} vertex estimates to {}", local.len(), path.display());
    }

    let lape = match &args.ground_truth {
        Some(path) => {
            let truth = read_local_values_from_path(path)
                .with_context(|| format!("reading ground truth {}", path.display()))?;
            metrics::lape(&local, &truth)
        }
        None => None,
    };

    let stats = estimator.stats();
    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "stats": stats,
                "triangles": estimator.triangle_estimate(),
                "elapsed_secs": elapsed.as_secs_f64(),
                "lape": lape,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Metric", "Value"]);
            table.add_row(vec!["Edges processed".to_string(), stats.time.to_string()]);
            table.add_row(vec!["Vertices".to_string(), stats.known_vertices.to_string()]);
            table.add_row(vec![
                "Reservoir".to_string(),
                format!("{}/{}", stats.reservoir_size, stats.capacity),
            ]);
            table.add_row(vec![
                "Exact phase ended".to_string(),
                stats
                    .exact_phase_end
                    .map_or("never".to_string(), |tm| tm.to_string()),
            ]);
            table.add_row(vec![
                "Discovered triangles".to_string(),
                stats.discovered_triangles.to_string(),
            ]);
            table.add_row(vec![
                "Global triangle estimate".to_string(),
                format!("{:.4}", estimator.triangle_estimate()),
            ]);
            if let Some(lape) = lape {
                table.add_row(vec!["LAPE".to_string(), format!("{:.8}", lape)]);
            }
            table.add_row(vec![
                "Sampling time".to_string(),
                format!("{:.3}s", stats.sampling_secs),
            ]);
            table.add_row(vec![
                "Counting time".to_string(),
                format!("{:.3}s", stats.counting_secs),
            ]);
            table.add_row(vec![
                "Elapsed".to_string(),
                format!("{:.3}s", elapsed.as_secs_f64()),
            ]);
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_rank(u: u32, v: u32, seed: u64) -> Result<()> {
    let edge = Edge::new(u, v)?;
    let hasher = EdgeHasher::with_seed(seed);
    println!("{}\t{}", edge, hasher.rank(&edge));
    Ok(())
}

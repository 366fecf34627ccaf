//! Call Graph CLI
//!
//! Resolves every call in the body database against the type database and
//! writes the call graph as JSON lines.
//!
//! # Usage
//!
//! ```bash
//! # Databases from flags
//! compute-callgraph --types src_comp.db --bodies src_body.db --output callgraph.jsonl
//!
//! # Everything from a config file, with a registry snapshot
//! compute-callgraph --config hazards.yaml --cache types.hzcg
//! ```
//!
//! Logging is controlled by `HAZARD_LOG` (default `info`).

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hazard_callgraph::config::AnalysisConfig;
use hazard_callgraph::{
    load_bodies_from_path, load_types_from_path, load_types_with_cache, write_json_lines,
    write_json_lines_to_path, CallGraph, CallGraphBuilder, CallgraphError, GcPolicy, RuleBasedOracle,
};

#[derive(Parser)]
#[command(name = "compute-callgraph")]
#[command(about = "Build the GC hazard call graph from extracted type and body databases", long_about = None)]
struct Cli {
    /// Analysis configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Type database (overrides inputs.types_db)
    #[arg(long)]
    types: Option<PathBuf>,

    /// Body database (overrides inputs.bodies_db)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Registry snapshot cache (overrides inputs.cache)
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resolve bodies on one thread
    #[arg(long)]
    sequential: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HAZARD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("compute-callgraph: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CallgraphError> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml(path)?,
        None => AnalysisConfig::default(),
    };

    let types = cli
        .types
        .or(config.inputs.types_db.clone())
        .ok_or_else(|| missing_input("type database", "--types", "inputs.types_db"))?;
    let bodies = cli
        .bodies
        .or(config.inputs.bodies_db.clone())
        .ok_or_else(|| missing_input("body database", "--bodies", "inputs.bodies_db"))?;
    let cache = cli.cache.or(config.inputs.cache.clone());

    let registry = match &cache {
        Some(cache) => load_types_with_cache(&types, cache)?,
        None => load_types_from_path(&types)?,
    };
    let function_bodies = load_bodies_from_path(&bodies)?;

    let policy = GcPolicy::with_config(&config.policy);
    let oracle = RuleBasedOracle::from_config(&config.resolution.replacement_rules)?;
    let parallel = config.resolution.parallel && !cli.sequential;

    let build = || -> CallGraph {
        CallGraphBuilder::new(&registry, &policy, &oracle)
            .with_parallel(parallel)
            .build(&function_bodies)
    };

    let graph = if parallel && config.resolution.num_workers > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.resolution.num_workers)
            .build()
            .map_err(|e| CallgraphError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        pool.install(build)
    } else {
        build()
    };

    info!(
        functions = graph.iter().count(),
        edges = graph.edge_count(),
        unresolved = graph.unresolved_calls().count(),
        ignored_callers = graph.ignored_callers().len(),
        gc_guarded = graph.gc_guarded().len(),
        "Writing call graph"
    );

    match &cli.output {
        Some(path) => write_json_lines_to_path(&graph, path),
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_json_lines(&graph, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn missing_input(what: &str, flag: &str, key: &str) -> CallgraphError {
    CallgraphError::Config(hazard_callgraph::config::ConfigError::Custom(format!(
        "no {} given: pass {} or set {}",
        what, flag, key
    )))
}

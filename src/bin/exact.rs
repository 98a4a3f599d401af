//! Binary that reads a weighted graph, computes the Pareto front of its maximum weight cliques and
//! writes one clique per line.

use std::error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use log::{info, LevelFilter};
use structopt::StructOpt;

use wlmc::config::SolverConfig;
use wlmc::graph::{FileFormat, VertexArena};
use wlmc::log::build_logger_for_verbosity;
use wlmc::mwc_instance::MwcInstance;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "exact",
    about = "Computes the Pareto front of the maximum weight cliques of a vertex weighted graph."
)]
struct Opt {
    /// Input file. `stdin` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Input format, 'wgr' or 'edges'
    #[structopt(short, long, default_value = "wgr")]
    format: FileFormat,

    /// Number of weights per vertex
    #[structopt(short, long, default_value = "1")]
    dimension: usize,

    /// Stop the search after this many seconds and report the best cliques found so far
    #[structopt(short, long)]
    time_limit: Option<u64>,

    /// Stop the search after this many search steps and report the best cliques found so far
    #[structopt(short, long)]
    node_limit: Option<usize>,

    /// Output file. `stdout` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let opt = Opt::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opt.verbose);

    let arena = match &opt.input {
        Some(path) => VertexArena::try_read_graph(opt.format, path, opt.dimension)?,
        None => {
            let stdin = io::stdin();
            let stdin = stdin.lock();
            match opt.format {
                FileFormat::Wgr => VertexArena::read_wgr(stdin)?,
                FileFormat::Edges => VertexArena::read_edge_list(stdin, opt.dimension)?,
            }
        },
    };

    let config = SolverConfig {
        dimension: opt.dimension,
        time_limit: opt.time_limit.map(Duration::from_secs),
        node_limit: opt.node_limit,
    };
    let mut ins = MwcInstance::new(arena.graph(), config)?;
    let front = ins.wlmc();

    // Validate
    ins.validate_solution(&front)?;
    info!("{} clique(s) validated, {} search nodes explored", front.len(), ins.nodes_explored());

    let out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut out = BufWriter::new(out);
    MwcInstance::write_solution(&front, &arena, &mut out)?;
    out.flush()?;
    Ok(())
}

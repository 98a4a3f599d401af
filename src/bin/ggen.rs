//! Binary that samples a random vertex weighted graph and writes it in the `.wgr` format.

use std::error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::LevelFilter;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use structopt::StructOpt;

use wlmc::generator::{generate_weighted, GeneratorParams};
use wlmc::log::build_logger_for_verbosity;

#[derive(Debug, StructOpt)]
#[structopt(name = "ggen", about = "Samples a graph with random vertex weights and a fixed number of edges")]
struct Opt {
    /// Output file. `stdout` if not specified.
    #[structopt(parse(from_os_str))]
    output: Option<PathBuf>,

    /// Number of weights per vertex
    #[structopt(short, long, default_value = "1")]
    weights: usize,

    /// Number of nodes to generate
    #[structopt(short, long)]
    nodes: usize,

    /// Number of distinct edges
    #[structopt(short, long)]
    edges: usize,

    /// Weights are drawn uniformly from [1, max-weight]
    #[structopt(short, long, default_value = "100")]
    max_weight: i64,

    /// Seed value
    #[structopt(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let opt = Opt::from_args();
    build_logger_for_verbosity(LevelFilter::Info, 0);

    let mut gen = match opt.seed {
        Some(s) => Pcg64Mcg::seed_from_u64(s),
        None => Pcg64Mcg::from_entropy(),
    };

    let params = GeneratorParams {
        nodes: opt.nodes,
        edges: opt.edges,
        dimension: opt.weights,
        max_weight: opt.max_weight,
    };
    let arena = generate_weighted(&mut gen, &params)?;

    let out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut out = BufWriter::new(out);
    arena.write_wgr(&mut out)?;
    out.flush()?;
    Ok(())
}

//! `streamcc` diagnostic CLI: builds the dense divisor graph on `n`
//! vertices (edges `{i, k*i}` for every `i >= 2` and `k >= 2` with `k*i < n`), runs the
//! connectivity driver to completion, and prints the number of connected
//! components.
//!
//! ```bash
//! echo 1000 | streamcc
//! # 3
//! ```

use std::io::{self, Read};

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use streamcc::Graph;

/// Approximate dynamic graph connectivity — divisor-graph diagnostic.
///
/// Reads a single node count `n` from stdin (whitespace-delimited, so a
/// bare number or a line like `1000` both work), builds the graph with
/// edges `{i, k*i}` for all `i >= 2`, `k >= 2`, and `k*i < n`, runs the
/// Borůvka-style connectivity driver, and prints the resulting component
/// count to stdout. Exits 0 on success.
#[derive(Debug, StructOpt)]
#[structopt(name = "streamcc", about = "Approximate dynamic graph connectivity.")]
struct Opt {
    /// Seed for the per-vertex sketch hash functions. Fixed across a
    /// run's lifetime, as the sketch's linear-combination contract
    /// requires.
    #[structopt(long, default_value = "0x5EED")]
    seed: String,

    /// Bucket factor `f`: trades sketch space for recovery probability.
    #[structopt(long, default_value = "4.0")]
    bucket_factor: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();
    let seed = parse_seed(&opt.seed);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .expect("reading node count from stdin");
    let n: usize = input
        .split_whitespace()
        .next()
        .expect("a node count on stdin")
        .parse()
        .expect("node count must be a non-negative integer");

    if n == 0 {
        println!("0");
        return;
    }

    let mut graph = Graph::new(n, seed, opt.bucket_factor);
    for i in 2..n as u32 {
        let mut k = i * 2;
        while (k as usize) < n {
            graph.apply(i, k);
            k += i;
        }
    }
    graph.run();

    println!("{}", graph.connected_components().size());
}

fn parse_seed(s: &str) -> u64 {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).expect("seed must be a valid integer")
    } else {
        s.parse().expect("seed must be a valid integer")
    }
}

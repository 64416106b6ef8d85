use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    clock::{Clock, SystemClock},
    generator::OrderGenerator,
    orders::{Order, OrderRequest, action_to_int},
    queue::OrderQueue,
};

/// Rank DaoCross orders by precedence
#[derive(Parser)]
#[command(name = "dao-cross")]
#[command(
    version,
    about = "Builds orders and prints them in the sequence a crossing engine would consume them"
)]
pub struct Cli {
    /// Print orders as JSON instead of key=value lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate random ETH/BTC orders and print them in precedence order
    Generate {
        /// Number of orders
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Seed for the random source
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },

    /// Read a JSON array of orders from FILE and print them in precedence order
    Rank {
        /// Path to the JSON input
        file: PathBuf,
    },

    /// Print the numeric sign of an action (buy = 1, sell = -1)
    Sign {
        /// buy or sell
        action: String,
    },
}

fn write_orders(out: &mut impl Write, orders: &[Order], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, orders)?;
        writeln!(out)?;
    } else {
        for order in orders {
            writeln!(out, "{order}")?;
        }
    }
    Ok(())
}

pub fn handle_generate(
    out: &mut impl Write,
    count: usize,
    seed: u64,
    json: bool,
    clock: &dyn Clock,
) -> anyhow::Result<()> {
    let orders = OrderGenerator::new(seed).generate(count, clock)?;
    let queue: OrderQueue = orders.into_iter().collect();
    info!(count, seed, "generated orders");
    write_orders(out, &queue.into_sorted_vec(), json)
}

/// Parses every request, failing on the first invalid one.
pub fn load_orders(path: &Path, clock: &dyn Clock) -> anyhow::Result<Vec<Order>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let requests: Vec<OrderRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse orders in {}", path.display()))?;
    requests
        .into_iter()
        .enumerate()
        .map(|(i, req)| {
            req.into_order(clock)
                .with_context(|| format!("order #{i} in {} is invalid", path.display()))
        })
        .collect()
}

pub fn handle_rank(
    out: &mut impl Write,
    path: &Path,
    json: bool,
    clock: &dyn Clock,
) -> anyhow::Result<()> {
    let orders = load_orders(path, clock)?;
    info!(count = orders.len(), "ranking orders from {}", path.display());
    let queue: OrderQueue = orders.into_iter().collect();
    write_orders(out, &queue.into_sorted_vec(), json)
}

pub fn handle_sign(out: &mut impl Write, action: &str) -> anyhow::Result<()> {
    let sign = action_to_int(action)?;
    writeln!(out, "{sign}")?;
    Ok(())
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let clock = SystemClock;
    match cli.command {
        Commands::Generate { count, seed } => {
            handle_generate(&mut out, count, seed, cli.json, &clock)
        }
        Commands::Rank { file } => handle_rank(&mut out, &file, cli.json, &clock),
        Commands::Sign { action } => handle_sign(&mut out, &action),
    }
}

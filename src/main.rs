//! Keccak Miner CLI
//!
//! A command-line tool for Keccak-256 digests and leading-zero nonce search.
//!
//! # Commands
//!
//! - `digest` - Hash an input
//! - `reduce` - Search a nonce range for low digests
//! - `benchmark` - Run performance benchmark

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use kminer::algorithm::{self, ReduceParams};
use kminer::config::decode_hex_input;
use kminer::{search, KeccakHasher, SearchConfig};

#[derive(Parser)]
#[command(name = "kminer")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Keccak-256 digest and leading-zero nonce search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Exactly one input source
#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// UTF-8 text input
    #[arg(long)]
    text: Option<String>,

    /// Hex-encoded input (optional 0x prefix)
    #[arg(long)]
    hex: Option<String>,

    /// Read raw bytes from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> anyhow::Result<Vec<u8>> {
        if let Some(text) = &self.text {
            return Ok(text.as_bytes().to_vec());
        }
        if let Some(hex) = &self.hex {
            return Ok(decode_hex_input(hex)?);
        }
        match &self.file {
            Some(path) => {
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
            }
            None => anyhow::bail!("No input given. Use --text, --hex or --file"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Keccak-256 digest of an input
    Digest {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Search a nonce range for digests with leading zero nibbles
    Reduce {
        #[command(flatten)]
        input: InputArgs,

        /// First nonce (inclusive)
        #[arg(long)]
        min: Option<u64>,

        /// End of the nonce range (exclusive)
        #[arg(long)]
        max: Option<u64>,

        /// Minimum leading zero nibbles
        #[arg(short, long)]
        zeros: Option<u32>,

        /// JSON search config; flags override its fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "100000")]
        count: u64,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Digest { input } => cmd_digest(&input),
        Commands::Reduce {
            input,
            min,
            max,
            zeros,
            config,
            json,
        } => cmd_reduce(&input, min, max, zeros, config, json),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr at INFO unless `RUST_LOG` says otherwise
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_digest(input: &InputArgs) -> anyhow::Result<()> {
    let data = input.read()?;
    let mut hasher = KeccakHasher::new();
    let digest = hasher.hash(&data)?;
    println!("{}", hex::encode(digest));
    Ok(())
}

fn cmd_reduce(
    input: &InputArgs,
    min: Option<u64>,
    max: Option<u64>,
    zeros: Option<u32>,
    config_path: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let data = input.read()?;

    let base = match &config_path {
        Some(path) => SearchConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    let config = base.with_overrides(min, max, zeros);

    if !json {
        println!("Searching nonces...");
        println!("Input: {} bytes", data.len());
        println!("Range: [{}, {})", config.nonce_min, config.nonce_max);
        println!("Min zeros: {}", config.min_zeros);
        println!();
    }

    let mut hasher = KeccakHasher::new();
    let report = search(&mut hasher, &data, &config, |found| {
        if !json {
            println!("{} {} {}", found.nonce, found.zeros, found.hash);
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\nResults:");
    println!("  Hashes computed: {}", report.hashes);
    println!("  Matches: {}", report.found.len());
    println!("  Time elapsed: {:.2}s", report.elapsed_secs);
    println!("  Hashrate: {:.2} H/s", report.hashrate);
    println!("  Final digest: {}", report.digest);

    Ok(())
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} hashes...", count);

    let input = [0xA5u8; 120];
    let mut hasher = KeccakHasher::new();
    hasher.load(&input)?;

    // Unreachable threshold so the loop never calls back
    let params = ReduceParams::new(input.len())
        .with_range(0, count)
        .with_min_zeros(2 * algorithm::DIGEST_SIZE as u32 + 1);

    let start = Instant::now();
    let summary = hasher.reduce(&params, |_| {})?;
    let elapsed = start.elapsed();
    let hashrate = summary.hashes as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total hashes: {}", summary.hashes);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    println!("\nAlgorithm parameters:");
    println!("  Rate: {} bytes", algorithm::RATE);
    println!("  Rounds: {}", algorithm::ROUNDS);
    println!("  Buffer size: {} KB", algorithm::BUFFER_SIZE / 1024);
    println!("  Input length: {} bytes", input.len());

    Ok(())
}

//! flashsim CLI
//!
//! Drives an in-process simulated device: store records, read them back,
//! and walk through a corruption-and-recovery demo.

use clap::{Parser, Subcommand};
use flashsim::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// flashsim CLI
#[derive(Parser, Debug)]
#[command(name = "flashsim-cli")]
#[command(about = "Simulated flash block-device key-value store")]
#[command(version)]
struct Args {
    /// Number of pages in the simulated device
    #[arg(short, long, default_value = "1000")]
    num_pages: usize,

    /// Page size in bytes
    #[arg(short, long, default_value = "512")]
    page_size: usize,

    /// Read-cache capacity (entries)
    #[arg(short, long, default_value = "10")]
    cache_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a key-value record on a page and read it back
    Roundtrip {
        /// Target page index
        page: usize,

        /// The key to store
        key: String,

        /// The value to store
        value: String,
    },

    /// Corrupt a page after an atomic write, then recover it on read
    Recover {
        /// Target page index
        page: usize,
    },

    /// Fill the cache past capacity and show the FIFO eviction order
    CacheDemo,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flashsim=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .num_pages(args.num_pages)
        .page_size(args.page_size)
        .cache_size(args.cache_size)
        .build();

    let mut engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("failed to build engine: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("flashsim v{}", flashsim::VERSION);

    let outcome = match args.command {
        Commands::Roundtrip { page, key, value } => roundtrip(&mut engine, page, &key, &value),
        Commands::Recover { page } => recover(&mut engine, page),
        Commands::CacheDemo => cache_demo(&mut engine),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn roundtrip(engine: &mut Engine, page: usize, key: &str, value: &str) -> flashsim::Result<()> {
    engine.put(page, key.as_bytes(), value.as_bytes())?;
    let read_back = engine.read(page)?;
    println!("page {page}: {key} = {}", String::from_utf8_lossy(&read_back));
    Ok(())
}

fn recover(engine: &mut Engine, page: usize) -> flashsim::Result<()> {
    engine.put(page, b"demo-key", b"demo-value")?;
    engine.corrupt_page(page, 3)?;
    println!("page {page} verifies after corruption: {}", engine.verify(page)?);

    let value = engine.read(page)?;
    println!(
        "recovered from reserve image: demo-key = {}",
        String::from_utf8_lossy(&value)
    );
    println!("page {page} verifies after restore: {}", engine.verify(page)?);
    Ok(())
}

fn cache_demo(engine: &mut Engine) -> flashsim::Result<()> {
    let capacity = engine.config().cache_size;
    for i in 0..=capacity {
        let key = format!("key-{i}");
        engine.index_insert(key.as_bytes(), b"v")?;
        engine.index_lookup(key.as_bytes())?;
    }

    println!("inserted {} keys into a {capacity}-entry cache", capacity + 1);
    println!("cached keys, oldest first:");
    for key in engine.cache_keys() {
        println!("  {}", String::from_utf8_lossy(&key));
    }
    Ok(())
}

//! Compare the bundled codecs on the default fixture
//!
//! ```bash
//! # Full run with the default timings (2s warmup, 5s measurement)
//! cargo run --release
//!
//! # Short run with per-codec logging
//! CODEC_BENCH_WARMUP_MS=100 CODEC_BENCH_MEASUREMENT_MS=500 \
//!     RUST_LOG=codec_bench=debug cargo run --release
//!
//! # Timings from a JSON file: {"warmup_ms": 500, "measurement_ms": 2000}
//! CODEC_BENCH_CONFIG=bench.json cargo run --release
//! ```

use codec_bench::bench::{check_fidelity, measure_throughput, BenchConfig, ThroughputReport};
use codec_bench::codec::CodecRegistry;
use codec_bench::value::Sample;
use color_eyre::eyre::WrapErr;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional JSON config file
const ENV_CONFIG_FILE: &str = "CODEC_BENCH_CONFIG";

fn load_config() -> color_eyre::Result<BenchConfig> {
    let mut config = BenchConfig::default();
    if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
        config = config
            .merge_file(&path)
            .wrap_err_with(|| format!("loading {}", path))?;
    }
    let config = config.merge_env()?;
    config.validate()?;
    Ok(config)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let registry = CodecRegistry::with_defaults()?;
    let sample = Sample::fixture();
    info!(codecs = ?registry.names(), config = ?config, "starting benchmark");

    let timings = measure_throughput(&registry, &sample, &config)?;
    println!("{}", ThroughputReport::new(&timings));

    let fidelity = check_fidelity(&registry, &sample);
    println!("{}", fidelity);

    Ok(())
}

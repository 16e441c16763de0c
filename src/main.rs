use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use requant_core::config::RunConfig;
use requant_core::reference::requantize_channels;
use requant_core::ChannelStreamController;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "requant", version, about = "Stream accumulators through the requantization post-processor")]
struct Args {
    /// Run config (JSON): offset, activation bounds, channels, accumulators
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Print results as JSON instead of one per line
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Compare against the scalar reference model; fail on any mismatch
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = RunConfig::load(&args.config)
        .with_context(|| format!("load run config: {}", args.config.display()))?;

    let mut store = cfg.param_store();
    let mut ctl = ChannelStreamController::new(cfg.output);
    let results = ctl.run(&mut store, &cfg.accumulators);
    info!("{} results, {} ticks", results.len(), ctl.ticks());

    if args.check {
        let expected = requantize_channels(&cfg.accumulators, &cfg.channels, &cfg.output);
        if results.len() != expected.len() {
            bail!("pipeline returned {} results for {} accumulators", results.len(), expected.len());
        }
        let mismatches: Vec<usize> = (0..results.len()).filter(|&i| results[i] != expected[i]).collect();
        if !mismatches.is_empty() {
            for &i in mismatches.iter().take(10) {
                eprintln!("channel {}: pipeline {} reference {}", i, results[i], expected[i]);
            }
            bail!("{} of {} results differ from the reference model", mismatches.len(), expected.len());
        }
        info!("all {} results match the reference model", results.len());
    }

    if args.json {
        let obj = serde_json::json!({
            "results": results,
            "ticks": ctl.ticks(),
            "latency": ChannelStreamController::LATENCY,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        for r in &results { println!("{}", r); }
    }
    Ok(())
}

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use requant_core::reference::requantize_channels;
use requant_core::{ChannelParamStore, ChannelParameters, ChannelStreamController, OutputStage};

#[derive(Parser, Debug)]
#[command(name = "requant-sweep", version, about = "Random parity sweep: pipelined post-processor vs scalar reference")]
struct Args {
    /// Total accumulators to check
    #[arg(long, default_value_t = 1_000_000)]
    samples: usize,

    /// Independent pipelines run in parallel (0 = one per rayon thread)
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Accumulators streamed per run before parameters are redrawn
    #[arg(long, default_value_t = 4096)]
    batch: usize,

    /// Output channels per run
    #[arg(long, default_value_t = 16)]
    channels: usize,

    /// Standard deviation of the accumulator distribution
    #[arg(long, default_value_t = 65536.0)]
    sigma: f64,

    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

const EDGE_VALUES: [i32; 5] = [i32::MIN, i32::MAX, 0, -1, 1];

fn random_channel(rng: &mut SmallRng) -> ChannelParameters {
    ChannelParameters {
        bias: rng.gen_range(-4096..=4096),
        multiplier: rng.gen_range((1 << 30)..=i32::MAX),
        shift: rng.gen_range(-12..=4),
    }
}

fn sweep_worker(worker: usize, samples: usize, args: &Args, pb: &ProgressBar) -> Result<usize> {
    let mut rng = SmallRng::seed_from_u64(args.seed ^ (worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let normal = Normal::new(0.0, args.sigma).map_err(|e| anyhow!("accumulator distribution: {e}"))?;
    let mut mismatches = 0usize;
    let mut checked = 0usize;
    while checked < samples {
        let n = (samples - checked).min(args.batch.max(1));
        let channels: Vec<ChannelParameters> = (0..args.channels.max(1)).map(|_| random_channel(&mut rng)).collect();
        let stage = OutputStage::int8(rng.gen_range(-128..=127));
        let accs: Vec<i32> = (0..n)
            .map(|i| if i % 64 == 63 { EDGE_VALUES[rng.gen_range(0..EDGE_VALUES.len())] } else { normal.sample(&mut rng) as i32 })
            .collect();

        let mut store = ChannelParamStore::new(channels.clone());
        let mut ctl = ChannelStreamController::new(stage);
        let got = ctl.run(&mut store, &accs);
        let want = requantize_channels(&accs, &channels, &stage);
        if got.len() != want.len() { bail!("worker {}: {} results for {} requests", worker, got.len(), want.len()); }
        mismatches += got.iter().zip(&want).filter(|(g, w)| g != w).count();
        checked += n;
        pb.inc(n as u64);
    }
    Ok(mismatches)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let workers = if args.workers == 0 { rayon::current_num_threads() } else { args.workers };
    let per_worker = args.samples.div_ceil(workers);

    let pb = ProgressBar::new((per_worker * workers) as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} accumulators ({eta})")?);

    let counts = (0..workers)
        .into_par_iter()
        .map(|w| sweep_worker(w, per_worker, &args, &pb))
        .collect::<Result<Vec<usize>>>()?;
    pb.finish();

    let mismatches: usize = counts.iter().sum();
    info!("{} workers, {} accumulators each", workers, per_worker);
    if mismatches > 0 { bail!("{} mismatches against the reference model", mismatches); }
    println!("ok: {} accumulators, pipeline matches reference", per_worker * workers);
    Ok(())
}

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use cohort_ls::config::LSConfig;
use cohort_ls::generators::generate_instance;
use cohort_ls::io;
use cohort_ls::io::cli::Cli;
use cohort_ls::io::ext_repr;
use cohort_ls::io::output::{ExtSolution, LSOutput};
use cohort_ls::opt::ls_optimizer::LSOptimizer;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: LSConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            LSConfig::default()
        }
        Some(config_file) => io::read_json_config(&config_file)?,
    };

    info!("Successfully parsed LSConfig: {config:?}");

    let mut rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let (instance, stem) = match &args.input_file {
        Some(input_file) => {
            let ext_instance = io::read_json_instance(input_file)?;
            let stem = input_file
                .file_stem()
                .and_then(|s| s.to_str())
                .context("input file has no valid name")?
                .to_string();
            (ext_repr::import(&ext_instance, config.cost_model)?, stem)
        }
        None => {
            info!("[MAIN] No input file provided, generating an instance");
            let instance = generate_instance(&config.generator, config.cost_model, &mut rng)?;
            (instance, "generated".to_string())
        }
    };

    info!(
        "[MAIN] instance with {} items and {} bins (total capacity {})",
        instance.n_items(),
        instance.n_bins(),
        instance.total_capacity()
    );
    if instance.total_capacity() < instance.n_items() {
        bail!(
            "total capacity {} cannot hold {} items",
            instance.total_capacity(),
            instance.n_items()
        );
    }

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {:?}",
                args.solution_folder
            )
        })?;
    }

    let start = Instant::now();
    let mut optimizer = LSOptimizer::new(instance.clone(), config, rng);
    let Some(best) = optimizer.solve() else {
        bail!("no complete assignment found, consider increasing the budgets");
    };
    let run_time_ms = start.elapsed().as_millis() as u64;

    let solution = ExtSolution::new(&instance, &best, optimizer.stats, run_time_ms);
    for (rank, count) in solution.rank_summary.per_rank.iter().enumerate() {
        info!("[MAIN] preference {}: {count} items", rank + 1);
    }
    info!(
        "[MAIN] not preferred: {} items",
        solution.rank_summary.unpreferred
    );

    let output = LSOutput {
        instance: ext_repr::export(&instance, &stem),
        solution,
        config,
    };
    let solution_path = args.solution_folder.join(format!("sol_{stem}.json"));
    io::write_json(&output, &solution_path)?;

    Ok(())
}

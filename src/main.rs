use std::{path::PathBuf, process::ExitCode};

use clap::{ArgGroup, Parser};
use hmmsuite::{loader, Config, Evaluation, Hmm, StateUniverse};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(version, about = "Sample, score and decode discrete hidden Markov models")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["generate", "forward", "viterbi", "evaluate"])
))]
struct Argv {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Model basename: reads <basename>.trans and <basename>.emit.
    basename: PathBuf,
    /// Treat the basename as a JSON model file.
    #[arg(long)]
    json: bool,
    /// Settings file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Sample a sequence of this length.
    #[arg(long, value_name = "N")]
    generate: Option<usize>,
    /// Print the probability of a whitespace-separated observation sequence.
    #[arg(long, value_name = "OBSERVATIONS")]
    forward: Option<String>,
    /// Print the most likely state path for a whitespace-separated observation sequence.
    #[arg(long, value_name = "OBSERVATIONS")]
    viterbi: Option<String>,
    /// Sample sequences of this length and score Viterbi against their true states.
    #[arg(long, value_name = "N")]
    evaluate: Option<usize>,
    /// Number of sequences sampled by --evaluate.
    #[arg(long, default_value_t = 10)]
    trials: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, value_enum)]
    universe: Option<StateUniverse>,
}

fn run(argv: Argv) -> hmmsuite::Result<()> {
    let mut config = match &argv.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(universe) = argv.universe {
        config.universe = universe;
    }
    if argv.seed.is_some() {
        config.seed = argv.seed;
    }
    log::debug!("config: {:?}", config);

    let hmm: Hmm = if argv.json {
        loader::load_json(&argv.basename)?
    } else {
        loader::load(&argv.basename)?
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let decoder = hmm.decoder(config.universe);

    if let Some(n) = argv.generate {
        let seq = hmm.generate(n, &mut rng)?;
        println!("{}", seq.outputs.join(" "));
    } else if let Some(obs) = &argv.forward {
        let obs: Vec<&str> = obs.split_whitespace().collect();
        println!("{}", decoder.forward(&obs));
    } else if let Some(obs) = &argv.viterbi {
        let obs: Vec<&str> = obs.split_whitespace().collect();
        let decoded = decoder.viterbi(&obs)?;
        log::info!("path probability: {}", decoded.probability);
        println!("{}", decoded.states.join(" "));
    } else if let Some(n) = argv.evaluate {
        let mut evaluation = Evaluation::default();
        for _ in 0..argv.trials {
            let seq = hmm.generate(n, &mut rng)?;
            if seq.is_empty() {
                log::warn!("sampled an empty sequence; skipping");
                continue;
            }
            let decoded = decoder.viterbi(&seq.outputs)?;
            evaluation.accumulate(&seq.states, &decoded.states);
        }
        let est = evaluation.evaluate();
        log::info!("estimation: {:?}", est);
        print!("{}", evaluation);
    }
    Ok(())
}

fn main() -> ExitCode {
    let argv = Argv::parse();
    let mut logger = env_logger::Builder::from_default_env();
    match argv.verbose {
        0 => &mut logger,
        1 => logger.filter_level(log::LevelFilter::Info),
        2 => logger.filter_level(log::LevelFilter::Debug),
        _ => logger.filter_level(log::LevelFilter::Trace),
    }
    .init();
    log::info!("argv: {:?}", argv);

    match run(argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

use color_eyre::eyre::{Result, WrapErr, eyre};
use env_logger::Env;
use football_core::{FootballSimulator, MatchOutcome, MatchState, SimulationConfig};
use log::{info, warn};
use std::env;
use std::time::{Duration, Instant};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct RunOptions {
    outcome: MatchOutcome,
    stake: i64,
    matches: u32,
    realtime: bool,
    json: bool,
}

fn env_flag(name: &str) -> bool {
    matches!(env::var(name).as_deref(), Ok("1") | Ok("true") | Ok("TRUE"))
}

fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| eyre!("invalid {}={}: {}", name, value, e)),
        Err(_) => Ok(default),
    }
}

fn load_options() -> Result<(SimulationConfig, RunOptions)> {
    let mut config = SimulationConfig::default();

    if let Ok(seed) = env::var("SEED") {
        config = config.with_seed(seed.trim().parse().wrap_err("SEED must be an integer")?);
    }

    let options = RunOptions {
        outcome: env_parse("BET", MatchOutcome::Home)?,
        stake: env_parse("STAKE", 100)?,
        matches: env_parse("MATCHES", 1)?,
        realtime: env_flag("REALTIME"),
        json: env_flag("JSON"),
    };

    Ok((config, options))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    football_core::set_commentary_logging(env_flag("COMMENTARY"));

    let (config, options) = load_options()?;

    let mut simulator = FootballSimulator::new(config);
    let mut interval = tokio::time::interval(FRAME_INTERVAL);

    info!(
        "virtual football: {} match(es), {} on {}, balance {}",
        options.matches,
        options.stake,
        options.outcome,
        simulator.balance()
    );

    for round in 1..=options.matches {
        if let Err(rejection) = simulator
            .select_outcome(options.outcome)
            .and_then(|_| simulator.adjust_stake(options.stake))
            .and_then(|_| simulator.start_match())
        {
            warn!("round {}: bet rejected: {}", round, rejection);
            break;
        }

        let started = Instant::now();

        while simulator.state() == MatchState::Playing {
            if options.realtime {
                interval.tick().await;
            }

            simulator.update(1.0);
        }

        let snapshot = simulator.snapshot();

        if options.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        }

        info!(
            "round {}: {}-{} in {} frames ({} ms), balance {}",
            round,
            snapshot.score.home,
            snapshot.score.away,
            snapshot.frame,
            started.elapsed().as_millis(),
            simulator.balance()
        );

        while simulator.state() == MatchState::Finished {
            if options.realtime {
                interval.tick().await;
            }

            simulator.update(1.0);
        }
    }

    Ok(())
}

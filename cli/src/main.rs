use std::io;

use clap::Parser;
use minesweep_core as game;

use session::{Preset, Session, SessionOutcome};

mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Row count, asked for when missing
    #[arg(long, value_parser = parse_dimension)]
    rows: Option<game::Coord>,

    /// Column count, asked for when missing
    #[arg(long, value_parser = parse_dimension)]
    columns: Option<game::Coord>,

    /// Mine count, asked for when missing
    #[arg(long)]
    mines: Option<game::CellCount>,
}

fn parse_dimension(value: &str) -> Result<game::Coord, String> {
    match value.parse() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(dimension) => Ok(dimension),
        Err(err) => Err(format!("{err}")),
    }
}

/// `env` wins over the verbosity flags when its variable is set.
fn logger(verbose: &clap_verbosity_flag::Verbosity, env: env_logger::Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or(verbose.log_level_filter().as_str()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger(&args.verbose, env_logger::Env::default()).init();

    let generator = game::RandomMinefieldGenerator::new(args.seed.unwrap_or_else(rand::random));
    let seed = generator.seed();
    log::debug!("seed: {}", seed);

    let preset = Preset {
        rows: args.rows,
        columns: args.columns,
        mines: args.mines,
    };
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock());
    match session.run(preset, generator)? {
        SessionOutcome::Lost => log::info!("game lost, seed was {}", seed),
        SessionOutcome::InputClosed => log::info!("input closed, leaving"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    fn env(var: &str) -> env_logger::Env<'_> {
        env_logger::Env::new().filter(var)
    }

    #[test]
    fn verbosity_sets_the_level_without_env() {
        let quiet = Args::try_parse_from(["minesweep"]).unwrap();
        let loud = Args::try_parse_from(["minesweep", "-vv"]).unwrap();
        let silent = Args::try_parse_from(["minesweep", "-q"]).unwrap();

        let unset = "MINESWEEP_TEST_LOG_UNSET";
        assert_eq!(logger(&quiet.verbose, env(unset)).build().filter(), LevelFilter::Error);
        assert_eq!(logger(&loud.verbose, env(unset)).build().filter(), LevelFilter::Info);
        assert_eq!(logger(&silent.verbose, env(unset)).build().filter(), LevelFilter::Off);
    }

    #[test]
    fn env_filter_overrides_verbosity() {
        let var = "MINESWEEP_TEST_LOG_TRACE";
        // SAFETY: the variable is only read by this test.
        unsafe { std::env::set_var(var, "trace") };
        let args = Args::try_parse_from(["minesweep", "-q"]).unwrap();

        assert_eq!(logger(&args.verbose, env(var)).build().filter(), LevelFilter::Trace);
    }

    #[test]
    fn zero_dimension_flag_is_rejected() {
        assert!(Args::try_parse_from(["minesweep", "--rows", "0"]).is_err());
        let args = Args::try_parse_from(["minesweep", "--rows", "3", "--seed", "9"]).unwrap();
        assert_eq!(args.rows, Some(3));
        assert_eq!(args.seed, Some(9));
    }
}

//! `tourforge` command-line tool.

mod cli;
mod commands;
mod error;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tourforge::EngineConfig;

use crate::cli::{Cli, Command};
use crate::error::CliResult;

/// Config file read when `--config` is not given, if present.
const DEFAULT_CONFIG: &str = "tourforge.toml";

fn main() -> ExitCode {
    let cli = Cli::parse();
    tourforge::console::init_with_filter(log_filter(cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => tourforge::console::DEFAULT_FILTER,
        1 => "tourforge_solver=debug",
        _ => "tourforge_solver=trace",
    }
}

fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load(DEFAULT_CONFIG).unwrap_or_default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Generate {
            out: path,
            sizes,
            per_size,
            seed,
        } => commands::generate(&config, &path, &sizes, per_size, seed, &mut out),
        Command::Solve { matrix, algorithm } => {
            commands::solve(&config, &matrix, algorithm.as_deref(), &mut out)
        }
        Command::Run { store } => commands::run(&config, &store, &mut out),
        Command::BruteForce { matrix, all } => {
            commands::brute_force(&config, &matrix, all, &mut out)
        }
        Command::Experiment {
            algorithm,
            low,
            high,
            iterations,
            out: csv,
        } => commands::experiment(
            &config,
            algorithm.as_deref(),
            low,
            high,
            iterations,
            csv.as_deref(),
            &mut out,
        ),
        Command::Summary {
            store,
            construction,
            out: csv,
        } => commands::summary(&store, &construction, csv.as_deref(), &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tourforge", "solve", "m.json", "-vv", "--config", "c.yaml"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Path::new("c.yaml")));
        assert!(matches!(cli.command, Command::Solve { algorithm: None, .. }));
        assert_eq!(log_filter(cli.verbose), "tourforge_solver=trace");
    }

    #[test]
    fn parses_size_list() {
        let cli = Cli::parse_from(["tourforge", "generate", "-o", "g.json", "-s", "5,10,25"]);
        let Command::Generate { sizes, per_size, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(sizes, vec![5, 10, 25]);
        assert_eq!(per_size, None);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());

        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "construction: nearest_neighbor\nimprovements: [two_opt]\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.improvements.len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[experiment]\nlow = 1\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(crate::error::CliError::Config(_))
        ));
    }
}

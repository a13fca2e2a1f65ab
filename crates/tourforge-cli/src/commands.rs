//! Subcommand implementations.
//!
//! Every command writes its report to `out` so tests can capture it.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use tourforge::{
    summarize_store, write_csv, AlgorithmLabel, ConstructionAlgorithm, DistanceMatrix,
    EngineConfig, ExperimentRow, InstanceGenerator, InstanceStore, ProgressiveExperiment,
    TourSolver,
};

use crate::error::CliResult;

/// Reads a JSON matrix whose diagonal entries are `null`.
pub fn read_matrix(path: &Path) -> CliResult<DistanceMatrix> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn solver_for(config: &EngineConfig, algorithm: Option<&str>) -> CliResult<TourSolver> {
    Ok(match algorithm {
        Some(label) => TourSolver::from_label(label.parse::<AlgorithmLabel>()?),
        None => TourSolver::from_config(config),
    })
}

pub fn generate(
    config: &EngineConfig,
    path: &Path,
    sizes: &[usize],
    per_size: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let sizes = if sizes.is_empty() {
        config.generator.sizes.as_slice()
    } else {
        sizes
    };
    let per_size = per_size.unwrap_or(config.generator.graphs_per_size);
    let store = InstanceGenerator::from_config(&config.generator, seed.or(config.random_seed))
        .store(sizes, per_size)?;
    store.save(path)?;

    writeln!(
        out,
        "{} {} graphs in {} sizes → {}",
        "Generated".bright_green().bold(),
        store.graph_count(),
        store.groups.len(),
        path.display()
    )?;
    Ok(())
}

pub fn solve(
    config: &EngineConfig,
    path: &Path,
    algorithm: Option<&str>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let matrix = read_matrix(path)?;
    let result = solver_for(config, algorithm)?.solve(&matrix)?;

    writeln!(out, "{:<12}{}", "algorithm", result.label.bright_magenta())?;
    writeln!(out, "{:<12}{}", "tour", result.tour)?;
    writeln!(out, "{:<12}{}", "weight", result.weight.bright_green().bold())?;
    if !result.label.is_construction_only() {
        writeln!(
            out,
            "{:<12}{} → {} ({:.2}%)",
            "improved",
            result.construction_weight,
            result.weight,
            result.improvement_percent()
        )?;
    }
    Ok(())
}

pub fn run(config: &EngineConfig, path: &Path, out: &mut dyn Write) -> CliResult<()> {
    let mut store = InstanceStore::load(path)?;
    let report = tourforge::run_batch(&mut store, config)?;
    store.save(path)?;

    writeln!(
        out,
        "{} {} graphs │ {} recorded │ {} skipped",
        "Batch".bright_green().bold(),
        report.graphs,
        report.recorded,
        report.skipped
    )?;
    for group in &store.groups {
        for (index, graph) in group.graphs.iter().enumerate() {
            if let Some(best) = graph.best_attempt() {
                writeln!(
                    out,
                    "  {} nodes, graph {}: {:.2} : {}",
                    group.nodes,
                    index + 1,
                    best.weight,
                    best.algorithm
                )?;
            }
        }
    }
    Ok(())
}

pub fn brute_force(
    config: &EngineConfig,
    path: &Path,
    all: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let matrix = read_matrix(path)?;
    let result = tourforge::brute_force(&matrix, config)?;

    if all {
        for weight in &result.weights {
            writeln!(out, "{weight}")?;
        }
    }
    writeln!(out, "{:<12}{}", "tours", result.tour_count())?;
    writeln!(out, "{:<12}{}", "best", result.best_tour)?;
    writeln!(out, "{:<12}{}", "weight", result.best_weight.bright_green().bold())?;
    Ok(())
}

pub fn experiment(
    config: &EngineConfig,
    algorithm: Option<&str>,
    low: Option<usize>,
    high: Option<usize>,
    iterations: Option<usize>,
    csv: Option<&Path>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let mut config = config.clone();
    let range = &mut config.experiment;
    range.low = low.unwrap_or(range.low);
    range.high = high.unwrap_or(range.high);
    range.iterations = iterations.unwrap_or(range.iterations);
    config.validate()?;

    let experiment =
        ProgressiveExperiment::from_config(&config).with_solver(solver_for(&config, algorithm)?);
    let rows = experiment.run()?;
    emit_rows(&rows, csv, out)
}

pub fn summary(
    path: &Path,
    construction: &str,
    csv: Option<&Path>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let store = InstanceStore::load(path)?;
    let construction: ConstructionAlgorithm = construction.parse()?;
    let rows = summarize_store(&store, construction);
    emit_rows(&rows, csv, out)
}

fn emit_rows(rows: &[ExperimentRow], csv: Option<&Path>, out: &mut dyn Write) -> CliResult<()> {
    match csv {
        Some(path) => {
            write_csv(rows, BufWriter::new(File::create(path)?))?;
            writeln!(
                out,
                "{} {} rows → {}",
                "Wrote".bright_green().bold(),
                rows.len(),
                path.display()
            )?;
        }
        None => write_csv(rows, out)?,
    }
    Ok(())
}

//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats TourForge events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve, phase, batch and experiment start/end)
//! - **DEBUG**: Per-instance results (recorded attempts, finished sizes)
//! - **TRACE**: Individual accepted moves

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "tourforge_solver=info";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output with [`DEFAULT_FILTER`].
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initializes console output, falling back to `default_filter` when
/// `RUST_LOG` is unset or invalid.
///
/// Prints the banner and installs the subscriber on first call only.
pub fn init_with_filter(default_filter: &str) {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TourConsoleLayer)
            .try_init();
    });
}

fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____                 _____
|_   _|__  _   _ _ __ |  ___|__  _ __ __ _  ___
  | |/ _ \| | | | '__|| |_ / _ \| '__/ _` |/ _ \
  | | (_) | |_| | |   |  _| (_) | | | (_| |  __/
  |_|\___/ \__,_|_|   |_|  \___/|_|  \__, |\___|
                                     |___/
"#;

    let version_line = format!("              v{} - Heuristic Tour Engine\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
///
/// Output goes to stderr so command output on stdout stays machine-readable.
pub struct TourConsoleLayer;

impl<S: Subscriber> Layer<S> for TourConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("tourforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    algorithm: Option<String>,
    phase_index: Option<u64>,
    node_count: Option<u64>,
    nodes: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    moves_evaluated: Option<u64>,
    graphs: Option<u64>,
    groups: Option<u64>,
    labels: Option<u64>,
    recorded: Option<u64>,
    skipped: Option<u64>,
    sizes: Option<u64>,
    low: Option<u64>,
    high: Option<u64>,
    iterations: Option<u64>,
    weight: Option<f64>,
    improvement: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "phase" => self.phase = Some(s.trim_matches('"').to_string()),
            "algorithm" => self.algorithm = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "node_count" => self.node_count = Some(value),
            "nodes" => self.nodes = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "graphs" => self.graphs = Some(value),
            "groups" => self.groups = Some(value),
            "labels" => self.labels = Some(value),
            "recorded" => self.recorded = Some(value),
            "skipped" => self.skipped = Some(value),
            "sizes" => self.sizes = Some(value),
            "low" => self.low = Some(value),
            "high" => self.high = Some(value),
            "iterations" => self.iterations = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "weight" => self.weight = Some(value),
            "improvement" => self.improvement = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "algorithm" => self.algorithm = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_cancelled" => format_cancelled(),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        "experiment_start" => format_experiment_start(v),
        "experiment_end" => format_experiment_end(v),
        "store_generated" => format_store_generated(v),
        "attempt_recorded" | "size_finished" => format_result(v),
        "step" => format_step(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Solving │ {} │ {} nodes",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.algorithm.as_deref().unwrap_or("?").bright_magenta(),
        v.node_count.unwrap_or(0).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Solving complete │ {} │ {} moves │ weight {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.moves_evaluated.unwrap_or(0).white(),
        format_weight(v.weight).bright_green().bold(),
    )
}

fn format_cancelled() -> String {
    format!(
        "{} {} Solving cancelled",
        format_elapsed(),
        "✗".bright_red().bold()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} ended │ {} │ {} steps │ {} moves/s │ weight {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps.unwrap_or(0).white(),
        v.speed.unwrap_or(0).bright_magenta().bold(),
        format_weight(v.weight).bright_green(),
    )
}

fn format_batch_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Batch │ {} graphs │ {} labels each",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.graphs.unwrap_or(0).bright_yellow(),
        v.labels.unwrap_or(0).bright_yellow(),
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Batch complete │ {} │ {} recorded │ {} skipped",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.recorded.unwrap_or(0).bright_green(),
        v.skipped.unwrap_or(0).white(),
    )
}

fn format_experiment_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Experiment │ {} │ sizes {}..={} │ {} per size",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.algorithm.as_deref().unwrap_or("?").bright_magenta(),
        v.low.unwrap_or(0).bright_yellow(),
        v.high.unwrap_or(0).bright_yellow(),
        v.iterations.unwrap_or(0).bright_yellow(),
    )
}

fn format_experiment_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Experiment complete │ {} │ {} sizes",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.sizes.unwrap_or(0).white(),
    )
}

fn format_store_generated(v: &EventVisitor) -> String {
    format!(
        "{} {} Generated {} graphs in {} groups",
        format_elapsed(),
        "✚".bright_green(),
        v.graphs.unwrap_or(0).bright_yellow(),
        v.groups.unwrap_or(0).bright_yellow(),
    )
}

fn format_result(v: &EventVisitor) -> String {
    let nodes = v.nodes.unwrap_or(0);
    match (v.algorithm.as_deref(), v.improvement) {
        (_, Some(improvement)) => format!(
            "{} {} n={:<4} │ {}",
            format_elapsed(),
            "·".bright_black(),
            nodes,
            format!("{:.2}%", improvement).bright_green(),
        ),
        (algorithm, None) => format!(
            "{} {} n={:<4} │ {:<20} │ {}",
            format_elapsed(),
            "·".bright_black(),
            nodes,
            algorithm.unwrap_or("?"),
            format_weight(v.weight).white(),
        ),
    }
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} {} │ weight {}",
        format_elapsed(),
        "✓".bright_green(),
        v.phase.as_deref().unwrap_or("?").bright_black(),
        format_weight(v.weight).bright_black(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_weight(weight: Option<f64>) -> String {
    match weight {
        Some(w) if w.is_finite() => format!("{:.2}", w),
        Some(_) => "∞".to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn weights() {
        assert_eq!(format_weight(Some(12.0)), "12.00");
        assert_eq!(format_weight(Some(f64::INFINITY)), "∞");
        assert_eq!(format_weight(None), "N/A");
    }

    #[test]
    fn unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("edge_accepted".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::TRACE).is_empty());
    }

    #[test]
    fn steps_only_at_trace() {
        let visitor = EventVisitor {
            event: Some("step".to_string()),
            phase: Some("2-opt".to_string()),
            weight: Some(6.0),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("2-opt"));
    }
}

// crates/pm_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, and the run path:
// load → overrides → (validate-only) → randomize → election → coalition →
// scenarios → floor vote → summary → artifacts.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    /// Election refused by the orchestration layer (e.g. shares over 100 %).
    pub const REJECTED: i32 = 5;
}

use std::fmt::{self, Write as _};
use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};

use pm_core::{rng::sim_rng_from_seed, ElectionOutcome};
use pm_io::{canonical_json, loader, IoError};
use pm_pipeline::{scenarios, ElectionSettingsUpdate, FloorVote, Legislature, PipelineError};
use pm_report::format_pct_2dp;

const RESULT_FILE: &str = "result.json";

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Config shape/domain failures, bad overrides, unknown party ids
    Validation(String),
    /// I/O errors (read/write/path/limits)
    Io(String),
    /// Election rejected by the orchestration layer
    Rejected(String),
    /// Export rendering errors
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Rejected(m) => write!(f, "{m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("parliament: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(args.quiet);

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("parliament: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Logs go to stderr; RUST_LOG overrides the default level.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Rejected(_) => REJECTED,
        MainError::Render(_) => IO,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid { pointer, msg } => MainError::Validation(format!("{pointer}: {msg}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::ElectionRejected(m) => MainError::Rejected(format!("election rejected: {m}")),
        PipelineError::Build(m) => MainError::Io(m),
        other => MainError::Validation(other.to_string()),
    }
}

// ----- run path -----

fn run_once(args: &Args) -> Result<(), MainError> {
    let mut leg = load_legislature(args)?;
    apply_overrides(&mut leg, args)?;

    if args.validate_only {
        info!(parties = leg.parties().len(), seats = leg.total_seats(), "validate-only: inputs OK");
        return Ok(());
    }

    let mut rng = sim_rng_from_seed(args.seed);
    if args.randomize {
        leg.randomize_vote_shares(&mut rng);
    }

    leg.run_election().map_err(map_pipeline_err)?;

    if !args.coalition.is_empty() {
        leg.clear_coalition();
        for id in &args.coalition {
            if !leg.coalition().contains(id) {
                leg.toggle_coalition_member(id).map_err(map_pipeline_err)?;
            }
        }
    }
    let fresh = leg.check_scenarios();
    let floor = args.motion.as_deref().map(|title| leg.simulate_floor_vote(title, &mut rng));

    print!("{}", summary(&leg, &fresh, floor.as_ref())?);

    if let Some(out) = &args.out {
        write_artifacts(&leg, out, &args.render)?;
    }
    Ok(())
}

fn load_legislature(args: &Args) -> Result<Legislature, MainError> {
    if let Some(path) = &args.config {
        let cfg = loader::load_config(path).map_err(map_io_err)?;
        return Legislature::from_config(cfg).map_err(map_pipeline_err);
    }
    let mut leg = Legislature::new();
    if let Some(preset) = args.preset {
        leg.load_preset(preset);
    }
    Ok(leg)
}

fn apply_overrides(leg: &mut Legislature, args: &Args) -> Result<(), MainError> {
    if let Some(n) = args.seats {
        leg.set_total_seats(n).map_err(map_pipeline_err)?;
    }
    let update = ElectionSettingsUpdate {
        eligible_voters: args.voters,
        turnout_pct: args.turnout,
        threshold_pct: args.threshold,
        system: args.system,
    };
    if update != ElectionSettingsUpdate::default() {
        leg.set_election_settings(update).map_err(map_pipeline_err)?;
    }
    Ok(())
}

// ----- output -----

/// Human-readable run summary for stdout.
fn summary(leg: &Legislature, fresh: &[&'static str], floor: Option<&FloorVote>) -> Result<String, MainError> {
    render_summary(leg, fresh, floor).map_err(|e| MainError::Render(e.to_string()))
}

fn render_summary(leg: &Legislature, fresh: &[&'static str], floor: Option<&FloorVote>) -> Result<String, fmt::Error> {
    let mut s = String::new();
    if let Some(o) = leg.last_outcome() {
        writeln!(
            s,
            "System: {} | Threshold: {}% | Seats: {}",
            o.system,
            format_pct_2dp(o.threshold_pct),
            o.total_seats
        )?;
        writeln!(s, "Votes cast: {} | Valid: {} | Spoiled: {}", o.votes_cast, o.valid_votes, o.spoiled_ballots)?;
        writeln!(s)?;
        writeln!(s, "{:<8} {:<28} {:>12} {:>8} {:>6}", "ID", "PARTY", "VOTES", "%", "SEATS")?;
        for r in &o.results {
            let name = leg.party(&r.party_id).map(|p| p.name.as_str()).unwrap_or("");
            writeln!(
                s,
                "{:<8} {:<28} {:>12} {:>8} {:>6}",
                r.party_id,
                name,
                r.votes,
                format_pct_2dp(r.percentage),
                r.seats
            )?;
        }
        writeln!(s)?;
    }

    let members: Vec<&str> = leg.coalition().iter().map(|id| id.as_str()).collect();
    writeln!(s, "Coalition: [{}] {} seats", members.join(", "), leg.coalition_seats())?;
    for t in leg.majority_targets() {
        let mark = if t.achieved { "achieved" } else { "not reached" };
        writeln!(s, "  {:<24} {:>4}  {:>6.1}%  {mark}", t.kind.label(), t.target, t.progress_pct)?;
    }

    for &id in leg.completed_scenarios() {
        let title = scenarios::scenario(id).map(|sc| sc.title).unwrap_or(id);
        let new = if fresh.contains(&id) { " (new)" } else { "" };
        writeln!(s, "Challenge completed: {title}{new}")?;
    }

    if let Some(v) = floor {
        writeln!(
            s,
            "Floor vote \"{}\": yes {} | no {} | abstain {} | needed {} -> {}",
            v.title,
            v.yes,
            v.no,
            v.abstain,
            v.majority_required,
            if v.passed { "PASSED" } else { "FAILED" }
        )?;
    }

    if let Some(o) = leg.last_outcome() {
        writeln!(s, "Result: {}", o.result_id)?;
    }
    Ok(s)
}

/// Write result.json plus every requested export into `out`.
fn write_artifacts(leg: &Legislature, out: &Path, renders: &[String]) -> Result<(), MainError> {
    let outcome = leg
        .last_outcome()
        .ok_or_else(|| MainError::Rejected("no election outcome to write".into()))?;

    let value = serde_json::to_value(outcome).map_err(|e| MainError::Render(e.to_string()))?;
    let result_path = out.join(RESULT_FILE);
    canonical_json::write_canonical_file(&result_path, &value)
        .map_err(|e| MainError::Io(format!("{}: {e}", result_path.display())))?;
    info!(path = %result_path.display(), "result written");

    for kind in renders {
        let (file, body) = match kind.as_str() {
            "json" => (
                pm_report::JSON_EXPORT_FILE,
                pm_report::render_json(leg.total_seats(), leg.parties()).map_err(render_err)?,
            ),
            "csv" => (pm_report::CSV_EXPORT_FILE, pm_report::render_csv(leg.parties()).map_err(render_err)?),
            "html" => (pm_report::HTML_EXPORT_FILE, render_html_page(leg, outcome)?),
            other => {
                warn!(render = other, "unknown export kind skipped");
                continue;
            }
        };
        let path = out.join(file);
        canonical_json::write_atomic(&path, body.as_bytes())
            .map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "export written");
    }
    Ok(())
}

fn render_err(e: pm_report::ReportError) -> MainError {
    MainError::Render(e.to_string())
}

#[cfg(feature = "report-html")]
fn render_html_page(leg: &Legislature, outcome: &ElectionOutcome) -> Result<String, MainError> {
    let page = pm_report::ResultsPage { title: "Election Results", outcome, parties: leg.parties() };
    pm_report::render_html(&page).map_err(render_err)
}

#[cfg(not(feature = "report-html"))]
fn render_html_page(_leg: &Legislature, _outcome: &ElectionOutcome) -> Result<String, MainError> {
    Err(MainError::Validation("html export not built in (enable feature report-html)".into()))
}

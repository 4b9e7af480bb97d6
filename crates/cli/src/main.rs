use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minelayout::api::{validate_design, DesignContext, DesignRequest};
use minelayout::geology::{GeologyAnalyzer, DEFAULT_GRID_RESOLUTION};
use minelayout::layout::DesignResult;
use minelayout::rules::{MiningRuleSet, RuleOverrides, ThicknessClass};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod boreholes;
mod provenance;

use provenance::Provenance;

#[derive(Parser)]
#[command(name = "minelayout")]
#[command(about = "Workface and roadway layout for coal-mine districts")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Lay out workfaces and roadways for a design request
    Design {
        /// Request JSON: boundary, boreholes, params
        #[arg(long)]
        request: PathBuf,
        /// Borehole CSV replacing the request's boreholes
        #[arg(long)]
        boreholes: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Estimate seam dip from a borehole table
    Dip {
        #[arg(long)]
        boreholes: PathBuf,
        #[arg(long)]
        seam: Option<String>,
    },
    /// Sample the mineability score over the request boundary
    ScoreGrid {
        #[arg(long)]
        request: PathBuf,
        #[arg(long)]
        boreholes: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_GRID_RESOLUTION)]
        resolution: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the effective rule set and panel-count suggestions
    Rules {
        /// Rule overrides JSON
        #[arg(long)]
        overrides: Option<PathBuf>,
        /// District extent along strike, metres
        #[arg(long)]
        strike: Option<f64>,
        /// District extent along dip, metres
        #[arg(long)]
        dip: Option<f64>,
    },
    /// Re-check the workfaces of a design output against the rules
    Validate {
        #[arg(long)]
        design: PathBuf,
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
    /// Per-seam statistics of a borehole table
    Geology {
        #[arg(long)]
        boreholes: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Design {
            request,
            boreholes,
            out,
        } => design(&request, boreholes.as_deref(), &out),
        Action::Dip { boreholes, seam } => dip(&boreholes, seam.as_deref()),
        Action::ScoreGrid {
            request,
            boreholes,
            resolution,
            out,
        } => score_grid(&request, boreholes.as_deref(), resolution, &out),
        Action::Rules {
            overrides,
            strike,
            dip,
        } => rules(overrides.as_deref(), strike, dip),
        Action::Validate { design, overrides } => validate(&design, overrides.as_deref()),
        Action::Geology { boreholes } => geology(&boreholes),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_request(request: &Path, boreholes: Option<&Path>) -> Result<DesignRequest> {
    let mut req: DesignRequest = read_json(request)?;
    if let Some(csv) = boreholes {
        req.boreholes = boreholes::load_boreholes(csv)?;
    }
    Ok(req)
}

fn load_overrides(path: Option<&Path>) -> Result<MiningRuleSet> {
    let overrides: RuleOverrides = match path {
        Some(p) => read_json(p)?,
        None => RuleOverrides::default(),
    };
    Ok(MiningRuleSet::with_overrides(&overrides)?)
}

fn design(request: &Path, boreholes: Option<&Path>, out: &Path) -> Result<()> {
    let req = load_request(request, boreholes)?;
    let params = serde_json::to_value(&req.params)?;
    let ctx = DesignContext::new(req)?;
    let outcome = ctx.run()?;
    tracing::info!(
        workfaces = outcome.result.stats.count,
        valid = outcome.result.stats.valid_count,
        roadways = outcome.result.roadways.len(),
        fallback = outcome.result.stats.fallback,
        "design"
    );
    write_json(out, &outcome)?;
    Provenance::new("design", params)
        .input(request)
        .inputs(boreholes)
        .design(&ctx)
        .write_for(out)?;
    Ok(())
}

fn dip(boreholes: &Path, seam: Option<&str>) -> Result<()> {
    let samples = boreholes::load_boreholes(boreholes)?;
    let analyzer = GeologyAnalyzer::from_samples(samples);
    print_json(&analyzer.calculate_dip_angle(seam))
}

fn score_grid(
    request: &Path,
    boreholes: Option<&Path>,
    resolution: usize,
    out: &Path,
) -> Result<()> {
    let req = load_request(request, boreholes)?;
    let ctx = DesignContext::new(req)?;
    let grid = ctx.score_grid(resolution);
    tracing::info!(cells = grid.cells.len(), resolution, "score grid");
    write_json(out, &grid)?;
    Provenance::new("score-grid", serde_json::json!({ "resolution": resolution }))
        .input(request)
        .inputs(boreholes)
        .design(&ctx)
        .write_for(out)?;
    Ok(())
}

fn rules(overrides: Option<&Path>, strike: Option<f64>, dip: Option<f64>) -> Result<()> {
    let rules = load_overrides(overrides)?;
    let suggestion = match (strike, dip) {
        (Some(s), Some(d)) => Some(rules.suggest_face_count(s, d)),
        (None, None) => None,
        _ => anyhow::bail!("--strike and --dip go together"),
    };
    print_json(&serde_json::json!({
        "rules": &rules,
        "faceCount": suggestion,
    }))
}

fn validate(design: &Path, overrides: Option<&Path>) -> Result<()> {
    let result: DesignResult = read_json(design)?;
    // without overrides, re-check against the rule set recorded in the design
    let rules = match overrides {
        Some(_) => load_overrides(overrides)?,
        None => result.rules.clone(),
    };
    let report = validate_design(&result.workfaces, &rules);
    if report.invalid_count > 0 {
        tracing::warn!(invalid = report.invalid_count, "workfaces violate the rules");
    }
    print_json(&report)
}

fn geology(boreholes: &Path) -> Result<()> {
    let samples = boreholes::load_boreholes(boreholes)?;
    let analyzer = GeologyAnalyzer::from_samples(samples);
    let summary = analyzer.summary();
    let rules = MiningRuleSet::default();
    let classes: BTreeMap<&str, ThicknessClass> = summary
        .coal_seams
        .iter()
        .map(|(name, s)| (name.as_str(), rules.classify_coal_thickness(s.avg_thickness)))
        .collect();
    print_json(&serde_json::json!({
        "summary": &summary,
        "thicknessClass": classes,
    }))
}

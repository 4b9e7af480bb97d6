//! Provenance sidecars for CLI artifacts.
//!
//! Every JSON artifact `foo.json` gets `foo.provenance.json` next to it: the
//! command and call site that wrote it, the code revision, the input files,
//! and for design-derived artifacts the request frame (coordinate offset,
//! target seam, effective rule set) needed to reproduce or re-validate it.

use anyhow::{Context, Result};
use minelayout::api::{CoordOffset, DesignContext};
use minelayout::rules::MiningRuleSet;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Request frame an artifact was computed in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTrace {
    /// Shift subtracted from survey coordinates; outputs stay shifted.
    pub offset: CoordOffset,
    pub target_seam: Option<String>,
    pub borehole_count: usize,
    pub rules: MiningRuleSet,
}

impl DesignTrace {
    pub fn of(ctx: &DesignContext) -> Self {
        Self {
            offset: ctx.offset(),
            target_seam: ctx.params().target_seam.clone(),
            borehole_count: ctx.geology().map_or(0, |g| g.len()),
            rules: ctx.rules().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Provenance {
    command: &'static str,
    code_rev: String,
    minelayout_version: &'static str,
    callsite: Callsite,
    inputs: Vec<String>,
    params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<DesignTrace>,
    outputs: Vec<String>,
}

impl Provenance {
    /// Record for `command`; the call site is the caller of `new`.
    #[track_caller]
    pub fn new(command: &'static str, params: Value) -> Self {
        let at = Location::caller();
        Self {
            command,
            code_rev: code_rev(),
            minelayout_version: minelayout::VERSION,
            callsite: Callsite {
                file: at.file(),
                line: at.line(),
            },
            inputs: Vec::new(),
            params,
            design: None,
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, path: &Path) -> Self {
        self.inputs.push(path.display().to_string());
        self
    }

    pub fn inputs<'a>(self, paths: impl IntoIterator<Item = &'a Path>) -> Self {
        paths.into_iter().fold(self, Provenance::input)
    }

    pub fn design(mut self, ctx: &DesignContext) -> Self {
        self.design = Some(DesignTrace::of(ctx));
        self
    }

    /// Write the sidecar of `artifact` and return its path.
    pub fn write_for(mut self, artifact: &Path) -> Result<PathBuf> {
        let path = sidecar_path(artifact);
        self.outputs.push(artifact.display().to_string());
        fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "provenance written");
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse`.
fn code_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minelayout::api::DesignRequest;
    use minelayout::geom2::Point2D;
    use serde_json::json;
    use tempfile::tempdir;

    fn far_square_request() -> DesignRequest {
        let (x0, y0) = (39_500_000.0, 4_200_000.0);
        serde_json::from_value(json!({
            "boundary": [
                {"x": x0, "y": y0},
                {"x": x0 + 1000.0, "y": y0},
                {"x": x0 + 1000.0, "y": y0 + 1000.0},
                {"x": x0, "y": y0 + 1000.0}
            ],
            "params": {
                "targetSeam": "3号煤",
                "miningRules": {"faceLength": {"preferred": 220}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/design.json")),
            Path::new("/tmp/out/design.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("grid")),
            Path::new("grid.provenance.json")
        );
    }

    #[test]
    fn design_sidecar_records_the_request_frame() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("design.json");
        let ctx = DesignContext::new(far_square_request()).unwrap();
        assert_eq!(ctx.boundary()[0], Point2D::new(0.0, 0.0));

        let line = line!() + 1;
        let written = Provenance::new("design", json!({"faceWidth": 200}))
            .input(Path::new("request.json"))
            .design(&ctx)
            .write_for(&artifact)
            .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();

        assert_eq!(doc["command"], "design");
        assert_eq!(doc["callsite"]["line"], line);
        assert_eq!(doc["inputs"], json!(["request.json"]));
        assert_eq!(doc["outputs"][0], artifact.display().to_string());
        assert_eq!(doc["design"]["offset"], json!({"x": 39_500_000.0, "y": 4_200_000.0}));
        assert_eq!(doc["design"]["targetSeam"], "3号煤");
        assert_eq!(doc["design"]["boreholeCount"], 0);
        assert_eq!(doc["design"]["rules"]["faceLength"]["preferred"], 220.0);
    }

    #[test]
    fn plain_sidecar_has_no_design_block() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("grid.json");
        let written = Provenance::new("score-grid", json!({"resolution": 20}))
            .inputs([Path::new("a.json"), Path::new("b.csv")])
            .write_for(&artifact)
            .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();
        assert!(doc.get("design").is_none());
        assert_eq!(doc["inputs"], json!(["a.json", "b.csv"]));
        assert_eq!(doc["minelayout_version"], minelayout::VERSION);
    }
}

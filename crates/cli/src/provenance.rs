//! Provenance sidecars for simulation reports.
//!
//! A report `runs/sim.json` gets `runs/sim.provenance.json` next to it: the
//! code revision, where in the CLI it was written, the effective `SimCfg`,
//! and a short run summary so the sidecar alone tells what the run produced.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Aggregates over all ticks of a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: usize,
    pub total_pairs: usize,
    pub total_crossings: usize,
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl RunSummary {
    pub fn record(&mut self, depth: usize, nodes: usize, pairs: usize, crossings: usize) {
        self.ticks += 1;
        self.total_pairs += pairs;
        self.total_crossings += crossings;
        self.max_depth = self.max_depth.max(depth);
        self.max_nodes = self.max_nodes.max(nodes);
    }
}

/// What a run records next to its report.
pub struct Provenance {
    pub params: Value,
    pub summary: Option<RunSummary>,
    /// Free-form labels, e.g. the subcommand that produced the report.
    pub tags: Vec<String>,
}

impl Provenance {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            summary: None,
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn summary(mut self, summary: RunSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    crate_version: &'static str,
    callsite: Callsite,
    tags: &'a [String],
    params: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a RunSummary>,
    report: String,
}

/// Write `<report stem>.provenance.json` beside `report`; returns its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(report: P, prov: &Provenance) -> Result<PathBuf> {
    let report = report.as_ref();
    let path = sidecar_path(report);
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        crate_version: vroom::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        tags: &prov.tags,
        params: &prov.params,
        summary: prov.summary.as_ref(),
        report: report.to_string_lossy().into_owned(),
    };
    ensure_parent(&path)?;
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
        }
        _ => Ok(()),
    }
}

fn sidecar_path(report: &Path) -> PathBuf {
    let stem = report.file_stem().and_then(|s| s.to_str()).unwrap_or("report");
    report.with_file_name(format!("{stem}.provenance.json"))
}

/// Revision baked in at build time, then `$GIT_COMMIT`, then `git rev-parse`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use vroom::prelude::*;

mod provenance;
mod world;

use provenance::{Provenance, RunSummary};
use world::{SimCfg, World};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Broad-phase simulation and geometry probes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Move random bodies for a number of ticks and report overlaps per tick
    Simulate {
        /// JSON file with `SimCfg` fields; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        bodies: Option<usize>,
        #[arg(long)]
        ticks: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Report path; a provenance sidecar is written next to it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Intersect two segments given as `x1,y1,x2,y2`
    Intersect {
        #[arg(long, allow_hyphen_values = true)]
        a: String,
        #[arg(long, allow_hyphen_values = true)]
        b: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Simulate {
            config,
            width,
            height,
            bodies,
            ticks,
            seed,
            out,
        } => {
            let mut cfg = match config {
                Some(path) => load_cfg(&path)?,
                None => SimCfg::default(),
            };
            cfg.width = width.unwrap_or(cfg.width);
            cfg.height = height.unwrap_or(cfg.height);
            cfg.bodies = bodies.unwrap_or(cfg.bodies);
            cfg.ticks = ticks.unwrap_or(cfg.ticks);
            cfg.seed = seed.unwrap_or(cfg.seed);
            simulate(cfg, out)
        }
        Action::Intersect { a, b } => intersect(&a, &b),
        Action::Report => report(),
    }
}

fn load_cfg(path: &Path) -> Result<SimCfg> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[derive(Serialize)]
struct TickStats {
    tick: usize,
    depth: usize,
    nodes: usize,
    overlapping_pairs: usize,
    crossings: usize,
}

#[derive(Serialize)]
struct SimReport {
    cfg: SimCfg,
    ticks: Vec<TickStats>,
}

fn simulate(cfg: SimCfg, out: Option<PathBuf>) -> Result<()> {
    if !(cfg.width > 0.0 && cfg.height > 0.0) {
        bail!("world must have positive extent, got {}×{}", cfg.width, cfg.height);
    }
    tracing::info!(bodies = cfg.bodies, ticks = cfg.ticks, seed = cfg.seed, "simulate");
    let mut world = World::random(&cfg);
    let mut ticks = Vec::with_capacity(cfg.ticks);
    let mut summary = RunSummary::default();
    for tick in 0..cfg.ticks {
        world.tick(cfg.dt);
        let pairs = world.broad_phase();
        let crossings = world.crossings(&pairs);
        let stats = TickStats {
            tick,
            depth: world.tree().depth(),
            nodes: world.tree().node_count(),
            overlapping_pairs: pairs.len(),
            crossings: crossings.len(),
        };
        tracing::debug!(tick, pairs = stats.overlapping_pairs, depth = stats.depth, "tick");
        summary.record(stats.depth, stats.nodes, stats.overlapping_pairs, stats.crossings);
        ticks.push(stats);
    }
    tracing::info!(
        total_pairs = summary.total_pairs,
        total_crossings = summary.total_crossings,
        max_depth = summary.max_depth,
        "simulation finished"
    );

    let report = SimReport { cfg, ticks };
    match out {
        Some(out) => {
            provenance::ensure_parent(&out)?;
            std::fs::write(&out, serde_json::to_vec_pretty(&report)?)
                .with_context(|| format!("writing {}", out.display()))?;
            let params = serde_json::to_value(&report.cfg)?;
            let prov = Provenance::new(params).tag("simulate").summary(summary);
            let sidecar = provenance::write_sidecar(&out, &prov)?;
            tracing::info!(report = %out.display(), sidecar = %sidecar.display(), "wrote");
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn parse_segment(s: &str) -> Result<LineSegment2> {
    let v = s
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("bad segment {s:?}"))?;
    let &[x1, y1, x2, y2] = v.as_slice() else {
        bail!("segment {s:?} needs four comma-separated numbers, got {}", v.len());
    };
    Ok(LineSegment2::new(Vector2::new(x1, y1), Vector2::new(x2, y2)))
}

fn intersect(a: &str, b: &str) -> Result<()> {
    let (a, b) = (parse_segment(a)?, parse_segment(b)?);
    match a.intersection_with(&b) {
        Ok(p) => println!("{} {}", p.x, p.y),
        Err(e) => {
            tracing::info!(reason = ?e, "no intersection");
            println!("{e}");
        }
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "crate_version": vroom::VERSION,
        "tags": [],
        "params": serde_json::to_value(SimCfg::default())?,
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

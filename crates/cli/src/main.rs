use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roomnav::pipeline::{navigation, plan, plan_with_obstacles, room, PlanRequest};
use roomnav::select::select_obstacles;
use roomnav::PlannerCfg;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;
mod scenario;

use provenance::{write_sidecar, Payload};
use scenario::{Scenario, Source};

#[derive(Parser)]
#[command(name = "roomnav")]
#[command(about = "Plan walkable routes through a traced room")]
struct Cmd {
    /// Optional run tag; propagated to sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Plan a path and write it as JSON, CSV or Parquet (by extension)
    Plan {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Include the literal start and goal in the path
        #[arg(long)]
        endpoints: bool,
        /// Interior Steiner grid spacing in pixels
        #[arg(long)]
        steiner: Option<f64>,
    },
    /// Write obstacles, triangles and graph as JSON for an external renderer
    Mesh {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        steiner: Option<f64>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// How a `plan` invocation ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Planned,
    Unreachable,
}

fn main() -> Result<ExitCode> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Plan {
            input,
            out,
            endpoints,
            steiner,
        } => {
            let outcome = plan_cmd(&input, &out, endpoints, steiner, cmd.tag)?;
            Ok(match outcome {
                Outcome::Planned => ExitCode::SUCCESS,
                Outcome::Unreachable => ExitCode::from(2),
            })
        }
        Action::Mesh {
            input,
            out,
            steiner,
        } => {
            mesh_cmd(&input, &out, steiner, cmd.tag)?;
            Ok(ExitCode::SUCCESS)
        }
        Action::Report => {
            report(cmd.tag)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(input: &Path, endpoints: bool, steiner: Option<f64>) -> Result<(Scenario, PlannerCfg)> {
    let scenario = Scenario::load(input)?;
    let mut cfg = scenario.planner_cfg();
    if endpoints {
        cfg.path.include_endpoints = true;
    }
    if steiner.is_some() {
        cfg.mesh.steiner_spacing = steiner;
    }
    Ok((scenario, cfg))
}

fn params(scenario: &Scenario, cfg: &PlannerCfg) -> serde_json::Value {
    json!({
        "width": scenario.width,
        "height": scenario.height,
        "start": scenario.start,
        "goal": scenario.goal,
        "config": format!("{cfg:?}"),
    })
}

fn plan_cmd(
    input: &Path,
    out: &Path,
    endpoints: bool,
    steiner: Option<f64>,
    tag: Option<String>,
) -> Result<Outcome> {
    let (scenario, cfg) = load(input, endpoints, steiner)?;
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "plan");
    let source = scenario
        .source()
        .with_context(|| format!("contours in {}", input.display()))?;
    let result = match source {
        Source::Forest(forest) => plan(
            &PlanRequest {
                width: scenario.width,
                height: scenario.height,
                forest,
                start: scenario.start(),
                goal: scenario.goal(),
            },
            &cfg,
        ),
        Source::Obstacles(set) => {
            let room = room(scenario.width, scenario.height)
                .with_context(|| format!("room of {}", input.display()))?;
            plan_with_obstacles(&room, set, scenario.start(), scenario.goal(), &cfg)
        }
    };
    let plan = match result {
        Ok(plan) => plan,
        Err(err) if err.is_unreachable() => {
            tracing::warn!(%err, "goal unreachable; no path written");
            return Ok(Outcome::Unreachable);
        }
        Err(err) => return Err(err).with_context(|| format!("planning {}", input.display())),
    };

    let format = export::write_path(out, &plan.path)?;
    let mut p = params(&scenario, &cfg);
    p["format"] = json!(format!("{format:?}").to_lowercase());
    p["obstacles"] = json!(plan.obstacles.len());
    p["triangles"] = json!(plan.mesh.len());
    p["waypoints"] = json!(plan.path.len());
    p["length"] = json!(plan.path.length);
    write_sidecar(out, Payload::new(p).input(input).tag(tag))?;
    tracing::info!(waypoints = plan.path.len(), length = plan.path.length, "path written");
    Ok(Outcome::Planned)
}

fn mesh_cmd(input: &Path, out: &Path, steiner: Option<f64>, tag: Option<String>) -> Result<()> {
    let (scenario, cfg) = load(input, false, steiner)?;
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "mesh");
    let room = room(scenario.width, scenario.height)
        .with_context(|| format!("room of {}", input.display()))?;
    let source = scenario
        .source()
        .with_context(|| format!("contours in {}", input.display()))?;
    let obstacles = match source {
        Source::Forest(forest) => select_obstacles(&forest, room.area(), &cfg.select)
            .with_context(|| format!("selecting obstacles in {}", input.display()))?,
        Source::Obstacles(set) => set,
    };
    let nav = navigation(&room, &obstacles, &cfg.mesh, &cfg.graph)
        .with_context(|| format!("meshing {}", input.display()))?;
    export::write_mesh(out, &obstacles, &nav)?;

    let mut p = params(&scenario, &cfg);
    p["obstacles"] = json!(obstacles.len());
    p["triangles"] = json!(nav.mesh.len());
    p["edges"] = json!(nav.graph.num_edges());
    write_sidecar(out, Payload::new(p).input(input).tag(tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::document(tag.as_deref());
    obj["params"] = json!({ "defaults": format!("{:?}", PlannerCfg::default()) });
    obj["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    const SCENARIO: &str = r#"{
        "width": 100, "height": 100,
        "contours": [
            {"points": [[1,1],[99,1],[99,99],[1,99]], "hierarchy": [-1,-1,1,-1]},
            {"points": [[40,40],[60,40],[60,60],[40,60]], "hierarchy": [-1,-1,-1,0]}
        ],
        "start": [0, 0], "goal": [100, 100],
        "config": {"include_endpoints": true}
    }"#;

    fn scenario_file(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("room.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn plan_writes_path_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = scenario_file(dir.path(), SCENARIO);
        let out = dir.path().join("runs/path.json");
        let outcome = plan_cmd(&input, &out, false, None, Some("t1".into())).unwrap();
        assert_eq!(outcome, Outcome::Planned);

        let pts: Vec<[f64; 2]> = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(pts.first(), Some(&[0.0, 0.0]));
        assert_eq!(pts.last(), Some(&[100.0, 100.0]));

        let prov = provenance::provenance_path(&out);
        let doc: Value = serde_json::from_slice(&fs::read(prov).unwrap()).unwrap();
        assert_eq!(doc["params"]["obstacles"], 1);
        assert_eq!(doc["params"]["format"], "json");
        assert_eq!(doc["tag"], "t1");
        assert!(doc["params"]["length"].as_f64().unwrap() > 141.4);
    }

    #[test]
    fn plan_to_csv_with_steiner_flag() {
        let dir = tempdir().unwrap();
        let input = scenario_file(dir.path(), SCENARIO);
        let out = dir.path().join("path.csv");
        plan_cmd(&input, &out, true, Some(10.0), None).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("x,y"));
        assert!(text.lines().count() > 3);
    }

    #[test]
    fn mesh_export_lists_triangles_and_edges() {
        let dir = tempdir().unwrap();
        let input = scenario_file(dir.path(), SCENARIO);
        let out = dir.path().join("mesh.json");
        mesh_cmd(&input, &out, None, None).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["obstacles"].as_array().unwrap().len(), 1);
        assert!(doc["triangles"].as_array().unwrap().len() >= 8);
        assert_eq!(
            doc["nodes"].as_array().unwrap().len(),
            doc["triangles"].as_array().unwrap().len()
        );
        assert!(!doc["edges"].as_array().unwrap().is_empty());
        assert!(provenance::provenance_path(&out).exists());
    }

    #[test]
    fn plain_mesh_from_scenario_config() {
        let dir = tempdir().unwrap();
        let body = SCENARIO.replace(
            r#""include_endpoints": true"#,
            r#""include_endpoints": true, "refine": false"#,
        );
        let input = scenario_file(dir.path(), &body);
        let out = dir.path().join("mesh.json");
        mesh_cmd(&input, &out, None, None).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["triangles"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn invalid_scenario_names_the_file() {
        let dir = tempdir().unwrap();
        let input = scenario_file(
            dir.path(),
            r#"{"width": 100, "height": 100, "obstacles": [[[0,10],[20,10],[20,30],[0,30]]],
                "start": [50,50], "goal": [90,90]}"#,
        );
        let err = plan_cmd(&input, &dir.path().join("p.json"), false, None, None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("room.json"), "{msg}");
        assert!(msg.contains("triangulation"), "{msg}");
    }

    #[test]
    fn malformed_hierarchy_names_the_file() {
        let dir = tempdir().unwrap();
        // The only contour claims a parent that does not exist.
        let input = scenario_file(
            dir.path(),
            r#"{"width": 100, "height": 100,
                "contours": [{"points": [[40,40],[60,40],[60,60],[40,60]], "hierarchy": [-1,-1,-1,7]}],
                "start": [10,10], "goal": [90,90]}"#,
        );
        for err in [
            plan_cmd(&input, &dir.path().join("p.json"), false, None, None).unwrap_err(),
            mesh_cmd(&input, &dir.path().join("m.json"), None, None).unwrap_err(),
        ] {
            let msg = format!("{err:#}");
            assert!(msg.contains("contours in"), "{msg}");
            assert!(msg.contains("room.json"), "{msg}");
        }
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let err = plan_cmd(
            &dir.path().join("absent.json"),
            &dir.path().join("p.json"),
            false,
            None,
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}

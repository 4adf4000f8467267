//! Output writers: path as JSON/CSV/Parquet, mesh as JSON for renderers.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use roomnav::pipeline::Navigation;
use roomnav::search::Path as NavPath;
use roomnav::select::ObstacleSet;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

/// Path file format, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Parquet,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("csv") => Ok(Format::Csv),
            Some("parquet") => Ok(Format::Parquet),
            _ => bail!(
                "unsupported output extension for {} (json, csv or parquet)",
                path.display()
            ),
        }
    }
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Write the path waypoints: a JSON array of `[x, y]`, or an `x,y` table.
pub fn write_path(out: &Path, path: &NavPath) -> Result<Format> {
    let format = Format::from_path(out)?;
    ensure_parent(out)?;
    match format {
        Format::Json => {
            let pts: Vec<[f64; 2]> = path.points.iter().map(|p| [p.x, p.y]).collect();
            fs::write(out, serde_json::to_vec_pretty(&pts)?)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        Format::Csv | Format::Parquet => {
            let xs: Vec<f64> = path.points.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = path.points.iter().map(|p| p.y).collect();
            let mut df = df!("x" => xs, "y" => ys)?;
            let mut file =
                File::create(out).with_context(|| format!("creating {}", out.display()))?;
            if format == Format::Csv {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)?;
            } else {
                ParquetWriter::new(&mut file).finish(&mut df)?;
            }
        }
    }
    Ok(format)
}

#[derive(Serialize)]
struct MeshDoc {
    width: f64,
    height: f64,
    obstacles: Vec<Vec<[f64; 2]>>,
    triangles: Vec<[[f64; 2]; 3]>,
    nodes: Vec<[f64; 2]>,
    edges: Vec<(usize, usize, f64)>,
}

/// Obstacles, triangles and graph as one JSON document.
pub fn write_mesh(out: &Path, obstacles: &ObstacleSet, nav: &Navigation) -> Result<()> {
    ensure_parent(out)?;
    let xy = |p: &roomnav::Point| [p.x, p.y];
    let doc = MeshDoc {
        width: nav.mesh.room.width,
        height: nav.mesh.room.height,
        obstacles: obstacles
            .polygons()
            .map(|o| o.vertices().iter().map(xy).collect())
            .collect(),
        triangles: nav.mesh.iter().map(|t| t.ring().map(|p| xy(&p))).collect(),
        nodes: nav.graph.nodes.iter().map(xy).collect(),
        edges: nav
            .graph
            .edges
            .iter()
            .map(|e| (e.a.0, e.b.0, e.weight))
            .collect(),
    };
    fs::write(out, serde_json::to_vec(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

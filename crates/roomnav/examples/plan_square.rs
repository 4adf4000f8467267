//! Plan across a 100x100 room with one square block in the middle.
//!
//! Usage:
//!   cargo run -p roomnav --example plan_square
//!   cargo run -p roomnav --example plan_square -- endpoints

use roomnav::prelude::*;

fn main() -> Result<(), NavError> {
    let include_endpoints = std::env::args().nth(1).as_deref() == Some("endpoints");
    let square = |x0: f64, y0: f64, s: f64| {
        vec![
            Vec2::new(x0, y0),
            Vec2::new(x0 + s, y0),
            Vec2::new(x0 + s, y0 + s),
            Vec2::new(x0, y0 + s),
        ]
    };
    let mut forest = ForestBuilder::new();
    let outline = forest.push(&square(1.0, 1.0, 98.0), None)?;
    forest.push(&square(40.0, 40.0, 20.0), Some(outline))?;

    let request = PlanRequest {
        width: 100.0,
        height: 100.0,
        forest: forest.build()?,
        start: Vec2::new(0.0, 0.0),
        goal: Vec2::new(100.0, 100.0),
    };
    let cfg = PlannerCfg {
        path: PathCfg { include_endpoints },
        ..PlannerCfg::default()
    };
    let plan = plan(&request, &cfg)?;
    println!(
        "obstacles={} triangles={} edges={} length={:.2}",
        plan.obstacles.len(),
        plan.mesh.len(),
        plan.graph.num_edges(),
        plan.path.length
    );
    for p in &plan.path.points {
        println!("{:.2} {:.2}", p.x, p.y);
    }
    Ok(())
}

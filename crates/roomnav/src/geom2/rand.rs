//! Random rooms with convex obstacles (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic scenes for property tests and benchmarks: a room plus a set
//!   of convex obstacles that satisfy the triangulator's preconditions (strictly
//!   inside the room, pairwise separated).
//!
//! Model
//! - Each obstacle starts from `n` equally spaced angles with bounded angular and
//!   radial jitter around a random center, then takes the convex hull.
//! - Placement is rejection-sampled on bounding circles: an obstacle of radius
//!   `r` at center `c` is kept only if `c` is at least `r + margin` from every
//!   wall and `r_a + r_b + margin` from every kept center.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hull::convex_hull;
use super::types::{Point, Polygon, Room};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Scene sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SceneCfg {
    pub width: f64,
    pub height: f64,
    /// Number of obstacles requested; fewer are returned if placement fails.
    pub obstacles: usize,
    pub vertex_count: VertexCount,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude), radii = `r * (1 + u)`, `u ∈ [-radial_jitter, 0]`.
    pub radial_jitter: f64,
    /// Minimum free gap between obstacles and between obstacles and walls.
    pub margin: f64,
    /// Placement attempts per obstacle.
    pub max_attempts: usize,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            obstacles: 4,
            vertex_count: VertexCount::Uniform { min: 4, max: 8 },
            radius_min: 4.0,
            radius_max: 10.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.3,
            margin: 2.0,
            max_attempts: 50,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// A sampled room with obstacles.
#[derive(Clone, Debug)]
pub struct Scene {
    pub room: Room,
    pub obstacles: Vec<Polygon>,
}

/// Draw a scene. `None` only if the room dimensions are invalid.
pub fn draw_scene(cfg: SceneCfg, tok: ReplayToken) -> Option<Scene> {
    let room = Room::new(cfg.width, cfg.height)?;
    let mut rng = tok.to_std_rng();
    let r_lo = cfg.radius_min.max(1e-6);
    let r_hi = cfg.radius_max.max(r_lo);
    let margin = cfg.margin.max(0.0);
    let mut placed: Vec<(Point, f64)> = Vec::with_capacity(cfg.obstacles);
    let mut obstacles = Vec::with_capacity(cfg.obstacles);
    for _ in 0..cfg.obstacles {
        for _ in 0..cfg.max_attempts.max(1) {
            let r = rng.gen_range(r_lo..=r_hi);
            let lo = r + margin;
            if cfg.width <= 2.0 * lo || cfg.height <= 2.0 * lo {
                continue;
            }
            let c = Point::new(
                rng.gen_range(lo..cfg.width - lo),
                rng.gen_range(lo..cfg.height - lo),
            );
            let clear = placed
                .iter()
                .all(|(pc, pr)| (c - pc).norm() > r + pr + margin);
            if !clear {
                continue;
            }
            if let Some(poly) = draw_convex(&mut rng, &cfg, c, r) {
                placed.push((c, r));
                obstacles.push(poly);
                break;
            }
        }
    }
    Some(Scene { room, obstacles })
}

/// Convex polygon inside the circle `(c, r)`.
fn draw_convex(rng: &mut StdRng, cfg: &SceneCfg, c: Point, r: f64) -> Option<Polygon> {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let rr = r * (1.0 - rng.gen::<f64>() * rj);
            c + Point::new(th.cos(), th.sin()) * rr
        })
        .collect();
    let hull = convex_hull(&pts)?;
    Polygon::from_points(&hull)
}

//! Scene layout
//!
//! Turns the simulation state into an ordered list of 2D drawing commands
//! in logical pixels (y down). Painter's order: ocean, swimmer, light rays,
//! sand, then the optional debug graphs.

use glam::{DVec2, DVec3};

use crate::consts::{LIGHT_RAYS, OBJECT_SIZE};
use crate::sim::{SampleHistory, SimulationState, Terrain};

/// RGBA, 0..1 per channel
pub type Color = [f32; 4];

/// Opaque colour from 8-bit sRGB components
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    rgba(r, g, b, 1.0)
}

pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Scene palette
pub mod palette {
    use super::{Color, rgb, rgba};

    pub const OCEAN_TOP: Color = rgb(0x00, 0xcc, 0xff);
    pub const OCEAN_BOTTOM: Color = rgb(0x0f, 0x40, 0x4c);
    pub const SWIMMER: Color = rgb(0xcc, 0x00, 0xff);
    pub const LIGHT_TOP: Color = rgba(255, 255, 255, 0.75);
    pub const LIGHT_BOTTOM: Color = rgba(255, 255, 255, 0.0);
    pub const SAND: Color = rgb(0xf5, 0xe6, 0x93);
    pub const GRAPH: [Color; 3] = [
        rgb(0xff, 0x55, 0x55),
        rgb(0x55, 0xff, 0x55),
        rgb(0xff, 0xff, 0xff),
    ];
}

/// Two-stop gradient along the y axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalGradient {
    pub y0: f64,
    pub y1: f64,
    pub from: Color,
    pub to: Color,
}

impl VerticalGradient {
    /// Colour at height `y`, clamped to the end stops outside `y0..y1`
    pub fn color_at(&self, y: f64) -> Color {
        let span = self.y1 - self.y0;
        let t = if span == 0.0 {
            0.0
        } else {
            ((y - self.y0) / span).clamp(0.0, 1.0) as f32
        };
        std::array::from_fn(|i| self.from[i] + (self.to[i] - self.from[i]) * t)
    }
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(VerticalGradient),
}

impl Paint {
    pub fn color_at(&self, p: DVec2) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Gradient(g) => g.color_at(p.y),
        }
    }
}

/// One drawing primitive in logical pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Convex polygon, vertices in order
    FillConvex { points: Vec<DVec2>, paint: Paint },
    /// Region between a left-to-right polyline and the horizontal line `y = floor`
    FillArea {
        top: Vec<DVec2>,
        floor: f64,
        paint: Paint,
    },
    /// Open polyline
    Stroke {
        points: Vec<DVec2>,
        width: f64,
        color: Color,
    },
}

/// Axis-aligned rectangle as a convex polygon
fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(x, y),
        DVec2::new(x + w, y),
        DVec2::new(x + w, y + h),
        DVec2::new(x, y + h),
    ]
}

/// Background: two-stop ocean gradient over the full viewport
pub fn ocean(width: f64, height: f64) -> DrawCommand {
    DrawCommand::FillConvex {
        points: rect(0.0, 0.0, width, height),
        paint: Paint::Gradient(VerticalGradient {
            y0: 0.0,
            y1: height,
            from: palette::OCEAN_TOP,
            to: palette::OCEAN_BOTTOM,
        }),
    }
}

/// Screen position of the swimmer's centre
pub fn object_center(width: f64, height: f64, position: DVec3) -> DVec2 {
    DVec2::new(width / 2.0 + position.x, height / 2.0 + position.y)
}

/// Heading of the swimmer: direction of travel in the screen plane
pub fn object_angle(velocity: DVec3) -> f64 {
    velocity.y.atan2(velocity.x)
}

/// The swimmer: a square centred on its position, rotated to its heading
pub fn swimmer(width: f64, height: f64, position: DVec3, velocity: DVec3) -> DrawCommand {
    let center = object_center(width, height, position);
    let rotation = DVec2::from_angle(object_angle(velocity));
    let half = OBJECT_SIZE / 2.0;
    let points = rect(-half, -half, OBJECT_SIZE, OBJECT_SIZE)
        .into_iter()
        .map(|corner| center + rotation.rotate(corner))
        .collect();
    DrawCommand::FillConvex {
        points,
        paint: Paint::Solid(palette::SWIMMER),
    }
}

/// Horizontal offset and width of light ray `index` at wall-clock `now_ms`
pub fn light_ray_placement(index: usize, now_ms: f64) -> (f64, f64) {
    let t = now_ms * std::f64::consts::TAU;
    let i = index as f64;
    let x = 256.0 + 128.0 * (i + t / 10000.0).sin();
    let w = 48.0 + 8.0 * (i + t / 15000.0).sin();
    (x, w)
}

/// Slanted light shafts falling from the surface to mid-screen
pub fn light_rays(height: f64, now_ms: f64) -> Vec<DrawCommand> {
    let l = height / 2.0;
    let paint = Paint::Gradient(VerticalGradient {
        y0: 0.0,
        y1: l,
        from: palette::LIGHT_TOP,
        to: palette::LIGHT_BOTTOM,
    });
    (0..LIGHT_RAYS)
        .map(|i| {
            let (x, w) = light_ray_placement(i, now_ms);
            DrawCommand::FillConvex {
                points: vec![
                    DVec2::new(x, 0.0),
                    DVec2::new(x + w, 0.0),
                    DVec2::new(x + w + l, l),
                    DVec2::new(x + l, l),
                ],
                paint,
            }
        })
        .collect()
}

/// Sand under the terrain silhouette down to the bottom edge
pub fn sand(terrain: &Terrain, width: f64, height: f64) -> DrawCommand {
    DrawCommand::FillArea {
        top: terrain.silhouette(width, height),
        floor: height,
        paint: Paint::Solid(palette::SAND),
    }
}

/// Options for a sample graph
#[derive(Debug, Clone, Copy)]
pub struct GraphOptions {
    /// Number of horizontal slots
    pub samples: usize,
    pub width: f64,
    pub height: f64,
    /// Fixed lower bound; data minimum when `None`
    pub min: Option<f64>,
    /// Fixed upper bound; data maximum when `None`
    pub max: Option<f64>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            samples: 100,
            width: 150.0,
            height: 100.0,
            min: None,
            max: None,
        }
    }
}

/// Polyline of the last `samples` values, right-aligned.
///
/// `x_i = i * width / samples`; `y = height * (v - max) / (max - min)`, so
/// the top of the range sits at 0 and the bottom at `-height`. A flat
/// series is drawn at 0.
pub fn graph_points(values: &[f64], options: &GraphOptions) -> Vec<DVec2> {
    if values.is_empty() || options.samples == 0 {
        return Vec::new();
    }
    let lo = options
        .min
        .unwrap_or_else(|| values.iter().copied().fold(f64::INFINITY, f64::min));
    let hi = options
        .max
        .unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    let range = hi - lo;

    let skip = options.samples.saturating_sub(values.len());
    let offset = values.len() as isize - options.samples as isize;
    (skip..options.samples)
        .map(|i| {
            let v = values[(offset + i as isize) as usize];
            let y = if range > 0.0 {
                options.height * (v - hi) / range
            } else {
                0.0
            };
            DVec2::new(i as f64 * options.width / options.samples as f64, y)
        })
        .collect()
}

/// Debug graphs of the raw acceleration axes, stacked in the top-left corner
pub fn acceleration_graphs(history: &SampleHistory<DVec3>) -> Vec<DrawCommand> {
    const MARGIN: f64 = 16.0;
    let options = GraphOptions {
        samples: history.len(),
        width: 150.0,
        height: 40.0,
        ..Default::default()
    };
    let axes: [fn(&DVec3) -> f64; 3] = [|a| a.x, |a| a.y, |a| a.z];

    axes.iter()
        .zip(palette::GRAPH)
        .enumerate()
        .map(|(row, (axis, color))| {
            let top = MARGIN + (row as f64 + 1.0) * (options.height + MARGIN);
            let origin = DVec2::new(MARGIN, top);
            let points = graph_points(&history.axis(axis), &options)
                .into_iter()
                .map(|p| origin + p)
                .collect();
            DrawCommand::Stroke {
                points,
                width: 2.0,
                color,
            }
        })
        .collect()
}

/// Build the full frame
pub fn build_scene(state: &SimulationState, terrain: &Terrain, now_ms: f64) -> Vec<DrawCommand> {
    let (width, height) = (state.screen.width, state.screen.height);

    let mut commands = Vec::with_capacity(LIGHT_RAYS + 6);
    commands.push(ocean(width, height));
    commands.push(swimmer(
        width,
        height,
        state.motion.position,
        state.motion.velocity,
    ));
    commands.extend(light_rays(height, now_ms));
    commands.push(sand(terrain, width, height));

    if state.debug {
        commands.extend(acceleration_graphs(&state.history.acceleration));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Screen;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn terrain() -> Terrain {
        Terrain::generate(4, 0.8, 0.1, &mut Pcg32::seed_from_u64(9))
    }

    #[test]
    fn test_object_placement() {
        let c = object_center(800.0, 600.0, DVec3::new(10.0, -20.0, 5.0));
        assert_eq!(c, DVec2::new(410.0, 280.0));
        assert_eq!(object_angle(DVec3::new(0.0, 1.0, 0.0)), std::f64::consts::FRAC_PI_2);
        assert_eq!(object_angle(DVec3::ZERO), 0.0);
    }

    #[test]
    fn test_swimmer_is_rotated_square() {
        let cmd = swimmer(200.0, 200.0, DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
        let DrawCommand::FillConvex { points, .. } = cmd else {
            panic!("swimmer should be a convex fill");
        };
        assert_eq!(points.len(), 4);
        let center = DVec2::new(100.0, 100.0);
        for p in &points {
            // Corner distance of a 64 square
            assert!(((*p - center).length() - 32.0 * 2f64.sqrt()).abs() < 1e-9);
        }
        // 45° heading puts a corner straight below the centre
        assert!(points.iter().any(|p| (p.x - 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_light_ray_placement() {
        let (x, w) = light_ray_placement(0, 0.0);
        assert_eq!(x, 256.0);
        assert_eq!(w, 48.0);

        let (x, w) = light_ray_placement(2, 0.0);
        assert!((x - (256.0 + 128.0 * 2f64.sin())).abs() < 1e-9);
        assert!((w - (48.0 + 8.0 * 2f64.sin())).abs() < 1e-9);

        for i in 0..LIGHT_RAYS {
            let (x, w) = light_ray_placement(i, 1.7e12);
            assert!((128.0..=384.0).contains(&x));
            assert!((40.0..=56.0).contains(&w));
        }
    }

    #[test]
    fn test_light_ray_quads() {
        let rays = light_rays(600.0, 0.0);
        assert_eq!(rays.len(), LIGHT_RAYS);
        let DrawCommand::FillConvex { points, .. } = &rays[0] else {
            panic!("light ray should be a convex fill");
        };
        assert_eq!(
            points,
            &vec![
                DVec2::new(256.0, 0.0),
                DVec2::new(304.0, 0.0),
                DVec2::new(604.0, 300.0),
                DVec2::new(556.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_gradient_stops() {
        let g = VerticalGradient {
            y0: 0.0,
            y1: 100.0,
            from: [0.0, 0.0, 0.0, 1.0],
            to: [1.0, 1.0, 1.0, 0.0],
        };
        assert_eq!(g.color_at(0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.color_at(50.0), [0.5, 0.5, 0.5, 0.5]);
        assert_eq!(g.color_at(250.0), [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(g.color_at(-5.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_palette_hex() {
        assert_eq!(palette::OCEAN_TOP, [0.0, 0.8, 1.0, 1.0]);
        assert_eq!(palette::SWIMMER, [0.8, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_graph_points_right_aligned() {
        let options = GraphOptions {
            samples: 4,
            width: 100.0,
            height: 10.0,
            ..Default::default()
        };
        let points = graph_points(&[0.0, 1.0], &options);
        assert_eq!(points, vec![DVec2::new(50.0, -10.0), DVec2::new(75.0, 0.0)]);

        // Longer series keep only the newest `samples` values
        // while the range still spans every value
        let points = graph_points(&[8.0, 8.0, 0.0, 4.0, 8.0, 4.0], &options);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], DVec2::new(0.0, -10.0));
        assert_eq!(points[1], DVec2::new(25.0, -5.0));
    }

    #[test]
    fn test_graph_flat_series() {
        let points = graph_points(&[3.0; 5], &GraphOptions::default());
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_scene_order_and_debug() {
        let mut state = SimulationState::new(Screen::default(), 8, 0.0);
        let terrain = terrain();

        let scene = build_scene(&state, &terrain, 0.0);
        assert_eq!(scene.len(), 2 + LIGHT_RAYS + 1);
        assert!(matches!(scene[0], DrawCommand::FillConvex { paint: Paint::Gradient(_), .. }));
        assert!(matches!(scene.last(), Some(DrawCommand::FillArea { .. })));

        state.debug = true;
        let scene = build_scene(&state, &terrain, 0.0);
        assert_eq!(scene.len(), 2 + LIGHT_RAYS + 1 + 3);
        assert!(matches!(scene.last(), Some(DrawCommand::Stroke { .. })));
    }
}

// generator/src/render.rs

use clap::ValueEnum;
use colorgrad::Gradient;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use nalgebra::Vector3;
use pathwalk_terrain::prelude::*;

use crate::config::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Shade {
    /// Field colors lit by the mesh normals.
    #[default]
    Color,
    /// Height mapped through a gradient.
    Height,
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub shade: Shade,
    /// Pixels per mesh cell.
    pub scale: u32,
    pub path: bool,
    pub props: bool,
}

/// Maps world XZ onto the image of the streamer's current window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub origin_x: f32,
    pub origin_z: f32,
    /// World units per mesh cell.
    pub step: f32,
    pub scale: u32,
    /// Mesh cells along each image axis.
    pub cells: u32,
    first: ChunkKey,
    resolution: u32,
}

impl Layout {
    pub fn new(config: &ChunkConfig, center: ChunkKey, scale: u32) -> Self {
        let r = i32::try_from(config.radius).unwrap_or(i32::MAX);
        let center = center.clamped(config.radius);
        let first = ChunkKey::new(center.x - r, center.z - r);
        let half = config.size / 2.0;
        Self {
            origin_x: first.x as f32 * config.size - half,
            origin_z: first.z as f32 * config.size - half,
            step: config.size / config.resolution as f32,
            scale,
            cells: (2 * config.radius + 1) * config.resolution,
            first,
            resolution: config.resolution,
        }
    }

    pub fn image_size(&self) -> u32 {
        self.cells * self.scale
    }

    pub fn pixel(&self, x: f32, z: f32) -> (f32, f32) {
        let s = self.scale as f32 / self.step;
        ((x - self.origin_x) * s, (z - self.origin_z) * s)
    }

    /// First mesh cell of `key` along each axis, or `None` outside the window.
    fn cell_origin(&self, key: ChunkKey) -> Option<(u32, u32)> {
        let dx = u32::try_from(key.x - self.first.x).ok()?;
        let dz = u32::try_from(key.z - self.first.z).ok()?;
        let (cx, cz) = (dx * self.resolution, dz * self.resolution);
        (cx < self.cells && cz < self.cells).then_some((cx, cz))
    }
}

pub struct TerrainVisualizer {
    gradient: Gradient,
    light: Vector3<f32>,
}

impl TerrainVisualizer {
    pub fn new() -> Result<Self, AppError> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.1, 0.3, 0.15, 1.0),  // Hollows
                colorgrad::Color::new(0.18, 0.55, 0.34, 1.0), // Meadow
                colorgrad::Color::new(0.55, 0.6, 0.3, 1.0),   // Hillside
                colorgrad::Color::new(0.5, 0.42, 0.35, 1.0),  // Rock
                colorgrad::Color::new(0.95, 0.95, 0.95, 1.0), // Peaks
            ])
            .domain(&[0.0, 0.4, 0.6, 0.85, 1.0])
            .build()
            .map_err(|e| AppError::Gradient(e.to_string()))?;

        Ok(Self {
            gradient,
            light: Vector3::new(-0.4, 1.0, -0.3).normalize(),
        })
    }

    /// Rasterizes the world's resident chunks, top down with +z towards the bottom.
    pub fn render(&self, world: &TerrainWorld, options: &RenderOptions) -> RgbImage {
        let config = world.field().config();
        let center = world.streamer().center().unwrap_or_default();
        let layout = Layout::new(&config.chunk, center, options.scale);
        let size = layout.image_size();
        let mut img = RgbImage::new(size, size);

        let amplitude = max_amplitude(&config.noise);
        let res = config.chunk.resolution as usize;

        for key in world.streamer().active() {
            let (Some(chunk), Some((cx, cz))) = (world.chunk(*key), layout.cell_origin(*key)) else {
                continue;
            };
            for iz in 0..res {
                for ix in 0..res {
                    let v = iz * (res + 1) + ix;
                    let color = match options.shade {
                        Shade::Color => self.lit(chunk.mesh.colors[v], chunk.mesh.normals[v]),
                        Shade::Height => self.height_color(chunk.mesh.positions[v][1], amplitude),
                    };
                    fill_cell(&mut img, cx + ix as u32, cz + iz as u32, options.scale, color);
                }
            }
        }

        if options.props {
            self.draw_props(&mut img, world, &layout);
        }
        if options.path {
            draw_path(&mut img, world.field(), &layout);
        }
        img
    }

    fn lit(&self, color: [f32; 3], normal: [f32; 3]) -> Rgb<u8> {
        let n = Vector3::from(normal);
        let shade = 0.35 + 0.65 * n.dot(&self.light).max(0.0);
        let [r, g, b] = color;
        Rgb(pathwalk_terrain::Rgb::new(r, g, b).scaled(shade).to_rgb8())
    }

    fn height_color(&self, height: f32, amplitude: f32) -> Rgb<u8> {
        let t = if amplitude > 0.0 {
            ((height + amplitude) / (2.0 * amplitude)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let c = self.gradient.at(t as f64);
        Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8])
    }

    fn draw_props(&self, img: &mut RgbImage, world: &TerrainWorld, layout: &Layout) {
        let size = world.field().config().chunk.size;
        for chunk in world.chunks() {
            let center = chunk.key.center(size);
            for prop in &chunk.props {
                let (px, pz) = layout.pixel(center.x + prop.position[0], center.z + prop.position[2]);
                let radius = ((layout.scale as f32 * prop.scale) as i32).max(1);
                draw_filled_circle_mut(img, (px as i32, pz as i32), radius, prop_color(prop.kind));
            }
        }
    }
}

fn prop_color(kind: PropKind) -> Rgb<u8> {
    match kind {
        PropKind::Pine => Rgb([20, 70, 35]),
        PropKind::Broadleaf => Rgb([60, 120, 40]),
        PropKind::Rock => Rgb([128, 128, 128]),
        PropKind::Bush => Rgb([85, 107, 47]),
    }
}

/// Largest height the fBm can reach in theory: the sum of the octave amplitudes.
fn max_amplitude(noise: &NoiseConfig) -> f32 {
    (0..noise.octaves)
        .map(|i| noise.height_scale * noise.persistence.powi(i as i32))
        .sum::<f64>() as f32
}

fn fill_cell(img: &mut RgbImage, cx: u32, cz: u32, scale: u32, color: Rgb<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            img.put_pixel(cx * scale + dx, cz * scale + dy, color);
        }
    }
}

/// Center line of the road, one segment per world unit of z.
fn draw_path(img: &mut RgbImage, field: &TerrainField, layout: &Layout) {
    let extent = layout.cells as f32 * layout.step;
    let steps = extent.ceil() as u32;
    let color = Rgb([240, 220, 90]);
    let point = |z: f32| layout.pixel(field.path_center_x(z), z);

    let mut prev = point(layout.origin_z);
    for i in 1..=steps {
        let next = point(layout.origin_z + i as f32);
        draw_line_segment_mut(img, prev, next, color);
        prev = next;
    }
}

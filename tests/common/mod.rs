#![allow(dead_code)]

use dp_warp_wasm::{Surface, WarpResult};
use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear,
    Save,
    Restore,
    Clip([Point; 3]),
    Transform(Affine),
    Draw,
}

/// Surface that only records what was asked of it.
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn draws(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Draw).count()
    }

    pub fn transforms(&self) -> Vec<Affine> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Transform(a) => Some(*a),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Image = ();

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) -> WarpResult<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn save(&mut self) {
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }

    fn clip_triangle(&mut self, tri: [Point; 3]) -> WarpResult<()> {
        self.calls.push(Call::Clip(tri));
        Ok(())
    }

    fn transform(&mut self, affine: Affine) -> WarpResult<()> {
        self.calls.push(Call::Transform(affine));
        Ok(())
    }

    fn draw_image(&mut self, _image: &()) -> WarpResult<()> {
        self.calls.push(Call::Draw);
        Ok(())
    }
}

/// Opaque image where neighbouring pixels all differ.
pub fn pattern(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x * 7 + y * 13) % 256) as u8, 255])
    })
}

pub fn solid(width: u32, height: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(px))
}

pub fn assert_point_eq(a: Point, b: Point, eps: f64) {
    assert!(
        (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps,
        "a={a:?} b={b:?}"
    );
}

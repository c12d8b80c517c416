//! CPU implementation of [`Surface`] over an RGBA8 buffer.
//!
//! Used by the host helper for previews and by tests that need to look at
//! actual pixels. Sampling is nearest-texel and clip edges follow a fill
//! rule, so an identity mapping copies the source exactly, translucent pixels
//! included.

use std::path::Path;

use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::WarpResult;
use crate::surface::Surface;

#[derive(Clone, Debug)]
struct DrawState {
    transform: Affine,
    // Device-space triangles; a pixel must lie inside all of them.
    clips: Vec<[Point; 3]>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clips: Vec::new(),
        }
    }
}

pub struct RasterSurface {
    target: RgbaImage,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: RgbaImage::new(width, height),
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.target
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> WarpResult<()> {
        self.target.save(path.as_ref())?;
        Ok(())
    }

    // Device pixel range touched by a draw, as half-open [x0, x1) x [y0, y1).
    fn paint_bounds(&self, image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let image_rect = Rect::new(0.0, 0.0, f64::from(image.width()), f64::from(image.height()));
        let mut bounds = self.state.transform.transform_rect_bbox(image_rect);
        for tri in &self.state.clips {
            bounds = bounds.intersect(triangle_bbox(tri));
        }
        bounds = bounds.intersect(Rect::new(
            0.0,
            0.0,
            f64::from(self.target.width()),
            f64::from(self.target.height()),
        ));
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        Some((
            bounds.x0.floor() as u32,
            bounds.y0.floor() as u32,
            bounds.x1.ceil() as u32,
            bounds.y1.ceil() as u32,
        ))
    }
}

impl Surface for RasterSurface {
    type Image = RgbaImage;

    fn width(&self) -> f64 {
        f64::from(self.target.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.target.height())
    }

    fn clear(&mut self) -> WarpResult<()> {
        for px in self.target.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, as on a canvas.
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn clip_triangle(&mut self, tri: [Point; 3]) -> WarpResult<()> {
        let t = self.state.transform;
        self.state.clips.push([t * tri[0], t * tri[1], t * tri[2]]);
        Ok(())
    }

    fn transform(&mut self, affine: Affine) -> WarpResult<()> {
        self.state.transform = self.state.transform * affine;
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbaImage) -> WarpResult<()> {
        if self.state.transform.determinant().abs() < f64::EPSILON {
            return Ok(());
        }
        let Some((x0, y0, x1, y1)) = self.paint_bounds(image) else {
            return Ok(());
        };
        let inverse = self.state.transform.inverse();
        let (src_w, src_h) = (f64::from(image.width()), f64::from(image.height()));

        for y in y0..y1.min(self.target.height()) {
            for x in x0..x1.min(self.target.width()) {
                let centre = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if !self.state.clips.iter().all(|tri| contains(tri, centre)) {
                    continue;
                }
                let src = inverse * centre;
                let (sx, sy) = (src.x.floor(), src.y.floor());
                if sx < 0.0 || sy < 0.0 || sx >= src_w || sy >= src_h {
                    continue;
                }
                let texel = *image.get_pixel(sx as u32, sy as u32);
                let dst = self.target.get_pixel_mut(x, y);
                *dst = source_over(texel, *dst);
            }
        }
        Ok(())
    }
}

fn triangle_bbox(tri: &[Point; 3]) -> Rect {
    Rect::from_points(tri[0], tri[1]).union_pt(tri[2])
}

// Endpoints are taken in a fixed order, so both triangles sharing an edge
// compute the same value with opposite signs.
fn edge(a: Point, b: Point, p: Point) -> f64 {
    if (a.x, a.y) <= (b.x, b.y) {
        (b - a).cross(p - a)
    } else {
        -(a - b).cross(p - b)
    }
}

// Of the two directions along a shared edge, exactly one owns it.
fn owns_edge(dir: Vec2) -> bool {
    dir.y > 0.0 || (dir.y == 0.0 && dir.x > 0.0)
}

// Point-in-triangle with a fill rule: a centre on an edge shared by two
// triangles lands in exactly one of them.
fn contains(tri: &[Point; 3], p: Point) -> bool {
    let [a, mut b, mut c] = *tri;
    if (b - a).cross(c - a) < 0.0 {
        std::mem::swap(&mut b, &mut c);
    }
    [(a, b), (b, c), (c, a)].into_iter().all(|(from, to)| {
        let w = edge(from, to, p);
        w > 0.0 || (w == 0.0 && owns_edge(to - from))
    })
}

fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => src,
        0 => dst,
        sa => {
            let sa = f32::from(sa) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let mut out = [0u8; 4];
            for c in 0..3 {
                let sc = f32::from(src[c]) / 255.0;
                let dc = f32::from(dst[c]) / 255.0;
                let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
                out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            Rgba(out)
        }
    }
}

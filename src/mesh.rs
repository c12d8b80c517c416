//! Grid-subdivided image warp.
//!
//! The image is cut into an N x N grid of quads; each quad corner is pushed
//! through [`displace_with`] and the quad is redrawn as two affine-mapped
//! triangles. Corners are computed per cell, so neighbouring cells do not
//! share vertices and may show hairline seams under strong distortion.

use kurbo::Point;
use tracing::trace;

use crate::config::WarpConfig;
use crate::displace::{corner_radius, displace_with};
use crate::error::WarpResult;
use crate::surface::Surface;
use crate::texture::paint_triangle;

/// Geometric partition of a `width` x `height` area into equal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: f64,
    pub cell_height: f64,
}

/// One grid cell with its source-space corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [Point; 4],
}

impl Cell {
    /// The two triangles covering the quad, split along the TR-BL diagonal.
    pub fn triangles(&self) -> [[Point; 3]; 2] {
        split_quad(self.corners)
    }

    pub fn area(&self) -> f64 {
        let [tl, _, br, _] = self.corners;
        (br.x - tl.x) * (br.y - tl.y)
    }
}

/// `[TL, TR, BR, BL]` -> `(TL, TR, BL)` and `(TR, BR, BL)`.
pub fn split_quad(q: [Point; 4]) -> [[Point; 3]; 2] {
    let [tl, tr, br, bl] = q;
    [[tl, tr, bl], [tr, br, bl]]
}

impl Grid {
    pub fn new(width: f64, height: f64, size: u32) -> Self {
        Self {
            cols: size,
            rows: size,
            cell_width: width / f64::from(size),
            cell_height: height / f64::from(size),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn cell(&self, row: u32, col: u32) -> Cell {
        let sx = f64::from(col) * self.cell_width;
        let sy = f64::from(row) * self.cell_height;
        let (w, h) = (self.cell_width, self.cell_height);
        Cell {
            row,
            col,
            corners: [
                Point::new(sx, sy),
                Point::new(sx + w, sy),
                Point::new(sx + w, sy + h),
                Point::new(sx, sy + h),
            ],
        }
    }

    /// Row-major, top-to-bottom then left-to-right.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.cell(row, col)))
    }
}

/// Counters for a single [`MeshRenderer::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub painted: usize,
    pub skipped: usize,
}

pub struct MeshRenderer<S: Surface> {
    surface: S,
    image: Option<S::Image>,
    grid: Grid,
    max_strength: f64,
    max_displacement: f64,
}

impl<S: Surface> MeshRenderer<S> {
    pub fn new(surface: S, config: &WarpConfig) -> Self {
        let grid = Grid::new(surface.width(), surface.height(), config.grid_size);
        Self {
            surface,
            image: None,
            grid,
            max_strength: config.max_strength,
            max_displacement: config.max_displacement,
        }
    }

    /// Mark the image as loaded; renders before this are no-ops.
    pub fn set_image(&mut self, image: S::Image) {
        self.image = Some(image);
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Draw one full frame with the given distortion factor in `[0, 1]`.
    pub fn render(&mut self, factor: f64) -> WarpResult<FrameStats> {
        let Some(image) = self.image.as_ref() else {
            trace!(factor, "image not loaded; skipping frame");
            return Ok(FrameStats::default());
        };

        self.surface.clear()?;

        let (width, height) = (self.surface.width(), self.surface.height());
        let center = Point::new(width / 2.0, height / 2.0);
        let max_radius = corner_radius(width, height);
        let strength = factor * self.max_strength;
        let amplitude = self.max_displacement;

        let mut stats = FrameStats::default();
        for cell in self.grid.cells() {
            let warped = cell
                .corners
                .map(|p| displace_with(p, center, strength, max_radius, amplitude));
            for (src, dst) in split_quad(cell.corners).into_iter().zip(split_quad(warped)) {
                if paint_triangle(&mut self.surface, image, src, dst)? {
                    stats.painted += 1;
                } else {
                    stats.skipped += 1;
                }
            }
        }
        Ok(stats)
    }
}

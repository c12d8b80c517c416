mod common;

use common::{pattern, solid, Call, RecordingSurface};
use dp_warp_wasm::{split_quad, Grid, MeshRenderer, RasterSurface, WarpConfig};
use kurbo::{Affine, Point};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn triangle_area(t: [Point; 3]) -> f64 {
    ((t[1] - t[0]).cross(t[2] - t[0]) / 2.0).abs()
}

#[test]
fn default_grid_has_25px_cells() {
    let grid = Grid::new(500.0, 500.0, 20);
    assert_eq!((grid.cell_width, grid.cell_height), (25.0, 25.0));
    assert_eq!(grid.cell_count(), 400);

    let cell = grid.cell(0, 0);
    assert_eq!(
        cell.corners,
        [pt(0.0, 0.0), pt(25.0, 0.0), pt(25.0, 25.0), pt(0.0, 25.0)]
    );
}

#[test]
fn cells_iterate_row_major() {
    let grid = Grid::new(500.0, 500.0, 20);
    let order: Vec<(u32, u32)> = grid.cells().map(|c| (c.row, c.col)).collect();
    assert_eq!(order.len(), 400);
    assert_eq!(order[0], (0, 0));
    assert_eq!(order[1], (0, 1));
    assert_eq!(order[20], (1, 0));
    assert_eq!(order[399], (19, 19));
}

#[test]
fn cells_tile_the_image_exactly() {
    let grid = Grid::new(500.0, 500.0, 20);

    let cell_area: f64 = grid.cells().map(|c| c.area()).sum();
    assert!((cell_area - 500.0 * 500.0).abs() < 1e-6);

    let tri_area: f64 = grid
        .cells()
        .flat_map(|c| c.triangles())
        .map(triangle_area)
        .sum();
    assert!((tri_area - 500.0 * 500.0).abs() < 1e-6);

    // Neighbours share edges, so there are no gaps or overlaps.
    for row in 0..20 {
        for col in 0..19 {
            let left = grid.cell(row, col);
            let right = grid.cell(row, col + 1);
            assert_eq!(left.corners[1], right.corners[0]);
            assert_eq!(left.corners[2], right.corners[3]);
        }
    }
    let last = grid.cell(19, 19);
    assert_eq!(last.corners[2], pt(500.0, 500.0));
}

#[test]
fn quad_splits_along_tr_bl_diagonal() {
    let q = [pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0)];
    let [a, b] = split_quad(q);
    assert_eq!(a, [q[0], q[1], q[3]]);
    assert_eq!(b, [q[1], q[2], q[3]]);
}

#[test]
fn render_before_load_is_a_noop() {
    let surface = RecordingSurface::new(500.0, 500.0);
    let mut renderer = MeshRenderer::new(surface, &WarpConfig::default());
    assert!(!renderer.is_loaded());

    let stats = renderer.render(0.7).unwrap();
    assert_eq!((stats.painted, stats.skipped), (0, 0));
    assert!(renderer.surface().calls.is_empty());
}

#[test]
fn render_clears_then_paints_two_triangles_per_cell() {
    let surface = RecordingSurface::new(500.0, 500.0);
    let mut renderer = MeshRenderer::new(surface, &WarpConfig::default());
    renderer.set_image(());

    let stats = renderer.render(0.0).unwrap();
    assert_eq!(stats.painted, 800);
    assert_eq!(stats.skipped, 0);

    let surface = renderer.surface();
    assert_eq!(surface.calls[0], Call::Clear);
    assert_eq!(surface.draws(), 800);

    // Undistorted: every triangle maps onto itself.
    let identity = Affine::IDENTITY.as_coeffs();
    for affine in surface.transforms() {
        for (got, want) in affine.as_coeffs().iter().zip(identity) {
            assert!((got - want).abs() < 1e-9, "{affine:?}");
        }
    }
}

#[test]
fn each_frame_starts_from_scratch() {
    let surface = RecordingSurface::new(100.0, 100.0);
    let mut renderer = MeshRenderer::new(surface, &WarpConfig::default());
    renderer.set_image(());
    renderer.render(0.3).unwrap();
    renderer.render(0.6).unwrap();

    let clears: Vec<usize> = renderer
        .surface()
        .calls
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Call::Clear)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(clears.len(), 2);
    assert_eq!(clears[0], 0);
}

#[test]
fn zero_factor_reproduces_the_source() {
    let source = pattern(500, 500);
    let mut renderer = MeshRenderer::new(RasterSurface::new(500, 500), &WarpConfig::default());
    renderer.set_image(source.clone());

    renderer.render(0.0).unwrap();

    let out = renderer.surface().pixels();
    assert_eq!(out.dimensions(), source.dimensions());
    assert!(out.pixels().zip(source.pixels()).all(|(a, b)| a == b));
}

#[test]
fn zero_factor_blends_translucent_pixels_once() {
    let source = solid(500, 500, [200, 100, 50, 128]);
    let mut renderer = MeshRenderer::new(RasterSurface::new(500, 500), &WarpConfig::default());
    renderer.set_image(source.clone());

    renderer.render(0.0).unwrap();

    let out = renderer.surface().pixels();
    let mismatched: Vec<(u32, u32)> = out
        .enumerate_pixels()
        .filter(|(x, y, px)| *px != source.get_pixel(*x, *y))
        .map(|(x, y, _)| (x, y))
        .take(5)
        .collect();
    assert!(mismatched.is_empty(), "first mismatches: {mismatched:?}");
}

#[test]
fn full_factor_magnifies_the_centre() {
    let source = pattern(500, 500);
    let mut renderer = MeshRenderer::new(RasterSurface::new(500, 500), &WarpConfig::default());
    renderer.set_image(source.clone());

    let stats = renderer.render(1.0).unwrap();
    assert_eq!(stats.painted, 800);

    let out = renderer.surface().pixels();
    assert_eq!(out.get_pixel(250, 250), source.get_pixel(250, 250));
    assert_ne!(out.get_pixel(260, 250), source.get_pixel(260, 250));
}

#[test]
fn grid_size_follows_config() {
    let config = WarpConfig {
        grid_size: 4,
        ..WarpConfig::default()
    };
    let renderer = MeshRenderer::new(RecordingSurface::new(100.0, 60.0), &config);
    let grid = renderer.grid();
    assert_eq!((grid.cols, grid.rows), (4, 4));
    assert_eq!((grid.cell_width, grid.cell_height), (25.0, 15.0));
}

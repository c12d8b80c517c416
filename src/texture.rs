//! Texture-mapping one image triangle onto an arbitrary canvas triangle.

use kurbo::{Affine, Point};
use tracing::trace;

use crate::error::WarpResult;
use crate::surface::Surface;

/// Source triangles with `|det|` below this are treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 0.001;

/// Solve the affine map taking `src[i]` onto `dst[i]` for all three vertices.
///
/// Returns `None` when the source triangle is (nearly) collinear.
pub fn triangle_affine(src: [Point; 3], dst: [Point; 3]) -> Option<Affine> {
    let src_frame = triangle_frame(src);
    let det = src_frame.determinant();
    if det.abs() < DEGENERATE_EPSILON {
        return None;
    }
    Some(triangle_frame(dst) * src_frame.inverse())
}

// Maps the unit triangle (0,0),(1,0),(0,1) onto `tri`.
fn triangle_frame(tri: [Point; 3]) -> Affine {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    Affine::new([e1.x, e1.y, e2.x, e2.y, tri[0].x, tri[0].y])
}

/// Paint the `src` patch of `image` into the `dst` triangle of `surface`.
///
/// Clip and transform are scoped to this call. Returns `Ok(false)` without
/// touching the surface when the source triangle is degenerate.
pub fn paint_triangle<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    src: [Point; 3],
    dst: [Point; 3],
) -> WarpResult<bool> {
    let Some(affine) = triangle_affine(src, dst) else {
        trace!(?src, "skipping degenerate source triangle");
        return Ok(false);
    };

    surface.save();
    let painted = paint_clipped(surface, image, dst, affine);
    surface.restore();
    painted.map(|()| true)
}

fn paint_clipped<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    dst: [Point; 3],
    affine: Affine,
) -> WarpResult<()> {
    surface.clip_triangle(dst)?;
    surface.transform(affine)?;
    surface.draw_image(image)
}

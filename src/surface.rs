use kurbo::{Affine, Point};

use crate::error::WarpResult;

/// The slice of a Canvas 2D context the mesh renderer draws through.
///
/// State handling follows the canvas model: `transform` post-multiplies the
/// current matrix, `clip_triangle` intersects the clip with a triangle given
/// in current user space, and `save`/`restore` bracket both.
pub trait Surface {
    type Image;

    /// Logical width in pixels.
    fn width(&self) -> f64;
    /// Logical height in pixels.
    fn height(&self) -> f64;

    /// Erase the whole surface, ignoring transform and clip.
    fn clear(&mut self) -> WarpResult<()>;

    fn save(&mut self);
    fn restore(&mut self);

    fn clip_triangle(&mut self, tri: [Point; 3]) -> WarpResult<()>;
    fn transform(&mut self, affine: Affine) -> WarpResult<()>;

    /// Paint `image` at natural size with its top-left at the user-space origin.
    fn draw_image(&mut self, image: &Self::Image) -> WarpResult<()>;
}

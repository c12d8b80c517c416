use js_sys::{Object, Reflect};
use kurbo::{Affine, Point};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{WarpError, WarpResult};
use crate::surface::Surface;

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`, hinting that pixels are read back often.
    pub fn new(canvas: &HtmlCanvasElement) -> WarpResult<Self> {
        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("willReadFrequently"),
            &JsValue::TRUE,
        )?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or_else(|| WarpError::canvas("2D context not supported"))?
            .dyn_into()
            .map_err(JsValue::from)?;

        Ok(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) -> WarpResult<()> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_triangle(&mut self, tri: [Point; 3]) -> WarpResult<()> {
        self.ctx.begin_path();
        self.ctx.move_to(tri[0].x, tri[0].y);
        self.ctx.line_to(tri[1].x, tri[1].y);
        self.ctx.line_to(tri[2].x, tri[2].y);
        self.ctx.close_path();
        self.ctx.clip();
        Ok(())
    }

    fn transform(&mut self, affine: Affine) -> WarpResult<()> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        self.ctx.transform(a, b, c, d, e, f)?;
        Ok(())
    }

    fn draw_image(&mut self, image: &HtmlImageElement) -> WarpResult<()> {
        self.ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
        Ok(())
    }
}

#![cfg(target_arch = "wasm32")]

use dp_warp_wasm::{CanvasSurface, MeshRenderer, Surface, WarpConfig};
use kurbo::{Affine, Point};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

#[wasm_bindgen_test]
fn surface_takes_canvas_size() {
    let surface = CanvasSurface::new(&canvas(500, 500)).unwrap();
    assert_eq!((surface.width(), surface.height()), (500.0, 500.0));
}

#[wasm_bindgen_test]
fn scoped_clip_and_transform_restore_cleanly() {
    let mut surface = CanvasSurface::new(&canvas(50, 50)).unwrap();
    surface.save();
    surface
        .clip_triangle([Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(0.0, 50.0)])
        .unwrap();
    surface.transform(Affine::new([2.0, 0.0, 0.0, 2.0, 5.0, 5.0])).unwrap();
    surface.restore();

    let m = surface.context().get_transform().unwrap();
    assert_eq!((m.a(), m.d(), m.e(), m.f()), (1.0, 1.0, 0.0, 0.0));
}

#[wasm_bindgen_test]
fn render_before_image_load_is_noop() {
    let surface = CanvasSurface::new(&canvas(500, 500)).unwrap();
    let mut renderer = MeshRenderer::new(surface, &WarpConfig::default());
    let stats = renderer.render(0.5).unwrap();
    assert_eq!(stats.painted, 0);
}

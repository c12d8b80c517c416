//! Hover "zoom" warp for the profile picture canvas, plus the scroll reveal
//! for page sections.
//!
//! The mesh warp core (displacement, triangle texturing, grid renderer and
//! hover driver) is platform neutral and runs on the host against
//! [`RasterSurface`]. The `wasm` module wires it to the page.

pub mod config;
pub mod displace;
pub mod driver;
pub mod error;
pub mod mesh;
pub mod raster;
pub mod surface;
pub mod texture;

pub use config::WarpConfig;
pub use displace::{corner_radius, displace, displace_with};
pub use driver::{distortion_for, HoverDriver, Step};
pub use error::{WarpError, WarpResult};
pub use mesh::{split_quad, Cell, FrameStats, Grid, MeshRenderer};
pub use raster::RasterSurface;
pub use surface::Surface;
pub use texture::{paint_triangle, triangle_affine};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod hover;
    mod logging;
    mod reveal;

    pub use canvas::CanvasSurface;

    const CANVAS_ID: &str = "dp-canvas";
    const WRAPPER_SELECTOR: &str = ".dp-wrapper";
    const IMAGE_SRC: &str = "assets/images/display/01.jpg";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logging::init();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        reveal::start(&document)?;
        tracing::info!("Linker System: Online");

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let wrapper = document
            .query_selector(WRAPPER_SELECTOR)?
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

        match (canvas, wrapper) {
            (Some(canvas), Some(wrapper)) => {
                hover::start(canvas, wrapper, IMAGE_SRC)?;
                tracing::info!("Linker UI Loaded");
            }
            _ => tracing::warn!(
                canvas = CANVAS_ID,
                wrapper = WRAPPER_SELECTOR,
                "hover canvas not found; skipping warp effect"
            ),
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::CanvasSurface;

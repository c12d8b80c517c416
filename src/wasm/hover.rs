use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use super::canvas::CanvasSurface;
use crate::config::WarpConfig;
use crate::driver::HoverDriver;
use crate::mesh::MeshRenderer;

struct HoverEffect {
    driver: HoverDriver,
    renderer: MeshRenderer<CanvasSurface>,
}

type SharedEffect = Rc<RefCell<HoverEffect>>;

// Holds the animation-frame closure so it can re-schedule itself. Storing it
// inside an `Option` lets us create the `Closure` first and then reach it
// from within itself.
type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Wire the warp effect: load the image, then drive frames from hover events.
pub fn start(
    canvas: HtmlCanvasElement,
    wrapper: HtmlElement,
    image_src: &str,
) -> Result<(), JsValue> {
    let config = WarpConfig::default();
    let surface = CanvasSurface::new(&canvas)?;
    let effect: SharedEffect = Rc::new(RefCell::new(HoverEffect {
        driver: HoverDriver::new(&config),
        renderer: MeshRenderer::new(surface, &config),
    }));

    load_image(effect.clone(), image_src)?;

    let frames = frame_loop(effect.clone());
    on_pointer(&wrapper, "mouseenter", effect.clone(), frames.clone(), HoverDriver::pointer_enter)?;
    on_pointer(&wrapper, "mouseleave", effect, frames, HoverDriver::pointer_leave)?;
    Ok(())
}

fn load_image(effect: SharedEffect, src: &str) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;

    let onload = {
        let image = image.clone();
        Closure::wrap(Box::new(move || {
            debug!(
                width = image.natural_width(),
                height = image.natural_height(),
                "image loaded"
            );
            let mut fx = effect.borrow_mut();
            fx.renderer.set_image(image.clone());
            if let Err(err) = fx.renderer.render(0.0) {
                warn!(%err, "initial render failed");
            }
        }) as Box<dyn FnMut()>)
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let onerror = {
        let src = src.to_owned();
        Closure::wrap(Box::new(move || {
            warn!(%src, "image failed to load; warp stays blank");
        }) as Box<dyn FnMut()>)
    };
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    image.set_src(src);
    Ok(())
}

fn frame_loop(effect: SharedEffect) -> FrameLoop {
    let f: FrameLoop = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let settled = {
            let mut fx = effect.borrow_mut();
            let HoverEffect { driver, renderer } = &mut *fx;
            match driver.tick(renderer) {
                Ok(step) => {
                    if step.settled {
                        debug!(progress = step.progress, "hover animation settled");
                    }
                    step.settled
                }
                Err(err) => {
                    warn!(%err, "frame render failed");
                    !driver.is_running()
                }
            }
        };

        // schedule next
        if !settled {
            if let Err(err) = request_frame(&f) {
                warn!(?err, "could not schedule animation frame");
            }
        }
    }) as Box<dyn FnMut()>));
    g
}

fn request_frame(frames: &FrameLoop) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let slot = frames.borrow();
    let closure = slot.as_ref().ok_or("frame loop not initialised")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}

fn on_pointer(
    wrapper: &HtmlElement,
    event: &str,
    effect: SharedEffect,
    frames: FrameLoop,
    apply: fn(&mut HoverDriver) -> bool,
) -> Result<(), JsValue> {
    let handler = Closure::wrap(Box::new(move || {
        let must_start = apply(&mut effect.borrow_mut().driver);
        if must_start {
            if let Err(err) = request_frame(&frames) {
                warn!(?err, "could not start hover animation");
            }
        }
    }) as Box<dyn FnMut()>);
    wrapper.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

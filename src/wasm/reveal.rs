//! Fade page sections in as they scroll into view.

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

const SECTION_SELECTOR: &str = ".timeline-item, .bento-item";
const HIDDEN_CLASS: &str = "fade-in-section";
const VISIBLE_CLASS: &str = "visible";
const VISIBILITY_THRESHOLD: f64 = 0.1;

const REVEAL_CSS: &str = "
    .fade-in-section {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.8s ease-out, transform 0.8s ease-out;
    }

    .fade-in-section.visible {
        opacity: 1;
        transform: translateY(0);
    }
";

pub fn start(document: &Document) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(|entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                // Sections stay observed; re-adding the class is harmless.
                if let Err(err) = entry.target().class_list().add_1(VISIBLE_CLASS) {
                    tracing::warn!(?err, "could not mark section visible");
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    let sections = document.query_selector_all(SECTION_SELECTOR)?;
    let mut observed = 0u32;
    for i in 0..sections.length() {
        let Some(el) = sections.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        el.class_list().add_1(HIDDEN_CLASS)?;
        observer.observe(&el);
        observed += 1;
    }
    tracing::debug!(observed, "scroll reveal attached");

    inject_style(document)
}

fn inject_style(document: &Document) -> Result<(), JsValue> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(REVEAL_CSS));
    let head = document.head().ok_or("document has no <head>")?;
    head.append_child(&style)?;
    Ok(())
}

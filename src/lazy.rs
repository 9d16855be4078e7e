//! Lazy Images
//!
//! Swap in `data-src` once an image scrolls into view.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

pub const LAZY_CLASS: &str = "lazy";
const LAZY_SELECTOR: &str = "img.lazy";

/// Deferred source, or the current one when none is set
pub fn resolve_source(deferred: Option<String>, current: String) -> String {
    deferred.filter(|src| !src.is_empty()).unwrap_or(current)
}

/// Observe one element; it is revealed at most once.
///
/// Each call creates its own observer, so elements inserted after startup can be registered too.
pub fn lazy_load(element: &Element) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    reveal(&entry.target());
                    observer.disconnect();
                    break;
                }
            }
        },
    );
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    observer.observe(element);
    callback.forget();
    Ok(())
}

pub fn lazy_load_document(document: &Document) -> Result<usize, JsValue> {
    observe_all(dom::elements(&document.query_selector_all(LAZY_SELECTOR)?))
}

/// Register lazy images inserted under `root`
pub fn lazy_load_within(root: &Element) -> Result<usize, JsValue> {
    observe_all(dom::elements(&root.query_selector_all(LAZY_SELECTOR)?))
}

fn observe_all(images: Vec<Element>) -> Result<usize, JsValue> {
    for image in &images {
        lazy_load(image)?;
    }
    Ok(images.len())
}

fn reveal(element: &Element) {
    let deferred = dom::data(element, "src");
    if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
        image.set_src(&resolve_source(deferred, image.src()));
    } else {
        let current = element.get_attribute("src").unwrap_or_default();
        let _ = element.set_attribute("src", &resolve_source(deferred, current));
    }
    let _ = element.class_list().remove_1(LAZY_CLASS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_source_wins() {
        assert_eq!(
            resolve_source(Some("/covers/full.jpg".into()), "/covers/thumb.jpg".into()),
            "/covers/full.jpg"
        );
    }

    #[test]
    fn test_falls_back_to_current() {
        assert_eq!(resolve_source(None, "/covers/thumb.jpg".into()), "/covers/thumb.jpg");
        assert_eq!(
            resolve_source(Some(String::new()), "/covers/thumb.jpg".into()),
            "/covers/thumb.jpg"
        );
    }
}

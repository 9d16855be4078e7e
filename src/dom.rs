//! DOM Helpers
//!
//! Thin wrappers over web-sys lookups and listener binding.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, NodeList};

/// Bind a listener for the lifetime of the page
pub fn on<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Element an event was dispatched to
pub fn event_element(ev: &Event) -> Option<Element> {
    ev.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// `data-*` attribute value
pub fn data(element: &Element, key: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", key))
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

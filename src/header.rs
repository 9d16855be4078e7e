//! Header Behavior
//!
//! Sticky header state and the hamburger menu.

use wasm_bindgen::JsValue;

use crate::context::PageContext;
use crate::dom;

pub const HEADER_ID: &str = "main-header";
pub const HAMBURGER_ID: &str = "hamburger-menu";
pub const MENU_SELECTOR: &str = ".menu-container";

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Toggle `scrolled` on the header for every scroll event. No-op without a header.
pub fn bind_scroll_watcher(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(header) = ctx.document.get_element_by_id(HEADER_ID) else {
        log::debug!("[Header] No #{}, scroll watcher not bound", HEADER_ID);
        return Ok(());
    };
    let window = ctx.window.clone();
    let threshold = ctx.config.scroll_threshold;
    dom::on(&ctx.window, "scroll", move |_| {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let _ = header
            .class_list()
            .toggle_with_force("scrolled", is_scrolled(scroll_y, threshold));
    })
}

/// Keep the hamburger and the menu panel `active` in lockstep
pub fn bind_menu_toggle(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(hamburger) = ctx.document.get_element_by_id(HAMBURGER_ID) else {
        return Ok(());
    };
    let menu = ctx.document.query_selector(MENU_SELECTOR)?;
    if menu.is_none() {
        log::warn!("[Header] No {} found, hamburger toggles alone", MENU_SELECTOR);
    }
    let trigger = hamburger.clone();
    dom::on(&hamburger, "click", move |_| {
        let _ = trigger.class_list().toggle("active");
        if let Some(menu) = &menu {
            let _ = menu.class_list().toggle("active");
        }
    })
}

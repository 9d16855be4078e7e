//! Novel Site Frontend Entry Point
//!
//! Attaches behavior to the server-rendered pages once the DOM is ready.

mod api;
mod config;
mod context;
mod detail;
mod dom;
mod header;
mod lazy;
mod models;
mod slider;

use std::cell::RefCell;

use leptos::prelude::Owner;
use touch_carousel::Carousel;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::PageTransitionEvent;

use config::SiteConfig;
use context::PageContext;

/// Everything that has to stay alive for the page's lifetime
struct Site {
    _owner: Owner,
    carousel: Option<Carousel>,
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let loaded = SiteConfig::from_window(&window);
    let level = loaded
        .as_ref()
        .map(SiteConfig::log_level)
        .unwrap_or_else(|_| config::default_log_level());
    let _ = console_log::init_with_level(level);
    let config = loaded.unwrap_or_else(|e| {
        log::warn!("[Config] Ignoring malformed NOVEL_SITE_CONFIG: {}", e);
        SiteConfig::default()
    });
    if config.is_demo() {
        log::warn!("[Config] Counters endpoint is not set; running in demo mode");
    }

    let ctx = match PageContext::new(window, config) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("[App] {:?}", e);
            return;
        }
    };

    if ctx.document.ready_state() == "loading" {
        let document = ctx.document.clone();
        let result = dom::on(&document, "DOMContentLoaded", move |_| start(&ctx));
        if let Err(e) = result {
            log::error!("[App] Could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        start(&ctx);
    }
}

/// Set up every component. One failing does not stop the others.
fn start(ctx: &PageContext) {
    if SITE.with(|site| site.borrow().is_some()) {
        return;
    }
    let owner = Owner::new();
    let carousel = owner.with(|| {
        report("Scroll watcher", header::bind_scroll_watcher(ctx));
        report("Menu toggle", header::bind_menu_toggle(ctx));
        match lazy::lazy_load_document(&ctx.document) {
            Ok(count) => log::debug!("[App] Observing {} lazy images", count),
            Err(e) => log::error!("[App] Lazy loader setup failed: {:?}", e),
        }
        let carousel = slider::init(ctx).unwrap_or_else(|e| {
            log::error!("[App] Slider setup failed: {:?}", e);
            None
        });
        report("Detail page", detail::init(ctx));
        carousel
    });

    SITE.with(|site| {
        *site.borrow_mut() = Some(Site {
            _owner: owner,
            carousel,
        })
    });
    report("Teardown hook", bind_teardown(ctx));
}

fn report(component: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("[App] {} setup failed: {:?}", component, e);
    }
}

/// Drop the site when the page is really going away, which stops the carousel.
/// Pages kept in the back/forward cache stay intact.
fn bind_teardown(ctx: &PageContext) -> Result<(), JsValue> {
    dom::on(&ctx.window, "pagehide", |ev| {
        let persisted = ev
            .dyn_ref::<PageTransitionEvent>()
            .map(PageTransitionEvent::persisted)
            .unwrap_or(false);
        if persisted {
            return;
        }
        if let Some(site) = SITE.with(|site| site.borrow_mut().take()) {
            if let Some(carousel) = &site.carousel {
                log::debug!("[App] Tearing down slider at page {}", carousel.index());
            }
            drop(site);
        }
    })
}

//! Popular Novels Slider
//!
//! Mounts the touch carousel on `#popular-slider` when the page has one.

use touch_carousel::Carousel;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::context::PageContext;

pub const SLIDER_ID: &str = "popular-slider";

pub fn init(ctx: &PageContext) -> Result<Option<Carousel>, JsValue> {
    let Some(slider) = ctx.document.get_element_by_id(SLIDER_ID) else {
        return Ok(None);
    };
    let slider = slider.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
    let carousel = Carousel::mount(&slider, &ctx.config.carousel_options())?;
    if let Some(carousel) = &carousel {
        let layout = carousel.layout();
        log::info!(
            "[Slider] Ready: {} pages of {}, autoplay {}",
            layout.total_pages,
            layout.items_per_page,
            if carousel.has_autoplay() { "on" } else { "off" }
        );
    }
    Ok(carousel)
}

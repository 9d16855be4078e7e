//! Touch Carousel
//!
//! Paged card carousel for server-rendered markup.
//! Pages with prev/next buttons, an autoplay timer and horizontal swipes.
//!
//! Expected markup:
//! ```html
//! <div id="popular-slider">
//!   <button class="slider-btn prev"></button>
//!   <div class="slider-wrapper"> <div class="novel-card"></div> ... </div>
//!   <button class="slider-btn next"></button>
//! </div>
//! ```

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, TouchEvent};

pub const WRAPPER_SELECTOR: &str = ".slider-wrapper";
pub const PREV_SELECTOR: &str = ".slider-btn.prev";
pub const NEXT_SELECTOR: &str = ".slider-btn.next";
pub const CARD_SELECTOR: &str = ".novel-card";

/// Horizontal margin on each side of a card
pub const DEFAULT_CARD_MARGIN_PX: f64 = 16.0;
pub const DEFAULT_AUTOPLAY_MS: u32 = 5_000;

/// Page geometry, measured once at mount
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Card width including both horizontal margins
    pub card_width: f64,
    pub items_per_page: usize,
    pub total_pages: usize,
}

impl Layout {
    /// Measure the carousel. Returns `None` when there is nothing to page.
    ///
    /// A track narrower than one card still shows one card per page.
    pub fn measure(card_width: f64, margin: f64, track_width: f64, card_count: usize) -> Option<Self> {
        if card_count == 0 {
            return None;
        }
        let card_width = card_width + 2.0 * margin;
        let fits = if card_width > 0.0 {
            (track_width / card_width).floor() as usize
        } else {
            0
        };
        let items_per_page = fits.max(1);
        Some(Self {
            card_width,
            items_per_page,
            total_pages: card_count.div_ceil(items_per_page),
        })
    }

    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.total_pages
    }

    pub fn prev(&self, index: usize) -> usize {
        (index + self.total_pages - 1) % self.total_pages
    }

    /// Track translation for a page, in pixels
    pub fn offset_px(&self, index: usize) -> f64 {
        index as f64 * self.card_width * self.items_per_page as f64
    }
}

/// CSS transform value for a track offset
pub fn translate_x(offset_px: f64) -> String {
    format!("translateX(-{}px)", offset_px)
}

/// Direction of a completed horizontal swipe
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Swipe {
    /// Finger moved right-to-left
    Next,
    /// Finger moved left-to-right
    Prev,
}

impl Swipe {
    /// Classify a gesture from its start and end screen x. A stationary touch is not a swipe.
    pub fn classify(start_x: i32, end_x: i32) -> Option<Self> {
        if end_x < start_x {
            Some(Swipe::Next)
        } else if end_x > start_x {
            Some(Swipe::Prev)
        } else {
            None
        }
    }
}

/// Carousel state signals
#[derive(Clone, Copy)]
pub struct CarouselSignals {
    pub index_read: ReadSignal<usize>,
    pub index_write: WriteSignal<usize>,
    /// Screen x recorded on touchstart
    pub touch_start_x_read: ReadSignal<i32>,
    pub touch_start_x_write: WriteSignal<i32>,
}

/// Must be called under a reactive owner; the signals live as long as it does.
pub fn create_carousel_signals() -> CarouselSignals {
    let (index_read, index_write) = signal(0usize);
    let (touch_start_x_read, touch_start_x_write) = signal(0i32);
    CarouselSignals {
        index_read,
        index_write,
        touch_start_x_read,
        touch_start_x_write,
    }
}

/// Mount options
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselOptions {
    pub card_margin_px: f64,
    /// `None` disables autoplay
    pub autoplay_ms: Option<u32>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            card_margin_px: DEFAULT_CARD_MARGIN_PX,
            autoplay_ms: Some(DEFAULT_AUTOPLAY_MS),
        }
    }
}

/// Event listener removed from its target on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A mounted carousel.
///
/// Dropping it cancels autoplay and detaches every listener it registered.
pub struct Carousel {
    layout: Layout,
    signals: CarouselSignals,
    autoplay: Option<Interval>,
    _listeners: Vec<Listener>,
}

impl Carousel {
    /// Attach to a slider element.
    ///
    /// Returns `Ok(None)` without registering anything when the slider has no
    /// cards or is missing its track or buttons.
    pub fn mount(slider: &HtmlElement, options: &CarouselOptions) -> Result<Option<Self>, JsValue> {
        let cards = slider.query_selector_all(CARD_SELECTOR)?;
        let Some(first_card) = cards.get(0) else {
            log::debug!("[Slider] No cards, skipping setup");
            return Ok(None);
        };
        let (Some(wrapper), Some(prev_btn), Some(next_btn)) = (
            slider.query_selector(WRAPPER_SELECTOR)?,
            slider.query_selector(PREV_SELECTOR)?,
            slider.query_selector(NEXT_SELECTOR)?,
        ) else {
            log::warn!("[Slider] Missing track or navigation buttons, skipping setup");
            return Ok(None);
        };
        let wrapper = wrapper.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        let prev_btn = prev_btn.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        let next_btn = next_btn.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        let first_card = first_card.dyn_into::<HtmlElement>().map_err(JsValue::from)?;

        let Some(layout) = Layout::measure(
            first_card.offset_width() as f64,
            options.card_margin_px,
            slider.offset_width() as f64,
            cards.length() as usize,
        ) else {
            return Ok(None);
        };
        log::debug!(
            "[Slider] {} cards, {} per page, {} pages",
            cards.length(),
            layout.items_per_page,
            layout.total_pages
        );

        let signals = create_carousel_signals();
        let render = {
            let wrapper = wrapper.clone();
            move |index: usize| {
                let _ = wrapper
                    .style()
                    .set_property("transform", &translate_x(layout.offset_px(index)));
            }
        };

        let mut listeners = Vec::with_capacity(4);

        let render_next = render.clone();
        listeners.push(Listener::attach(&next_btn, "click", move |_ev: Event| {
            let index = layout.next(signals.index_read.get_untracked());
            signals.index_write.set(index);
            render_next(index);
        })?);

        let render_prev = render;
        listeners.push(Listener::attach(&prev_btn, "click", move |_ev: Event| {
            let index = layout.prev(signals.index_read.get_untracked());
            signals.index_write.set(index);
            render_prev(index);
        })?);

        listeners.push(Listener::attach(&wrapper, "touchstart", move |ev: Event| {
            if let Some(x) = first_touch_screen_x(&ev) {
                signals.touch_start_x_write.set(x);
            }
        })?);

        {
            let prev_btn = prev_btn.clone();
            let next_btn = next_btn.clone();
            listeners.push(Listener::attach(&wrapper, "touchend", move |ev: Event| {
                let Some(end_x) = first_touch_screen_x(&ev) else { return };
                match Swipe::classify(signals.touch_start_x_read.get_untracked(), end_x) {
                    Some(Swipe::Next) => next_btn.click(),
                    Some(Swipe::Prev) => prev_btn.click(),
                    None => {}
                }
            })?);
        }

        // Autoplay goes through the button so it shares the click path
        let autoplay = options.autoplay_ms.map(|ms| {
            let next_btn = next_btn.clone();
            Interval::new(ms, move || next_btn.click())
        });

        Ok(Some(Self {
            layout,
            signals,
            autoplay,
            _listeners: listeners,
        }))
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Current page index
    pub fn index(&self) -> usize {
        self.signals.index_read.get_untracked()
    }

    pub fn has_autoplay(&self) -> bool {
        self.autoplay.is_some()
    }
}

fn first_touch_screen_x(ev: &Event) -> Option<i32> {
    let touch_event = ev.dyn_ref::<TouchEvent>()?;
    touch_event.changed_touches().get(0).map(|t| t.screen_x())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(card_count: usize) -> Layout {
        // 200px cards + 2 * 16px margin in a 1000px track: 4 per page
        Layout::measure(200.0, DEFAULT_CARD_MARGIN_PX, 1000.0, card_count).unwrap()
    }

    #[test]
    fn test_measure() {
        let layout = layout_for(10);
        assert_eq!(layout.card_width, 232.0);
        assert_eq!(layout.items_per_page, 4);
        assert_eq!(layout.total_pages, 3);
    }

    #[test]
    fn test_measure_exact_fit() {
        assert_eq!(layout_for(8).total_pages, 2);
        assert_eq!(layout_for(1).total_pages, 1);
    }

    #[test]
    fn test_measure_no_cards() {
        assert!(Layout::measure(200.0, 16.0, 1000.0, 0).is_none());
    }

    #[test]
    fn test_measure_narrow_track_shows_one_card() {
        let layout = Layout::measure(300.0, 16.0, 120.0, 5).unwrap();
        assert_eq!(layout.items_per_page, 1);
        assert_eq!(layout.total_pages, 5);
    }

    #[test]
    fn test_next_wraps() {
        let layout = layout_for(10);
        let mut index = 0;
        for n in 1..=7 {
            index = layout.next(index);
            assert_eq!(index, n % layout.total_pages);
        }
    }

    #[test]
    fn test_prev_wraps() {
        let layout = layout_for(10);
        assert_eq!(layout.prev(0), 2);
        assert_eq!(layout.prev(2), 1);
        assert_eq!(layout.prev(1), 0);
    }

    #[test]
    fn test_single_page_stays_put() {
        let layout = layout_for(3);
        assert_eq!(layout.next(0), 0);
        assert_eq!(layout.prev(0), 0);
    }

    #[test]
    fn test_offset() {
        let layout = layout_for(10);
        assert_eq!(layout.offset_px(0), 0.0);
        assert_eq!(layout.offset_px(2), 1856.0);
        assert_eq!(translate_x(layout.offset_px(0)), "translateX(-0px)");
        assert_eq!(translate_x(layout.offset_px(1)), "translateX(-928px)");
    }

    #[test]
    fn test_swipe() {
        assert_eq!(Swipe::classify(300, 120), Some(Swipe::Next));
        assert_eq!(Swipe::classify(120, 300), Some(Swipe::Prev));
        assert_eq!(Swipe::classify(200, 200), None);
    }

    #[test]
    fn test_default_options() {
        let options = CarouselOptions::default();
        assert_eq!(options.card_margin_px, 16.0);
        assert_eq!(options.autoplay_ms, Some(5_000));
    }
}

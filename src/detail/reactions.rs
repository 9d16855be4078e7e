//! Like, bookmark and star rating.

use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use super::counters::{refresh_after_write, refresh_later};
use super::DetailPage;
use crate::dom;
use crate::models::Action;

pub const STAR_FILLED: &str = "★";
pub const STAR_EMPTY: &str = "☆";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Bookmark,
}

impl Reaction {
    /// Action for the state the button was just toggled into
    pub fn action_for(self, active: bool) -> Action {
        match (self, active) {
            (Reaction::Like, true) => Action::Like,
            (Reaction::Like, false) => Action::Unlike,
            (Reaction::Bookmark, true) => Action::Bookmark,
            (Reaction::Bookmark, false) => Action::Unbookmark,
        }
    }

    /// One click: the button's new state and the write to send for it
    pub fn toggled(self, was_active: bool) -> (bool, Action) {
        let active = !was_active;
        (active, self.action_for(active))
    }

    fn button(self, page: &DetailPage) -> &Element {
        match self {
            Reaction::Like => &page.els.like_btn,
            Reaction::Bookmark => &page.els.bookmark_btn,
        }
    }
}

/// Toggle `active` immediately, then tell the endpoint.
///
/// Counters refresh only when the write succeeds. A failed write leaves the
/// button in its toggled state.
pub(super) fn bind_reaction(page: &Rc<DetailPage>, reaction: Reaction) -> Result<(), JsValue> {
    let button = reaction.button(page).clone();
    let target = button.clone();
    let page = page.clone();
    dom::on(&target, "click", move |_| {
        let classes = button.class_list();
        let (active, action) = reaction.toggled(classes.contains("active"));
        let _ = classes.toggle_with_force("active", active);
        let page = page.clone();
        spawn_local(async move {
            let result = page.api.write(action, None).await;
            if refresh_after_write(&result) {
                page.refresh().await;
            }
        });
    })
}

/// `parseInt`-style read of a star ordinal: optional sign, then leading digits
pub fn parse_rating(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let digits_from = usize::from(raw.starts_with(['+', '-']));
    let end = raw[digits_from..]
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(raw.len(), |(i, _)| digits_from + i);
    raw[..end].parse().ok()
}

/// Glyph and selection for a star given the chosen rating
pub fn star_state(ordinal: Option<i64>, rating: i64) -> (&'static str, bool) {
    match ordinal {
        Some(ordinal) if ordinal <= rating => (STAR_FILLED, true),
        _ => (STAR_EMPTY, false),
    }
}

pub(super) fn bind_rating(page: &Rc<DetailPage>) -> Result<(), JsValue> {
    let stars = page.els.rating_stars.clone();
    let page = page.clone();
    dom::on(&stars, "click", move |ev| {
        let Some(star) = dom::event_element(&ev).filter(|el| dom::has_class(el, "star")) else {
            return;
        };
        let raw = dom::data(&star, "value").unwrap_or_default();
        let Some(rating) = parse_rating(&raw) else {
            log::warn!("[Detail] Star has no usable data-value: {:?}", raw);
            return;
        };
        let page = page.clone();
        spawn_local(async move {
            let result = page.api.write(Action::Rate, Some(json!({ "rating": rating }))).await;
            if refresh_after_write(&result) {
                refresh_later(&page);
                page.draw_stars(rating);
            }
        });
    })
}

impl DetailPage {
    fn draw_stars(&self, rating: i64) {
        let Ok(stars) = self.els.rating_stars.query_selector_all(".star") else {
            return;
        };
        for star in dom::elements(&stars) {
            let ordinal = dom::data(&star, "value").as_deref().and_then(parse_rating);
            let (glyph, selected) = star_state(ordinal, rating);
            star.set_text_content(Some(glyph));
            let _ = star.class_list().toggle_with_force("selected", selected);
        }
    }
}

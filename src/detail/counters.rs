//! Counter display: views, likes, bookmarks, rating.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use super::DetailPage;
use crate::models::{Action, Envelope};

pub const NOT_AVAILABLE: &str = "N/A";

/// Count rounded to an integer with thousands separators, e.g. `1,234`
pub fn format_count(count: f64) -> String {
    if !count.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = count.round();
    let digits = format!("{}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_rating(rating: f64) -> String {
    format!("({:.1})", rating)
}

/// Text for the four counter fields
#[derive(Debug, Clone, PartialEq)]
pub struct CounterText {
    pub views: String,
    pub likes: String,
    pub bookmarks: String,
    pub rating: String,
}

impl CounterText {
    pub fn from_envelope(envelope: &Envelope) -> Self {
        match envelope.stats() {
            Some(stats) => Self {
                views: format_count(stats.views),
                likes: format_count(stats.likes),
                bookmarks: format_count(stats.bookmarks),
                rating: format_rating(stats.rating),
            },
            None => Self::unavailable(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            views: NOT_AVAILABLE.to_string(),
            likes: NOT_AVAILABLE.to_string(),
            bookmarks: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
        }
    }
}

impl DetailPage {
    /// Fetch a fresh snapshot and render it. Overlapping refreshes race; the last to land wins.
    pub(super) async fn refresh(&self) {
        let envelope = self.api.read(Action::GetData).await;
        let text = CounterText::from_envelope(&envelope);
        log::debug!("[Detail] Counters: {:?}", text);
        self.show_counters(&text);
    }

    fn show_counters(&self, text: &CounterText) {
        self.els.view_count.set_text_content(Some(&text.views));
        self.els.like_count.set_text_content(Some(&text.likes));
        self.els.bookmark_count.set_text_content(Some(&text.bookmarks));
        self.els.current_rating.set_text_content(Some(&text.rating));
    }
}

/// Counters are refetched only after a write the endpoint accepted
pub fn refresh_after_write(result: &Envelope) -> bool {
    result.success
}

pub(super) fn refresh_later(page: &Rc<DetailPage>) {
    let page = page.clone();
    spawn_local(async move { page.refresh().await });
}

/// Count this visit, then refresh whatever the outcome
pub(super) fn increment_view(page: Rc<DetailPage>) {
    spawn_local(async move {
        let result = page.api.write(Action::IncrementView, None).await;
        if !result.success {
            log::warn!("[Detail] View was not counted");
        }
        page.refresh().await;
    });
}

//! Chapter Reader
//!
//! Chapter buttons load generated content into the reader after a simulated fetch.
//! Chapters are written as Markdown; manga pages are raw `<img class="lazy">` lines.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use pulldown_cmark::{html, Options, Parser};
use wasm_bindgen::JsValue;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions};

use super::DetailPage;
use crate::dom;
use crate::lazy;

const CHAPTER_BTN_CLASS: &str = "chapter-btn";

const MANGA_PAGES: [&str; 3] = [
    "https://placehold.co/800x1200/1b0f3a/fde047?text=Page+1",
    "https://placehold.co/800x1200/1b0f3a/fde047?text=Page+2",
    "https://placehold.co/800x1200/1b0f3a/fde047?text=Page+3",
];

const TEXT_BODY: [&str; 3] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vivamus lacinia odio vitae vestibulum vestibulum. Cras venenatis euismod malesuada.",
    "Curabitur sit amet quam id tellus gravida vulputate. Proin eget tortor risus. Pellentesque habitant morbi tristique senectus et netus et malesuada fames ac turpis egestas. Mauris placerat eleifend leo.",
    "Donec eu libero sit amet quam egestas semper. Aenean ultricies mi vitae est. Mauris placerat eleifend leo. Quisque sit amet est et sapien ullamcorper pharetra. Vestibulum erat wisi, condimentum sed, commodo vitae, ornare sit amet, wisi.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterKind {
    Text,
    Manga,
}

impl ChapterKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(ChapterKind::Text),
            "manga" => Some(ChapterKind::Manga),
            _ => None,
        }
    }
}

/// What the reader shows at one stage of a chapter load
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderView {
    pub placeholder_hidden: bool,
    pub content_hidden: bool,
    pub html: String,
}

impl ReaderView {
    pub fn loading(number: &str) -> Self {
        Self {
            placeholder_hidden: true,
            content_hidden: false,
            html: loading_html(number),
        }
    }

    pub fn chapter(kind: Option<ChapterKind>, number: &str) -> Self {
        Self {
            placeholder_hidden: true,
            content_hidden: false,
            html: chapter_html(kind, number),
        }
    }
}

pub fn loading_html(number: &str) -> String {
    format!(r#"<p class="loading">Loading Chapter {}...</p>"#, escape_html(number))
}

/// Reader markup for a chapter. Unknown kinds render nothing.
pub fn chapter_html(kind: Option<ChapterKind>, number: &str) -> String {
    let Some(kind) = kind else {
        return String::new();
    };
    let markdown = chapter_markdown(kind, &escape_markdown(number));
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(&markdown, Options::empty()));
    out
}

fn chapter_markdown(kind: ChapterKind, number: &str) -> String {
    match kind {
        ChapterKind::Text => {
            let mut md = format!("### Chapter {}: The Story Begins\n\n", number);
            md.push_str(&format!("This is the content for chapter {}. {}\n\n", number, TEXT_BODY[0]));
            for paragraph in &TEXT_BODY[1..] {
                md.push_str(paragraph);
                md.push_str("\n\n");
            }
            md
        }
        ChapterKind::Manga => {
            let mut md = format!(
                "### Chapter {}: The Void (Manga)\n\nDisplaying pages for the manga chapter.\n\n",
                number
            );
            for (i, src) in MANGA_PAGES.iter().enumerate() {
                md.push_str(&format!(
                    "<img src=\"{}\" alt=\"Manga Page {}\" class=\"{}\">\n",
                    src,
                    i + 1,
                    lazy::LAZY_CLASS
                ));
            }
            md
        }
    }
}

/// Backslash-escape ASCII punctuation so the text renders literally.
/// The renderer HTML-escapes the result.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(super) fn bind_chapter_grid(page: &Rc<DetailPage>) -> Result<(), JsValue> {
    let grid = page.els.chapter_grid.clone();
    let page = page.clone();
    dom::on(&grid, "click", move |ev| {
        let Some(button) = dom::event_element(&ev).filter(|el| dom::has_class(el, CHAPTER_BTN_CLASS)) else {
            return;
        };
        page.select_chapter_button(&button);
        let kind = dom::data(&button, "chapter-type").unwrap_or_default();
        let number = dom::data(&button, "chapter").unwrap_or_default();
        load_chapter(page.clone(), ChapterKind::parse(&kind), number);
    })
}

/// Show the loading line, wait out the simulated fetch, then swap content in.
///
/// Loads are not cancelled; overlapping ones each write the reader when they finish.
fn load_chapter(page: Rc<DetailPage>, kind: Option<ChapterKind>, number: String) {
    page.show_reader(&ReaderView::loading(&number));

    spawn_local(async move {
        TimeoutFuture::new(page.chapter_delay_ms).await;
        page.show_reader(&ReaderView::chapter(kind, &number));
        let els = &page.els;
        match lazy::lazy_load_within(&els.reader_content) {
            Ok(count) if count > 0 => log::debug!("[Reader] Chapter {}: {} lazy pages", number, count),
            Ok(_) => {}
            Err(e) => log::error!("[Reader] Lazy loading failed: {:?}", e),
        }
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        els.reader_container
            .scroll_into_view_with_scroll_into_view_options(&options);
    });
}

impl DetailPage {
    fn show_reader(&self, view: &ReaderView) {
        let els = &self.els;
        let _ = els
            .reader_placeholder
            .class_list()
            .toggle_with_force("hidden", view.placeholder_hidden);
        let _ = els
            .reader_content
            .class_list()
            .toggle_with_force("hidden", view.content_hidden);
        els.reader_content.set_inner_html(&view.html);
    }

    /// Make `button` the only active chapter button
    fn select_chapter_button(&self, button: &Element) {
        if let Ok(buttons) = self
            .els
            .chapter_grid
            .query_selector_all(&format!(".{}", CHAPTER_BTN_CLASS))
        {
            for other in dom::elements(&buttons) {
                let _ = other.class_list().remove_1("active");
            }
        }
        let _ = button.class_list().add_1("active");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(ChapterKind::parse("text"), Some(ChapterKind::Text));
        assert_eq!(ChapterKind::parse("manga"), Some(ChapterKind::Manga));
        assert_eq!(ChapterKind::parse("audio"), None);
        assert_eq!(ChapterKind::parse("Text"), None);
    }

    #[test]
    fn test_loading_line() {
        assert_eq!(loading_html("12"), r#"<p class="loading">Loading Chapter 12...</p>"#);
    }

    #[test]
    fn test_loading_view_hides_placeholder() {
        let view = ReaderView::loading("7");
        assert!(view.placeholder_hidden);
        assert!(!view.content_hidden);
        assert_eq!(view.html, loading_html("7"));
    }

    #[test]
    fn test_chapter_view() {
        let view = ReaderView::chapter(ChapterKind::parse("text"), "7");
        assert!(view.placeholder_hidden);
        assert!(!view.content_hidden);
        assert!(view.html.contains("Chapter 7"));

        let empty = ReaderView::chapter(ChapterKind::parse("audio"), "7");
        assert!(empty.placeholder_hidden);
        assert_eq!(empty.html, "");
    }

    #[test]
    fn test_text_chapter() {
        let html = chapter_html(Some(ChapterKind::Text), "7");
        assert!(html.starts_with("<h3>Chapter 7: The Story Begins</h3>"));
        assert!(html.contains("<p>This is the content for chapter 7. Lorem ipsum"));
        assert_eq!(html.matches("<p>").count(), 3);
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_manga_chapter() {
        let html = chapter_html(Some(ChapterKind::Manga), "2");
        assert!(html.contains("<h3>Chapter 2: The Void (Manga)</h3>"));
        assert!(html.contains("<p>Displaying pages for the manga chapter.</p>"));
        assert_eq!(html.matches(r#"class="lazy""#).count(), 3);
        assert!(html.contains(r#"alt="Manga Page 3""#));
        assert!(html.contains("text=Page+1"));
    }

    #[test]
    fn test_unknown_kind_renders_nothing() {
        assert_eq!(chapter_html(None, "4"), "");
    }

    #[test]
    fn test_number_is_not_markdown() {
        let html = chapter_html(Some(ChapterKind::Text), "*7*");
        assert!(html.starts_with("<h3>Chapter *7*: The Story Begins</h3>"));
        assert!(!html.contains("<em>"));
        let html = chapter_html(Some(ChapterKind::Manga), "[1](x) `2` _3_");
        assert!(html.contains("<h3>Chapter [1](x) `2` _3_: The Void (Manga)</h3>"));
        assert!(!html.contains("<a ") && !html.contains("<code>"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("7"), "7");
        assert_eq!(escape_markdown("1.5"), "1\\.5");
        assert_eq!(escape_markdown("*a*"), "\\*a\\*");
    }

    #[test]
    fn test_number_is_escaped() {
        let html = chapter_html(Some(ChapterKind::Text), "<b>9</b>");
        assert!(html.contains("Chapter &lt;b&gt;9&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
        assert_eq!(loading_html("\"x\""), r#"<p class="loading">Loading Chapter &quot;x&quot;...</p>"#);
    }
}

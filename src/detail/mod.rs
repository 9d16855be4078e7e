//! Novel Detail Page
//!
//! Active on pages whose `<body>` carries `data-novel-id`: remote counters,
//! like/bookmark/rating reactions and the chapter reader.

mod chapters;
mod counters;
mod reactions;

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::api::ApiClient;
use crate::context::PageContext;
use crate::dom;
use reactions::Reaction;

const DETAIL_BODY_SELECTOR: &str = "body[data-novel-id]";

/// Elements the detail page cannot work without
pub struct DetailElements {
    pub view_count: Element,
    pub like_count: Element,
    pub bookmark_count: Element,
    pub current_rating: Element,
    pub like_btn: Element,
    pub bookmark_btn: Element,
    pub rating_stars: Element,
    pub chapter_grid: Element,
    pub reader_container: Element,
    pub reader_content: Element,
    pub reader_placeholder: Element,
}

impl DetailElements {
    pub fn collect(document: &Document) -> Result<Self, String> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| format!("missing #{}", id))
        };
        let reader_container = by_id("chapter-reader-container")?;
        let reader_placeholder = reader_container
            .query_selector(".reader-placeholder")
            .map_err(|e| format!("{:?}", e))?
            .ok_or_else(|| "missing .reader-placeholder".to_string())?;
        Ok(Self {
            view_count: by_id("view-count")?,
            like_count: by_id("like-count")?,
            bookmark_count: by_id("bookmark-count")?,
            current_rating: by_id("current-rating")?,
            like_btn: by_id("like-btn")?,
            bookmark_btn: by_id("bookmark-btn")?,
            rating_stars: by_id("rating-stars")?,
            chapter_grid: by_id("chapter-grid")?,
            reader_content: by_id("reader-content")?,
            reader_container,
            reader_placeholder,
        })
    }
}

pub struct DetailPage {
    api: ApiClient,
    els: DetailElements,
    chapter_delay_ms: u32,
}

/// Wire up the detail page if this is one.
///
/// Every required element is checked up front; if any is missing the
/// controller logs the gap and stays inactive.
pub fn init(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(body) = ctx.document.query_selector(DETAIL_BODY_SELECTOR)? else {
        return Ok(());
    };
    let novel_id = dom::data(&body, "novel-id").unwrap_or_default();
    let els = match DetailElements::collect(&ctx.document) {
        Ok(els) => els,
        Err(e) => {
            log::error!("[Detail] Page for {} is incomplete ({}), controller disabled", novel_id, e);
            return Ok(());
        }
    };

    let config = &ctx.config;
    let page = Rc::new(DetailPage {
        api: ApiClient::new(&config.api_url, &novel_id, config.is_demo()),
        els,
        chapter_delay_ms: config.chapter_delay_ms,
    });
    log::info!("[Detail] Novel {}", page.api.novel_id());

    reactions::bind_reaction(&page, Reaction::Like)?;
    reactions::bind_reaction(&page, Reaction::Bookmark)?;
    reactions::bind_rating(&page)?;
    chapters::bind_chapter_grid(&page)?;

    counters::increment_view(page);
    Ok(())
}

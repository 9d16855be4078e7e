//! Page Context
//!
//! Handles shared by every component, built once at startup.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::SiteConfig;

#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub config: Rc<SiteConfig>,
}

impl PageContext {
    pub fn new(window: Window, config: SiteConfig) -> Result<Self, JsValue> {
        let document = window.document().ok_or("No document")?;
        Ok(Self {
            window,
            document,
            config: Rc::new(config),
        })
    }
}

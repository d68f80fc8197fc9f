#![forbid(unsafe_code)]

//! [`Surface`] over the live page.

use folio_core::{Layout, Section, Surface};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::WebError;
use crate::page::{
    ACTIVE_CLASS, CHAPTER_NAV_ID, CONTENT_ID, FULL_WIDTH_CLASS, HEADER_LOGO_SELECTOR,
    HIDDEN_CLASS, LANDING_SELECTOR, LEFT_COLUMN_ID, LINKS_ID, MAIN_SELECTOR,
    MOBILE_LOGO_SELECTOR, NAV_BUTTON_SELECTOR, SUBTITLE_CLASS, VISIBLE_CLASS,
};

pub(crate) fn js_reason(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::missing(format!("#{id}")))
}

fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, WebError> {
    element_by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::missing(format!("#{id}")))
}

fn html_by_selector(document: &Document, selector: &str) -> Result<HtmlElement, WebError> {
    document
        .query_selector(selector)
        .map_err(|err| WebError::Js(js_reason(&err)))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| WebError::missing(selector))
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!(target: "folio.web", class, error = %js_reason(&err), "class toggle failed");
    }
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(err) = element.style().set_property("display", value) {
        warn!(target: "folio.web", error = %js_reason(&err), "display change failed");
    }
}

/// The page elements the controller writes to, resolved once at startup.
pub(crate) struct DomSurface {
    window: Window,
    document: Document,
    content: HtmlElement,
    links: HtmlElement,
    left_column: Element,
    chapter_nav: Element,
    landing: HtmlElement,
    main: HtmlElement,
    mobile_logo: Element,
    header_logo: Element,
}

impl DomSurface {
    /// Resolve every element, failing on the first one missing.
    pub(crate) fn attach(window: &Window) -> Result<Self, WebError> {
        let document = window.document().ok_or_else(|| WebError::missing("document"))?;
        Ok(Self {
            content: html_by_id(&document, CONTENT_ID)?,
            links: html_by_id(&document, LINKS_ID)?,
            left_column: element_by_id(&document, LEFT_COLUMN_ID)?,
            chapter_nav: element_by_id(&document, CHAPTER_NAV_ID)?,
            landing: html_by_selector(&document, LANDING_SELECTOR)?,
            main: html_by_selector(&document, MAIN_SELECTOR)?,
            mobile_logo: html_by_selector(&document, MOBILE_LOGO_SELECTOR)?.into(),
            header_logo: html_by_selector(&document, HEADER_LOGO_SELECTOR)?.into(),
            window: window.clone(),
            document,
        })
    }

    fn subtitle_node(&self, fallback: &str) -> Option<Element> {
        let selector = format!(".{SUBTITLE_CLASS}");
        if let Ok(Some(existing)) = self.header_logo.query_selector(&selector) {
            return Some(existing);
        }
        let created = self.document.create_element("div").ok()?;
        created.set_class_name(SUBTITLE_CLASS);
        created.set_text_content(Some(fallback));
        Some(created)
    }
}

impl Surface for DomSurface {
    fn show_layout(&mut self, layout: Layout) {
        let (landing, main) = match layout {
            Layout::Landing => ("flex", "none"),
            Layout::Full => ("none", "flex"),
        };
        set_display(&self.landing, landing);
        set_display(&self.main, main);
    }

    fn set_active_section(&mut self, section: Section) {
        if let Ok(buttons) = self.document.query_selector_all(NAV_BUTTON_SELECTOR) {
            for i in 0..buttons.length() {
                if let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    toggle_class(&button, ACTIVE_CLASS, false);
                }
            }
        }
        match element_by_id(&self.document, section.nav_button_id()) {
            Ok(button) => toggle_class(&button, ACTIVE_CLASS, true),
            Err(err) => warn!(target: "folio.web", error = %err, "no button for section"),
        }
    }

    fn set_book_chrome_visible(&mut self, visible: bool) {
        toggle_class(&self.left_column, HIDDEN_CLASS, !visible);
        toggle_class(&self.content, FULL_WIDTH_CLASS, !visible);
        toggle_class(&self.chapter_nav, VISIBLE_CLASS, visible);
    }

    fn set_content(&mut self, html: &str) {
        self.content.set_inner_html(html);
    }

    fn scroll_content_to_top(&mut self) {
        self.content.set_scroll_top(0);
    }

    fn set_links(&mut self, html: &str) {
        self.links.set_inner_html(html);
    }

    fn set_logo(&mut self, markup: &str, subtitle: &str) {
        self.mobile_logo.set_inner_html(markup);
        // Rewriting the header drops its subtitle; hold on to it and re-append.
        let subtitle = self.subtitle_node(subtitle);
        self.header_logo.set_inner_html(markup);
        if let Some(node) = subtitle {
            if let Err(err) = self.header_logo.append_child(&node) {
                warn!(target: "folio.web", error = %js_reason(&err), "subtitle not restored");
            }
        }
    }

    fn push_location(&mut self, search: &str) {
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(search)));
        if let Err(err) = pushed {
            warn!(target: "folio.web", search, error = %js_reason(&err), "history push failed");
        }
    }
}

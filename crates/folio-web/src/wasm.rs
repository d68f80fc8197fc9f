#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for [`FolioApp`].
//!
//! Only compiled on `wasm32` targets. Every DOM event is decoded into a
//! [`PageAction`], applied to the shared controller, and the resulting
//! fragment requests are fetched on the browser's event loop.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Controller, FragmentError, FragmentRequest, SiteConfig};
use tracing::{Level, debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, KeyboardEvent, Response, WheelEvent,
    Window,
};

use crate::console::{install_panic_hook, install_tracing};
use crate::dom::{DomSurface, element_by_id, js_reason};
use crate::error::WebError;
use crate::page::{
    self, CHAPTER_ATTR, CONTENT_ID, LINKS_ID, NAV_LINK_SELECTOR, PageAction, WHEEL_SELECTOR,
};

type Shared = Rc<RefCell<Controller<DomSurface>>>;

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// An event listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        options: Option<&AddEventListenerOptions>,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, WebError> {
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let added = match options {
            Some(options) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    kind, function, options,
                ),
            None => target.add_event_listener_with_callback(kind, function),
        };
        added.map_err(|err| WebError::Js(js_reason(&err)))?;
        Ok(Self {
            target,
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Fetch one fragment, treating any non-success status as a failure.
async fn fetch_text(window: &Window, path: &str) -> Result<String, FragmentError> {
    let network = |err: JsValue| FragmentError::Network {
        path: path.to_owned(),
        reason: js_reason(&err),
    };
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    if !response.ok() {
        return Err(FragmentError::Status {
            path: path.to_owned(),
            status: response.status(),
        });
    }
    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    body.as_string().ok_or_else(|| FragmentError::Network {
        path: path.to_owned(),
        reason: "response body is not text".into(),
    })
}

/// Start a fetch for every request; completions feed back into the controller.
fn dispatch(controller: &Shared, window: &Window, requests: Vec<FragmentRequest>) {
    for request in requests {
        let controller = Rc::clone(controller);
        let window = window.clone();
        spawn_local(async move {
            let result = fetch_text(&window, &request.path).await;
            let follow_up = controller.borrow_mut().complete(request.ticket, result);
            dispatch(&controller, &window, follow_up);
        });
    }
}

fn run(controller: &Shared, window: &Window, action: PageAction) {
    debug!(target: "folio.web", ?action, "page action");
    let requests = action.apply(&mut *controller.borrow_mut());
    dispatch(controller, window, requests);
}

fn inner_width(window: &Window) -> u32 {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    page::viewport_width(width)
}

/// The site running in a browser page.
#[wasm_bindgen]
pub struct FolioApp {
    controller: Shared,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FolioApp {
    /// Bind to the current page and load what its address asks for.
    ///
    /// `config_json` overrides [`SiteConfig`] fields; omitted fields keep
    /// their defaults. Rejects if the config is invalid or an element the
    /// controller needs is missing.
    pub fn start(config_json: Option<String>) -> Result<FolioApp, JsValue> {
        install_panic_hook();
        install_tracing(Level::INFO);
        Ok(Self::bind(config_json.as_deref())?)
    }

    /// Navigation state as JSON: `section`, `chapter`, `layout`, `pending`.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        page::state_json(&*self.controller.borrow())
    }

    pub fn section(&self) -> String {
        self.controller.borrow().section().to_string()
    }

    pub fn chapter(&self) -> String {
        self.controller.borrow().chapter().to_string()
    }

    #[wasm_bindgen(js_name = pendingRequests)]
    pub fn pending_requests(&self) -> u32 {
        u32::try_from(self.controller.borrow().pending_requests()).unwrap_or(u32::MAX)
    }
}

impl FolioApp {
    fn bind(config_json: Option<&str>) -> Result<Self, WebError> {
        let config = match config_json {
            Some(json) => SiteConfig::from_json_str(json)?,
            None => SiteConfig::default(),
        };
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let surface = DomSurface::attach(&window)?;
        let controller: Shared = Rc::new(RefCell::new(Controller::new(surface, config)));
        let listeners = bind_listeners(&controller, &window)?;

        let location = window
            .location()
            .href()
            .map_err(|err| WebError::Js(js_reason(&err)))?;
        let width = inner_width(&window);
        let logo = controller.borrow_mut().load_logo();
        let requests = controller.borrow_mut().initialize(&location, width);
        dispatch(&controller, &window, vec![logo]);
        dispatch(&controller, &window, requests);

        Ok(Self {
            controller,
            _listeners: listeners,
        })
    }
}

fn bind_listeners(controller: &Shared, window: &Window) -> Result<Vec<Listener>, WebError> {
    let document = window.document().ok_or_else(|| WebError::missing("document"))?;
    let mut listeners = Vec::new();

    for (id, action) in page::button_bindings() {
        let button = element_by_id(&document, id)?;
        let (controller, window) = (Rc::clone(controller), window.clone());
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            run(&controller, &window, action.clone());
        });
        listeners.push(Listener::attach(button.into(), "click", None, callback)?);
    }

    for id in [CONTENT_ID, LINKS_ID] {
        let pane = element_by_id(&document, id)?;
        let (controller, window) = (Rc::clone(controller), window.clone());
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if !target.matches(NAV_LINK_SELECTOR).unwrap_or(false) {
                return;
            }
            event.prevent_default();
            if let Some(action) = page::link_action(target.get_attribute(CHAPTER_ATTR)) {
                run(&controller, &window, action);
            }
        });
        listeners.push(Listener::attach(pane.into(), "click", None, callback)?);
    }

    {
        let (controller, win) = (Rc::clone(controller), window.clone());
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(action) = page::key_action(&key.key(), key.key_code()) {
                run(&controller, &win, action);
            }
        });
        listeners.push(Listener::attach(document.clone().into(), "keydown", None, callback)?);
    }

    {
        let (controller, win) = (Rc::clone(controller), window.clone());
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let width = inner_width(&win);
            run(&controller, &win, PageAction::Resize(width));
        });
        listeners.push(Listener::attach(window.clone().into(), "resize", None, callback)?);
    }

    let panes = document
        .query_selector_all(WHEEL_SELECTOR)
        .map_err(|err| WebError::Js(js_reason(&err)))?;
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    for i in 0..panes.length() {
        let Some(pane) = panes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let scroll = controller.borrow().wheel_scroll();
        let scrolled = pane.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            scrolled.scroll_by_with_x_and_y(0.0, scroll.scaled_delta(wheel.delta_y()));
        });
        listeners.push(Listener::attach(pane.into(), "wheel", Some(&options), callback)?);
    }
    if panes.length() == 0 {
        warn!(target: "folio.web", selector = WHEEL_SELECTOR, "no panes for wheel scrolling");
    }

    Ok(listeners)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binding like buttons to a page.
//!
//! [`bind`] works on whatever elements it is handed. [`start`] is the page-level
//! entry point: it finds every element carrying the configured class once the
//! document is ready and keeps the bindings alive for the lifetime of the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlDocument, HtmlElement};

use crate::config::Config;
use crate::csrf::Token;
use crate::endpoint::Fetch;
use crate::surface::Button;
use crate::toggle::LikeToggle;
use crate::Error;

pub type WebToggle = LikeToggle<Rc<Fetch>, Button>;

/// A button with its click listener attached. Dropping it detaches the listener.
pub struct Bound {
    toggle: Rc<WebToggle>,
    listener: Closure<dyn Fn(Event)>,
}

impl Bound {
    pub fn toggle(&self) -> &WebToggle {
        &self.toggle
    }
}

impl Drop for Bound {
    fn drop(&mut self) {
        drop(
            self.toggle
                .surface()
                .element()
                .remove_event_listener_with_callback("click", self.listener.as_ref().unchecked_ref()),
        );
    }
}

/// Render each element and attach a click listener to it.
///
/// Elements with malformed data attributes are logged and skipped, the rest
/// are returned in order.
pub fn bind<I>(config: &Config, token: Token, elements: I) -> Vec<Bound>
where
    I: IntoIterator<Item = HtmlElement>,
{
    let endpoint = Rc::new(Fetch::new(config, token));

    elements
        .into_iter()
        .filter_map(|el| {
            let button = Button::new(el, config.failed_class.as_str());

            let state = match button.read_state() {
                Ok(state) => state,
                Err(err) => {
                    tracing::error!(button = %button.label(), "skipping like button: {err}");
                    return None;
                }
            };

            let toggle = Rc::new(LikeToggle::new(
                state,
                Rc::clone(&endpoint),
                button,
                config.palette.clone(),
            ));

            toggle.render();

            let listener = listen(&toggle);

            Some(Bound { toggle, listener })
        })
        .collect()
}

fn listen(toggle: &Rc<WebToggle>) -> Closure<dyn Fn(Event)> {
    let handler = {
        let toggle = Rc::clone(toggle);

        Closure::<dyn Fn(Event)>::new(move |_: Event| {
            let toggle = Rc::clone(&toggle);

            spawn_local(async move {
                // Failures are logged and marked on the button by the toggle itself.
                if let Err(Error::Busy) = toggle.toggle().await {
                    tracing::debug!("click ignored, toggle in flight");
                }
            });
        })
    };

    drop(
        toggle
            .surface()
            .element()
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()),
    );

    handler
}

thread_local! {
    static INIT: Cell<bool> = const { Cell::new(false) };

    static BOUND: RefCell<Vec<Bound>> = const { RefCell::new(Vec::new()) };
}

/// Bind every like button on the page. Only the first call has any effect.
pub fn start(config: Config) {
    if INIT.get() {
        return;
    }
    INIT.set(true);

    init_panic_hook();

    if let Err(err) = try_start(config) {
        tracing::error!("like buttons not bound: {err}");
    }
}

fn try_start(config: Config) -> Result<(), Error> {
    let document = document()?;
    let token = resolve_token(&config, &document)?;

    if document.ready_state() != "loading" {
        bind_document(&config, token, &document);
        return Ok(());
    }

    let on_ready = Closure::once_into_js(move || match self::document() {
        Ok(document) => bind_document(&config, token, &document),
        Err(err) => tracing::error!("like buttons not bound: {err}"),
    });

    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(|_| Error::Dom("failed to listen for DOMContentLoaded".into()))
}

fn bind_document(config: &Config, token: Token, document: &Document) {
    let found = document.get_elements_by_class_name(&config.class_name);
    let elements: Vec<HtmlElement> = (0..found.length())
        .filter_map(|i| found.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();

    let bound = bind(config, token, elements);

    tracing::info!(count = bound.len(), class = %config.class_name, "like buttons bound");

    BOUND.with_borrow_mut(|all| all.extend(bound));
}

fn resolve_token(config: &Config, document: &Document) -> Result<Token, Error> {
    if let Some(token) = &config.csrf_token {
        return Ok(token.clone());
    }

    document
        .dyn_ref::<HtmlDocument>()
        .and_then(|html| html.cookie().ok())
        .and_then(|cookies| Token::from_cookie(&cookies, &config.csrf_cookie))
        .ok_or(Error::MissingToken)
}

fn document() -> Result<Document, Error> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| Error::Dom("no document available".into()))
}

/// Load [`Config`] from the JSON text of the element with the given id, typically a
/// `<script type="application/json">` block. A missing element yields the default.
#[cfg(feature = "serde")]
pub fn page_config(id: &str) -> Result<Config, Error> {
    match document()?.get_element_by_id(id).and_then(|el| el.text_content()) {
        Some(json) => Config::from_json(&json),
        None => Ok(Config::default()),
    }
}

fn init_panic_hook() {
    // Only enable console hook on debug builds
    #[cfg(debug_assertions)]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use wasm_bindgen_test::*;

    use super::*;

    fn html_document() -> HtmlDocument {
        document().unwrap().dyn_into().unwrap()
    }

    fn cookie_config(cookie: &str, token: Option<&str>) -> Config {
        Config {
            csrf_token: token.map(Token::new),
            csrf_cookie: cookie.into(),
            ..Config::default()
        }
    }

    #[wasm_bindgen_test]
    fn configured_token_wins_over_cookie() {
        let doc = html_document();
        doc.set_cookie("likebtn_pref=from-cookie").unwrap();

        let config = cookie_config("likebtn_pref", Some("from-config"));

        assert_eq!(resolve_token(&config, &doc).unwrap().as_str(), "from-config");
    }

    #[wasm_bindgen_test]
    fn token_falls_back_to_cookie() {
        let doc = html_document();
        doc.set_cookie("likebtn_fallback=abc%2B1").unwrap();

        let config = cookie_config("likebtn_fallback", None);

        assert_eq!(resolve_token(&config, &doc).unwrap().as_str(), "abc+1");
    }

    #[wasm_bindgen_test]
    fn no_token_anywhere() {
        let config = cookie_config("likebtn_absent", None);

        assert!(matches!(
            resolve_token(&config, &html_document()),
            Err(Error::MissingToken)
        ));
    }

    #[wasm_bindgen_test]
    fn binds_elements_with_the_configured_class() {
        let doc = document().unwrap();
        let body = doc.body().unwrap();

        let make = |class: &str, pk: &str| -> HtmlElement {
            let el: HtmlElement = doc.create_element("button").unwrap().dyn_into().unwrap();
            el.set_class_name(class);
            el.set_attribute("data-pk", pk).unwrap();
            el.set_attribute("data-is-liked", "T").unwrap();
            el.set_attribute("data-like-count", "3").unwrap();
            body.append_child(&el).unwrap();
            el
        };

        let hit = make("likebtn-discovered", "1");
        let miss = make("likebtn-elsewhere", "2");

        let config = Config {
            class_name: "likebtn-discovered".into(),
            ..Config::default()
        };

        bind_document(&config, Token::new("t"), &doc);

        assert_eq!(hit.text_content().unwrap(), "♥ 3");
        assert_eq!(miss.text_content().unwrap(), "");

        hit.remove();
        miss.remove();
    }
}

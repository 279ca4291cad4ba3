#![cfg(target_arch = "wasm32")]

use likebtn::config::{Config, Route};
use likebtn::csrf::Token;
use likebtn::endpoint::{Action, Endpoint, Fetch};
use likebtn::face::Face;
use likebtn::runtime;
use likebtn::state::{LikeState, TargetId};
use likebtn::Error;
use likebtn::surface::{Button, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn button(attrs: &[(&str, &str)]) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("button").unwrap();

    for (name, value) in attrs {
        el.set_attribute(name, value).unwrap();
    }

    el.dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn reads_state_from_dataset() {
    let el = button(&[("data-pk", "42"), ("data-is-liked", "T"), ("data-like-count", "5")]);
    let state = Button::new(el, "failed").read_state().unwrap();

    assert_eq!(state, LikeState::new(TargetId::new("42").unwrap(), true, 5));
}

#[wasm_bindgen_test]
fn bind_renders_and_skips_malformed() {
    let good = button(&[("data-pk", "1"), ("data-is-liked", "T"), ("data-like-count", "5")]);
    let bad = button(&[("data-pk", "2"), ("data-like-count", "lots")]);

    let bound = runtime::bind(&Config::default(), Token::new("t"), [good.clone(), bad.clone()]);

    assert_eq!(bound.len(), 1);
    assert_eq!(good.text_content().unwrap(), "♥ 5");
    assert_eq!(good.style().get_property_value("color").unwrap(), "red");
    assert_eq!(bad.text_content().unwrap(), "");
}

#[wasm_bindgen_test]
fn surface_markers_and_write_back() {
    let el = button(&[("data-pk", "1"), ("data-is-liked", "F"), ("data-like-count", "0")]);
    let surface = Button::new(el.clone(), "likebtn-failed");
    let config = Config::default();

    let mut state = surface.read_state().unwrap();
    surface.paint(&Face::of(&state, &config.palette));
    assert_eq!(el.text_content().unwrap(), "♡ 0");

    state.apply(state.next_action());
    surface.store(&state);
    assert_eq!(el.get_attribute("data-is-liked").unwrap(), "T");
    assert_eq!(el.get_attribute("data-like-count").unwrap(), "1");

    surface.set_pending(true);
    assert!(el.has_attribute("disabled"));
    assert_eq!(el.get_attribute("aria-busy").unwrap(), "true");
    surface.set_pending(false);
    assert!(!el.has_attribute("disabled"));

    surface.set_failed(true);
    assert!(el.class_list().contains("likebtn-failed"));
    surface.set_failed(false);
    assert!(!el.class_list().contains("likebtn-failed"));
}

fn fetch(route: &str) -> Fetch {
    let config = Config {
        route: Route::new(route).unwrap(),
        timeout_ms: 5_000,
        ..Config::default()
    };

    Fetch::new(&config, Token::new("t"))
}

#[wasm_bindgen_test]
async fn unrouted_endpoint_is_rejected() {
    let target = TargetId::new("1").unwrap();
    let res = fetch("/likebtn-unrouted/{id}/{action}/")
        .send(&target, Action::Like)
        .await;

    match res {
        Err(Error::Rejected { status }) => assert!((400..500).contains(&status), "status {status}"),
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[wasm_bindgen_test]
async fn unreachable_endpoint_is_a_network_error() {
    let target = TargetId::new("1").unwrap();
    let res = fetch("http://127.0.0.1:9/{id}/{action}/")
        .send(&target, Action::Unlike)
        .await;

    assert!(matches!(res, Err(Error::Network(_))), "got {res:?}");
}

#[wasm_bindgen_test]
fn skipped_buttons_are_identified_by_pk() {
    let with_pk = Button::new(button(&[("data-pk", "17"), ("data-like-count", "x")]), "failed");
    assert_eq!(with_pk.label(), "data-pk=\"17\"");

    let without_pk = Button::new(button(&[("data-like-count", "x")]), "failed");
    assert_eq!(without_pk.label(), "<button data-like-count=\"x\"></button>");
}

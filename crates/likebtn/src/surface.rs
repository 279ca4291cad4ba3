// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display side of a bound button.

use web_sys::HtmlElement;

use crate::face::Face;
use crate::state::{attr, LikeState};

pub trait Surface {
    /// Show the glyph, count and color.
    fn paint(&self, face: &Face);

    /// Write the state back so the element stays the source of truth for the page.
    fn store(&self, state: &LikeState);

    /// Mark the control as waiting for the endpoint.
    fn set_pending(&self, pending: bool);

    /// Mark the control as having failed its last toggle.
    fn set_failed(&self, failed: bool);
}

/// A like button in the DOM.
pub struct Button {
    el: HtmlElement,
    failed_class: String,
}

impl Button {
    pub fn new(el: HtmlElement, failed_class: impl Into<String>) -> Self {
        Button {
            el,
            failed_class: failed_class.into(),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.el
    }

    /// Identify the element in logs: its `data-pk` when present, otherwise its markup.
    pub fn label(&self) -> String {
        match self.el.dataset().get(attr::TARGET.0) {
            Some(pk) => format!("data-pk={pk:?}"),
            None => self.el.outer_html(),
        }
    }

    /// Read the [`LikeState`] from the element's data attributes.
    pub fn read_state(&self) -> Result<LikeState, crate::Error> {
        let data = self.el.dataset();

        LikeState::from_attrs(
            data.get(attr::TARGET.0).as_deref(),
            data.get(attr::IS_LIKED.0).as_deref(),
            data.get(attr::LIKE_COUNT.0).as_deref(),
        )
    }
}

impl Surface for Button {
    fn paint(&self, face: &Face) {
        self.el.set_inner_text(&face.text());
        drop(self.el.style().set_property("color", face.color));
    }

    fn store(&self, state: &LikeState) {
        let data = self.el.dataset();
        let mut buf = itoa::Buffer::new();

        drop(data.set(attr::IS_LIKED.0, state.flag_attr()));
        drop(data.set(attr::LIKE_COUNT.0, buf.format(state.like_count)));
    }

    fn set_pending(&self, pending: bool) {
        drop(self.el.toggle_attribute_with_force("disabled", pending));
        drop(
            self.el
                .set_attribute("aria-busy", if pending { "true" } else { "false" }),
        );
    }

    fn set_failed(&self, failed: bool) {
        drop(
            self.el
                .class_list()
                .toggle_with_force(&self.failed_class, failed),
        );
    }
}

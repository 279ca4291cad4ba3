// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! What a button looks like for a given [`LikeState`].

use std::fmt;

use crate::config::Palette;
use crate::state::LikeState;

pub const LIKED: char = '♥';
pub const NOT_LIKED: char = '♡';

/// Rendered glyph, count and color of a button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face<'a> {
    pub glyph: char,
    pub count: u32,
    pub color: &'a str,
}

impl<'a> Face<'a> {
    pub fn of(state: &LikeState, palette: &'a Palette) -> Self {
        let (glyph, color) = if state.is_liked {
            (LIKED, palette.liked.as_str())
        } else {
            (NOT_LIKED, palette.unliked.as_str())
        };

        Face {
            glyph,
            count: state.like_count,
            color,
        }
    }

    /// The button text, e.g. `"♥ 5"`.
    pub fn text(&self) -> String {
        let mut buf = itoa::Buffer::new();
        let count = buf.format(self.count);

        let mut text = String::with_capacity(self.glyph.len_utf8() + 1 + count.len());
        text.push(self.glyph);
        text.push(' ');
        text.push_str(count);
        text
    }
}

impl fmt::Display for Face<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

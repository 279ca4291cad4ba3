// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Per-button like state
//!
//! Each bound button owns one [`LikeState`]. It is read from the element's
//! data attributes when the page is bound, and only ever changes after the
//! endpoint acknowledges a toggle.
//!
//! ```html
//! <button class="likebtn" data-pk="42" data-is-liked="T" data-like-count="5"></button>
//! ```
use std::fmt;

use crate::endpoint::Action;
use crate::Error;

/// Dataset keys (camel-cased, as `HTMLElement.dataset` exposes them) paired with
/// the attribute names used in error messages.
pub(crate) mod attr {
    pub const TARGET: (&str, &str) = ("pk", "pk");
    pub const IS_LIKED: (&str, &str) = ("isLiked", "is-liked");
    pub const LIKE_COUNT: (&str, &str) = ("likeCount", "like-count");
}

/// Identifier of the likeable resource, safe to use as a single URL path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    pub fn new<S>(id: S) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let id = id.into();

        let path_safe = !id.is_empty()
            && !id
                .chars()
                .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());

        if path_safe {
            Ok(TargetId(id))
        } else {
            Err(Error::InvalidTarget(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LikeState {
    pub target_id: TargetId,
    pub is_liked: bool,
    pub like_count: u32,
}

impl LikeState {
    pub fn new(target_id: TargetId, is_liked: bool, like_count: u32) -> Self {
        LikeState {
            target_id,
            is_liked,
            like_count,
        }
    }

    /// Build the state from raw attribute values as found on the element.
    ///
    /// A missing liked flag means "not liked". The target id and count are required.
    pub fn from_attrs(
        target_id: Option<&str>,
        is_liked: Option<&str>,
        like_count: Option<&str>,
    ) -> Result<Self, Error> {
        let target_id = target_id.ok_or(Error::MissingAttribute(attr::TARGET.1))?;
        let target_id = TargetId::new(target_id.trim())?;

        let is_liked = match is_liked.map(str::trim) {
            None | Some("") => false,
            Some(flag) => parse_flag(flag)?,
        };

        let like_count = like_count.ok_or(Error::MissingAttribute(attr::LIKE_COUNT.1))?;
        let like_count = like_count
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCount(like_count.to_owned()))?;

        Ok(LikeState::new(target_id, is_liked, like_count))
    }

    /// The action that flips this state.
    pub fn next_action(&self) -> Action {
        if self.is_liked {
            Action::Unlike
        } else {
            Action::Like
        }
    }

    /// Apply an acknowledged action. The count never drops below zero.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Like => {
                self.is_liked = true;
                self.like_count = self.like_count.saturating_add(1);
            }
            Action::Unlike => {
                self.is_liked = false;
                self.like_count = self.like_count.saturating_sub(1);
            }
        }
    }

    /// The liked flag the way server templates write it.
    pub fn flag_attr(&self) -> &'static str {
        if self.is_liked {
            "T"
        } else {
            "F"
        }
    }
}

fn parse_flag(flag: &str) -> Result<bool, Error> {
    match flag {
        "T" | "t" | "true" | "True" | "1" => Ok(true),
        "F" | "f" | "false" | "False" | "0" => Ok(false),
        _ => Err(Error::InvalidFlag(flag.to_owned())),
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use percent_encoding::percent_decode_str;

/// Cross-site request forgery token sent with every toggle request.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Token(String);

impl Token {
    pub fn new<S>(token: S) -> Self
    where
        S: Into<String>,
    {
        Token(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Find the cookie called `name` in a `document.cookie` string and decode it.
    pub fn from_cookie(cookies: &str, name: &str) -> Option<Self> {
        cookies
            .split(';')
            .filter_map(|cookie| cookie.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| Token(percent_decode_str(value).decode_utf8_lossy().into_owned()))
            .filter(|token| !token.0.is_empty())
    }
}

// Tokens end up in logs through `Config`'s `Debug`.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

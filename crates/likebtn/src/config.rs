// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Configuration
//!
//! Everything page-specific is injected through [`Config`] when buttons are bound,
//! rather than read from ambient globals. All fields have defaults matching a
//! stock server setup:
//!
//! ```
//! use likebtn::config::Config;
//! use likebtn::csrf::Token;
//!
//! let config = Config {
//!     csrf_token: Some(Token::new("from-the-template")),
//!     ..Config::default()
//! };
//!
//! assert_eq!(config.class_name, "likebtn");
//! ```
//!
//! With the `serde` feature the same can be loaded from JSON, for example from
//! a `<script type="application/json">` block rendered by the server:
//!
//! ```
//! # #[cfg(feature = "serde")] {
//! use likebtn::config::Config;
//!
//! let config = Config::from_json(r#"{ "route": "/posts/{id}/{action}", "timeout_ms": 0 }"#).unwrap();
//!
//! assert_eq!(config.route.as_str(), "/posts/{id}/{action}");
//! assert_eq!(config.timeout_ms, 0);
//! # }
//! ```
use crate::csrf::Token;
use crate::endpoint::Action;
use crate::state::TargetId;
use crate::Error;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Token to send with every request. When absent, [`start`](crate::runtime::start)
    /// falls back to the `csrf_cookie` cookie.
    pub csrf_token: Option<Token>,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub route: Route,
    /// Class that marks elements as like buttons.
    pub class_name: String,
    /// Class set on a button whose last toggle failed.
    pub failed_class: String,
    /// Request timeout in milliseconds, `0` waits forever.
    pub timeout_ms: u32,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            csrf_token: None,
            csrf_cookie: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            route: Route::default(),
            class_name: "likebtn".into(),
            failed_class: "likebtn-failed".into(),
            timeout_ms: 10_000,
            palette: Palette::default(),
        }
    }
}

impl Config {
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Colors of the glyph, any CSS color value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Palette {
    pub liked: String,
    pub unliked: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            liked: "red".into(),
            unliked: "gray".into(),
        }
    }
}

/// Endpoint path template with `{id}` and `{action}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub struct Route(String);

impl Route {
    const ID: &'static str = "{id}";
    const ACTION: &'static str = "{action}";

    pub fn new<S>(template: S) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let template = template.into();

        if template.contains(Self::ID) && template.contains(Self::ACTION) {
            Ok(Route(template))
        } else {
            Err(Error::InvalidRoute(template))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fill in the placeholders in a single pass, so text inserted for `{id}`
    /// is never scanned for placeholders again.
    pub fn url(&self, target: &TargetId, action: Action) -> String {
        let mut url = String::with_capacity(self.0.len() + target.as_str().len());
        let mut rest = self.0.as_str();

        while let Some(at) = rest.find('{') {
            url.push_str(&rest[..at]);
            rest = &rest[at..];

            if let Some(tail) = rest.strip_prefix(Self::ID) {
                url.push_str(target.as_str());
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(Self::ACTION) {
                url.push_str(action.as_str());
                rest = tail;
            } else {
                url.push('{');
                rest = &rest[1..];
            }
        }

        url.push_str(rest);
        url
    }
}

impl Default for Route {
    fn default() -> Self {
        Route("/tweets/{id}/{action}/".into())
    }
}

impl TryFrom<String> for Route {
    type Error = Error;

    fn try_from(template: String) -> Result<Self, Error> {
        Route::new(template)
    }
}

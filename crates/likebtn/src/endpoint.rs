// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The backend side of a toggle.
//!
//! [`LikeToggle`](crate::toggle::LikeToggle) only needs something implementing
//! [`Endpoint`]. In the browser that is [`Fetch`], which POSTs to the configured
//! [`Route`] with the CSRF token attached.

use std::fmt;
use std::future::Future;

use futures_lite::future;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::AbortController;

use crate::config::{Config, Route};
use crate::csrf::Token;
use crate::state::TargetId;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Like,
    Unlike,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Like => "like",
            Action::Unlike => "unlike",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persists a like or unlike of a target.
///
/// Implementations resolve to `Ok(())` only once the backend has acknowledged
/// the change, any other outcome must leave the button untouched.
pub trait Endpoint {
    fn send(&self, target: &TargetId, action: Action) -> impl Future<Output = Result<(), Error>>;
}

impl<E> Endpoint for std::rc::Rc<E>
where
    E: Endpoint,
{
    fn send(&self, target: &TargetId, action: Action) -> impl Future<Output = Result<(), Error>> {
        (**self).send(target, action)
    }
}

/// [`Endpoint`] backed by the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct Fetch {
    route: Route,
    csrf_header: String,
    token: Token,
    timeout_ms: u32,
}

pub const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

impl Fetch {
    pub fn new(config: &Config, token: Token) -> Self {
        Fetch {
            route: config.route.clone(),
            csrf_header: config.csrf_header.clone(),
            token,
            timeout_ms: config.timeout_ms,
        }
    }

    pub fn url(&self, target: &TargetId, action: Action) -> String {
        self.route.url(target, action)
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> [(&str, &str); 2] {
        [CONTENT_TYPE, (&self.csrf_header, self.token.as_str())]
    }

    async fn post(&self, url: &str) -> Result<(), Error> {
        let abort = AbortController::new().ok();
        let signal = abort.as_ref().map(AbortController::signal);

        let mut request = Request::post(url).abort_signal(signal.as_ref());
        for (key, value) in self.headers() {
            request = request.header(key, value);
        }

        let send = async move {
            match request.send().await {
                Ok(response) if response.ok() => Ok(()),
                Ok(response) => Err(Error::Rejected {
                    status: response.status(),
                }),
                Err(err) => Err(Error::Network(err.to_string())),
            }
        };

        with_timeout(send, self.timeout_ms, abort.as_ref()).await
    }
}

/// Race `send` against a timer, aborting the request when the timer wins.
/// A `timeout_ms` of `0` waits for `send` indefinitely.
async fn with_timeout<F>(
    send: F,
    timeout_ms: u32,
    abort: Option<&AbortController>,
) -> Result<(), Error>
where
    F: Future<Output = Result<(), Error>>,
{
    if timeout_ms == 0 {
        return send.await;
    }

    let timeout = async {
        TimeoutFuture::new(timeout_ms).await;

        if let Some(abort) = abort {
            abort.abort();
        }

        Err(Error::Timeout(timeout_ms))
    };

    future::or(send, timeout).await
}

impl Endpoint for Fetch {
    async fn send(&self, target: &TargetId, action: Action) -> Result<(), Error> {
        let url = self.url(target, action);

        tracing::debug!(%url, %action, "sending toggle");

        self.post(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch() -> Fetch {
        let config = Config {
            route: Route::new("/tweets/{id}/{action}/").unwrap(),
            csrf_header: "X-CSRFToken".into(),
            ..Config::default()
        };

        Fetch::new(&config, Token::new("t0k3n"))
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::Like.to_string(), "like");
        assert_eq!(Action::Unlike.to_string(), "unlike");
    }

    #[test]
    fn url_follows_route() {
        let target = TargetId::new("9").unwrap();

        assert_eq!(fetch().url(&target, Action::Like), "/tweets/9/like/");
        assert_eq!(fetch().url(&target, Action::Unlike), "/tweets/9/unlike/");
    }

    #[test]
    fn headers_carry_token() {
        let fetch = fetch();

        assert_eq!(
            fetch.headers(),
            [
                ("Content-Type", "application/json"),
                ("X-CSRFToken", "t0k3n")
            ]
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    async fn timeout_aborts_the_request() {
        let abort = AbortController::new().unwrap();

        let res = with_timeout(future::pending(), 1, Some(&abort)).await;

        assert!(matches!(res, Err(Error::Timeout(1))));
        assert!(abort.signal().aborted());
    }

    #[wasm_bindgen_test]
    async fn acknowledged_before_timeout() {
        let abort = AbortController::new().unwrap();

        let res = with_timeout(future::ready(Ok(())), 5_000, Some(&abort)).await;

        assert!(res.is_ok());
        assert!(!abort.signal().aborted());
    }
}

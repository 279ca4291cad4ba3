// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing `data-{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("invalid target id {0:?}")]
    InvalidTarget(String),

    #[error("invalid like count {0:?}")]
    InvalidCount(String),

    #[error("invalid liked flag {0:?}, expected one of `T`, `F`, `true`, `false`, `1`, `0`")]
    InvalidFlag(String),

    #[error("route {0:?} must contain both `{{id}}` and `{{action}}`")]
    InvalidRoute(String),

    #[error("no CSRF token configured and no cookie found")]
    MissingToken,

    #[error("endpoint rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("a request for this button is already in flight")]
    Busy,

    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Dom(String),
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # likebtn
//!
//! _Like buttons for server-rendered pages._
//!
//! The server renders plain buttons carrying the state of the resource:
//!
//! ```html
//! <button class="likebtn" data-pk="42" data-is-liked="F" data-like-count="7"></button>
//! ```
//!
//! Once bound, each button shows a heart and the like count (`♡ 7`). Clicking it
//! POSTs to `/tweets/42/like/` (or `/unlike/`) with the CSRF token attached, and
//! only when the server acknowledges does the button flip to `♥ 8`. Failed requests
//! leave the button as it was and mark it with a CSS class; a button is disabled
//! while its request is in flight.
//!
//! ### Starting
//!
//! ```no_run
//! use likebtn::config::Config;
//!
//! likebtn::start!(Config::default());
//! # fn main() {}
//! ```
//!
//! [`start!`] binds every element with the `likebtn` class once the document is ready.
//! Without an explicit [`csrf_token`](config::Config::csrf_token) the token is read from
//! the `csrftoken` cookie.
//!
//! ### Binding by hand
//!
//! [`runtime::bind`] takes the elements explicitly, and the [`LikeToggle`](toggle::LikeToggle)
//! controller underneath it is generic over the [`Endpoint`](endpoint::Endpoint) it talks to
//! and the [`Surface`](surface::Surface) it renders to, so it runs just as well outside a browser.

#[cfg(all(
    target_arch = "wasm32",
    feature = "rlsf",
    not(target_feature = "atomics")
))]
#[global_allocator]
static A: rlsf::SmallGlobalTlsf = rlsf::SmallGlobalTlsf::new();

pub mod config;
pub mod csrf;
pub mod endpoint;
pub mod face;
pub mod runtime;
pub mod state;
pub mod surface;
pub mod toggle;

mod error;

pub use error::Error;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// The prelude module with most commonly used types.
///
/// Intended use is:
/// ```
/// use likebtn::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, Palette, Route};
    pub use crate::csrf::Token;
    pub use crate::endpoint::{Action, Endpoint};
    pub use crate::state::{LikeState, TargetId};
    pub use crate::surface::Surface;
    pub use crate::toggle::LikeToggle;
    pub use crate::Error;
}

/// Crate re-exports for the [`start!`] macro
pub mod reexport {
    pub use wasm_bindgen;
}

/// Emit the Wasm entry point that calls [`runtime::start`] with the given [`Config`](config::Config).
#[macro_export]
macro_rules! start {
    ($config:expr) => {
        use wasm_bindgen::prelude::wasm_bindgen;
        use $crate::reexport::wasm_bindgen;

        #[wasm_bindgen(start)]
        fn likebtn_main() {
            $crate::runtime::start($config);
        }
    };
}

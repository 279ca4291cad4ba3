// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # The like toggle controller
//!
//! A [`LikeToggle`] owns the [`LikeState`] of one button, the [`Endpoint`] used to
//! persist toggles and the [`Surface`] it renders to. Everything runs on the UI
//! thread, so the state lives in a [`RefCell`] and the in-flight flag in a [`Cell`].
//!
//! Toggling is a three step affair:
//!
//! 1. mark the button as pending, refusing any further toggle until done,
//! 2. ask the endpoint to apply the inverse of the current state,
//! 3. on acknowledgment flip the state, store and repaint; otherwise leave it be.
use std::cell::{Cell, RefCell};

use crate::config::Palette;
use crate::endpoint::{Action, Endpoint};
use crate::face::Face;
use crate::state::LikeState;
use crate::surface::Surface;
use crate::Error;

pub struct LikeToggle<E, S> {
    state: RefCell<LikeState>,
    in_flight: Cell<bool>,
    endpoint: E,
    surface: S,
    palette: Palette,
}

impl<E, S> LikeToggle<E, S>
where
    E: Endpoint,
    S: Surface,
{
    pub fn new(state: LikeState, endpoint: E, surface: S, palette: Palette) -> Self {
        LikeToggle {
            state: RefCell::new(state),
            in_flight: Cell::new(false),
            endpoint,
            surface,
            palette,
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> LikeState {
        self.state.borrow().clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Paint the current state on the surface.
    pub fn render(&self) {
        self.surface.paint(&Face::of(&self.state.borrow(), &self.palette));
    }

    /// Send the inverse of the current state to the endpoint and apply it once
    /// acknowledged. Returns the action that was applied.
    ///
    /// Fails with [`Error::Busy`] without contacting the endpoint if a previous
    /// toggle on this button has not completed yet.
    pub async fn toggle(&self) -> Result<Action, Error> {
        if self.in_flight.replace(true) {
            return Err(Error::Busy);
        }

        let _guard = InFlight(self);

        self.surface.set_pending(true);

        let (target, action) = {
            let state = self.state.borrow();
            (state.target_id.clone(), state.next_action())
        };

        match self.endpoint.send(&target, action).await {
            Ok(()) => {
                self.state.borrow_mut().apply(action);
                self.surface.store(&self.state.borrow());
                self.surface.set_failed(false);
                self.render();

                tracing::debug!(%target, %action, "toggle acknowledged");

                Ok(action)
            }
            Err(err) => {
                self.surface.set_failed(true);

                tracing::warn!(%target, %action, "toggle failed: {err}");

                Err(err)
            }
        }
    }
}

/// Clears the in-flight flag and pending marker when the toggle completes or is dropped.
struct InFlight<'a, E, S>(&'a LikeToggle<E, S>)
where
    S: Surface;

impl<E, S> Drop for InFlight<'_, E, S>
where
    S: Surface,
{
    fn drop(&mut self) {
        self.0.surface.set_pending(false);
        self.0.in_flight.set(false);
    }
}

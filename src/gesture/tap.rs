// SPDX-License-Identifier: MPL-2.0
//! Tap classification: single taps versus double taps.
//!
//! A tap is reported by the recognizer once a press/release pair resolves
//! below the movement slop. Whether it is a *single* tap can only be known
//! after the double-tap window has passed without a second tap, so the
//! first tap is held pending and resolved either by a second tap (double)
//! or by a later [`State::poll`] (single).

use crate::config::defaults::{DOUBLE_TAP_SLOP, DOUBLE_TAP_WINDOW};
use iced::Point;
use std::time::Instant;

/// Outcome of registering a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapKind {
    /// The tap was stored; it may still become a double tap.
    Pending,
    /// Second tap within the window and slop: a double tap at this point.
    Double(Point),
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    position: Point,
    at: Instant,
}

/// Tracks pending taps across the double-tap window.
#[derive(Debug, Clone, Default)]
pub struct State {
    pending: Option<PendingTap>,
}

impl State {
    /// Registers a completed tap at `position`.
    pub fn register(&mut self, position: Point, at: Instant) -> TapKind {
        if let Some(pending) = self.pending.take() {
            let within_window = at.duration_since(pending.at) < DOUBLE_TAP_WINDOW;
            let within_slop = distance(position, pending.position) <= DOUBLE_TAP_SLOP;
            if within_window && within_slop {
                // Consumed; a third tap starts a fresh sequence.
                return TapKind::Double(position);
            }
        }
        self.pending = Some(PendingTap { position, at });
        TapKind::Pending
    }

    /// Resolves a pending tap as a single tap once the double-tap window
    /// has expired. Returns the tap position.
    pub fn poll(&mut self, now: Instant) -> Option<Point> {
        let pending = self.pending?;
        if now.duration_since(pending.at) >= DOUBLE_TAP_WINDOW {
            self.pending = None;
            Some(pending.position)
        } else {
            None
        }
    }

    /// Discards any pending tap (a pan or pinch started).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a tap is waiting for the double-tap window to expire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

fn distance(a: Point, b: Point) -> f32 {
    let delta = a - b;
    (delta.x * delta.x + delta.y * delta.y).sqrt()
}

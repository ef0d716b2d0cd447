// SPDX-License-Identifier: MPL-2.0
//! The typed event surface of the component.
//!
//! Every notification a host can react to is a variant of [`Event`], and
//! every registered callback has a named handler type with an explicit
//! signature, so each event's contract is enforced at the boundary instead
//! of being an unconstrained invocable.

use crate::geometry::{LayoutState, Transform};

/// Notifications emitted by the gesture lifecycle and the component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A non-idle period began. Fired once even when gestures overlap.
    InteractionStart,
    /// The last active gesture or animation finished.
    InteractionEnd,
    /// A pan gesture began.
    PanStart,
    /// A pan gesture ended.
    PanEnd,
    /// A pinch gesture began.
    PinchStart,
    /// A pinch gesture ended.
    PinchEnd,
    /// A double tap was detected; the zoom animation is starting.
    DoubleTap,
    /// A tap resolved as a single tap. Carries the current scale.
    SingleTap(f32),
    /// The transform changed. Carries the new value.
    TransformChanged(Transform),
    /// Layout was (re)measured. Carries the new layout snapshot.
    LayoutMeasured(LayoutState),
}

/// Handler invoked on interaction and gesture lifecycle edges.
pub type LifecycleHandler = Box<dyn Fn()>;
/// Handler invoked when a tap resolves as a single tap; receives the
/// current scale.
pub type SingleTapHandler = Box<dyn Fn(f32)>;
/// Handler invoked when the layout is remeasured.
pub type LayoutHandler = Box<dyn Fn(LayoutState)>;

/// Optional callbacks, one named slot per event kind.
///
/// Dispatch is best-effort: a panicking handler is caught and discarded so
/// it cannot interrupt the state machine (see [`dispatch`]).
#[derive(Default)]
pub struct EventHandlers {
    pub on_interaction_start: Option<LifecycleHandler>,
    pub on_interaction_end: Option<LifecycleHandler>,
    pub on_pan_start: Option<LifecycleHandler>,
    pub on_pan_end: Option<LifecycleHandler>,
    pub on_pinch_start: Option<LifecycleHandler>,
    pub on_pinch_end: Option<LifecycleHandler>,
    pub on_single_tap: Option<SingleTapHandler>,
    pub on_layout: Option<LayoutHandler>,
}

impl EventHandlers {
    /// Dispatches one event to its registered handler, if any.
    pub fn dispatch(&self, event: &Event) {
        match event {
            Event::InteractionStart => run(self.on_interaction_start.as_deref()),
            Event::InteractionEnd => run(self.on_interaction_end.as_deref()),
            Event::PanStart => run(self.on_pan_start.as_deref()),
            Event::PanEnd => run(self.on_pan_end.as_deref()),
            Event::PinchStart => run(self.on_pinch_start.as_deref()),
            Event::PinchEnd => run(self.on_pinch_end.as_deref()),
            Event::SingleTap(scale) => {
                if let Some(handler) = self.on_single_tap.as_deref() {
                    isolate(|| handler(*scale));
                }
            }
            Event::LayoutMeasured(layout) => {
                if let Some(handler) = self.on_layout.as_deref() {
                    isolate(|| handler(*layout));
                }
            }
            Event::DoubleTap | Event::TransformChanged(_) => {}
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn set(slot: bool) -> &'static str {
            if slot {
                "set"
            } else {
                "unset"
            }
        }
        f.debug_struct("EventHandlers")
            .field("on_interaction_start", &set(self.on_interaction_start.is_some()))
            .field("on_interaction_end", &set(self.on_interaction_end.is_some()))
            .field("on_pan_start", &set(self.on_pan_start.is_some()))
            .field("on_pan_end", &set(self.on_pan_end.is_some()))
            .field("on_pinch_start", &set(self.on_pinch_start.is_some()))
            .field("on_pinch_end", &set(self.on_pinch_end.is_some()))
            .field("on_single_tap", &set(self.on_single_tap.is_some()))
            .field("on_layout", &set(self.on_layout.is_some()))
            .finish()
    }
}

fn run(handler: Option<&(dyn Fn())>) {
    if let Some(handler) = handler {
        isolate(handler);
    }
}

/// Runs a user callback, swallowing panics so a faulty handler cannot
/// leave the state machine mid-transition.
fn isolate<F: FnOnce()>(callback: F) {
    let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(callback));
}

// SPDX-License-Identifier: MPL-2.0
//! Gesture lifecycle cluster - pan, pinch and double-tap managed together.
//!
//! This cluster groups the gesture sub-states that have strong internal
//! coupling (a double tap drives the same transform a pinch does, and the
//! interaction bracket spans all of them).
//!
//! ## Composition
//!
//! - `pan::State`: pointer-count-gated translation
//! - `pinch::State`: focal-anchored scaling
//! - `tap::State`: single/double tap classification
//! - `ZoomAnimation`: the double-tap zoom animation
//!
//! The lifecycle is `Idle -> Panning -> Idle`, `Idle -> Pinching -> Idle`
//! and `Idle -> DoubleTapAnimating -> Idle`, with `InteractionStart`/
//! `InteractionEnd` bracketing any continuous non-idle period exactly once
//! even when panning and pinching overlap.

pub mod animation;
pub mod pan;
pub mod pinch;
pub mod recognizer;
pub mod tap;

use crate::config::GestureConfig;
use crate::events::Event;
use crate::geometry::Transform;
use animation::ZoomAnimation;
use iced::{Point, Vector};
use std::time::Instant;

/// The gesture lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No gesture or animation is active.
    #[default]
    Idle,
    /// A pan is driving the translation.
    Panning,
    /// A pinch is driving scale and translation.
    Pinching,
    /// A double-tap zoom animation is running.
    DoubleTapAnimating,
}

/// Semantic gesture messages, produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// A drag began with the given pointer count at the pointer centroid.
    DragStarted { pointers: u8, position: Point },
    /// The drag centroid moved.
    DragMoved { pointers: u8, position: Point },
    /// The drag ended (pointer count changed or all pointers lifted).
    DragEnded,
    /// Two pointers are down; pinch geometry is available.
    PinchStarted { focal: Point, distance: f32 },
    /// The pinch geometry changed.
    PinchChanged { focal: Point, distance: f32 },
    /// Fewer than two pointers remain.
    PinchEnded,
    /// A press/release pair resolved below the movement slop.
    Tapped { position: Point, at: Instant },
    /// A discrete zoom step (mouse wheel) at the given focal point.
    ZoomStepped { focal: Point, factor: f32 },
    /// Animation/timing tick.
    Ticked(Instant),
}

/// Gesture cluster state.
///
/// Owns the transform and routes semantic gesture messages into the pan,
/// pinch, tap and animation sub-states.
#[derive(Debug, Clone, Default)]
pub struct State {
    config: GestureConfig,
    transform: Transform,
    pan: pan::State,
    pinch: pinch::State,
    taps: tap::State,
    animation: Option<ZoomAnimation>,
    /// Interaction bracket latch: true during any non-idle period.
    interacting: bool,
}

impl State {
    /// Creates the cluster with the given resolved configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the resolved configuration (options or layout changed).
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// The resolved configuration currently in effect.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.animation.is_some() {
            Phase::DoubleTapAnimating
        } else if self.pinch.is_active() {
            Phase::Pinching
        } else if self.pan.is_active() {
            Phase::Panning
        } else {
            Phase::Idle
        }
    }

    /// Whether the cluster needs animation ticks (an animation is running
    /// or a tap is waiting for the double-tap window).
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.animation.is_some() || self.taps.is_pending()
    }

    /// Handles a gesture message, returning the emitted events in firing
    /// order.
    pub fn handle(&mut self, message: Message) -> Vec<Event> {
        let mut events = Vec::new();

        match message {
            Message::DragStarted { pointers, position } => {
                self.taps.cancel();
                if self.config.is_pan_enabled && self.config.pan_pointers.contains(pointers) {
                    self.animation = None;
                    self.begin_interaction(&mut events);
                    self.pan.start(position, self.transform.translation);
                    events.push(Event::PanStart);
                }
            }
            Message::DragMoved { pointers: _, position } => {
                if let Some(translation) = self.pan.translation_for(position) {
                    self.transform = Transform {
                        scale: self.transform.scale,
                        translation,
                    };
                    events.push(Event::TransformChanged(self.transform));
                }
            }
            Message::DragEnded => {
                if self.pan.is_active() {
                    self.pan.stop();
                    events.push(Event::PanEnd);
                    self.end_interaction_if_idle(&mut events);
                }
            }
            Message::PinchStarted { focal, distance } => {
                self.taps.cancel();
                if self.config.is_pinch_enabled {
                    self.animation = None;
                    self.begin_interaction(&mut events);
                    self.pinch.start(self.transform, focal, distance);
                    events.push(Event::PinchStart);
                }
            }
            Message::PinchChanged { focal, distance } => {
                if let Some(transform) = self.pinch.transform_for(
                    focal,
                    distance,
                    self.config.scale_bounds,
                    self.config.content_center,
                ) {
                    self.transform = transform;
                    events.push(Event::TransformChanged(transform));
                }
            }
            Message::PinchEnded => {
                if self.pinch.is_active() {
                    self.pinch.stop();
                    events.push(Event::PinchEnd);
                    self.end_interaction_if_idle(&mut events);
                }
            }
            Message::Tapped { position, at } => {
                if !self.config.is_double_tap_enabled {
                    events.push(Event::SingleTap(self.transform.scale));
                } else {
                    match self.taps.register(position, at) {
                        tap::TapKind::Pending => {}
                        tap::TapKind::Double(point) => {
                            events.push(Event::DoubleTap);
                            self.begin_interaction(&mut events);
                            let target = self.double_tap_target(point);
                            self.animation =
                                Some(ZoomAnimation::new(self.transform, target, at));
                        }
                    }
                }
            }
            Message::ZoomStepped { focal, factor } => {
                if self.config.is_pinch_enabled {
                    let new_scale = self
                        .config
                        .scale_bounds
                        .clamp(self.transform.scale * factor);
                    self.transform =
                        self.transform
                            .scale_about(new_scale, focal, self.config.content_center);
                    events.push(Event::TransformChanged(self.transform));
                }
            }
            Message::Ticked(now) => {
                if self.taps.poll(now).is_some() {
                    events.push(Event::SingleTap(self.transform.scale));
                }
                if let Some(animation) = self.animation {
                    let (transform, finished) = animation.sample(now);
                    self.transform = transform;
                    events.push(Event::TransformChanged(transform));
                    if finished {
                        self.animation = None;
                        self.end_interaction_if_idle(&mut events);
                    }
                }
            }
        }

        events
    }

    /// Restores the identity transform, discarding any in-flight gesture
    /// state and cancelling a running animation.
    ///
    /// Idempotent: calling it at rest produces no events. An interrupted
    /// gesture fires its `*End` event exactly once.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        self.animation = None;
        self.taps.cancel();
        if self.pan.is_active() {
            self.pan.stop();
            events.push(Event::PanEnd);
        }
        if self.pinch.is_active() {
            self.pinch.stop();
            events.push(Event::PinchEnd);
        }
        if self.transform != Transform::IDENTITY {
            self.transform = Transform::IDENTITY;
            events.push(Event::TransformChanged(self.transform));
        }
        if self.interacting {
            self.interacting = false;
            events.push(Event::InteractionEnd);
        }

        events
    }

    /// Target transform for a double tap at `point`.
    ///
    /// Zoomed out (or in zoom-in mode): animate to the double-tap scale
    /// anchored at the tap point. Already zoomed in: animate back to the
    /// original size.
    fn double_tap_target(&self, point: Point) -> Transform {
        let bounds = self.config.scale_bounds;
        let zoomed_in = self.transform.scale > bounds.min();

        if zoomed_in && !self.config.zoom_in_mode {
            Transform {
                scale: bounds.clamp(1.0),
                translation: Vector::new(0.0, 0.0),
            }
        } else {
            let target = if self.config.zoom_in_mode {
                bounds.clamp(self.transform.scale.max(self.config.double_tap_scale))
            } else {
                self.config.double_tap_scale
            };
            self.transform
                .scale_about(target, point, self.config.content_center)
        }
    }

    fn begin_interaction(&mut self, events: &mut Vec<Event>) {
        if !self.interacting {
            self.interacting = true;
            events.push(Event::InteractionStart);
        }
    }

    fn end_interaction_if_idle(&mut self, events: &mut Vec<Event>) {
        let idle =
            !self.pan.is_active() && !self.pinch.is_active() && self.animation.is_none();
        if self.interacting && idle {
            self.interacting = false;
            events.push(Event::InteractionEnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomOptions;
    use crate::geometry::LayoutState;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::{Rectangle, Size};
    use std::time::Duration;

    fn layout() -> LayoutState {
        LayoutState::measure(
            Rectangle::new(Point::ORIGIN, Size::new(300.0, 300.0)),
            Rectangle::new(Point::new(0.0, 50.0), Size::new(300.0, 200.0)),
        )
    }

    fn state() -> State {
        State::new(GestureConfig::resolve(&ZoomOptions::default(), &layout()))
    }

    fn state_with(options: ZoomOptions) -> State {
        State::new(GestureConfig::resolve(&options, &layout()))
    }

    #[test]
    fn initial_phase_is_idle_at_identity() {
        let state = state();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.transform().is_identity());
    }

    #[test]
    fn two_pointer_drag_starts_and_moves_a_pan() {
        let mut state = state();

        let events = state.handle(Message::DragStarted {
            pointers: 2,
            position: Point::new(100.0, 100.0),
        });
        assert_eq!(events, vec![Event::InteractionStart, Event::PanStart]);
        assert_eq!(state.phase(), Phase::Panning);

        let events = state.handle(Message::DragMoved {
            pointers: 2,
            position: Point::new(120.0, 90.0),
        });
        assert_eq!(events.len(), 1);
        assert_abs_diff_eq!(state.transform().translation.x, 20.0);
        assert_abs_diff_eq!(state.transform().translation.y, -10.0);

        let events = state.handle(Message::DragEnded);
        assert_eq!(events, vec![Event::PanEnd, Event::InteractionEnd]);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn single_pointer_drag_is_gated_by_pointer_bounds() {
        let mut state = state();

        let events = state.handle(Message::DragStarted {
            pointers: 1,
            position: Point::ORIGIN,
        });
        assert!(events.is_empty());
        assert_eq!(state.phase(), Phase::Idle);

        // Movement without an active pan changes nothing.
        let events = state.handle(Message::DragMoved {
            pointers: 1,
            position: Point::new(50.0, 50.0),
        });
        assert!(events.is_empty());
        assert!(state.transform().is_identity());
    }

    #[test]
    fn disabled_pan_never_starts() {
        let mut state = state_with(ZoomOptions {
            is_pan_enabled: Some(false),
            ..ZoomOptions::default()
        });

        let events = state.handle(Message::DragStarted {
            pointers: 2,
            position: Point::ORIGIN,
        });
        assert!(events.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn pinch_lifecycle_brackets_interaction_once() {
        let mut state = state();
        let center = Point::new(150.0, 150.0);

        let events = state.handle(Message::PinchStarted {
            focal: center,
            distance: 100.0,
        });
        assert_eq!(events, vec![Event::InteractionStart, Event::PinchStart]);

        // Overlapping two-finger pan must not re-fire the bracket.
        let events = state.handle(Message::DragStarted {
            pointers: 2,
            position: center,
        });
        assert_eq!(events, vec![Event::PanStart]);
        assert_eq!(state.phase(), Phase::Pinching);

        let events = state.handle(Message::PinchEnded);
        assert_eq!(events, vec![Event::PinchEnd]);

        let events = state.handle(Message::DragEnded);
        assert_eq!(events, vec![Event::PanEnd, Event::InteractionEnd]);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn pinch_overshoot_is_clamped_to_max_scale() {
        let mut state = state();
        let center = Point::new(150.0, 100.0);

        state.handle(Message::PinchStarted {
            focal: center,
            distance: 100.0,
        });
        state.handle(Message::PinchChanged {
            focal: center,
            distance: 700.0,
        });

        assert_abs_diff_eq!(state.scale(), 5.0);
    }

    #[test]
    fn disabled_pinch_never_starts() {
        let mut state = state_with(ZoomOptions {
            is_pinch_enabled: Some(false),
            ..ZoomOptions::default()
        });

        let events = state.handle(Message::PinchStarted {
            focal: Point::ORIGIN,
            distance: 100.0,
        });
        assert!(events.is_empty());
    }

    #[test]
    fn tap_resolves_as_single_after_the_window() {
        let mut state = state();
        let now = Instant::now();

        let events = state.handle(Message::Tapped {
            position: Point::new(10.0, 10.0),
            at: now,
        });
        assert!(events.is_empty());

        let events = state.handle(Message::Ticked(now + Duration::from_millis(400)));
        assert_eq!(events, vec![Event::SingleTap(1.0)]);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn double_tap_animates_to_the_target_scale() {
        let mut state = state();
        let now = Instant::now();
        let point = Point::new(150.0, 100.0);

        state.handle(Message::Tapped { position: point, at: now });
        let events = state.handle(Message::Tapped {
            position: point,
            at: now + Duration::from_millis(100),
        });
        assert_eq!(events[0], Event::DoubleTap);
        assert_eq!(events[1], Event::InteractionStart);
        assert_eq!(state.phase(), Phase::DoubleTapAnimating);

        // Run the animation to completion.
        let events = state.handle(Message::Ticked(now + Duration::from_secs(1)));
        assert!(events.contains(&Event::InteractionEnd));
        assert_eq!(state.phase(), Phase::Idle);
        assert_abs_diff_eq!(state.scale(), 3.0);
    }

    #[test]
    fn double_tap_when_zoomed_returns_to_original_size() {
        let mut state = state();
        let now = Instant::now();
        let point = Point::new(150.0, 100.0);

        // Zoom in via double tap.
        state.handle(Message::Tapped { position: point, at: now });
        state.handle(Message::Tapped {
            position: point,
            at: now + Duration::from_millis(100),
        });
        state.handle(Message::Ticked(now + Duration::from_secs(1)));
        assert_abs_diff_eq!(state.scale(), 3.0);

        // Second double tap toggles back.
        let later = now + Duration::from_secs(2);
        state.handle(Message::Tapped { position: point, at: later });
        state.handle(Message::Tapped {
            position: point,
            at: later + Duration::from_millis(100),
        });
        state.handle(Message::Ticked(later + Duration::from_secs(1)));

        assert_abs_diff_eq!(state.scale(), 1.0);
        assert!(state.transform().is_identity());
    }

    #[test]
    fn zoom_in_mode_keeps_zooming_in() {
        let mut state = state_with(ZoomOptions {
            zoom_in_mode: Some(true),
            ..ZoomOptions::default()
        });
        let now = Instant::now();
        let point = Point::new(150.0, 100.0);

        state.handle(Message::Tapped { position: point, at: now });
        state.handle(Message::Tapped {
            position: point,
            at: now + Duration::from_millis(100),
        });
        state.handle(Message::Ticked(now + Duration::from_secs(1)));
        assert_abs_diff_eq!(state.scale(), 3.0);

        let later = now + Duration::from_secs(2);
        state.handle(Message::Tapped { position: point, at: later });
        state.handle(Message::Tapped {
            position: point,
            at: later + Duration::from_millis(100),
        });
        state.handle(Message::Ticked(later + Duration::from_secs(1)));

        // Still at the double-tap scale, never back at identity.
        assert_abs_diff_eq!(state.scale(), 3.0);
    }

    #[test]
    fn disabled_double_tap_reports_every_tap_as_single() {
        let mut state = state_with(ZoomOptions {
            is_double_tap_enabled: Some(false),
            ..ZoomOptions::default()
        });
        let now = Instant::now();

        let events = state.handle(Message::Tapped {
            position: Point::ORIGIN,
            at: now,
        });
        assert_eq!(events, vec![Event::SingleTap(1.0)]);
    }

    #[test]
    fn wheel_zoom_steps_are_clamped() {
        let mut state = state();
        let focal = Point::new(150.0, 100.0);

        for _ in 0..100 {
            state.handle(Message::ZoomStepped { focal, factor: 1.5 });
        }
        assert_abs_diff_eq!(state.scale(), 5.0);

        for _ in 0..100 {
            state.handle(Message::ZoomStepped { focal, factor: 0.5 });
        }
        assert_abs_diff_eq!(state.scale(), 1.0);
    }

    #[test]
    fn reset_is_idempotent_from_idle() {
        let mut state = state();

        assert!(state.reset().is_empty());
        assert!(state.reset().is_empty());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.transform().is_identity());
    }

    #[test]
    fn reset_mid_pan_ends_the_gesture_exactly_once() {
        let mut state = state();

        state.handle(Message::DragStarted {
            pointers: 2,
            position: Point::new(100.0, 100.0),
        });
        state.handle(Message::DragMoved {
            pointers: 2,
            position: Point::new(150.0, 100.0),
        });

        let events = state.reset();
        assert_eq!(
            events,
            vec![
                Event::PanEnd,
                Event::TransformChanged(Transform::IDENTITY),
                Event::InteractionEnd,
            ]
        );
        assert_eq!(state.phase(), Phase::Idle);

        // The pointer eventually lifts; no duplicate PanEnd may fire.
        let events = state.handle(Message::DragEnded);
        assert!(events.is_empty());
    }

    #[test]
    fn reset_cancels_a_running_animation() {
        let mut state = state();
        let now = Instant::now();
        let point = Point::new(150.0, 100.0);

        state.handle(Message::Tapped { position: point, at: now });
        state.handle(Message::Tapped {
            position: point,
            at: now + Duration::from_millis(100),
        });
        assert_eq!(state.phase(), Phase::DoubleTapAnimating);

        let events = state.reset();
        assert!(events.contains(&Event::InteractionEnd));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.transform().is_identity());

        // A later tick must not resurrect the animation.
        let events = state.handle(Message::Ticked(now + Duration::from_secs(1)));
        assert!(events.is_empty());
        assert!(state.transform().is_identity());
    }
}

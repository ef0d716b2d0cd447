// SPDX-License-Identifier: MPL-2.0
//! Pointer tracking: raw runtime events to semantic gesture messages.
//!
//! The recognizer owns the set of active pointers (touch fingers plus the
//! left mouse button acting as a pointer) and translates the raw event
//! stream into the [`Message`](super::Message) values the gesture cluster
//! consumes: drags with pointer counts, pinch geometry, taps, and wheel
//! zoom steps. All positions it reports are container-local.

use crate::config::defaults::{TAP_MAX_DURATION, TOUCH_SLOP, WHEEL_ZOOM_FACTOR};
use crate::gesture::Message;
use iced::{mouse, touch, Event, Point, Rectangle, Vector};
use std::time::Instant;

/// A pointer identity: a touch finger or the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerId {
    Mouse,
    Touch(touch::Finger),
}

/// Tracking for a press that may still resolve as a tap.
#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    at: Instant,
}

/// Translates raw Iced events into semantic gesture messages.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    /// Active pointers with container-local positions, in press order.
    pointers: Vec<(PointerId, Point)>,
    /// Last known cursor position in window coordinates.
    cursor: Option<Point>,
    /// Single-pointer press that may still become a tap.
    press: Option<Press>,
    /// Whether a semantic drag has been reported.
    dragging: bool,
    /// Whether semantic pinch geometry has been reported.
    pinching: bool,
}

impl Recognizer {
    /// Processes one raw event against the container bounds, producing
    /// zero or more gesture messages. `now` stamps tap timing.
    pub fn process(
        &mut self,
        event: &Event,
        container: Rectangle,
        now: Instant,
    ) -> Vec<Message> {
        let mut out = Vec::new();

        match event {
            Event::Touch(touch_event) => match *touch_event {
                touch::Event::FingerPressed { id, position } => {
                    if container.contains(position) {
                        self.pointer_down(
                            PointerId::Touch(id),
                            to_local(position, container),
                            now,
                            &mut out,
                        );
                    }
                }
                touch::Event::FingerMoved { id, position } => {
                    self.pointer_move(
                        PointerId::Touch(id),
                        to_local(position, container),
                        &mut out,
                    );
                }
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. } => {
                    self.pointer_up(PointerId::Touch(id), now, &mut out);
                }
            },
            Event::Mouse(mouse_event) => match *mouse_event {
                mouse::Event::CursorMoved { position } => {
                    self.cursor = Some(position);
                    if self.is_down(PointerId::Mouse) {
                        self.pointer_move(
                            PointerId::Mouse,
                            to_local(position, container),
                            &mut out,
                        );
                    }
                }
                mouse::Event::ButtonPressed(mouse::Button::Left) => {
                    if let Some(cursor) = self.cursor {
                        if container.contains(cursor) {
                            self.pointer_down(
                                PointerId::Mouse,
                                to_local(cursor, container),
                                now,
                                &mut out,
                            );
                        }
                    }
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    self.pointer_up(PointerId::Mouse, now, &mut out);
                }
                mouse::Event::WheelScrolled { delta } => {
                    if let Some(cursor) = self.cursor {
                        if container.contains(cursor) {
                            let vertical = match delta {
                                mouse::ScrollDelta::Lines { y, .. } => y,
                                mouse::ScrollDelta::Pixels { y, .. } => y,
                            };
                            if vertical != 0.0 {
                                let factor = if vertical > 0.0 {
                                    WHEEL_ZOOM_FACTOR
                                } else {
                                    1.0 / WHEEL_ZOOM_FACTOR
                                };
                                out.push(Message::ZoomStepped {
                                    focal: to_local(cursor, container),
                                    factor,
                                });
                            }
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }

        out
    }

    /// Number of active pointers.
    #[must_use]
    pub fn pointer_count(&self) -> u8 {
        self.pointers.len().min(u8::MAX as usize) as u8
    }

    fn is_down(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|(pointer, _)| *pointer == id)
    }

    fn pointer_down(
        &mut self,
        id: PointerId,
        position: Point,
        now: Instant,
        out: &mut Vec<Message>,
    ) {
        if let Some(entry) = self.pointers.iter_mut().find(|(pointer, _)| *pointer == id) {
            entry.1 = position;
        } else {
            self.pointers.push((id, position));
        }

        let count = self.pointer_count();
        if count == 1 {
            // A lone press is a tap candidate until it moves past the slop.
            self.press = Some(Press {
                origin: position,
                at: now,
            });
            return;
        }

        // Multi-touch: no tap, and the drag restarts with the new count.
        // The pinch is reported before the old drag ends so a continuous
        // interaction never looks idle in between.
        self.press = None;
        if count >= 2 && !self.pinching {
            if let Some((focal, distance)) = self.two_pointer_geometry() {
                self.pinching = true;
                out.push(Message::PinchStarted { focal, distance });
            }
        }
        if self.dragging {
            self.dragging = false;
            out.push(Message::DragEnded);
        }
        self.dragging = true;
        out.push(Message::DragStarted {
            pointers: count,
            position: self.centroid(),
        });
    }

    fn pointer_move(&mut self, id: PointerId, position: Point, out: &mut Vec<Message>) {
        let Some(entry) = self.pointers.iter_mut().find(|(pointer, _)| *pointer == id) else {
            return;
        };
        entry.1 = position;

        let count = self.pointer_count();
        if count == 1 {
            if let Some(press) = self.press {
                if distance(position, press.origin) > TOUCH_SLOP {
                    // The press became a drag.
                    self.press = None;
                    self.dragging = true;
                    out.push(Message::DragStarted {
                        pointers: 1,
                        position: press.origin,
                    });
                    out.push(Message::DragMoved {
                        pointers: 1,
                        position,
                    });
                }
            } else if self.dragging {
                out.push(Message::DragMoved {
                    pointers: 1,
                    position,
                });
            }
            return;
        }

        if self.dragging {
            out.push(Message::DragMoved {
                pointers: count,
                position: self.centroid(),
            });
        }
        if self.pinching {
            if let Some((focal, distance)) = self.two_pointer_geometry() {
                out.push(Message::PinchChanged { focal, distance });
            }
        }
    }

    fn pointer_up(&mut self, id: PointerId, now: Instant, out: &mut Vec<Message>) {
        let before = self.pointers.len();
        self.pointers.retain(|(pointer, _)| *pointer != id);
        if self.pointers.len() == before {
            return;
        }

        let count = self.pointer_count();
        if self.pinching && count < 2 {
            self.pinching = false;
            out.push(Message::PinchEnded);
        }
        if self.dragging {
            self.dragging = false;
            out.push(Message::DragEnded);
            if count >= 1 {
                // Continue as a drag with the remaining pointers.
                self.dragging = true;
                out.push(Message::DragStarted {
                    pointers: count,
                    position: self.centroid(),
                });
            }
        }

        if count == 0 {
            if let Some(press) = self.press.take() {
                if now.duration_since(press.at) <= TAP_MAX_DURATION {
                    out.push(Message::Tapped {
                        position: press.origin,
                        at: now,
                    });
                }
            }
        }
    }

    /// Average position of all active pointers.
    fn centroid(&self) -> Point {
        let count = self.pointers.len().max(1) as f32;
        let sum = self
            .pointers
            .iter()
            .fold(Vector::new(0.0, 0.0), |acc, (_, position)| {
                acc + Vector::new(position.x, position.y)
            });
        Point::new(sum.x / count, sum.y / count)
    }

    /// Midpoint and distance of the first two pointers.
    fn two_pointer_geometry(&self) -> Option<(Point, f32)> {
        let (_, a) = self.pointers.first()?;
        let (_, b) = self.pointers.get(1)?;
        let focal = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Some((focal, distance(*a, *b)))
    }
}

fn to_local(position: Point, container: Rectangle) -> Point {
    Point::new(position.x - container.x, position.y - container.y)
}

fn distance(a: Point, b: Point) -> f32 {
    let delta = a - b;
    (delta.x * delta.x + delta.y * delta.y).sqrt()
}

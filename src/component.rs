// SPDX-License-Identifier: MPL-2.0
//! The embeddable pan/zoom image component.
//!
//! Hosts own a [`State`], route [`Message`] values into [`State::update`],
//! render with [`State::view`] and wire [`State::subscription`]. `update`
//! returns the follow-up [`Task`] plus the gesture events emitted by the
//! message, in firing order; registered [`EventHandlers`] receive the same
//! events before `update` returns.

use crate::config::defaults::ANIMATION_FRAME_INTERVAL;
use crate::config::{GestureConfig, ZoomOptions};
use crate::error::Error;
use crate::events::{Event as ZoomEvent, EventHandlers};
use crate::gesture::{self, recognizer::Recognizer, Phase};
use crate::geometry::{LayoutState, Transform};
use crate::media::{self, ImageData, ImageSource};
use iced::widget::{canvas, container, text};
use iced::{event, Element, Length, Point, Rectangle, Size, Subscription, Task};
use std::time::Instant;

/// Messages consumed by the component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A raw runtime event (mouse or touch) to feed the recognizer.
    RawEvent(iced::Event),
    /// The container holding the component was (re)measured.
    ContainerResized(Rectangle),
    /// Start loading an image.
    Load(ImageSource),
    /// An image load finished.
    ImageLoaded(Result<ImageData, Error>),
    /// Animation/timing tick.
    Tick(Instant),
    /// Imperative reset, as a message.
    Reset,
    /// The zoom options changed.
    OptionsChanged(ZoomOptions),
}

/// Pan/zoom image component state.
///
/// Created once per mounted instance; lives for the component's lifetime.
#[derive(Debug)]
pub struct State {
    options: ZoomOptions,
    image: Option<ImageData>,
    error: Option<Error>,
    loading: bool,
    container: Option<Rectangle>,
    layout: LayoutState,
    gestures: gesture::State,
    recognizer: Recognizer,
    handlers: EventHandlers,
}

impl State {
    /// Creates the component with the given options and no image.
    #[must_use]
    pub fn new(options: ZoomOptions) -> Self {
        let gestures = gesture::State::new(GestureConfig::resolve(
            &options,
            &LayoutState::UNMEASURED,
        ));
        Self {
            options,
            image: None,
            error: None,
            loading: false,
            container: None,
            layout: LayoutState::UNMEASURED,
            gestures,
            recognizer: Recognizer::default(),
            handlers: EventHandlers::default(),
        }
    }

    /// Starts loading an image, returning the task that completes with
    /// [`Message::ImageLoaded`].
    pub fn load(&mut self, source: ImageSource) -> Task<Message> {
        self.loading = true;
        self.error = None;
        Task::perform(media::load(source), Message::ImageLoaded)
    }

    /// Registers the event callbacks.
    pub fn set_handlers(&mut self, handlers: EventHandlers) {
        self.handlers = handlers;
    }

    /// Handles a component message.
    ///
    /// Returns the follow-up task plus the events the message produced.
    pub fn update(&mut self, message: Message) -> (Task<Message>, Vec<ZoomEvent>) {
        match message {
            Message::RawEvent(event) => {
                let Some(container) = self.container else {
                    return (Task::none(), Vec::new());
                };
                let mut events = Vec::new();
                for gesture_message in
                    self.recognizer.process(&event, container, Instant::now())
                {
                    events.extend(self.gestures.handle(gesture_message));
                }
                self.dispatch(&events);
                (Task::none(), events)
            }
            Message::ContainerResized(bounds) => {
                self.container = Some(bounds);
                let events = self.remeasure();
                self.dispatch(&events);
                (Task::none(), events)
            }
            Message::Load(source) => (self.load(source), Vec::new()),
            Message::ImageLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(image) => {
                        self.image = Some(image);
                        self.error = None;
                    }
                    Err(error) => {
                        self.image = None;
                        self.error = Some(error);
                    }
                }
                let events = self.remeasure();
                self.dispatch(&events);
                (Task::none(), events)
            }
            Message::Tick(now) => {
                let events = self.gestures.handle(gesture::Message::Ticked(now));
                self.dispatch(&events);
                (Task::none(), events)
            }
            Message::Reset => {
                let events = self.reset();
                (Task::none(), events)
            }
            Message::OptionsChanged(options) => {
                self.options = options;
                self.gestures
                    .set_config(GestureConfig::resolve(&self.options, &self.layout));
                (Task::none(), Vec::new())
            }
        }
    }

    /// Restores scale 1 and translation (0, 0), discarding any in-flight
    /// gesture and cancelling a scheduled animation synchronously.
    ///
    /// Safe to call at any point, including mid-gesture; idempotent at
    /// rest.
    pub fn reset(&mut self) -> Vec<ZoomEvent> {
        let events = self.gestures.reset();
        self.dispatch(&events);
        events
    }

    /// Renders the component.
    pub fn view(&self) -> Element<'_, Message> {
        match &self.image {
            Some(image) => canvas(ImagePane {
                image,
                layout: self.layout,
                transform: self.gestures.transform(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            None => {
                let status = match (&self.error, self.loading) {
                    (Some(error), _) => text(format!("Failed to load image: {error}")),
                    (None, true) => text("Loading..."),
                    (None, false) => text("No image loaded"),
                };
                container(status).center(Length::Fill).into()
            }
        }
    }

    /// Event and animation subscriptions for the component.
    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(|event, _status, _window| match &event {
            iced::Event::Mouse(_) | iced::Event::Touch(_) => Some(Message::RawEvent(event)),
            _ => None,
        });

        if self.gestures.needs_ticks() {
            Subscription::batch([
                events,
                iced::time::every(ANIMATION_FRAME_INTERVAL).map(Message::Tick),
            ])
        } else {
            events
        }
    }

    /// The current gesture phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.gestures.phase()
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.gestures.transform()
    }

    /// The current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.gestures.scale()
    }

    /// The latest layout snapshot.
    #[must_use]
    pub fn layout(&self) -> LayoutState {
        self.layout
    }

    /// The options currently in effect.
    #[must_use]
    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    /// The loaded image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    /// The last load error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Whether an image load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Recomputes the layout from the container and image geometry.
    ///
    /// The whole layout record is replaced in one step and the gesture
    /// configuration re-resolved, so gesture math never observes a
    /// half-updated snapshot.
    fn remeasure(&mut self) -> Vec<ZoomEvent> {
        let layout = match (self.container, &self.image) {
            (Some(container), Some(image)) => {
                LayoutState::measure(container, fit_rect(container, image.size()))
            }
            _ => LayoutState::UNMEASURED,
        };

        if layout == self.layout {
            return Vec::new();
        }
        self.layout = layout;
        self.gestures
            .set_config(GestureConfig::resolve(&self.options, &self.layout));
        vec![ZoomEvent::LayoutMeasured(layout)]
    }

    fn dispatch(&self, events: &[ZoomEvent]) {
        for event in events {
            self.handlers.dispatch(event);
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(ZoomOptions::default())
    }
}

/// Contain-fits `size` inside `container`, centered.
fn fit_rect(container: Rectangle, size: Size) -> Rectangle {
    if size.width <= 0.0 || size.height <= 0.0 {
        return Rectangle::new(container.position(), Size::ZERO);
    }

    let scale = (container.width / size.width).min(container.height / size.height);
    let fitted = Size::new(size.width * scale, size.height * scale);
    Rectangle::new(
        Point::new(
            container.x + (container.width - fitted.width) / 2.0,
            container.y + (container.height - fitted.height) / 2.0,
        ),
        fitted,
    )
}

/// Canvas program drawing the image through the current transform.
struct ImagePane<'a> {
    image: &'a ImageData,
    layout: LayoutState,
    transform: Transform,
}

impl<Message> canvas::Program<Message> for ImagePane<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if self.layout.is_measured() {
            let destination = self.transform.apply_to(&self.layout);
            let image = iced::advanced::image::Image {
                handle: self.image.handle.clone(),
                filter_method: iced::advanced::image::FilterMethod::Linear,
                rotation: iced::Radians(0.0),
                opacity: 1.0,
                snap: true,
                border_radius: iced::border::Radius::default(),
            };
            frame.draw_image(destination, image);
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::{mouse, touch};
    use std::time::Duration;

    fn container_bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(300.0, 300.0))
    }

    fn loaded_state() -> State {
        let mut state = State::new(ZoomOptions::default());
        let image = ImageData::from_rgba(3, 2, vec![255; 24]).expect("valid image");
        let (_, _) = state.update(Message::ContainerResized(container_bounds()));
        let (_, events) = state.update(Message::ImageLoaded(Ok(image)));
        assert!(!events.is_empty());
        state
    }

    fn press(id: u64, x: f32, y: f32) -> Message {
        Message::RawEvent(iced::Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(id),
            position: Point::new(x, y),
        }))
    }

    fn move_finger(id: u64, x: f32, y: f32) -> Message {
        Message::RawEvent(iced::Event::Touch(touch::Event::FingerMoved {
            id: touch::Finger(id),
            position: Point::new(x, y),
        }))
    }

    fn lift(id: u64, x: f32, y: f32) -> Message {
        Message::RawEvent(iced::Event::Touch(touch::Event::FingerLifted {
            id: touch::Finger(id),
            position: Point::new(x, y),
        }))
    }

    #[test]
    fn measurement_produces_a_contain_fitted_layout() {
        let state = loaded_state();
        let layout = state.layout();

        // A 3:2 image contain-fitted in a 300x300 container.
        assert_abs_diff_eq!(layout.width, 300.0);
        assert_abs_diff_eq!(layout.height, 200.0);
        assert_abs_diff_eq!(layout.x, 0.0);
        assert_abs_diff_eq!(layout.y, 50.0);
        assert_abs_diff_eq!(layout.center().x, 150.0);
        assert_abs_diff_eq!(layout.center().y, 150.0);
    }

    #[test]
    fn raw_events_before_measurement_are_ignored() {
        let mut state = State::new(ZoomOptions::default());
        let (_, events) = state.update(press(1, 100.0, 100.0));
        assert!(events.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn failed_load_clears_the_layout() {
        let mut state = loaded_state();
        let (_, events) =
            state.update(Message::ImageLoaded(Err(Error::Io("gone".to_string()))));

        assert_eq!(
            events,
            vec![ZoomEvent::LayoutMeasured(LayoutState::UNMEASURED)]
        );
        assert!(state.error().is_some());
        assert!(state.image().is_none());
    }

    #[test]
    fn two_finger_spread_zooms_the_image() {
        let mut state = loaded_state();

        state.update(press(1, 100.0, 150.0));
        state.update(press(2, 200.0, 150.0));
        state.update(move_finger(1, 50.0, 150.0));
        state.update(move_finger(2, 250.0, 150.0));

        assert_abs_diff_eq!(state.scale(), 2.0);
        assert_eq!(state.phase(), Phase::Pinching);

        state.update(lift(1, 50.0, 150.0));
        state.update(lift(2, 250.0, 150.0));
        assert_eq!(state.phase(), Phase::Idle);
        assert_abs_diff_eq!(state.scale(), 2.0);
    }

    #[test]
    fn single_finger_tap_reports_current_scale() {
        let mut state = loaded_state();

        state.update(press(1, 150.0, 150.0));
        let (_, events) = state.update(lift(1, 150.0, 150.0));
        // The tap is pending until the double-tap window passes.
        assert!(events.is_empty());

        let (_, events) =
            state.update(Message::Tick(Instant::now() + Duration::from_millis(400)));
        assert_eq!(events, vec![ZoomEvent::SingleTap(1.0)]);
    }

    #[test]
    fn single_finger_drag_does_not_pan_with_default_pointer_bounds() {
        let mut state = loaded_state();

        state.update(press(1, 100.0, 150.0));
        state.update(move_finger(1, 160.0, 150.0));

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.transform().is_identity());
    }

    #[test]
    fn reset_message_restores_identity() {
        let mut state = loaded_state();

        state.update(press(1, 100.0, 150.0));
        state.update(press(2, 200.0, 150.0));
        state.update(move_finger(1, 50.0, 150.0));
        assert!(state.scale() > 1.0);

        let (_, events) = state.update(Message::Reset);
        assert!(events.contains(&ZoomEvent::PinchEnd));
        assert!(events.contains(&ZoomEvent::InteractionEnd));
        assert!(state.transform().is_identity());
        assert_eq!(state.phase(), Phase::Idle);

        // Idempotent: a second reset observes nothing.
        let (_, events) = state.update(Message::Reset);
        assert!(events.is_empty());
    }

    #[test]
    fn wheel_zoom_works_through_raw_events() {
        let mut state = loaded_state();

        state.update(Message::RawEvent(iced::Event::Mouse(
            mouse::Event::CursorMoved {
                position: Point::new(150.0, 150.0),
            },
        )));
        state.update(Message::RawEvent(iced::Event::Mouse(
            mouse::Event::WheelScrolled {
                delta: mouse::ScrollDelta::Lines { x: 0.0, y: 1.0 },
            },
        )));

        assert!(state.scale() > 1.0);
    }

    #[test]
    fn options_change_reconfigures_gestures() {
        let mut state = loaded_state();
        state.update(Message::OptionsChanged(ZoomOptions {
            max_scale: Some(2.0),
            ..ZoomOptions::default()
        }));

        state.update(press(1, 100.0, 150.0));
        state.update(press(2, 200.0, 150.0));
        state.update(move_finger(1, 0.0, 150.0));
        state.update(move_finger(2, 300.0, 150.0));

        assert_abs_diff_eq!(state.scale(), 2.0);
    }

    #[test]
    fn fit_rect_handles_degenerate_sizes() {
        let fitted = fit_rect(container_bounds(), Size::ZERO);
        assert_eq!(fitted.size(), Size::ZERO);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Demo host application for the pan/zoom image component.
//!
//! Run with an image path or URI:
//!
//! ```text
//! cargo run --example viewer -- path/to/image.jpg
//! ```

use iced::widget::{button, container, text, Column, Row};
use iced::{event, window, Alignment, Element, Length, Point, Rectangle, Size, Subscription, Task};
use iced_image_zoom::{component, config, Event, EventHandlers, ImageSource};

/// Vertical space reserved for the toolbar above the zoom view.
const TOOLBAR_HEIGHT: f32 = 48.0;

fn main() -> iced::Result {
    iced::application(Demo::new, Demo::update, Demo::view)
        .title("iced_image_zoom demo")
        .subscription(Demo::subscription)
        .window_size(Size::new(800.0, 600.0))
        .run()
}

struct Demo {
    zoom: component::State,
    window: Size,
    last_event: Option<Event>,
}

#[derive(Debug, Clone)]
enum Message {
    Zoom(component::Message),
    WindowResized(Size),
    Reset,
}

impl Demo {
    fn new() -> (Self, Task<Message>) {
        // Gesture presets persist in the user's config directory.
        let options = config::load().unwrap_or_default();
        let mut zoom = component::State::new(options);
        zoom.set_handlers(EventHandlers {
            on_single_tap: Some(Box::new(|scale| eprintln!("single tap at scale {scale:.2}"))),
            on_layout: Some(Box::new(|layout| {
                eprintln!("measured {}x{}", layout.width, layout.height);
            })),
            ..EventHandlers::default()
        });

        let task = match std::env::args().nth(1) {
            Some(path) => zoom.load(ImageSource::from(path.as_str())).map(Message::Zoom),
            None => Task::none(),
        };

        let mut demo = Self {
            zoom,
            window: Size::new(800.0, 600.0),
            last_event: None,
        };
        demo.sync_container();
        (demo, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Zoom(message) => {
                let (task, events) = self.zoom.update(message);
                if let Some(event) = events.last() {
                    self.last_event = Some(*event);
                }
                task.map(Message::Zoom)
            }
            Message::WindowResized(size) => {
                self.window = size;
                self.sync_container();
                Task::none()
            }
            Message::Reset => {
                self.zoom.reset();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let status = match self.last_event {
            Some(event) => format!("{event:?}"),
            None => String::from("-"),
        };

        let toolbar = Row::new()
            .push(button("Reset").on_press(Message::Reset))
            .push(text(format!("scale {:.2}", self.zoom.scale())))
            .push(text(status))
            .spacing(12)
            .padding(8)
            .align_y(Alignment::Center);

        Column::new()
            .push(container(toolbar).height(Length::Fixed(TOOLBAR_HEIGHT)))
            .push(
                container(self.zoom.view().map(Message::Zoom))
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let resizes = event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            _ => None,
        });

        Subscription::batch([self.zoom.subscription().map(Message::Zoom), resizes])
    }

    /// Reports the area below the toolbar as the component's container.
    fn sync_container(&mut self) {
        let bounds = Rectangle::new(
            Point::new(0.0, TOOLBAR_HEIGHT),
            Size::new(
                self.window.width,
                (self.window.height - TOOLBAR_HEIGHT).max(0.0),
            ),
        );
        let _ = self
            .zoom
            .update(component::Message::ContainerResized(bounds));
    }
}

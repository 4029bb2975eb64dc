// SPDX-License-Identifier: MPL-2.0
//! The main update loop: message dispatch and cross-component policy.

use super::{viewer_pane_bounds, App, Message};
use crate::{gallery, viewer};
use iced::{event, touch, window, Task};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(msg) => self.viewer.update(msg).map(Message::Viewer),
            Message::Gallery(msg) => self.apply_gallery(msg),
            Message::Tick(_) => {
                // One frame for every animation: camera damping in the
                // viewer, fade progress in the preview overlay.
                let viewer_task = self
                    .viewer
                    .update(viewer::Message::Tick)
                    .map(Message::Viewer);
                let gallery_task = self.apply_gallery(gallery::Message::Tick);
                Task::batch([viewer_task, gallery_task])
            }
            Message::RawEvent(event) => self.handle_raw_event(event),
        }
    }

    /// Runs a gallery update and turns its effect into viewer work.
    fn apply_gallery(&mut self, message: gallery::Message) -> Task<Message> {
        let (effect, task) = self.gallery.update(message);
        let task = task.map(Message::Gallery);

        match effect {
            gallery::Effect::None => task,
            gallery::Effect::LoadModel(path) => Task::batch([
                task,
                Task::done(Message::Viewer(viewer::Message::LoadModel(path))),
            ]),
        }
    }

    fn handle_raw_event(&mut self, event: event::Event) -> Task<Message> {
        match &event {
            event::Event::Window(window::Event::Resized(size)) => {
                self.window_size = *size;
                self.viewer.set_bounds(viewer_pane_bounds(*size));
                self.gallery.set_window_size(*size);
                Task::none()
            }
            // Lifting a finger starts the preview fade-out, since touch
            // devices never deliver a matching pointer-exit.
            event::Event::Touch(touch::Event::FingerLifted { .. }) => {
                self.apply_gallery(gallery::Message::TouchEnded)
            }
            event::Event::Mouse(_) => self
                .viewer
                .update(viewer::Message::RawEvent(event))
                .map(Message::Viewer),
            _ => Task::none(),
        }
    }
}

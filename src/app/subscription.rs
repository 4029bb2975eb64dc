// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Two sources feed the update loop: native runtime events (mouse, touch,
//! window resizes) and a fixed-rate tick. The tick runs unconditionally so
//! camera damping and the preview fade can never stall waiting for a
//! subscription to restart mid-animation.

use super::{App, Message};
use crate::config::FRAME_INTERVAL_MS;
use iced::{event, time, window, Subscription};
use std::time::Duration;

impl App {
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([native_events(), animation_tick()])
    }
}

/// Routes the raw events the components care about.
///
/// Mouse events are forwarded even when a widget captured them, so a drag
/// that started inside the viewer pane keeps orbiting while the pointer
/// passes over other widgets.
fn native_events() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match &event {
        event::Event::Mouse(_) | event::Event::Touch(_) => Some(Message::RawEvent(event)),
        event::Event::Window(window::Event::Resized(_)) => Some(Message::RawEvent(event)),
        _ => None,
    })
}

fn animation_tick() -> Subscription<Message> {
    time::every(Duration::from_millis(FRAME_INTERVAL_MS)).map(Message::Tick)
}

// SPDX-License-Identifier: MPL-2.0
//! Top-level message and startup flags.

use crate::{gallery, viewer};
use iced::event;
use std::path::PathBuf;
use std::time::Instant;

/// Startup options resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Directory to scan for models, overriding the configured one.
    pub models_dir: Option<PathBuf>,
    /// Directory holding `settings.toml`, overriding the platform default.
    pub config_dir: Option<PathBuf>,
}

/// All messages flowing through the application update loop.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(viewer::Message),
    Gallery(gallery::Message),
    /// Shared animation frame, fanned out to camera damping and preview fade.
    Tick(Instant),
    /// Native event from the runtime, routed in `App::update`.
    RawEvent(event::Event),
}

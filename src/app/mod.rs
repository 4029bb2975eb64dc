// SPDX-License-Identifier: MPL-2.0
//! Application root: wires the viewer and the gallery together.
//!
//! The `App` struct owns both components and the policy between them: a
//! gallery click becomes a viewer load, window resizes reshape the viewer
//! pane, and one shared tick drives every animation. Keeping that policy in
//! one place makes the user-facing behavior easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::ModelCatalog;
use crate::config::{self, Config, GALLERY_HEIGHT};
use crate::gallery;
use crate::gallery::preview::FadeDuration;
use crate::viewer;
use iced::{window, Point, Rectangle, Size, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 768;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Root application state bridging the rendering pane, the thumbnail
/// gallery, and persisted preferences.
pub struct App {
    viewer: viewer::State,
    gallery: gallery::State,
    window_size: Size,
    /// Set when the models directory could not be read at startup.
    startup_error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("models", &self.gallery.catalog().len())
            .field("viewer_has_model", &self.viewer.has_model())
            .finish()
    }
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.as_ref().and_then(|p| p.to_str());
        let config = config::load(config_dir).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            Config::default()
        });

        let models_dir = flags
            .models_dir
            .clone()
            .or_else(|| config.models_dir.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("models"));

        let (catalog, startup_error) = match ModelCatalog::scan_directory(&models_dir) {
            Ok(catalog) => (catalog, None),
            Err(err) => {
                tracing::error!(dir = %models_dir.display(), error = %err, "cannot read models directory");
                (
                    ModelCatalog::new(),
                    Some(format!(
                        "Cannot read models directory {}: {err}",
                        models_dir.display()
                    )),
                )
            }
        };

        let window_size = Size::new(
            WINDOW_DEFAULT_WIDTH as f32,
            WINDOW_DEFAULT_HEIGHT as f32,
        );
        let fade = match config.preview_fade_ms {
            Some(ms) => FadeDuration::new(ms),
            None => FadeDuration::default(),
        };
        let background = config::parse_background_color(config.background_color.as_deref());

        let mut viewer = viewer::State::new(background);
        viewer.set_bounds(viewer_pane_bounds(window_size));
        let gallery = gallery::State::new(catalog, fade, window_size);

        // The default selection drives the initial load.
        let boot_task = match gallery.initial_model() {
            Some(path) => Task::done(Message::Viewer(viewer::Message::LoadModel(path))),
            None => Task::none(),
        };

        let app = Self {
            viewer,
            gallery,
            window_size,
            startup_error,
        };

        (app, boot_task)
    }

    pub fn title(&self) -> String {
        match self.gallery.catalog().selected_entry() {
            Some(entry) => format!("{} - Model Lens", entry.name),
            None => "Model Lens".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Area of the window covered by the rendering pane: everything above the
/// gallery strip.
fn viewer_pane_bounds(window: Size) -> Rectangle {
    Rectangle::new(
        Point::ORIGIN,
        Size::new(window.width, (window.height - GALLERY_HEIGHT).max(0.0)),
    )
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn startup_with_unreadable_models_dir_reports_error() {
        let config_dir = tempdir().expect("failed to create temp dir");
        let flags = Flags {
            models_dir: Some(PathBuf::from("/definitely/not/a/real/path")),
            config_dir: Some(config_dir.path().to_path_buf()),
        };

        let (app, _task) = App::new(flags);
        assert!(app.startup_error.is_some());
        assert!(app.gallery.catalog().is_empty());
    }

    #[test]
    fn startup_selects_and_loads_first_model() {
        let config_dir = tempdir().expect("failed to create temp dir");
        let models_dir = tempdir().expect("failed to create temp dir");
        fs::write(models_dir.path().join("a.glb"), b"x").expect("failed to create file");

        let flags = Flags {
            models_dir: Some(models_dir.path().to_path_buf()),
            config_dir: Some(config_dir.path().to_path_buf()),
        };

        let (app, _task) = App::new(flags);
        assert!(app.startup_error.is_none());
        assert_eq!(app.gallery.catalog().selected_index(), Some(0));
        assert_eq!(app.title(), "a - Model Lens");
    }

    #[test]
    fn pane_bounds_exclude_gallery_strip() {
        let bounds = viewer_pane_bounds(Size::new(1024.0, 768.0));
        assert_eq!(bounds.width, 1024.0);
        assert_eq!(bounds.height, 768.0 - GALLERY_HEIGHT);
    }
}

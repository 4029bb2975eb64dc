// SPDX-License-Identifier: MPL-2.0
//! Gallery component: the thumbnail strip and its hover preview.
//!
//! Clicking a thumbnail selects it (exactly one entry is ever selected)
//! and asks the application to load its model through an [`Effect`].
//! Hovering reveals the enlarged preview overlay; the viewer is never
//! involved in hover handling.

pub mod preview;

use crate::catalog::ModelCatalog;
use crate::config::{
    GALLERY_HEIGHT, PREVIEW_IMAGE_SIZE, PREVIEW_PADDING, PREVIEW_SPACING, SELECTED_BORDER_WIDTH,
    THUMBNAIL_SIZE, THUMBNAIL_SPACING,
};
use crate::ui::styles;
use preview::{FadeDuration, PreviewState};

use iced::widget::{image, mouse_area, Container, Image, Row, Text};
use iced::{alignment, Element, Length, Padding, Rectangle, Size, Task};
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by gallery widgets and the event subscription.
#[derive(Debug, Clone)]
pub enum Message {
    ThumbnailClicked(usize),
    PointerEntered(usize),
    PointerExited,
    /// Touch interaction ended anywhere in the window.
    TouchEnded,
    /// Deferred overlay measurement, one update cycle after content is set.
    PreviewMeasured,
    /// One animation frame: advances the preview fade.
    Tick,
}

/// Side effects the application should perform after a gallery message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Load the model behind the clicked thumbnail into the viewer.
    LoadModel(PathBuf),
}

/// Complete gallery component state.
pub struct State {
    catalog: ModelCatalog,
    preview: PreviewState,
    window: Size,
}

impl State {
    pub fn new(catalog: ModelCatalog, fade: FadeDuration, window: Size) -> Self {
        Self {
            catalog,
            preview: PreviewState::new(fade),
            window,
        }
    }

    pub fn set_window_size(&mut self, size: Size) {
        self.window = size;
    }

    /// Model path of the entry selected by default, driving the initial load.
    pub fn initial_model(&self) -> Option<PathBuf> {
        self.catalog
            .selected_entry()
            .map(|entry| entry.model_path.clone())
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::ThumbnailClicked(index) => match self.catalog.select(index) {
                Some(entry) => {
                    tracing::info!(name = %entry.name, "thumbnail selected");
                    (Effect::LoadModel(entry.model_path.clone()), Task::none())
                }
                None => (Effect::None, Task::none()),
            },
            Message::PointerEntered(index) => {
                let Some(entry) = self.catalog.get(index) else {
                    return (Effect::None, Task::none());
                };
                let anchor = thumbnail_rect(index, self.catalog.len(), self.window);
                self.preview.show(
                    entry.thumbnail.clone(),
                    entry.normal_preview.clone(),
                    anchor,
                );
                // Position only once the overlay size reflects the content
                // just set, so the measurement runs one update cycle later.
                (Effect::None, Task::done(Message::PreviewMeasured))
            }
            Message::PreviewMeasured => {
                self.preview.measure(self.window, Instant::now());
                (Effect::None, Task::none())
            }
            Message::PointerExited => {
                self.preview.hide(Instant::now());
                (Effect::None, Task::none())
            }
            Message::TouchEnded => {
                self.preview.dismiss(Instant::now());
                (Effect::None, Task::none())
            }
            Message::Tick => {
                self.preview.tick(Instant::now());
                (Effect::None, Task::none())
            }
        }
    }

    /// The thumbnail strip along the bottom of the window.
    pub fn view(&self) -> Element<'_, Message> {
        let mut row = Row::new().spacing(THUMBNAIL_SPACING);

        for (index, entry) in self.catalog.entries().iter().enumerate() {
            let selected = self.catalog.selected_index() == Some(index);

            let content: Element<'_, Message> = match &entry.thumbnail {
                Some(path) => Image::new(image::Handle::from_path(path))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
                None => Text::new(entry.name.clone()).size(11).into(),
            };

            let cell = Container::new(content)
                .width(Length::Fixed(THUMBNAIL_SIZE))
                .height(Length::Fixed(THUMBNAIL_SIZE))
                .padding(SELECTED_BORDER_WIDTH)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::thumbnail_cell(selected));

            row = row.push(
                mouse_area(cell)
                    .on_press(Message::ThumbnailClicked(index))
                    .on_enter(Message::PointerEntered(index))
                    .on_exit(Message::PointerExited),
            );
        }

        Container::new(row)
            .width(Length::Fill)
            .height(Length::Fixed(GALLERY_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::gallery_strip)
            .into()
    }

    /// The enlarged preview overlay, absent while hidden or measuring.
    ///
    /// The returned layer spans the window; the overlay content is pushed
    /// to its computed spot through top/left padding.
    pub fn overlay_view(&self) -> Option<Element<'_, Message>> {
        if !self.preview.is_shown() {
            return None;
        }

        let opacity = self.preview.opacity();
        let mut images = Row::new().spacing(PREVIEW_SPACING);

        if let Some(path) = self.preview.base_image() {
            images = images.push(
                Image::new(image::Handle::from_path(path))
                    .width(Length::Fixed(PREVIEW_IMAGE_SIZE))
                    .height(Length::Fixed(PREVIEW_IMAGE_SIZE))
                    .opacity(opacity),
            );
        }
        if let Some(path) = self.preview.normal_image() {
            images = images.push(
                Image::new(image::Handle::from_path(path))
                    .width(Length::Fixed(PREVIEW_IMAGE_SIZE))
                    .height(Length::Fixed(PREVIEW_IMAGE_SIZE))
                    .opacity(opacity),
            );
        }

        let position = self.preview.position();
        let overlay = Container::new(images)
            .padding(PREVIEW_PADDING)
            .style(styles::preview_overlay(opacity));

        Some(
            Container::new(overlay)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Left)
                .align_y(alignment::Vertical::Top)
                .padding(Padding {
                    top: position.y,
                    left: position.x,
                    right: 0.0,
                    bottom: 0.0,
                })
                .into(),
        )
    }
}

/// Window-space rectangle of thumbnail `index` in a strip of `count`.
///
/// The strip is horizontally centered at the bottom of the window with the
/// thumbnails vertically centered inside it, matching [`State::view`].
pub fn thumbnail_rect(index: usize, count: usize, window: Size) -> Rectangle {
    let total_width =
        count as f32 * THUMBNAIL_SIZE + count.saturating_sub(1) as f32 * THUMBNAIL_SPACING;
    let x0 = (window.width - total_width) / 2.0;
    let y = window.height - GALLERY_HEIGHT + (GALLERY_HEIGHT - THUMBNAIL_SIZE) / 2.0;

    Rectangle {
        x: x0 + index as f32 * (THUMBNAIL_SIZE + THUMBNAIL_SPACING),
        y,
        width: THUMBNAIL_SIZE,
        height: THUMBNAIL_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelCatalog;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::write(path, b"x").expect("failed to create file");
    }

    fn gallery(dir: &Path) -> State {
        let catalog = ModelCatalog::scan_directory(dir).expect("scan failed");
        State::new(catalog, FadeDuration::default(), Size::new(1280.0, 800.0))
    }

    #[test]
    fn clicking_a_then_b_selects_only_b_and_requests_its_model() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("a.glb"));
        touch(&dir.path().join("b.glb"));
        let mut state = gallery(dir.path());

        let (effect_a, _) = state.update(Message::ThumbnailClicked(0));
        assert_eq!(effect_a, Effect::LoadModel(dir.path().join("a.glb")));

        let (effect_b, _) = state.update(Message::ThumbnailClicked(1));
        assert_eq!(effect_b, Effect::LoadModel(dir.path().join("b.glb")));
        assert_eq!(state.catalog().selected_index(), Some(1));
    }

    #[test]
    fn clicking_out_of_range_does_nothing() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("a.glb"));
        let mut state = gallery(dir.path());

        let (effect, _) = state.update(Message::ThumbnailClicked(9));
        assert_eq!(effect, Effect::None);
        assert_eq!(state.catalog().selected_index(), Some(0));
    }

    #[test]
    fn hover_without_normal_preview_leaves_slot_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("a.glb"));
        touch(&dir.path().join("a.png"));
        let mut state = gallery(dir.path());

        let _ = state.update(Message::PointerEntered(0));
        let _ = state.update(Message::PreviewMeasured);

        assert!(state.preview().is_shown());
        assert!(state.preview().base_image().is_some());
        assert!(state.preview().normal_image().is_none());
    }

    #[test]
    fn pointer_exit_fades_preview_out() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("a.glb"));
        touch(&dir.path().join("a.png"));
        let mut state = gallery(dir.path());

        let _ = state.update(Message::PointerEntered(0));
        let _ = state.update(Message::PreviewMeasured);
        let _ = state.update(Message::PointerExited);

        assert!(state.preview().is_animating());
    }

    #[test]
    fn touch_end_starts_preview_fade_out() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("a.glb"));
        touch(&dir.path().join("a.png"));
        let mut state = gallery(dir.path());

        let _ = state.update(Message::PointerEntered(0));
        let _ = state.update(Message::PreviewMeasured);
        let _ = state.update(Message::TouchEnded);

        // The overlay fades out rather than snapping away; the phase
        // machine hides it once the fade completes.
        assert!(state.preview().is_animating());
    }

    #[test]
    fn initial_model_comes_from_default_selection() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("b.glb"));
        touch(&dir.path().join("a.glb"));
        let state = gallery(dir.path());

        assert_eq!(state.initial_model(), Some(dir.path().join("a.glb")));
    }

    #[test]
    fn thumbnail_rects_are_centered_and_evenly_spaced() {
        let window = Size::new(1000.0, 700.0);
        let first = thumbnail_rect(0, 3, window);
        let second = thumbnail_rect(1, 3, window);
        let third = thumbnail_rect(2, 3, window);

        let total = 3.0 * THUMBNAIL_SIZE + 2.0 * THUMBNAIL_SPACING;
        assert_eq!(first.x, (1000.0 - total) / 2.0);
        assert_eq!(second.x - first.x, THUMBNAIL_SIZE + THUMBNAIL_SPACING);
        assert_eq!(third.x - second.x, THUMBNAIL_SIZE + THUMBNAIL_SPACING);

        // Vertically centered inside the bottom strip.
        assert_eq!(
            first.y,
            700.0 - GALLERY_HEIGHT + (GALLERY_HEIGHT - THUMBNAIL_SIZE) / 2.0
        );
    }
}

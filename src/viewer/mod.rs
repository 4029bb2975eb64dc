// SPDX-License-Identifier: MPL-2.0
//! Viewer component: owns the rendering surface and the current model.
//!
//! One operation matters here: load model by path. Each request bumps a
//! load generation; only the completion carrying the current generation may
//! replace the displayed model, so a slow early load can never overwrite a
//! faster later one. A failed load keeps the previous model on screen.

pub mod camera;
pub mod shader;

use crate::assets::{self, LoadedModel};
use crate::config::{ORBIT_SENSITIVITY, ZOOM_SENSITIVITY};
use crate::error::Error;
use crate::ui::styles;
use camera::OrbitCamera;
use shader::{Lights, ModelScene};

use iced::widget::shader::Shader;
use iced::widget::{Container, Stack, Text};
use iced::{alignment, event, mouse, Element, Length, Point, Rectangle, Task};
use std::path::{Path, PathBuf};

/// Messages consumed by the viewer component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Replace the displayed model with the asset at this path.
    LoadModel(PathBuf),
    /// Completion of an asynchronous load, tagged with its generation.
    ModelLoaded {
        generation: u64,
        result: Result<LoadedModel, Error>,
    },
    /// One animation frame: advances camera damping.
    Tick,
    /// Raw runtime event routed here by the application subscription.
    RawEvent(event::Event),
}

/// Grab-and-drag state for orbiting the camera.
#[derive(Debug, Clone, Default)]
struct DragState {
    is_dragging: bool,
    last_position: Option<Point>,
}

/// Complete viewer component state.
pub struct State {
    model: Option<LoadedModel>,
    error: Option<String>,
    camera: OrbitCamera,
    lights: Lights,
    drag: DragState,
    cursor_position: Option<Point>,
    load_generation: u64,
    is_loading: bool,
    /// Area of the window occupied by the viewer pane.
    bounds: Rectangle,
    background: iced::Color,
}

impl State {
    pub fn new(background: iced::Color) -> Self {
        Self {
            model: None,
            error: None,
            camera: OrbitCamera::default(),
            lights: Lights::default(),
            drag: DragState::default(),
            cursor_position: None,
            load_generation: 0,
            is_loading: false,
            bounds: Rectangle::default(),
            background,
        }
    }

    /// Updates the pane area after a window resize or layout change.
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.camera.update_aspect_ratio(bounds.width, bounds.height);
    }

    /// Source path of the most recently successfully loaded model.
    pub fn current_source(&self) -> Option<&Path> {
        self.model.as_ref().map(|m| m.source.as_path())
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadModel(path) => {
                if path.as_os_str().is_empty() {
                    tracing::error!("no model path provided");
                    return Task::none();
                }

                self.load_generation += 1;
                let generation = self.load_generation;
                self.is_loading = true;
                tracing::info!(path = %path.display(), generation, "loading model");

                Task::perform(
                    async move { assets::load_model(&path) },
                    move |result| Message::ModelLoaded { generation, result },
                )
            }
            Message::ModelLoaded { generation, result } => {
                if generation != self.load_generation {
                    tracing::debug!(generation, "discarding stale load result");
                    return Task::none();
                }
                self.is_loading = false;

                match result {
                    Ok(model) => {
                        self.camera.frame(&model.aabb);
                        // Replacing the option drops the previous mesh, so
                        // the old model's memory is released here.
                        self.model = Some(model);
                        self.error = None;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "model load failed");
                        // The previous model stays on screen.
                        self.error = Some(err.to_string());
                    }
                }
                Task::none()
            }
            Message::Tick => {
                self.camera.update();
                Task::none()
            }
            Message::RawEvent(event) => {
                self.handle_event(&event);
                Task::none()
            }
        }
    }

    fn handle_event(&mut self, event: &event::Event) {
        match event {
            event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if self.drag.is_dragging {
                    if let Some(last) = self.drag.last_position {
                        let delta_x = position.x - last.x;
                        let delta_y = position.y - last.y;
                        self.camera.orbit(
                            -delta_x * ORBIT_SENSITIVITY,
                            -delta_y * ORBIT_SENSITIVITY,
                        );
                    }
                    self.drag.last_position = Some(*position);
                }
                self.cursor_position = Some(*position);
            }
            event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = self.cursor_position {
                    if self.bounds.contains(position) {
                        self.drag.is_dragging = true;
                        self.drag.last_position = Some(position);
                    }
                }
            }
            event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                self.drag.is_dragging = false;
                self.drag.last_position = None;
            }
            event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let inside = self
                    .cursor_position
                    .map(|p| self.bounds.contains(p))
                    .unwrap_or(false);
                if inside {
                    let lines = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => *y,
                        mouse::ScrollDelta::Pixels { y, .. } => y / 40.0,
                    };
                    self.camera.zoom(lines * ZOOM_SENSITIVITY);
                }
            }
            event::Event::Mouse(mouse::Event::CursorLeft) => {
                self.cursor_position = None;
            }
            _ => {}
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let background = self.background;

        let surface: Element<'_, Message> = match &self.model {
            Some(model) => Shader::new(ModelScene {
                mesh: model.mesh.clone(),
                generation: self.load_generation,
                view: self.camera.view_matrix(),
                projection: self.camera.projection_matrix(),
                lights: self.lights,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            None => Container::new(Text::new("No model loaded"))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into(),
        };

        let mut stack = Stack::new().push(surface);

        if self.is_loading {
            stack = stack.push(
                Container::new(Text::new("Loading\u{2026}").size(14))
                    .width(Length::Fill)
                    .padding(8)
                    .align_x(alignment::Horizontal::Right),
            );
        }

        if let Some(error) = &self.error {
            stack = stack.push(
                Container::new(
                    Container::new(Text::new(error.clone()).size(14))
                        .padding(8)
                        .style(styles::error_banner),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(8)
                .align_x(alignment::Horizontal::Left)
                .align_y(alignment::Vertical::Bottom),
            );
        }

        Container::new(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(background)),
                ..Default::default()
            })
            .into()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Window layout: viewer pane above the gallery strip, overlays on top.

use super::{App, Message};
use crate::ui::styles;
use iced::widget::{Column, Container, Stack, Text};
use iced::{alignment, Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = Column::new()
            .push(
                Container::new(self.viewer.view().map(Message::Viewer))
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(self.gallery.view().map(Message::Gallery));

        let mut stack = Stack::new().push(content);

        // The hover preview floats above both panes at its computed spot.
        if let Some(overlay) = self.gallery.overlay_view() {
            stack = stack.push(overlay.map(Message::Gallery));
        }

        if let Some(error) = &self.startup_error {
            stack = stack.push(
                Container::new(
                    Container::new(Text::new(error.clone()).size(14))
                        .padding(8)
                        .style(styles::error_banner),
                )
                .width(Length::Fill)
                .padding(8)
                .align_x(alignment::Horizontal::Center),
            );
        }

        stack.into()
    }
}

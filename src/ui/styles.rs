// SPDX-License-Identifier: MPL-2.0
//! Container styles for the gallery strip, preview overlay, and error banner.

use crate::ui::{opacity, palette};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Background of the thumbnail strip at the bottom of the window.
#[must_use]
pub fn gallery_strip(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::STRIP_BACKGROUND)),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// One thumbnail cell. The selected entry gets an accent border, every
/// other cell keeps a transparent border of the same width so selection
/// never shifts the layout.
pub fn thumbnail_cell(selected: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(palette::CELL_BACKGROUND)),
        text_color: Some(palette::WHITE),
        border: Border {
            color: if selected {
                palette::ACCENT
            } else {
                Color::TRANSPARENT
            },
            width: crate::config::SELECTED_BORDER_WIDTH,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Surface behind the enlarged hover preview. Its background follows the
/// fade opacity so the whole card appears and disappears as one.
pub fn preview_overlay(fade: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG * fade,
            ..palette::BLACK
        })),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE * fade,
                ..palette::WHITE
            },
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

/// Banner shown in the viewer corner when a model load fails.
#[must_use]
pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::ERROR
        })),
        text_color: Some(palette::WHITE),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

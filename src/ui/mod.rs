// SPDX-License-Identifier: MPL-2.0
//! Shared visual building blocks: the palette and widget styles.

pub mod styles;

/// Base colors used across the interface.
pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const STRIP_BACKGROUND: Color = Color::from_rgb(0.06, 0.06, 0.1);
    pub const CELL_BACKGROUND: Color = Color::from_rgb(0.16, 0.16, 0.22);
    pub const ACCENT: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const ERROR: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

/// Standardized opacity levels for overlay surfaces.
pub mod opacity {
    pub const OVERLAY_STRONG: f32 = 0.85;
    pub const OVERLAY_SUBTLE: f32 = 0.3;
}

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for the magic numbers used
//! across the application: preview overlay geometry, fade timing, gallery
//! layout, and camera framing.

// ==========================================================================
// Preview Overlay Defaults
// ==========================================================================

/// Minimum distance kept between the preview overlay and any window edge.
pub const PREVIEW_EDGE_MARGIN: f32 = 20.0;

/// Vertical gap between the hovered thumbnail and the preview overlay.
pub const PREVIEW_GAP: f32 = 15.0;

/// Edge length of each preview image inside the overlay.
pub const PREVIEW_IMAGE_SIZE: f32 = 220.0;

/// Inner padding of the preview overlay container.
pub const PREVIEW_PADDING: f32 = 8.0;

/// Spacing between the base and normal-map preview images.
pub const PREVIEW_SPACING: f32 = 8.0;

/// Default preview fade duration in milliseconds.
pub const DEFAULT_PREVIEW_FADE_MS: u64 = 300;

/// Minimum preview fade duration in milliseconds.
pub const MIN_PREVIEW_FADE_MS: u64 = 100;

/// Maximum preview fade duration in milliseconds. Kept under one second so
/// a hidden overlay never lingers in layout after the pointer leaves.
pub const MAX_PREVIEW_FADE_MS: u64 = 1000;

// ==========================================================================
// Gallery Layout Defaults
// ==========================================================================

/// Edge length of a gallery thumbnail.
pub const THUMBNAIL_SIZE: f32 = 72.0;

/// Horizontal spacing between gallery thumbnails.
pub const THUMBNAIL_SPACING: f32 = 10.0;

/// Height of the gallery strip along the bottom of the window.
pub const GALLERY_HEIGHT: f32 = 96.0;

/// Border width used to highlight the selected thumbnail.
pub const SELECTED_BORDER_WIDTH: f32 = 3.0;

// ==========================================================================
// Viewer Defaults
// ==========================================================================

/// Camera distance as a multiple of the model's largest bounding dimension.
pub const CAMERA_DISTANCE_FACTOR: f32 = 2.0;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Fraction of residual orbit velocity removed each frame.
pub const CAMERA_DAMPING: f32 = 0.05;

/// Radians of orbit per pixel of drag.
pub const ORBIT_SENSITIVITY: f32 = 0.008;

/// Dolly distance per wheel line.
pub const ZOOM_SENSITIVITY: f32 = 0.1;

/// Interval between animation ticks, roughly one frame at 60 Hz.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Background color used when the settings file does not provide one.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a2e";

// SPDX-License-Identifier: MPL-2.0
//! Hover preview overlay: positioning and fade state machine.
//!
//! The overlay holds two image slots (the thumbnail itself and an optional
//! normal-map preview). Its size depends on which slots are filled, so
//! positioning runs one update cycle after the content is set (the
//! "measuring" phase), then the overlay fades in at the computed spot:
//! horizontally centered over the thumbnail but clamped to the window
//! edges, above the thumbnail with a fixed gap, flipping below it when
//! there is not enough room on top.

use crate::config::{
    DEFAULT_PREVIEW_FADE_MS, MAX_PREVIEW_FADE_MS, MIN_PREVIEW_FADE_MS, PREVIEW_EDGE_MARGIN,
    PREVIEW_GAP, PREVIEW_IMAGE_SIZE, PREVIEW_PADDING, PREVIEW_SPACING,
};
use iced::{Point, Rectangle, Size};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Preview fade duration in milliseconds.
///
/// The newtype clamps to 100–1000 ms, so a hidden overlay is guaranteed to
/// leave layout within a second of the pointer leaving the thumbnail no
/// matter what the settings file says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeDuration(u64);

impl FadeDuration {
    #[must_use]
    pub fn new(ms: u64) -> Self {
        Self(ms.clamp(MIN_PREVIEW_FADE_MS, MAX_PREVIEW_FADE_MS))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for FadeDuration {
    fn default() -> Self {
        Self(DEFAULT_PREVIEW_FADE_MS)
    }
}

/// Computes the overlay's top-left corner for a thumbnail at `anchor`.
///
/// Horizontally centered over the anchor, clamped to stay at least the edge
/// margin away from both sides (a too-narrow window pins to the left
/// margin). Vertically the overlay sits a gap above the anchor, flipping
/// below it when the computed top would cross into the top margin.
pub fn anchored_position(anchor: Rectangle, overlay: Size, viewport: Size) -> Point {
    let left = anchor.x + anchor.width / 2.0 - overlay.width / 2.0;
    let max_left = viewport.width - overlay.width - PREVIEW_EDGE_MARGIN;
    let left = left.min(max_left).max(PREVIEW_EDGE_MARGIN);

    let mut top = anchor.y - overlay.height - PREVIEW_GAP;
    if top < PREVIEW_EDGE_MARGIN {
        top = anchor.y + anchor.height + PREVIEW_GAP;
    }

    Point::new(left, top)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    /// Content has been set; position is computed on the next update cycle
    /// once the overlay size is known.
    Measuring,
    FadingIn {
        since: Instant,
        from: f32,
    },
    Visible,
    FadingOut {
        since: Instant,
        from: f32,
    },
}

/// State of the hover preview overlay. Nothing persists between hovers:
/// every pointer-enter resets the slots, anchor, and phase.
#[derive(Debug, Clone)]
pub struct PreviewState {
    phase: Phase,
    base_image: Option<PathBuf>,
    normal_image: Option<PathBuf>,
    anchor: Rectangle,
    position: Point,
    opacity: f32,
    fade: FadeDuration,
}

impl PreviewState {
    pub fn new(fade: FadeDuration) -> Self {
        Self {
            phase: Phase::Hidden,
            base_image: None,
            normal_image: None,
            anchor: Rectangle::default(),
            position: Point::ORIGIN,
            opacity: 0.0,
            fade,
        }
    }

    /// Fills the image slots and enters the measuring phase.
    ///
    /// `normal_image` may be `None`; the slot is then simply absent rather
    /// than holding content from an earlier hover.
    pub fn show(&mut self, base_image: Option<PathBuf>, normal_image: Option<PathBuf>, anchor: Rectangle) {
        self.base_image = base_image;
        self.normal_image = normal_image;
        self.anchor = anchor;
        self.opacity = 0.0;
        self.phase = Phase::Measuring;
    }

    /// Completes the deferred measurement: computes the position from the
    /// now-known overlay size and starts the fade-in.
    pub fn measure(&mut self, viewport: Size, now: Instant) {
        if self.phase != Phase::Measuring {
            return;
        }
        self.position = anchored_position(self.anchor, self.size(), viewport);
        self.phase = Phase::FadingIn { since: now, from: 0.0 };
    }

    /// Starts the fade-out; the overlay is fully hidden once it completes.
    pub fn hide(&mut self, now: Instant) {
        match self.phase {
            Phase::Hidden => {}
            Phase::Measuring => self.phase = Phase::Hidden,
            Phase::FadingIn { .. } | Phase::Visible | Phase::FadingOut { .. } => {
                self.phase = Phase::FadingOut {
                    since: now,
                    from: self.opacity,
                };
            }
        }
    }

    /// Touch-end hide: fades the overlay out on the shared path.
    ///
    /// No separate hard-hide timer exists to defer; the phase machine
    /// reaches `Hidden` when the fade completes, so the overlay leaves
    /// layout within the fade duration.
    pub fn dismiss(&mut self, now: Instant) {
        self.hide(now);
    }

    /// Advances the fade animation by one tick.
    pub fn tick(&mut self, now: Instant) {
        let fade_ms = self.fade.value() as f32;
        match self.phase {
            Phase::FadingIn { since, from } => {
                let elapsed = now.saturating_duration_since(since).as_millis() as f32;
                self.opacity = (from + elapsed / fade_ms).min(1.0);
                if self.opacity >= 1.0 {
                    self.phase = Phase::Visible;
                }
            }
            Phase::FadingOut { since, from } => {
                let elapsed = now.saturating_duration_since(since).as_millis() as f32;
                self.opacity = (from - elapsed / fade_ms).max(0.0);
                if self.opacity <= 0.0 {
                    self.phase = Phase::Hidden;
                }
            }
            Phase::Hidden | Phase::Measuring | Phase::Visible => {}
        }
    }

    /// Overlay size derived from the filled slots. Either slot may be
    /// empty; only filled ones contribute to the width.
    pub fn size(&self) -> Size {
        let slots =
            usize::from(self.base_image.is_some()) + usize::from(self.normal_image.is_some());
        let width = PREVIEW_PADDING * 2.0
            + slots as f32 * PREVIEW_IMAGE_SIZE
            + slots.saturating_sub(1) as f32 * PREVIEW_SPACING;
        Size::new(width, PREVIEW_PADDING * 2.0 + PREVIEW_IMAGE_SIZE)
    }

    /// True while the overlay occupies layout space.
    pub fn is_shown(&self) -> bool {
        !matches!(self.phase, Phase::Hidden | Phase::Measuring)
    }

    /// True while a fade is in flight and ticks are needed.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::FadingIn { .. } | Phase::FadingOut { .. })
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn base_image(&self) -> Option<&PathBuf> {
        self.base_image.as_ref()
    }

    pub fn normal_image(&self) -> Option<&PathBuf> {
        self.normal_image.as_ref()
    }

    pub fn fade(&self) -> FadeDuration {
        self.fade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };

    fn thumb_at(x: f32, y: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width: 72.0,
            height: 72.0,
        }
    }

    fn overlay() -> Size {
        Size::new(236.0, 236.0)
    }

    #[test]
    fn fade_duration_clamps_to_valid_range() {
        assert_eq!(FadeDuration::new(0).value(), MIN_PREVIEW_FADE_MS);
        assert_eq!(FadeDuration::new(3_000_000_000).value(), MAX_PREVIEW_FADE_MS);
        assert_eq!(FadeDuration::new(450).value(), 450);
    }

    #[test]
    fn fade_duration_never_exceeds_one_second() {
        assert!(FadeDuration::new(u64::MAX).as_duration() <= Duration::from_secs(1));
    }

    #[test]
    fn position_is_centered_over_anchor() {
        let anchor = thumb_at(600.0, 700.0);
        let pos = anchored_position(anchor, overlay(), VIEWPORT);
        assert_eq!(pos.x, 600.0 + 36.0 - 118.0);
        // Above the anchor with the fixed gap.
        assert_eq!(pos.y, 700.0 - 236.0 - PREVIEW_GAP);
    }

    #[test]
    fn position_clamps_to_left_edge_margin() {
        let anchor = thumb_at(0.0, 700.0);
        let pos = anchored_position(anchor, overlay(), VIEWPORT);
        assert_eq!(pos.x, PREVIEW_EDGE_MARGIN);
    }

    #[test]
    fn position_clamps_to_right_edge_margin() {
        let anchor = thumb_at(1250.0, 700.0);
        let pos = anchored_position(anchor, overlay(), VIEWPORT);
        assert_eq!(pos.x, VIEWPORT.width - overlay().width - PREVIEW_EDGE_MARGIN);
    }

    #[test]
    fn position_stays_within_horizontal_bounds_everywhere() {
        for x in (0..1280).step_by(40) {
            let pos = anchored_position(thumb_at(x as f32, 700.0), overlay(), VIEWPORT);
            assert!(pos.x >= PREVIEW_EDGE_MARGIN);
            assert!(pos.x <= VIEWPORT.width - overlay().width - PREVIEW_EDGE_MARGIN);
        }
    }

    #[test]
    fn narrow_viewport_pins_to_left_margin() {
        let narrow = Size::new(200.0, 800.0);
        let pos = anchored_position(thumb_at(60.0, 700.0), overlay(), narrow);
        assert_eq!(pos.x, PREVIEW_EDGE_MARGIN);
    }

    #[test]
    fn anchor_near_top_flips_overlay_below() {
        // Computed top would be negative, well under the top margin.
        let anchor = thumb_at(600.0, 10.0);
        let pos = anchored_position(anchor, overlay(), VIEWPORT);
        assert_eq!(pos.y, 10.0 + 72.0 + PREVIEW_GAP);
    }

    #[test]
    fn flip_threshold_is_the_top_margin() {
        // Exactly at the margin: stays above.
        let at_margin = thumb_at(600.0, PREVIEW_EDGE_MARGIN + 236.0 + PREVIEW_GAP);
        let pos = anchored_position(at_margin, overlay(), VIEWPORT);
        assert_eq!(pos.y, PREVIEW_EDGE_MARGIN);

        // One pixel higher: flips below.
        let above_margin = thumb_at(600.0, PREVIEW_EDGE_MARGIN + 236.0 + PREVIEW_GAP - 1.0);
        let flipped = anchored_position(above_margin, overlay(), VIEWPORT);
        assert!(flipped.y > above_margin.y);
    }

    #[test]
    fn show_measure_fade_in_reaches_visible() {
        let mut preview = PreviewState::new(FadeDuration::default());
        let t0 = Instant::now();

        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(600.0, 700.0));
        assert!(!preview.is_shown());

        preview.measure(VIEWPORT, t0);
        assert!(preview.is_shown());
        assert_eq!(preview.opacity(), 0.0);

        preview.tick(t0 + Duration::from_millis(150));
        assert!(preview.opacity() > 0.0 && preview.opacity() < 1.0);

        preview.tick(t0 + Duration::from_millis(300));
        assert_eq!(preview.opacity(), 1.0);
        assert!(!preview.is_animating());
    }

    #[test]
    fn hide_reaches_hidden_within_fade_duration() {
        let mut preview = PreviewState::new(FadeDuration::default());
        let t0 = Instant::now();

        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(600.0, 700.0));
        preview.measure(VIEWPORT, t0);
        preview.tick(t0 + Duration::from_millis(300));
        assert_eq!(preview.opacity(), 1.0);

        let t1 = t0 + Duration::from_millis(400);
        preview.hide(t1);
        preview.tick(t1 + preview.fade().as_duration());

        assert!(!preview.is_shown());
        assert_eq!(preview.opacity(), 0.0);
        // The bound holds for every permitted fade value.
        assert!(preview.fade().as_duration() <= Duration::from_secs(1));
    }

    #[test]
    fn hide_mid_fade_in_continues_from_current_opacity() {
        let mut preview = PreviewState::new(FadeDuration::default());
        let t0 = Instant::now();

        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(600.0, 700.0));
        preview.measure(VIEWPORT, t0);
        preview.tick(t0 + Duration::from_millis(150));
        let halfway = preview.opacity();

        let t1 = t0 + Duration::from_millis(150);
        preview.hide(t1);
        preview.tick(t1 + Duration::from_millis(1));
        assert!(preview.opacity() <= halfway);
    }

    #[test]
    fn hide_during_measuring_skips_fade() {
        let mut preview = PreviewState::new(FadeDuration::default());
        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(600.0, 700.0));
        preview.hide(Instant::now());
        assert!(!preview.is_shown());
        assert!(!preview.is_animating());
    }

    #[test]
    fn dismiss_fades_out_and_leaves_layout_within_fade_duration() {
        let mut preview = PreviewState::new(FadeDuration::default());
        let t0 = Instant::now();
        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(600.0, 700.0));
        preview.measure(VIEWPORT, t0);
        preview.tick(t0 + Duration::from_millis(300));

        let t1 = t0 + Duration::from_millis(400);
        preview.dismiss(t1);
        // A fade, not a snap.
        assert!(preview.is_animating());
        assert_eq!(preview.opacity(), 1.0);

        preview.tick(t1 + preview.fade().as_duration());
        assert!(!preview.is_shown());
        assert_eq!(preview.opacity(), 0.0);
    }

    #[test]
    fn missing_normal_slot_narrows_overlay() {
        let mut preview = PreviewState::new(FadeDuration::default());
        preview.show(Some(PathBuf::from("a.png")), None, thumb_at(0.0, 0.0));
        let single = preview.size();

        preview.show(
            Some(PathBuf::from("a.png")),
            Some(PathBuf::from("a_normal.png")),
            thumb_at(0.0, 0.0),
        );
        let double = preview.size();

        assert!(double.width > single.width);
        assert_eq!(double.height, single.height);
        assert_eq!(
            double.width - single.width,
            PREVIEW_IMAGE_SIZE + PREVIEW_SPACING
        );
    }

    #[test]
    fn missing_base_slot_is_not_budgeted() {
        let mut preview = PreviewState::new(FadeDuration::default());

        preview.show(None, Some(PathBuf::from("a_normal.png")), thumb_at(0.0, 0.0));
        assert_eq!(
            preview.size().width,
            PREVIEW_PADDING * 2.0 + PREVIEW_IMAGE_SIZE
        );

        preview.show(None, None, thumb_at(0.0, 0.0));
        assert_eq!(preview.size().width, PREVIEW_PADDING * 2.0);
    }

    #[test]
    fn new_hover_resets_previous_normal_slot() {
        let mut preview = PreviewState::new(FadeDuration::default());
        preview.show(
            Some(PathBuf::from("a.png")),
            Some(PathBuf::from("a_normal.png")),
            thumb_at(0.0, 0.0),
        );
        preview.show(Some(PathBuf::from("b.png")), None, thumb_at(0.0, 0.0));

        assert_eq!(preview.normal_image(), None);
        assert_eq!(preview.base_image(), Some(&PathBuf::from("b.png")));
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legal offset ranges and edge detection.
//!
//! Everything here is a pure function of the content size, the viewport size
//! and a [`Placement`]. Offsets are device-pixel translations of the content
//! away from the centered position; scales are relative to the fit scale.

use kurbo::{Point, Size, Vec2};

use crate::bounds::AspectFit;
use crate::config::ScaleTolerance;

/// Content and viewport extents, plus how they relate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Natural size of the displayed item.
    pub content: Size,
    /// Size of the display surface in device pixels.
    pub viewport: Size,
    /// Aspect-ratio relation of `content` to `viewport`.
    pub fit: AspectFit,
}

/// Effective scale and offset of the content at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Effective scale (baseline times delta).
    pub scale: f64,
    /// Effective offset in device pixels.
    pub offset: Vec2,
}

/// Symmetric half-extents of the legal translation at some scale.
///
/// The legal X range is `[-x, x]`, the legal Y range `[-y, y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetRange {
    /// Horizontal half-extent.
    pub x: f64,
    /// Vertical half-extent.
    pub y: f64,
}

impl OffsetRange {
    /// Clamps both axes into range.
    #[must_use]
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        Vec2::new(offset.x.clamp(-self.x, self.x), offset.y.clamp(-self.y, self.y))
    }

    /// Clamps X into range and only enforces the lower Y bound.
    ///
    /// Used for pull-down-to-dismiss, where content may be dragged downward freely.
    #[must_use]
    pub fn clamp_pull_down(&self, offset: Vec2) -> Vec2 {
        Vec2::new(offset.x.clamp(-self.x, self.x), offset.y.max(-self.y))
    }
}

/// Which viewport edges the displayed content currently touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeReach {
    /// The content's left edge is at or right of the viewport's left edge.
    pub left: bool,
    /// The content's right edge is at or left of the viewport's right edge.
    pub right: bool,
    /// The content's top edge is at or below the viewport's top edge.
    pub top: bool,
    /// The content's bottom edge is at or above the viewport's bottom edge.
    pub bottom: bool,
}

impl Default for EdgeReach {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }
}

impl Geometry {
    /// Bundles `content` and `viewport` and classifies their aspect ratios.
    #[must_use]
    pub fn new(content: Size, viewport: Size) -> Self {
        Self {
            content,
            viewport,
            fit: AspectFit::classify(content, viewport),
        }
    }

    /// Whether the viewport has no area yet, as before the first layout.
    #[must_use]
    pub fn viewport_is_empty(&self) -> bool {
        self.viewport.is_zero_area()
    }

    /// Scale at which the content exactly fits the viewport.
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        let sx = self.viewport.width / self.content.width;
        let sy = self.viewport.height / self.content.height;
        sx.min(sy)
    }

    /// On-screen size of the content at `scale`.
    #[must_use]
    pub fn display_size(&self, scale: f64) -> Size {
        self.content * (self.fit_scale() * scale)
    }

    /// Legal translation at `scale`.
    ///
    /// An axis along which the displayed content is no larger than the
    /// viewport has a zero range.
    #[must_use]
    pub fn offset_range(&self, scale: f64) -> OffsetRange {
        let shown = self.display_size(scale);
        OffsetRange {
            x: ((shown.width - self.viewport.width) / 2.0).max(0.0),
            y: ((shown.height - self.viewport.height) / 2.0).max(0.0),
        }
    }

    /// Top-left corner of the scaled viewport frame, in viewport coordinates.
    ///
    /// A [`crate::ZoomTransform`] scales about the viewport center, so a
    /// scale of `s` pushes the frame origin up and left by half of `s - 1`
    /// viewport extents before the offset is applied.
    #[must_use]
    pub fn frame_origin(&self, placement: Placement) -> Point {
        let growth = placement.scale - 1.0;
        Point::new(
            placement.offset.x - self.viewport.width * growth / 2.0,
            placement.offset.y - self.viewport.height * growth / 2.0,
        )
    }

    /// Top-left corner of the displayed content, in viewport coordinates.
    #[must_use]
    pub fn display_origin(&self, placement: Placement) -> Point {
        let frame = self.frame_origin(placement);
        let shown = self.display_size(placement.scale);
        let scale = placement.scale;
        match self.fit {
            AspectFit::Wider => Point::new(
                frame.x,
                frame.y + (self.viewport.height * scale - shown.height) / 2.0,
            ),
            AspectFit::Taller | AspectFit::Same => Point::new(
                frame.x + (self.viewport.width * scale - shown.width) / 2.0,
                frame.y,
            ),
        }
    }

    /// Reports which viewport edges the content touches at `placement`.
    ///
    /// `slack` absorbs sub-pixel rounding: an edge within `slack` pixels of
    /// the viewport edge counts as reached.
    #[must_use]
    pub fn edge_reach(&self, placement: Placement, slack: f64) -> EdgeReach {
        let origin = self.display_origin(placement);
        let shown = self.display_size(placement.scale);
        EdgeReach {
            left: origin.x > -slack,
            right: origin.x + shown.width < self.viewport.width + slack,
            top: origin.y > -slack,
            bottom: origin.y + shown.height < self.viewport.height + slack,
        }
    }
}

/// Applies the offset clamp policy for content displayed at `scale`.
///
/// - Enlarged beyond `default_scale`: both axes are clamped.
/// - At `default_scale`: X is clamped, Y only has its lower bound enforced so
///   the content can be pulled down to dismiss.
/// - Below `default_scale`: the offset is returned unchanged.
#[must_use]
pub fn clamp_offset(
    geometry: &Geometry,
    offset: Vec2,
    scale: f64,
    default_scale: f64,
    tolerance: ScaleTolerance,
) -> Vec2 {
    if tolerance.is_above(scale, default_scale) {
        geometry.offset_range(scale).clamp(offset)
    } else if tolerance.is_at(scale, default_scale) {
        geometry.offset_range(scale).clamp_pull_down(offset)
    } else {
        offset
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::bounds::ScaleBounds;
use crate::clamp::EdgeReach;

/// Zoom center used whenever no pinch or tap has chosen one.
pub const DEFAULT_ZOOM_CENTER: Point = Point::new(0.5, 0.5);

/// Interaction phase of a [`crate::ZoomEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pan (drag) is in progress.
    Panning,
    /// A pinch is in progress.
    Pinching,
    /// A settle animation was requested and has not been reported finished.
    ///
    /// Gesture handlers are no-ops in this phase.
    Animating,
    /// Pull-down-to-dismiss completed. Only [`crate::ZoomEngine::reset`] leaves this phase.
    Exiting,
}

/// Authoritative transform state of one viewer surface.
///
/// Values split into a committed *baseline* and an in-progress *delta*. The
/// effective scale is `scale_baseline * scale_delta`; offsets are only
/// meaningful relative to the current `scale_baseline`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    /// Scale committed by the last completed gesture or animation.
    pub scale_baseline: f64,
    /// Multiplicative scale change of the active pinch.
    pub scale_delta: f64,
    /// Translation committed by the last completed gesture or animation.
    pub offset_baseline: Vec2,
    /// Translation of the active pan.
    pub offset_delta: Vec2,
    /// Pinch focal point as a fraction of the viewport.
    pub zoom_center: Point,
    /// The "fit" scale.
    pub default_scale: f64,
    /// Limits derived from the content and viewport sizes.
    pub bounds: ScaleBounds,
    /// Viewport edges the content currently touches.
    pub reach: EdgeReach,
    /// Current interaction phase.
    pub phase: GesturePhase,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale_baseline: 1.0,
            scale_delta: 1.0,
            offset_baseline: Vec2::ZERO,
            offset_delta: Vec2::ZERO,
            zoom_center: DEFAULT_ZOOM_CENTER,
            default_scale: 1.0,
            bounds: ScaleBounds::default(),
            reach: EdgeReach::default(),
            phase: GesturePhase::Idle,
        }
    }
}

impl TransformState {
    /// `scale_baseline * scale_delta`.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        self.scale_baseline * self.scale_delta
    }

    /// `true` while a settle animation is outstanding.
    #[must_use]
    pub fn is_in_animation(&self) -> bool {
        self.phase == GesturePhase::Animating
    }

    /// `true` once a pull-down dismiss has been committed.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.phase == GesturePhase::Exiting
    }

    /// `true` when gesture handlers must ignore input.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.is_in_animation() || self.is_exiting()
    }

    /// Returns baseline and delta values to identity at `default_scale`.
    pub(crate) fn reset_transform(&mut self) {
        self.scale_baseline = self.default_scale;
        self.scale_delta = 1.0;
        self.offset_baseline = Vec2::ZERO;
        self.offset_delta = Vec2::ZERO;
        self.zoom_center = DEFAULT_ZOOM_CENTER;
        self.reach = EdgeReach::default();
    }
}

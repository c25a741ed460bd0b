// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound gesture handlers.
//!
//! Every handler is a no-op while a settle animation is outstanding or after
//! a pull-down dismiss, so misordered or duplicate host events cannot corrupt
//! the transform state.

use kurbo::{Point, Vec2};

use crate::bounds::AspectFit;
use crate::engine::ZoomEngine;
use crate::event::{EventSink, ViewportSource, ZoomEvent};
use crate::state::{DEFAULT_ZOOM_CENTER, GesturePhase};
use crate::transform::ZoomTransform;

/// Raw pointer lifecycle reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchKind {
    /// A pointer went down.
    Down,
    /// A pointer moved.
    Move,
    /// A pointer was lifted.
    Up,
    /// The system cancelled the pointer sequence.
    Cancel,
}

impl<K, V: ViewportSource, S: EventSink<K>> ZoomEngine<K, V, S> {
    /// Raw touch notification.
    ///
    /// Pointer down and up re-announce the pan direction. Pointer up (or
    /// cancel) commits the in-progress pan and pinch into the baseline.
    pub fn on_touch(&mut self, kind: TouchKind) {
        log::debug!("touch {kind:?} in {:?}", self.state.phase);
        if self.state.is_locked() {
            return;
        }
        if kind == TouchKind::Move {
            return;
        }
        self.emit_direction_change();
        if matches!(kind, TouchKind::Up | TouchKind::Cancel) {
            self.commit();
        }
    }

    fn commit(&mut self) {
        let scale = self.state.effective_scale();
        let offset = self.effective_offset();
        let offset = if self.is_enlarged() {
            self.clamp(offset, scale)
        } else {
            offset
        };
        self.state.offset_baseline = offset;
        self.state.scale_baseline = scale;
        self.state.scale_delta = 1.0;
        self.state.offset_delta = Vec2::ZERO;
        self.evaluate_bounds();
    }

    /// A drag started with initial displacement `(dx, dy)`.
    pub fn on_move_start(&mut self, dx: f64, dy: f64) {
        if self.state.is_locked() {
            return;
        }
        self.state.phase = GesturePhase::Panning;
        // A stale delta from the previous drag would make the content jump.
        self.state.offset_delta = Vec2::ZERO;
        self.evaluate_bounds();
        if self.is_enlarged() {
            self.emit(ZoomEvent::HideBars);
        }
        if self.is_at_default() && dy > 0.0 {
            log::debug!("pull down started ({dx}, {dy})");
            self.emit(ZoomEvent::PullDownStart);
        }
    }

    /// The drag moved; `(dx, dy)` is the displacement since the drag started.
    pub fn on_move(&mut self, dx: f64, dy: f64) {
        if self.state.is_locked() {
            return;
        }
        let scale = self.state.effective_scale();
        let measured = self.state.offset_baseline + self.center_shift(self.state.scale_delta);
        let target = self.clamp(measured + Vec2::new(dx, dy), scale);
        self.state.offset_delta = target - measured;
        self.render();
    }

    /// The drag ended with total displacement `(dx, dy)`.
    ///
    /// At the default scale a downward drag beyond
    /// [`crate::ZoomConfig::pull_down_threshold`] dismisses the viewer; a
    /// shorter one snaps back. Enlarged content is already in range and only
    /// re-announces its pan direction.
    pub fn on_move_end(&mut self, dx: f64, dy: f64) {
        if self.state.is_locked() {
            return;
        }
        log::debug!(
            "move end ({dx}, {dy}) at scale {}",
            self.state.effective_scale()
        );
        self.state.phase = GesturePhase::Idle;
        if self.is_at_default() && dy > self.config.pull_down_threshold {
            self.finish_pull_down();
        } else if self.is_at_default() {
            self.start_animation(self.default_transform());
            self.emit(ZoomEvent::PullDownCancel);
        } else {
            self.emit_direction_change();
        }
    }

    fn finish_pull_down(&mut self) {
        if self.state.is_exiting() {
            return;
        }
        log::info!("pull down to dismiss");
        self.emit(ZoomEvent::PullDownEnd);
        self.state.phase = GesturePhase::Exiting;
    }

    /// A pinch started at absolute viewport position `(cx, cy)`.
    ///
    /// `scale` is the host's initial pinch factor; the engine always starts
    /// from a delta of `1.0`.
    pub fn on_scale_start(&mut self, scale: f64, cx: f64, cy: f64) {
        if self.state.is_locked() {
            return;
        }
        log::debug!("scale start {scale} at ({cx}, {cy})");
        self.state.phase = GesturePhase::Pinching;
        self.state.scale_delta = 1.0;
        self.evaluate_bounds();
        self.emit(ZoomEvent::HideBars);
        self.state.zoom_center = self.zoom_center_at(Point::new(cx, cy));
    }

    /// The pinch factor relative to the start of the pinch changed.
    ///
    /// The effective scale is held between [`crate::ZoomConfig::min_scale`]
    /// and the maximum scale times [`crate::ZoomConfig::overscale_extra`].
    pub fn on_scale(&mut self, scale: f64) {
        if self.state.is_locked() {
            return;
        }
        debug_assert!(scale.is_finite(), "pinch factor must be finite, got {scale}");
        self.evaluate_bounds();
        let baseline = self.state.scale_baseline;
        let ceiling = self.state.bounds.max_scale * self.config.overscale_extra;
        let mut delta = scale;
        if baseline * delta <= self.config.min_scale {
            delta = self.config.min_scale / baseline;
        }
        if baseline * delta >= ceiling {
            delta = ceiling / baseline;
        }
        self.state.scale_delta = delta;
        self.render();
    }

    /// The pinch ended.
    ///
    /// A scale within `[default, max]` is kept as is. A smaller scale
    /// animates back to the default; a larger one animates down to the
    /// maximum about the stored zoom center.
    pub fn on_scale_end(&mut self) {
        if self.state.is_locked() {
            return;
        }
        self.state.phase = GesturePhase::Idle;
        self.evaluate_bounds();
        let scale = self.state.effective_scale();
        let default_scale = self.state.default_scale;
        let max_scale = self.state.bounds.max_scale;
        if !self.tolerance.is_below(scale, default_scale)
            && !self.tolerance.is_above(scale, max_scale)
        {
            log::debug!("scale {scale} in range, no settle needed");
            self.emit_direction_change();
            return;
        }
        let target = if self.tolerance.is_above(scale, default_scale) {
            self.settle_target(max_scale, self.state.zoom_center)
        } else {
            self.default_transform()
        };
        self.start_animation(target);
    }

    /// Double tap at absolute viewport position `(cx, cy)`.
    ///
    /// Toggles between the default scale and the double-tap scale. Zooming
    /// in centers on the tap along the long axis and fills the short axis.
    pub fn on_double_tap(&mut self, cx: f64, cy: f64) {
        if self.state.is_locked() {
            log::debug!("double tap ignored in {:?}", self.state.phase);
            return;
        }
        self.emit(ZoomEvent::HideBars);
        let target = if self.is_enlarged() {
            self.default_transform()
        } else {
            let mut center = self.zoom_center_at(Point::new(cx, cy));
            if self.geometry.fit == AspectFit::Taller {
                center.x = DEFAULT_ZOOM_CENTER.x;
            } else {
                center.y = DEFAULT_ZOOM_CENTER.y;
            }
            let scale = self.state.bounds.double_tap_scale * self.state.default_scale;
            self.settle_target(scale, center)
        };
        self.start_animation(target);
    }

    pub(crate) fn default_transform(&self) -> ZoomTransform {
        ZoomTransform::scaled(self.state.default_scale)
    }
}

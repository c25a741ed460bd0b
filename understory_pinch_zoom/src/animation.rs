// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animations: requesting them and folding their result back in.
//!
//! The engine never interpolates. It asks the host's animation driver to
//! move towards a target with an [`AnimationRequest`], ignores gestures
//! until the driver reports back, and then adopts the driver's final
//! transform as the new baseline. A driver that never reports back leaves the
//! engine locked until [`ZoomEngine::reset`].

use kurbo::{Point, Vec2};

use crate::engine::ZoomEngine;
use crate::event::{AnimationRequest, EventSink, ViewportSource, ZoomEvent};
use crate::state::{DEFAULT_ZOOM_CENTER, GesturePhase};
use crate::transform::ZoomTransform;

impl<K, V: ViewportSource, S: EventSink<K>> ZoomEngine<K, V, S> {
    /// Locks the engine and asks the host to animate towards `target`.
    pub(crate) fn start_animation(&mut self, target: ZoomTransform) {
        log::info!(
            "settle animation to scale {} offset ({}, {})",
            target.scale(),
            target.translate_x,
            target.translate_y
        );
        self.state.phase = GesturePhase::Animating;
        let animation = self.config.animation;
        self.emit(ZoomEvent::Animation(AnimationRequest {
            duration: animation.duration,
            easing: animation.easing,
            target,
        }));
    }

    /// The host's animation driver finished at `end`.
    ///
    /// The scale and translation of `end` become the new baseline, deltas are
    /// cleared, edge state is re-evaluated and the pan direction re-announced.
    /// Ignored once the viewer is exiting.
    pub fn on_animation_end(&mut self, end: ZoomTransform) {
        match self.state.phase {
            GesturePhase::Exiting => {
                log::warn!("animation end ignored while exiting");
                return;
            }
            GesturePhase::Animating => {}
            phase => log::warn!("animation end without a pending animation in {phase:?}"),
        }
        log::info!("animation end at scale {}", end.scale());
        self.state.scale_baseline = end.scale();
        self.state.scale_delta = 1.0;
        self.state.offset_baseline = end.translation();
        self.state.offset_delta = Vec2::ZERO;
        self.state.phase = GesturePhase::Idle;
        self.evaluate_bounds();
        self.emit_direction_change();
    }

    /// Transform reached by zooming to `scale` about `center`.
    ///
    /// Includes any pan in progress. Targets above the default scale are
    /// clamped into the legal range at `scale`; targets at or below it are
    /// centered.
    pub(crate) fn settle_target(&self, scale: f64, center: Point) -> ZoomTransform {
        let viewport = self.geometry.viewport;
        let baseline = self.state.scale_baseline;
        let center = center - DEFAULT_ZOOM_CENTER;
        let k = (1.0 - scale / baseline) * baseline;
        let offset = self.state.offset_baseline
            + self.state.offset_delta
            + Vec2::new(center.x * viewport.width * k, center.y * viewport.height * k);
        let offset = if self.tolerance.is_above(scale, self.state.default_scale) {
            self.geometry.offset_range(scale).clamp(offset)
        } else {
            Vec2::ZERO
        };
        ZoomTransform::scaled(scale).then_translate(offset)
    }
}

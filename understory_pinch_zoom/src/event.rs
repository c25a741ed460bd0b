// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outbound events and the host collaborators the engine talks to.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Size;

use crate::config::Easing;
use crate::direction::PanDirection;
use crate::transform::ZoomTransform;

/// Settle animation the host's driver should run.
///
/// When the driver finishes it must report the final transform back through
/// [`crate::ZoomEngine::on_animation_end`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRequest {
    /// How long the animation should take.
    pub duration: Duration,
    /// Interpolation curve.
    pub easing: Easing,
    /// Transform to interpolate towards.
    pub target: ZoomTransform,
}

/// Notification emitted by a [`crate::ZoomEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEvent {
    /// Enable (`false`) or disable (`true`) the sibling swipe-between-items gesture.
    SetDisableSwipe(bool),
    /// Pan directions the zoom surface currently consumes.
    DirectionChange(PanDirection),
    /// Hide overlay chrome (toolbars, captions) while the user zooms or pans.
    HideBars,
    /// A downward drag started at default scale; it may become a dismiss.
    PullDownStart,
    /// The pull-down passed the threshold; the viewer should close.
    PullDownEnd,
    /// The pull-down ended short of the threshold.
    PullDownCancel,
    /// Start a settle animation.
    Animation(AnimationRequest),
    /// Redraw the content with this transform.
    TransformChanged(ZoomTransform),
}

/// Receiver of [`ZoomEvent`]s.
///
/// Every event is tagged with the session key of the emitting engine, so
/// several viewers can share one bus without cross-talk.
pub trait EventSink<K> {
    /// Delivers `event` from the engine identified by `key`.
    fn emit(&mut self, key: &K, event: ZoomEvent);
}

impl<K: Clone> EventSink<K> for Vec<(K, ZoomEvent)> {
    fn emit(&mut self, key: &K, event: ZoomEvent) {
        self.push((key.clone(), event));
    }
}

impl<K, S: EventSink<K> + ?Sized> EventSink<K> for &mut S {
    fn emit(&mut self, key: &K, event: ZoomEvent) {
        (**self).emit(key, event);
    }
}

/// Pull-based source of the viewport size in device pixels.
pub trait ViewportSource {
    /// Current size of the display surface.
    fn viewport_size(&self) -> Size;
}

impl ViewportSource for Size {
    fn viewport_size(&self) -> Size {
        *self
    }
}

/// Pull-based source of the natural size of the displayed item.
pub trait ContentSource {
    /// Natural width and height of the item; zero means unknown.
    fn content_size(&self) -> Size;
}

impl ContentSource for Size {
    fn content_size(&self) -> Size {
        *self
    }
}

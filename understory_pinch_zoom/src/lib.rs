// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pinch_zoom --heading-base-level=0

//! Understory Pinch Zoom: a headless pinch/pan/zoom engine for media viewers.
//!
//! This crate turns raw gesture callbacks for a single viewer surface into a
//! bounded scale + translation, and tells the host when to hand control to a
//! sibling gesture (swiping to the next item, pulling down to dismiss).
//! It focuses on:
//! - Scale limits derived from the content and viewport aspect ratios.
//! - Zooming about a pinch or tap point while keeping the content in bounds.
//! - Edge detection and the pan directions the zoom surface consumes.
//! - Pull-down-to-dismiss at the default scale.
//! - Settle animations back into legal bounds, driven by the host.
//!
//! It does **not** decode or render anything. Callers are expected to:
//! - Forward gesture callbacks (pan, pinch, double tap, raw touch) to a
//!   [`ZoomEngine`].
//! - Draw the content with the [`ZoomTransform`] carried by
//!   [`ZoomEvent::TransformChanged`].
//! - Run the settle animations requested through [`ZoomEvent::Animation`] and
//!   report the final transform back with [`ZoomEngine::on_animation_end`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_pinch_zoom::{PanDirection, TouchKind, ZoomEngine, ZoomEvent};
//!
//! // A 2:1 photo in a square viewer, events collected into a Vec.
//! let content = Size::new(2000.0, 1000.0);
//! let viewport = Size::new(1000.0, 1000.0);
//! let mut engine = ZoomEngine::new("photo-1", &content, viewport, Vec::new());
//!
//! // Pinch to 2x around the middle of the screen.
//! engine.on_touch(TouchKind::Down);
//! engine.on_scale_start(1.0, 500.0, 500.0);
//! engine.on_scale(2.0);
//! engine.on_touch(TouchKind::Up);
//! engine.on_scale_end();
//!
//! // The image now overhangs both sides, so the surface consumes every direction.
//! assert_eq!(engine.direction(), PanDirection::ALL);
//! let last = engine.sink().last().map(|(_, event)| *event);
//! assert_eq!(last, Some(ZoomEvent::DirectionChange(PanDirection::ALL)));
//! ```
//!
//! ## Settle animations
//!
//! A pinch released beyond the maximum scale (or below the default scale)
//! requests an animation and locks the engine until the host reports back:
//!
//! ```rust
//! use kurbo::Size;
//! use understory_pinch_zoom::{ZoomEngine, ZoomEvent};
//!
//! let square = Size::new(1000.0, 1000.0);
//! let mut engine = ZoomEngine::new(0_u32, &square, square, Vec::new());
//! engine.on_scale_start(1.0, 500.0, 500.0);
//! engine.on_scale(10.0);
//! engine.on_scale_end();
//! assert!(engine.state().is_in_animation());
//!
//! let target = engine
//!     .sink()
//!     .iter()
//!     .find_map(|(_, event)| match event {
//!         ZoomEvent::Animation(request) => Some(request.target),
//!         _ => None,
//!     })
//!     .unwrap();
//! engine.on_animation_end(target);
//! assert!(!engine.state().is_in_animation());
//! assert_eq!(engine.state().scale_baseline, engine.state().bounds.max_scale);
//! ```
//!
//! ## Design notes
//!
//! - Scales are relative to the "fit" scale; `1.0` fits the content.
//! - Scale comparisons round to [`ZoomConfig::scale_digits`] decimals to avoid
//!   jitter at the default and maximum scales.
//! - Every event is tagged with the engine's session key, so several viewers
//!   may share one [`EventSink`].
//! - Logging goes through the `log` facade.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod animation;
mod bounds;
mod clamp;
mod config;
mod direction;
mod engine;
mod event;
mod gesture;
mod state;
mod transform;

pub use bounds::{AspectFit, ScaleBounds};
pub use clamp::{EdgeReach, Geometry, OffsetRange, Placement, clamp_offset};
pub use config::{AnimationSpec, ConfigError, Easing, ScaleTolerance, ZoomConfig};
pub use direction::PanDirection;
pub use engine::{ZoomEngine, ZoomEngineDebugInfo};
pub use event::{AnimationRequest, ContentSource, EventSink, ViewportSource, ZoomEvent};
pub use gesture::TouchKind;
pub use state::{DEFAULT_ZOOM_CENTER, GesturePhase, TransformState};
pub use transform::ZoomTransform;

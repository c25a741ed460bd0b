// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::bounds::{AspectFit, ScaleBounds};
use crate::clamp::{Geometry, Placement, clamp_offset};
use crate::config::{ConfigError, ScaleTolerance, ZoomConfig};
use crate::direction::PanDirection;
use crate::event::{ContentSource, EventSink, ViewportSource, ZoomEvent};
use crate::state::{DEFAULT_ZOOM_CENTER, GesturePhase, TransformState};
use crate::transform::ZoomTransform;

/// Pinch/pan/zoom engine for one media viewer surface.
///
/// The engine owns the [`TransformState`] of the surface and turns gesture
/// callbacks into a bounded [`ZoomTransform`]. It talks to the host through
/// three collaborators:
/// - a [`ViewportSource`] read whenever the surface is (re)measured,
/// - an [`EventSink`] receiving every [`ZoomEvent`], tagged with `key`,
/// - the content size passed to [`ZoomEngine::new`] and
///   [`ZoomEngine::on_data_changed`].
///
/// All methods are synchronous state transitions; the only deferred step is
/// the settle animation, whose completion the host reports through
/// [`ZoomEngine::on_animation_end`].
#[derive(Clone, Debug)]
pub struct ZoomEngine<K, V, S> {
    key: K,
    viewport_source: V,
    pub(crate) sink: S,
    pub(crate) config: ZoomConfig,
    pub(crate) tolerance: ScaleTolerance,
    pub(crate) geometry: Geometry,
    pub(crate) state: TransformState,
}

impl<K, V: ViewportSource, S: EventSink<K>> ZoomEngine<K, V, S> {
    /// Creates an engine with the default [`ZoomConfig`].
    ///
    /// `key` identifies this viewer on a shared event bus.
    #[must_use]
    pub fn new(key: K, content: &impl ContentSource, viewport: V, sink: S) -> Self {
        Self::build(key, content, viewport, sink, ZoomConfig::default())
    }

    /// Creates an engine with a custom configuration.
    pub fn with_config(
        key: K,
        content: &impl ContentSource,
        viewport: V,
        sink: S,
        config: ZoomConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(key, content, viewport, sink, config))
    }

    fn build(key: K, content: &impl ContentSource, viewport: V, sink: S, config: ZoomConfig) -> Self {
        let content = sanitize_content(content.content_size(), config.fallback_content_extent);
        let geometry = Geometry::new(content, viewport.viewport_size());
        let bounds = if geometry.viewport_is_empty() {
            log::debug!("viewport not laid out yet, deferring zoom bounds");
            ScaleBounds::default()
        } else {
            ScaleBounds::compute(geometry.content, geometry.viewport, &config)
        };
        let state = TransformState {
            bounds,
            ..TransformState::default()
        };
        Self {
            key,
            viewport_source: viewport,
            sink,
            tolerance: config.tolerance(),
            config,
            geometry,
            state,
        }
    }

    /// Session key attached to every emitted event.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Current transform state.
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Content and viewport sizes the bounds were derived from.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Event sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink, for example to drain buffered events.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Sets the "fit" scale and makes it the committed scale.
    ///
    /// Hosts that pre-scale the content call this once after construction.
    pub fn set_default_scale(&mut self, scale: f64) {
        debug_assert!(
            scale.is_finite() && scale > 0.0,
            "default scale must be positive, got {scale}"
        );
        self.state.default_scale = scale;
        self.state.scale_baseline = scale;
    }

    /// The displayed item changed; rederives bounds from its size.
    ///
    /// A zero dimension falls back to [`ZoomConfig::fallback_content_extent`].
    pub fn on_data_changed(&mut self, content: &impl ContentSource) {
        let content = sanitize_content(content.content_size(), self.config.fallback_content_extent);
        self.rebuild_geometry(content, self.geometry.viewport);
    }

    /// The surface was resized; re-reads the viewport and rederives bounds.
    ///
    /// A viewport with a zero extent (not laid out yet) keeps the previous
    /// bounds until a real size arrives.
    pub fn on_component_size_changed(&mut self) {
        let viewport = self.viewport_source.viewport_size();
        self.rebuild_geometry(self.geometry.content, viewport);
    }

    fn rebuild_geometry(&mut self, content: Size, viewport: Size) {
        self.geometry = Geometry::new(content, viewport);
        if self.geometry.viewport_is_empty() {
            log::debug!("viewport {viewport:?} is empty, keeping previous zoom bounds");
            self.evaluate_bounds();
            return;
        }
        self.state.bounds = ScaleBounds::compute(content, viewport, &self.config);
        log::info!(
            "zoom bounds rebuilt: max {}, double tap {}",
            self.state.bounds.max_scale,
            self.state.bounds.double_tap_scale
        );
        self.evaluate_bounds();
    }

    /// Returns the surface to the identity transform and unlocks it.
    ///
    /// Clears any outstanding animation and the exiting state, then
    /// announces the resulting pan direction.
    pub fn reset(&mut self) {
        log::info!("zoom engine reset from {:?}", self.state.phase);
        self.state.reset_transform();
        self.state.phase = GesturePhase::Idle;
        self.emit_direction_change();
    }

    /// Transform the renderer should currently draw.
    ///
    /// Enlarged content is clamped into its legal range; content at the
    /// default scale may only be pulled downward; content shrunk below the
    /// default scale stays centered.
    #[must_use]
    pub fn current_transform(&self) -> ZoomTransform {
        ZoomTransform::scaled(self.state.effective_scale()).then_translate(self.rendered_offset())
    }

    /// Pan directions currently consumed by the surface.
    #[must_use]
    pub fn direction(&self) -> PanDirection {
        PanDirection::from_reach(self.is_enlarged(), self.state.reach)
    }

    /// Recomputes which viewport edges the displayed content touches.
    pub fn evaluate_bounds(&mut self) {
        let placement = Placement {
            scale: self.state.effective_scale(),
            offset: self.rendered_offset(),
        };
        self.state.reach = self.geometry.edge_reach(placement, self.config.edge_slack);
    }

    /// Snapshot of the engine for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomEngineDebugInfo {
        ZoomEngineDebugInfo {
            state: self.state,
            geometry: self.geometry,
            transform: self.current_transform(),
            direction: self.direction(),
        }
    }

    pub(crate) fn emit(&mut self, event: ZoomEvent) {
        self.sink.emit(&self.key, event);
    }

    pub(crate) fn is_enlarged(&self) -> bool {
        self.tolerance
            .is_above(self.state.effective_scale(), self.state.default_scale)
    }

    pub(crate) fn is_at_default(&self) -> bool {
        self.tolerance
            .is_at(self.state.effective_scale(), self.state.default_scale)
    }

    /// Translation that keeps the zoom center fixed while zooming by
    /// `factor` relative to the committed scale.
    pub(crate) fn center_shift(&self, factor: f64) -> Vec2 {
        let center = self.state.zoom_center - DEFAULT_ZOOM_CENTER;
        let k = (1.0 - factor) * self.state.scale_baseline;
        Vec2::new(
            center.x * self.geometry.viewport.width * k,
            center.y * self.geometry.viewport.height * k,
        )
    }

    /// Baseline plus delta plus the zoom-center shift, before clamping.
    pub(crate) fn effective_offset(&self) -> Vec2 {
        self.state.offset_baseline + self.state.offset_delta + self.center_shift(self.state.scale_delta)
    }

    pub(crate) fn clamp(&self, offset: Vec2, scale: f64) -> Vec2 {
        clamp_offset(
            &self.geometry,
            offset,
            scale,
            self.state.default_scale,
            self.tolerance,
        )
    }

    fn rendered_offset(&self) -> Vec2 {
        let scale = self.state.effective_scale();
        if self.tolerance.is_below(scale, self.state.default_scale) {
            Vec2::ZERO
        } else {
            self.clamp(self.effective_offset(), scale)
        }
    }

    /// Pushes the current transform to the renderer and refreshes edge state.
    pub(crate) fn render(&mut self) {
        let transform = self.current_transform();
        log::debug!(
            "render scale {} offset ({}, {})",
            transform.scale(),
            transform.translate_x,
            transform.translate_y
        );
        self.emit(ZoomEvent::TransformChanged(transform));
        self.evaluate_bounds();
    }

    /// Announces the permitted pan directions, unless the viewer is closing.
    pub(crate) fn emit_direction_change(&mut self) {
        let direction = self.direction();
        log::debug!(
            "direction {direction:?} from reach {:?} at scale {}",
            self.state.reach,
            self.state.effective_scale()
        );
        if self.state.is_exiting() {
            return;
        }
        self.emit(ZoomEvent::SetDisableSwipe(direction.disables_swipe()));
        self.emit(ZoomEvent::DirectionChange(direction));
    }

    /// Converts an absolute touch point into a zoom center fraction.
    ///
    /// The fraction is clamped to the zoom-center margins. A touch outside
    /// the displayed content along the letterboxed axis snaps that axis to
    /// the middle.
    pub(crate) fn zoom_center_at(&self, touch: Point) -> Point {
        if self.geometry.viewport_is_empty() {
            return DEFAULT_ZOOM_CENTER;
        }
        let scale = self.state.effective_scale();
        let placement = Placement {
            scale,
            offset: self.rendered_offset(),
        };
        let viewport = self.geometry.viewport;
        let bounds = self.state.bounds;
        let frame = self.geometry.frame_origin(placement);

        let mut x = ((touch.x - frame.x) / (viewport.width * scale))
            .clamp(bounds.left_most, 1.0 - bounds.left_most);
        let mut y = ((touch.y - frame.y) / (viewport.height * scale))
            .clamp(bounds.top_most, 1.0 - bounds.top_most);

        let origin = self.geometry.display_origin(placement);
        let shown = self.geometry.display_size(scale);
        if self.geometry.fit == AspectFit::Wider {
            if touch.y < origin.y || touch.y > origin.y + shown.height {
                y = DEFAULT_ZOOM_CENTER.y;
            }
        } else if touch.x < origin.x || touch.x > origin.x + shown.width {
            x = DEFAULT_ZOOM_CENTER.x;
        }
        log::debug!("zoom center ({x}, {y}) for touch {touch:?}");
        Point::new(x, y)
    }
}

fn sanitize_content(size: Size, fallback: f64) -> Size {
    let width = if size.width == 0.0 { fallback } else { size.width };
    let height = if size.height == 0.0 {
        fallback
    } else {
        size.height
    };
    Size::new(width, height)
}

/// Debug snapshot of a [`ZoomEngine`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomEngineDebugInfo {
    /// Full transform state.
    pub state: TransformState,
    /// Content and viewport sizes.
    pub geometry: Geometry,
    /// Transform the renderer should currently draw.
    pub transform: ZoomTransform,
    /// Pan directions currently consumed.
    pub direction: PanDirection,
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size};

    use super::ZoomEngine;
    use crate::bounds::ScaleBounds;
    use crate::config::{ConfigError, ZoomConfig};
    use crate::direction::PanDirection;
    use crate::event::ZoomEvent;
    use crate::gesture::TouchKind;
    use crate::state::DEFAULT_ZOOM_CENTER;

    type Engine = ZoomEngine<u32, Size, Vec<(u32, ZoomEvent)>>;

    fn engine(content: Size) -> Engine {
        ZoomEngine::new(7, &content, Size::new(1000.0, 1000.0), Vec::new())
    }

    #[test]
    fn zero_content_falls_back() {
        let e = engine(Size::new(0.0, 0.0));
        let fallback = ZoomConfig::default().fallback_content_extent;
        assert_eq!(e.geometry().content, Size::new(fallback, fallback));
    }

    #[test]
    fn with_config_rejects_invalid_config() {
        let config = ZoomConfig {
            pull_down_threshold: -1.0,
            ..ZoomConfig::default()
        };
        let result: Result<Engine, _> = ZoomEngine::with_config(
            1,
            &Size::new(10.0, 10.0),
            Size::new(10.0, 10.0),
            Vec::new(),
            config,
        );
        assert!(matches!(result, Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn reset_emits_vertical_direction_with_key() {
        let mut e = engine(Size::new(2000.0, 1000.0));
        e.reset();
        assert_eq!(
            e.sink().as_slice(),
            &[
                (7, ZoomEvent::SetDisableSwipe(false)),
                (7, ZoomEvent::DirectionChange(PanDirection::VERTICAL)),
            ]
        );
    }

    #[test]
    fn data_change_rebuilds_bounds() {
        let mut e = engine(Size::new(2000.0, 1000.0));
        let wide_tap = e.state().bounds.double_tap_scale;
        e.on_data_changed(&Size::new(1000.0, 4000.0));
        assert!((wide_tap - 2.0).abs() < 1e-9);
        assert!((e.state().bounds.double_tap_scale - 4.0).abs() < 1e-9);
    }

    #[test]
    fn unlaid_out_viewport_defers_bounds_until_resize() {
        let mut e: Engine =
            ZoomEngine::new(0, &Size::new(2000.0, 1000.0), Size::ZERO, Vec::new());
        assert_eq!(e.state().bounds, ScaleBounds::default());

        // Gestures on an empty surface stay finite.
        e.on_scale_start(1.0, 10.0, 10.0);
        assert_eq!(e.state().zoom_center, DEFAULT_ZOOM_CENTER);
        e.on_scale(1.2);
        let t = e.current_transform();
        assert!(t.translate_x.is_finite() && t.translate_y.is_finite());
        e.on_touch(TouchKind::Up);

        e.viewport_source = Size::new(1000.0, 1000.0);
        e.on_component_size_changed();
        assert!((e.state().bounds.double_tap_scale - 2.0).abs() < 1e-9);
        assert!((e.state().bounds.top_most - 0.25).abs() < 1e-9);

        // Collapsing again keeps the last real bounds.
        e.viewport_source = Size::ZERO;
        e.on_component_size_changed();
        assert!((e.state().bounds.double_tap_scale - 2.0).abs() < 1e-9);
    }

    fn center_after_touch(content: Size, x: f64, y: f64) -> Point {
        let mut e = engine(content);
        e.on_scale_start(1.0, x, y);
        e.state().zoom_center
    }

    fn approx_point(p: Point, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9
    }

    #[test]
    fn zoom_center_on_wide_content() {
        let wide = Size::new(2000.0, 1000.0);
        // The image occupies rows 250..750 of the viewport.
        let inside = center_after_touch(wide, 300.0, 260.0);
        assert!(approx_point(inside, 0.3, 0.26), "{inside:?}");
        let above = center_after_touch(wide, 300.0, 100.0);
        assert!(approx_point(above, 0.3, 0.5), "{above:?}");
        // Past the left viewport edge the horizontal fraction clamps to the margin.
        let beyond = center_after_touch(wide, -50.0, 400.0);
        assert!(approx_point(beyond, 0.0, 0.4), "{beyond:?}");
    }

    #[test]
    fn zoom_center_on_tall_content() {
        let tall = Size::new(500.0, 2000.0);
        // The image occupies columns 375..625 and left_most is 0.375.
        let inside = center_after_touch(tall, 400.0, 300.0);
        assert!(approx_point(inside, 0.4, 0.3), "{inside:?}");
        let beside = center_after_touch(tall, 100.0, 300.0);
        assert!(approx_point(beside, 0.5, 0.3), "{beside:?}");
        let below = center_after_touch(tall, 500.0, 1200.0);
        assert!(approx_point(below, 0.5, 1.0), "{below:?}");
    }

    #[test]
    fn zoom_center_respects_margins_when_enlarged() {
        let mut e = engine(Size::new(2000.0, 1000.0));
        e.on_scale_start(1.0, 500.0, 500.0);
        e.on_scale(2.0);
        e.on_touch(TouchKind::Up);
        e.on_scale_end();
        // At 2x the image spans the whole viewport height; its top row maps
        // to the top margin fraction.
        e.on_scale_start(1.0, 500.0, 0.0);
        let center = e.state().zoom_center;
        assert!(approx_point(center, 0.5, 0.25), "{center:?}");
        let top_most = e.state().bounds.top_most;
        assert!((top_most - 0.25).abs() < 1e-9);
    }

    #[test]
    fn identity_transform_when_idle() {
        let e = engine(Size::new(1000.0, 1000.0));
        let info = e.debug_info();
        assert_eq!(info.transform, crate::ZoomTransform::IDENTITY);
        assert_eq!(info.direction, PanDirection::VERTICAL);
    }
}

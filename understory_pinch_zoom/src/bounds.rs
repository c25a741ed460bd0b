// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale limits derived from the content and viewport aspect ratios.

use kurbo::Size;

use crate::config::ZoomConfig;

/// How the content's aspect ratio relates to the viewport's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AspectFit {
    /// Content is relatively taller; it fits by height and leaves side margins.
    Taller,
    /// Aspect ratios match; the content fills the viewport exactly.
    Same,
    /// Content is relatively wider; it fits by width and leaves top/bottom margins.
    Wider,
}

impl AspectFit {
    /// Classifies `content` against `viewport` by cross-multiplying extents.
    #[must_use]
    pub fn classify(content: Size, viewport: Size) -> Self {
        let content_cross = content.width * viewport.height;
        let viewport_cross = viewport.width * content.height;
        if content_cross < viewport_cross {
            Self::Taller
        } else if content_cross == viewport_cross {
            Self::Same
        } else {
            Self::Wider
        }
    }
}

/// Scale limits and zoom-center margins for one content/viewport pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    /// Which axis constrains the fit.
    pub fit: AspectFit,
    /// Largest scale a pinch may settle at.
    pub max_scale: f64,
    /// Scale reached by a double tap; fills the viewport along the short axis.
    pub double_tap_scale: f64,
    /// Horizontal margin fraction; the zoom center stays in `[left_most, 1 - left_most]`.
    pub left_most: f64,
    /// Vertical margin fraction; the zoom center stays in `[top_most, 1 - top_most]`.
    pub top_most: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            fit: AspectFit::Same,
            max_scale: 1.0,
            double_tap_scale: 1.0,
            left_most: 0.0,
            top_most: 0.0,
        }
    }
}

impl ScaleBounds {
    /// Derives the bounds for `content` shown in `viewport`.
    ///
    /// Both sizes must be finite and non-negative. If either has a zero
    /// extent there is nothing to fit and [`ScaleBounds::default`] is returned.
    #[must_use]
    pub fn compute(content: Size, viewport: Size, config: &ZoomConfig) -> Self {
        debug_assert!(
            content.is_finite() && content.width >= 0.0 && content.height >= 0.0,
            "content size must be finite and non-negative, got {content:?}"
        );
        debug_assert!(
            viewport.is_finite() && viewport.width >= 0.0 && viewport.height >= 0.0,
            "viewport size must be finite and non-negative, got {viewport:?}"
        );
        if content.is_zero_area() || viewport.is_zero_area() {
            return Self::default();
        }
        let (cw, ch) = (content.width, content.height);
        let (vw, vh) = (viewport.width, viewport.height);

        let fit = AspectFit::classify(content, viewport);
        let mut bounds = match fit {
            AspectFit::Taller => Self {
                fit,
                max_scale: ch / vh,
                double_tap_scale: vw * ch / cw / vh,
                left_most: (1.0 - vh * cw / ch / vw) / 2.0,
                top_most: 0.0,
            },
            AspectFit::Same => Self {
                fit,
                max_scale: config.same_ratio_scale * config.max_scale_extra,
                double_tap_scale: config.same_ratio_scale,
                left_most: 0.0,
                top_most: 0.0,
            },
            AspectFit::Wider => Self {
                fit,
                max_scale: cw / vw,
                double_tap_scale: vh * cw / ch / vw,
                left_most: 0.0,
                top_most: (1.0 - vw * ch / cw / vh) / 2.0,
            },
        };

        bounds.max_scale = bounds.max_scale.max(config.min_max_scale);
        if bounds.double_tap_scale > bounds.max_scale {
            bounds.max_scale = bounds.double_tap_scale * config.max_scale_extra;
        }
        log::debug!(
            "scale bounds for {cw}x{ch} in {vw}x{vh}: max {}, double tap {}, margins [{}, {}]",
            bounds.max_scale,
            bounds.double_tap_scale,
            bounds.left_most,
            bounds.top_most
        );
        bounds
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{AspectFit, ScaleBounds};
    use crate::config::ZoomConfig;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wide_content_fits_by_width() {
        let config = ZoomConfig::default();
        let b = ScaleBounds::compute(
            Size::new(2000.0, 1000.0),
            Size::new(1000.0, 1000.0),
            &config,
        );
        assert_eq!(b.fit, AspectFit::Wider);
        assert!(approx(b.double_tap_scale, 2.0));
        assert!(approx(b.top_most, 0.25));
        assert!(approx(b.left_most, 0.0));
        // Natural max of 2.0 is raised to the configured minimum.
        assert!(approx(b.max_scale, config.min_max_scale));
    }

    #[test]
    fn tall_content_fits_by_height() {
        let config = ZoomConfig::default();
        let b = ScaleBounds::compute(
            Size::new(1000.0, 8000.0),
            Size::new(1000.0, 1000.0),
            &config,
        );
        assert_eq!(b.fit, AspectFit::Taller);
        assert!(approx(b.double_tap_scale, 8.0));
        assert!(approx(b.left_most, (1.0 - 0.125) / 2.0));
        assert!(approx(b.top_most, 0.0));
        assert!(approx(b.max_scale, 8.0));
    }

    #[test]
    fn same_ratio_uses_configured_factor() {
        let config = ZoomConfig::default();
        let b = ScaleBounds::compute(
            Size::new(400.0, 300.0),
            Size::new(800.0, 600.0),
            &config,
        );
        assert_eq!(b.fit, AspectFit::Same);
        assert!(approx(b.double_tap_scale, config.same_ratio_scale));
        assert!(b.max_scale >= config.min_max_scale);
        assert!(approx(b.left_most, 0.0) && approx(b.top_most, 0.0));
    }

    #[test]
    fn max_scale_never_below_configured_minimum() {
        let config = ZoomConfig::default();
        for (cw, ch) in [(10.0, 10.0), (100.0, 30.0), (30.0, 100.0), (5000.0, 4999.0)] {
            let b = ScaleBounds::compute(Size::new(cw, ch), Size::new(640.0, 480.0), &config);
            assert!(b.max_scale >= config.min_max_scale, "{cw}x{ch}: {b:?}");
        }
    }

    #[test]
    fn empty_viewport_yields_default_bounds() {
        let config = ZoomConfig::default();
        let b = ScaleBounds::compute(Size::new(2000.0, 1000.0), Size::ZERO, &config);
        assert_eq!(b, ScaleBounds::default());
    }

    #[test]
    fn double_tap_above_max_raises_max_with_extra() {
        // Very tall but low resolution: natural max (0.5) is tiny, double tap is 10.
        let config = ZoomConfig::default();
        let b = ScaleBounds::compute(
            Size::new(50.0, 500.0),
            Size::new(1000.0, 1000.0),
            &config,
        );
        assert!(approx(b.double_tap_scale, 10.0));
        assert!(approx(b.max_scale, 10.0 * config.max_scale_extra));
    }
}

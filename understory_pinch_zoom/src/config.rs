// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for the zoom engine.

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Easing curve requested for settle animations.
///
/// The engine never interpolates itself; the curve is passed through to the
/// host's animation driver inside [`crate::AnimationRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Standard ease (slow start, fast middle, slow end).
    #[default]
    Ease,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
}

/// Duration and curve of a settle animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSpec {
    /// How long the driver should take to reach the target transform.
    pub duration: Duration,
    /// Interpolation curve.
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::Ease,
        }
    }
}

/// Numeric policy of a [`crate::ZoomEngine`].
///
/// The defaults match a typical photo viewer. All scale values are relative to
/// the "fit" scale, so `1.0` means the content exactly fits the viewport along
/// its constraining axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Double-tap scale used when content and viewport share an aspect ratio.
    pub same_ratio_scale: f64,
    /// Factor applied to the double-tap scale when it has to raise the maximum scale.
    pub max_scale_extra: f64,
    /// How far a pinch may overshoot the maximum scale before snapping back.
    pub overscale_extra: f64,
    /// Lower bound for the derived maximum scale.
    pub min_max_scale: f64,
    /// Absolute floor of the effective scale while pinching.
    pub min_scale: f64,
    /// Downward drag, in device pixels, that dismisses the viewer.
    pub pull_down_threshold: f64,
    /// Slack, in device pixels, used when testing whether an edge is reached.
    pub edge_slack: f64,
    /// Decimal digits kept when comparing scales.
    ///
    /// At most [`ZoomConfig::MAX_SCALE_DIGITS`].
    pub scale_digits: u32,
    /// Replacement for a content dimension reported as zero.
    pub fallback_content_extent: f64,
    /// Settle animation description.
    pub animation: AnimationSpec,
}

impl ZoomConfig {
    /// Largest accepted [`ZoomConfig::scale_digits`].
    ///
    /// Beyond this an `f64` scale has no decimal digits left to round.
    pub const MAX_SCALE_DIGITS: u32 = 15;
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            same_ratio_scale: 2.0,
            max_scale_extra: 1.2,
            overscale_extra: 1.5,
            min_max_scale: 4.0,
            min_scale: 0.5,
            pull_down_threshold: 80.0,
            edge_slack: 1.0,
            scale_digits: 3,
            fallback_content_extent: 256.0,
            animation: AnimationSpec::default(),
        }
    }
}

impl ZoomConfig {
    /// Checks that every field is usable by the engine.
    ///
    /// Scales and extents must be finite and strictly positive, and the two
    /// "extra" factors must not shrink the value they are applied to.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("same_ratio_scale", self.same_ratio_scale)?;
        positive("min_max_scale", self.min_max_scale)?;
        positive("min_scale", self.min_scale)?;
        positive("fallback_content_extent", self.fallback_content_extent)?;
        at_least_one("max_scale_extra", self.max_scale_extra)?;
        at_least_one("overscale_extra", self.overscale_extra)?;
        non_negative("pull_down_threshold", self.pull_down_threshold)?;
        non_negative("edge_slack", self.edge_slack)?;
        if self.scale_digits > Self::MAX_SCALE_DIGITS {
            return Err(ConfigError::TooManyDigits {
                digits: self.scale_digits,
                max: Self::MAX_SCALE_DIGITS,
            });
        }
        if self.min_scale > self.min_max_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.min_max_scale,
            });
        }
        Ok(())
    }

    /// Returns the tolerance helper configured by [`ZoomConfig::scale_digits`].
    #[must_use]
    pub fn tolerance(&self) -> ScaleTolerance {
        ScaleTolerance::new(self.scale_digits)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_least_one(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorBelowOne { field, value })
    }
}

/// Rejected [`ZoomConfig`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A field is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A field that must be strictly positive is zero or negative.
    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A field that must not be negative is negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A multiplicative factor would shrink instead of grow.
    #[error("`{field}` must be at least 1.0, got {value}")]
    FactorBelowOne {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// More decimal digits were requested than an `f64` scale can hold.
    #[error("`scale_digits` must be at most {max}, got {digits}")]
    TooManyDigits {
        /// Configured digit count.
        digits: u32,
        /// Largest accepted digit count.
        max: u32,
    },
    /// The pinch floor sits above the smallest permitted maximum.
    #[error("`min_scale` ({min}) exceeds `min_max_scale` ({max})")]
    InvertedScaleRange {
        /// Configured floor.
        min: f64,
        /// Configured lower bound of the maximum scale.
        max: f64,
    },
}

/// Decimal-rounding comparison of scale factors.
///
/// Scales are compared after rounding to a fixed number of decimal places so
/// that values produced by long chains of multiplications (for example
/// `baseline * delta` after several pinches) do not oscillate around
/// boundaries such as the default scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTolerance {
    factor: f64,
}

impl ScaleTolerance {
    /// Creates a tolerance that keeps `digits` decimal places.
    ///
    /// `digits` is capped at [`ZoomConfig::MAX_SCALE_DIGITS`].
    #[must_use]
    pub fn new(digits: u32) -> Self {
        let digits = digits.min(ZoomConfig::MAX_SCALE_DIGITS);
        let factor = (0..digits).fold(1.0_f64, |f, _| f * 10.0);
        Self { factor }
    }

    fn quantize(self, value: f64) -> f64 {
        (value * self.factor).round()
    }

    /// Rounds `value` to the configured number of decimal places.
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        self.quantize(value) / self.factor
    }

    /// `a > b` after rounding.
    #[must_use]
    pub fn is_above(self, a: f64, b: f64) -> bool {
        self.quantize(a) > self.quantize(b)
    }

    /// `a < b` after rounding.
    #[must_use]
    pub fn is_below(self, a: f64, b: f64) -> bool {
        self.quantize(a) < self.quantize(b)
    }

    /// `a == b` after rounding.
    #[must_use]
    pub fn is_at(self, a: f64, b: f64) -> bool {
        self.quantize(a) == self.quantize(b)
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};

/// Axis-aligned scale + translation applied to the displayed content.
///
/// The content is scaled about the viewport center and then translated by
/// `(translate_x, translate_y)` device pixels. Rotation and skew never occur
/// in pinch/pan/zoom, so four components are enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal translation in device pixels.
    pub translate_x: f64,
    /// Vertical translation in device pixels.
    pub translate_y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    /// The transform that leaves content untouched.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Returns [`ZoomTransform::IDENTITY`].
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// A uniform scale with no translation.
    #[must_use]
    pub const fn scaled(scale: f64) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn translated(offset: Vec2) -> Self {
        Self::IDENTITY.then_translate(offset)
    }

    /// Adds `offset` to the translation component.
    #[must_use]
    pub fn then_translate(self, offset: Vec2) -> Self {
        Self {
            translate_x: self.translate_x + offset.x,
            translate_y: self.translate_y + offset.y,
            ..self
        }
    }

    /// The uniform scale of this transform.
    ///
    /// Only the horizontal component is read; the engine always produces
    /// uniform scales.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale_x
    }

    /// The translation component.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Converts into a Kurbo affine for renderers that work in Kurbo types.
    ///
    /// Scaling happens about the origin, so callers drawing about the viewport
    /// center should conjugate with a translation to the center.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Reads scale and translation out of a Kurbo affine, dropping any shear.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, _, _, d, e, f] = affine.as_coeffs();
        Self {
            scale_x: a,
            scale_y: d,
            translate_x: e,
            translate_y: f,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Vec2};

    use super::ZoomTransform;

    #[test]
    fn constructors_compose() {
        let t = ZoomTransform::scaled(2.0).then_translate(Vec2::new(10.0, -4.0));
        assert_eq!(t.scale(), 2.0);
        assert_eq!(t.scale_y, 2.0);
        assert_eq!(t.translation(), Vec2::new(10.0, -4.0));
        assert_eq!(
            ZoomTransform::translated(Vec2::new(3.0, 4.0)).scale(),
            ZoomTransform::identity().scale()
        );
    }

    #[test]
    fn affine_bridge_keeps_components() {
        let t = ZoomTransform::scaled(3.0).then_translate(Vec2::new(5.0, 7.0));
        let affine = t.to_affine();
        let p = affine * Point::new(1.0, 1.0);
        assert!((p.x - 8.0).abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);
        assert_eq!(ZoomTransform::from_affine(affine), t);
        assert_eq!(
            ZoomTransform::from_affine(Affine::IDENTITY),
            ZoomTransform::IDENTITY
        );
    }
}

//! Scale/rotate/translate record.
//!
//! A transform is the ordered triple the scene language exposes. However
//! the fields are written in the source text, composition order is fixed:
//! scale first, then rotation, then translation. Rotation angles are Euler
//! degrees applied in X·Y·Z order (`glam::EulerRot::XYZ`); they are
//! converted to radians only when the matrix is built.

use glam::{DAffine3, DQuat, DVec3, EulerRot};

/// A declared transform. Defaults to the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Per-axis scale factors.
    pub scale: DVec3,
    /// Euler rotation in degrees, X·Y·Z order.
    pub rotate: DVec3,
    /// Translation.
    pub translate: DVec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: DVec3::ONE,
        rotate: DVec3::ZERO,
        translate: DVec3::ZERO,
    };

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Builds the affine matrix applying scale, then rotation, then
    /// translation to column vectors.
    #[must_use]
    pub fn to_affine(&self) -> DAffine3 {
        let rotation = DQuat::from_euler(
            EulerRot::XYZ,
            self.rotate.x.to_radians(),
            self.rotate.y.to_radians(),
            self.rotate.z.to_radians(),
        );
        DAffine3::from_scale_rotation_translation(self.scale, rotation, self.translate)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

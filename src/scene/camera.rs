//! Resolved camera.
//!
//! Stores the declared fields (location, look-at target, sky vector, field
//! of view) and derives the orthonormal viewing basis from them. The
//! horizontal field of view is the declared angle; the vertical field of
//! view is divided by the output aspect ratio, so a 4:3 frame at the 39°
//! default sees 29.25° vertically.

use glam::DVec3;

/// Default sky (up-reference) vector.
pub const DEFAULT_SKY: DVec3 = DVec3::new(0.0, 1.0, 0.0);

/// Default field of view in degrees. Roughly simulates a 50mm lens on a
/// 35mm camera.
pub const DEFAULT_FOV: f64 = 39.0;

/// The single viewpoint of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub location: DVec3,
    /// The point the camera looks at.
    pub look_at: DVec3,
    /// Up-reference used to orient the viewing basis.
    pub sky: DVec3,
    /// Horizontal field of view in degrees.
    pub field_of_view: f64,
    /// Output aspect ratio (width / height) used to derive the vertical
    /// field of view.
    pub aspect: f64,
}

impl Camera {
    /// Unit vector from the eye towards the look-at point.
    #[must_use]
    pub fn dir(&self) -> DVec3 {
        (self.look_at - self.location).normalize()
    }

    /// Unit vector to the right of the viewing direction.
    #[must_use]
    pub fn right(&self) -> DVec3 {
        self.sky.cross(self.dir()).normalize()
    }

    /// Unit up vector of the viewing basis (orthogonal to `dir` and
    /// `right`, unlike the raw `sky` reference).
    #[must_use]
    pub fn up(&self) -> DVec3 {
        let dir = self.dir();
        dir.cross(self.sky.cross(dir).normalize()).normalize()
    }

    /// Horizontal field of view in radians.
    #[must_use]
    pub fn hfov(&self) -> f64 {
        self.field_of_view.to_radians()
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn vfov(&self) -> f64 {
        self.hfov() / self.aspect
    }
}

//! The final, fully resolved scene.
//!
//! The only long-lived output of a compilation: an immutable value exposing
//! read-only access to the camera, the lights and the world-space
//! primitives. Declaration order is preserved throughout.

use glam::{DAffine3, DVec3};

use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::material::Material;

/// Tolerance for treating three axis scales as uniform.
const UNIFORM_SCALE_EPSILON: f64 = 1e-9;

/// The geometry of a primitive, in the local coordinates it was declared
/// in. World placement lives in the owning [`Primitive`]'s matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { centre: DVec3, radius: f64 },
    Plane { normal: DVec3, offset: f64 },
    Box { lower: DVec3, upper: DVec3 },
}

/// A renderable primitive: local geometry, material, and the composed
/// local-to-world affine accumulated from every enclosing group (identity
/// for a primitive declared at the scene root with no transform of its
/// own).
///
/// A sphere whose matrix carries non-uniform scale is an ellipsoid; the
/// renderer intersects the local sphere through the matrix. In that case
/// [`Primitive::uniform_scale`] and [`Primitive::world_radius`] return
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    pub world: DAffine3,
}

impl Primitive {
    /// The world-space centre for spheres and boxes (the box centre is the
    /// midpoint of its corners); `None` for planes.
    #[must_use]
    pub fn world_centre(&self) -> Option<DVec3> {
        match self.shape {
            Shape::Sphere { centre, .. } => Some(self.world.transform_point3(centre)),
            Shape::Box { lower, upper } => {
                Some(self.world.transform_point3((lower + upper) * 0.5))
            }
            Shape::Plane { .. } => None,
        }
    }

    /// The single scale factor of this primitive's matrix, when all three
    /// axes agree. `None` under non-uniform scale.
    #[must_use]
    pub fn uniform_scale(&self) -> Option<f64> {
        let sx = self.world.matrix3.x_axis.length();
        let sy = self.world.matrix3.y_axis.length();
        let sz = self.world.matrix3.z_axis.length();
        let uniform = (sx - sy).abs() <= UNIFORM_SCALE_EPSILON
            && (sy - sz).abs() <= UNIFORM_SCALE_EPSILON;
        uniform.then(|| (sx + sy + sz) / 3.0)
    }

    /// The world-space radius of a sphere under uniform scale. `None` for
    /// other shapes and for ellipsoids.
    #[must_use]
    pub fn world_radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Sphere { radius, .. } => self.uniform_scale().map(|s| radius * s),
            _ => None,
        }
    }

    /// The world-space plane `(normal, offset)` for planes: the normal is
    /// carried through the inverse-transpose, the offset recomputed from a
    /// transformed point on the plane.
    #[must_use]
    pub fn world_plane(&self) -> Option<(DVec3, f64)> {
        match self.shape {
            Shape::Plane { normal, offset } => {
                let world_normal = self
                    .world
                    .matrix3
                    .inverse()
                    .transpose()
                    .mul_vec3(normal)
                    .normalize();
                let point_on_plane = self.world.transform_point3(normal.normalize() * offset);
                Some((world_normal, world_normal.dot(point_on_plane)))
            }
            _ => None,
        }
    }
}

/// A fully resolved scene: exactly one camera, zero or more lights, and
/// an ordered list of world-space primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    camera: Camera,
    lights: Vec<PointLight>,
    primitives: Vec<Primitive>,
}

impl Scene {
    pub(crate) fn new(camera: Camera, lights: Vec<PointLight>, primitives: Vec<Primitive>) -> Self {
        Self {
            camera,
            lights,
            primitives,
        }
    }

    /// The scene's single camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The lights, world-space locations, in declaration order.
    #[must_use]
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// The primitives, in declaration order (pre-order across groups).
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

//! Resolved scene hierarchy.
//!
//! The output of the semantic resolver, before transform composition. The
//! hierarchy is a tree with exclusive parent-owns-child semantics: no node
//! is ever shared between two groups, so plain owned `Vec`s suffice and no
//! arena or reference counting is needed.

use glam::DVec3;

use crate::scene::light::PointLight;
use crate::scene::material::Material;
use crate::scene::transform::Transform;

/// A node of the resolved hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Sphere(Sphere),
    Plane(Plane),
    Box(AxisAlignedBox),
    PointLight(PointLight),
    Group(Group),
}

/// A sphere with local centre and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub centre: DVec3,
    pub radius: f64,
    pub material: Material,
    pub transform: Transform,
}

/// An infinite plane `normal · p = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub offset: f64,
    pub material: Material,
    pub transform: Transform,
}

/// An axis-aligned box in local coordinates. A rotation in its transform
/// chain makes it an oriented box in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAlignedBox {
    pub lower: DVec3,
    pub upper: DVec3,
    pub material: Material,
    pub transform: Transform,
}

/// An ordered collection of child nodes sharing one transform. Children
/// are exclusively owned; nested groups compose their transforms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

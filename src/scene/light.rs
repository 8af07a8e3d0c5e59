//! Positional light source.

use glam::DVec3;

use crate::scene::colour::Colour;

/// A point light: a location and an emitted colour. Components of the
/// colour are expected in `[0, 1]` but are not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub location: DVec3,
    pub colour: Colour,
}

impl PointLight {
    #[must_use]
    pub fn new(location: DVec3, colour: Colour) -> Self {
        Self { location, colour }
    }
}

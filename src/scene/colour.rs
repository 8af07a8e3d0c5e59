//! RGB colour triple.
//!
//! Components are nominally in `[0, 1]` but the compiler does not clamp or
//! reject values outside that range; over-bright lights are a renderer
//! concern.

use glam::DVec3;

/// An RGB colour with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

pub const BLACK: Colour = Colour {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

pub const WHITE: Colour = Colour {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

impl Colour {
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<DVec3> for Colour {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

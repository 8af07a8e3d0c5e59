//! # glint-scene
//!
//! Scene-description compiler for the Glint ray tracer.
//!
//! Scene files are written in a declarative block language with an embedded
//! templating layer. This crate turns that raw templated text into a
//! validated, fully resolved [`Scene`] — the renderer never sees the
//! language, only the finished graph:
//!
//! ```text
//! raw text ─ template expansion ─ parsing ─ resolution ─ composition ─ Scene
//! ```
//!
//! Compilation of one file is a pure, single-threaded batch transform:
//! text in, `Scene` out, with every failure reported as a typed
//! [`CompileError`]. Independent files share no state and may be compiled
//! from separate threads.
//!
//! ```rust
//! use glint_scene::compile;
//!
//! let scene = compile(
//!     r#"
//!     camera { location: {0, 1, -5}, look_at: {0, 0, 0} }
//!     {% for i in (0..2) %}
//!     sphere { centre: { {{ i | times: 2 }}, 0, 0 }, radius: 1 }
//!     {% endfor %}
//!     "#,
//! ).unwrap();
//! assert_eq!(scene.primitives().len(), 3);
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod env;
pub mod errors;
pub mod parse;
pub mod resolve;
pub mod scene;
pub mod template;
pub mod value;

use log::debug;

pub use env::Environment;
pub use errors::{CompileError, ParseErrorKind, Result, SourcePos};
pub use scene::{
    AxisAlignedBox, Camera, Colour, Finish, Group, Material, Opacity, Pigment, Plane, PointLight,
    Primitive, Scene, SceneNode, Shape, Sphere, Transform,
};
pub use scene::serialize::serialize;
pub use value::{Value, ValueKind};

/// Per-compilation options. Only the output frame geometry lives here; it
/// feeds the camera's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub width: u32,
    pub height: u32,
}

impl CompileOptions {
    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Compiles templated scene text with default options.
pub fn compile(source: &str) -> Result<Scene> {
    compile_with_options(source, &CompileOptions::default())
}

/// Compiles templated scene text into a resolved [`Scene`].
///
/// All-or-nothing: any error in any stage aborts the compilation and no
/// partial scene is returned.
pub fn compile_with_options(source: &str, options: &CompileOptions) -> Result<Scene> {
    debug!("Compiling scene ({} bytes)...", source.len());

    let mut env = Environment::new();
    let expanded = template::expand(source, &mut env)?;
    let items = parse::parse(&expanded)?;
    let (camera, nodes) = resolve::resolve(&items, &mut env, options)?;

    Ok(scene::compose::build(camera, nodes))
}

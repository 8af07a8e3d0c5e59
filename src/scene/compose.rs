//! Transform compositor and scene builder.
//!
//! Walks the resolved hierarchy depth-first, composing each group's
//! scale→rotate→translate matrix onto the matrix inherited from its
//! ancestors (`world = parent · local`: the child's own transform applies
//! first, then is carried into parent space). Primitives are flattened
//! into declaration order with their composed world matrix; light
//! locations are carried through the same matrices.

use glam::DAffine3;
use log::debug;

use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::node::SceneNode;
use crate::scene::scene::{Primitive, Scene, Shape};

/// Composes all transforms and assembles the final [`Scene`].
pub(crate) fn build(camera: Camera, nodes: Vec<SceneNode>) -> Scene {
    let mut lights = Vec::new();
    let mut primitives = Vec::new();

    for node in &nodes {
        walk(node, DAffine3::IDENTITY, &mut lights, &mut primitives);
    }

    debug!(
        "Composed scene: {} lights, {} primitives",
        lights.len(),
        primitives.len()
    );
    Scene::new(camera, lights, primitives)
}

fn walk(
    node: &SceneNode,
    parent: DAffine3,
    lights: &mut Vec<PointLight>,
    primitives: &mut Vec<Primitive>,
) {
    match node {
        SceneNode::Sphere(sphere) => {
            primitives.push(Primitive {
                shape: Shape::Sphere {
                    centre: sphere.centre,
                    radius: sphere.radius,
                },
                material: sphere.material,
                world: parent * sphere.transform.to_affine(),
            });
        }
        SceneNode::Plane(plane) => {
            primitives.push(Primitive {
                shape: Shape::Plane {
                    normal: plane.normal,
                    offset: plane.offset,
                },
                material: plane.material,
                world: parent * plane.transform.to_affine(),
            });
        }
        SceneNode::Box(aab) => {
            primitives.push(Primitive {
                shape: Shape::Box {
                    lower: aab.lower,
                    upper: aab.upper,
                },
                material: aab.material,
                world: parent * aab.transform.to_affine(),
            });
        }
        SceneNode::PointLight(light) => {
            lights.push(PointLight {
                location: parent.transform_point3(light.location),
                colour: light.colour,
            });
        }
        SceneNode::Group(group) => {
            let world = parent * group.transform.to_affine();
            for child in &group.children {
                walk(child, world, lights, primitives);
            }
        }
    }
}

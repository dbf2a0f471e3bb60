use bevy_math::primitives::{Capsule3d, Cuboid, Cylinder, Sphere};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform of a graphics node relative to its parent frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseDoc", into = "PoseDoc")]
pub struct Pose {
    /// Translation in the parent frame.
    pub pos: Vec3,

    /// Orientation in the parent frame.
    pub ori: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            ori: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Transforms a point in the local frame into the parent frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.pos + self.ori * point
    }
}

/// Wire form: position as a 3-array, orientation as an xyzw map.
#[derive(Serialize, Deserialize)]
struct PoseDoc {
    pos: [f32; 3],
    ori: OriDoc,
}

#[derive(Serialize, Deserialize)]
struct OriDoc {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl From<PoseDoc> for Pose {
    fn from(doc: PoseDoc) -> Self {
        Self {
            pos: Vec3::from_array(doc.pos),
            ori: Quat::from_xyzw(doc.ori.x, doc.ori.y, doc.ori.z, doc.ori.w),
        }
    }
}

impl From<Pose> for PoseDoc {
    fn from(pose: Pose) -> Self {
        Self {
            pos: pose.pos.to_array(),
            ori: OriDoc {
                x: pose.ori.x,
                y: pose.ori.y,
                z: pose.ori.z,
                w: pose.ori.w,
            },
        }
    }
}

/// Surface appearance of a graphics node, referencing an external texture by
/// path when one is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,

    /// RGBA color with components in `[0, 1]`.
    pub rgba: [f32; 4],

    /// Texture image path. Empty = untextured.
    pub texture: String,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            rgba: [1.0, 1.0, 1.0, 1.0],
            texture: String::new(),
        }
    }
}

/// Renderable geometry of a graphics node.
///
/// Lengths are full extents in meters. Capsules and cylinders grow along the
/// node's local Z axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    /// A box with full extents `scale`.
    Box { scale: Vec3 },
    /// A capsule with cylindrical section of length `length`.
    Capsule { radius: f32, length: f32 },
    Cylinder { radius: f32, length: f32 },
    Sphere { radius: f32 },
    /// A mesh loaded from `path`, resolved against a registered resource
    /// directory, scaled per axis.
    Mesh {
        #[serde(rename = "mesh")]
        path: String,
        scale: Vec3,
    },
}

/// A type-erased wrapper over the `bevy_math` primitives a [`Geometry`] can
/// map to, for consumers that build engine meshes or colliders from a scene.
#[derive(Clone, Copy, Debug)]
pub enum EnginePrimitive {
    Cuboid(Cuboid),
    Capsule(Capsule3d),
    Cylinder(Cylinder),
    Sphere(Sphere),
}

impl Geometry {
    /// Converts to the corresponding `bevy_math` primitive.
    ///
    /// File-backed meshes have no analytic primitive and return `None`.
    pub fn to_primitive(&self) -> Option<EnginePrimitive> {
        Some(match *self {
            Self::Box { scale } => EnginePrimitive::Cuboid(Cuboid {
                half_size: scale / 2.0,
            }),
            Self::Capsule { radius, length } => {
                EnginePrimitive::Capsule(Capsule3d::new(radius, length))
            }
            Self::Cylinder { radius, length } => {
                EnginePrimitive::Cylinder(Cylinder::new(radius, length))
            }
            Self::Sphere { radius } => EnginePrimitive::Sphere(Sphere::new(radius)),
            Self::Mesh { .. } => return None,
        })
    }
}

/// One renderable node of a scene object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graphics {
    pub name: String,

    /// Transform relative to the owning object's frame.
    #[serde(rename = "T_to_parent", default)]
    pub pose_to_parent: Pose,

    pub geometry: Geometry,

    #[serde(default)]
    pub material: Material,
}

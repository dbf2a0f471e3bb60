//! Well-known keys and per-scene key derivation.
//!
//! The `webapp::*` constants are process-wide by convention: the viewer's
//! server watches them regardless of which simulated scene is running. They
//! are intentionally fixed, not configuration. Everything scene-specific
//! hangs off a [`ModelKeys`] value built once from a namespace string.

use crate::doc::Document;
use serde_json::json;

/// Root prefix for all state owned by the web app.
pub const KEY_WEBAPP_PREFIX: &str = "webapp::";

/// Registry of static-resource root paths, keyed additionally by app name so
/// one server can host several apps.
pub const KEY_RESOURCES_PREFIX: &str = "webapp::resources::";

/// Application name the viewer serves this crate's scenes under.
pub const APP_NAME: &str = "simulator";

/// Prefix for simulator-owned state.
pub const KEY_SIMULATOR_PREFIX: &str = "webapp::simulator::";

/// Root of the per-namespace args documents (`webapp::simulator::args::<ns>`).
pub const KEY_ARGS: &str = "webapp::simulator::args";

/// Latest interaction document. Producer: web client; consumer: simulator.
pub const KEY_INTERACTION: &str = "webapp::simulator::interaction";

/// Resource path set for the simulator app.
pub const KEY_RESOURCES: &str = "webapp::resources::simulator";

/// Key prefixes for one simulated scene, derived from its namespace.
///
/// Construction is the only place the prefixes are computed; the value is
/// immutable afterwards and cheap to clone around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelKeys {
    /// The namespace the prefixes were derived from.
    pub namespace: String,

    /// Prefix for robot model documents (`<ns>::model::robot::`).
    pub robots_prefix: String,

    /// Prefix for object model documents (`<ns>::model::object::`).
    pub objects_prefix: String,

    /// Prefix for trajectory model documents (`<ns>::model::trajectory::`).
    pub trajectories_prefix: String,

    /// Prefix for camera model documents (`<ns>::model::camera::`).
    pub cameras_prefix: String,

    /// Prefix for image model documents (`<ns>::model::image::`).
    pub images_prefix: String,
}

impl ModelKeys {
    /// Derives the model key prefixes for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            robots_prefix: format!("{namespace}::model::robot::"),
            objects_prefix: format!("{namespace}::model::object::"),
            trajectories_prefix: format!("{namespace}::model::trajectory::"),
            cameras_prefix: format!("{namespace}::model::camera::"),
            images_prefix: format!("{namespace}::model::image::"),
            namespace,
        }
    }

    /// Full store key for the robot named `name`.
    pub fn robot_key(&self, name: &str) -> String {
        format!("{}{name}", self.robots_prefix)
    }

    /// Full store key for the object named `name`.
    pub fn object_key(&self, name: &str) -> String {
        format!("{}{name}", self.objects_prefix)
    }

    /// Full store key for the trajectory named `name`.
    pub fn trajectory_key(&self, name: &str) -> String {
        format!("{}{name}", self.trajectories_prefix)
    }

    /// Full store key for the camera named `name`.
    pub fn camera_key(&self, name: &str) -> String {
        format!("{}{name}", self.cameras_prefix)
    }

    /// Full store key for the image named `name`.
    pub fn image_key(&self, name: &str) -> String {
        format!("{}{name}", self.images_prefix)
    }

    /// Store key of this scene's args document.
    pub fn args_key(&self) -> String {
        format!("{KEY_ARGS}::{}", self.namespace)
    }

    /// All model prefixes, in registration order.
    pub fn prefixes(&self) -> [&str; 5] {
        [
            &self.robots_prefix,
            &self.objects_prefix,
            &self.trajectories_prefix,
            &self.cameras_prefix,
            &self.images_prefix,
        ]
    }

    /// Args document the viewer reads to learn this scene's prefixes.
    ///
    /// Encode-only: the simulator side always reconstructs a `ModelKeys` from
    /// the namespace string instead of decoding this document.
    pub fn to_document(&self) -> Document {
        json!({
            "key_robots_prefix": self.robots_prefix,
            "key_objects_prefix": self.objects_prefix,
            "key_trajectories_prefix": self.trajectories_prefix,
            "key_cameras_prefix": self.cameras_prefix,
            "key_images_prefix": self.images_prefix,
        })
    }
}

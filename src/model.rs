//! Scene entity models and their document codecs.
//!
//! Every model is a thin index entry: a name plus store keys pointing at the
//! live data some other process keeps updated. Encoding is total; decoding
//! validates the document shape and fails with the first offending field.

use serde_json::json;
use tracing::warn;

use crate::doc::{self, Document};
use crate::error::DecodeError;
use crate::graphics::Graphics;

/// Viewer-side axis gizmo size used when an object document omits its own.
pub const DEFAULT_AXIS_SIZE: f32 = 0.1;

/// A robot scene entry: an opaque multibody description plus the store keys
/// its pose is streamed from.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotModel {
    pub name: String,

    /// Articulated-body description, passed through verbatim. The viewer and
    /// the kinematics library agree on its schema; this layer never interprets
    /// it.
    pub articulated_body: Document,

    /// Key holding the joint-position vector.
    pub key_q: String,

    /// Key holding the base position. Empty = origin.
    pub key_pos: String,

    /// Key holding the base orientation. Empty = identity.
    pub key_ori: String,
}

impl RobotModel {
    pub fn to_document(&self) -> Document {
        json!({
            "name": self.name,
            "articulated_body": self.articulated_body,
            "key_q": self.key_q,
            "key_pos": self.key_pos,
            "key_ori": self.key_ori,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        Ok(Self {
            name: doc::req_str(doc, "name")?,
            articulated_body: doc::req(doc, "articulated_body")?.clone(),
            key_q: doc::req_str(doc, "key_q")?,
            key_pos: doc::req_str(doc, "key_pos")?,
            key_ori: doc::opt_str(doc, "key_ori")?,
        })
    }
}

/// A rigid object scene entry: renderable graphics plus pose source keys.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectModel {
    pub name: String,

    /// Renderable nodes, drawn in order.
    pub graphics: Vec<Graphics>,

    /// Key holding the object position.
    pub key_pos: String,

    /// Key holding the object orientation. Empty = identity.
    pub key_ori: String,

    /// Key holding a per-axis scale. Empty = unscaled.
    pub key_scale: String,

    /// Key holding a full 4x4 transform, overriding pos/ori. Empty = none.
    pub key_matrix: String,

    /// Size of the viewer's per-object axis gizmo.
    pub axis_size: f32,
}

impl ObjectModel {
    /// An object with the given graphics and position source, remaining
    /// sources unset.
    pub fn new(
        name: impl Into<String>,
        graphics: Vec<Graphics>,
        key_pos: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            graphics,
            key_pos: key_pos.into(),
            key_ori: String::new(),
            key_scale: String::new(),
            key_matrix: String::new(),
            axis_size: DEFAULT_AXIS_SIZE,
        }
    }

    pub fn to_document(&self) -> Document {
        json!({
            "name": self.name,
            "graphics": self.graphics,
            "key_pos": self.key_pos,
            "key_ori": self.key_ori,
            "key_scale": self.key_scale,
            "key_matrix": self.key_matrix,
            "axis_size": self.axis_size,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        let graphics = doc::req(doc, "graphics")?;
        let graphics: Vec<Graphics> = serde_json::from_value(graphics.clone())
            .map_err(|e| DecodeError::invalid("graphics", e.to_string()))?;
        Ok(Self {
            name: doc::req_str(doc, "name")?,
            graphics,
            key_pos: doc::req_str(doc, "key_pos")?,
            key_ori: doc::opt_str(doc, "key_ori")?,
            key_scale: doc::opt_str(doc, "key_scale")?,
            key_matrix: doc::opt_str(doc, "key_matrix")?,
            axis_size: doc::opt_f32(doc, "axis_size", DEFAULT_AXIS_SIZE)?,
        })
    }
}

/// A camera scene entry: pose, intrinsics, and image source keys.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraModel {
    pub name: String,

    /// Key holding the camera position.
    pub key_pos: String,

    /// Key holding the camera orientation.
    pub key_ori: String,

    /// Key holding the 3x3 intrinsic matrix.
    pub key_intrinsic: String,

    /// Key holding the depth image.
    pub key_depth_image: String,

    /// Key holding the color image. Empty = depth only.
    ///
    /// Canonical field name. Documents written by older producers used
    /// `key_rgb_image`; decode accepts that alias only when the canonical
    /// field is absent, and logs a deprecation warning.
    pub key_color_image: String,
}

impl CameraModel {
    pub fn to_document(&self) -> Document {
        json!({
            "name": self.name,
            "key_pos": self.key_pos,
            "key_ori": self.key_ori,
            "key_intrinsic": self.key_intrinsic,
            "key_depth_image": self.key_depth_image,
            "key_color_image": self.key_color_image,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        let key_color_image = match doc.get("key_color_image") {
            Some(value) => value
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| DecodeError::invalid("key_color_image", "expected a string"))?,
            None if doc.get("key_rgb_image").is_some() => {
                warn!("camera document uses deprecated `key_rgb_image`; rename to `key_color_image`");
                doc::req_str(doc, "key_rgb_image")?
            }
            None => String::new(),
        };
        Ok(Self {
            name: doc::req_str(doc, "name")?,
            key_pos: doc::req_str(doc, "key_pos")?,
            key_ori: doc::req_str(doc, "key_ori")?,
            key_intrinsic: doc::req_str(doc, "key_intrinsic")?,
            key_depth_image: doc::req_str(doc, "key_depth_image")?,
            key_color_image,
        })
    }
}

/// A trajectory scene entry: the viewer appends each update of the position
/// source to a polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryModel {
    pub name: String,

    /// Key holding the latest trajectory point.
    pub key_pos: String,
}

impl TrajectoryModel {
    pub fn to_document(&self) -> Document {
        json!({
            "name": self.name,
            "key_pos": self.key_pos,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        Ok(Self {
            name: doc::req_str(doc, "name")?,
            key_pos: doc::req_str(doc, "key_pos")?,
        })
    }
}

/// A 2-D image panel entry, optionally with segmentation overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageModel {
    pub name: String,

    /// Key holding the image data.
    pub key_image: String,

    /// Keys holding segmentation masks layered over the image.
    pub key_segmentations: Vec<String>,
}

impl ImageModel {
    pub fn to_document(&self) -> Document {
        json!({
            "name": self.name,
            "key_image": self.key_image,
            "key_segmentations": self.key_segmentations,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        Ok(Self {
            name: doc::req_str(doc, "name")?,
            key_image: doc::req_str(doc, "key_image")?,
            key_segmentations: doc::opt_str_list(doc, "key_segmentations")?,
        })
    }
}

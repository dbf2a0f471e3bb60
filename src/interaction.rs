//! User interaction events routed from the viewer to the simulator.

use std::collections::BTreeSet;

use glam::Vec3;
use serde_json::json;

use crate::doc::{self, Document};
use crate::error::DecodeError;

/// Modifier key held during a pointer interaction.
///
/// Unrecognized modifier strings decode to [`ModifierKey::Undefined`].
/// Consumers treat `Undefined` as "ignore", never as an error; it exists so a
/// newer viewer can send modifiers an older simulator does not know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModifierKey {
    Undefined,
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl ModifierKey {
    /// Parses the viewer's modifier string.
    pub fn parse(s: &str) -> Self {
        match s {
            "alt" => Self::Alt,
            "ctrl" => Self::Ctrl,
            "meta" => Self::Meta,
            "shift" => Self::Shift,
            _ => Self::Undefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Meta => "meta",
            Self::Shift => "shift",
        }
    }
}

/// One snapshot of user pointer/keyboard input.
///
/// The viewer publishes a fresh snapshot on every drag step and key change;
/// the simulator polls the latest one and turns it into pose adjustments or
/// forces (see [`crate::adjust`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    /// Store key of the object hit by the click. Empty = nothing held.
    pub key_object: String,

    /// Index of the robot link hit. Negative addresses the base.
    pub idx_link: i32,

    /// Click point in the hit link's local frame.
    pub pos_click_in_link: Vec3,

    /// Current pointer position in the world frame.
    pub pos_mouse_in_world: Vec3,

    /// Modifier keys held during the drag.
    pub modifier_keys: BTreeSet<ModifierKey>,

    /// The single currently-held keyboard key. Empty = none.
    pub key_down: String,
}

impl Default for Interaction {
    /// The idle snapshot the viewer publishes when nothing is held.
    fn default() -> Self {
        Self {
            key_object: String::new(),
            idx_link: 0,
            pos_click_in_link: Vec3::ZERO,
            pos_mouse_in_world: Vec3::ZERO,
            modifier_keys: BTreeSet::new(),
            key_down: String::new(),
        }
    }
}

impl Interaction {
    pub fn is_ctrl_down(&self) -> bool {
        self.modifier_keys.contains(&ModifierKey::Ctrl)
    }

    pub fn to_document(&self) -> Document {
        let modifier_keys: Vec<&str> = self.modifier_keys.iter().map(ModifierKey::as_str).collect();
        json!({
            "key_object": self.key_object,
            "idx_link": self.idx_link,
            "pos_click_in_link": self.pos_click_in_link.to_array(),
            "pos_mouse_in_world": self.pos_mouse_in_world.to_array(),
            "modifier_keys": modifier_keys,
            "key_down": self.key_down,
        })
    }

    pub fn from_document(doc: &Document) -> Result<Self, DecodeError> {
        let modifier_keys = doc::req(doc, "modifier_keys")?
            .as_array()
            .ok_or_else(|| DecodeError::invalid("modifier_keys", "expected an array of strings"))?
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(ModifierKey::parse)
                    .ok_or_else(|| DecodeError::invalid("modifier_keys", "expected string elements"))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            key_object: doc::req_str(doc, "key_object")?,
            idx_link: doc::req_i32(doc, "idx_link")?,
            pos_click_in_link: doc::req_vec3(doc, "pos_click_in_link")?,
            pos_mouse_in_world: doc::req_vec3(doc, "pos_mouse_in_world")?,
            modifier_keys,
            key_down: doc::req_str(doc, "key_down")?,
        })
    }
}

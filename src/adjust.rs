//! Closed-form rules turning an [`Interaction`] into pose or force
//! adjustments.
//!
//! Every function here is pure and deterministic: it reads only its arguments
//! and the fixed gain constants, so the simulation loop can call them at any
//! rate without extra state. The drag rules are proportional corrections, not
//! an iterative solver: each call nudges the target a little toward the
//! pointer, and the loop converges by repetition.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::interaction::Interaction;
use crate::keys::ModelKeys;

/// Gain for the spring-like positional correction of a mouse drag.
pub const GAIN_CLICK_POSITION: f32 = 1e-2;

/// Gain for the torque-like angular correction of a mouse drag.
pub const GAIN_CLICK_ORIENTATION: f32 = 1e-1;

/// Translation applied per call while a movement key is held.
pub const GAIN_KEY_TRANSLATION: f32 = 1e-4;

/// Rotation angle in radians applied per call while a rotation key is held.
pub const GAIN_KEY_ROTATION: f32 = 1e-3;

/// Gain mapping a mouse drag onto an external force.
pub const GAIN_CLICK_FORCE: f32 = 100.0;

/// Positional delta pulling the clicked point toward the pointer.
///
/// The click point is carried to world coordinates through the target's
/// current pose `(pos, ori)`; the delta is `gain` times the remaining gap to
/// the pointer.
pub fn click_position_adjustment(
    interaction: &Interaction,
    pos: Vec3,
    ori: Quat,
    gain: f32,
) -> Vec3 {
    let pos_click_in_world = pos + ori * interaction.pos_click_in_link;
    gain * (interaction.pos_mouse_in_world - pos_click_in_world)
}

/// Angular delta induced by dragging a point on the target's surface.
///
/// With `m` the gained drag vector and `r` the unit lever arm from the target
/// origin to the click point, the result rotates by angle `|r x m|` about
/// axis `r x m`. Identity when the drag is parallel to the lever arm or the
/// click is at the origin, where no axis is defined.
pub fn click_orientation_adjustment(
    interaction: &Interaction,
    pos: Vec3,
    ori: Quat,
    gain: f32,
) -> Quat {
    let pos_click_in_world = pos + ori * interaction.pos_click_in_link;
    let m = gain * (interaction.pos_mouse_in_world - pos_click_in_world);
    let r = (pos_click_in_world - pos).normalize_or_zero();
    let axis = r.cross(m);
    let angle = axis.length();
    if angle <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis / angle, angle)
}

/// Applies a drag to a pose under the fixed modifier policy: Ctrl rotates,
/// anything else translates.
///
/// The two adjustments are mutually exclusive. The rotation branch
/// left-multiplies onto the current orientation and leaves the position
/// untouched; the translation branch does the reverse.
pub fn adjusted_pose(interaction: &Interaction, pos: Vec3, ori: Quat) -> (Vec3, Quat) {
    if interaction.is_ctrl_down() {
        let delta = click_orientation_adjustment(interaction, pos, ori, GAIN_CLICK_ORIENTATION);
        (pos, delta * ori)
    } else {
        let delta = click_position_adjustment(interaction, pos, ori, GAIN_CLICK_POSITION);
        (pos + delta, ori)
    }
}

/// Unit-axis translation for a held movement key.
///
/// `a`/`d` move along ∓X, `w`/`s` along ±Y, `e`/`q` along ±Z. Anything else,
/// including the empty string, yields zero.
pub fn key_translation(key_down: &str, gain: f32) -> Vec3 {
    let axis = match key_down {
        "a" => -Vec3::X,
        "d" => Vec3::X,
        "w" => Vec3::Y,
        "s" => -Vec3::Y,
        "e" => Vec3::Z,
        "q" => -Vec3::Z,
        _ => return Vec3::ZERO,
    };
    gain * axis
}

/// Angle-axis rotation for a held rotation key.
///
/// `j`/`l` rotate about ∓X, `i`/`k` about ±Y, `o`/`u` about ±Z, by `gain`
/// radians. Anything else yields identity.
pub fn key_rotation(key_down: &str, gain: f32) -> Quat {
    let axis = match key_down {
        "j" => -Vec3::X,
        "l" => Vec3::X,
        "i" => Vec3::Y,
        "k" => -Vec3::Y,
        "o" => Vec3::Z,
        "u" => -Vec3::Z,
        _ => return Quat::IDENTITY,
    };
    Quat::from_axis_angle(axis, gain)
}

/// Forward-kinematics lookup supplied by the articulated-body collaborator.
pub trait ForwardKinematics {
    /// The robot's name, used to form its store key.
    fn name(&self) -> &str;

    /// World position of a point given in the frame of link `idx_link`.
    /// Negative `idx_link` addresses the base.
    fn position_in_world(&self, idx_link: i32, pos_in_link: Vec3) -> Vec3;
}

/// A linear force and torque pair expressed at the world origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpatialForce {
    pub force: Vec3,
    pub torque: Vec3,
}

impl SpatialForce {
    /// Spatial force equivalent to a pure force applied at `point`.
    pub fn from_force_at_point(force: Vec3, point: Vec3) -> Self {
        Self {
            force,
            torque: point.cross(force),
        }
    }
}

/// Maps a drag on a robot link to an external spatial force on that link.
///
/// Returns an empty map when the interaction's hit object is not this robot.
/// Otherwise exactly one link receives force: the clicked one, pulled toward
/// the pointer with a pure force translated to the world frame at the click
/// point.
pub fn external_forces<K: ForwardKinematics>(
    model_keys: &ModelKeys,
    body: &K,
    interaction: &Interaction,
    gain: f32,
) -> HashMap<i32, SpatialForce> {
    let mut f_ext = HashMap::new();
    if interaction.key_object != model_keys.robot_key(body.name()) {
        return f_ext;
    }

    let pos_click_in_world =
        body.position_in_world(interaction.idx_link, interaction.pos_click_in_link);
    let f = gain * (interaction.pos_mouse_in_world - pos_click_in_world);
    f_ext.insert(
        interaction.idx_link,
        SpatialForce::from_force_at_point(f, pos_click_in_world),
    );
    f_ext
}

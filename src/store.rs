//! Narrow gateway to the shared key-value store and the registration
//! operations built on it.
//!
//! The gateway is supplied by the host environment. Implementations may queue
//! writes; [`StoreGateway::commit`] flushes anything buffered. Every
//! registration operation takes a `commit` flag so callers can batch several
//! registrations into one flush.

use std::collections::BTreeSet;

use tracing::debug;

use crate::doc::Document;
use crate::error::StoreOpError;
use crate::interaction::Interaction;
use crate::keys::{KEY_INTERACTION, KEY_RESOURCES, ModelKeys};
use crate::model::{CameraModel, ImageModel, ObjectModel, RobotModel, TrajectoryModel};

/// Capability set the host environment supplies for reaching the store.
///
/// All durability and retry policy lives behind this trait; errors pass
/// through the registration operations unmodified.
pub trait StoreGateway {
    type Error;

    /// Stores `value` under `key`, replacing any previous document.
    fn set(&mut self, key: &str, value: Document) -> Result<(), Self::Error>;

    /// Retrieves the document stored under `key`, if any.
    fn get(&mut self, key: &str) -> Result<Option<Document>, Self::Error>;

    /// Deletes every key in `keys`.
    fn del(&mut self, keys: &BTreeSet<String>) -> Result<(), Self::Error>;

    /// Adds `members` to the set stored at `key`.
    fn set_add(&mut self, key: &str, members: &BTreeSet<String>) -> Result<(), Self::Error>;

    /// Removes `members` from the set stored at `key`.
    fn set_remove(&mut self, key: &str, members: &BTreeSet<String>) -> Result<(), Self::Error>;

    /// Resolves a prefix pattern (trailing `*`) to the currently matching
    /// keys.
    fn scan(&mut self, pattern: &str) -> Result<BTreeSet<String>, Self::Error>;

    /// Flushes buffered operations.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

fn put<S: StoreGateway>(
    store: &mut S,
    key: String,
    doc: Document,
    commit: bool,
) -> Result<(), S::Error> {
    store.set(&key, doc)?;
    debug!(key = %key, "registered");
    if commit {
        store.commit()?;
    }
    Ok(())
}

fn remove<S: StoreGateway>(store: &mut S, key: String, commit: bool) -> Result<(), S::Error> {
    store.del(&BTreeSet::from([key.clone()]))?;
    debug!(key = %key, "unregistered");
    if commit {
        store.commit()?;
    }
    Ok(())
}

/// Registers a static-resource root the viewer's server may serve files from.
///
/// Meshes and textures referenced by graphics documents are resolved against
/// the registered roots. Registering a root exposes everything under it.
pub fn register_resource_path<S: StoreGateway>(
    store: &mut S,
    path: &str,
    commit: bool,
) -> Result<(), S::Error> {
    store.set_add(KEY_RESOURCES, &BTreeSet::from([path.to_owned()]))?;
    debug!(path, "registered resource path");
    if commit {
        store.commit()?;
    }
    Ok(())
}

/// Unregisters a static-resource root.
///
/// Call on shutdown so files stay exposed no longer than necessary.
pub fn unregister_resource_path<S: StoreGateway>(
    store: &mut S,
    path: &str,
    commit: bool,
) -> Result<(), S::Error> {
    store.set_remove(KEY_RESOURCES, &BTreeSet::from([path.to_owned()]))?;
    debug!(path, "unregistered resource path");
    if commit {
        store.commit()?;
    }
    Ok(())
}

/// Publishes a scene's args document so the viewer can discover its model
/// prefixes.
pub fn register_model_keys<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    commit: bool,
) -> Result<(), S::Error> {
    put(store, model_keys.args_key(), model_keys.to_document(), commit)
}

/// Removes a scene's args document.
pub fn unregister_model_keys<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.args_key(), commit)
}

pub fn register_robot<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    robot: &RobotModel,
    commit: bool,
) -> Result<(), S::Error> {
    put(store, model_keys.robot_key(&robot.name), robot.to_document(), commit)
}

pub fn unregister_robot<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    name: &str,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.robot_key(name), commit)
}

pub fn register_object<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    object: &ObjectModel,
    commit: bool,
) -> Result<(), S::Error> {
    put(store, model_keys.object_key(&object.name), object.to_document(), commit)
}

pub fn unregister_object<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    name: &str,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.object_key(name), commit)
}

pub fn register_camera<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    camera: &CameraModel,
    commit: bool,
) -> Result<(), S::Error> {
    put(store, model_keys.camera_key(&camera.name), camera.to_document(), commit)
}

pub fn unregister_camera<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    name: &str,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.camera_key(name), commit)
}

pub fn register_trajectory<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    trajectory: &TrajectoryModel,
    commit: bool,
) -> Result<(), S::Error> {
    put(
        store,
        model_keys.trajectory_key(&trajectory.name),
        trajectory.to_document(),
        commit,
    )
}

pub fn unregister_trajectory<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    name: &str,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.trajectory_key(name), commit)
}

pub fn register_image<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    image: &ImageModel,
    commit: bool,
) -> Result<(), S::Error> {
    put(store, model_keys.image_key(&image.name), image.to_document(), commit)
}

pub fn unregister_image<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    name: &str,
    commit: bool,
) -> Result<(), S::Error> {
    remove(store, model_keys.image_key(name), commit)
}

/// Reads the latest interaction snapshot, if the viewer has published one.
pub fn get_interaction<S: StoreGateway>(
    store: &mut S,
) -> Result<Option<Interaction>, StoreOpError<S::Error>> {
    match store.get(KEY_INTERACTION).map_err(StoreOpError::Store)? {
        Some(doc) => Ok(Some(Interaction::from_document(&doc)?)),
        None => Ok(None),
    }
}

/// Deletes every model document under the scene's prefixes plus its args
/// document.
///
/// Resolve-then-delete: each prefix is scanned for its current key set, then
/// the union is deleted. There is no atomicity across the scan and the
/// delete, so keys created in between survive until the next clear.
pub fn clear_namespace<S: StoreGateway>(
    store: &mut S,
    model_keys: &ModelKeys,
    commit: bool,
) -> Result<(), S::Error> {
    let mut keys = BTreeSet::new();
    for prefix in model_keys.prefixes() {
        keys.extend(store.scan(&format!("{prefix}*"))?);
    }
    keys.insert(model_keys.args_key());
    store.del(&keys)?;
    debug!(
        namespace = model_keys.namespace.as_str(),
        count = keys.len(),
        "cleared namespace"
    );
    if commit {
        store.commit()?;
    }
    Ok(())
}

// tests/store_registry.rs
use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

use glam::Vec3;
use pretty_assertions::assert_eq;
use scenecast::{
    CameraModel, Document, Geometry, Graphics, Interaction, KEY_INTERACTION, KEY_RESOURCES,
    Material, ModelKeys, ObjectModel, Pose, RobotModel, StoreGateway, TrajectoryModel,
    clear_namespace, get_interaction, register_camera, register_model_keys, register_object,
    register_resource_path, register_robot, register_trajectory, unregister_object,
    unregister_resource_path,
};
use serde_json::json;

/// In-memory gateway. Writes apply immediately; `commit` only counts flushes,
/// which is enough to observe the batching contract.
#[derive(Default)]
struct MemoryStore {
    data: BTreeMap<String, Document>,
    sets: BTreeMap<String, BTreeSet<String>>,
    commits: usize,
}

impl StoreGateway for MemoryStore {
    type Error = Infallible;

    fn set(&mut self, key: &str, value: Document) -> Result<(), Self::Error> {
        self.data.insert(key.to_owned(), value);
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Document>, Self::Error> {
        Ok(self.data.get(key).cloned())
    }

    fn del(&mut self, keys: &BTreeSet<String>) -> Result<(), Self::Error> {
        for key in keys {
            self.data.remove(key);
        }
        Ok(())
    }

    fn set_add(&mut self, key: &str, members: &BTreeSet<String>) -> Result<(), Self::Error> {
        self.sets
            .entry(key.to_owned())
            .or_default()
            .extend(members.iter().cloned());
        Ok(())
    }

    fn set_remove(&mut self, key: &str, members: &BTreeSet<String>) -> Result<(), Self::Error> {
        if let Some(set) = self.sets.get_mut(key) {
            for member in members {
                set.remove(member);
            }
        }
        Ok(())
    }

    fn scan(&mut self, pattern: &str) -> Result<BTreeSet<String>, Self::Error> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        Ok(self
            .data
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.commits += 1;
        Ok(())
    }
}

fn sample_object(name: &str) -> ObjectModel {
    ObjectModel::new(
        name,
        vec![Graphics {
            name: name.to_owned(),
            pose_to_parent: Pose::default(),
            geometry: Geometry::Sphere { radius: 0.05 },
            material: Material::default(),
        }],
        format!("sim::{name}::pos"),
    )
}

#[test]
fn register_robot_places_decodable_document() {
    let mut store = MemoryStore::default();
    let keys = ModelKeys::new("sim");
    let robot = RobotModel {
        name: "arm".to_owned(),
        articulated_body: json!({ "name": "arm", "dof": 7 }),
        key_q: "sim::sensor::q".to_owned(),
        key_pos: String::new(),
        key_ori: String::new(),
    };

    register_robot(&mut store, &keys, &robot, true).unwrap();

    let doc = store.data.get("sim::model::robot::arm").unwrap();
    assert_eq!(RobotModel::from_document(doc), Ok(robot));
    assert_eq!(store.commits, 1);
}

#[test]
fn commit_flag_controls_flushing() {
    let mut store = MemoryStore::default();
    let keys = ModelKeys::new("sim");

    register_object(&mut store, &keys, &sample_object("a"), false).unwrap();
    register_object(&mut store, &keys, &sample_object("b"), false).unwrap();
    assert_eq!(store.commits, 0);

    register_object(&mut store, &keys, &sample_object("c"), true).unwrap();
    assert_eq!(store.commits, 1);
    assert_eq!(store.data.len(), 3);
}

#[test]
fn unregister_object_removes_only_that_key() {
    let mut store = MemoryStore::default();
    let keys = ModelKeys::new("sim");

    register_object(&mut store, &keys, &sample_object("a"), false).unwrap();
    register_object(&mut store, &keys, &sample_object("b"), false).unwrap();
    unregister_object(&mut store, &keys, "a", true).unwrap();

    assert!(!store.data.contains_key("sim::model::object::a"));
    assert!(store.data.contains_key("sim::model::object::b"));
}

#[test]
fn resource_paths_form_a_set() {
    let mut store = MemoryStore::default();

    register_resource_path(&mut store, "/opt/meshes", false).unwrap();
    register_resource_path(&mut store, "/opt/meshes", false).unwrap();
    register_resource_path(&mut store, "/opt/textures", true).unwrap();
    assert_eq!(
        store.sets[KEY_RESOURCES],
        BTreeSet::from(["/opt/meshes".to_owned(), "/opt/textures".to_owned()])
    );

    unregister_resource_path(&mut store, "/opt/meshes", true).unwrap();
    assert_eq!(
        store.sets[KEY_RESOURCES],
        BTreeSet::from(["/opt/textures".to_owned()])
    );
}

#[test]
fn register_model_keys_publishes_args() {
    let mut store = MemoryStore::default();
    let keys = ModelKeys::new("sim");

    register_model_keys(&mut store, &keys, true).unwrap();

    let args = store.data.get("webapp::simulator::args::sim").unwrap();
    assert_eq!(args["key_robots_prefix"], "sim::model::robot::");
}

#[test]
fn get_interaction_round_trips_through_store() {
    let mut store = MemoryStore::default();
    assert!(get_interaction(&mut store).unwrap().is_none());

    let interaction = Interaction {
        key_object: "sim::model::object::crate".to_owned(),
        idx_link: 0,
        pos_click_in_link: Vec3::new(0.1, 0.2, 0.3),
        pos_mouse_in_world: Vec3::new(1.0, 0.0, 0.0),
        modifier_keys: BTreeSet::new(),
        key_down: "w".to_owned(),
    };
    store.set(KEY_INTERACTION, interaction.to_document()).unwrap();

    assert_eq!(get_interaction(&mut store).unwrap(), Some(interaction));
}

#[test]
fn clear_namespace_deletes_models_and_args_but_not_others() {
    let mut store = MemoryStore::default();
    let keys = ModelKeys::new("sim");
    let other = ModelKeys::new("other");

    register_model_keys(&mut store, &keys, false).unwrap();
    register_robot(
        &mut store,
        &keys,
        &RobotModel {
            name: "arm".to_owned(),
            articulated_body: json!({}),
            key_q: "q".to_owned(),
            key_pos: String::new(),
            key_ori: String::new(),
        },
        false,
    )
    .unwrap();
    register_object(&mut store, &keys, &sample_object("a"), false).unwrap();
    register_camera(
        &mut store,
        &keys,
        &CameraModel {
            name: "wrist".to_owned(),
            key_pos: "p".to_owned(),
            key_ori: "o".to_owned(),
            key_intrinsic: "k".to_owned(),
            key_depth_image: "d".to_owned(),
            key_color_image: String::new(),
        },
        false,
    )
    .unwrap();
    register_trajectory(
        &mut store,
        &keys,
        &TrajectoryModel {
            name: "ee".to_owned(),
            key_pos: "p".to_owned(),
        },
        false,
    )
    .unwrap();
    register_object(&mut store, &other, &sample_object("bystander"), false).unwrap();

    clear_namespace(&mut store, &keys, true).unwrap();

    let survivors: Vec<&String> = store.data.keys().collect();
    assert_eq!(survivors, vec!["other::model::object::bystander"]);
}

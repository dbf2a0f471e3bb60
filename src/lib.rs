//! # scenecast
//!
//! An engine-agnostic publishing layer that mirrors a robot simulator's scene
//! state (robots, objects, cameras, trajectories, images, user interaction)
//! into a shared key-value store so a remote 3-D viewer can render it live.
//!
//! It decouples the *producer* (the simulation loop) from the *consumer* (the
//! web viewer): the simulator registers small model documents describing where
//! live pose data can be found, and the viewer subscribes to those keys. The
//! store itself, the transport, and the articulated-body library stay behind
//! narrow traits ([`StoreGateway`](store::StoreGateway),
//! [`ForwardKinematics`](adjust::ForwardKinematics)).

pub mod adjust;
pub mod doc;
pub mod error;
pub mod graphics;
pub mod interaction;
pub mod keys;
pub mod model;
pub mod store;

pub use adjust::*;
pub use doc::*;
pub use error::*;
pub use graphics::*;
pub use interaction::*;
pub use keys::*;
pub use model::*;
pub use store::*;

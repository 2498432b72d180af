/// objview core - mesh data for a wireframe OBJ viewer
///
/// This library holds the stateful part of the viewer: OBJ loading,
/// in-place affine transforms, and change notification for whoever draws
/// the result.

pub mod broadcast;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod model;
pub mod obj;
pub mod transform;

// Re-export commonly used types
pub use broadcast::{ChangeBroadcaster, Subscriber, SubscriptionId};
pub use config::{LoaderConfig, ViewerConfig};
pub use controller::Controller;
pub use error::{MeshError, MeshResult};
pub use geometry::Mesh;
pub use model::{MeshModel, ModelState};

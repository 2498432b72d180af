/// The mesh a viewer is showing, plus who to tell when it changes
use std::path::Path;
use std::rc::Rc;

use log::{info, warn};
use nalgebra::Vector3;

use crate::broadcast::{ChangeBroadcaster, Subscriber, SubscriptionId};
use crate::config::LoaderConfig;
use crate::error::MeshResult;
use crate::geometry::Mesh;
use crate::obj;
use crate::transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Nothing has been loaded yet.
    Empty,
    /// A file was loaded; the mesh may still have no geometry.
    Loaded,
}

/// Owns one mesh and broadcasts every change made to it
///
/// Each mutating call finishes its change and notifies all subscribers
/// before returning.
#[derive(Debug)]
pub struct MeshModel {
    mesh: Mesh,
    state: ModelState,
    config: LoaderConfig,
    broadcaster: ChangeBroadcaster,
}

impl MeshModel {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            mesh: Mesh::default(),
            state: ModelState::Empty,
            config,
            broadcaster: ChangeBroadcaster::new(),
        }
    }

    /// Replace the mesh with the contents of an OBJ file
    ///
    /// On failure the current mesh is kept and nobody is notified.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> MeshResult<()> {
        let path = path.as_ref();
        match obj::read_obj(path, &self.config) {
            Ok(mesh) => {
                info!(
                    "loaded {:?}: {} vertices, {} edges",
                    path,
                    mesh.vertex_count(),
                    mesh.edge_count()
                );
                self.mesh = mesh;
                self.state = ModelState::Loaded;
                self.broadcaster.notify();
                Ok(())
            }
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }

    pub fn scale(&mut self, factor: f32) {
        transform::scale(self.mesh.vertices_mut(), factor);
        self.broadcaster.notify();
    }

    /// Rotate by per-axis angles in degrees, X first, then Y, then Z.
    pub fn rotate(&mut self, degrees: impl Into<Vector3<f32>>) {
        transform::rotate(self.mesh.vertices_mut(), degrees);
        self.broadcaster.notify();
    }

    pub fn translate(&mut self, offset: impl Into<Vector3<f32>>) {
        transform::translate(self.mesh.vertices_mut(), offset);
        self.broadcaster.notify();
    }

    pub fn subscribe(&mut self, subscriber: &Rc<dyn Subscriber>) -> SubscriptionId {
        self.broadcaster.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertices(&self) -> &[f32] {
        self.mesh.vertices()
    }

    pub fn edges(&self) -> &[u32] {
        self.mesh.edges()
    }

    pub fn extent(&self) -> f32 {
        self.mesh.extent()
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

impl Default for MeshModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter(Cell<usize>);

    impl Subscriber for Counter {
        fn notify(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = MeshModel::new();
        assert!(model.is_empty());
        assert_eq!(model.state(), ModelState::Empty);
        assert_eq!(model.extent(), 0.0);
    }

    #[test]
    fn test_transforms_always_notify() {
        let counter = Rc::new(Counter::default());
        let subscriber: Rc<dyn Subscriber> = counter.clone();
        let mut model = MeshModel::new();
        model.subscribe(&subscriber);

        model.scale(0.0);
        model.rotate([0.0, 0.0, 0.0]);
        model.translate([1.0, 1.0, 1.0]);
        assert_eq!(counter.0.get(), 3);
        assert!(model.vertices().is_empty());
    }

    #[test]
    fn test_failed_load_does_not_notify() {
        let counter = Rc::new(Counter::default());
        let subscriber: Rc<dyn Subscriber> = counter.clone();
        let mut model = MeshModel::new();
        model.subscribe(&subscriber);

        assert!(model.load("/nonexistent/model.obj").is_err());
        assert_eq!(counter.0.get(), 0);
        assert_eq!(model.state(), ModelState::Empty);
    }
}

/// Viewer-facing commands on top of a [`MeshModel`]
use std::path::Path;

use log::trace;
use nalgebra::Vector3;

use crate::config::ViewerConfig;
use crate::error::MeshResult;
use crate::model::MeshModel;

pub struct Controller {
    model: MeshModel,
    config: ViewerConfig,
}

impl Controller {
    pub fn new(model: MeshModel, config: ViewerConfig) -> Self {
        Self { model, config }
    }

    /// Load a file and scale it so its largest coordinate has magnitude
    /// `fit_extent`
    ///
    /// The factor keeps the extent's sign, so a model whose extreme value
    /// is negative comes out mirrored through the origin.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> MeshResult<()> {
        self.model.load(path)?;
        let extent = self.model.extent();
        if extent != 0.0 {
            let factor = self.config.fit_extent / extent;
            trace!("normalizing extent {extent} with factor {factor}");
            self.model.scale(factor);
        }
        Ok(())
    }

    pub fn scale(&mut self, factor: f32) {
        self.model.scale(factor);
    }

    pub fn zoom_in(&mut self) {
        self.model.scale(self.config.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.model.scale(self.config.zoom_out_factor);
    }

    pub fn rotate(&mut self, degrees: impl Into<Vector3<f32>>) {
        self.model.rotate(degrees);
    }

    pub fn translate(&mut self, offset: impl Into<Vector3<f32>>) {
        self.model.translate(offset);
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn model(&self) -> &MeshModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut MeshModel {
        &mut self.model
    }
}

/// Options for the OBJ loader
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoaderConfig {
    /// Drop face references that point past the vertices read so far.
    pub strict_indices: bool,
}

/// Settings for the orchestration layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Magnitude the largest coordinate is scaled to right after a load.
    pub fit_extent: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    /// Rotation step in degrees.
    pub rotate_step: f32,
    pub move_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fit_extent: 0.9,
            zoom_in_factor: 1.15,
            zoom_out_factor: 0.9,
            rotate_step: 5.0,
            move_step: 0.05,
        }
    }
}

/// Camera and projection for the terminal view
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Fixed camera looking at the origin, where a normalized model sits
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 3.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: Self::aspect_for(width, height),
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::aspect_for(width, height);
    }

    fn aspect_for(width: u32, height: u32) -> f32 {
        width as f32 / height.max(1) as f32 * CELL_ASPECT
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                // Show the unit cube around the target with a little margin.
                let height = 2.2;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a point to screen cells, returning `(x, y, depth)`
    ///
    /// Points in front of the near plane or behind the far plane give
    /// `None`. Points off to the side are still returned so that lines
    /// leaving the screen keep their direction.
    pub fn project_to_screen(
        &self,
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let ndc = view_projection.transform_point(point);
        if !ndc.z.is_finite() || ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

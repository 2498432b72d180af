/// Affine transforms over a flat XYZ coordinate buffer
///
/// Every function mutates the buffer in place. Buffers whose length is not
/// a multiple of three are left alone by `rotate` and `translate`.
use nalgebra::{Rotation3, Vector3};

/// Multiply every coordinate by `factor`. A zero factor is ignored.
pub fn scale(vertices: &mut [f32], factor: f32) {
    if factor == 0.0 {
        return;
    }
    for value in vertices.iter_mut() {
        *value *= factor;
    }
}

/// Build the rotation for per-axis angles in degrees
///
/// The X rotation is applied first, then Y, then Z.
pub fn rotation_matrix(degrees: &Vector3<f32>) -> Rotation3<f32> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians());
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians());
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians());

    rz * ry * rx
}

/// Rotate every point about the X, Y and Z axes, in that order
pub fn rotate(vertices: &mut [f32], degrees: impl Into<Vector3<f32>>) {
    if vertices.len() % 3 != 0 {
        return;
    }
    let rotation = rotation_matrix(&degrees.into());
    for xyz in vertices.chunks_exact_mut(3) {
        let rotated = rotation * Vector3::new(xyz[0], xyz[1], xyz[2]);
        xyz.copy_from_slice(rotated.as_slice());
    }
}

/// Shift every point by `offset`
pub fn translate(vertices: &mut [f32], offset: impl Into<Vector3<f32>>) {
    if vertices.len() % 3 != 0 {
        return;
    }
    let offset = offset.into();
    for xyz in vertices.chunks_exact_mut(3) {
        for (value, delta) in xyz.iter_mut().zip(offset.iter()) {
            *value += delta;
        }
    }
}

/// Wireframe geometry held by the viewer
use nalgebra::Point3;

/// A wireframe mesh: flat XYZ coordinates plus pairs of vertex indices
///
/// Only the OBJ loader builds a populated mesh; everyone else sees it
/// through read-only slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<f32>,
    pub(crate) edges: Vec<u32>,
    pub(crate) extent: f32,
}

impl Mesh {
    /// Consecutive XYZ triples.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Consecutive index pairs, each one line segment.
    pub fn edges(&self) -> &[u32] {
        &self.edges
    }

    /// Coordinate of greatest magnitude seen while loading, sign preserved
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// True if there is nothing to draw: no vertices or no edges.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.edges.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
    }

    pub fn edge_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of edges with an endpoint past the last vertex
    pub fn dangling_edges(&self) -> usize {
        let count = self.vertex_count();
        self.edge_pairs()
            .filter(|&(a, b)| a as usize >= count || b as usize >= count)
            .count()
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [f32] {
        &mut self.vertices
    }
}

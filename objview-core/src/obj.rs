/// Wavefront OBJ loader for wireframe geometry
///
/// Only `v` and `f` directives are understood. Faces are reduced to the
/// closed loop of their boundary edges. Every other line is ignored, and a
/// face reference that cannot be read is dropped without failing the file.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, opt},
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};

use crate::config::LoaderConfig;
use crate::error::{MeshError, MeshResult};
use crate::geometry::Mesh;

/// Load an OBJ file from disk
pub fn read_obj<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::io(path, e))?;
    parse_obj(BufReader::new(file), config).map_err(|e| MeshError::io(path, e))
}

/// Parse OBJ text from any buffered reader
pub fn parse_obj<R: BufRead>(mut reader: R, config: &LoaderConfig) -> std::io::Result<Mesh> {
    let mut builder = MeshBuilder::new(config);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Stray bytes in a comment shouldn't cost us the whole model.
        let line = String::from_utf8_lossy(&buf);
        builder.push_line(trim_line_ending(&line));
    }
    Ok(builder.finish())
}

/// Parse OBJ text already held in memory
pub fn parse_obj_str(text: &str, config: &LoaderConfig) -> Mesh {
    let mut builder = MeshBuilder::new(config);
    for line in text.lines() {
        builder.push_line(line);
    }
    builder.finish()
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

struct MeshBuilder<'a> {
    config: &'a LoaderConfig,
    mesh: Mesh,
    skipped_tokens: usize,
    face_indices: Vec<u32>,
}

impl<'a> MeshBuilder<'a> {
    fn new(config: &'a LoaderConfig) -> Self {
        Self {
            config,
            mesh: Mesh::default(),
            skipped_tokens: 0,
            face_indices: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if let Some(xyz) = parse_vertex_line(line) {
            self.push_vertex(xyz);
        } else if line.starts_with('f') {
            self.push_face(line);
        }
    }

    fn push_vertex(&mut self, xyz: [f32; 3]) {
        for value in xyz {
            if value.abs() > self.mesh.extent.abs() {
                self.mesh.extent = value;
            }
            self.mesh.vertices.push(value);
        }
    }

    fn push_face(&mut self, line: &str) {
        let vertex_count = self.mesh.vertex_count();
        self.face_indices.clear();

        // The leading `f` has no digits, so it falls out like any other bad token.
        for token in line.split_whitespace() {
            match face_index(token) {
                Some(index) if self.config.strict_indices && index as usize >= vertex_count => {
                    trace!("dropping face reference {token:?}: only {vertex_count} vertices");
                    self.skipped_tokens += 1;
                }
                Some(index) => self.face_indices.push(index),
                None if token == "f" => {}
                None => {
                    trace!("dropping face reference {token:?}");
                    self.skipped_tokens += 1;
                }
            }
        }

        let indices = &self.face_indices;
        for pair in indices.windows(2) {
            self.mesh.edges.extend_from_slice(pair);
        }
        if let (Some(&first), Some(&last)) = (indices.first(), indices.last()) {
            self.mesh.edges.extend_from_slice(&[last, first]);
        }
    }

    fn finish(self) -> Mesh {
        debug!(
            "parsed OBJ: {} vertices, {} edges, extent {}, {} face references skipped",
            self.mesh.vertex_count(),
            self.mesh.edge_count(),
            self.mesh.extent,
            self.skipped_tokens
        );
        self.mesh
    }
}

/// Coordinates of a `v x y z` line, or `None` if the line is anything else
///
/// Each coordinate is the longest float prefix of its token, so `1.2.3`
/// reads as 1.2. A token with no float prefix at all (`-`, `.`) drops the
/// whole line.
fn parse_vertex_line(line: &str) -> Option<[f32; 3]> {
    let (_, (x, y, z)) = all_consuming(vertex_line)(line).ok()?;
    Some([float_prefix(x)?, float_prefix(y)?, float_prefix(z)?])
}

fn float_prefix(token: &str) -> Option<f32> {
    let (_, value) = float::<_, nom::error::Error<&str>>(token).ok()?;
    Some(value)
}

fn vertex_line(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (input, _) = preceded(multispace0, char('v'))(input)?;
    tuple((
        preceded(multispace1, number),
        preceded(multispace1, number),
        preceded(multispace1, number),
    ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit() || c == '.' || c == '-')(input)
}

/// Zero-based vertex index named by a face token such as `7`, `+7/2` or `7//3`
fn face_index(token: &str) -> Option<u32> {
    let head = token.split('/').next().unwrap_or_default();
    let (_, digits) =
        preceded(opt(char('+')), digit1::<_, nom::error::Error<&str>>)(head).ok()?;
    digits.parse::<u32>().ok()?.checked_sub(1)
}

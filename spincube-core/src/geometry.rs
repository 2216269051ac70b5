/// Named-vertex meshes drawn as polylines
use std::collections::HashMap;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::vertex::Vertex;

/// Edge length of the demo cube (vertices at ±0.25)
pub const CUBE_SIZE: f32 = 0.5;

/// An ordered polyline over mesh vertices, stored as resolved indices.
///
/// The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Consecutive index pairs, wrapping from the last back to the first
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

/// A fixed set of named vertices plus the faces connecting them.
///
/// Every face reference is checked when the mesh is built, so rendering never
/// has to deal with a missing vertex. The mesh cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    names: Vec<String>,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new<N, V, F, R>(vertices: V, faces: F) -> Result<Self>
    where
        N: Into<String>,
        V: IntoIterator<Item = (N, Vertex)>,
        F: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut positions = Vec::new();
        let mut lookup = HashMap::new();

        for (name, vertex) in vertices {
            let name = name.into();
            if lookup.insert(name.clone(), positions.len()).is_some() {
                return Err(MeshError::DuplicateVertex(name));
            }
            names.push(name);
            positions.push(vertex);
        }

        let mut resolved = Vec::new();
        for (face, refs) in faces.into_iter().enumerate() {
            let indices = refs
                .into_iter()
                .map(|name| {
                    let name = name.as_ref();
                    lookup
                        .get(name)
                        .copied()
                        .ok_or_else(|| MeshError::InvalidMeshReference {
                            face,
                            name: name.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            if indices.len() < 2 {
                return Err(MeshError::DegenerateFace {
                    face,
                    len: indices.len(),
                });
            }
            resolved.push(Face { indices });
        }

        debug!(
            vertices = positions.len(),
            faces = resolved.len(),
            "built mesh"
        );

        Ok(Self {
            names,
            vertices: positions,
            faces: resolved,
        })
    }

    /// The demo cube: `v0..v3` on the `+z` side, `v4..v7` on the `-z` side,
    /// two square faces plus the four edges joining them.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let corners = [
            (h, h, h),
            (h, -h, h),
            (-h, -h, h),
            (-h, h, h),
            (h, h, -h),
            (h, -h, -h),
            (-h, -h, -h),
            (-h, h, -h),
        ];
        let faces: [&[usize]; 6] = [&[0, 1, 2, 3], &[4, 5, 6, 7], &[0, 4], &[1, 5], &[2, 6], &[3, 7]];

        Self {
            names: (0..corners.len()).map(|i| format!("v{i}")).collect(),
            vertices: corners
                .iter()
                .map(|&(x, y, z)| Vertex::new(x, y, z))
                .collect(),
            faces: faces
                .iter()
                .map(|indices| Face {
                    indices: indices.to_vec(),
                })
                .collect(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.vertices[i])
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Every segment drawn in wireframe mode, face by face
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.faces
            .iter()
            .flat_map(|face| face.segments())
            .map(|(a, b)| (self.vertices[a], self.vertices[b]))
    }

    pub fn edge_count(&self) -> usize {
        self.faces.iter().map(Face::len).sum()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube(CUBE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_layout() {
        let cube = Mesh::cube(CUBE_SIZE);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 6);
        assert_eq!(cube.edge_count(), 16);
        assert_eq!(cube.edges().count(), 16);
        assert_eq!(cube.vertex("v6"), Some(&Vertex::new(-0.25, -0.25, -0.25)));
        assert_eq!(cube.vertex("v8"), None);
    }

    #[test]
    fn test_cube_matches_named_definition() {
        let cube = Mesh::cube(CUBE_SIZE);
        let named = Mesh::new(
            cube.names().iter().cloned().zip(cube.vertices().iter().copied()),
            [
                vec!["v0", "v1", "v2", "v3"],
                vec!["v4", "v5", "v6", "v7"],
                vec!["v0", "v4"],
                vec!["v1", "v5"],
                vec!["v2", "v6"],
                vec!["v3", "v7"],
            ],
        )
        .unwrap();
        assert_eq!(named.faces(), cube.faces());
        assert_eq!(cube.vertex("v1"), Some(&Vertex::new(0.25, -0.25, 0.25)));
    }

    #[test]
    fn test_two_vertex_face_wraps() {
        let mesh = Mesh::new(
            [("a", Vertex::new(0.0, 0.0, 1.0)), ("b", Vertex::new(1.0, 0.0, 1.0))],
            [["a", "b"]],
        )
        .unwrap();
        let segments: Vec<_> = mesh.faces()[0].segments().collect();
        assert_eq!(segments, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_unknown_reference_is_rejected() {
        let err = Mesh::new(
            [("a", Vertex::new(0.0, 0.0, 1.0)), ("b", Vertex::new(1.0, 0.0, 1.0))],
            [vec!["a", "b"], vec!["b", "missing"]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidMeshReference {
                face: 1,
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_short_face_is_rejected() {
        let err = Mesh::new([("a", Vertex::new(0.0, 0.0, 1.0))], [["a"]]).unwrap_err();
        assert_eq!(err, MeshError::DegenerateFace { face: 0, len: 1 });
    }

    #[test]
    fn test_duplicate_vertex_is_rejected() {
        let err = Mesh::new(
            [("a", Vertex::new(0.0, 0.0, 1.0)), ("a", Vertex::new(1.0, 0.0, 1.0))],
            Vec::<Vec<&str>>::new(),
        )
        .unwrap_err();
        assert_eq!(err, MeshError::DuplicateVertex("a".to_string()));
    }
}

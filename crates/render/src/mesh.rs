//! CPU-side geometry for the demo primitives.
//!
//! Faces are emitted as indexed triangle lists with per-face normals and
//! colors; backends draw them without back-face culling.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use pathmotion_common::Color;
use pathmotion_scene::{CubeStyle, Shape};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a flat polygon (triangle or quad) as a fan.
    fn push_face(&mut self, corners: &[Vec3], normal: Vec3, color: Color, uvs: &[[f32; 2]]) {
        let base = self.vertices.len() as u32;
        for (i, p) in corners.iter().enumerate() {
            self.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                color: color.to_rgba(),
                uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            });
        }
        for i in 1..corners.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }
}

const CUBE_VERTICES: [[f32; 3]; 8] = [
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // back
    [3, 2, 7, 6], // left
    [6, 7, 5, 4], // front
    [4, 5, 1, 0], // right
    [1, 5, 7, 2], // top
    [4, 0, 3, 6], // bottom
];

const CUBE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Face palette, dimmed to 0.8 on the colored cube.
const PALETTE: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
    Color::CYAN,
];

fn cube_corner(i: usize) -> Vec3 {
    Vec3::from_array(CUBE_VERTICES[i])
}

/// Cube with half-extent 1: six quads with per-face normals and texcoords.
pub fn cube_mesh(style: CubeStyle) -> MeshData {
    let mut mesh = MeshData::default();
    for (i, face) in CUBE_FACES.iter().enumerate() {
        let corners: Vec<Vec3> = face.iter().map(|&v| cube_corner(v)).collect();
        let color = match style {
            CubeStyle::ColoredFaces => PALETTE[i].scaled(0.8),
            CubeStyle::Textured => Color::WHITE,
        };
        mesh.push_face(&corners, Vec3::from_array(CUBE_NORMALS[i]), color, &FACE_UVS);
    }
    mesh
}

/// Edge segments of every cube face, 24 in total (each edge appears twice).
pub fn cube_edges() -> Vec<[Vec3; 2]> {
    CUBE_FACES
        .iter()
        .flat_map(|face| (0..4).map(move |i| [cube_corner(face[i]), cube_corner(face[(i + 1) % 4])]))
        .collect()
}

/// Square pyramid: apex at +Y, base at y = -1, flat-shaded faces.
pub fn pyramid_mesh() -> MeshData {
    let apex = Vec3::new(0.0, 1.0, 0.0);
    let base = [
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, -1.0),
    ];
    let centroid = Vec3::new(0.0, -0.5, 0.0);

    let mut mesh = MeshData::default();
    for i in 0..4 {
        let corners = [apex, base[i], base[(i + 1) % 4]];
        let normal = outward_normal(&corners, centroid);
        mesh.push_face(&corners, normal, PALETTE[i], &[[0.5, 1.0], [0.0, 0.0], [1.0, 0.0]]);
    }
    let normal = outward_normal(&base, centroid);
    mesh.push_face(&base, normal, PALETTE[4], &FACE_UVS);
    mesh
}

fn outward_normal(corners: &[Vec3], centroid: Vec3) -> Vec3 {
    let n = (corners[1] - corners[0])
        .cross(corners[2] - corners[0])
        .normalize();
    let center = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;
    if n.dot(center - centroid) < 0.0 { -n } else { n }
}

/// Latitude/longitude sphere: `(segments + 1)^2` vertices, `2 * segments^2` triangles.
pub fn sphere_mesh(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let ring = segments + 1;
    let mut mesh = MeshData::default();

    for i in 0..=segments {
        let lat = PI * (-0.5 + i as f32 / segments as f32);
        for j in 0..=segments {
            let lon = 2.0 * PI * j as f32 / segments as f32;
            let unit = Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin());
            mesh.vertices.push(MeshVertex {
                position: (unit * radius).to_array(),
                normal: unit.to_array(),
                color: Color::WHITE.to_rgba(),
                uv: [j as f32 / segments as f32, i as f32 / segments as f32],
            });
        }
    }

    for i in 0..segments {
        for j in 0..segments {
            let first = i * ring + j;
            let second = first + ring;
            mesh.indices
                .extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }
    mesh
}

pub fn mesh_for(shape: &Shape) -> MeshData {
    match *shape {
        Shape::Cube(style) => cube_mesh(style),
        Shape::Pyramid => pyramid_mesh(),
        Shape::Sphere { radius, segments } => sphere_mesh(radius, segments),
    }
}

/// Expand a polyline into line-list vertices.
pub fn strip_to_lines(points: &[Vec3], color: Color) -> Vec<LineVertex> {
    let color = color.to_rgba();
    points
        .windows(2)
        .flat_map(|w| {
            [
                LineVertex {
                    position: w[0].to_array(),
                    color,
                },
                LineVertex {
                    position: w[1].to_array(),
                    color,
                },
            ]
        })
        .collect()
}

/// Black cube outline transformed into world space.
pub fn cube_outline(model: &Mat4) -> Vec<LineVertex> {
    let color = Color::BLACK.to_rgba();
    cube_edges()
        .into_iter()
        .flatten()
        .map(|p| LineVertex {
            position: model.transform_point3(p).to_array(),
            color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_quads() {
        let mesh = cube_mesh(CubeStyle::ColoredFaces);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices[0].color, [0.8, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn cube_normals_point_outward() {
        let mesh = cube_mesh(CubeStyle::Textured);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!((p.dot(n) - 1.0).abs() < 1e-6);
            assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn cube_edges_are_unit_cube_edges() {
        let edges = cube_edges();
        assert_eq!(edges.len(), 24);
        for [a, b] in edges {
            assert!(((a - b).length() - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn pyramid_faces_are_outward() {
        let mesh = pyramid_mesh();
        assert_eq!(mesh.triangle_count(), 6);
        let base = mesh.vertices.last().unwrap();
        assert_eq!(base.normal, [0.0, -1.0, 0.0]);
        assert_eq!(base.color, Color::MAGENTA.to_rgba());
        for v in &mesh.vertices[..12] {
            assert!(v.normal[1] > 0.0);
        }
    }

    #[test]
    fn sphere_counts_and_radius() {
        let mesh = sphere_mesh(0.8, 16);
        assert_eq!(mesh.vertices.len(), 17 * 17);
        assert_eq!(mesh.triangle_count(), 2 * 16 * 16);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 0.8).abs() < 1e-5);
        }
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn strip_becomes_segments() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let lines = strip_to_lines(&pts, Color::PATH_GRAY);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].position, lines[2].position);
        assert!(strip_to_lines(&pts[..1], Color::BLACK).is_empty());
    }

    #[test]
    fn outline_follows_model() {
        let model = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
        let lines = cube_outline(&model);
        assert_eq!(lines.len(), 48);
        assert!(lines.iter().all(|v| v.position[0] >= 2.0 && v.position[0] <= 4.0));
    }
}

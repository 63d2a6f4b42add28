//! Procedural vertices for cubes and spheres.
//!
//! Gives each playground simple GPU-uploadable geometry so it can focus on
//! its rendering technique. In a real application these would come from
//! loaded models; here a cube or a sphere is almost always enough.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Opaque white, the default vertex color.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Position-only vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPosition {
    pub position: [f32; 3],
}

impl VertexPosition {
    pub fn new(position: Vec3) -> Self {
        Self { position: position.to_array() }
    }
}

/// Vertex with texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPositionTexture {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl VertexPositionTexture {
    pub fn new(position: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
        }
    }
}

/// Vertex with a normal and texture coordinates, for lighting playgrounds.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormalTexture {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl VertexPositionNormalTexture {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coord: tex_coord.to_array(),
        }
    }
}

/// Vertex with a color and a normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPositionColorNormal {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl VertexPositionColorNormal {
    pub fn new(position: Vec3, color: [f32; 4], normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color,
            normal: normal.to_array(),
        }
    }
}

// Six faces, two triangles each, on the unit cube [0,1]^3.
// Order: up, front, down, back, left, right.
static CUBE_FACES: [([f32; 3], [[f32; 3]; 6]); 6] = [
    (
        [0.0, 1.0, 0.0],
        [
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
        ],
    ),
    (
        [0.0, 0.0, 1.0],
        [
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
    ),
    (
        [0.0, -1.0, 0.0],
        [
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
    ),
    (
        [0.0, 0.0, -1.0],
        [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
    ),
    (
        [-1.0, 0.0, 0.0],
        [
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
    ),
    (
        [1.0, 0.0, 0.0],
        [
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ],
    ),
];

// Per-face texture coordinates, same pattern on every face.
static FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
];

fn cube_corners(origin: Vec3, size: f32) -> impl Iterator<Item = (Vec3, Vec3, Vec2)> {
    CUBE_FACES.iter().flat_map(move |(normal, corners)| {
        let normal = Vec3::from_array(*normal);
        corners.iter().zip(FACE_UVS.iter()).map(move |(corner, uv)| {
            (
                Vec3::from_array(*corner) * size + origin,
                normal,
                Vec2::from_array(*uv),
            )
        })
    })
}

/// 36 position-only vertices for a cube of edge `size` at `origin`.
pub fn cube_position(origin: Vec3, size: f32) -> Vec<VertexPosition> {
    cube_corners(origin, size)
        .map(|(position, _, _)| VertexPosition::new(position))
        .collect()
}

/// 36 textured vertices for a cube of edge `size` at `origin`.
pub fn cube_position_texture(origin: Vec3, size: f32) -> Vec<VertexPositionTexture> {
    cube_corners(origin, size)
        .map(|(position, _, uv)| VertexPositionTexture::new(position, uv))
        .collect()
}

/// 36 lit, textured vertices for a cube of edge `size` at `origin`.
pub fn cube_position_normal_texture(origin: Vec3, size: f32) -> Vec<VertexPositionNormalTexture> {
    cube_corners(origin, size)
        .map(|(position, normal, uv)| VertexPositionNormalTexture::new(position, normal, uv))
        .collect()
}

/// 36 colored, lit vertices for a cube of edge `size` at `origin`.
pub fn cube_position_color_normal(
    origin: Vec3,
    size: f32,
    color: [f32; 4],
) -> Vec<VertexPositionColorNormal> {
    cube_corners(origin, size)
        .map(|(position, normal, _)| VertexPositionColorNormal::new(position, color, normal))
        .collect()
}

/// Indexed latitude/longitude sphere of the given `diameter`.
///
/// Produces a single bottom-pole vertex, `tessellation - 1` latitude rings of
/// `2 * tessellation` vertices and a top-pole vertex, with a triangle fan at
/// the bottom pole and quads between successive rings. Every normal is unit
/// length and every position lies on the sphere.
///
/// # Panics
///
/// Panics if `tessellation` is less than 3.
pub fn sphere_position_color_normal(
    diameter: f32,
    tessellation: usize,
    color: [f32; 4],
) -> (Vec<VertexPositionColorNormal>, Vec<u32>) {
    assert!(tessellation >= 3, "tessellation must be at least 3");

    let vertical_segments = tessellation;
    let horizontal_segments = tessellation * 2;
    let radius = diameter / 2.0;

    let mut vertices = Vec::with_capacity(2 + (vertical_segments - 1) * horizontal_segments);
    let mut push = |normal: Vec3| {
        vertices.push(VertexPositionColorNormal::new(normal * radius, color, normal));
    };

    push(Vec3::NEG_Y);

    for i in 0..vertical_segments - 1 {
        let latitude = ((i + 1) as f32 * std::f32::consts::PI / vertical_segments as f32)
            - std::f32::consts::FRAC_PI_2;
        let dy = latitude.sin();
        let dxz = latitude.cos();

        for j in 0..horizontal_segments {
            let longitude = j as f32 * std::f32::consts::TAU / horizontal_segments as f32;
            push(Vec3::new(longitude.cos() * dxz, dy, longitude.sin() * dxz));
        }
    }

    push(Vec3::Y);

    let h = horizontal_segments as u32;
    let mut indices = Vec::with_capacity(
        3 * horizontal_segments + 6 * horizontal_segments * (vertical_segments - 2),
    );

    // Fan connecting the bottom pole to the lowest ring.
    for i in 0..h {
        indices.extend([0, 1 + (i + 1) % h, 1 + i]);
    }

    // Quads joining each pair of latitude rings.
    for i in 0..(vertical_segments - 2) as u32 {
        for j in 0..h {
            let next_i = i + 1;
            let next_j = (j + 1) % h;

            indices.extend([
                1 + i * h + j,
                1 + i * h + next_j,
                1 + next_i * h + j,
            ]);
            indices.extend([
                1 + i * h + next_j,
                1 + next_i * h + next_j,
                1 + next_i * h + j,
            ]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices_inside_bounds() {
        let origin = Vec3::new(-0.5, -0.5, -0.5);
        let vertices = cube_position(origin, 1.0);
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            for (c, o) in v.position.iter().zip(origin.to_array()) {
                assert!(*c >= o && *c <= o + 1.0);
            }
        }
    }

    #[test]
    fn cube_normals_are_axis_aligned_and_consistent() {
        let vertices = cube_position_normal_texture(Vec3::ZERO, 2.0);
        assert_eq!(vertices.len(), 36);

        for triangle in vertices.chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
            let normal = Vec3::from_array(a.normal);
            assert!((normal.length() - 1.0).abs() < 1e-6);
            assert_eq!(a.normal, b.normal);
            assert_eq!(a.normal, c.normal);

            // All triangles wind the same way relative to their face normal.
            let e1 = Vec3::from_array(b.position) - Vec3::from_array(a.position);
            let e2 = Vec3::from_array(c.position) - Vec3::from_array(a.position);
            assert!(e2.cross(e1).dot(normal) > 0.0);
        }
    }

    #[test]
    fn cube_texcoords_cover_the_unit_square() {
        let vertices = cube_position_texture(Vec3::ZERO, 1.0);
        for face in vertices.chunks(6) {
            let uvs: Vec<[f32; 2]> = face.iter().map(|v| v.tex_coord).collect();
            assert!(uvs.contains(&[0.0, 0.0]));
            assert!(uvs.contains(&[1.0, 0.0]));
            assert!(uvs.contains(&[0.0, 1.0]));
            assert!(uvs.contains(&[1.0, 1.0]));
        }
    }

    #[test]
    fn sphere_vertices_lie_on_the_sphere() {
        let (vertices, _) = sphere_position_color_normal(3.0, 8, WHITE);
        assert_eq!(vertices.len(), 2 + 7 * 16);
        for v in &vertices {
            let position = Vec3::from_array(v.position);
            let normal = Vec3::from_array(v.normal);
            assert!((position.length() - 1.5).abs() < 1e-5);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(position.normalize().dot(normal) > 0.999);
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let (vertices, indices) = sphere_position_color_normal(1.0, 5, WHITE);
        let h = 10;
        assert_eq!(indices.len(), 3 * h + 6 * h * 3);
        assert_eq!(indices.len() % 3, 0);
        for i in &indices {
            assert!((*i as usize) < vertices.len());
        }
    }

    #[test]
    #[should_panic(expected = "tessellation")]
    fn sphere_rejects_degenerate_tessellation() {
        let _ = sphere_position_color_normal(1.0, 2, WHITE);
    }
}

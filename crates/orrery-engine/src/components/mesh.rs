use std::f32::consts::PI;

/// Indexed triangle mesh with interleaved float vertices.
///
/// `stride` is the number of floats per vertex: 3 for position-only meshes,
/// 5 for position + UV.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
    pub stride: usize,
}

impl MeshData {
    pub fn new(stride: usize) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            stride,
        }
    }

    pub fn vertex_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.vertices.len() / self.stride
        }
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr()
    }

    pub fn indices_ptr(&self) -> *const u16 {
        self.indices.as_ptr()
    }

    /// Append a quad as two triangles (0,1,2) (0,2,3).
    fn push_quad(&mut self, corners: [[f32; 5]; 4]) {
        let base = self.vertex_count() as u16;
        for corner in corners {
            self.vertices.extend_from_slice(&corner);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Latitude/longitude sphere centered at the origin.
///
/// Produces `(lat + 1) * (lon + 1)` vertices (the seam column is duplicated so
/// UVs wrap cleanly) and `6 * lat * lon` indices.
/// UVs run `(1 - lon/lon_bands, 1 - lat/lat_bands)`.
pub fn uv_sphere(radius: f32, lat_bands: u16, lon_bands: u16, with_uv: bool) -> MeshData {
    let lat_bands = lat_bands.max(1);
    let lon_bands = lon_bands.max(1);
    let mut mesh = MeshData::new(if with_uv { 5 } else { 3 });

    for lat in 0..=lat_bands {
        let theta = lat as f32 * PI / lat_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for lon in 0..=lon_bands {
            let phi = lon as f32 * 2.0 * PI / lon_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            mesh.vertices.extend_from_slice(&[
                radius * cos_phi * sin_theta,
                radius * cos_theta,
                radius * sin_phi * sin_theta,
            ]);
            if with_uv {
                mesh.vertices.extend_from_slice(&[
                    1.0 - lon as f32 / lon_bands as f32,
                    1.0 - lat as f32 / lat_bands as f32,
                ]);
            }
        }
    }

    let row = lon_bands + 1;
    for lat in 0..lat_bands {
        for lon in 0..lon_bands {
            let first = lat * row + lon;
            let second = first + row;
            mesh.indices
                .extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }
    mesh
}

const BODY_HALF: [f32; 3] = [0.05, 0.1, 0.05];
const PANEL_WIDTH: f32 = 0.3;
const PANEL_HALF_HEIGHT: f32 = 0.08;
const PANEL_HALF_THICKNESS: f32 = 0.01;
const PANEL_GAP: f32 = 0.05;

/// Satellite model: a 0.1 × 0.2 × 0.1 box body with two tilted solar panels.
/// Position + UV, 8 quads.
pub fn satellite_mesh() -> MeshData {
    let [bx, by, bz] = BODY_HALF;
    let mut mesh = MeshData::new(5);

    // Body: front, back, left, right, top, bottom
    mesh.push_quad([
        [-bx, -by, bz, 0.0, 0.0],
        [bx, -by, bz, 1.0, 0.0],
        [bx, by, bz, 1.0, 1.0],
        [-bx, by, bz, 0.0, 1.0],
    ]);
    mesh.push_quad([
        [bx, -by, -bz, 0.0, 0.0],
        [-bx, -by, -bz, 1.0, 0.0],
        [-bx, by, -bz, 1.0, 1.0],
        [bx, by, -bz, 0.0, 1.0],
    ]);
    mesh.push_quad([
        [-bx, -by, -bz, 0.0, 0.0],
        [-bx, -by, bz, 1.0, 0.0],
        [-bx, by, bz, 1.0, 1.0],
        [-bx, by, -bz, 0.0, 1.0],
    ]);
    mesh.push_quad([
        [bx, -by, bz, 0.0, 0.0],
        [bx, -by, -bz, 1.0, 0.0],
        [bx, by, -bz, 1.0, 1.0],
        [bx, by, bz, 0.0, 1.0],
    ]);
    mesh.push_quad([
        [-bx, by, bz, 0.0, 0.0],
        [bx, by, bz, 1.0, 0.0],
        [bx, by, -bz, 1.0, 1.0],
        [-bx, by, -bz, 0.0, 1.0],
    ]);
    mesh.push_quad([
        [-bx, -by, -bz, 0.0, 0.0],
        [bx, -by, -bz, 1.0, 0.0],
        [bx, -by, bz, 1.0, 1.0],
        [-bx, -by, bz, 0.0, 1.0],
    ]);

    let (ph, pz) = (PANEL_HALF_HEIGHT, PANEL_HALF_THICKNESS);
    let left = -(bx + PANEL_GAP);
    mesh.push_quad([
        [left, -ph, -pz, 0.0, 0.0],
        [left, -ph, pz, 1.0, 0.0],
        [left - PANEL_WIDTH, ph, pz, 1.0, 1.0],
        [left - PANEL_WIDTH, ph, -pz, 0.0, 1.0],
    ]);
    let right = bx + PANEL_GAP;
    mesh.push_quad([
        [right, -ph, pz, 0.0, 0.0],
        [right, -ph, -pz, 1.0, 0.0],
        [right + PANEL_WIDTH, ph, -pz, 1.0, 1.0],
        [right + PANEL_WIDTH, ph, pz, 0.0, 1.0],
    ]);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let planet = uv_sphere(1.0, 30, 30, true);
        assert_eq!(planet.stride, 5);
        assert_eq!(planet.vertex_count(), 31 * 31);
        assert_eq!(planet.index_count(), 6 * 30 * 30);

        let sun = uv_sphere(0.5, 20, 20, false);
        assert_eq!(sun.stride, 3);
        assert_eq!(sun.vertex_count(), 21 * 21);
        assert_eq!(sun.index_count(), 6 * 20 * 20);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sun = uv_sphere(0.5, 8, 8, false);
        for v in sun.vertices.chunks(3) {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_uvs_span_unit_square() {
        let mesh = uv_sphere(1.0, 4, 4, true);
        let first = &mesh.vertices[0..5];
        assert_eq!((first[3], first[4]), (1.0, 1.0));
        let last = &mesh.vertices[mesh.vertices.len() - 5..];
        assert!(last[3].abs() < 1e-6 && last[4].abs() < 1e-6);
    }

    #[test]
    fn sphere_indices_in_bounds() {
        let mesh = uv_sphere(1.0, 30, 30, true);
        let n = mesh.vertex_count() as u16;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn satellite_counts() {
        let mesh = satellite_mesh();
        assert_eq!(mesh.stride, 5);
        assert_eq!(mesh.vertex_count(), 32);
        assert_eq!(mesh.index_count(), 48);
        assert!(mesh.indices.iter().all(|&i| i < 32));
    }

    #[test]
    fn panels_extend_past_body() {
        let mesh = satellite_mesh();
        let max_x = mesh
            .vertices
            .chunks(5)
            .map(|v| v[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - (0.05 + 0.05 + 0.3)).abs() < 1e-6);
    }
}

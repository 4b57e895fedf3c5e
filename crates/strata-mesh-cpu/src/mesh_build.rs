use strata_geom::Vec3;

use crate::face::Face;

/// CPU-side chunk geometry: interleaved vertex attributes and quad indices.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshData {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub col: Vec<u8>,
    pub idx: Vec<u32>,
    pub(crate) face_quads: [usize; 6],
}

/// Per-build counters, mostly for logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub quads: usize,
    pub vertices: usize,
    pub per_face: [usize; 6],
}

impl MeshData {
    /// Clears all arrays but retains capacity for reuse across builds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.col.clear();
        self.idx.clear();
        self.face_quads = [0; 6];
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.norm.reserve(n_quads * 4 * 3);
        self.uv.reserve(n_quads * 4 * 2);
        self.col.reserve(n_quads * 4 * 4);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    /// Quads emitted for one face orientation.
    #[inline]
    pub fn face_count(&self, face: Face) -> usize {
        self.face_quads[face.index()]
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            quads: self.quad_count(),
            vertices: self.vertex_count(),
            per_face: self.face_quads,
        }
    }

    /// Vertex positions as `[x, y, z]` triples.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.pos.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    /// Vertex normals as `[x, y, z]` triples.
    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.norm.chunks_exact(3).map(|n| [n[0], n[1], n[2]])
    }

    /// Appends a quad (two triangles) with explicit per-vertex UVs. The
    /// winding is flipped when needed so the front face points along `n`.
    pub fn add_quad_uv(
        &mut self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        d: Vec3,
        n: Vec3,
        mut uvs: [(f32, f32); 4],
        rgba: [u8; 4],
    ) {
        let base = self.vertex_count() as u32;
        let mut vs = [a, b, c, d];
        let cross = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
        if cross.dot(n) < 0.0 {
            vs.swap(1, 3);
            uvs.swap(1, 3);
        }
        for i in 0..4 {
            self.pos.extend_from_slice(&vs[i].to_array());
            self.norm.extend_from_slice(&n.to_array());
            self.uv.extend_from_slice(&[uvs[i].0, uvs[i].1]);
            self.col.extend_from_slice(&rgba);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Emits a face-aligned rectangle lying in the face plane at `origin`,
    /// `u1` wide along the face's first plane axis and `v1` along the second.
    /// UVs span the rectangle so textures tile once per block.
    pub fn add_face_rect(&mut self, face: Face, origin: Vec3, u1: f32, v1: f32, rgba: [u8; 4]) {
        let (u_axis, v_axis) = face.plane_axes();
        let du = Vec3::ZERO.with(u_axis, u1);
        let dv = Vec3::ZERO.with(v_axis, v1);
        let a = origin;
        let b = origin + du;
        let c = origin + du + dv;
        let d = origin + dv;
        let uvs = [(0.0, 0.0), (u1, 0.0), (u1, v1), (0.0, v1)];
        self.add_quad_uv(a, b, c, d, face.normal(), uvs, rgba);
        self.face_quads[face.index()] += 1;
    }
}

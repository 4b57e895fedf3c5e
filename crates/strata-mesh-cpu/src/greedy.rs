//! Greedy face merging over one chunk.
//!
//! Each face orientation is swept slice by slice along its normal axis. A 2D
//! mask records which cells of the slice expose that face and with which
//! block kind; maximal rectangles of identical mask entries are grown width
//! first, then height, and emitted as a single quad.

use strata_blocks::BlockKind;
use strata_chunk::Chunk;
use strata_geom::{Axis, Vec3};

use crate::face::Face;
use crate::mesh_build::MeshData;

const DIMS: [usize; 3] = [Chunk::SIZE, Chunk::HEIGHT, Chunk::SIZE];

/// Block at chunk-local `(x, y, z)` given per-axis coordinates; out of range is air.
#[inline]
fn block_at(chunk: &Chunk, c: [i32; 3]) -> BlockKind {
    chunk.get_block(c[0], c[1], c[2])
}

/// Fills `mask` for slice `s` of `face`. Returns whether any cell is set.
fn fill_mask(chunk: &Chunk, face: Face, s: usize, mask: &mut [Option<BlockKind>]) -> bool {
    let d = face.axis().index();
    let (u_axis, v_axis) = face.plane_axes();
    let (u, v) = (u_axis.index(), v_axis.index());
    let step = if face.is_positive() { 1 } else { -1 };
    let mut any = false;
    for j in 0..DIMS[v] {
        for i in 0..DIMS[u] {
            let mut c = [0i32; 3];
            c[d] = s as i32;
            c[u] = i as i32;
            c[v] = j as i32;
            let kind = block_at(chunk, c);
            let mut n = c;
            n[d] += step;
            let exposed = kind.is_solid() && !block_at(chunk, n).is_solid();
            let cell = if exposed { Some(kind) } else { None };
            any |= cell.is_some();
            mask[j * DIMS[u] + i] = cell;
        }
    }
    any
}

/// Merges the mask into rectangles and appends one quad per rectangle.
fn emit_mask(out: &mut MeshData, face: Face, s: usize, mask: &mut [Option<BlockKind>]) {
    let d = face.axis();
    let (u_axis, v_axis) = face.plane_axes();
    let (nu, nv) = (DIMS[u_axis.index()], DIMS[v_axis.index()]);
    let plane = (if face.is_positive() { s + 1 } else { s }) as f32;

    for j in 0..nv {
        let mut i = 0;
        while i < nu {
            let Some(kind) = mask[j * nu + i] else {
                i += 1;
                continue;
            };
            let mut w = 1;
            while i + w < nu && mask[j * nu + i + w] == Some(kind) {
                w += 1;
            }
            let mut h = 1;
            'grow: while j + h < nv {
                for k in 0..w {
                    if mask[(j + h) * nu + i + k] != Some(kind) {
                        break 'grow;
                    }
                }
                h += 1;
            }
            for jj in 0..h {
                for ii in 0..w {
                    mask[(j + jj) * nu + i + ii] = None;
                }
            }
            let origin = Vec3::ZERO
                .with(d, plane)
                .with(u_axis, i as f32)
                .with(v_axis, j as f32);
            out.add_face_rect(face, origin, w as f32, h as f32, kind.color());
            i += w;
        }
    }
}

/// Appends the greedily merged faces of every solid block in `chunk`.
pub(crate) fn mesh_chunk(chunk: &Chunk, out: &mut MeshData) {
    let mut mask: Vec<Option<BlockKind>> = Vec::new();
    for face in Face::ALL {
        let d = face.axis().index();
        let (u_axis, v_axis) = face.plane_axes();
        mask.clear();
        mask.resize(DIMS[u_axis.index()] * DIMS[v_axis.index()], None);
        for s in 0..DIMS[d] {
            if fill_mask(chunk, face, s, &mut mask) {
                emit_mask(out, face, s, &mut mask);
            }
        }
    }
}

#[inline]
pub(crate) fn local_extent(axis: Axis) -> f32 {
    DIMS[axis.index()] as f32
}

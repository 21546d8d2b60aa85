use voxport_scene::{Palette, PaletteIndex, VoxelModel};

use crate::face::Face;
use crate::grid::DenseGrid;
use crate::mesh_build::{MeshBuffer, MeshBuild, Quad};
use crate::options::MeshOptions;
use crate::warn_unresolved;

/// Covers every `Some` cell of a row-major `width x height` mask with rectangles of
/// equal keys. Each rectangle grows along x first, then along y while the whole next
/// row segment matches. Rectangles are emitted as `(x, y, w, h, key)` in scan order.
pub fn greedy_rects<K: Copy + Eq>(
    width: usize,
    height: usize,
    mask: &[Option<K>],
    mut emit: impl FnMut(usize, usize, usize, usize, K),
) {
    let mut used = vec![false; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let Some(key) = mask[idx] else {
                continue;
            };
            if used[idx] {
                continue;
            }
            let mut w = 1;
            while x + w < width && mask[idx + w] == Some(key) && !used[idx + w] {
                w += 1;
            }
            let mut h = 1;
            'expand: while y + h < height {
                for i in 0..w {
                    let j = (y + h) * width + (x + i);
                    if mask[j] != Some(key) || used[j] {
                        break 'expand;
                    }
                }
                h += 1;
            }
            emit(x, y, w, h, key);
            for yy in 0..h {
                for xx in 0..w {
                    used[(y + yy) * width + (x + xx)] = true;
                }
            }
        }
    }
}

/// Merged quads for a model, sweeping `Face::ALL` in order and layers ascending.
pub fn greedy_quads(model: &VoxelModel) -> Vec<Quad> {
    let grid = DenseGrid::from_model(model);
    let mut quads = Vec::new();
    let mut mask: Vec<Option<PaletteIndex>> = Vec::new();
    for face in Face::ALL {
        let d = face.axis();
        let (u, v) = face.plane_axes();
        let (sd, su, sv) = (grid.extent(d), grid.extent(u), grid.extent(v));
        mask.clear();
        mask.resize(su * sv, None);
        for layer in 0..sd {
            let mut cell = [0i32; 3];
            cell[d] = layer as i32;
            for j in 0..sv {
                cell[v] = j as i32;
                for i in 0..su {
                    cell[u] = i as i32;
                    mask[j * su + i] = grid.exposed(cell, face);
                }
            }
            greedy_rects(su, sv, &mask, |i, j, w, h, index| {
                let mut at = [0i32; 3];
                at[d] = layer as i32;
                at[u] = i as i32;
                at[v] = j as i32;
                quads.push(Quad {
                    face,
                    cell: at,
                    width: w as u32,
                    height: h as u32,
                    index,
                });
            });
        }
    }
    quads
}

/// Mesher that merges coplanar same-material faces into maximal rectangles.
pub struct GreedyMesher;

impl GreedyMesher {
    pub fn build(model: &VoxelModel, palette: &Palette, options: &MeshOptions) -> MeshBuffer {
        warn_unresolved(model, palette);
        let mut build = MeshBuild::default();
        build.extend(greedy_quads(model));
        build.finish(model.size, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_grow_width_before_height() {
        // 3x2 of one key; a single 3x2 rectangle.
        let mask = vec![Some(1u8); 6];
        let mut out = Vec::new();
        greedy_rects(3, 2, &mask, |x, y, w, h, k| out.push((x, y, w, h, k)));
        assert_eq!(out, vec![(0, 0, 3, 2, 1)]);
    }

    #[test]
    fn rects_stop_at_key_change_and_holes() {
        // row 0: A A B
        // row 1: A . B
        let mask = vec![Some('a'), Some('a'), Some('b'), Some('a'), None, Some('b')];
        let mut out = Vec::new();
        greedy_rects(3, 2, &mask, |x, y, w, h, k| out.push((x, y, w, h, k)));
        assert_eq!(
            out,
            vec![(0, 0, 2, 1, 'a'), (2, 0, 1, 2, 'b'), (0, 1, 1, 1, 'a')]
        );
    }

    #[test]
    fn rects_cover_each_cell_once() {
        let keys = [1, 1, 2, 0, 1, 1, 2, 2, 0, 1, 1, 1];
        let mask: Vec<Option<u8>> = keys.iter().map(|&k| (k != 0).then_some(k)).collect();
        let mut cover = vec![0; mask.len()];
        greedy_rects(4, 3, &mask, |x, y, w, h, k| {
            for yy in y..y + h {
                for xx in x..x + w {
                    assert_eq!(mask[yy * 4 + xx], Some(k));
                    cover[yy * 4 + xx] += 1;
                }
            }
        });
        for (c, m) in cover.iter().zip(&mask) {
            assert_eq!(*c, usize::from(m.is_some()));
        }
    }
}

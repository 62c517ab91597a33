//! One-dimensional greedy merging along scan lines.
//!
//! A line is scanned voxel by voxel while up to four faces keep an open run
//! each. A run closes when the block type changes, the face stops being
//! visible, or its AO levels change; the closed run becomes one quad.

use tessel_blocks::BlockId;

use crate::ao::AoLevels;
use crate::constants::MAX_AO_LEVEL;
use crate::face::Face;
use crate::mesh_build::Winding;

/// A face run ready to be turned into a quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergedQuad {
    pub face: Face,
    /// Voxel where the run starts.
    pub origin: [i32; 3],
    /// Voxels covered along the merge axis, at least 1.
    pub len: u32,
    pub block: BlockId,
    pub ao: AoLevels,
}

/// Open run of one face while scanning a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    pub start: Option<usize>,
    pub ao: AoLevels,
}

/// Faces merged along z at fixed `(x, y)`.
pub const XY_FACES: [Face; 4] = [Face::PosX, Face::NegX, Face::PosY, Face::NegY];
/// Faces merged along x at fixed `(z, y)`.
pub const Z_FACES: [Face; 2] = [Face::PosZ, Face::NegZ];

/// Per-voxel inputs of a scan line.
pub trait LineSource {
    fn len(&self) -> usize;
    fn block(&self, i: usize) -> BlockId;
    fn visible(&self, face: Face, i: usize) -> bool;
    fn ao(&self, face: Face, i: usize) -> AoLevels;
    /// Voxel coordinate of scan index `i`.
    fn origin(&self, i: usize) -> [i32; 3];
}

/// Scans one line, calling `emit` for every closed run in scan order.
/// At most four faces are tracked per line.
pub fn merge_line<S, E>(
    src: &S,
    faces: &[Face],
    air: BlockId,
    emit: &mut impl FnMut(MergedQuad) -> Result<(), E>,
) -> Result<(), E>
where
    S: LineSource + ?Sized,
{
    debug_assert!(faces.len() <= 4);
    let mut runs = [RunState::default(); 4];
    let mut current = air;
    let len = src.len();
    for i in 0..len {
        let block = src.block(i);
        if current == air && block == air {
            continue;
        }
        let changed = block != current;
        for (run, &face) in runs.iter_mut().zip(faces) {
            let visible = block != air && src.visible(face, i);
            match run.start {
                Some(start) => {
                    let ao = src.ao(face, i);
                    if changed || !visible || ao != run.ao {
                        emit(MergedQuad {
                            face,
                            origin: src.origin(start),
                            len: (i - start) as u32,
                            block: current,
                            ao: run.ao,
                        })?;
                        run.start = visible.then_some(i);
                        run.ao = ao;
                    }
                }
                None if visible => {
                    run.start = Some(i);
                    run.ao = src.ao(face, i);
                }
                None => {}
            }
        }
        current = block;
    }
    for (run, &face) in runs.iter_mut().zip(faces) {
        if let Some(start) = run.start.take() {
            emit(MergedQuad {
                face,
                origin: src.origin(start),
                len: (len - start) as u32,
                block: current,
                ao: run.ao,
            })?;
        }
    }
    Ok(())
}

/// Merges the ±X and ±Y faces of the z-line at `(x, y)`.
pub fn merge_xy_line<S, E>(
    src: &S,
    air: BlockId,
    emit: &mut impl FnMut(MergedQuad) -> Result<(), E>,
) -> Result<(), E>
where
    S: LineSource + ?Sized,
{
    merge_line(src, &XY_FACES, air, emit)
}

/// Merges the ±Z faces of the x-line at `(z, y)`.
pub fn merge_z_line<S, E>(
    src: &S,
    air: BlockId,
    emit: &mut impl FnMut(MergedQuad) -> Result<(), E>,
) -> Result<(), E>
where
    S: LineSource + ?Sized,
{
    merge_line(src, &Z_FACES, air, emit)
}

/// Picks the diagonal that keeps interpolated AO from pinching.
///
/// A fully occluded corner 1 or 3 forces the flipped diagonal, else a fully
/// occluded corner 0 or 2 forces the normal one; otherwise the diagonal runs
/// through the brighter pair.
pub fn choose_winding(ao: AoLevels) -> Winding {
    if ao[1] == MAX_AO_LEVEL || ao[3] == MAX_AO_LEVEL {
        Winding::Flipped
    } else if ao[0] == MAX_AO_LEVEL || ao[2] == MAX_AO_LEVEL {
        Winding::Normal
    } else if ao[0] + ao[2] > ao[1] + ao[3] {
        Winding::Flipped
    } else {
        Winding::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: BlockId = BlockId(1);
    const DIRT: BlockId = BlockId(2);

    struct Line {
        blocks: Vec<BlockId>,
        ao: Vec<AoLevels>,
        hidden: Vec<usize>,
    }

    impl Line {
        fn new(blocks: &[u16]) -> Self {
            Self {
                blocks: blocks.iter().map(|&b| BlockId(b)).collect(),
                ao: vec![[0; 4]; blocks.len()],
                hidden: Vec::new(),
            }
        }
    }

    impl LineSource for Line {
        fn len(&self) -> usize {
            self.blocks.len()
        }
        fn block(&self, i: usize) -> BlockId {
            self.blocks[i]
        }
        fn visible(&self, _face: Face, i: usize) -> bool {
            !self.hidden.contains(&i)
        }
        fn ao(&self, _face: Face, i: usize) -> AoLevels {
            self.ao[i]
        }
        fn origin(&self, i: usize) -> [i32; 3] {
            [0, 0, i as i32]
        }
    }

    fn runs(line: &Line) -> Vec<(i32, u32, BlockId)> {
        let mut out = Vec::new();
        merge_line::<_, ()>(line, &[Face::PosY], BlockId::AIR, &mut |q| {
            out.push((q.origin[2], q.len, q.block));
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn uniform_line_is_one_run() {
        assert_eq!(runs(&Line::new(&[1, 1, 1, 1])), vec![(0, 4, STONE)]);
    }

    #[test]
    fn block_change_and_gaps_split() {
        let line = Line::new(&[1, 1, 2, 0, 0, 2, 2]);
        assert_eq!(
            runs(&line),
            vec![(0, 2, STONE), (2, 1, DIRT), (5, 2, DIRT)]
        );
    }

    #[test]
    fn ao_change_splits() {
        let mut line = Line::new(&[1, 1, 1, 1]);
        line.ao[2] = [1, 0, 0, 0];
        line.ao[3] = [1, 0, 0, 0];
        assert_eq!(runs(&line), vec![(0, 2, STONE), (2, 2, STONE)]);
    }

    #[test]
    fn hidden_voxel_splits() {
        let mut line = Line::new(&[1, 1, 1, 1, 1]);
        line.hidden = vec![2];
        assert_eq!(runs(&line), vec![(0, 2, STONE), (3, 2, STONE)]);
    }

    #[test]
    fn empty_line_emits_nothing() {
        assert!(runs(&Line::new(&[0, 0, 0])).is_empty());
    }

    #[test]
    fn emit_error_stops_the_scan() {
        let line = Line::new(&[1, 0, 1]);
        let mut calls = 0;
        let r = merge_line(&line, &[Face::PosY], BlockId::AIR, &mut |_| {
            calls += 1;
            Err("no layers")
        });
        assert_eq!(r, Err("no layers"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn winding_priority() {
        assert_eq!(choose_winding([0, 0, 0, 0]), Winding::Normal);
        assert_eq!(choose_winding([0, 3, 0, 0]), Winding::Flipped);
        assert_eq!(choose_winding([0, 0, 0, 3]), Winding::Flipped);
        // A full corner at 0 or 2 pins the normal diagonal.
        assert_eq!(choose_winding([3, 0, 0, 0]), Winding::Normal);
        assert_eq!(choose_winding([0, 0, 3, 0]), Winding::Normal);
        // 1 and 3 win over 0 and 2.
        assert_eq!(choose_winding([3, 3, 0, 0]), Winding::Flipped);
        assert_eq!(choose_winding([2, 0, 1, 0]), Winding::Flipped);
        assert_eq!(choose_winding([1, 1, 1, 1]), Winding::Normal);
    }
}

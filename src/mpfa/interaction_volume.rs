use crate::grid::{Grid, NFACE};
use crate::StrError;
use gemlab::mesh::{CellId, PointId};

/// Holds a cell of the interaction volume reached across face 12 (cell 2) or face 13 (cell 3)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SideCell {
    /// Id of the cell
    pub cell: CellId,

    /// Local index (in this cell) of the face shared with cell 1
    pub face_back: usize,

    /// Local index (in this cell) of the other face touching the corner (face 24 or face 34)
    pub face_cross: usize,
}

/// Holds the cell of the interaction volume diagonally opposite to cell 1
///
/// At a re-entrant corner one of the cells 2 or 3 is missing; the corresponding face
/// (face 42 or face 43) is then on the boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DiagonalCell {
    /// Id of the cell
    pub cell: CellId,

    /// Local index (in this cell) of the face towards position 2
    pub face42: usize,

    /// Local index (in this cell) of the face towards position 3
    pub face43: usize,
}

/// Holds the cells and faces around one corner of a cell
///
/// The interaction volume is built from cell 1, one of its faces (face 12) and the next face
/// in anticlockwise order (face 13). The positions are numbered as follows:
///
/// ```text
///        face34
///   [3] ------ [4]
///    |    |     |
///  face13 +  face24        + is the corner shared by face 12 and face 13
///    |    |     |
///   [1] ------ [2]
///        face12
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionVolume {
    /// Id of cell 1
    pub cell1: CellId,

    /// Local index of face 12 in cell 1
    pub face12: usize,

    /// Local index of face 13 in cell 1 (the face following face 12)
    pub face13: usize,

    /// Point shared by face 12 and face 13
    pub corner: PointId,

    /// Cell across face 12 (None if face 12 is on the boundary)
    pub cell2: Option<SideCell>,

    /// Cell across face 13 (None if face 13 is on the boundary)
    pub cell3: Option<SideCell>,

    /// Cell diagonally opposite to cell 1
    ///
    /// None at boundary corners and at concave corners where the faces 24 and 34 are both on
    /// the boundary. If only one of the cells 2 and 3 exists, the diagonal cell is the neighbor
    /// across its cross face (re-entrant corner).
    pub cell4: Option<DiagonalCell>,
}

impl InteractionVolume {
    /// Builds the interaction volume of a cell and one of its faces
    pub fn new(grid: &Grid, cell1: CellId, face12: usize) -> Result<Self, StrError> {
        let face13 = grid.next_face(face12);
        let corner = grid
            .shared_corner(cell1, face12, face13)
            .ok_or("degenerate interaction volume: faces 12 and 13 do not share a corner")?;
        let side = |face: usize| -> Result<Option<SideCell>, StrError> {
            let f = &grid.cells[cell1].faces[face];
            match (f.neighbor, f.index_in_neighbor) {
                (Some(cell), Some(face_back)) => {
                    let face_cross = grid
                        .face_with_corner(cell, corner, face_back)
                        .ok_or("degenerate interaction volume: cannot find the cross face")?;
                    Ok(Some(SideCell {
                        cell,
                        face_back,
                        face_cross,
                    }))
                }
                _ => Ok(None),
            }
        };
        let cell2 = side(face12)?;
        let cell3 = side(face13)?;
        let cross = |c: &SideCell| {
            let f = &grid.cells[c.cell].faces[c.face_cross];
            match (f.neighbor, f.index_in_neighbor) {
                (Some(cell), Some(index)) if cell != cell1 => Some((cell, index)),
                _ => None,
            }
        };
        let cell4 = match (cell2, cell3) {
            (Some(c2), Some(c3)) => match (cross(&c2), cross(&c3)) {
                (Some((a, face42)), Some((b, face43))) if a == b => Some(DiagonalCell {
                    cell: a,
                    face42,
                    face43,
                }),
                (None, None) => None,
                _ => return Err("degenerate interaction volume: cannot find the fourth cell"),
            },
            (Some(c2), None) => match cross(&c2) {
                Some((cell, face42)) => {
                    let face43 = grid
                        .face_with_corner(cell, corner, face42)
                        .ok_or("degenerate interaction volume: cannot find the cross face")?;
                    if grid.cells[cell].faces[face43].neighbor.is_some() {
                        return Err("degenerate interaction volume: the fourth cell must close the corner");
                    }
                    Some(DiagonalCell { cell, face42, face43 })
                }
                None => None,
            },
            (None, Some(c3)) => match cross(&c3) {
                Some((cell, face43)) => {
                    let face42 = grid
                        .face_with_corner(cell, corner, face43)
                        .ok_or("degenerate interaction volume: cannot find the cross face")?;
                    if grid.cells[cell].faces[face42].neighbor.is_some() {
                        return Err("degenerate interaction volume: the fourth cell must close the corner");
                    }
                    Some(DiagonalCell { cell, face42, face43 })
                }
                None => None,
            },
            (None, None) => None,
        };
        Ok(InteractionVolume {
            cell1,
            face12,
            face13,
            corner,
            cell2,
            cell3,
            cell4,
        })
    }

    /// Builds all interaction volumes of a grid, indexed by `cell * NFACE + face`
    pub fn all(grid: &Grid) -> Result<Vec<Self>, StrError> {
        let mut volumes = Vec::with_capacity(grid.ncell() * NFACE);
        for cell in &grid.cells {
            for face in 0..NFACE {
                volumes.push(InteractionVolume::new(grid, cell.id, face)?);
            }
        }
        Ok(volumes)
    }

    /// Returns the ids of the cells at positions 1, 2, 3, 4 (if they exist)
    pub fn cells(&self) -> [Option<CellId>; 4] {
        [
            Some(self.cell1),
            self.cell2.map(|c| c.cell),
            self.cell3.map(|c| c.cell),
            self.cell4.map(|c| c.cell),
        ]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

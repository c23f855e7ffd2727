use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Returns a mesh with a single unit square whose points run clockwise
#[allow(dead_code)]
#[rustfmt::skip]
pub(crate) fn new_clockwise_mesh() -> Mesh {
    Mesh {
        ndim: 2,
        points: vec![
            Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
            Point { id: 1, marker: 0, coords: vec![0.0, 1.0] },
            Point { id: 2, marker: 0, coords: vec![1.0, 1.0] },
            Point { id: 3, marker: 0, coords: vec![1.0, 0.0] },
        ],
        cells: vec![
            Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 2, 3] },
        ],
    }
}

/// Returns a mesh with a single triangle
#[allow(dead_code)]
#[rustfmt::skip]
pub(crate) fn new_tri3_mesh() -> Mesh {
    Mesh {
        ndim: 2,
        points: vec![
            Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
            Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
            Point { id: 2, marker: 0, coords: vec![0.0, 1.0] },
        ],
        cells: vec![
            Cell { id: 0, attribute: 1, kind: GeoKind::Tri3, points: vec![0, 1, 2] },
        ],
    }
}

/// Returns a 2 × 2 mesh whose upper-right cell is detached from the upper-left cell
///
/// Point 9 duplicates point 7, so that the faces 4-7 and 4-9 are both on the boundary.
///
/// ```text
///  6------7,9-----8
///  | [2]  |  [3]  |
///  3------4-------5
///  | [0]  |  [1]  |
///  0------1-------2
/// ```
#[allow(dead_code)]
#[rustfmt::skip]
pub(crate) fn new_cracked_mesh() -> Mesh {
    Mesh {
        ndim: 2,
        points: vec![
            Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
            Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
            Point { id: 2, marker: 0, coords: vec![2.0, 0.0] },
            Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
            Point { id: 4, marker: 0, coords: vec![1.0, 1.0] },
            Point { id: 5, marker: 0, coords: vec![2.0, 1.0] },
            Point { id: 6, marker: 0, coords: vec![0.0, 2.0] },
            Point { id: 7, marker: 0, coords: vec![1.0, 2.0] },
            Point { id: 8, marker: 0, coords: vec![2.0, 2.0] },
            Point { id: 9, marker: 0, coords: vec![1.0, 2.0] },
        ],
        cells: vec![
            Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
            Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
            Cell { id: 2, attribute: 1, kind: GeoKind::Qua4, points: vec![3, 4, 7, 6] },
            Cell { id: 3, attribute: 1, kind: GeoKind::Qua4, points: vec![4, 5, 8, 9] },
        ],
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

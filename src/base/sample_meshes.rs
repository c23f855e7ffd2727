use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes with quadrilateral cells
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a mesh with a single unit square
    #[rustfmt::skip]
    pub fn one_qua4() -> Mesh {
        //      y
        //      ^
        // 1.0  3------------2
        //      |            |    [#] indicates id
        //      |            |    (#) indicates attribute
        //      |    [0]     |
        //      |    (1)     |
        //      |            |
        // 0.0  0------------1 -> x
        //     0.0          1.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![1.0, 1.0] },
                Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 2, 3] },
            ],
        }
    }

    /// Returns a mesh with two unit squares side by side (2 × 1)
    #[rustfmt::skip]
    pub fn two_qua4() -> Mesh {
        //      y
        //      ^
        // 1.0  3------------4------------5
        //      |            |            |
        //      |    [0]     |    [1]     |
        //      |    (1)     |    (1)     |
        //      |            |            |
        // 0.0  0------------1------------2 -> x
        //     0.0          1.0          2.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![2.0, 0.0] },
                Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
                Point { id: 4, marker: 0, coords: vec![1.0, 1.0] },
                Point { id: 5, marker: 0, coords: vec![2.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
            ],
        }
    }

    /// Returns a mesh with 2 × 2 unit squares
    ///
    /// The cell in the upper-right corner has attribute 2.
    #[rustfmt::skip]
    pub fn four_qua4() -> Mesh {
        //      y
        //      ^
        // 2.0  6------------7------------8
        //      |            |            |
        //      |    [2]     |    [3]     |
        //      |    (1)     |    (2)     |
        //      |            |            |
        // 1.0  3------------4------------5
        //      |            |            |
        //      |    [0]     |    [1]     |
        //      |    (1)     |    (1)     |
        //      |            |            |
        // 0.0  0------------1------------2 -> x
        //     0.0          1.0          2.0
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
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
                Cell { id: 2, attribute: 1, kind: GeoKind::Qua4, points: vec![3, 4, 7, 6] },
                Cell { id: 3, attribute: 2, kind: GeoKind::Qua4, points: vec![4, 5, 8, 7] },
            ],
        }
    }

    /// Returns a mesh with 2 × 2 parallelograms (sheared squares)
    #[rustfmt::skip]
    pub fn four_qua4_sheared() -> Mesh {
        //      y
        //      ^
        // 2.0       6------------7------------8
        //          /            /            /
        //         /    [2]     /    [3]     /
        //        /            /            /
        // 1.0   3------------4------------5
        //      /            /            /
        //     /    [0]     /    [1]     /
        //    /            /            /
        // 0.0  0------------1------------2 -> x
        //     0.0          1.0          2.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![2.0, 0.0] },
                Point { id: 3, marker: 0, coords: vec![0.25, 1.0] },
                Point { id: 4, marker: 0, coords: vec![1.25, 1.0] },
                Point { id: 5, marker: 0, coords: vec![2.25, 1.0] },
                Point { id: 6, marker: 0, coords: vec![0.5, 2.0] },
                Point { id: 7, marker: 0, coords: vec![1.5, 2.0] },
                Point { id: 8, marker: 0, coords: vec![2.5, 2.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
                Cell { id: 2, attribute: 1, kind: GeoKind::Qua4, points: vec![3, 4, 7, 6] },
                Cell { id: 3, attribute: 1, kind: GeoKind::Qua4, points: vec![4, 5, 8, 7] },
            ],
        }
    }

    /// Returns an L-shaped mesh with three unit squares around a re-entrant corner (point 4)
    #[rustfmt::skip]
    pub fn three_qua4_l_shaped() -> Mesh {
        //      y
        //      ^
        // 2.0  6------------7
        //      |            |
        //      |    [2]     |
        //      |            |
        // 1.0  3------------4------------5
        //      |            |            |
        //      |    [0]     |    [1]     |
        //      |            |            |
        // 0.0  0------------1------------2 -> x
        //     0.0          1.0          2.0
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
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
                Cell { id: 2, attribute: 1, kind: GeoKind::Qua4, points: vec![3, 4, 7, 6] },
            ],
        }
    }

    /// Returns a structured mesh of nx × ny rectangles covering [0, lx] × [0, ly]
    ///
    /// The points are numbered row by row starting at the origin; the cells are numbered
    /// in the same way. All cells have attribute 1.
    ///
    /// ```text
    ///  ny·(nx+1) ... (nx+1)(ny+1)-1
    ///      :               :
    ///    nx+1   nx+2  ...  2nx+1
    ///      0      1   ...   nx
    /// ```
    pub fn rectangle(nx: usize, ny: usize, lx: f64, ly: f64) -> Mesh {
        let dx = lx / (nx as f64);
        let dy = ly / (ny as f64);
        let mut points = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..(ny + 1) {
            for i in 0..(nx + 1) {
                points.push(Point {
                    id: points.len(),
                    marker: 0,
                    coords: vec![(i as f64) * dx, (j as f64) * dy],
                });
            }
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let a = i + j * (nx + 1);
                cells.push(Cell {
                    id: cells.len(),
                    attribute: 1,
                    kind: GeoKind::Qua4,
                    points: vec![a, a + 1, a + nx + 2, a + nx + 1],
                });
            }
        }
        Mesh { ndim: 2, points, cells }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

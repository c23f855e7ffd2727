use crate::base::GridKind;
use crate::StrError;
use gemlab::mesh::{CellAttribute, CellId, Mesh, PointId};
use gemlab::shapes::GeoKind;
use std::collections::HashMap;

/// Number of faces of a quadrilateral cell
pub const NFACE: usize = 4;

/// Native order of the local edges of a Qua4 for structured grids (west, east, south, north)
const STRUCTURED_ORDER: [usize; NFACE] = [3, 1, 0, 2];

/// Native order of the local edges of a Qua4 for unstructured grids (anticlockwise)
const UNSTRUCTURED_ORDER: [usize; NFACE] = [0, 1, 2, 3];

/// Holds the geometry and connectivity of a face (edge) as seen from one cell
#[derive(Clone, Debug)]
pub struct GridFace {
    /// Local index of the face in the native order of its cell
    pub index: usize,

    /// Local edge number of the Qua4 (edge k connects points k and k+1)
    pub edge: usize,

    /// The two corner points (anticlockwise with respect to the cell)
    pub points: [PointId; 2],

    /// Midpoint of the face
    pub center: [f64; 2],

    /// Length of the face
    pub volume: f64,

    /// Outward unit normal
    pub normal: [f64; 2],

    /// Cell on the other side of the face (None on the boundary)
    pub neighbor: Option<CellId>,

    /// Local index of this face in the neighbor cell
    pub index_in_neighbor: Option<usize>,
}

/// Holds the geometry of a cell and its faces in native order
#[derive(Clone, Debug)]
pub struct GridCell {
    /// Cell identification number (contiguous, starting at zero)
    pub id: CellId,

    /// Attribute used to find the spatial parameters
    pub attribute: CellAttribute,

    /// The four points of the quadrilateral (anticlockwise)
    pub points: [PointId; NFACE],

    /// Centroid of the points
    pub center: [f64; 2],

    /// Area of the cell
    pub volume: f64,

    /// Faces in the native order of the grid kind
    pub faces: Vec<GridFace>,
}

/// Implements a two-dimensional grid of quadrilaterals with grid-kind dependent face order
pub struct Grid {
    /// Kind of grid; defines the native face order and the next-face rule
    pub kind: GridKind,

    /// All cells
    pub cells: Vec<GridCell>,
}

impl Grid {
    /// Allocates a new instance from a mesh of Qua4 cells
    ///
    /// # Errors
    ///
    /// * the mesh must be two-dimensional
    /// * all cells must be Qua4 with points in anticlockwise order
    /// * the cell ids must match their positions in the mesh
    /// * an edge must not be shared by more than two cells
    pub fn new(mesh: &Mesh, kind: GridKind) -> Result<Self, StrError> {
        if mesh.ndim != 2 {
            return Err("the mesh must be two-dimensional");
        }
        let order = match kind {
            GridKind::SGrid | GridKind::YaspGrid => &STRUCTURED_ORDER,
            GridKind::UgGrid => &UNSTRUCTURED_ORDER,
        };

        // geometry
        let mut cells = Vec::with_capacity(mesh.cells.len());
        for (position, cell) in mesh.cells.iter().enumerate() {
            if cell.id != position {
                return Err("cell ids must match their positions in the mesh");
            }
            if cell.kind != GeoKind::Qua4 || cell.points.len() != NFACE {
                return Err("only Qua4 cells can be used with the MPFA-O method");
            }
            let points = [cell.points[0], cell.points[1], cell.points[2], cell.points[3]];
            let mut xx = [[0.0; 2]; NFACE];
            for m in 0..NFACE {
                let coords = &mesh
                    .points
                    .get(points[m])
                    .ok_or("cell point id is out of bounds")?
                    .coords;
                xx[m] = [coords[0], coords[1]];
            }
            let mut area = 0.0;
            let mut center = [0.0; 2];
            for m in 0..NFACE {
                let n = (m + 1) % NFACE;
                area += xx[m][0] * xx[n][1] - xx[n][0] * xx[m][1];
                center[0] += xx[m][0] / (NFACE as f64);
                center[1] += xx[m][1] / (NFACE as f64);
            }
            area /= 2.0;
            if area <= 0.0 {
                return Err("the points of a cell must be in anticlockwise order");
            }
            let mut faces = Vec::with_capacity(NFACE);
            for (index, &edge) in order.iter().enumerate() {
                let (a, b) = (edge, (edge + 1) % NFACE);
                let dx = xx[b][0] - xx[a][0];
                let dy = xx[b][1] - xx[a][1];
                let length = f64::sqrt(dx * dx + dy * dy);
                if length <= 0.0 {
                    return Err("faces must have a positive length");
                }
                faces.push(GridFace {
                    index,
                    edge,
                    points: [points[a], points[b]],
                    center: [(xx[a][0] + xx[b][0]) / 2.0, (xx[a][1] + xx[b][1]) / 2.0],
                    volume: length,
                    normal: [dy / length, -dx / length],
                    neighbor: None,
                    index_in_neighbor: None,
                });
            }
            cells.push(GridCell {
                id: cell.id,
                attribute: cell.attribute,
                points,
                center,
                volume: area,
                faces,
            });
        }

        // connectivity
        let mut edges: HashMap<(PointId, PointId), Vec<(CellId, usize)>> = HashMap::new();
        for cell in &cells {
            for face in &cell.faces {
                let key = edge_key(&face.points);
                edges.entry(key).or_insert_with(Vec::new).push((cell.id, face.index));
            }
        }
        for shared in edges.values() {
            match shared.len() {
                1 => (),
                2 => {
                    let (c0, f0) = shared[0];
                    let (c1, f1) = shared[1];
                    cells[c0].faces[f0].neighbor = Some(c1);
                    cells[c0].faces[f0].index_in_neighbor = Some(f1);
                    cells[c1].faces[f1].neighbor = Some(c0);
                    cells[c1].faces[f1].index_in_neighbor = Some(f0);
                }
                _ => return Err("an edge cannot be shared by more than two cells"),
            }
        }
        Ok(Grid { kind, cells })
    }

    /// Returns the number of cells
    pub fn ncell(&self) -> usize {
        self.cells.len()
    }

    /// Returns the local index of the face following `index` in anticlockwise order
    pub fn next_face(&self, index: usize) -> usize {
        next_face_index(self.kind, index, NFACE)
    }

    /// Returns the corner point shared by two faces of the same cell
    pub fn shared_corner(&self, cell: CellId, face_a: usize, face_b: usize) -> Option<PointId> {
        let a = &self.cells[cell].faces[face_a].points;
        let b = &self.cells[cell].faces[face_b].points;
        a.iter().find(|p| b.contains(p)).copied()
    }

    /// Returns the face of a cell containing a corner, other than the face `exclude`
    pub fn face_with_corner(&self, cell: CellId, corner: PointId, exclude: usize) -> Option<usize> {
        self.cells[cell]
            .faces
            .iter()
            .find(|f| f.index != exclude && f.points.contains(&corner))
            .map(|f| f.index)
    }
}

/// Returns the local index of the next face according to the native order of a grid kind
///
/// * SGrid and YaspGrid enumerate the faces as (west, east, south, north);
///   the next face of `i` is `i + 2`, except the last (→ 0) and the one before last (→ 1).
/// * UGGrid enumerates the faces anticlockwise; the next face of `i` is `i + 1` (wrapping).
pub fn next_face_index(kind: GridKind, index: usize, nface: usize) -> usize {
    match kind {
        GridKind::SGrid | GridKind::YaspGrid => {
            if index + 1 == nface {
                0
            } else if index + 2 == nface {
                1
            } else {
                index + 2
            }
        }
        GridKind::UgGrid => {
            if index + 1 == nface {
                0
            } else {
                index + 1
            }
        }
    }
}

/// Returns a sorted pair of point ids identifying an edge
fn edge_key(points: &[PointId; 2]) -> (PointId, PointId) {
    if points[0] < points[1] {
        (points[0], points[1])
    } else {
        (points[1], points[0])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

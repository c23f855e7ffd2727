use super::InteractionVolume;
use crate::base::{BcKind, Problem};
use crate::grid::{Grid, GridFace};
use crate::StrError;
use gemlab::mesh::CellId;
use russell_lab::{mat_inverse, Matrix};

/// Index of face 12 in the local arrays of an interaction volume
pub const F12: usize = 0;

/// Index of face 13 in the local arrays of an interaction volume
pub const F13: usize = 1;

/// Index of face 24 in the local arrays of an interaction volume
pub const F24: usize = 2;

/// Index of face 34 in the local arrays of an interaction volume
pub const F34: usize = 3;

/// Faces along the first (a) and second (b) integration normals of each cell
const FACE_A: [usize; 4] = [F12, F12, F34, F34];
const FACE_B: [usize; 4] = [F13, F24, F13, F24];

/// Signs of the potential differences u - v of each cell (first and second faces)
const SIGN: [[f64; 2]; 4] = [[1.0, 1.0], [-1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];

/// Positions on both sides of each face; the local normal points from the first to the second
pub(crate) const SIDES: [[usize; 2]; 4] = [[0, 1], [0, 2], [1, 3], [2, 3]];

/// Integration normal (0 = a, 1 = b) of the fluxes through each face
const DIRECTION: [usize; 4] = [0, 1, 1, 0];

/// Defines the condition of a face of the interaction volume for the pressure equation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceCondition {
    /// Face shared by two cells of the interaction volume
    Interior,

    /// Prescribed pressure
    Dirichlet(f64),

    /// Prescribed volume flux per unit length (outflow is positive)
    Neumann(f64),
}

/// Holds the half-flux through a face as a stencil over the pressures of the cells 1, 2, 3, 4
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfFlux {
    /// Coefficients multiplying the cell pressures
    pub coef: [f64; 4],

    /// Constant term (from Dirichlet and Neumann data)
    pub constant: f64,
}

impl HalfFlux {
    /// Evaluates the flux for given cell pressures
    pub fn eval(&self, u: &[f64; 4]) -> f64 {
        self.constant + (0..4).fold(0.0, |acc, k| acc + self.coef[k] * u[k])
    }
}

/// Holds a face of the interaction volume as stored by one of the cells around it
#[derive(Clone, Copy, Debug)]
pub struct LocalFace<'a> {
    /// Cell storing the face
    pub owner: CellId,

    /// The face seen from the owner (outward normal)
    pub face: &'a GridFace,

    /// +1 if the outward normal points from position 1 to 2 (or 1 to 3, 2 to 4, 3 to 4); -1 otherwise
    pub sign: f64,
}

impl<'a> LocalFace<'a> {
    /// Returns the unit normal along the local orientation of the interaction volume
    pub fn normal(&self) -> [f64; 2] {
        [self.sign * self.face.normal[0], self.sign * self.face.normal[1]]
    }
}

/// Linear expression over the cell pressures u and the face pressures v
#[derive(Clone, Copy, Debug, Default)]
struct Expr {
    u: [f64; 4],
    v: [f64; 4],
    c: f64,
}

impl Expr {
    /// Returns a · self + b · other
    fn combine(a: f64, x: &Expr, b: f64, y: &Expr) -> Expr {
        let mut res = Expr::default();
        for k in 0..4 {
            res.u[k] = a * x.u[k] + b * y.u[k];
            res.v[k] = a * x.v[k] + b * y.v[k];
        }
        res.c = a * x.c + b * y.c;
        res
    }
}

/// Rotates a vector by -90° (x, y) → (y, -x)
#[inline]
fn rotate(v: [f64; 2]) -> [f64; 2] {
    [v[1], -v[0]]
}

#[inline]
fn sub(a: &[f64; 2], b: &[f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
fn dot(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

/// Computes n · K · v
#[inline]
fn n_kk_v(n: &[f64; 2], kk: &[[f64; 2]; 2], v: &[f64; 2]) -> f64 {
    n[0] * (kk[0][0] * v[0] + kk[0][1] * v[1]) + n[1] * (kk[1][0] * v[0] + kk[1][1] * v[1])
}

fn oriented<'a>(grid: &'a Grid, owner: CellId, index: usize, sign: f64) -> LocalFace<'a> {
    LocalFace {
        owner,
        face: &grid.cells[owner].faces[index],
        sign,
    }
}

/// Returns the face of the grid corresponding to a local face of the interaction volume
///
/// Faces 24 and 34 are taken from cells 2 and 3. At re-entrant corners, where cell 2 (or 3)
/// is missing, they are taken from cell 4 with reversed orientation.
pub fn local_face<'a>(grid: &'a Grid, iv: &InteractionVolume, f: usize) -> Option<LocalFace<'a>> {
    match f {
        F12 => Some(oriented(grid, iv.cell1, iv.face12, 1.0)),
        F13 => Some(oriented(grid, iv.cell1, iv.face13, 1.0)),
        F24 => match (iv.cell2, iv.cell4) {
            (Some(c), _) => Some(oriented(grid, c.cell, c.face_cross, 1.0)),
            (None, Some(c)) => Some(oriented(grid, c.cell, c.face42, -1.0)),
            (None, None) => None,
        },
        _ => match (iv.cell3, iv.cell4) {
            (Some(c), _) => Some(oriented(grid, c.cell, c.face_cross, 1.0)),
            (None, Some(c)) => Some(oriented(grid, c.cell, c.face43, -1.0)),
            (None, None) => None,
        },
    }
}

/// Returns the pressure conditions of the faces of an interaction volume (None for absent faces)
///
/// The Neumann mass fluxes are converted into volume fluxes with the densities of cell 1.
pub fn pressure_conditions(
    grid: &Grid,
    iv: &InteractionVolume,
    problem: &dyn Problem,
    density_wetting: f64,
    density_nonwetting: f64,
) -> [Option<FaceCondition>; 4] {
    let mut conditions = [None; 4];
    for f in 0..4 {
        if let Some(LocalFace { face, .. }) = local_face(grid, iv, f) {
            conditions[f] = Some(if face.neighbor.is_some() {
                FaceCondition::Interior
            } else {
                match problem.bc_type_pressure(&face.center, face) {
                    BcKind::Dirichlet => FaceCondition::Dirichlet(problem.dirichlet_pressure(&face.center, face)),
                    BcKind::Neumann => {
                        let jj = problem.neumann_flux(&face.center, face);
                        FaceCondition::Neumann(jj[0] / density_wetting + jj[1] / density_nonwetting)
                    }
                }
            });
        }
    }
    conditions
}

/// Implements the local system of the MPFA O-method on an interaction volume
///
/// Each cell k has a linear pressure defined by its center value and the pressures at the
/// midpoints of its two faces touching the corner. The fluxes through the half faces are
///
/// ```text
/// flux_a = g11k · d1 + g12k · d2
/// flux_b = g21k · d1 + g22k · d2
/// ```
///
/// where d1 and d2 are the potential differences between the cell center and the face midpoints.
/// Flux continuity at the interior faces and the Neumann conditions determine the unknown face
/// pressures, which are eliminated to yield the half-fluxes through faces 12 and 13 of cell 1.
pub struct LocalSystem {
    /// Flags the existing cells
    exists: [bool; 4],

    /// Half lengths of the faces
    half_length: [f64; 4],

    /// Orientation of the grid faces with respect to the local normals
    sign: [f64; 4],

    /// Conditions of the faces (None for absent faces)
    conditions: [Option<FaceCondition>; 4],

    /// Flux coefficients g[k][a or b][d1 or d2]
    g: [[[f64; 2]; 2]; 4],
}

impl LocalSystem {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `permeability` -- the permeability tensors of all cells
    /// * `lambda` -- the total (upwind) mobilities of the positions 1, 2, 3, 4
    /// * `conditions` -- the face conditions from [pressure_conditions]
    pub fn new(
        grid: &Grid,
        iv: &InteractionVolume,
        permeability: &[[[f64; 2]; 2]],
        lambda: &[f64; 4],
        conditions: [Option<FaceCondition>; 4],
    ) -> Result<Self, StrError> {
        let cells = iv.cells();
        let mut exists = [false; 4];
        let mut x = [[0.0; 2]; 4];
        for k in 0..4 {
            if let Some(id) = cells[k] {
                exists[k] = true;
                x[k] = grid.cells[id].center;
            }
        }

        // face midpoints and integration normals (scaled by the half length)
        let mut xf = [[0.0; 2]; 4];
        let mut normal = [[0.0; 2]; 4];
        let mut half_length = [0.0; 4];
        let mut sign = [1.0; 4];
        for f in 0..4 {
            if let Some(local) = local_face(grid, iv, f) {
                let n = local.normal();
                xf[f] = local.face.center;
                half_length[f] = local.face.volume / 2.0;
                sign[f] = local.sign;
                normal[f] = [n[0] * half_length[f], n[1] * half_length[f]];
            }
        }

        // rotated vectors
        let nu = [
            [rotate(sub(&xf[F13], &x[0])), rotate(sub(&x[0], &xf[F12]))],
            [rotate(sub(&xf[F24], &x[1])), rotate(sub(&xf[F12], &x[1]))],
            [rotate(sub(&x[2], &xf[F13])), rotate(sub(&x[2], &xf[F34]))],
            [rotate(sub(&x[3], &xf[F24])), rotate(sub(&xf[F34], &x[3]))],
        ];

        // flux coefficients
        let mut g = [[[0.0; 2]; 2]; 4];
        for k in 0..4 {
            if let Some(id) = cells[k] {
                let df = f64::abs(dot(&nu[k][0], &rotate(nu[k][1])));
                if df == 0.0 {
                    return Err("degenerate interaction volume: zero dF");
                }
                let kk = &permeability[id];
                let na = &normal[FACE_A[k]];
                let nb = &normal[FACE_B[k]];
                for j in 0..2 {
                    g[k][0][j] = lambda[k] * n_kk_v(na, kk, &nu[k][j]) / df;
                    g[k][1][j] = lambda[k] * n_kk_v(nb, kk, &nu[k][j]) / df;
                }
            }
        }
        Ok(LocalSystem {
            exists,
            half_length,
            sign,
            conditions,
            g,
        })
    }

    /// Returns the expression of a face pressure
    fn face_pressure(&self, f: usize) -> Expr {
        let mut e = Expr::default();
        match self.conditions[f] {
            Some(FaceCondition::Dirichlet(value)) => e.c = value,
            _ => e.v[f] = 1.0,
        }
        e
    }

    /// Returns the flux of cell k along its integration normal a (dir = 0) or b (dir = 1)
    fn flux(&self, k: usize, dir: usize) -> Expr {
        let mut u = Expr::default();
        u.u[k] = 1.0;
        let d1 = Expr::combine(SIGN[k][0], &u, -SIGN[k][0], &self.face_pressure(FACE_A[k]));
        let d2 = Expr::combine(SIGN[k][1], &u, -SIGN[k][1], &self.face_pressure(FACE_B[k]));
        Expr::combine(self.g[k][dir][0], &d1, self.g[k][dir][1], &d2)
    }

    /// Computes the half-fluxes through faces 12 and 13 (outward with respect to cell 1)
    ///
    /// Face pressures that do not enter any flux (faces touching impermeable cells only) are
    /// removed from the local system together with the equations that vanish identically.
    pub fn half_fluxes(&self) -> Result<[HalfFlux; 2], StrError> {
        // equations of the faces with unknown pressure
        let mut unknowns = Vec::new();
        let mut equations = Vec::new();
        for f in 0..4 {
            let [first, second] = SIDES[f];
            let eq = match self.conditions[f] {
                Some(FaceCondition::Interior) => {
                    if !self.exists[first] || !self.exists[second] {
                        return Err("interior face of the interaction volume must have a cell on both sides");
                    }
                    Expr::combine(
                        1.0,
                        &self.flux(first, DIRECTION[f]),
                        -1.0,
                        &self.flux(second, DIRECTION[f]),
                    )
                }
                Some(FaceCondition::Neumann(jj)) => {
                    let owner = if self.exists[first] { first } else { second };
                    let mut e = self.flux(owner, DIRECTION[f]);
                    e.c -= self.sign[f] * jj * self.half_length[f];
                    e
                }
                _ => continue,
            };
            unknowns.push(f);
            equations.push(eq);
        }
        let unknowns: Vec<_> = unknowns
            .into_iter()
            .filter(|&f| equations.iter().any(|eq| eq.v[f] != 0.0))
            .collect();
        equations.retain(|eq| unknowns.iter().any(|&f| eq.v[f] != 0.0));
        if unknowns.len() != equations.len() {
            return Err("singular local matrix in interaction volume");
        }

        // solve A · v = B · u + r
        let m = unknowns.len();
        let mut v_of_u = [[0.0; 4]; 4]; // v[face] = Σ v_of_u[face][k] u[k] + v_const[face]
        let mut v_const = [0.0; 4];
        if m > 0 {
            let mut aa = Matrix::new(m, m);
            for (r, eq) in equations.iter().enumerate() {
                for (c, &f) in unknowns.iter().enumerate() {
                    aa.set(r, c, eq.v[f]);
                }
            }
            let mut ai = Matrix::new(m, m);
            let det = mat_inverse(&mut ai, &aa).map_err(|_| "singular local matrix in interaction volume")?;
            if det == 0.0 || !det.is_finite() {
                return Err("singular local matrix in interaction volume");
            }
            for (c, &f) in unknowns.iter().enumerate() {
                for (r, eq) in equations.iter().enumerate() {
                    let air = ai.get(c, r);
                    for k in 0..4 {
                        v_of_u[f][k] -= air * eq.u[k];
                    }
                    v_const[f] -= air * eq.c;
                }
            }
        }

        // substitute the face pressures into the fluxes of cell 1
        let mut res = [
            HalfFlux {
                coef: [0.0; 4],
                constant: 0.0,
            };
            2
        ];
        for (i, f) in [F12, F13].into_iter().enumerate() {
            if let Some(FaceCondition::Neumann(jj)) = self.conditions[f] {
                res[i].constant = jj * self.half_length[f];
                continue;
            }
            let e = self.flux(0, DIRECTION[f]);
            res[i].coef = e.u;
            res[i].constant = e.c;
            for &uf in &unknowns {
                for k in 0..4 {
                    res[i].coef[k] += e.v[uf] * v_of_u[uf][k];
                }
                res[i].constant += e.v[uf] * v_const[uf];
            }
        }
        Ok(res)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{local_face, pressure_conditions, FaceCondition, HalfFlux, LocalSystem, F12, F13, F24, F34};
    use crate::base::{GridKind, SampleMeshes, SampleProblem};
    use crate::grid::Grid;
    use crate::mpfa::InteractionVolume;
    use russell_lab::{approx_eq, array_approx_eq};

    const IDENTITY: [[f64; 2]; 2] = [[1.0, 0.0], [0.0, 1.0]];

    #[test]
    fn half_flux_eval_works() {
        let flux = HalfFlux {
            coef: [1.0, -1.0, 0.5, 0.0],
            constant: 2.0,
        };
        assert_eq!(flux.eval(&[3.0, 1.0, 2.0, 100.0]), 5.0);
    }

    #[test]
    fn pressure_conditions_work() {
        let mesh = SampleMeshes::four_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let mut problem = SampleProblem::new();
        problem
            .set_neumann_flux(2.0, 3.0)
            .set_dirichlet_pressure(|x| if x[0] == 0.0 { Some(7.0) } else { None });
        // cell 0: north face (2) followed by west face (3); cell 2 across the north face
        let iv = InteractionVolume::new(&grid, 0, 2).unwrap();
        let conditions = pressure_conditions(&grid, &iv, &problem, 2.0, 3.0);
        assert_eq!(conditions[F12], Some(FaceCondition::Interior));
        assert_eq!(conditions[F13], Some(FaceCondition::Dirichlet(7.0)));
        assert_eq!(conditions[F24], Some(FaceCondition::Dirichlet(7.0)));
        assert_eq!(conditions[F34], None);
        // cell 0: south face (0) followed by east face (1)
        let iv = InteractionVolume::new(&grid, 0, 0).unwrap();
        let conditions = pressure_conditions(&grid, &iv, &problem, 2.0, 3.0);
        assert_eq!(conditions[F12], Some(FaceCondition::Neumann(2.0)));
        assert_eq!(conditions[F13], Some(FaceCondition::Interior));
        assert_eq!(conditions[F24], None);
        assert_eq!(conditions[F34], Some(FaceCondition::Neumann(2.0)));
    }

    #[test]
    fn four_cell_orthogonal_volume_gives_two_point_fluxes() {
        // on a uniform Cartesian grid with isotropic K, the O-method reduces to two-point fluxes
        let mesh = SampleMeshes::four_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let perm = vec![IDENTITY; 4];
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let conditions = [Some(FaceCondition::Interior); 4];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        // half face of length 0.5 and distance 1 between centers: T = 0.5
        array_approx_eq(&flux12.coef, &[0.5, -0.5, 0.0, 0.0], 1e-15);
        array_approx_eq(&flux13.coef, &[0.5, 0.0, -0.5, 0.0], 1e-15);
        approx_eq(flux12.constant, 0.0, 1e-15);
        approx_eq(flux13.constant, 0.0, 1e-15);
    }

    #[test]
    fn mobilities_scale_the_transmissibilities() {
        // harmonic average of the mobilities across face 12: 2·λ1·λ2/(λ1+λ2) with λ = (1, 3)
        let mesh = SampleMeshes::four_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let perm = vec![IDENTITY; 4];
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let conditions = [Some(FaceCondition::Interior); 4];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0, 3.0, 1.0, 3.0], conditions).unwrap();
        let [flux12, _] = local.half_fluxes().unwrap();
        let t = 0.5 * 2.0 * 1.0 * 3.0 / (1.0 + 3.0);
        array_approx_eq(&flux12.coef, &[t, -t, 0.0, 0.0], 1e-14);
    }

    #[test]
    fn consistency_holds_on_sheared_grid() {
        // the O-method reproduces linear pressure fields exactly on parallelograms
        let mesh = SampleMeshes::four_qua4_sheared();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let kk = [[2.0, 0.5], [0.5, 1.0]];
        let perm = vec![kk; 4];
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let conditions = [Some(FaceCondition::Interior); 4];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        // p = 3 x - 2 y  ⇒  velocity = -K ∇p
        let grad = [3.0, -2.0];
        let vel = [
            -(kk[0][0] * grad[0] + kk[0][1] * grad[1]),
            -(kk[1][0] * grad[0] + kk[1][1] * grad[1]),
        ];
        let mut u = [0.0; 4];
        for (k, id) in iv.cells().iter().enumerate() {
            let x = grid.cells[id.unwrap()].center;
            u[k] = grad[0] * x[0] + grad[1] * x[1];
        }
        let f12 = &grid.cells[0].faces[iv.face12];
        let f13 = &grid.cells[0].faces[iv.face13];
        let correct12 = (vel[0] * f12.normal[0] + vel[1] * f12.normal[1]) * f12.volume / 2.0;
        let correct13 = (vel[0] * f13.normal[0] + vel[1] * f13.normal[1]) * f13.volume / 2.0;
        approx_eq(flux12.eval(&u), correct12, 1e-13);
        approx_eq(flux13.eval(&u), correct13, 1e-13);
        // constant pressure gives zero flux
        approx_eq(flux12.coef.iter().sum::<f64>(), 0.0, 1e-14);
        approx_eq(flux13.coef.iter().sum::<f64>(), 0.0, 1e-14);
    }

    #[test]
    fn boundary_conditions_are_handled() {
        let mesh = SampleMeshes::two_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let perm = vec![IDENTITY; 2];
        // cell 0: east face (1, → cell 1) followed by north face (2, boundary)
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();

        // Dirichlet on top: the flux through face 13 depends on the boundary pressure
        let conditions = [
            Some(FaceCondition::Interior),
            Some(FaceCondition::Dirichlet(4.0)),
            Some(FaceCondition::Dirichlet(4.0)),
            None,
        ];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        array_approx_eq(&flux12.coef, &[0.5, -0.5, 0.0, 0.0], 1e-15);
        approx_eq(flux12.constant, 0.0, 1e-15);
        // distance 0.5 to the boundary: T = 0.5 / 0.5 = 1
        array_approx_eq(&flux13.coef, &[1.0, 0.0, 0.0, 0.0], 1e-15);
        approx_eq(flux13.constant, -4.0, 1e-15);

        // Neumann on top: the half-flux through face 13 is the prescribed value
        let conditions = [
            Some(FaceCondition::Interior),
            Some(FaceCondition::Neumann(-2.0)),
            Some(FaceCondition::Neumann(0.0)),
            None,
        ];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        assert_eq!(flux13.coef, [0.0; 4]);
        assert_eq!(flux13.constant, -1.0);
        approx_eq(flux12.coef[0] + flux12.coef[1], 0.0, 1e-15);
    }

    #[test]
    fn impermeable_cells_do_not_make_the_system_singular() {
        let mesh = SampleMeshes::two_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        // cell 0: east face (1, → cell 1) followed by north face (2, boundary)
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let conditions = [
            Some(FaceCondition::Interior),
            Some(FaceCondition::Neumann(0.0)),
            Some(FaceCondition::Neumann(0.0)),
            None,
        ];

        // impermeable neighbor: face 24 touches cell 1 only and leaves the system
        let perm = vec![IDENTITY, [[0.0; 2]; 2]];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        array_approx_eq(&flux12.coef, &[0.0; 4], 1e-15);
        approx_eq(flux12.constant, 0.0, 1e-15);
        assert_eq!(flux13.coef, [0.0; 4]);
        assert_eq!(flux13.constant, 0.0);

        // impermeable cell 1: faces 13 and 24 leave the system
        let perm = vec![[[0.0; 2]; 2], IDENTITY];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, _] = local.half_fluxes().unwrap();
        assert_eq!(flux12.coef, [0.0; 4]);
        assert_eq!(flux12.constant, 0.0);

        // both cells impermeable: nothing is left
        let perm = vec![[[0.0; 2]; 2]; 2];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        let [flux12, flux13] = local.half_fluxes().unwrap();
        assert_eq!(flux12.coef, [0.0; 4]);
        assert_eq!(flux13.coef, [0.0; 4]);
    }

    #[test]
    fn errors_are_captured() {
        let mesh = SampleMeshes::two_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let perm = vec![IDENTITY; 2];
        // face 24 is on the boundary and cannot be interior
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let conditions = [
            Some(FaceCondition::Interior),
            Some(FaceCondition::Neumann(0.0)),
            Some(FaceCondition::Interior),
            None,
        ];
        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
        assert_eq!(
            local.half_fluxes().err(),
            Some("interior face of the interaction volume must have a cell on both sides")
        );
    }

    #[test]
    fn local_faces_are_oriented_around_re_entrant_corners() {
        let mesh = SampleMeshes::three_qua4_l_shaped();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        // cell 1: north face (boundary) followed by west face (→ 0); cell 2 is diagonal
        let iv = InteractionVolume::new(&grid, 1, 2).unwrap();
        let f24 = local_face(&grid, &iv, F24).unwrap();
        assert_eq!(f24.owner, 2);
        assert_eq!(f24.face.index, 1); // east face of cell 2
        assert_eq!(f24.sign, -1.0);
        array_approx_eq(&f24.normal(), &[-1.0, 0.0], 1e-15);
        let f34 = local_face(&grid, &iv, F34).unwrap();
        assert_eq!(f34.owner, 0);
        assert_eq!(f34.sign, 1.0);
        array_approx_eq(&f34.normal(), &[0.0, 1.0], 1e-15);
        // cell 0: east face (→ 1) followed by north face (→ 2); no cell 4
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        assert_eq!(local_face(&grid, &iv, F24).unwrap().owner, 1);
        assert_eq!(local_face(&grid, &iv, F34).unwrap().owner, 2);
    }

    #[test]
    fn consistency_holds_around_re_entrant_corners() {
        // p = 3 x - 2 y with boundary data taken from the exact solution
        let mesh = SampleMeshes::three_qua4_l_shaped();
        let kk = [[2.0, 0.5], [0.5, 1.0]];
        let perm = vec![kk; 3];
        let grad = [3.0, -2.0];
        let vel = [
            -(kk[0][0] * grad[0] + kk[0][1] * grad[1]),
            -(kk[1][0] * grad[0] + kk[1][1] * grad[1]),
        ];
        let p = |x: &[f64; 2]| grad[0] * x[0] + grad[1] * x[1];
        for kind in [GridKind::SGrid, GridKind::UgGrid] {
            let grid = Grid::new(&mesh, kind).unwrap();
            for neumann in [false, true] {
                for cell in &grid.cells {
                    for face in 0..4 {
                        let iv = InteractionVolume::new(&grid, cell.id, face).unwrap();
                        if iv.corner != 4 {
                            continue;
                        }
                        let mut conditions = [None; 4];
                        for f in 0..4 {
                            if let Some(local) = local_face(&grid, &iv, f) {
                                let gf = local.face;
                                conditions[f] = Some(if gf.neighbor.is_some() {
                                    FaceCondition::Interior
                                } else if neumann {
                                    FaceCondition::Neumann(vel[0] * gf.normal[0] + vel[1] * gf.normal[1])
                                } else {
                                    FaceCondition::Dirichlet(p(&gf.center))
                                });
                            }
                        }
                        let local = LocalSystem::new(&grid, &iv, &perm, &[1.0; 4], conditions).unwrap();
                        let [flux12, flux13] = local.half_fluxes().unwrap();
                        let mut u = [0.0; 4];
                        for (k, id) in iv.cells().iter().enumerate() {
                            if let Some(id) = id {
                                u[k] = p(&grid.cells[*id].center);
                            }
                        }
                        for (flux, index) in [(flux12, iv.face12), (flux13, iv.face13)] {
                            let f = &cell.faces[index];
                            let correct = (vel[0] * f.normal[0] + vel[1] * f.normal[1]) * f.volume / 2.0;
                            approx_eq(flux.eval(&u), correct, 1e-13);
                        }
                    }
                }
            }
        }
    }
}

use super::local_system::SIDES;
use super::{local_face, InteractionVolume, LocalFace, Variables, F12, F13, F24, F34, NPOSITION};
use crate::base::{BcKind, Problem, SaturationType, VelocityType};
use crate::grid::{Grid, GridFace};
use gemlab::mesh::CellId;

/// Defines the upwind direction of a position of the interaction volume
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Upwind {
    /// The position itself is upwind
    Own,

    /// The position across the first normal (a) is upwind
    AcrossA,

    /// The position across the second normal (b) is upwind
    AcrossB,

    /// The diagonally opposite position is upwind
    Diagonal,
}

/// Normals (a, b) of each position given as (face, sign) with face 0 = f12, 1 = f13, 2 = f24, 3 = f34
const NORMALS: [[(usize, f64); 2]; NPOSITION] = [
    [(1, 1.0), (0, 1.0)],
    [(2, 1.0), (0, -1.0)],
    [(1, -1.0), (3, 1.0)],
    [(2, -1.0), (3, -1.0)],
];

/// Candidate positions (across a, across b, diagonal) of each position
const CANDIDATES: [[usize; 3]; NPOSITION] = [[2, 1, 3], [3, 0, 2], [0, 3, 1], [1, 2, 0]];

/// Faces touching each position
const ADJACENT: [[usize; 2]; NPOSITION] = [[F12, F13], [F12, F24], [F13, F34], [F24, F34]];

/// Chooses the upwind direction from the potentials along a, b, and a + b
///
/// If the largest potential dominates (in absolute value), the flow leaves the position and the
/// position itself is upwind. Otherwise the smallest potential points to the upwind candidate.
/// Ties are resolved as follows:
///
/// * `min = diag = a ≠ b` → across a
/// * `min = diag = b ≠ a` → across b
/// * `min = a = b` → diagonal
pub fn choose_upwind(pot_a: f64, pot_b: f64, pot_diag: f64) -> Upwind {
    let max = f64::max(f64::max(pot_a, pot_b), pot_diag);
    let min = f64::min(f64::min(pot_a, pot_b), pot_diag);
    if f64::abs(max) >= f64::abs(min) {
        return Upwind::Own;
    }
    if min == pot_diag && pot_diag == pot_a && pot_diag != pot_b {
        Upwind::AcrossA
    } else if min == pot_diag && pot_diag == pot_b && pot_diag != pot_a {
        Upwind::AcrossB
    } else if min == pot_a && pot_a == pot_b {
        Upwind::Diagonal
    } else if min == pot_diag {
        Upwind::Diagonal
    } else if min == pot_a {
        Upwind::AcrossA
    } else {
        Upwind::AcrossB
    }
}

/// Returns the candidate position selected by the upwind direction
fn candidate(position: usize, upwind: Upwind) -> usize {
    match upwind {
        Upwind::Own => position,
        Upwind::AcrossA => CANDIDATES[position][0],
        Upwind::AcrossB => CANDIDATES[position][1],
        Upwind::Diagonal => CANDIDATES[position][2],
    }
}

/// Returns the velocity at a face used to find the upwind directions
fn face_velocity(vars: &Variables, velocity_type: VelocityType, cell: CellId, face: usize) -> [f64; 2] {
    let v = vars.velocity[cell][face];
    match velocity_type {
        VelocityType::Total => v,
        VelocityType::Wetting | VelocityType::NonWetting => {
            let w = vars.velocity_second_phase[cell][face];
            [v[0] + w[0], v[1] + w[1]]
        }
    }
}

/// Returns the faces f12, f13, f24, f34 of an interaction volume (None for absent faces)
fn local_faces<'a>(grid: &'a Grid, iv: &InteractionVolume) -> [Option<LocalFace<'a>>; 4] {
    [F12, F13, F24, F34].map(|f| local_face(grid, iv, f))
}

/// Returns the unit normal of a face along the local orientation
fn normal(faces: &[Option<LocalFace>; 4], f: usize) -> [f64; 2] {
    faces[f].map(|local| local.normal()).unwrap_or([0.0, 0.0])
}

/// Computes the velocity of the interaction volume by averaging the face velocities
///
/// The components are averaged with the half face lengths as weights. If the normal of face 12
/// has an x-component, the x-velocity comes from faces 12 and 34 and the y-velocity from faces
/// 13 and 24; otherwise the roles are swapped. Absent faces are skipped.
pub fn interaction_volume_velocity(
    grid: &Grid,
    iv: &InteractionVolume,
    vars: &Variables,
    velocity_type: VelocityType,
) -> [f64; 2] {
    let faces = local_faces(grid, iv);
    let average = |group: [usize; 2], dim: usize| {
        let mut sum = 0.0;
        let mut weight = 0.0;
        for f in group {
            if let Some(LocalFace { owner, face, .. }) = faces[f] {
                let area = 0.5 * face.volume;
                sum += area * face_velocity(vars, velocity_type, owner, face.index)[dim];
                weight += area;
            }
        }
        sum / weight
    };
    if normal(&faces, F12)[0] != 0.0 {
        [average([F12, F34], 0), average([F13, F24], 1)]
    } else {
        [average([F13, F24], 0), average([F12, F34], 1)]
    }
}

/// Returns the wetting saturation prescribed at a boundary face or None for a Neumann condition
fn boundary_saturation(problem: &dyn Problem, face: &GridFace, saturation_type: SaturationType) -> Option<f64> {
    match problem.bc_type_saturation(&face.center, face) {
        BcKind::Dirichlet => Some(saturation_type.wetting(problem.dirichlet_saturation(&face.center, face))),
        BcKind::Neumann => None,
    }
}

/// Computes the upwind wetting saturations of the positions of an interaction volume
///
/// Returns one saturation per slot (position) of the upwind mobility table; slots of absent
/// cells are None. A missing position (virtual cell behind boundary faces) takes the Dirichlet
/// saturation of one of its faces, preferring the face shared with the position looking at it.
/// Without Dirichlet data, it takes the saturation of the cell owning that face. If both
/// virtual faces of a two-cell boundary volume have Neumann conditions, the stored face
/// potential between the two cells decides the upwind side. Corner volumes compare the stored
/// potentials of the two boundary faces.
pub fn upwind_saturations(
    grid: &Grid,
    iv: &InteractionVolume,
    problem: &dyn Problem,
    vars: &Variables,
    saturation_type: SaturationType,
    velocity_type: VelocityType,
) -> [Option<f64>; NPOSITION] {
    let sw = |cell: CellId| saturation_type.wetting(vars.saturation[cell]);
    let own = sw(iv.cell1);
    let faces = local_faces(grid, iv);
    let prescribed = |f: usize| faces[f].and_then(|local| boundary_saturation(problem, local.face, saturation_type));
    let mut res = [None; NPOSITION];

    // special volumes
    match (iv.cell2, iv.cell3, iv.cell4) {
        (None, None, _) => {
            let pot13 = vars.potential[iv.cell1][iv.face13];
            let pot12 = vars.potential[iv.cell1][iv.face12];
            let max = f64::max(pot13, pot12);
            let min = f64::min(pot13, pot12);
            res[0] = Some(if f64::abs(max) >= f64::abs(min) {
                own
            } else if min == pot13 {
                prescribed(F13).unwrap_or(own)
            } else {
                prescribed(F12).unwrap_or(own)
            });
            return res;
        }
        (Some(c2), None, None) if prescribed(F13).is_none() && prescribed(F24).is_none() => {
            let s = if vars.potential[iv.cell1][iv.face12] >= 0.0 { own } else { sw(c2.cell) };
            res[0] = Some(s);
            res[1] = Some(s);
            return res;
        }
        (None, Some(c3), None) if prescribed(F12).is_none() && prescribed(F34).is_none() => {
            let s = if vars.potential[iv.cell1][iv.face13] >= 0.0 { own } else { sw(c3.cell) };
            res[0] = Some(s);
            res[2] = Some(s);
            return res;
        }
        _ => (),
    }

    // saturation of a missing position t seen from position p
    let virtual_sat = |t: usize, p: usize| {
        let [f, g] = ADJACENT[t];
        let order = if SIDES[g].contains(&p) { [g, f] } else { [f, g] };
        let mut owner = None;
        for f in order {
            if let Some(local) = faces[f] {
                if let Some(s) = boundary_saturation(problem, local.face, saturation_type) {
                    return s;
                }
                owner = owner.or(Some(local.owner));
            }
        }
        owner.map(sw).unwrap_or(own)
    };

    // directional potentials
    let cells = iv.cells();
    let v = interaction_volume_velocity(grid, iv, vars, velocity_type);
    let unit = [F12, F13, F24, F34].map(|f| normal(&faces, f));
    for p in 0..NPOSITION {
        if cells[p].is_none() {
            continue;
        }
        let [(fa, sa), (fb, sb)] = NORMALS[p];
        let a = [sa * unit[fa][0], sa * unit[fa][1]];
        let b = [sb * unit[fb][0], sb * unit[fb][1]];
        let pot_a = v[0] * a[0] + v[1] * a[1];
        let pot_b = v[0] * b[0] + v[1] * b[1];
        let pot_diag = v[0] * (a[0] + b[0]) + v[1] * (a[1] + b[1]);
        let c = candidate(p, choose_upwind(pot_a, pot_b, pot_diag));
        res[p] = Some(match cells[c] {
            Some(cell) => sw(cell),
            None => virtual_sat(c, p),
        });
    }
    res
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{choose_upwind, interaction_volume_velocity, upwind_saturations, Upwind};
    use crate::base::{GridKind, SampleMeshes, SampleProblem, SaturationType, VelocityType};
    use crate::grid::Grid;
    use crate::mpfa::{InteractionVolume, Variables};
    use russell_lab::array_approx_eq;

    #[test]
    fn choose_upwind_handles_dominant_outflow() {
        assert_eq!(choose_upwind(1.0, 1.0, 2.0), Upwind::Own);
        assert_eq!(choose_upwind(1.0, -0.5, 0.5), Upwind::Own);
        assert_eq!(choose_upwind(0.0, 0.0, 0.0), Upwind::Own);
    }

    #[test]
    fn choose_upwind_picks_unique_minimum() {
        assert_eq!(choose_upwind(-2.0, 1.0, -1.0), Upwind::AcrossA);
        assert_eq!(choose_upwind(1.0, -2.0, -1.0), Upwind::AcrossB);
        assert_eq!(choose_upwind(-1.0, -1.5, -2.5), Upwind::Diagonal);
    }

    #[test]
    fn choose_upwind_resolves_ties() {
        // min = diag = a ≠ b
        assert_eq!(choose_upwind(-2.0, 0.0, -2.0), Upwind::AcrossA);
        // min = diag = b ≠ a
        assert_eq!(choose_upwind(0.0, -2.0, -2.0), Upwind::AcrossB);
        // min = a = b (with and without diag)
        assert_eq!(choose_upwind(-1.0, -1.0, -0.5), Upwind::Diagonal);
        assert_eq!(choose_upwind(-1.0, -1.0, 0.5), Upwind::Diagonal);
        // deterministic
        for _ in 0..3 {
            assert_eq!(choose_upwind(-2.0, 0.0, -2.0), Upwind::AcrossA);
        }
    }

    /// Sets a uniform velocity at all faces of a grid
    fn uniform_velocity(grid: &Grid, vars: &mut Variables, v: [f64; 2]) {
        for cell in &grid.cells {
            for face in &cell.faces {
                vars.velocity[cell.id][face.index] = v;
                vars.potential[cell.id][face.index] = v[0] * face.normal[0] + v[1] * face.normal[1];
            }
        }
    }

    #[test]
    fn interaction_volume_velocity_works() {
        let mesh = SampleMeshes::four_qua4();
        for kind in [GridKind::SGrid, GridKind::UgGrid] {
            let grid = Grid::new(&mesh, kind).unwrap();
            let mut vars = Variables::new(4, 0.5);
            uniform_velocity(&grid, &mut vars, [1.0, -2.0]);
            for iv in InteractionVolume::all(&grid).unwrap() {
                let v = interaction_volume_velocity(&grid, &iv, &vars, VelocityType::Total);
                array_approx_eq(&v, &[1.0, -2.0], 1e-15);
            }
            // phase velocities are summed
            for cell in 0..4 {
                vars.velocity_second_phase[cell] = vars.velocity[cell];
            }
            let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
            let v = interaction_volume_velocity(&grid, &iv, &vars, VelocityType::Wetting);
            array_approx_eq(&v, &[2.0, -4.0], 1e-15);
        }
    }

    #[test]
    fn upwind_saturations_follow_the_flow() {
        //  6------7------8
        //  | [2]  | [3]  |
        //  3------4------5
        //  | [0]  | [1]  |
        //  0------1------2
        let mesh = SampleMeshes::four_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let problem = SampleProblem::new();
        let mut vars = Variables::new(4, 0.0);
        vars.saturation = vec![0.1, 0.2, 0.3, 0.4];
        // cell 0: east face (→ 1) followed by north face (→ 2)
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();

        // flow to the east: the western cells are upwind
        uniform_velocity(&grid, &mut vars, [1.0, 0.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.1), Some(0.1), Some(0.3), Some(0.3)]);

        // flow to the north-east: cell 0 is upwind of the diagonal cell 3 only
        uniform_velocity(&grid, &mut vars, [1.0, 1.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.1), Some(0.2), Some(0.3), Some(0.1)]);

        // flow to the south-west: cell 3 is upwind of cell 0
        uniform_velocity(&grid, &mut vars, [-1.0, -1.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.4), Some(0.2), Some(0.3), Some(0.4)]);

        // the non-wetting formulation is converted
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::NonWetting, VelocityType::Total);
        let sat: Vec<_> = sat.iter().map(|s| s.unwrap()).collect();
        array_approx_eq(&sat, &[0.6, 0.8, 0.7, 0.6], 1e-15);
    }

    #[test]
    fn upwind_saturations_handle_boundaries() {
        let mesh = SampleMeshes::four_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let mut problem = SampleProblem::new();
        let mut vars = Variables::new(4, 0.0);
        vars.saturation = vec![0.1, 0.2, 0.3, 0.4];
        // cell 0: south face (boundary) followed by east face (→ 1)
        let iv = InteractionVolume::new(&grid, 0, 0).unwrap();

        // closed boundary with flow to the west: cell 1 is upwind
        uniform_velocity(&grid, &mut vars, [-1.0, 0.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.2), None, Some(0.2), None]);

        // closed boundary with flow to the east: cell 0 is upwind
        uniform_velocity(&grid, &mut vars, [1.0, 0.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.1), None, Some(0.1), None]);

        // inflow through the bottom with prescribed saturation
        problem.set_dirichlet_saturation(|x| if x[1] == 0.0 { Some(0.9) } else { None });
        uniform_velocity(&grid, &mut vars, [0.0, 1.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.9), None, Some(0.9), None]);

        // corner volume: cell 0, west face followed by south face
        let iv = InteractionVolume::new(&grid, 0, 3).unwrap();
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.9), None, None, None]);
        uniform_velocity(&grid, &mut vars, [0.0, -1.0]);
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.1), None, None, None]);
    }

    #[test]
    fn upwind_saturations_handle_re_entrant_corners() {
        //  6------7
        //  | [2]  |
        //  3------4------5
        //  | [0]  | [1]  |
        //  0------1------2
        let mesh = SampleMeshes::three_qua4_l_shaped();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let mut problem = SampleProblem::new();
        let mut vars = Variables::new(3, 0.0);
        vars.saturation = vec![0.1, 0.2, 0.3];
        uniform_velocity(&grid, &mut vars, [-1.0, 0.0]);

        // cell 1: north face (boundary) followed by west face (→ 0); cell 2 is diagonal
        let iv = InteractionVolume::new(&grid, 1, 2).unwrap();
        let v = interaction_volume_velocity(&grid, &iv, &vars, VelocityType::Total);
        array_approx_eq(&v, &[-1.0, 0.0], 1e-15);
        // flow to the west: cell 1 is upwind of cell 0; cell 2 sees the virtual cell behind its east face
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.2), None, Some(0.2), Some(0.3)]);
        // inflow through the east face of cell 2 with prescribed saturation
        problem.set_dirichlet_saturation(|x| if x[0] == 1.0 && x[1] > 1.0 { Some(0.9) } else { None });
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.2), None, Some(0.2), Some(0.9)]);

        // cell 0: east face (→ 1) followed by north face (→ 2); no cell 4
        // cell 2 receives the prescribed saturation through its east face
        let iv = InteractionVolume::new(&grid, 0, 1).unwrap();
        let sat = upwind_saturations(&grid, &iv, &problem, &vars, SaturationType::Wetting, VelocityType::Total);
        assert_eq!(sat, [Some(0.2), Some(0.2), Some(0.9), None]);
    }
}

use super::{ParamMaterialLaw, ParamPorous, SpatialParams};
use crate::grid::GridCell;
use crate::StrError;
use gemlab::mesh::CellAttribute;
use russell_lab::Matrix;
use std::collections::HashMap;

/// Holds all (CellAttribute, ParamPorous) pairs
pub struct Attributes {
    all: HashMap<CellAttribute, ParamPorous>,
}

impl Attributes {
    /// Allocates a new instance from an Array
    pub fn from<const N: usize>(arr: [(CellAttribute, ParamPorous); N]) -> Self {
        Attributes {
            all: HashMap::from(arr),
        }
    }

    /// Returns the ParamPorous corresponding to a CellAttribute
    pub fn get(&self, attribute: CellAttribute) -> Result<&ParamPorous, StrError> {
        self.all
            .get(&attribute)
            .ok_or("cannot find CellAttribute in Attributes map")
    }
}

impl SpatialParams for Attributes {
    fn permeability(&self, _x: &[f64], cell: &GridCell) -> Result<Matrix, StrError> {
        let p = self.get(cell.attribute)?;
        Ok(Matrix::from(&[[p.kx, p.kxy], [p.kxy, p.ky]]))
    }

    fn material_law(&self, _x: &[f64], cell: &GridCell) -> Result<ParamMaterialLaw, StrError> {
        let p = self.get(cell.attribute)?;
        Ok(p.material_law)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Attributes;
    use crate::base::{GridKind, ParamMaterialLaw, ParamPorous, SampleMeshes, SpatialParams};
    use crate::grid::Grid;

    #[test]
    fn from_works() {
        let p1 = ParamPorous::sample_isotropic();
        let p2 = ParamPorous::sample_impermeable();
        let att = Attributes::from([(1, p1), (2, p2)]);
        assert_eq!(att.all.len(), 2);
        assert_eq!(att.get(2).unwrap().kx, 0.0);
        assert_eq!(att.get(3).err(), Some("cannot find CellAttribute in Attributes map"));
    }

    #[test]
    fn spatial_params_work() {
        let mut mesh = SampleMeshes::one_qua4();
        let p1 = ParamPorous::sample_anisotropic_brooks_corey();
        let att = Attributes::from([(1, p1)]);
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let cell = &grid.cells[0];
        let kk = att.permeability(&cell.center, cell).unwrap();
        assert_eq!(kk.dims(), (2, 2));
        assert_eq!(kk.get(0, 0), 2.0);
        assert_eq!(kk.get(0, 1), 0.5);
        assert_eq!(kk.get(1, 0), 0.5);
        assert_eq!(kk.get(1, 1), 1.0);
        match att.material_law(&cell.center, cell).unwrap() {
            ParamMaterialLaw::BrooksCorey { lambda, .. } => assert_eq!(lambda, 2.0),
            _ => panic!("wrong material law"),
        }

        mesh.cells[0].attribute = 2;
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let cell = &grid.cells[0];
        assert_eq!(
            att.permeability(&cell.center, cell).err(),
            Some("cannot find CellAttribute in Attributes map")
        );
        assert_eq!(
            att.material_law(&cell.center, cell).err(),
            Some("cannot find CellAttribute in Attributes map")
        );
    }
}

use super::{MpfaPressure, Variables};
use crate::base::VelocityType;
use crate::grid::NFACE;
use crate::StrError;

impl<'a> MpfaPressure<'a> {
    /// Reconstructs the face velocities and potentials from the current pressure
    ///
    /// The outward total flux through a face is the sum of the half-fluxes of the two interaction
    /// volumes (of the cell) containing this face. The total velocity is `flux / |f| · n` and the
    /// potential is the outward normal total velocity `flux / |f|`. With phase velocities, the
    /// total velocity is split by the fractional flows of the upstream cell.
    pub fn calculate_velocity(&self, vars: &mut Variables) -> Result<(), StrError> {
        vars.check(self.grid.ncell())?;
        for cell in &self.grid.cells {
            let i = cell.id;
            vars.velocity[i] = [[0.0; 2]; NFACE];
            vars.velocity_second_phase[i] = [[0.0; 2]; NFACE];
            vars.potential[i] = [0.0; NFACE];
            if self.impermeable[i] {
                continue;
            }

            // outward fluxes
            let mut flux = [0.0; NFACE];
            for face in 0..NFACE {
                let [f12, f13] = self.half_fluxes(vars, i, face)?;
                let iv = self.interaction_volume(i, face);
                let mut u = [0.0; 4];
                for (k, id) in iv.cells().iter().enumerate() {
                    if let Some(j) = id {
                        u[k] = vars.pressure[*j];
                    }
                }
                flux[iv.face12] += f12.eval(&u);
                flux[iv.face13] += f13.eval(&u);
            }

            // velocities
            for f in &cell.faces {
                let vn = flux[f.index] / f.volume;
                let vt = [vn * f.normal[0], vn * f.normal[1]];
                vars.potential[i][f.index] = vn;
                let upstream = match f.neighbor {
                    Some(j) if vn < 0.0 => j,
                    _ => i,
                };
                let fw = vars.frac_flow_wetting[upstream];
                let fn_ = vars.frac_flow_nonwetting[upstream];
                let (first, second) = match self.config.velocity_type {
                    VelocityType::Total => (1.0, 0.0),
                    VelocityType::Wetting => (fw, fn_),
                    VelocityType::NonWetting => (fn_, fw),
                };
                vars.velocity[i][f.index] = [first * vt[0], first * vt[1]];
                vars.velocity_second_phase[i][f.index] = [second * vt[0], second * vt[1]];
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use crate::base::ParamFluid;
use crate::StrError;

/// Implements a model for the intrinsic density and viscosity of a fluid phase
///
/// The intrinsic density varies linearly with the pressure:
///
/// ```text
/// ρReal = ρReal₀ + C (p - p₀)
/// ```
///
/// The viscosity is constant.
pub struct FluidModel {
    cc: f64,      // compressibility C = dρReal/dp
    p_ref: f64,   // reference pressure p₀
    rho_ref: f64, // reference intrinsic density ρReal₀
    mu: f64,      // dynamic viscosity
}

impl FluidModel {
    /// Allocates a new instance
    pub fn new(param: &ParamFluid) -> Result<Self, StrError> {
        if param.density.cc < 0.0 {
            return Err("compressibility constant must be ≥ 0.0");
        }
        if param.density.rho_ref <= 0.0 {
            return Err("reference intrinsic density must be greater than zero");
        }
        if param.viscosity <= 0.0 {
            return Err("viscosity must be greater than zero");
        }
        Ok(FluidModel {
            cc: param.density.cc,
            p_ref: param.density.p_ref,
            rho_ref: param.density.rho_ref,
            mu: param.viscosity,
        })
    }

    /// Calculates the intrinsic density at a pressure
    ///
    /// The temperature is currently ignored.
    pub fn density(&self, p: f64, _temperature: f64) -> Result<f64, StrError> {
        let rho = self.rho_ref + self.cc * (p - self.p_ref);
        if rho <= 0.0 {
            return Err("intrinsic density must remain greater than zero");
        }
        Ok(rho)
    }

    /// Returns the dynamic viscosity
    pub fn viscosity(&self, _p: f64, _temperature: f64) -> f64 {
        self.mu
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FluidModel;
    use crate::base::{ParamFluid, ParamFluids, ParamRealDensity};
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        let mut param = ParamFluid {
            density: ParamRealDensity {
                cc: -1.0,
                p_ref: 0.0,
                rho_ref: 1.0,
                tt_ref: 20.0,
            },
            viscosity: 1.0,
        };
        assert_eq!(
            FluidModel::new(&param).err(),
            Some("compressibility constant must be ≥ 0.0")
        );
        param.density.cc = 0.0;
        param.density.rho_ref = 0.0;
        assert_eq!(
            FluidModel::new(&param).err(),
            Some("reference intrinsic density must be greater than zero")
        );
        param.density.rho_ref = 1.0;
        param.viscosity = 0.0;
        assert_eq!(FluidModel::new(&param).err(), Some("viscosity must be greater than zero"));
    }

    #[test]
    fn density_and_viscosity_work() {
        let fluids = ParamFluids::sample_water_oil();
        let water = FluidModel::new(&fluids.wetting).unwrap();
        assert_eq!(water.density(1e5, 283.15).unwrap(), 1000.0);
        approx_eq(water.density(2e5, 283.15).unwrap(), 1000.0 + 4.53e-5, 1e-12);
        assert_eq!(water.viscosity(1e5, 283.15), 1e-3);
        let oil = FluidModel::new(&fluids.nonwetting).unwrap();
        assert_eq!(oil.density(5e6, 283.15).unwrap(), 800.0);
        assert_eq!(oil.viscosity(1e5, 283.15), 5e-3);

        let mut param = fluids.wetting;
        param.density.cc = 1.0;
        let model = FluidModel::new(&param).unwrap();
        assert_eq!(
            model.density(-1e5, 283.15).err(),
            Some("intrinsic density must remain greater than zero")
        );
    }
}

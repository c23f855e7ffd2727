use crate::base::ParamMaterialLaw;
use crate::StrError;

/// Smallest effective saturation used to evaluate the capillary pressure of the Brooks-Corey model
const SE_MIN_BROOKS_COREY: f64 = 1e-10;

/// Implements the relative permeability and capillary pressure laws
///
/// All functions take the **wetting** phase saturation Sw.
pub struct MaterialLawModel {
    /// Linear model enabled
    linear_enabled: bool,

    /// Pore-size distribution index λ (Brooks-Corey)
    lambda: f64,

    /// Entry pressure (or capillary pressure at Se = 1 for the linear model)
    pc_entry: f64,

    /// Capillary pressure at Se = 0 (linear model)
    pc_max: f64,

    /// Residual wetting saturation
    swr: f64,

    /// Residual non-wetting saturation
    snr: f64,
}

impl MaterialLawModel {
    /// Allocates a new instance
    pub fn new(param: &ParamMaterialLaw) -> Result<Self, StrError> {
        let (linear_enabled, lambda, pc_entry, pc_max, swr, snr) = match *param {
            ParamMaterialLaw::Linear {
                pc_entry,
                pc_max,
                swr,
                snr,
            } => (true, 0.0, pc_entry, pc_max, swr, snr),
            ParamMaterialLaw::BrooksCorey {
                lambda,
                pc_entry,
                swr,
                snr,
            } => {
                if lambda <= 0.0 {
                    return Err("lambda parameter for the Brooks-Corey law must be > 0.0");
                }
                if pc_entry < 0.0 {
                    return Err("pc_entry parameter for the Brooks-Corey law must be ≥ 0.0");
                }
                (false, lambda, pc_entry, 0.0, swr, snr)
            }
        };
        if swr < 0.0 || snr < 0.0 || swr + snr >= 1.0 {
            return Err("residual saturations must be ≥ 0.0 and satisfy swr + snr < 1.0");
        }
        Ok(MaterialLawModel {
            linear_enabled,
            lambda,
            pc_entry,
            pc_max,
            swr,
            snr,
        })
    }

    /// Calculates the effective saturation Se = (Sw - Swr) / (1 - Swr - Snr) clamped to [0, 1]
    pub fn effective_saturation(&self, sw: f64) -> f64 {
        let se = (sw - self.swr) / (1.0 - self.swr - self.snr);
        f64::max(0.0, f64::min(1.0, se))
    }

    /// Calculates the relative permeability of the wetting phase
    pub fn krw(&self, sw: f64) -> f64 {
        let se = self.effective_saturation(sw);
        if self.linear_enabled {
            se
        } else {
            f64::powf(se, (2.0 + 3.0 * self.lambda) / self.lambda)
        }
    }

    /// Calculates the relative permeability of the non-wetting phase
    pub fn krn(&self, sw: f64) -> f64 {
        let se = self.effective_saturation(sw);
        if self.linear_enabled {
            1.0 - se
        } else {
            let a = 1.0 - se;
            a * a * (1.0 - f64::powf(se, (2.0 + self.lambda) / self.lambda))
        }
    }

    /// Calculates the capillary pressure pc = pn - pw
    pub fn pc(&self, sw: f64) -> f64 {
        let se = self.effective_saturation(sw);
        if self.linear_enabled {
            self.pc_entry + (1.0 - se) * (self.pc_max - self.pc_entry)
        } else {
            self.pc_entry * f64::powf(f64::max(se, SE_MIN_BROOKS_COREY), -1.0 / self.lambda)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::MaterialLawModel;
    use crate::base::{ParamMaterialLaw, ParamPorous};
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        let param = ParamMaterialLaw::BrooksCorey {
            lambda: 0.0,
            pc_entry: 1.0,
            swr: 0.0,
            snr: 0.0,
        };
        assert_eq!(
            MaterialLawModel::new(&param).err(),
            Some("lambda parameter for the Brooks-Corey law must be > 0.0")
        );
        let param = ParamMaterialLaw::BrooksCorey {
            lambda: 2.0,
            pc_entry: -1.0,
            swr: 0.0,
            snr: 0.0,
        };
        assert_eq!(
            MaterialLawModel::new(&param).err(),
            Some("pc_entry parameter for the Brooks-Corey law must be ≥ 0.0")
        );
        let param = ParamMaterialLaw::Linear {
            pc_entry: 0.0,
            pc_max: 0.0,
            swr: 0.6,
            snr: 0.4,
        };
        assert_eq!(
            MaterialLawModel::new(&param).err(),
            Some("residual saturations must be ≥ 0.0 and satisfy swr + snr < 1.0")
        );
    }

    #[test]
    fn linear_law_works() {
        let param = ParamMaterialLaw::Linear {
            pc_entry: 100.0,
            pc_max: 300.0,
            swr: 0.2,
            snr: 0.0,
        };
        let model = MaterialLawModel::new(&param).unwrap();
        assert_eq!(model.effective_saturation(0.1), 0.0);
        assert_eq!(model.effective_saturation(1.0), 1.0);
        approx_eq(model.effective_saturation(0.6), 0.5, 1e-15);
        approx_eq(model.krw(0.6), 0.5, 1e-15);
        approx_eq(model.krn(0.6), 0.5, 1e-15);
        approx_eq(model.pc(0.6), 200.0, 1e-12);
        assert_eq!(model.pc(1.0), 100.0);
        assert_eq!(model.pc(0.0), 300.0);
    }

    #[test]
    fn brooks_corey_law_works() {
        let param = ParamPorous::sample_anisotropic_brooks_corey().material_law;
        let model = MaterialLawModel::new(&param).unwrap();
        // λ = 2, pc_entry = 1000, swr = 0.1, snr = 0.05
        let sw = 0.1 + 0.5 * 0.85;
        approx_eq(model.effective_saturation(sw), 0.5, 1e-15);
        approx_eq(model.krw(sw), f64::powf(0.5, 4.0), 1e-15);
        approx_eq(model.krn(sw), 0.25 * (1.0 - 0.25), 1e-15);
        approx_eq(model.pc(sw), 1000.0 * f64::sqrt(2.0), 1e-10);
        assert_eq!(model.krw(1.0), 1.0);
        assert_eq!(model.krn(1.0), 0.0);
        assert_eq!(model.krw(0.0), 0.0);
        assert_eq!(model.krn(0.0), 1.0);
        assert!(model.pc(0.0).is_finite());
    }

    #[test]
    fn relative_permeabilities_are_monotonic() {
        let params = [
            ParamPorous::sample_isotropic().material_law,
            ParamPorous::sample_anisotropic_brooks_corey().material_law,
        ];
        for param in &params {
            let model = MaterialLawModel::new(param).unwrap();
            let mut krw_old = model.krw(0.0);
            let mut krn_old = model.krn(0.0);
            for i in 1..=100 {
                let sw = (i as f64) / 100.0;
                let krw = model.krw(sw);
                let krn = model.krn(sw);
                assert!(krw >= krw_old);
                assert!(krn <= krn_old);
                krw_old = krw;
                krn_old = krn;
            }
        }
    }
}

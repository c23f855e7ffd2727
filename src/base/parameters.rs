use serde::{Deserialize, Serialize};

/// Holds parameters for the relative permeability and capillary pressure laws
///
/// All laws are written in terms of the effective wetting saturation:
///
/// ```text
///         Sw - Swr
/// Se = —————————————
///      1 - Swr - Snr
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamMaterialLaw {
    /// Linear relative permeabilities and linear capillary pressure
    ///
    /// ```text
    /// krw = Se    krn = 1 - Se    pc = pc_entry + (1 - Se) (pc_max - pc_entry)
    /// ```
    Linear {
        /// Capillary pressure at full (effective) wetting saturation
        pc_entry: f64,

        /// Capillary pressure at residual wetting saturation
        pc_max: f64,

        /// Residual wetting saturation
        swr: f64,

        /// Residual non-wetting saturation
        snr: f64,
    },

    /// Brooks-Corey model
    ///
    /// ```text
    /// krw = Se^((2+3λ)/λ)    krn = (1-Se)² (1 - Se^((2+λ)/λ))    pc = pc_entry Se^(-1/λ)
    /// ```
    BrooksCorey {
        /// Pore-size distribution index λ
        lambda: f64,

        /// Entry pressure
        pc_entry: f64,

        /// Residual wetting saturation
        swr: f64,

        /// Residual non-wetting saturation
        snr: f64,
    },
}

/// Holds parameters for intrinsic (real) density
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamRealDensity {
    /// Compressibility C = dρReal/dp
    pub cc: f64,

    /// Reference pressure p₀
    pub p_ref: f64,

    /// Reference intrinsic density ρReal₀
    pub rho_ref: f64,

    /// Reference temperature T₀
    pub tt_ref: f64,
}

/// Holds parameters for one fluid phase
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamFluid {
    /// Intrinsic density
    pub density: ParamRealDensity,

    /// Dynamic viscosity μ
    pub viscosity: f64,
}

/// Holds parameters for the wetting and non-wetting fluids
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamFluids {
    /// Wetting phase (e.g., water)
    pub wetting: ParamFluid,

    /// Non-wetting phase (e.g., oil or gas)
    pub nonwetting: ParamFluid,
}

/// Holds the spatial parameters of a porous region
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamPorous {
    /// xx-component of the intrinsic permeability tensor
    pub kx: f64,

    /// yy-component of the intrinsic permeability tensor
    pub ky: f64,

    /// xy-component (= yx-component) of the intrinsic permeability tensor
    pub kxy: f64,

    /// Relative permeability and capillary pressure law
    pub material_law: ParamMaterialLaw,
}

impl ParamPorous {
    /// Returns a sample with unit isotropic permeability and linear laws
    pub fn sample_isotropic() -> Self {
        ParamPorous {
            kx: 1.0,
            ky: 1.0,
            kxy: 0.0,
            material_law: ParamMaterialLaw::Linear {
                pc_entry: 0.0,
                pc_max: 0.0,
                swr: 0.0,
                snr: 0.0,
            },
        }
    }

    /// Returns a sample with zero permeability (impermeable region)
    pub fn sample_impermeable() -> Self {
        ParamPorous {
            kx: 0.0,
            ky: 0.0,
            kxy: 0.0,
            ..ParamPorous::sample_isotropic()
        }
    }

    /// Returns a sample with a full anisotropic tensor and Brooks-Corey laws
    pub fn sample_anisotropic_brooks_corey() -> Self {
        ParamPorous {
            kx: 2.0,
            ky: 1.0,
            kxy: 0.5,
            material_law: ParamMaterialLaw::BrooksCorey {
                lambda: 2.0,
                pc_entry: 1000.0,
                swr: 0.1,
                snr: 0.05,
            },
        }
    }
}

impl ParamFluids {
    /// Returns a sample with two incompressible fluids of unit density and viscosity
    pub fn sample_unit() -> Self {
        let unit = ParamFluid {
            density: ParamRealDensity {
                cc: 0.0,
                p_ref: 0.0,
                rho_ref: 1.0,
                tt_ref: 20.0,
            },
            viscosity: 1.0,
        };
        ParamFluids {
            wetting: unit,
            nonwetting: unit,
        }
    }

    /// Returns a sample with water (wetting) and a light oil (non-wetting)
    pub fn sample_water_oil() -> Self {
        ParamFluids {
            wetting: ParamFluid {
                density: ParamRealDensity {
                    cc: 4.53e-10,    // kg/(m³ Pa)
                    p_ref: 1e5,      // Pa
                    rho_ref: 1000.0, // kg/m³
                    tt_ref: 20.0,    // ℃
                },
                viscosity: 1e-3, // Pa s
            },
            nonwetting: ParamFluid {
                density: ParamRealDensity {
                    cc: 0.0,
                    p_ref: 1e5,
                    rho_ref: 800.0,
                    tt_ref: 20.0,
                },
                viscosity: 5e-3,
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

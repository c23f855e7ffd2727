use crate::grid::NFACE;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Number of positions (cells) in an interaction volume
pub const NPOSITION: usize = 4;

/// Holds the cell-wise state shared by the pressure solver and the transport model
///
/// The face-wise arrays are indexed by the local index of the face in the native order of the grid.
/// The upwind mobilities are indexed by `[cell][face][position]` where the position refers to the
/// interaction volume built from the face and its next face (position 0 is the cell itself).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Variables {
    /// Primary saturation (wetting or non-wetting according to the configuration)
    pub saturation: Vec<f64>,

    /// Pressure (the unknown of the pressure equation)
    pub pressure: Vec<f64>,

    /// Capillary pressure
    pub capillary_pressure: Vec<f64>,

    /// Density of the wetting phase
    pub density_wetting: Vec<f64>,

    /// Density of the non-wetting phase
    pub density_nonwetting: Vec<f64>,

    /// Viscosity of the wetting phase
    pub viscosity_wetting: Vec<f64>,

    /// Viscosity of the non-wetting phase
    pub viscosity_nonwetting: Vec<f64>,

    /// Mobility of the wetting phase (λw = krw / μw)
    pub mobility_wetting: Vec<f64>,

    /// Mobility of the non-wetting phase (λn = krn / μn)
    pub mobility_nonwetting: Vec<f64>,

    /// Fractional flow of the wetting phase (fw = λw / λt)
    pub frac_flow_wetting: Vec<f64>,

    /// Fractional flow of the non-wetting phase (fn = λn / λt)
    pub frac_flow_nonwetting: Vec<f64>,

    /// Velocity at the faces `[cell][face][dim]` (total or phase velocity according to the configuration)
    pub velocity: Vec<[[f64; 2]; NFACE]>,

    /// Velocity of the second phase at the faces `[cell][face][dim]` (phase velocities only)
    pub velocity_second_phase: Vec<[[f64; 2]; NFACE]>,

    /// Potential (outward normal total velocity) at the faces `[cell][face]`
    pub potential: Vec<[f64; NFACE]>,

    /// Upwind mobility of the wetting phase `[cell][face][position]`
    pub upwind_mobility_wetting: Vec<[[f64; NPOSITION]; NFACE]>,

    /// Upwind mobility of the non-wetting phase `[cell][face][position]`
    pub upwind_mobility_nonwetting: Vec<[[f64; NPOSITION]; NFACE]>,
}

impl Variables {
    /// Allocates a new instance with a uniform saturation and zero pressure
    pub fn new(ncell: usize, saturation: f64) -> Self {
        Variables {
            saturation: vec![saturation; ncell],
            pressure: vec![0.0; ncell],
            capillary_pressure: vec![0.0; ncell],
            density_wetting: vec![0.0; ncell],
            density_nonwetting: vec![0.0; ncell],
            viscosity_wetting: vec![0.0; ncell],
            viscosity_nonwetting: vec![0.0; ncell],
            mobility_wetting: vec![0.0; ncell],
            mobility_nonwetting: vec![0.0; ncell],
            frac_flow_wetting: vec![0.0; ncell],
            frac_flow_nonwetting: vec![0.0; ncell],
            velocity: vec![[[0.0; 2]; NFACE]; ncell],
            velocity_second_phase: vec![[[0.0; 2]; NFACE]; ncell],
            potential: vec![[0.0; NFACE]; ncell],
            upwind_mobility_wetting: vec![[[0.0; NPOSITION]; NFACE]; ncell],
            upwind_mobility_nonwetting: vec![[[0.0; NPOSITION]; NFACE]; ncell],
        }
    }

    /// Returns the number of cells
    pub fn ncell(&self) -> usize {
        self.saturation.len()
    }

    /// Checks that all arrays have the length of the number of cells
    pub fn check(&self, ncell: usize) -> Result<(), StrError> {
        let lengths = [
            self.saturation.len(),
            self.pressure.len(),
            self.capillary_pressure.len(),
            self.density_wetting.len(),
            self.density_nonwetting.len(),
            self.viscosity_wetting.len(),
            self.viscosity_nonwetting.len(),
            self.mobility_wetting.len(),
            self.mobility_nonwetting.len(),
            self.frac_flow_wetting.len(),
            self.frac_flow_nonwetting.len(),
            self.velocity.len(),
            self.velocity_second_phase.len(),
            self.potential.len(),
            self.upwind_mobility_wetting.len(),
            self.upwind_mobility_nonwetting.len(),
        ];
        if lengths.iter().any(|&n| n != ncell) {
            return Err("the arrays of Variables must have length equal to the number of cells");
        }
        Ok(())
    }

    /// Reads a JSON file with the variables
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let variables = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(variables)
    }

    /// Writes a JSON file with the variables
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

//! Reading mass spectra from JCAMP-DX files and sifting their peaks down to the masses worth searching for

pub mod errors;
pub mod jcamp;
mod peaks;

// External Crate Imports
use derive_more::Constructor;

// Re-exports
pub use peaks::{DEFAULT_MIN_INTENSITY, PeakFilter, target_masses};

// Public API ==========================================================================================================

/// A single (m/z, relative intensity) pair from a spectrum
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Constructor)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Spectrum {
    title: String,
    x_units: String,
    y_units: String,
    molform: String,
    peaks: Vec<Peak>,
}

impl Spectrum {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_units(&self) -> &str {
        &self.x_units
    }

    pub fn y_units(&self) -> &str {
        &self.y_units
    }

    /// The molecular formula of the analyte, exactly as written in the file
    pub fn molform(&self) -> &str {
        &self.molform
    }

    /// Peaks in the order they were listed in the file
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }
}

// Standard Library Imports
use std::{fs, path::Path, time::Duration};

// External Crate Imports
use knuffel::Decode;
use miette::{IntoDiagnostic, Result, WrapErr};

/// Peaks less intense than this are dropped before searching
pub const DEFAULT_MIN_INTENSITY: u32 = 200;

/// The length of one search time-unit
pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;

// Public API ==========================================================================================================

/// Settings for a fragment search, read from a KDL document like:
///
/// ```kdl
/// min-intensity 200
/// time-unit-ms 1000
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Decode)]
pub struct SearchConfig {
    #[knuffel(child, unwrap(argument), default = DEFAULT_MIN_INTENSITY)]
    min_intensity: u32,
    #[knuffel(child, unwrap(argument), default = DEFAULT_TIME_UNIT_MS)]
    time_unit_ms: u64,
}

impl SearchConfig {
    pub fn new(file_name: impl AsRef<str>, kdl_text: impl AsRef<str>) -> Result<Self> {
        Ok(knuffel::parse(file_name.as_ref(), kdl_text.as_ref())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kdl_text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read the search configuration {path:?}"))?;
        Self::new(path.display().to_string(), kdl_text)
    }

    #[must_use]
    pub const fn with_time_unit_ms(mut self, time_unit_ms: u64) -> Self {
        self.time_unit_ms = time_unit_ms;
        self
    }

    pub fn min_intensity(&self) -> f64 {
        f64::from(self.min_intensity)
    }

    pub const fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_intensity: DEFAULT_MIN_INTENSITY,
            time_unit_ms: DEFAULT_TIME_UNIT_MS,
        }
    }
}

// Module Tests ========================================================================================================

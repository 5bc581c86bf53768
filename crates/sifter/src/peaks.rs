// External Crate Imports
use itertools::Itertools;
use molform::NominalMass;
use tracing::debug;

// Local Crate Imports
use crate::Peak;

/// Peaks less intense than this are treated as noise or isotopic artifacts
pub const DEFAULT_MIN_INTENSITY: f64 = 200.0;

// Public API ==========================================================================================================

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PeakFilter {
    min_intensity: f64,
    max_mass: NominalMass,
}

impl PeakFilter {
    /// Keeps peaks at least [`DEFAULT_MIN_INTENSITY`] intense and no heavier than `max_mass`
    pub const fn new(max_mass: NominalMass) -> Self {
        Self {
            min_intensity: DEFAULT_MIN_INTENSITY,
            max_mass,
        }
    }

    #[must_use]
    pub const fn with_min_intensity(mut self, min_intensity: f64) -> Self {
        self.min_intensity = min_intensity;
        self
    }

    pub const fn min_intensity(&self) -> f64 {
        self.min_intensity
    }

    pub const fn max_mass(&self) -> NominalMass {
        self.max_mass
    }

    pub fn keeps(&self, peak: &Peak) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let max_mass = u64::from(self.max_mass) as f64;
        peak.intensity >= self.min_intensity && peak.mz <= max_mass
    }

    /// Retains the peaks that pass this filter, preserving their original order
    pub fn filter(&self, peaks: &[Peak]) -> Vec<Peak> {
        let kept: Vec<_> = peaks.iter().copied().filter(|p| self.keeps(p)).collect();
        debug!(
            kept = kept.len(),
            dropped = peaks.len() - kept.len(),
            min_intensity = self.min_intensity,
            max_mass = %self.max_mass,
            "filtered spectrum peaks"
        );
        kept
    }
}

/// Rounds every peak to its nearest whole mass, dropping repeats but otherwise keeping the order of first appearance
pub fn target_masses(peaks: &[Peak]) -> Vec<NominalMass> {
    peaks
        .iter()
        .filter_map(|peak| NominalMass::nearest(peak.mz))
        .unique()
        .collect()
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn peaks(pairs: &[(f64, f64)]) -> Vec<Peak> {
        pairs.iter().map(|&(mz, intensity)| Peak::new(mz, intensity)).collect()
    }

    #[test]
    fn filter_by_intensity_and_mass() {
        let raw = peaks(&[(10.0, 50.0), (20.0, 300.0), (150.0, 400.0)]);
        let filter = PeakFilter::new(NominalMass::from(100));
        assert_eq!(filter.filter(&raw), peaks(&[(20.0, 300.0)]));
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let raw = peaks(&[(100.0, 200.0), (100.5, 999.0), (99.0, 199.9)]);
        let filter = PeakFilter::new(NominalMass::from(100));
        assert_eq!(filter.filter(&raw), peaks(&[(100.0, 200.0)]));
    }

    #[test]
    fn filter_preserves_order() {
        let raw = peaks(&[(78.0, 9999.0), (52.0, 1500.0), (77.0, 2000.0), (51.0, 1800.0)]);
        let filter = PeakFilter::new(NominalMass::from(78));
        assert_eq!(filter.filter(&raw), raw);
    }

    #[test]
    fn custom_min_intensity() {
        let raw = peaks(&[(10.0, 50.0), (20.0, 300.0)]);
        let filter = PeakFilter::new(NominalMass::from(100)).with_min_intensity(10.0);
        assert_eq!(filter.min_intensity(), 10.0);
        assert_eq!(filter.max_mass(), NominalMass::from(100));
        assert_eq!(filter.filter(&raw), raw);
        let strict = filter.with_min_intensity(1000.0);
        assert!(strict.filter(&raw).is_empty());
    }

    #[test]
    fn filtering_everything_away() {
        let raw = peaks(&[(10.0, 5.0), (20.0, 3.0)]);
        let filter = PeakFilter::new(NominalMass::from(100));
        assert!(filter.filter(&raw).is_empty());
        assert!(target_masses(&filter.filter(&raw)).is_empty());
    }

    #[test]
    fn rounding_target_masses() {
        let filtered = peaks(&[
            (78.0, 9999.0),
            (52.4, 300.0),
            (77.0, 2000.0),
            (51.6, 300.0),
            (52.0, 300.0),
            (77.5, 300.0),
            (78.5, 300.0),
        ]);
        let targets: Vec<_> = target_masses(&filtered).into_iter().map(u64::from).collect();
        // Repeats after rounding are removed, and halves go to the even neighbour
        assert_eq!(targets, [78, 52, 77]);
    }
}

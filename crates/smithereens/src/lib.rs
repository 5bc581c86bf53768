//! A time-bounded, randomised search for the sub-formulae of a molecule whose masses line up with observed peaks

// Standard Library Imports
use std::time::{Duration, Instant};

// External Crate Imports
use ahash::HashSet;
use derive_more::Display;
use molform::{ChemicalFormula, Massive, NominalMass};
use rand::Rng;
use tracing::{debug, info, warn};

// Public API ==========================================================================================================

/// How long a search is allowed to run, measured in whole time-units and tiered by the parent's molecular weight
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Display)]
#[display("{units} time-units")]
pub struct SearchBudget {
    units: u32,
}

impl SearchBudget {
    pub fn for_mass(molecular_weight: NominalMass) -> Self {
        let units = match u64::from(molecular_weight) {
            ..100 => 10,
            100..200 => 20,
            _ => 30,
        };
        Self { units }
    }

    pub const fn units(&self) -> u32 {
        self.units
    }

    /// The wall-clock length of this budget, saturating at [`Duration::MAX`] for absurdly long time-units
    pub fn duration(&self, time_unit: Duration) -> Duration {
        time_unit.saturating_mul(self.units)
    }
}

/// A sub-formula of the parent whose nominal mass matched one of the target masses
#[derive(Clone, Eq, PartialEq, Debug, Display)]
#[display("{formula} ({mass})")]
pub struct MatchedFragment<'a> {
    formula: ChemicalFormula<'a>,
    mass: NominalMass,
    target: usize,
}

impl<'a> MatchedFragment<'a> {
    pub const fn formula(&self) -> &ChemicalFormula<'a> {
        &self.formula
    }

    pub const fn mass(&self) -> NominalMass {
        self.mass
    }

    /// The position, among the search's target masses, of the target this fragment was credited to
    pub const fn target(&self) -> usize {
        self.target
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SearchStats {
    pub iterations: u64,
    pub admitted: usize,
}

pub struct FragmentSearch<'a, 'p, R> {
    parent: &'p ChemicalFormula<'a>,
    targets: Vec<NominalMass>,
    rng: R,
    admitted: HashSet<ChemicalFormula<'a>>,
    results: Vec<MatchedFragment<'a>>,
    iterations: u64,
}

impl<'a, 'p, R: Rng> FragmentSearch<'a, 'p, R> {
    /// Starts an empty search over the sub-formulae of `parent`. Candidates are checked against `targets` in order.
    pub fn new(parent: &'p ChemicalFormula<'a>, targets: Vec<NominalMass>, rng: R) -> Self {
        if targets.is_empty() {
            warn!(parent = %parent, "no target masses survived filtering, so no fragments can be found");
        }
        Self {
            parent,
            targets,
            rng,
            admitted: HashSet::default(),
            results: Vec::new(),
            iterations: 0,
        }
    }

    /// The budget this search gets under the molecular-weight tiers of [`SearchBudget::for_mass`]
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::for_mass(self.parent.nominal_mass())
    }

    /// Draws and scores a single candidate, returning it if it was admitted as a new fragment
    pub fn step(&mut self) -> Option<&MatchedFragment<'a>> {
        self.iterations += 1;
        let candidate = self.parent.random_subformula(&mut self.rng);
        let mass = candidate.nominal_mass();

        // NOTE: A candidate is credited to (at most) the first target it matches
        let target = self.targets.iter().position(|&t| t == mass)?;
        if self.admitted.contains(&candidate) {
            return None;
        }

        debug!(fragment = %candidate, %mass, target, "admitted fragment");
        self.admitted.insert(candidate.clone());
        self.results.push(MatchedFragment {
            formula: candidate,
            mass,
            target,
        });
        self.results.last()
    }

    /// Steps until `deadline` passes, checking the clock before every iteration
    pub fn run_until(&mut self, deadline: Instant) -> SearchStats {
        self.run_while(|| Instant::now() < deadline)
    }

    /// Steps until `duration` has elapsed, however long that is
    pub fn run_for(&mut self, duration: Duration) -> SearchStats {
        // NOTE: Comparing elapsed time avoids computing a deadline, which can overflow `Instant`
        let start = Instant::now();
        self.run_while(|| start.elapsed() < duration)
    }

    /// Runs for this search's full [`SearchBudget`], with each time-unit lasting `time_unit`
    pub fn run(&mut self, time_unit: Duration) -> SearchStats {
        let budget = self.budget();
        let duration = budget.duration(time_unit);
        info!(
            parent = %self.parent,
            targets = self.targets.len(),
            %budget,
            ?duration,
            "starting fragment search"
        );
        self.run_for(duration)
    }

    fn run_while(&mut self, mut keep_going: impl FnMut() -> bool) -> SearchStats {
        while keep_going() {
            self.step();
        }
        let stats = self.stats();
        info!(
            iterations = stats.iterations,
            admitted = stats.admitted,
            "fragment search finished"
        );
        stats
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            iterations: self.iterations,
            admitted: self.results.len(),
        }
    }

    pub fn targets(&self) -> &[NominalMass] {
        &self.targets
    }

    /// Every admitted fragment, ordered by mass; fragments of equal mass stay in the order they were found
    pub fn finish(self) -> Vec<MatchedFragment<'a>> {
        let mut results = self.results;
        results.sort_by_key(MatchedFragment::mass);
        results
    }
}

// Module Tests ========================================================================================================

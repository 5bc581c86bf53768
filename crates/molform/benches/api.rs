use divan::{AllocProfiler, black_box};
use molform::{AtomicDatabase, ChemicalFormula, Massive, atoms::atomic_database};
use once_cell::sync::Lazy;
use rand::{SeedableRng, rngs::StdRng};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const ATOMIC_KDL: &str = atomic_database::DEFAULT_KDL;
const FORMULAS: [&str; 5] = ["C6H6", "C2H6O", "C8H10N4O2", "C6H12O6", "(CH3)3N"];

static ATOMIC_DB: Lazy<AtomicDatabase> = Lazy::new(AtomicDatabase::default);

static FORMULAE: Lazy<Vec<ChemicalFormula>> = Lazy::new(|| {
    FORMULAS
        .into_iter()
        .map(|formula| ChemicalFormula::new(&ATOMIC_DB, formula).unwrap())
        .collect()
});

fn main() {
    Lazy::force(&ATOMIC_DB);
    Lazy::force(&FORMULAE);
    divan::main();
}

#[divan::bench]
fn build_atomic_database() -> AtomicDatabase {
    AtomicDatabase::new("atomic_database.kdl", ATOMIC_KDL).unwrap()
}

#[divan::bench]
fn parse_chemical_formulae() {
    for formula in FORMULAS {
        black_box(ChemicalFormula::new(&ATOMIC_DB, formula).unwrap());
    }
}

#[divan::bench]
fn calculate_nominal_masses() {
    for formula in FORMULAE.iter() {
        black_box(formula.nominal_mass());
    }
}

#[divan::bench]
fn draw_random_subformulae(bencher: divan::Bencher) {
    let mut rng = StdRng::seed_from_u64(42);
    bencher.bench_local(|| {
        for formula in FORMULAE.iter() {
            black_box(formula.random_subformula(&mut rng));
        }
    });
}

// Standard Library Imports
use std::path::PathBuf;

// External Crate Imports
use clap::Parser;
use fragfinder::{config::SearchConfig, parent_formula, resolve_jcamp_path, table::FragmentTable};
use miette::{IntoDiagnostic, Result, miette};
use molform::{AtomicDatabase, Massive};
use rand::{SeedableRng, rngs::StdRng};
use rustyline::DefaultEditor;
use sifter::{PeakFilter, Spectrum, target_masses};
use smithereens::FragmentSearch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Searches a JCAMP-DX mass spectrum for the fragments of its molecule that explain the observed peaks
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A JCAMP-DX file (the .jdx extension can be left off); you'll be prompted for one if this is missing
    file: Option<PathBuf>,
    /// A KDL file of search settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seeds the random search, making runs reproducible
    #[arg(short, long)]
    seed: Option<u64>,
    /// Overrides the configured length of a search time-unit, in milliseconds
    #[arg(long)]
    time_unit_ms: Option<u64>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = args
        .config
        .map_or_else(|| Ok(SearchConfig::default()), SearchConfig::load)?;
    if let Some(time_unit_ms) = args.time_unit_ms {
        config = config.with_time_unit_ms(time_unit_ms);
    }

    println!(
        "Welcome to fragfinder! This program analyses mass spectrum data in the JCAMP-DX file format."
    );
    let path = match args.file {
        Some(file) => resolve_jcamp_path(&file)
            .ok_or_else(|| miette!("the file {file:?} does not exist (with or without a .jdx extension)"))?,
        None => prompt_for_file()?,
    };
    println!("{} found", path.display());

    let spectrum = Spectrum::read(&path)?;
    let db = AtomicDatabase::default();
    let parent = parent_formula(&db, &spectrum)?;
    let molecular_weight = parent.nominal_mass();
    println!(
        "The mass of {} ({parent}) is: {molecular_weight}",
        spectrum.title()
    );

    let peak_filter =
        PeakFilter::new(molecular_weight).with_min_intensity(config.min_intensity());
    let peaks = peak_filter.filter(spectrum.peaks());
    let targets = target_masses(&peaks);
    info!(
        raw = spectrum.peaks().len(),
        kept = peaks.len(),
        targets = targets.len(),
        min_intensity = peak_filter.min_intensity(),
        max_mass = %molecular_weight,
        "filtered spectrum"
    );

    let rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    println!("Calculating ALL possible fragments, this could take a while...");
    let mut search = FragmentSearch::new(&parent, targets, rng);
    search.run(config.time_unit());
    let fragments = search.finish();

    let table = FragmentTable::new(fragments.iter().map(|f| (f.formula(), f.mass())));
    print!("{table}");

    Ok(())
}

fn prompt_for_file() -> Result<PathBuf> {
    let mut rl = DefaultEditor::new().into_diagnostic()?;
    loop {
        let name = rl
            .readline("Enter file name (the .jdx extension is optional): ")
            .into_diagnostic()?;
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        rl.add_history_entry(name).into_diagnostic()?;

        if let Some(path) = resolve_jcamp_path(name) {
            return Ok(path);
        }
        println!(
            "File does not exist. Make sure you've entered the file name correctly, relative to the current directory."
        );
    }
}

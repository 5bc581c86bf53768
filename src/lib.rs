//! Finds the fragments of a molecule that could explain the peaks of its mass spectrum

pub mod config;
pub mod table;

use std::path::{Path, PathBuf};

use miette::Result;
use molform::{AtomicDatabase, ChemicalFormula, Massive};
use sifter::Spectrum;
use tracing::debug;

/// The extension given to JCAMP-DX files, which users may leave off when naming one
pub const JCAMP_EXTENSION: &str = "jdx";

/// Finds the JCAMP-DX file a user meant by `path`, trying it as written and then with a `.jdx` extension added
pub fn resolve_jcamp_path(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Some(path.to_owned());
    }

    let mut with_extension = path.as_os_str().to_owned();
    with_extension.push(".");
    with_extension.push(JCAMP_EXTENSION);
    let with_extension = PathBuf::from(with_extension);
    with_extension.is_file().then_some(with_extension)
}

/// Parses the molecular formula recorded in `spectrum`, which bounds every fragment the search can find
pub fn parent_formula<'a>(db: &'a AtomicDatabase, spectrum: &Spectrum) -> Result<ChemicalFormula<'a>> {
    let parent = ChemicalFormula::new(db, spectrum.molform())?;
    debug!(
        parent = %parent,
        average_mass = %parent.average_mass(),
        monoisotopic_mass = %parent.monoisotopic_mass(),
        "parsed parent formula"
    );
    Ok(parent)
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use indoc::formatdoc;

    use super::*;

    fn spectrum(molform: &str) -> Spectrum {
        let jdx = formatdoc! {"
            ##TITLE=Test
            ##MOLFORM={molform}
            ##PEAK TABLE=(XY..XY)
            12,999 16,500
            ##END=
        "};
        Spectrum::from_jcamp("test.jdx", &jdx).unwrap()
    }

    #[test]
    fn resolve_existing_files() {
        assert_eq!(
            resolve_jcamp_path("Cargo.toml"),
            Some(PathBuf::from("Cargo.toml"))
        );
        assert_eq!(resolve_jcamp_path("Cargo"), None);
        assert_eq!(resolve_jcamp_path("not-a-real-spectrum"), None);
        // Directories aren't spectra
        assert_eq!(resolve_jcamp_path("src"), None);
    }

    #[test]
    fn resolve_files_without_extensions() {
        let dir = env::temp_dir().join(format!("fragfinder-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let spectrum = dir.join("benzene.jdx");
        fs::write(&spectrum, "##TITLE=Benzene\n").unwrap();

        assert_eq!(resolve_jcamp_path(dir.join("benzene")), Some(spectrum.clone()));
        assert_eq!(resolve_jcamp_path(&spectrum), Some(spectrum.clone()));
        assert_eq!(resolve_jcamp_path(dir.join("toluene")), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn parse_parent_formulae() {
        let db = AtomicDatabase::default();
        let parent = parent_formula(&db, &spectrum("C6 H6")).unwrap();
        assert_eq!(parent.to_string(), "C6H6");
        assert_eq!(u64::from(parent.nominal_mass()), 78);
        assert_eq!(parent.monoisotopic_mass().to_string(), "78.04695019338");
    }

    #[test]
    fn report_invalid_parent_formulae() {
        let db = AtomicDatabase::default();
        let report = parent_formula(&db, &spectrum("C6H6X")).unwrap_err();
        assert_eq!(
            report.to_string(),
            r#"the element "X" could not be found in the supplied atomic database"#
        );
        let labels: Vec<_> = report.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].inner().offset(), 4);
        assert!(report.help().is_some());

        let report = parent_formula(&db, &spectrum("C6(H6")).unwrap_err();
        assert_eq!(report.to_string(), "expected ')' to close a group");
    }
}

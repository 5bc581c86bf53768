//! A reader for the labelled-data-record format of JCAMP-DX files, covering uncompressed `(XY..XY)` peak tables and
//! AFFN `(X++(Y..Y))` data tables

// Standard Library Imports
use std::{fs, path::Path};

// External Crate Imports
use miette::NamedSource;
use nom::{
    IResult, Offset,
    bytes::complete::{tag, take_till1, take_until, take_while},
    character::complete::char,
    combinator::rest,
    multi::many0,
    sequence::{pair, preceded, terminated},
};
use tracing::debug;

// Local Crate Imports
use crate::{Peak, Spectrum, errors::JcampError};

type Result<T, E = JcampError> = std::result::Result<T, E>;

// Public API ==========================================================================================================

impl Spectrum {
    /// Reads a JCAMP-DX file from disk
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| JcampError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_jcamp(path.display().to_string(), &text)
    }

    /// Parses the text of a JCAMP-DX file, with `name` used to label any errors
    pub fn from_jcamp(name: impl AsRef<str>, text: &str) -> Result<Self> {
        let source = Source {
            name: name.as_ref(),
            text,
        };
        let records = records(text);
        debug!(records = records.len(), file = source.name, "read JCAMP-DX records");

        let molform = value(&records, "MOLFORM")
            .filter(|molform| !molform.is_empty())
            .ok_or(JcampError::MissingMolform)?
            .to_owned();
        let peaks = source.peaks(&records)?;

        Ok(Self {
            title: value(&records, "TITLE").unwrap_or_default().to_owned(),
            x_units: value(&records, "XUNITS").unwrap_or_default().to_owned(),
            y_units: value(&records, "YUNITS").unwrap_or_default().to_owned(),
            molform,
            peaks,
        })
    }
}

// Labelled Data Records ===============================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
struct Record<'t> {
    label: String,
    value: &'t str,
    data: Vec<&'t str>,
}

// NOTE: Every `&str` in here is a slice of the original text, so `Offset` can recover its position for error labels
fn records(text: &str) -> Vec<Record<'_>> {
    let mut records: Vec<Record> = Vec::new();
    for line in text.lines().map(strip_comment) {
        if let Ok((_, (label, value))) = labelled_data_record(line) {
            let label = normalise_label(label);
            let end = label == "END";
            records.push(Record {
                label,
                value: value.trim(),
                data: Vec::new(),
            });
            if end {
                break;
            }
        } else if let Some(record) = records.last_mut() {
            if !line.trim().is_empty() {
                record.data.push(line);
            }
        }
    }
    records
}

/// Labelled Data Record = "##" , Label , "=" , Value ;
fn labelled_data_record(i: &str) -> IResult<&str, (&str, &str)> {
    pair(preceded(tag("##"), take_until("=")), preceded(char('='), rest))(i)
}

fn strip_comment(line: &str) -> &str {
    line.split_once("$$").map_or(line, |(kept, _)| kept)
}

// Labels are compared without case, spaces, dashes, slashes, or underscores: `##PEAK TABLE=` is `##PEAKTABLE=`
fn normalise_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '/' | '_'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn record<'r, 't>(records: &'r [Record<'t>], label: &str) -> Option<&'r Record<'t>> {
    records.iter().find(|r| r.label == label)
}

fn value<'t>(records: &[Record<'t>], label: &str) -> Option<&'t str> {
    record(records, label).map(|r| r.value)
}

// Numeric Data ========================================================================================================

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

fn separators(i: &str) -> IResult<&str, &str> {
    take_while(is_separator)(i)
}

/// Values = { separator } , { value , { separator } } ;
fn values(line: &str) -> Vec<&str> {
    let mut parser = preceded(separators, many0(terminated(take_till1(is_separator), separators)));
    parser(line).map_or_else(|_| Vec::new(), |(_, values)| values)
}

struct Source<'t> {
    name: &'t str,
    text: &'t str,
}

impl<'t> Source<'t> {
    fn peaks(&self, records: &[Record<'t>]) -> Result<Vec<Peak>> {
        let x_factor = self.factor(records, "XFACTOR")?;
        let y_factor = self.factor(records, "YFACTOR")?;
        let table = records
            .iter()
            .find(|r| matches!(r.label.as_str(), "PEAKTABLE" | "XYPOINTS" | "XYDATA"))
            .ok_or(JcampError::MissingPeaks)?;

        let format: String = table.value.chars().filter(|c| !c.is_whitespace()).collect();
        let peaks = match format.as_str() {
            "(XY..XY)" => self.xy_pairs(&table.data, x_factor, y_factor)?,
            "(X++(Y..Y))" => self.xy_data(records, &table.data, x_factor, y_factor)?,
            _ => return Err(self.unsupported_table(table.value)),
        };
        debug!(peaks = peaks.len(), table = %format, "parsed peak table");
        Ok(peaks)
    }

    fn xy_pairs(&self, lines: &[&'t str], x_factor: f64, y_factor: f64) -> Result<Vec<Peak>> {
        let values: Vec<_> = lines.iter().flat_map(|line| values(line)).collect();
        values
            .chunks(2)
            .map(|pair| {
                let &[x, y] = pair else {
                    return Err(self.unpaired_value(pair[0]));
                };
                Ok(Peak::new(
                    self.number(x)? * x_factor,
                    self.number(y)? * y_factor,
                ))
            })
            .collect()
    }

    fn xy_data(
        &self,
        records: &[Record<'t>],
        lines: &[&'t str],
        x_factor: f64,
        y_factor: f64,
    ) -> Result<Vec<Peak>> {
        let first_x = self.required(records, "FIRSTX")?;
        let last_x = self.required(records, "LASTX")?;
        let n_points = self.required(records, "NPOINTS")?;
        let delta_x = if n_points > 1.0 {
            (last_x - first_x) / (n_points - 1.0)
        } else {
            0.0
        };

        let mut peaks = Vec::new();
        for line in lines {
            let mut values = values(line).into_iter();
            let Some(x) = values.next() else {
                continue;
            };
            let x = self.number(x)? * x_factor;
            for (step, y) in values.enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let mz = delta_x.mul_add(step as f64, x);
                peaks.push(Peak::new(mz, self.number(y)? * y_factor));
            }
        }
        Ok(peaks)
    }

    fn factor(&self, records: &[Record<'t>], label: &str) -> Result<f64> {
        record(records, label).map_or(Ok(1.0), |r| self.number(r.value))
    }

    fn required(&self, records: &[Record<'t>], label: &'static str) -> Result<f64> {
        let record = record(records, label).ok_or(JcampError::MissingHeader(label))?;
        self.number(record.value)
    }

    fn number(&self, value: &'t str) -> Result<f64> {
        value.parse().map_err(|_| {
            let (src, span, line) = self.locate(value);
            JcampError::InvalidNumber {
                value: value.to_owned(),
                src,
                span,
                line,
            }
        })
    }

    fn unpaired_value(&self, value: &'t str) -> JcampError {
        let (src, span, _) = self.locate(value);
        JcampError::UnpairedValue {
            value: value.to_owned(),
            src,
            span,
        }
    }

    fn unsupported_table(&self, table: &'t str) -> JcampError {
        let (src, span, line) = self.locate(table);
        JcampError::UnsupportedTable {
            table: table.to_owned(),
            src,
            span,
            line,
        }
    }

    fn locate(&self, fragment: &'t str) -> (NamedSource, miette::SourceSpan, usize) {
        let start = self.text.offset(fragment);
        let line = self.text[..start].lines().count().max(1);
        let line = if self.text[..start].ends_with('\n') {
            line + 1
        } else {
            line
        };
        let src = NamedSource::new(self.name, self.text.to_owned());
        (src, (start, fragment.len()).into(), line)
    }
}

// Module Tests ========================================================================================================

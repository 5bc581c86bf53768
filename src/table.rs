use std::fmt::{self, Display, Formatter};

const HEADERS: [&str; 2] = ["Possible molecule", "Fragment"];

/// A box-drawn grid of fragments and their masses, with columns sized to fit their contents
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct FragmentTable {
    rows: Vec<[String; 2]>,
}

impl FragmentTable {
    pub fn new<F: Display, M: Display>(rows: impl IntoIterator<Item = (F, M)>) -> Self {
        let rows = rows
            .into_iter()
            .map(|(formula, mass)| [formula.to_string(), mass.to_string()])
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> [usize; 2] {
        [0, 1].map(|column| {
            self.rows
                .iter()
                .map(|row| row[column].chars().count())
                .fold(HEADERS[column].len(), usize::max)
        })
    }
}

impl Display for FragmentTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_rule(f, widths, ['╒', '╤', '╕'], '═')?;
        write_row(f, widths, HEADERS)?;
        if !self.rows.is_empty() {
            write_rule(f, widths, ['╞', '╪', '╡'], '═')?;
        }
        for (i, [formula, mass]) in self.rows.iter().enumerate() {
            if i > 0 {
                write_rule(f, widths, ['├', '┼', '┤'], '─')?;
            }
            write_row(f, widths, [formula.as_str(), mass.as_str()])?;
        }
        write_rule(f, widths, ['╘', '╧', '╛'], '═')
    }
}

fn write_rule(
    f: &mut Formatter<'_>,
    [left_width, right_width]: [usize; 2],
    [start, middle, end]: [char; 3],
    line: char,
) -> fmt::Result {
    let left = line.to_string().repeat(left_width + 2);
    let right = line.to_string().repeat(right_width + 2);
    writeln!(f, "{start}{left}{middle}{right}{end}")
}

// NOTE: Formulae are left-aligned and masses right-aligned
fn write_row(
    f: &mut Formatter<'_>,
    [left_width, right_width]: [usize; 2],
    [formula, mass]: [&str; 2],
) -> fmt::Result {
    writeln!(f, "│ {formula:<left_width$} │ {mass:>right_width$} │")
}

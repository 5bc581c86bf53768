use miette::Diagnostic;

// NOTE: Rendering the full graphical report is fragile to snapshot, so this collapses a diagnostic into a single line
// containing the message, every labelled span, and the help text
pub fn diagnostic_summary<D: Diagnostic + ?Sized>(diagnostic: &D) -> String {
    let mut summary = diagnostic.to_string();
    for label in diagnostic.labels().into_iter().flatten() {
        let span = label.inner();
        let end = span.offset() + span.len();
        let text = label.label().unwrap_or_default();
        summary.push_str(&format!(" | {}..{end}: {text}", span.offset()));
    }
    if let Some(help) = diagnostic.help() {
        summary.push_str(&format!(" | help: {help}"));
    }
    summary
}

macro_rules! assert_miette_snapshot {
    ($diag:expr, @$snapshot:literal) => {{
        let error = $diag.unwrap_err();
        insta::assert_snapshot!(
            crate::testing_tools::diagnostic_summary(&error),
            @$snapshot
        );
    }};
}

pub(crate) use assert_miette_snapshot;

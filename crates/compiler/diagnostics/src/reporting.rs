//! # Diagnostic Reporting
//!
//! Rendering of diagnostics for terminals: a plain summary in discovery order, and
//! `ariadne` reports when the source text of the checked file is at hand.

use std::fmt::Write as _;
use std::ops::Range;

use ariadne::{Label, Report, ReportKind, Source};

use crate::{Diagnostic, DiagnosticCollection};

/// Byte range of a 1-based source line, without its line terminator.
///
/// Lines past the end of the source map to the empty range at offset 0.
fn line_range(source: &str, line: u32) -> Range<usize> {
    let Some(index) = (line as usize).checked_sub(1) else {
        return 0..0;
    };
    let mut start = 0;
    for (current, text) in source.split_inclusive('\n').enumerate() {
        if current == index {
            let content = text.trim_end_matches(['\n', '\r']);
            return start..start + content.len();
        }
        start += text.len();
    }
    0..0
}

/// Build a formatted message for a diagnostic, pointing at its source line
pub fn build_diagnostic_message(source: &str, diagnostic: &Diagnostic, with_color: bool) -> String {
    let mut write_buffer = Vec::new();
    let code_u32: u32 = diagnostic.code.into();
    let range = line_range(source, diagnostic.line);
    let written = Report::build(ReportKind::Error, ((), range.clone()))
        .with_config(
            ariadne::Config::new()
                .with_index_type(ariadne::IndexType::Byte)
                .with_color(with_color),
        )
        .with_code(code_u32)
        .with_message(format!("{} error: {}", diagnostic.kind, diagnostic.message))
        .with_label(Label::new(((), range)).with_message(&diagnostic.message))
        .finish()
        .write(Source::from(source), &mut write_buffer);

    match written {
        Ok(()) => String::from_utf8_lossy(&write_buffer).to_string(),
        Err(_) => diagnostic.to_string(),
    }
}

/// Render the end-of-run summary for one checked file.
///
/// The first line states the outcome, the second the number of diagnostics, followed
/// by one line per diagnostic in the order they were reported.
pub fn render_summary(diagnostics: &DiagnosticCollection, file_name: &str) -> String {
    let mut out = String::new();
    let outcome = if diagnostics.has_errors() {
        "failed"
    } else {
        "successful"
    };
    let _ = writeln!(out, "Semantic analysis {outcome}");
    let _ = writeln!(
        out,
        "There were: {} errors in {file_name}",
        diagnostics.len()
    );
    for diagnostic in diagnostics {
        let _ = writeln!(out, "{diagnostic}");
    }
    out
}

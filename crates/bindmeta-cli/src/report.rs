//! Diagnostic rendering
//!
//! Uses ariadne when the declaration's source file can be read next to the
//! model, and plain lines otherwise.

use ariadne::{Color, Label, Report, ReportKind, Source};
use bindmeta_checker::{Diagnostic, Severity};
use std::fs;
use std::path::Path;

/// Print diagnostics to stderr; `base` is the directory source paths are relative to
pub fn print_diagnostics(diagnostics: &[Diagnostic], base: &Path) {
    for diagnostic in diagnostics {
        if !print_with_source(diagnostic, base) {
            eprint!("{}", diagnostic.format_simple());
        }
    }
}

/// Returns false when the source is unavailable or the span does not fit it
fn print_with_source(diagnostic: &Diagnostic, base: &Path) -> bool {
    let Some(file) = diagnostic.location.file.as_deref() else {
        return false;
    };
    let span = diagnostic.location.span;
    if span.is_dummy() {
        return false;
    }
    let Ok(source) = fs::read_to_string(base.join(file)) else {
        return false;
    };
    if span.end > source.len() || span.start > span.end {
        return false;
    }

    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };

    let id = file.to_string();
    let mut report = Report::build(kind, id.clone(), span.start)
        .with_code(&diagnostic.code)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((id.clone(), span.range()))
                .with_message(&diagnostic.declaration)
                .with_color(color),
        );
    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish().eprint((id, Source::from(source))).is_ok()
}

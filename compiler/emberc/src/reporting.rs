//! Error rendering with ariadne.
//!
//! Parse errors and evaluation errors that carry a span are drawn against
//! the source file; everything else is a single `error:` line.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use ember_eval::EvalError;
use ember_ir::Span;

use crate::CliError;

/// One labeled report against a source file.
struct SourceReport<'a> {
    path: &'a str,
    text: &'a str,
    code: Option<&'static str>,
    message: String,
    span: Span,
    label: String,
    note: Option<String>,
}

/// Render `err` to stderr, colored when stderr is a terminal.
pub fn report(err: &CliError) {
    let color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    render(err, &mut io::stderr().lock(), color).ok();
}

/// Render `err` without color codes.
pub fn render_to_string(err: &CliError) -> String {
    let mut buf = Vec::new();
    render(err, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn render(err: &CliError, writer: &mut dyn Write, color: bool) -> io::Result<()> {
    match err {
        CliError::Parse { path, text, errors } => {
            for error in errors {
                write_report(
                    &SourceReport {
                        path,
                        text,
                        code: None,
                        message: "syntax error".to_string(),
                        span: error.span,
                        label: error.to_string(),
                        note: None,
                    },
                    writer,
                    color,
                )?;
            }
            Ok(())
        }
        CliError::Eval { path, text, error } => render_eval_error(path, text, error, writer, color),
        other => writeln!(writer, "error: {other}"),
    }
}

fn render_eval_error(
    path: &str,
    text: &str,
    error: &EvalError,
    writer: &mut dyn Write,
    color: bool,
) -> io::Result<()> {
    let note = error
        .backtrace
        .as_ref()
        .filter(|backtrace| !backtrace.is_empty())
        .map(ToString::to_string);
    let Some(span) = error.span else {
        writeln!(writer, "error[{}]: {error}", error.code())?;
        if let Some(note) = note {
            write!(writer, "{note}")?;
        }
        return Ok(());
    };
    write_report(
        &SourceReport {
            path,
            text,
            code: Some(error.code()),
            message: error.to_string(),
            span,
            label: error.kind.to_string(),
            note,
        },
        writer,
        color,
    )
}

fn write_report(report: &SourceReport<'_>, writer: &mut dyn Write, color: bool) -> io::Result<()> {
    let range = char_range(report.text, report.span);
    let mut builder = Report::build(ReportKind::Error, report.path, range.start)
        .with_config(Config::default().with_color(color))
        .with_message(&report.message)
        .with_label(
            Label::new((report.path, range))
                .with_message(&report.label)
                .with_color(Color::Red),
        );
    if let Some(code) = report.code {
        builder = builder.with_code(code);
    }
    if let Some(note) = &report.note {
        builder = builder.with_note(note.trim_end());
    }
    builder
        .finish()
        .write((report.path, Source::from(report.text)), &mut *writer)
}

/// Convert a byte span into the char offsets ariadne expects, clamped to
/// the source.
fn char_range(text: &str, span: Span) -> Range<usize> {
    let to_chars = |byte: usize| {
        let byte = byte.min(text.len());
        text.get(..byte)
            .map_or(byte, |prefix| prefix.chars().count())
    };
    let start = to_chars(span.start as usize);
    let end = to_chars(span.end as usize).max(start);
    start..end
}

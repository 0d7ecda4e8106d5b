use crate::{COLOR_RED, COLOR_RESET};
use ariadne::{Color, Label, Report, ReportKind};
use epilog::epilog_parser::ReadStage;
use epilog::{LoadError, ReadError};

/// Render a reader error against the text it came from.
pub fn render_read_error(name: &str, text: &str, err: &ReadError) -> String {
    let end = text.chars().count();
    let start = err.span.start.min(end);
    let span = start..err.span.end.clamp(start, end);

    let report = Report::build(ReportKind::Error, name.to_string(), start)
        .with_message(match err.stage {
            ReadStage::Lex => "Unreadable character",
            ReadStage::Parse => "Unreadable sentence",
        })
        .with_label(
            Label::new((name.to_string(), span))
                .with_message(&err.message)
                .with_color(Color::Red),
        )
        .finish();

    let mut output = Vec::new();
    match report.write(ariadne::sources([(name.to_string(), text.to_string())]), &mut output) {
        Ok(()) => String::from_utf8_lossy(&output).into_owned(),
        Err(_) => format!("{}\n", err),
    }
}

/// Print a load failure to stderr.
pub fn print_load_error(name: &str, text: Option<&str>, err: &LoadError) {
    eprintln!("{}error:{} Failed to load '{}'", COLOR_RED, COLOR_RESET, name);
    match (err.read_error(), text) {
        (Some(read_error), Some(text)) => eprint!("{}", render_read_error(name, text, read_error)),
        _ => eprintln!("  {}", err),
    }
}

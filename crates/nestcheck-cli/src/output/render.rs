//! Human-readable rendering of check results.

use std::io::{self, Write};

use nestcheck_syntax::Diagnostic;
use unicode_width::UnicodeWidthChar;

use crate::check::CheckedFile;

const CONTEXT_LINES: usize = 1;

/// Writes the header, verdict and one excerpt per diagnostic.
pub(super) fn render_report<W: Write>(
    output: &mut W,
    path: &str,
    checked: &CheckedFile,
) -> io::Result<()> {
    writeln!(output, "{path} ({})", checked.profile)?;
    if checked.verdict.is_balanced() {
        return writeln!(output, "Balanced");
    }
    writeln!(output, "Unbalanced")?;
    let lines: Vec<&str> = checked
        .text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    for diagnostic in checked.verdict.diagnostics() {
        writeln!(output, "{diagnostic}")?;
        render_excerpt(output, path, &lines, diagnostic)?;
    }
    Ok(())
}

fn render_excerpt<W: Write>(
    output: &mut W,
    path: &str,
    lines: &[&str],
    diagnostic: &Diagnostic,
) -> io::Result<()> {
    let position = diagnostic.position;
    writeln!(output, "  --> {path}:{}:{}", position.line, position.column)?;

    let target = usize::try_from(position.line).unwrap_or(usize::MAX);
    let start = target.saturating_sub(CONTEXT_LINES).max(1);
    let end = target.saturating_add(CONTEXT_LINES).min(lines.len());
    let width = end.to_string().len();

    writeln!(output, "{:>width$} |", "")?;
    for (number, text) in lines
        .iter()
        .enumerate()
        .map(|(index, text)| (index + 1, *text))
        .skip(start - 1)
        .take_while(|(number, _)| *number <= end)
    {
        if text.is_empty() {
            writeln!(output, "{number:>width$} |")?;
        } else {
            writeln!(output, "{number:>width$} | {text}")?;
        }
        if number == target {
            let caret = caret_padding(text, position.column);
            writeln!(
                output,
                "{:>width$} | {caret}^ {}",
                "",
                diagnostic.kind.as_str()
            )?;
        }
    }
    Ok(())
}

/// Whitespace that lines a caret up under `column` on a terminal.
///
/// Tabs are copied so they expand the same way as in the excerpt above.
fn caret_padding(text: &str, column: u32) -> String {
    let before = usize::try_from(column.saturating_sub(1)).unwrap_or(usize::MAX);
    let mut padding = String::new();
    for ch in text.chars().take(before) {
        if ch == '\t' {
            padding.push('\t');
        } else {
            padding.extend(std::iter::repeat_n(' ', ch.width().unwrap_or(0)));
        }
    }
    padding
}

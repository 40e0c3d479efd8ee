//! JSON lines output.

use std::io::Write;

use nestcheck_syntax::{Diagnostic, ProfileRegistry};
use serde::Serialize;

use crate::check::CheckedFile;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
struct FileRecord<'a> {
    path: &'a str,
    profile: &'a str,
    verdict: &'static str,
    diagnostics: &'a [Diagnostic],
}

#[derive(Debug, Serialize)]
struct ProfileRecord<'a> {
    identifier: &'a str,
    aliases: &'a [String],
    extensions: &'a [String],
}

/// Writes one checked file as a single JSON line.
pub(super) fn write_record<W: Write>(
    output: &mut W,
    path: &str,
    checked: &CheckedFile,
) -> Result<(), AppError> {
    let record = FileRecord {
        path,
        profile: &checked.profile,
        verdict: if checked.verdict.is_balanced() {
            "balanced"
        } else {
            "unbalanced"
        },
        diagnostics: checked.verdict.diagnostics(),
    };
    serde_json::to_writer(&mut *output, &record)?;
    writeln!(output)?;
    Ok(())
}

/// Writes every registered profile as a JSON line.
pub(super) fn write_profiles<W: Write>(
    output: &mut W,
    registry: &ProfileRegistry,
) -> Result<(), AppError> {
    for entry in registry.profiles() {
        let record = ProfileRecord {
            identifier: entry.identifier,
            aliases: entry.aliases,
            extensions: entry.extensions,
        };
        serde_json::to_writer(&mut *output, &record)?;
        writeln!(output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use nestcheck_syntax::check;

    fn record_for(text: &str) -> String {
        let checked = CheckedFile {
            profile: String::from("c"),
            text: text.to_owned(),
            verdict: check(text, "c").unwrap_or_else(|err| panic!("check: {err}")),
        };
        let mut buffer = Vec::new();
        write_record(&mut buffer, "main.c", &checked)
            .unwrap_or_else(|err| panic!("write record: {err}"));
        String::from_utf8(buffer).unwrap_or_else(|err| panic!("utf8: {err}"))
    }

    #[test]
    fn balanced_record_has_empty_diagnostics() {
        assert_eq!(
            record_for("f(x);"),
            "{\"path\":\"main.c\",\"profile\":\"c\",\"verdict\":\"balanced\",\"diagnostics\":[]}\n"
        );
    }

    #[test]
    fn unbalanced_record_carries_structured_diagnostics() {
        assert_snapshot!(record_for(")").trim_end(), @r#"{"path":"main.c","profile":"c","verdict":"unbalanced","diagnostics":[{"kind":"unmatched","position":{"offset":0,"line":1,"column":1},"detail":{"reason":"unexpected_closer","found":")","kind":"paren"}}]}"#);
    }
}

//! Profiles predefined for common language families.
//!
//! Every profile here checks `()`, `{}` and `[]` as `paren`, `brace` and
//! `bracket`. [`register_all`] installs them, with their aliases and file
//! extensions, into a registry builder.

use crate::error::SyntaxError;
use crate::profile::{
    BlockCommentRule, BlockStringRule, CharLiteralRule, LanguageProfile, StringRule,
};
use crate::registry::ProfileRegistryBuilder;

fn c_family(name: &str) -> Result<LanguageProfile, SyntaxError> {
    LanguageProfile::builder(name)
        .line_comment("//")
        .block_comment(BlockCommentRule::new("/*", "*/"))
        .string(StringRule::new('"').with_escape('\\'))
        .char_literal(CharLiteralRule::new('\'').with_escape('\\'))
        .standard_brackets()
        .build()
}

/// C: `//` and `/* */` comments, `"` strings, `'` characters.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn c() -> Result<LanguageProfile, SyntaxError> {
    c_family("c")
}

/// C++, lexically identical to C for bracket purposes.
///
/// Raw string literals (`R"(...)"`) are not recognised.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn cpp() -> Result<LanguageProfile, SyntaxError> {
    c_family("cpp")
}

/// Java.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn java() -> Result<LanguageProfile, SyntaxError> {
    c_family("java")
}

/// C#.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn csharp() -> Result<LanguageProfile, SyntaxError> {
    c_family("csharp")
}

/// JavaScript and TypeScript: three string delimiters, backtick templates may
/// span lines. There is no character literal.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn javascript() -> Result<LanguageProfile, SyntaxError> {
    LanguageProfile::builder("javascript")
        .line_comment("//")
        .block_comment(BlockCommentRule::new("/*", "*/"))
        .string(StringRule::new('"').with_escape('\\'))
        .string(StringRule::new('\'').with_escape('\\'))
        .string(StringRule::new('`').with_escape('\\').multiline())
        .standard_brackets()
        .build()
}

/// Go: backtick raw strings span lines and have no escapes; `'` delimits runes.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn go() -> Result<LanguageProfile, SyntaxError> {
    LanguageProfile::builder("go")
        .line_comment("//")
        .block_comment(BlockCommentRule::new("/*", "*/"))
        .string(StringRule::new('"').with_escape('\\'))
        .string(StringRule::new('`').multiline())
        .char_literal(CharLiteralRule::new('\'').with_escape('\\'))
        .standard_brackets()
        .build()
}

/// Rust: nestable block comments, multi-line strings, and single-unit
/// character literals so lifetimes such as `'a` stay code.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn rust() -> Result<LanguageProfile, SyntaxError> {
    LanguageProfile::builder("rust")
        .line_comment("//")
        .block_comment(BlockCommentRule::new("/*", "*/").nestable())
        .string(StringRule::new('"').with_escape('\\').multiline())
        .char_literal(CharLiteralRule::new('\'').with_escape('\\').single_unit())
        .standard_brackets()
        .build()
}

/// Python: `#` comments, `'`/`"` strings and triple-quoted block strings.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidProfile`] if the definition fails validation.
pub fn python() -> Result<LanguageProfile, SyntaxError> {
    LanguageProfile::builder("python")
        .line_comment("#")
        .block_string(BlockStringRule::new("\"\"\"", "\"\"\"").with_escape('\\'))
        .block_string(BlockStringRule::new("'''", "'''").with_escape('\\'))
        .string(StringRule::new('"').with_escape('\\'))
        .string(StringRule::new('\'').with_escape('\\'))
        .standard_brackets()
        .build()
}

/// Registers every predefined profile with its aliases and extensions.
///
/// # Errors
///
/// Returns an error if a predefined profile fails validation or clashes with
/// an identifier already present in `builder`.
pub fn register_all(builder: &mut ProfileRegistryBuilder) -> Result<(), SyntaxError> {
    builder.register("c", c()?)?.extensions(["c", "h"])?;
    builder
        .register("cpp", cpp()?)?
        .alias("c++")?
        .alias("cxx")?
        .extensions(["cc", "cpp", "cxx", "hpp", "hh", "hxx"])?;
    builder.register("java", java()?)?.extensions(["java"])?;
    builder
        .register("javascript", javascript()?)?
        .alias("js")?
        .alias("typescript")?
        .alias("ts")?
        .extensions(["js", "mjs", "cjs", "jsx", "ts", "tsx", "mts", "cts"])?;
    builder
        .register("csharp", csharp()?)?
        .alias("cs")?
        .alias("c#")?
        .extensions(["cs"])?;
    builder
        .register("go", go()?)?
        .alias("golang")?
        .extensions(["go"])?;
    builder
        .register("rust", rust()?)?
        .alias("rs")?
        .extensions(["rs"])?;
    builder
        .register("python", python()?)?
        .alias("py")?
        .extensions(["py", "pyi"])?;
    Ok(())
}

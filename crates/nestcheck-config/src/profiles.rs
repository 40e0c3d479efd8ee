//! User-defined language profiles loaded from JSON.
//!
//! The file holds a list of profile definitions:
//!
//! ```json
//! [
//!   {
//!     "name": "lua",
//!     "aliases": ["luajit"],
//!     "extensions": ["lua"],
//!     "line_comments": ["--"],
//!     "block_comments": [{ "open": "--[[", "close": "]]" }],
//!     "block_strings": [{ "open": "[[", "close": "]]" }],
//!     "strings": [{ "delimiter": "\"", "escape": "\\" }],
//!     "brackets": [{ "open": "(", "close": ")", "kind": "paren" }]
//!   }
//! ]
//! ```
//!
//! Definitions are validated by the same builder as the predefined profiles
//! and registered after them, so a definition may claim an extension that a
//! predefined profile already maps.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use nestcheck_syntax::{
    BlockCommentRule, BlockStringRule, CharLiteralRule, LanguageProfile, MarkerPrecedence, ProfileRegistry,
    ProfileRegistryBuilder, StringRule, SyntaxError,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading profile definitions.
#[derive(Debug, Error)]
pub enum ProfileFileError {
    /// The definitions file could not be read.
    #[error("failed to read profile definitions '{path}': {source}")]
    Read {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The definitions file is not valid JSON for the expected shape.
    #[error("failed to parse profile definitions '{path}': {source}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A definition was rejected or clashed with a registered identifier.
    #[error("invalid profile definitions '{path}': {source}")]
    Invalid {
        /// File holding the rejected definition.
        path: Utf8PathBuf,
        /// Validation failure naming the profile.
        #[source]
        source: SyntaxError,
    },
}

/// Marker precedence as written in definition files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecedenceDefinition {
    /// Longest opener wins.
    #[default]
    LongestMatch,
    /// First declared opener wins.
    DeclarationOrder,
}

impl From<PrecedenceDefinition> for MarkerPrecedence {
    fn from(value: PrecedenceDefinition) -> Self {
        match value {
            PrecedenceDefinition::LongestMatch => Self::LongestMatch,
            PrecedenceDefinition::DeclarationOrder => Self::DeclarationOrder,
        }
    }
}

/// Block comment markers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockCommentDefinition {
    /// Opening marker.
    pub open: String,
    /// Closing marker.
    pub close: String,
    /// Whether nested comments are counted.
    #[serde(default)]
    pub nestable: bool,
}

/// Multi-line string markers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockStringDefinition {
    /// Opening marker.
    pub open: String,
    /// Closing marker.
    pub close: String,
    /// Escape character.
    #[serde(default)]
    pub escape: Option<char>,
}

/// String literal delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringDefinition {
    /// Opening and closing character.
    pub delimiter: char,
    /// Escape character.
    #[serde(default)]
    pub escape: Option<char>,
    /// Whether the literal may span lines.
    #[serde(default)]
    pub multiline: bool,
}

/// Character literal delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharLiteralDefinition {
    /// Opening and closing character.
    pub delimiter: char,
    /// Escape character.
    #[serde(default)]
    pub escape: Option<char>,
    /// Whether the literal holds exactly one character or escape.
    #[serde(default)]
    pub single_unit: bool,
}

/// One bracket pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BracketDefinition {
    /// Opening character.
    pub open: char,
    /// Closing character.
    pub close: char,
    /// Kind label.
    pub kind: String,
}

/// One language profile as written in a definitions file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDefinition {
    /// Registry identifier and profile name.
    pub name: String,
    /// Alternative identifiers.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// File extensions mapped to the profile.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Line comment markers.
    #[serde(default)]
    pub line_comments: Vec<String>,
    /// Block comment rules.
    #[serde(default)]
    pub block_comments: Vec<BlockCommentDefinition>,
    /// Block string rules.
    #[serde(default)]
    pub block_strings: Vec<BlockStringDefinition>,
    /// String literal rules.
    #[serde(default)]
    pub strings: Vec<StringDefinition>,
    /// Character literal rule.
    #[serde(default)]
    pub char_literal: Option<CharLiteralDefinition>,
    /// Bracket pairs.
    pub brackets: Vec<BracketDefinition>,
    /// Marker precedence.
    #[serde(default)]
    pub precedence: PrecedenceDefinition,
}

impl ProfileDefinition {
    /// Builds and validates the profile.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidProfile`] when the definition is
    /// ambiguous.
    pub fn to_profile(&self) -> Result<LanguageProfile, SyntaxError> {
        let mut builder =
            LanguageProfile::builder(self.name.as_str()).precedence(self.precedence.into());
        for marker in &self.line_comments {
            builder = builder.line_comment(marker.as_str());
        }
        for comment in &self.block_comments {
            let mut rule = BlockCommentRule::new(comment.open.as_str(), comment.close.as_str());
            if comment.nestable {
                rule = rule.nestable();
            }
            builder = builder.block_comment(rule);
        }
        for block in &self.block_strings {
            let mut rule = BlockStringRule::new(block.open.as_str(), block.close.as_str());
            if let Some(escape) = block.escape {
                rule = rule.with_escape(escape);
            }
            builder = builder.block_string(rule);
        }
        for string in &self.strings {
            let mut rule = StringRule::new(string.delimiter);
            if let Some(escape) = string.escape {
                rule = rule.with_escape(escape);
            }
            if string.multiline {
                rule = rule.multiline();
            }
            builder = builder.string(rule);
        }
        if let Some(literal) = &self.char_literal {
            let mut rule = CharLiteralRule::new(literal.delimiter);
            if let Some(escape) = literal.escape {
                rule = rule.with_escape(escape);
            }
            if literal.single_unit {
                rule = rule.single_unit();
            }
            builder = builder.char_literal(rule);
        }
        for bracket in &self.brackets {
            builder = builder.bracket(bracket.open, bracket.close, bracket.kind.as_str());
        }
        builder.build()
    }
}

/// Parses definitions from JSON text.
///
/// # Errors
///
/// Returns the JSON error when the text does not describe a list of
/// definitions.
pub fn parse_definitions(text: &str) -> Result<Vec<ProfileDefinition>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Registers `definitions` on top of `builder`.
///
/// A definition whose name or alias is already taken is rejected before its
/// rules are validated.
///
/// # Errors
///
/// Returns the first validation or registration failure.
pub fn register_definitions(
    builder: &mut ProfileRegistryBuilder,
    definitions: &[ProfileDefinition],
) -> Result<(), SyntaxError> {
    for definition in definitions {
        if let Some(taken) = std::iter::once(&definition.name)
            .chain(&definition.aliases)
            .find(|identifier| builder.contains(identifier))
        {
            return Err(SyntaxError::duplicate_profile(taken.trim().to_lowercase()));
        }
        let profile = definition.to_profile()?;
        definition
            .aliases
            .iter()
            .try_fold(
                builder.register(definition.name.as_str(), profile)?,
                |registration, alias| registration.alias(alias),
            )?
            .extensions(definition.extensions.iter().map(String::as_str))?;
        debug!(profile = %definition.name, "registered user profile");
    }
    Ok(())
}

/// Loads a registry holding the predefined profiles plus those in `path`.
///
/// # Errors
///
/// Returns [`ProfileFileError`] when the file cannot be read or parsed, or
/// when a definition is invalid.
pub fn load_registry(path: &Utf8Path) -> Result<ProfileRegistry, ProfileFileError> {
    let text = fs::read_to_string(path).map_err(|source| ProfileFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let definitions = parse_definitions(&text).map_err(|source| ProfileFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let invalid = |source: SyntaxError| {
        warn!(%path, error = %source, "rejected profile definitions");
        ProfileFileError::Invalid {
            path: path.to_path_buf(),
            source,
        }
    };
    let mut builder = ProfileRegistryBuilder::with_builtin_profiles().map_err(invalid)?;
    register_definitions(&mut builder, &definitions).map_err(invalid)?;
    Ok(builder.build())
}

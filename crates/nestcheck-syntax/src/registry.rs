//! Lookup of language profiles by identifier, alias and file extension.
//!
//! Registration happens on a [`ProfileRegistryBuilder`]; [`ProfileRegistryBuilder::build`]
//! freezes it into an immutable [`ProfileRegistry`] that can be shared
//! across threads without locking. Identifiers, aliases and extensions are
//! matched case-insensitively after trimming whitespace.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::builtin;
use crate::error::SyntaxError;
use crate::profile::LanguageProfile;

static BUILTIN: OnceCell<ProfileRegistry> = OnceCell::new();

#[derive(Debug, Clone)]
struct Entry {
    identifier: String,
    aliases: Vec<String>,
    extensions: Vec<String>,
    profile: LanguageProfile,
}

/// Borrowed view of one registered profile.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredProfile<'r> {
    /// Canonical identifier.
    pub identifier: &'r str,
    /// Alternative identifiers.
    pub aliases: &'r [String],
    /// File extensions mapped to this profile, without the leading dot.
    pub extensions: &'r [String],
    /// The profile itself.
    pub profile: &'r LanguageProfile,
}

impl<'r> From<&'r Entry> for RegisteredProfile<'r> {
    fn from(entry: &'r Entry) -> Self {
        Self {
            identifier: &entry.identifier,
            aliases: &entry.aliases,
            extensions: &entry.extensions,
            profile: &entry.profile,
        }
    }
}

fn normalise(key: &str) -> String {
    key.trim().to_lowercase()
}

fn normalise_extension(extension: &str) -> String {
    normalise(extension.trim().trim_start_matches('.'))
}

/// Mutable registry used while profiles are being registered.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistryBuilder {
    entries: Vec<Entry>,
    names: HashMap<String, usize>,
    extensions: HashMap<String, usize>,
}

impl ProfileRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-populated with the predefined profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if a predefined profile fails validation.
    pub fn with_builtin_profiles() -> Result<Self, SyntaxError> {
        let mut builder = Self::new();
        builtin::register_all(&mut builder)?;
        Ok(builder)
    }

    /// Registers `profile` under `identifier`.
    ///
    /// The returned handle attaches aliases and extensions to the new entry.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::DuplicateProfile`] if the identifier is already
    /// taken by an identifier or alias, and [`SyntaxError::InvalidProfile`]
    /// if it is blank.
    pub fn register(
        &mut self,
        identifier: &str,
        profile: LanguageProfile,
    ) -> Result<Registration<'_>, SyntaxError> {
        let key = normalise(identifier);
        if key.is_empty() {
            return Err(SyntaxError::invalid_profile(
                profile.name(),
                "registry identifier is empty",
            ));
        }
        if self.names.contains_key(&key) {
            return Err(SyntaxError::duplicate_profile(key));
        }
        let index = self.entries.len();
        self.names.insert(key.clone(), index);
        self.entries.push(Entry {
            identifier: key,
            aliases: Vec::new(),
            extensions: Vec::new(),
            profile,
        });
        Ok(Registration {
            builder: self,
            index,
        })
    }

    /// Returns whether `identifier` resolves to a registered entry.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.names.contains_key(&normalise(identifier))
    }

    /// Freezes the builder into a shareable registry.
    #[must_use]
    pub fn build(self) -> ProfileRegistry {
        debug!(
            profiles = self.entries.len(),
            extensions = self.extensions.len(),
            "profile registry built"
        );
        ProfileRegistry {
            entries: self.entries,
            names: self.names,
            extensions: self.extensions,
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut Entry, SyntaxError> {
        self.entries
            .get_mut(index)
            .ok_or_else(|| SyntaxError::internal_error(format!("no registry entry {index}")))
    }
}

/// Handle for attaching aliases and extensions to a fresh registration.
#[derive(Debug)]
pub struct Registration<'b> {
    builder: &'b mut ProfileRegistryBuilder,
    index: usize,
}

impl Registration<'_> {
    /// Adds an alternative identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::DuplicateProfile`] if the alias is already an
    /// identifier or alias, and [`SyntaxError::InvalidProfile`] if it is
    /// blank.
    pub fn alias(self, alias: &str) -> Result<Self, SyntaxError> {
        let key = normalise(alias);
        if key.is_empty() {
            let entry = self.builder.entry_mut(self.index)?;
            return Err(SyntaxError::invalid_profile(
                entry.profile.name(),
                "alias is empty",
            ));
        }
        if self.builder.names.contains_key(&key) {
            return Err(SyntaxError::duplicate_profile(key));
        }
        self.builder.entry_mut(self.index)?.aliases.push(key.clone());
        self.builder.names.insert(key, self.index);
        Ok(self)
    }

    /// Maps a file extension, with or without its leading dot, to this profile.
    ///
    /// An extension already mapped to another profile is moved here; the
    /// most recent registration wins.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidProfile`] if the extension is blank.
    pub fn extension(self, extension: &str) -> Result<Self, SyntaxError> {
        let key = normalise_extension(extension);
        if key.is_empty() {
            let entry = self.builder.entry_mut(self.index)?;
            return Err(SyntaxError::invalid_profile(
                entry.profile.name(),
                "file extension is empty",
            ));
        }
        let previous = self.builder.extensions.insert(key.clone(), self.index);
        if let Some(displaced_index) = previous.filter(|index| *index != self.index) {
            let displaced = self.builder.entry_mut(displaced_index)?;
            displaced.extensions.retain(|existing| *existing != key);
            debug!(
                extension = %key,
                from = %displaced.identifier,
                "file extension remapped"
            );
        }
        let entry = self.builder.entry_mut(self.index)?;
        if !entry.extensions.contains(&key) {
            entry.extensions.push(key);
        }
        Ok(self)
    }

    /// Maps several file extensions to this profile.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`Registration::extension`].
    pub fn extensions<'e>(
        self,
        extensions: impl IntoIterator<Item = &'e str>,
    ) -> Result<Self, SyntaxError> {
        extensions
            .into_iter()
            .try_fold(self, |registration, extension| registration.extension(extension))
    }
}

/// Immutable set of language profiles.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    entries: Vec<Entry>,
    names: HashMap<String, usize>,
    extensions: HashMap<String, usize>,
}

impl ProfileRegistry {
    /// Returns the shared registry of predefined profiles.
    ///
    /// The registry is built on first use and reused afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if a predefined profile fails validation.
    pub fn builtin() -> Result<&'static Self, SyntaxError> {
        BUILTIN.get_or_try_init(|| {
            ProfileRegistryBuilder::with_builtin_profiles().map(ProfileRegistryBuilder::build)
        })
    }

    /// Resolves an identifier or alias to its profile.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownProfile`] if nothing is registered under
    /// `identifier`.
    pub fn resolve(&self, identifier: &str) -> Result<&LanguageProfile, SyntaxError> {
        self.entry(identifier)
            .map(|entry| &entry.profile)
            .ok_or_else(|| SyntaxError::unknown_profile(identifier.trim()))
    }

    /// Returns the canonical identifier for an identifier or alias.
    #[must_use]
    pub fn canonical_identifier(&self, identifier: &str) -> Option<&str> {
        self.entry(identifier).map(|entry| entry.identifier.as_str())
    }

    /// Returns the identifier of the profile mapped to a file extension.
    #[must_use]
    pub fn resolve_extension(&self, extension: &str) -> Option<&str> {
        self.extensions
            .get(&normalise_extension(extension))
            .and_then(|index| self.entries.get(*index))
            .map(|entry| entry.identifier.as_str())
    }

    /// Returns the identifier of the profile mapped to a path's extension.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> Option<&str> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| self.resolve_extension(extension))
    }

    /// Iterates over registered profiles in registration order.
    pub fn profiles(&self) -> impl Iterator<Item = RegisteredProfile<'_>> {
        self.entries.iter().map(RegisteredProfile::from)
    }

    /// Number of registered profiles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no profiles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, identifier: &str) -> Option<&Entry> {
        self.names
            .get(&normalise(identifier))
            .and_then(|index| self.entries.get(*index))
    }
}

use std::fmt;

use crate::token::Token;

/// A parsed recipe: verbatim text around the declarations, the shared
/// body indentation, and the structured declarations themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Source text before the first `version`/`depends_on` call.
    pub header: String,
    /// Leading whitespace of the first declaration.
    pub indent: String,
    pub versions: Vec<Version>,
    pub depends: Vec<Dependency>,
    /// Source text after the first declaration, minus the declarations.
    pub footer: String,
}

/// Keyword argument `key=value` recorded from a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub key: Token,
    pub value: Token,
}

/// A `version(...)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// First positional string.
    pub version: Token,
    /// Checksum or VCS reference: `sha256=`, `md5=`, `commit=`, `tag=`, ...
    pub hash: Option<Argument>,
    /// Explicit source location: `url=`, `git=`, `svn=`, `hg=`, `cvs=`.
    pub url: Option<Argument>,
    /// `True` or `False` keyword.
    pub preferred: Option<Token>,
}

impl Version {
    /// The recorded keyword arguments as `(key, value)` source text,
    /// hash first, then url, then `preferred`.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &str)> {
        let keyed = self.hash.iter().chain(&self.url);
        keyed
            .map(|a| (a.key.text.as_str(), a.value.text.as_str()))
            .chain(self.preferred.iter().map(|p| ("preferred", p.text.as_str())))
    }
}

/// A `depends_on(...)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// First positional string, e.g. `"r@3.1:"`.
    pub spec: Token,
    /// Dependency types (`"build"`, `"link"`, `"run"`), at most three.
    pub types: Vec<Token>,
    pub when: Option<Token>,
}

/// Package name and version constraint split out of a dependency spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    /// Constraint including its leading `@`, e.g. `@3.1:`.
    pub version: Option<String>,
}

/// Error splitting a dependency spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// The spec token is not a string literal.
    #[error("dependency spec is not a string: {0}")]
    NotAString(String),
    /// More than one `@` in the spec.
    #[error("invalid spec: {0}")]
    MultipleVersions(String),
}

impl Dependency {
    /// Split the spec string into package name and version constraint.
    ///
    /// # Errors
    ///
    /// Returns `SpecError` if the spec is not a string literal or holds
    /// more than one `@`.
    pub fn package(&self) -> Result<PackageSpec, SpecError> {
        let spec = self
            .spec
            .unquoted()
            .ok_or_else(|| SpecError::NotAString(self.spec.text.clone()))?;

        let mut parts = spec.splitn(3, '@');
        let name = parts.next().unwrap_or_default().to_string();
        let version = parts.next().map(|v| format!("@{v}"));
        if parts.next().is_some() {
            return Err(SpecError::MultipleVersions(self.spec.text.clone()));
        }
        Ok(PackageSpec { name, version })
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            f.write_str(version)?;
        }
        Ok(())
    }
}

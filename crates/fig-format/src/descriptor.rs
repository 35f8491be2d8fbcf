//! Descriptor reference parsing

use lazy_static::lazy_static;
use regex::Regex;

use fig_pm::Descriptor;

use crate::error::FormatError;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.+-]+$").unwrap();

    // package[/version][:config]
    static ref DESCRIPTOR_RE: Regex = Regex::new(
        r"^([A-Za-z0-9_.+-]+)(?:/([A-Za-z0-9_.+-]+))?(?::([A-Za-z0-9_.+-]+))?$"
    ).unwrap();
}

/// Check that a package, version or config name is well formed
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name) && name != "." && name != ".."
}

/// A descriptor reference as written by a user
///
/// Version and config may be omitted; the command layer decides how to fill
/// them in before planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDescriptor {
    pub package: String,
    pub version: Option<String>,
    pub config: Option<String>,
}

impl PartialDescriptor {
    /// Fail unless a version was given
    pub fn require_version(&self) -> Result<&str, FormatError> {
        self.version
            .as_deref()
            .ok_or_else(|| FormatError::MissingVersion(self.to_string()))
    }

    /// Complete the reference, using `default_config` when no config was given
    pub fn into_descriptor(self, default_config: &str) -> Result<Descriptor, FormatError> {
        let version = self.require_version()?.to_string();
        let config = self.config.unwrap_or_else(|| default_config.to_string());
        Ok(Descriptor::new(self.package, version, config))
    }
}

impl std::fmt::Display for PartialDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.package)?;
        if let Some(version) = &self.version {
            write!(f, "/{}", version)?;
        }
        if let Some(config) = &self.config {
            write!(f, ":{}", config)?;
        }
        Ok(())
    }
}

/// Parse `package[/version][:config]`
pub fn parse_descriptor(input: &str) -> Result<PartialDescriptor, FormatError> {
    let trimmed = input.trim();
    let caps = DESCRIPTOR_RE
        .captures(trimmed)
        .ok_or_else(|| FormatError::InvalidDescriptor(input.to_string()))?;

    let part = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    let descriptor = PartialDescriptor {
        package: caps[1].to_string(),
        version: part(2),
        config: part(3),
    };

    let names = std::iter::once(descriptor.package.as_str())
        .chain(descriptor.version.as_deref())
        .chain(descriptor.config.as_deref());
    for name in names {
        if !is_valid_name(name) {
            return Err(FormatError::InvalidDescriptor(input.to_string()));
        }
    }

    Ok(descriptor)
}

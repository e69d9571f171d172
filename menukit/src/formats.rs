//! Registry of named string formats
//!
//! Each entry pairs a validation predicate with the label written into the
//! `format` keyword of projected schemas. Unknown tags validate everything.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("Invalid hostname regex")
});

/// Reasons a registered format rejects a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid domain format")]
    InvalidDomain,

    #[error("invalid URI format")]
    InvalidUri,

    #[error("invalid URI scheme: only http and https are allowed")]
    DisallowedScheme,
}

/// A registered format
#[derive(Debug)]
pub struct FormatSpec {
    /// Tag used when declaring a field, e.g. `domain`
    pub tag: &'static str,
    /// Label used in the schema `format` keyword, e.g. `hostname`
    pub schema_format: &'static str,
    validate: fn(&str) -> Result<(), FormatError>,
}

impl FormatSpec {
    /// Run the format's validator
    pub fn validate(&self, value: &str) -> Result<(), FormatError> {
        (self.validate)(value)
    }
}

static REGISTRY: [FormatSpec; 2] = [
    FormatSpec {
        tag: "domain",
        schema_format: "hostname",
        validate: validate_domain,
    },
    FormatSpec {
        tag: "uri",
        schema_format: "uri",
        validate: validate_uri,
    },
];

/// Find a registered format by tag
pub fn lookup(tag: &str) -> Option<&'static FormatSpec> {
    REGISTRY.iter().find(|spec| spec.tag == tag)
}

/// All registered formats
pub fn registered() -> impl Iterator<Item = &'static FormatSpec> {
    REGISTRY.iter()
}

/// Validate `value` against the format named by `tag`
///
/// Unregistered tags always succeed.
///
/// ```
/// use menukit::formats::validate_format;
///
/// assert!(validate_format("domain", "example.com").is_ok());
/// assert!(validate_format("domain", "localhost").is_err());
/// assert!(validate_format("color", "anything").is_ok());
/// ```
pub fn validate_format(tag: &str, value: &str) -> Result<(), FormatError> {
    match lookup(tag) {
        Some(spec) => spec.validate(value),
        None => Ok(()),
    }
}

fn validate_domain(value: &str) -> Result<(), FormatError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let host = value.strip_prefix("https://").unwrap_or(value);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.split('/').next().unwrap_or(host);

    if HOSTNAME.is_match(host) {
        Ok(())
    } else {
        Err(FormatError::InvalidDomain)
    }
}

fn validate_uri(value: &str) -> Result<(), FormatError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let parsed = match Url::parse(value) {
        Ok(url) => url,
        // a leading slash leaves no host once the scheme is prepended
        Err(url::ParseError::RelativeUrlWithoutBase) if value.starts_with('/') => {
            return Err(FormatError::InvalidUri)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{value}")).map_err(|_| FormatError::InvalidUri)?
        }
        Err(_) => return Err(FormatError::InvalidUri),
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FormatError::DisallowedScheme);
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(FormatError::InvalidUri),
    }
}

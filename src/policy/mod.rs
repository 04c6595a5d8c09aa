//! Framework version policy.
//!
//! Every version-dependent decision the synthesizer makes is resolved here,
//! once, from a parsed framework version. The rest of the crate only ever
//! looks at the resolved [`VersionPolicy`].

use crate::core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*v?(\d+)\.(\d+)(?:\.[0-9A-Za-z.\-]+)?\s*$").unwrap());

/// Oldest major/minor pair any policy branch covers.
const MINIMUM_SUPPORTED: (u32, u32) = (5, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    raw: String,
}

impl FrameworkVersion {
    pub fn parse(input: &str) -> Result<Self> {
        let caps = VERSION_PATTERN.captures(input).ok_or_else(|| {
            Error::unsupported_version(input, "expected a MAJOR.MINOR[.PATCH...] version")
        })?;
        let component = |idx: usize| -> Result<u32> {
            caps[idx]
                .parse::<u32>()
                .map_err(|e| Error::unsupported_version(input, e.to_string()))
        };
        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            raw: input.trim().to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn is(&self, major: u32, minor: u32) -> bool {
        self.major == major && self.minor == minor
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parameter shape of the finder family and of `new/build/create/create!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamShapeMode {
    /// 5.0 and 5.1: `*args: T.untyped`
    LegacySplat,
    /// everything later: `attributes: T.untyped = nil`
    KeywordAttributes,
}

/// How the collection proxy masks the upstream item accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyAccessorMode {
    /// 5.0: redeclare every item accessor plus `any?` and `many?`
    DirectDeclarations,
    /// later: a single `last(limit = nil)` override
    LastOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPolicy {
    pub version: FrameworkVersion,
    pub param_shape: ParamShapeMode,
    pub proxy_accessors: ProxyAccessorMode,
}

impl VersionPolicy {
    pub fn resolve(version: &str) -> Result<Self> {
        Self::for_version(FrameworkVersion::parse(version)?)
    }

    pub fn for_version(version: FrameworkVersion) -> Result<Self> {
        if (version.major, version.minor) < MINIMUM_SUPPORTED {
            return Err(Error::unsupported_version(
                version.as_str(),
                format!(
                    "no signature policy for versions before {}.{}",
                    MINIMUM_SUPPORTED.0, MINIMUM_SUPPORTED.1
                ),
            ));
        }

        let param_shape = if version.is(5, 0) || version.is(5, 1) {
            ParamShapeMode::LegacySplat
        } else {
            ParamShapeMode::KeywordAttributes
        };
        let proxy_accessors = if version.is(5, 0) {
            ProxyAccessorMode::DirectDeclarations
        } else {
            ProxyAccessorMode::LastOnly
        };

        Ok(Self {
            version,
            param_shape,
            proxy_accessors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_prerelease_and_four_part_versions() {
        let v = FrameworkVersion::parse("6.0.3.rc1").unwrap();
        assert_eq!((v.major, v.minor), (6, 0));
        let v = FrameworkVersion::parse("5.2").unwrap();
        assert_eq!((v.major, v.minor), (5, 2));
        assert_eq!(v.to_string(), "5.2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            FrameworkVersion::parse("five"),
            Err(Error::UnsupportedVersion { .. })
        ));
        assert!(FrameworkVersion::parse("6").is_err());
    }

    #[test]
    fn test_legacy_range() {
        let p = VersionPolicy::resolve("5.0.7").unwrap();
        assert_eq!(p.param_shape, ParamShapeMode::LegacySplat);
        assert_eq!(p.proxy_accessors, ProxyAccessorMode::DirectDeclarations);

        let p = VersionPolicy::resolve("5.1.6").unwrap();
        assert_eq!(p.param_shape, ParamShapeMode::LegacySplat);
        assert_eq!(p.proxy_accessors, ProxyAccessorMode::LastOnly);
    }

    #[test]
    fn test_modern_versions() {
        for v in ["5.2.4", "6.0.0", "6.1.7", "7.1.3"] {
            let p = VersionPolicy::resolve(v).unwrap();
            assert_eq!(p.param_shape, ParamShapeMode::KeywordAttributes, "{v}");
            assert_eq!(p.proxy_accessors, ProxyAccessorMode::LastOnly, "{v}");
        }
    }

    #[test]
    fn test_old_versions_are_unresolvable() {
        let err = VersionPolicy::resolve("4.2.11").unwrap_err();
        assert!(err.to_string().contains("4.2.11"));
    }

    #[test]
    fn test_minor_ten_is_not_legacy() {
        // "5.10" must not be mistaken for a 5.1 prefix match.
        let p = VersionPolicy::resolve("5.10.0").unwrap();
        assert_eq!(p.param_shape, ParamShapeMode::KeywordAttributes);
    }
}

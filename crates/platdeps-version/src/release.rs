//! SemVer 2.0.0 release versions with SDK feature-band helpers.
//!
//! [`ReleaseVersion`] has two notions of ordering:
//!
//! - **Precedence** ([`ReleaseVersion::compare_precedence`]) follows
//!   <https://semver.org/#spec-item-11> and ignores build metadata.
//! - **Total order** ([`Ord`]) breaks precedence ties by comparing build
//!   metadata with the same identifier rules, so that versions differing only
//!   in build metadata still sort deterministically and equality stays
//!   consistent with ordering.
//!
//! # Examples
//!
//! ```
//! use platdeps_version::ReleaseVersion;
//!
//! let preview: ReleaseVersion = "8.0.100-rc.2".parse().unwrap();
//! let release: ReleaseVersion = "8.0.100".parse().unwrap();
//! assert!(preview < release);
//! assert_eq!(release.sdk_feature_band(), 100);
//!
//! let a: ReleaseVersion = "1.0.0+b1".parse().unwrap();
//! let b: ReleaseVersion = "1.0.0+b2".parse().unwrap();
//! assert_ne!(a, b);
//! assert!(a.precedence_eq(&b));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A parsed `major.minor.patch[-prerelease][+build]` version.
///
/// Parsing and identifier validation go through [`semver`]; ordering does
/// not, since build metadata takes part in the total order here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    version: semver::Version,
}

impl ReleaseVersion {
    /// Create a version without prerelease or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            version: semver::Version::new(major, minor, patch),
        }
    }

    /// Attach a dot-separated prerelease label.
    pub fn with_prerelease(mut self, prerelease: &str) -> Result<Self> {
        self.version.pre = parse_prerelease(prerelease).ok_or_else(|| Error::InvalidPrerelease {
            prerelease: prerelease.to_string(),
        })?;
        Ok(self)
    }

    /// Attach dot-separated build metadata.
    pub fn with_build_metadata(mut self, build_metadata: &str) -> Result<Self> {
        self.version.build =
            parse_build_metadata(build_metadata).ok_or_else(|| Error::InvalidBuildMetadata {
                build_metadata: build_metadata.to_string(),
            })?;
        Ok(self)
    }

    /// Parse a SemVer 2.0.0 version string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValue`] for empty input, and
    /// [`Error::InvalidReleaseVersion`], [`Error::InvalidPrerelease`] or
    /// [`Error::InvalidBuildMetadata`] when the corresponding part is
    /// malformed.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyValue { param: "version" });
        }

        semver::Version::parse(input)
            .map(|version| Self { version })
            .map_err(|_| classify_parse_error(input))
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        let pre = &self.version.pre;
        (!pre.is_empty()).then(|| pre.as_str())
    }

    pub fn build_metadata(&self) -> Option<&str> {
        let build = &self.version.build;
        (!build.is_empty()).then(|| build.as_str())
    }

    /// The hundreds group of the patch number, e.g. `800` for `2.1.807`.
    pub fn sdk_feature_band(&self) -> u64 {
        (self.patch() / 100) * 100
    }

    /// The patch number within its feature band, e.g. `7` for `2.1.807`.
    pub fn sdk_patch_level(&self) -> u64 {
        self.patch() % 100
    }

    /// Compare by SemVer precedence. Build metadata is ignored.
    pub fn compare_precedence(&self, other: &Self) -> Ordering {
        self.major()
            .cmp(&other.major())
            .then(self.minor().cmp(&other.minor()))
            .then(self.patch().cmp(&other.patch()))
            .then_with(|| compare_identifiers(self.prerelease(), other.prerelease()))
    }

    /// Equality of precedence, i.e. equality ignoring build metadata.
    pub fn precedence_eq(&self, other: &Self) -> bool {
        self.compare_precedence(other) == Ordering::Equal
    }

    /// Render only the first `field_count` fields: major, minor, patch,
    /// prerelease and build metadata, in that order.
    pub fn to_string_with_fields(&self, field_count: usize) -> String {
        let mut value = match field_count {
            0 => return String::new(),
            1 => self.major().to_string(),
            2 => format!("{}.{}", self.major(), self.minor()),
            _ => format!("{}.{}.{}", self.major(), self.minor(), self.patch()),
        };
        if field_count >= 4 {
            if let Some(prerelease) = self.prerelease() {
                value.push('-');
                value.push_str(prerelease);
            }
        }
        if field_count >= 5 {
            if let Some(build) = self.build_metadata() {
                value.push('+');
                value.push_str(build);
            }
        }
        value
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_precedence(other)
            .then_with(|| compare_identifiers(self.build_metadata(), other.build_metadata()))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_fields(5))
    }
}

impl FromStr for ReleaseVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ReleaseVersion {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Serialize for ReleaseVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl From<&ReleaseVersion> for semver::Version {
    fn from(version: &ReleaseVersion) -> Self {
        version.version.clone()
    }
}

impl From<&semver::Version> for ReleaseVersion {
    fn from(version: &semver::Version) -> Self {
        Self {
            version: version.clone(),
        }
    }
}

/// A non-empty prerelease label, or `None` if it is malformed.
fn parse_prerelease(text: &str) -> Option<semver::Prerelease> {
    if text.is_empty() {
        return None;
    }
    semver::Prerelease::new(text).ok()
}

/// Non-empty build metadata, or `None` if it is malformed.
fn parse_build_metadata(text: &str) -> Option<semver::BuildMetadata> {
    if text.is_empty() {
        return None;
    }
    semver::BuildMetadata::new(text).ok()
}

/// Attribute a rejected version string to the part that is malformed.
fn classify_parse_error(input: &str) -> Error {
    let (rest, build_metadata) = match input.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (input, None),
    };

    if let Some((_, prerelease)) = rest.split_once('-') {
        if parse_prerelease(prerelease).is_none() {
            return Error::InvalidPrerelease {
                prerelease: prerelease.to_string(),
            };
        }
    }
    if let Some(build_metadata) = build_metadata {
        if parse_build_metadata(build_metadata).is_none() {
            return Error::InvalidBuildMetadata {
                build_metadata: build_metadata.to_string(),
            };
        }
    }
    Error::InvalidReleaseVersion {
        version: input.to_string(),
    }
}

/// Compare two optional dot-separated identifier lists.
///
/// An absent list sorts after a present one (a release outranks its
/// prereleases). Numeric identifiers compare numerically and sort before
/// alphanumeric ones; alphanumeric identifiers compare by ASCII. When all
/// shared identifiers tie, the longer list wins.
pub(crate) fn compare_identifiers(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let parts_a: Vec<&str> = a.split('.').collect();
    let parts_b: Vec<&str> = b.split('.').collect();

    for (left, right) in parts_a.iter().zip(&parts_b) {
        let ordering = match (is_digits(left), is_digits(right)) {
            (true, true) => compare_numeric_identifiers(left, right),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => left.cmp(right),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    parts_a.len().cmp(&parts_b.len())
}

/// Compare digit strings of arbitrary length without converting them to
/// integers.
fn compare_numeric_identifiers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> ReleaseVersion {
        ReleaseVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("1.2.3-preview.4", 1, 2, 3, Some("preview.4"))]
    #[case("5.0.0-preview.6.20305.6", 5, 0, 0, Some("preview.6.20305.6"))]
    #[case("4.9.7", 4, 9, 7, None)]
    #[case("1.0.0-alpha-1", 1, 0, 0, Some("alpha-1"))]
    fn test_parse_parts(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: u64,
        #[case] patch: u64,
        #[case] prerelease: Option<&str>,
    ) {
        let version = v(input);
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch(), patch);
        assert_eq!(version.prerelease(), prerelease);
    }

    #[rstest]
    #[case("1")]
    #[case("1.0")]
    #[case("1.0.0.0")]
    #[case("01.0.0")]
    #[case("1.00.0")]
    #[case("1.0.0-")]
    #[case("1.0.0+")]
    #[case("1.0.0-01")]
    #[case("1.0.0-a..b")]
    #[case("1.0.0+$$")]
    #[case("1.0.0+build+again")]
    #[case("-1.0.0")]
    #[case("1.0.x")]
    #[case("1.0.99999999999999999999999")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(ReleaseVersion::parse(input).is_err(), "{input} should be rejected");
    }

    #[rstest]
    #[case("1.0.0-alpha.01", false)]
    #[case("1.0.0+001", true)]
    #[case("01.0.0", false)]
    #[case("1.0.0-", false)]
    #[case("1.0.0-a..b", false)]
    #[case("1.0.0-0A", true)]
    #[case("1.0.0-x.7.z.92", true)]
    #[case("1.2.3----RC-SNAPSHOT.12.9.1--.12+788", true)]
    fn test_accepts_exactly_the_semver_grammar(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(ReleaseVersion::parse(input).is_ok(), valid, "{input}");
        assert_eq!(semver::Version::parse(input).is_ok(), valid, "{input}");
    }

    #[rstest]
    #[case("1.0", "Invalid version: 1.0")]
    #[case("1.0.0-alpha.01", "Invalid prerelease label: 'alpha.01'")]
    #[case("1.0.0-", "Invalid prerelease label: ''")]
    #[case("1.0.0+a..b", "Invalid build metadata: 'a..b'")]
    #[case("1.0.0-rc.1+", "Invalid build metadata: ''")]
    fn test_parse_errors_name_the_bad_part(#[case] input: &str, #[case] message: &str) {
        assert_eq!(ReleaseVersion::parse(input).unwrap_err().to_string(), message);
    }

    #[test]
    fn test_invalid_core_message() {
        let err = ReleaseVersion::parse("1").unwrap_err();
        assert_eq!(err.to_string(), "Invalid version: 1");
    }

    #[test]
    fn test_build_metadata_allows_leading_zeros() {
        let version = v("1.0.0+001.0002");
        assert_eq!(version.build_metadata(), Some("001.0002"));
    }

    #[test]
    fn test_builders_validate_identifiers() {
        assert!(ReleaseVersion::new(1, 0, 0).with_prerelease("00").is_err());
        assert!(ReleaseVersion::new(1, 0, 0).with_build_metadata("$$").is_err());
        assert!(ReleaseVersion::new(1, 0, 0).with_build_metadata("+12345").is_err());
        assert!(ReleaseVersion::new(1, 0, 0).with_prerelease("").is_err());
        assert!(ReleaseVersion::new(1, 0, 0).with_build_metadata("").is_err());

        let version = ReleaseVersion::new(5, 0, 782)
            .with_prerelease("preview.6.20305.6")
            .unwrap();
        assert_eq!(version.to_string(), "5.0.782-preview.6.20305.6");
        assert_eq!(version.sdk_feature_band(), 700);
        assert_eq!(version.sdk_patch_level(), 82);
    }

    #[rstest]
    #[case("3.0.100-preview1", 100, 0)]
    #[case("2.1.807", 800, 7)]
    #[case("6.0.0", 0, 0)]
    fn test_sdk_feature_band(#[case] input: &str, #[case] band: u64, #[case] level: u64) {
        let version = v(input);
        assert_eq!(version.sdk_feature_band(), band);
        assert_eq!(version.sdk_patch_level(), level);
    }

    #[test]
    fn test_prerelease_precedence() {
        assert_eq!(
            v("1.0.0-beta4").compare_precedence(&v("1.0.0-beta5")),
            Ordering::Less
        );
        assert_eq!(v("1.0.0-beta5").compare_precedence(&v("1.0.0")), Ordering::Less);
        assert_eq!(v("1.0.0-beta4").compare_precedence(&v("1.0.0")), Ordering::Less);
        assert_eq!(
            v("1.0.0-beta4").compare_precedence(&v("1.0.0-beta4")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numeric_identifiers_beyond_32_bits() {
        let a = v("1.0.0-2147483647");
        let b = v("1.0.0-2147483648");
        assert_eq!(a.compare_precedence(&b), Ordering::Less);
        assert_eq!(b.compare_precedence(&a), Ordering::Greater);

        let huge = v("1.0.0-123456789012345678901234567890");
        assert!(b < huge);
    }

    #[test]
    fn test_semver_spec_ordering_example() {
        let ordered = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in ordered.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_build_metadata_affects_equality_not_precedence() {
        let a = v("1.0.0+b3045");
        let b = v("1.0.0+b3046");
        assert_ne!(a, b);
        assert!(a.precedence_eq(&b));
        assert!(b > a);
        assert!(b >= a);
    }

    #[test]
    fn test_release_without_build_sorts_after_build() {
        assert!(v("1.0.0+build") < v("1.0.0"));
        assert!(v("1.0.0+build").precedence_eq(&v("1.0.0")));
    }

    #[test]
    fn test_equality_is_field_wise() {
        assert_eq!(v("1.0.0-preview1"), v("1.0.0-preview1"));
        assert_ne!(v("1.0.0-preview1"), v("2.0.0-preview1"));
        assert_eq!(v("10.6.8-alpha3+556"), v("10.6.8-alpha3+556"));
        assert_ne!(v("10.6.8-alpha3+556"), v("10.6.8-alpha3"));
    }

    #[rstest]
    #[case("1.0.0-preview1", "2.0.0-preview1")]
    #[case("1.1.0-preview1", "1.2.0-preview1")]
    #[case("1.1.1-preview1", "1.1.2-preview1")]
    #[case("1.1.1-preview1", "1.1.1-preview2")]
    #[case("1.0.0-alpha1", "1.0.0-beta2")]
    #[case("1.0.0-alpha2", "1.0.0-alpha3")]
    #[case("1.0.0-1", "1.0.0-alpha")]
    #[case("1.9.0", "1.10.0")]
    fn test_ordering(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher));
        assert!(v(higher) > v(lower));
    }

    #[rstest]
    #[case(0, "")]
    #[case(1, "1")]
    #[case(2, "1.10")]
    #[case(3, "1.10.15")]
    #[case(4, "1.10.15-RC2")]
    #[case(5, "1.10.15-RC2+55487")]
    #[case(9, "1.10.15-RC2+55487")]
    fn test_to_string_with_fields(#[case] fields: usize, #[case] expected: &str) {
        assert_eq!(v("1.10.15-RC2+55487").to_string_with_fields(fields), expected);
    }

    #[rstest]
    #[case("4.9.7")]
    #[case("4.9.7-a.b.c.d.e.f")]
    #[case("4.9.7+build.12345")]
    #[case("4.9.7-rc.1+build.12345")]
    fn test_display_preserves_input(#[case] input: &str) {
        assert_eq!(v(input).to_string(), input);
    }

    #[test]
    fn test_serde_as_string() {
        let version = v("8.0.100-rc.2+sha.abc");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"8.0.100-rc.2+sha.abc\"");
        let back: ReleaseVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<ReleaseVersion>("\"6.0\"").is_err());
    }

    #[test]
    fn test_semver_interop() {
        let version = v("2.1.807-preview.3+build.7");
        let converted = semver::Version::from(&version);
        assert_eq!(converted.to_string(), "2.1.807-preview.3+build.7");
        let back = ReleaseVersion::from(&converted);
        assert_eq!(back, version);
    }
}

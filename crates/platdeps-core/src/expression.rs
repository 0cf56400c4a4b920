//! Dependency name expressions.
//!
//! A platform dependency's `name` is an expression listing one or more
//! alternatives, any of which satisfies the dependency:
//!
//! ```text
//! libssl3:[3.0,) || libssl1.1 || libssl1.0.2
//! ```
//!
//! Each alternative is a package name with an optional version range after
//! the first `:`.

use std::fmt;
use std::str::FromStr;

use platdeps_version::VersionRange;

use crate::error::{Error, Result};

const OR_OPERATOR: &str = "||";
const VERSION_RANGE_SEPARATOR: char = ':';

/// A single package name with an optional version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyName {
    name: String,
    version_range: Option<VersionRange>,
}

impl DependencyName {
    pub fn new(name: impl Into<String>, version_range: Option<VersionRange>) -> Self {
        Self {
            name: name.into(),
            version_range,
        }
    }

    /// Parse `name[:range]`.
    pub fn parse(dependency_name: &str) -> Result<Self> {
        if dependency_name.is_empty() {
            return Err(Error::EmptyValue {
                param: "dependency name",
            });
        }

        match dependency_name.find(VERSION_RANGE_SEPARATOR) {
            Some(index) if index > 0 => Ok(Self {
                name: dependency_name[..index].to_string(),
                version_range: Some(VersionRange::parse(&dependency_name[index + 1..])?),
            }),
            _ => Ok(Self::new(dependency_name, None)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version_range(&self) -> Option<&VersionRange> {
        self.version_range.as_ref()
    }
}

impl fmt::Display for DependencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_range {
            Some(range) => write!(f, "{}{VERSION_RANGE_SEPARATOR}{range}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// An ordered list of OR'd [`DependencyName`] alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameExpression {
    names: Vec<DependencyName>,
}

impl NameExpression {
    /// Parse a `||`-separated expression.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyValue`] for empty input or an empty alternative,
    /// [`Error::InvalidExpression`] when the text contains no alternatives
    /// at all, and version range errors for malformed constraints.
    pub fn parse(expression: &str) -> Result<Self> {
        if expression.is_empty() {
            return Err(Error::EmptyValue {
                param: "expression",
            });
        }

        let names = expression
            .split(OR_OPERATOR)
            .filter(|operand| !operand.is_empty())
            .map(|operand| DependencyName::parse(operand.trim()))
            .collect::<Result<Vec<_>>>()?;

        if names.is_empty() {
            return Err(Error::InvalidExpression {
                expression: expression.to_string(),
            });
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[DependencyName] {
        &self.names
    }

    /// The name of the only alternative, if there is exactly one.
    pub fn single_name(&self) -> Option<&str> {
        match self.names.as_slice() {
            [only] => Some(only.name()),
            _ => None,
        }
    }
}

impl fmt::Display for NameExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, " {OR_OPERATOR} ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

impl FromStr for NameExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_plain_name() {
        let expr = NameExpression::parse("dep1").unwrap();
        assert_eq!(expr.names().len(), 1);
        assert_eq!(expr.names()[0].name(), "dep1");
        assert!(expr.names()[0].version_range().is_none());
        assert_eq!(expr.single_name(), Some("dep1"));
    }

    #[test]
    fn test_parse_name_with_bare_version() {
        let expr = NameExpression::parse("dep1:1.0").unwrap();
        let range = expr.names()[0].version_range().unwrap();
        assert_eq!(range.minimum().unwrap().to_string(), "1.0");
        assert!(range.is_minimum_inclusive());
        assert!(range.maximum().is_none());
    }

    #[test]
    fn test_parse_alternatives_preserve_order() {
        let expr = NameExpression::parse("dep1:[2.0,3.0) || dep2:1.1").unwrap();
        assert_eq!(expr.names().len(), 2);
        assert_eq!(expr.single_name(), None);

        let left = &expr.names()[0];
        assert_eq!(left.name(), "dep1");
        let range = left.version_range().unwrap();
        assert_eq!(range.minimum().unwrap().to_string(), "2.0");
        assert_eq!(range.maximum().unwrap().to_string(), "3.0");
        assert!(!range.is_maximum_inclusive());

        let right = &expr.names()[1];
        assert_eq!(right.name(), "dep2");
        assert_eq!(right.version_range().unwrap().minimum().unwrap().to_string(), "1.1");
    }

    #[test]
    fn test_parse_three_alternatives() {
        let expr = NameExpression::parse("dep1 || dep2 || dep3").unwrap();
        let names: Vec<&str> = expr.names().iter().map(DependencyName::name).collect();
        assert_eq!(names, ["dep1", "dep2", "dep3"]);
        assert_eq!(expr.to_string(), "dep1 || dep2 || dep3");
    }

    #[test]
    fn test_empty_input_is_argument_error() {
        let err = NameExpression::parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);

        let err = DependencyName::parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn test_only_operators_is_invalid() {
        let err = NameExpression::parse("||||").unwrap_err();
        assert!(matches!(err, Error::InvalidExpression { .. }));
    }

    #[test]
    fn test_bad_range_is_format_error() {
        let err = NameExpression::parse("dep1:(1.0)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_leading_colon_is_part_of_name() {
        let name = DependencyName::parse(":odd").unwrap();
        assert_eq!(name.name(), ":odd");
        assert!(name.version_range().is_none());
    }

    #[test]
    fn test_display_dependency_name() {
        let name = DependencyName::parse("libicu:[63.0,64.0)").unwrap();
        assert_eq!(name.to_string(), "libicu:[63.0,64.0)");
    }
}

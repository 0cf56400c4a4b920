//! Platform dependency declarations and override lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::expression::NameExpression;
use crate::model::{DependencyKey, PlatformDependenciesModel};

/// The kind of artifact a platform dependency refers to.
///
/// Declaration order is significant: resolved dependencies are sorted by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyType {
    DeviceDriver,
    Executable,
    Library,
    LinuxPackage,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DeviceDriver => "DeviceDriver",
            Self::Executable => "Executable",
            Self::Library => "Library",
            Self::LinuxPackage => "LinuxPackage",
        };
        f.write_str(label)
    }
}

/// Renders an optional type the way error messages expect: empty when unset.
pub(crate) fn type_label(dependency_type: Option<DependencyType>) -> String {
    dependency_type.map(|t| t.to_string()).unwrap_or_default()
}

/// A weak reference to a dependency declared on an ancestor platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRef {
    id: String,
    dependency_type: DependencyType,
}

impl DependencyRef {
    pub fn new(id: impl Into<String>, dependency_type: DependencyType) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::EmptyValue { param: "id" });
        }
        Ok(Self {
            id,
            dependency_type,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dependency_type(&self) -> DependencyType {
        self.dependency_type
    }

    /// Whether `dependency` has this reference's id and type.
    pub fn is_reference_to(&self, dependency: &PlatformDependency) -> bool {
        dependency.id() == self.id && dependency.dependency_type() == Some(self.dependency_type)
    }
}

/// A single dependency declaration of a component on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDependency {
    id: String,
    name: String,
    name_expression: NameExpression,
    dependency_type: Option<DependencyType>,
    usage: Option<String>,
    overrides: Option<DependencyRef>,
}

impl PlatformDependency {
    /// Create a dependency whose id defaults to the single name in `name`.
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousDependencyId`] when `name` lists more than one
    /// alternative; use [`PlatformDependency::with_explicit_id`] instead.
    pub fn new(name: &str) -> Result<Self> {
        Self::build(name, None)
    }

    /// Create a dependency with an explicit id.
    pub fn with_explicit_id(name: &str, id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::EmptyValue { param: "id" });
        }
        Self::build(name, Some(id))
    }

    fn build(name: &str, id: Option<&str>) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyValue { param: "name" });
        }
        let name_expression = NameExpression::parse(name)?;
        let id = match id {
            Some(id) => id.to_string(),
            None => name_expression
                .single_name()
                .ok_or_else(|| Error::AmbiguousDependencyId {
                    expression: name.to_string(),
                })?
                .to_string(),
        };

        Ok(Self {
            id,
            name: name.to_string(),
            name_expression,
            dependency_type: None,
            usage: None,
            overrides: None,
        })
    }

    pub fn with_type(mut self, dependency_type: DependencyType) -> Self {
        self.dependency_type = Some(dependency_type);
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_overrides(mut self, overrides: DependencyRef) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw name expression text.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_expression(&self) -> &NameExpression {
        &self.name_expression
    }

    pub fn dependency_type(&self) -> Option<DependencyType> {
        self.dependency_type
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn overrides(&self) -> Option<&DependencyRef> {
        self.overrides.as_ref()
    }

    /// Merge `overriding` on top of `self`.
    ///
    /// The result takes its id and name from `overriding`. Type and usage come
    /// from `overriding` when it sets them and are inherited from `self`
    /// otherwise. The result carries no override reference.
    pub fn apply_overrides(&self, overriding: &PlatformDependency) -> PlatformDependency {
        PlatformDependency {
            id: overriding.id.clone(),
            name: overriding.name.clone(),
            name_expression: overriding.name_expression.clone(),
            dependency_type: overriding.dependency_type.or(self.dependency_type),
            usage: overriding.usage.clone().or_else(|| self.usage.clone()),
            overrides: None,
        }
    }
}

impl PlatformDependenciesModel {
    /// Check a single dependency: it must have a usage or an override, its
    /// usage must be declared by the model, and its override must resolve.
    pub fn validate_dependency(&self, key: DependencyKey) -> Result<()> {
        let dependency = self.dependency(key)?;

        if dependency.overrides().is_none() && dependency.usage().is_none_or(str::is_empty) {
            return Err(Error::UsageNotSet);
        }

        if let Some(usage) = dependency.usage() {
            if !self.dependency_usages().contains_key(usage) {
                return Err(Error::UndefinedUsage {
                    dependency_type: type_label(dependency.dependency_type()),
                    id: dependency.id().to_string(),
                    usage: usage.to_string(),
                });
            }
        }

        self.overridden_dependency(key)?;
        Ok(())
    }

    /// Find the dependency that `key` overrides.
    ///
    /// Searches the ancestors of the containing platform, nearest first, for
    /// a component with the same name and type as the one declaring `key`,
    /// and within it for a dependency matching the override reference.
    /// Returns `Ok(None)` when `key` declares no override.
    pub fn overridden_dependency(&self, key: DependencyKey) -> Result<Option<DependencyKey>> {
        let dependency = self.dependency(key)?;
        let Some(reference) = dependency.overrides() else {
            return Ok(None);
        };

        let component = self.component(self.component_containing_dependency(key)?)?;
        let platform = self.platform_containing_dependency(key)?;

        for ancestor in self.ancestors_bottom_up(platform)? {
            let Some(candidate) = self
                .platform(ancestor)?
                .find_component(self, component.name(), component.component_type())?
            else {
                continue;
            };

            for &candidate_key in candidate.dependencies() {
                if reference.is_reference_to(self.dependency(candidate_key)?) {
                    return Ok(Some(candidate_key));
                }
            }
        }

        Err(Error::OverrideNotFound {
            dependency_type: type_label(dependency.dependency_type()),
            id: dependency.id().to_string(),
            override_type: reference.dependency_type().to_string(),
            override_id: reference.id().to_string(),
        })
    }
}

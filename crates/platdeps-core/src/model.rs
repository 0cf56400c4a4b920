//! The platform dependencies model.
//!
//! Platforms, components and dependencies live in flat arenas owned by
//! [`PlatformDependenciesModel`] and are addressed by copyable keys. Parent
//! and containment relations are answered by searching the tree rather than
//! through back-pointers. A model is only ever produced by
//! [`ModelBuilder::build`] and is read-only afterwards.

use std::collections::{BTreeMap, HashSet};

use platdeps_version::ReleaseVersion;

use crate::component::{Component, ComponentType};
use crate::dependency::PlatformDependency;
use crate::error::{Error, Result};
use crate::platform::Platform;

/// Handle to a [`Platform`] within the model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformKey(pub(crate) usize);

/// Handle to a [`Component`] within the model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(pub(crate) usize);

/// Handle to a [`PlatformDependency`] within the model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey(pub(crate) usize);

impl PlatformKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ComponentKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl DependencyKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The root of a platform dependencies document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDependenciesModel {
    product_version: ReleaseVersion,
    dependency_usages: BTreeMap<String, String>,
    roots: Vec<PlatformKey>,
    platforms: Vec<Platform>,
    components: Vec<Component>,
    dependencies: Vec<PlatformDependency>,
}

impl PlatformDependenciesModel {
    pub fn product_version(&self) -> &ReleaseVersion {
        &self.product_version
    }

    /// Known usage keys mapped to their descriptions.
    pub fn dependency_usages(&self) -> &BTreeMap<String, String> {
        &self.dependency_usages
    }

    /// Top-level platforms, in declaration order.
    pub fn platforms(&self) -> &[PlatformKey] {
        &self.roots
    }

    pub fn platform(&self, key: PlatformKey) -> Result<&Platform> {
        self.platforms
            .get(key.0)
            .ok_or(Error::PlatformNotInModel { key: key.0 })
    }

    pub fn component(&self, key: ComponentKey) -> Result<&Component> {
        self.components
            .get(key.0)
            .ok_or(Error::ComponentNotInModel { key: key.0 })
    }

    pub fn dependency(&self, key: DependencyKey) -> Result<&PlatformDependency> {
        self.dependencies
            .get(key.0)
            .ok_or(Error::DependencyNotInModel { key: key.0 })
    }

    /// The first platform in pre-order with the given RID.
    pub fn find_platform(&self, rid: &str) -> Option<&Platform> {
        self.iter_platforms().find(|p| p.rid() == rid)
    }

    /// Every platform in the tree, depth-first pre-order.
    pub fn iter_platforms(&self) -> PlatformIter<'_> {
        PlatformIter {
            model: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Validate the whole model.
    ///
    /// RIDs must be unique across the tree; duplicates are reported in
    /// pre-order. Each top-level platform is then validated recursively.
    pub fn validate(&self) -> Result<()> {
        tracing::debug!(
            product_version = %self.product_version,
            platforms = self.platforms.len(),
            "Validating platform dependencies model"
        );

        let mut rids = HashSet::new();
        for platform in self.iter_platforms() {
            if !rids.insert(platform.rid()) {
                return Err(Error::DuplicatePlatform {
                    rid: platform.rid().to_string(),
                });
            }
        }

        for &root in &self.roots {
            self.platform(root)?.validate(self)?;
        }

        tracing::debug!(
            components = self.components.len(),
            dependencies = self.dependencies.len(),
            "Model is valid"
        );
        Ok(())
    }

    /// The platform that declares `component`.
    pub fn platform_containing_component(&self, component: ComponentKey) -> Result<PlatformKey> {
        self.component(component)?;
        self.iter_platforms()
            .find(|p| p.components().contains(&component))
            .map(Platform::key)
            .ok_or(Error::ComponentNotInModel { key: component.0 })
    }

    /// The component that declares `dependency`.
    pub fn component_containing_dependency(
        &self,
        dependency: DependencyKey,
    ) -> Result<ComponentKey> {
        self.dependency(dependency)?;
        for platform in self.iter_platforms() {
            for &key in platform.components() {
                if self.component(key)?.dependencies().contains(&dependency) {
                    return Ok(key);
                }
            }
        }
        Err(Error::DependencyNotInModel { key: dependency.0 })
    }

    /// The platform whose components declare `dependency`.
    pub fn platform_containing_dependency(&self, dependency: DependencyKey) -> Result<PlatformKey> {
        let component = self.component_containing_dependency(dependency)?;
        self.platform_containing_component(component)
    }

    /// Ancestors of `child`, nearest first. Empty for top-level platforms
    /// and for keys that are not part of this tree.
    pub fn ancestors_bottom_up(&self, child: PlatformKey) -> Result<Vec<PlatformKey>> {
        for &root in &self.roots {
            if root == child {
                return Ok(Vec::new());
            }

            let ancestors = self.platform(root)?.ancestors_of(self, child)?;
            if !ancestors.is_empty() {
                return Ok(ancestors);
            }
        }
        Ok(Vec::new())
    }
}

/// Depth-first pre-order iterator over a model's platforms.
pub struct PlatformIter<'m> {
    model: &'m PlatformDependenciesModel,
    stack: Vec<PlatformKey>,
}

impl<'m> Iterator for PlatformIter<'m> {
    type Item = &'m Platform;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;
        // The stack only ever holds keys taken from this model.
        let platform = self.model.platform(key).ok()?;
        self.stack.extend(platform.platforms().iter().rev().copied());
        Some(platform)
    }
}

/// Incrementally assembles a [`PlatformDependenciesModel`].
///
/// Constructor-level checks (empty names, unknown parent keys) happen as
/// items are added. Cross-item rules are left to
/// [`PlatformDependenciesModel::validate`].
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    model: PlatformDependenciesModel,
}

impl ModelBuilder {
    pub fn new(product_version: ReleaseVersion) -> Self {
        Self {
            model: PlatformDependenciesModel {
                product_version,
                dependency_usages: BTreeMap::new(),
                roots: Vec::new(),
                platforms: Vec::new(),
                components: Vec::new(),
                dependencies: Vec::new(),
            },
        }
    }

    pub fn add_usage(
        &mut self,
        usage: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.model
            .dependency_usages
            .insert(usage.into(), description.into());
        self
    }

    /// Add a platform at the top level or under `parent`.
    pub fn add_platform(
        &mut self,
        parent: Option<PlatformKey>,
        rid: impl Into<String>,
    ) -> Result<PlatformKey> {
        let rid = rid.into();
        if rid.is_empty() {
            return Err(Error::EmptyValue { param: "rid" });
        }

        let key = PlatformKey(self.model.platforms.len());
        match parent {
            Some(parent) => self
                .model
                .platforms
                .get_mut(parent.0)
                .ok_or(Error::PlatformNotInModel { key: parent.0 })?
                .platforms
                .push(key),
            None => self.model.roots.push(key),
        }

        self.model.platforms.push(Platform {
            key,
            rid,
            platforms: Vec::new(),
            components: Vec::new(),
        });
        Ok(key)
    }

    pub fn add_component(
        &mut self,
        platform: PlatformKey,
        name: impl Into<String>,
        component_type: ComponentType,
    ) -> Result<ComponentKey> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyValue { param: "name" });
        }

        let key = ComponentKey(self.model.components.len());
        self.model
            .platforms
            .get_mut(platform.0)
            .ok_or(Error::PlatformNotInModel { key: platform.0 })?
            .components
            .push(key);

        self.model.components.push(Component {
            key,
            name,
            component_type,
            dependencies: Vec::new(),
        });
        Ok(key)
    }

    pub fn add_dependency(
        &mut self,
        component: ComponentKey,
        dependency: PlatformDependency,
    ) -> Result<DependencyKey> {
        let key = DependencyKey(self.model.dependencies.len());
        self.model
            .components
            .get_mut(component.0)
            .ok_or(Error::ComponentNotInModel { key: component.0 })?
            .dependencies
            .push(key);

        self.model.dependencies.push(dependency);
        Ok(key)
    }

    pub fn build(self) -> PlatformDependenciesModel {
        self.model
    }
}

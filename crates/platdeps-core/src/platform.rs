//! Platforms: nodes of the RID hierarchy.

use std::collections::HashSet;

use crate::component::{Component, ComponentType};
use crate::error::{Error, Result};
use crate::model::{ComponentKey, PlatformDependenciesModel, PlatformKey};

/// A node in the platform tree, identified by its runtime identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub(crate) key: PlatformKey,
    pub(crate) rid: String,
    pub(crate) platforms: Vec<PlatformKey>,
    pub(crate) components: Vec<ComponentKey>,
}

impl Platform {
    pub fn key(&self) -> PlatformKey {
        self.key
    }

    pub fn rid(&self) -> &str {
        &self.rid
    }

    /// Direct child platforms, in declaration order.
    pub fn platforms(&self) -> &[PlatformKey] {
        &self.platforms
    }

    pub fn components(&self) -> &[ComponentKey] {
        &self.components
    }

    /// The component on this platform with the given identity, if any.
    ///
    /// Fails with a lookup miss when `model` is not the model this platform
    /// belongs to.
    pub fn find_component<'m>(
        &self,
        model: &'m PlatformDependenciesModel,
        name: &str,
        component_type: ComponentType,
    ) -> Result<Option<&'m Component>> {
        for &key in &self.components {
            let component = model.component(key)?;
            if component.name() == name && component.component_type() == component_type {
                return Ok(Some(component));
            }
        }
        Ok(None)
    }

    /// Validate this platform's components, then its child platforms.
    pub fn validate(&self, model: &PlatformDependenciesModel) -> Result<()> {
        let mut identities: HashSet<(&str, ComponentType)> = HashSet::new();
        for &key in &self.components {
            let component = model.component(key)?;
            if !identities.insert((component.name(), component.component_type())) {
                return Err(Error::DuplicateComponent {
                    rid: self.rid.clone(),
                });
            }
            component.validate(model)?;
        }

        for &child in &self.platforms {
            model.platform(child)?.validate(model)?;
        }
        Ok(())
    }

    /// The path from `descendant`'s parent up to and including `self`,
    /// nearest ancestor first. Empty when `descendant` is not below `self`.
    pub fn ancestors_of(
        &self,
        model: &PlatformDependenciesModel,
        descendant: PlatformKey,
    ) -> Result<Vec<PlatformKey>> {
        let mut ancestors = Vec::new();
        self.add_ancestors_bottom_up(model, descendant, &mut ancestors)?;
        Ok(ancestors)
    }

    fn add_ancestors_bottom_up(
        &self,
        model: &PlatformDependenciesModel,
        descendant: PlatformKey,
        ancestors: &mut Vec<PlatformKey>,
    ) -> Result<()> {
        for &child in &self.platforms {
            if child == descendant {
                ancestors.push(self.key);
                return Ok(());
            }

            model
                .platform(child)?
                .add_ancestors_bottom_up(model, descendant, ancestors)?;
            if !ancestors.is_empty() {
                ancestors.push(self.key);
                return Ok(());
            }
        }
        Ok(())
    }
}

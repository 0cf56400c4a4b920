//! Components and effective dependency resolution.
//!
//! The same logical component (same name and type) can be declared on several
//! platforms of one hierarchy. Each declaration lists only what differs on
//! that platform; [`Component::resolved_dependencies`] folds the declarations
//! from the component's own platform up to the root into one effective set.

use std::collections::HashSet;
use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::dependency::PlatformDependency;
use crate::error::Result;
use crate::model::{ComponentKey, DependencyKey, PlatformDependenciesModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    GitRepository,
    SharedFramework,
    NuGetPackage,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GitRepository => "GitRepository",
            Self::SharedFramework => "SharedFramework",
            Self::NuGetPackage => "NuGetPackage",
        };
        f.write_str(label)
    }
}

/// A named, typed bundle of platform dependencies attached to one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub(crate) key: ComponentKey,
    pub(crate) name: String,
    pub(crate) component_type: ComponentType,
    pub(crate) dependencies: Vec<DependencyKey>,
}

impl Component {
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Keys of the dependencies declared directly on this component.
    pub fn dependencies(&self) -> &[DependencyKey] {
        &self.dependencies
    }

    pub fn validate(&self, model: &PlatformDependenciesModel) -> Result<()> {
        for &dependency in &self.dependencies {
            model.validate_dependency(dependency)?;
        }
        Ok(())
    }

    /// Compute the effective dependencies of this component.
    ///
    /// Walks from the containing platform up to the root. On each platform the
    /// declaration with the same name and type contributes its dependencies;
    /// each dependency's override chain is folded oldest-first so that the
    /// nearest platform's values win. Dependencies already consumed by a
    /// nearer chain are skipped. The result is sorted by type, then by name.
    pub fn resolved_dependencies(
        &self,
        model: &PlatformDependenciesModel,
    ) -> Result<Vec<PlatformDependency>> {
        let containing = model.platform_containing_component(self.key)?;
        let hierarchy = iter::once(containing).chain(model.ancestors_bottom_up(containing)?);

        let mut resolved = Vec::new();
        let mut processed: HashSet<DependencyKey> = HashSet::new();

        for platform in hierarchy {
            let Some(declaration) =
                model
                    .platform(platform)?
                    .find_component(model, &self.name, self.component_type)?
            else {
                continue;
            };

            for &dependency in declaration.dependencies() {
                if processed.contains(&dependency) {
                    continue;
                }

                // Oldest declaration first.
                let mut chain = override_chain(model, dependency)?.into_iter().rev();
                let Some(oldest) = chain.next() else {
                    continue;
                };
                processed.insert(oldest);
                let mut current = model.dependency(oldest)?.clone();
                let mut depth = 1usize;

                for overriding in chain {
                    processed.insert(overriding);
                    current = current.apply_overrides(model.dependency(overriding)?);
                    depth += 1;
                }

                tracing::trace!(
                    component = %self.name,
                    id = current.id(),
                    depth,
                    "Resolved override chain"
                );
                resolved.push(current);
            }
        }

        resolved.sort_by(|a, b| {
            a.dependency_type()
                .cmp(&b.dependency_type())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(resolved)
    }
}

/// The override chain starting at `dependency`, nearest declaration first.
///
/// Each step moves to a strictly higher platform, so the walk terminates.
fn override_chain(
    model: &PlatformDependenciesModel,
    dependency: DependencyKey,
) -> Result<Vec<DependencyKey>> {
    let mut chain = vec![dependency];
    let mut next = model.overridden_dependency(dependency)?;
    while let Some(overridden) = next {
        chain.push(overridden);
        next = model.overridden_dependency(overridden)?;
    }
    Ok(chain)
}

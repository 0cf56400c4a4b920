//! JSON document form of the model.
//!
//! ```json
//! {
//!   "product-version": "8.0.0",
//!   "dependency-usages": { "default": "Required at runtime" },
//!   "platforms": [
//!     {
//!       "rid": "linux",
//!       "components": [
//!         {
//!           "name": "runtime",
//!           "type": "SharedFramework",
//!           "dependencies": [
//!             { "name": "libc6", "dependency-type": "LinuxPackage", "usage": "default" }
//!           ]
//!         }
//!       ],
//!       "platforms": []
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use platdeps_version::ReleaseVersion;
use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::dependency::{DependencyRef, DependencyType, PlatformDependency};
use crate::error::{Error, Result};
use crate::model::{ModelBuilder, PlatformDependenciesModel, PlatformKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelDocument {
    pub product_version: ReleaseVersion,
    #[serde(default)]
    pub dependency_usages: BTreeMap<String, String>,
    #[serde(default)]
    pub platforms: Vec<PlatformDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformDocument {
    pub rid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyDocument {
    /// Defaults to the single name in `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<DependencyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<DependencyRefDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyRefDocument {
    pub id: String,
    pub dependency_type: DependencyType,
}

impl DependencyDocument {
    fn to_dependency(&self) -> Result<PlatformDependency> {
        let mut dependency = match &self.id {
            Some(id) => PlatformDependency::with_explicit_id(&self.name, id)?,
            None => PlatformDependency::new(&self.name)?,
        };
        if let Some(dependency_type) = self.dependency_type {
            dependency = dependency.with_type(dependency_type);
        }
        if let Some(usage) = &self.usage {
            dependency = dependency.with_usage(usage.clone());
        }
        if let Some(overrides) = &self.overrides {
            dependency =
                dependency.with_overrides(DependencyRef::new(&overrides.id, overrides.dependency_type)?);
        }
        Ok(dependency)
    }

    fn from_dependency(dependency: &PlatformDependency) -> Self {
        let id = match dependency.name_expression().single_name() {
            Some(default_id) if default_id == dependency.id() => None,
            _ => Some(dependency.id().to_string()),
        };
        Self {
            id,
            name: dependency.name().to_string(),
            dependency_type: dependency.dependency_type(),
            usage: dependency.usage().map(str::to_string),
            overrides: dependency.overrides().map(|r| DependencyRefDocument {
                id: r.id().to_string(),
                dependency_type: r.dependency_type(),
            }),
        }
    }
}

impl PlatformDependenciesModel {
    /// Build a model from a parsed document without validating it.
    pub fn from_document(document: &ModelDocument) -> Result<Self> {
        let mut builder = ModelBuilder::new(document.product_version.clone());
        for (usage, description) in &document.dependency_usages {
            builder.add_usage(usage.clone(), description.clone());
        }
        for platform in &document.platforms {
            add_platform(&mut builder, None, platform)?;
        }
        Ok(builder.build())
    }

    /// Parse, build and validate a model from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::DocumentParse {
                message: "the document is empty".to_string(),
            });
        }

        let document: ModelDocument =
            serde_json::from_str(text).map_err(|e| Error::DocumentParse {
                message: e.to_string(),
            })?;
        let model = Self::from_document(&document)?;
        model.validate()?;

        tracing::debug!(
            product_version = %model.product_version(),
            platforms = model.platforms().len(),
            "Loaded platform dependencies document"
        );
        Ok(model)
    }

    /// Read, parse, build and validate a model from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "Reading platform dependencies file");

        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        if text.trim().is_empty() {
            return Err(Error::EmptyDocument {
                path: path.to_path_buf(),
            });
        }
        Self::from_json_str(&text)
    }

    /// The document form of this model.
    pub fn to_document(&self) -> Result<ModelDocument> {
        let platforms = self
            .platforms()
            .iter()
            .map(|&key| platform_document(self, key))
            .collect::<Result<Vec<_>>>()?;

        Ok(ModelDocument {
            product_version: self.product_version().clone(),
            dependency_usages: self.dependency_usages().clone(),
            platforms,
        })
    }

    /// Pretty-printed JSON form of this model.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document()?).map_err(|e| Error::DocumentSerialize {
            message: e.to_string(),
        })
    }
}

fn add_platform(
    builder: &mut ModelBuilder,
    parent: Option<PlatformKey>,
    document: &PlatformDocument,
) -> Result<()> {
    let platform = builder.add_platform(parent, document.rid.clone())?;

    for component in &document.components {
        let key = builder.add_component(platform, component.name.clone(), component.component_type)?;
        for dependency in &component.dependencies {
            builder.add_dependency(key, dependency.to_dependency()?)?;
        }
    }

    for child in &document.platforms {
        add_platform(builder, Some(platform), child)?;
    }
    Ok(())
}

fn platform_document(model: &PlatformDependenciesModel, key: PlatformKey) -> Result<PlatformDocument> {
    let platform = model.platform(key)?;

    let mut components = Vec::with_capacity(platform.components().len());
    for &component_key in platform.components() {
        let component = model.component(component_key)?;
        let dependencies = component
            .dependencies()
            .iter()
            .map(|&d| model.dependency(d).map(DependencyDocument::from_dependency))
            .collect::<Result<Vec<_>>>()?;
        components.push(ComponentDocument {
            name: component.name().to_string(),
            component_type: component.component_type(),
            dependencies,
        });
    }

    let platforms = platform
        .platforms()
        .iter()
        .map(|&child| platform_document(model, child))
        .collect::<Result<Vec<_>>>()?;

    Ok(PlatformDocument {
        rid: platform.rid().to_string(),
        components,
        platforms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    const MINIMAL: &str = r#"{
        "product-version": "8.0.100-rc.1",
        "dependency-usages": { "default": "Needed at runtime" },
        "platforms": [
            {
                "rid": "linux",
                "components": [
                    {
                        "name": "runtime",
                        "type": "SharedFramework",
                        "dependencies": [
                            { "name": "libc6", "dependency-type": "LinuxPackage", "usage": "default" }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json_str() {
        let model = PlatformDependenciesModel::from_json_str(MINIMAL).unwrap();
        assert_eq!(model.product_version().to_string(), "8.0.100-rc.1");
        assert_eq!(model.platforms().len(), 1);

        let linux = model.find_platform("linux").unwrap();
        let runtime = model.component(linux.components()[0]).unwrap();
        assert_eq!(runtime.component_type(), ComponentType::SharedFramework);
        let libc = model.dependency(runtime.dependencies()[0]).unwrap();
        assert_eq!(libc.id(), "libc6");
        assert_eq!(libc.dependency_type(), Some(DependencyType::LinuxPackage));
    }

    #[rstest]
    #[case("")]
    #[case("   \n")]
    #[case("{ not json")]
    #[case(r#"{ "product-version": "8.0" }"#)]
    fn test_unparseable_documents_are_format_errors(#[case] text: &str) {
        let err = PlatformDependenciesModel::from_json_str(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let text = MINIMAL.replace("SharedFramework", "Tarball");
        let err = PlatformDependenciesModel::from_json_str(&text).unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
    }

    #[test]
    fn test_ambiguous_default_id_fails_build() {
        let text = MINIMAL.replace(r#""name": "libc6""#, r#""name": "libc6 || musl""#);
        let err = PlatformDependenciesModel::from_json_str(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_from_document_does_not_validate() {
        let text = MINIMAL.replace(r#", "usage": "default""#, "");
        let document: ModelDocument = serde_json::from_str(&text).unwrap();
        let model = PlatformDependenciesModel::from_document(&document).unwrap();
        assert!(matches!(model.validate().unwrap_err(), Error::UsageNotSet));
    }

    #[test]
    fn test_default_id_is_omitted_on_save() {
        let dependency = PlatformDependency::new("libicu:[63.0,64.0)").unwrap();
        assert_eq!(DependencyDocument::from_dependency(&dependency).id, None);

        let explicit = PlatformDependency::with_explicit_id("libssl3 || libssl1.1", "libssl").unwrap();
        assert_eq!(
            DependencyDocument::from_dependency(&explicit).id.as_deref(),
            Some("libssl")
        );
    }

    #[test]
    fn test_to_document_reproduces_input() {
        let document: ModelDocument = serde_json::from_str(MINIMAL).unwrap();
        let model = PlatformDependenciesModel::from_document(&document).unwrap();
        assert_eq!(model.to_document().unwrap(), document);
    }
}

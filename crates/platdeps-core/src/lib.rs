//! Platform dependency model.
//!
//! A [`PlatformDependenciesModel`] describes, for one product version, which
//! native dependencies each component needs on each platform. Platforms form
//! a tree keyed by runtime identifier (RID); a component declared on a child
//! platform states only what differs from its ancestors and may override an
//! ancestor's dependency by id and type.
//!
//! ```no_run
//! use platdeps_core::PlatformDependenciesModel;
//!
//! let model = PlatformDependenciesModel::from_file("platform-dependencies.json")?;
//! let platform = model.find_platform("debian.12").expect("platform is declared");
//! for &key in platform.components() {
//!     let component = model.component(key)?;
//!     for dependency in component.resolved_dependencies(&model)? {
//!         println!("{}: {}", component.name(), dependency.name());
//!     }
//! }
//! # Ok::<(), platdeps_core::Error>(())
//! ```

pub mod component;
pub mod dependency;
pub mod document;
pub mod error;
pub mod expression;
pub mod logging;
pub mod model;
pub mod platform;

pub use component::{Component, ComponentType};
pub use dependency::{DependencyRef, DependencyType, PlatformDependency};
pub use document::{
    ComponentDocument, DependencyDocument, DependencyRefDocument, ModelDocument, PlatformDocument,
};
pub use error::{Error, ErrorKind, Result};
pub use expression::{DependencyName, NameExpression};
pub use model::{
    ComponentKey, DependencyKey, ModelBuilder, PlatformDependenciesModel, PlatformIter, PlatformKey,
};
pub use platform::Platform;

pub use platdeps_version::{NumericVersion, ReleaseVersion, VersionRange};

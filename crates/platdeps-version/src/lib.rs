//! Version primitives for platform dependency manifests.
//!
//! - [`ReleaseVersion`]: SemVer 2.0.0 versions with precedence and total
//!   ordering, plus SDK feature-band helpers.
//! - [`NumericVersion`]: loose dotted versions (`1.0`, `63.1.2`) used as range
//!   bounds.
//! - [`VersionRange`]: interval notation such as `[1.0,2.0)`.

pub mod error;
pub mod numeric;
pub mod range;
pub mod release;

pub use error::{Error, Result};
pub use numeric::NumericVersion;
pub use range::VersionRange;
pub use release::ReleaseVersion;

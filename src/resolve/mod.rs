//! Identity resolution for analyzer paths.
//!
//! Resolution layers, leaves first:
//! - [`paths`]: lexical relativization with a containment policy
//! - [`region`]: which sandbox root contains a path
//! - [`requirements`]: which declared dependency owns a site-packages path
//! - [`builtins`]: fileless interpreter namespaces
//! - [`identity`]: repository, file and symbol key resolution

pub mod builtins;
pub mod error;
pub mod identity;
pub mod paths;
pub mod region;
pub mod requirements;

pub use builtins::BuiltinPrefixes;
pub use error::{ResolveError, ResolveResult};
pub use identity::{FileLocation, Identities, IdentityResolver};
pub use paths::ContainmentPolicy;
pub use region::{Located, Region, RegionResolver, Root};
pub use requirements::{PathForm, RequirementMatcher};

//! envbuild - typed process configuration from environment variables
//!
//! This crate resolves named environment variables into a validated,
//! optionally transformed result. A schema is declared once through an
//! immutable fluent builder and then resolved against any flat key/value
//! source, defaulting to the live process environment.
//!
//! # Example
//!
//! ```rust
//! use envbuild::prelude::*;
//! use std::collections::HashMap;
//!
//! fn main() -> EnvResult<()> {
//!     let source = HashMap::from([("APP_HOST", "localhost"), ("APP_PORT", "8080")]);
//!
//!     let config = EnvironmentBuilder::new(["HOST"])
//!         .optionals(["PORT"])
//!         .transform(parse::number, ["PORT"])
//!         .with_prefix("APP_")
//!         .resolve(&source)?;
//!
//!     assert_eq!(config.get_str("HOST"), Some("localhost"));
//!     assert_eq!(config.get("PORT"), Some(&serde_json::json!(8080)));
//!     Ok(())
//! }
//! ```
//!
//! Missing required keys are collected exhaustively and reported together:
//!
//! ```rust
//! use envbuild::EnvironmentBuilder;
//! use std::collections::HashMap;
//!
//! let err = EnvironmentBuilder::new(["HOST", "PORT"])
//!     .resolve(&HashMap::<String, String>::new())
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"The following environment variables are required but not set: ["HOST","PORT"]"#
//! );
//! ```

#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod resolve;
pub mod source;
pub mod transform;

pub use builder::EnvironmentBuilder;
pub use error::{EnvError, EnvResult};
pub use resolve::ResolvedEnvironment;
pub use source::{EnvSource, ProcessEnv};
pub use transform::{Transform, parse};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude for common imports
    //!
    //! # Example
    //! ```rust
    //! use envbuild::prelude::*;
    //! ```

    pub use crate::builder::EnvironmentBuilder;
    pub use crate::error::{EnvError, EnvResult};
    pub use crate::resolve::ResolvedEnvironment;
    pub use crate::source::{EnvSource, ProcessEnv};
    pub use crate::transform::{Transform, parse};
}

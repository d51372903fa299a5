//! Foundation types for the name resolution engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ScopeId`], [`DeclId`] - arena handles for scopes and declarations
//! - [`Name`], [`Interner`] - string interning
//!
//! This module has NO dependencies on other crate modules.

mod ids;
mod intern;

pub use ids::{DeclId, ScopeId};
pub use intern::{Interner, Name};

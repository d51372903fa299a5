//! # nameres-base
//!
//! Scoped-visibility name resolution: a small engine that decides, for any
//! unqualified identifier referenced inside a class-like construct, which
//! declaration it binds to, honoring the access level attached to import
//! directives. A construct may privately import a module's members into
//! its own lookup scope without those members becoming visible through
//! inheritance, through nested constructs, or through inherited-scope
//! merging under multiple inheritance.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! sema    → scope tree, import directives, unqualified lookup
//!   ↓
//! base    → primitives (ScopeId, DeclId, Name interning)
//! ```
//!
//! ## Usage
//!
//! The surrounding front end builds a [`ScopeTree`] in one declaration
//! pass, attaches import directives with [`resolve_import`] (or in batch
//! with [`sema::attach_imports`]), then serves lookups through a
//! [`Resolver`]. The resolver borrows the tree immutably, so the build
//! phase and the query phase cannot interleave.
//!
//! ```
//! use nameres::sema::{DeclKind, ImportVisibility, LookupResult, Resolver, ScopeTree,
//!     resolve_import};
//!
//! let mut tree = ScopeTree::new();
//! let module = tree.add_module(tree.root(), "A").unwrap();
//! let value = tree.declare(module, "value", DeclKind::Value).unwrap();
//!
//! let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
//! resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
//! let method_body = tree.add_block(construct);
//!
//! // A construct derived from X does not see X's restricted import.
//! let derived = tree.add_construct(tree.root(), "Y", &[construct]).unwrap();
//! let derived_body = tree.add_block(derived);
//!
//! let resolver = Resolver::new(&tree);
//! assert_eq!(resolver.lookup(method_body, "value"), LookupResult::Found(value));
//! assert_eq!(resolver.lookup(derived_body, "value"), LookupResult::NotFound);
//! ```

/// Foundation types: ScopeId, DeclId, Name interning
pub mod base;

/// The name resolution engine
pub mod sema;

// Re-export the types most callers need.
pub use base::{DeclId, Interner, Name, ScopeId};
pub use sema::{
    DeclKind, ImportError, ImportVisibility, LookupResult, Resolver, ScopeKind, ScopeTree,
    resolve_import,
};

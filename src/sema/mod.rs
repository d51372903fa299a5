//! The name resolution engine.
//!
//! Consumes an already-parsed declaration tree and answers one query:
//! what does this unqualified identifier, referenced at this point,
//! resolve to.
//!
//! - [`scope`] — lexical scope tree and per-scope symbol tables
//! - [`import`] — import directive validation and alias-edge attachment
//! - [`resolve`] — the unqualified lookup algorithm, inheritance included
//! - [`diagnostics`] — structured outcomes for the reporting layer

pub mod diagnostics;
pub mod import;
pub mod resolve;
pub mod scope;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use import::{AliasEdge, ImportDirective, ImportError, ImportVisibility, attach_imports, resolve_import};
pub use resolve::{LocalMemberLookup, LookupResult, MemberLookup, Resolver};
pub use scope::{DeclKind, Declaration, DuplicateDeclaration, ScopeKind, ScopeTree};

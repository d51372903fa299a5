//! Import directive resolution.
//!
//! An import directive names a module and asks for its members to become
//! visible inside one construct, under an access level. Resolving a
//! directive validates the target and the access level and, on success,
//! attaches a visibility-tagged [`AliasEdge`] to the owning construct's
//! scope. All lookup-time behavior of the edge lives in
//! [`resolve`](super::resolve); this module only decides whether an edge
//! comes into existence at all.

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use super::diagnostics::DiagnosticCollector;
use super::scope::ScopeTree;
use crate::base::{DeclId, ScopeId};

// ============================================================================
// VISIBILITY & ALIAS EDGES
// ============================================================================

/// The access level attached to an import directive.
///
/// Only [`Restricted`](ImportVisibility::Restricted) is implemented. The
/// other levels are declared so that the enum stays exhaustive: adding
/// support for one later is a compile-time-checked, localized change, and
/// until then the resolver rejects them explicitly rather than silently
/// treating them as open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImportVisibility {
    /// Visible only to references written lexically inside the owning
    /// construct's body. Never propagates to derived or nested constructs.
    Restricted,
    /// Reserved: would propagate to derived constructs. Unimplemented.
    Inherited,
    /// Reserved: would be visible to all. Unimplemented.
    Open,
}

impl fmt::Display for ImportVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportVisibility::Restricted => "restricted",
            ImportVisibility::Inherited => "inherited",
            ImportVisibility::Open => "open",
        };
        f.write_str(s)
    }
}

/// A resolved import: "this construct scope also searches that module
/// scope, under this visibility tag."
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AliasEdge {
    /// The imported module scope.
    pub target: ScopeId,
    /// Access level of the directive that created this edge.
    pub visibility: ImportVisibility,
    /// The construct scope that declared the directive. Lookup consults
    /// the edge only when the reference point's innermost enclosing
    /// construct is exactly this scope.
    pub owner: ScopeId,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why an import directive was rejected.
///
/// Each of these is fatal to the single directive (no alias edge is
/// attached) but must not stop processing of the rest of the declaration
/// tree; see [`attach_imports`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The target path does not resolve to anything.
    #[error("unknown import target `{path}`")]
    UnknownTarget {
        /// The path as written in the directive.
        path: SmolStr,
    },
    /// The target resolves, but to something that is not a module.
    #[error("import target `{path}` is not a module")]
    NotANamespace {
        /// The path as written in the directive.
        path: SmolStr,
    },
    /// The requested access level is declared but not implemented.
    #[error("`{requested}` import visibility is not supported yet")]
    UnsupportedVisibility {
        /// The rejected access level.
        requested: ImportVisibility,
    },
    /// The directive appeared outside any construct.
    #[error("scoped import directive cannot be used outside a construct")]
    GlobalScope,
}

// ============================================================================
// DIRECTIVE RESOLUTION
// ============================================================================

/// Resolve one import directive and attach its alias edge to `owner`.
///
/// `target` is resolved by qualified-name resolution (`::`-separated
/// segments) against the scope chain enclosing the directive's point. The
/// enclosing lookup is the plain lexical one: the restricted visibility
/// being defined here takes no part in resolving its own target.
pub fn resolve_import(
    tree: &mut ScopeTree,
    owner: ScopeId,
    target: &str,
    visibility: ImportVisibility,
) -> Result<(), ImportError> {
    let target_scope = resolve_target_path(tree, owner, target)?;

    if visibility != ImportVisibility::Restricted {
        debug!(?owner, %target, %visibility, "rejecting unimplemented import visibility");
        return Err(ImportError::UnsupportedVisibility {
            requested: visibility,
        });
    }

    // Rejected at attachment, not deferred to lookup: an import with
    // restricted visibility is meaningless without a construct to
    // restrict it to.
    if !tree.kind(owner).is_construct() {
        debug!(?owner, %target, "rejecting import directive outside a construct");
        return Err(ImportError::GlobalScope);
    }

    tree.attach_edge(
        owner,
        AliasEdge {
            target: target_scope,
            visibility,
            owner,
        },
    );
    debug!(?owner, %target, ?target_scope, "attached restricted import");
    Ok(())
}

/// Resolve a `::`-separated target path to a module scope.
fn resolve_target_path(
    tree: &ScopeTree,
    origin: ScopeId,
    path: &str,
) -> Result<ScopeId, ImportError> {
    let mut segments = path.split("::");
    let first = segments.next().unwrap_or(path);

    let decl = lookup_enclosing(tree, origin, first).ok_or_else(|| ImportError::UnknownTarget {
        path: SmolStr::new(path),
    })?;
    let mut scope = module_scope_of(tree, decl).ok_or_else(|| ImportError::NotANamespace {
        path: SmolStr::new(path),
    })?;

    for segment in segments {
        let name = tree
            .interner()
            .get(segment)
            .ok_or_else(|| ImportError::UnknownTarget {
                path: SmolStr::new(path),
            })?;
        let decls = tree.lookup_local(scope, name);
        let &decl = decls.first().ok_or_else(|| ImportError::UnknownTarget {
            path: SmolStr::new(path),
        })?;
        scope = module_scope_of(tree, decl).ok_or_else(|| ImportError::NotANamespace {
            path: SmolStr::new(path),
        })?;
    }

    Ok(scope)
}

/// Find the first declaration of `name` on the lexical chain from
/// `origin` upward. Alias edges are never consulted here.
fn lookup_enclosing(tree: &ScopeTree, origin: ScopeId, name: &str) -> Option<DeclId> {
    let name = tree.interner().get(name)?;
    let mut current = Some(origin);
    while let Some(scope) = current {
        if let Some(&decl) = tree.lookup_local(scope, name).first() {
            return Some(decl);
        }
        current = tree.parent(scope);
    }
    None
}

/// The member scope of a module declaration, `None` when the declaration
/// is not a module.
fn module_scope_of(tree: &ScopeTree, decl: DeclId) -> Option<ScopeId> {
    let decl = tree.decl(decl);
    if decl.kind == super::scope::DeclKind::Module {
        decl.owned_scope
    } else {
        None
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// One parsed import directive, as handed over by the external parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDirective {
    /// The scope the directive was written in.
    pub owner: ScopeId,
    /// The target path as written, e.g. `"Utils"` or `"Outer::Inner"`.
    pub target: SmolStr,
    /// The requested access level.
    pub visibility: ImportVisibility,
}

/// Process a batch of directives in declaration order.
///
/// A rejected directive is reported to `collector` and skipped; the construct
/// simply proceeds without the corresponding alias edge. One bad directive
/// never prevents unrelated constructs from being resolved.
pub fn attach_imports(
    tree: &mut ScopeTree,
    directives: &[ImportDirective],
    collector: &mut DiagnosticCollector,
) {
    for directive in directives {
        if let Err(err) = resolve_import(
            tree,
            directive.owner,
            &directive.target,
            directive.visibility,
        ) {
            collector.import_error(directive.owner, &directive.target, &err);
        }
    }
}

//! Unqualified lookup — resolving a bare identifier to a declaration.
//!
//! The search order, for a reference written at some scope:
//!
//! 1. Ordinary member/local lookup, scope by scope up the lexical chain.
//! 2. At the reference point's innermost enclosing construct, the
//!    construct's alias edges, but only when that construct is literally
//!    the edge's owner. A single ownership check is what keeps a
//!    restricted import invisible to derived constructs, to nested
//!    constructs, and to siblings under multiple inheritance alike.
//! 3. At each construct on the chain, inherited members from its bases.
//!    Base scopes are searched with their own alias edges excluded:
//!    restricted imports never propagate across an inheritance edge.
//!
//! Every step short-circuits on the first non-empty match, so an
//! import-derived match shadows anything inheritance would have found,
//! and an ordinary member shadows the import.
//!
//! `NotFound` and `Ambiguous` are ordinary result values, not errors:
//! an unresolved identifier is an expected query outcome that the
//! external reporting layer turns into a diagnostic.

use tracing::trace;

use super::scope::ScopeTree;
use crate::base::{DeclId, Name, ScopeId};

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of one lookup query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResult {
    /// Bound to a single declaration (or to the lead of an overload set).
    Found(DeclId),
    /// More than one independent candidate; the engine never guesses a
    /// winner.
    Ambiguous(Vec<DeclId>),
    /// No declaration is visible under this name.
    NotFound,
}

impl LookupResult {
    /// The bound declaration, if unambiguous.
    pub fn decl(&self) -> Option<DeclId> {
        match self {
            LookupResult::Found(d) => Some(*d),
            _ => None,
        }
    }

    /// Check if the lookup bound a declaration.
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    /// Check if the lookup was ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, LookupResult::Ambiguous(_))
    }

    /// Check if nothing was found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupResult::NotFound)
    }
}

// ============================================================================
// MEMBER LOOKUP SEAM
// ============================================================================

/// Ordinary member lookup within a single scope.
///
/// This is the seam to the surrounding front end's full member-lookup
/// machinery (templates, argument-dependent lookup, access control). The
/// engine only requires that it report [`LookupResult::NotFound`] when it
/// has nothing for a scope; the default [`LocalMemberLookup`] consults the
/// scope's own symbol table and nothing else.
pub trait MemberLookup {
    /// Look up `name` among the members of exactly `scope`.
    fn lookup_member(&self, tree: &ScopeTree, scope: ScopeId, name: Name) -> LookupResult;
}

/// Default member lookup over the tree's own symbol tables.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalMemberLookup;

impl MemberLookup for LocalMemberLookup {
    fn lookup_member(&self, tree: &ScopeTree, scope: ScopeId, name: Name) -> LookupResult {
        let decls = tree.lookup_local(scope, name);
        match decls {
            [] => LookupResult::NotFound,
            // An overload set binds as a unit; overload resolution proper
            // is not modeled here, so the set is represented by its first
            // declaration.
            [first, ..] => LookupResult::Found(*first),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Read-only lookup queries over a completed [`ScopeTree`].
///
/// The resolver borrows the tree immutably, so all alias edges must be
/// attached before the first query; holding a `Resolver` guarantees the
/// tree cannot change underneath it. Queries are pure reads and may run
/// from multiple threads.
#[derive(Clone, Debug)]
pub struct Resolver<'a, M = LocalMemberLookup> {
    tree: &'a ScopeTree,
    members: M,
}

impl<'a> Resolver<'a, LocalMemberLookup> {
    /// Create a resolver using the default member lookup.
    pub fn new(tree: &'a ScopeTree) -> Self {
        Self {
            tree,
            members: LocalMemberLookup,
        }
    }
}

impl<'a, M: MemberLookup> Resolver<'a, M> {
    /// Create a resolver with an external member-lookup collaborator.
    pub fn with_member_lookup(tree: &'a ScopeTree, members: M) -> Self {
        Self { tree, members }
    }

    /// The tree this resolver queries.
    pub fn tree(&self) -> &'a ScopeTree {
        self.tree
    }

    /// Resolve an unqualified identifier referenced at `reference_point`.
    pub fn lookup(&self, reference_point: ScopeId, name: &str) -> LookupResult {
        // A name that was never declared anywhere is not in the interner.
        let Some(name) = self.tree.interner().get(name) else {
            return LookupResult::NotFound;
        };
        self.lookup_name(reference_point, name)
    }

    /// Resolve an identifier used where a type is required.
    ///
    /// Runs the ordinary lookup and then filters to type-introducing
    /// declarations, so `NotFound` here distinguishes "unknown type name"
    /// from a value binding of the same identifier.
    pub fn lookup_type(&self, reference_point: ScopeId, name: &str) -> LookupResult {
        match self.lookup(reference_point, name) {
            LookupResult::Found(d) if self.tree.decl(d).kind.introduces_type() => {
                LookupResult::Found(d)
            }
            LookupResult::Found(_) => LookupResult::NotFound,
            LookupResult::Ambiguous(candidates) => {
                let types: Vec<_> = candidates
                    .into_iter()
                    .filter(|&d| self.tree.decl(d).kind.introduces_type())
                    .collect();
                match types.len() {
                    0 => LookupResult::NotFound,
                    1 => LookupResult::Found(types[0]),
                    _ => LookupResult::Ambiguous(types),
                }
            }
            LookupResult::NotFound => LookupResult::NotFound,
        }
    }

    fn lookup_name(&self, reference_point: ScopeId, name: Name) -> LookupResult {
        let innermost = self.tree.enclosing_construct(reference_point);

        let mut current = Some(reference_point);
        while let Some(scope) = current {
            // Ordinary members of this scope win over everything below.
            match self.members.lookup_member(self.tree, scope, name) {
                LookupResult::NotFound => {}
                found => {
                    trace!(?scope, "bound by ordinary member lookup");
                    return found;
                }
            }

            if self.tree.kind(scope).is_construct() {
                // Alias edges are usable only from inside the body of the
                // construct that declared them.
                if Some(scope) == innermost {
                    match self.lookup_via_imports(scope, name) {
                        LookupResult::NotFound => {}
                        found => {
                            trace!(?scope, "bound through restricted import");
                            return found;
                        }
                    }
                }

                match self.lookup_inherited(scope, name) {
                    LookupResult::NotFound => {}
                    found => {
                        trace!(?scope, "bound through inherited scope");
                        return found;
                    }
                }
            }

            current = self.tree.parent(scope);
        }

        LookupResult::NotFound
    }

    /// Consult `construct`'s alias edges, in directive order.
    fn lookup_via_imports(&self, construct: ScopeId, name: Name) -> LookupResult {
        let mut candidates: Vec<DeclId> = Vec::new();

        for edge in self.tree.alias_edges(construct) {
            if edge.owner != construct {
                continue;
            }
            // Unimplemented visibility tags never match; they are rejected,
            // not treated as open.
            if edge.visibility != super::import::ImportVisibility::Restricted {
                continue;
            }
            match self.members.lookup_member(self.tree, edge.target, name) {
                LookupResult::Found(d) => {
                    // Deduplicating by declaration keeps a re-attached
                    // identical directive idempotent.
                    if !candidates.contains(&d) {
                        candidates.push(d);
                    }
                }
                LookupResult::Ambiguous(v) => return LookupResult::Ambiguous(v),
                LookupResult::NotFound => {}
            }
        }

        match candidates.len() {
            0 => LookupResult::NotFound,
            1 => LookupResult::Found(candidates[0]),
            _ => LookupResult::Ambiguous(candidates),
        }
    }

    /// Search `construct`'s bases for an inherited member.
    ///
    /// Each base contributes at most one candidate, found by ordinary
    /// member lookup on the base followed by the base's own bases. Alias
    /// edges of every base are excluded outright, whatever their tag.
    /// Distinct candidates from independent bases are ambiguous; reaching
    /// the same declaration through two paths of a diamond is not.
    fn lookup_inherited(&self, construct: ScopeId, name: Name) -> LookupResult {
        let mut candidates: Vec<DeclId> = Vec::new();

        for &base in self.tree.bases(construct) {
            match self.lookup_in_base(base, name) {
                LookupResult::Found(d) => {
                    if !candidates.contains(&d) {
                        candidates.push(d);
                    }
                }
                ambiguous @ LookupResult::Ambiguous(_) => return ambiguous,
                LookupResult::NotFound => {}
            }
        }

        match candidates.len() {
            0 => LookupResult::NotFound,
            1 => LookupResult::Found(candidates[0]),
            _ => LookupResult::Ambiguous(candidates),
        }
    }

    fn lookup_in_base(&self, base: ScopeId, name: Name) -> LookupResult {
        match self.members.lookup_member(self.tree, base, name) {
            LookupResult::NotFound => self.lookup_inherited(base, name),
            found => found,
        }
    }
}

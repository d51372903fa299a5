//! Scope model and per-scope symbol tables.
//!
//! The scope tree is arena-backed: [`ScopeTree`] owns every scope and every
//! declaration in flat vectors, and all links between them (parent chains,
//! base-construct lists, alias-edge targets) are [`ScopeId`]/[`DeclId`]
//! handles. Upward and lateral references therefore never create ownership
//! cycles.
//!
//! Construction happens in a single declaration-registration pass through
//! `&mut ScopeTree`; once a [`Resolver`](super::resolve::Resolver) borrows
//! the tree, the borrow checker guarantees no further mutation, which is
//! what makes lookups safe to run from multiple reader threads.

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

use super::import::AliasEdge;
use crate::base::{DeclId, Interner, Name, ScopeId};

// ============================================================================
// KINDS
// ============================================================================

/// The kind of a lexical scope.
///
/// The kind set is closed; lookup logic branches exhaustively on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// A namespace-like scope. Only modules can be the target of an
    /// import directive.
    Module,
    /// A class-like construct scope, directly enclosed by a module.
    Construct,
    /// A construct scope lexically nested inside another construct.
    NestedConstruct,
    /// A function or statement body.
    Block,
}

impl ScopeKind {
    /// Check if this scope is a construct (top-level or nested).
    pub fn is_construct(self) -> bool {
        matches!(self, ScopeKind::Construct | ScopeKind::NestedConstruct)
    }

    /// Check if this scope is a module.
    pub fn is_module(self) -> bool {
        matches!(self, ScopeKind::Module)
    }
}

/// The kind of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A module (namespace) declaration; owns a member scope.
    Module,
    /// A construct (class-like) declaration; owns a member scope.
    Construct,
    /// A non-construct type declaration (e.g. a type alias).
    Type,
    /// A variable or constant.
    Value,
    /// A function. The only overloadable kind.
    Function,
}

impl DeclKind {
    /// Check if several declarations of this kind may share a name in
    /// one scope.
    pub fn is_overloadable(self) -> bool {
        matches!(self, DeclKind::Function)
    }

    /// Check if a reference to this declaration names a type.
    pub fn introduces_type(self) -> bool {
        matches!(self, DeclKind::Construct | DeclKind::Type)
    }

    /// Human-readable kind name for diagnostics.
    pub fn display(self) -> &'static str {
        match self {
            DeclKind::Module => "module",
            DeclKind::Construct => "construct",
            DeclKind::Type => "type",
            DeclKind::Value => "value",
            DeclKind::Function => "function",
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A single named declaration, owned by exactly one scope's symbol table.
#[derive(Clone, Debug)]
pub struct Declaration {
    /// The declared name.
    pub name: Name,
    /// What kind of entity this declares.
    pub kind: DeclKind,
    /// The scope whose symbol table owns this declaration.
    pub declaring_scope: ScopeId,
    /// For `Module` and `Construct` declarations, the member scope they
    /// introduce. `None` for all other kinds.
    pub owned_scope: Option<ScopeId>,
}

/// Error raised when a name is declared twice as a non-overloadable kind
/// in the same scope.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("duplicate declaration of `{name}`")]
pub struct DuplicateDeclaration {
    /// The conflicting name.
    pub name: SmolStr,
}

// ============================================================================
// SCOPE TREE
// ============================================================================

#[derive(Debug)]
struct ScopeData {
    kind: ScopeKind,
    /// Navigation-only link to the lexically enclosing scope.
    /// `None` only for the root module.
    parent: Option<ScopeId>,
    /// Local symbol table. A name maps to one declaration, or to several
    /// when they form an overload set.
    symbols: IndexMap<Name, Vec<DeclId>>,
    /// Alias edges attached by import directives, in directive order.
    alias_edges: Vec<AliasEdge>,
    /// Base constructs, in declaration order. Empty for non-constructs.
    bases: Vec<ScopeId>,
}

impl ScopeData {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            symbols: IndexMap::new(),
            alias_edges: Vec::new(),
            bases: Vec::new(),
        }
    }
}

/// The arena of scopes and declarations for one declaration tree.
///
/// Built once by the external parser driving [`ScopeTree::add_module`],
/// [`ScopeTree::add_construct`], [`ScopeTree::add_block`] and
/// [`ScopeTree::declare`], then queried read-only through a
/// [`Resolver`](super::resolve::Resolver).
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
    decls: Vec<Declaration>,
    interner: Interner,
}

impl ScopeTree {
    /// Create a tree containing only the root module scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeData::new(ScopeKind::Module, None)],
            decls: Vec::new(),
            interner: Interner::new(),
        }
    }

    /// The root module scope.
    pub fn root(&self) -> ScopeId {
        ScopeId::from_raw(0)
    }

    /// The interner holding all declared names.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// The kind of a scope.
    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.index()].kind
    }

    /// The lexically enclosing scope, `None` for the root module.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    /// Base constructs of a construct scope, in declaration order.
    pub fn bases(&self, scope: ScopeId) -> &[ScopeId] {
        &self.scopes[scope.index()].bases
    }

    /// Alias edges attached to a scope, in directive order.
    pub fn alias_edges(&self, scope: ScopeId) -> &[AliasEdge] {
        &self.scopes[scope.index()].alias_edges
    }

    /// Access a declaration by handle.
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    /// The declared name of a declaration, as a string.
    pub fn decl_name(&self, id: DeclId) -> SmolStr {
        self.interner
            .resolve(self.decl(id).name)
            .unwrap_or_default()
    }

    /// Total number of scopes in the tree.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Total number of declarations in the tree.
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Declare a module named `name` inside `parent` and create its
    /// member scope.
    pub fn add_module(
        &mut self,
        parent: ScopeId,
        name: &str,
    ) -> Result<ScopeId, DuplicateDeclaration> {
        self.ensure_declarable(parent, name, DeclKind::Module)?;
        let scope = self.push_scope(ScopeKind::Module, parent);
        self.declare_in(parent, name, DeclKind::Module, Some(scope))?;
        Ok(scope)
    }

    /// Declare a construct named `name` inside `parent` and create its
    /// member scope.
    ///
    /// The new scope's kind is [`ScopeKind::NestedConstruct`] when `parent`
    /// is itself a construct scope. `bases` lists the construct scopes this
    /// construct inherits from, in declaration order; bases are independently
    /// owned and may be shared by several derived constructs.
    pub fn add_construct(
        &mut self,
        parent: ScopeId,
        name: &str,
        bases: &[ScopeId],
    ) -> Result<ScopeId, DuplicateDeclaration> {
        self.ensure_declarable(parent, name, DeclKind::Construct)?;
        let kind = if self.kind(parent).is_construct() {
            ScopeKind::NestedConstruct
        } else {
            ScopeKind::Construct
        };
        let scope = self.push_scope(kind, parent);
        self.scopes[scope.index()].bases = bases.to_vec();
        self.declare_in(parent, name, DeclKind::Construct, Some(scope))?;
        Ok(scope)
    }

    /// Create an anonymous block scope (e.g. a member-function body)
    /// inside `parent`.
    pub fn add_block(&mut self, parent: ScopeId) -> ScopeId {
        self.push_scope(ScopeKind::Block, parent)
    }

    /// Record a declaration of `name` with the given kind in `scope`.
    ///
    /// Fails with [`DuplicateDeclaration`] only when the name is already
    /// taken by a declaration that cannot form an overload set with the
    /// new one.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: DeclKind,
    ) -> Result<DeclId, DuplicateDeclaration> {
        self.declare_in(scope, name, kind, None)
    }

    /// Append an alias edge to `owner`. Only the import directive
    /// resolver calls this, after validating the directive.
    pub(crate) fn attach_edge(&mut self, owner: ScopeId, edge: AliasEdge) {
        self.scopes[owner.index()].alias_edges.push(edge);
    }

    fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId::from_raw(self.scopes.len() as u32);
        self.scopes.push(ScopeData::new(kind, Some(parent)));
        id
    }

    /// Check that declaring `name` with `kind` in `scope` would not
    /// conflict. Called before creating a member scope so that a rejected
    /// declaration leaves no orphan scope behind.
    fn ensure_declarable(
        &self,
        scope: ScopeId,
        name: &str,
        kind: DeclKind,
    ) -> Result<(), DuplicateDeclaration> {
        let Some(interned) = self.interner.get(name) else {
            return Ok(());
        };
        if let Some(existing) = self.scopes[scope.index()].symbols.get(&interned) {
            let overloads = kind.is_overloadable()
                && existing
                    .iter()
                    .all(|&id| self.decls[id.index()].kind.is_overloadable());
            if !overloads {
                return Err(DuplicateDeclaration {
                    name: SmolStr::new(name),
                });
            }
        }
        Ok(())
    }

    fn declare_in(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: DeclKind,
        owned_scope: Option<ScopeId>,
    ) -> Result<DeclId, DuplicateDeclaration> {
        self.ensure_declarable(scope, name, kind)?;
        let interned = self.interner.intern(name);

        let id = DeclId::from_raw(self.decls.len() as u32);
        self.decls.push(Declaration {
            name: interned,
            kind,
            declaring_scope: scope,
            owned_scope,
        });
        self.scopes[scope.index()]
            .symbols
            .entry(interned)
            .or_default()
            .push(id);
        Ok(id)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Declarations of `name` in exactly this scope, with no parent
    /// traversal. Several entries only for overload sets.
    pub fn lookup_local(&self, scope: ScopeId, name: Name) -> &[DeclId] {
        self.scopes[scope.index()]
            .symbols
            .get(&name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The innermost construct scope enclosing `scope`, including `scope`
    /// itself. `None` when the reference point is not inside any construct.
    pub fn enclosing_construct(&self, scope: ScopeId) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if self.kind(s).is_construct() {
                return Some(s);
            }
            current = self.parent(s);
        }
        None
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

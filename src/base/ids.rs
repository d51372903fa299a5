//! Arena handles for scopes and declarations.

use std::fmt;

/// A handle to a scope stored in a [`ScopeTree`](crate::sema::ScopeTree).
///
/// `ScopeId` is a lightweight handle (just a u32) into the scope arena.
/// Parent and base links between scopes are stored as `ScopeId`s rather
/// than references, which keeps the scope graph free of ownership cycles:
/// the arena owns every scope, and all upward/lateral links are plain
/// indices resolved at lookup time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(u32);

impl ScopeId {
    /// Create a new ScopeId from a raw index.
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// A handle to a declaration stored in a [`ScopeTree`](crate::sema::ScopeTree).
///
/// A declaration is owned by exactly one scope's symbol table; the `DeclId`
/// is what lookup results hand back to callers. Comparing two `DeclId`s is
/// the identity test for "did these two references bind to the same thing".
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DeclId(u32);

impl DeclId {
    /// Create a new DeclId from a raw index.
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

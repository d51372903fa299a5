//! Structured outcomes for the external reporting layer.
//!
//! The engine never formats user-facing messages or tracks source
//! locations; it hands the reporting layer a [`Diagnostic`] with a stable
//! code, the scope it arose in, and a short description. Collecting rather
//! than returning errors is what lets one bad import directive leave the
//! rest of the declaration tree unaffected.

use std::sync::Arc;

use super::import::ImportError;
use super::scope::DuplicateDeclaration;
use crate::base::{DeclId, ScopeId};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic produced during declaration registration or directive
/// attachment.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// The scope the problem arose in.
    pub scope: ScopeId,
    /// Severity level.
    pub severity: Severity,
    /// Stable diagnostic code (e.g. "E0004").
    pub code: &'static str,
    /// Short description. Message *formatting* belongs to the caller;
    /// this is the engine's plain rendering of the condition.
    pub message: Arc<str>,
}

/// Stable diagnostic codes.
pub mod codes {
    /// Identifier did not resolve to any declaration.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// Identifier resolved to more than one independent candidate.
    pub const AMBIGUOUS_REFERENCE: &str = "E0002";
    /// Conflicting non-overloadable declarations in one scope.
    pub const DUPLICATE_DECLARATION: &str = "E0003";
    /// Import directive target did not resolve.
    pub const UNKNOWN_IMPORT_TARGET: &str = "E0004";
    /// Import directive target is not a module.
    pub const IMPORT_NOT_A_MODULE: &str = "E0005";
    /// Import directive requested an unimplemented access level.
    pub const UNSUPPORTED_IMPORT_VISIBILITY: &str = "E0006";
    /// Import directive used outside any construct.
    pub const IMPORT_OUTSIDE_CONSTRUCT: &str = "E0007";
}

// ============================================================================
// COLLECTOR
// ============================================================================

/// Collects diagnostics during the declaration pass.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a rejected import directive.
    pub fn import_error(&mut self, scope: ScopeId, target: &str, error: &ImportError) {
        let code = match error {
            ImportError::UnknownTarget { .. } => codes::UNKNOWN_IMPORT_TARGET,
            ImportError::NotANamespace { .. } => codes::IMPORT_NOT_A_MODULE,
            ImportError::UnsupportedVisibility { .. } => codes::UNSUPPORTED_IMPORT_VISIBILITY,
            ImportError::GlobalScope => codes::IMPORT_OUTSIDE_CONSTRUCT,
        };
        self.add(Diagnostic {
            scope,
            severity: Severity::Error,
            code,
            message: Arc::from(format!("import of `{target}` rejected: {error}")),
        });
    }

    /// Record a conflicting declaration.
    pub fn duplicate_declaration(&mut self, scope: ScopeId, error: &DuplicateDeclaration) {
        self.add(Diagnostic {
            scope,
            severity: Severity::Error,
            code: codes::DUPLICATE_DECLARATION,
            message: Arc::from(error.to_string()),
        });
    }

    /// Record an identifier that resolved to nothing.
    pub fn unresolved_reference(&mut self, scope: ScopeId, name: &str) {
        self.add(Diagnostic {
            scope,
            severity: Severity::Error,
            code: codes::UNRESOLVED_REFERENCE,
            message: Arc::from(format!("unresolved reference: `{name}`")),
        });
    }

    /// Record an ambiguous identifier with its candidate set.
    pub fn ambiguous_reference(&mut self, scope: ScopeId, name: &str, candidates: &[DeclId]) {
        self.add(Diagnostic {
            scope,
            severity: Severity::Error,
            code: codes::AMBIGUOUS_REFERENCE,
            message: Arc::from(format!(
                "ambiguous reference: `{name}` has {} candidates",
                candidates.len()
            )),
        });
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics raised in a specific scope.
    pub fn diagnostics_for_scope(&self, scope: ScopeId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.scope == scope).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

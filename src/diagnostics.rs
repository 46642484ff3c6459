// ABOUTME: Diagnostics accumulator for non-fatal warnings during a rollout.
// ABOUTME: Collects warnings that shouldn't fail a rollout but should be shown to users.

/// Collects non-fatal warnings during rollout operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a rollout.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for a name that matched more than one identifier.
    pub fn ambiguous_name(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::AmbiguousName,
            message: message.into(),
        }
    }

    /// Create a warning for a registered revision no service points at.
    pub fn orphaned_revision(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::OrphanedRevision,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Several listed identifiers share the requested name; the first was used.
    AmbiguousName,
    /// A new task definition revision was registered but the service update failed.
    OrphanedRevision,
}

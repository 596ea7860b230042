//! Destination cleanup behavior

/// How the destination root is pruned before the copy phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupMode {
    /// Don't delete anything
    #[default]
    None,

    /// Delete every top-level destination entry unconditionally
    FullWipe,

    /// Delete only top-level entries the manifest would exclude, leaving
    /// matched content in place for the copy phase to overwrite
    PreserveMatched,
}

impl CleanupMode {
    /// Whether this mode performs any deletion at all
    pub fn is_destructive(&self) -> bool {
        !matches!(self, CleanupMode::None)
    }
}

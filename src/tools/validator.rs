//! Command Safety Screening
//!
//! Denylist screening for raw command strings. Full shell semantics are part
//! of the tool contract here (callers compose pipelines and redirects), so
//! screening is literal lowercase substring containment over a fixed pattern
//! table. It is a tripwire against obviously destructive commands, not a
//! security boundary.

/// Patterns that block a command outright when contained anywhere in it.
///
/// Stored lowercase; matching lowercases the candidate command first.
pub const DANGEROUS_PATTERNS: &[&str] = &[
    "rm -rf /",
    "mkfs",
    "dd if=/dev/",
    "> /dev/sd",
    "format",
    ":(){ :|:& };:",
];

/// Error raised when a command contains a denylisted pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Potentially dangerous command blocked: {pattern}")]
pub struct BlockedCommand {
    /// The pattern that matched
    pub pattern: &'static str,
}

/// Command screen that rejects denylisted command strings
///
/// The pattern table is fixed at construction and never mutated; the
/// process-wide default is [`DANGEROUS_PATTERNS`].
pub struct CommandValidator {
    patterns: &'static [&'static str],
}

impl Default for CommandValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandValidator {
    /// Create a validator with the default pattern table
    pub fn new() -> Self {
        Self {
            patterns: DANGEROUS_PATTERNS,
        }
    }

    /// Create a validator with a custom pattern table
    ///
    /// Patterns must be lowercase; matching is containment on the
    /// lowercased command.
    pub fn with_patterns(patterns: &'static [&'static str]) -> Self {
        Self { patterns }
    }

    /// Screen a command string against the denylist
    ///
    /// Returns the first matching pattern in table order. The match is a
    /// plain substring check: `format` also trips on `formatted`, which is
    /// the intended coarseness for a tripwire.
    pub fn validate(&self, command: &str) -> Result<(), BlockedCommand> {
        let lowered = command.to_lowercase();
        for pattern in self.patterns {
            if lowered.contains(pattern) {
                return Err(BlockedCommand { pattern });
            }
        }
        Ok(())
    }

    /// Get the active pattern table
    pub fn patterns(&self) -> &[&'static str] {
        self.patterns
    }
}

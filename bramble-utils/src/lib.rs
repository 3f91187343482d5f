/// Generic embed constants shared across commands and event logging.
pub mod embed;
/// Shared formatting helpers (duration labels).
pub mod formatting;
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// One-shot delayed un-mute tasks.
pub mod scheduler;

/// Fallback message-command prefix when `COMMAND_PREFIX` is unset.
pub const DEFAULT_COMMAND_PREFIX: char = '.';

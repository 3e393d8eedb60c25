//! Per-render memory behind `{onlevel}`, `{store}` and `{restore}`.
//!
//! A compiled format carries level-conditional escape sequences as packed
//! `${onlevel:<level>:<sequence>:<previous>}` fields. At render time the
//! [`Restorer`] decides which of them fire and remembers enough to undo
//! them:
//!
//! - `previous`: the style that was active before the last sequence fired.
//! - `current`: the last sequence that fired.
//! - `stored`: `previous + current`, captured by `{store}`.
//!
//! `{restore}` emits `stored`, or `previous` when nothing was stored during
//! this render. `previous` and `current` carry over between renders;
//! `stored` is cleared at the start of each one.

use std::cell::RefCell;

use parking_lot::Mutex;

use crate::host::Level;

/// Field name of a packed level-conditional sequence.
pub(crate) const ON_LEVEL: &str = "onlevel";
/// Field name of the store marker.
pub(crate) const STORE: &str = "store";
/// Field name of the restore marker.
pub(crate) const RESTORE: &str = "restore";

/// A level-conditional escape sequence, as carried in a compiled format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnLevelToken {
    /// Lowercase level name the sequence is bound to.
    pub level: String,
    /// Escapes emitted when the record level matches.
    pub sequence: String,
    /// Escapes re-establishing the style active at the directive's site.
    pub previous: String,
}

impl OnLevelToken {
    pub const DELIMITER: char = ':';

    /// Joins the parts as `level:sequence:previous`.
    pub fn pack(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.level,
            Self::DELIMITER,
            self.sequence,
            Self::DELIMITER,
            self.previous
        )
    }

    /// Splits a packed value on the first two delimiters; the previous
    /// style keeps any further ones. Returns `None` with fewer than three
    /// parts.
    pub fn unpack(packed: &str) -> Option<Self> {
        let mut parts = packed.splitn(3, Self::DELIMITER);
        let level = parts.next()?;
        let sequence = parts.next()?;
        let previous = parts.next()?;
        Some(Self {
            level: level.to_string(),
            sequence: sequence.to_string(),
            previous: previous.to_string(),
        })
    }

    pub fn matches(&self, level: Level) -> bool {
        self.level.eq_ignore_ascii_case(level.as_str())
    }
}

/// The three remembered style strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    pub previous: String,
    pub current: String,
    pub stored: String,
}

/// Storage for [`Slots`].
///
/// Every read-modify-write of the slots goes through
/// [`with_slots`](Self::with_slots), so an implementation decides whether
/// renders may share one restorer across threads.
pub trait StyleMemory: Default {
    fn with_slots<T>(&self, f: impl FnOnce(&mut Slots) -> T) -> T;

    fn snapshot(&self) -> Slots {
        self.with_slots(|slots| slots.clone())
    }
}

/// Slots behind a mutex; formatters using it are `Sync`.
#[derive(Debug, Default)]
pub struct Locked(Mutex<Slots>);

impl StyleMemory for Locked {
    fn with_slots<T>(&self, f: impl FnOnce(&mut Slots) -> T) -> T {
        f(&mut self.0.lock())
    }
}

/// Unsynchronized slots for single-threaded use; formatters using it are
/// not `Sync`.
#[derive(Debug, Default)]
pub struct Unlocked(RefCell<Slots>);

impl StyleMemory for Unlocked {
    fn with_slots<T>(&self, f: impl FnOnce(&mut Slots) -> T) -> T {
        f(&mut self.0.borrow_mut())
    }
}

/// Resolves the style fields of one formatter.
#[derive(Debug, Default)]
pub struct Restorer<M: StyleMemory = Locked> {
    memory: M,
}

impl<M: StyleMemory> Restorer<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a packed `onlevel` value for a record at `level`.
    ///
    /// On a match the slots record the token's previous style and sequence
    /// and the sequence is returned. Otherwise, or when the value is
    /// malformed, nothing changes and the result is empty.
    pub fn handle_on_level(&self, level: Level, packed: &str) -> String {
        match OnLevelToken::unpack(packed) {
            Some(token) if token.matches(level) => self.memory.with_slots(|slots| {
                slots.previous = token.previous;
                slots.current = token.sequence.clone();
                token.sequence
            }),
            _ => String::new(),
        }
    }

    /// Captures `previous + current` for a later restore. Emits nothing.
    pub fn handle_store(&self) -> String {
        self.memory.with_slots(|slots| {
            slots.stored = format!("{}{}", slots.previous, slots.current);
        });
        String::new()
    }

    /// Returns the stored style, or the previous one if nothing was stored.
    pub fn handle_restore(&self) -> String {
        self.memory.with_slots(|slots| {
            if slots.stored.is_empty() {
                slots.previous.clone()
            } else {
                slots.stored.clone()
            }
        })
    }

    /// Clears the stored style. Called at the start of every render.
    pub fn reset(&self) {
        self.memory.with_slots(|slots| slots.stored.clear());
    }

    pub fn snapshot(&self) -> Slots {
        self.memory.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn token(level: &str, sequence: &str, previous: &str) -> String {
        OnLevelToken {
            level: level.into(),
            sequence: sequence.into(),
            previous: previous.into(),
        }
        .pack()
    }

    mod tokens {
        use super::*;

        #[test]
        fn pack_layout() {
            assert_eq!(token("error", "S", "P"), "error:S:P");
        }

        #[test]
        fn unpack_keeps_extra_delimiters_in_previous() {
            let parsed = OnLevelToken::unpack("info:S:P:Q").unwrap();
            assert_eq!(parsed.sequence, "S");
            assert_eq!(parsed.previous, "P:Q");
        }

        #[test]
        fn unpack_too_few_parts() {
            assert_eq!(OnLevelToken::unpack("info:S"), None);
            assert_eq!(OnLevelToken::unpack("info"), None);
        }

        #[test]
        fn matching_ignores_case() {
            let parsed = OnLevelToken::unpack("ERROR::").unwrap();
            assert!(parsed.matches(Level::Error));
            assert!(!parsed.matches(Level::Fatal));
        }

        proptest! {
            #[test]
            fn unpack_inverts_pack(
                level in "[a-z]{0,8}",
                sequence in "[^:]{0,16}",
                previous in ".{0,16}",
            ) {
                let original = OnLevelToken { level, sequence, previous };
                prop_assert_eq!(OnLevelToken::unpack(&original.pack()), Some(original));
            }
        }
    }

    mod restorer {
        use super::*;

        #[test]
        fn match_records_and_emits() {
            let restorer: Restorer = Restorer::new();
            assert_eq!(restorer.handle_on_level(Level::Error, &token("error", "S", "P")), "S");
            assert_eq!(
                restorer.snapshot(),
                Slots {
                    previous: "P".into(),
                    current: "S".into(),
                    stored: String::new(),
                }
            );
        }

        #[test]
        fn mismatch_is_inert() {
            let restorer: Restorer = Restorer::new();
            restorer.handle_on_level(Level::Error, &token("error", "S", "P"));
            assert_eq!(restorer.handle_on_level(Level::Info, &token("error", "X", "Y")), "");
            assert_eq!(restorer.snapshot().previous, "P");
        }

        #[test]
        fn malformed_is_inert() {
            let restorer: Restorer = Restorer::new();
            assert_eq!(restorer.handle_on_level(Level::Info, "info:S"), "");
            assert_eq!(restorer.snapshot(), Slots::default());
        }

        #[test]
        fn restore_prefers_stored() {
            let restorer: Restorer = Restorer::new();
            restorer.handle_on_level(Level::Info, &token("info", "S", "P"));
            assert_eq!(restorer.handle_store(), "");
            assert_eq!(restorer.handle_restore(), "PS");
        }

        #[test]
        fn restore_falls_back_to_previous() {
            let restorer: Restorer = Restorer::new();
            restorer.handle_on_level(Level::Info, &token("info", "S", "P"));
            assert_eq!(restorer.handle_restore(), "P");
        }

        #[test]
        fn restore_with_nothing_recorded_is_empty() {
            let restorer: Restorer = Restorer::new();
            assert_eq!(restorer.handle_restore(), "");
        }

        #[test]
        fn reset_clears_only_stored() {
            let restorer: Restorer = Restorer::new();
            restorer.handle_on_level(Level::Info, &token("info", "S", "P"));
            restorer.handle_store();
            restorer.reset();
            assert_eq!(restorer.handle_restore(), "P");
            assert_eq!(restorer.snapshot().current, "S");
        }

        #[test]
        fn unlocked_memory_behaves_the_same() {
            let restorer: Restorer<Unlocked> = Restorer::new();
            restorer.handle_on_level(Level::Debug, &token("debug", "S", "P"));
            restorer.handle_store();
            assert_eq!(restorer.handle_restore(), "PS");
            restorer.reset();
            assert_eq!(restorer.handle_restore(), "P");
        }
    }
}

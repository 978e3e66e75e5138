//! Engine-scoped notice sink.
//!
//! Coded, non-fatal diagnostics (lookup misses, removals, skipped duplicate
//! names) go through [`Notices`] instead of straight to the log macros, so
//! that each (code, subject) pair is reported at most once per session and
//! `end()` can silence the sink without touching global logger state. The
//! sink is owned by the engine instance, not process-global.

use rustc_hash::FxHashSet;

/// Lookup table of coded warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeCode {
    MissingSprite,
    MissingAudio,
    MissingObject,
    MissingMap,
    MissingCamera,
    ObjectRemoved,
    DuplicateName,
}

impl NoticeCode {
    /// Human-readable message for the code.
    pub fn message(&self) -> &'static str {
        match self {
            NoticeCode::MissingSprite => "sprite not found in registry",
            NoticeCode::MissingAudio => "audio clip not found in registry",
            NoticeCode::MissingObject => "game object not found in registry",
            NoticeCode::MissingMap => "map not found in registry",
            NoticeCode::MissingCamera => "camera not found in registry",
            NoticeCode::ObjectRemoved => "game object removed",
            NoticeCode::DuplicateName => "name already registered, skipping",
        }
    }
}

/// Deduplicating notice sink.
#[derive(Debug, Default)]
pub struct Notices {
    enabled: bool,
    seen: FxHashSet<(NoticeCode, String)>,
}

impl Notices {
    pub fn new() -> Self {
        Notices {
            enabled: true,
            seen: FxHashSet::default(),
        }
    }

    /// Warn once per (code, subject) pair for the life of the session.
    pub fn warn_once(&mut self, code: NoticeCode, subject: &str) {
        if !self.enabled {
            return;
        }
        if self.seen.insert((code, subject.to_string())) {
            log::warn!("{}: '{}'", code.message(), subject);
        }
    }

    /// Informational notice, not deduplicated.
    pub fn info(&mut self, code: NoticeCode, subject: &str) {
        if self.enabled {
            log::info!("{}: '{}'", code.message(), subject);
        }
    }

    /// Whether a (code, subject) pair has already been warned about.
    pub fn has_seen(&self, code: NoticeCode, subject: &str) -> bool {
        self.seen.contains(&(code, subject.to_string()))
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forget all dedupe history.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_once_dedupes_per_subject() {
        let mut notices = Notices::new();
        notices.warn_once(NoticeCode::MissingSprite, "hero");
        assert!(notices.has_seen(NoticeCode::MissingSprite, "hero"));
        // Same code, different subject is a fresh warning.
        assert!(!notices.has_seen(NoticeCode::MissingSprite, "villain"));
        // Different code, same subject is a fresh warning.
        assert!(!notices.has_seen(NoticeCode::MissingAudio, "hero"));
    }

    #[test]
    fn disabled_sink_records_nothing() {
        let mut notices = Notices::new();
        notices.disable();
        notices.warn_once(NoticeCode::MissingMap, "overworld");
        assert!(!notices.has_seen(NoticeCode::MissingMap, "overworld"));
        assert!(!notices.is_enabled());
    }

    #[test]
    fn clear_forgets_history() {
        let mut notices = Notices::new();
        notices.warn_once(NoticeCode::MissingCamera, "main");
        notices.clear();
        assert!(!notices.has_seen(NoticeCode::MissingCamera, "main"));
    }
}

//! Write-through store for the shared [`TradeSession`].

use tracing::{debug, warn};

use super::session::{TradeSession, TradeSessionPatch};
use crate::util::persistence::{PersistSaveError, SessionStorage};

/// Owns the current session and keeps its storage in sync after every write.
///
/// Storage failures never fail a write. The in-memory record is always
/// updated; the store just stops being durable until a save succeeds again.
pub struct SessionStore {
    session: TradeSession,
    storage: Box<dyn SessionStorage>,
    durable: bool,
}

impl SessionStore {
    /// Rehydrates from `storage`. Missing or malformed data yields defaults.
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let session = match storage.load() {
            Some(raw) => match serde_json::from_str::<TradeSession>(&raw) {
                Ok(session) => {
                    debug!(product = %session.name, "rehydrated trade session");
                    session
                }
                Err(err) => {
                    warn!("discarding unreadable persisted session: {err}");
                    TradeSession::default()
                }
            },
            None => TradeSession::default(),
        };

        Self {
            session,
            storage: Box::new(storage),
            durable: true,
        }
    }

    /// Snapshot of the full record.
    pub fn read(&self) -> TradeSession {
        self.session.clone()
    }

    /// Borrowed view, for callers that only look at a few fields.
    pub fn session(&self) -> &TradeSession {
        &self.session
    }

    /// Shallow-merges `patch` and persists the merged record.
    pub fn update(&mut self, patch: TradeSessionPatch) {
        if patch.is_empty() {
            return;
        }
        self.session.apply(patch);
        self.persist();
    }

    /// Back to defaults; the persisted entry is removed.
    pub fn reset(&mut self) {
        self.session = TradeSession::default();
        let result = self.storage.clear();
        self.record_outcome(result);
    }

    /// False once a save has failed and the session is page-lifetime only.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    fn persist(&mut self) {
        let result = serde_json::to_string_pretty(&self.session)
            .map_err(PersistSaveError::from)
            .and_then(|raw| self.storage.save(&raw));
        self.record_outcome(result);
    }

    fn record_outcome(&mut self, result: Result<(), PersistSaveError>) {
        match result {
            Ok(()) => {
                if !self.durable {
                    debug!("session storage recovered");
                }
                self.durable = true;
            }
            Err(err) => {
                if self.durable {
                    warn!("failed to persist trade session, keeping it in memory only: {err}");
                }
                self.durable = false;
            }
        }
    }
}

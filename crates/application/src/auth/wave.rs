//! Renewal wave bookkeeping
//!
//! A wave is one in-progress token renewal plus every caller waiting on
//! its outcome. At most one wave exists at a time.

use baza_domain::AccessToken;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::AuthError;

pub(crate) type RenewalOutcome = Result<AccessToken, AuthError>;

#[derive(Debug)]
struct PendingCaller {
    request_id: String,
    resolver: oneshot::Sender<RenewalOutcome>,
}

#[derive(Debug, Default)]
pub(crate) struct RefreshWave {
    pending: Vec<PendingCaller>,
}

impl RefreshWave {
    fn enqueue(&mut self, request_id: &str) -> oneshot::Receiver<RenewalOutcome> {
        let (resolver, receiver) = oneshot::channel();
        self.pending.push(PendingCaller {
            request_id: request_id.to_string(),
            resolver,
        });
        receiver
    }

    /// Delivers `outcome` to every waiter, in arrival order.
    pub(crate) fn settle(self, outcome: &RenewalOutcome) -> usize {
        let count = self.pending.len();
        for caller in self.pending {
            if caller.resolver.send(outcome.clone()).is_err() {
                tracing::debug!(request_id = %caller.request_id, "waiter dropped before renewal settled");
            }
        }
        count
    }
}

/// How a rejected request proceeds.
#[derive(Debug)]
pub(crate) enum Admission {
    /// Replay at once with a token stored after the request was sent.
    Replay(AccessToken),
    /// Wait for the wave; `opened` means this caller must start the renewal.
    Wait {
        receiver: oneshot::Receiver<RenewalOutcome>,
        opened: bool,
    },
}

/// The single renewal slot: `None` is idle, `Some` is renewing.
#[derive(Debug, Default)]
pub(crate) struct RenewalState {
    wave: Mutex<Option<RefreshWave>>,
}

impl RenewalState {
    /// Decides how a request rejected with 401 gets its replay token.
    ///
    /// While a wave is open the request always joins it. When idle,
    /// `current` may supply a token newer than the one the request carried,
    /// and the request replays with it; otherwise a wave is opened.
    pub(crate) fn admit(
        &self,
        request_id: &str,
        current: impl FnOnce() -> Option<AccessToken>,
    ) -> Admission {
        let mut slot = self.wave.lock();
        if slot.is_none()
            && let Some(token) = current()
        {
            return Admission::Replay(token);
        }
        let opened = slot.is_none();
        let receiver = slot.get_or_insert_with(RefreshWave::default).enqueue(request_id);
        Admission::Wait { receiver, opened }
    }

    /// Closes the active wave, returning it to idle.
    pub(crate) fn finish(&self) -> Option<RefreshWave> {
        self.wave.lock().take()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.wave.lock().is_some()
    }
}

//! UseCase: periodic lobby tick.
//!
//! Advances the countdown, emits the match start when it runs out, then
//! silently drops sessions whose transport is no longer open.

use std::sync::Arc;

use rand::Rng;
use rally_shared::time::Clock;

use crate::domain::{LobbyNotifier, TickOutcome};

use super::SharedLobby;

/// Match seeds are drawn from `[0, MAX_SEED)`
const MAX_SEED: u64 = 1_000_000_000;

pub struct TickLobbyUseCase {
    lobby: SharedLobby,
    notifier: Arc<dyn LobbyNotifier>,
    clock: Arc<dyn Clock>,
}

impl TickLobbyUseCase {
    pub fn new(
        lobby: SharedLobby,
        notifier: Arc<dyn LobbyNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lobby,
            notifier,
            clock,
        }
    }

    pub async fn execute(&self) -> TickOutcome {
        let mut lobby = self.lobby.lock().await;
        let open_count = lobby.registry.count_open();
        let outcome = lobby.state.on_tick(open_count, self.clock.now_millis());

        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Reverted => {
                tracing::info!("Countdown aborted, {} open sessions", open_count);
                self.notifier.broadcast_lobby(&lobby);
            }
            TickOutcome::CountingDown { remaining_ms } => {
                tracing::debug!("Countdown at {} ms", remaining_ms);
                self.notifier.broadcast_lobby(&lobby);
            }
            TickOutcome::MatchStarted => {
                let seed = rand::thread_rng().gen_range(0..MAX_SEED);
                let delivered = self.notifier.broadcast_match_start(&lobby, seed);
                tracing::info!("Match started with seed {} for {} sessions", seed, delivered);
                self.notifier.broadcast_lobby(&lobby);
            }
        }

        let pruned = lobby.registry.prune_closed();
        if !pruned.is_empty() {
            tracing::debug!("Pruned {} closed sessions after tick", pruned.len());
        }

        outcome
    }
}

//! Lobby state machine.
//!
//! `WAITING → COUNTDOWN → IN_MATCH`, driven by player joins, disconnects and
//! a periodic tick. The machine is pure: callers pass in the current open
//! player count and time, and act on the returned outcome (broadcasting,
//! emitting the match start).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::registry::SessionRegistry;

/// Tunables of the lobby state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyRules {
    /// Open sessions required to start (and keep) a countdown
    pub min_players: usize,
    /// Countdown length when entering or resetting `COUNTDOWN`
    pub countdown_ms: u64,
    /// Lobby tick period
    pub tick_ms: u64,
    /// Liveness sweep period
    pub sweep_ms: u64,
    /// Trailing window in which countdown resets are counted
    pub failsafe_window_ms: i64,
    /// Resets tolerated inside the window before the failsafe engages
    pub failsafe_max_resets: usize,
    /// Countdown ceiling once the failsafe engages
    pub failsafe_clamp_ms: u64,
    /// Simulation rate announced to clients in the welcome packet
    pub client_tick_rate: u32,
    pub world: WorldSize,
}

impl Default for LobbyRules {
    fn default() -> Self {
        Self {
            min_players: 10,
            countdown_ms: 20_000,
            tick_ms: 1_000,
            sweep_ms: 15_000,
            failsafe_window_ms: 30_000,
            failsafe_max_resets: 3,
            failsafe_clamp_ms: 10_000,
            client_tick_rate: 30,
            world: WorldSize::default(),
        }
    }
}

/// Dimensions of the match world sent with the start signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldSize {
    pub w: u32,
    pub h: u32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self { w: 8000, h: 8000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LobbyStatus {
    Waiting,
    Countdown,
    /// Terminal until process restart
    InMatch,
}

impl LobbyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LobbyStatus::Waiting => "WAITING",
            LobbyStatus::Countdown => "COUNTDOWN",
            LobbyStatus::InMatch => "IN_MATCH",
        }
    }
}

impl std::fmt::Display for LobbyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a player-join evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Match already running; nothing changed
    Spectating,
    /// Below the player threshold
    Waiting,
    CountdownStarted,
    /// Countdown restarted because the lobby grew
    CountdownReset,
    CountdownUnchanged,
}

/// Result of a lobby tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting down
    Idle,
    /// Population fell below the threshold
    Reverted,
    CountingDown { remaining_ms: u64 },
    MatchStarted,
}

/// Result of a disconnect evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// Match running; no broadcast
    Ignored,
    Reverted,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct LobbyState {
    status: LobbyStatus,
    countdown_ms: u64,
    last_player_count: usize,
    /// Timestamps (ms) of countdown resets, oldest first
    reset_history: VecDeque<i64>,
    rules: LobbyRules,
}

impl LobbyState {
    pub fn new(rules: LobbyRules) -> Self {
        Self {
            status: LobbyStatus::Waiting,
            countdown_ms: 0,
            last_player_count: 0,
            reset_history: VecDeque::new(),
            rules,
        }
    }

    pub fn status(&self) -> LobbyStatus {
        self.status
    }

    pub fn countdown_ms(&self) -> u64 {
        self.countdown_ms
    }

    pub fn last_player_count(&self) -> usize {
        self.last_player_count
    }

    /// Number of resets currently recorded in the failsafe window
    pub fn recorded_resets(&self) -> usize {
        self.reset_history.len()
    }

    pub fn rules(&self) -> &LobbyRules {
        &self.rules
    }

    /// Evaluate a completed handshake.
    pub fn on_player_join(&mut self, open_count: usize, now: i64) -> JoinOutcome {
        if self.status == LobbyStatus::InMatch {
            return JoinOutcome::Spectating;
        }

        let outcome = if open_count < self.rules.min_players {
            self.revert_to_waiting();
            JoinOutcome::Waiting
        } else if self.status != LobbyStatus::Countdown {
            self.status = LobbyStatus::Countdown;
            self.countdown_ms = self.rules.countdown_ms;
            self.reset_history.clear();
            JoinOutcome::CountdownStarted
        } else if open_count > self.last_player_count {
            self.countdown_ms = self.rules.countdown_ms;
            self.reset_history.push_back(now);
            self.prune_resets(now);
            JoinOutcome::CountdownReset
        } else {
            JoinOutcome::CountdownUnchanged
        };

        self.last_player_count = open_count;
        outcome
    }

    /// Advance the countdown by one tick period.
    pub fn on_tick(&mut self, open_count: usize, now: i64) -> TickOutcome {
        if self.status != LobbyStatus::Countdown {
            return TickOutcome::Idle;
        }

        if open_count < self.rules.min_players {
            self.revert_to_waiting();
            return TickOutcome::Reverted;
        }

        self.prune_resets(now);
        if self.reset_history.len() > self.rules.failsafe_max_resets
            && self.countdown_ms > self.rules.failsafe_clamp_ms
        {
            tracing::info!(
                "Countdown failsafe engaged after {} resets, clamping to {} ms",
                self.reset_history.len(),
                self.rules.failsafe_clamp_ms
            );
            self.countdown_ms = self.rules.failsafe_clamp_ms;
        }

        self.countdown_ms = self.countdown_ms.saturating_sub(self.rules.tick_ms);
        if self.countdown_ms == 0 {
            self.status = LobbyStatus::InMatch;
            TickOutcome::MatchStarted
        } else {
            TickOutcome::CountingDown {
                remaining_ms: self.countdown_ms,
            }
        }
    }

    /// Evaluate a closed connection.
    pub fn on_disconnect(&mut self, open_count: usize) -> DisconnectOutcome {
        if self.status == LobbyStatus::InMatch {
            return DisconnectOutcome::Ignored;
        }
        if open_count < self.rules.min_players {
            let was_waiting = self.status == LobbyStatus::Waiting;
            self.revert_to_waiting();
            if was_waiting {
                DisconnectOutcome::Unchanged
            } else {
                DisconnectOutcome::Reverted
            }
        } else {
            DisconnectOutcome::Unchanged
        }
    }

    fn revert_to_waiting(&mut self) {
        self.status = LobbyStatus::Waiting;
        self.countdown_ms = 0;
    }

    fn prune_resets(&mut self, now: i64) {
        let cutoff = now - self.rules.failsafe_window_ms;
        while self
            .reset_history
            .front()
            .is_some_and(|&reset_at| reset_at < cutoff)
        {
            self.reset_history.pop_front();
        }
    }
}

impl Default for LobbyState {
    fn default() -> Self {
        Self::new(LobbyRules::default())
    }
}

/// Registry and lobby state, mutated together as one unit
#[derive(Debug, Default)]
pub struct Lobby {
    pub registry: SessionRegistry,
    pub state: LobbyState,
}

impl Lobby {
    pub fn new(rules: LobbyRules) -> Self {
        Self {
            registry: SessionRegistry::new(),
            state: LobbyState::new(rules),
        }
    }

    pub fn rules(&self) -> &LobbyRules {
        self.state.rules()
    }
}

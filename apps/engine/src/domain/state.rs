//! Round state machine: dice counts, current bid, turn pointer, history.
//!
//! `RoundState` is the single writer of game state. Every mutation goes
//! through [`RoundState::apply_bid`], [`RoundState::apply_challenge`] or
//! [`RoundState::start_new_round`]; hands stay private and only a
//! player-scoped [`PlayerView`] leaves this module.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::bidding::{check_successor, Bid};
use crate::domain::challenge::{resolve, ChallengeOutcome};
use crate::domain::dice::{roll_hands, total_dice_in_play, Hand};
use crate::domain::history::{recent, HistoryEvent};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::{face_range, MIN_PLAYERS};
use crate::domain::seed_derivation::{derive_opening_seed, derive_roll_seed};
use crate::errors::domain::{DomainError, IllegalActionKind};

/// Seat index, stable for the whole session (0..N-1).
pub type PlayerId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The player at `turn` must bid or challenge.
    AwaitingAction,
    /// A challenge resolved; the next round has not been rolled yet.
    RoundOver,
    /// Fewer than two players have dice left.
    GameOver,
}

/// Fixed parameters of a table, resolved from session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSetup {
    pub num_players: usize,
    pub starting_dice: u32,
    pub wild_ones: bool,
    pub history_window: usize,
    /// Seat that opens round 1; drawn from `seed` when `None`.
    pub opening_player: Option<PlayerId>,
    pub seed: u64,
}

impl TableSetup {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.num_players < MIN_PLAYERS {
            return Err(DomainError::invalid_config(format!(
                "num_players must be >= {MIN_PLAYERS}, got {}",
                self.num_players
            )));
        }
        if self.starting_dice == 0 {
            return Err(DomainError::invalid_config("starting_dice must be >= 1"));
        }
        if let Some(opener) = self.opening_player {
            if opener >= self.num_players {
                return Err(DomainError::invalid_config(format!(
                    "opening_player {opener} is not a seat at a {}-player table",
                    self.num_players
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Player {
    dice_count: u32,
    hand: Hand,
}

impl Player {
    fn is_active(&self) -> bool {
        self.dice_count > 0
    }
}

/// What a resolved challenge did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeReport {
    pub round_no: u32,
    pub challenger: PlayerId,
    pub bid: Bid,
    pub outcome: ChallengeOutcome,
    /// Every hand as it was at the reveal, one per seat.
    pub revealed: Vec<Hand>,
    /// The loser ran out of dice.
    pub eliminated: bool,
}

/// Public snapshot of the table, safe to hand to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub phase: Phase,
    pub round_no: u32,
    pub dice_counts: Vec<u32>,
    pub total_dice: u32,
    pub current_bid: Option<Bid>,
    pub turn: PlayerId,
}

/// Returns the first seat after `from` (wrapping) that still has dice.
///
/// `from` itself is considered last, so a lone survivor maps to itself.
pub fn next_active(dice_counts: &[u32], from: PlayerId) -> Option<PlayerId> {
    let n = dice_counts.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&seat| dice_counts[seat] > 0)
}

#[derive(Debug, Clone)]
pub struct RoundState {
    players: Vec<Player>,
    current_bid: Option<Bid>,
    turn: PlayerId,
    phase: Phase,
    round_no: u32,
    last_loser: Option<PlayerId>,
    history: Vec<HistoryEvent>,
    wild_ones: bool,
    history_window: usize,
    seed: u64,
}

impl RoundState {
    /// Seat every player with `starting_dice` and roll round 1.
    pub fn new(setup: &TableSetup) -> Result<Self, DomainError> {
        setup.validate()?;
        let opener = setup.opening_player.unwrap_or_else(|| {
            ChaCha8Rng::seed_from_u64(derive_opening_seed(setup.seed))
                .random_range(0..setup.num_players)
        });
        let counts = vec![setup.starting_dice; setup.num_players];
        let hands = roll_hands(&counts, derive_roll_seed(setup.seed, 1));
        Ok(Self::seated(setup, hands, opener))
    }

    /// Start round 1 from known hands instead of a roll.
    ///
    /// Dice counts are taken from the hand lengths. Used for replays and for
    /// setting up exact table positions.
    pub fn with_hands(
        setup: &TableSetup,
        hands: Vec<Hand>,
        opener: PlayerId,
    ) -> Result<Self, DomainError> {
        setup.validate()?;
        if hands.len() != setup.num_players {
            return Err(DomainError::invalid_config(format!(
                "expected {} hands, got {}",
                setup.num_players,
                hands.len()
            )));
        }
        if let Some(die) = hands.iter().flatten().find(|d| !face_range().contains(d)) {
            return Err(DomainError::invalid_config(format!(
                "die value {die} is not a face"
            )));
        }
        let active = hands.iter().filter(|h| !h.is_empty()).count();
        if active < MIN_PLAYERS {
            return Err(DomainError::invalid_config(format!(
                "need {MIN_PLAYERS} players with dice, got {active}"
            )));
        }
        if hands.get(opener).map_or(true, Vec::is_empty) {
            return Err(DomainError::invalid_config(format!(
                "opener {opener} has no dice"
            )));
        }
        Ok(Self::seated(setup, hands, opener))
    }

    fn seated(setup: &TableSetup, hands: Vec<Hand>, opener: PlayerId) -> Self {
        let players = hands
            .into_iter()
            .map(|hand| Player {
                dice_count: hand.len() as u32,
                hand,
            })
            .collect();
        let mut state = Self {
            players,
            current_bid: None,
            turn: opener,
            phase: Phase::AwaitingAction,
            round_no: 1,
            last_loser: None,
            history: Vec::new(),
            wild_ones: setup.wild_ones,
            history_window: setup.history_window,
            seed: setup.seed,
        };
        state.record_round_start();
        state
    }

    // ---------- Transitions ----------

    /// Place `bid` for `player`, replacing the current bid.
    pub fn apply_bid(&mut self, player: PlayerId, bid: Bid) -> Result<(), DomainError> {
        self.require_actor(player)?;
        if bid.player != player {
            return Err(DomainError::illegal(
                IllegalActionKind::OutOfTurn,
                format!("bid belongs to player {}, submitted by {player}", bid.player),
            ));
        }
        check_successor(
            self.current_bid.as_ref(),
            &bid,
            self.total_dice(),
            self.active_players(),
        )?;
        let next = self.require_next_active(player)?;

        self.current_bid = Some(bid);
        self.history.push(HistoryEvent::BidPlaced {
            round_no: self.round_no,
            bid,
        });
        self.turn = next;
        debug!(
            round_no = self.round_no,
            player,
            quantity = bid.quantity,
            face = bid.face,
            next = self.turn,
            "Bid placed"
        );
        Ok(())
    }

    /// Challenge the current bid as `player`, resolving the round.
    pub fn apply_challenge(&mut self, player: PlayerId) -> Result<ChallengeReport, DomainError> {
        self.require_actor(player)?;
        let bid = self.current_bid.ok_or_else(|| {
            DomainError::illegal(
                IllegalActionKind::NoCurrentBid,
                "cannot challenge before any bid",
            )
        })?;

        let revealed: Vec<Hand> = self.players.iter().map(|p| p.hand.clone()).collect();
        let outcome = resolve(&bid, player, &revealed, self.wild_ones);

        let loser = &mut self.players[outcome.loser];
        loser.dice_count = loser.dice_count.saturating_sub(1);
        let eliminated = !loser.is_active();
        if eliminated {
            loser.hand.clear();
        }

        self.history.push(HistoryEvent::ChallengeResolved {
            round_no: self.round_no,
            challenger: player,
            bid,
            actual_count: outcome.actual_count,
            bid_stands: outcome.bid_stands,
            loser: outcome.loser,
        });
        if eliminated {
            self.history.push(HistoryEvent::PlayerEliminated {
                round_no: self.round_no,
                player: outcome.loser,
            });
        }
        self.last_loser = Some(outcome.loser);
        self.phase = Phase::RoundOver;

        info!(
            round_no = self.round_no,
            challenger = player,
            bidder = bid.player,
            quantity = bid.quantity,
            face = bid.face,
            actual_count = outcome.actual_count,
            bid_stands = outcome.bid_stands,
            loser = outcome.loser,
            eliminated,
            "Challenge resolved"
        );

        Ok(ChallengeReport {
            round_no: self.round_no,
            challenger: player,
            bid,
            outcome,
            revealed,
            eliminated,
        })
    }

    /// Roll the next round, or end the game if one player is left.
    ///
    /// The loser of the previous round opens; if they were eliminated the
    /// next active seat opens instead.
    pub fn start_new_round(&mut self) -> Result<(), DomainError> {
        if self.phase != Phase::RoundOver {
            return Err(DomainError::illegal(
                IllegalActionKind::PhaseMismatch,
                format!("start_new_round requires RoundOver, phase is {:?}", self.phase),
            ));
        }
        self.current_bid = None;

        if self.active_players() < MIN_PLAYERS {
            self.phase = Phase::GameOver;
            if let Some(winner) = self.winner() {
                self.history.push(HistoryEvent::GameOver {
                    round_no: self.round_no,
                    winner,
                });
                info!(round_no = self.round_no, winner, "Game over");
            }
            return Ok(());
        }

        let loser = self.last_loser.ok_or_else(|| {
            DomainError::illegal(
                IllegalActionKind::PhaseMismatch,
                "round over without a recorded loser",
            )
        })?;
        self.round_no += 1;
        let counts = self.dice_counts();
        let hands = roll_hands(&counts, derive_roll_seed(self.seed, self.round_no));
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.turn = if self.players[loser].is_active() {
            loser
        } else {
            self.require_next_active(loser)?
        };
        self.phase = Phase::AwaitingAction;
        self.record_round_start();
        Ok(())
    }

    fn record_round_start(&mut self) {
        let dice_counts = self.dice_counts();
        info!(
            round_no = self.round_no,
            opener = self.turn,
            total_dice = total_dice_in_play(&dice_counts),
            "Round started"
        );
        self.history.push(HistoryEvent::RoundStarted {
            round_no: self.round_no,
            opener: self.turn,
            dice_counts,
        });
    }

    fn require_actor(&self, player: PlayerId) -> Result<(), DomainError> {
        if self.phase != Phase::AwaitingAction {
            return Err(DomainError::illegal(
                IllegalActionKind::PhaseMismatch,
                format!("no action expected in phase {:?}", self.phase),
            ));
        }
        let Some(seat) = self.players.get(player) else {
            return Err(DomainError::illegal(
                IllegalActionKind::UnknownPlayer,
                format!("no player {player} at a {}-player table", self.players.len()),
            ));
        };
        if !seat.is_active() {
            return Err(DomainError::illegal(
                IllegalActionKind::PlayerEliminated,
                format!("player {player} has no dice"),
            ));
        }
        if player != self.turn {
            return Err(DomainError::illegal(
                IllegalActionKind::OutOfTurn,
                format!("player {player} acted on player {}'s turn", self.turn),
            ));
        }
        Ok(())
    }

    fn require_next_active(&self, from: PlayerId) -> Result<PlayerId, DomainError> {
        self.next_active_player(from).ok_or_else(|| {
            DomainError::illegal(IllegalActionKind::PlayerEliminated, "no active players left")
        })
    }

    // ---------- Queries ----------

    /// Everything `player` may see: own hand, all counts, the bid, recent history.
    pub fn project_for(&self, player: PlayerId) -> Result<PlayerView, DomainError> {
        let seat = self.players.get(player).ok_or_else(|| {
            DomainError::illegal(
                IllegalActionKind::UnknownPlayer,
                format!("no player {player} at a {}-player table", self.players.len()),
            )
        })?;
        let dice_counts = self.dice_counts();
        Ok(PlayerView {
            player,
            round_no: self.round_no,
            hand: seat.hand.clone(),
            total_dice: total_dice_in_play(&dice_counts),
            dice_counts,
            current_bid: self.current_bid,
            turn: self.turn,
            wild_ones: self.wild_ones,
            recent_history: recent(&self.history, self.history_window).to_vec(),
        })
    }

    pub fn next_active_player(&self, from: PlayerId) -> Option<PlayerId> {
        next_active(&self.dice_counts(), from)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn current_bid(&self) -> Option<&Bid> {
        self.current_bid.as_ref()
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn dice_counts(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.dice_count).collect()
    }

    pub fn dice_count(&self, player: PlayerId) -> Option<u32> {
        self.players.get(player).map(|p| p.dice_count)
    }

    pub fn total_dice(&self) -> u32 {
        self.players.iter().map(|p| p.dice_count).sum()
    }

    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// The sole survivor, once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(seat, _)| seat);
        match (active.next(), active.next()) {
            (Some(seat), None) => Some(seat),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn history(&self) -> &[HistoryEvent] {
        &self.history
    }

    /// The full history as an ordered JSON array.
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.history)
    }

    pub fn summary(&self) -> StateSummary {
        let dice_counts = self.dice_counts();
        StateSummary {
            phase: self.phase,
            round_no: self.round_no,
            total_dice: total_dice_in_play(&dice_counts),
            dice_counts,
            current_bid: self.current_bid,
            turn: self.turn,
        }
    }

    #[cfg(test)]
    pub(crate) fn hand_sizes(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.hand.len()).collect()
    }
}

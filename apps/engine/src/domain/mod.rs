//! Domain layer: pure game logic types and helpers.

pub mod action;
pub mod action_parsing;
pub mod bidding;
pub mod challenge;
pub mod dice;
pub mod history;
pub mod player_view;
pub mod rules;
pub mod seed_derivation;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_player_view;
#[cfg(test)]
mod tests_props_round;
#[cfg(test)]
mod tests_round_state;

// Re-exports for ergonomics
pub use action::Action;
pub use bidding::{is_legal_successor, Bid};
pub use challenge::{resolve, ChallengeOutcome};
pub use dice::{roll_hands, total_dice_in_play, Face, Hand};
pub use history::HistoryEvent;
pub use player_view::PlayerView;
pub use state::{ChallengeReport, Phase, PlayerId, RoundState, StateSummary, TableSetup};

pub mod action_gate;
pub mod game_flow;

pub mod game_data;
pub mod pgn;
pub mod win_prob;

pub use game_data::{GameData, GameMetadata};
pub use win_prob::{win_probability, win_probability_for, Score};

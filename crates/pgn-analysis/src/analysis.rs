//! Per-move and per-game result records. Plain data, no engine dependencies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Ply index, starting at 1
    pub move_number: u32,
    /// SAN as written in the PGN
    pub move_text: String,
    /// White-perspective centipawns, mates saturated
    pub centipawn: Option<i32>,
    pub win_probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position of the game in its PGN input, from 0
    pub game_index: usize,
    pub game_id: String,
    pub white: Option<String>,
    pub black: Option<String>,
    /// Result header as written, e.g. "1-0" or "*"
    pub result: Option<String>,
    pub moves: Vec<MoveRecord>,
}

/// One row of the flat result table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub game_id: String,
    pub move_number: u32,
    pub move_text: String,
    pub centipawn: Option<i32>,
    pub win_probability: Option<f64>,
}

impl GameRecord {
    pub fn rows(&self) -> impl Iterator<Item = AnalysisRow> + '_ {
        self.moves.iter().map(|m| AnalysisRow {
            game_id: self.game_id.clone(),
            move_number: m.move_number,
            move_text: m.move_text.clone(),
            centipawn: m.centipawn,
            win_probability: m.win_probability,
        })
    }

    /// Win probability after the last evaluated move
    pub fn final_win_probability(&self) -> Option<f64> {
        self.moves.iter().rev().find_map(|m| m.win_probability)
    }
}

/// Flatten games into table rows, in game then ply order.
pub fn rows(records: &[GameRecord]) -> Vec<AnalysisRow> {
    records.iter().flat_map(GameRecord::rows).collect()
}

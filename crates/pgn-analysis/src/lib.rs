pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod uci;

pub use analysis::{AnalysisRow, GameRecord, MoveRecord};
pub use analyzer::{analyse_game, analyse_games, analyse_pgn, PositionEvaluator};
pub use config::EngineConfig;
pub use error::AnalysisError;

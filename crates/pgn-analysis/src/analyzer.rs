//! Game evaluation pipeline
//!
//! Replays each game's mainline, evaluates the position after every ply with the
//! engine and converts the score to a White win probability. Strictly sequential:
//! one evaluation in flight at a time.

use std::future::Future;

use chess_core::pgn::parse_games;
use chess_core::win_prob::win_probability_for;
use chess_core::GameData;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{EnPassantMode, Position};
use tracing::{info, warn};

use crate::analysis::{GameRecord, MoveRecord};
use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::uci::{EvalResult, UciEngine};

/// Anything that can score a position given as FEN.
pub trait PositionEvaluator {
    /// Score from the side to move's perspective
    fn evaluate(
        &mut self,
        fen: &str,
        depth: u32,
    ) -> impl Future<Output = Result<EvalResult, AnalysisError>> + Send;

    /// Reset state before an unrelated game
    fn new_game(&mut self) -> impl Future<Output = Result<(), AnalysisError>> + Send;
}

/// Evaluate every mainline position of one game.
///
/// An evaluator failure aborts the game. A move that cannot be played ends the
/// move list early; records gathered up to that point are kept.
pub async fn analyse_game<E: PositionEvaluator>(
    evaluator: &mut E,
    game: &GameData,
    game_index: usize,
    depth: u32,
) -> Result<GameRecord, AnalysisError> {
    let game_id = game.game_id();
    let mut record = GameRecord {
        game_index,
        game_id,
        white: game.metadata.white.clone(),
        black: game.metadata.black.clone(),
        result: game.metadata.result.clone(),
        moves: Vec::with_capacity(game.moves.len()),
    };

    let mut board = match game.start_position() {
        Ok(board) => board,
        Err(e) => {
            warn!(game_index, error = %e, "Skipping game with unusable start position");
            return Ok(record);
        }
    };

    for (i, san) in game.moves.iter().enumerate() {
        let ply = i as u32 + 1;

        let mv = match san
            .parse::<SanPlus>()
            .ok()
            .and_then(|san_plus| san_plus.san.to_move(&board).ok())
        {
            Some(mv) => mv,
            None => {
                warn!(game_index, ply, san = %san, "Illegal move, truncating game");
                break;
            }
        };
        board = match board.play(mv) {
            Ok(next) => next,
            Err(_) => {
                warn!(game_index, ply, san = %san, "Unplayable move, truncating game");
                break;
            }
        };

        let fen = Fen::from_position(&board, EnPassantMode::Legal).to_string();
        let result = evaluator.evaluate(&fen, depth).await?;
        let centipawn = result.score.map(|s| s.for_white(board.turn()));

        record.moves.push(MoveRecord {
            move_number: ply,
            move_text: san.clone(),
            centipawn,
            win_probability: win_probability_for(centipawn),
        });
    }

    info!(
        game_index,
        game_id = %record.game_id,
        moves = record.moves.len(),
        "Game analysed"
    );
    Ok(record)
}

/// Analyse games in order with one evaluator; the first failure aborts the run.
pub async fn analyse_games<E: PositionEvaluator>(
    evaluator: &mut E,
    games: &[GameData],
    depth: u32,
) -> Result<Vec<GameRecord>, AnalysisError> {
    let mut records = Vec::with_capacity(games.len());
    for (game_index, game) in games.iter().enumerate() {
        if game_index > 0 {
            evaluator.new_game().await?;
        }
        records.push(analyse_game(evaluator, game, game_index, depth).await?);
    }
    Ok(records)
}

/// Parse PGN text and analyse every game with a freshly started engine.
///
/// No engine is started when the input holds no games. The engine is shut down
/// on every exit path.
pub async fn analyse_pgn(config: &EngineConfig, pgn: &str) -> Result<Vec<GameRecord>, AnalysisError> {
    let games = parse_games(pgn);
    if games.is_empty() {
        info!("No games found in PGN input");
        return Ok(Vec::new());
    }
    info!(games = games.len(), depth = config.depth, "Starting analysis");

    let mut engine = UciEngine::start(config).await?;
    let result = analyse_games(&mut engine, &games, config.depth).await;
    engine.quit().await;
    result
}

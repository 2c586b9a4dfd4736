//! Checks against a real UCI engine. Skipped when none is installed.

mod common;

use chess_core::win_prob::win_probability;
use pgn_analysis::uci::UciEngine;
use pgn_analysis::{analyse_pgn, AnalysisError, EngineConfig};
use shakmaty::Color;

fn engine_config() -> EngineConfig {
    EngineConfig {
        engine_path: common::engine_path(),
        depth: 12,
        ..Default::default()
    }
}

async fn start_or_skip(config: &EngineConfig) -> Option<UciEngine> {
    match UciEngine::start(config).await {
        Ok(engine) => Some(engine),
        Err(AnalysisError::EngineStart { path, .. }) => {
            eprintln!("skipping: no UCI engine at {path}");
            None
        }
        Err(e) => panic!("engine failed after start: {e}"),
    }
}

#[tokio::test]
async fn test_queens_pawn_opening_is_balanced() {
    let config = engine_config();
    let Some(mut engine) = start_or_skip(&config).await else {
        return;
    };

    let fen = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
    let result = engine.evaluate(fen, config.depth).await.unwrap();
    engine.quit().await;

    let cp = result.score.expect("engine gave no score").for_white(Color::Black);
    let p = win_probability(cp);
    assert!((0.4..=0.6).contains(&p), "cp={cp} p={p}");
}

#[tokio::test]
async fn test_short_game_end_to_end() {
    let config = engine_config();
    match start_or_skip(&config).await {
        Some(mut engine) => engine.quit().await,
        None => return,
    }

    let records = analyse_pgn(&config, "[Event \"Fool's mate\"]\n\n1. f3 e5 2. g4 Qh4# 0-1\n")
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    let moves = &records[0].moves;
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.win_probability.is_some()));
    assert_eq!(moves[3].centipawn, Some(-10_000));
}

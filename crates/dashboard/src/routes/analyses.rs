use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use pgn_analysis::export::to_csv_string;
use pgn_analysis::{analyse_pgn, AnalysisRow, GameRecord, MoveRecord};

use crate::cache::{analysis_id, Analysis, AnalysisCache, Fingerprint};
use crate::config::{Config, MAX_DEPTH, MIN_DEPTH};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct AnalyseQuery {
    pub depth: Option<u32>,
}

/// One point of a per-move line chart
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint<T> {
    pub move_number: u32,
    pub value: T,
}

/// Points for every move that has a value; missing evaluations leave a gap.
pub fn chart_series<T>(moves: &[MoveRecord], value: impl Fn(&MoveRecord) -> Option<T>) -> Vec<ChartPoint<T>> {
    moves
        .iter()
        .filter_map(|m| {
            value(m).map(|value| ChartPoint {
                move_number: m.move_number,
                value,
            })
        })
        .collect()
}

fn summary(analysis: &Analysis) -> JsonValue {
    let games: Vec<JsonValue> = analysis
        .games
        .iter()
        .map(|g| {
            json!({
                "gameIndex": g.game_index,
                "gameId": g.game_id,
                "white": g.white,
                "black": g.black,
                "result": g.result,
                "moveCount": g.moves.len(),
                "finalWinProbability": g.final_win_probability(),
            })
        })
        .collect();

    json!({
        "analysisId": analysis.id,
        "depth": analysis.depth,
        "games": games,
    })
}

fn find_game<'a>(analysis: &'a Analysis, index: usize) -> Result<&'a GameRecord, AppError> {
    analysis
        .games
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("Game {index} not found")))
}

fn find_analysis(cache: &AnalysisCache, id: &str) -> Result<Arc<Analysis>, AppError> {
    cache
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// POST /api/analyses?depth=N with the PGN text as body
pub async fn create_analysis(
    Extension(config): Extension<Config>,
    Extension(cache): Extension<AnalysisCache>,
    Query(q): Query<AnalyseQuery>,
    body: Bytes,
) -> Result<Json<JsonValue>, AppError> {
    let depth = q.depth.unwrap_or(config.engine.depth);
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(AppError::BadRequest(format!(
            "depth must be between {MIN_DEPTH} and {MAX_DEPTH}"
        )));
    }

    let id = analysis_id(&body, depth);
    let fingerprint = Fingerprint::of(&body);
    if let Some(cached) = cache.lookup(&id, fingerprint) {
        tracing::info!(analysis_id = %id, "Serving cached analysis");
        return Ok(Json(summary(&cached)));
    }
    if cache.get(&id).is_some() {
        tracing::warn!(analysis_id = %id, "Analysis id collision, recomputing");
    }

    let pgn = String::from_utf8_lossy(&body);
    let mut engine = config.engine.clone();
    engine.depth = depth;
    let games = analyse_pgn(&engine, &pgn).await?;

    let analysis = Analysis {
        id,
        depth,
        fingerprint,
        games,
    };
    if analysis.games.is_empty() {
        // Nothing to look up later; keep junk uploads out of the cache
        tracing::info!(analysis_id = %analysis.id, "No games found in upload");
        return Ok(Json(summary(&analysis)));
    }

    let analysis = cache.insert(analysis);
    Ok(Json(summary(&analysis)))
}

/// GET /api/analyses/{id}
pub async fn get_analysis(
    Extension(cache): Extension<AnalysisCache>,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, AppError> {
    let analysis = find_analysis(&cache, &id)?;
    Ok(Json(summary(&analysis)))
}

/// GET /api/analyses/{id}/games/{index}
pub async fn get_game(
    Extension(cache): Extension<AnalysisCache>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<JsonValue>, AppError> {
    let analysis = find_analysis(&cache, &id)?;
    let game = find_game(&analysis, index)?;

    Ok(Json(json!({
        "gameIndex": game.game_index,
        "gameId": game.game_id,
        "white": game.white,
        "black": game.black,
        "result": game.result,
        "moves": game.moves,
        "charts": {
            "winProbability": chart_series(&game.moves, |m| m.win_probability),
            "centipawn": chart_series(&game.moves, |m| m.centipawn),
        },
    })))
}

/// Keep download filenames to a safe character set.
fn csv_filename(game: &GameRecord) -> String {
    let stem: String = game
        .game_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        format!("analysis_game{}.csv", game.game_index)
    } else {
        format!("analysis_{stem}.csv")
    }
}

/// GET /api/analyses/{id}/games/{index}/csv
pub async fn download_csv(
    Extension(cache): Extension<AnalysisCache>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = find_analysis(&cache, &id)?;
    let game = find_game(&analysis, index)?;

    let rows: Vec<AnalysisRow> = game.rows().collect();
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", csv_filename(game)),
        ),
    ];
    Ok((headers, to_csv_string(&rows)))
}

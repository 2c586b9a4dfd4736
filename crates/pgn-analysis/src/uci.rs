//! UCI engine wrapper (async process I/O)

use chess_core::Score;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::{debug, info};

use crate::analyzer::PositionEvaluator;
use crate::config::EngineConfig;
use crate::error::AnalysisError;

/// Result of a single position evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalResult {
    /// Last score reported, from the side to move's perspective
    pub score: Option<Score>,
    /// Best move in UCI notation, `None` when the position has no legal moves
    pub best_move: Option<String>,
}

/// A running UCI engine process
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn the engine and complete the UCI handshake
    pub async fn start(config: &EngineConfig) -> Result<Self, AnalysisError> {
        let mut process = Command::new(&config.engine_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AnalysisError::EngineStart {
                path: config.engine_path.clone(),
                source,
            })?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| AnalysisError::Engine("engine stdin not captured".into()))?;
        let stdout = process
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| AnalysisError::Engine("engine stdout not captured".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout,
        };

        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        engine
            .send(&format!("setoption name Threads value {}", config.threads))
            .await?;
        engine
            .send(&format!("setoption name Hash value {}", config.hash_mb))
            .await?;
        engine.send("setoption name UCI_AnalyseMode value true").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        info!(path = %config.engine_path, "Engine ready");
        Ok(engine)
    }

    async fn send(&mut self, cmd: &str) -> Result<(), AnalysisError> {
        debug!(cmd, "engine <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| AnalysisError::Engine(format!("Failed to write to engine: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| AnalysisError::Engine(format!("Failed to flush engine stdin: {e}")))?;
        Ok(())
    }

    /// Read one line; a closed stdout is an error, never a silent stop.
    async fn read_line(&mut self, line: &mut String) -> Result<(), AnalysisError> {
        line.clear();
        let n = self
            .stdout
            .read_line(line)
            .await
            .map_err(|e| AnalysisError::Engine(format!("Failed to read from engine: {e}")))?;
        if n == 0 {
            return Err(AnalysisError::Engine("engine closed its output".into()));
        }
        debug!(line = line.trim(), "engine >");
        Ok(())
    }

    async fn wait_for(&mut self, expected: &str) -> Result<(), AnalysisError> {
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            if line.trim() == expected {
                return Ok(());
            }
        }
    }

    /// Search `fen` to `depth` plies and report the final score
    pub async fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EvalResult, AnalysisError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go depth {depth}")).await?;

        let mut result = EvalResult::default();
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();

            if trimmed.starts_with("info") && !trimmed.starts_with("info string") {
                if let Some(score) = parse_score(trimmed) {
                    result.score = Some(score);
                }
            } else if trimmed.starts_with("bestmove") {
                result.best_move = parse_best_move(trimmed);
                break;
            }
        }

        Ok(result)
    }

    /// Clear engine state between games
    pub async fn new_game(&mut self) -> Result<(), AnalysisError> {
        self.send("ucinewgame").await?;
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
        debug!("Engine exited");
    }
}

impl PositionEvaluator for UciEngine {
    async fn evaluate(&mut self, fen: &str, depth: u32) -> Result<EvalResult, AnalysisError> {
        UciEngine::evaluate(self, fen, depth).await
    }

    async fn new_game(&mut self) -> Result<(), AnalysisError> {
        UciEngine::new_game(self).await
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse `score cp N` / `score mate N` from an info line
fn parse_score(line: &str) -> Option<Score> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let i = parts.iter().position(|p| *p == "score")?;
    let value: i32 = parts.get(i + 2)?.parse().ok()?;
    match *parts.get(i + 1)? {
        "cp" => Some(Score::Centipawns(value)),
        "mate" => Some(Score::Mate(value)),
        _ => None,
    }
}

/// Parse the move from a `bestmove` line
fn parse_best_move(line: &str) -> Option<String> {
    line.split_whitespace()
        .nth(1)
        .filter(|m| *m != "(none)" && *m != "0000")
        .map(String::from)
}

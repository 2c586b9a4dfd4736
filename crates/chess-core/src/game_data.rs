use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetadata {
    pub event: Option<String>,
    pub site: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>, // "1-0", "0-1", "1/2-1/2", "*"
    pub fen: Option<String>,
}

impl GameMetadata {
    pub fn is_empty(&self) -> bool {
        *self == GameMetadata::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub metadata: GameMetadata,
    pub moves: Vec<String>, // SAN notation, mainline only
}

impl GameData {
    /// Event header, falling back to Site, falling back to "".
    pub fn game_id(&self) -> String {
        [&self.metadata.event, &self.metadata.site]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// Initial position: the FEN header when present, otherwise the standard setup.
    pub fn start_position(&self) -> Result<Chess, String> {
        let Some(fen) = self.metadata.fen.as_deref() else {
            return Ok(Chess::default());
        };
        let parsed: Fen = fen
            .parse()
            .map_err(|e| format!("Invalid FEN {fen:?}: {e}"))?;
        parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| format!("Illegal FEN position {fen:?}: {e}"))
    }
}

//! PGN reading on top of `pgn-reader`: one `GameData` per game, mainline only.

use std::io::Read;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use tracing::warn;

use crate::game_data::{GameData, GameMetadata};

/// Visitor that keeps the headers we care about and the mainline SAN moves.
struct GameCollector;

impl Visitor for GameCollector {
    type Tags = GameMetadata;
    type Movetext = GameData;
    type Output = GameData;

    fn begin_tags(&mut self) -> ControlFlow<GameData, GameMetadata> {
        ControlFlow::Continue(GameMetadata::default())
    }

    fn tag(
        &mut self,
        tags: &mut GameMetadata,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<GameData> {
        let slot = match name {
            b"Event" => &mut tags.event,
            b"Site" => &mut tags.site,
            b"White" => &mut tags.white,
            b"Black" => &mut tags.black,
            b"Result" => &mut tags.result,
            b"FEN" => &mut tags.fen,
            _ => return ControlFlow::Continue(()),
        };
        *slot = Some(value.decode_utf8_lossy().into_owned());
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameMetadata) -> ControlFlow<GameData, GameData> {
        ControlFlow::Continue(GameData {
            metadata: tags,
            moves: Vec::new(),
        })
    }

    fn san(&mut self, game: &mut GameData, san_plus: SanPlus) -> ControlFlow<GameData> {
        game.moves.push(san_plus.to_string());
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _game: &mut GameData) -> ControlFlow<GameData, Skip> {
        ControlFlow::Continue(Skip(true)) // mainline only
    }

    fn end_game(&mut self, game: GameData) -> GameData {
        game
    }
}

/// Yields games one at a time until the input is exhausted.
///
/// Read errors end the iteration with a warning instead of failing.
/// Blocks with neither headers nor moves are skipped.
pub struct PgnGames<R: Read> {
    reader: Reader<R>,
    collector: GameCollector,
    done: bool,
}

impl<R: Read> PgnGames<R> {
    pub fn new(input: R) -> Self {
        Self {
            reader: Reader::new(input),
            collector: GameCollector,
            done: false,
        }
    }
}

impl<R: Read> Iterator for PgnGames<R> {
    type Item = GameData;

    fn next(&mut self) -> Option<GameData> {
        while !self.done {
            match self.reader.read_game(&mut self.collector) {
                Ok(Some(game)) if game.moves.is_empty() && game.metadata.is_empty() => continue,
                Ok(Some(game)) => return Some(game),
                Ok(None) => self.done = true,
                Err(e) => {
                    warn!(error = %e, "Stopped reading PGN input");
                    self.done = true;
                }
            }
        }
        None
    }
}

/// Parse every game in a PGN string.
pub fn parse_games(pgn: &str) -> Vec<GameData> {
    PgnGames::new(pgn.as_bytes()).collect()
}

//! Centipawn to win-probability conversion.

use shakmaty::Color;

/// Logistic slope calibrated against rated online games.
pub const LOGISTIC_SLOPE: f64 = 0.00368208;

/// Centipawn value substituted for a forced mate.
pub const MATE_SCORE: i32 = 10_000;

/// Raw engine score, from the side to move's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawns (positive = side to move is better)
    Centipawns(i32),
    /// Mate in N (positive = side to move mates, zero or negative = side to move is mated)
    Mate(i32),
}

impl Score {
    /// Collapse to centipawns, saturating mate scores at `MATE_SCORE`.
    pub fn to_centipawns(self) -> i32 {
        match self {
            Score::Centipawns(cp) => cp,
            Score::Mate(n) if n > 0 => MATE_SCORE,
            Score::Mate(_) => -MATE_SCORE,
        }
    }

    /// Centipawns from White's perspective given whose turn it is.
    pub fn for_white(self, side_to_move: Color) -> i32 {
        let cp = self.to_centipawns();
        match side_to_move {
            Color::White => cp,
            Color::Black => -cp,
        }
    }
}

/// Win probability for the side the centipawns favour when positive.
///
/// `0.5 + 0.5 * (2 / (1 + e^(-k*cp)) - 1)`, which reduces to the plain logistic below.
pub fn win_probability(centipawns: i32) -> f64 {
    1.0 / (1.0 + (-LOGISTIC_SLOPE * f64::from(centipawns)).exp())
}

/// `None` in, `None` out.
pub fn win_probability_for(centipawns: Option<i32>) -> Option<f64> {
    centipawns.map(win_probability)
}

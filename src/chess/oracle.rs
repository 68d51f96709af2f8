use super::Line;
use shakmaty::Chess;
use shakmaty::EnPassantMode;
use shakmaty::Position;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;

/// legality oracle over a replayable position. a candidate token is
/// either resolved to exactly one legal move, rendered in canonical
/// SAN, and played, or rejected without touching the position.
#[derive(Debug, Default, Clone)]
pub struct Oracle {
    position: Chess,
}

impl Oracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.position = Chess::default();
    }

    /// validate one token against the current position. on success the
    /// position advances and the canonical rendering (with check and
    /// mate suffixes) is returned.
    pub fn try_move(&mut self, token: &str) -> Option<String> {
        let san = token.parse::<SanPlus>().ok()?;
        let candidate = san.san.to_move(&self.position).ok()?;
        let canonical = SanPlus::from_move(self.position.clone(), &candidate).to_string();
        self.position = self.position.clone().play(&candidate).ok()?;
        Some(canonical)
    }

    /// replay a whole line from the initial position, returning its
    /// canonical rendering, or None at the first illegal token.
    pub fn replay(&mut self, line: &Line) -> Option<Line> {
        self.reset();
        line.tokens()
            .iter()
            .map(|token| self.try_move(token))
            .collect()
    }

    /// position identity for transposition equality
    pub fn key(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }
}

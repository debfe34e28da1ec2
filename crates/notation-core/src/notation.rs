//! Move notation (SAN and LAN) parsing, formatting and reflection.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::NotationError;
use crate::piece::PieceKind;
use crate::square::{file_char, rank_char, Square};

/// Piece letter, optional origin qualifier (file, rank or square), capture
/// marker, target square, promotion and check/mate suffix.
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<piece>[KQRBN])?(?P<from>[a-h]?[1-8]?)(?P<capture>x)?(?P<to>[a-h][1-8])(?:=(?P<promotion>[QRBN]))?(?P<status>[+#])?$",
    )
    .unwrap()
});

/// What the move does to the opposing king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TerminalStatus {
    Quiet,
    Check,
    Checkmate,
}

impl TerminalStatus {
    pub const ALL: [TerminalStatus; 3] = [
        TerminalStatus::Quiet,
        TerminalStatus::Check,
        TerminalStatus::Checkmate,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            TerminalStatus::Quiet => "",
            TerminalStatus::Check => "+",
            TerminalStatus::Checkmate => "#",
        }
    }

    pub fn index(self) -> usize {
        match self {
            TerminalStatus::Quiet => 0,
            TerminalStatus::Check => 1,
            TerminalStatus::Checkmate => 2,
        }
    }
}

/// True for `O-O`, `O-O-O` and their suffixed forms.
pub fn is_castle(notation: &str) -> bool {
    notation.starts_with("O-")
}

/// A piece or pawn move written in SAN or LAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveNotation {
    /// `None` for pawn moves.
    pub piece: Option<PieceKind>,
    /// Origin qualifier: empty, a file, a rank or a full square.
    pub qualifier: String,
    pub capture: bool,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub status: TerminalStatus,
}

impl MoveNotation {
    /// A quiet, non-capturing move.
    pub fn new(piece: Option<PieceKind>, qualifier: impl Into<String>, to: Square) -> Self {
        Self {
            piece,
            qualifier: qualifier.into(),
            capture: false,
            to,
            promotion: None,
            status: TerminalStatus::Quiet,
        }
    }

    pub fn with_promotion(mut self, promotion: Option<PieceKind>) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_status(mut self, status: TerminalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_pawn_move(&self) -> bool {
        self.piece.is_none()
    }

    /// Mirror files and/or ranks in both the qualifier and the target square.
    pub fn reflected(&self, flip_files: bool, flip_ranks: bool) -> Self {
        let qualifier = self
            .qualifier
            .chars()
            .map(|c| match c {
                'a'..='h' if flip_files => file_char(7 - (c as u8 - b'a')),
                '1'..='8' if flip_ranks => rank_char(7 - (c as u8 - b'1')),
                _ => c,
            })
            .collect();

        Self {
            qualifier,
            to: self.to.reflected(flip_files, flip_ranks),
            ..self.clone()
        }
    }
}

impl fmt::Display for MoveNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(piece) = self.piece {
            write!(f, "{}", piece.symbol())?;
        }
        f.write_str(&self.qualifier)?;
        if self.capture {
            f.write_str("x")?;
        }
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.symbol())?;
        }
        f.write_str(self.status.symbol())
    }
}

impl FromStr for MoveNotation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = MOVE_RE
            .captures(s)
            .ok_or_else(|| NotationError::InvalidNotation(s.to_string()))?;

        let piece = caps
            .name("piece")
            .and_then(|m| m.as_str().chars().next())
            .and_then(PieceKind::from_symbol);
        let promotion = caps
            .name("promotion")
            .and_then(|m| m.as_str().chars().next())
            .and_then(PieceKind::from_symbol);
        let status = match caps.name("status").map(|m| m.as_str()) {
            Some("+") => TerminalStatus::Check,
            Some("#") => TerminalStatus::Checkmate,
            _ => TerminalStatus::Quiet,
        };

        Ok(MoveNotation {
            piece,
            qualifier: caps["from"].to_string(),
            capture: caps.name("capture").is_some(),
            to: caps["to"].parse()?,
            promotion,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> MoveNotation {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_san() {
        let mv = parse("Rdxd4+");
        assert_eq!(mv.piece, Some(PieceKind::Rook));
        assert_eq!(mv.qualifier, "d");
        assert!(mv.capture);
        assert_eq!(mv.to.to_string(), "d4");
        assert_eq!(mv.status, TerminalStatus::Check);

        let pawn = parse("exd8=Q#");
        assert!(pawn.is_pawn_move());
        assert_eq!(pawn.qualifier, "e");
        assert_eq!(pawn.promotion, Some(PieceKind::Queen));
        assert_eq!(pawn.status, TerminalStatus::Checkmate);

        let plain = parse("Nf3");
        assert_eq!(plain.qualifier, "");
        assert!(!plain.capture);
    }

    #[test]
    fn test_parse_lan() {
        let mv = parse("Rd1d4");
        assert_eq!(mv.qualifier, "d1");
        assert_eq!(mv.to.to_string(), "d4");

        let pawn = parse("e2e4");
        assert_eq!(pawn.qualifier, "e2");
        assert_eq!(pawn.piece, None);
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["Rd4", "R1xd4#", "Qa1h8+", "e8=N", "dxe5", "Nb1xc3#", "e7e5"] {
            assert_eq!(parse(s).to_string(), s);
        }
    }

    #[test]
    fn test_reject_garbage() {
        assert!("Zd4".parse::<MoveNotation>().is_err());
        assert!("O-O".parse::<MoveNotation>().is_err());
        assert!("Rd9".parse::<MoveNotation>().is_err());
        assert!("".parse::<MoveNotation>().is_err());
    }

    #[test]
    fn test_reflection() {
        let mv = parse("Rb1xb3+");
        assert_eq!(mv.reflected(true, false).to_string(), "Rg1xg3+");
        assert_eq!(mv.reflected(false, true).to_string(), "Rb8xb6+");
        assert_eq!(mv.reflected(true, true).to_string(), "Rg8xg6+");
        assert_eq!(parse("exd8=Q").reflected(true, true).to_string(), "dxe1=Q");
    }

    #[test]
    fn test_castle_detection() {
        assert!(is_castle("O-O-O#"));
        assert!(!is_castle("Od4"));
    }
}

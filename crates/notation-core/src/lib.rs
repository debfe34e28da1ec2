//! Board geometry, pieces, position strings and move notation shared by the
//! catalog generator.

pub mod board;
pub mod error;
pub mod fen;
pub mod notation;
pub mod piece;
pub mod square;

pub use board::Board;
pub use error::NotationError;
pub use fen::{parse_board, to_fen, Orientation, Position};
pub use notation::{is_castle, MoveNotation, TerminalStatus};
pub use piece::{Color, Movement, Piece, PieceKind};
pub use square::{Offset, Square};

//! # Kestrel chess engine core
//!
//! Kestrel's core is the position machinery a chess search is built on: a mutable 0x88
//! board with make/undo for every move type, incrementally maintained Zobrist hashing,
//! attack detection, draw detection, FEN and a material-plus-mobility evaluator.
//!
//! The crate deliberately stops there. Move generation, search and the UCI front-end are
//! clients of these contracts: they enumerate pseudo-legal moves from the board state,
//! apply them with [`Position::make_move`], test legality with
//! [`Position::is_king_attacked`] and revert with [`Position::undo_move`].
//!
//! ## Example
//!
//! ```
//! use kestrel::{Cell, Color, Move, MoveKind, Piece, Position};
//!
//! // Open with 1. e4
//! let mut position = Position::initial();
//! let mv = Move::new(
//!     MoveKind::PawnDouble,
//!     "e2".parse().unwrap(),
//!     "e4".parse().unwrap(),
//!     Cell::from_parts(Color::White, Piece::Pawn),
//!     Cell::EMPTY,
//!     None,
//! );
//! position.make_move(mv);
//! assert_eq!(
//!     position.as_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! // Undo restores the position exactly, hash included
//! position.undo_move(mv);
//! assert_eq!(position.as_fen(), kestrel::notation::STARTPOS);
//! ```

pub use kestrel_base::bitboard;
pub use kestrel_base::geometry;
pub use kestrel_base::types;

pub mod eval;
pub mod moves;
pub mod notation;
pub mod position;

mod zobrist;

pub use bitboard::Bitboard;
pub use moves::{Move, MoveKind};
pub use notation::{FenParseError, STARTPOS};
pub use position::{Position, PrettyStyle};
pub use types::{CastlingRights, CastlingSide, Cell, Color, File, Piece, Rank, Square};

//! Packed move representation

use crate::types::{Cell, Piece, Square};
use std::{fmt, hint};

/// Kind of a chess move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Any move that needs no special handling, quiet or capture
    Simple = 0,
    /// Double pawn push from the starting rank
    PawnDouble = 1,
    /// Pawn promotion, quiet or capture
    Promotion = 2,
    /// En passant capture
    Enpassant = 3,
    /// Castling, kingside or queenside
    Castling = 4,
}

impl MoveKind {
    #[inline]
    const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Self::Simple,
            1 => Self::PawnDouble,
            2 => Self::Promotion,
            3 => Self::Enpassant,
            4 => Self::Castling,
            _ => hint::unreachable_unchecked(),
        }
    }
}

/// Chess move packed into a single `u32`
///
/// The word carries everything make and undo need, so neither has to consult the board
/// to find out what was captured or promoted:
///
/// ```notrust
///  bits  0..3   kind
///  bits  3..10  origin square (raw 0x88 index)
///  bits 10..17  target square (raw 0x88 index)
///  bits 17..21  origin cell
///  bits 21..25  target cell (the captured piece, or the empty cell)
///  bits 25..28  promotion piece (0x7 when the move is not a promotion)
/// ```
///
/// For an en passant move the target cell is the captured pawn even though the target
/// square itself is empty. All accessors are pure bit extractions.
///
/// The move carries no validity information: applying a move that is not pseudo-legal in
/// the position it is applied to leaves the position in an unspecified state.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u32);

const KIND_SHIFT: u32 = 0;
const KIND_MASK: u32 = 0x7;
const SRC_SHIFT: u32 = 3;
const DST_SHIFT: u32 = 10;
const SQUARE_MASK: u32 = 0x7f;
const ORIGIN_SHIFT: u32 = 17;
const TARGET_SHIFT: u32 = 21;
const CELL_MASK: u32 = 0xf;
const PROMOTION_SHIFT: u32 = 25;
const PROMOTION_MASK: u32 = 0x7;
const NO_PROMOTION: u32 = 0x7;

impl Move {
    /// Creates a move from its parts
    ///
    /// `origin` is the moving piece, `target` is the captured piece or [`Cell::EMPTY`],
    /// and `promotion` must be `Some` exactly when `kind` is [`MoveKind::Promotion`].
    #[inline]
    pub const fn new(
        kind: MoveKind,
        src: Square,
        dst: Square,
        origin: Cell,
        target: Cell,
        promotion: Option<Piece>,
    ) -> Move {
        let promotion = match promotion {
            Some(p) => p as u32,
            None => NO_PROMOTION,
        };
        Move(
            ((kind as u32) << KIND_SHIFT)
                | ((src.index() as u32) << SRC_SHIFT)
                | ((dst.index() as u32) << DST_SHIFT)
                | ((origin.index() as u32) << ORIGIN_SHIFT)
                | ((target.index() as u32) << TARGET_SHIFT)
                | (promotion << PROMOTION_SHIFT),
        )
    }

    /// Returns the move kind
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        unsafe { MoveKind::from_index_unchecked(((self.0 >> KIND_SHIFT) & KIND_MASK) as usize) }
    }

    /// Returns the origin square
    #[inline]
    pub const fn src(&self) -> Square {
        unsafe { Square::from_index_unchecked(((self.0 >> SRC_SHIFT) & SQUARE_MASK) as usize) }
    }

    /// Returns the target square
    #[inline]
    pub const fn dst(&self) -> Square {
        unsafe { Square::from_index_unchecked(((self.0 >> DST_SHIFT) & SQUARE_MASK) as usize) }
    }

    /// Returns the moving piece
    #[inline]
    pub const fn origin(&self) -> Cell {
        unsafe { Cell::from_index_unchecked(((self.0 >> ORIGIN_SHIFT) & CELL_MASK) as usize) }
    }

    /// Returns the captured piece, or [`Cell::EMPTY`] if the move is not a capture
    ///
    /// For en passant this is the captured pawn, which does not stand on the target
    /// square.
    #[inline]
    pub const fn target(&self) -> Cell {
        unsafe { Cell::from_index_unchecked(((self.0 >> TARGET_SHIFT) & CELL_MASK) as usize) }
    }

    /// Returns the piece a pawn promotes to, or `None` if the move is not a promotion
    #[inline]
    pub const fn promotion(&self) -> Option<Piece> {
        match (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK {
            NO_PROMOTION => None,
            idx => Some(unsafe { Piece::from_index_unchecked(idx as usize) }),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    /// Formats the move in long algebraic form, e.g. `e2e4` or `e7e8q`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src(), self.dst())?;
        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.as_char())?;
        }
        Ok(())
    }
}

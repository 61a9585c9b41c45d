//! The position state machine

use crate::bitboard::Bitboard;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingRights, CastlingSide, Cell, Color, File, Piece, Rank, Square};
use crate::{geometry, zobrist};

use arrayvec::ArrayVec;
use std::fmt;

/// Maximum number of moves that can be made on a [`Position`] without undoing
///
/// The bound covers the deepest practical search stacked on top of a preloaded game
/// history for repetition detection.
pub const MAX_STATES: usize = 1024;

/// Snapshot of the irreversible parts of the position, taken on every make
#[derive(Debug, Copy, Clone)]
struct State {
    hash: u64,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: u16,
}

/// A mutable chess position
///
/// The position is the workhorse of the search: moves are applied with
/// [`make_move`](Position::make_move) and reverted with [`undo_move`](Position::undo_move),
/// and the two form an exact inverse pair. The Zobrist hash, the per-color material totals
/// and the piece bitboards are maintained incrementally by every mutation.
///
/// The make/undo path performs no validation: it trusts that the moves it is given are
/// pseudo-legal in the current position. Legality is the caller's business, checked by
/// making the move and testing [`is_king_attacked`](Position::is_king_attacked) for the
/// side that just moved.
///
/// Cloning a position copies the board and all scalar state but resets the undo stack:
/// the clone starts a fresh history from its snapshot. For the same reason, comparing two
/// positions ignores their histories.
pub struct Position {
    board: [Cell; 128],
    pieces: [[Bitboard; Piece::COUNT]; 2],
    material: [i32; 2],
    castling: CastlingRights,
    ep_square: Option<Square>,
    side: Color,
    halfmove_clock: u16,
    halfmove_number: u16,
    hash: u64,
    states: ArrayVec<State, MAX_STATES>,
}

impl Position {
    /// Returns a position with an empty board
    ///
    /// No castling is allowed, no en passant square is set, White is to move and both
    /// clocks are zero.
    pub fn empty() -> Position {
        Position {
            board: [Cell::EMPTY; 128],
            pieces: [[Bitboard::EMPTY; Piece::COUNT]; 2],
            material: [0; 2],
            castling: CastlingRights::EMPTY,
            ep_square: None,
            side: Color::White,
            halfmove_clock: 0,
            halfmove_number: 0,
            hash: 0,
            states: ArrayVec::new(),
        }
    }

    /// Returns the contents of `square`
    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        unsafe { *self.board.get_unchecked(square.index()) }
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the current castling rights
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant target square, if the last move was a double pawn push
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the number of plies since the last pawn move or capture
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Returns the bitboard of all pieces of color `c` and kind `p`
    #[inline]
    pub fn pieces(&self, c: Color, p: Piece) -> Bitboard {
        self.pieces[c.index()][p.index()]
    }

    /// Returns the total material value of color `c`, in centipawns
    ///
    /// The bishop-pair bonus is not part of the total; it lives in the evaluator.
    #[inline]
    pub fn material(&self, c: Color) -> i32 {
        self.material[c.index()]
    }

    /// Returns the square of the king of color `c`
    #[inline]
    pub fn king_square(&self, c: Color) -> Square {
        self.pieces(c, Piece::King).first().unwrap()
    }

    /// Returns the Zobrist hash of the position
    ///
    /// The hash is maintained incrementally, so this function just returns the stored
    /// value. It covers the board contents, the castling rights, the en passant square
    /// and the side to move, but not the clocks, so it can be used for repetition
    /// detection.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// Returns the fullmove number as it appears in FEN
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.halfmove_number / 2
    }

    /// Puts the piece in `cell` on `square`
    ///
    /// The square must be empty and the cell must be occupied; violating either is a
    /// programmer error and panics.
    pub fn put(&mut self, cell: Cell, square: Square) {
        let (color, piece) = cell.parts().expect("cannot put an empty cell");

        self.board[square.index()] = cell;
        self.pieces[color.index()][piece.index()].set(square);
        self.material[color.index()] += piece.value();

        self.hash ^= zobrist::pieces(cell, square);
    }

    /// Removes the piece on `square` and returns it
    ///
    /// The square must be occupied; removing from an empty square is a programmer error
    /// and panics.
    pub fn remove(&mut self, square: Square) -> Cell {
        let cell = self.get(square);
        let (color, piece) = cell.parts().expect("cannot remove from an empty square");

        self.board[square.index()] = Cell::EMPTY;
        self.pieces[color.index()][piece.index()].unset(square);
        self.material[color.index()] -= piece.value();

        self.hash ^= zobrist::pieces(cell, square);

        cell
    }

    /// Sets the side to move
    pub fn set_side(&mut self, side: Color) {
        if self.side != side {
            self.side = side;
            self.hash ^= zobrist::MOVE_SIDE;
        }
    }

    /// Grants color `c` the right to castle to side `s`
    ///
    /// Granting an already-granted right is a no-op.
    pub fn set_castling_right(&mut self, c: Color, s: CastlingSide) {
        if !self.castling.has(c, s) {
            self.hash ^= zobrist::castling(CastlingRights::EMPTY.with(c, s));
            self.castling.set(c, s);
        }
    }

    /// Sets or clears the en passant target square
    pub fn set_ep_square(&mut self, square: Option<Square>) {
        if let Some(old) = self.ep_square {
            self.hash ^= zobrist::enpassant(old);
        }
        if let Some(new) = square {
            self.hash ^= zobrist::enpassant(new);
        }
        self.ep_square = square;
    }

    /// Sets the halfmove clock
    pub fn set_halfmove_clock(&mut self, halfmove_clock: u16) {
        self.halfmove_clock = halfmove_clock;
    }

    /// Sets the fullmove number as it appears in FEN
    ///
    /// The internal ply counter is derived from the fullmove number and the side to move,
    /// so the side must be set first when building a position.
    pub fn set_fullmove_number(&mut self, fullmove_number: u16) {
        self.halfmove_number = fullmove_number * 2;
        if self.side == Color::Black {
            self.halfmove_number += 1;
        }
    }

    /// Applies a pseudo-legal move to the position
    ///
    /// The irreversible state (hash, castling rights, en passant square, halfmove clock)
    /// is pushed onto the undo stack first, so that [`undo_move`](Position::undo_move)
    /// can restore it exactly.
    pub fn make_move(&mut self, mv: Move) {
        self.states.push(State {
            hash: self.hash,
            castling: self.castling,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
        });

        let kind = mv.kind();
        let (src, dst) = (mv.src(), mv.dst());
        let origin = mv.origin();
        let target = mv.target();
        let color = self.side;

        // Remove the captured piece and revoke the corresponding rook's castling right
        // if a corner rook was captured
        if target.is_occupied() {
            let capture_square = if kind == MoveKind::Enpassant {
                // SAFETY: the en passant capture square is one rank behind the target
                // square, which is on rank 3 or 6
                unsafe { dst.offset_unchecked(-geometry::pawn_forward_delta(color)) }
            } else {
                dst
            };
            self.remove(capture_square);
            self.clear_castling(capture_square);
        }

        // Move the piece, replacing a promoting pawn with the promoted piece
        self.remove(src);
        let placed = match mv.promotion() {
            Some(promote) => Cell::from_parts(color, promote),
            None => origin,
        };
        self.put(placed, dst);

        // Castling moves the rook as well
        if kind == MoveKind::Castling {
            let (rook_src, rook_dst) = castling_rook_squares(dst);
            let rook = self.remove(rook_src);
            self.put(rook, rook_dst);
        }

        // A king or rook leaving its home square revokes castling rights
        self.clear_castling(src);

        if let Some(old) = self.ep_square {
            self.hash ^= zobrist::enpassant(old);
        }
        if kind == MoveKind::PawnDouble {
            // SAFETY: a double push ends on rank 4 or 5, so the skipped square is valid
            let ep = unsafe { dst.offset_unchecked(-geometry::pawn_forward_delta(color)) };
            self.hash ^= zobrist::enpassant(ep);
            self.ep_square = Some(ep);
        } else {
            self.ep_square = None;
        }

        self.side = color.inv();
        self.hash ^= zobrist::MOVE_SIDE;

        if origin.piece() == Some(Piece::Pawn) || target.is_occupied() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        self.halfmove_number += 1;
    }

    /// Reverts the most recent [`make_move`](Position::make_move)
    ///
    /// `mv` must be the move passed to that call. The board is unwound step by step in
    /// reverse order; the irreversible state is restored from the snapshot, which is
    /// authoritative for the hash.
    pub fn undo_move(&mut self, mv: Move) {
        let kind = mv.kind();
        let (src, dst) = (mv.src(), mv.dst());
        let origin = mv.origin();
        let target = mv.target();

        self.halfmove_number -= 1;
        self.side = self.side.inv();
        let color = self.side;

        if kind == MoveKind::Castling {
            let (rook_src, rook_dst) = castling_rook_squares(dst);
            let rook = self.remove(rook_dst);
            self.put(rook, rook_src);
        }

        // A promoted piece disappears and the pawn comes back
        self.remove(dst);
        self.put(origin, src);

        if target.is_occupied() {
            let capture_square = if kind == MoveKind::Enpassant {
                // SAFETY: same offset as in make_move
                unsafe { dst.offset_unchecked(-geometry::pawn_forward_delta(color)) }
            } else {
                dst
            };
            self.put(target, capture_square);
        }

        let state = self.states.pop().expect("undo without a matching make");
        self.halfmove_clock = state.halfmove_clock;
        self.ep_square = state.ep_square;
        self.castling = state.castling;
        self.hash = state.hash;
    }

    /// Revokes the castling rights tied to `square`
    ///
    /// Covers rooks moving off or being captured on their corner squares, and kings
    /// moving off their home squares.
    fn clear_castling(&mut self, square: Square) {
        let mut rights = self.castling;
        match square {
            Square::A1 => rights.unset(Color::White, CastlingSide::Queen),
            Square::H1 => rights.unset(Color::White, CastlingSide::King),
            Square::E1 => rights.unset_color(Color::White),
            Square::A8 => rights.unset(Color::Black, CastlingSide::Queen),
            Square::H8 => rights.unset(Color::Black, CastlingSide::King),
            Square::E8 => rights.unset_color(Color::Black),
            _ => return,
        }
        if rights != self.castling {
            // The delta must be hashed before the rights are overwritten
            self.hash ^= zobrist::castling_delta(self.castling, rights);
            self.castling = rights;
        }
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.side)
    }

    /// Returns `true` if the king of color `c` is attacked
    ///
    /// After making a pseudo-legal move, call this for the side that just moved to find
    /// out whether the move was legal.
    #[inline]
    pub fn is_king_attacked(&self, c: Color) -> bool {
        self.is_attacked(self.king_square(c), c.inv())
    }

    /// Returns `true` if `target` is attacked by any piece of `attacker`
    ///
    /// The scan backtracks from the target square: pawns are probed against their two
    /// capture directions, knights and kings against their offset tables, and sliders by
    /// walking each ray until the first piece.
    pub fn is_attacked(&self, target: Square, attacker: Color) -> bool {
        let pawn = Cell::from_parts(attacker, Piece::Pawn);
        for &direction in geometry::pawn_capture_directions(attacker) {
            // The attacking pawn sits opposite to its capture direction
            if let Some(square) = target.offset(-direction) {
                if self.get(square) == pawn {
                    return true;
                }
            }
        }

        self.is_attacked_by_leaper(
            target,
            Cell::from_parts(attacker, Piece::Knight),
            &geometry::KNIGHT_DIRECTIONS,
        ) || self.is_attacked_by_slider(
            target,
            Cell::from_parts(attacker, Piece::Bishop),
            Cell::from_parts(attacker, Piece::Queen),
            &geometry::BISHOP_DIRECTIONS,
        ) || self.is_attacked_by_slider(
            target,
            Cell::from_parts(attacker, Piece::Rook),
            Cell::from_parts(attacker, Piece::Queen),
            &geometry::ROOK_DIRECTIONS,
        ) || self.is_attacked_by_leaper(
            target,
            Cell::from_parts(attacker, Piece::King),
            &geometry::KING_DIRECTIONS,
        )
    }

    fn is_attacked_by_leaper(&self, target: Square, attacker: Cell, directions: &[i8]) -> bool {
        directions
            .iter()
            .any(|&direction| target.offset(direction).map_or(false, |sq| self.get(sq) == attacker))
    }

    fn is_attacked_by_slider(
        &self,
        target: Square,
        attacker: Cell,
        queen: Cell,
        directions: &[i8],
    ) -> bool {
        for &direction in directions {
            let mut next = target.offset(direction);
            while let Some(square) = next {
                let cell = self.get(square);
                if cell.is_occupied() {
                    if cell == attacker || cell == queen {
                        return true;
                    }
                    break;
                }
                next = square.offset(direction);
            }
        }
        false
    }

    /// Returns `true` if the current position already occurred in the move history
    ///
    /// Walks the undo stack backwards in steps of two plies (so that the same side is to
    /// move), but no further back than the last irreversible move, which the halfmove
    /// clock marks.
    pub fn is_repetition(&self) -> bool {
        let len = self.states.len();
        let lower = len.saturating_sub(self.halfmove_clock as usize);
        let mut idx = len;
        while idx >= lower + 2 {
            idx -= 2;
            if self.states[idx].hash == self.hash {
                return true;
            }
        }
        false
    }

    /// Returns `true` if neither side has enough material to ever deliver mate
    ///
    /// This is the case when there are no pawns, rooks or queens on the board and each
    /// side has at most one minor piece.
    pub fn has_insufficient_material(&self) -> bool {
        for c in [Color::White, Color::Black] {
            if self.pieces(c, Piece::Pawn).is_nonempty()
                || self.pieces(c, Piece::Rook).is_nonempty()
                || self.pieces(c, Piece::Queen).is_nonempty()
            {
                return false;
            }
            if self.pieces(c, Piece::Knight).len() + self.pieces(c, Piece::Bishop).len() > 1 {
                return false;
            }
        }
        true
    }

    /// Returns `true` if a draw can be claimed by the fifty-move rule
    #[inline]
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Wraps the position to allow pretty-printing with the given style
    ///
    /// The resulting wrapper implements [`fmt::Display`], so it can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            position: self,
            style,
        }
    }
}

const fn castling_rook_squares(dst: Square) -> (Square, Square) {
    match dst {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        Square::C8 => (Square::A8, Square::D8),
        _ => panic!("not a castling target square"),
    }
}

impl Clone for Position {
    fn clone(&self) -> Position {
        Position {
            board: self.board,
            pieces: self.pieces,
            material: self.material,
            castling: self.castling,
            ep_square: self.ep_square,
            side: self.side,
            halfmove_clock: self.halfmove_clock,
            halfmove_number: self.halfmove_number,
            hash: self.hash,
            states: ArrayVec::new(),
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.board == other.board
            && self.pieces == other.pieces
            && self.material == other.material
            && self.castling == other.castling
            && self.ep_square == other.ep_square
            && self.side == other.side
            && self.halfmove_clock == other.halfmove_clock
            && self.halfmove_number == other.halfmove_number
            && self.hash == other.hash
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Position({})", self)
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Position {
        Position::empty()
    }
}

/// Style for [`Position::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print a position
///
/// See docs for [`Position::pretty()`] for more details.
pub struct Pretty<'a> {
    position: &'a Position,
    style: PrettyStyle,
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let (horz, vert, angle) = match self.style {
            PrettyStyle::Ascii => ('-', '|', '+'),
            PrettyStyle::Utf8 => ('─', '│', '┼'),
        };
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank.as_char(), vert)?;
            for file in File::iter() {
                let cell = self.position.get(Square::from_parts(file, rank));
                match self.style {
                    PrettyStyle::Ascii => write!(f, "{}", cell.as_char())?,
                    PrettyStyle::Utf8 => write!(f, "{}", cell.as_utf8_char())?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", horz, angle)?;
        for _ in File::iter() {
            write!(f, "{}", horz)?;
        }
        writeln!(f)?;
        let indicator = match (self.style, self.position.side()) {
            (PrettyStyle::Ascii, Color::White) => 'W',
            (PrettyStyle::Ascii, Color::Black) => 'B',
            (PrettyStyle::Utf8, Color::White) => '○',
            (PrettyStyle::Utf8, Color::Black) => '●',
        };
        write!(f, "{}{}", indicator, vert)?;
        for file in File::iter() {
            write!(f, "{}", file.as_char())?;
        }
        writeln!(f)?;
        Ok(())
    }
}

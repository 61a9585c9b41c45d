//! FEN parsing and formatting

use crate::geometry;
use crate::position::Position;
use crate::types::{self, CastlingSide, Cell, Color, File, Piece, Rank, Square};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// FEN of the standard starting position
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Error parsing [`Position`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN doesn't consist of 4, 5 or 6 fields
    #[error("expected 4 to 6 fields, got {0}")]
    FieldCount(usize),
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    TooManyRanks,
    /// Not enough ranks
    #[error("not enough ranks")]
    NotEnoughRanks,
    /// Unexpected character in the piece placement field
    #[error("unexpected char {0:?} in piece placement")]
    UnexpectedPlacementChar(char),
    /// Error parsing side to move
    #[error("bad side to move: {0}")]
    Side(#[from] types::ColorParseError),
    /// Unexpected character in the castling field
    #[error("unexpected char {0:?} in castling rights")]
    UnexpectedCastlingChar(char),
    /// A file-letter castling flag refers to a king that is not on the board
    #[error("castling flag refers to a missing {0:?} king")]
    MissingKing(Color),
    /// Error parsing the en passant square
    #[error("bad en passant square: {0}")]
    Enpassant(#[from] types::SquareParseError),
    /// En passant rank is inconsistent with the side to move
    #[error("invalid en passant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing the halfmove clock
    #[error("bad halfmove clock: {0}")]
    HalfmoveClock(ParseIntError),
    /// Error parsing the fullmove number
    #[error("bad fullmove number: {0}")]
    FullmoveNumber(ParseIntError),
    /// Fullmove number is zero
    #[error("fullmove number must be positive")]
    ZeroFullmoveNumber,
}

impl Position {
    /// Returns the standard starting position
    pub fn initial() -> Position {
        Position::from_fen(STARTPOS).unwrap()
    }

    /// Parses a position from FEN
    ///
    /// Does the same as [`Position::from_str`]. It is recommended to use this function
    /// instead of `from_str()` for better readability.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        Position::from_str(fen)
    }

    /// Converts the position into a FEN string
    ///
    /// Does the same as `Position::to_string()`. It is recommended to use this function
    /// instead of `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

fn parse_placement(s: &str, position: &mut Position) -> Result<(), FenParseError> {
    type Error = FenParseError;

    let mut file = 0_usize;
    let mut rank = 7_usize;
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let run = (b - b'0') as usize;
                if file + run > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += run;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                if rank == 0 {
                    return Err(Error::TooManyRanks);
                }
                rank -= 1;
                file = 0;
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                let cell = Cell::from_char(b as char)
                    .filter(Cell::is_occupied)
                    .ok_or(Error::UnexpectedPlacementChar(b as char))?;
                let square =
                    Square::from_parts(File::from_index(file), Rank::from_index(rank));
                position.put(cell, square);
                file += 1;
            }
        }
    }

    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank != 0 {
        return Err(Error::NotEnoughRanks);
    }
    Ok(())
}

fn parse_castling(s: &str, position: &mut Position) -> Result<(), FenParseError> {
    if s == "-" {
        return Ok(());
    }
    for b in s.bytes() {
        let ch = b as char;
        let (color, side) = match b {
            b'K' => (Color::White, CastlingSide::King),
            b'Q' => (Color::White, CastlingSide::Queen),
            b'k' => (Color::Black, CastlingSide::King),
            b'q' => (Color::Black, CastlingSide::Queen),
            _ => {
                // Shredder-style flag: a file letter names the rook's file, and the side
                // follows from where the king currently stands
                let file = File::from_char(ch.to_ascii_lowercase())
                    .ok_or(FenParseError::UnexpectedCastlingChar(ch))?;
                let color = if ch.is_ascii_lowercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let king = position
                    .pieces(color, Piece::King)
                    .first()
                    .ok_or(FenParseError::MissingKing(color))?;
                let side = if file > king.file() {
                    CastlingSide::King
                } else {
                    CastlingSide::Queen
                };
                (color, side)
            }
        };
        position.set_castling_right(color, side);
    }
    Ok(())
}

fn parse_ep_square(s: &str, position: &mut Position) -> Result<(), FenParseError> {
    if s == "-" {
        return Ok(());
    }
    let square = Square::from_str(s)?;
    if square.rank() != geometry::enpassant_rank(position.side()) {
        return Err(FenParseError::InvalidEnpassantRank(square.rank()));
    }
    position.set_ep_square(Some(square));
    Ok(())
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Position, FenParseError> {
        type Error = FenParseError;

        // Runs of whitespace collapse into single separators
        let fields: Vec<&str> = s.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(Error::FieldCount(fields.len()));
        }

        let mut position = Position::empty();
        parse_placement(fields[0], &mut position)?;
        position.set_side(Color::from_str(fields[1])?);
        parse_castling(fields[2], &mut position)?;
        parse_ep_square(fields[3], &mut position)?;

        let halfmove_clock = match fields.get(4) {
            Some(field) => u16::from_str(field).map_err(Error::HalfmoveClock)?,
            None => 0,
        };
        position.set_halfmove_clock(halfmove_clock);

        let fullmove_number = match fields.get(5) {
            Some(field) => {
                let number = u16::from_str(field).map_err(Error::FullmoveNumber)?;
                if number == 0 {
                    return Err(Error::ZeroFullmoveNumber);
                }
                number
            }
            None => 1,
        };
        position.set_fullmove_number(fullmove_number);

        Ok(position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let cell = self.get(Square::from_parts(file, rank));
                if cell.is_free() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }

        write!(f, " {} {}", self.side(), self.castling())?;
        match self.ep_square() {
            Some(square) => write!(f, " {}", square)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())?;
        Ok(())
    }
}

//! Board geometry: 0x88 direction deltas and per-piece direction tables

use crate::types::{Color, Rank};

pub const NORTH: i8 = 16;
pub const SOUTH: i8 = -16;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = NORTH + EAST;
pub const NORTH_WEST: i8 = NORTH + WEST;
pub const SOUTH_EAST: i8 = SOUTH + EAST;
pub const SOUTH_WEST: i8 = SOUTH + WEST;

/// The eight L-shaped knight offsets
pub const KNIGHT_DIRECTIONS: [i8; 8] = [
    NORTH + NORTH + EAST,
    NORTH + NORTH + WEST,
    NORTH + EAST + EAST,
    NORTH + WEST + WEST,
    SOUTH + SOUTH + EAST,
    SOUTH + SOUTH + WEST,
    SOUTH + EAST + EAST,
    SOUTH + WEST + WEST,
];

/// The four diagonal ray directions
pub const BISHOP_DIRECTIONS: [i8; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];

/// The four orthogonal ray directions
pub const ROOK_DIRECTIONS: [i8; 4] = [NORTH, SOUTH, EAST, WEST];

/// All eight ray directions
pub const QUEEN_DIRECTIONS: [i8; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];

/// The king steps in the same eight directions the queen slides in
pub const KING_DIRECTIONS: [i8; 8] = QUEEN_DIRECTIONS;

const WHITE_PAWN_CAPTURE_DIRECTIONS: [i8; 2] = [NORTH_EAST, NORTH_WEST];
const BLACK_PAWN_CAPTURE_DIRECTIONS: [i8; 2] = [SOUTH_EAST, SOUTH_WEST];

/// Returns the two capture directions for a pawn of color `c`
#[inline]
pub const fn pawn_capture_directions(c: Color) -> &'static [i8; 2] {
    match c {
        Color::White => &WHITE_PAWN_CAPTURE_DIRECTIONS,
        Color::Black => &BLACK_PAWN_CAPTURE_DIRECTIONS,
    }
}

/// Returns the forward direction for a pawn of color `c`
#[inline]
pub const fn pawn_forward_delta(c: Color) -> i8 {
    match c {
        Color::White => NORTH,
        Color::Black => SOUTH,
    }
}

/// Returns the rank on which color `c` castles
#[inline]
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Returns the only rank on which an en passant target square may appear when it is
/// `side_to_move`'s turn
///
/// If White is to move, Black has just made the double pawn push, so the target square is
/// on rank 6, and vice versa.
#[inline]
pub const fn enpassant_rank(side_to_move: Color) -> Rank {
    match side_to_move {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn test_deltas() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4.offset(NORTH), "e5".parse().ok());
        assert_eq!(e4.offset(SOUTH), "e3".parse().ok());
        assert_eq!(e4.offset(EAST), "f4".parse().ok());
        assert_eq!(e4.offset(WEST), "d4".parse().ok());
        assert_eq!(e4.offset(NORTH_EAST), "f5".parse().ok());
        assert_eq!(e4.offset(SOUTH_WEST), "d3".parse().ok());
    }

    #[test]
    fn test_knight_directions() {
        let e4: Square = "e4".parse().unwrap();
        let mut targets: Vec<String> = KNIGHT_DIRECTIONS
            .iter()
            .filter_map(|&d| e4.offset(d))
            .map(|sq| sq.to_string())
            .collect();
        targets.sort();
        assert_eq!(
            targets,
            ["c3", "c5", "d2", "d6", "f2", "f6", "g3", "g5"]
        );

        // Corner squares keep only two knight targets
        let a1 = Square::A1;
        assert_eq!(
            KNIGHT_DIRECTIONS.iter().filter_map(|&d| a1.offset(d)).count(),
            2
        );
    }

    #[test]
    fn test_ranks() {
        assert_eq!(castling_rank(Color::White), Rank::R1);
        assert_eq!(castling_rank(Color::Black), Rank::R8);
        assert_eq!(enpassant_rank(Color::White), Rank::R6);
        assert_eq!(enpassant_rank(Color::Black), Rank::R3);
        assert_eq!(pawn_forward_delta(Color::White), NORTH);
        assert_eq!(pawn_forward_delta(Color::Black), SOUTH);
    }

    #[test]
    fn test_pawn_directions() {
        let e4: Square = "e4".parse().unwrap();
        let white: Vec<_> = pawn_capture_directions(Color::White)
            .iter()
            .filter_map(|&d| e4.offset(d))
            .map(|sq| sq.to_string())
            .collect();
        assert_eq!(white, ["f5", "d5"]);
        let black: Vec<_> = pawn_capture_directions(Color::Black)
            .iter()
            .filter_map(|&d| e4.offset(d))
            .map(|sq| sq.to_string())
            .collect();
        assert_eq!(black, ["f3", "d3"]);
    }
}

//! Static evaluation

use crate::geometry;
use crate::position::Position;
use crate::types::{Cell, Color, Piece, Square};

/// Bonus for having the right to move
pub const TEMPO: i32 = 1;

const MATERIAL_WEIGHT: i32 = 100;
const MOBILITY_WEIGHT: i32 = 80;
const MAX_WEIGHT: i32 = 100;

const BISHOP_PAIR_BONUS: i32 = 50;

const KNIGHT_MOBILITY_WEIGHT: i32 = 4;
const BISHOP_MOBILITY_WEIGHT: i32 = 5;
const ROOK_MOBILITY_WEIGHT: i32 = 2;
const QUEEN_MOBILITY_WEIGHT: i32 = 1;

/// Evaluates the position, in centipawns from the side-to-move's perspective
///
/// A positive score is good for the side to move. The evaluation is the weighted sum of
/// the material and mobility balances, plus a small tempo bonus.
pub fn evaluate(position: &Position) -> i32 {
    let us = position.side();
    let them = us.inv();

    let material_score =
        (material(position, us) - material(position, them)) * MATERIAL_WEIGHT / MAX_WEIGHT;
    let mobility_score =
        (mobility(position, us) - mobility(position, them)) * MOBILITY_WEIGHT / MAX_WEIGHT;

    material_score + mobility_score + TEMPO
}

fn material(position: &Position, color: Color) -> i32 {
    let mut material = position.material(color);
    if position.pieces(color, Piece::Bishop).len() >= 2 {
        material += BISHOP_PAIR_BONUS;
    }
    material
}

fn mobility(position: &Position, color: Color) -> i32 {
    let mut knight_mobility = 0;
    for square in position.pieces(color, Piece::Knight) {
        knight_mobility += piece_mobility(position, square, &geometry::KNIGHT_DIRECTIONS, false);
    }

    let mut bishop_mobility = 0;
    for square in position.pieces(color, Piece::Bishop) {
        bishop_mobility += piece_mobility(position, square, &geometry::BISHOP_DIRECTIONS, true);
    }

    let mut rook_mobility = 0;
    for square in position.pieces(color, Piece::Rook) {
        rook_mobility += piece_mobility(position, square, &geometry::ROOK_DIRECTIONS, true);
    }

    let mut queen_mobility = 0;
    for square in position.pieces(color, Piece::Queen) {
        queen_mobility += piece_mobility(position, square, &geometry::QUEEN_DIRECTIONS, true);
    }

    knight_mobility * KNIGHT_MOBILITY_WEIGHT
        + bishop_mobility * BISHOP_MOBILITY_WEIGHT
        + rook_mobility * ROOK_MOBILITY_WEIGHT
        + queen_mobility * QUEEN_MOBILITY_WEIGHT
}

/// Counts the squares reachable from `square` along `directions`
///
/// Slider rays stop at the first occupied square, which is itself counted; non-sliders
/// count every on-board offset.
fn piece_mobility(position: &Position, square: Square, directions: &[i8], sliding: bool) -> i32 {
    let mut mobility = 0;
    for &direction in directions {
        let mut next = square.offset(direction);
        while let Some(target) = next {
            mobility += 1;
            if sliding && position.get(target) == Cell::EMPTY {
                next = target.offset(direction);
            } else {
                break;
            }
        }
    }
    mobility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::STARTPOS;

    #[test]
    fn test_startpos() {
        // The starting position is symmetric, so only the tempo bonus remains
        let position = Position::from_fen(STARTPOS).unwrap();
        assert_eq!(evaluate(&position), TEMPO);
    }

    #[test]
    fn test_symmetry() {
        // Mirrored positions evaluate identically for both sides
        let white = Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w - - 0 1").unwrap();
        let black = Position::from_fen("rn2k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white), evaluate(&black));
    }

    #[test]
    fn test_material_balance() {
        // White is a rook up; the rook also out-mobilizes the bare king's side
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let score = evaluate(&position);
        assert!(score > Piece::Rook.value());

        // From Black's perspective the same position scores negative
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert!(evaluate(&position) < -Piece::Rook.value() / 2);
    }

    #[test]
    fn test_bishop_pair() {
        // Two bishops versus bishop and knight: raw material is equal, the pair bonus
        // and the mobility difference decide
        let pair = Position::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let split = Position::from_fen("4k3/8/8/8/8/8/8/2N1KB2 w - - 0 1").unwrap();
        let pair_material = material(&pair, Color::White);
        let split_material = material(&split, Color::White);
        assert_eq!(pair_material - split_material, BISHOP_PAIR_BONUS);
    }

    #[test]
    fn test_mobility_counts() {
        // A lone knight in the center reaches all 8 squares
        let position = Position::from_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(
            piece_mobility(&position, e4, &geometry::KNIGHT_DIRECTIONS, false),
            8
        );

        // A cornered knight reaches only 2
        let position = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert_eq!(
            piece_mobility(&position, Square::A1, &geometry::KNIGHT_DIRECTIONS, false),
            2
        );

        // A rook on an empty board always sees 14 squares
        let position = Position::from_fen("4k3/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            piece_mobility(&position, e4, &geometry::ROOK_DIRECTIONS, true),
            14
        );

        // Blockers are counted, squares behind them are not
        let position = Position::from_fen("4k3/8/8/4p3/4R3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            piece_mobility(&position, e4, &geometry::ROOK_DIRECTIONS, true),
            11
        );
    }
}

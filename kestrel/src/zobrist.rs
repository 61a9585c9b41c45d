use crate::types::{CastlingRights, Cell, Square};

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

#[inline]
pub fn pieces(cell: Cell, square: Square) -> u64 {
    unsafe {
        *PIECES
            .get_unchecked(cell.index())
            .get_unchecked(square.index())
    }
}

#[inline]
pub fn enpassant(square: Square) -> u64 {
    unsafe { *ENPASSANT.get_unchecked(square.index()) }
}

#[inline]
pub fn castling(rights: CastlingRights) -> u64 {
    unsafe { *CASTLING.get_unchecked(rights.index()) }
}

/// Hash difference between two castling rights values
///
/// Relies on the XOR-decomposable castling table: the difference of two masks hashes
/// to the entry of their symmetric difference.
#[inline]
pub fn castling_delta(from: CastlingRights, to: CastlingRights) -> u64 {
    unsafe { *CASTLING.get_unchecked(from.index() ^ to.index()) }
}

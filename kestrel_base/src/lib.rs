//! # Base types for kestrel
//!
//! This is an auxiliary crate for `kestrel`, which contains the primitive chess domain:
//! squares in the 0x88 encoding, pieces, bitboards and board geometry. It was split from
//! the main crate so everything declared here can be used in the build script for
//! `kestrel`.
//!
//! Normally you don't want to use this crate directly. Use `kestrel` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;

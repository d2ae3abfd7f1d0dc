//! Implementation of piece movement rules and the board they are checked
//! against.

pub mod board;
pub mod core;
pub mod geometry;
pub mod rules;

//! Move legality checker for chess-like games: given the arrangement of
//! pieces on a board of any size, decides whether a piece can move from one
//! square to another.
//!
//! The rules live in [`chess::rules`] and are composed from the piece-agnostic
//! predicates in [`chess::geometry`]. They only read the board through the
//! [`chess::board::Board`] trait; [`chess::board::Mailbox`] is the board
//! implementation provided by the crate.
//!
//! Game-level concerns (turns, check, history, draws) are out of scope: a move
//! is legal if the piece can geometrically reach the destination and the
//! occupancy of the board allows it.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;

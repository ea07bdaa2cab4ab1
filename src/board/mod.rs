//! Board topology.
//!
//! The board is built once, validated, and then only read. Workers share it
//! by reference for the whole batch.
//!
//! Redirects are single hop: a ladder or chute never lands on another
//! redirect source.

pub mod layout;

pub use layout::{Board, BoardBuilder, Bounds, Redirect, RedirectKind, Roll, Square};

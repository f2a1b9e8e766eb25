//! Data-code parser.
//!
//! A data code is a compact textual encoding of one source's effects, for
//! example `SSA=1:M1=2:GL[SSB=1]:NE`. Fragments are separated by `:` outside
//! brackets; each recognized fragment updates exactly one field of the
//! resulting [`Delta`](crate::delta::Delta).
//!
//! Parsing is fail-soft: unrecognized fragments are skipped and reported in
//! [`Parsed::rejected`]. Only a structurally broken code (unbalanced brackets,
//! over-long input) fails as a whole, via [`try_parse`].

mod parser;
mod tables;
mod token;

pub use parser::{Parsed, parse, parse_delta, try_parse};
pub use token::{CodeError, Effect, TokenError, TokenErrorReason};

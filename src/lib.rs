#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
//! The crate is organized as a pipeline, one module per stage, plus a thin facade
//! ([`address::AddressParser`]) that wires them together:
//!
//! 1. [`normalizer`] — whitespace and punctuation cleanup, fragment splitting.
//! 2. [`tokenizer`] — fragment-to-category classification.
//! 3. [`grammar`] — the context-free grammar over token categories.
//! 4. [`chart`] — Earley-style chart parsing, producing every admissible derivation.
//! 5. [`disambiguator`] — ranks derivations, picking exactly one (or none, on a tie).
//! 6. [`projector`] — reconstructs structured fields from the winning tree and surface tokens.
//! 7. [`cache`] — optional tree-skeleton cache keyed on token-category signature.
//!
//! [`batch`], [`cli`], and [`utils`] are ambient tooling around the core pipeline, not part of
//! it.
pub mod address;
pub mod batch;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod disambiguator;
pub mod error;
pub mod grammar;
pub mod normalizer;
pub mod projector;
pub mod tokenizer;
pub mod utils;

pub use address::{AddressKind, AddressParser, AddressResult, DoorNumber};
pub use batch::AddressResultRecord;
pub use cache::{CachedOutcome, MemoryParseCache, ParseCache, TreeSkeleton};
pub use cli::Cli;
pub use error::{AddressError, ParseOutcome};
pub use tokenizer::{Token, TokenCategory, TokenizeError};

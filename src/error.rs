//! The `error` module creates a library-specific Error type `AddressError`, and an alias for
//! Result using the `AddressError`, called `ParseOutcome`.
//!
//! The core `parse` operation never returns `Err` — a malformed address line surfaces as
//! `kind: null` on the returned [`crate::AddressResult`], per the library's error handling
//! contract (see `error_handling` in the crate docs). This error type exists for the ambient
//! layer around the core pipeline: CSV batch I/O and optional cache persistence, where a
//! failure genuinely has nowhere else to go.
use thiserror::Error;

/// The `AddressError` enum represents the library-specific Error type.
#[derive(Error, Debug)]
pub enum AddressError {
    /// Error conversion type for [`std::io::Error`], surfaced by batch CSV I/O.
    #[error("Input/output error from std.")]
    Io(#[from] std::io::Error),
    /// Error conversion type for [`csv::Error`], surfaced by batch CSV I/O.
    #[error("CSV error.")]
    Csv(#[from] csv::Error),
    /// Error conversion type for [`bincode::error::EncodeError`], surfaced by cache persistence.
    #[error("Bincode encode error.")]
    BincodeEncode(#[from] bincode::error::EncodeError),
    /// Error conversion type for [`bincode::error::DecodeError`], surfaced by cache persistence.
    #[error("Bincode decode error.")]
    BincodeDecode(#[from] bincode::error::DecodeError),
    /// Raised by [`crate::batch::parse_csv_column`] when the requested column is absent from
    /// the source CSV's header row.
    #[error("Column `{0}` not found in source CSV header.")]
    MissingColumn(String),
}

/// Alias for the Result type using the local Error type. Named to avoid colliding with
/// [`crate::AddressResult`], the public data record this library returns from `parse`.
pub type ParseOutcome<T> = Result<T, AddressError>;

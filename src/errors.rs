//! NES errors
//!
//! All errors NES can produce

use thiserror::Error;

/// NES error type
///
/// Machine-level errors. Everything else in the core degrades gracefully and
/// is reported through logging instead of failing.
#[derive(Debug, Error)]
pub enum NesError {
    #[error("NES can't run without a cartridge!")]
    NoCartridgeInserted,

    #[error("mapper {mapper} required by this cartridge is not implemented")]
    UnsupportedMapper { mapper: u8 },
}

/// iNES file ingestion errors
#[derive(Debug, Error)]
pub enum InesError {
    #[error("could not open iNES file")]
    OpenFailed(#[source] std::io::Error),

    #[error("magic bytes do not match, this is not an iNES file!")]
    MagicBytesMismatch,

    #[error("iNES header declares no PRG ROM banks")]
    MissingPrgRom,

    #[error("iNES file ended abruptly, is it corrupted?")]
    EarlyEndOfFile,

    #[error("failed to read iNES file")]
    ReadError(#[source] std::io::Error),
}

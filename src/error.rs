use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FragmentError {
    #[error("unexpected document structure: {0}")]
    Structure(String),

    #[error("missing or unparseable identifier: {0}")]
    Lookup(String),

    #[error("invalid reaction id: {0}")]
    InvalidReactionId(String),

    #[error("invalid UniProt accession: {0}")]
    InvalidAccession(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("Rhea request failed: {0}")]
    RheaHttp(String),

    #[error("Rhea returned status {status}: {message}")]
    RheaStatus { status: u16, message: String },

    #[error("xrefdb request failed: {0}")]
    XrefHttp(String),

    #[error("xrefdb returned status {status}: {message}")]
    XrefStatus { status: u16, message: String },
}

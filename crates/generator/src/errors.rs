//! Error types for the HVYC generation domain.
//!
//! [`RenderError`] and [`CompileError`] are produced by implementations of the
//! port traits in [`crate::ports`]. [`GeneratorError`] is what callers of
//! [`crate::ContractGenerator`] see; it wraps the port errors transparently so
//! that renderer and compiler failures reach the caller unmodified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SolcVersion, TemplateName};

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failures raised by a [`crate::TemplateRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RenderError {
    /// No template with this name is known to the renderer.
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Name that was looked up.
        name: TemplateName,
    },

    /// The template exists but could not be parsed.
    #[error("Template syntax error in '{name}': {message}")]
    Syntax {
        /// Template being parsed.
        name: TemplateName,
        /// Parser diagnostic.
        message: String,
    },

    /// The template parsed but failed while rendering the data object.
    #[error("Failed to render '{name}': {message}")]
    Render {
        /// Template being rendered.
        name: TemplateName,
        /// Engine diagnostic.
        message: String,
    },
}

// ---------------------------------------------------------------------------

/// Failures raised by a [`crate::ContractCompiler`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CompileError {
    /// The compiler executable could not be started.
    #[error("Compiler not installed or not on PATH: {binary}")]
    NotInstalled {
        /// Executable that was looked up.
        binary: String,
    },

    /// The installed compiler reports a different version than requested.
    #[error("Compiler version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version requested by configuration.
        expected: SolcVersion,
        /// Version the compiler reported.
        found: SolcVersion,
    },

    /// The compiler rejected the source (syntax, type or import errors).
    #[error("Compilation failed:\n{stderr}")]
    Compilation {
        /// Compiler diagnostics, verbatim.
        stderr: String,
    },

    /// Communicating with the compiler process failed.
    #[error("Compiler I/O error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },

    /// The compiler ran but its output could not be understood.
    #[error("Unexpected compiler output: {message}")]
    InvalidOutput {
        /// What was wrong with the output.
        message: String,
    },

    /// Compilation succeeded but the expected contract is not in the output.
    #[error("Contract '{identifier}' missing from compiler output")]
    ContractMissing {
        /// Contract identifier that was looked for.
        identifier: String,
    },
}

// ---------------------------------------------------------------------------
// Generator-level errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::ContractGenerator`] and parameter parsing.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A renderer failure, passed through unchanged.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A compiler failure, passed through unchanged.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A contract parameter failed validation.
    ///
    /// Produced when raw user input is converted into [`crate::ContractParams`].
    #[error("Invalid {field}: '{value}'")]
    InvalidParameter {
        /// Parameter name (e.g. `"price"`).
        field: &'static str,
        /// Rejected value.
        value: String,
    },
}

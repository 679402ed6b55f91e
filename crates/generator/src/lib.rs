//! Core generation domain for HVYC contracts.
//!
//! This crate contains every domain concept used to turn a contract request
//! into Solidity source: validated identifiers, value types, the variant
//! selector, the data-shaping logic, and the port traits through which
//! rendering and compilation are reached. Infrastructure crates implement the
//! traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype names (`ContractName`, `PropertyName`, `TemplateName`, `GenerationRunId`) |
//! | [`types`] | Value types (`EtherAmount`, `SolcVersion`, `ContractVariant`, `ContractParams`, etc.) |
//! | [`shaping`] | Pure parameter-to-template data shaping |
//! | [`ports`] | `TemplateRenderer` and `ContractCompiler` traits |
//! | [`generate`] | `ContractGenerator` orchestration |
//! | [`errors`] | Port and generator error types |

pub mod errors;
pub mod generate;
pub mod identifiers;
mod params;
pub mod ports;
pub mod shaping;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{CompileError, GeneratorError, RenderError};
pub use generate::{CompilerSettings, ContractGenerator, GeneratedContract, RenderedContract};
pub use identifiers::{ContractName, GenerationRunId, PropertyName, TemplateName};
pub use ports::{CompileRequest, ContractCompiler, OutputSelection, TemplateRenderer};
pub use shaping::{build_contract_data, shape_properties, PropertyFragments};
pub use types::{
    Burnability, CompiledArtifacts, CompiledContract, ContractParams, ContractRenderData,
    ContractVariant, EtherAmount, ImportRemapping, MaxSupply, MintAccess, Model, SolcVersion,
    Timestamp,
};

//! Shared value types for the HVYC generation domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (e.g. ether amounts are decimal strings,
//! supplies are positive) and are rendered verbatim into generated source.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ContractName, PropertyName};

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// A decimal amount of ether, kept as text (e.g. `"0.2"`, `"10"`).
///
/// Rendered into the contract as `<amount> ether`, so the value must be a
/// Solidity rational literal: digits, optionally followed by `.` and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EtherAmount(String);

impl EtherAmount {
    /// Creates an [`EtherAmount`], returning `None` if `value` is not a
    /// plain decimal literal.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let (whole, fraction) = match v.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (v.as_str(), None),
        };
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if digits(whole) && fraction.map_or(true, digits) {
            Some(Self(v))
        } else {
            None
        }
    }

    /// Returns the amount as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EtherAmount {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value.clone()).ok_or_else(|| format!("invalid ether amount: '{value}'"))
    }
}

impl From<EtherAmount> for String {
    fn from(value: EtherAmount) -> String {
        value.0
    }
}

impl std::fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Maximum number of tokens a contract can ever mint. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaxSupply(u64);

impl MaxSupply {
    /// Creates a [`MaxSupply`], returning `None` for zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MaxSupply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Compiler settings
// ---------------------------------------------------------------------------

/// A `solc` release version (e.g. `0.8.4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SolcVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl SolcVersion {
    /// Creates a new [`SolcVersion`].
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for SolcVersion {
    type Err = String;

    /// Parses `"major.minor.patch"`. Build metadata after `+` is ignored, so
    /// `"0.8.4+commit.c7e474f2"` parses as `0.8.4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let core = s.trim().split('+').next().unwrap_or_default();
        let parts: Vec<&str> = core.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(format!("invalid solc version: '{s}'"));
        };
        let num = |p: &str| {
            p.parse::<u32>()
                .map_err(|_| format!("invalid solc version: '{s}'"))
        };
        Ok(Self::new(num(*major)?, num(*minor)?, num(*patch)?))
    }
}

impl std::fmt::Display for SolcVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ---------------------------------------------------------------------------

/// A `solc` import remapping (`prefix=target`).
///
/// Lets generated source import `@openzeppelin/...` while the library lives
/// in a local `node_modules` tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImportRemapping {
    prefix: String,
    target: String,
}

impl ImportRemapping {
    /// Creates a remapping, returning `None` if either side is empty.
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        let target = target.into();
        if prefix.is_empty() || target.is_empty() {
            None
        } else {
            Some(Self { prefix, target })
        }
    }

    /// The import prefix being remapped (e.g. `@openzeppelin`).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The path the prefix resolves to.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl FromStr for ImportRemapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once('=')
            .and_then(|(prefix, target)| Self::new(prefix.trim(), target.trim()))
            .ok_or_else(|| format!("invalid import remapping (expected prefix=target): '{s}'"))
    }
}

impl TryFrom<String> for ImportRemapping {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImportRemapping> for String {
    fn from(value: ImportRemapping) -> String {
        value.to_string()
    }
}

impl std::fmt::Display for ImportRemapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.prefix, self.target)
    }
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// The token model a contract mints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// A character with a limited life; burned when the game kills it.
    Character,
    /// A character with an infinite life; no game condition destroys it.
    Immortal,
}

impl Model {
    /// Struct and display name used in generated source.
    pub fn as_str(self) -> &'static str {
        match self {
            Model::Character => "Character",
            Model::Immortal => "Immortal",
        }
    }

    /// One-letter abbreviation used in the contract identifier and symbol.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Model::Character => "C",
            Model::Immortal => "I",
        }
    }

    /// Burnability a model gets unless overridden.
    pub fn default_burnability(self) -> Burnability {
        match self {
            Model::Character => Burnability::Burnable,
            Model::Immortal => Burnability::NonBurnable,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may call the mint methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintAccess {
    /// Any address can pay to mint.
    Payable,
    /// Only the issuing address can mint (still for a price).
    OwnerOnly,
}

impl MintAccess {
    /// The token the template switches on: `payable` or `onlyOwner`.
    pub fn as_str(self) -> &'static str {
        match self {
            MintAccess::Payable => "payable",
            MintAccess::OwnerOnly => "onlyOwner",
        }
    }
}

impl std::fmt::Display for MintAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether token holders can permanently destroy a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Burnability {
    /// Inherits the ERC-721 burnable extension.
    Burnable,
    /// No burn entry point.
    NonBurnable,
}

impl Burnability {
    /// Returns `true` for [`Burnability::Burnable`].
    pub fn is_burnable(self) -> bool {
        matches!(self, Burnability::Burnable)
    }
}

/// The full variant selector: model × mint access × burnability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractVariant {
    /// Token model.
    pub model: Model,
    /// Mint access policy.
    pub mint_access: MintAccess,
    /// Burnability.
    pub burnability: Burnability,
}

impl ContractVariant {
    /// Creates a variant from all three axes.
    pub fn new(model: Model, mint_access: MintAccess, burnability: Burnability) -> Self {
        Self {
            model,
            mint_access,
            burnability,
        }
    }

    /// A burnable [`Model::Character`] contract.
    pub fn character(mint_access: MintAccess) -> Self {
        Self::new(Model::Character, mint_access, Burnability::Burnable)
    }

    /// A non-burnable [`Model::Immortal`] contract.
    pub fn immortal(mint_access: MintAccess) -> Self {
        Self::new(Model::Immortal, mint_access, Burnability::NonBurnable)
    }
}

impl std::fmt::Display for ContractVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let burn = if self.burnability.is_burnable() {
            "burnable"
        } else {
            "non-burnable"
        };
        write!(f, "{}/{}/{}", self.model, self.mint_access, burn)
    }
}

// ---------------------------------------------------------------------------
// Contract parameters and render data
// ---------------------------------------------------------------------------

/// Everything one contract-generation request needs.
///
/// Immutable once built; passed by value into [`crate::ContractGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractParams {
    /// Creator-defined contract name.
    pub name: ContractName,
    /// Price of a mint with randomly generated properties.
    pub price: EtherAmount,
    /// Price of a mint where the caller chooses property values.
    pub premium_price: EtherAmount,
    /// Maximum number of tokens the contract can mint.
    pub max_supply: MaxSupply,
    /// Numeric properties, in declaration order.
    pub properties: Vec<PropertyName>,
    /// Variant selector.
    pub variant: ContractVariant,
}

impl ContractParams {
    /// Identifier of the generated contract: `HVY<abbreviation>_<name>`.
    pub fn contract_identifier(&self) -> String {
        format!("HVY{}_{}", self.variant.model.abbreviation(), self.name)
    }
}

/// The data object handed to a [`crate::TemplateRenderer`].
///
/// Templates read it under the root name `data`. Field names are part of the
/// template contract; renaming one breaks every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRenderData {
    pub model: String,
    pub abrev: String,
    pub name: String,
    pub mint_access: String,
    pub burnable: bool,
    /// Burnable extension import, or `""` when not burnable.
    pub burnable_import: String,
    /// Inheritance tag for the burnable extension, or `""` when not burnable.
    pub burnable_tag: String,
    pub price: String,
    pub premium_price: String,
    pub max_supply: String,
    /// Struct field declarations, one per property.
    pub int_props: Vec<String>,
    /// Randomized mint assignments, one per property.
    pub int_mint_props: Vec<String>,
    /// Premium-mint parameter list.
    pub int_params: String,
    /// Property names pushed into the struct by the mint methods.
    pub int_push: Vec<String>,
    /// Property names that get a getter method.
    pub int_method_props: Vec<String>,
}

// ---------------------------------------------------------------------------
// Compilation output
// ---------------------------------------------------------------------------

/// ABI and runtime bytecode of one compiled contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledContract {
    /// JSON ABI description.
    pub abi: serde_json::Value,
    /// Hex-encoded runtime bytecode.
    #[serde(rename = "bin-runtime")]
    pub bin_runtime: String,
}

/// All contracts produced by one compilation, keyed by the compiler's
/// contract key (e.g. `<stdin>:HVYC_TEST`).
///
/// Imported library contracts appear here too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledArtifacts(BTreeMap<String, CompiledContract>);

impl CompiledArtifacts {
    /// Creates an empty set of artifacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one contract under its compiler key.
    pub fn insert(&mut self, key: impl Into<String>, contract: CompiledContract) {
        self.0.insert(key.into(), contract);
    }

    /// Finds the contract whose key ends with `:<identifier>`.
    pub fn find(&self, identifier: &str) -> Option<&CompiledContract> {
        let suffix = format!(":{identifier}");
        self.0
            .iter()
            .find(|(key, _)| key.ends_with(&suffix) || key.as_str() == identifier)
            .map(|(_, contract)| contract)
    }

    /// Number of compiled contracts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was compiled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

//! Newtype domain identifiers.
//!
//! Every name that ends up inside generated Solidity is wrapped in a distinct
//! newtype. This prevents accidentally passing — for example — a
//! [`PropertyName`] where a [`ContractName`] is expected, and guarantees that
//! both are valid Solidity identifiers before they reach the template.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returns `true` if `value` is a valid Solidity identifier.
///
/// Solidity identifiers match `[a-zA-Z$_][a-zA-Z0-9$_]*`.
pub fn is_solidity_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Keywords, reserved words and literal units that `solc` refuses as
/// identifiers. Sized elementary types are matched separately.
const SOLIDITY_KEYWORDS: &[&str] = &[
    "abstract", "address", "after", "alias", "anonymous", "apply", "assembly", "auto", "bool",
    "break", "byte", "bytes", "calldata", "case", "catch", "constant", "constructor", "continue",
    "contract", "copyof", "days", "default", "define", "delete", "do", "else", "emit", "enum",
    "ether", "event", "external", "fallback", "false", "final", "fixed", "for", "function", "gwei",
    "hours", "if", "immutable", "implements", "import", "in", "indexed", "inline", "int",
    "interface", "internal", "is", "let", "library", "macro", "mapping", "match", "memory",
    "minutes", "modifier", "mutable", "new", "null", "of", "override", "partial", "payable",
    "pragma", "private", "promise", "public", "pure", "receive", "reference", "relocatable",
    "return", "returns", "revert", "sealed", "seconds", "sizeof", "static", "storage", "string",
    "struct", "super", "supports", "switch", "this", "throw", "true", "try", "type", "typedef",
    "typeof", "ufixed", "uint", "unchecked", "unicode", "using", "var", "view", "virtual", "weeks",
    "wei", "while", "years",
];

/// Returns `true` if `value` is a Solidity keyword, reserved word or
/// elementary type name (`uint256`, `bytes32`, `fixed128x18`, ...).
pub fn is_solidity_keyword(value: &str) -> bool {
    if SOLIDITY_KEYWORDS.contains(&value) {
        return true;
    }
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let sized = ["uint", "int", "bytes"]
        .iter()
        .any(|prefix| value.strip_prefix(*prefix).is_some_and(digits));
    let fixed = ["ufixed", "fixed"].iter().any(|prefix| {
        value
            .strip_prefix(*prefix)
            .and_then(|rest| rest.split_once('x'))
            .is_some_and(|(m, n)| digits(m) && digits(n))
    });
    sized || fixed
}

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// `$valid` decides whether a candidate value is accepted.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident, $valid:expr
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is rejected.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                let valid: fn(&str) -> bool = $valid;
                if valid(&v) { Some(Self(v)) } else { None }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value.clone())
                    .ok_or_else(|| format!("invalid {}: '{}'", stringify!($name), value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — Solidity names
// ---------------------------------------------------------------------------

string_id! {
    /// The creator-defined name of a minter contract (e.g. `"TEST"`).
    ///
    /// Used as the ERC-721 token name and as the suffix of the generated
    /// contract identifier (`HVYC_TEST`), so it must be a Solidity identifier.
    ContractName, is_solidity_identifier
}

string_id! {
    /// One numeric property carried by every token (e.g. `"strength"`).
    ///
    /// Becomes a struct field, a mint-method local, a premium-mint parameter
    /// and a getter suffix in the generated contract, so keywords and type
    /// names are refused.
    PropertyName, |v: &str| is_solidity_identifier(v) && !is_solidity_keyword(v)
}

// ---------------------------------------------------------------------------
// Identifiers — configuration names
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a template known to a [`crate::TemplateRenderer`]
    /// (e.g. `"hvy_template.sol.j2"`).
    TemplateName, |v: &str| !v.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single generation request (one render, optionally followed by
/// one compile).
///
/// Generated fresh for every request; propagated through spans and written to
/// the build manifest so log lines and artifacts can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationRunId(Uuid);

impl GenerationRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for GenerationRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

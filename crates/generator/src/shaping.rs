//! Parameter-to-template data shaping.
//!
//! Turns a [`ContractParams`] into the [`ContractRenderData`] a template
//! consumes. Everything here is a pure function of its input: identical
//! parameters always yield identical data, and therefore identical source.

use tracing::debug;

use crate::{ContractParams, ContractRenderData, PropertyName};

/// Import line for the ERC-721 burnable extension.
pub const BURNABLE_IMPORT: &str =
    r#"import "@openzeppelin/contracts/token/ERC721/extensions/ERC721Burnable.sol";"#;

/// Inheritance tag spliced between `ERC721,` and `Ownable`.
pub const BURNABLE_TAG: &str = " ERC721Burnable, ";

/// Solidity type of every numeric property.
pub const PROPERTY_TYPE: &str = "uint256";

/// Pseudo-random value expression assigned to each property by `mint()`.
///
/// Every property draws from the same `randArr[0]` slot and lands in `0..18`.
pub const RANDOM_PROPERTY_EXPR: &str = "(((randArr[0] % 100000000) / 1000000) % 18)";

/// Names the contract template declares or calls in the scopes where
/// properties become struct fields, locals and parameters. A property with one
/// of these names would redeclare or shadow it and the source would not compile.
pub const RESERVED_PROPERTY_NAMES: &[&str] = &[
    "tokenId",
    "randArr",
    "_tokens",
    "_nonce",
    "_mintToken",
    "_random",
    "_safeMint",
    "MAX_SUPPLY",
    "PRICE",
    "PREMIUM_PRICE",
    "Character",
    "Immortal",
    "owner",
    "ownerOf",
    "msg",
    "block",
    "abi",
    "keccak256",
    "require",
];

/// The four per-property outputs of [`shape_properties`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFragments {
    /// `uint256 <name>;` per property.
    pub int_props: Vec<String>,
    /// `uint256 <name> = <random expr>;` per property.
    pub int_mint_props: Vec<String>,
    /// `" uint256 a, uint256 b"`: no separator after the last entry.
    pub int_params: String,
    /// `<name>` per property.
    pub int_push: Vec<String>,
}

/// Shapes an ordered property list into declaration, mint, parameter and push
/// fragments in a single pass.
pub fn shape_properties(properties: &[PropertyName]) -> PropertyFragments {
    let mut fragments = PropertyFragments::default();
    let last = properties.len().saturating_sub(1);

    for (index, prop) in properties.iter().enumerate() {
        fragments.int_props.push(format!("{PROPERTY_TYPE} {prop};"));
        fragments
            .int_mint_props
            .push(format!("{PROPERTY_TYPE} {prop} = {RANDOM_PROPERTY_EXPR};"));

        fragments.int_params.push_str(&format!(" {PROPERTY_TYPE} {prop}"));
        if index < last {
            fragments.int_params.push(',');
        }

        fragments.int_push.push(prop.to_string());
    }

    fragments
}

/// Builds the template data object for one contract.
pub fn build_contract_data(params: &ContractParams) -> ContractRenderData {
    let fragments = shape_properties(&params.properties);
    let variant = params.variant;
    let burnable = variant.burnability.is_burnable();

    debug!(
        contract = %params.name,
        variant = %variant,
        properties = params.properties.len(),
        "Shaped contract render data"
    );

    ContractRenderData {
        model: variant.model.as_str().to_string(),
        abrev: variant.model.abbreviation().to_string(),
        name: params.name.to_string(),
        mint_access: variant.mint_access.as_str().to_string(),
        burnable,
        burnable_import: if burnable { BURNABLE_IMPORT } else { "" }.to_string(),
        burnable_tag: if burnable { BURNABLE_TAG } else { "" }.to_string(),
        price: params.price.to_string(),
        premium_price: params.premium_price.to_string(),
        max_supply: params.max_supply.to_string(),
        int_props: fragments.int_props,
        int_mint_props: fragments.int_mint_props,
        int_params: fragments.int_params,
        int_method_props: fragments.int_push.clone(),
        int_push: fragments.int_push,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(names: &[&str]) -> Vec<PropertyName> {
        names
            .iter()
            .map(|n| PropertyName::new(*n).expect("valid property"))
            .collect()
    }

    #[test]
    fn single_property_has_no_separator() {
        let f = shape_properties(&props(&["charm"]));
        assert_eq!(f.int_params, " uint256 charm");
        assert_eq!(f.int_props, vec!["uint256 charm;"]);
        assert_eq!(
            f.int_mint_props,
            vec!["uint256 charm = (((randArr[0] % 100000000) / 1000000) % 18);"]
        );
        assert_eq!(f.int_push, vec!["charm"]);
    }

    #[test]
    fn order_is_preserved() {
        let f = shape_properties(&props(&["hate", "love", "charm"]));
        assert_eq!(f.int_push, vec!["hate", "love", "charm"]);
        assert_eq!(f.int_params, " uint256 hate, uint256 love, uint256 charm");
    }
}

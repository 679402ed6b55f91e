//! Conversion of raw, user-supplied text into a validated [`ContractParams`].

use crate::shaping::RESERVED_PROPERTY_NAMES;
use crate::{
    ContractName, ContractParams, ContractVariant, EtherAmount, GeneratorError, MaxSupply,
    PropertyName,
};

impl ContractParams {
    /// Validates raw text inputs and builds a [`ContractParams`].
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidParameter`] naming the first field that
    /// fails validation.
    pub fn parse<S: AsRef<str>>(
        name: &str,
        price: &str,
        premium_price: &str,
        max_supply: &str,
        properties: &[S],
        variant: ContractVariant,
    ) -> Result<Self, GeneratorError> {
        let invalid = |field: &'static str, value: &str| GeneratorError::InvalidParameter {
            field,
            value: value.to_string(),
        };

        let name = ContractName::new(name).ok_or_else(|| invalid("name", name))?;
        let price = EtherAmount::new(price).ok_or_else(|| invalid("price", price))?;
        let premium_price =
            EtherAmount::new(premium_price).ok_or_else(|| invalid("premium price", premium_price))?;
        let max_supply = max_supply
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(MaxSupply::new)
            .ok_or_else(|| invalid("max supply", max_supply))?;

        let mut props = Vec::with_capacity(properties.len());
        for raw in properties {
            let raw = raw.as_ref();
            let prop = PropertyName::new(raw).ok_or_else(|| invalid("property", raw))?;
            if RESERVED_PROPERTY_NAMES.contains(&raw) {
                return Err(invalid("property (reserved)", raw));
            }
            if props.contains(&prop) {
                return Err(invalid("property (duplicate)", raw));
            }
            props.push(prop);
        }

        Ok(Self {
            name,
            price,
            premium_price,
            max_supply,
            properties: props,
            variant,
        })
    }
}

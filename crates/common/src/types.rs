use serde::{Deserialize, Serialize};

/// Validation failures for values crossing into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid item name: item must be a non-empty string")]
    EmptyItemName,
    #[error("invalid quantity: {0}, quantity cannot be negative")]
    NegativeQuantity(i64),
    #[error("invalid quantity for removal: {0}, must be a positive integer")]
    NonPositiveRemoval(i64),
}

/// Name of a stocked item. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Parse a raw name, rejecting empty input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::try_from(raw.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::EmptyItemName);
        }
        Ok(Self(value))
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl std::borrow::Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Count of units held for an item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(pub u64);

impl Quantity {
    pub const ZERO: Self = Self(0);

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a removal amount: zero and negatives are rejected.
    pub fn positive(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::NonPositiveRemoval(raw));
        }
        Ok(Self(raw as u64))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| ValidationError::NegativeQuantity(raw))
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_name_rejects_only_empty() {
        assert_eq!(ItemName::parse(""), Err(ValidationError::EmptyItemName));
        assert_eq!(ItemName::parse("apple").unwrap().as_str(), "apple");
    }

    #[test]
    fn whitespace_item_name_is_accepted() {
        assert_eq!(ItemName::parse("   ").unwrap().as_str(), "   ");
        let name: ItemName = serde_json::from_str("\"  \"").unwrap();
        assert_eq!(name.as_str(), "  ");
    }

    #[test]
    fn item_name_keeps_input_verbatim() {
        let name = ItemName::parse(" pear ").unwrap();
        assert_eq!(name.as_str(), " pear ");
    }

    #[test]
    fn quantity_rejects_negative() {
        assert_eq!(Quantity::try_from(-2i64), Err(ValidationError::NegativeQuantity(-2)));
        assert_eq!(Quantity::try_from(0i64), Ok(Quantity::ZERO));
        assert_eq!(Quantity::try_from(7i64).unwrap().get(), 7);
    }

    #[test]
    fn removal_quantity_must_be_positive() {
        assert_eq!(Quantity::positive(0), Err(ValidationError::NonPositiveRemoval(0)));
        assert_eq!(Quantity::positive(-3), Err(ValidationError::NonPositiveRemoval(-3)));
        assert_eq!(Quantity::positive(3), Ok(Quantity(3)));
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Quantity(u64::MAX).checked_add(Quantity(1)), None);
        assert_eq!(Quantity(2).checked_add(Quantity(3)), Some(Quantity(5)));
    }

    #[test]
    fn serde_shapes_are_plain() {
        let name: ItemName = serde_json::from_str("\"banana\"").unwrap();
        assert_eq!(name.as_str(), "banana");
        assert!(serde_json::from_str::<ItemName>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&Quantity(5)).unwrap(), "5");
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag of a customization as delivered by the catalog.
///
/// The catalog stores the tag as a free-form string; the two tags the menu
/// screens know about get their own variants and anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomizationKind {
    Topping,
    Side,
    Other(String),
}

impl From<String> for CustomizationKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "topping" => CustomizationKind::Topping,
            "side" => CustomizationKind::Side,
            _ => CustomizationKind::Other(tag),
        }
    }
}

impl From<CustomizationKind> for String {
    fn from(kind: CustomizationKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for CustomizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomizationKind::Topping => f.write_str("topping"),
            CustomizationKind::Side => f.write_str("side"),
            CustomizationKind::Other(tag) => f.write_str(tag),
        }
    }
}

/// An add-on attached to a cart line (extra cheese, fries on the side, ...).
///
/// Only `id` takes part in line matching; name, price and kind are carried
/// along for display and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCustomization {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

impl CartCustomization {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        kind: CustomizationKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind,
        }
    }

    pub fn topping(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self::new(id, name, price, CustomizationKind::Topping)
    }

    pub fn side(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self::new(id, name, price, CustomizationKind::Side)
    }
}

/// Order- and duplicate-independent identity of a customization list.
///
/// Two lists produce equal keys exactly when they contain the same set of
/// customization ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CustomizationKey(Vec<String>);

impl CustomizationKey {
    pub fn of(customizations: &[CartCustomization]) -> Self {
        let mut ids: Vec<String> = customizations.iter().map(|c| c.id.clone()).collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheese() -> CartCustomization {
        CartCustomization::topping("cheese", "Cheese", Decimal::new(50, 2))
    }

    fn fries() -> CartCustomization {
        CartCustomization::side("fries", "Fries", Decimal::new(250, 2))
    }

    #[test]
    fn key_ignores_order_and_duplicates() {
        let a = CustomizationKey::of(&[cheese(), fries()]);
        let b = CustomizationKey::of(&[fries(), cheese(), fries()]);
        assert_eq!(a, b);
        assert_eq!(a.ids(), ["cheese".to_string(), "fries".to_string()]);
    }

    #[test]
    fn key_distinguishes_sets() {
        assert_ne!(CustomizationKey::of(&[cheese()]), CustomizationKey::of(&[fries()]));
        assert_ne!(CustomizationKey::of(&[cheese()]), CustomizationKey::of(&[]));
    }

    #[test]
    fn kind_round_trips_through_tag() {
        assert_eq!(CustomizationKind::from("topping".to_string()), CustomizationKind::Topping);
        assert_eq!(CustomizationKind::from("side".to_string()), CustomizationKind::Side);
        let sauce = CustomizationKind::from("sauce".to_string());
        assert_eq!(sauce, CustomizationKind::Other("sauce".into()));
        assert_eq!(sauce.to_string(), "sauce");
    }
}

use super::cart_item::NewCartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu document as returned by the catalog collaborator.
///
/// Only the fields the cart and the detail screen use are modelled; the
/// catalog may send more and they are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl MenuItem {
    /// Builds the cart candidate for this menu item.
    ///
    /// Stored image URLs are only readable with the backend project id
    /// attached as a `project` query parameter.
    pub fn to_cart_item(&self, project_id: &str) -> NewCartItem {
        NewCartItem::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            image_url_with_project(&self.image_url, project_id),
        )
    }
}

pub fn image_url_with_project(image_url: &str, project_id: &str) -> String {
    if project_id.is_empty() {
        return image_url.to_string();
    }
    let separator = if image_url.contains('?') { '&' } else { '?' };
    format!("{image_url}{separator}project={project_id}")
}

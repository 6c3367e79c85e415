use serde::{Deserialize, Serialize};

/// Default image shown for products the catalog has no picture for.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Fill in the placeholder image when the catalog entry has none.
    pub fn ensure_image(&mut self) {
        if self.image_url.is_none() {
            self.image_url = Some(PLACEHOLDER_IMAGE_URL.to_string());
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_entry() {
        let json = r#"{"id":"p1","name":"Caneca","price":29.9,"quantity":12,"imageUrl":"https://cdn.example.com/caneca.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Caneca");
        assert_eq!(product.quantity, 12);
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://cdn.example.com/caneca.png")
        );
        assert!(product.in_stock());
    }

    #[test]
    fn ensure_image_fills_placeholder_only_when_missing() {
        let json = r#"{"id":"p2","name":"Camiseta","price":59.0,"quantity":0}"#;
        let mut product: Product = serde_json::from_str(json).unwrap();
        assert!(product.image_url.is_none());

        product.ensure_image();
        assert_eq!(product.image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
        assert!(!product.in_stock());

        product.image_url = Some("real.png".to_string());
        product.ensure_image();
        assert_eq!(product.image_url.as_deref(), Some("real.png"));
    }
}

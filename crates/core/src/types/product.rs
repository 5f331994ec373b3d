//! Catalog products as served by the catalog API.

use serde::{Deserialize, Serialize};

use super::{Category, Price, ProductId, Rating};

/// A read-only catalog product.
///
/// Mirrors the JSON objects returned by `GET /products` and
/// `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: Category,
    /// Absolute image URL.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_product() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert_eq!(product.category, Category::new("men's clothing"));
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_rating_defaults_to_zero() {
        let json = r#"{"id":2,"title":"t","price":1,"description":"","category":"c","image":""}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, Rating::default());
    }
}

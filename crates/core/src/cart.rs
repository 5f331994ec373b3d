//! The shopping cart model.
//!
//! A cart is an ordered list of lines, at most one per product. It lives only
//! with the shopper's browser: the storefront loads the whole cart at the
//! start of a request and writes the whole cart back after every mutation.
//!
//! # Persisted shape
//!
//! ```json
//! [{"id":1,"title":"Backpack","price":"109.95","image":"https://…","quantity":2}]
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Largest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// The shopper's pending purchase list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from stored lines, restoring the one-line-per-product rule.
    ///
    /// Duplicate lines are merged into the first occurrence, zero-quantity
    /// lines are dropped and quantities are capped at [`MAX_LINE_QUANTITY`].
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for mut line in lines.into_iter().filter(|line| line.quantity > 0) {
            line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
            match cart.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(MAX_LINE_QUANTITY);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line when the product is already in the cart,
    /// otherwise appends a new line. A line already at [`MAX_LINE_QUANTITY`]
    /// stays there. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            return line.quantity;
        }
        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Set the quantity of an existing line. A quantity of zero removes it.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.line_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a product's line. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities (the cart badge count).
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Category, Rating};

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            description: String::new(),
            category: Category::new("electronics"),
            image: format!("https://img.example/{id}.jpg"),
            rating: Rating::default(),
        }
    }

    #[test]
    fn test_add_new_product_appends_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product(1, 1000)), 1);
        assert_eq!(cart.add(&product(2, 500)), 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].id, ProductId::new(1));
        assert_eq!(cart.lines()[1].title, "Product 2");
    }

    #[test]
    fn test_add_existing_product_increments_quantity() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));
        cart.add(&product(2, 500));
        assert_eq!(cart.add(&product(1, 1000)), 2);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_add_stops_at_line_limit() {
        let mut cart = Cart::new();
        for _ in 0..MAX_LINE_QUANTITY + 2 {
            cart.add(&product(1, 1000));
        }

        assert_eq!(cart.add(&product(1, 1000)), MAX_LINE_QUANTITY);
        assert_eq!(cart.total_items(), MAX_LINE_QUANTITY);
        assert!(cart.set_quantity(ProductId::new(1), MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1099));
        cart.add(&product(1, 1099));
        cart.add(&product(2, 250));
        assert_eq!(cart.subtotal(), Price::from_cents(2448));
        assert_eq!(Cart::new().subtotal().to_string(), "$0.00");
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));

        assert!(cart.set_quantity(ProductId::new(1), 4));
        assert_eq!(cart.total_items(), 4);

        assert!(!cart.set_quantity(ProductId::new(9), 2));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));
        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));
        cart.add(&product(2, 1000));

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].id, ProductId::new(2));
    }

    #[test]
    fn test_persisted_shape() {
        let mut cart = Cart::new();
        cart.add(&product(3, 1995));
        cart.add(&product(3, 1995));

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": 3,
                "title": "Product 3",
                "price": "19.95",
                "image": "https://img.example/3.jpg",
                "quantity": 2
            }])
        );

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_loading_merges_duplicates_and_drops_empty_lines() {
        let json = serde_json::json!([
            {"id": 1, "title": "A", "price": 5, "image": "", "quantity": 1},
            {"id": 2, "title": "B", "price": 5, "image": "", "quantity": 0},
            {"id": 1, "title": "A", "price": 5, "image": "", "quantity": 2}
        ]);

        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 3);
    }
}

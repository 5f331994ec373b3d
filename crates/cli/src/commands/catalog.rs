//! Catalog browsing commands.
//!
//! Talks to the catalog API configured by `CATALOG_API_URL`, the same one the
//! storefront uses, and prints plain text to stdout.

#![allow(clippy::print_stdout)]

use swiftcart_core::text::{CARD_TITLE_MAX_CHARS, truncate};
use swiftcart_core::{CategoryFilter, Product, ProductId};
use swiftcart_storefront::catalog::CatalogClient;
use swiftcart_storefront::config::StorefrontConfig;

use super::CommandError;

fn client() -> Result<CatalogClient, CommandError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(url = %config.catalog.base_url, "Using catalog API");
    Ok(CatalogClient::new(&config.catalog)?)
}

/// Print every category tag with its display label.
///
/// # Errors
///
/// Returns an error if the catalog API cannot be queried.
pub async fn categories() -> Result<(), CommandError> {
    let categories = client()?.categories().await?;

    for category in &categories {
        println!("{:<24} {}", category.as_str(), category.label());
    }
    Ok(())
}

/// Print one line per product.
///
/// # Errors
///
/// Returns an error if the catalog API cannot be queried.
pub async fn products(category: Option<&str>) -> Result<(), CommandError> {
    let filter = CategoryFilter::parse(category);
    let products = client()?.products(&filter).await?;

    if products.is_empty() {
        println!("No products found in this category.");
        return Ok(());
    }

    for product in &products {
        println!("{}", product_line(product));
    }
    Ok(())
}

/// Print the full details of one product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the API cannot be
/// queried.
pub async fn show(id: ProductId) -> Result<(), CommandError> {
    let product = client()?.product(id).await?;
    println!("{}", product_details(&product));
    Ok(())
}

/// `#id  price  stars (count)  [category]  title`, as on a product card.
fn product_line(product: &Product) -> String {
    format!(
        "#{:<4} {:>9}  {} ({:>4})  [{}]  {}",
        product.id,
        product.price.display(),
        product.rating.stars().as_text(),
        product.rating.count,
        product.category,
        truncate(&product.title, CARD_TITLE_MAX_CHARS),
    )
}

fn product_details(product: &Product) -> String {
    format!(
        "{title}\n\
         Category: {category}\n\
         Price:    {price}\n\
         Rating:   {stars} {rate} ({count} reviews)\n\
         Image:    {image}\n\n\
         {description}",
        title = product.title,
        category = product.category.label(),
        price = product.price.display(),
        stars = product.rating.stars().as_text(),
        rate = product.rating.rate,
        count = product.rating.count,
        image = product.image,
        description = product.description,
    )
}

//! Store Product Endpoints

use serde::Serialize;

use super::{changed, Resource};
use crate::error::ApiError;
use crate::list::Id;
use crate::models::Product;

impl Resource for Product {
    const PATH: &'static str = "products";
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProductChanges {
    pub fn between(before: &Product, after: &Product) -> Self {
        Self {
            name: changed(&before.name, &after.name),
            price: changed(&before.price, &after.price),
            stock: changed(&before.stock, &after.stock),
            status: changed(&before.status, &after.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

pub async fn list_products() -> Result<Vec<Product>, ApiError> {
    super::list::<Product>().await
}

pub async fn create_product(product: &NewProduct) -> Result<Product, ApiError> {
    super::create::<Product, _>(product).await
}

pub async fn update_product(before: &Product, after: &Product) -> Result<Product, ApiError> {
    super::update::<Product, _>(before.id, &ProductChanges::between(before, after)).await
}

pub async fn delete_product(id: Id) -> Result<(), ApiError> {
    super::remove::<Product>(id).await
}

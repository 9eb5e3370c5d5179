//! Order Endpoints

use serde::Serialize;

use super::{changed, Resource};
use crate::error::ApiError;
use crate::list::Id;
use crate::models::Order;

impl Resource for Order {
    const PATH: &'static str = "orders";
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct OrderChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OrderChanges {
    pub fn between(before: &Order, after: &Order) -> Self {
        Self { status: changed(&before.status, &after.status) }
    }
}

pub async fn list_orders() -> Result<Vec<Order>, ApiError> {
    super::list::<Order>().await
}

/// Orders placed with the signed-in store
pub async fn list_store_orders() -> Result<Vec<Order>, ApiError> {
    super::decode_list(&super::get_text("orders/store").await?)
}

pub async fn update_order(before: &Order, after: &Order) -> Result<Order, ApiError> {
    super::update::<Order, _>(before.id, &OrderChanges::between(before, after)).await
}

pub async fn delete_order(id: Id) -> Result<(), ApiError> {
    super::remove::<Order>(id).await
}

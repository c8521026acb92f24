use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::commercemodel::*;
use crate::utils::money;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddCartItemDto {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemDto {
    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartQueryDto {
    #[serde(rename = "orgId")]
    pub org_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ListProductsDto {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub vendor_org_id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub active: bool,
}

impl From<Product> for ProductResponseDto {
    fn from(product: Product) -> Self {
        ProductResponseDto {
            id: product.id,
            vendor_org_id: product.vendor_org_id,
            sku: product.sku,
            name: product.name,
            description: product.description,
            price: money::to_f64(&product.price),
            stock: product.stock,
            active: product.active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartItemResponseDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<CartItem> for CartItemResponseDto {
    fn from(item: CartItem) -> Self {
        let unit_price = money::to_f64(&item.unit_price);
        CartItemResponseDto {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price,
            line_total: money::round_to_cents(unit_price * item.quantity as f64),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponseDto {
    pub id: Uuid,
    pub org_id: Uuid,
    pub items: Vec<CartItemResponseDto>,
    pub subtotal: f64,
}

impl CartResponseDto {
    pub fn from_parts(cart: Cart, items: Vec<CartItem>) -> Self {
        let items: Vec<CartItemResponseDto> =
            items.into_iter().map(CartItemResponseDto::from).collect();
        let subtotal = money::round_to_cents(items.iter().map(|i| i.line_total).sum());
        CartResponseDto {
            id: cart.id,
            org_id: cart.org_id,
            items,
            subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderLineResponseDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<OrderLine> for OrderLineResponseDto {
    fn from(line: OrderLine) -> Self {
        OrderLineResponseDto {
            id: line.id,
            product_id: line.product_id,
            sku: line.sku,
            name: line.name,
            quantity: line.quantity,
            unit_price: money::to_f64(&line.unit_price),
            line_total: money::to_f64(&line.line_total),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponseDto {
    pub id: Uuid,
    pub org_id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub total: f64,
    pub lines: Vec<OrderLineResponseDto>,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderResponseDto {
    pub fn from_parts(order: Order, lines: Vec<OrderLine>) -> Self {
        OrderResponseDto {
            id: order.id,
            org_id: order.org_id,
            order_number: order.order_number,
            status: order.status.unwrap_or(OrderStatus::Pending),
            subtotal: money::to_f64(&order.subtotal),
            total: money::to_f64(&order.total),
            lines: lines.into_iter().map(OrderLineResponseDto::from).collect(),
            created_at: order.created_at,
        }
    }
}

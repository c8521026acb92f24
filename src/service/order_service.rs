use std::sync::Arc;

use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{commercedb::CommerceExt, db::DBClient},
    models::commercemodel::{Order, OrderLine, Product},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct OrderService {
    db_client: Arc<DBClient>,
}

/// One order line as computed from the cart, before it is persisted.
#[derive(Debug, Clone)]
pub struct OrderLineDraft {
    pub product_id: Uuid,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl OrderService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Turn the org's cart into an order. Product sku/name/price are
    /// snapshotted into the lines at the moment of checkout, stock is
    /// decremented with a non-negative guard, and the cart is cleared, all in
    /// one transaction.
    pub async fn checkout(&self, org_id: Uuid) -> Result<(Order, Vec<OrderLine>), ServiceError> {
        let cart = self.db_client.get_or_create_cart(org_id).await?;
        let items = self.db_client.get_cart_items(cart.id).await?;

        let mut resolved: Vec<(Product, i32)> = Vec::with_capacity(items.len());
        for item in &items {
            let product = self
                .db_client
                .get_product_by_id(item.product_id)
                .await?
                .ok_or(ServiceError::ProductNotFound(item.product_id))?;

            if !product.active.unwrap_or(true) {
                return Err(ServiceError::Validation(format!(
                    "Product '{}' is no longer available",
                    product.name
                )));
            }

            resolved.push((product, item.quantity));
        }

        let (drafts, subtotal) = build_order_lines(&resolved)?;

        let mut tx = self.db_client.pool.begin().await?;

        for (product, quantity) in &resolved {
            let affected = self
                .db_client
                .decrement_stock_tx(&mut tx, product.id, *quantity)
                .await?;
            if affected == 0 {
                return Err(ServiceError::InsufficientStock {
                    product_id: product.id,
                    requested: *quantity,
                    available: product.stock,
                });
            }
        }

        let order = self
            .db_client
            .create_order_tx(
                &mut tx,
                org_id,
                generate_order_number(),
                subtotal.clone(),
                subtotal,
            )
            .await?;

        let mut lines = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let line = self
                .db_client
                .create_order_line_tx(
                    &mut tx,
                    order.id,
                    draft.product_id,
                    draft.sku,
                    draft.name,
                    draft.quantity,
                    draft.unit_price,
                    draft.line_total,
                )
                .await?;
            lines.push(line);
        }

        self.db_client.clear_cart_tx(&mut tx, cart.id).await?;
        tx.commit().await?;

        tracing::info!(order_id = %order.id, order_number = %order.order_number, "order placed");
        Ok((order, lines))
    }
}

/// Snapshot cart contents into order-line drafts and a subtotal. An empty
/// cart is a checkout error, not an empty order.
pub fn build_order_lines(
    items: &[(Product, i32)],
) -> Result<(Vec<OrderLineDraft>, BigDecimal), ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::EmptyCart);
    }

    let mut subtotal = BigDecimal::from(0);
    let mut drafts = Vec::with_capacity(items.len());

    for (product, quantity) in items {
        if *quantity < 1 {
            return Err(ServiceError::Validation(format!(
                "Quantity for '{}' must be at least 1",
                product.name
            )));
        }

        let total = line_total(&product.price, *quantity);
        subtotal = subtotal + total.clone();
        drafts.push(OrderLineDraft {
            product_id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity: *quantity,
            unit_price: product.price.clone(),
            line_total: total,
        });
    }

    Ok((drafts, subtotal))
}

pub fn line_total(unit_price: &BigDecimal, quantity: i32) -> BigDecimal {
    unit_price * BigDecimal::from(quantity)
}

fn generate_order_number() -> String {
    format!("FH-{:08X}", rand::random::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, price: f64) -> Product {
        Product {
            id: Uuid::new_v4(),
            vendor_org_id: Uuid::new_v4(),
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            description: String::new(),
            price: BigDecimal::try_from(price).unwrap(),
            stock: 100,
            active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = build_order_lines(&[]).unwrap_err();
        assert!(matches!(err, ServiceError::EmptyCart));
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let items = vec![(product("SKU-1", 19.99), 3), (product("SKU-2", 250.0), 1)];
        let (drafts, subtotal) = build_order_lines(&items).unwrap();

        assert_eq!(drafts.len(), 2);
        let summed = drafts
            .iter()
            .fold(BigDecimal::from(0), |acc, d| acc + d.line_total.clone());
        assert_eq!(subtotal, summed);
    }

    #[test]
    fn test_lines_snapshot_product_fields() {
        let items = vec![(product("SKU-9", 10.0), 2)];
        let (drafts, _) = build_order_lines(&items).unwrap();
        assert_eq!(drafts[0].sku, "SKU-9");
        assert_eq!(drafts[0].quantity, 2);
        assert_eq!(drafts[0].line_total, line_total(&items[0].0.price, 2));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let items = vec![(product("SKU-1", 10.0), 0)];
        assert!(build_order_lines(&items).is_err());
    }

    #[test]
    fn test_line_total() {
        let price = BigDecimal::try_from(19.99).unwrap();
        let total = line_total(&price, 3);
        let expected = &price * BigDecimal::from(3);
        assert_eq!(total, expected);
    }

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("FH-"));
        assert_eq!(number.len(), 11);
    }
}

use async_trait::async_trait;
use sqlx::types::BigDecimal;
use sqlx::{Error, Postgres, Row, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::commercemodel::*;

const PRODUCT_COLUMNS: &str = r#"
    id, vendor_org_id, sku, name, description, price, stock, active,
    created_at, updated_at
"#;

const CART_ITEM_COLUMNS: &str = r#"
    id, cart_id, product_id, quantity, unit_price, created_at
"#;

const ORDER_COLUMNS: &str = r#"
    id, org_id, order_number, status, subtotal, total, created_at
"#;

const ORDER_LINE_COLUMNS: &str = r#"
    id, order_id, product_id, sku, name, quantity, unit_price, line_total
"#;

#[async_trait]
pub trait CommerceExt {
    async fn get_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, Error>;

    async fn count_products(&self) -> Result<i64, Error>;

    async fn get_product_by_id(&self, product_id: Uuid) -> Result<Option<Product>, Error>;

    async fn get_or_create_cart(&self, org_id: Uuid) -> Result<Cart, Error>;

    async fn get_cart_items(&self, cart_id: Uuid) -> Result<Vec<CartItem>, Error>;

    async fn get_cart_item_by_id(&self, item_id: Uuid) -> Result<Option<CartItem>, Error>;

    async fn add_cart_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Result<CartItem, Error>;

    async fn update_cart_item_quantity(
        &self,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, Error>;

    async fn delete_cart_item(&self, item_id: Uuid) -> Result<u64, Error>;

    async fn clear_cart_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart_id: Uuid,
    ) -> Result<(), Error>;

    async fn create_order_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        org_id: Uuid,
        order_number: String,
        subtotal: BigDecimal,
        total: BigDecimal,
    ) -> Result<Order, Error>;

    #[allow(clippy::too_many_arguments)]
    async fn create_order_line_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        product_id: Uuid,
        sku: String,
        name: String,
        quantity: i32,
        unit_price: BigDecimal,
        line_total: BigDecimal,
    ) -> Result<OrderLine, Error>;

    /// Decrement stock, guarded so it never goes negative. Returns affected
    /// row count: 0 means the product had less stock than requested.
    async fn decrement_stock_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<u64, Error>;

    async fn get_orders(&self, org_id: Uuid) -> Result<Vec<Order>, Error>;

    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, Error>;

    async fn get_order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>, Error>;
}

#[async_trait]
impl CommerceExt for DBClient {
    async fn get_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, Error> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE active IS NOT FALSE
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_products(&self) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count FROM products WHERE active IS NOT FALSE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        row.try_get("count")
    }

    async fn get_product_by_id(&self, product_id: Uuid) -> Result<Option<Product>, Error> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_or_create_cart(&self, org_id: Uuid) -> Result<Cart, Error> {
        sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (org_id)
            VALUES ($1)
            ON CONFLICT (org_id) DO UPDATE SET updated_at = NOW()
            RETURNING id, org_id, created_at, updated_at
            "#,
        )
        .bind(org_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_cart_items(&self, cart_id: Uuid) -> Result<Vec<CartItem>, Error> {
        let query = format!(
            r#"
            SELECT {CART_ITEM_COLUMNS}
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY created_at ASC
            "#
        );

        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_cart_item_by_id(&self, item_id: Uuid) -> Result<Option<CartItem>, Error> {
        let query = format!(
            r#"
            SELECT {CART_ITEM_COLUMNS}
            FROM cart_items
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, CartItem>(&query)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn add_cart_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Result<CartItem, Error> {
        let query = format!(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cart_id, product_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                unit_price = EXCLUDED.unit_price
            RETURNING {CART_ITEM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .bind(unit_price)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_cart_item_quantity(
        &self,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, Error> {
        let query = format!(
            r#"
            UPDATE cart_items
            SET quantity = $2
            WHERE id = $1
            RETURNING {CART_ITEM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, CartItem>(&query)
            .bind(item_id)
            .bind(quantity)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_cart_item(&self, item_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items WHERE id = $1
            "#,
        )
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn clear_cart_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart_id: Uuid,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM cart_items WHERE cart_id = $1
            "#,
        )
        .bind(cart_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn create_order_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        org_id: Uuid,
        order_number: String,
        subtotal: BigDecimal,
        total: BigDecimal,
    ) -> Result<Order, Error> {
        let query = format!(
            r#"
            INSERT INTO orders (org_id, order_number, subtotal, total)
            VALUES ($1, $2, $3, $4)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(org_id)
            .bind(order_number)
            .bind(subtotal)
            .bind(total)
            .fetch_one(&mut **tx)
            .await
    }

    async fn create_order_line_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        product_id: Uuid,
        sku: String,
        name: String,
        quantity: i32,
        unit_price: BigDecimal,
        line_total: BigDecimal,
    ) -> Result<OrderLine, Error> {
        let query = format!(
            r#"
            INSERT INTO order_lines
            (order_id, product_id, sku, name, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_LINE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, OrderLine>(&query)
            .bind(order_id)
            .bind(product_id)
            .bind(sku)
            .bind(name)
            .bind(quantity)
            .bind(unit_price)
            .bind(line_total)
            .fetch_one(&mut **tx)
            .await
    }

    async fn decrement_stock_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2, updated_at = NOW()
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_orders(&self, org_id: Uuid) -> Result<Vec<Order>, Error> {
        let query = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(org_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, Error> {
        let query = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>, Error> {
        let query = format!(
            r#"
            SELECT {ORDER_LINE_COLUMNS}
            FROM order_lines
            WHERE order_id = $1
            ORDER BY name
            "#
        );

        sqlx::query_as::<_, OrderLine>(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
    }
}

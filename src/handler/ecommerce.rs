use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::commercedb::CommerceExt,
    dtos::{
        commercedtos::{
            AddCartItemDto, CartQueryDto, CartResponseDto, ListProductsDto, OrderResponseDto,
            ProductResponseDto, UpdateCartItemDto,
        },
        jobdtos::{page_offset, ApiResponse, PaginatedResponse},
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    AppState,
};

/// Product browsing is open; no token required.
pub fn storefront_handler() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:product_id", get(get_product))
}

pub fn commerce_handler() -> Router {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_cart_item))
        .route("/cart/items/:item_id", put(update_cart_item))
        .route("/cart/items/:item_id", delete(remove_cart_item))
        .route("/checkout", post(checkout))
        .route("/orders", get(list_orders))
        .route("/orders/:order_id", get(get_order))
}

pub async fn list_products(
    Query(query_params): Query<ListProductsDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Json<PaginatedResponse<ProductResponseDto>>, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);
    let offset = page_offset(page, limit);

    let products = app_state
        .db_client
        .get_products(limit as i64, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_products()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::new(
        products.into_iter().map(ProductResponseDto::from).collect(),
        total,
        page,
        limit,
    )))
}

pub async fn get_product(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Json<ApiResponse<ProductResponseDto>>, HttpError> {
    let product = app_state
        .db_client
        .get_product_by_id(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|product| product.active.unwrap_or(true))
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Product",
        ProductResponseDto::from(product),
    )))
}

/// An explicit orgId query param must match the caller's org; carts are never
/// readable across org boundaries.
pub async fn get_cart(
    Query(query_params): Query<CartQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<CartResponseDto>>, HttpError> {
    if let Some(org_id) = query_params.org_id {
        if org_id != auth.org.id {
            return Err(HttpError::forbidden(
                ErrorMessage::PermissionDenied.to_string(),
            ));
        }
    }

    let cart = app_state
        .db_client
        .get_or_create_cart(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let items = app_state
        .db_client
        .get_cart_items(cart.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Cart",
        CartResponseDto::from_parts(cart, items),
    )))
}

pub async fn add_cart_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<AddCartItemDto>,
) -> Result<Json<ApiResponse<CartResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let product = app_state
        .db_client
        .get_product_by_id(body.product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|product| product.active.unwrap_or(true))
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    if product.stock < body.quantity {
        return Err(HttpError::bad_request(format!(
            "Only {} of '{}' in stock",
            product.stock, product.name
        )));
    }

    let cart = app_state
        .db_client
        .get_or_create_cart(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .add_cart_item(cart.id, product.id, body.quantity, product.price)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let items = app_state
        .db_client
        .get_cart_items(cart.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Item added",
        CartResponseDto::from_parts(cart, items),
    )))
}

pub async fn update_cart_item(
    Path(item_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateCartItemDto>,
) -> Result<Json<ApiResponse<CartResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let cart = app_state
        .db_client
        .get_or_create_cart(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let item = app_state
        .db_client
        .get_cart_item_by_id(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|item| item.cart_id == cart.id)
        .ok_or_else(|| HttpError::not_found("Cart item not found".to_string()))?;

    app_state
        .db_client
        .update_cart_item_quantity(item.id, body.quantity)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let items = app_state
        .db_client
        .get_cart_items(cart.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Cart updated",
        CartResponseDto::from_parts(cart, items),
    )))
}

pub async fn remove_cart_item(
    Path(item_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<CartResponseDto>>, HttpError> {
    let cart = app_state
        .db_client
        .get_or_create_cart(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let item = app_state
        .db_client
        .get_cart_item_by_id(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|item| item.cart_id == cart.id)
        .ok_or_else(|| HttpError::not_found("Cart item not found".to_string()))?;

    app_state
        .db_client
        .delete_cart_item(item.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let items = app_state
        .db_client
        .get_cart_items(cart.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Item removed",
        CartResponseDto::from_parts(cart, items),
    )))
}

pub async fn checkout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OrderResponseDto>>, HttpError> {
    let (order, lines) = app_state.order_service.checkout(auth.org.id).await?;

    Ok(Json(ApiResponse::success(
        "Order placed",
        OrderResponseDto::from_parts(order, lines),
    )))
}

pub async fn list_orders(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<Vec<OrderResponseDto>>>, HttpError> {
    let orders = app_state
        .db_client
        .get_orders(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let lines = app_state
            .db_client
            .get_order_lines(order.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        responses.push(OrderResponseDto::from_parts(order, lines));
    }

    Ok(Json(ApiResponse::success("Orders", responses)))
}

pub async fn get_order(
    Path(order_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OrderResponseDto>>, HttpError> {
    let order = app_state
        .db_client
        .get_order_by_id(order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|order| order.org_id == auth.org.id)
        .ok_or_else(|| HttpError::not_found("Order not found".to_string()))?;

    let lines = app_state
        .db_client
        .get_order_lines(order.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Order",
        OrderResponseDto::from_parts(order, lines),
    )))
}

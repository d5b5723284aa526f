use std::sync::Arc;

use axum::Extension;
use tracing::info;
use uuid::Uuid;

use modkit::api::{ApiResult, JsonBody, PathParam, QueryParams};
use modkit::{ApiResponse, ListResponse};

use crate::api::rest::dto::{ListOrdersQuery, OrderDto, OrderReq, UpdateStatusReq};
use crate::contract::model::OrderStatus;
use crate::domain::service::Service;

pub async fn list_orders(
    Extension(svc): Extension<Arc<Service>>,
    QueryParams(q): QueryParams<ListOrdersQuery>,
) -> ApiResult<ListResponse<OrderDto>> {
    info!("Listing orders with query: {:?}", q);

    let page = svc.list_orders(q.try_into()?).await?;
    Ok(ListResponse::from_page(page, OrderDto::from))
}

pub async fn get_order(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<ApiResponse<OrderDto>> {
    info!("Getting order with id: {}", id);

    let order = svc.get_order(id).await?;
    Ok(ApiResponse::ok(order.into()))
}

pub async fn create_order(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<OrderReq>,
) -> ApiResult<ApiResponse<OrderDto>> {
    info!("Creating order");

    let order = svc.create_order(req.try_into()?).await?;
    Ok(ApiResponse::created("Order created successfully", order.into()))
}

pub async fn update_order(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<OrderReq>,
) -> ApiResult<ApiResponse<OrderDto>> {
    info!("Updating order {}", id);

    let order = svc.update_order(id, req.try_into()?).await?;
    Ok(ApiResponse::updated("Order updated successfully", order.into()))
}

pub async fn update_order_status(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateStatusReq>,
) -> ApiResult<ApiResponse<OrderDto>> {
    info!("Updating status of order {}", id);

    let status = OrderStatus::try_from(req)?;
    let order = svc.set_status(id, status).await?;
    Ok(ApiResponse::updated(
        "Order status updated successfully",
        order.into(),
    ))
}

pub async fn delete_order(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<ApiResponse<()>> {
    info!("Deleting order: {}", id);

    svc.delete_order(id).await?;
    Ok(ApiResponse::message("Order deleted successfully"))
}

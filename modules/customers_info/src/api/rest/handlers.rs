use std::sync::Arc;

use axum::Extension;
use tracing::info;
use uuid::Uuid;

use modkit::api::{ApiResult, JsonBody, PathParam, QueryParams};
use modkit::{ApiResponse, ListResponse};

use crate::api::rest::dto::{
    CreateCustomerReq, CustomerDto, ListCustomersQuery, SummaryDto, SummaryQuery,
    UpdateCustomerReq, UpdateStatusReq,
};
use crate::contract::model::{CustomerStatus, Timeframe};
use crate::domain::service::Service;

pub async fn summary(
    Extension(svc): Extension<Arc<Service>>,
    QueryParams(q): QueryParams<SummaryQuery>,
) -> ApiResult<ApiResponse<SummaryDto>> {
    let timeframe = Timeframe::parse_lenient(q.timeframe.as_deref());
    info!(timeframe = timeframe.as_str(), "Customer summary requested");

    let summary = svc.summary(timeframe).await?;
    Ok(ApiResponse::ok(SummaryDto::from(summary)))
}

pub async fn list_customers(
    Extension(svc): Extension<Arc<Service>>,
    QueryParams(q): QueryParams<ListCustomersQuery>,
) -> ApiResult<ListResponse<CustomerDto>> {
    info!("Listing customers with query: {:?}", q);

    let page = svc.list_customers(q.try_into()?).await?;
    Ok(ListResponse::from_page(page, CustomerDto::from))
}

pub async fn get_customer(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<ApiResponse<CustomerDto>> {
    info!("Getting customer with id: {}", id);

    let customer = svc.get_customer(id).await?;
    Ok(ApiResponse::ok(customer.into()))
}

pub async fn create_customer(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<CreateCustomerReq>,
) -> ApiResult<ApiResponse<CustomerDto>> {
    info!("Creating customer");

    let customer = svc.create_customer(req.try_into()?).await?;
    Ok(ApiResponse::created(
        "Customer created successfully",
        customer.into(),
    ))
}

pub async fn update_customer(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateCustomerReq>,
) -> ApiResult<ApiResponse<CustomerDto>> {
    info!("Updating customer {}", id);

    let customer = svc.update_customer(id, req.try_into()?).await?;
    Ok(ApiResponse::updated(
        "Customer updated successfully",
        customer.into(),
    ))
}

pub async fn update_customer_status(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateStatusReq>,
) -> ApiResult<ApiResponse<CustomerDto>> {
    info!("Updating status of customer {}", id);

    let status = CustomerStatus::try_from(req)?;
    let customer = svc.set_status(id, status).await?;
    Ok(ApiResponse::updated(
        "Customer status updated successfully",
        customer.into(),
    ))
}

pub async fn delete_customer(
    Extension(svc): Extension<Arc<Service>>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<ApiResponse<()>> {
    info!("Deleting customer: {}", id);

    svc.delete_customer(id).await?;
    Ok(ApiResponse::message("Customer deleted successfully"))
}

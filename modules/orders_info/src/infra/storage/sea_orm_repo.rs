//! SeaORM-backed repository implementation for the domain port.

use modkit::api::SortOrder;
use modkit_db::{search, DbResultExt, RepoError, RepoResult};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order as SqlOrder, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::contract::model::{Order, OrderSortField};
use crate::domain::repo::{OrderFilter, OrdersRepository};
use crate::infra::storage::entity::{Column, Entity as OrderEntity, Model};
use crate::infra::storage::mapper::{contract_to_active, entity_to_contract};

pub struct SeaOrmOrdersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmOrdersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn sort_column(field: OrderSortField) -> Column {
    match field {
        OrderSortField::CustomerName => Column::CustomerName,
        OrderSortField::OrderDate => Column::OrderDate,
        OrderSortField::OrderType => Column::OrderType,
        OrderSortField::TrackingId => Column::TrackingId,
        OrderSortField::OrderTotal => Column::OrderTotal,
        OrderSortField::Action => Column::Action,
        OrderSortField::Status => Column::Status,
        OrderSortField::CreatedAt => Column::CreatedAt,
        OrderSortField::UpdatedAt => Column::UpdatedAt,
    }
}

/// Case-insensitive substring match over customer name, tracking id and email.
fn search_condition(term: &str) -> Condition {
    let pattern = search::contains_ci(term);
    [Column::CustomerName, Column::TrackingId, Column::CustomerEmail]
        .into_iter()
        .fold(Condition::any(), |cond, col| {
            cond.add(Expr::expr(Func::lower(Expr::col(col))).like(pattern.clone()))
        })
}

fn filtered(filter: &OrderFilter) -> Select<OrderEntity> {
    let q = &filter.query;
    let mut cond = Condition::all();
    if let Some(status) = q.status {
        cond = cond.add(Column::Status.eq(status.as_str()));
    }
    if let Some(action) = q.action {
        cond = cond.add(Column::Action.eq(action.as_str()));
    }
    if let Some(order_type) = q.order_type {
        cond = cond.add(Column::OrderType.eq(order_type.as_str()));
    }
    if let Some(term) = q.search.as_deref() {
        cond = cond.add(search_condition(term));
    }
    OrderEntity::find().filter(cond)
}

fn rows_to_contract(rows: Vec<Model>) -> RepoResult<Vec<Order>> {
    rows.into_iter()
        .map(|m| entity_to_contract(m).map_err(RepoError::from))
        .collect()
}

#[async_trait::async_trait]
impl<C> OrdersRepository for SeaOrmOrdersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Order>> {
        let found = OrderEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .repo_ctx("find order by id failed")?;
        found
            .map(entity_to_contract)
            .transpose()
            .map_err(RepoError::from)
    }

    async fn tracking_id_taken(
        &self,
        tracking_id: &str,
        exclude: Option<Uuid>,
    ) -> RepoResult<bool> {
        let mut cond = Condition::all().add(Column::TrackingId.eq(tracking_id));
        if let Some(id) = exclude {
            cond = cond.add(Column::Id.ne(id));
        }
        let n = OrderEntity::find()
            .filter(cond)
            .count(&self.conn)
            .await
            .repo_ctx("tracking id uniqueness check failed")?;
        Ok(n > 0)
    }

    async fn insert(&self, o: Order) -> RepoResult<()> {
        OrderEntity::insert(contract_to_active(o))
            .exec_without_returning(&self.conn)
            .await
            .repo_ctx("insert order failed")?;
        Ok(())
    }

    async fn update(&self, o: Order) -> RepoResult<()> {
        OrderEntity::update(contract_to_active(o))
            .exec(&self.conn)
            .await
            .repo_ctx("update order failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = OrderEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .repo_ctx("delete order failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, filter: &OrderFilter) -> RepoResult<(Vec<Order>, u64)> {
        let total = filtered(filter)
            .count(&self.conn)
            .await
            .repo_ctx("count orders failed")?;

        let order = match filter.query.sort_order {
            SortOrder::Asc => SqlOrder::Asc,
            SortOrder::Desc => SqlOrder::Desc,
        };
        let rows = filtered(filter)
            .order_by(sort_column(filter.query.sort_by), order.clone())
            .order_by(Column::Id, order)
            .offset(filter.page.offset())
            .limit(filter.page.limit)
            .all(&self.conn)
            .await
            .repo_ctx("list orders failed")?;

        Ok((rows_to_contract(rows)?, total))
    }
}

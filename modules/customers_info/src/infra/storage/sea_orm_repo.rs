//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use modkit::api::SortOrder;
use modkit_db::{search, DbResultExt, RepoError, RepoResult};
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::contract::model::{Customer, CustomerSortField, CustomerStatus};
use crate::domain::repo::{CustomerFilter, CustomersRepository};
use crate::domain::stats::{SummaryCounts, SummaryWindow};
use crate::infra::storage::entity::{Column, Entity as CustomerEntity};
use crate::infra::storage::mapper::{contract_to_active, entity_to_contract};

pub struct SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn count(&self, cond: Condition, ctx: &'static str) -> RepoResult<i64> {
        let n = CustomerEntity::find()
            .filter(cond)
            .count(&self.conn)
            .await
            .repo_ctx(ctx)?;
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

fn sort_column(field: CustomerSortField) -> Column {
    match field {
        CustomerSortField::Name => Column::Name,
        CustomerSortField::Email => Column::Email,
        CustomerSortField::Phone => Column::Phone,
        CustomerSortField::OrdersCount => Column::OrdersCount,
        CustomerSortField::OrderTotal => Column::OrderTotal,
        CustomerSortField::CustomerSince => Column::CustomerSince,
        CustomerSortField::Status => Column::Status,
        CustomerSortField::AbandonedCarts => Column::AbandonedCarts,
        CustomerSortField::CreatedAt => Column::CreatedAt,
        CustomerSortField::UpdatedAt => Column::UpdatedAt,
    }
}

/// Case-insensitive substring match over name, email and phone.
fn search_condition(term: &str) -> Condition {
    let pattern = search::contains_ci(term);
    [Column::Name, Column::Email, Column::Phone]
        .into_iter()
        .fold(Condition::any(), |cond, col| {
            cond.add(Expr::expr(Func::lower(Expr::col(col))).like(pattern.clone()))
        })
}

fn filtered(filter: &CustomerFilter) -> Select<CustomerEntity> {
    let mut cond = Condition::all();
    if let Some(status) = filter.query.status {
        cond = cond.add(Column::Status.eq(status.as_str()));
    }
    if let Some(term) = filter.query.search.as_deref() {
        cond = cond.add(search_condition(term));
    }
    CustomerEntity::find().filter(cond)
}

fn rows_to_contract(rows: Vec<crate::infra::storage::entity::Model>) -> RepoResult<Vec<Customer>> {
    rows.into_iter()
        .map(|m| entity_to_contract(m).map_err(RepoError::from))
        .collect()
}

#[async_trait::async_trait]
impl<C> CustomersRepository for SeaOrmCustomersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Customer>> {
        let found = CustomerEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .repo_ctx("find customer by id failed")?;
        found
            .map(entity_to_contract)
            .transpose()
            .map_err(RepoError::from)
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        let mut cond = Condition::all().add(Column::Email.eq(email));
        if let Some(id) = exclude {
            cond = cond.add(Column::Id.ne(id));
        }
        Ok(self.count(cond, "email uniqueness check failed").await? > 0)
    }

    async fn insert(&self, c: Customer) -> RepoResult<()> {
        CustomerEntity::insert(contract_to_active(c))
            .exec_without_returning(&self.conn)
            .await
            .repo_ctx("insert customer failed")?;
        Ok(())
    }

    async fn update(&self, c: Customer) -> RepoResult<()> {
        CustomerEntity::update(contract_to_active(c))
            .exec(&self.conn)
            .await
            .repo_ctx("update customer failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = CustomerEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .repo_ctx("delete customer failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, filter: &CustomerFilter) -> RepoResult<(Vec<Customer>, u64)> {
        let total = filtered(filter)
            .count(&self.conn)
            .await
            .repo_ctx("count customers failed")?;

        let order = match filter.query.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let rows = filtered(filter)
            .order_by(sort_column(filter.query.sort_by), order.clone())
            .order_by(Column::Id, order)
            .offset(filter.page.offset())
            .limit(filter.page.limit)
            .all(&self.conn)
            .await
            .repo_ctx("list customers failed")?;

        Ok((rows_to_contract(rows)?, total))
    }

    async fn summary_counts(&self, w: &SummaryWindow) -> RepoResult<SummaryCounts> {
        let active = || Column::Status.eq(CustomerStatus::Active.as_str());
        let inactive = || Column::Status.eq(CustomerStatus::Inactive.as_str());
        let before_period = || Column::CustomerSince.lt(w.period_start);

        let abandoned_carts = CustomerEntity::find()
            .select_only()
            .expr_as(
                Func::cast_as(
                    Func::coalesce([
                        Expr::col(Column::AbandonedCarts).sum(),
                        Expr::val(0i64).into(),
                    ]),
                    Alias::new("BIGINT"),
                ),
                "total",
            )
            .into_tuple::<i64>()
            .one(&self.conn)
            .await
            .repo_ctx("sum abandoned carts failed")?
            .unwrap_or(0);

        Ok(SummaryCounts {
            all: self.count(Condition::all(), "count customers failed").await?,
            active: self
                .count(Condition::all().add(active()), "count active customers failed")
                .await?,
            inactive: self
                .count(Condition::all().add(inactive()), "count inactive customers failed")
                .await?,
            new: self
                .count(
                    Condition::all().add(Column::CustomerSince.gte(w.period_start)),
                    "count new customers failed",
                )
                .await?,
            purchasing: self
                .count(
                    Condition::all().add(Column::OrdersCount.gt(0)),
                    "count purchasing customers failed",
                )
                .await?,
            abandoned_carts,
            prev_all: self
                .count(
                    Condition::all().add(before_period()),
                    "count previous customers failed",
                )
                .await?,
            prev_active: self
                .count(
                    Condition::all().add(before_period()).add(active()),
                    "count previous active customers failed",
                )
                .await?,
            prev_inactive: self
                .count(
                    Condition::all().add(before_period()).add(inactive()),
                    "count previous inactive customers failed",
                )
                .await?,
            prev_new: self
                .count(
                    Condition::all()
                        .add(Column::CustomerSince.gte(w.previous_start))
                        .add(before_period()),
                    "count previous new customers failed",
                )
                .await?,
        })
    }
}

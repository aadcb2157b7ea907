use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::PoolError;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared::{Lookup, PaymentRecord, PaymentRepository, QueryFilter, QueryResult, StoreError};
use tracing::debug;

use crate::models::*;
use crate::schema::*;

pub type DbPool = Pool<AsyncPgConnection>;

/// PostgreSQL-backed store. Every save appends to `payment_events` and
/// upserts `payment_projections` in one transaction; queries read the
/// projection only.
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: DbPool,
}

impl PgPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn save(&self, record: PaymentRecord) -> Result<(), StoreError> {
        let projection = PaymentProjection::try_from(&record)?;
        let event = NewPaymentEvent::recorded(&projection);

        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            Box::pin(async move {
                diesel::insert_into(payment_events::table)
                    .values(&event)
                    .execute(conn)
                    .await?;

                diesel::insert_into(payment_projections::table)
                    .values(&projection)
                    .on_conflict(payment_projections::id)
                    .do_update()
                    .set(&projection)
                    .execute(conn)
                    .await?;

                Ok(())
            })
        })
        .await
        .map_err(rejected)?;

        debug!(payment_id = %record.id, "Projection and event written");
        Ok(())
    }

    async fn query(&self, filter: QueryFilter) -> Result<QueryResult, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<PaymentProjection> = projection_query(&filter)
            .load(&mut conn)
            .await
            .map_err(rejected)?;

        // Point lookups are narrowed by status here rather than in SQL
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let record = PaymentRecord::try_from(row)?;
            if filter.status_matches(&record) {
                records.push(record);
            }
        }

        Ok(QueryResult::from_items(records))
    }
}

/// Point lookup on the primary key, or a scan narrowed by status in SQL.
/// Point lookups never carry the status predicate; it is applied to the
/// loaded row instead.
fn projection_query(filter: &QueryFilter) -> payment_projections::BoxedQuery<'_, Pg> {
    match filter.lookup() {
        Lookup::ById(id) => payment_projections::table.find(id).into_boxed(),
        Lookup::Scan => {
            let mut query = payment_projections::table.into_boxed();
            if let Some(status) = filter.status() {
                query = query.filter(payment_projections::status.eq(status));
            }
            query
        }
    }
}

fn pool_error(e: bb8::RunError<PoolError>) -> StoreError {
    match e {
        bb8::RunError::User(e) => StoreError::Unavailable(e.to_string()),
        bb8::RunError::TimedOut => {
            StoreError::Unavailable("timed out waiting for a connection".to_string())
        }
    }
}

fn rejected(e: diesel::result::Error) -> StoreError {
    StoreError::Rejected(e.to_string())
}

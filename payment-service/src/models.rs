use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use shared::{PaymentRecord, StoreError};
use uuid::Uuid;

/// Queryable view of a payment: one row per id, overwritten on every save.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::payment_projections)]
pub struct PaymentProjection {
    pub id: String,
    pub amount: BigDecimal,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Append-only record of a save. Never updated or deleted.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::payment_events)]
pub struct NewPaymentEvent {
    pub id: Uuid,
    pub payment_id: String,
    pub amount: BigDecimal,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

impl NewPaymentEvent {
    pub fn recorded(projection: &PaymentProjection) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id: projection.id.clone(),
            amount: projection.amount.clone(),
            status: projection.status.clone(),
            recorded_at: projection.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

impl TryFrom<&PaymentRecord> for PaymentProjection {
    type Error = StoreError;

    fn try_from(record: &PaymentRecord) -> Result<Self, Self::Error> {
        // Display of a finite f64 is its shortest round-tripping decimal form
        let amount = BigDecimal::from_str(&record.amount.to_string()).map_err(|e| {
            StoreError::Rejected(format!("amount {} is not representable: {}", record.amount, e))
        })?;

        Ok(Self {
            id: record.id.clone(),
            amount,
            status: record.status.clone(),
            updated_at: Some(Utc::now()),
        })
    }
}

impl TryFrom<PaymentProjection> for PaymentRecord {
    type Error = StoreError;

    fn try_from(row: PaymentProjection) -> Result<Self, Self::Error> {
        let amount = row.amount.to_f64().ok_or_else(|| {
            StoreError::Corrupt(format!("payment {} has amount {} out of range", row.id, row.amount))
        })?;

        Ok(Self {
            id: row.id,
            amount,
            status: row.status,
        })
    }
}

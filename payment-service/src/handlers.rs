use std::sync::Arc;

use shared::*;
use tracing::{error, info, warn};

/// Records payments. Validates first, then performs exactly one save.
#[derive(Clone)]
pub struct CommandHandler {
    repository: Arc<dyn PaymentRepository>,
}

impl CommandHandler {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn take_money(&self, request: PaymentRequest) -> Result<PaymentRecord, CommandError> {
        let payment = request.validate().map_err(|e| {
            warn!("Rejected payment request: {}", e);
            e
        })?;

        // The only place a payment id is ever assigned
        let record = PaymentRecord {
            id: new_payment_id(),
            amount: payment.amount,
            status: payment.status,
        };

        if let Err(e) = self.repository.save(record.clone()).await {
            error!(payment_id = %record.id, "Failed to save payment: {}", e);
            return Err(CommandError::StorageFailure(e));
        }

        info!(payment_id = %record.id, status = %record.status, "Payment recorded");
        Ok(record)
    }
}

/// Answers lookups by id and/or status. Never writes.
#[derive(Clone)]
pub struct QueryHandler {
    repository: Arc<dyn PaymentRepository>,
}

impl QueryHandler {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_payments(&self, query: PaymentQuery) -> Result<QueryResult, QueryError> {
        let filter = QueryFilter::from_query(query);

        let result = match self.repository.query(filter.clone()).await {
            Ok(result) => result,
            Err(e) => {
                error!(id = ?filter.id(), status = ?filter.status(), "Failed to query payments: {}", e);
                return Err(QueryError::StorageFailure(e));
            }
        };

        info!(
            id = ?filter.id(),
            status = ?filter.status(),
            count = result.count(),
            "Payments queried"
        );
        Ok(result)
    }
}

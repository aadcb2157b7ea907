use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared::{Lookup, PaymentRecord, PaymentRepository, QueryFilter, QueryResult, StoreError};
use tokio::sync::RwLock;

/// Process-local store for running without a database. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    records: Arc<RwLock<HashMap<String, PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, record: PaymentRecord) -> Result<(), StoreError> {
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn query(&self, filter: QueryFilter) -> Result<QueryResult, StoreError> {
        let records = self.records.read().await;

        let candidates: Vec<&PaymentRecord> = match filter.lookup() {
            Lookup::ById(id) => records.get(id).into_iter().collect(),
            Lookup::Scan => records.values().collect(),
        };

        Ok(candidates
            .into_iter()
            .filter(|record| filter.status_matches(record))
            .cloned()
            .collect())
    }
}

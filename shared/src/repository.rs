use async_trait::async_trait;

use crate::{PaymentRecord, QueryFilter, QueryResult, StoreError};

/// Storage seam for payments. Handlers only ever talk to a store through it.
///
/// Implementations must give read-after-write consistency: a record whose
/// `save` returned `Ok` is visible to every `query` issued afterwards.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Writes the record at its id, overwriting any previous version.
    /// Concurrent saves of the same id are last-writer-wins.
    async fn save(&self, record: PaymentRecord) -> Result<(), StoreError>;

    /// Returns the records selected by `filter.lookup()` that also pass
    /// `filter.status_matches`. An unknown id yields an empty result.
    async fn query(&self, filter: QueryFilter) -> Result<QueryResult, StoreError>;
}

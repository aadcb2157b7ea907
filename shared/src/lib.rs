use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod error;
mod repository;
pub mod validation;

pub use error::{CommandError, QueryError, StoreError, ValidationError};
pub use repository::PaymentRepository;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub amount: f64,
    pub status: String,
}

/// Body of a take-money command as received from the caller.
///
/// Both fields stay untyped until validation so that a value of the wrong
/// type is reported against the field that carries it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

/// A take-money request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayment {
    pub amount: f64,
    pub status: String,
}

/// Raw lookup parameters, e.g. the query string of `GET /payment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentQuery {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Normalized lookup filter handed to a [`PaymentRepository`].
///
/// `id` narrows the candidates to at most one record; `status`, when set, is
/// an equality predicate applied on top of whatever set `id` selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Point lookup on the primary key.
    ById(&'a str),
    /// Visit every record.
    Scan,
}

/// Records matched by a query. `count` always equals `items.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    items: Vec<PaymentRecord>,
    count: usize,
}

/// Generates the identifier of a new payment.
pub fn new_payment_id() -> String {
    Uuid::new_v4().to_string()
}

impl PaymentRequest {
    pub fn new(amount: f64, status: &str) -> Self {
        Self {
            amount: Some(serde_json::Value::from(amount)),
            status: Some(serde_json::Value::from(status)),
        }
    }

    pub fn validate(&self) -> Result<ValidatedPayment, ValidationError> {
        Ok(ValidatedPayment {
            amount: validation::amount(self.amount.as_ref())?,
            status: validation::status(self.status.as_ref())?,
        })
    }
}

impl PaymentQuery {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            status: None,
        }
    }

    pub fn by_status(status: impl Into<String>) -> Self {
        Self {
            id: None,
            status: Some(status.into()),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl QueryFilter {
    /// Builds a filter from caller input. Blank parameters count as absent;
    /// any other value is kept verbatim, so an id that cannot exist simply
    /// matches nothing.
    pub fn from_query(query: PaymentQuery) -> Self {
        Self {
            id: validation::optional_text(query.id.as_deref()),
            status: validation::optional_text(query.status.as_deref()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn lookup(&self) -> Lookup<'_> {
        match self.id.as_deref() {
            Some(id) => Lookup::ById(id),
            None => Lookup::Scan,
        }
    }

    /// Post-filter predicate. Always true when no status was requested.
    pub fn status_matches(&self, record: &PaymentRecord) -> bool {
        self.status
            .as_deref()
            .map_or(true, |status| record.status == status)
    }
}

impl QueryResult {
    pub fn from_items(items: Vec<PaymentRecord>) -> Self {
        let count = items.len();
        Self { items, count }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PaymentRecord] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn into_items(self) -> Vec<PaymentRecord> {
        self.items
    }
}

impl FromIterator<PaymentRecord> for QueryResult {
    fn from_iter<I: IntoIterator<Item = PaymentRecord>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}

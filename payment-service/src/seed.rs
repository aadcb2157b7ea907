use shared::{CommandError, PaymentRecord, PaymentRequest};
use tracing::info;

use crate::handlers::CommandHandler;

const SAMPLE_PAYMENTS: [(f64, &str); 2] = [(100.0, "pending"), (250.0, "completed")];

/// Records a fixed set of sample payments through the regular command path.
/// Only invoked at startup when seeding is requested.
pub async fn seed_sample_payments(
    commands: &CommandHandler,
) -> Result<Vec<PaymentRecord>, CommandError> {
    let mut seeded = Vec::with_capacity(SAMPLE_PAYMENTS.len());
    for (amount, status) in SAMPLE_PAYMENTS {
        let record = commands.take_money(PaymentRequest::new(amount, status)).await?;
        info!(payment_id = %record.id, "Seeded sample payment");
        seeded.push(record);
    }
    Ok(seeded)
}

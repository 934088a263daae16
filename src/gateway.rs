use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    models::{OrderTotals, PaymentMethod},
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment was declined by the provider")]
    Declined,

    #[error("upstream request failed")]
    Upstream,
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}

/// Simulated upstream standing in for the payment provider and the cart
/// mirror service: a fixed artificial delay plus configurable random
/// failure injection.
#[derive(Debug, Clone)]
pub struct MockGateway {
    delay: Duration,
    failure_rate: f64,
}

impl MockGateway {
    pub fn new(delay_ms: u64, failure_rate: f64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.upstream_delay_ms, config.payment_failure_rate)
    }

    async fn simulate_failure(&self) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.failure_rate > 0.0 && rand::thread_rng().r#gen::<f64>() < self.failure_rate
    }

    /// Charge the pay-half-now deposit. Declines are recoverable: the
    /// caller keeps the cart and form intact and the shopper retries.
    pub async fn charge_deposit(
        &self,
        amount: i64,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, GatewayError> {
        if self.simulate_failure().await {
            return Err(GatewayError::Declined);
        }
        let reference = format!("PAY-{}", &Uuid::new_v4().simple().to_string()[..12]);
        tracing::info!(reference = %reference, amount, "deposit charged");
        Ok(PaymentReceipt {
            reference,
            amount,
            method,
            paid_at: Utc::now(),
        })
    }

    /// Best-effort mirror of the cart to the remote service. Callers never
    /// block on this; the local cart stays the source of truth.
    pub async fn mirror_cart(
        &self,
        session_id: Uuid,
        totals: OrderTotals,
    ) -> Result<(), GatewayError> {
        if self.simulate_failure().await {
            return Err(GatewayError::Upstream);
        }
        tracing::debug!(
            session = %session_id,
            items = totals.items_count,
            total = totals.total,
            "cart mirrored upstream"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_failure_rate_always_succeeds() {
        let gateway = MockGateway::new(0, 0.0);
        let receipt = gateway
            .charge_deposit(1720, PaymentMethod::MobileMoney)
            .await
            .unwrap();
        assert_eq!(receipt.amount, 1720);
        assert!(receipt.reference.starts_with("PAY-"));
    }

    #[tokio::test]
    async fn full_failure_rate_always_declines() {
        let gateway = MockGateway::new(0, 1.0);
        let result = gateway.charge_deposit(500, PaymentMethod::CashOnDelivery).await;
        assert!(matches!(result, Err(GatewayError::Declined)));
    }
}

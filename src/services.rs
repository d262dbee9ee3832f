use crate::balance::{build_request, interpret, VendorOutcome};
use crate::circles::PrepaidDirectory;
use crate::errors::{AppError, ResultExt};
use crate::models::BalanceResponse;
use crate::portal_client::PortalClient;
use std::sync::Arc;

/// Balance inquiry pipeline: validate, build, submit, interpret, emit.
///
/// Every failure is terminal for the request; nothing is retried.
#[derive(Clone)]
pub struct BalanceService {
    client: PortalClient,
    prepaid: Arc<PrepaidDirectory>,
}

impl BalanceService {
    pub fn new(client: PortalClient, prepaid: Arc<PrepaidDirectory>) -> Self {
        Self { client, prepaid }
    }

    pub fn prepaid(&self) -> &PrepaidDirectory {
        &self.prepaid
    }

    pub async fn handle(
        &self,
        phone: &str,
        circle_query: &str,
    ) -> Result<BalanceResponse, AppError> {
        let request = build_request(phone, circle_query, &self.prepaid)?;

        let raw = self
            .client
            .submit_balance_request(&request)
            .await
            .with_context(|| format!("balance inquiry for {}", phone))?;

        match interpret(&raw)? {
            VendorOutcome::Success(success) => {
                let response = BalanceResponse::from(&success);
                tracing::info!(
                    "Balance for {}: balance={:?} expiry={:?}",
                    phone,
                    response.balance,
                    response.expiry
                );
                Ok(response)
            }
            VendorOutcome::Failure(failure) => Err(AppError::VendorFailure {
                status: failure.status,
                remarks: failure.remarks,
            }),
        }
    }
}

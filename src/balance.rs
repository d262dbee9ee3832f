//! Vendor request construction and response interpretation.
//!
//! The portal's reply is not a structured status document: success is
//! detected by the presence of the literal `SUCCESS` anywhere in the body,
//! and the amount and validity date share a single free-text field. The
//! helpers here reproduce that contract exactly.

use crate::circles::PrepaidDirectory;
use crate::errors::AppError;
use crate::models::{BalanceRequest, BalanceResponse, VendorFailure, VendorSuccess};

/// Token whose presence marks a successful inquiry.
pub const SUCCESS_MARKER: &str = "SUCCESS";
/// Separator between the amount and the validity phrase.
pub const BALANCE_DELIMITER: &str = "And";

pub const SVC_TYPE: &str = "PPGSM";
pub const AGENCY: &str = "PORTAL";
pub const VOUCHER_CATEGORY: &str = "T";
pub const NOT_APPLICABLE: &str = "NA";

/// Builds the vendor payload for `phone`, resolving `circle_query` against
/// the prepaid directory.
///
/// An unknown circle is not an error: the zone and circle fields are left
/// empty and the request is still sent.
pub fn build_request(
    phone: &str,
    circle_query: &str,
    directory: &PrepaidDirectory,
) -> Result<BalanceRequest, AppError> {
    if phone.is_empty() || circle_query.is_empty() {
        return Err(AppError::Validation(
            "phone and circle code are required".to_string(),
        ));
    }

    let mut request = BalanceRequest {
        user_id: "0".to_string(),
        phone_no: phone.to_string(),
        prepaid_no: phone.to_string(),
        email_id: String::new(),
        contact_no: String::new(),
        short_name: String::new(),
        svc_type: SVC_TYPE.to_string(),
        ssa_code: NOT_APPLICABLE.to_string(),
        account_no: NOT_APPLICABLE.to_string(),
        denomination: "0".to_string(),
        total_amount: "0".to_string(),
        invoice_no: NOT_APPLICABLE.to_string(),
        invoice_date: NOT_APPLICABLE.to_string(),
        due_date: NOT_APPLICABLE.to_string(),
        agency: AGENCY.to_string(),
        voucher_category: VOUCHER_CATEGORY.to_string(),
        voucher_subcategory: NOT_APPLICABLE.to_string(),
        ..Default::default()
    };

    match directory.resolve(circle_query) {
        Some(circle) => {
            request.zone_code = circle.zone_code.clone();
            request.circle_code = circle.circle_code.clone();
            request.circle_id = circle.circle_id;
        }
        None => {
            tracing::warn!(
                "Circle '{}' not found in prepaid directory, sending request without circle data",
                circle_query
            );
        }
    }

    Ok(request)
}

/// Classified vendor reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorOutcome {
    Success(VendorSuccess),
    Failure(VendorFailure),
}

/// Classifies a raw vendor body and decodes it into the matching shape.
///
/// Classification only looks for [`SUCCESS_MARKER`] in the text, so a failed
/// reply whose remarks mention it is still treated as a success.
pub fn interpret(raw: &[u8]) -> Result<VendorOutcome, AppError> {
    if is_success(raw) {
        let success: VendorSuccess = serde_json::from_slice(raw)
            .map_err(|e| AppError::Decode(format!("success payload: {}", e)))?;
        Ok(VendorOutcome::Success(success))
    } else {
        let failure: VendorFailure = serde_json::from_slice(raw)
            .map_err(|e| AppError::Decode(format!("failure payload: {}", e)))?;
        Ok(VendorOutcome::Failure(failure))
    }
}

pub fn is_success(raw: &[u8]) -> bool {
    String::from_utf8_lossy(raw).contains(SUCCESS_MARKER)
}

/// Text before the first `And`, verbatim, or the whole text if there is none.
pub fn split_balance(combined: &str) -> &str {
    match combined.find(BALANCE_DELIMITER) {
        Some(idx) => &combined[..idx],
        None => combined,
    }
}

/// Last whitespace-delimited token of the whole combined text.
///
/// Without any whitespace the full text is returned.
pub fn extract_expiry(combined: &str) -> &str {
    match combined.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        Some((idx, c)) => &combined[idx + c.len_utf8()..],
        None => combined,
    }
}

impl From<&VendorSuccess> for BalanceResponse {
    fn from(success: &VendorSuccess) -> Self {
        BalanceResponse {
            status: "OK".to_string(),
            balance: split_balance(&success.balance).to_string(),
            expiry: extract_expiry(&success.balance).to_string(),
        }
    }
}

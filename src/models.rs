use serde::{Deserialize, Serialize};

// ============ Circle Reference Data ============

/// Common view over both circle feed variants, used by directory lookup.
pub trait CircleRecord {
    /// Short circle code (e.g. "KL").
    fn circle_code(&self) -> &str;
    /// Display name of the circle (e.g. "Kerala").
    fn circle_name(&self) -> &str;
}

/// One row of the prepaid circle feed.
///
/// Missing fields fall back to their zero value, unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepaidCircle {
    #[serde(rename = "CIRCLE_ID")]
    pub circle_id: i64,
    #[serde(rename = "CIRCLE_NAME")]
    pub circle_name: String,
    #[serde(rename = "ZONE_ID")]
    pub zone_id: i64,
    #[serde(rename = "ZONE_NAME")]
    pub zone_name: String,
    #[serde(rename = "CIRCLE_CODE")]
    pub circle_code: String,
    #[serde(rename = "ZONE_CODE")]
    pub zone_code: String,
}

/// One row of the postpaid circle feed.
///
/// Identifiers are strings here, and the row carries an extra CM code pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostpaidCircle {
    #[serde(rename = "CIRCLE_ID")]
    pub circle_id: String,
    #[serde(rename = "CIRCLE_NAME")]
    pub circle_name: String,
    #[serde(rename = "ZONE_ID")]
    pub zone_id: String,
    #[serde(rename = "ZONE_NAME")]
    pub zone_name: String,
    #[serde(rename = "CM_ZONE_CODE")]
    pub cm_zone_code: String,
    #[serde(rename = "CM_CIRCLE_CODE")]
    pub cm_circle_code: String,
    #[serde(rename = "CIRCLE_CODE")]
    pub circle_code: String,
    #[serde(rename = "ZONE_CODE")]
    pub zone_code: String,
}

impl CircleRecord for PrepaidCircle {
    fn circle_code(&self) -> &str {
        &self.circle_code
    }

    fn circle_name(&self) -> &str {
        &self.circle_name
    }
}

impl CircleRecord for PostpaidCircle {
    fn circle_code(&self) -> &str {
        &self.circle_code
    }

    fn circle_name(&self) -> &str {
        &self.circle_name
    }
}

/// Envelope of a circle feed: `{"ROWSET": {"ROW": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct CircleFeed<T> {
    #[serde(rename = "ROWSET", default)]
    pub rowset: RowSet<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RowSet<T> {
    #[serde(rename = "ROW", default)]
    pub rows: Vec<T>,
}

impl<T> Default for RowSet<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

// ============ Vendor Payloads ============

/// Balance-inquiry payload posted to the vendor portal.
///
/// Field order matches what the portal's own web form produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRequest {
    #[serde(rename = "USERID")]
    pub user_id: String,
    #[serde(rename = "PHONE_NO")]
    pub phone_no: String,
    #[serde(rename = "PREPAIDNO")]
    pub prepaid_no: String,
    #[serde(rename = "EMAILID")]
    pub email_id: String,
    #[serde(rename = "CONTACTNO")]
    pub contact_no: String,
    #[serde(rename = "SHORTNAME")]
    pub short_name: String,
    #[serde(rename = "SVC_TYPE")]
    pub svc_type: String,
    #[serde(rename = "SSA_CODE")]
    pub ssa_code: String,
    #[serde(rename = "ZONE_CODE")]
    pub zone_code: String,
    #[serde(rename = "CIRCLE_ID")]
    pub circle_id: i64,
    #[serde(rename = "CIRCLE_CODE")]
    pub circle_code: String,
    #[serde(rename = "ACCOUNT_NO")]
    pub account_no: String,
    #[serde(rename = "DENOMINATION")]
    pub denomination: String,
    #[serde(rename = "TOTAL_AMOUNT")]
    pub total_amount: String,
    #[serde(rename = "INVOICE_NO")]
    pub invoice_no: String,
    #[serde(rename = "INVOICE_DATE")]
    pub invoice_date: String,
    #[serde(rename = "DUE_DATE")]
    pub due_date: String,
    #[serde(rename = "AGENCY")]
    pub agency: String,
    #[serde(rename = "VOUCHER_CATEGORY")]
    pub voucher_category: String,
    #[serde(rename = "VOUCHER_SUBCATEGORY")]
    pub voucher_subcategory: String,
}

/// Vendor reply shape when the inquiry succeeded.
///
/// `balance` holds both the amount and the validity phrase,
/// e.g. `"Rs.50.00 And valid upto 15-01-2025"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VendorSuccess {
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "REMARKS")]
    pub remarks: String,
    #[serde(rename = "BALANCE")]
    pub balance: String,
}

/// Vendor reply shape when the inquiry failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VendorFailure {
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "REMARKS")]
    pub remarks: String,
}

// ============ API Response ============

/// Public result of a successful balance inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Always "OK".
    pub status: String,
    pub balance: String,
    pub expiry: String,
}

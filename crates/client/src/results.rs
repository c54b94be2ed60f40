//! Typed results returned by protocol operations.
//!
//! All of these are value objects built once at the end of an operation.
//! Failures are carried in `result`/`error` rather than raised, so a
//! caller always gets the identifiers it asked about back.

use ordercast_core::types::OrderType;
use serde::{Deserialize, Serialize};

/// Outcome classification of one dispatched operation.
///
/// `TestMode` is only reachable when the client-wide test flag is set;
/// `Error` and `Success` only on the real network path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestResultType {
    TestMode,
    Error,
    Success,
}

/// Identity of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Service-assigned order id; -1 when unset.
    pub order_id: i64,
    /// Transaction id, populated for message-class order types only.
    pub transaction_id: String,
    pub order_type: OrderType,
    /// Round-trip time in whole seconds; sub-second calls read 0. Coarse
    /// diagnostics only.
    pub response_time_secs: i64,
    pub result: RequestResultType,
    /// "none" when the request succeeded.
    pub error: String,
}

/// Delivery report for an order, addressed by transaction id where the
/// order type tracks one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub order_id: i64,
    pub transaction_id: String,
    pub order_type: OrderType,
    pub result: RequestResultType,
    pub error: String,
    /// Status text as reported by the service. Free text, not a closed
    /// vocabulary.
    pub order_status: String,
    /// The raw report payload, XML or CSV as requested.
    pub report_data: String,
}

impl TransactionReport {
    /// Drop the transaction id, keeping everything else.
    pub fn into_order_report(self) -> OrderReport {
        OrderReport {
            order_id: self.order_id,
            order_type: self.order_type,
            result: self.result,
            error: self.error,
            order_status: self.order_status,
            report_data: self.report_data,
        }
    }
}

/// [`TransactionReport`] without message-level tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    pub order_id: i64,
    pub order_type: OrderType,
    pub result: RequestResultType,
    pub error: String,
    pub order_status: String,
    pub report_data: String,
}

/// Identity of a submitted template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateResponse {
    /// Service-assigned template id; -1 when unset.
    pub template_id: i64,
    pub result: RequestResultType,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_report_is_a_strict_projection() {
        let report = TransactionReport {
            order_id: 41,
            transaction_id: "tx-9".to_string(),
            order_type: OrderType::SmsMessage,
            result: RequestResultType::Success,
            error: "none".to_string(),
            order_status: "Completed".to_string(),
            report_data: "<report/>".to_string(),
        };
        let projected = report.clone().into_order_report();
        assert_eq!(projected.order_id, report.order_id);
        assert_eq!(projected.order_type, report.order_type);
        assert_eq!(projected.result, report.result);
        assert_eq!(projected.error, report.error);
        assert_eq!(projected.order_status, report.order_status);
        assert_eq!(projected.report_data, report.report_data);
    }

    #[test]
    fn results_serialize_for_embedding_callers() {
        let response = OrderResponse {
            order_id: 7,
            transaction_id: String::new(),
            order_type: OrderType::EmailBroadcast,
            response_time_secs: 0,
            result: RequestResultType::Success,
            error: "none".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["order_id"], 7);
        assert_eq!(json["result"], "Success");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of order the service accepts.
///
/// Each variant maps to a short protocol code used both in the order
/// document's `Type` attribute and in request URL segments. The mapping is
/// a fixed lookup in both directions; nothing is derived from variant
/// names, because the service's conventions are irregular (fax messages
/// are "TL", fax broadcasts are "FX").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    EmailBroadcast,
    VoiceBroadcast,
    FaxBroadcast,
    SmsBroadcast,
    EmailMessage,
    SmsMessage,
    VoiceMessage,
    FaxMessage,
}

impl OrderType {
    pub const ALL: [OrderType; 8] = [
        OrderType::EmailBroadcast,
        OrderType::VoiceBroadcast,
        OrderType::FaxBroadcast,
        OrderType::SmsBroadcast,
        OrderType::EmailMessage,
        OrderType::SmsMessage,
        OrderType::VoiceMessage,
        OrderType::FaxMessage,
    ];

    /// Protocol code for this order type.
    pub fn code(self) -> &'static str {
        match self {
            OrderType::EmailBroadcast => "EB",
            OrderType::VoiceBroadcast => "VL",
            OrderType::FaxBroadcast => "FX",
            OrderType::SmsBroadcast => "SB",
            OrderType::EmailMessage => "EM",
            OrderType::SmsMessage => "SM",
            OrderType::VoiceMessage => "VT",
            OrderType::FaxMessage => "TL",
        }
    }

    /// Parse a protocol code back into its order type.
    pub fn from_code(code: &str) -> Option<OrderType> {
        match code {
            "EB" => Some(OrderType::EmailBroadcast),
            "VL" => Some(OrderType::VoiceBroadcast),
            "FX" => Some(OrderType::FaxBroadcast),
            "SB" => Some(OrderType::SmsBroadcast),
            "EM" => Some(OrderType::EmailMessage),
            "SM" => Some(OrderType::SmsMessage),
            "VT" => Some(OrderType::VoiceMessage),
            "TL" => Some(OrderType::FaxMessage),
            _ => None,
        }
    }

    /// Message-class types are tracked per recipient via a transaction id;
    /// broadcast-class types are not.
    pub fn is_message_class(self) -> bool {
        matches!(
            self,
            OrderType::EmailMessage
                | OrderType::SmsMessage
                | OrderType::VoiceMessage
                | OrderType::FaxMessage
        )
    }

    /// Report endpoint for this order type.
    ///
    /// Fax message reports live behind a `ReportByUnqid` path that does not
    /// follow the `{code}report` convention of every other type. The split
    /// is a quirk of the remote service, kept here as an explicit lookup.
    pub fn report_endpoint(self) -> String {
        match self {
            OrderType::FaxMessage => format!("{}ReportByUnqid.aspx", self.code()),
            _ => format!("{}report.aspx", self.code()),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::EmailBroadcast => "EmailBroadcast",
            OrderType::VoiceBroadcast => "VoiceBroadcast",
            OrderType::FaxBroadcast => "FaxBroadcast",
            OrderType::SmsBroadcast => "SmsBroadcast",
            OrderType::EmailMessage => "EmailMessage",
            OrderType::SmsMessage => "SmsMessage",
            OrderType::VoiceMessage => "VoiceMessage",
            OrderType::FaxMessage => "FaxMessage",
        };
        f.write_str(name)
    }
}

/// Format the service should use for report and list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportReturnType {
    Xml,
    Csv,
}

impl ReportReturnType {
    /// Value of the `ReturnType` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            ReportReturnType::Xml => "XML",
            ReportReturnType::Csv => "CSV",
        }
    }
}

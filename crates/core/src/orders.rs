//! Order documents.
//!
//! Every broadcast and message sent to the service is an order. The common
//! envelope is `<Orders><Order Type="{code}">...</Order></Orders>`; each
//! subtype contributes its own elements inside the order tag.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::time;
use crate::types::OrderType;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0} is a required field")]
    MissingField(&'static str),
    #[error("must have at least one voice document")]
    NoDocuments,
    #[error("xml write failed: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Fields common to every order, plus subtype elements appended verbatim.
///
/// Time fields are held in UTC and rendered on the service's local clock
/// when the document is built.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_type: OrderType,
    /// When the service should launch the order. `None` launches immediately.
    pub launch_time_utc: Option<DateTime<Utc>>,
    pub billing_code: Option<String>,
    /// Contact list the order targets (broadcast-class types).
    pub list_id: Option<i64>,
    /// Subtype elements, written inside the order tag in insertion order.
    pub fields: Vec<(String, String)>,
}

impl Order {
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            launch_time_utc: None,
            billing_code: None,
            list_id: None,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn launch_at(mut self, utc: DateTime<Utc>) -> Self {
        self.launch_time_utc = Some(utc);
        self
    }

    /// Render the finished, type-tagged order document.
    pub fn to_xml(&self) -> Result<String, DocumentError> {
        self.build(|_| Ok(()))
    }

    /// Render the envelope, letting a subtype write extra children inside
    /// the order tag.
    pub(crate) fn build<F>(&self, extra: F) -> Result<String, DocumentError>
    where
        F: FnOnce(&mut Writer<Vec<u8>>) -> Result<(), quick_xml::Error>,
    {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Start(BytesStart::new("Orders")))?;

        let mut order = BytesStart::new("Order");
        order.push_attribute(("Type", self.order_type.code()));
        writer.write_event(Event::Start(order))?;

        if let Some(launch) = self.launch_time_utc {
            let local = time::service_local(launch).format("%Y-%m-%d %H:%M").to_string();
            write_text_element(&mut writer, "LaunchDateTime", &local)?;
        }
        if let Some(code) = &self.billing_code {
            write_text_element(&mut writer, "BillingCode", code)?;
        }
        if let Some(list_id) = self.list_id {
            write_text_element(&mut writer, "ListID", &list_id.to_string())?;
        }
        for (name, value) in &self.fields {
            write_text_element(&mut writer, name, value)?;
        }
        extra(&mut writer)?;

        writer.write_event(Event::End(BytesEnd::new("Order")))?;
        writer.write_event(Event::End(BytesEnd::new("Orders")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

pub(crate) fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn envelope_carries_the_type_code() {
        let xml = Order::new(OrderType::EmailMessage).to_xml().unwrap();
        assert_eq!(xml, "<Orders><Order Type=\"EM\"></Order></Orders>");
    }

    #[test]
    fn subtype_fields_are_written_in_order() {
        let xml = Order::new(OrderType::EmailBroadcast)
            .field("Subject", "Quarterly update")
            .field("ReplyTo", "news@example.com")
            .to_xml()
            .unwrap();
        let subject = xml.find("<Subject>").unwrap();
        let reply_to = xml.find("<ReplyTo>").unwrap();
        assert!(subject < reply_to);
    }

    #[test]
    fn text_content_is_escaped() {
        let xml = Order::new(OrderType::SmsMessage)
            .field("Body", "fish & chips <today>")
            .to_xml()
            .unwrap();
        assert!(xml.contains("fish &amp; chips &lt;today&gt;"));
    }

    #[test]
    fn launch_time_renders_on_the_service_clock() {
        let launch = Utc.with_ymd_and_hms(2025, 3, 1, 14, 30, 0).unwrap();
        let xml = Order::new(OrderType::VoiceBroadcast)
            .launch_at(launch)
            .to_xml()
            .unwrap();
        assert!(xml.contains("<LaunchDateTime>2025-03-01 09:30</LaunchDateTime>"));
    }
}

//! Voice order fields shared by voice broadcasts and voice messages.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::orders::{write_text_element, DocumentError, Order};
use crate::time;
use crate::types::OrderType;

/// A keypad action the recipient can trigger during the call.
#[derive(Debug, Clone)]
pub struct HotKey {
    pub key: char,
    pub action: String,
}

/// Audio played during the call, by name and source reference.
#[derive(Debug, Clone)]
pub struct VoiceDocument {
    pub name: String,
    pub source: String,
}

/// A voice order. Wraps the common [`Order`] envelope with the fields the
/// voice channel needs: caller id, a call window, the call script, hot
/// keys, and at least one voice document.
#[derive(Debug, Clone)]
pub struct VoiceOrder {
    pub order: Order,
    pub caller_id: String,
    /// End of the call window. Required unless a duration is given.
    pub stop_time_utc: Option<DateTime<Utc>>,
    /// Time of day calling resumes the next day.
    pub restart_time_utc: Option<DateTime<Utc>>,
    /// Call window length in hours; 0 means use `stop_time_utc` instead.
    pub duration_hours: u32,
    pub call_script: Option<String>,
    pub hot_keys: Vec<HotKey>,
    pub documents: Vec<VoiceDocument>,
}

impl VoiceOrder {
    pub fn broadcast() -> Self {
        Self::new(OrderType::VoiceBroadcast)
    }

    pub fn message() -> Self {
        Self::new(OrderType::VoiceMessage)
    }

    fn new(order_type: OrderType) -> Self {
        Self {
            order: Order::new(order_type),
            caller_id: "0".to_string(),
            stop_time_utc: None,
            restart_time_utc: None,
            duration_hours: 0,
            call_script: None,
            hot_keys: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn to_xml(&self) -> Result<String, DocumentError> {
        if self.duration_hours == 0 && self.stop_time_utc.is_none() {
            return Err(DocumentError::MissingField("StopTimeUTC"));
        }
        if self.documents.is_empty() {
            return Err(DocumentError::NoDocuments);
        }

        self.order.build(|writer| {
            write_text_element(writer, "CallerID", &self.caller_id)?;

            if self.duration_hours != 0 {
                write_text_element(writer, "Duration", &duration_value(self.duration_hours))?;
            } else if let Some(stop) = self.stop_time_utc {
                let local = time::service_local(stop).format("%Y-%m-%d %H:%M").to_string();
                write_text_element(writer, "StopDateTime", &local)?;
            }

            let restart = match self.restart_time_utc {
                Some(t) => time::service_local(t).format("%H:%M").to_string(),
                None => "00:00".to_string(),
            };
            write_text_element(writer, "RestartTime", &restart)?;

            match &self.call_script {
                Some(script) => write_text_element(writer, "CallScript", script)?,
                None => writer.write_event(Event::Empty(BytesStart::new("CallScript")))?,
            }

            for hot_key in &self.hot_keys {
                let mut el = BytesStart::new("HotKey");
                el.push_attribute(("Key", hot_key.key.to_string().as_str()));
                writer.write_event(Event::Start(el))?;
                writer.write_event(Event::Text(BytesText::new(&hot_key.action)))?;
                writer.write_event(Event::End(BytesEnd::new("HotKey")))?;
            }

            writer.write_event(Event::Start(BytesStart::new("Documents")))?;
            for document in &self.documents {
                let mut el = BytesStart::new("Document");
                el.push_attribute(("Name", document.name.as_str()));
                writer.write_event(Event::Start(el))?;
                writer.write_event(Event::Text(BytesText::new(&document.source)))?;
                writer.write_event(Event::End(BytesEnd::new("Document")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("Documents")))?;

            Ok(())
        })
    }
}

/// Call window length rendered as `days.hours:00`, e.g. 30 hours is "1.06:00".
fn duration_value(hours: u32) -> String {
    format!("{}.{:02}:00", hours / 24, hours % 24)
}

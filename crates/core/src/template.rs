//! Reusable message templates submitted ahead of time and referenced by
//! later orders.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::orders::{write_text_element, DocumentError};
use crate::types::OrderType;

#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    /// Channel the template is written for.
    pub order_type: OrderType,
    pub subject: Option<String>,
    pub body: String,
    /// Extra template elements, written in insertion order.
    pub fields: Vec<(String, String)>,
}

impl Template {
    pub fn new(name: impl Into<String>, order_type: OrderType, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order_type,
            subject: None,
            body: body.into(),
            fields: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn to_xml(&self) -> Result<String, DocumentError> {
        if self.name.is_empty() {
            return Err(DocumentError::MissingField("Name"));
        }

        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Start(BytesStart::new("Templates")))?;

        let mut template = BytesStart::new("Template");
        template.push_attribute(("Name", self.name.as_str()));
        template.push_attribute(("Type", self.order_type.code()));
        writer.write_event(Event::Start(template))?;

        if let Some(subject) = &self.subject {
            write_text_element(&mut writer, "Subject", subject)?;
        }
        write_text_element(&mut writer, "Body", &self.body)?;
        for (name, value) in &self.fields {
            write_text_element(&mut writer, name, value)?;
        }

        writer.write_event(Event::End(BytesEnd::new("Template")))?;
        writer.write_event(Event::End(BytesEnd::new("Templates")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_name_and_channel_attributes() {
        let xml = Template::new("welcome", OrderType::EmailMessage, "Hello!")
            .subject("Welcome aboard")
            .to_xml()
            .unwrap();
        assert!(xml.starts_with("<Templates><Template Name=\"welcome\" Type=\"EM\">"));
        assert!(xml.contains("<Subject>Welcome aboard</Subject>"));
        assert!(xml.contains("<Body>Hello!</Body>"));
    }

    #[test]
    fn subject_is_optional() {
        let xml = Template::new("ping", OrderType::SmsMessage, "pong").to_xml().unwrap();
        assert!(!xml.contains("Subject"));
    }

    #[test]
    fn name_is_required() {
        let template = Template::new("", OrderType::EmailMessage, "body");
        assert!(matches!(
            template.to_xml(),
            Err(DocumentError::MissingField("Name"))
        ));
    }
}

//! Response interpretation.
//!
//! The service's responses are read against fixed node paths. Callers
//! assume a path matches exactly once but must tolerate zero or many
//! matches, and reading a field is an explicit presence check: the absent
//! case drives the `Exception` fallback used throughout the client.

use roxmltree::{Document, Node};

use crate::error::ClientError;

/// Outcome of reading an expected field from a result node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeField {
    /// The field was present; here is its text.
    Value(String),
    /// The field was absent; the node supplied an `Exception` reason
    /// instead.
    Exception(String),
}

/// Parse a response body. Non-well-formed XML is a
/// [`ClientError::MalformedResponse`], never a business error.
pub fn parse(xml: &str) -> Result<Document<'_>, ClientError> {
    Document::parse(xml).map_err(|err| ClientError::MalformedResponse(err.to_string()))
}

/// All element nodes matching `path`, where the first segment names the
/// document root. A root-only path selects the root element itself.
pub fn select_nodes<'a, 'input: 'a>(
    doc: &'a Document<'input>,
    path: &[&str],
) -> Vec<Node<'a, 'input>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };
    let root = doc.root_element();
    if root.tag_name().name() != *first {
        return Vec::new();
    }
    let mut matches = vec![root];
    for segment in rest {
        let mut next = Vec::new();
        for node in matches {
            next.extend(
                node.children()
                    .filter(|child| child.is_element() && child.tag_name().name() == *segment),
            );
        }
        matches = next;
    }
    matches
}

/// Text of the named child element, if the element is present. An empty
/// element reads as an empty string; presence is what matters here.
/// Surrounding whitespace is trimmed so numeric fields parse even when
/// the service pads or wraps them.
pub fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .map(|child| child.text().unwrap_or("").trim().to_string())
}

/// Read `field` from a result node, falling back to the node's
/// `Exception` text when the field is absent. A node with neither is an
/// inconsistency the caller must not paper over.
pub fn read_field_or_exception(
    node: Node<'_, '_>,
    field: &'static str,
) -> Result<NodeField, ClientError> {
    if let Some(value) = child_text(node, field) {
        return Ok(NodeField::Value(value));
    }
    match child_text(node, "Exception") {
        Some(reason) => Ok(NodeField::Exception(reason)),
        None => Err(ClientError::InconsistentResponse { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_RESULT: &[&str] = &["PostAPIResponse", "SaveTransactionalOrderResult"];

    #[test]
    fn malformed_xml_is_classified_separately() {
        let err = parse("<PostAPIResponse><unclosed>").unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[test]
    fn selects_the_single_expected_node() {
        let doc = parse(
            "<PostAPIResponse><SaveTransactionalOrderResult><OrderID>7</OrderID>\
             </SaveTransactionalOrderResult></PostAPIResponse>",
        )
        .unwrap();
        assert_eq!(select_nodes(&doc, ORDER_RESULT).len(), 1);
    }

    #[test]
    fn tolerates_zero_and_many_matches() {
        let empty = parse("<PostAPIResponse/>").unwrap();
        assert!(select_nodes(&empty, ORDER_RESULT).is_empty());

        let other_root = parse("<SomethingElse/>").unwrap();
        assert!(select_nodes(&other_root, ORDER_RESULT).is_empty());

        let many = parse(
            "<PostAPIResponse><SaveTransactionalOrderResult/>\
             <SaveTransactionalOrderResult/></PostAPIResponse>",
        )
        .unwrap();
        assert_eq!(select_nodes(&many, ORDER_RESULT).len(), 2);
    }

    #[test]
    fn root_only_path_selects_the_root() {
        let doc = parse("<Templates><TemplateID>3</TemplateID></Templates>").unwrap();
        let nodes = select_nodes(&doc, &["Templates"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(child_text(nodes[0], "TemplateID").as_deref(), Some("3"));
    }

    #[test]
    fn child_text_distinguishes_absent_from_empty() {
        let doc = parse("<R><Empty/><Full> hi </Full></R>").unwrap();
        let root = doc.root_element();
        assert_eq!(child_text(root, "Empty").as_deref(), Some(""));
        assert_eq!(child_text(root, "Full").as_deref(), Some("hi"));
        assert_eq!(child_text(root, "Missing"), None);
    }

    #[test]
    fn missing_field_falls_back_to_exception_text() {
        let doc = parse("<R><Exception>invalid list id</Exception></R>").unwrap();
        let outcome = read_field_or_exception(doc.root_element(), "OrderID").unwrap();
        assert_eq!(outcome, NodeField::Exception("invalid list id".to_string()));
    }

    #[test]
    fn missing_field_and_exception_is_an_inconsistency() {
        let doc = parse("<R><Unrelated>1</Unrelated></R>").unwrap();
        let err = read_field_or_exception(doc.root_element(), "OrderID").unwrap_err();
        assert!(matches!(
            err,
            ClientError::InconsistentResponse { field: "OrderID" }
        ));
    }

    #[test]
    fn present_field_wins_even_when_exception_exists() {
        let doc = parse("<R><OrderID>5</OrderID><Exception>stale</Exception></R>").unwrap();
        let outcome = read_field_or_exception(doc.root_element(), "OrderID").unwrap();
        assert_eq!(outcome, NodeField::Value("5".to_string()));
    }
}

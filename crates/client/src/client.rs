//! The protocol client.
//!
//! One instance per credential set. Every operation is a single request
//! against the service; the transport is injected so tests can run the
//! whole client against canned responses.

use std::sync::Arc;
use std::time::Instant;

use ordercast_core::template::Template;
use ordercast_core::types::{OrderType, ReportReturnType};

use crate::error::{ClientError, TransportError};
use crate::interpret::{self, NodeField};
use crate::results::{
    OrderReport, OrderResponse, RequestResultType, TemplateResponse, TransactionReport,
};
use crate::Transport;

const ORDER_RESULT_PATH: &[&str] = &["PostAPIResponse", "SaveTransactionalOrderResult"];
const CANCEL_RESULT_PATH: &[&str] = &["PostAPIResponse", "CancelOrderResult"];
const TEMPLATE_RESULT_PATH: &[&str] = &["PostAPIResponse", "SaveTemplateResult"];
const TEMPLATES_PATH: &[&str] = &["Templates"];

/// Client for the order submission and reporting service.
///
/// With test mode enabled the order and report operations return sentinel
/// results without touching the transport, shaped exactly like real
/// successes. Set the flag before use; it is configuration, not a
/// runtime toggle.
pub struct ApiClient {
    base_url: String,
    user: String,
    password: String,
    test_mode: bool,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user: user.into(),
            password: password.into(),
            test_mode: false,
            transport,
        }
    }

    /// Client over the real HTTP transport.
    pub fn over_http(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            base_url,
            user,
            password,
            Arc::new(crate::transport::HttpTransport::new()),
        )
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn set_test_mode(&mut self, enabled: bool) {
        self.test_mode = enabled;
    }

    /// Submit an order document built by the core document model.
    pub async fn send(&self, order: &ordercast_core::Order) -> Result<OrderResponse, ClientError> {
        let xml = order
            .to_xml()
            .map_err(|err| ClientError::MalformedRequest(err.to_string()))?;
        self.send_order(&xml).await
    }

    /// Submit a finished, type-tagged order document.
    ///
    /// Transport failures come back inside the [`OrderResponse`]; this
    /// only errors when the document itself is malformed or the service
    /// response violates the protocol's own structure.
    pub async fn send_order(&self, xml: &str) -> Result<OrderResponse, ClientError> {
        let code = order_type_code(xml)?;
        let order_type = OrderType::from_code(&code).ok_or_else(|| {
            ClientError::MalformedRequest(format!("unknown order type code `{code}`"))
        })?;

        if self.test_mode {
            tracing::info!(order_type = %order_type, "test mode active, order not dispatched");
            return Ok(OrderResponse {
                order_id: 0,
                transaction_id: "0".to_string(),
                order_type,
                response_time_secs: 0,
                result: RequestResultType::TestMode,
                error: "none".to_string(),
            });
        }

        let url = format!(
            "{}/xml/{}new.aspx?UserName={}&UserPassword={}&PostWay=sync&CSVFile=",
            self.base_url, code, self.user, self.password
        );

        let started = Instant::now();
        let dispatched = self.transport.upload(&url, xml).await;
        let response_time_secs = started.elapsed().as_secs() as i64;

        let mut order_id: i64 = -1;
        let mut transaction_id = String::new();
        let (result, error) = match dispatched {
            Ok(body) => read_order_result(&body, order_type, &mut order_id, &mut transaction_id)?,
            Err(err) => {
                tracing::warn!(order_type = %order_type, error = %err, "order dispatch failed");
                (RequestResultType::Error, err.classified_message())
            }
        };

        if result == RequestResultType::Success {
            tracing::info!(order_id, order_type = %order_type, "order submitted");
        }

        Ok(OrderResponse {
            order_id,
            transaction_id,
            order_type,
            response_time_secs,
            result,
            error,
        })
    }

    /// Report for a message-class order, addressed by transaction id.
    pub async fn get_transaction_report(
        &self,
        transaction_id: &str,
        order_type: OrderType,
        return_type: ReportReturnType,
    ) -> TransactionReport {
        self.transaction_report(-1, transaction_id, order_type, return_type)
            .await
    }

    /// Report for the order identified by an earlier submission.
    pub async fn get_transaction_report_for(
        &self,
        response: &OrderResponse,
        return_type: ReportReturnType,
    ) -> TransactionReport {
        self.transaction_report(
            response.order_id,
            &response.transaction_id,
            response.order_type,
            return_type,
        )
        .await
    }

    /// Report without message-level tracking. A projection of
    /// [`get_transaction_report`](Self::get_transaction_report); issues
    /// the same single request.
    pub async fn get_order_report(
        &self,
        order_id: i64,
        order_type: OrderType,
        return_type: ReportReturnType,
    ) -> OrderReport {
        self.transaction_report(order_id, "", order_type, return_type)
            .await
            .into_order_report()
    }

    pub async fn get_order_report_for(
        &self,
        response: &OrderResponse,
        return_type: ReportReturnType,
    ) -> OrderReport {
        self.get_transaction_report_for(response, return_type)
            .await
            .into_order_report()
    }

    /// One report round trip. Never raises; every failure is folded into
    /// the returned report's classification.
    async fn transaction_report(
        &self,
        order_id: i64,
        transaction_id: &str,
        order_type: OrderType,
        return_type: ReportReturnType,
    ) -> TransactionReport {
        if self.test_mode {
            return TransactionReport {
                order_id,
                transaction_id: transaction_id.to_string(),
                order_type,
                result: RequestResultType::TestMode,
                error: "none".to_string(),
                order_status: "Test Mode.".to_string(),
                report_data: format!(
                    "This is a test order report. Order ID: ( {order_id} ) Type: ( {order_type} )"
                ),
            };
        }

        let mut report_data = String::new();
        let mut order_status = String::new();
        let fetched = self
            .fetch_report(
                order_id,
                transaction_id,
                order_type,
                return_type,
                &mut report_data,
                &mut order_status,
            )
            .await;
        let (result, error) = match fetched {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(order_id, order_type = %order_type, error = %err, "report request failed");
                (
                    RequestResultType::Error,
                    format!("An error occurred while requesting the order report. {err}"),
                )
            }
        };

        TransactionReport {
            order_id,
            transaction_id: transaction_id.to_string(),
            order_type,
            result,
            error,
            order_status,
            report_data,
        }
    }

    async fn fetch_report(
        &self,
        order_id: i64,
        transaction_id: &str,
        order_type: OrderType,
        return_type: ReportReturnType,
        report_data: &mut String,
        order_status: &mut String,
    ) -> Result<(RequestResultType, String), ClientError> {
        let mut url = format!(
            "{}/{}?UserName={}&UserPassword={}&ReturnType={}",
            self.base_url,
            order_type.report_endpoint(),
            self.user,
            self.password,
            return_type.as_query()
        );
        if order_type.is_message_class() {
            url.push_str(&format!("&Unqid={transaction_id}"));
        }
        url.push_str(&format!("&OrderID={order_id}"));

        let body = self.transport.upload(&url, "").await?;
        // the whole body is the payload, whatever format was asked for
        *report_data = body.clone();

        let doc = interpret::parse(&body)?;
        let mut result = RequestResultType::Success;
        let mut error = "none".to_string();
        for node in interpret::select_nodes(&doc, ORDER_RESULT_PATH) {
            match interpret::read_field_or_exception(node, "status")? {
                NodeField::Value(status) => *order_status = status,
                NodeField::Exception(reason) => {
                    result = RequestResultType::Error;
                    error = reason;
                }
            }
        }
        Ok((result, error))
    }

    /// Cancel an order. The raw response body is returned unparsed and
    /// transport failures propagate; interpretation is the caller's
    /// problem (the credential probe relies on this).
    pub async fn cancel_order(
        &self,
        order_id: i64,
        order_type: OrderType,
    ) -> Result<String, TransportError> {
        let url = format!(
            "{}/xml/CancelOrder.aspx?UserName={}&UserPassword={}",
            self.base_url, self.user, self.password
        );
        let body = format!(
            "<Cancels><Cancel Type=\"{}\">{}</Cancel></Cancels>",
            order_type.code(),
            order_id
        );
        self.transport.upload(&url, &body).await
    }

    pub async fn cancel_order_for(&self, response: &OrderResponse) -> Result<String, TransportError> {
        self.cancel_order(response.order_id, response.order_type).await
    }

    /// Contact lists for the user, raw body as returned by the service.
    pub async fn get_lists(&self, return_type: ReportReturnType) -> Result<String, TransportError> {
        let url = format!(
            "{}/xml/lists.aspx?UserName={}&UserPassword={}&ReturnType={}",
            self.base_url,
            self.user,
            self.password,
            return_type.as_query()
        );
        self.transport.download(&url).await
    }

    /// Whether the configured credentials are valid.
    ///
    /// Probes by cancelling order 0 as an email broadcast and reading the
    /// numeric `StatusCode` of the cancel result: 0 is the service's
    /// bad-credential sentinel, anything else means the credentials were
    /// accepted. Unlike every other operation, failures here propagate to
    /// the caller instead of becoming a typed result.
    pub async fn authenticated(&self) -> anyhow::Result<bool> {
        use anyhow::Context;
        self.probe_credentials()
            .await
            .context("An error occurred while attempting to authenticate user")
    }

    async fn probe_credentials(&self) -> anyhow::Result<bool> {
        use anyhow::{anyhow, Context};

        let body = self.cancel_order(0, OrderType::EmailBroadcast).await?;
        let doc = interpret::parse(&body)?;

        let mut status_code: i64 = 0;
        for node in interpret::select_nodes(&doc, CANCEL_RESULT_PATH) {
            let raw = interpret::child_text(node, "StatusCode")
                .ok_or_else(|| anyhow!("cancel result has no StatusCode"))?;
            status_code = raw
                .parse()
                .with_context(|| format!("StatusCode is not numeric: `{raw}`"))?;
        }
        Ok(status_code != 0)
    }

    /// Submit a template document. Transport failures are classified into
    /// the returned result like order submission.
    pub async fn send_templates(
        &self,
        template: &Template,
    ) -> Result<TemplateResponse, ClientError> {
        let xml = template
            .to_xml()
            .map_err(|err| ClientError::MalformedRequest(err.to_string()))?;
        let url = format!(
            "{}/xml/TemplateSubmit.aspx?UserName={}&UserPassword={}",
            self.base_url, self.user, self.password
        );

        let mut template_id: i64 = -1;
        let (result, error) = match self.transport.upload(&url, &xml).await {
            Err(err) => {
                tracing::warn!(template = %template.name, error = %err, "template dispatch failed");
                (RequestResultType::Error, err.classified_message())
            }
            Ok(body) => read_template_result(&body, &mut template_id)?,
        };

        Ok(TemplateResponse {
            template_id,
            result,
            error,
        })
    }
}

/// Type code from the root order element's `Type` attribute. There is no
/// silent default; a document without the expected structure is refused.
fn order_type_code(xml: &str) -> Result<String, ClientError> {
    let doc = roxmltree::Document::parse(xml).map_err(|err| {
        ClientError::MalformedRequest(format!("order document is not well-formed: {err}"))
    })?;
    let root = doc.root_element();
    if root.tag_name().name() != "Orders" {
        return Err(ClientError::MalformedRequest(
            "expected an Orders root element".to_string(),
        ));
    }
    let order = root
        .children()
        .find(|child| child.is_element() && child.tag_name().name() == "Order")
        .ok_or_else(|| {
            ClientError::MalformedRequest("expected an Order element under Orders".to_string())
        })?;
    let code = order.attribute("Type").ok_or_else(|| {
        ClientError::MalformedRequest("Order element has no Type attribute".to_string())
    })?;
    Ok(code.to_string())
}

fn read_order_result(
    body: &str,
    order_type: OrderType,
    order_id: &mut i64,
    transaction_id: &mut String,
) -> Result<(RequestResultType, String), ClientError> {
    let doc = interpret::parse(body)?;

    // the round trip worked and the body parsed; anything worse than a
    // per-node business error downgrades from here
    let mut result = RequestResultType::Success;
    let mut error = "none".to_string();

    for node in interpret::select_nodes(&doc, ORDER_RESULT_PATH) {
        match interpret::read_field_or_exception(node, "OrderID")? {
            NodeField::Value(raw) => {
                *order_id = raw.parse().map_err(|_| {
                    ClientError::MalformedResponse(format!("OrderID is not numeric: `{raw}`"))
                })?;
                if order_type.is_message_class() {
                    match interpret::read_field_or_exception(node, "transactionID")? {
                        NodeField::Value(tx) => *transaction_id = tx,
                        NodeField::Exception(reason) => {
                            result = RequestResultType::Error;
                            error = reason;
                        }
                    }
                }
            }
            NodeField::Exception(reason) => {
                result = RequestResultType::Error;
                error = reason;
            }
        }
    }
    Ok((result, error))
}

fn read_template_result(
    body: &str,
    template_id: &mut i64,
) -> Result<(RequestResultType, String), ClientError> {
    let doc = interpret::parse(body)?;

    let nodes = interpret::select_nodes(&doc, TEMPLATES_PATH);
    if nodes.is_empty() {
        // the submission was refused outright; the reason lives on a
        // single top-level error node
        let error_node = interpret::select_nodes(&doc, TEMPLATE_RESULT_PATH)
            .into_iter()
            .next()
            .ok_or(ClientError::InconsistentResponse { field: "TemplateID" })?;
        let reason = interpret::child_text(error_node, "Exception")
            .ok_or(ClientError::InconsistentResponse { field: "Exception" })?;
        return Ok((RequestResultType::Error, reason));
    }

    let mut result = RequestResultType::Success;
    let mut error = "none".to_string();
    for node in nodes {
        match interpret::read_field_or_exception(node, "TemplateID")? {
            NodeField::Value(raw) => {
                *template_id = raw.parse().map_err(|_| {
                    ClientError::MalformedResponse(format!("TemplateID is not numeric: `{raw}`"))
                })?;
            }
            NodeField::Exception(reason) => {
                result = RequestResultType::Error;
                error = reason;
            }
        }
    }
    Ok((result, error))
}

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::SessionStore;
use crate::config::ClientConfig;
use crate::models::{
    BackendMessage, BulkRefund, BulkStatusUpdate, EmailVerification, Event, EventDetailsReport,
    Payment, PaymentStatus, RefundRequest, RegisterRequest, Reminder, ResendVerification,
    ReviewDecision, RoleRequest, RoleRequestSubmission, SummaryReport, Ticket, User,
    VerificationResponse,
};

/// ApiError
///
/// Failure taxonomy of the REST client: either the request never completed, or
/// the backend answered with a non-success status (whose `{message}` body is
/// surfaced when present).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("backend rejected request ({status}): {message}")]
    Status { status: u16, message: String },
}

/// ReportFormat
///
/// Output format selector for the tabular report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// ApiClient
///
/// Thin typed wrapper over the EventMan REST backend. Every outgoing request
/// attaches the stored token as a bearer credential when one is held;
/// otherwise the request is sent unauthenticated and the backend, not this
/// layer, rejects it. The client performs no authorization of its own — UI
/// guards decide what to *show*, the backend decides what to *allow*.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            session,
        }
    }

    /// request
    ///
    /// Builds a request for `path` with the bearer credential applied from the
    /// live session. Exposed so callers with endpoints this client does not
    /// model can still go through the authenticated channel.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a built request and decodes a JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))
        } else {
            Err(self.status_error(status, response).await)
        }
    }

    /// Sends a built request and returns the raw text body (reports).
    async fn execute_text(&self, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))
        } else {
            Err(self.status_error(status, response).await)
        }
    }

    async fn status_error(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let message = response
            .json::<BackendMessage>()
            .await
            .map(|m| m.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            });
        tracing::debug!(status = status.as_u16(), %message, "backend rejected request");
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    // --- Generic CRUD helpers ---

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    /// Deletes return the backend's `{message}` confirmation body.
    async fn delete_json(&self, path: &str) -> Result<BackendMessage, ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    // --- Auth ---

    /// POST /api/auth/register. Login itself lives on the SessionStore.
    pub async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value, ApiError> {
        self.post_json("/api/auth/register", request).await
    }

    /// POST /api/auth/verify-email. A token in the response means the backend
    /// logged the account in as part of verification.
    pub async fn verify_email(
        &self,
        email: &str,
        code: &str,
        reason: &str,
    ) -> Result<VerificationResponse, ApiError> {
        let payload = EmailVerification {
            email: email.to_string(),
            code: code.to_string(),
            reason: reason.to_string(),
        };
        self.post_json("/api/auth/verify-email", &payload).await
    }

    /// POST /api/auth/resend-verification.
    pub async fn resend_verification(&self, email: &str) -> Result<BackendMessage, ApiError> {
        let payload = ResendVerification {
            email: email.to_string(),
        };
        self.post_json("/api/auth/resend-verification", &payload)
            .await
    }

    // --- Events ---

    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/api/events").await
    }

    pub async fn event(&self, id: i64) -> Result<Event, ApiError> {
        self.get_json(&format!("/api/events/{}", id)).await
    }

    pub async fn create_event(&self, event: &Event) -> Result<Event, ApiError> {
        self.post_json("/api/events", event).await
    }

    pub async fn update_event(&self, id: i64, event: &Event) -> Result<Event, ApiError> {
        self.put_json(&format!("/api/events/{}", id), event).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/events/{}", id)).await
    }

    // --- Users ---

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/users").await
    }

    pub async fn user(&self, id: i64) -> Result<User, ApiError> {
        self.get_json(&format!("/api/users/{}", id)).await
    }

    pub async fn create_user(&self, user: &User) -> Result<User, ApiError> {
        self.post_json("/api/users", user).await
    }

    pub async fn update_user(&self, id: i64, user: &User) -> Result<User, ApiError> {
        self.put_json(&format!("/api/users/{}", id), user).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/users/{}", id)).await
    }

    // --- Tickets ---

    pub async fn tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.get_json("/api/tickets").await
    }

    pub async fn ticket(&self, id: i64) -> Result<Ticket, ApiError> {
        self.get_json(&format!("/api/tickets/{}", id)).await
    }

    pub async fn create_ticket(&self, ticket: &Ticket) -> Result<Ticket, ApiError> {
        self.post_json("/api/tickets", ticket).await
    }

    pub async fn update_ticket(&self, id: i64, ticket: &Ticket) -> Result<Ticket, ApiError> {
        self.put_json(&format!("/api/tickets/{}", id), ticket).await
    }

    pub async fn delete_ticket(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/tickets/{}", id)).await
    }

    // --- Payments ---

    pub async fn payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.get_json("/api/payments").await
    }

    pub async fn payment(&self, id: i64) -> Result<Payment, ApiError> {
        self.get_json(&format!("/api/payments/{}", id)).await
    }

    pub async fn create_payment(&self, payment: &Payment) -> Result<Payment, ApiError> {
        self.post_json("/api/payments", payment).await
    }

    pub async fn update_payment(&self, id: i64, payment: &Payment) -> Result<Payment, ApiError> {
        self.put_json(&format!("/api/payments/{}", id), payment)
            .await
    }

    pub async fn delete_payment(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/payments/{}", id)).await
    }

    /// PUT /api/payments/{id}/status?status=... — status travels as a query
    /// parameter, not a body.
    pub async fn update_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
    ) -> Result<Payment, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/api/payments/{}/status", id))
            .query(&[("status", status.as_str())]);
        self.execute(builder).await
    }

    pub async fn refund_payment(
        &self,
        id: i64,
        refund: &RefundRequest,
    ) -> Result<Payment, ApiError> {
        self.post_json(&format!("/api/payments/{}/refund", id), refund)
            .await
    }

    pub async fn bulk_update_payment_status(
        &self,
        update: &BulkStatusUpdate,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json("/api/payments/bulk/status", update).await
    }

    pub async fn bulk_refund_payments(
        &self,
        refund: &BulkRefund,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json("/api/payments/bulk/refund", refund).await
    }

    pub async fn search_payments(&self, query: &str) -> Result<Vec<Payment>, ApiError> {
        let builder = self
            .request(Method::GET, "/api/payments/search")
            .query(&[("query", query)]);
        self.execute(builder).await
    }

    // --- Reminders ---

    pub async fn reminders(&self) -> Result<Vec<Reminder>, ApiError> {
        self.get_json("/api/reminders").await
    }

    pub async fn reminder(&self, id: i64) -> Result<Reminder, ApiError> {
        self.get_json(&format!("/api/reminders/{}", id)).await
    }

    pub async fn create_reminder(&self, reminder: &Reminder) -> Result<Reminder, ApiError> {
        self.post_json("/api/reminders", reminder).await
    }

    pub async fn update_reminder(&self, id: i64, reminder: &Reminder) -> Result<Reminder, ApiError> {
        self.put_json(&format!("/api/reminders/{}", id), reminder)
            .await
    }

    pub async fn delete_reminder(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/reminders/{}", id)).await
    }

    // --- Role Requests ---

    pub async fn submit_role_request(
        &self,
        submission: &RoleRequestSubmission,
    ) -> Result<RoleRequest, ApiError> {
        self.post_json("/api/role-requests", submission).await
    }

    pub async fn role_requests_for_user(&self, user_id: i64) -> Result<Vec<RoleRequest>, ApiError> {
        self.get_json(&format!("/api/role-requests/user/{}", user_id))
            .await
    }

    pub async fn role_requests(&self) -> Result<Vec<RoleRequest>, ApiError> {
        self.get_json("/api/role-requests").await
    }

    pub async fn pending_role_requests(&self) -> Result<Vec<RoleRequest>, ApiError> {
        self.get_json("/api/role-requests/pending").await
    }

    pub async fn role_request(&self, id: i64) -> Result<RoleRequest, ApiError> {
        self.get_json(&format!("/api/role-requests/{}", id)).await
    }

    /// Admin review actions. The backend re-validates that the acting user is
    /// an admin; the client guard merely kept the buttons hidden.
    pub async fn approve_role_request(
        &self,
        id: i64,
        decision: &ReviewDecision,
    ) -> Result<RoleRequest, ApiError> {
        self.put_json(&format!("/api/role-requests/{}/approve", id), decision)
            .await
    }

    pub async fn reject_role_request(
        &self,
        id: i64,
        decision: &ReviewDecision,
    ) -> Result<RoleRequest, ApiError> {
        self.put_json(&format!("/api/role-requests/{}/reject", id), decision)
            .await
    }

    pub async fn delete_role_request(&self, id: i64) -> Result<BackendMessage, ApiError> {
        self.delete_json(&format!("/api/role-requests/{}", id)).await
    }

    // --- Reports ---

    /// The tabular reports return their body as raw text: JSON when `Json` is
    /// requested, CSV rows when `Csv` is.
    pub async fn events_report(&self, format: ReportFormat) -> Result<String, ApiError> {
        let builder = self
            .request(Method::GET, "/api/reports/events")
            .query(&[("format", format.as_str())]);
        self.execute_text(builder).await
    }

    pub async fn users_report(&self, format: ReportFormat) -> Result<String, ApiError> {
        let builder = self
            .request(Method::GET, "/api/reports/users")
            .query(&[("format", format.as_str())]);
        self.execute_text(builder).await
    }

    pub async fn tickets_report(&self, format: ReportFormat) -> Result<String, ApiError> {
        let builder = self
            .request(Method::GET, "/api/reports/tickets")
            .query(&[("format", format.as_str())]);
        self.execute_text(builder).await
    }

    /// Payments report, optionally constrained to a created-at date range.
    pub async fn payments_report(
        &self,
        format: ReportFormat,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<String, ApiError> {
        let mut builder = self
            .request(Method::GET, "/api/reports/payments")
            .query(&[("format", format.as_str())]);
        if let Some((start, end)) = range {
            builder = builder.query(&[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ]);
        }
        self.execute_text(builder).await
    }

    pub async fn summary_report(&self) -> Result<SummaryReport, ApiError> {
        self.get_json("/api/reports/summary").await
    }

    pub async fn event_details_report(&self, event_id: i64) -> Result<EventDetailsReport, ApiError> {
        self.get_json(&format!("/api/reports/event/{}/details", event_id))
            .await
    }
}

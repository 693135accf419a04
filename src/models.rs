use serde::{Deserialize, Serialize};

// --- Identity & Session Schemas ---

/// Role
///
/// The RBAC tag carried by every session. The wire form is the bare upper-case
/// name ("ADMIN", "ORGANIZER", "ATTENDEE"); any `ROLE_` decoration the backend
/// emits is stripped by the auth adapter before a `Role` is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Organizer,
    Attendee,
}

impl Role {
    /// Parses the bare (already un-prefixed) wire name. Unknown names yield
    /// `None` — callers drop them rather than failing the whole role set.
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            "ADMIN" => Some(Role::Admin),
            "ORGANIZER" => Some(Role::Organizer),
            "ATTENDEE" => Some(Role::Attendee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Organizer => "ORGANIZER",
            Role::Attendee => "ATTENDEE",
        }
    }
}

/// Session
///
/// The authenticated identity held by the SessionStore and persisted locally.
/// The serialized layout matches what the original front end wrote to browser
/// local storage under the "user" key: `{id, email, name, roles, token}`.
///
/// Role order is preserved as received — content selection iterates roles in
/// their stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: i64,
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub roles: Vec<Role>,
    /// Opaque bearer credential. Never inspected client-side.
    #[serde(rename = "token")]
    pub auth_token: String,
}

/// LoginRequest
///
/// Payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// LoginResponse
///
/// Raw success payload from POST /api/auth/login. Roles arrive as strings,
/// possibly `ROLE_`-prefixed, and are normalized by the auth adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub token: String,
}

/// BackendMessage
///
/// The uniform `{message}` error/confirmation body the backend returns for
/// rejected requests and for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendMessage {
    pub message: String,
}

/// RegisterRequest
///
/// Payload for POST /api/auth/register. New registrations are always created
/// as attendees server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// EmailVerification
///
/// Payload for POST /api/auth/verify-email. `reason` carries the free-text
/// justification a user supplies when the code was requested for a role
/// upgrade; plain account verification sends it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerification {
    pub email: String,
    pub code: String,
    pub reason: String,
}

/// Payload for POST /api/auth/resend-verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerification {
    pub email: String,
}

/// VerificationResponse
///
/// Success body of POST /api/auth/verify-email. When the backend issues a
/// token alongside the confirmation, the verified account is effectively
/// logged in and the caller can adopt it as a session; otherwise only the
/// confirmation message came back and the user logs in normally.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<VerifiedUser>,
}

/// Account fields returned with a token-bearing verification response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

// --- Core Resource Schemas (Mapped to the REST backend) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Published,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Conference,
    Wedding,
    Festival,
    Webinar,
    Workshop,
    Concert,
    Other,
}

/// Event
///
/// An event record as served by GET /api/events. The same shape doubles as the
/// create/update payload (with `id` absent), so every field beyond the name is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub status: Option<EventStatus>,
    pub organizer_id: Option<i64>,
    pub organizer_name: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Active,
    SoldOut,
    Cancelled,
    Expired,
}

/// Ticket
///
/// A ticket tier attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub quantity_available: Option<i32>,
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub status: Option<TicketStatus>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
    Cash,
    Other,
}

/// Payment
///
/// A payment record, denormalized with user/event/ticket display fields the way
/// the backend serves it to the admin payment tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub ticket_id: Option<i64>,
    pub ticket_name: Option<String>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderType {
    Email,
    Sms,
    PushNotification,
    InApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
    Cancelled,
}

/// Reminder
///
/// A scheduled notification tied to a user and (optionally) an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<ReminderType>,
    pub status: Option<ReminderStatus>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub scheduled_time: Option<String>,
    pub sent_time: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// User
///
/// A user account record as served by GET /api/users. Distinct from `Session`:
/// this is directory data about *other* users, with a single account role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub created_at: Option<String>,
}

// --- Role Request Schemas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// RoleRequest
///
/// A pending or reviewed role-upgrade request (e.g. an attendee asking to
/// become an organizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub requested_role: Option<String>,
    pub current_role: Option<String>,
    pub status: Option<RequestStatus>,
    pub reason: Option<String>,
    pub admin_notes: Option<String>,
    pub requested_at: Option<String>,
    pub reviewed_at: Option<String>,
    pub reviewed_by_name: Option<String>,
}

/// RoleRequestSubmission
///
/// Payload for POST /api/role-requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequestSubmission {
    pub user_id: i64,
    pub requested_role: String,
    pub reason: String,
}

/// ReviewDecision
///
/// Payload for PUT /api/role-requests/{id}/approve and .../reject. The backend
/// re-validates that the acting admin exists and holds the ADMIN role; the
/// client-side guard merely hides the buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    pub admin_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

// --- Payment Action Payloads ---

/// RefundRequest
///
/// Payload for POST /api/payments/{id}/refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub reason: String,
}

/// BulkStatusUpdate
///
/// Payload for POST /api/payments/bulk/status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusUpdate {
    pub payment_ids: Vec<i64>,
    pub status: PaymentStatus,
}

/// BulkRefund
///
/// Payload for POST /api/payments/bulk/refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRefund {
    pub payment_ids: Vec<i64>,
    pub reason: String,
}

// --- Report Schemas (Output) ---

/// SummaryReport
///
/// Output of GET /api/reports/summary — the cross-resource counters behind the
/// admin dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_events: i64,
    pub active_events: i64,
    pub completed_events: i64,
    pub total_users: i64,
    pub admin_users: i64,
    pub organizer_users: i64,
    pub attendee_users: i64,
    pub total_payments: i64,
    pub completed_payments: i64,
    pub total_revenue: f64,
    pub total_tickets: i64,
    pub active_tickets: i64,
}

/// EventDetailsReport
///
/// Output of GET /api/reports/event/{id}/details — an event with its tickets,
/// payments, and aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsReport {
    pub event: Event,
    pub tickets: Vec<Ticket>,
    pub total_tickets: i64,
    pub payments: Vec<Payment>,
    pub total_payments: i64,
    pub total_revenue: f64,
}

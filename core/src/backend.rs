// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Contracts of the remote collaborators: metadata, contacts and events.

use async_trait::async_trait;
use jiff::civil::{Date, Time};

use crate::draft::Booking;
use crate::picklist::PicklistCatalog;
use crate::types::{ContactId, EventId, RecordTypeId};

/// Object description returned by the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Record type used when none is specified.
    pub default_record_type_id: RecordTypeId,
}

/// Reads object and picklist metadata.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Describes an object.
    async fn object_info(&self, object: &str) -> Result<ObjectInfo, RemoteError>;

    /// Picklist metadata of a field for a record type.
    async fn picklist_values(
        &self,
        object: &str,
        record_type_id: &RecordTypeId,
        field: &str,
    ) -> Result<PicklistCatalog, RemoteError>;
}

/// Finds a contact matching the given details, creating one if none exists.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Returns the identifier of the matching or newly created contact.
    async fn find_or_create_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactId, RemoteError>;
}

/// Creates calendar events for appointments.
#[async_trait]
pub trait EventScheduler: Send + Sync {
    /// Returns the identifier of the created event.
    async fn create_event(&self, request: &EventRequest) -> Result<EventId, RemoteError>;
}

/// Payload of the find-or-create-contact call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactRequest {
    /// Email address.
    pub email: String,

    /// Full name.
    pub name: String,

    /// Phone number.
    pub phone: String,
}

impl From<&Booking> for ContactRequest {
    fn from(booking: &Booking) -> Self {
        Self {
            email: booking.contact.email.clone(),
            name: booking.contact.name.clone(),
            phone: booking.contact.phone.clone(),
        }
    }
}

/// Payload of the create-event call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Contact the event is booked for.
    pub contact_id: ContactId,

    /// Appointment date.
    pub selected_date: Date,

    /// Clinic value.
    pub selected_center: String,

    /// Specialist value.
    pub selected_specialist: String,

    /// Appointment time.
    pub selected_time: Time,

    /// Email address.
    pub email: String,

    /// Full name.
    pub name: String,

    /// Phone number.
    pub phone: String,

    /// Comments entered on the contact screen.
    pub comment: String,
}

impl EventRequest {
    /// Builds the request for a booking and the contact it belongs to.
    pub fn new(contact_id: ContactId, booking: &Booking) -> Self {
        Self {
            contact_id,
            selected_date: booking.date,
            selected_center: booking.center.clone(),
            selected_specialist: booking.specialist.clone(),
            selected_time: booking.time,
            email: booking.contact.email.clone(),
            name: booking.contact.name.clone(),
            phone: booking.contact.phone.clone(),
            comment: booking.contact.comments.clone(),
        }
    }
}

/// Structured error body returned by a collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ErrorBody {
    /// Human readable message, if the collaborator provided one.
    #[serde(default)]
    pub message: Option<String>,
}

/// A failed remote call.
///
/// Network failures and rejections by the collaborator are not distinguished beyond the
/// optional status and body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Remote call failed: {detail}")]
pub struct RemoteError {
    /// HTTP status or equivalent, if a response was received.
    pub status: Option<u16>,

    /// Structured error body, if any.
    pub body: Option<ErrorBody>,

    /// Description of the failure for logs.
    pub detail: String,
}

impl RemoteError {
    /// A failure with no response body.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            detail: detail.into(),
        }
    }

    /// A failure carrying a structured message.
    pub fn with_message(detail: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(detail).body(ErrorBody {
            message: Some(message.into()),
        })
    }

    /// Sets the status.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: ErrorBody) -> Self {
        self.body = Some(body);
        self
    }

    /// The structured message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Two-step submission: find or create the contact, then create the event.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::{ContactDirectory, ContactRequest, EventRequest, EventScheduler, RemoteError};
use crate::draft::Booking;
use crate::notification::{Notification, NotificationSink};
use crate::types::{ContactId, EventId};
use crate::wizard::Screen;

/// Message of the success notification.
pub const SUCCESS_MESSAGE: &str = "Appointment created successfully";

/// Prefix of every submission error notification.
pub const ERROR_PREFIX: &str = "An error occurred while creating the appointment: ";

/// Used when a remote error carries no message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Error message not available";

/// Identifiers created by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Matched or created contact.
    pub contact_id: ContactId,

    /// Created event.
    pub event_id: EventId,
}

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The contact service answered without an identifier.
    #[error("Contact identifier not returned")]
    MissingContactId,

    /// Another submission is still running.
    #[error("A submission is already in progress")]
    InFlight,

    /// Submit was requested before reaching the summary.
    #[error("Cannot submit from the {0} screen")]
    NotReady(Screen),
}

impl SubmissionError {
    /// Message shown to the user, without the notification prefix.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Remote(e) => e.message().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string(),
            _ => self.to_string(),
        }
    }
}

/// Outcome of a submission.
pub type SubmissionResult = Result<Receipt, SubmissionError>;

/// Notification describing a submission result.
pub fn notification_for(result: &SubmissionResult) -> Notification {
    match result {
        Ok(_) => Notification::success(SUCCESS_MESSAGE),
        Err(e) => Notification::error(format!("{ERROR_PREFIX}{}", e.user_message())),
    }
}

/// Runs submissions against a backend, one at a time.
#[derive(Debug)]
pub struct SubmissionCoordinator<B> {
    backend: B,
    in_flight: AtomicBool,
}

impl<B: ContactDirectory + EventScheduler> SubmissionCoordinator<B> {
    /// Creates a coordinator for the backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The backend calls are made against.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a submission is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the booking and emits exactly one notification for the result.
    ///
    /// A call made while another submission is running is rejected with
    /// [`SubmissionError::InFlight`] and emits nothing.
    pub async fn submit(
        &self,
        booking: &Booking,
        sink: &impl NotificationSink,
    ) -> SubmissionResult {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!("submission rejected, another one is in flight");
            return Err(SubmissionError::InFlight);
        };

        let result = self.run(booking).await;
        match &result {
            Ok(receipt) => tracing::info!(
                contact_id = %receipt.contact_id,
                event_id = %receipt.event_id,
                "appointment created"
            ),
            Err(e) => tracing::error!(error = %e, "failed to create appointment"),
        }

        sink.notify(notification_for(&result));
        result
    }

    async fn run(&self, booking: &Booking) -> SubmissionResult {
        tracing::debug!("finding or creating contact...");
        let contact_id = self
            .backend
            .find_or_create_contact(&ContactRequest::from(booking))
            .await?;

        if contact_id.is_empty() {
            return Err(SubmissionError::MissingContactId);
        }

        tracing::debug!(%contact_id, "creating event...");
        let request = EventRequest::new(contact_id.clone(), booking);
        let event_id = self.backend.create_event(&request).await?;

        Ok(Receipt {
            contact_id,
            event_id,
        })
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the Clinibook appointment wizard: the screen state machine, the booking draft,
//! cascading picklists and the submission of a booking to the remote collaborators.

mod backend;
mod config;
mod draft;
mod notification;
mod picklist;
mod session;
mod submission;
mod types;
mod wizard;

pub use crate::backend::{
    ContactDirectory, ContactRequest, ErrorBody, EventRequest, EventScheduler, MetadataLookup,
    ObjectInfo, RemoteError,
};
pub use crate::config::{APP_NAME, Config};
pub use crate::draft::{Booking, BookingDraft, ContactInfo};
pub use crate::notification::{Notification, NotificationSink, Severity};
pub use crate::picklist::{ControllerKey, PicklistCatalog, PicklistValue};
pub use crate::session::BookingSession;
pub use crate::submission::{
    ERROR_PREFIX, FALLBACK_ERROR_MESSAGE, Receipt, SUCCESS_MESSAGE, SubmissionCoordinator,
    SubmissionError, SubmissionResult, notification_for,
};
pub use crate::types::{ContactId, EventId, RecordTypeId};
pub use crate::wizard::{Screen, ScreenFlags, ValidationError, Wizard, WizardError};

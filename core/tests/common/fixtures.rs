// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::sync::Mutex;

use async_trait::async_trait;
use clinibook_core::{
    BookingSession, ContactDirectory, ContactId, ContactRequest, ControllerKey, EventId,
    EventRequest, EventScheduler, MetadataLookup, Notification, NotificationSink, ObjectInfo,
    PicklistCatalog, PicklistValue, RecordTypeId, RemoteError, Screen,
};
use jiff::civil::{date, time};

/// Keeps every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingSink(pub RefCell<Vec<Notification>>);

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

/// In-memory stand-in for the remote services.
#[derive(Debug)]
pub struct FakeRemote {
    pub contact: Result<ContactId, RemoteError>,
    pub event: Result<EventId, RemoteError>,
    pub picklist_calls: Mutex<Vec<String>>,
    pub events: Mutex<Vec<EventRequest>>,
}

impl Default for FakeRemote {
    fn default() -> Self {
        Self {
            contact: Ok("003000000000001".into()),
            event: Ok("00U000000000001".into()),
            picklist_calls: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetadataLookup for FakeRemote {
    async fn object_info(&self, _object: &str) -> Result<ObjectInfo, RemoteError> {
        Ok(ObjectInfo {
            default_record_type_id: RecordTypeId::from("012000000000000AAA"),
        })
    }

    async fn picklist_values(
        &self,
        _object: &str,
        _record_type_id: &RecordTypeId,
        field: &str,
    ) -> Result<PicklistCatalog, RemoteError> {
        self.picklist_calls.lock().unwrap().push(field.to_string());
        match field {
            "Clinic__c" => Ok(clinics()),
            _ => Ok(specialists()),
        }
    }
}

#[async_trait]
impl ContactDirectory for FakeRemote {
    async fn find_or_create_contact(
        &self,
        _request: &ContactRequest,
    ) -> Result<ContactId, RemoteError> {
        self.contact.clone()
    }
}

#[async_trait]
impl EventScheduler for FakeRemote {
    async fn create_event(&self, request: &EventRequest) -> Result<EventId, RemoteError> {
        self.events.lock().unwrap().push(request.clone());
        self.event.clone()
    }
}

pub fn clinics() -> PicklistCatalog {
    PicklistCatalog::new(
        vec![
            PicklistValue::new("Norte"),
            PicklistValue::new("Sur"),
        ],
        [],
    )
}

pub fn specialists() -> PicklistCatalog {
    PicklistCatalog::new(
        vec![
            PicklistValue::new("Dermatology").valid_for([0, 1]),
            PicklistValue::new("Cardiology").valid_for([1]),
            PicklistValue::new("Pediatrics").valid_for([0]),
        ],
        [
            ("Norte".to_string(), ControllerKey::new(0)),
            ("Sur".to_string(), ControllerKey::new(1)),
        ],
    )
}

/// Completes every screen and stops on the summary.
pub fn fill_to_summary<N: NotificationSink>(session: &mut BookingSession<N>) {
    session.set_date(Some(date(2026, 5, 4)));
    session.select_clinic("Sur");
    session.select_specialist("Cardiology");
    session.next().unwrap();

    session.set_time(Some(time(16, 15, 0, 0)));
    session.next().unwrap();

    session.set_name("Lucía Gómez");
    session.set_email("lucia@example.com");
    session.set_phone("600112233");
    session.set_comments("Bring previous ECG");
    assert_eq!(session.next(), Ok(Screen::Summary));
}

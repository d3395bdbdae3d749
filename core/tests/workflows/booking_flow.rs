// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end booking workflows, from loading the picklists to the submission notification.

use clinibook_core::{
    BookingSession, Config, ERROR_PREFIX, RemoteError, SUCCESS_MESSAGE, Screen, Severity,
    SubmissionCoordinator, SubmissionError,
};

use crate::common::{FakeRemote, RecordingSink, fill_to_summary};

fn config() -> Config {
    Config {
        object: "Event".to_string(),
        clinic_field: "Clinic__c".to_string(),
        specialist_field: "Specialist__c".to_string(),
    }
}

#[tokio::test]
async fn booking_flow_success() {
    // Arrange
    let remote = FakeRemote::default();
    let sink = RecordingSink::default();
    let mut session = BookingSession::load(config(), &remote, &sink).await.unwrap();
    let coordinator = SubmissionCoordinator::new(FakeRemote::default());

    // Act
    fill_to_summary(&mut session);
    let receipt = session.submit(&coordinator).await.unwrap();

    // Assert
    assert_eq!(receipt.event_id.as_str(), "00U000000000001");
    assert_eq!(session.result_message(), None);

    let events = coordinator.backend().events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].selected_center, "Sur");
    assert_eq!(events[0].selected_specialist, "Cardiology");
    assert_eq!(events[0].contact_id.as_str(), "003000000000001");

    let notes = sink.0.borrow();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Success);
    assert_eq!(notes[0].message, SUCCESS_MESSAGE);
}

#[tokio::test]
async fn booking_flow_loads_both_picklists_once() {
    let remote = FakeRemote::default();
    let session = BookingSession::load(config(), &remote, RecordingSink::default())
        .await
        .unwrap();

    let calls = remote.picklist_calls.lock().unwrap();
    assert_eq!(*calls, vec!["Clinic__c", "Specialist__c"]);
    assert_eq!(session.clinic_options().len(), 2);
    assert!(session.specialist_options().is_empty());
}

#[tokio::test]
async fn booking_flow_validation_messages() {
    let remote = FakeRemote::default();
    let sink = RecordingSink::default();
    let mut session = BookingSession::load(config(), &remote, &sink).await.unwrap();

    session.set_date(Some(jiff::civil::date(2026, 5, 4)));
    session.select_clinic("Norte");
    assert!(session.next().is_err());

    session.select_specialist("Pediatrics");
    assert_eq!(session.next(), Ok(Screen::TimeSlot));
    assert!(session.next().is_err());

    let messages: Vec<_> = sink.0.borrow().iter().map(|a| a.message.clone()).collect();
    assert_eq!(
        messages,
        vec!["Please complete all fields", "Please complete the time field"]
    );
}

#[tokio::test]
async fn booking_flow_remote_failure_keeps_summary() {
    // Arrange
    let remote = FakeRemote::default();
    let sink = RecordingSink::default();
    let mut session = BookingSession::load(config(), &remote, &sink).await.unwrap();
    let coordinator = SubmissionCoordinator::new(FakeRemote {
        event: Err(RemoteError::with_message("500", "Specialist unavailable").status(500)),
        ..FakeRemote::default()
    });

    // Act
    fill_to_summary(&mut session);
    let err = session.submit(&coordinator).await.unwrap_err();

    // Assert
    assert!(matches!(err, SubmissionError::Remote(_)));
    assert_eq!(session.screen(), Screen::Summary);
    assert_eq!(session.result_message(), Some("Specialist unavailable"));

    let notes = sink.0.borrow();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert_eq!(
        notes[0].message,
        format!("{ERROR_PREFIX}Specialist unavailable")
    );
}

#[tokio::test]
async fn booking_flow_back_clears_selection() {
    let remote = FakeRemote::default();
    let mut session = BookingSession::load(config(), &remote, RecordingSink::default())
        .await
        .unwrap();

    fill_to_summary(&mut session);
    assert_eq!(session.back(), Ok(Screen::ContactInfo));
    assert!(session.draft().contact.name.is_empty());

    assert_eq!(session.back(), Ok(Screen::TimeSlot));
    assert_eq!(session.draft().selected_time, None);

    assert_eq!(session.back(), Ok(Screen::DateSelection));
    assert_eq!(session.draft().selected_center, None);
    assert!(session.specialist_options().is_empty());
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The booking session: one wizard, its picklists and the notifications it raises.

use jiff::civil::{Date, Time};

use crate::backend::{ContactDirectory, EventScheduler, MetadataLookup, RemoteError};
use crate::config::Config;
use crate::draft::{Booking, BookingDraft};
use crate::notification::{Notification, NotificationSink};
use crate::picklist::{PicklistCatalog, PicklistValue};
use crate::submission::{SubmissionCoordinator, SubmissionError, SubmissionResult};
use crate::types::RecordTypeId;
use crate::wizard::{Screen, ScreenFlags, Wizard, WizardError};

/// Controller of a single booking session.
///
/// Owns the wizard state exclusively; field handlers, navigation and submission all go
/// through it.
#[derive(Debug)]
pub struct BookingSession<N> {
    config: Config,
    wizard: Wizard,
    record_type_id: Option<RecordTypeId>,
    clinics: PicklistCatalog,
    specialists: PicklistCatalog,
    specialist_options: Vec<PicklistValue>,
    result_message: Option<String>,
    sink: N,
}

impl<N: NotificationSink> BookingSession<N> {
    /// Creates a session with empty picklists.
    pub fn new(config: Config, sink: N) -> Self {
        Self {
            config,
            wizard: Wizard::new(),
            record_type_id: None,
            clinics: PicklistCatalog::default(),
            specialists: PicklistCatalog::default(),
            specialist_options: Vec::new(),
            result_message: None,
            sink,
        }
    }

    /// Creates a session and loads its picklists from the metadata service.
    pub async fn load(
        config: Config,
        metadata: &impl MetadataLookup,
        sink: N,
    ) -> Result<Self, RemoteError> {
        let info = metadata.object_info(&config.object).await?;
        let mut session = Self::new(config, sink);
        session
            .reload_picklists(metadata, info.default_record_type_id)
            .await?;
        Ok(session)
    }

    /// Uses the given catalogs instead of loading them.
    #[must_use]
    pub fn with_catalogs(mut self, clinics: PicklistCatalog, specialists: PicklistCatalog) -> Self {
        self.clinics = clinics;
        self.specialists = specialists;
        self.refresh_specialist_options();
        self
    }

    /// Reloads both picklists when the record type changes.
    pub async fn reload_picklists(
        &mut self,
        metadata: &impl MetadataLookup,
        record_type_id: RecordTypeId,
    ) -> Result<(), RemoteError> {
        if self.record_type_id.as_ref() == Some(&record_type_id) {
            tracing::debug!(%record_type_id, "record type unchanged, keeping picklists");
            return Ok(());
        }

        tracing::debug!(%record_type_id, "loading picklists...");
        let object = &self.config.object;
        let clinics = metadata
            .picklist_values(object, &record_type_id, &self.config.clinic_field)
            .await?;
        let specialists = metadata
            .picklist_values(object, &record_type_id, &self.config.specialist_field)
            .await?;

        self.clinics = clinics;
        self.specialists = specialists;
        self.record_type_id = Some(record_type_id);
        self.refresh_specialist_options();
        self.clear_stale_specialist();
        Ok(())
    }

    /// Core configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The active screen.
    pub fn screen(&self) -> Screen {
        self.wizard.screen()
    }

    /// Boolean view of the active screen.
    pub fn flags(&self) -> ScreenFlags {
        self.wizard.screen().flags()
    }

    /// The draft being edited.
    pub fn draft(&self) -> &BookingDraft {
        self.wizard.draft()
    }

    /// All clinics.
    pub fn clinic_options(&self) -> &[PicklistValue] {
        &self.clinics.values
    }

    /// Specialists valid for the selected clinic.
    pub fn specialist_options(&self) -> &[PicklistValue] {
        &self.specialist_options
    }

    /// Full specialist catalog.
    pub fn specialist_catalog(&self) -> &PicklistCatalog {
        &self.specialists
    }

    /// Message of the last failed submission.
    pub fn result_message(&self) -> Option<&str> {
        self.result_message.as_deref()
    }

    /// The sink notifications are sent to.
    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Consumes the session, returning its sink.
    pub fn into_sink(self) -> N {
        self.sink
    }

    /// Sets the appointment date.
    pub fn set_date(&mut self, date: Option<Date>) {
        self.wizard.draft_mut().selected_date = date;
    }

    /// Selects a clinic and recomputes the specialists valid for it.
    ///
    /// A selected specialist that is not valid for the new clinic is cleared.
    pub fn select_clinic(&mut self, clinic: impl Into<String>) {
        let clinic = clinic.into();
        self.wizard.draft_mut().selected_center = (!clinic.is_empty()).then_some(clinic);
        self.refresh_specialist_options();
        self.clear_stale_specialist();
    }

    /// Selects a specialist.
    pub fn select_specialist(&mut self, specialist: impl Into<String>) {
        let specialist = specialist.into();
        self.wizard.draft_mut().selected_specialist =
            (!specialist.is_empty()).then_some(specialist);
    }

    /// Sets the appointment time.
    pub fn set_time(&mut self, time: Option<Time>) {
        self.wizard.draft_mut().selected_time = time;
    }

    /// Sets the contact name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.wizard.draft_mut().contact.name = name.into();
    }

    /// Sets the contact email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.wizard.draft_mut().contact.email = email.into();
    }

    /// Sets the contact phone.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.wizard.draft_mut().contact.phone = phone.into();
    }

    /// Sets the comments.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.wizard.draft_mut().contact.comments = comments.into();
    }

    /// Moves to the next screen, notifying the user when the current screen is incomplete.
    pub fn next(&mut self) -> Result<Screen, WizardError> {
        let result = self.wizard.next();
        match &result {
            Err(WizardError::Invalid(e)) => self.sink.notify(Notification::error(e.to_string())),
            Err(e) => tracing::debug!(error = %e, "next ignored"),
            Ok(_) => {}
        }
        result
    }

    /// Moves to the previous screen.
    pub fn back(&mut self) -> Result<Screen, WizardError> {
        let result = self.wizard.back();
        if let Err(e) = &result {
            tracing::debug!(error = %e, "back ignored");
        }

        if self.wizard.screen() == Screen::DateSelection {
            self.refresh_specialist_options();
        }
        result
    }

    /// The validated booking, once the summary screen is reached.
    pub fn booking(&self) -> Option<Booking> {
        self.wizard.booking()
    }

    /// Submits the booking shown on the summary screen.
    pub async fn submit<B>(&mut self, coordinator: &SubmissionCoordinator<B>) -> SubmissionResult
    where
        B: ContactDirectory + EventScheduler,
    {
        let Some(booking) = self.booking() else {
            return Err(SubmissionError::NotReady(self.screen()));
        };

        let result = coordinator.submit(&booking, &self.sink).await;
        self.result_message = match &result {
            Ok(_) => None,
            Err(SubmissionError::InFlight) => self.result_message.take(),
            Err(e) => Some(e.user_message()),
        };
        result
    }

    /// Drops a selected specialist that the current options no longer offer.
    fn clear_stale_specialist(&mut self) {
        let options = &self.specialist_options;
        let draft = self.wizard.draft_mut();
        if let Some(specialist) = &draft.selected_specialist
            && !options.iter().any(|a| &a.value == specialist)
        {
            tracing::debug!(specialist, "clearing specialist not offered by the clinic");
            draft.selected_specialist = None;
        }
    }

    fn refresh_specialist_options(&mut self) {
        self.specialist_options = match &self.wizard.draft().selected_center {
            Some(clinic) => self.specialists.dependent_options(clinic),
            None => Vec::new(),
        };
    }
}

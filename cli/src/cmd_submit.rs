// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Non-interactive booking: the wizard is driven from command-line arguments.

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use clinibook_core::{
    BookingSession, NotificationSink, PicklistValue, Screen, SubmissionCoordinator,
};
use jiff::civil::{Date, Time};

use crate::cli::Context;
use crate::notifier::TerminalNotifier;
use crate::util::{parse_date, parse_time, print_booking};

#[derive(Debug, Clone, Default)]
pub struct CmdSubmit {
    pub date: Option<Date>,
    pub clinic: Option<String>,
    pub specialist: Option<String>,
    pub time: Option<Time>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub comments: Option<String>,
}

impl CmdSubmit {
    pub const NAME: &str = "submit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Book an appointment without the interactive wizard")
            .arg(arg!(--date <DATE> "Appointment date, YYYY-MM-DD").value_parser(date_arg))
            .arg(arg!(--clinic <CLINIC> "Clinic value or label"))
            .arg(arg!(--specialist <SPECIALIST> "Specialist value or label"))
            .arg(arg!(--time <TIME> "Appointment time, HH:MM").value_parser(time_arg))
            .arg(arg!(--name <NAME> "Full name"))
            .arg(arg!(--email <EMAIL> "Email address"))
            .arg(arg!(--phone <PHONE> "Phone number"))
            .arg(arg!(--comments <COMMENTS> "Comments for the specialist"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let text = |id: &str| matches.get_one::<String>(id).cloned();
        Ok(Self {
            date: matches.get_one::<Date>("date").copied(),
            clinic: text("clinic"),
            specialist: text("specialist"),
            time: matches.get_one::<Time>("time").copied(),
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            comments: text("comments"),
        })
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "submitting appointment...");
        let mut session =
            BookingSession::load(ctx.core.clone(), &ctx.backend, TerminalNotifier).await?;

        if !self.fill(&mut session) {
            return Ok(()); // the validation error has been printed
        }

        if let Some(booking) = session.booking() {
            print_booking(&booking);
        }

        let coordinator = SubmissionCoordinator::new(ctx.backend.clone());
        match session.submit(&coordinator).await {
            Ok(receipt) => tracing::info!(event_id = %receipt.event_id, "booked"),
            Err(e) => tracing::debug!(error = %e, "submission failed"),
        }
        Ok(())
    }

    /// Walks the wizard up to the summary, returning whether it got there.
    fn fill<N: NotificationSink>(self, session: &mut BookingSession<N>) -> bool {
        session.set_date(self.date);
        if let Some(clinic) = &self.clinic {
            let value = resolve(session.clinic_options(), clinic);
            session.select_clinic(value);
        }
        if let Some(specialist) = &self.specialist {
            let value = resolve(session.specialist_options(), specialist);
            session.select_specialist(value);
        }
        if session.next().is_err() {
            return false;
        }

        session.set_time(self.time);
        if session.next().is_err() {
            return false;
        }

        session.set_name(self.name.unwrap_or_default());
        session.set_email(self.email.unwrap_or_default());
        session.set_phone(self.phone.unwrap_or_default());
        session.set_comments(self.comments.unwrap_or_default());
        session.next().is_ok() && session.screen() == Screen::Summary
    }
}

/// Maps a label to its picklist value, leaving unknown input untouched.
fn resolve(options: &[PicklistValue], input: &str) -> String {
    options
        .iter()
        .find(|a| a.value == input || a.label == input)
        .map_or_else(|| input.to_string(), |a| a.value.clone())
}

fn date_arg(s: &str) -> Result<Date, String> {
    parse_date(s)?.ok_or_else(|| "Date must not be empty".to_string())
}

fn time_arg(s: &str) -> Result<Time, String> {
    parse_time(s)?.ok_or_else(|| "Time must not be empty".to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use clinibook_core::{Config, ControllerKey, Notification, PicklistCatalog};
    use jiff::civil::{date, time};

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl NotificationSink for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.borrow_mut().push(notification.message);
        }
    }

    fn session(recorder: &Recorder) -> BookingSession<&Recorder> {
        let clinics = PicklistCatalog::new(
            vec![PicklistValue {
                label: "Clinic Norte".to_string(),
                value: "Norte".to_string(),
                valid_for: Vec::new(),
            }],
            [],
        );
        let specialists = PicklistCatalog::new(
            vec![PicklistValue::new("Dermatology").valid_for([0])],
            [("Norte".to_string(), ControllerKey::new(0))],
        );
        BookingSession::new(Config::default(), recorder).with_catalogs(clinics, specialists)
    }

    fn complete() -> CmdSubmit {
        CmdSubmit {
            date: Some(date(2026, 2, 10)),
            clinic: Some("Clinic Norte".to_string()),
            specialist: Some("Dermatology".to_string()),
            time: Some(time(12, 0, 0, 0)),
            name: Some("Marta".to_string()),
            email: Some("marta@example.com".to_string()),
            phone: Some("611223344".to_string()),
            comments: Some("Follow-up".to_string()),
        }
    }

    #[test]
    fn fill_reaches_summary() {
        let recorder = Recorder::default();
        let mut session = session(&recorder);

        assert!(complete().fill(&mut session));
        assert_eq!(session.screen(), Screen::Summary);
        assert_eq!(session.draft().selected_center.as_deref(), Some("Norte"));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn fill_stops_at_missing_time() {
        let recorder = Recorder::default();
        let mut session = session(&recorder);

        let cmd = CmdSubmit {
            time: None,
            ..complete()
        };
        assert!(!cmd.fill(&mut session));
        assert_eq!(session.screen(), Screen::TimeSlot);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            ["Please complete the time field"]
        );
    }

    #[test]
    fn fill_stops_at_missing_contact() {
        let recorder = Recorder::default();
        let mut session = session(&recorder);

        let cmd = CmdSubmit {
            comments: None,
            ..complete()
        };
        assert!(!cmd.fill(&mut session));
        assert_eq!(session.screen(), Screen::ContactInfo);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            ["Please complete all contact information"]
        );
    }

    #[test]
    fn missing_clinic_is_incomplete() {
        let recorder = Recorder::default();
        let mut session = session(&recorder);

        let cmd = CmdSubmit {
            clinic: None,
            ..complete()
        };
        assert!(!cmd.fill(&mut session));
        assert_eq!(session.screen(), Screen::DateSelection);
        assert_eq!(recorder.0.borrow().as_slice(), ["Please complete all fields"]);
    }
}

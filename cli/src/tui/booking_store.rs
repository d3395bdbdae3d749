// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use clinibook_core::{Booking, BookingSession, Screen};

use crate::notifier::Toast;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{format_date, format_time, parse_date, parse_time};

#[derive(Debug)]
pub struct BookingStore {
    pub session: BookingSession<Toast>,

    /// Date as typed, kept even while it does not parse
    pub date: String,

    /// Time as typed, kept even while it does not parse
    pub time: String,

    /// Whether the user confirmed the booking
    pub submit: bool,
}

impl BookingStore {
    pub fn new(session: BookingSession<Toast>) -> Self {
        let draft = session.draft();
        let date = draft.selected_date.map(format_date).unwrap_or_default();
        let time = draft.selected_time.map(format_time).unwrap_or_default();
        Self {
            session,
            date,
            time,
            submit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    /// The confirmed booking, if the user submitted one.
    pub fn submitted(&self) -> Option<Booking> {
        self.submit.then(|| self.session.booking()).flatten()
    }

    /// The session, on the summary screen, if the user submitted the booking.
    pub fn into_submitted(self) -> Option<BookingSession<Toast>> {
        self.submitted().is_some().then_some(self.session)
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().apply(action);
        }));
        dispatcher.register(callback);
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::UpdateDate(v) => {
                self.date = v.clone();
                self.session.set_date(parse_date(v).ok().flatten());
            }
            Action::SelectClinic(v) => self.session.select_clinic(v.clone()),
            Action::SelectSpecialist(v) => self.session.select_specialist(v.clone()),
            Action::UpdateTime(v) => {
                self.time = v.clone();
                self.session.set_time(parse_time(v).ok().flatten());
            }
            Action::UpdateName(v) => self.session.set_name(v.clone()),
            Action::UpdateEmail(v) => self.session.set_email(v.clone()),
            Action::UpdatePhone(v) => self.session.set_phone(v.clone()),
            Action::UpdateComments(v) => self.session.set_comments(v.clone()),
            Action::Next => {
                self.session.sink().clear();
                let _ = self.session.next();
            }
            Action::Back => {
                self.session.sink().clear();
                let _ = self.session.back();

                let draft = self.session.draft();
                if draft.selected_date.is_none() {
                    self.date.clear();
                }
                if draft.selected_time.is_none() {
                    self.time.clear();
                }
            }
            Action::Submit => self.submit = self.session.booking().is_some(),
        }
    }
}

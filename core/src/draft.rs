// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};

use crate::wizard::ValidationError;

/// Contact details collected on the contact screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    /// Full name of the patient.
    pub name: String,

    /// Email address, used for contact deduplication.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Free-form comments for the specialist.
    pub comments: String,
}

impl ContactInfo {
    /// Whether every contact field holds a value.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.comments]
            .iter()
            .all(|v| !v.is_empty())
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// In-progress booking data held for the session.
///
/// Every field is optional until the screen it belongs to has been completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    /// Requested appointment date.
    pub selected_date: Option<Date>,

    /// Selected clinic, as a picklist value.
    pub selected_center: Option<String>,

    /// Selected specialist, as a picklist value.
    pub selected_specialist: Option<String>,

    /// Requested time of day.
    pub selected_time: Option<Time>,

    /// Contact details.
    pub contact: ContactInfo,
}

impl BookingDraft {
    /// Checks the fields of the date selection screen.
    pub fn check_appointment(&self) -> Result<(), ValidationError> {
        let complete = self.selected_date.is_some()
            && is_filled(self.selected_center.as_deref())
            && is_filled(self.selected_specialist.as_deref());

        if complete {
            Ok(())
        } else {
            Err(ValidationError::IncompleteAppointment)
        }
    }

    /// Checks the field of the time slot screen.
    pub fn check_time(&self) -> Result<(), ValidationError> {
        match self.selected_time {
            Some(_) => Ok(()),
            None => Err(ValidationError::MissingTime),
        }
    }

    /// Checks the fields of the contact screen.
    pub fn check_contact(&self) -> Result<(), ValidationError> {
        if self.contact.is_complete() {
            Ok(())
        } else {
            Err(ValidationError::IncompleteContact)
        }
    }

    pub(crate) fn clear_appointment(&mut self) {
        self.selected_date = None;
        self.selected_center = None;
        self.selected_specialist = None;
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// A booking whose fields have all been provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Appointment date.
    pub date: Date,

    /// Clinic value.
    pub center: String,

    /// Specialist value.
    pub specialist: String,

    /// Appointment time.
    pub time: Time,

    /// Contact details, all fields non-empty.
    pub contact: ContactInfo,
}

impl TryFrom<&BookingDraft> for Booking {
    type Error = ValidationError;

    fn try_from(draft: &BookingDraft) -> Result<Self, Self::Error> {
        draft.check_appointment()?;
        draft.check_time()?;
        draft.check_contact()?;

        let (Some(date), Some(center), Some(specialist), Some(time)) = (
            draft.selected_date,
            draft.selected_center.clone(),
            draft.selected_specialist.clone(),
            draft.selected_time,
        ) else {
            return Err(ValidationError::IncompleteAppointment);
        };

        Ok(Self {
            date,
            center,
            specialist,
            time,
            contact: draft.contact.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            selected_date: Some(date(2026, 3, 2)),
            selected_center: Some("Clinic Norte".to_string()),
            selected_specialist: Some("Dermatology".to_string()),
            selected_time: Some(time(9, 30, 0, 0)),
            contact: ContactInfo {
                name: "Ana Ruiz".to_string(),
                email: "ana@example.com".to_string(),
                phone: "+34 600 000 000".to_string(),
                comments: "First visit".to_string(),
            },
        }
    }

    #[test]
    fn empty_strings_do_not_count_as_selected() {
        let draft = BookingDraft {
            selected_center: Some(String::new()),
            ..complete_draft()
        };
        assert_eq!(
            draft.check_appointment(),
            Err(ValidationError::IncompleteAppointment)
        );
    }

    #[test]
    fn contact_requires_every_field() {
        let mut draft = complete_draft();
        assert!(draft.check_contact().is_ok());

        draft.contact.comments.clear();
        assert_eq!(
            draft.check_contact(),
            Err(ValidationError::IncompleteContact)
        );
    }

    #[test]
    fn booking_from_complete_draft() {
        let booking = Booking::try_from(&complete_draft()).unwrap();
        assert_eq!(booking.date, date(2026, 3, 2));
        assert_eq!(booking.center, "Clinic Norte");
        assert_eq!(booking.specialist, "Dermatology");
        assert_eq!(booking.time, time(9, 30, 0, 0));
        assert_eq!(booking.contact.name, "Ana Ruiz");
    }

    #[test]
    fn booking_reports_first_missing_screen() {
        let draft = BookingDraft {
            selected_time: None,
            contact: ContactInfo::default(),
            ..complete_draft()
        };
        assert_eq!(
            Booking::try_from(&draft),
            Err(ValidationError::MissingTime)
        );
    }
}

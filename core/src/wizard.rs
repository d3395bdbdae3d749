// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Step wizard driving the booking screens.

use std::fmt;

use crate::draft::{Booking, BookingDraft};

/// The screen currently shown by the wizard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Date, clinic and specialist selection.
    #[default]
    DateSelection,

    /// Time slot selection.
    TimeSlot,

    /// Contact details.
    ContactInfo,

    /// Review and submit.
    Summary,
}

impl Screen {
    /// All screens in order.
    pub const ALL: [Screen; 4] = [
        Screen::DateSelection,
        Screen::TimeSlot,
        Screen::ContactInfo,
        Screen::Summary,
    ];

    /// The screen after this one, if any.
    pub const fn next(self) -> Option<Screen> {
        match self {
            Screen::DateSelection => Some(Screen::TimeSlot),
            Screen::TimeSlot => Some(Screen::ContactInfo),
            Screen::ContactInfo => Some(Screen::Summary),
            Screen::Summary => None,
        }
    }

    /// The screen before this one, if any.
    pub const fn previous(self) -> Option<Screen> {
        match self {
            Screen::DateSelection => None,
            Screen::TimeSlot => Some(Screen::DateSelection),
            Screen::ContactInfo => Some(Screen::TimeSlot),
            Screen::Summary => Some(Screen::ContactInfo),
        }
    }

    /// One-based position of the screen.
    pub const fn step(self) -> usize {
        match self {
            Screen::DateSelection => 1,
            Screen::TimeSlot => 2,
            Screen::ContactInfo => 3,
            Screen::Summary => 4,
        }
    }

    /// Human readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Screen::DateSelection => "Date and specialist",
            Screen::TimeSlot => "Time slot",
            Screen::ContactInfo => "Contact information",
            Screen::Summary => "Summary",
        }
    }

    /// Boolean view of the active screen.
    pub const fn flags(self) -> ScreenFlags {
        ScreenFlags {
            show_date_selection: matches!(self, Screen::DateSelection),
            show_time_slots: matches!(self, Screen::TimeSlot),
            show_contact_info: matches!(self, Screen::ContactInfo),
            show_summary: matches!(self, Screen::Summary),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Per-screen visibility flags, derived from [`Screen`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScreenFlags {
    /// Date selection is visible.
    pub show_date_selection: bool,

    /// Time slots are visible.
    pub show_time_slots: bool,

    /// Contact form is visible.
    pub show_contact_info: bool,

    /// Summary is visible.
    pub show_summary: bool,
}

impl ScreenFlags {
    /// Number of visible screens.
    pub fn visible_count(&self) -> usize {
        [
            self.show_date_selection,
            self.show_time_slots,
            self.show_contact_info,
            self.show_summary,
        ]
        .into_iter()
        .filter(|a| *a)
        .count()
    }
}

/// A required field is missing on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Date, clinic or specialist is missing.
    #[error("Please complete all fields")]
    IncompleteAppointment,

    /// Time is missing.
    #[error("Please complete the time field")]
    MissingTime,

    /// At least one contact field is missing.
    #[error("Please complete all contact information")]
    IncompleteContact,
}

/// Why a wizard transition did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// The current screen is incomplete.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Next was requested on the last screen.
    #[error("There is no screen after {0}")]
    NoNextScreen(Screen),

    /// Back was requested on the first screen.
    #[error("There is no screen before {0}")]
    NoPreviousScreen(Screen),
}

/// Wizard state: the active screen plus the draft it edits.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    screen: Screen,
    draft: BookingDraft,
}

impl Wizard {
    /// Creates a wizard on the first screen with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The draft being edited.
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Mutable access for field handlers.
    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// Validates the current screen and moves forward by one screen.
    pub fn next(&mut self) -> Result<Screen, WizardError> {
        match self.screen {
            Screen::DateSelection => self.draft.check_appointment()?,
            Screen::TimeSlot => self.draft.check_time()?,
            Screen::ContactInfo => self.draft.check_contact()?,
            Screen::Summary => return Err(WizardError::NoNextScreen(self.screen)),
        }

        let next = self
            .screen
            .next()
            .ok_or(WizardError::NoNextScreen(self.screen))?;

        tracing::debug!(from = ?self.screen, to = ?next, "wizard moved forward");
        self.screen = next;
        Ok(next)
    }

    /// Moves back by one screen, clearing the fields of the screen returned to.
    pub fn back(&mut self) -> Result<Screen, WizardError> {
        match self.screen {
            Screen::DateSelection => return Err(WizardError::NoPreviousScreen(self.screen)),
            Screen::TimeSlot => {
                self.draft.clear_appointment();
                self.draft.selected_time = None;
            }
            Screen::ContactInfo => self.draft.selected_time = None,
            Screen::Summary => self.draft.contact.clear(),
        }

        let previous = self
            .screen
            .previous()
            .ok_or(WizardError::NoPreviousScreen(self.screen))?;

        tracing::debug!(from = ?self.screen, to = ?previous, "wizard moved back");
        self.screen = previous;
        Ok(previous)
    }

    /// The validated booking, available once the summary screen is reached.
    pub fn booking(&self) -> Option<Booking> {
        match self.screen {
            Screen::Summary => Booking::try_from(&self.draft).ok(),
            _ => None,
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use clinibook_core::{Notification, NotificationSink, Severity};
use colored::Colorize;

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        println!("{}", format_notification(&notification));
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let title = format!("{}:", notification.title);
    let title = match notification.severity {
        Severity::Success => title.green(),
        Severity::Error => title.red(),
    };
    format!("{} {}", title, notification.message)
}

/// Keeps the most recent notification, for display inside the TUI.
#[derive(Debug, Default)]
pub struct Toast(RefCell<Option<Notification>>);

impl Toast {
    pub fn last(&self) -> Option<Notification> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

impl NotificationSink for Toast {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, text = %notification.message, "toast");
        self.0.borrow_mut().replace(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_keeps_last_notification() {
        let toast = Toast::default();
        assert!(toast.last().is_none());

        toast.notify(Notification::error("Please complete the time field"));
        toast.notify(Notification::error("Please complete all contact information"));
        assert_eq!(
            toast.last().map(|a| a.message),
            Some("Please complete all contact information".to_string())
        );

        toast.clear();
        assert!(toast.last().is_none());
    }

    #[test]
    fn format_includes_title_and_message() {
        colored::control::set_override(false);
        let text = format_notification(&Notification::success("Appointment created successfully"));
        assert_eq!(text, "Success: Appointment created successfully");
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use clinibook_core::{BookingSession, NotificationSink, SubmissionCoordinator};
use colored::Colorize;

use crate::cli::Context;
use crate::notifier::{TerminalNotifier, Toast};
use crate::tui;
use crate::util::print_booking;

#[derive(Debug, Clone, Copy)]
pub struct CmdBook;

impl CmdBook {
    pub const NAME: &str = "book";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Book an appointment with the interactive wizard")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!("starting booking wizard...");
        let session = BookingSession::load(ctx.core.clone(), &ctx.backend, Toast::default()).await?;

        let Some(mut session) = tui::draft_booking(session)? else {
            println!("{}", "Booking cancelled".italic());
            return Ok(());
        };

        if let Some(booking) = session.booking() {
            print_booking(&booking);
        }

        session.sink().clear();
        let coordinator = SubmissionCoordinator::new(ctx.backend.clone());
        let result = session.submit(&coordinator).await;
        if let Some(notification) = session.sink().last() {
            TerminalNotifier.notify(notification);
        }
        match result {
            Ok(receipt) => tracing::info!(event_id = %receipt.event_id, "booked"),
            Err(e) => tracing::debug!(error = %e, "submission failed"),
        }
        Ok(())
    }
}

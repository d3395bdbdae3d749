// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use clinibook_core::BookingSession;

use crate::notifier::Toast;
use crate::tui::booking_editor::BookingEditor;
use crate::tui::booking_store::BookingStore;
use crate::tui::component::Message;
use crate::tui::dispatcher::Dispatcher;

/// Runs the wizard in the terminal.
///
/// Returns the session, left on the summary screen, when the user confirmed the booking.
pub fn draft_booking(
    session: BookingSession<Toast>,
) -> Result<Option<BookingSession<Toast>>, Box<dyn Error>> {
    let store = run_booking_editor(BookingStore::new(session))?;
    Ok(store.into_submitted())
}

fn run_booking_editor(store: BookingStore) -> Result<BookingStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        BookingStore::register_to(store.clone(), &mut dispatcher);
        let mut view = BookingEditor::new(dispatcher, &store);

        loop {
            if let Err(e) = view.draw(&store, &mut terminal) {
                break Err(e);
            }

            match view.read_event(&store) {
                Err(e) => break Err(e),
                Ok(Some(Message::Exit)) => break Ok(()),
                Ok(_) => {} // Continue the loop to render the next frame
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store)
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::error::Error;

use clinibook_core::{Screen, Severity};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::booking_store::BookingStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, FormItem, Input, OptionSource, Select};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::summary_fields;

type Page = SinglePage<BookingStore, Box<dyn Component<BookingStore>>>;

/// One page per wizard screen, switched as the store moves between screens.
pub struct BookingEditor {
    dispatcher: Dispatcher,
    pages: Vec<(Screen, Page)>,
    screen: Screen,
    area: Rect,
}

impl BookingEditor {
    pub fn new(mut dispatcher: Dispatcher, store: &RefCell<BookingStore>) -> Self {
        let screen = store.borrow().screen();
        let mut pages: Vec<_> = Screen::ALL.into_iter().map(|s| (s, new_page(s))).collect();
        if let Some((_, page)) = pages.iter_mut().find(|(s, _)| *s == screen) {
            page.activate(&mut dispatcher, store);
        }

        Self {
            dispatcher,
            pages,
            screen,
            area: Rect::default(),
        }
    }

    pub fn draw(
        &mut self,
        store: &RefCell<BookingStore>,
        terminal: &mut DefaultTerminal,
    ) -> Result<(), Box<dyn Error>> {
        terminal.draw(|frame| {
            let [page_area, toast_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
            self.area = page_area;

            let buf = frame.buffer_mut();
            if let Some(page) = self.page() {
                page.render(store, page_area, buf);
            }
            render_toast(store, toast_area, buf);

            if let Some(pos) = self
                .page()
                .and_then(|page| page.get_cursor_position(store, page_area))
            {
                frame.set_cursor_position(pos);
            }
        })?;
        Ok(())
    }

    pub fn read_event(
        &mut self,
        store: &RefCell<BookingStore>,
    ) -> Result<Option<Message>, Box<dyn Error>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let area = self.area;
                Ok(self.on_key(store, area, key))
            }
            _ => Ok(None),
        }
    }

    fn on_key(
        &mut self,
        store: &RefCell<BookingStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(Message::Exit);
        }

        let screen = self.screen;
        if let Some((_, page)) = self.pages.iter_mut().find(|(s, _)| *s == screen)
            && let Some(msg) = page.on_key(&mut self.dispatcher, store, area, event)
        {
            return Some(msg);
        }

        match event.code {
            KeyCode::Enter if self.screen == Screen::Summary => {
                self.dispatcher.dispatch(Action::Submit);
                if store.borrow().submit {
                    Some(Message::Exit)
                } else {
                    Some(Message::Handled)
                }
            }
            KeyCode::Enter => {
                self.dispatcher.dispatch(Action::Next);
                self.sync_screen(store);
                Some(Message::CursorUpdated)
            }
            KeyCode::Esc if self.screen == Screen::DateSelection => Some(Message::Exit),
            KeyCode::Esc => {
                self.dispatcher.dispatch(Action::Back);
                self.sync_screen(store);
                Some(Message::CursorUpdated)
            }
            _ => None,
        }
    }

    fn page(&self) -> Option<&Page> {
        self.pages
            .iter()
            .find(|(s, _)| *s == self.screen)
            .map(|(_, page)| page)
    }

    fn sync_screen(&mut self, store: &RefCell<BookingStore>) {
        let screen = store.borrow().screen();
        if screen == self.screen {
            return;
        }

        tracing::debug!(from = %self.screen, to = %screen, "switch page");
        for (s, page) in &mut self.pages {
            if *s == self.screen {
                page.deactivate(&mut self.dispatcher, store);
            } else if *s == screen {
                page.activate(&mut self.dispatcher, store);
            }
        }
        self.screen = screen;
    }
}

fn new_page(screen: Screen) -> Page {
    let title = format!(
        "Book an appointment {}/{}: {}",
        screen.step(),
        Screen::ALL.len(),
        screen.title()
    );
    let inner: Box<dyn Component<BookingStore>> = match screen {
        Screen::DateSelection => Box::new(new_form(vec![
            Box::new(new_date()),
            Box::new(new_clinic()),
            Box::new(new_specialist()),
        ])),
        Screen::TimeSlot => Box::new(new_form(vec![Box::new(new_time())])),
        Screen::ContactInfo => Box::new(new_form(vec![
            Box::new(new_name()),
            Box::new(new_email()),
            Box::new(new_phone()),
            Box::new(new_comments()),
        ])),
        Screen::Summary => Box::new(SummaryView),
    };
    SinglePage::new(title, inner)
}

fn new_form(
    items: Vec<Box<dyn FormItem<BookingStore>>>,
) -> Form<BookingStore, Box<dyn FormItem<BookingStore>>> {
    Form::new(items)
}

fn render_toast(store: &RefCell<BookingStore>, area: Rect, buf: &mut Buffer) {
    let Some(toast) = store.borrow().session.sink().last() else {
        return;
    };

    let color = match toast.severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };
    Paragraph::new(Line::from(vec![
        format!(" {}: ", toast.title).bold().fg(color),
        toast.message.into(),
    ]))
    .render(area, buf);
}

macro_rules! new_input {
    ($fn: ident, $title: expr, $acc: ident, $get: expr, $action: ident) => {
        fn $fn() -> Input<BookingStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<BookingStore, String> for $acc {
            fn get(store: &RefCell<BookingStore>) -> String {
                let get: fn(&BookingStore) -> String = $get;
                get(&store.borrow())
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_date, "Date (YYYY-MM-DD)", DateAccess, |s| s.date.clone(), UpdateDate);
new_input!(new_time, "Time (HH:MM)", TimeAccess, |s| s.time.clone(), UpdateTime);
new_input!(
    new_name,
    "Name",
    NameAccess,
    |s| s.session.draft().contact.name.clone(),
    UpdateName
);
new_input!(
    new_email,
    "Email",
    EmailAccess,
    |s| s.session.draft().contact.email.clone(),
    UpdateEmail
);
new_input!(
    new_phone,
    "Phone",
    PhoneAccess,
    |s| s.session.draft().contact.phone.clone(),
    UpdatePhone
);
new_input!(
    new_comments,
    "Comments",
    CommentsAccess,
    |s| s.session.draft().contact.comments.clone(),
    UpdateComments
);

fn new_clinic() -> Select<BookingStore, ClinicAccess, ClinicOptions> {
    Select::new("Clinic")
}

struct ClinicAccess;

impl Access<BookingStore, String> for ClinicAccess {
    fn get(store: &RefCell<BookingStore>) -> String {
        let store = store.borrow();
        store.session.draft().selected_center.clone().unwrap_or_default()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::SelectClinic(value));
        true
    }
}

struct ClinicOptions;

impl OptionSource<BookingStore> for ClinicOptions {
    fn options(store: &RefCell<BookingStore>) -> Vec<(String, String)> {
        let store = store.borrow();
        store
            .session
            .clinic_options()
            .iter()
            .map(|a| (a.value.clone(), a.label.clone()))
            .collect()
    }
}

fn new_specialist() -> Select<BookingStore, SpecialistAccess, SpecialistOptions> {
    Select::new("Specialist")
}

struct SpecialistAccess;

impl Access<BookingStore, String> for SpecialistAccess {
    fn get(store: &RefCell<BookingStore>) -> String {
        let store = store.borrow();
        store.session.draft().selected_specialist.clone().unwrap_or_default()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::SelectSpecialist(value));
        true
    }
}

struct SpecialistOptions;

impl OptionSource<BookingStore> for SpecialistOptions {
    fn options(store: &RefCell<BookingStore>) -> Vec<(String, String)> {
        let store = store.borrow();
        store
            .session
            .specialist_options()
            .iter()
            .map(|a| (a.value.clone(), a.label.clone()))
            .collect()
    }
}

/// Read-only review of the booking.
struct SummaryView;

impl Component<BookingStore> for SummaryView {
    fn render(&self, store: &RefCell<BookingStore>, area: Rect, buf: &mut Buffer) {
        let Some(booking) = store.borrow().session.booking() else {
            Paragraph::new("The booking is incomplete".red()).render(area, buf);
            return;
        };

        let lines: Vec<Line> = summary_fields(&booking)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![format!("{label:<12}").bold().blue(), value.into()])
            })
            .collect();

        let area = area.inner(Margin::new(2, 1));
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use clinibook_core::{BookingSession, Config, ControllerKey, PicklistCatalog, PicklistValue};

    use super::*;
    use crate::notifier::Toast;

    fn setup() -> (Rc<RefCell<BookingStore>>, BookingEditor) {
        let clinics = PicklistCatalog::new(
            vec![PicklistValue::new("ClinicX"), PicklistValue::new("ClinicY")],
            [],
        );
        let specialists = PicklistCatalog::new(
            vec![
                PicklistValue::new("A").valid_for(["k1"]),
                PicklistValue::new("B").valid_for(["k2"]),
            ],
            [
                ("ClinicX".to_string(), ControllerKey::new("k1")),
                ("ClinicY".to_string(), ControllerKey::new("k2")),
            ],
        );
        let session = BookingSession::new(Config::default(), Toast::default())
            .with_catalogs(clinics, specialists);

        let store = Rc::new(RefCell::new(BookingStore::new(session)));
        let mut dispatcher = Dispatcher::new();
        BookingStore::register_to(store.clone(), &mut dispatcher);
        let editor = BookingEditor::new(dispatcher, &store);
        (store, editor)
    }

    fn press(editor: &mut BookingEditor, store: &RefCell<BookingStore>, code: KeyCode) -> Option<Message> {
        let area = Rect::new(0, 0, 80, 24);
        editor.on_key(store, area, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(editor: &mut BookingEditor, store: &RefCell<BookingStore>, text: &str) {
        for c in text.chars() {
            press(editor, store, KeyCode::Char(c));
        }
    }

    fn toast(store: &RefCell<BookingStore>) -> Option<String> {
        store.borrow().session.sink().last().map(|a| a.message)
    }

    #[test]
    fn walks_through_every_screen() {
        let (store, mut editor) = setup();

        type_text(&mut editor, &store, "2026-03-02");
        press(&mut editor, &store, KeyCode::Tab);
        press(&mut editor, &store, KeyCode::Right);
        press(&mut editor, &store, KeyCode::Tab);
        press(&mut editor, &store, KeyCode::Right);
        press(&mut editor, &store, KeyCode::Enter);
        assert_eq!(store.borrow().screen(), Screen::TimeSlot);
        assert_eq!(
            store.borrow().session.draft().selected_specialist.as_deref(),
            Some("A")
        );

        press(&mut editor, &store, KeyCode::Enter);
        assert_eq!(store.borrow().screen(), Screen::TimeSlot);
        assert_eq!(toast(&store).as_deref(), Some("Please complete the time field"));

        type_text(&mut editor, &store, "09:30");
        press(&mut editor, &store, KeyCode::Enter);
        assert_eq!(store.borrow().screen(), Screen::ContactInfo);
        assert!(toast(&store).is_none());

        for text in ["Marta", "marta@example.com", "611223344", "Follow-up"] {
            type_text(&mut editor, &store, text);
            press(&mut editor, &store, KeyCode::Tab);
        }
        press(&mut editor, &store, KeyCode::Enter);
        assert_eq!(store.borrow().screen(), Screen::Summary);

        assert_eq!(press(&mut editor, &store, KeyCode::Enter), Some(Message::Exit));
        let booking = store.borrow().submitted().unwrap();
        assert_eq!(booking.contact.email, "marta@example.com");
        assert_eq!(booking.contact.comments, "Follow-up");
    }

    #[test]
    fn escape_goes_back_then_exits() {
        let (store, mut editor) = setup();

        type_text(&mut editor, &store, "2026-03-02");
        press(&mut editor, &store, KeyCode::Tab);
        press(&mut editor, &store, KeyCode::Right);
        press(&mut editor, &store, KeyCode::Tab);
        press(&mut editor, &store, KeyCode::Right);
        press(&mut editor, &store, KeyCode::Enter);
        type_text(&mut editor, &store, "10:00");

        press(&mut editor, &store, KeyCode::Esc);
        assert_eq!(store.borrow().screen(), Screen::DateSelection);
        assert!(store.borrow().date.is_empty());
        assert!(store.borrow().time.is_empty());

        assert_eq!(press(&mut editor, &store, KeyCode::Esc), Some(Message::Exit));
        assert!(store.borrow().submitted().is_none());
    }

    #[test]
    fn incomplete_date_screen_stays() {
        let (store, mut editor) = setup();
        type_text(&mut editor, &store, "2026-03-02");
        press(&mut editor, &store, KeyCode::Enter);

        assert_eq!(store.borrow().screen(), Screen::DateSelection);
        assert_eq!(toast(&store).as_deref(), Some("Please complete all fields"));
    }
}

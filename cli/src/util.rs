// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use clinibook_core::Booking;
use colored::Colorize;
use jiff::civil::{Date, Time};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Parses a date in `YYYY-MM-DD` form. An empty string means no date.
pub fn parse_date(s: &str) -> Result<Option<Date>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    s.parse::<Date>()
        .map(Some)
        .map_err(|e| format!("Invalid date '{s}', expected YYYY-MM-DD: {e}"))
}

/// Parses a time of day in `HH:MM` or `HH:MM:SS` form. An empty string means no time.
pub fn parse_time(s: &str) -> Result<Option<Time>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let format = match s.matches(':').count() {
        1 => "%H:%M",
        _ => "%H:%M:%S",
    };
    Time::strptime(format, s)
        .map(Some)
        .map_err(|e| format!("Invalid time '{s}', expected HH:MM: {e}"))
}

pub fn format_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

pub fn format_time(time: Time) -> String {
    time.strftime("%H:%M").to_string()
}

/// Labelled fields of a booking, in display order.
pub fn summary_fields(booking: &Booking) -> [(&'static str, String); 8] {
    [
        ("Date", format_date(booking.date)),
        ("Clinic", booking.center.clone()),
        ("Specialist", booking.specialist.clone()),
        ("Time", format_time(booking.time)),
        ("Name", booking.contact.name.clone()),
        ("Email", booking.contact.email.clone()),
        ("Phone", booking.contact.phone.clone()),
        ("Comments", booking.contact.comments.clone()),
    ]
}

/// Prints the booking as an indented list of labelled fields.
pub fn print_booking(booking: &Booking) {
    println!("{}", "Appointment".bold());
    for (label, value) in summary_fields(booking) {
        println!("  {:<12}{}", format!("{label}:").italic(), value);
    }
}

/// Display width of the first `first_n_graphemes` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_graphemes: usize) -> usize {
    s[..byte_offset_of_grapheme(s, first_n_graphemes)].width()
}

/// Number of grapheme clusters in `s`.
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Byte offset where the grapheme cluster at index `g_idx` starts, or `s.len()` past the end.
pub fn byte_offset_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map_or(s.len(), |(byte_start, _)| byte_start)
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(byte_start, g)| byte_start..byte_start + g.len())
}

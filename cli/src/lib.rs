// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of Clinibook: the interactive booking wizard and its
//! non-interactive companions.

mod cli;
mod cmd_book;
mod cmd_options;
mod cmd_submit;
mod config;
mod notifier;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};

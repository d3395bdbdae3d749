// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod booking_editor;
mod booking_store;
mod component;
mod component_form;
mod component_page;
mod dispatcher;

pub use app::draft_booking;

// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget renderer for Dashwire.
//!
//! Turns a widget's type and mapping plus the tool's response payload into a
//! [`RenderOutcome`]. Rendering is pure and synchronous: it never fetches and
//! never fails. Missing data yields [`RenderOutcome::Empty`], unresolvable
//! fields become `-`, and shapes a widget type cannot interpret fall back to
//! [`WidgetView::Raw`].

mod cards;
mod chart;
mod list;
pub mod outcome;
pub mod renderer;
mod table;

pub use outcome::{
    ChartSeries, ClickTarget, ColumnHeader, ErrorKind, ListItem, RenderOutcome, TableRow,
    WidgetView,
};
pub use renderer::{DEFAULT_PAGE_SIZE, RenderOptions, Renderer, SortDirection, SortSpec};

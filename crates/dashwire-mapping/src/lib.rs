// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The widget mapping language.
//!
//! Two lookups with different semantics live here:
//!
//! - [`resolve`] walks dotted paths (`$.a.b`) and is used for `value`,
//!   `rows`, `items`, `labels`, and dataset paths.
//! - [`substitute`] expands `{{identifier}}` against the top level of a
//!   record only, and is used for `subtitle`, `itemTemplate`, and click
//!   targets.

pub mod display;
pub mod number;
pub mod path;
pub mod template;

pub use display::{as_number, display_string};
pub use number::{NumberFormatter, NumberLocale};
pub use path::{resolve, resolve_present};
pub use template::{placeholders, substitute};

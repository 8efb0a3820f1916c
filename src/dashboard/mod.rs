//! Dashboard Module
//!
//! The controller that owns the order list, the per-employee summary derived
//! from it, and the renderers that turn that summary into HTML or text.
//!
//! # Data flow
//!
//! ```text
//! RestOrderSource --Snapshot--+
//!                             +--> event loop --> DashboardState --> render_dashboard / render_text
//! PushChannel ----Order/Clear-+          ^
//!                                        |
//!                    select_employee ----+
//! ```

mod controller;
mod render;
mod state;
mod summary;

pub use controller::{DashboardController, DashboardHandle};
pub use render::{render_dashboard, render_text};
pub use state::{DashboardSnapshot, DashboardState, SharedState};
pub use summary::{format_amount, EmployeeSummary};

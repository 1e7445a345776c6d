pub mod dashboard_view;

pub use dashboard_view::{DashboardView, TerminalDashboardView};

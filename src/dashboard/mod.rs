//! Usage dashboard: snapshot fetch sequencing and the pure derivation pipeline.
//!
//! - [`aggregator`] - Owns the current view; applies fetch results last-request-wins
//! - [`derive`] - Snapshot to view-model derivation (shares, labels, bar widths)
//! - [`palette`] - Category colors
//! - [`sample`] - Built-in snapshot used when the server is unreachable
//! - [`report`] - Detailed report download

pub mod aggregator;
pub mod derive;
pub mod palette;
pub mod report;
pub mod sample;

pub use aggregator::{DashboardAggregator, FetchOutcome};
pub use derive::{
    CategoryRow, ChartSeries, DashboardView, DataSource, DateStyle, GrowthDisplay, GrowthTone,
    SummaryCards, WeekdayRow, derive_view,
};
pub use palette::category_colors;
pub use report::{report_filename, save_report};
pub use sample::sample_snapshot;

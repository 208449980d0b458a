//! Data models for the assistant interaction history and its usage statistics.
//!
//! - [`Record`] - One logged utterance/response pair served by `/historial`
//! - [`RecordUpdate`] - Body sent when editing a record
//! - [`StatsResponse`] - Wire shape of `/dashboard/estadisticas`
//! - [`StatisticsSnapshot`] - Flattened snapshot consumed by the dashboard
//!
//! Field names on the wire are Spanish; the structs rename them and use lenient
//! deserializers from `parsers::deserializers` for numbers that may arrive as strings.

pub mod record;
pub mod stats;

pub use record::{Record, RecordId, RecordUpdate, command_type_label};
pub use stats::{
    CategoryCount, DateCount, DayCount, HourCount, RawStatistics, RawTrends, StatisticsSnapshot,
    StatsResponse,
};

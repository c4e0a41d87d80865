//! Domain model types

pub mod batch;
pub mod driver;
pub mod expense;
pub mod fleet;
pub mod load;
pub mod metrics;

pub use batch::{BatchKind, ImportBatch};
pub use driver::{DriverProfile, DriverRoster};
pub use expense::{ExpenseBreakdown, ExpenseCategory, ExpenseEntry, ExpenseKind, UnknownCategory};
pub use fleet::{FleetMetrics, FleetMetricsUpdate};
pub use load::{Load, LoadEdit};
pub use metrics::{DriverMetrics, FinancialsEstimate, MetricsInput, SummaryMetrics};

// Domain models: raw metric rows, discovered targets, reconciled hosts

mod host;
mod series;

pub use host::{HostMap, HostRecord, OsFamily};
pub use series::{
    ADDRESS_LABEL, ExpressionKind, INSTANCE_LABEL, JOB_LABEL, Labels, MetricQuery, POOL_LABEL,
    SeriesRow, TargetDescriptor, label,
};

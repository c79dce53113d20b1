use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    flags::{FlagScope, RegisterFlags},
    schema::{Category, Describe, FieldDescriptor, Shape, Timestamp, format_duration},
};

/// Query execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerierConfig {
    /// Queries executed at once.
    pub max_concurrent: usize,
    /// Per-query timeout.
    pub timeout: Duration,
    /// Age after which series are read from storage.
    pub query_store_after: Duration,
    /// Staleness window of a series.
    pub lookback_delta: Duration,
    /// Store-gateway addresses.
    pub store_gateway_addresses: Vec<String>,
    /// Queries starting earlier are rejected.
    pub earliest_query_time: Timestamp,
    /// Accepted and ignored.
    #[serde(skip_serializing)]
    pub unused_flag_iterators: bool,
}

impl Default for QuerierConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 20,
            timeout: Duration::from_secs(2 * 60),
            query_store_after: Duration::from_secs(12 * 60 * 60),
            lookback_delta: Duration::from_secs(5 * 60),
            store_gateway_addresses: Vec::new(),
            earliest_query_time: Timestamp::default(),
            unused_flag_iterators: false,
        }
    }
}

impl Describe for QuerierConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<usize>("max_concurrent"),
                FieldDescriptor::of::<Duration>("timeout"),
                FieldDescriptor::of::<Duration>("query_store_after"),
                FieldDescriptor::of::<Duration>("lookback_delta").category(Category::Advanced),
                FieldDescriptor::of::<Vec<String>>("store_gateway_addresses").doc(
                    "nocli|description=Comma separated list of store-gateway addresses in DNS Service Discovery format.",
                ),
                FieldDescriptor::of::<Timestamp>("earliest_query_time")
                    .category(Category::Experimental),
                FieldDescriptor::of::<bool>("unused_flag_iterators"),
            ]
        })
    }
}

impl RegisterFlags for QuerierConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "max_concurrent",
            "max-concurrent",
            self.max_concurrent,
            "The number of queries that can be executed concurrently by a single querier.",
        );
        flags.register(
            "timeout",
            "timeout",
            format_duration(self.timeout),
            "The timeout for a query.",
        );
        flags.register(
            "query_store_after",
            "query-store-after",
            format_duration(self.query_store_after),
            "The time after which a metric should be queried from storage and not just ingesters.",
        );
        flags.register(
            "lookback_delta",
            "lookback-delta",
            format_duration(self.lookback_delta),
            "Time since the last sample after which a time series is considered stale and ignored by expression evaluations.",
        );
        flags.register(
            "earliest_query_time",
            "earliest-query-time",
            self.earliest_query_time,
            "Queries starting before this instant are rejected. Empty means no restriction.",
        );
        flags.deprecated(
            "unused_flag_iterators",
            "iterators",
            "Deprecated: iterators are always used.",
        );
    }
}

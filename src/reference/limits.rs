use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    flags::{FlagScope, RegisterFlags},
    schema::{
        Category, Describe, FieldDescriptor, LabelSelectors, Shape, TrackerMatchers,
        format_duration,
    },
};

/// Default and per-tenant limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Samples per second.
    pub ingestion_rate: f64,
    /// Samples accepted in a burst.
    pub ingestion_burst_size: i32,
    /// In-memory series per tenant; 0 disables the limit.
    pub max_global_series_per_user: u64,
    /// Named active-series counters.
    pub active_series_custom_trackers: TrackerMatchers,
    /// Relabel rules applied to incoming series.
    pub metric_relabel_configs: LabelSelectors,
    /// Block retention; zero keeps blocks forever.
    pub compactor_blocks_retention_period: Duration,
    /// Rules per rule group.
    pub ruler_max_rules_per_rule_group: i32,
    /// Series limits per metric name.
    pub max_series_per_metric_overrides: BTreeMap<String, u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            ingestion_rate: 10_000.0,
            ingestion_burst_size: 200_000,
            max_global_series_per_user: 150_000,
            active_series_custom_trackers: TrackerMatchers::default(),
            metric_relabel_configs: LabelSelectors::default(),
            compactor_blocks_retention_period: Duration::ZERO,
            ruler_max_rules_per_rule_group: 20,
            max_series_per_metric_overrides: BTreeMap::new(),
        }
    }
}

impl Describe for LimitsConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<f64>("ingestion_rate"),
                FieldDescriptor::of::<i32>("ingestion_burst_size"),
                FieldDescriptor::of::<u64>("max_global_series_per_user"),
                FieldDescriptor::of::<TrackerMatchers>("active_series_custom_trackers")
                    .category(Category::Advanced),
                FieldDescriptor::of::<LabelSelectors>("metric_relabel_configs").doc(
                    "nocli|description=List of metric relabel configurations. Note that in most situations, it is more effective to use metrics relabeling directly in the Prometheus server.|default=[]",
                ),
                FieldDescriptor::of::<Duration>("compactor_blocks_retention_period"),
                FieldDescriptor::of::<i32>("ruler_max_rules_per_rule_group"),
                FieldDescriptor::of::<BTreeMap<String, u64>>("max_series_per_metric_overrides")
                    .doc("nocli|description=Per-metric overrides of the series limit.")
                    .category(Category::Experimental),
            ]
        })
    }
}

impl RegisterFlags for LimitsConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "ingestion_rate",
            "distributor.ingestion-rate-limit",
            self.ingestion_rate,
            "Per-tenant ingestion rate limit in samples per second.",
        );
        flags.register(
            "ingestion_burst_size",
            "distributor.ingestion-burst-size",
            self.ingestion_burst_size,
            "Per-tenant allowed ingestion burst size (in number of samples).",
        );
        flags.register(
            "max_global_series_per_user",
            "ingester.max-global-series-per-user",
            self.max_global_series_per_user,
            "The maximum number of in-memory series per tenant, across the cluster before replication. 0 to disable.",
        );
        flags.register(
            "active_series_custom_trackers",
            "ingester.active-series-custom-trackers",
            &self.active_series_custom_trackers,
            "Additional active series metrics, matching the provided matchers. Matchers should be in form <name>:<matcher>, like 'foobar:{foo=\"bar\"}'. Multiple matchers can be provided either providing the flag multiple times or providing multiple semicolon-separated values to a single flag.",
        );
        flags.register(
            "compactor_blocks_retention_period",
            "compactor.blocks-retention-period",
            format_duration(self.compactor_blocks_retention_period),
            "Delete blocks containing samples older than the specified retention period. 0 to disable.",
        );
        flags.register(
            "ruler_max_rules_per_rule_group",
            "ruler.max-rules-per-rule-group",
            self.ruler_max_rules_per_rule_group,
            "Maximum number of rules per rule group per-tenant. 0 to disable.",
        );
    }
}

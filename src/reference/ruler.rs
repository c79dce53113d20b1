use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    flags::{FlagScope, RegisterFlags},
    schema::{Category, Describe, FieldDescriptor, Shape, StringSliceCsv, UrlValue, format_duration},
};

/// Recording and alerting rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerConfig {
    /// URL of the alerts return path.
    pub external_url: UrlValue,
    /// Rule evaluation period.
    pub evaluation_interval: Duration,
    /// Rule change polling period.
    pub poll_interval: Duration,
    /// Scratch directory for loaded rule files.
    pub rule_path: String,
    /// Alertmanager URLs notifications are sent to.
    pub alertmanager_url: String,
    /// Tenants evaluated by this ruler; empty means all.
    pub enabled_tenants: StringSliceCsv,
    /// Tenants never evaluated by this ruler.
    pub disabled_tenants: StringSliceCsv,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            external_url: UrlValue::default(),
            evaluation_interval: Duration::from_secs(60),
            poll_interval: Duration::from_secs(10 * 60),
            rule_path: "./data-ruler/".to_string(),
            alertmanager_url: String::new(),
            enabled_tenants: StringSliceCsv::default(),
            disabled_tenants: StringSliceCsv::default(),
        }
    }
}

impl Describe for RulerConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<UrlValue>("external_url"),
                FieldDescriptor::of::<Duration>("evaluation_interval"),
                FieldDescriptor::of::<Duration>("poll_interval"),
                FieldDescriptor::of::<String>("rule_path"),
                FieldDescriptor::of::<String>("alertmanager_url"),
                FieldDescriptor::of::<StringSliceCsv>("enabled_tenants")
                    .category(Category::Advanced),
                FieldDescriptor::of::<StringSliceCsv>("disabled_tenants")
                    .category(Category::Advanced),
            ]
        })
    }
}

impl RegisterFlags for RulerConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "external_url",
            "external.url",
            &self.external_url,
            "URL of alerts return path.",
        );
        flags.register(
            "evaluation_interval",
            "evaluation-interval",
            format_duration(self.evaluation_interval),
            "How frequently to evaluate rules",
        );
        flags.register(
            "poll_interval",
            "poll-interval",
            format_duration(self.poll_interval),
            "How frequently to poll for rule changes",
        );
        flags.register(
            "rule_path",
            "rule-path",
            &self.rule_path,
            "Directory to store temporary rule files loaded by the Prometheus rule managers. This directory is not required to be persisted between restarts.",
        );
        flags.register(
            "alertmanager_url",
            "alertmanager-url",
            &self.alertmanager_url,
            "Comma-separated list of URL(s) of the Alertmanager(s) to send notifications to.",
        );
        flags.register(
            "enabled_tenants",
            "enabled-tenants",
            &self.enabled_tenants,
            "Comma separated list of tenants whose rules this ruler can evaluate. If specified, only these tenants will be handled by ruler, otherwise this ruler can process rules from all tenants.",
        );
        flags.register(
            "disabled_tenants",
            "disabled-tenants",
            &self.disabled_tenants,
            "Comma separated list of tenants whose rules this ruler cannot evaluate. If specified, a ruler that would normally pick the specified tenant(s) for processing will ignore them instead.",
        );
    }
}

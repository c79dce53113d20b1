//! Reference configuration documented by the `generate-docs` binary.
//!
//! Models a metrics service: HTTP/gRPC server, object storage buckets for
//! blocks and rules, ruler, querier and per-tenant limits. Storage backends
//! recur under several buckets and are promoted to root blocks.

mod limits;
mod querier;
mod ruler;
mod server;
mod storage;

use std::sync::LazyLock;

pub use limits::LimitsConfig;
pub use querier::QuerierConfig;
pub use ruler::RulerConfig;
pub use server::ServerConfig;
pub use storage::{BucketConfig, FilesystemConfig, S3Config};

use serde::{Deserialize, Serialize};

use crate::{
    docs::{RootBlock, RootBlockRegistry},
    flags::{FlagScope, RegisterFlags},
    schema::{
        Category, CategoryOverrides, Describe, FieldDescriptor, LogFormat, LogLevel, Shape,
        StringSliceCsv,
    },
};

static ROOT_BLOCKS: LazyLock<RootBlockRegistry> = LazyLock::new(|| {
    RootBlockRegistry::new([
        RootBlock::of::<ServerConfig>(
            "server",
            "The server block configures the HTTP and gRPC servers of the launched service(s).",
        ),
        RootBlock::of::<RulerConfig>(
            "ruler",
            "The ruler block configures the ruler.",
        ),
        RootBlock::of::<QuerierConfig>(
            "querier",
            "The querier block configures the querier.",
        ),
        RootBlock::of::<LimitsConfig>(
            "limits",
            "The limits block configures default and per-tenant limits imposed by components.",
        ),
        RootBlock::of::<S3Config>(
            "s3_storage_backend",
            "The s3_storage_backend block configures the connection to Amazon S3 object storage backend.",
        ),
        RootBlock::of::<FilesystemConfig>(
            "filesystem_storage_backend",
            "The filesystem_storage_backend block configures the usage of local file system as object storage backend.",
        ),
    ])
});

/// Root blocks of the reference configuration.
pub fn root_blocks() -> &'static RootBlockRegistry {
    &ROOT_BLOCKS
}

/// Category reassignments shipped with the reference configuration.
pub fn category_overrides() -> CategoryOverrides {
    [
        ("querier.max-concurrent", Category::Advanced),
        ("ruler.poll-interval", Category::Advanced),
    ]
    .into_iter()
    .collect()
}

/// Top-level configuration of the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Components to run.
    pub target: StringSliceCsv,

    /// Whether requests must carry a tenant ID.
    pub multitenancy_enabled: bool,

    /// Minimum severity of emitted log lines.
    pub log_level: LogLevel,

    /// Encoding of emitted log lines.
    pub log_format: LogFormat,

    /// HTTP path prefixes, serialized at the top level.
    #[serde(flatten)]
    pub api: ApiConfig,

    /// HTTP and gRPC servers.
    pub server: ServerConfig,

    /// Bucket holding TSDB blocks.
    pub blocks_storage: BucketConfig,

    /// Bucket holding rule groups.
    pub ruler_storage: BucketConfig,

    /// Rule evaluation.
    pub ruler: RulerConfig,

    /// Query execution.
    pub querier: QuerierConfig,

    /// Default per-tenant limits.
    pub limits: LimitsConfig,

    /// Accepted and ignored; the ingester client no longer has its own timeout.
    #[serde(skip_serializing)]
    pub unused_flag_ingester_client_timeout: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            target: StringSliceCsv(vec!["all".to_string()]),
            multitenancy_enabled: true,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            blocks_storage: BucketConfig::with_directory("blocks"),
            ruler_storage: BucketConfig::with_directory("ruler"),
            ruler: RulerConfig::default(),
            querier: QuerierConfig::default(),
            limits: LimitsConfig::default(),
            unused_flag_ingester_client_timeout: String::new(),
        }
    }
}

impl Describe for ServiceConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<StringSliceCsv>("target"),
                FieldDescriptor::of::<bool>("multitenancy_enabled").category(Category::Advanced),
                FieldDescriptor::of::<LogLevel>("log_level"),
                FieldDescriptor::of::<LogFormat>("log_format"),
                FieldDescriptor::of::<ApiConfig>("api").inline(),
                FieldDescriptor::of::<ServerConfig>("server"),
                FieldDescriptor::of::<BucketConfig>("blocks_storage")
                    .doc("description=The blocks_storage block configures the bucket holding TSDB blocks."),
                FieldDescriptor::of::<BucketConfig>("ruler_storage")
                    .doc("description=The ruler_storage block configures the bucket holding rule groups."),
                FieldDescriptor::of::<RulerConfig>("ruler"),
                FieldDescriptor::of::<QuerierConfig>("querier"),
                FieldDescriptor::of::<LimitsConfig>("limits"),
                FieldDescriptor::of::<String>("unused_flag_ingester_client_timeout"),
            ]
        })
    }
}

impl RegisterFlags for ServiceConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "target",
            "target",
            &self.target,
            "Comma-separated list of components to include in the instantiated process.",
        );
        flags.register(
            "multitenancy_enabled",
            "auth.multitenancy-enabled",
            self.multitenancy_enabled,
            "When set to true, incoming HTTP requests must specify tenant ID in HTTP X-Scope-OrgId header.",
        );
        flags.register(
            "log_level",
            "log.level",
            self.log_level,
            "Only log messages with the given severity or above. Valid levels: [error, warn, info, debug, trace]",
        );
        flags.register(
            "log_format",
            "log.format",
            self.log_format,
            "Output log messages in the given format. Valid formats: [pretty, json]",
        );
        flags.deprecated(
            "unused_flag_ingester_client_timeout",
            "ingester.client.timeout",
            "This flag is no longer functional.",
        );

        self.api.register_flags(&mut flags.nested("api", ""));
        self.server.register_flags(&mut flags.nested("server", "server."));
        self.blocks_storage
            .register_flags(&mut flags.nested("blocks_storage", "blocks-storage."));
        self.ruler_storage
            .register_flags(&mut flags.nested("ruler_storage", "ruler-storage."));
        self.ruler.register_flags(&mut flags.nested("ruler", "ruler."));
        self.querier.register_flags(&mut flags.nested("querier", "querier."));
        self.limits.register_flags(&mut flags.nested("limits", ""));
    }
}

/// HTTP path prefixes of the public API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix of the Prometheus-compatible query API.
    pub prometheus_http_prefix: String,

    /// Prefix of the Alertmanager API.
    pub alertmanager_http_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prometheus_http_prefix: "/prometheus".to_string(),
            alertmanager_http_prefix: "/alertmanager".to_string(),
        }
    }
}

impl Describe for ApiConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("prometheus_http_prefix")
                    .category(Category::Advanced),
                FieldDescriptor::of::<String>("alertmanager_http_prefix")
                    .category(Category::Advanced),
            ]
        })
    }
}

impl RegisterFlags for ApiConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "prometheus_http_prefix",
            "http.prometheus-http-prefix",
            &self.prometheus_http_prefix,
            "HTTP URL path under which the Prometheus api will be served.",
        );
        flags.register(
            "alertmanager_http_prefix",
            "http.alertmanager-http-prefix",
            &self.alertmanager_http_prefix,
            "HTTP URL path under which the Alertmanager ui and api will be served.",
        );
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    flags::{FlagScope, RegisterFlags},
    schema::{Category, Describe, FieldDescriptor, Secret, Shape, format_duration},
};

/// HTTP and gRPC listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listen address; empty listens on all interfaces.
    pub http_listen_address: String,
    /// HTTP listen port.
    pub http_listen_port: u16,
    /// gRPC listen port.
    pub grpc_listen_port: u16,
    /// Time allowed for in-flight requests on shutdown.
    pub graceful_shutdown_timeout: Duration,
    /// Largest accepted gRPC message, in bytes.
    pub grpc_server_max_recv_msg_size: usize,
    /// TLS key of the HTTP listener.
    pub http_tls_key: Secret,
    /// Path prefix of every HTTP route.
    pub http_path_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_listen_address: String::new(),
            http_listen_port: 8080,
            grpc_listen_port: 9095,
            graceful_shutdown_timeout: Duration::from_secs(30),
            grpc_server_max_recv_msg_size: 100 * 1024 * 1024,
            http_tls_key: Secret::default(),
            http_path_prefix: String::new(),
        }
    }
}

impl Describe for ServerConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("http_listen_address"),
                FieldDescriptor::of::<u16>("http_listen_port"),
                FieldDescriptor::of::<u16>("grpc_listen_port"),
                FieldDescriptor::of::<Duration>("graceful_shutdown_timeout")
                    .category(Category::Advanced),
                FieldDescriptor::of::<usize>("grpc_server_max_recv_msg_size")
                    .category(Category::Advanced),
                FieldDescriptor::of::<Secret>("http_tls_key"),
                FieldDescriptor::of::<String>("http_path_prefix")
                    .doc("hidden"),
            ]
        })
    }
}

impl RegisterFlags for ServerConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "http_listen_address",
            "http-listen-address",
            &self.http_listen_address,
            "HTTP server listen address.",
        );
        flags.register(
            "http_listen_port",
            "http-listen-port",
            self.http_listen_port,
            "HTTP server listen port.",
        );
        flags.register(
            "grpc_listen_port",
            "grpc-listen-port",
            self.grpc_listen_port,
            "gRPC server listen port.",
        );
        flags.register(
            "graceful_shutdown_timeout",
            "graceful-shutdown-timeout",
            format_duration(self.graceful_shutdown_timeout),
            "Timeout for graceful shutdowns",
        );
        flags.register(
            "grpc_server_max_recv_msg_size",
            "grpc-max-recv-msg-size-bytes",
            self.grpc_server_max_recv_msg_size,
            "Limit on the size of a gRPC message this server can receive (bytes).",
        );
        flags.register(
            "http_tls_key",
            "http-tls-key-path",
            &self.http_tls_key,
            "HTTP server key path.",
        );
        flags.register(
            "http_path_prefix",
            "path-prefix",
            &self.http_path_prefix,
            "Base path to serve all API routes from (e.g. /v1/)",
        );
    }
}

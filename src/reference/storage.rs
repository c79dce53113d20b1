use serde::{Deserialize, Serialize};

use crate::{
    flags::{FlagScope, RegisterFlags},
    schema::{Category, Describe, FieldDescriptor, Secret, Shape},
};

/// Object storage bucket, backed by one of the supported clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    /// Client in use: `s3` or `filesystem`.
    pub backend: String,
    /// S3 client settings.
    pub s3: S3Config,
    /// Filesystem client settings.
    pub filesystem: FilesystemConfig,
}

impl BucketConfig {
    /// Filesystem-backed bucket rooted at `dir`.
    pub fn with_directory(dir: &str) -> Self {
        Self {
            filesystem: FilesystemConfig {
                dir: dir.to_string(),
            },
            ..Self::default()
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            backend: "filesystem".to_string(),
            s3: S3Config::default(),
            filesystem: FilesystemConfig::default(),
        }
    }
}

impl Describe for BucketConfig {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("backend"),
                FieldDescriptor::of::<S3Config>("s3"),
                FieldDescriptor::of::<FilesystemConfig>("filesystem"),
            ]
        })
    }
}

impl RegisterFlags for BucketConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "backend",
            "backend",
            &self.backend,
            "Backend storage to use. Supported backends are: s3, filesystem.",
        );
        self.s3.register_flags(&mut flags.nested("s3", "s3."));
        self.filesystem
            .register_flags(&mut flags.nested("filesystem", "filesystem."));
    }
}

/// Amazon S3 client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// S3 endpoint, as `host:port`.
    pub endpoint: String,
    /// Bucket name.
    pub bucket_name: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: Secret,
    /// Use plain HTTP.
    pub insecure: bool,
    /// Request signature version.
    pub signature_version: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bucket_name: String::new(),
            access_key_id: String::new(),
            secret_access_key: Secret::default(),
            insecure: false,
            signature_version: "v4".to_string(),
        }
    }
}

impl Describe for S3Config {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("endpoint"),
                FieldDescriptor::of::<String>("bucket_name"),
                FieldDescriptor::of::<String>("access_key_id"),
                FieldDescriptor::of::<Secret>("secret_access_key"),
                FieldDescriptor::of::<bool>("insecure").category(Category::Advanced),
                FieldDescriptor::of::<String>("signature_version")
                    .category(Category::Advanced),
            ]
        })
    }
}

impl RegisterFlags for S3Config {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "endpoint",
            "endpoint",
            &self.endpoint,
            "The S3 bucket endpoint. It could be an AWS S3 endpoint listed at https://docs.aws.amazon.com/general/latest/gr/s3.html or the address of an S3-compatible service in hostname:port format.",
        );
        flags.register(
            "bucket_name",
            "bucket-name",
            &self.bucket_name,
            "S3 bucket name",
        );
        flags.register(
            "access_key_id",
            "access-key-id",
            &self.access_key_id,
            "S3 access key ID",
        );
        flags.register(
            "secret_access_key",
            "secret-access-key",
            &self.secret_access_key,
            "S3 secret access key",
        );
        flags.register(
            "insecure",
            "insecure",
            self.insecure,
            "If enabled, use http:// for the S3 endpoint instead of https://. This could be useful in local dev/test environments while using an S3-compatible backend storage, like Minio.",
        );
        flags.register(
            "signature_version",
            "signature-version",
            &self.signature_version,
            "The signature version to use for authenticating against S3. Supported values are: v4, v2.",
        );
    }
}

/// Local directory used as a bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesystemConfig {
    /// Root directory of the bucket.
    pub dir: String,
}

impl Describe for FilesystemConfig {
    fn shape() -> Shape {
        Shape::Section(|| vec![FieldDescriptor::of::<String>("dir")])
    }
}

impl RegisterFlags for FilesystemConfig {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register(
            "dir",
            "dir",
            &self.dir,
            "Local filesystem storage directory.",
        );
    }
}

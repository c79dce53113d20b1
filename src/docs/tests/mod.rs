//! Unit tests for the extraction engine.
//!
//! Fixtures are descriptor-only types: the engine never looks at field
//! values, so most of them are unit structs.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, mpsc::Sender},
    time::Duration,
};

use serde_json::json;

use crate::{
    docs::{
        BlockEntry, ConfigBlock, ConfigEntry, ExtractError, Extractor, FieldEntry, RootBlock,
        RootBlockRegistry, SpecialType, classify, find_flags_prefix, reifiable_types, reify,
        resolve, try_reify,
    },
    flags::{FlagKey, FlagRegistry, FlagScope, RegisterFlags},
    schema::{
        Category, CategoryOverrides, Describe, DocAnnotation, FieldDescriptor, LABEL_SELECTORS_TYPE,
        LabelSelectors, LogFormat, LogLevel, Secret, Shape, StringSliceCsv,
        TRACKER_MATCHERS_TYPE, Timestamp, TrackerMatchers, TypeInfo, UrlValue, format_duration,
    },
};

fn field<'b>(block: &'b ConfigBlock, name: &str) -> &'b FieldEntry {
    block
        .entry(name)
        .and_then(ConfigEntry::as_field)
        .unwrap_or_else(|| panic!("no field '{name}' in block '{}'", block.name))
}

fn block_entry<'b>(block: &'b ConfigBlock, name: &str) -> &'b BlockEntry {
    block
        .entry(name)
        .and_then(ConfigEntry::as_block)
        .unwrap_or_else(|| panic!("no block '{name}' in block '{}'", block.name))
}

fn names(block: &ConfigBlock) -> Vec<&str> {
    block.entries.iter().map(ConfigEntry::name).collect()
}

fn extract<T: Describe + RegisterFlags + Default>(
    roots: &RootBlockRegistry,
) -> Result<Vec<Arc<ConfigBlock>>, ExtractError> {
    Extractor::new(roots).extract_config::<T>()
}

struct Retry {
    retries: i32,
}

impl Default for Retry {
    fn default() -> Self {
        Self { retries: 3 }
    }
}

impl Describe for Retry {
    fn shape() -> Shape {
        Shape::Section(|| vec![FieldDescriptor::of::<i32>("retries")])
    }
}

impl RegisterFlags for Retry {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register("retries", "retries", self.retries, "How many times to retry.");
    }
}

struct Client {
    enabled: bool,
    timeout: Duration,
    retry: Retry,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: Duration::from_secs(30),
            retry: Retry::default(),
        }
    }
}

impl Describe for Client {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<bool>("enabled"),
                FieldDescriptor::of::<Duration>("timeout"),
                FieldDescriptor::of::<Retry>("retry").inline(),
            ]
        })
    }
}

impl RegisterFlags for Client {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register("enabled", "enabled", self.enabled, "Enable the client.");
        flags.register(
            "timeout",
            "timeout",
            format_duration(self.timeout),
            "Request timeout.",
        );
        self.retry.register_flags(&mut flags.nested("retry", ""));
    }
}

struct Bucket {
    endpoint: String,
}

impl Default for Bucket {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
        }
    }
}

impl Describe for Bucket {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("endpoint"),
                FieldDescriptor::of::<Secret>("secret_key"),
            ]
        })
    }
}

impl RegisterFlags for Bucket {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register("endpoint", "endpoint", &self.endpoint, "Bucket endpoint.");
        flags.register("secret_key", "secret-key", "", "Bucket secret key.");
    }
}

#[derive(Default)]
struct Storage {
    bucket: Bucket,
}

impl Describe for Storage {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<String>("backend"),
                FieldDescriptor::of::<Bucket>("bucket"),
            ]
        })
    }
}

impl RegisterFlags for Storage {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        flags.register("backend", "backend", "s3", "Storage backend.");
        self.bucket.register_flags(&mut flags.nested("bucket", "bucket."));
    }
}

#[derive(Default)]
struct Service {
    bucket: Bucket,
    storage: Storage,
}

impl Describe for Service {
    fn shape() -> Shape {
        Shape::Section(|| {
            vec![
                FieldDescriptor::of::<Bucket>("bucket"),
                FieldDescriptor::of::<Storage>("storage")
                    .doc("required|description=Rule storage."),
            ]
        })
    }
}

impl RegisterFlags for Service {
    fn register_flags(&self, flags: &mut FlagScope<'_>) {
        self.bucket
            .register_flags(&mut flags.nested("bucket", "blocks-storage."));
        self.storage
            .register_flags(&mut flags.nested("storage", "ruler-storage."));
    }
}

fn bucket_roots() -> RootBlockRegistry {
    RootBlockRegistry::new([RootBlock::of::<Bucket>(
        "bucket_backend",
        "The bucket_backend block configures the object storage client.",
    )])
}

mod walker {
    use super::*;

    #[test]
    fn inline_section_folds_into_parent() {
        let roots = RootBlockRegistry::default();
        let blocks = extract::<Client>(&roots).unwrap();

        assert_eq!(blocks.len(), 1);
        let top = &blocks[0];
        assert_eq!(names(top), ["enabled", "timeout", "retries"]);
        assert_eq!(top.blocks().count(), 0);

        let enabled = field(top, "enabled");
        assert_eq!(enabled.semantic_type, "boolean");
        assert_eq!(enabled.flag.as_deref(), Some("enabled"));
        assert_eq!(enabled.default.as_deref(), Some("false"));

        let timeout = field(top, "timeout");
        assert_eq!(timeout.semantic_type, "duration");
        assert_eq!(timeout.flag.as_deref(), Some("timeout"));
        assert_eq!(timeout.default.as_deref(), Some("30s"));

        let retries = field(top, "retries");
        assert_eq!(retries.semantic_type, "int");
        assert_eq!(retries.flag.as_deref(), Some("retries"));
        assert_eq!(retries.default.as_deref(), Some("3"));
        assert_eq!(retries.description, "How many times to retry.");
    }

    #[test]
    fn recurring_root_block_is_shared() {
        let roots = bucket_roots();
        let blocks = extract::<Service>(&roots).unwrap();

        assert_eq!(blocks.len(), 2);
        let top = &blocks[0];
        let shared = &blocks[1];
        assert_eq!(shared.name, "bucket_backend");
        assert_eq!(
            shared.description,
            "The bucket_backend block configures the object storage client."
        );
        assert_eq!(names(shared), ["endpoint", "secret_key"]);

        let direct = block_entry(top, "bucket");
        assert!(direct.root);
        assert!(Arc::ptr_eq(&direct.block, shared));

        let storage = block_entry(top, "storage");
        assert!(!storage.root);
        assert!(storage.required);
        assert_eq!(storage.block.name, "storage");
        assert_eq!(storage.block.description, "Rule storage.");
        assert_eq!(names(&storage.block), ["backend", "bucket"]);

        let nested = block_entry(&storage.block, "bucket");
        assert!(nested.root);
        assert!(Arc::ptr_eq(&nested.block, shared));
    }

    #[test]
    fn recurring_root_block_collects_flag_prefixes() {
        let roots = bucket_roots();
        let blocks = extract::<Service>(&roots).unwrap();
        let shared = &blocks[1];

        let prefixes: Vec<&str> = shared.flag_prefixes.iter().map(String::as_str).collect();
        assert_eq!(prefixes, ["blocks-storage", "ruler-storage.bucket"]);

        // Flags inside the shared block come from its first occurrence.
        assert_eq!(
            field(shared, "endpoint").flag.as_deref(),
            Some("blocks-storage.endpoint")
        );
        assert!(blocks[0].flag_prefixes.is_empty());
    }

    #[test]
    fn root_type_passed_directly_is_expanded() {
        let roots = bucket_roots();
        let blocks = extract::<Bucket>(&roots).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "");
        assert_eq!(names(&blocks[0]), ["endpoint", "secret_key"]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let roots = bucket_roots();

        let first = extract::<Service>(&roots).unwrap();
        let second = extract::<Service>(&roots).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn defaults_come_from_a_fresh_instance() {
        let roots = RootBlockRegistry::default();

        let blocks = extract::<Client>(&roots).unwrap();

        assert_eq!(field(&blocks[0], "timeout").default.as_deref(), Some("30s"));
        assert_eq!(field(&blocks[0], "retries").default.as_deref(), Some("3"));
    }

    #[test]
    fn live_values_document_only_through_an_explicit_registry() {
        let roots = RootBlockRegistry::default();
        let live = Client {
            timeout: Duration::from_secs(90),
            ..Client::default()
        };

        let blocks = extract::<Client>(&roots).unwrap();
        assert_eq!(field(&blocks[0], "timeout").default.as_deref(), Some("30s"));

        let blocks = Extractor::new(&roots)
            .extract(&TypeInfo::of::<Client>(), &FlagRegistry::from_config(&live))
            .unwrap();
        assert_eq!(field(&blocks[0], "timeout").default.as_deref(), Some("1m30s"));
    }
}

mod skipping {
    use super::*;

    #[derive(Default)]
    struct Misc;

    impl Describe for Misc {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<String>("visible"),
                    FieldDescriptor::of::<String>("secret_sauce").doc("hidden"),
                    FieldDescriptor::of::<fn(u32) -> bool>("on_change"),
                    FieldDescriptor::of::<bool>("unused_flag_legacy"),
                    FieldDescriptor::of::<String>("internal").unnamed(),
                    FieldDescriptor::of::<String>("flattened_leaf").inline(),
                    FieldDescriptor::of::<Sender<u8>>("events").doc("hidden"),
                ]
            })
        }
    }

    impl RegisterFlags for Misc {
        fn register_flags(&self, flags: &mut FlagScope<'_>) {
            flags.register("visible", "visible", "", "Shown.");
            flags.deprecated("unused_flag_legacy", "legacy", "Gone.");
        }
    }

    #[test]
    fn only_documentable_fields_remain() {
        let roots = RootBlockRegistry::default();
        let blocks = extract::<Misc>(&roots).unwrap();

        assert_eq!(names(&blocks[0]), ["visible"]);
    }
}

mod annotations {
    use super::*;

    #[derive(Default)]
    struct Annotated;

    impl Describe for Annotated {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<String>("address").doc("nocli"),
                    FieldDescriptor::of::<Duration>("interval")
                        .doc("default=1h|description=How often to sync."),
                    FieldDescriptor::of::<u32>("workers").doc("default=4"),
                    FieldDescriptor::of::<u32>("shards").doc("required"),
                    FieldDescriptor::of::<String>("mode").doc("hidden||"),
                    FieldDescriptor::of::<String>("internal_only").doc("hidden|"),
                    FieldDescriptor::of::<String>("local_only").doc("nocli||required"),
                ]
            })
        }
    }

    impl RegisterFlags for Annotated {
        fn register_flags(&self, flags: &mut FlagScope<'_>) {
            flags.register("address", "address", "0.0.0.0", "Listen address.");
            flags.register("interval", "interval", "90s", "Sync interval.");
            flags.register("shards", "shards", 16, "Shard count.");
            flags.register("mode", "mode", "fast", "Mode.");
            flags.register("internal_only", "internal-only", "", "Internal.");
            flags.register("local_only", "local-only", "", "Local.");
        }
    }

    fn top() -> Arc<ConfigBlock> {
        let roots = RootBlockRegistry::default();
        let mut blocks = extract::<Annotated>(&roots).unwrap();
        blocks.remove(0)
    }

    #[test]
    fn nocli_field_has_no_flag() {
        let top = top();
        let address = field(&top, "address");

        assert_eq!(address.flag, None);
        assert_eq!(address.default, None);
        assert_eq!(address.description, "");
    }

    #[test]
    fn explicit_default_and_description_win() {
        let top = top();
        let interval = field(&top, "interval");

        assert_eq!(interval.flag.as_deref(), Some("interval"));
        assert_eq!(interval.default.as_deref(), Some("1h"));
        assert_eq!(interval.description, "How often to sync.");
    }

    #[test]
    fn explicit_default_without_flag() {
        let top = top();
        let workers = field(&top, "workers");

        assert_eq!(workers.flag, None);
        assert_eq!(workers.default.as_deref(), Some("4"));
    }

    #[test]
    fn required_is_carried() {
        let top = top();

        assert!(field(&top, "shards").required);
        assert!(!field(&top, "workers").required);
        assert_eq!(field(&top, "shards").default.as_deref(), Some("16"));
    }

    #[test]
    fn keyless_tokens_do_not_drop_the_others() {
        let top = top();

        assert_eq!(
            names(&top),
            ["address", "interval", "workers", "shards", "local_only"]
        );

        let local_only = field(&top, "local_only");
        assert_eq!(local_only.flag, None);
        assert!(local_only.required);
    }
}

mod special_types {
    use super::*;

    #[derive(Default)]
    struct Wrapped;

    impl Describe for Wrapped {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<Secret>("token"),
                    FieldDescriptor::of::<Secret>("api_key"),
                    FieldDescriptor::of::<Duration>("window"),
                    FieldDescriptor::of::<UrlValue>("endpoint"),
                    FieldDescriptor::of::<Timestamp>("since"),
                    FieldDescriptor::of::<Duration>("backoff"),
                    FieldDescriptor::of::<TrackerMatchers>("trackers"),
                    FieldDescriptor::of::<LogLevel>("log_level"),
                    FieldDescriptor::of::<LogFormat>("log_format"),
                    FieldDescriptor::of::<StringSliceCsv>("tenants"),
                ]
            })
        }
    }

    impl RegisterFlags for Wrapped {
        fn register_flags(&self, flags: &mut FlagScope<'_>) {
            flags.register("token", "token", "hunter2", "Access token.");
            flags.register("api_key", "api-key", Secret::new("hunter2"), "API key.");
            flags.register(
                "window",
                "window",
                format_duration(Duration::from_secs(90)),
                "Window.",
            );
            flags.register("endpoint", "endpoint", " http://localhost:8080 ", "Endpoint.");
            flags.register("since", "since", "2024-03-01T13:00:00+01:00", "Start.");
            flags.register("backoff", "backoff", "90s", "Backoff.");
            flags.register("trackers", "trackers", "", "Trackers.");
            flags.register("log_level", "log.level", LogLevel::Warn, "Level.");
            flags.register("log_format", "log.format", LogFormat::Json, "Format.");
            flags.register("tenants", "tenants", "a,b", "Tenants.");
        }
    }

    fn top() -> Arc<ConfigBlock> {
        let roots = RootBlockRegistry::default();
        let mut blocks = extract::<Wrapped>(&roots).unwrap();
        blocks.remove(0)
    }

    #[test]
    fn defaults_are_documented_as_registered() {
        let top = top();
        let flags = FlagRegistry::collect::<Wrapped>();

        for entry in top.fields().filter(|entry| entry.flag.is_some()) {
            let key = FlagKey::from(entry.name.as_str());
            let registered = flags.get(&key).unwrap();
            assert_eq!(
                entry.default.as_deref(),
                Some(registered.default_value.as_str()),
                "{}",
                entry.name
            );
        }

        assert_eq!(field(&top, "token").default.as_deref(), Some("hunter2"));
        assert_eq!(
            field(&top, "endpoint").default.as_deref(),
            Some(" http://localhost:8080 ")
        );
        assert_eq!(
            field(&top, "since").default.as_deref(),
            Some("2024-03-01T13:00:00+01:00")
        );
        assert_eq!(field(&top, "backoff").default.as_deref(), Some("90s"));
    }

    #[test]
    fn registering_value_renders_the_default() {
        let top = top();

        assert_eq!(field(&top, "api_key").semantic_type, "string");
        assert_eq!(field(&top, "api_key").default.as_deref(), Some("********"));
        assert_eq!(field(&top, "window").semantic_type, "duration");
        assert_eq!(field(&top, "window").default.as_deref(), Some("1m30s"));
    }

    #[test]
    fn special_types_have_fixed_names() {
        let top = top();

        assert_eq!(field(&top, "token").semantic_type, "string");
        assert_eq!(field(&top, "endpoint").semantic_type, "url");
        assert_eq!(field(&top, "since").semantic_type, "time");
        assert_eq!(field(&top, "backoff").semantic_type, "duration");
    }

    #[test]
    fn custom_types_keep_their_names() {
        let top = top();

        assert_eq!(field(&top, "trackers").semantic_type, TRACKER_MATCHERS_TYPE);
        assert_eq!(field(&top, "log_level").semantic_type, "string");
        assert_eq!(field(&top, "log_level").default.as_deref(), Some("warn"));
        assert_eq!(field(&top, "log_format").default.as_deref(), Some("json"));
        assert_eq!(field(&top, "tenants").semantic_type, "string");
    }

    #[test]
    fn example_is_keyed_by_field_name() {
        let top = top();
        let example = field(&top, "trackers").example.clone().unwrap();

        assert_eq!(
            example.value,
            json!({
                "trackers": {
                    "dev": r#"{namespace=~"dev-.*"}"#,
                    "prod": r#"{namespace=~"prod-.*"}"#,
                }
            })
        );
        assert!(field(&top, "token").example.is_none());
        assert!(field(&top, "tenants").example.is_none());
    }
}

mod categories {
    use super::*;

    #[derive(Default)]
    struct Tiered;

    impl Describe for Tiered {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<u32>("plain"),
                    FieldDescriptor::of::<u32>("tuned").category(Category::Advanced),
                    FieldDescriptor::of::<u32>("overridden").category(Category::Advanced),
                    FieldDescriptor::of::<u32>("unflagged")
                        .doc("nocli")
                        .category(Category::Deprecated),
                ]
            })
        }
    }

    impl RegisterFlags for Tiered {
        fn register_flags(&self, flags: &mut FlagScope<'_>) {
            flags.register("plain", "plain", 1, "Plain.");
            flags.register("tuned", "tuned", 2, "Tuned.");
            flags.register("overridden", "tier.overridden", 3, "Overridden.");
            flags.register("unflagged", "unflagged", 4, "Unflagged.");
        }
    }

    #[test]
    fn override_then_declared_then_basic() {
        let roots = RootBlockRegistry::default();
        let overrides: CategoryOverrides = [
            ("tier.overridden", Category::Experimental),
            ("unflagged", Category::Basic),
        ]
        .into_iter()
        .collect();

        let blocks = Extractor::new(&roots)
            .with_category_overrides(&overrides)
            .extract_config::<Tiered>()
            .unwrap();
        let top = &blocks[0];

        assert_eq!(field(top, "plain").category, Category::Basic);
        assert_eq!(field(top, "tuned").category, Category::Advanced);
        assert_eq!(field(top, "overridden").category, Category::Experimental);
        assert_eq!(field(top, "unflagged").category, Category::Deprecated);
    }

    #[test]
    fn described_prefixes_non_basic_categories() {
        let roots = RootBlockRegistry::default();
        let blocks = extract::<Tiered>(&roots).unwrap();
        let top = &blocks[0];

        assert_eq!(field(top, "plain").described(), "Plain.");
        assert_eq!(field(top, "tuned").described(), "(advanced) Tuned.");
    }
}

mod errors {
    use super::*;

    struct Queue;

    impl Describe for Queue {
        fn shape() -> Shape {
            Shape::Section(|| vec![FieldDescriptor::of::<Sender<u8>>("events")])
        }
    }

    struct Ingester;

    impl Describe for Ingester {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<u32>("replicas"),
                    FieldDescriptor::of::<Queue>("queue"),
                ]
            })
        }
    }

    struct Node;

    impl Describe for Node {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<u32>("value"),
                    FieldDescriptor::of::<Node>("child"),
                ]
            })
        }
    }

    struct Renamed;

    impl Describe for Renamed {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<u32>("limit"),
                    FieldDescriptor::of::<u64>("max_limit").renamed("limit"),
                ]
            })
        }
    }

    struct Overlapping;

    impl Describe for Overlapping {
        fn shape() -> Shape {
            Shape::Section(|| {
                vec![
                    FieldDescriptor::of::<i32>("retries"),
                    FieldDescriptor::of::<Retry>("retry").inline(),
                ]
            })
        }
    }

    fn extract_type<T: Describe>() -> Result<Vec<Arc<ConfigBlock>>, ExtractError> {
        let roots = RootBlockRegistry::default();
        Extractor::new(&roots).extract(&TypeInfo::of::<T>(), &FlagRegistry::default())
    }

    #[test]
    fn unsupported_field_type() {
        let err = extract_type::<Ingester>().unwrap_err();

        match err {
            ExtractError::Type {
                path,
                section,
                source,
            } => {
                assert_eq!(path, "queue.events");
                assert!(section.ends_with("Queue"), "{section}");
                assert_eq!(source.kind, "chan");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_error_message_names_section() {
        let err = extract_type::<Ingester>().unwrap_err();

        assert!(err.to_string().contains("queue.events"));
        assert!(err.to_string().contains("Queue"));
    }

    #[test]
    fn root_must_be_a_section() {
        let err = extract_type::<u32>().unwrap_err();

        assert!(matches!(
            err,
            ExtractError::Shape { ref path, kind: "int", .. } if path.is_empty()
        ));
    }

    #[test]
    fn self_containing_section() {
        let err = extract_type::<Node>().unwrap_err();

        assert!(matches!(err, ExtractError::Recursive { ref path, .. } if path == "child"));
    }

    #[test]
    fn duplicate_sibling_names() {
        let err = extract_type::<Renamed>().unwrap_err();

        assert!(matches!(err, ExtractError::DuplicateEntry { ref path, .. } if path == "limit"));
    }

    #[test]
    fn inline_field_colliding_with_sibling() {
        let err = extract_type::<Overlapping>().unwrap_err();

        assert!(matches!(err, ExtractError::DuplicateEntry { ref path, .. } if path == "retries"));
    }
}

mod extract_into {
    use super::*;

    #[test]
    fn appends_to_existing_block() {
        let roots = bucket_roots();
        let extractor = Extractor::new(&roots);
        let mut block = ConfigBlock::new("", "");

        let found = extractor
            .extract_into(
                &mut block,
                &TypeInfo::of::<Client>(),
                &FlagRegistry::collect::<Client>(),
            )
            .unwrap();
        assert!(found.is_empty());
        assert_eq!(names(&block), ["enabled", "timeout", "retries"]);

        let found = extractor
            .extract_into(
                &mut block,
                &TypeInfo::of::<Service>(),
                &FlagRegistry::collect::<Service>(),
            )
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "bucket_backend");
        assert_eq!(
            names(&block),
            ["enabled", "timeout", "retries", "bucket", "storage"]
        );
        assert!(Arc::ptr_eq(&block_entry(&block, "bucket").block, &found[0]));
    }

    #[test]
    fn conflicting_names_leave_block_untouched() {
        let roots = RootBlockRegistry::default();
        let extractor = Extractor::new(&roots);
        let flags = FlagRegistry::collect::<Client>();
        let mut block = ConfigBlock::new("client", "");

        extractor
            .extract_into(&mut block, &TypeInfo::of::<Client>(), &flags)
            .unwrap();
        let err = extractor
            .extract_into(&mut block, &TypeInfo::of::<Client>(), &flags)
            .unwrap_err();

        assert!(matches!(err, ExtractError::DuplicateEntry { ref path, .. } if path == "enabled"));
        assert_eq!(block.entries.len(), 3);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn root_entries_serialize_as_references() {
        let roots = bucket_roots();
        let blocks = extract::<Service>(&roots).unwrap();

        let value = serde_json::to_value(&blocks).unwrap();

        assert_eq!(
            value[0]["entries"][0],
            json!({
                "kind": "block",
                "name": "bucket",
                "required": false,
                "root": true,
                "block": "bucket_backend",
            })
        );
        assert_eq!(value[0]["entries"][1]["block"]["name"], "storage");
        assert_eq!(
            value[0]["entries"][1]["block"]["entries"][1]["block"],
            "bucket_backend"
        );
        assert_eq!(value[1]["entries"][0]["kind"], "field");
        assert_eq!(value[1]["entries"][0]["category"], "basic");
        assert_eq!(
            value[1]["flag_prefixes"],
            json!(["blocks-storage", "ruler-storage.bucket"])
        );
        assert!(value[0].get("flag_prefixes").is_none());
    }
}

mod classify_table {
    use super::*;

    #[test]
    fn fixed_names_for_wrappers() {
        assert_eq!(classify(&TypeInfo::of::<Duration>()).unwrap(), "duration");
        assert_eq!(classify(&TypeInfo::of::<UrlValue>()).unwrap(), "url");
        assert_eq!(classify(&TypeInfo::of::<Secret>()).unwrap(), "string");
        assert_eq!(classify(&TypeInfo::of::<Timestamp>()).unwrap(), "time");
        assert_eq!(classify(&TypeInfo::of::<StringSliceCsv>()).unwrap(), "string");
        assert_eq!(
            classify(&TypeInfo::of::<LabelSelectors>()).unwrap(),
            LABEL_SELECTORS_TYPE
        );
        assert_eq!(
            classify(&TypeInfo::of::<TrackerMatchers>()).unwrap(),
            TRACKER_MATCHERS_TYPE
        );
    }

    #[test]
    fn structural_names() {
        assert_eq!(classify(&TypeInfo::of::<bool>()).unwrap(), "boolean");
        assert_eq!(classify(&TypeInfo::of::<i8>()).unwrap(), "int");
        assert_eq!(classify(&TypeInfo::of::<u64>()).unwrap(), "int");
        assert_eq!(classify(&TypeInfo::of::<usize>()).unwrap(), "int");
        assert_eq!(classify(&TypeInfo::of::<f32>()).unwrap(), "float");
        assert_eq!(classify(&TypeInfo::of::<String>()).unwrap(), "string");
        assert_eq!(
            classify(&TypeInfo::of::<Vec<Vec<String>>>()).unwrap(),
            "list of list of string"
        );
        assert_eq!(
            classify(&TypeInfo::of::<Vec<Duration>>()).unwrap(),
            "list of duration"
        );
        assert_eq!(
            classify(&TypeInfo::of::<HashMap<String, f64>>()).unwrap(),
            "map of String to f64"
        );
        assert_eq!(
            classify(&TypeInfo::of::<BTreeMap<String, Vec<String>>>()).unwrap(),
            "map of String to Vec<String>"
        );
    }

    #[test]
    fn unsupported_shapes() {
        let err = classify(&TypeInfo::of::<Sender<u8>>()).unwrap_err();
        assert_eq!(err.kind, "chan");

        let err = classify(&TypeInfo::of::<fn() -> u8>()).unwrap_err();
        assert_eq!(err.kind, "func");

        let err = classify(&TypeInfo::of::<Client>()).unwrap_err();
        assert_eq!(err.kind, "section");

        let err = classify(&TypeInfo::of::<Vec<Sender<u8>>>()).unwrap_err();
        assert_eq!(err.kind, "chan");
    }

    #[test]
    fn reify_round_trips() {
        for name in reifiable_types() {
            assert_eq!(classify(&reify(name)).as_deref(), Ok(*name), "{name}");
        }
    }

    #[test]
    fn try_reify_rejects_unknown_names() {
        assert!(try_reify("complex128").is_none());
        assert_eq!(try_reify("url"), Some(TypeInfo::of::<UrlValue>()));
    }

    #[test]
    #[should_panic(expected = "unknown field type")]
    fn reify_panics_on_unknown_names() {
        reify("complex128");
    }
}

mod correlation {
    use super::*;

    fn registry() -> FlagRegistry {
        FlagRegistry::collect::<Service>()
    }

    #[test]
    fn resolves_by_field_key() {
        let flags = registry();
        let key = FlagKey::from("storage.bucket.endpoint");

        let flag = resolve(&key, &DocAnnotation::default(), &flags).unwrap();

        assert_eq!(flag.name, "ruler-storage.bucket.endpoint");
        assert_eq!(flag.default_value, "localhost:9000");
    }

    #[test]
    fn nocli_never_resolves() {
        let flags = registry();
        let annotation = DocAnnotation::parse("nocli");

        assert!(resolve(&FlagKey::from("bucket.endpoint"), &annotation, &flags).is_none());
    }

    #[test]
    fn unregistered_field_is_not_an_error() {
        let flags = registry();

        assert!(resolve(&FlagKey::from("storage.unknown"), &DocAnnotation::default(), &flags).is_none());
    }

    #[test]
    fn special_types_by_shape() {
        assert_eq!(SpecialType::of(&Shape::Duration), Some(SpecialType::Duration));
        assert_eq!(SpecialType::of(&Shape::Secret), Some(SpecialType::Secret));
        assert_eq!(SpecialType::of(&Shape::String), None);
        assert_eq!(SpecialType::Secret.semantic_type(), "string");
        assert_eq!(SpecialType::Time.semantic_type(), "time");
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn strips_common_suffix() {
        assert_eq!(
            find_flags_prefix(&[
                "blocks-storage.s3.endpoint",
                "ruler-storage.s3.endpoint",
                "alertmanager-storage.s3.endpoint",
            ]),
            ["blocks-storage", "ruler-storage", "alertmanager-storage"]
        );
    }

    #[test]
    fn uneven_depths() {
        assert_eq!(
            find_flags_prefix(&["s3.endpoint", "ruler.s3.endpoint"]),
            ["", "ruler"]
        );
    }

    #[test]
    fn nothing_in_common() {
        assert_eq!(
            find_flags_prefix(&["a.endpoint", "b.bucket"]),
            ["a.endpoint", "b.bucket"]
        );
    }

    #[test]
    fn degenerate_inputs() {
        assert!(find_flags_prefix::<&str>(&[]).is_empty());
        assert_eq!(find_flags_prefix(&["only.flag"]), [""]);
    }
}

mod roots {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let roots = RootBlockRegistry::new([
            RootBlock::of::<Bucket>("first", "First."),
            RootBlock::of::<Bucket>("second", "Second."),
            RootBlock::of::<Storage>("storage", "Storage."),
        ]);

        assert_eq!(roots.len(), 2);
        assert_eq!(
            roots.is_root(&TypeInfo::of::<Bucket>()).map(RootBlock::name),
            Some("first")
        );
        assert!(roots.is_root(&TypeInfo::of::<Client>()).is_none());
        assert!(RootBlockRegistry::default().is_empty());
    }
}

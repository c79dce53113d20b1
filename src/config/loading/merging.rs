use toml::{Value, map::Map};

/// Merges imported documents in order, then `main` on top.
pub fn merge_toml_configs(imports: Vec<Value>, main: Value) -> Value {
    let mut accumulated = Value::Table(Map::new());

    for import in imports {
        accumulated = merge_two_toml_configs(accumulated, import);
    }

    merge_two_toml_configs(accumulated, main)
}

/// Deep merge where `overlay` wins; tables merge key by key, anything else
/// is replaced whole.
pub fn merge_two_toml_configs(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            let mut merged_table = overlay_table;

            for (key, base_value) in base_table {
                let merged_value = match merged_table.remove(&key) {
                    None => base_value,
                    Some(overlay_value) => merge_two_toml_configs(base_value, overlay_value),
                };
                merged_table.insert(key, merged_value);
            }

            Value::Table(merged_table)
        }
        (_, overlay) => overlay,
    }
}

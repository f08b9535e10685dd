use bindmeta::ast::FunctionMetadata;
use serde_json::Value;

/// Find a record by function name
pub fn assert_has_function<'a>(records: &'a [FunctionMetadata], name: &str) -> &'a FunctionMetadata {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("Expected function {} in {:?}", name, names(records)))
}

/// Parse the raw bindings of a record
pub fn bindings(record: &FunctionMetadata) -> Vec<Value> {
    record
        .raw_bindings
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap_or_else(|e| panic!("Invalid binding {}: {}", raw, e)))
        .collect()
}

/// Keys of a serialized binding, in output order
pub fn keys(binding: &Value) -> Vec<String> {
    binding
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn names(records: &[FunctionMetadata]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

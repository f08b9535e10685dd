//! Descriptor serialization
//!
//! A descriptor renders as a flat JSON object: `name`, `type`,
//! `direction`, the extra properties in order, then `dataType` when set.

use bindmeta_ast::{BindingDescriptor, FunctionMetadata, PropertyValue};
use serde_json::{Map, Value};

pub fn descriptor_value(descriptor: &BindingDescriptor) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(descriptor.name.clone()));
    object.insert("type".to_string(), Value::String(descriptor.binding_type.clone()));
    object.insert(
        "direction".to_string(),
        Value::String(descriptor.direction.as_str().to_string()),
    );

    for (key, value) in &descriptor.extra_properties {
        object.insert(key.clone(), property_json(value));
    }

    if let Some(data_type) = descriptor.data_type {
        object.insert("dataType".to_string(), Value::String(data_type.as_str().to_string()));
    }

    Value::Object(object)
}

/// Compact JSON text of one descriptor, as stored in `raw_bindings`
pub fn serialize_descriptor(descriptor: &BindingDescriptor) -> Result<String, serde_json::Error> {
    serde_json::to_string(&descriptor_value(descriptor))
}

/// The metadata artifact: a JSON array of records in generation order
pub fn serialize_metadata(records: &[FunctionMetadata], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}

fn property_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Text(text) => Value::String(text.clone()),
        // already a literal; emit its value instead of quoting it again
        PropertyValue::Literal(literal) => serde_json::from_str(literal)
            .unwrap_or_else(|_| Value::String(literal.clone())),
        PropertyValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindmeta_ast::{DataType, Direction};

    #[test]
    fn field_order_is_fixed() {
        let mut descriptor = BindingDescriptor::new("message", "QueueTrigger", Direction::In);
        descriptor.data_type = Some(DataType::String);
        descriptor
            .extra_properties
            .insert("queueName".to_string(), PropertyValue::Text("test-input".to_string()));

        assert_eq!(
            serialize_descriptor(&descriptor).unwrap(),
            r#"{"name":"message","type":"QueueTrigger","direction":"In","queueName":"test-input","dataType":"String"}"#
        );
    }

    #[test]
    fn literals_are_not_quoted_twice() {
        let mut descriptor = BindingDescriptor::new("req", "HttpTrigger", Direction::In);
        descriptor
            .extra_properties
            .insert("route".to_string(), PropertyValue::Literal("\"items/{id}\"".to_string()));
        descriptor.extra_properties.insert(
            "methods".to_string(),
            PropertyValue::List(vec!["get".to_string(), "post".to_string()]),
        );

        assert_eq!(
            serialize_descriptor(&descriptor).unwrap(),
            r#"{"name":"req","type":"HttpTrigger","direction":"In","route":"items/{id}","methods":["get","post"]}"#
        );
    }

    #[test]
    fn http_response_has_no_extras() {
        let descriptor = BindingDescriptor::http_response("$return");
        assert_eq!(
            serialize_descriptor(&descriptor).unwrap(),
            r#"{"name":"$return","type":"http","direction":"Out"}"#
        );
    }

    #[test]
    fn metadata_array_round_trips() {
        let record = FunctionMetadata {
            function_id: "id".to_string(),
            language: "dotnet-isolated".to_string(),
            name: "Fn".to_string(),
            entry_point: "App.Functions.Fn".to_string(),
            raw_bindings: vec![r#"{"name":"$return","type":"http","direction":"Out"}"#.to_string()],
            script_file: "App.dll".to_string(),
        };

        let json = serialize_metadata(&[record.clone()], true).unwrap();
        let back: Vec<FunctionMetadata> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![record]);
    }
}

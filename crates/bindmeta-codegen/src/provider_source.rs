//! Rust source for a compiled-in metadata provider
//!
//! The emitted module embeds the records and implements
//! `bindmeta_provider::FunctionMetadataProvider`, so a host can skip
//! reading the JSON artifact at startup.

use bindmeta_ast::FunctionMetadata;

pub const PROVIDER_TYPE_NAME: &str = "GeneratedFunctionMetadataProvider";
pub const REGISTRATION_FN_NAME: &str = "configure_generated_function_metadata_provider";

/// Render a provider module for the given records
pub fn emit_provider_source(records: &[FunctionMetadata]) -> String {
    let mut out = String::new();
    out.push_str("// @generated by bindmeta. Do not edit.\n\n");
    out.push_str("use bindmeta_provider::{FunctionMetadata, FunctionMetadataProvider, ProviderError, ProviderRegistry};\n");
    out.push_str("use std::path::Path;\n");
    out.push_str("use std::sync::Arc;\n\n");
    out.push_str(&format!("pub struct {};\n\n", PROVIDER_TYPE_NAME));
    out.push_str(&format!("impl FunctionMetadataProvider for {} {{\n", PROVIDER_TYPE_NAME));
    out.push_str("    fn function_metadata(&self, _directory: &Path) -> Result<Vec<FunctionMetadata>, ProviderError> {\n");

    if records.is_empty() {
        out.push_str("        Ok(Vec::new())\n");
    } else {
        out.push_str("        Ok(vec![\n");
        for record in records {
            push_record(&mut out, record);
        }
        out.push_str("        ])\n");
    }

    out.push_str("    }\n}\n\n");
    out.push_str("/// Register the generated provider as the host's metadata provider\n");
    out.push_str(&format!(
        "pub fn {}(registry: &mut ProviderRegistry) -> Result<(), ProviderError> {{\n",
        REGISTRATION_FN_NAME
    ));
    out.push_str(&format!(
        "    registry.configure_generated_provider(Arc::new({}))\n",
        PROVIDER_TYPE_NAME
    ));
    out.push_str("}\n");
    out
}

fn push_record(out: &mut String, record: &FunctionMetadata) {
    out.push_str("            FunctionMetadata {\n");
    out.push_str(&format!("                function_id: {}.to_string(),\n", literal(&record.function_id)));
    out.push_str(&format!("                language: {}.to_string(),\n", literal(&record.language)));
    out.push_str(&format!("                name: {}.to_string(),\n", literal(&record.name)));
    out.push_str(&format!("                entry_point: {}.to_string(),\n", literal(&record.entry_point)));
    out.push_str("                raw_bindings: vec![\n");
    for raw in &record.raw_bindings {
        out.push_str(&format!("                    {}.to_string(),\n", literal(raw)));
    }
    out.push_str("                ],\n");
    out.push_str(&format!("                script_file: {}.to_string(),\n", literal(&record.script_file)));
    out.push_str("            },\n");
}

/// Rust string literal; `Debug` on `str` escapes quotes and backslashes
fn literal(s: &str) -> String {
    format!("{:?}", s)
}

// crates/modsync-synth/src/render.rs
// ============================================================================
// Module: Module Rendering
// Description: Deterministic rendering of the four module file bodies.
// Purpose: Map normalized task input to byte-stable infrastructure-as-code
//          text.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Rendering is pure string assembly over normalized input. Every map is
//! emitted in ascending key order and every list of blocks in ascending name
//! order, so identical logical input renders byte-identically. Render errors
//! indicate input shapes normalization cannot produce and are a caller
//! defect.

use serde_json::Value;

use crate::error::SynthError;
use crate::input::ModuleInput;
use crate::synth::FILE_PREAMBLE;
use crate::synth::ModuleFile;
use crate::synth::REQUIRED_VERSION;

// ============================================================================
// SECTION: File Rendering
// ============================================================================

/// Declaration of the `services` input variable emitted into the variable
/// definitions file. Field order is fixed and alphabetical.
const SERVICES_VARIABLE: &str = r#"variable "services" {
  description = "Services monitored by Modsync"
  type = map(
    object({
      address    = string
      datacenter = string
      id         = string
      meta       = map(string)
      name       = string
      namespace  = string
      port       = number
      status     = string
      tags       = list(string)
    })
  )
}
"#;

/// Renders the full content of one module file, preamble included.
///
/// # Errors
///
/// Returns [`SynthError::Render`] when the input holds a name that is not a
/// valid configuration identifier.
pub fn render_file(file: ModuleFile, input: &ModuleInput) -> Result<String, SynthError> {
    let body = match file {
        ModuleFile::Main => render_main(input),
        ModuleFile::Vars => render_vars(input),
        ModuleFile::ModuleVars => render_module_vars(input),
        ModuleFile::TfvarsTmpl => Ok(render_tfvars_tmpl(input)),
    };
    let body = body.map_err(|message| SynthError::Render {
        task: input.task.name.clone(),
        file: file.filename().to_string(),
        message,
    })?;
    Ok(format!("{FILE_PREAMBLE}{body}"))
}

/// Renders the main definition file body.
fn render_main(input: &ModuleInput) -> Result<String, String> {
    let mut out = String::new();

    out.push_str("terraform {\n");
    out.push_str("  required_version = ");
    out.push_str(&hcl_string(REQUIRED_VERSION));
    out.push('\n');
    if !input.provider_info.is_empty() {
        out.push_str("  required_providers {\n");
        for (name, info) in &input.provider_info {
            ensure_ident(name, "required provider name")?;
            out.push_str("    ");
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&hcl_value(info, 4));
            out.push('\n');
        }
        out.push_str("  }\n");
    }
    // No backend block at all when none was configured; the provisioning
    // tool's own backend discovery applies.
    if let Some(backend) = input.backend_block() {
        out.push_str("  backend ");
        out.push_str(&hcl_string(backend.name()));
        out.push_str(" {\n");
        for (attr, value) in backend.attributes() {
            ensure_ident(attr, "backend attribute")?;
            out.push_str("    ");
            out.push_str(attr);
            out.push_str(" = ");
            out.push_str(&hcl_value(value, 4));
            out.push('\n');
        }
        out.push_str("  }\n");
    }
    out.push_str("}\n");

    // The blank-line separators around the provider section are emitted even
    // when no providers are configured, so the section boundaries stay at
    // fixed offsets across re-renders.
    out.push('\n');
    render_provider_blocks(&mut out, input)?;

    out.push('\n');
    render_module_block(&mut out, input)?;
    Ok(out)
}

/// Renders the provider blocks, sorted by provider name.
fn render_provider_blocks(out: &mut String, input: &ModuleInput) -> Result<(), String> {
    for (index, provider) in input.provider_blocks().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        ensure_ident(provider.name(), "provider name")?;
        out.push_str("provider ");
        out.push_str(&hcl_string(provider.name()));
        out.push_str(" {\n");
        for attr in provider.attribute_names() {
            // Drop the alias meta attribute. Each task runs its module as an
            // independently-configured instance, so aliasing is unsupported.
            if attr == "alias" {
                continue;
            }
            ensure_ident(attr, "provider attribute")?;
            out.push_str("  ");
            out.push_str(attr);
            out.push_str(" = var.");
            out.push_str(provider.name());
            out.push('.');
            out.push_str(attr);
            out.push('\n');
        }
        out.push_str("}\n");
    }
    Ok(())
}

/// Renders the task's module invocation block.
fn render_module_block(out: &mut String, input: &ModuleInput) -> Result<(), String> {
    if !input.task.description.is_empty() {
        out.push_str("# ");
        out.push_str(&input.task.description);
        out.push('\n');
    }
    ensure_ident(&input.task.name, "task name")?;
    out.push_str("module ");
    out.push_str(&hcl_string(&input.task.name));
    out.push_str(" {\n");
    out.push_str("  source = ");
    out.push_str(&hcl_string(&input.task.source));
    out.push('\n');
    if let Some(version) = input.task.version.as_deref()
        && !version.is_empty()
    {
        out.push_str("  version = ");
        out.push_str(&hcl_string(version));
        out.push('\n');
    }
    out.push_str("  services = var.services\n");
    if !input.variables.is_empty() {
        out.push('\n');
        for name in input.variables.names() {
            ensure_ident(name, "variable name")?;
            out.push_str("  ");
            out.push_str(name);
            out.push_str(" = var.");
            out.push_str(name);
            out.push('\n');
        }
    }
    out.push_str("}\n");
    Ok(())
}

/// Renders the variable definitions file body: the services variable plus one
/// declaration per configured provider so `var.<provider>.<attr>` references
/// resolve.
fn render_vars(input: &ModuleInput) -> Result<String, String> {
    let mut out = String::new();
    out.push_str(SERVICES_VARIABLE);
    for provider in input.provider_blocks() {
        ensure_ident(provider.name(), "provider name")?;
        out.push('\n');
        out.push_str("variable ");
        out.push_str(&hcl_string(provider.name()));
        out.push_str(" {\n");
        out.push_str("  default   = null\n");
        out.push_str("  sensitive = true\n");
        out.push_str("  type      = any\n");
        out.push_str("}\n");
    }
    Ok(out)
}

/// Renders the module-specific variable definitions file body, one block per
/// user variable with a type derived from the value shape.
fn render_module_vars(input: &ModuleInput) -> Result<String, String> {
    let mut out = String::new();
    for (index, (name, value)) in input.variables.iter().enumerate() {
        ensure_ident(name, "variable name")?;
        if index > 0 {
            out.push('\n');
        }
        out.push_str("variable ");
        out.push_str(&hcl_string(name));
        out.push_str(" {\n");
        out.push_str("  type = ");
        out.push_str(&hcl_type(value));
        out.push('\n');
        out.push_str("}\n");
    }
    Ok(out)
}

/// Renders the variable-values template body: a templated `services` mapping
/// keyed by service identifier, then literal assignments for user variables.
fn render_tfvars_tmpl(input: &ModuleInput) -> String {
    let mut out = String::new();
    out.push_str("services = {\n");
    for service in &input.services {
        let id = service.object_id();
        out.push_str("{{- with service ");
        out.push_str(&hcl_string(&id));
        out.push_str(" }}\n");
        out.push_str("  ");
        out.push_str(&hcl_string(&id));
        out.push_str(" = {\n");
        out.push_str("    address = \"{{ .Address }}\"\n");
        out.push_str("    id = \"{{ .ID }}\"\n");
        out.push_str("    meta = {{ .Meta | toJSON }}\n");
        out.push_str("    name = \"{{ .Name }}\"\n");
        out.push_str("    port = {{ .Port }}\n");
        out.push_str("    status = \"{{ .Status }}\"\n");
        out.push_str("    tags = {{ .Tags | toJSON }}\n");
        out.push_str("  }\n");
        out.push_str("{{- end }}\n");
    }
    out.push_str("}\n");
    if !input.variables.is_empty() {
        out.push('\n');
        for (name, value) in input.variables.iter() {
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&hcl_value(value, 0));
            out.push('\n');
        }
    }
    out
}

// ============================================================================
// SECTION: Value Rendering
// ============================================================================

/// Renders an opaque configuration value as a literal.
///
/// `indent` is the column of the assignment the value belongs to; nested
/// object entries indent two spaces past it. Object keys are emitted in
/// ascending order.
fn hcl_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => hcl_string(s),
        Value::Array(items) => {
            let rendered: Vec<String> =
                items.iter().map(|item| hcl_value(item, indent)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(entries) => {
            let mut out = String::from("{\n");
            let pad = " ".repeat(indent + 2);
            for (key, entry) in entries {
                out.push_str(&pad);
                out.push_str(&object_key(key));
                out.push_str(" = ");
                out.push_str(&hcl_value(entry, indent + 2));
                out.push('\n');
            }
            out.push_str(&" ".repeat(indent));
            out.push('}');
            out
        }
    }
}

/// Derives a type expression from a value's shape.
fn hcl_type(value: &Value) -> String {
    match value {
        Value::Null => "any".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => {
            let element_types: Vec<String> = items.iter().map(hcl_type).collect();
            match element_types.split_first() {
                Some((first, rest)) if rest.iter().all(|ty| ty == first) => {
                    format!("list({first})")
                }
                _ => "list(any)".to_string(),
            }
        }
        Value::Object(entries) => {
            if entries.keys().all(|key| is_ident(key)) {
                let fields: Vec<String> = entries
                    .iter()
                    .map(|(key, entry)| format!("{key} = {}", hcl_type(entry)))
                    .collect();
                format!("object({{ {} }})", fields.join(", "))
            } else {
                "map(any)".to_string()
            }
        }
    }
}

/// Quotes and escapes a string literal.
fn hcl_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Renders an object key, quoting it when it is not a bare identifier.
fn object_key(key: &str) -> String {
    if is_ident(key) {
        key.to_string()
    } else {
        hcl_string(key)
    }
}

/// Returns true when `name` is a bare configuration identifier.
fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Rejects names that cannot be emitted as bare identifiers.
fn ensure_ident(name: &str, what: &str) -> Result<(), String> {
    if is_ident(name) {
        Ok(())
    } else {
        Err(format!("{what} '{name}' is not a valid identifier"))
    }
}

#[cfg(test)]
mod tests;

//! Parameter-schema extraction from pipeline YAML text
//!
//! Recovers the `parameters:` block of a YAML-defined pipeline using
//! line-structure pattern matching rather than a YAML parser. The input is
//! whatever text lives at the pipeline's configured path; malformed input
//! degrades to an empty schema and never fails the caller.
//!
//! Known limitation: a `default:` key with an explicitly empty value is
//! indistinguishable from an absent `default:` key, so both classify the
//! parameter as required.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One declared pipeline parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineParameter {
    pub name: String,

    /// Declared type; missing declarations default to "string"
    pub param_type: String,

    /// Captured default, empty when none was found
    pub default_value: String,

    /// Display name, falling back to `name`
    pub display_name: String,
}

impl PipelineParameter {
    /// A parameter with no captured default must be supplied by the caller.
    pub fn required(&self) -> bool {
        self.default_value.is_empty()
    }
}

fn item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*-[ \t]*name[ \t]*:[ \t]*(.*)$").expect("valid regex"))
}

fn field_re(field: &'static str, cell: &'static OnceLock<Regex>) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(&format!(r"(?m)^[ \t]*{}[ \t]*:[ \t]*(.*)$", field)).expect("valid regex")
    })
}

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("type", &RE)
}

fn default_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("default", &RE)
}

fn display_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("displayName", &RE)
}

/// The text span from the `parameters:` key up to the next top-level
/// (non-indented) key, or the end of the text.
fn parameters_block(text: &str) -> Option<&str> {
    let mut offset = 0;
    let mut block_start = None;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim_end();

        match block_start {
            None => {
                if trimmed == "parameters:" {
                    block_start = Some(offset);
                }
            }
            Some(start) => {
                // A non-empty line with no indentation is the next
                // top-level key and ends the block.
                if !trimmed.is_empty() && !line.starts_with(' ') && !line.starts_with('\t') {
                    return Some(&text[start..line_start]);
                }
            }
        }
    }
    block_start.map(|start| &text[start..])
}

fn capture_field(re: &Regex, span: &str) -> Option<String> {
    re.captures(span)
        .map(|c| c.get(1).map_or("", |m| m.as_str()).trim().to_string())
}

/// Extract the declared parameters from pipeline YAML text.
///
/// Each `- name:` list item opens a span running to the next item or the
/// end of the block; `type`, `default`, and `displayName` are searched for
/// independently within the span, in any order.
pub fn extract_parameters(text: &str) -> Vec<PipelineParameter> {
    let Some(block) = parameters_block(text) else {
        return Vec::new();
    };

    let items: Vec<_> = item_re().captures_iter(block).collect();
    let mut parameters: Vec<PipelineParameter> = Vec::with_capacity(items.len());

    for (index, captures) in items.iter().enumerate() {
        let name = captures.get(1).map_or("", |m| m.as_str()).trim().to_string();
        if name.is_empty() {
            continue;
        }
        // Names are unique within a schema; the first occurrence wins.
        if parameters.iter().any(|p| p.name == name) {
            continue;
        }

        let span_start = captures.get(0).map_or(0, |m| m.end());
        let span_end = items
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(block.len(), |m| m.start());
        let span = &block[span_start..span_end];

        let param_type =
            capture_field(type_re(), span).filter(|t| !t.is_empty()).unwrap_or_else(|| "string".to_string());
        let default_value = capture_field(default_re(), span).unwrap_or_default();
        let display_name = capture_field(display_name_re(), span)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| name.clone());

        parameters.push(PipelineParameter {
            name,
            param_type,
            default_value,
            display_name,
        });
    }

    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_schema() {
        assert!(extract_parameters("").is_empty());
        assert!(extract_parameters("steps:\n  - script: echo hi\n").is_empty());
    }

    #[test]
    fn test_malformed_input_never_panics() {
        assert!(extract_parameters("parameters:").is_empty());
        assert!(extract_parameters("parameters:\n  garbage without items\n").is_empty());
        assert!(extract_parameters("::::\n\t- name\nparameters:\n  - type: x\n").is_empty());
    }

    #[test]
    fn test_single_parameter_with_default() {
        let params = extract_parameters("parameters:\n  - name: env\n    default: prod\n");
        assert_eq!(
            params,
            vec![PipelineParameter {
                name: "env".to_string(),
                param_type: "string".to_string(),
                default_value: "prod".to_string(),
                display_name: "env".to_string(),
            }]
        );
        assert!(!params[0].required());
    }

    #[test]
    fn test_parameter_without_default_is_required() {
        let params = extract_parameters("parameters:\n  - name: env\n    type: string\n");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].param_type, "string");
        assert_eq!(params[0].default_value, "");
        assert_eq!(params[0].display_name, "env");
        assert!(params[0].required());
    }

    #[test]
    fn test_fields_are_order_insensitive() {
        let yaml = "parameters:\n\
                    \x20 - name: region\n\
                    \x20   displayName: Deployment region\n\
                    \x20   default: westeurope\n\
                    \x20   type: string\n\
                    \x20 - name: dryRun\n\
                    \x20   type: boolean\n\
                    \x20   default: true\n";
        let params = extract_parameters(yaml);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].display_name, "Deployment region");
        assert_eq!(params[0].default_value, "westeurope");
        assert_eq!(params[1].name, "dryRun");
        assert_eq!(params[1].param_type, "boolean");
        assert_eq!(params[1].default_value, "true");
    }

    #[test]
    fn test_block_ends_at_next_top_level_key() {
        let yaml = "parameters:\n\
                    \x20 - name: env\n\
                    \x20   default: prod\n\
                    stages:\n\
                    \x20 - name: notAParameter\n\
                    \x20   default: alsoNot\n";
        let params = extract_parameters(yaml);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "env");
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let yaml = "parameters:\n\
                    \x20 - name: env\n\
                    \x20   default: prod\n\
                    \x20 - name: env\n\
                    \x20   default: dev\n";
        let params = extract_parameters(yaml);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].default_value, "prod");
    }

    #[test]
    fn test_values_are_trimmed() {
        let params = extract_parameters("parameters:\n  - name:   env  \n    default:  prod  \n");
        assert_eq!(params[0].name, "env");
        assert_eq!(params[0].default_value, "prod");
    }
}

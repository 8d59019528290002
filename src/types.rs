//! Shared types and data structures.

use std::fmt;

use serde::Serialize;

/// The kind of an indexed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Constant,
    Class,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Function => "function",
            SymbolKind::Constant => "constant",
            SymbolKind::Class => "class",
        };
        write!(f, "{s}")
    }
}

/// One autocomplete suggestion describing a discovered declaration.
///
/// Serialization is sparse: empty string fields are omitted from the JSON
/// object entirely. The external field names (`text`, `type`, `leftLabel`,
/// `rightLabel`) are part of the editor's suggestion contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// The declaration identifier as written in source.
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    /// First-paragraph summary from the doc comment; never contains newlines.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Return type(s) for functions, inferred literal type for constants.
    #[serde(rename = "leftLabel", skip_serializing_if = "String::is_empty")]
    pub left_label: String,
    /// Rendered parameter list for functions, parent class name for classes,
    /// literal value for constants.
    #[serde(rename = "rightLabel", skip_serializing_if = "String::is_empty")]
    pub right_label: String,
}

/// A formal parameter of a function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Parameter name without the leading `$`.
    pub name: String,
    /// Whether a default expression is present.
    pub has_default: bool,
    /// Declared type with one leading namespace separator stripped; empty
    /// when the parameter is untyped.
    pub ty: String,
}

impl ParameterInfo {
    /// Render the parameter the way it appears in a suggestion's right
    /// label: `"{type} ${name}"`, with the type prefix omitted when absent.
    pub fn render(&self) -> String {
        if self.ty.is_empty() {
            format!("${}", self.name)
        } else {
            format!("{} ${}", self.ty, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(SymbolKind::Function.to_string(), "function");
        assert_eq!(SymbolKind::Constant.to_string(), "constant");
        assert_eq!(SymbolKind::Class.to_string(), "class");
    }

    #[test]
    fn render_typed_parameter() {
        let p = ParameterInfo {
            name: "name".into(),
            has_default: false,
            ty: "string".into(),
        };
        assert_eq!(p.render(), "string $name");
    }

    #[test]
    fn render_untyped_parameter() {
        let p = ParameterInfo {
            name: "args".into(),
            has_default: true,
            ty: String::new(),
        };
        assert_eq!(p.render(), "$args");
    }

    #[test]
    fn sparse_serialization_omits_empty_fields() {
        let s = Suggestion {
            text: "FOO".into(),
            kind: SymbolKind::Constant,
            description: String::new(),
            left_label: "bool".into(),
            right_label: String::new(),
        };
        let json = serde_json::to_value(&s).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.get("text").unwrap(), "FOO");
        assert_eq!(obj.get("type").unwrap(), "constant");
        assert_eq!(obj.get("leftLabel").unwrap(), "bool");
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("rightLabel"));
    }

    #[test]
    fn full_record_serializes_external_field_names() {
        let s = Suggestion {
            text: "greet".into(),
            kind: SymbolKind::Function,
            description: "Greets someone.".into(),
            left_label: "void".into(),
            right_label: "string $name".into(),
        };
        let json = serde_json::to_value(&s).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj.get("rightLabel").unwrap(), "string $name");
        assert_eq!(obj.get("leftLabel").unwrap(), "void");
    }
}

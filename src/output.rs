//! Settings document assembly and JSON output.
//!
//! The serialized shape is a fixed contract consumed by the editor: four
//! scope keys at the top level, each carrying editor options, with the
//! autocomplete suggestions nested under the `.source.php` scope. Three of
//! the scopes are static configuration reproduced verbatim; only the
//! suggestion list is derived from the index.
//!
//! Output is pretty-printed with a stable key order so downstream consumers
//! can diff successive runs.

use std::io::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::errors::PhindexError;
use crate::index::SymbolIndex;
use crate::types::Suggestion;

// ---------------------------------------------------------------------------
// Static editor configuration
// ---------------------------------------------------------------------------

const PHP_COMMENT_START: &str = "// ";

const ARRAY_DECREASE_INDENT: &str = "(?x)\n\t    ^ (.* \\*/)? \\s*\n\t    (\\)+)\n\t";

const SOURCE_INCREASE_INDENT: &str = "(?x)\n\t    (   \\{ (?! .+ \\} ) .*\n\t    |   \\(\n\t    |   (\\[)\n\t    |   ((else)?if|else|for(each)?|while|switch) .* :\n\t    )   \\s* (/[/*] .*)? $";

const SOURCE_DECREASE_INDENT: &str = "(?x)\n\t    ^ (.* \\*/)? \\s*\n\t    (\n\t        (\\})         |\n\t        (\\)+([;,]|\\s*\\{))    |\n\t        (\\]\\)*([;,]|$))     |\n\t        (else:)      |\n\t        ((end(if|for(each)?|while|switch));)\n\t    )\n\t";

const HTML_NON_WORD_CHARACTERS: &str = "/\\()\"':,.;<>~!@#%^&*|+=[]{}`?-";

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize)]
struct EditorSettings {
    #[serde(rename = "commentStart", skip_serializing_if = "Option::is_none")]
    comment_start: Option<&'static str>,
    #[serde(
        rename = "increaseIndentPattern",
        skip_serializing_if = "Option::is_none"
    )]
    increase_indent_pattern: Option<&'static str>,
    #[serde(
        rename = "decreaseIndentPattern",
        skip_serializing_if = "Option::is_none"
    )]
    decrease_indent_pattern: Option<&'static str>,
    #[serde(rename = "nonWordCharacters", skip_serializing_if = "Option::is_none")]
    non_word_characters: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SuggestionList {
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
struct Symbols {
    /// The editor keys suggestion sets by selector; the empty selector
    /// applies everywhere.
    #[serde(rename = "")]
    all_scopes: SuggestionList,
}

#[derive(Debug, Serialize)]
struct Autocomplete {
    symbols: Symbols,
}

#[derive(Debug, Serialize)]
struct ScopeSettings {
    editor: EditorSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    autocomplete: Option<Autocomplete>,
}

/// The complete settings document written at the end of a run.
#[derive(Debug, Serialize)]
pub struct SettingsDocument {
    #[serde(rename = ".source.php")]
    source_php: ScopeSettings,
    #[serde(rename = ".source.php .meta.array.php")]
    source_php_array: ScopeSettings,
    #[serde(rename = ".source.php:not(.string)")]
    source_php_not_string: ScopeSettings,
    #[serde(rename = ".text.html.php")]
    text_html_php: ScopeSettings,
}

impl SettingsDocument {
    /// Assemble the document: static editor configuration plus the index's
    /// suggestions (functions, then constants, then classes).
    pub fn new(index: &SymbolIndex) -> Self {
        SettingsDocument {
            source_php: ScopeSettings {
                editor: EditorSettings {
                    comment_start: Some(PHP_COMMENT_START),
                    ..EditorSettings::default()
                },
                autocomplete: Some(Autocomplete {
                    symbols: Symbols {
                        all_scopes: SuggestionList {
                            suggestions: index.suggestions(),
                        },
                    },
                }),
            },
            source_php_array: ScopeSettings {
                editor: EditorSettings {
                    decrease_indent_pattern: Some(ARRAY_DECREASE_INDENT),
                    ..EditorSettings::default()
                },
                autocomplete: None,
            },
            source_php_not_string: ScopeSettings {
                editor: EditorSettings {
                    increase_indent_pattern: Some(SOURCE_INCREASE_INDENT),
                    decrease_indent_pattern: Some(SOURCE_DECREASE_INDENT),
                    ..EditorSettings::default()
                },
                autocomplete: None,
            },
            text_html_php: ScopeSettings {
                editor: EditorSettings {
                    non_word_characters: Some(HTML_NON_WORD_CHARACTERS),
                    ..EditorSettings::default()
                },
                autocomplete: None,
            },
        }
    }

    /// Render the document as pretty-printed JSON with a trailing newline.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Write the rendered document to `destination`, or to stdout when no
/// destination is given.
pub fn write(
    document: &SettingsDocument,
    destination: Option<&Path>,
) -> Result<(), PhindexError> {
    let json = document.render()?;
    match destination {
        Some(path) => std::fs::write(path, &json).map_err(|source| PhindexError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes()).map_err(PhindexError::Io)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

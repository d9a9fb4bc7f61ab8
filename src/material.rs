//! Material parameter store.
//!
//! Parses the small domain-specific material database format used by the
//! surrounding tooling:
//!
//! ```text
//! material elastic [
//!     name = moving-block
//!     rho = 1.19e-9
//!     E = 51e3
//!     nu = 0.25
//! ]
//! ```
//!
//! Whitespace and key ordering are insignificant; a whole block may sit on a
//! single line. The `name` key is promoted to the database key and removed
//! from the parameter map, so the map holds physical quantities only.
//!
//! Values other than `name` are restricted to numeric literals. The parser
//! deliberately does not evaluate expressions: material files are untrusted
//! input.

use crate::error::{Error, NumericalWarning, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A named material block: category tag plus scalar physical parameters.
///
/// Immutable once loaded; the `name` lives in the owning [`MaterialDatabase`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    /// Category tag from the block header (e.g. "elastic", "cohesive_linear").
    pub kind: String,
    /// Physical parameters by key (E, nu, rho, G_c, ...).
    pub parameters: HashMap<String, f64>,
}

impl MaterialRecord {
    /// Look up a parameter by key.
    pub fn parameter(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).copied()
    }
}

/// A loaded material database: records keyed by material name.
#[derive(Debug, Clone, Default)]
pub struct MaterialDatabase {
    records: HashMap<String, MaterialRecord>,
    warnings: Vec<NumericalWarning>,
}

impl MaterialDatabase {
    /// Load and parse a material database file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a material database from text.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = tokenize(text);
        let mut records = HashMap::new();
        let mut warnings = Vec::new();
        let mut block_index = 0usize;

        let mut iter = tokens.iter().copied().peekable();
        while let Some(tok) = iter.next() {
            match tok {
                "material" => {
                    block_index += 1;
                    let (name, record) = parse_block(&mut iter, block_index)?;
                    if records.insert(name.clone(), record).is_some() {
                        // Last-wins, but surfaced rather than silent.
                        warnings.push(NumericalWarning::DuplicateMaterial { name });
                    }
                }
                "[" | "]" => {
                    return Err(Error::Parse(format!(
                        "unbalanced '{}' outside a material block",
                        tok
                    )));
                }
                // Stray tokens between blocks carry no meaning.
                _ => {}
            }
        }

        Ok(Self { records, warnings })
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Option<&MaterialRecord> {
        self.records.get(name)
    }

    /// Look up a material by name, failing with a domain error if absent.
    pub fn require(&self, name: &str) -> Result<&MaterialRecord> {
        self.records
            .get(name)
            .ok_or_else(|| Error::Domain(format!("material '{}' not found in database", name)))
    }

    /// Look up a single parameter of a named material.
    ///
    /// A missing key is the caller's configuration error, not a parse error.
    pub fn require_parameter(&self, name: &str, key: &str) -> Result<f64> {
        self.require(name)?.parameter(key).ok_or_else(|| {
            Error::Domain(format!("material '{}' has no parameter '{}'", name, key))
        })
    }

    /// Names of all loaded materials.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of loaded materials.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no material blocks were found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Diagnostics collected while parsing (duplicate names).
    pub fn warnings(&self) -> &[NumericalWarning] {
        &self.warnings
    }
}

/// Split text into tokens, treating `[`, `]` and `=` as standalone tokens so
/// the grammar is insensitive to whitespace placement.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for piece in text.split_whitespace() {
        let mut rest = piece;
        while let Some(i) = rest.find(['[', ']', '=']) {
            if i > 0 {
                tokens.push(&rest[..i]);
            }
            tokens.push(&rest[i..i + 1]);
            rest = &rest[i + 1..];
        }
        if !rest.is_empty() {
            tokens.push(rest);
        }
    }
    tokens
}

/// Parse one block after its `material` keyword: `<kind> [ (key = value)* ]`.
///
/// Returns the promoted name and the record.
fn parse_block<'a, I>(
    iter: &mut std::iter::Peekable<I>,
    block_index: usize,
) -> Result<(String, MaterialRecord)>
where
    I: Iterator<Item = &'a str>,
{
    let kind = match iter.next() {
        Some(tok) if !matches!(tok, "[" | "]" | "=") => tok.to_string(),
        _ => {
            return Err(Error::Parse(format!(
                "material block #{}: missing type tag after 'material'",
                block_index
            )))
        }
    };
    let context = format!("material block #{} (type '{}')", block_index, kind);

    match iter.next() {
        Some("[") => {}
        _ => return Err(Error::Parse(format!("{}: expected '['", context))),
    }

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut closed = false;
    while let Some(tok) = iter.next() {
        match tok {
            "]" => {
                closed = true;
                break;
            }
            "[" => {
                return Err(Error::Parse(format!("{}: unexpected nested '['", context)));
            }
            "=" => {
                return Err(Error::Parse(format!("{}: '=' with no key", context)));
            }
            key => {
                if iter.peek() == Some(&"=") {
                    iter.next();
                    let value = match iter.next() {
                        Some(v) if !matches!(v, "[" | "]" | "=") => v,
                        _ => {
                            return Err(Error::Parse(format!(
                                "{}: key '{}' has no value",
                                context, key
                            )))
                        }
                    };
                    pairs.push((key.to_string(), value.to_string()));
                }
                // Tokens not followed by '=' carry no assignment; skip them.
            }
        }
    }
    if !closed {
        return Err(Error::Parse(format!("{}: missing closing ']'", context)));
    }

    let mut name = None;
    let mut parameters = HashMap::new();
    for (key, value) in pairs {
        if key == "name" {
            name = Some(value);
        } else {
            parameters.insert(key.clone(), parse_value(&key, &value, &context)?);
        }
    }

    let name =
        name.ok_or_else(|| Error::Parse(format!("{}: missing 'name' key", context)))?;
    Ok((name, MaterialRecord { kind, parameters }))
}

/// Parse a value token as a strict numeric literal.
fn parse_value(key: &str, value: &str, context: &str) -> Result<f64> {
    let parsed: f64 = value.parse().map_err(|_| {
        Error::Parse(format!(
            "{}: value '{}' for key '{}' is not a numeric literal",
            context, value, key
        ))
    })?;
    if !parsed.is_finite() {
        return Err(Error::Parse(format!(
            "{}: value '{}' for key '{}' is not finite",
            context, value, key
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
material elastic [
    name = moving-block
    rho = 1.19e-9
    E = 51e3
    nu = 0.25
]

material cohesive_linear [
    name = interface_mat
    G_c = 0.21
    beta = 1
]
";

    #[test]
    fn test_round_trip_two_blocks() {
        let db = MaterialDatabase::parse(SAMPLE).unwrap();
        assert_eq!(db.len(), 2);

        let block = db.get("moving-block").unwrap();
        assert_eq!(block.kind, "elastic");
        assert_relative_eq!(block.parameter("E").unwrap(), 51e3);
        assert_relative_eq!(block.parameter("nu").unwrap(), 0.25);
        assert_relative_eq!(block.parameter("rho").unwrap(), 1.19e-9);
        assert!(block.parameter("name").is_none());

        let iface = db.get("interface_mat").unwrap();
        assert_eq!(iface.kind, "cohesive_linear");
        assert_relative_eq!(iface.parameter("G_c").unwrap(), 0.21);
    }

    #[test]
    fn test_one_line_block() {
        let db =
            MaterialDatabase::parse("material block [ name = foo  E = 51000  nu = 0.25 ]")
                .unwrap();
        let rec = db.get("foo").unwrap();
        assert_eq!(rec.kind, "block");
        assert_relative_eq!(rec.parameter("E").unwrap(), 51000.0);
        assert_relative_eq!(rec.parameter("nu").unwrap(), 0.25);
        assert!(rec.parameter("name").is_none());
    }

    #[test]
    fn test_tight_whitespace() {
        let db = MaterialDatabase::parse("material block[name=foo\nE=2.5]").unwrap();
        let rec = db.get("foo").unwrap();
        assert_relative_eq!(rec.parameter("E").unwrap(), 2.5);
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let err = MaterialDatabase::parse("material elastic [ E = 1.0 ]").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_unclosed_block_is_parse_error() {
        let err = MaterialDatabase::parse("material elastic [ name = a\nE = 1.0").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("']'"));
    }

    #[test]
    fn test_stray_bracket_is_parse_error() {
        let err = MaterialDatabase::parse("] material elastic [ name = a ]").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let err =
            MaterialDatabase::parse("material elastic [ name = a\nE = os.system ]").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("numeric literal"));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let err = MaterialDatabase::parse("material elastic [ name = a\nE = inf ]").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_tokens_without_assignment_ignored() {
        let db = MaterialDatabase::parse(
            "header comment\nmaterial elastic [\nname = a\nstandalone\nE = 1.0\n]",
        )
        .unwrap();
        let rec = db.get("a").unwrap();
        assert_eq!(rec.parameters.len(), 1);
        assert_relative_eq!(rec.parameter("E").unwrap(), 1.0);
    }

    #[test]
    fn test_duplicate_name_last_wins_with_warning() {
        let db = MaterialDatabase::parse(
            "material elastic [ name = a\nE = 1.0 ]\nmaterial elastic [ name = a\nE = 2.0 ]",
        )
        .unwrap();
        assert_eq!(db.len(), 1);
        assert_relative_eq!(db.get("a").unwrap().parameter("E").unwrap(), 2.0);
        assert_eq!(
            db.warnings(),
            &[NumericalWarning::DuplicateMaterial { name: "a".into() }]
        );
    }

    #[test]
    fn test_require_parameter_missing_key_is_domain_error() {
        let db = MaterialDatabase::parse("material elastic [ name = a\nE = 1.0 ]").unwrap();
        assert!(matches!(
            db.require_parameter("a", "rho").unwrap_err(),
            Error::Domain(_)
        ));
        assert!(matches!(
            db.require_parameter("b", "E").unwrap_err(),
            Error::Domain(_)
        ));
        assert_relative_eq!(db.require_parameter("a", "E").unwrap(), 1.0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = MaterialDatabase::load("/nonexistent/material.dat").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("rupture_core_material_test.dat");
        fs::write(&path, SAMPLE).unwrap();
        let db = MaterialDatabase::load(&path).unwrap();
        assert_eq!(db.len(), 2);
        fs::remove_file(&path).ok();
    }
}

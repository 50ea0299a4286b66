//! Typed parameters: either a literal value or a reference to a declared
//! variable (`$name`).
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::value::Value;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid name regex"));

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A value cell usable anywhere a value is expected.
///
/// Literal parameters carry only a value. Variable parameters carry a name and
/// a GraphQL type name and render as `$name`; their value, if any, becomes the
/// default in the variable-declaration preamble.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<T> {
    name: Option<String>,
    type_name: Option<String>,
    value: Option<T>,
}

/// One argument slot as stored in a criterion or input object.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Literal(Value),
    Variable(String),
}

/// A variable as it appears in the document preamble.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredVariable {
    pub name: String,
    pub type_name: String,
    pub default: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<T> Parameter<T> {
    pub fn literal(value: T) -> Self {
        Self { name: None, type_name: None, value: Some(value) }
    }

    /// A named variable of the given GraphQL type, e.g. `("first", "Int!")`.
    ///
    /// The name is trimmed and must consist of letters and digits only; the
    /// type name may be wrapped in list brackets and required markers.
    pub fn variable(name: &str, type_name: &str) -> Result<Self> {
        let name = validate_name(name)?;
        let type_name = validate_type_name(type_name)?;
        Ok(Self { name: Some(name), type_name: Some(type_name), value: None })
    }

    /// Sets the literal value; for a variable this is its declared default.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_variable(&self) -> bool {
        self.name.is_some()
    }
}

impl<T: Clone + Into<Value>> Parameter<T> {
    pub fn to_argument(&self) -> Argument {
        match &self.name {
            Some(name) => Argument::Variable(name.clone()),
            None => Argument::Literal(self.literal_value()),
        }
    }

    /// The preamble entry for this parameter; fails for literal parameters.
    pub fn to_declaration(&self) -> Result<DeclaredVariable> {
        let (Some(name), Some(type_name)) = (&self.name, &self.type_name) else {
            return Err(Error::UnnamedVariable);
        };
        Ok(DeclaredVariable {
            name: name.clone(),
            type_name: type_name.clone(),
            default: self.literal_value(),
        })
    }

    fn literal_value(&self) -> Value {
        self.value.clone().map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Clone + Into<Value>> From<&Parameter<T>> for Argument {
    fn from(parameter: &Parameter<T>) -> Self {
        parameter.to_argument()
    }
}

impl<T: Clone + Into<Value>> From<Parameter<T>> for Argument {
    fn from(parameter: Parameter<T>) -> Self {
        parameter.to_argument()
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Literal(value)
    }
}

impl Argument {
    pub fn literal(value: impl Into<Value>) -> Self {
        Argument::Literal(value.into())
    }
}

impl DeclaredVariable {
    /// Required variables (`Type!`) never carry a default.
    pub fn is_required(&self) -> bool {
        self.type_name.ends_with('!')
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATION
// ————————————————————————————————————————————————————————————————————————————

pub(crate) fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if NAME_RE.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(Error::InvalidVariableName(raw.to_string()))
    }
}

/// Accepts `Name`, `Name!`, `[Name]`, `[Name!]!` and deeper list nesting.
/// Whitespace anywhere in the type reference is dropped.
pub(crate) fn validate_type_name(raw: &str) -> Result<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut core = compact.as_str();
    loop {
        core = core.strip_suffix('!').unwrap_or(core);
        match core.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            Some(inner) => core = inner,
            None => break,
        }
    }
    if NAME_RE.is_match(core) {
        Ok(compact)
    } else {
        Err(Error::InvalidTypeName(raw.to_string()))
    }
}

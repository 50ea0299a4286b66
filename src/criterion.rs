//! Field criteria: the units a selection set is made of.
use indexmap::IndexMap;

use crate::builder::QueryBuilder;
use crate::directive::Directives;
use crate::encode::write_argument;
use crate::error::Result;
use crate::format::Layout;
use crate::parameter::{Argument, Parameter};
use crate::value::Value;

/// Ordered field arguments. Absent optional parameters are never stored, so
/// they never render (not even as `null`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments(IndexMap<String, Argument>);

#[derive(Debug, Clone)]
pub enum FieldCriterion {
    Scalar(ScalarCriterion),
    Object(ObjectCriterion),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarCriterion {
    pub name: String,
    pub alias: Option<String>,
    pub directives: Directives,
    pub arguments: Arguments,
}

/// A nested selection. The nested builder is owned by the criterion; its
/// alias and directives are the field's alias and directives.
#[derive(Debug, Clone)]
pub struct ObjectCriterion {
    pub name: String,
    pub arguments: Arguments,
    pub builder: QueryBuilder,
}

// ————————————————————————————————————————————————————————————————————————————
// ARGUMENTS
// ————————————————————————————————————————————————————————————————————————————

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: impl Into<Argument>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn push_optional<T: Clone + Into<Value>>(&mut self, name: &str, parameter: Option<&Parameter<T>>) -> &mut Self {
        if let Some(parameter) = parameter {
            self.push(name, parameter);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(a: 1, b: $b)`; nothing at all when empty.
    fn write(&self, out: &mut String, layout: Layout, level: usize) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        out.push('(');
        for (i, (name, argument)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(',');
                out.push_str(layout.space());
            }
            out.push_str(name);
            out.push(':');
            out.push_str(layout.space());
            write_argument(out, argument, layout, level)?;
        }
        out.push(')');
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CRITERIA
// ————————————————————————————————————————————————————————————————————————————

impl FieldCriterion {
    pub fn name(&self) -> &str {
        match self {
            FieldCriterion::Scalar(c) => &c.name,
            FieldCriterion::Object(c) => &c.name,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            FieldCriterion::Scalar(c) => c.alias.as_deref(),
            FieldCriterion::Object(c) => c.builder.alias(),
        }
    }

    /// The key the criterion is stored under: alias, else field name.
    pub fn key(&self) -> &str {
        self.alias().unwrap_or_else(|| self.name())
    }

    /// Object selections with nothing renderable underneath are dropped,
    /// including ones whose only entries are themselves dropped.
    pub fn is_rendered(&self) -> bool {
        match self {
            FieldCriterion::Scalar(_) => true,
            FieldCriterion::Object(c) => c.builder.has_renderable_fields(),
        }
    }

    /// Writes the criterion on a line indented `level` deep.
    pub(crate) fn write(&self, out: &mut String, layout: Layout, level: usize) -> Result<()> {
        layout.push_indent(out, level);
        if let Some(alias) = self.alias() {
            out.push_str(alias);
            out.push(':');
            out.push_str(layout.space());
        }
        out.push_str(self.name());
        match self {
            FieldCriterion::Scalar(c) => {
                c.arguments.write(out, layout, level)?;
                c.directives.write(out, layout)
            }
            FieldCriterion::Object(c) => {
                c.arguments.write(out, layout, level)?;
                c.builder.write_nested(out, layout, level)
            }
        }
    }
}

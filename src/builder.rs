//! The query builder: an ordered, keyed selection set plus the variable
//! preamble, rendered recursively into a GraphQL document.
use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::criterion::{Arguments, FieldCriterion, ObjectCriterion, ScalarCriterion};
use crate::directive::Directives;
use crate::encode::write_value;
use crate::error::{Error, Result};
use crate::format::{Formatting, Layout};
use crate::parameter::{DeclaredVariable, Parameter};
use crate::value::Value;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Document keyword of a schema root type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Mutation,
    Subscription,
}

/// One schema field as known at generation time.
#[derive(Debug, Clone, Copy)]
pub struct FieldMetadata {
    pub name: &'static str,
    /// Object, enum, list or object-shaped scalar.
    pub is_complex: bool,
    /// Builder kind of the field's object type (or list element type).
    pub nested: Option<BuilderKind>,
}

/// Identity and static field table of a builder type.
///
/// Kinds compare by type name.
#[derive(Clone, Copy)]
pub struct BuilderKind {
    name: &'static str,
    fields: fn() -> &'static [FieldMetadata],
    operation: Option<Operation>,
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    kind: BuilderKind,
    alias: Option<String>,
    directives: Directives,
    criteria: IndexMap<String, FieldCriterion>,
    variables: IndexMap<String, DeclaredVariable>,
}

/// Implemented by the typed builders emitted for each schema object type.
pub trait ObjectBuilder: Sized {
    const KIND: BuilderKind;

    fn from_builder(builder: QueryBuilder) -> Self;
    fn builder(&self) -> &QueryBuilder;
    fn builder_mut(&mut self) -> &mut QueryBuilder;
    fn into_builder(self) -> QueryBuilder;

    fn new() -> Self {
        Self::from_builder(QueryBuilder::new(Self::KIND))
    }

    /// For a root type the alias is the operation name; for a nested
    /// selection it is the field alias.
    fn with_alias(alias: &str) -> Result<Self> {
        QueryBuilder::with_alias(Self::KIND, alias).map(Self::from_builder)
    }

    fn select_all_fields(&mut self) -> &mut Self {
        self.builder_mut().select_all_fields();
        self
    }

    fn select_all_scalar_fields(&mut self) -> &mut Self {
        self.builder_mut().select_all_scalar_fields();
        self
    }

    fn exclude(&mut self, name: &str) -> Result<&mut Self> {
        self.builder_mut().exclude(name)?;
        Ok(self)
    }

    fn include_if(&mut self, condition: &Parameter<bool>) -> &mut Self {
        self.builder_mut().include_if(Some(condition));
        self
    }

    fn skip_if(&mut self, condition: &Parameter<bool>) -> &mut Self {
        self.builder_mut().skip_if(Some(condition));
        self
    }

    fn declare_variable<T: Clone + Into<Value>>(&mut self, parameter: &Parameter<T>) -> Result<&mut Self> {
        self.builder_mut().declare_variable(parameter)?;
        Ok(self)
    }

    fn clear(&mut self) -> &mut Self {
        self.builder_mut().clear();
        self
    }

    fn render(&self, layout: impl Into<Layout>) -> Result<String> {
        self.builder().render(layout)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// METADATA
// ————————————————————————————————————————————————————————————————————————————

impl Operation {
    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Mutation => "mutation",
            Operation::Subscription => "subscription",
        }
    }
}

impl FieldMetadata {
    pub const fn scalar(name: &'static str) -> Self {
        Self { name, is_complex: false, nested: None }
    }

    pub const fn complex(name: &'static str) -> Self {
        Self { name, is_complex: true, nested: None }
    }

    pub const fn object(name: &'static str, kind: BuilderKind) -> Self {
        Self { name, is_complex: true, nested: Some(kind) }
    }
}

impl BuilderKind {
    pub const fn new(name: &'static str, fields: fn() -> &'static [FieldMetadata]) -> Self {
        Self { name, fields, operation: None }
    }

    pub const fn with_operation(self, operation: Operation) -> Self {
        Self { operation: Some(operation), ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldMetadata] {
        (self.fields)()
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }
}

impl PartialEq for BuilderKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BuilderKind {}

impl fmt::Debug for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderKind")
            .field("name", &self.name)
            .field("operation", &self.operation)
            .finish()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILDER
// ————————————————————————————————————————————————————————————————————————————

impl QueryBuilder {
    pub fn new(kind: BuilderKind) -> Self {
        Self {
            kind,
            alias: None,
            directives: Directives::default(),
            criteria: IndexMap::new(),
            variables: IndexMap::new(),
        }
    }

    /// The alias is fixed for the builder's lifetime: it is the key the
    /// builder is stored under once composed into a parent.
    pub fn with_alias(kind: BuilderKind, alias: &str) -> Result<Self> {
        if alias.trim().is_empty() {
            return Err(Error::BlankAlias);
        }
        let mut builder = Self::new(kind);
        builder.alias = Some(alias.to_string());
        Ok(builder)
    }

    pub fn kind(&self) -> BuilderKind {
        self.kind
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn include_if(&mut self, condition: Option<&Parameter<bool>>) -> &mut Self {
        self.directives.set_include_if(condition);
        self
    }

    pub fn skip_if(&mut self, condition: Option<&Parameter<bool>>) -> &mut Self {
        self.directives.set_skip_if(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// False when every entry is a nested selection that renders nothing.
    pub fn has_renderable_fields(&self) -> bool {
        self.criteria.values().any(FieldCriterion::is_rendered)
    }

    /// Selection keys in rendering order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    pub fn criterion(&self, key: &str) -> Option<&FieldCriterion> {
        self.criteria.get(key)
    }

    /// The nested builder stored under `key`, still open for mutation.
    pub fn object_field_mut(&mut self, key: &str) -> Option<&mut QueryBuilder> {
        match self.criteria.get_mut(key) {
            Some(FieldCriterion::Object(c)) => Some(&mut c.builder),
            _ => None,
        }
    }

    pub fn variables(&self) -> impl Iterator<Item = &DeclaredVariable> {
        self.variables.values()
    }

    // -------------------------------- Select -------------------------------- //

    /// Selects every field of this kind, expanding nested object types.
    /// A kind already being expanded on the current path is skipped, so
    /// recursive schema types terminate.
    pub fn select_all_fields(&mut self) -> &mut Self {
        self.select_fields(false, &mut Vec::new());
        self
    }

    pub fn select_all_scalar_fields(&mut self) -> &mut Self {
        self.select_fields(true, &mut Vec::new());
        self
    }

    fn select_fields(&mut self, scalar_only: bool, ancestors: &mut Vec<BuilderKind>) {
        ancestors.push(self.kind);
        for field in self.kind.fields() {
            if scalar_only && field.is_complex {
                continue;
            }
            let criterion = match field.nested {
                None => FieldCriterion::Scalar(ScalarCriterion {
                    name: field.name.to_string(),
                    alias: None,
                    directives: Directives::default(),
                    arguments: Arguments::default(),
                }),
                Some(kind) if ancestors.contains(&kind) => {
                    trace!(kind = kind.name(), field = field.name, "skipping recursive expansion");
                    continue;
                }
                Some(kind) => {
                    let mut nested = QueryBuilder::new(kind);
                    nested.select_fields(scalar_only, ancestors);
                    FieldCriterion::Object(ObjectCriterion {
                        name: field.name.to_string(),
                        arguments: Arguments::default(),
                        builder: nested,
                    })
                }
            };
            self.criteria.insert(field.name.to_string(), criterion);
        }
        ancestors.pop();
    }

    /// Inserts under `alias ?? name`; an existing entry under that key is
    /// replaced in place.
    pub fn select_scalar_field(
        &mut self,
        name: &str,
        alias: Option<&str>,
        directives: Directives,
        arguments: Arguments,
    ) -> Result<&mut Self> {
        if name.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }
        if alias.is_some_and(|a| a.trim().is_empty()) {
            return Err(Error::BlankAlias);
        }
        let criterion = ScalarCriterion {
            name: name.to_string(),
            alias: alias.map(str::to_string),
            directives,
            arguments,
        };
        let key = alias.unwrap_or(name).to_string();
        self.criteria.insert(key, FieldCriterion::Scalar(criterion));
        Ok(self)
    }

    /// Inserts under `nested.alias ?? name`. What `nested` selects is read
    /// at render time; reach it again through [`Self::object_field_mut`].
    pub fn select_object_field(&mut self, name: &str, nested: QueryBuilder, arguments: Arguments) -> Result<&mut Self> {
        if name.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }
        let key = nested.alias().unwrap_or(name).to_string();
        let criterion = ObjectCriterion { name: name.to_string(), arguments, builder: nested };
        self.criteria.insert(key, FieldCriterion::Object(criterion));
        Ok(self)
    }

    /// Removes the entry stored under exactly `key`; unknown keys are a no-op.
    pub fn exclude(&mut self, key: &str) -> Result<&mut Self> {
        if key.is_empty() {
            return Err(Error::EmptyFieldName);
        }
        self.criteria.shift_remove(key);
        Ok(self)
    }

    pub fn declare_variable<T: Clone + Into<Value>>(&mut self, parameter: &Parameter<T>) -> Result<&mut Self> {
        let declaration = parameter.to_declaration()?;
        self.variables.insert(declaration.name.clone(), declaration);
        Ok(self)
    }

    /// Empties the selection set; alias, directives and variables stay.
    pub fn clear(&mut self) -> &mut Self {
        self.criteria.clear();
        self
    }

    // -------------------------------- Render -------------------------------- //

    pub fn render(&self, layout: impl Into<Layout>) -> Result<String> {
        let layout = layout.into();
        let mut out = String::new();
        if let Some(operation) = self.kind.operation() {
            out.push_str(operation.keyword());
            if let Some(alias) = &self.alias {
                out.push(' ');
                out.push_str(alias);
            }
        }
        if !self.variables.is_empty() {
            if !out.is_empty() {
                out.push_str(layout.space());
            }
            self.write_variables(&mut out, layout)?;
        }
        if !out.is_empty() {
            out.push_str(layout.space());
        }
        self.write_selection_set(&mut out, layout, 0)?;
        debug!(
            kind = self.kind.name(),
            criteria = self.criteria.len(),
            len = out.len(),
            "rendered document"
        );
        Ok(out)
    }

    pub fn render_with(&self, formatting: Formatting, indent_width: u8) -> Result<String> {
        self.render(Layout::new(formatting, indent_width))
    }

    fn write_variables(&self, out: &mut String, layout: Layout) -> Result<()> {
        out.push('(');
        for (i, variable) in self.variables.values().enumerate() {
            if i > 0 {
                out.push(',');
                out.push_str(layout.space());
            }
            out.push('$');
            out.push_str(&variable.name);
            out.push(':');
            out.push_str(layout.space());
            out.push_str(&variable.type_name);
            if !variable.is_required() {
                out.push_str(layout.space());
                out.push('=');
                out.push_str(layout.space());
                write_value(out, &variable.default, layout, 0)?;
            }
        }
        out.push(')');
        Ok(())
    }

    /// Directives, then the selection set, for a builder nested under a
    /// field written at `level`.
    pub(crate) fn write_nested(&self, out: &mut String, layout: Layout, level: usize) -> Result<()> {
        self.directives.write(out, layout)?;
        out.push_str(layout.space());
        self.write_selection_set(out, layout, level)
    }

    /// `{ … }` with the body one level deeper than `level` and the closing
    /// brace back at `level`.
    fn write_selection_set(&self, out: &mut String, layout: Layout, level: usize) -> Result<()> {
        out.push('{');
        let mut any = false;
        for criterion in self.criteria.values().filter(|c| c.is_rendered()) {
            if layout.is_indented() {
                out.push('\n');
            } else if any {
                out.push(',');
            }
            criterion.write(out, layout, level + 1)?;
            any = true;
        }
        if any {
            layout.push_line_break(out, level);
        }
        out.push('}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // Node { id name parent: Node children: [Leaf] tags: [String] }
    static NODE_FIELDS: &[FieldMetadata] = &[
        FieldMetadata::scalar("id"),
        FieldMetadata::scalar("name"),
        FieldMetadata::object("parent", NODE),
        FieldMetadata::object("children", LEAF),
        FieldMetadata::complex("tags"),
    ];
    static LEAF_FIELDS: &[FieldMetadata] = &[FieldMetadata::scalar("value"), FieldMetadata::object("owner", NODE)];
    static EMPTY_FIELDS: &[FieldMetadata] = &[];

    fn node_fields() -> &'static [FieldMetadata] {
        NODE_FIELDS
    }
    fn leaf_fields() -> &'static [FieldMetadata] {
        LEAF_FIELDS
    }
    fn empty_fields() -> &'static [FieldMetadata] {
        EMPTY_FIELDS
    }

    const NODE: BuilderKind = BuilderKind::new("Node", node_fields);
    const LEAF: BuilderKind = BuilderKind::new("Leaf", leaf_fields);
    const ROOT: BuilderKind = BuilderKind::new("Query", empty_fields).with_operation(Operation::Query);

    // A { b: B }  B { c: C }  C { a: A }
    static A_FIELDS: &[FieldMetadata] = &[FieldMetadata::object("b", B)];
    static B_FIELDS: &[FieldMetadata] = &[FieldMetadata::object("c", C)];
    static C_FIELDS: &[FieldMetadata] = &[FieldMetadata::object("a", A)];

    fn a_fields() -> &'static [FieldMetadata] {
        A_FIELDS
    }
    fn b_fields() -> &'static [FieldMetadata] {
        B_FIELDS
    }
    fn c_fields() -> &'static [FieldMetadata] {
        C_FIELDS
    }

    const A: BuilderKind = BuilderKind::new("A", a_fields);
    const B: BuilderKind = BuilderKind::new("B", b_fields);
    const C: BuilderKind = BuilderKind::new("C", c_fields);

    fn select(builder: &mut QueryBuilder, name: &str) {
        builder.select_scalar_field(name, None, Directives::new(), Arguments::new()).unwrap();
    }

    #[test]
    fn reselecting_a_key_keeps_its_position() {
        let mut b = QueryBuilder::new(NODE);
        select(&mut b, "id");
        select(&mut b, "name");
        b.select_scalar_field("id", None, Directives::new().skip_if(&Parameter::literal(true)), Arguments::new())
            .unwrap();
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id@skip(if:true),name}");
    }

    #[test]
    fn alias_is_the_key() {
        let mut b = QueryBuilder::new(NODE);
        b.select_scalar_field("name", Some("x"), Directives::new(), Arguments::new()).unwrap();
        select(&mut b, "id");
        assert_eq!(b.keys().collect::<Vec<_>>(), ["x", "id"]);
        b.exclude("name").unwrap();
        assert_eq!(b.keys().count(), 2);
        b.exclude("x").unwrap();
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id}");
    }

    #[test]
    fn invalid_mutations_fail_fast() {
        let mut b = QueryBuilder::new(NODE);
        assert_eq!(b.exclude("").err(), Some(Error::EmptyFieldName));
        assert_eq!(QueryBuilder::with_alias(NODE, "  ").err(), Some(Error::BlankAlias));
        let blank_alias = b.select_scalar_field("id", Some(""), Directives::new(), Arguments::new());
        assert_eq!(blank_alias.err(), Some(Error::BlankAlias));
        let literal = Parameter::literal(1);
        assert_eq!(b.declare_variable(&literal).err(), Some(Error::UnnamedVariable));
    }

    #[test]
    fn select_all_fields_guards_recursive_kinds() {
        let mut b = QueryBuilder::new(NODE);
        b.select_all_fields();
        // parent: Node is already on the path; children: Leaf expands once,
        // and Leaf.owner: Node is skipped.
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id,name,children{value},tags}");
    }

    #[test]
    fn select_all_scalar_fields_skips_complex_fields() {
        let mut b = QueryBuilder::new(NODE);
        b.select_all_scalar_fields();
        assert_eq!(b.keys().collect::<Vec<_>>(), ["id", "name"]);
    }

    #[test]
    fn empty_nested_selection_renders_nothing() {
        let mut b = QueryBuilder::new(NODE);
        select(&mut b, "id");
        b.select_object_field("children", QueryBuilder::new(LEAF), Arguments::new()).unwrap();
        select(&mut b, "name");
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id,name}");
        assert_eq!(b.render(Layout::indented(2)).unwrap(), "{\n  id\n  name\n}");

        // composed first, filled in later
        select(b.object_field_mut("children").unwrap(), "value");
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id,children{value},name}");
    }

    #[test]
    fn clear_keeps_variables_and_alias() {
        let mut b = QueryBuilder::with_alias(ROOT, "Q").unwrap();
        b.declare_variable(&Parameter::<i32>::variable("n", "Int!").unwrap()).unwrap();
        select(&mut b, "id");
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "query Q($n:Int!){}");
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut b = QueryBuilder::new(NODE);
        b.select_all_fields();
        let first = b.render(Layout::indented(2)).unwrap();
        assert_eq!(first, b.render(Layout::indented(2)).unwrap());
    }

    #[test]
    fn selections_left_empty_by_the_recursion_guard_vanish() {
        // C's only field leads back to A, so C is empty and B holds nothing
        // that renders.
        let mut b = QueryBuilder::new(A);
        b.select_all_fields();
        assert!(b.criterion("b").is_some());
        assert!(!b.has_renderable_fields());
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{}");
        assert_eq!(b.render(Layout::indented(2)).unwrap(), "{}");

        select(&mut b, "id");
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{id}");
    }

    #[test]
    fn composed_alias_stays_the_key() {
        let mut b = QueryBuilder::new(NODE);
        b.select_object_field("children", QueryBuilder::with_alias(LEAF, "kids").unwrap(), Arguments::new())
            .unwrap();
        select(b.object_field_mut("kids").unwrap(), "value");
        assert!(b.object_field_mut("children").is_none());
        assert_eq!(b.render(Layout::COMPACT).unwrap(), "{kids:children{value}}");
        b.exclude("kids").unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn whitespace_in_nested_json_keys_fails_the_render() {
        let mut args = Arguments::new();
        args.push("where", Value::from(json!({"first name": "Luke"})));
        let mut nested = QueryBuilder::new(LEAF);
        nested.select_scalar_field("value", None, Directives::new(), args).unwrap();
        let mut b = QueryBuilder::new(NODE);
        b.select_object_field("children", nested, Arguments::new()).unwrap();

        for layout in [Layout::COMPACT, Layout::indented(2)] {
            let err = b.render(layout).unwrap_err();
            assert_eq!(err, Error::WhitespaceInKey("first name".into()));
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn nested_indentation_follows_width() {
        let mut b = QueryBuilder::new(NODE);
        b.select_all_fields();
        assert_eq!(
            b.render_with(Formatting::Indented, 4).unwrap(),
            "{\n    id\n    name\n    children {\n        value\n    }\n    tags\n}"
        );
    }
}

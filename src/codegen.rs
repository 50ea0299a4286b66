//! Generation driver: type catalog → Rust builder source.
//!
//! For every selectable schema type one `<Type>QueryBuilder` newtype with
//! its static field table, and for every enum a Rust enum implementing
//! `GraphQlEnum`.
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, Field, FullType, Schema, Shape, TypeKind};
use crate::config::{CommentStyle, FloatType, GenerationConfig, IdType, IntegerType, ScalarMapping};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct",
    "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Identifiers that cannot even be raw.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

pub struct Codegen {
    config: GenerationConfig,
    out: String,
}

/// What a field's metadata entry and selector method look like.
enum FieldPlan {
    Scalar { is_complex: bool },
    Object { builder: String },
}

struct ArgumentPlan {
    name: String,
    ident: String,
    rust_type: String,
}

impl Codegen {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config, out: String::new() }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn emit(&mut self, schema: &Schema) -> Result<(), CatalogError> {
        self.line("// Generated by gql-query-builder from a GraphQL introspection result.");
        self.line("#[allow(unused_imports)]");
        self.line("use gql_query_builder::{");
        self.line("    Arguments, BuilderKind, Directives, FieldMetadata, GraphQlEnum, ObjectBuilder, Operation, Parameter,");
        self.line("    QueryBuilder, Result, Value,");
        self.line("};");

        let (mut builders, mut enums) = (0, 0);
        for ty in schema.user_types() {
            match ty.kind {
                TypeKind::Enum => {
                    self.emit_enum(ty);
                    enums += 1;
                }
                kind if kind.is_selectable() => {
                    self.emit_builder(schema, ty)?;
                    builders += 1;
                }
                _ => {}
            }
        }
        info!(builders, enums, "generated query builders");
        Ok(())
    }

    // ------------------------------- Enums ---------------------------------- //

    fn emit_enum(&mut self, ty: &FullType) {
        let name = type_ident(&ty.name);
        let vis = self.config.vis();
        let values: Vec<_> = ty
            .enum_values()
            .iter()
            .filter(|v| self.config.include_deprecated || !v.is_deprecated)
            .map(|v| (variant_ident(&v.name), v))
            .collect();
        debug!(name = %ty.name, values = values.len(), "emitting enum");

        self.line("");
        self.doc(0, ty.description.as_deref());
        self.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        self.line(format!("{vis} enum {name} {{"));
        for (variant, value) in &values {
            self.doc(1, value.description.as_deref());
            self.line(format!("    {variant},"));
        }
        self.line("}");
        self.line("");
        self.line(format!("impl GraphQlEnum for {name} {{"));
        self.line("    fn symbol(&self) -> &'static str {");
        self.match_arms(&name, values.iter().map(|(variant, _)| (variant.as_str(), format!("{variant:?}"))));
        self.line("    }");
        self.line("");
        self.line("    fn wire_name(&self) -> Option<&'static str> {");
        self.match_arms(
            &name,
            values.iter().map(|(variant, value)| {
                let wire = if *variant == value.name { "None".to_string() } else { format!("Some({:?})", value.name) };
                (variant.as_str(), wire)
            }),
        );
        self.line("    }");
        self.line("}");
        self.line("");
        self.line(format!("impl From<{name}> for Value {{"));
        self.line(format!("    fn from(value: {name}) -> Self {{"));
        self.line("        Value::enumeration(&value)");
        self.line("    }");
        self.line("}");
    }

    fn match_arms<'a>(&mut self, name: &str, arms: impl Iterator<Item = (&'a str, String)>) {
        let arms: Vec<_> = arms.collect();
        if arms.is_empty() {
            self.line("        match *self {}");
            return;
        }
        self.line("        match self {");
        for (variant, body) in arms {
            self.line(format!("            {name}::{variant} => {body},"));
        }
        self.line("        }");
    }

    // ------------------------------ Builders -------------------------------- //

    fn emit_builder(&mut self, schema: &Schema, ty: &FullType) -> Result<(), CatalogError> {
        let builder = builder_ident(&ty.name);
        let table = format!("{}_FIELDS", ty.name.to_shouty_snake_case());
        let table_fn = format!("{}_fields", ty.name.to_snake_case());
        let vis = self.config.vis();

        let fields: Vec<&Field> = ty
            .fields()
            .iter()
            .filter(|f| self.config.include_deprecated || !f.is_deprecated)
            .collect();
        let plans = fields
            .iter()
            .map(|f| self.plan_field(schema, ty, f))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(name = %ty.name, fields = fields.len(), "emitting builder");

        self.line("");
        self.line(format!("static {table}: &[FieldMetadata] = &["));
        for (field, plan) in fields.iter().zip(&plans) {
            let entry = match plan {
                FieldPlan::Scalar { is_complex: false } => format!("FieldMetadata::scalar({:?})", field.name),
                FieldPlan::Scalar { is_complex: true } => format!("FieldMetadata::complex({:?})", field.name),
                FieldPlan::Object { builder } => format!("FieldMetadata::object({:?}, {builder}::KIND)", field.name),
            };
            self.line(format!("    {entry},"));
        }
        self.line("];");
        self.line("");
        self.line(format!("fn {table_fn}() -> &'static [FieldMetadata] {{"));
        self.line(format!("    {table}"));
        self.line("}");

        self.line("");
        self.doc(0, ty.description.as_deref());
        self.line("#[derive(Debug, Clone)]");
        self.line(format!("{vis} struct {builder}(QueryBuilder);"));
        self.line("");
        self.line(format!("impl ObjectBuilder for {builder} {{"));
        let mut kind = format!("BuilderKind::new({:?}, {table_fn})", ty.name);
        if let Some(operation) = root_operation(schema, &ty.name) {
            kind.push_str(&format!(".with_operation(Operation::{operation})"));
        }
        self.line(format!("    const KIND: BuilderKind = {kind};"));
        self.line("");
        self.line("    fn from_builder(builder: QueryBuilder) -> Self {");
        self.line("        Self(builder)");
        self.line("    }");
        self.line("    fn builder(&self) -> &QueryBuilder {");
        self.line("        &self.0");
        self.line("    }");
        self.line("    fn builder_mut(&mut self) -> &mut QueryBuilder {");
        self.line("        &mut self.0");
        self.line("    }");
        self.line("    fn into_builder(self) -> QueryBuilder {");
        self.line("        self.0");
        self.line("    }");
        self.line("}");

        let mut args_structs = Vec::new();
        self.line("");
        self.line(format!("impl {builder} {{"));
        for (i, (field, plan)) in fields.iter().zip(&plans).enumerate() {
            let args = self.plan_arguments(ty, field);
            let args_struct = format!("{}{}Args", type_ident(&ty.name), field.name.to_upper_camel_case());
            let method = method_suffix(&field.name);
            if i > 0 {
                self.line("");
            }
            self.doc(1, field.description.as_deref());
            let args_param = if args.is_empty() { String::new() } else { format!(", args: {args_struct}") };
            match plan {
                FieldPlan::Scalar { .. } => self.line(format!(
                    "    {vis} fn with_{method}(&mut self, alias: Option<&str>, directives: Directives{args_param}) -> Result<&mut Self> {{"
                )),
                FieldPlan::Object { builder } => self.line(format!(
                    "    {vis} fn with_{method}(&mut self, builder: {builder}{args_param}) -> Result<&mut Self> {{"
                )),
            }
            if args.is_empty() {
                self.line("        let arguments = Arguments::new();");
            } else {
                self.line("        let mut arguments = Arguments::new();");
                for arg in &args {
                    self.line(format!("        arguments.push_optional({:?}, args.{}.as_ref());", arg.name, arg.ident));
                }
            }
            match plan {
                FieldPlan::Scalar { .. } => self.line(format!(
                    "        self.0.select_scalar_field({:?}, alias, directives, arguments)?;",
                    field.name
                )),
                FieldPlan::Object { .. } => self.line(format!(
                    "        self.0.select_object_field({:?}, builder.into_builder(), arguments)?;",
                    field.name
                )),
            }
            self.line("        Ok(self)");
            self.line("    }");
            self.line("");
            self.line(format!("    {vis} fn except_{method}(&mut self) -> Result<&mut Self> {{"));
            self.line(format!("        self.0.exclude({:?})?;", field.name));
            self.line("        Ok(self)");
            self.line("    }");
            if !args.is_empty() {
                args_structs.push((args_struct, args));
            }
        }
        self.line("}");

        for (name, args) in args_structs {
            self.line("");
            self.line("#[derive(Debug, Clone, Default)]");
            self.line(format!("{vis} struct {name} {{"));
            for arg in args {
                self.line(format!("    {vis} {}: Option<Parameter<{}>>,", arg.ident, arg.rust_type));
            }
            self.line("}");
        }
        Ok(())
    }

    fn plan_field(&self, schema: &Schema, owner: &FullType, field: &Field) -> Result<FieldPlan, CatalogError> {
        let shape = field.ty.shape()?;
        let is_list = matches!(shape, Shape::List { .. });
        let unknown = |name: &str| CatalogError::UnknownType {
            owner: owner.name.clone(),
            field: field.name.clone(),
            name: name.to_string(),
        };
        Ok(match shape.element() {
            Shape::Object(name) => {
                schema.find(name).ok_or_else(|| unknown(name))?;
                FieldPlan::Object { builder: builder_ident(name) }
            }
            Shape::Enum(name) => {
                schema.find(name).ok_or_else(|| unknown(name))?;
                FieldPlan::Scalar { is_complex: true }
            }
            Shape::Scalar(name) => FieldPlan::Scalar {
                is_complex: is_list || self.config.scalar_mapping(name) == ScalarMapping::Json,
            },
            Shape::Input(_) | Shape::List { .. } => {
                return Err(CatalogError::UnsupportedKind {
                    owner: owner.name.clone(),
                    field: field.name.clone(),
                    kind: TypeKind::InputObject,
                });
            }
        })
    }

    /// Scalar and enum arguments (and lists of them) in declaration order.
    fn plan_arguments(&self, owner: &FullType, field: &Field) -> Vec<ArgumentPlan> {
        let mut plans = Vec::new();
        for arg in &field.args {
            let rust_type = arg.ty.shape().ok().and_then(|shape| self.argument_type(&shape));
            match rust_type {
                Some(rust_type) => plans.push(ArgumentPlan {
                    name: arg.name.clone(),
                    ident: field_ident(&arg.name),
                    rust_type,
                }),
                None => warn!(
                    owner = %owner.name,
                    field = %field.name,
                    argument = %arg.name,
                    ty = %arg.ty.graphql_name(),
                    "skipping argument that is not a scalar or enum"
                ),
            }
        }
        plans
    }

    fn argument_type(&self, shape: &Shape) -> Option<String> {
        match shape {
            Shape::Scalar(name) => Some(self.scalar_type(name).to_string()),
            Shape::Enum(name) => Some(type_ident(name)),
            Shape::List { item, item_required: true } => Some(format!("Vec<{}>", self.argument_type(item)?)),
            Shape::List { item, item_required: false } => Some(format!("Vec<Option<{}>>", self.argument_type(item)?)),
            Shape::Object(_) | Shape::Input(_) => None,
        }
    }

    fn scalar_type(&self, name: &str) -> &'static str {
        match self.config.scalar_mapping(name) {
            ScalarMapping::String => "String",
            ScalarMapping::Boolean => "bool",
            ScalarMapping::Integer => match self.config.integer_type {
                IntegerType::I32 => "i32",
                IntegerType::I64 => "i64",
            },
            ScalarMapping::Float => match self.config.float_type {
                FloatType::F64 => "f64",
                FloatType::F32 => "f32",
            },
            ScalarMapping::Id => match self.config.id_type {
                IdType::String => "String",
                IdType::Uuid => "gql_query_builder::uuid::Uuid",
            },
            ScalarMapping::DateTime => "gql_query_builder::chrono::DateTime<gql_query_builder::chrono::FixedOffset>",
            ScalarMapping::Json => "gql_query_builder::serde_json::Value",
        }
    }

    // ------------------------------- Output --------------------------------- //

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn doc(&mut self, depth: usize, description: Option<&str>) {
        if self.config.comments == CommentStyle::None {
            return;
        }
        let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
            return;
        };
        let indent = "    ".repeat(depth);
        for line in description.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line(format!("{indent}///"));
            } else {
                self.line(format!("{indent}/// {line}"));
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NAMING
// ————————————————————————————————————————————————————————————————————————————

fn root_operation(schema: &Schema, name: &str) -> Option<&'static str> {
    let is = |root: &Option<crate::catalog::NamedType>| root.as_ref().is_some_and(|r| r.name == name);
    if is(&schema.query_type) {
        Some("Query")
    } else if is(&schema.mutation_type) {
        Some("Mutation")
    } else if is(&schema.subscription_type) {
        Some("Subscription")
    } else {
        None
    }
}

fn type_ident(name: &str) -> String {
    let ident = name.to_upper_camel_case();
    if RESERVED.contains(&ident.as_str()) { format!("{ident}_") } else { ident }
}

fn builder_ident(name: &str) -> String {
    format!("{}QueryBuilder", type_ident(name))
}

fn variant_ident(name: &str) -> String {
    type_ident(name)
}

fn field_ident(name: &str) -> String {
    let ident = name.to_snake_case();
    if RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

/// `with_<suffix>` / `except_<suffix>`; `with_alias` is taken by the trait.
fn method_suffix(name: &str) -> String {
    match name.to_snake_case().as_str() {
        "alias" => "alias_field".to_string(),
        other => other.to_string(),
    }
}

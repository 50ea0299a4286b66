//! Type catalog: the introspection result the generation driver consumes.
//!
//! Decoding is strict: a missing required member fails with the JSON path
//! where it was expected.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
    #[error("no `__schema` object found in input")]
    MissingSchema,
    #[error("type reference of kind {0:?} has neither a name nor an inner type")]
    UnnamedType(TypeKind),
    #[error("`{owner}.{field}` has a type of kind {kind:?}, which cannot be selected")]
    UnsupportedKind { owner: String, field: String, kind: TypeKind },
    #[error("`{owner}.{field}` refers to unknown type `{name}`")]
    UnknownType { owner: String, field: String, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub query_type: Option<NamedType>,
    pub mutation_type: Option<NamedType>,
    pub subscription_type: Option<NamedType>,
    pub types: Vec<FullType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedType {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

/// A type reference with non-null wrappers folded into `required` flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Object(String),
    Enum(String),
    Scalar(String),
    Input(String),
    List { item: Box<Shape>, item_required: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    pub objects: Vec<String>,
    pub enums: Vec<String>,
    pub scalars: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// LOADING
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize with JSON-path context in error messages.
fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CatalogError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| CatalogError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

impl Schema {
    /// Accepts `{data:{__schema:…}}`, `{__schema:…}` or the schema object itself.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CatalogError> {
        let schema = match value {
            serde_json::Value::Object(mut root) => {
                if let Some(serde_json::Value::Object(mut data)) = root.remove("data") {
                    data.remove("__schema").ok_or(CatalogError::MissingSchema)?
                } else if let Some(schema) = root.remove("__schema") {
                    schema
                } else if root.contains_key("types") {
                    serde_json::Value::Object(root)
                } else {
                    return Err(CatalogError::MissingSchema);
                }
            }
            _ => return Err(CatalogError::MissingSchema),
        };
        from_value_with_path(schema)
    }

    pub fn parse(source: &str) -> Result<Self, CatalogError> {
        let value = serde_json::from_str(source).map_err(|err| CatalogError::Decode {
            path: ".".into(),
            message: err.to_string(),
        })?;
        Self::from_json(value)
    }

    /// Schema types minus the `__` introspection types.
    pub fn user_types(&self) -> impl Iterator<Item = &FullType> {
        self.types.iter().filter(|t| !t.name.starts_with("__"))
    }

    pub fn find(&self, name: &str) -> Option<&FullType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn summary(&self) -> CatalogSummary {
        let names_of = |pred: fn(TypeKind) -> bool| -> Vec<String> {
            self.user_types().filter(|t| pred(t.kind)).map(|t| t.name.clone()).collect()
        };
        CatalogSummary {
            query_type: self.query_type.as_ref().map(|t| t.name.clone()),
            mutation_type: self.mutation_type.as_ref().map(|t| t.name.clone()),
            subscription_type: self.subscription_type.as_ref().map(|t| t.name.clone()),
            objects: names_of(TypeKind::is_selectable),
            enums: names_of(|k| k == TypeKind::Enum),
            scalars: names_of(|k| k == TypeKind::Scalar),
        }
    }
}

impl TypeKind {
    /// Types with their own selection set.
    pub fn is_selectable(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }
}

impl FullType {
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        self.enum_values.as_deref().unwrap_or_default()
    }
}

impl TypeRef {
    pub fn is_required(&self) -> bool {
        self.kind == TypeKind::NonNull
    }

    /// Folds non-null wrappers away.
    pub fn shape(&self) -> Result<Shape, CatalogError> {
        let named = || self.name.clone().ok_or(CatalogError::UnnamedType(self.kind));
        let inner = || self.of_type.as_deref().ok_or(CatalogError::UnnamedType(self.kind));
        Ok(match self.kind {
            TypeKind::NonNull => return inner()?.shape(),
            TypeKind::List => {
                let item = inner()?;
                Shape::List { item: Box::new(item.shape()?), item_required: item.is_required() }
            }
            TypeKind::Object | TypeKind::Interface | TypeKind::Union => Shape::Object(named()?),
            TypeKind::Enum => Shape::Enum(named()?),
            TypeKind::Scalar => Shape::Scalar(named()?),
            TypeKind::InputObject => Shape::Input(named()?),
        })
    }

    /// GraphQL notation, e.g. `[Episode!]!`.
    pub fn graphql_name(&self) -> String {
        match (self.kind, &self.of_type, &self.name) {
            (TypeKind::NonNull, Some(inner), _) => format!("{}!", inner.graphql_name()),
            (TypeKind::List, Some(inner), _) => format!("[{}]", inner.graphql_name()),
            (_, _, Some(name)) => name.clone(),
            _ => String::new(),
        }
    }
}

impl Shape {
    /// Innermost named shape of a (possibly nested) list.
    pub fn element(&self) -> &Shape {
        match self {
            Shape::List { item, .. } => item.element(),
            other => other,
        }
    }
}

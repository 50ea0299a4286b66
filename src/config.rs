//! Options for the generation driver.
//!
//! The config is an immutable value handed to [`crate::codegen::Codegen::new`];
//! nothing about generation is read from global state.
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IntegerType {
    #[default]
    I32,
    I64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FloatType {
    #[default]
    F64,
    F32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IdType {
    #[default]
    String,
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    Crate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
    None,
    #[default]
    Doc,
}

/// Rust representation chosen for a custom scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarMapping {
    String,
    Integer,
    Float,
    Boolean,
    Id,
    DateTime,
    /// Dynamic JSON; fields of such scalars count as complex.
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub integer_type: IntegerType,
    pub float_type: FloatType,
    pub id_type: IdType,
    pub scalar_mappings: IndexMap<String, ScalarMapping>,
    pub visibility: Visibility,
    pub comments: CommentStyle,
    pub include_deprecated: bool,
}

impl GenerationConfig {
    /// Built-in scalars map to themselves; unmapped custom scalars are JSON.
    pub fn scalar_mapping(&self, name: &str) -> ScalarMapping {
        match name {
            "Int" => ScalarMapping::Integer,
            "Float" => ScalarMapping::Float,
            "String" => ScalarMapping::String,
            "Boolean" => ScalarMapping::Boolean,
            "ID" => ScalarMapping::Id,
            other => self.scalar_mappings.get(other).copied().unwrap_or(ScalarMapping::Json),
        }
    }

    pub(crate) fn vis(&self) -> &'static str {
        match self.visibility {
            Visibility::Public => "pub",
            Visibility::Crate => "pub(crate)",
        }
    }
}

impl ScalarMapping {
    /// Parses `Name=kind` as given on the command line.
    pub fn parse_pair(raw: &str) -> Result<(String, ScalarMapping), String> {
        use clap::ValueEnum;
        let (name, kind) = raw.split_once('=').ok_or_else(|| format!("expected NAME=KIND, got `{raw}`"))?;
        let mapping = ScalarMapping::from_str(kind.trim(), true)?;
        Ok((name.trim().to_string(), mapping))
    }
}

//! CLI: introspection result → (catalog summary | Rust query builders)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gql_query_builder::catalog::Schema;
use gql_query_builder::codegen::Codegen;
use gql_query_builder::config::{
    CommentStyle, FloatType, GenerationConfig, IdType, IntegerType, ScalarMapping, Visibility,
};
use tracing::{debug, info};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate typed GraphQL query builders from a schema introspection result
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// log at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print a JSON summary of the type catalog
    Catalog(CatalogOut),
    /// emit Rust query builders for every object and enum type
    Rust(RustOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to the introspection result inside each document (e.g. /response/body)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CatalogOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// JSON generation config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rust type for `Int`
    #[arg(long, value_enum)]
    integer_type: Option<IntegerType>,

    /// Rust type for `Float`
    #[arg(long, value_enum)]
    float_type: Option<FloatType>,

    /// Rust type for `ID`
    #[arg(long, value_enum)]
    id_type: Option<IdType>,

    /// custom scalar mapping, NAME=KIND (repeatable)
    #[arg(long = "scalar", value_parser = ScalarMapping::parse_pair)]
    scalars: Vec<(String, ScalarMapping)>,

    /// visibility of emitted items
    #[arg(long, value_enum)]
    visibility: Option<Visibility>,

    /// emit schema descriptions as doc comments
    #[arg(long, value_enum)]
    comments: Option<CommentStyle>,

    /// also emit deprecated fields and enum values
    #[arg(long)]
    include_deprecated: bool,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_schemas(&self) -> Result<Vec<Schema>> {
        let mut schemas = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let mut json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            if let Some(pointer) = self.json_pointer.as_deref() {
                json_value = json_value
                    .pointer(pointer)
                    .cloned()
                    .with_context(|| format!("JSON pointer {pointer} matched nothing in {source_path_str}"))?;
            }
            let documents = match self.jq_expr.as_deref() {
                None => vec![json_value],
                Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &json_value)
                    .with_context(|| format!("failed to apply jq expression to {source_path_str}"))?,
            };
            for document in documents {
                let schema = Schema::from_json(document)
                    .with_context(|| format!("invalid introspection result in {source_path_str}"))?;
                debug!(path = %source_path_str, types = schema.types.len(), "loaded schema");
                schemas.push(schema);
            }
        }
        Ok(schemas)
    }
}

impl RustOut {
    fn generation_config(&self) -> Result<GenerationConfig> {
        let mut config = match self.config.as_ref() {
            None => GenerationConfig::default(),
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file ({})", path.display()))?;
                serde_json::from_str(&source).with_context(|| format!("invalid config file ({})", path.display()))?
            }
        };
        if let Some(x) = self.integer_type {
            config.integer_type = x;
        }
        if let Some(x) = self.float_type {
            config.float_type = x;
        }
        if let Some(x) = self.id_type {
            config.id_type = x;
        }
        if let Some(x) = self.visibility {
            config.visibility = x;
        }
        if let Some(x) = self.comments {
            config.comments = x;
        }
        config.include_deprecated |= self.include_deprecated;
        config.scalar_mappings.extend(self.scalars.iter().cloned());
        Ok(config)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Catalog(target) => {
                let summaries = target
                    .input_settings
                    .load_schemas()?
                    .iter()
                    .map(Schema::summary)
                    .collect::<Vec<_>>();
                let src = match summaries.as_slice() {
                    [single] => serde_json::to_string_pretty(single)?,
                    many => serde_json::to_string_pretty(many)?,
                };
                write_output(target.out.as_deref(), &src)
            }
            Command::Rust(target) => {
                let config = target.generation_config()?;
                let schemas = target.input_settings.load_schemas()?;
                if schemas.len() != 1 {
                    bail!("expected exactly one schema, found {}", schemas.len());
                }
                let mut cg = Codegen::new(config);
                for schema in &schemas {
                    cg.emit(schema)?;
                }
                let rust_src = cg.into_string();
                info!(bytes = rust_src.len(), "generated Rust source");
                write_output(target.out.as_deref(), &rust_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

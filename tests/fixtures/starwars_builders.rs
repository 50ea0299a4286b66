// Generated by gql-query-builder from a GraphQL introspection result.
#[allow(unused_imports)]
use gql_query_builder::{
    Arguments, BuilderKind, Directives, FieldMetadata, GraphQlEnum, ObjectBuilder, Operation, Parameter,
    QueryBuilder, Result, Value,
};

static QUERY_FIELDS: &[FieldMetadata] = &[
    FieldMetadata::object("hero", CharacterQueryBuilder::KIND),
    FieldMetadata::object("character", CharacterQueryBuilder::KIND),
    FieldMetadata::object("search", CharacterQueryBuilder::KIND),
];

fn query_fields() -> &'static [FieldMetadata] {
    QUERY_FIELDS
}

/// Root query.
#[derive(Debug, Clone)]
pub struct QueryQueryBuilder(QueryBuilder);

impl ObjectBuilder for QueryQueryBuilder {
    const KIND: BuilderKind = BuilderKind::new("Query", query_fields).with_operation(Operation::Query);

    fn from_builder(builder: QueryBuilder) -> Self {
        Self(builder)
    }
    fn builder(&self) -> &QueryBuilder {
        &self.0
    }
    fn builder_mut(&mut self) -> &mut QueryBuilder {
        &mut self.0
    }
    fn into_builder(self) -> QueryBuilder {
        self.0
    }
}

impl QueryQueryBuilder {
    pub fn with_hero(&mut self, builder: CharacterQueryBuilder, args: QueryHeroArgs) -> Result<&mut Self> {
        let mut arguments = Arguments::new();
        arguments.push_optional("episode", args.episode.as_ref());
        self.0.select_object_field("hero", builder.into_builder(), arguments)?;
        Ok(self)
    }

    pub fn except_hero(&mut self) -> Result<&mut Self> {
        self.0.exclude("hero")?;
        Ok(self)
    }

    pub fn with_character(&mut self, builder: CharacterQueryBuilder, args: QueryCharacterArgs) -> Result<&mut Self> {
        let mut arguments = Arguments::new();
        arguments.push_optional("id", args.id.as_ref());
        self.0.select_object_field("character", builder.into_builder(), arguments)?;
        Ok(self)
    }

    pub fn except_character(&mut self) -> Result<&mut Self> {
        self.0.exclude("character")?;
        Ok(self)
    }

    pub fn with_search(&mut self, builder: CharacterQueryBuilder, args: QuerySearchArgs) -> Result<&mut Self> {
        let mut arguments = Arguments::new();
        arguments.push_optional("text", args.text.as_ref());
        self.0.select_object_field("search", builder.into_builder(), arguments)?;
        Ok(self)
    }

    pub fn except_search(&mut self) -> Result<&mut Self> {
        self.0.exclude("search")?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryHeroArgs {
    pub episode: Option<Parameter<Episode>>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryCharacterArgs {
    pub id: Option<Parameter<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct QuerySearchArgs {
    pub text: Option<Parameter<String>>,
}

static CHARACTER_FIELDS: &[FieldMetadata] = &[
    FieldMetadata::scalar("id"),
    FieldMetadata::scalar("name"),
    FieldMetadata::scalar("height"),
    FieldMetadata::object("friends", CharacterQueryBuilder::KIND),
    FieldMetadata::complex("appearsIn"),
    FieldMetadata::complex("metadata"),
    FieldMetadata::scalar("born"),
];

fn character_fields() -> &'static [FieldMetadata] {
    CHARACTER_FIELDS
}

#[derive(Debug, Clone)]
pub struct CharacterQueryBuilder(QueryBuilder);

impl ObjectBuilder for CharacterQueryBuilder {
    const KIND: BuilderKind = BuilderKind::new("Character", character_fields);

    fn from_builder(builder: QueryBuilder) -> Self {
        Self(builder)
    }
    fn builder(&self) -> &QueryBuilder {
        &self.0
    }
    fn builder_mut(&mut self) -> &mut QueryBuilder {
        &mut self.0
    }
    fn into_builder(self) -> QueryBuilder {
        self.0
    }
}

impl CharacterQueryBuilder {
    pub fn with_id(&mut self, alias: Option<&str>, directives: Directives) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_scalar_field("id", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_id(&mut self) -> Result<&mut Self> {
        self.0.exclude("id")?;
        Ok(self)
    }

    pub fn with_name(&mut self, alias: Option<&str>, directives: Directives) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_scalar_field("name", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_name(&mut self) -> Result<&mut Self> {
        self.0.exclude("name")?;
        Ok(self)
    }

    pub fn with_height(&mut self, alias: Option<&str>, directives: Directives, args: CharacterHeightArgs) -> Result<&mut Self> {
        let mut arguments = Arguments::new();
        arguments.push_optional("unit", args.unit.as_ref());
        arguments.push_optional("precision", args.precision.as_ref());
        self.0.select_scalar_field("height", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_height(&mut self) -> Result<&mut Self> {
        self.0.exclude("height")?;
        Ok(self)
    }

    pub fn with_friends(&mut self, builder: CharacterQueryBuilder) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_object_field("friends", builder.into_builder(), arguments)?;
        Ok(self)
    }

    pub fn except_friends(&mut self) -> Result<&mut Self> {
        self.0.exclude("friends")?;
        Ok(self)
    }

    pub fn with_appears_in(&mut self, alias: Option<&str>, directives: Directives) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_scalar_field("appearsIn", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_appears_in(&mut self) -> Result<&mut Self> {
        self.0.exclude("appearsIn")?;
        Ok(self)
    }

    pub fn with_metadata(&mut self, alias: Option<&str>, directives: Directives) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_scalar_field("metadata", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_metadata(&mut self) -> Result<&mut Self> {
        self.0.exclude("metadata")?;
        Ok(self)
    }

    pub fn with_born(&mut self, alias: Option<&str>, directives: Directives) -> Result<&mut Self> {
        let arguments = Arguments::new();
        self.0.select_scalar_field("born", alias, directives, arguments)?;
        Ok(self)
    }

    pub fn except_born(&mut self) -> Result<&mut Self> {
        self.0.exclude("born")?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CharacterHeightArgs {
    pub unit: Option<Parameter<LengthUnit>>,
    pub precision: Option<Parameter<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Episode {
    NewHope,
    Empire,
    Jedi,
}

impl GraphQlEnum for Episode {
    fn symbol(&self) -> &'static str {
        match self {
            Episode::NewHope => "NewHope",
            Episode::Empire => "Empire",
            Episode::Jedi => "Jedi",
        }
    }

    fn wire_name(&self) -> Option<&'static str> {
        match self {
            Episode::NewHope => Some("NEW_HOPE"),
            Episode::Empire => Some("EMPIRE"),
            Episode::Jedi => Some("JEDI"),
        }
    }
}

impl From<Episode> for Value {
    fn from(value: Episode) -> Self {
        Value::enumeration(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Meter,
    Foot,
}

impl GraphQlEnum for LengthUnit {
    fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "Meter",
            LengthUnit::Foot => "Foot",
        }
    }

    fn wire_name(&self) -> Option<&'static str> {
        match self {
            LengthUnit::Meter => Some("METER"),
            LengthUnit::Foot => Some("FOOT"),
        }
    }
}

impl From<LengthUnit> for Value {
    fn from(value: LengthUnit) -> Self {
        Value::enumeration(&value)
    }
}

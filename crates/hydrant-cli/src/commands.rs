use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use hydrant_core::{as_input_bag, ArrayHydrator, Hydrator, HydratorConfig, Target};
use hydrant_jsonapi::JsonApiHydrator;
use hydrant_model::{Cardinality, ModelSchema};
use hydrant_store::InMemoryEntityStore;
use serde_json::Value;

use crate::cli::*;
use crate::render::render_entity;
use crate::seed::{seed, ForeignDirectory};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Check(args) => cmd_check(args, cli.format),
        Command::Hydrate(args) => cmd_hydrate(args, cli.format),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<ModelSchema> {
    let schema = ModelSchema::load(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    schema.validate()?;
    Ok(schema)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn cmd_check(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    println!(
        "{} {} is valid: {} types",
        "✓".green().bold(),
        args.schema.display(),
        schema.entities.len()
    );
    for entity in &schema.entities {
        println!("\n{} (identifier: {})", entity.type_name.bold(), entity.identifier.cyan());
        for field in &entity.fields {
            let declared = field.field_type.as_deref().unwrap_or("-");
            println!("  {:<24} {}", field.name, declared.dimmed());
        }
        for association in &entity.associations {
            let arrow = match association.cardinality {
                Cardinality::ToOne => "->",
                Cardinality::ToMany => "->>",
            };
            println!("  {:<24} {} {}", association.name, arrow, association.target_type.yellow());
        }
    }
    if !schema.foreign_types.is_empty() {
        println!("\nforeign: {}", schema.foreign_types.join(", ").yellow());
    }
    Ok(())
}

fn cmd_hydrate(args: HydrateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = hydrate(&args)?;
    if format == OutputFormat::Text {
        println!("{} Hydrated {}", "✓".green().bold(), args.type_name.bold());
    }
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

/// Hydrate the input file and render the result as JSON.
fn hydrate(args: &HydrateArgs) -> anyhow::Result<Value> {
    let schema = load_schema(&args.schema)?;
    let metadata = Arc::new(schema.to_metadata()?);
    let registry = Arc::new(schema.dynamic_registry());

    let mut config = match &args.config {
        Some(path) => HydratorConfig::load(path)?,
        None => HydratorConfig::default(),
    };
    if args.verified {
        config.prefer_lightweight_references = false;
    }

    let store = Arc::new(InMemoryEntityStore::new());
    let foreign = Arc::new(InMemoryEntityStore::new());
    let flat = ArrayHydrator::new(metadata.clone(), registry, store.clone());
    if let Some(path) = &args.store {
        let objects = read_json(path)?;
        let objects = as_input_bag(&objects).context("store file must be a JSON object")?;
        seed(&schema, &flat, &store, &foreign, objects)?;
    }
    let flat = flat.with_config(config);

    let input = read_json(&args.input)?;
    let input = as_input_bag(&input).context("input must be a JSON object")?;
    let target = Target::TypeName(args.type_name.clone());
    let entity = if args.jsonapi {
        let directory = ForeignDirectory::new(&schema, foreign);
        let mut hydrator = JsonApiHydrator::new(flat);
        if !directory.is_empty() {
            hydrator = hydrator.with_delegate(Arc::new(directory));
        }
        hydrator.hydrate(target, input)?
    } else {
        flat.hydrate(target, input)?
    };

    Ok(render_entity(entity.as_ref(), &*metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"
foreign_types = ["user"]

[[entity]]
name = "company"

[[entity.field]]
name = "id"
type = "integer"

[[entity]]
name = "desk"

[[entity.field]]
name = "id"
type = "integer"

[[entity.association]]
name = "company"
kind = "many_to_one"
target = "company"
"#;

    fn write(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn hydrate_args(schema: &Path, input: &Path) -> HydrateArgs {
        HydrateArgs {
            schema: schema.to_path_buf(),
            type_name: "desk".into(),
            input: input.to_path_buf(),
            jsonapi: false,
            verified: false,
            config: None,
            store: None,
        }
    }

    #[test]
    fn check_accepts_valid_schema() {
        let schema = write(".toml", SCHEMA);
        let args = CheckArgs { schema: schema.path().to_path_buf() };
        cmd_check(args, OutputFormat::Json).unwrap();
    }

    #[test]
    fn check_rejects_dangling_targets() {
        let dangling = format!(
            "{SCHEMA}\n[[entity.association]]\nname = \"owner\"\nkind = \"to_one\"\ntarget = \"nobody\"\n"
        );
        let schema = write(".toml", &dangling);
        let args = CheckArgs { schema: schema.path().to_path_buf() };
        let err = cmd_check(args, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn hydrate_flat_input() {
        let schema = write(".toml", SCHEMA);
        let input = write(".json", r#"{"id": "4", "company": 1}"#);
        cmd_hydrate(hydrate_args(schema.path(), input.path()), OutputFormat::Json).unwrap();
    }

    #[test]
    fn hydrate_jsonapi_with_seeded_store() {
        let schema = write(".toml", SCHEMA);
        let seed = write(".json", r#"{"company": [{"id": 1}], "user": [{"id": 7}]}"#);
        let input = write(
            ".json",
            r#"{"data": {"id": 4, "relationships": {"company": {"data": {"id": "1", "type": "company"}}}}}"#,
        );
        let mut args = hydrate_args(schema.path(), input.path());
        args.jsonapi = true;
        args.verified = true;
        args.store = Some(seed.path().to_path_buf());
        cmd_hydrate(args, OutputFormat::Text).unwrap();
    }

    #[test]
    fn seeded_foreign_objects_attach() {
        let schema = format!("{SCHEMA}\n[[entity.field]]\nname = \"user\"\n");
        let schema = write(".toml", &schema);
        let seed = write(".json", r#"{"user": [{"id": 7, "name": "Ada"}]}"#);
        let input = write(
            ".json",
            r#"{"data": {"id": 4, "relationships": {"user": {"data": {"id": "7", "type": "user"}}}}}"#,
        );
        let mut args = hydrate_args(schema.path(), input.path());
        args.jsonapi = true;
        args.store = Some(seed.path().to_path_buf());

        let rendered = hydrate(&args).unwrap();
        assert_eq!(rendered["id"], 4);
        assert_eq!(rendered["user"]["name"], "Ada");
        cmd_hydrate(args, OutputFormat::Text).unwrap();
    }

    #[test]
    fn unseeded_foreign_objects_attach_null() {
        let schema = format!("{SCHEMA}\n[[entity.field]]\nname = \"user\"\n");
        let schema = write(".toml", &schema);
        let input = write(
            ".json",
            r#"{"relationships": {"user": {"data": {"id": 8, "type": "user"}}}}"#,
        );
        let mut args = hydrate_args(schema.path(), input.path());
        args.jsonapi = true;
        assert_eq!(hydrate(&args).unwrap()["user"], Value::Null);
    }

    #[test]
    fn unknown_relationships_fail() {
        let schema = write(".toml", SCHEMA);
        let input = write(
            ".json",
            r#"{"relationships": {"building": {"data": {"id": 1, "type": "building"}}}}"#,
        );
        let mut args = hydrate_args(schema.path(), input.path());
        args.jsonapi = true;
        let err = cmd_hydrate(args, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("building"));
    }

    #[test]
    fn unknown_types_fail() {
        let schema = write(".toml", SCHEMA);
        let input = write(".json", "{}");
        let mut args = hydrate_args(schema.path(), input.path());
        args.type_name = "office".into();
        assert!(cmd_hydrate(args, OutputFormat::Json).is_err());
    }
}

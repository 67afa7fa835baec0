//! Developer tasks (schema generation, contract fixture conformance).

use anyhow::{Context, bail};
use policyguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        let root = manifest_dir.parent().context("xtask has no parent")?;
        Ok(root.to_path_buf())
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn contracts_fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("contracts").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_summary_schema() -> schemars::Schema {
    schema_for!(policyguard_types::PolicyValidationSummary)
}

fn generate_policy_schema() -> schemars::Schema {
    schema_for!(policyguard_types::Policy)
}

fn generate_policy_config_schema() -> schemars::Schema {
    schema_for!(policyguard_types::PolicyConfig)
}

fn generate_entity_schema() -> schemars::Schema {
    schema_for!(policyguard_types::Entity)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(policyguard_settings::PolicyguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "policyguard.summary.v1.json",
            generate: generate_summary_schema,
        },
        SchemaSpec {
            filename: "policyguard.policy.v1.json",
            generate: generate_policy_schema,
        },
        SchemaSpec {
            filename: "policyguard.policy-config.v1.json",
            generate: generate_policy_config_schema,
        },
        SchemaSpec {
            filename: "policyguard.entity.v1.json",
            generate: generate_entity_schema,
        },
        SchemaSpec {
            filename: "policyguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate contract fixtures against the summary schema");
}

/// Domain rules a summary must satisfy beyond its JSON shape.
fn summary_hygiene(filename: &str, value: &Value, errors: &mut Vec<String>) {
    for (list, status) in [("violations", "Violation"), ("compliances", "Compliance")] {
        let Some(items) = value.get(list).and_then(Value::as_array) else {
            continue;
        };
        for (i, item) in items.iter().enumerate() {
            let at = format!("{filename}: {list}[{i}]");
            if item.get("status").and_then(Value::as_str) != Some(status) {
                errors.push(format!("{at}.status must be '{status}'"));
            }

            let message = item.get("message").and_then(Value::as_str).unwrap_or("");
            let occurrences = item
                .get("occurrences")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            if status == "Violation" {
                let suffix = format!("({} occurrences)", occurrences.len());
                if !message.ends_with(&suffix) {
                    errors.push(format!("{at}.message '{message}' must end with '{suffix}'"));
                }
            } else if !occurrences.is_empty() {
                errors.push(format!("{at} is a compliance with occurrences"));
            }

            for (j, occurrence) in occurrences.iter().enumerate() {
                let mutated = occurrence.get("mutated").and_then(Value::as_bool) == Some(true);
                let remediable = occurrence.get("violating_key").is_some()
                    && occurrence.get("recommended_value").is_some();
                if mutated && !remediable {
                    errors.push(format!(
                        "{at}.occurrences[{j}] is mutated without violating_key and recommended_value"
                    ));
                }
            }
        }
    }
}

/// Validate contract fixtures.
///
/// This checks:
/// 1. Schema validation: fixtures validate against the generated summary schema
/// 2. Summary hygiene: status matches its list, message counts occurrences
/// 3. Fixtures carry placeholders, not live validation ids or timestamps
fn conform() -> anyhow::Result<()> {
    conform_fixtures(&contracts_fixtures_dir()?)
}

fn conform_fixtures(fixtures_dir: &Path) -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_summary_schema())
        .context("Failed to serialize summary schema")?;
    let compiled = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;

    println!("✓ policyguard.summary.v1 schema compiles");

    if !fixtures_dir.exists() {
        bail!(
            "contracts/fixtures/ not found at {}\n\n\
            Create contract fixtures first.",
            fixtures_dir.display()
        );
    }

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(fixtures_dir).context("Failed to read contracts/fixtures/")? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {filename}"))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {filename} as JSON"))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{filename}: schema validation: {err}"));
        }

        summary_hygiene(&filename, &value, &mut errors);

        if normalize_nondeterministic(value.clone()) != value {
            errors.push(format!(
                "{filename}: validation ids and created_at must be '__ID__' / '__TIMESTAMP__'"
            ));
        }

        fixture_count += 1;
        println!("  ✓ {filename} validates");
    }

    if fixture_count == 0 {
        bail!("No JSON fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {fixture_count} contract fixtures pass conformance checks!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            println!("{}", policyguard_types::ids::SCHEMA_CONFIG_V1);
            println!("{}", policyguard_types::ids::SCHEMA_SUMMARY_V1);
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

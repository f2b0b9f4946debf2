mod common;

use schema_fixtures::{FixtureConfig, FixtureError, SchemaRegistry};
use std::io::Write;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
seed: 1234
stores:
  Customer: 6
schemas:
  Customer:
    type: object
    properties:
      id:
        type: string
        format: uuid
      tier:
        type: string
        enum: [free, pro, 3]
  Invoice:
    type: object
    properties:
      customer:
        $ref: "Customer#/properties/id"
      total:
        type: number
        minimum: 0
        exclusiveMaximum: 500
      lines:
        type: array
        minItems: 1
        maxItems: 3
        items:
          type: integer
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_registry_from_config_file() {
    common::init_tracing();
    let file = write_config(CONFIG);
    let config = FixtureConfig::from_file(file.path()).unwrap();
    let registry = SchemaRegistry::from_config(&config).unwrap();

    assert_eq!(registry.seed(), Some(1234));
    assert_eq!(registry.schema_names(), vec!["Customer", "Invoice"]);
    assert_eq!(registry.default_store_count("Customer"), 6);
    assert_eq!(registry.default_store_count("Invoice"), 0);

    let customers = registry.fixture("Customer").unwrap();
    assert_eq!(customers.store().len(), 6);
    for customer in customers.store() {
        assert_eq!(customer["id"].as_str().unwrap().len(), 36);
        assert!(customer["tier"] == "free" || customer["tier"] == "pro");
    }

    let mut invoices = registry.fixture("Invoice").unwrap();
    for _ in 0..20 {
        let invoice = invoices.generate().unwrap();
        assert_eq!(invoice["customer"].as_str().unwrap().len(), 36);
        let total = invoice["total"].as_f64().unwrap();
        assert!((0.0..500.0).contains(&total));
        let lines = invoice["lines"].as_array().unwrap();
        assert!((1..=3).contains(&lines.len()));
    }
}

#[test]
fn test_same_config_same_output() {
    let config = FixtureConfig::from_yaml(CONFIG).unwrap();
    let left = SchemaRegistry::from_config(&config).unwrap();
    let right = SchemaRegistry::from_config(&config).unwrap();

    let left_store = left.fixture("Customer").unwrap();
    let right_store = right.fixture("Customer").unwrap();
    let left_values: Vec<_> = left_store.store().iter().map(|v| v.as_ref().clone()).collect();
    let right_values: Vec<_> = right_store.store().iter().map(|v| v.as_ref().clone()).collect();
    assert_eq!(left_values, right_values);
}

#[test]
fn test_store_for_unknown_schema_rejected() {
    let config = FixtureConfig::from_yaml(
        "stores:\n  Missing: 3\nschemas:\n  Present: { type: boolean }\n",
    )
    .unwrap();
    assert!(matches!(
        SchemaRegistry::from_config(&config),
        Err(FixtureError::Config(_))
    ));
}

#[test]
fn test_invalid_schema_in_config() {
    let config = FixtureConfig::from_yaml("schemas:\n  Broken: { type: decimal }\n").unwrap();
    assert!(matches!(
        SchemaRegistry::from_config(&config),
        Err(FixtureError::Schema(_))
    ));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FixtureConfig::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(FixtureError::Io(_))));
}

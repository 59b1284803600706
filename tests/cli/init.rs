use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, MANIFEST_PATH, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(
        parsed["includes"],
        serde_json::json!(["src/components/**/*.{ts,tsx}"])
    );
    assert_eq!(parsed["output"], MANIFEST_PATH);
    assert_eq!(parsed["iconSuffix"], "Icon");
    assert!(parsed.get("importPath").is_none());

    // 2-space indentation
    assert!(content.contains("\n  \"includes\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(stdout(&output).trim_end(), @"✓ Created .manifestrc.json");

    let content = test.read_file(".manifestrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".manifestrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    insta::assert_snapshot!(
        stderr(&output).trim_end(),
        @"Error: .manifestrc.json already exists"
    );
    assert_eq!(test.read_file(".manifestrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/components/Panel.tsx",
        "export function Panel() { return <section />; }\n",
    )?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "Generate should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("with 1 components"));

    Ok(())
}

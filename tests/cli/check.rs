use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, MANIFEST_PATH, stderr, stdout};

fn button_project() -> Result<CliTest> {
    CliTest::with_file(
        "src/components/Button.tsx",
        r#"
export interface ButtonProps {
    /** Button label. */
    label: string;
}

export function Button({ label }: ButtonProps) {
    return <button>{label}</button>;
}
"#,
    )
}

#[test]
fn test_check_up_to_date() -> Result<()> {
    let test = button_project()?;
    test.generate_command().output()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"✓ docs/components.manifest.json is up to date"
    );

    Ok(())
}

#[test]
fn test_check_out_of_date() -> Result<()> {
    let test = button_project()?;
    test.generate_command().output()?;

    test.write_file(
        "src/components/Badge.tsx",
        "export function Badge() { return <span />; }\n",
    )?;
    let before = test.read_file(MANIFEST_PATH)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"✘ docs/components.manifest.json is out of date (run generate)"
    );
    // check never writes
    assert_eq!(test.read_file(MANIFEST_PATH)?, before);

    Ok(())
}

#[test]
fn test_check_missing_manifest() -> Result<()> {
    let test = button_project()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"✘ docs/components.manifest.json does not exist (run generate)"
    );
    assert!(!test.root().join(MANIFEST_PATH).exists());

    Ok(())
}

#[test]
fn test_check_respects_import_path_env() -> Result<()> {
    let test = button_project()?;
    test.generate_command()
        .env("COMPONENT_PACKAGE_IMPORT_PATH", "@acme/ui")
        .output()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let output = test
        .check_command()
        .env("COMPONENT_PACKAGE_IMPORT_PATH", "@acme/ui")
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

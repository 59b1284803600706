use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, MANIFEST_PATH, component, component_names, stderr, stdout};

const WIDGET: &str = r#"
export interface WidgetProps {
    label: string;
    count?: number;
}

/** A simple widget. */
export function Widget({ label, count }: WidgetProps) {
    return <div>{label} {count}</div>;
}
"#;

#[test]
fn test_widget_end_to_end() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;
    test.write_file("package.json", r#"{ "name": "@acme/ui" }"#)?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"Wrote docs/components.manifest.json with 1 components. Import path: @acme/ui"
    );

    let expected = r#"{
  "components": [
    {
      "name": "Widget",
      "summary": "A simple widget.",
      "import": {
        "from": "@acme/ui",
        "named": "Widget"
      },
      "props": [
        {
          "name": "label",
          "type": "string",
          "required": true
        },
        {
          "name": "count",
          "type": "number",
          "required": false
        }
      ],
      "examples": []
    }
  ]
}
"#;
    assert_eq!(test.read_file(MANIFEST_PATH)?, expected);

    Ok(())
}

#[test]
fn test_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"Wrote docs/components.manifest.json with 0 components. Import path: @components/ui"
    );
    assert_eq!(
        test.read_file(MANIFEST_PATH)?,
        "{\n  \"components\": []\n}\n"
    );

    Ok(())
}

#[test]
fn test_required_prop_derivation() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Field.tsx",
        r#"
export interface FieldProps {
    name: string;
    hint?: string;
    placeholder: string | undefined;
    /**
     * Visual size.
     * @default "md"
     */
    size?: "sm" | "md" | "lg";
    onChange(value: string): void;
}

export const Field = (props: FieldProps) => <input />;
"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let field = component(&manifest, "Field").expect("Field should be in the manifest");
    assert_eq!(
        field["props"],
        json!([
            { "name": "name", "type": "string", "required": true },
            { "name": "hint", "type": "string", "required": false },
            { "name": "placeholder", "type": "string | undefined", "required": false },
            {
                "name": "size",
                "type": "\"sm\" | \"md\" | \"lg\"",
                "required": false,
                "default": "\"md\"",
                "description": "Visual size."
            },
            { "name": "onChange", "type": "(value: string) => void", "required": true }
        ])
    );

    Ok(())
}

#[test]
fn test_icons_are_suppressed_by_default() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/icons.tsx",
        r#"
export function WarningIcon() { return <svg />; }
export function Alert() { return <div />; }
"#,
    )?;

    test.generate_command().output()?;
    assert_eq!(component_names(&test.manifest()?), vec!["Alert"]);

    // Anything other than exactly "true" keeps icons out
    test.generate_command()
        .env("MANIFEST_INCLUDE_ICONS", "1")
        .output()?;
    assert_eq!(component_names(&test.manifest()?), vec!["Alert"]);

    test.generate_command()
        .env("MANIFEST_INCLUDE_ICONS", "true")
        .output()?;
    assert_eq!(
        component_names(&test.manifest()?),
        vec!["Alert", "WarningIcon"]
    );

    test.generate_command().arg("--include-icons").output()?;
    assert_eq!(
        component_names(&test.manifest()?),
        vec!["Alert", "WarningIcon"]
    );

    Ok(())
}

#[test]
fn test_import_path_env_overrides_package_name() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;
    test.write_file("package.json", r#"{ "name": "@acme/ui" }"#)?;

    let output = test
        .generate_command()
        .env("COMPONENT_PACKAGE_IMPORT_PATH", "@acme/design-system")
        .output()?;
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"Wrote docs/components.manifest.json with 1 components. Import path: @acme/design-system"
    );

    let manifest = test.manifest()?;
    assert_eq!(
        component(&manifest, "Widget").map(|w| &w["import"]),
        Some(&json!({ "from": "@acme/design-system", "named": "Widget" }))
    );

    Ok(())
}

#[test]
fn test_invalid_package_json_falls_back_to_default() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;
    test.write_file("package.json", "{ not json")?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    let manifest = test.manifest()?;
    assert_eq!(
        component(&manifest, "Widget").map(|w| &w["import"]["from"]),
        Some(&json!("@components/ui"))
    );

    Ok(())
}

#[test]
fn test_framework_props_are_filtered() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Button.tsx",
        r#"
import * as React from "react";

export interface ButtonProps extends React.ButtonHTMLAttributes<HTMLButtonElement> {
    /** Extra classes applied to the root. */
    className?: string;
    loading?: boolean;
}

export const Button = React.forwardRef<HTMLButtonElement, ButtonProps>(
    ({ className, loading, ...props }, ref) => <button ref={ref} {...props} />
);
"#,
    )?;
    test.write_file(
        "node_modules/@types/react/index.d.ts",
        r#"
export = React;
declare namespace React {
    interface HTMLAttributes<T> {
        className?: string;
        id?: string;
    }
    interface ButtonHTMLAttributes<T> extends HTMLAttributes<T> {
        disabled?: boolean;
    }
}
"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let button = component(&manifest, "Button").expect("Button should be in the manifest");
    assert_eq!(
        button["props"],
        json!([
            {
                "name": "className",
                "type": "string",
                "required": false,
                "description": "Extra classes applied to the root."
            },
            { "name": "loading", "type": "boolean", "required": false }
        ])
    );

    Ok(())
}

#[test]
fn test_composition_ignores_utilities() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Button.tsx",
        r#"
import { Icon } from "./Icon";
import { cn } from "../lib/utils";

export function Button() {
    return (
        <button className={cn("btn")}>
            <Icon name="check" />
        </button>
    );
}
"#,
    )?;
    test.write_file(
        "src/components/Icon.tsx",
        "export function Icon(props: { name: string }) { return <svg />; }\n",
    )?;
    test.write_file(
        "src/lib/utils.ts",
        "export function cn(...parts: string[]) { return parts.join(\" \"); }\n",
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let button = component(&manifest, "Button").expect("Button should be in the manifest");
    assert_eq!(button["composes"], json!(["Icon"]));
    assert_eq!(component_names(&manifest), vec!["Button"]);

    Ok(())
}

#[test]
fn test_wrapped_components() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/wrapped.tsx",
        r#"
import * as React from "react";
import { memo } from "react";

export interface ChipProps { label: string }

export const Chip = memo(function Chip({ label }: ChipProps) {
    return <span>{label}</span>;
});
export const Input = React.forwardRef<HTMLInputElement, {}>((props, ref) => <input ref={ref} />);
export const Tricky = withTheme(() => <div />);
export const THEME = { dark: true };
export function helper() { return 1; }
"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(component_names(&test.manifest()?), vec!["Chip", "Input"]);

    Ok(())
}

#[test]
fn test_sorted_and_first_wins() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/a/Card.tsx",
        r#"
export interface CardProps { title: string }
export function Card(props: CardProps) { return null; }
export function Zeta() { return null; }
"#,
    )?;
    test.write_file(
        "src/components/b/Card.tsx",
        r#"
export interface CardProps { heading: string; body: string }
export function Card(props: CardProps) { return null; }
export function Alpha() { return null; }
"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    assert_eq!(component_names(&manifest), vec!["Alpha", "Card", "Zeta"]);
    let card = component(&manifest, "Card").expect("Card should be in the manifest");
    assert_eq!(
        card["props"],
        json!([{ "name": "title", "type": "string", "required": true }])
    );

    Ok(())
}

#[test]
fn test_output_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;
    test.write_file(
        "src/components/Badge.tsx",
        "export function Badge(props: { tone?: \"info\" | \"warn\" }) { return null; }\n",
    )?;

    test.generate_command().output()?;
    let first = test.read_file(MANIFEST_PATH)?;
    test.generate_command().output()?;
    let second = test.read_file(MANIFEST_PATH)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_props_type_through_path_alias() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Tag.tsx",
        r#"
import type { TagProps } from "@/types/tag";
export type { TagProps };

export function Tag({ text }: TagProps) { return <span>{text}</span>; }
"#,
    )?;
    test.write_file(
        "src/types/tag.ts",
        r#"
export interface TagProps {
    /** Text shown inside the tag. */
    text: string;
}
"#,
    )?;
    test.write_file(
        "tsconfig.json",
        r#"{
  // Path aliases
  "compilerOptions": {
    "baseUrl": ".",
    "paths": { "@/*": ["src/*"] }
  }
}"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let tag = component(&manifest, "Tag").expect("Tag should be in the manifest");
    assert_eq!(
        tag["props"],
        json!([{
            "name": "text",
            "type": "string",
            "required": true,
            "description": "Text shown inside the tag."
        }])
    );

    Ok(())
}

#[test]
fn test_path_alias_from_extended_package_config() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Tag.tsx",
        r#"
import type { TagProps } from "@/types";
export function Tag({ text }: TagProps) { return <span>{text}</span>; }
"#,
    )?;
    test.write_file("src/types/index.ts", "export interface TagProps { text: string }")?;
    test.write_file(
        "node_modules/@acme/tsconfig/package.json",
        r#"{ "name": "@acme/tsconfig" }"#,
    )?;
    test.write_file(
        "node_modules/@acme/tsconfig/base.json",
        r#"{ "compilerOptions": { "paths": { "@/*": ["./src/*"] } } }"#,
    )?;
    test.write_file(
        "tsconfig.json",
        r#"{ "extends": "@acme/tsconfig/base.json", "compilerOptions": { "baseUrl": "." } }"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let tag = component(&manifest, "Tag").expect("Tag should be in the manifest");
    assert_eq!(
        tag["props"],
        json!([{ "name": "text", "type": "string", "required": true }])
    );

    Ok(())
}

#[test]
fn test_props_type_from_package_exports_types() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Chip.tsx",
        r#"
import type { ChipProps } from "@acme/primitives";
export function Chip({ tone }: ChipProps) { return <span>{tone}</span>; }
"#,
    )?;
    test.write_file(
        "node_modules/@acme/primitives/package.json",
        r#"{
  "name": "@acme/primitives",
  "exports": { ".": { "types": "./dist/index.d.ts", "default": "./dist/index.js" } }
}"#,
    )?;
    test.write_file(
        "node_modules/@acme/primitives/dist/index.d.ts",
        "export interface ChipProps { tone?: \"info\" | \"warn\" }",
    )?;
    test.write_file("node_modules/@acme/primitives/dist/index.js", "")?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    let chip = component(&manifest, "Chip").expect("Chip should be in the manifest");
    assert_eq!(chip["props"][0]["name"], "tone");
    assert_eq!(chip["props"][0]["required"], false);

    Ok(())
}

#[test]
fn test_unparsable_import_is_reported() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/Widget.tsx",
        r#"
import { helper } from "../lib/helper";
export function Widget() { return <div>{helper}</div>; }
"#,
    )?;
    test.write_file("src/lib/helper.ts", "export const = ;\n")?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    insta::assert_snapshot!(
        stderr(&output).trim_end(),
        @"Warning: 1 imported file(s) skipped due to parse errors (use -v for details)"
    );
    assert_eq!(component_names(&test.manifest()?), vec!["Widget"]);

    Ok(())
}

#[test]
fn test_output_and_root_flags() -> Result<()> {
    let test = CliTest::with_file("ui/src/components/Widget.tsx", WIDGET)?;

    let output = test
        .generate_command()
        .args(["--root", "ui", "--output", "out/manifest.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    insta::assert_snapshot!(
        stdout(&output).trim_end(),
        @"Wrote out/manifest.json with 1 components. Import path: @components/ui"
    );
    assert!(test.root().join("ui/out/manifest.json").exists());

    Ok(())
}

#[test]
fn test_config_file_settings() -> Result<()> {
    let test = CliTest::with_file(
        "lib/Glyph.tsx",
        "export function StarGlyph() { return <svg />; }\nexport function Panel() { return null; }\n",
    )?;
    test.write_file(
        ".manifestrc.json",
        r#"{ "includes": ["lib"], "iconSuffix": "Glyph", "importPath": "@acme/lib" }"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let manifest = test.manifest()?;
    assert_eq!(component_names(&manifest), vec!["Panel"]);
    assert_eq!(
        component(&manifest, "Panel").map(|p| &p["import"]["from"]),
        Some(&json!("@acme/lib"))
    );

    Ok(())
}

#[test]
fn test_parse_error_aborts_without_output() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;
    test.write_file(
        "src/components/Broken.tsx",
        "export function Broken( { return <div> }\n",
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error: Failed to parse "), "{}", err);
    assert!(err.contains("Broken.tsx"), "{}", err);
    assert!(!test.root().join(MANIFEST_PATH).exists());

    Ok(())
}

#[test]
fn test_verbose_prints_component_table() -> Result<()> {
    let test = CliTest::with_file("src/components/Widget.tsx", WIDGET)?;

    let output = test.generate_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(0));

    let err = stderr(&output);
    assert!(err.contains("Scanned 1 component file"), "{}", err);
    assert!(err.contains("Component  Props  Composes  Source"), "{}", err);
    assert!(
        err.contains("Widget     2      -         src/components/Widget.tsx"),
        "{}",
        err
    );
    assert_eq!(stdout(&output).lines().count(), 1);

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}

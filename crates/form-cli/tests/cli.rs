use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_temp(dir: &assert_fs::TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(
        &path,
        serde_json::to_string_pretty(value).expect("serialize"),
    )
    .expect("write");
    path
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

fn gated_form() -> Value {
    json!({
        "id": "gated",
        "title": "Gated",
        "board_id": "demo",
        "fields": [
            {
                "id": "a",
                "type": "dropdown",
                "label": "Pick one",
                "required": true,
                "options": ["Yes", "No"]
            },
            {
                "id": "b",
                "type": "text",
                "label": "Tell us more",
                "required": true,
                "logic": {
                    "conditions": [
                        { "field_id": "a", "operator": "equals", "value": "Yes" }
                    ],
                    "action": "show"
                }
            }
        ],
        "settings": { "success_message": "Thanks!" }
    })
}

#[test]
fn validate_accepts_the_hidden_branch() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    let form = write_temp(&dir, "gated.form.json", &gated_form());
    let answers = write_temp(&dir, "answers.json", &json!({ "a": "No" }));

    let mut cmd = Command::cargo_bin("superform")?;
    let assert = cmd
        .arg("validate")
        .arg("--form")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
    assert!(stdout_of(assert).contains("Validation result: valid"));
    Ok(())
}

#[test]
fn validate_rejects_the_revealed_branch() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    let form = write_temp(&dir, "gated.form.json", &gated_form());
    let answers = write_temp(&dir, "answers.json", &json!({ "a": "Yes" }));

    let mut cmd = Command::cargo_bin("superform")?;
    let assert = cmd
        .arg("validate")
        .arg("--form")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure();
    let stdout = stdout_of(assert);
    assert!(stdout.contains("Validation result: invalid"));
    assert!(stdout.contains("Tell us more is required"));
    Ok(())
}

#[test]
fn submit_drops_hidden_answers() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    let form = write_temp(&dir, "gated.form.json", &gated_form());
    let answers = write_temp(
        &dir,
        "answers.json",
        &json!({ "a": "No", "b": "lingering", "ghost": "ignored" }),
    );

    let mut cmd = Command::cargo_bin("superform")?;
    let assert = cmd
        .arg("submit")
        .arg("--form")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
    let stdout = stdout_of(assert);
    assert!(stdout.contains("Thanks!"));
    assert!(!stdout.contains("lingering"));
    assert!(!stdout.contains("ghost"));
    Ok(())
}

#[test]
fn render_reports_visibility() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    let form = write_temp(&dir, "gated.form.json", &gated_form());
    let answers = write_temp(&dir, "answers.json", &json!({ "a": "Yes" }));

    let mut cmd = Command::cargo_bin("superform")?;
    let assert = cmd
        .arg("render")
        .arg("--form")
        .arg(&form)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
    let stdout = stdout_of(assert);
    assert!(stdout.contains("Next field: b"));
    assert!(stdout.contains("Visible fields:"));
    Ok(())
}

#[test]
fn check_flags_dangling_conditions() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    let mut broken = gated_form();
    broken["fields"][1]["logic"]["conditions"][0]["field_id"] = json!("zzz");
    let form = write_temp(&dir, "broken.form.json", &broken);

    let mut cmd = Command::cargo_bin("superform")?;
    let assert = cmd.arg("check").arg("--form").arg(&form).assert().failure();
    assert!(stdout_of(assert).contains("unknown field 'zzz'"));
    Ok(())
}

#[test]
fn new_command_writes_the_bundle() -> TestResult {
    let workspace = assert_fs::TempDir::new()?;
    let output_root = workspace.path().join("out");
    // Prompt script: form meta, one plain text field, defaults elsewhere.
    let answers = [
        "demo-form", // form id
        "Demo Form", // title
        "",          // description
        "",          // board id
        "q1",        // field id
        "",          // label (defaults to q1)
        "",          // type (defaults to text)
        "y",         // required
        "",          // placeholder
        "",          // next field id -> finish
        "",          // success message (default)
        "",          // redirect url
    ];
    let stdin = format!("{}\n", answers.join("\n"));

    let mut cmd = Command::cargo_bin("superform")?;
    cmd.arg("new")
        .arg("--out")
        .arg(&output_root)
        .write_stdin(stdin)
        .assert()
        .success();

    let form_path = output_root.join("demo-form.form.json");
    let form: Value = serde_json::from_str(&fs::read_to_string(&form_path)?)?;
    assert_eq!(form["id"], "demo-form");
    assert_eq!(form["fields"][0]["id"], "q1");
    assert_eq!(form["fields"][0]["type"], "text");
    assert_eq!(form["fields"][0]["required"], true);

    let schema_path = output_root.join("demo-form.answers.schema.json");
    let schema: Value = serde_json::from_str(&fs::read_to_string(&schema_path)?)?;
    assert!(schema["properties"]["q1"].is_object());
    Ok(())
}

#[test]
fn generate_refuses_to_clobber_without_force() -> TestResult {
    let workspace = assert_fs::TempDir::new()?;
    let input = write_temp(
        &workspace,
        "input.json",
        &json!({
            "form": { "id": "gen-form", "title": "Gen" },
            "fields": [ { "type": "text", "label": "Name", "required": true } ]
        }),
    );
    let output_root = workspace.path().join("out");

    let mut cmd = Command::cargo_bin("superform")?;
    cmd.arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&output_root)
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("superform")?;
    cmd.arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&output_root)
        .assert()
        .failure();

    let mut cmd = Command::cargo_bin("superform")?;
    cmd.arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&output_root)
        .arg("--force")
        .assert()
        .success();
    Ok(())
}

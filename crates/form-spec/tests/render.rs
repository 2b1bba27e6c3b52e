use form_spec::{
    AnswerMap, Form, RenderStatus, answers_schema, build_render_payload, render_json_ui,
    render_text, resolve_visibility,
};

fn fixture_form() -> Form {
    serde_json::from_str(include_str!("fixtures/feedback_form.json")).expect("deserialize fixture")
}

#[test]
fn render_text_points_at_the_next_field() {
    let form = fixture_form();
    let payload = build_render_payload(&form, &AnswerMap::new());

    assert_eq!(payload.status, RenderStatus::NeedInput);
    assert_eq!(payload.next_field_id.as_deref(), Some("name"));

    let text = render_text(&payload);
    assert!(text.contains("Next field: name"));
    assert!(text.contains("Visible fields:"));
    assert!(text.contains("[required]"));
}

#[test]
fn progress_counts_only_visible_fields() {
    let form = fixture_form();
    // "details" stays hidden while satisfaction is not "Dissatisfied".
    let answers = AnswerMap::from_iter([("name", "Ada"), ("satisfaction", "Satisfied")]);
    let payload = build_render_payload(&form, &answers);

    assert_eq!(payload.progress.total, 3);
    assert_eq!(payload.progress.answered, 2);
    assert_eq!(payload.next_field_id.as_deref(), Some("email"));
}

#[test]
fn revealing_a_field_changes_the_totals() {
    let form = fixture_form();
    let answers = AnswerMap::from_iter([
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("satisfaction", "Dissatisfied"),
    ]);
    let payload = build_render_payload(&form, &answers);

    assert_eq!(payload.progress.total, 4);
    assert_eq!(payload.status, RenderStatus::NeedInput);
    assert_eq!(payload.next_field_id.as_deref(), Some("details"));
}

#[test]
fn complete_when_every_visible_field_is_answered() {
    let form = fixture_form();
    let answers = AnswerMap::from_iter([
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("satisfaction", "Satisfied"),
    ]);
    let payload = build_render_payload(&form, &answers);

    assert_eq!(payload.status, RenderStatus::Complete);
    assert!(payload.next_field_id.is_none());

    let text = render_text(&payload);
    assert!(text.contains("All visible fields are answered."));
}

#[test]
fn render_json_ui_exposes_structure() {
    let form = fixture_form();
    let answers = AnswerMap::from_iter([("satisfaction", "Dissatisfied")]);
    let ui = render_json_ui(&build_render_payload(&form, &answers));

    assert_eq!(ui["form_id"], "feedback");
    assert_eq!(ui["status"], "need_input");
    assert_eq!(ui["progress"]["total"], 4);

    let fields = ui["fields"].as_array().expect("fields array");
    assert_eq!(fields.len(), 4);
    let satisfaction = fields
        .iter()
        .find(|field| field["id"] == "satisfaction")
        .expect("satisfaction field");
    assert_eq!(satisfaction["type"], "dropdown");
    assert_eq!(satisfaction["value"], "Dissatisfied");
    assert!(
        satisfaction["options"]
            .as_array()
            .is_some_and(|options| options.len() == 4)
    );

    let details = fields
        .iter()
        .find(|field| field["id"] == "details")
        .expect("details field");
    assert_eq!(details["visible"], true);
}

#[test]
fn unanswered_fields_carry_no_value_key() {
    let form = fixture_form();
    let ui = render_json_ui(&build_render_payload(&form, &AnswerMap::new()));
    let fields = ui["fields"].as_array().expect("fields array");
    assert!(fields.iter().all(|field| field.get("value").is_none()));
}

#[test]
fn schema_requires_only_visible_required_fields() {
    let form = fixture_form();
    let visibility = resolve_visibility(&form, &AnswerMap::new());
    let schema = answers_schema(&form, &visibility);

    let props = schema["properties"].as_object().expect("properties");
    assert!(props.contains_key("name"));
    assert!(props.contains_key("email"));
    assert!(!props.contains_key("details"), "hidden field leaked");

    let required = schema["required"].as_array().expect("required");
    assert!(required.iter().any(|id| id == "name"));
    assert!(!required.iter().any(|id| id == "details"));
}

#[test]
fn schema_narrows_choice_and_email_fields() {
    let form = fixture_form();
    let visibility = resolve_visibility(
        &form,
        &AnswerMap::from_iter([("satisfaction", "Dissatisfied")]),
    );
    let schema = answers_schema(&form, &visibility);
    let props = schema["properties"].as_object().expect("properties");

    let satisfaction = props["satisfaction"].as_object().expect("satisfaction");
    assert_eq!(
        satisfaction["enum"].as_array().map(|options| options.len()),
        Some(4)
    );
    let email = props["email"].as_object().expect("email");
    assert!(email["pattern"].as_str().is_some());
    // Now visible, so present and required.
    assert!(props.contains_key("details"));
}

use std::path::PathBuf;

use importtpl::{
    TemplateDescription, TemplateField, Unflattener, create_import_template,
    data::DataValidation,
    unflatten::{CLIENT_ID, FlatValues, has_some_defined_value},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn fixture() -> TemplateDescription {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dref-application.json");
    TemplateDescription::from_path(path).unwrap()
}

/// An answer a user could type into the row of `field`.
fn sample_answer(desc: &TemplateDescription, field: &TemplateField) -> Option<Value> {
    let TemplateField::Input(input) = field else {
        return None;
    };
    let value = match &input.data_validation {
        Some(DataValidation::List { options_key }) => {
            json!(desc.options_map[options_key][0].label)
        }
        Some(DataValidation::Number) | Some(DataValidation::Integer) => json!(3),
        Some(DataValidation::Date) => json!("2024-07-01"),
        Some(DataValidation::TextArea) => json!("* shelter kits\n* tarpaulins"),
        None => json!(format!("text for {}", input.name)),
    };
    Some(value)
}

#[test]
fn test_fixture_is_valid() {
    let desc = fixture();
    desc.validate().unwrap();
    assert_eq!(desc.tab_of("source_information__source__0__source_link"), Some("Event Detail"));
}

#[test]
fn test_flatten_order() {
    let desc = fixture();
    let fields = create_import_template(&desc.schema, &desc.options_map).unwrap();
    assert_eq!(fields.len(), 45);

    let head: Vec<_> = fields
        .iter()
        .take(10)
        .map(|f| (f.name(), f.is_heading(), f.outline_level()))
        .collect();
    assert_eq!(
        head,
        vec![
            ("national_society", false, -1),
            ("is_man_made_event", false, -1),
            ("title", false, -1),
            ("event_date__heading_before", true, -1),
            ("event_date", false, -1),
            ("num_affected", false, -1),
            ("source_information", true, -1),
            ("source_information__source__0", true, 0),
            ("source_information__source__0__source_name", false, 0),
            ("source_information__source__0__source_link", false, 0),
        ]
    );

    // Hidden list label: the first planned intervention row is its option heading.
    let start = fields
        .iter()
        .position(|f| f.name() == "planned_interventions__shelter_housing_and_settlements")
        .unwrap();
    let planned: Vec<_> = fields[start..start + 9]
        .iter()
        .map(|f| (f.name().to_string(), f.is_heading(), f.outline_level()))
        .collect();
    let p = "planned_interventions__shelter_housing_and_settlements";
    let expected: Vec<_> = [
        ("", true, 0),
        ("__budget", false, 0),
        ("__description", false, 0),
        ("__indicators__indicator__0", true, 1),
        ("__indicators__indicator__0__title", false, 1),
        ("__indicators__indicator__0__target", false, 1),
        ("__indicators__indicator__1", true, 1),
        ("__indicators__indicator__1__title", false, 1),
        ("__indicators__indicator__1__target", false, 1),
    ]
    .into_iter()
    .map(|(suffix, heading, level)| (format!("{p}{suffix}"), heading, level))
    .collect();
    assert_eq!(planned, expected);
    assert!(!fields.iter().any(|f| f.name() == "planned_interventions"));
}

#[test]
fn test_labels() {
    let desc = fixture();
    let fields = create_import_template(&desc.schema, &desc.options_map).unwrap();
    let by_name = |name: &str| fields.iter().find(|f| f.name() == name && !f.is_heading()).unwrap();

    assert_eq!(
        by_name("needs_identified__education__description").plain_label(),
        "Gaps in providing children and youth with access to education."
    );

    let TemplateField::Input(select) = by_name("is_man_made_event") else {
        panic!("select is an input row");
    };
    assert_eq!(
        select.data_validation,
        Some(DataValidation::List {
            options_key: "__boolean".into()
        })
    );
    let description = select.description.as_ref().unwrap();
    assert!(description.to_plain().starts_with("Select Yes or No"));
    assert!(!matches!(description, importtpl::data::CellText::Plain(_)));
}

#[test]
fn test_every_input_key_is_consumed() {
    let desc = fixture();
    let fields = create_import_template(&desc.schema, &desc.options_map).unwrap();
    let unflattener = Unflattener::plain();

    for field in &fields {
        let Some(answer) = sample_answer(&desc, field) else {
            continue;
        };
        let values = FlatValues::from([(field.name().to_string(), answer)]);
        let value = unflattener
            .unflatten(&desc.schema, &desc.options_map, &values)
            .unwrap()
            .unwrap();
        assert!(
            has_some_defined_value(&value),
            "answer for `{}` was not read back",
            field.name()
        );
    }
}

#[test]
fn test_round_trip() {
    let desc = fixture();
    let fields = create_import_template(&desc.schema, &desc.options_map).unwrap();
    let mut values: FlatValues = fields
        .iter()
        .filter_map(|f| sample_answer(&desc, f).map(|v| (f.name().to_string(), v)))
        .collect();
    values.insert(
        "source_information__source__1__source_link".into(),
        json!("http://already.example"),
    );

    let value = Unflattener::default()
        .unflatten(&desc.schema, &desc.options_map, &values)
        .unwrap()
        .unwrap();

    assert_eq!(value["national_society"], json!(41));
    assert_eq!(value["is_man_made_event"], json!(true));
    assert_eq!(value["event_date"], json!("2024-07-01"));
    assert_eq!(value["num_affected"], json!(3));

    let sources = value["source_information"].as_array().unwrap();
    assert_eq!(sources.len(), 5);
    assert_eq!(
        sources[0]["source_link"],
        json!("https://text for source_information__source__0__source_link")
    );
    assert_eq!(sources[1]["source_link"], json!("http://already.example"));

    let needs = value["needs_identified"].as_array().unwrap();
    assert_eq!(needs[0]["title"], json!("health"));
    // Bullets only apply to planned interventions.
    assert_eq!(needs[0]["description"], json!("* shelter kits\n* tarpaulins"));

    let planned = value["planned_interventions"].as_array().unwrap();
    assert_eq!(planned.len(), 2);
    assert_eq!(planned[1]["title"], json!("health"));
    assert_eq!(planned[1]["budget"], json!(3));
    assert_eq!(planned[1]["description"], json!("• shelter kits\n• tarpaulins"));
    assert!(planned[1][CLIENT_ID].is_string());

    let indicators = planned[0]["indicators"].as_array().unwrap();
    assert_eq!(indicators.len(), 2);
    assert_eq!(indicators[0]["target"], json!(3));
    assert!(indicators[0].get("title").is_some());
}

#[test]
fn test_blank_answers() {
    let desc = fixture();
    let values = FlatValues::from([
        ("title".to_string(), json!("Floods")),
        ("planned_interventions__health__budget".to_string(), json!("")),
        ("needs_identified__health__description".to_string(), Value::Null),
    ]);
    let value = Unflattener::default()
        .unflatten(&desc.schema, &desc.options_map, &values)
        .unwrap();
    assert_eq!(value, Some(json!({ "title": "Floods" })));
}

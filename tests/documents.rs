use flexible_commands::{
    ArgumentKind, ArgumentType, CommandDocument, DocumentError, InfoDocument, Issue, Logic,
    LogicType, ParamError, RunAs,
};

const GOLDEN: &str = r#"{
  "alias": "giverandomdiamonds",
  "baseCommand": "give",
  "permission": "flexiblecommands.command.giverandomdiamonds",
  "runAs": "console",
  "template": "{baseCommand} {player} minecraft:diamond {custom:randomamount}",
  "arguments": [
    {
      "name": "player",
      "type": "player"
    }
  ],
  "customLogic": {
    "randomamount": {
      "type": "randomnumberrange",
      "params": {
        "min": 1,
        "max": 64
      }
    }
  }
}"#;

fn schema_field(err: DocumentError) -> String {
    match err {
        DocumentError::SchemaViolation { field, .. } => field,
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn golden_document_imports_and_validates_cleanly() -> anyhow::Result<()> {
    let doc = CommandDocument::from_json(GOLDEN)?;
    assert_eq!(doc, CommandDocument::example());

    let report = doc.validate();
    assert_eq!(report.errors().count(), 0);
    assert_eq!(report.warnings().count(), 0);
    Ok(())
}

#[test]
fn golden_document_exports_byte_for_byte() -> anyhow::Result<()> {
    assert_eq!(CommandDocument::example().to_json()?, GOLDEN);
    Ok(())
}

#[test]
fn roundtrip_preserves_every_field() -> anyhow::Result<()> {
    let mut doc = CommandDocument::new();
    doc.alias = "kit".into();
    doc.base_command = "pokegive".into();
    doc.permission = String::new();
    doc.run_as = RunAs::Player;
    doc.template = "{baseCommand} {target} {species} {custom:ivs} {custom:who} {custom:ball}".into();
    doc.add_argument("target", ArgumentType::Player)?;
    doc.add_argument("species", ArgumentType::Choice)?;
    doc.set_choices("species", ["pikachu", "eevee"])?;
    doc.add_argument("level", ArgumentType::Int)?;
    doc.add_argument("note", ArgumentType::String)?;
    doc.add_logic("ivs", Logic::guaranteed_max_ivs(3, 31, (0, 31)))?;
    doc.add_logic("who", Logic::RandomPlayer)?;
    doc.add_logic("ball", Logic::random_string_list(["pokeball", "greatball"]))?;

    let text = doc.to_json()?;
    let back = CommandDocument::from_json(&text)?;
    assert_eq!(back, doc);
    assert_eq!(back.to_json()?, text);

    let order: Vec<_> = back.arguments().map(|(n, _)| n).collect();
    assert_eq!(order, ["target", "species", "level", "note"]);
    assert_eq!(back.argument("level"), Some(&ArgumentKind::Int));
    Ok(())
}

#[test]
fn dangling_logic_reference_is_the_only_finding() -> anyhow::Result<()> {
    let mut doc = CommandDocument::new();
    doc.alias = "giverandomdiamonds".into();
    doc.base_command = "give".into();
    doc.template = "{baseCommand} {player} minecraft:diamond {custom:randomamount}".into();
    doc.add_argument("player", ArgumentType::Player)?;

    let report = doc.validate();
    assert_eq!(
        report.issues(),
        [Issue::DanglingLogicReference("randomamount".into())]
    );
    // advisory only
    assert!(doc.to_json().is_ok());
    Ok(())
}

#[test]
fn syntax_errors_are_malformed() {
    let err = CommandDocument::from_json("{\"alias\": ").unwrap_err();
    assert!(matches!(err, DocumentError::MalformedDocument(_)), "{err}");
}

#[test]
fn unknown_logic_type_names_the_field() {
    let text = GOLDEN.replace("randomnumberrange", "coinflip");
    let field = schema_field(CommandDocument::from_json(&text).unwrap_err());
    assert_eq!(field, "customLogic.randomamount.type");
}

#[test]
fn unknown_argument_type_names_the_field() {
    let text = GOLDEN.replace(r#""type": "player""#, r#""type": "entity""#);
    let field = schema_field(CommandDocument::from_json(&text).unwrap_err());
    assert_eq!(field, "arguments[0].type");
}

#[test]
fn missing_param_is_a_schema_violation() {
    let text = GOLDEN.replace(",\n        \"max\": 64", "");
    let err = CommandDocument::from_json(&text).unwrap_err();
    match err {
        DocumentError::SchemaViolation { field, reason } => {
            assert_eq!(field, "customLogic.randomamount");
            assert!(reason.contains("missing field `max`"), "{reason}");
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn inverted_range_is_rejected_on_import() {
    let text = GOLDEN.replace("\"min\": 1", "\"min\": 100");
    let field = schema_field(CommandDocument::from_json(&text).unwrap_err());
    assert_eq!(field, "customLogic.randomamount");
}

#[test]
fn namespace_collision_is_rejected_on_import() {
    let text = GOLDEN.replace("\"randomamount\": {", "\"player\": {");
    let field = schema_field(CommandDocument::from_json(&text).unwrap_err());
    assert_eq!(field, "customLogic.player");
}

#[test]
fn duplicate_argument_name_is_rejected_on_import() {
    let text = GOLDEN.replace(
        r#"{
      "name": "player",
      "type": "player"
    }"#,
        r#"{"name": "player", "type": "player"}, {"name": "player", "type": "string"}"#,
    );
    let field = schema_field(CommandDocument::from_json(&text).unwrap_err());
    assert_eq!(field, "arguments[1].name");
}

#[test]
fn choices_presence_is_checked_on_import() {
    let text = GOLDEN.replace(r#""type": "player""#, r#""type": "player", "choices": ["a"]"#);
    assert_eq!(
        schema_field(CommandDocument::from_json(&text).unwrap_err()),
        "arguments[0]"
    );

    let text = GOLDEN.replace(r#""type": "player""#, r#""type": "choice""#);
    assert_eq!(
        schema_field(CommandDocument::from_json(&text).unwrap_err()),
        "arguments[0]"
    );

}

#[test]
fn unfilled_fields_import_and_fail_validation() -> anyhow::Result<()> {
    let text = GOLDEN
        .replace("\"giverandomdiamonds\"", "\"\"")
        .replace(r#""type": "player""#, r#""type": "choice", "choices": []"#)
        .replace(
            r#""type": "randomnumberrange",
      "params": {
        "min": 1,
        "max": 64
      }"#,
            r#""type": "randomstringlist", "params": {"list": []}"#,
        );
    let doc = CommandDocument::from_json(&text)?;
    assert_eq!(
        doc.validate().issues(),
        [
            Issue::EmptyAlias,
            Issue::EmptyChoices("player".into()),
            Issue::InvalidLogicParams {
                key: "randomamount".into(),
                source: ParamError::EmptyList,
            },
        ]
    );
    assert_eq!(CommandDocument::from_json(&doc.to_json()?)?, doc);
    Ok(())
}

#[test]
fn new_document_survives_export_and_import() -> anyhow::Result<()> {
    let doc = CommandDocument::new();
    let back = CommandDocument::from_json(&doc.to_json()?)?;
    assert_eq!(back, doc);
    assert_eq!(
        back.validate().issues(),
        [Issue::EmptyAlias, Issue::EmptyBaseCommand]
    );
    Ok(())
}

#[test]
fn repeated_logic_key_is_rejected_on_import() {
    let text = r#"{
        "alias": "a",
        "baseCommand": "say",
        "template": "{baseCommand} {custom:k}",
        "customLogic": {
            "k": {"type": "randomnumberrange", "params": {"min": 1, "max": 2}},
            "k": {"type": "randomplayer"}
        }
    }"#;
    let err = CommandDocument::from_json(text).unwrap_err();
    match err {
        DocumentError::SchemaViolation { field, reason } => {
            assert_eq!(field, "customLogic.k");
            assert!(reason.contains("duplicate"), "{reason}");
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn hyphenated_names_import_and_export_compact() -> anyhow::Result<()> {
    let text = GOLDEN
        .replace("randomnumberrange", "random-number-range")
        .replace(r#""type": "player""#, r#""type": "integer""#);
    let doc = CommandDocument::from_json(&text)?;
    assert_eq!(doc.logic("randomamount").map(Logic::ty), Some(LogicType::RandomNumberRange));
    assert_eq!(doc.argument("player"), Some(&ArgumentKind::Int));
    let out = doc.to_json()?;
    assert!(out.contains("\"randomnumberrange\""));
    assert!(out.contains("\"type\": \"int\""));
    Ok(())
}

#[test]
fn failed_import_leaves_caller_state_alone() {
    let mut current = CommandDocument::example();
    match CommandDocument::from_json("[]") {
        Ok(doc) => current = doc,
        Err(_) => {}
    }
    assert_eq!(current, CommandDocument::example());
}

#[test]
fn info_document_wire_shape() -> anyhow::Result<()> {
    let doc = InfoDocument::from_json(
        r#"{"aliases": ["rules", "r"], "permission": "", "message": "<gold>Be nice"}"#,
    )?;
    assert_eq!(doc.aliases, ["rules", "r"]);
    assert!(doc.validate().is_complete());

    let err = InfoDocument::from_json(r#"{"aliases": "rules"}"#).unwrap_err();
    assert_eq!(schema_field(err), "aliases");
    Ok(())
}

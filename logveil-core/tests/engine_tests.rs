// logveil-core/tests/engine_tests.rs
//! Integration tests for the two-pass detection engine across the supported
//! textual shapes.

use logveil_core::{
    DataType, EngineBuilder, LogveilError, MaskingConfig, MaskingEngine, SensitiveField,
};

/// Engine with the built-in formatters, the given fields, and no type pass.
fn field_engine(fields: Vec<SensitiveField>) -> MaskingEngine {
    let mut builder = EngineBuilder::new().auto_detect(false);
    for field in fields {
        builder = builder.field(field);
    }
    builder.build().unwrap()
}

#[test]
fn masks_quoted_json_members_in_place() {
    let engine = field_engine(vec![
        SensitiveField::new("documento", DataType::NationalId),
        SensitiveField::new("nome", DataType::Name),
    ]);

    let input = r#"{"documento": "12345678909", "nome": "JOSE DA SILVA"}"#;
    let output = engine.sanitize(input);

    assert_eq!(output, r#"{"documento": "***456789**", "nome": "J*** D* S****"}"#);
    assert!(!output.contains("12345678909"));
}

#[test]
fn masks_unquoted_json_members_preserving_literals() {
    let engine = field_engine(vec![
        SensitiveField::new("documento", DataType::NationalId),
        SensitiveField::new("renda", DataType::Currency),
    ]);

    let input = r#"{"documento": 12345678909, "renda": 56789.98}"#;
    let output = engine.sanitize(input);

    assert_eq!(output, r#"{"documento": ***456789**, "renda": *****.**}"#);
}

#[test]
fn masks_tostring_pairs_unquoted() {
    let engine = field_engine(vec![SensitiveField::new("documento", DataType::NationalId)]);

    let input = "Objeto=[documento=12345678909, nome=JOSE DA SILVA]";
    let output = engine.sanitize(input);

    assert_eq!(output, "Objeto=[documento=***456789**, nome=JOSE DA SILVA]");
}

#[test]
fn masks_tostring_pairs_double_quoted() {
    let engine = field_engine(vec![
        SensitiveField::new("documento", DataType::NationalId),
        SensitiveField::new("nome", DataType::Name),
    ]);

    let input = r#"Objeto=[documento="12345678909", nome="JOSE DA SILVA"]"#;
    let output = engine.sanitize(input);

    assert_eq!(output, r#"Objeto=[documento="***456789**", nome="J*** D* S****"]"#);
}

#[test]
fn masks_tostring_pairs_single_quoted() {
    let engine = field_engine(vec![
        SensitiveField::new("documento", DataType::NationalId),
        SensitiveField::new("nome", DataType::Name),
    ]);

    let input = "Objeto=[documento='12345678909', nome='JOSE DA SILVA']";
    let output = engine.sanitize(input);

    assert_eq!(output, "Objeto=[documento='***456789**', nome='J*** D* S****']");
}

#[test]
fn masks_colon_delimited_free_text() {
    let engine = field_engine(vec![SensitiveField::new("documento", DataType::NationalId)]);

    assert_eq!(
        engine.sanitize(r#"cliente documento: "12345678909" cadastrado"#),
        r#"cliente documento: "***456789**" cadastrado"#
    );
    assert_eq!(
        engine.sanitize("cliente documento: 12345678909 cadastrado"),
        "cliente documento: ***456789** cadastrado"
    );
}

#[test]
fn masks_query_parameters_keeping_the_key() {
    // telefone keeps two leading and three trailing digits visible.
    let engine = field_engine(vec![
        SensitiveField::new("nome", DataType::Generic),
        SensitiveField::new("telefone", DataType::Generic).with_visible(2, 3),
    ]);

    let input = "GET http://demo.com/api?nome=sdskdadghsa&telefone=6378273937";
    let output = engine.sanitize(input);

    assert_eq!(output, "GET http://demo.com/api?nome=***&telefone=63*****937");
    assert!(output.contains("telefone="));
    assert!(!output.contains("6378273937"));
    assert!(!output.contains("sdskdadghsa"));
}

#[test]
fn masks_path_parameters() {
    let engine = field_engine(vec![
        SensitiveField::new("usuario", DataType::Generic).with_visible(3, 2),
    ]);

    let input = "GET http://demo.com/api/usuario/26783764789?nome=sdskdadghsa";
    let output = engine.sanitize(input);

    assert_eq!(output, "GET http://demo.com/api/usuario/267******89?nome=sdskdadghsa");
    assert!(output.contains("/usuario/"));
    assert!(!output.contains("26783764789"));
}

#[test]
fn disabled_engine_is_identity() {
    let engine = EngineBuilder::new()
        .enabled(false)
        .field_named("documento", DataType::NationalId)
        .build()
        .unwrap();

    let input = r#"{"documento": "12345678909"}"#;
    assert_eq!(engine.sanitize(input), input);
}

#[test]
fn unconfigured_engine_is_identity() {
    let engine = MaskingEngine::new();
    let input = r#"{"documento": "12345678909"}"#;
    assert_eq!(engine.sanitize(input), input);
    assert_eq!(engine.sanitize(""), "");
}

#[test]
fn auto_detect_masks_bare_values_by_category() {
    let engine = EngineBuilder::new()
        .auto_detect(true)
        .auto_detect_types(vec![DataType::Email, DataType::NationalId])
        .build()
        .unwrap();

    let input = "contact usuario@dominio.com or 12345678909 now";
    let output = engine.sanitize(input);

    assert_eq!(output, "contact us***@dom***.com or ***456789** now");
}

#[test]
fn field_pass_output_is_visible_to_type_pass() {
    // A field-masked value must not be re-flagged by a coincidental
    // category pattern. With a digit mask char the masked value still looks
    // like an id-card number; the already-masked heuristic has to skip it.
    let engine = EngineBuilder::new()
        .mask_char('5')
        .auto_detect(true)
        .auto_detect_types(vec![DataType::IdCard])
        .field(SensitiveField::new("doc", DataType::Generic).with_visible(2, 0))
        .build()
        .unwrap();

    let output = engine.sanitize("doc=123456789 and ref 987654321");

    // "123456789" -> "125555555" (7 of 9 chars are the mask): left alone.
    assert!(output.starts_with("doc=125555555"));
    // The bare number was never field-masked, so the type pass masks it.
    assert!(!output.contains("987654321"));
}

#[test]
fn summary_reports_rules_in_scan_order() {
    let engine = EngineBuilder::new()
        .auto_detect(true)
        .auto_detect_types(vec![DataType::Email])
        .field_named("documento", DataType::NationalId)
        .build()
        .unwrap();

    let input = r#"{"documento": "12345678909"} from usuario@dominio.com"#;
    let (output, summary) = engine.sanitize_with_summary(input);

    assert!(!output.contains("12345678909"));
    assert!(!output.contains("usuario@dominio.com"));
    let rules: Vec<(&str, usize)> = summary
        .iter()
        .map(|item| (item.rule_name.as_str(), item.occurrences))
        .collect();
    assert_eq!(rules, [("documento", 1), ("email", 1)]);
}

#[test]
fn reconfigure_replaces_the_snapshot_wholesale() {
    let engine = MaskingEngine::new();
    engine
        .configure(
            MaskingConfig {
                auto_detect: false,
                ..MaskingConfig::default()
            }
            .with_field(SensitiveField::new("senha", DataType::Password)),
        )
        .unwrap();
    assert_eq!(engine.sanitize("senha=abc token=xyz"), "senha=*** token=xyz");

    engine
        .configure(
            MaskingConfig {
                auto_detect: false,
                ..MaskingConfig::default()
            }
            .with_field(SensitiveField::new("token", DataType::Password)),
        )
        .unwrap();
    // The old field set is gone, not merged.
    assert_eq!(engine.sanitize("senha=abc token=xyz"), "senha=abc token=***");
}

#[test_log::test]
fn invalid_custom_pattern_excludes_only_that_field() {
    let engine = MaskingEngine::new();
    let config = MaskingConfig {
        auto_detect: false,
        ..MaskingConfig::default()
    }
    .with_field(SensitiveField::new("broken", DataType::Generic).with_custom_pattern("(unclosed"))
    .with_field(SensitiveField::new("senha", DataType::Password));

    let err = engine.configure(config).unwrap_err();
    assert!(matches!(err, LogveilError::InvalidFields(1, _)));
    assert!(err.to_string().contains("broken"));

    // The engine is configured and the surviving field still masks.
    assert!(engine.is_configured());
    assert_eq!(engine.sanitize("login senha=hunter2"), "login senha=***");
}

#[test]
fn custom_pattern_detects_values_outside_the_builtin_shapes() {
    let engine = EngineBuilder::new()
        .auto_detect(false)
        .field(
            SensitiveField::new("pedido", DataType::Generic)
                .with_custom_pattern(r"order#(\d{6})"),
        )
        .build()
        .unwrap();

    assert_eq!(engine.sanitize("created order#123456 ok"), "created order#*** ok");
}

#[test]
fn concurrent_sanitize_sees_complete_snapshots() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(
        EngineBuilder::new()
            .auto_detect(false)
            .field_named("senha", DataType::Password)
            .build()
            .unwrap(),
    );
    let input = "senha=abc token=xyz";

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..500 {
                    let out = engine.sanitize(input);
                    // Every observable output corresponds to one complete
                    // configuration, never a partially swapped one.
                    assert!(
                        out == "senha=*** token=xyz"
                            || out == "senha=abc token=***"
                            || out == "senha=*** token=***",
                        "torn snapshot output: {out}"
                    );
                }
            })
        })
        .collect();

    for _ in 0..50 {
        engine
            .configure(
                MaskingConfig {
                    auto_detect: false,
                    ..MaskingConfig::default()
                }
                .with_field(SensitiveField::new("token", DataType::Password)),
            )
            .unwrap();
        engine
            .configure(
                MaskingConfig {
                    auto_detect: false,
                    ..MaskingConfig::default()
                }
                .with_field(SensitiveField::new("senha", DataType::Password))
                .with_field(SensitiveField::new("token", DataType::Password)),
            )
            .unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn values_with_multiple_occurrences_are_all_masked() {
    let engine = field_engine(vec![SensitiveField::new("cpf", DataType::NationalId)]);

    let input = r#"{"cpf": "12345678909"} retry {"cpf": "98765432100"}"#;
    let output = engine.sanitize(input);

    assert!(!output.contains("12345678909"));
    assert!(!output.contains("98765432100"));
    assert_eq!(output, r#"{"cpf": "***456789**"} retry {"cpf": "***654321**"}"#);
}

// Collections data parsing and the fallback path.

use scatter_core::*;

const VALID: &str = r##"{
  "collections": [
    { "name": "Maps", "position": [1, 2, 3], "color": 16746564 },
    { "name": "Letters", "position": [-4.5, 0, 7], "color": "#44ff88" }
  ]
}"##;

#[test]
fn parses_numeric_and_hex_colors() {
    let c = parse_collections(VALID).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c[0].name, "Maps");
    assert_eq!(c[0].color, Rgb(0xff8844));
    assert_eq!(c[1].color, Rgb(0x44ff88));
    assert_eq!(c[1].position, [-4.5, 0.0, 7.0]);
}

#[test]
fn rejects_out_of_range_color() {
    let text = r#"{"collections":[{"name":"x","position":[0,0,0],"color":16777216}]}"#;
    assert!(matches!(parse_collections(text), Err(DataError::Malformed(_))));
}

#[test]
fn empty_collection_list_is_an_error() {
    assert!(matches!(
        parse_collections(r#"{"collections": []}"#),
        Err(DataError::Empty)
    ));
}

#[test]
fn http_failure_substitutes_fallback_set() {
    let loaded = resolve_collections(Err(DataError::Http(500)));
    assert!(loaded.used_fallback());
    assert_eq!(loaded.collections, fallback_collections());
    assert_eq!(loaded.collections.len(), 3);
    assert_eq!(loaded.warning.as_deref(), Some(FALLBACK_NOTICE));
}

#[test]
fn malformed_json_substitutes_fallback_set() {
    let loaded = resolve_collections(Ok("{ not json".to_string()));
    assert!(loaded.used_fallback());
    let names: Vec<&str> = loaded.collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Teste A", "Teste B", "Teste C"]);
}

#[test]
fn missing_field_substitutes_fallback_set() {
    let loaded = resolve_collections(Ok(r#"{"collections":[{"name":"x"}]}"#.to_string()));
    assert!(loaded.used_fallback());
}

#[test]
fn good_data_has_no_warning() {
    let loaded = resolve_collections(Ok(VALID.to_string()));
    assert!(!loaded.used_fallback());
    assert_eq!(loaded.collections.len(), 2);
}

#[test]
fn fallback_notice_is_handed_out_once() {
    let loaded = resolve_collections(Err(DataError::Unreachable("offline".into())));
    let mut viewer = ViewerState::new(ViewerConfig::default(), loaded, |t| {
        LabelMetrics::estimate(t, LABEL_FONT_PX, LABEL_BORDER_PX)
    });
    assert_eq!(viewer.registry.len(), 3);
    assert!(viewer.take_notice().is_some());
    assert!(viewer.take_notice().is_none());
}

#[test]
fn hex_parsing_accepts_common_prefixes() {
    assert_eq!(Rgb::parse_hex("#4488ff"), Some(Rgb(0x4488ff)));
    assert_eq!(Rgb::parse_hex("0x4488ff"), Some(Rgb(0x4488ff)));
    assert_eq!(Rgb::parse_hex("4488ff"), None);
    assert_eq!(Rgb::parse_hex("#48f"), None);
}

#[test]
fn duplicate_names_keep_first_entry() {
    let records = vec![
        CollectionRecord::new("dup", [1.0, 0.0, 0.0], 0x111111),
        CollectionRecord::new("dup", [2.0, 0.0, 0.0], 0x222222),
    ];
    let reg = MarkerRegistry::from_collections(&records, |t| LabelMetrics::estimate(t, 48.0, 4.0));
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get(reg.find("dup").unwrap()).unwrap().color, Rgb(0x111111));
}

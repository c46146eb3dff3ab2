use dotlabel::dotlabel_core;
use dotlabel::{BoxKind, CurveGeometry, HeadlessError, LabelConfig, RankDir, point};
use serde_json::json;

#[test]
fn html_label_from_attribute_string() {
    let config = dotlabel::label_config(&json!({ "fontName": "Helvetica", "fontSize": 10 }))
        .expect("config");
    let root = dotlabel::html_label("<B>title</B><BR/>body", &config).expect("layout");
    assert_eq!(root.line_texts(), vec!["title", "body"]);
    let run = root
        .descendants()
        .into_iter()
        .find(|b| matches!(b.kind, BoxKind::Run { .. }))
        .expect("a run");
    assert_eq!(
        run.style.to_css(),
        "font-family: Helvetica; font-size: 10; font-weight: bold; color: black"
    );
}

#[test]
fn box_tree_serializes_to_json() {
    let root = dotlabel::record_label("a|b", RankDir::LeftToRight, &LabelConfig::default())
        .expect("layout");
    let value = serde_json::to_value(&root).expect("serializes");
    assert_eq!(value["kind"], json!("stack"));
    assert_eq!(value["axis"], json!("horizontal"));
    assert_eq!(value["children"][1], json!({ "kind": "rule", "axis": "vertical" }));
    assert_eq!(value["children"][0]["kind"], json!("field"));
}

#[test]
fn edge_curve_from_pos() {
    let curve = dotlabel::edge_curve("0,0 1,1 2,1 3,0", point(0.0, 0.0), point(3.0, 0.0), false)
        .expect("pos parses")
        .expect("curve");
    assert!(matches!(curve, CurveGeometry::Piecewise { .. }));
    assert_eq!(curve.to_path_d(), "M0,0C1,1,2,1,3,0");
}

#[test]
fn errors_keep_their_source() {
    let err = dotlabel::html_label("<B>unclosed", &LabelConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Parse(dotlabel_core::Error::MarkupParse { .. })
    ));
    assert!(err.to_string().contains("HTML-like"));
    let err = dotlabel::record_label("{a|b", RankDir::TopToBottom, &LabelConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Parse(dotlabel_core::Error::RecordParse { .. })
    ));
    let err = dotlabel::label_config(&json!({ "fontSize": [] })).unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Parse(dotlabel_core::Error::Config(_))
    ));
}

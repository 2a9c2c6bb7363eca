use std::collections::HashMap;

use domloom_protocols::{FrameKey, NodeIds};
use serde_json::Value;

use super::*;
use crate::model::{DomTree, ElementNode, TextNode, TreeArena};

const MAIN: &str = "https://shop.example/";

fn node(id: i64, tag: &str, attrs: &[(&str, &str)]) -> ElementNode {
    let attributes: HashMap<String, String> = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ElementNode::new(
        NodeIds {
            node_id: id,
            backend_node_id: id + 100,
        },
        FrameKey::from(MAIN),
        tag,
        attributes,
    )
}

/// body > (button "Pay | now", a[aria-label=Home] "Home", img[aria-label=Logo])
fn tree() -> DomTree {
    let mut arena = TreeArena::new();
    let body = arena.insert_element(node(1, "body", &[]), None).unwrap();

    let mut button = node(2, "button", &[]);
    button.is_interactive = Some(true);
    let button = arena.insert_element(button, Some(body)).unwrap();
    arena.append_child(body, button);
    let label = arena.insert_text(
        TextNode::new(
            NodeIds {
                node_id: 3,
                backend_node_id: 103,
            },
            FrameKey::from(MAIN),
            "Pay | now <b>",
        ),
        Some(button),
    );
    arena.append_child(button, label);

    let link = arena
        .insert_element(node(4, "a", &[("aria-label", "Home")]), Some(body))
        .unwrap();
    arena.append_child(body, link);
    let home = arena.insert_text(
        TextNode::new(
            NodeIds {
                node_id: 5,
                backend_node_id: 105,
            },
            FrameKey::from(MAIN),
            "Home",
        ),
        Some(link),
    );
    arena.append_child(link, home);

    let img = arena
        .insert_element(node(6, "img", &[("aria-label", "Logo \"main\"")]), Some(body))
        .unwrap();
    arena.append_child(body, img);

    arena.into_tree(body).unwrap()
}

#[test]
fn test_output_format_parse() {
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
    assert_eq!(OutputFormat::Html.to_string(), "html");
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_json_shape() {
    let tree = tree();
    let json = to_json(&tree.all_elements()).unwrap();
    assert!(json.starts_with("{\"n\":[{"));
    assert!(!json.contains("\": "));

    let value: Value = serde_json::from_str(&json).unwrap();
    let nodes = value["n"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);

    let body = &nodes[0];
    assert_eq!(body["t"], "body");
    assert_eq!(body["bid"], 101);
    assert_eq!(body["fid"], MAIN);
    assert!(body.get("p").is_none());
    assert!(body.get("tx").is_none());
    assert!(body.get("int").is_none());

    let button = &nodes[1];
    assert_eq!(button["p"], 101);
    assert_eq!(button["tx"], "Pay | now <b>");
    assert_eq!(button["int"], true);

    let link = &nodes[2];
    assert!(link.get("aria").is_none());
    assert_eq!(nodes[3]["aria"], "Logo \"main\"");
}

#[test]
fn test_csv_rows() {
    let tree = tree();
    let csv = to_csv(&tree.all_elements()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "nid|bid|pid|t|tx|aria|int|fid");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], format!("1|101||body|||0|{}", MAIN));
    assert_eq!(lines[2], format!("2|102|101|button|Pay   now <b>||1|{}", MAIN));
    assert_eq!(lines[3], format!("4|104|101|a|Home||0|{}", MAIN));
    assert_eq!(lines[4], format!("6|106|101|img||Logo \"main\"|0|{}", MAIN));
    assert!(!csv.ends_with('\n'));
}

#[test]
fn test_html_lines() {
    let tree = tree();
    let html = to_html(&tree.all_elements());
    let lines: Vec<_> = html.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("<body bid=\"101\" fid=\"{}\" />", MAIN));
    assert_eq!(
        lines[1],
        format!(
            "<button bid=\"102\" fid=\"{}\" p=\"101\" int>Pay | now &lt;b&gt;</button>",
            MAIN
        )
    );
    assert_eq!(
        lines[3],
        format!(
            "<img bid=\"106\" fid=\"{}\" p=\"101\" aria=\"Logo &quot;main&quot;\" />",
            MAIN
        )
    );
}

#[test]
fn test_markdown_sections() {
    let tree = tree();
    let md = to_markdown(&tree.all_elements());
    assert_eq!(md.matches("## ").count(), 4);
    assert!(md.starts_with("## body\n- nid: 1\n- bid: 101"));
    assert!(md.contains("## button\n- nid: 2\n- bid: 102\n- fid: https://shop.example/\n- p: 101\n- tx: Pay | now <b>\n- int: true"));
}

#[test]
fn test_empty_selection() {
    assert_eq!(to_json(&[]).unwrap(), "{\"n\":[]}");
    assert_eq!(to_csv(&[]).unwrap(), "nid|bid|pid|t|tx|aria|int|fid");
    assert_eq!(to_html(&[]), "");
    assert_eq!(serialize(OutputFormat::Markdown, &[]).unwrap(), "");
}

#[test]
fn test_csv_and_json_agree() {
    let tree = tree();
    let elements = tree.all_elements();
    let json: Value = serde_json::from_str(&to_json(&elements).unwrap()).unwrap();
    let csv = to_csv(&elements).unwrap();

    let json_rows = json["n"].as_array().unwrap();
    let csv_rows: Vec<Vec<&str>> = csv.lines().skip(1).map(|l| l.split('|').collect()).collect();
    assert_eq!(json_rows.len(), csv_rows.len());
    for (j, c) in json_rows.iter().zip(&csv_rows) {
        assert_eq!(j["bid"].to_string(), c[1]);
        assert_eq!(j["fid"].as_str().unwrap(), c[7]);
        assert_eq!(j["t"].as_str().unwrap(), c[3]);
        let interactive = j.get("int").and_then(Value::as_bool).unwrap_or(false);
        assert_eq!(if interactive { "1" } else { "0" }, c[6]);
    }
}

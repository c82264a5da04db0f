//! Comprehensive tests for domcast-snapshot
//!
//! End-to-end snapshots over a realistic page, policy layering, and the
//! JSON wire contract an independent replay implementation relies on.

use domcast_dom::{Document, FormState, NodeId, StyleSheet};
use domcast_snapshot::{
    snapshot, AttrValue, Mirror, SerializedNode, SerializedNodeData, SnapshotConfig,
};
use serde_json::Value;

/// A page with a stylesheet, a form, an ad box, and a shadow widget
fn sample_page() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new("http://localhost/css/style.css");
    let head = doc.head();
    let body = doc.body();
    let tree = doc.tree_mut();

    let style = tree.create_element("style");
    let css = tree.create_text("body { background: url(../bg.png); }");
    tree.append_child(head, style);
    tree.append_child(style, css);

    let input = tree.create_element("input");
    tree.append_child(body, input);
    {
        let el = tree.as_element_mut(input).unwrap();
        el.set_attr("value", "old");
        el.form = Some(FormState::with_value("typing now"));
    }

    let ad = tree.create_element("div");
    let ad_text = tree.create_text("buy things");
    tree.append_child(body, ad);
    tree.append_child(ad, ad_text);
    {
        let el = tree.as_element_mut(ad).unwrap();
        el.set_attr("class", "ad rr-block");
        el.geometry.width = 300.0;
        el.geometry.height = 250.0;
    }

    let widget = tree.create_element("x-profile");
    let name = tree.create_text("Ada Lovelace");
    tree.append_child(body, widget);
    tree.append_shadow_child(widget, name);

    (doc, style, input, ad)
}

fn find_tag<'a>(node: &'a SerializedNode, tag: &str) -> Option<&'a SerializedNode> {
    if let SerializedNodeData::Element { tag_name, .. } = &node.data {
        if tag_name == tag {
            return Some(node);
        }
    }
    node.child_nodes().iter().find_map(|c| find_tag(c, tag))
}

#[test]
fn test_full_page_snapshot() {
    let (doc, ..) = sample_page();
    let config = SnapshotConfig::new(doc.url());
    let mut mirror = Mirror::new();

    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();

    // stylesheet text was rewritten against the base
    let style = find_tag(&snap, "style").unwrap();
    let SerializedNodeData::Text { text, is_style, .. } = &style.child_nodes()[0].data else {
        panic!("expected style text");
    };
    assert!(is_style);
    assert_eq!(text, "body { background: url(http://localhost/bg.png); }");

    // live input value won over the markup-declared one
    let input = find_tag(&snap, "input").unwrap();
    assert_eq!(
        input.attributes().unwrap().get("value"),
        Some(&AttrValue::Str("typing now".into()))
    );

    // blocked ad collapsed to a measured placeholder
    let ad = find_tag(&snap, "div").unwrap();
    let SerializedNodeData::Element {
        needs_block,
        child_nodes,
        attributes,
        ..
    } = &ad.data
    else {
        panic!("expected element");
    };
    assert!(needs_block);
    assert!(child_nodes.is_empty());
    assert_eq!(attributes.get("rr_width"), Some(&AttrValue::Num(300.0)));
    assert_eq!(attributes.get("rr_height"), Some(&AttrValue::Num(250.0)));

    // shadow widget kept its content under the shadow relation
    let widget = find_tag(&snap, "x-profile").unwrap();
    let SerializedNodeData::Element { shadow, .. } = &widget.data else {
        panic!("expected element");
    };
    assert!(shadow.is_some());
}

#[test]
fn test_allow_list_overrides_block_and_mask() {
    let mut doc = Document::new("http://localhost/");
    let body = doc.body();
    let tree = doc.tree_mut();

    let section = tree.create_element("section");
    let div = tree.create_element("div");
    let text = tree.create_text("visible");
    tree.append_child(body, section);
    tree.append_child(section, div);
    tree.append_child(div, text);
    tree.as_element_mut(section).unwrap().set_attr("class", "public");
    tree.as_element_mut(div)
        .unwrap()
        .set_attr("class", "rr-block rr-mask");

    let config = SnapshotConfig::builder(doc.url())
        .allow_list(".public")
        .build()
        .unwrap();
    let mut mirror = Mirror::new();
    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();

    let div_snap = find_tag(&snap, "div").unwrap();
    let SerializedNodeData::Element { needs_block, .. } = &div_snap.data else {
        panic!("expected element");
    };
    assert!(!needs_block);
    let SerializedNodeData::Text { text, .. } = &div_snap.child_nodes()[0].data else {
        panic!("expected text");
    };
    assert_eq!(text, "visible");
}

#[test]
fn test_mask_pattern_and_custom_redaction() {
    let mut doc = Document::new("http://localhost/");
    let body = doc.body();
    let tree = doc.tree_mut();

    let p = tree.create_element("p");
    let text = tree.create_text("jane@example.com");
    tree.append_child(body, p);
    tree.append_child(p, text);
    tree.as_element_mut(p).unwrap().set_attr("class", "pii-email");

    let config = SnapshotConfig::builder(doc.url())
        .mask_text_class_pattern("^pii-")
        .mask_text_fn(Box::new(|_| "[redacted]".to_string()))
        .build()
        .unwrap();
    let mut mirror = Mirror::new();
    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();

    let p_snap = find_tag(&snap, "p").unwrap();
    let SerializedNodeData::Text { text, .. } = &p_snap.child_nodes()[0].data else {
        panic!("expected text");
    };
    assert_eq!(text, "[redacted]");
}

#[test]
fn test_mirror_survives_detach_release_cycle() {
    let (mut doc, _, input, _) = sample_page();
    let config = SnapshotConfig::new(doc.url());
    let mut mirror = Mirror::new();

    let first = snapshot(doc.tree(), &mut mirror, &config).unwrap();
    let first_input_id = find_tag(&first, "input").unwrap().id;

    let held = mirror.len();
    doc.tree_mut().detach(input);
    mirror.release(input);
    assert_eq!(mirror.len(), held - 1);

    let second = snapshot(doc.tree(), &mut mirror, &config).unwrap();
    assert!(find_tag(&second, "input").is_none());
    assert_eq!(mirror.node_for(first_input_id), None);
}

#[test]
fn test_json_wire_contract() {
    let mut doc = Document::new("http://localhost/");
    let body = doc.body();
    let tree = doc.tree_mut();

    let doctype = tree.create_doctype("html", "", "");
    // doctype belongs before the root element; the arena does not order
    // root children for us, so rebuild the child list explicitly
    let html = doc.document_element();
    let root = doc.tree().root();
    doc.tree_mut().get_mut(root).unwrap().children = vec![doctype, html];
    doc.tree_mut().get_mut(doctype).unwrap().parent = Some(root);

    let tree = doc.tree_mut();
    let div = tree.create_element("div");
    let text = tree.create_text("hello");
    let comment = tree.create_comment("note");
    let cdata = tree.create_cdata("raw");
    tree.append_child(body, div);
    tree.append_child(div, text);
    tree.append_child(body, comment);
    tree.append_child(body, cdata);

    let config = SnapshotConfig::new(doc.url());
    let mut mirror = Mirror::new();
    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();
    let json: Value = serde_json::from_str(&serde_json::to_string(&snap).unwrap()).unwrap();

    assert_eq!(json["type"], 0);
    assert_eq!(json["childNodes"][0]["type"], 1);
    assert_eq!(json["childNodes"][0]["name"], "html");
    assert_eq!(json["childNodes"][0]["publicId"], "");
    assert_eq!(json["childNodes"][0]["systemId"], "");

    let html = &json["childNodes"][1];
    assert_eq!(html["type"], 2);
    assert_eq!(html["tagName"], "html");

    let body = &html["childNodes"][1];
    let div = &body["childNodes"][0];
    assert_eq!(div["type"], 2);
    assert_eq!(div["childNodes"][0]["type"], 3);
    assert_eq!(div["childNodes"][0]["textContent"], "hello");
    assert_eq!(body["childNodes"][1]["type"], 5);
    assert_eq!(body["childNodes"][2]["type"], 4);

    // ids are positive and unique across the tree
    let mut ids = Vec::new();
    collect_ids(&json, &mut ids);
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());
    assert!(ids.iter().all(|&id| id >= 1));
}

fn collect_ids(json: &Value, out: &mut Vec<u64>) {
    out.push(json["id"].as_u64().unwrap());
    if let Some(children) = json["childNodes"].as_array() {
        for child in children {
            collect_ids(child, out);
        }
    }
    if json["shadow"].is_object() {
        collect_ids(&json["shadow"], out);
    }
}

#[test]
fn test_boolean_flags_skipped_when_default() {
    let mut doc = Document::new("http://localhost/");
    let body = doc.body();
    let tree = doc.tree_mut();
    let div = tree.create_element("div");
    tree.append_child(body, div);

    let config = SnapshotConfig::new(doc.url());
    let mut mirror = Mirror::new();
    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();
    let json = serde_json::to_value(&snap).unwrap();

    let div = &json["childNodes"][0]["childNodes"][1]["childNodes"][0];
    assert_eq!(div["tagName"], "div");
    assert!(div.get("isSVG").is_none());
    assert!(div.get("needsBlock").is_none());
    assert!(div.get("shadow").is_none());
}

#[test]
fn test_inaccessible_stylesheet_static_fallback_end_to_end() {
    let mut doc = Document::new("http://localhost/css/style.css");
    let head = doc.head();
    let tree = doc.tree_mut();

    let style = tree.create_element("style");
    let css = tree.create_text("@import url(extra.css);");
    tree.append_child(head, style);
    tree.append_child(style, css);
    tree.as_element_mut(style).unwrap().stylesheet = Some(StyleSheet::inaccessible());

    let config = SnapshotConfig::new(doc.url());
    let mut mirror = Mirror::new();
    let snap = snapshot(doc.tree(), &mut mirror, &config).unwrap();

    let style_snap = find_tag(&snap, "style").unwrap();
    let SerializedNodeData::Text { text, .. } = &style_snap.child_nodes()[0].data else {
        panic!("expected text");
    };
    // static text still goes through URL rewriting
    assert_eq!(text, "@import url(http://localhost/css/extra.css);");
}

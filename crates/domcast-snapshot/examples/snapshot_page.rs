//! Snapshot a small page and print the JSON-safe tree.
//!
//! Run with: cargo run --example snapshot_page

use domcast_dom::{Document, FormState, StyleSheet};
use domcast_snapshot::{snapshot, Mirror, SnapshotConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut doc = Document::new("http://localhost/css/style.css");
    let head = doc.head();
    let body = doc.body();
    let tree = doc.tree_mut();

    let style = tree.create_element("style");
    let css = tree.create_text("body { background: url(../bg.png); }");
    tree.append_child(head, style);
    tree.append_child(style, css);
    tree.as_element_mut(style).unwrap().stylesheet = Some(StyleSheet::from_rules(vec![
        "body { background: url(../bg.png); }".into(),
        ".inserted { color: red; }".into(),
    ]));

    let input = tree.create_element("input");
    tree.append_child(body, input);
    {
        let el = tree.as_element_mut(input).unwrap();
        el.set_attr("type", "password");
        el.form = Some(FormState::with_value("hunter2"));
    }

    let ad = tree.create_element("div");
    tree.append_child(body, ad);
    {
        let el = tree.as_element_mut(ad).unwrap();
        el.set_attr("class", "rr-block");
        el.geometry.width = 300.0;
        el.geometry.height = 250.0;
    }

    let scroller = tree.create_element("main");
    tree.append_child(body, scroller);
    tree.as_element_mut(scroller).unwrap().geometry.scroll_to(0.0, 480.0);

    let config = SnapshotConfig::builder(doc.url())
        .block_selector("iframe")
        .build()
        .expect("valid config");
    let mut mirror = Mirror::new();

    let snap = snapshot(doc.tree(), &mut mirror, &config).expect("document snapshot");
    println!("{}", serde_json::to_string_pretty(&snap).expect("JSON-safe tree"));
}

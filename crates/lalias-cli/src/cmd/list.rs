use lalias_core::{AliasNode, AliasStore};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
struct AliasView {
    name: String,
    lines: Vec<String>,
}

impl From<&AliasNode> for AliasView {
    fn from(node: &AliasNode) -> Self {
        Self {
            name: node.name_lossy(),
            lines: node.lines().iter().map(line_text).collect(),
        }
    }
}

fn line_text(line: &lalias_core::segment::Line) -> String {
    String::from_utf8_lossy(&line.to_text()).into_owned()
}

pub fn run(store: &AliasStore, json: bool) -> anyhow::Result<()> {
    if json {
        let views: Vec<AliasView> = store.iter().map(AliasView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }
    print!("{}", render(store));
    Ok(())
}

/// Each alias name on its own line, followed by its numbered lines in the
/// order they run.
fn render(store: &AliasStore) -> String {
    if store.is_empty() {
        return "No aliases defined.\n".to_string();
    }

    let mut out = String::new();
    for node in store.iter() {
        let _ = writeln!(out, "{}", node.name_lossy());
        if node.lines().is_empty() {
            out.push_str("  (no lines)\n");
            continue;
        }
        let width = node.lines().len().to_string().len();
        for (i, line) in node.lines().iter().enumerate() {
            let _ = writeln!(out, "  {:>width$}  {}", i + 1, line_text(line));
        }
    }
    out
}

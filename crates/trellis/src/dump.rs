//! Debug rendering of the tree structure and widget attributes.

use std::fmt::Write;

use comfy_table::{presets::UTF8_FULL, Table};

use crate::{
    error::{Error, Result},
    tree::Tree,
    WidgetId,
};

/// Traverse a subtree and return an indented listing of widget names,
/// geometry and state flags. This is a debug function.
pub fn dump(tree: &Tree, root: WidgetId) -> Result<String> {
    let mut out = String::new();
    dump_widget(&mut out, tree, root, 0)?;
    Ok(out)
}

fn dump_widget(out: &mut String, tree: &Tree, id: WidgetId, level: usize) -> Result<()> {
    let node = tree.arena.get(id).ok_or(Error::InvalidNode(id))?;
    let indent = "    ".repeat(level);

    let mut flags = Vec::new();
    if node.focused {
        flags.push("FOCUSED");
    }
    if node.child_focused {
        flags.push("child-focused");
    }
    if node.hidden {
        flags.push("hidden");
    }
    if !node.owned_by_parent {
        flags.push("unowned");
    }

    let _ = write!(out, "{indent}{} [{:?}]", node.name, id);
    if !flags.is_empty() {
        let _ = write!(out, " ({})", flags.join(", "));
    }
    let _ = writeln!(out, " size={} offset={}", node.size, node.offset);

    for child in tree.children(id)? {
        dump_widget(out, tree, child, level + 1)?;
    }
    Ok(())
}

/// Render a widget's full attribute set as a table, marking which values
/// are at their defaults.
pub fn attribute_table(tree: &Tree, id: WidgetId) -> Result<String> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["attribute", "value", "default"]);
    tree.attributes(id, &mut |attr| {
        table.add_row(vec![
            attr.name,
            attr.value,
            if attr.is_default { "*".into() } else { String::new() },
        ]);
    })?;
    Ok(table.to_string())
}

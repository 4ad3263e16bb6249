//! Terminal rendering of tiers and documents.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use batch_editor::{EditorSession, Result};
use batch_model::{BatchSchema, Document, NodeId};

/// Side-by-side view of every tier, the selected entry highlighted.
pub fn tiers_table(session: &EditorSession) -> Result<Table> {
    let mut columns = Vec::with_capacity(session.tier_count());
    let mut header = Vec::with_capacity(session.tier_count());
    for tier in 0..session.tier_count() {
        header.push(header_cell(&format!("{}. {}", tier + 1, session.tier_label(tier)?)));
        columns.push((session.entries(tier)?, session.selected_index(tier)?));
    }

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);

    let rows = columns
        .iter()
        .map(|(entries, _)| entries.len())
        .max()
        .unwrap_or(0);
    for row in 0..rows {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|(entries, selected)| match entries.get(row) {
                Some(name) if *selected == Some(row) => entry_cell(row, name)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Some(name) => entry_cell(row, name),
                None => Cell::new(""),
            })
            .collect();
        table.add_row(cells);
    }
    Ok(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn entry_cell(row: usize, name: &str) -> Cell {
    if name.is_empty() {
        Cell::new(format!("{}) (unnamed)", row + 1)).fg(Color::DarkGrey)
    } else {
        Cell::new(format!("{}) {}", row + 1, name))
    }
}

/// A document viewed through the schema's tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntryView>,
}

/// Collect the entries of every tier, nested the way the cascade shows them.
pub fn entry_views(document: &Document, schema: &BatchSchema) -> Vec<EntryView> {
    collect_views(document, schema, document.root(), 0)
}

fn collect_views(
    document: &Document,
    schema: &BatchSchema,
    parent: NodeId,
    tier: usize,
) -> Vec<EntryView> {
    let Some(spec) = schema.tiers.get(tier) else {
        return Vec::new();
    };
    let children = document
        .children_with_tag(parent, &spec.tag)
        .unwrap_or_default();
    children
        .into_iter()
        .filter_map(|id| {
            let name = spec.entry_name(document.get(id)?, &schema.name_attribute);
            Some(EntryView {
                name: name.unwrap_or_default().to_string(),
                children: collect_views(document, schema, id, tier + 1),
            })
        })
        .collect()
}

/// Plain indented outline of the document.
pub fn render_tree(document: &Document, schema: &BatchSchema) -> String {
    let mut out = format!("{}\n", document.root_tag());
    write_views(&mut out, &entry_views(document, schema), schema, 0);
    out
}

fn write_views(out: &mut String, views: &[EntryView], schema: &BatchSchema, tier: usize) {
    let tag = schema.tiers.get(tier).map_or("", |spec| spec.tag.as_str());
    for view in views {
        let indent = "  ".repeat(tier + 1);
        out.push_str(&format!("{indent}{tag}: {}\n", view.name));
        write_views(out, &view.children, schema, tier + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_model::ElementTree;

    fn sample() -> Document {
        Document::from_tree(
            ElementTree::new("ComponentSets")
                .with_child(
                    ElementTree::new("ComponentSet")
                        .with_attribute("name", "Base")
                        .with_child(
                            ElementTree::new("FileSet")
                                .with_attribute("name", "Main")
                                .with_child(ElementTree::new("Value").with_text("input.xml")),
                        ),
                )
                .with_child(ElementTree::new("Notes").with_text("ignored")),
        )
    }

    #[test]
    fn views_follow_tiers_and_skip_foreign_tags() {
        let views = entry_views(&sample(), &BatchSchema::default());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "Base");
        assert_eq!(views[0].children[0].children[0].name, "input.xml");
    }

    #[test]
    fn tree_outline() {
        let text = render_tree(&sample(), &BatchSchema::default());
        insta::assert_snapshot!(text, @r"
        ComponentSets
          ComponentSet: Base
            FileSet: Main
              Value: input.xml
        ");
    }

    #[test]
    fn json_omits_empty_children() {
        let views = entry_views(&sample(), &BatchSchema::default());
        let json = serde_json::to_string(&views).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Base","children":[{"name":"Main","children":[{"name":"input.xml"}]}]}]"#
        );
    }
}

//! Parsed-page helpers: shared selectors, text extraction, and the cell index
//! used for label anchoring.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Node, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

pub(crate) static LISTING_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("div.cars__item"));
pub(crate) static LINK_WITH_HREF: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
pub(crate) static CONTACT_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("table.table1"));
pub(crate) static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
pub(crate) static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
pub(crate) static PRICE_PRIMARY: LazyLock<Selector> =
    LazyLock::new(|| selector("td.rowone.price_car1"));
pub(crate) static PRICE_ALTERNATE: LazyLock<Selector> =
    LazyLock::new(|| selector("td.rowone.price_car"));
pub(crate) static OWNER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.rowone"));
pub(crate) static PHONE_CELL: LazyLock<Selector> =
    LazyLock::new(|| selector("td.row_phone_number"));

/// Text of `el` with each text fragment trimmed and the non-empty fragments
/// concatenated.
#[must_use]
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Untrimmed text of `el` and all its descendants.
#[must_use]
pub fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text nodes under `root` in document order.
pub(crate) fn text_nodes<'a>(root: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    root.descendants().filter_map(|node| match node.value() {
        Node::Text(text) => Some(&**text),
        _ => None,
    })
}

/// The single text of `el`, descending through elements that each have
/// exactly one child. `None` when any level has mixed or several children.
pub(crate) fn sole_text<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    let mut children = el.children();
    let child = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match child.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => ElementRef::wrap(child).and_then(sole_text),
        _ => None,
    }
}

fn first_named<'a>(
    mut elements: impl Iterator<Item = ElementRef<'a>>,
    name: &str,
) -> Option<ElementRef<'a>> {
    elements.find(|el| el.value().name() == name)
}

/// How the value cell next to a label is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// The stripped text of the cell's first hyperlink if it has one, else the
    /// cell's stripped text.
    PreferLink,
    /// The cell's stripped text.
    CellText,
}

#[derive(Debug)]
struct Cell {
    text: String,
    value: String,
    link_value: Option<String>,
}

impl Cell {
    fn read(&self, policy: ValuePolicy) -> &str {
        match (policy, &self.link_value) {
            (ValuePolicy::PreferLink, Some(link)) => link,
            _ => &self.value,
        }
    }
}

#[derive(Debug)]
struct Anchor {
    text: String,
    row: usize,
}

/// Every text node that sits inside a table cell, paired with the cells of the
/// row enclosing that cell.
///
/// Built in one pass over a subtree; every label lookup afterwards is a scan
/// of the anchor list.
#[derive(Debug, Default)]
pub struct CellIndex {
    anchors: Vec<Anchor>,
    rows: Vec<Vec<Cell>>,
}

impl CellIndex {
    #[must_use]
    pub fn build(root: ElementRef<'_>) -> Self {
        let mut index = Self::default();
        let mut row_ids = HashMap::new();

        for node in root.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let Some(td) = first_named(node.ancestors().filter_map(ElementRef::wrap), "td") else {
                continue;
            };

            // A cell outside any row still counts as an anchor that yields nothing.
            let tr = first_named(td.ancestors().filter_map(ElementRef::wrap), "tr");
            let row = match tr {
                Some(tr) => *row_ids.entry(tr.id()).or_insert_with(|| {
                    index.rows.push(row_cells(tr));
                    index.rows.len() - 1
                }),
                None => {
                    index.rows.push(Vec::new());
                    index.rows.len() - 1
                }
            };

            index.anchors.push(Anchor {
                text: text.to_string(),
                row,
            });
        }

        index
    }

    /// Resolves the value cell for `label`.
    ///
    /// Only the first anchor whose text contains `label` is considered. Within
    /// its row, each cell containing `label` proposes the following cell; the
    /// first proposal that is non-empty and differs from the label (without
    /// `:`) wins.
    #[must_use]
    pub fn resolve(&self, label: &str, policy: ValuePolicy) -> Option<String> {
        let anchor = self.anchors.iter().find(|a| a.text.contains(label))?;
        let cells = &self.rows[anchor.row];
        let bare_label = label.replace(':', "");
        cells
            .windows(2)
            .filter(|pair| pair[0].text.contains(label))
            .map(|pair| pair[1].read(policy))
            .find(|value| !value.is_empty() && *value != bare_label)
            .map(str::to_owned)
    }
}

fn row_cells(tr: ElementRef<'_>) -> Vec<Cell> {
    tr.select(&CELL)
        .map(|td| Cell {
            text: full_text(td),
            value: stripped_text(td),
            link_value: td.select(&LINK).next().map(stripped_text),
        })
        .collect()
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Document, Node};

/// Get the tag name as written in the document, including any prefix.
///
/// Namespace prefixes are not resolved, so `<k:General>` is named
/// `k:General` and never matches `General`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use kamar_notices::xml::get_tag_name;
///
/// let xml = r#"<NoticesResults><General/></NoticesResults>"#;
/// let doc = Document::parse(xml).unwrap();
/// let general = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(general), "General");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    if !node.is_element() {
        return node.tag_name().name();
    }
    // Element ranges start at the opening '<'
    let start = node.range().start + 1;
    node.document()
        .input_text()
        .get(start..)
        .and_then(|rest| {
            let end = rest.find(|c: char| c.is_whitespace() || c == '>' || c == '/')?;
            rest.get(..end)
        })
        .unwrap_or_else(|| node.tag_name().name())
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// All elements named `tag`, anywhere in the document, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use kamar_notices::xml::elements_named;
///
/// let xml = r#"<a><General/><b><General/></b><Meeting/></a>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(elements_named(&doc, "General").len(), 2);
/// ```
pub fn elements_named<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    doc.descendants().filter(|n| has_tag(*n, tag)).collect()
}

/// The concatenated text of a node and all its descendants, untrimmed.
///
/// Unlike [`Node::text`], this includes text nested in child elements and
/// returns an empty string for empty elements.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get all element children of a node.
///
/// Excludes text nodes, comments and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

use anyhow::Context;

/// Namespace of DATEX II v1.0 publications.
pub const DATEX_NS: &str = "http://datex2.eu/schema/1_0/1_0";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub type Node<'a, 'input> = roxmltree::Node<'a, 'input>;

pub fn parse_document(contents: &str) -> anyhow::Result<roxmltree::Document<'_>> {
    roxmltree::Document::parse(contents).context("Parsing DATEX II XML document")
}

/// First descendant of `node` (excluding `node` itself) in the DATEX II namespace with the
/// given local name.
pub fn find_first<'a, 'input>(
    node: Node<'a, 'input>,
    local_name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|child| child.has_tag_name((DATEX_NS, local_name)))
}

/// All descendants of `node` in the DATEX II namespace with the given local name, in
/// document order.
pub fn find_all<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    local_name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .skip(1)
        .filter(move |child| child.has_tag_name((DATEX_NS, local_name)))
}

/// Trimmed text content of `node`, `None` when there is none.
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|text| !text.is_empty())
}

/// Trimmed text of the first descendant with the given local name.
pub fn find_text<'a>(node: Node<'a, '_>, local_name: &str) -> Option<&'a str> {
    find_first(node, local_name).and_then(text)
}

/// Local part of the `xsi:type` attribute, i.e. `Linear` for `xsi:type="_0:Linear"`.
pub fn declared_type<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute((XSI_NS, "type"))
        .map(|value| value.rsplit(':').next().unwrap_or(value))
}

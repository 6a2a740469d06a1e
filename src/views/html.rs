//! Serializes the headless document into markup for the live bridge.
//!
//! Every element carries `data-ft="<node id>"` so the page can report
//! events back against the node that produced them.

use super::dom::{Document, NodeId};

const VOID_TAGS: &[&str] = &["input", "br", "img", "hr", "meta", "link"];

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

pub fn inner_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    if let Some(el) = doc.get(node) {
        if let Some(t) = &el.text {
            out.push_str(&escape(t));
        }
        for c in &el.children {
            write_node(doc, *c, &mut out);
        }
    }
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    let Some(el) = doc.get(node) else {
        return;
    };

    out.push('<');
    out.push_str(&el.tag);
    out.push_str(&format!(" data-ft=\"{}\"", node.0));
    if let Some(id) = &el.id {
        out.push_str(&format!(" id=\"{}\"", escape(id)));
    }
    if !el.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&el.classes.join(" "))));
    }
    for (k, v) in &el.attrs {
        out.push_str(&format!(" {}=\"{}\"", k, escape(v)));
    }
    if let Some(v) = &el.value {
        out.push_str(&format!(" value=\"{}\"", escape(v)));
    }
    if el.hidden {
        out.push_str(" hidden");
    }
    if el.disabled {
        out.push_str(" disabled");
    }
    if el.checked {
        out.push_str(" checked");
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }

    if let Some(t) = &el.text {
        out.push_str(&escape(t));
    }
    for c in &el.children {
        write_node(doc, *c, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::dom::El;

    #[test]
    fn escapes_text_and_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_new(root, El::new("p").attr("title", "a\"b").text("<script>"));
        let html = doc.to_html(p);
        assert!(html.contains("title=\"a&quot;b\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn void_elements_have_no_close_tag() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.append_new(root, El::checkbox(true).disabled(true));
        let html = doc.to_html(input);
        assert!(html.ends_with(" disabled checked>"));
        assert!(!html.contains("</input>"));
    }
}

//! Framework-neutral view tree produced by the result formatters.
//!
//! The host decides how to mount a tree; [`ViewNode::to_html`] is provided for
//! hosts that mount markup. Text and attribute values are always escaped.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(ToOwned::to_owned));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl From<&str> for ViewNode {
    fn from(text: &str) -> Self {
        ViewNode::Text(text.to_owned())
    }
}

impl From<String> for ViewNode {
    fn from(text: String) -> Self {
        ViewNode::Text(text)
    }
}

/// Shorthand for `Element::new`.
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

/// Font Awesome icon element with trailing spacing.
pub fn icon(classes: &str) -> Element {
    el("i").class(classes).class("me-2")
}

impl ViewNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements (depth-first, document order) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    /// All elements (depth-first, document order) with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.tag == tag {
                found.push(element);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let ViewNode::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => push_escaped(out, text),
            ViewNode::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    out.push_str(" class=\"");
                    push_escaped(out, &element.classes.join(" "));
                    out.push('"');
                }
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    push_escaped(out, value);
                    out.push('"');
                }
                out.push('>');
                if is_void(element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

impl Element {
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input")
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_payload_text() {
        let node: ViewNode = el("span")
            .class("heading-h1")
            .attr("title", "a\"b")
            .text("<script>")
            .into();
        assert_eq!(
            node.to_html(),
            "<span class=\"heading-h1\" title=\"a&quot;b\">&lt;script&gt;</span>"
        );
    }

    #[test]
    fn text_content_flattens_children() {
        let node: ViewNode = el("div")
            .child(el("strong").text("Title:"))
            .text(" Spec")
            .into();
        assert_eq!(node.text_content(), "Title: Spec");
    }
}

// File: ./src/render/markup.rs
//! A tiny markup tree whose text and attribute values are always escaped.
//!
//! Tag and attribute names are `&'static str`, so only code can choose them.
//! The only unescaped content is `Node::Trusted`, which also only accepts
//! `&'static str` (stylesheets and fixed scripts compiled into the binary).

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Schemes a rendered link may use. Anything else becomes `#`.
const SAFE_SCHEMES: &[&str] = &["http:", "https:", "file:", "mailto:"];

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps links with a known-safe scheme (or no scheme at all) and replaces
/// the rest, e.g. `javascript:`, with `#`.
pub fn safe_href(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return "#".to_string();
    }
    let lower = trimmed.to_ascii_lowercase();
    let scheme_end = lower.find(':');
    let first_sep = lower.find(['/', '?', '#']);
    let has_scheme = match (scheme_end, first_sep) {
        (Some(colon), Some(sep)) => colon < sep,
        (Some(_), None) => true,
        _ => false,
    };
    if !has_scheme || SAFE_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        trimmed.to_string()
    } else {
        "#".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Trusted(&'static str),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn render(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Trusted(raw) => out.push_str(raw),
            Node::Element(el) => el.render(out),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: &'static str) -> Self {
        self.attr("id", id)
    }

    /// Link target, filtered through [`safe_href`].
    pub fn href(self, url: &str) -> Self {
        self.attr("href", safe_href(url))
    }

    /// Opens in a new browsing context.
    pub fn external(self) -> Self {
        self.attr("target", "_blank").attr("rel", "noopener noreferrer")
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.render(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// A display container whose content is always replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: &'static str,
    children: Vec<Node>,
}

impl Container {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Markup of the content only, without the container element itself.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.render(&mut out);
        }
        out
    }

    pub fn to_element(&self) -> Element {
        Element::new("div")
            .attr("id", self.id)
            .children(self.children.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_the_five_specials() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn safe_href_rejects_script_urls() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href(" JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("https://example.com/?q=a:b"), "https://example.com/?q=a:b");
        assert_eq!(safe_href("reports/2024-01-01.html"), "reports/2024-01-01.html");
        assert_eq!(safe_href(""), "#");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = Node::from(Element::new("input").attr("value", "a\"b")).to_html();
        assert_eq!(html, "<input value=\"a&quot;b\">");
    }
}

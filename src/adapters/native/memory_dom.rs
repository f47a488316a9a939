use super::selector::Selector;
use crate::domain::error::NotifyError;
use crate::ports::DomPort;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    /// Opaque markup content. Elements built through `append` keep their
    /// children as nodes instead.
    content: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            styles: Vec::new(),
            content: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Parsed form of the first element in a markup fragment.
struct Fragment {
    tag: String,
    attributes: Vec<(String, String)>,
    content: String,
}

/// Reads the opening tag of the first element in `markup`; everything up to
/// the matching closing tag becomes opaque content.
fn parse_fragment(markup: &str) -> Result<Fragment, NotifyError> {
    let start = markup
        .find('<')
        .ok_or_else(|| NotifyError::dom("Markup contains no element"))?;
    let rest = &markup[start + 1..];
    let tag_len = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    let tag = rest[..tag_len].to_ascii_lowercase();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(NotifyError::dom("Markup does not start with an element"));
    }

    let mut attributes = Vec::new();
    let mut chars = rest[tag_len..].char_indices().peekable();
    let mut open_end = None;
    let mut self_closing = false;

    while let Some((i, c)) = chars.next() {
        match c {
            '>' => {
                open_end = Some(tag_len + i + 1);
                break;
            }
            '/' => self_closing = true,
            c if c.is_whitespace() => {}
            _ => {
                let mut name = c.to_string();
                while let Some(&(_, n)) = chars.peek() {
                    if n == '=' || n == '>' || n == '/' || n.is_whitespace() {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }
                let mut value = String::new();
                if chars.peek().map(|&(_, n)| n) == Some('=') {
                    chars.next();
                    match chars.peek().map(|&(_, n)| n) {
                        Some(quote @ ('"' | '\'')) => {
                            chars.next();
                            for (_, n) in chars.by_ref() {
                                if n == quote {
                                    break;
                                }
                                value.push(n);
                            }
                        }
                        _ => {
                            while let Some(&(_, n)) = chars.peek() {
                                if n == '>' || n.is_whitespace() {
                                    break;
                                }
                                value.push(n);
                                chars.next();
                            }
                        }
                    }
                }
                attributes.push((name.to_ascii_lowercase(), unescape(&value)));
            }
        }
    }

    let open_end = open_end.ok_or_else(|| NotifyError::dom("Unterminated opening tag"))?;
    let body = &rest[open_end..];
    let content = if self_closing {
        String::new()
    } else {
        let closing = format!("</{tag}");
        body.rfind(&closing)
            .map(|end| body[..end].to_string())
            .unwrap_or_else(|| body.to_string())
    };

    Ok(Fragment {
        tag,
        attributes,
        content,
    })
}

/// In-memory document used to exercise the widget without a browser.
///
/// Nodes live in an arena and are never freed; removed nodes are simply
/// detached from their parent.
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<Node>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![Node::new("body", None)]),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a new element as the last child of `parent`.
    pub fn append(
        &self,
        parent: NodeId,
        tag: &str,
        classes: &[&str],
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        let mut node = Node::new(tag, Some(parent));
        if !classes.is_empty() {
            node.set_attribute("class", &classes.join(" "));
        }
        for (name, value) in attributes {
            node.set_attribute(name, value);
        }
        nodes.push(node);
        nodes[parent.0].children.push(id);
        id
    }

    /// Inline style value, if one was set.
    pub fn style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[element.0]
            .styles
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    pub fn is_attached(&self, element: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = *element;
        loop {
            if current == self.root() {
                return true;
            }
            match nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn descendants(&self, from: NodeId, out: &mut Vec<NodeId>) {
        let children = self.nodes.borrow()[from.0].children.clone();
        for child in children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn matches_selector(&self, element: NodeId, selector: &Selector) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0];
        selector.matches(&node.tag, |name| node.attribute(name))
    }

    fn parse_selector(selector: &str) -> Option<Selector> {
        Selector::parse(selector).ok()
    }
}

impl DomPort for MemoryDom {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        let mut all = Vec::new();
        self.descendants(self.root(), &mut all);
        all.into_iter()
            .filter(|id| self.matches_selector(*id, &selector))
            .collect()
    }

    fn children(&self, element: &NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[element.0].children.clone()
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[element.0].parent
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Self::parse_selector(selector)?;
        let mut current = Some(*element);
        while let Some(id) = current {
            if self.matches_selector(id, &selector) {
                return Some(id);
            }
            current = self.parent(&id);
        }
        None
    }

    fn matches(&self, element: &NodeId, selector: &str) -> bool {
        Self::parse_selector(selector)
            .is_some_and(|selector| self.matches_selector(*element, &selector))
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0]
            .classes()
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, element: &NodeId, class: &str) -> Result<(), NotifyError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        let mut classes = node.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            node.set_attribute("class", &classes.join(" "));
        }
        Ok(())
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> Result<(), NotifyError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        let classes: Vec<String> = node.classes().into_iter().filter(|c| c != class).collect();
        if node.attribute("class").is_some() {
            node.set_attribute("class", &classes.join(" "));
        }
        Ok(())
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attribute(name)
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), NotifyError> {
        self.nodes.borrow_mut()[element.0].set_attribute(name, value);
        Ok(())
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].content.clone()
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.nodes.borrow_mut()[element.0].content = html.to_string();
    }

    fn text(&self, element: &NodeId) -> String {
        unescape(&strip_tags(&self.inner_html(element)))
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.set_inner_html(element, &escape_text(text));
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) -> Result<(), NotifyError> {
        let mut nodes = self.nodes.borrow_mut();
        let styles = &mut nodes[element.0].styles;
        match styles.iter_mut().find(|(key, _)| key == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => styles.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove(&self, element: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[element.0].parent.take() {
            nodes[parent.0].children.retain(|child| child != element);
        }
    }

    fn prepend_html(&self, element: &NodeId, html: &str) -> Result<(), NotifyError> {
        let fragment = parse_fragment(html)?;
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        let mut node = Node::new(&fragment.tag, Some(*element));
        node.attributes = fragment.attributes;
        node.content = fragment.content;
        nodes.push(node);
        nodes[element.0].children.insert(0, id);
        Ok(())
    }
}

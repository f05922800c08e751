//! html5ever TreeSink implementation for ArenaDom.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, QualName};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Handle used by TreeSink to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub ArenaNodeId);

/// TreeSink that builds an [`ArenaDom`].
///
/// html5ever's TreeSink takes `&self` everywhere, so the DOM sits behind a
/// RefCell. Parse errors are counted, never fatal.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    parse_errors: Cell<usize>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            parse_errors: Cell::new(0),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    /// Number of recoverable parse errors html5ever reported.
    pub fn parse_errors(&self) -> usize {
        self.parse_errors.get()
    }

    fn insert(&self, parent: ArenaNodeId, child: NodeOrText<NodeHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                dom.detach(node.0);
                dom.append(parent, node.0);
            }
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.parse_errors.set(self.parse_errors.get() + 1);
        tracing::trace!(%msg, "recovered from markup parse error");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name }) => {
                // SAFETY: html5ever uses the returned name immediately and
                // never stores it, and no node is created while it is held,
                // so the arena Vec cannot reallocate underneath it.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        _attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_element(name))
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_other())
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_other())
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self
            .dom
            .borrow()
            .get(element.0)
            .map(|n| n.parent)
            .unwrap_or(ArenaNodeId::NONE);

        if parent.is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_other();
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => {
                dom.detach(node.0);
                node.0
            }
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        };
        dom.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, _target: &Self::Handle, _attrs: Vec<Attribute>) {}

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children: Vec<_> = self.dom.borrow().children(node.0).collect();

        let mut dom = self.dom.borrow_mut();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    use super::*;

    fn parse_html(html: &str) -> ArenaDom {
        let sink = ArenaSink::new();
        parse_document(sink, ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        let paragraphs = dom.select_outermost(|name| name == "p");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(dom.text_content(paragraphs[0]), "Hello");
    }

    #[test]
    fn test_unclosed_paragraphs_are_split() {
        let dom = parse_html("<body><p>One<p>Two</body>");

        let texts: Vec<_> = dom
            .select_outermost(|name| name == "p")
            .into_iter()
            .map(|p| dom.text_content(p))
            .collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_misnested_formatting_keeps_text() {
        // Adoption agency reparenting must not lose text.
        let dom = parse_html("<p><b>bold <i>both</b> italic</i></p>");

        let p = dom.select_outermost(|name| name == "p")[0];
        assert_eq!(dom.text_content(p), "bold both italic");
    }

    #[test]
    fn test_names_survive_arena_growth() {
        // Thousands of nodes force the arena to reallocate between the
        // tree builder's element-name lookups.
        let mut html = String::from("<body>");
        for i in 0..2000 {
            html.push_str(&format!("<div><p>{i}<b>x<i>y</b>z</i></p></div>"));
        }
        let dom = parse_html(&html);

        let paragraphs = dom.select_outermost(|name| name == "p");
        assert_eq!(paragraphs.len(), 2000);
        assert_eq!(dom.text_content(paragraphs[1999]), "1999xyz");
    }

    #[test]
    fn test_parse_errors_are_counted_not_fatal() {
        let sink = ArenaSink::new();
        let sink = parse_document(sink, ParseOpts::default())
            .from_utf8()
            .one("<p>unterminated <b>".as_bytes());
        assert!(sink.parse_errors() > 0);
        assert!(!sink.into_dom().is_empty());
    }
}

//! Minimal triple store over the install.rdf RDF/XML subset.
//!
//! This is not a general RDF implementation. It parses the striped
//! element/property form that install manifests use — node elements
//! alternating with property elements — into flat `(subject, predicate,
//! object)` triples, and answers the three lookups the manifest extractor
//! needs. Two indexes are built once at load time so lookups are O(1):
//! subject → predicate → objects, and predicate → (subject, object) pairs.
//!
//! Real-world manifests are sloppy. The parser is schema-tolerant: typed
//! node elements, property attributes, `rdf:resource` references and
//! missing `rdf:about` anchors (blank nodes) are all accepted.

use std::collections::HashMap;

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::ImportError;
use crate::Result;

/// Well-known root subject of an install manifest.
pub const MANIFEST_URI: &str = "urn:mozilla:install-manifest";

/// Namespace under which all manifest predicates live.
pub const EM_NS: &str = "http://www.mozilla.org/2004/em-rdf#";

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Returns the fully expanded manifest predicate URI for a short name.
///
/// `em_uri("id")` is `http://www.mozilla.org/2004/em-rdf#id`.
#[must_use]
pub fn em_uri(name: &str) -> String {
    format!("{EM_NS}{name}")
}

/// A graph node: either a named resource or an anonymous (blank) node.
///
/// Blank nodes are numbered in document order; they identify nested
/// `Description` blocks that carry no `rdf:about`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A URI-named resource.
    Resource(String),
    /// An anonymous node, numbered in document order.
    Blank(u32),
}

/// A triple object: another node, or a literal string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// Reference to another node in the graph.
    Node(Node),
    /// Character data.
    Literal(String),
}

impl Object {
    /// Textual value of this object: the literal text, or the resource URI.
    /// Blank nodes have no textual value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Node(Node::Resource(uri)) => Some(uri),
            Self::Node(Node::Blank(_)) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Triple {
    subject: Node,
    predicate: String,
    object: Object,
}

/// An install.rdf manifest loaded into flat triples.
#[derive(Debug)]
pub struct ManifestGraph {
    triples: Vec<Triple>,
    by_subject: HashMap<Node, HashMap<String, Vec<Object>>>,
    by_predicate: HashMap<String, Vec<(Node, Object)>>,
}

impl ManifestGraph {
    /// Loads a manifest document into a triple graph.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::ManifestParse` if the document is not
    /// well-formed XML or contains no elements at all.
    pub fn load(document: &[u8]) -> Result<Self> {
        let triples = Parser::new(document).run()?;

        let mut by_subject: HashMap<Node, HashMap<String, Vec<Object>>> = HashMap::new();
        let mut by_predicate: HashMap<String, Vec<(Node, Object)>> = HashMap::new();
        for triple in &triples {
            by_subject
                .entry(triple.subject.clone())
                .or_default()
                .entry(triple.predicate.clone())
                .or_default()
                .push(triple.object.clone());
            by_predicate
                .entry(triple.predicate.clone())
                .or_default()
                .push((triple.subject.clone(), triple.object.clone()));
        }

        Ok(Self {
            triples,
            by_subject,
            by_predicate,
        })
    }

    /// Resolves the effective root subject of the manifest.
    ///
    /// If the well-known manifest URI occurs as a subject, it is the root.
    /// Otherwise the graph is searched for a triple declaring something to
    /// *be* the manifest — the manifest URI as an object, resource or
    /// literal — and that triple's subject is the root.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::RootNotFound` when neither search succeeds.
    pub fn find_root(&self) -> Result<Node> {
        let manifest = Node::Resource(MANIFEST_URI.to_owned());
        if self.by_subject.contains_key(&manifest) {
            return Ok(manifest);
        }

        for triple in &self.triples {
            let declares_manifest = match &triple.object {
                Object::Node(Node::Resource(uri)) => uri == MANIFEST_URI,
                Object::Literal(value) => value == MANIFEST_URI,
                Object::Node(Node::Blank(_)) => false,
            };
            if declares_manifest {
                return Ok(triple.subject.clone());
            }
        }

        Err(ImportError::RootNotFound)
    }

    /// Looks up the first textual value of `em:{name}` under a subject.
    ///
    /// Returns `None` when the subject has no such predicate or its only
    /// objects are blank nodes.
    #[must_use]
    pub fn literal(&self, name: &str, subject: &Node) -> Option<&str> {
        self.by_subject
            .get(subject)?
            .get(&em_uri(name))?
            .iter()
            .find_map(Object::as_text)
    }

    /// Enumerates every distinct node object of `em:{name}` across the
    /// whole graph, subject unconstrained, in first-occurrence order.
    ///
    /// This is how repeated nested blocks (`em:targetApplication`) are
    /// found regardless of which subject declared them.
    #[must_use]
    pub fn objects_of(&self, name: &str) -> Vec<Node> {
        let mut nodes: Vec<Node> = Vec::new();
        if let Some(pairs) = self.by_predicate.get(&em_uri(name)) {
            for (_, object) in pairs {
                if let Object::Node(node) = object {
                    if !nodes.contains(node) {
                        nodes.push(node.clone());
                    }
                }
            }
        }
        nodes
    }

    /// Number of triples in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns `true` if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Striped RDF/XML parser state. Frames alternate between node elements
/// (subjects) and property elements (predicates).
enum Frame {
    /// The outer `rdf:RDF` wrapper element.
    Document,
    /// A node element; child elements are properties of this subject.
    Node(Node),
    /// A property element; accumulates text or a nested node object.
    Property {
        subject: Node,
        predicate: String,
        text: String,
        has_object: bool,
    },
}

struct Parser<'a> {
    reader: NsReader<&'a [u8]>,
    stack: Vec<Frame>,
    triples: Vec<Triple>,
    next_blank: u32,
    seen_element: bool,
}

struct ElementAttrs {
    about: Option<String>,
    resource: Option<String>,
    properties: Vec<(String, String)>,
}

impl<'a> Parser<'a> {
    fn new(document: &'a [u8]) -> Self {
        let mut reader = NsReader::from_reader(document);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            stack: Vec::new(),
            triples: Vec::new(),
            next_blank: 0,
            seen_element: false,
        }
    }

    fn run(mut self) -> Result<Vec<Triple>> {
        loop {
            match self.reader.read_event().map_err(parse_err)? {
                Event::Start(e) => {
                    self.seen_element = true;
                    self.handle_start(&e, false)?;
                }
                Event::Empty(e) => {
                    self.seen_element = true;
                    self.handle_start(&e, true)?;
                }
                Event::End(_) => self.handle_end()?,
                Event::Text(t) => {
                    let text = t.unescape().map_err(parse_err)?;
                    self.handle_text(&text);
                }
                Event::CData(t) => {
                    let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                    self.handle_text(&text);
                }
                Event::Eof => break,
                // Declarations, comments, PIs and doctypes carry no triples.
                _ => {}
            }
        }

        if !self.stack.is_empty() {
            return Err(ImportError::ManifestParse(
                "unexpected end of document".to_owned(),
            ));
        }
        if !self.seen_element {
            return Err(ImportError::ManifestParse(
                "document contains no XML elements".to_owned(),
            ));
        }

        Ok(self.triples)
    }

    fn handle_start(&mut self, element: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        let (ns, local) = self.resolve_name(element);

        // Node position: top level, inside the rdf:RDF wrapper, or nested
        // inside a property element. Property position: directly inside a
        // node element.
        if matches!(self.stack.last(), Some(Frame::Node(_))) {
            self.start_property(element, ns.as_deref(), &local, is_empty)
        } else {
            if self.stack.is_empty() && is_rdf_wrapper(ns.as_deref(), &local) {
                if !is_empty {
                    self.stack.push(Frame::Document);
                }
                return Ok(());
            }
            self.start_node(element, ns.as_deref(), &local, is_empty)
        }
    }

    fn start_node(
        &mut self,
        element: &BytesStart<'_>,
        ns: Option<&str>,
        local: &str,
        is_empty: bool,
    ) -> Result<()> {
        let attrs = self.scan_attributes(element)?;

        let subject = match attrs.about {
            Some(uri) => Node::Resource(uri),
            None => self.fresh_blank(),
        };

        // A node nested inside a property element is that property's object.
        if let Some(Frame::Property {
            subject: parent,
            predicate,
            has_object,
            ..
        }) = self.stack.last_mut()
        {
            *has_object = true;
            let link = Triple {
                subject: parent.clone(),
                predicate: predicate.clone(),
                object: Object::Node(subject.clone()),
            };
            self.triples.push(link);
        }

        // Typed node elements double as an rdf:type statement.
        if !is_description(ns, local) {
            self.triples.push(Triple {
                subject: subject.clone(),
                predicate: RDF_TYPE.to_owned(),
                object: Object::Node(Node::Resource(expand(ns, local))),
            });
        }

        for (predicate, value) in attrs.properties {
            self.triples.push(Triple {
                subject: subject.clone(),
                predicate,
                object: Object::Literal(value),
            });
        }

        if !is_empty {
            self.stack.push(Frame::Node(subject));
        }
        Ok(())
    }

    fn start_property(
        &mut self,
        element: &BytesStart<'_>,
        ns: Option<&str>,
        local: &str,
        is_empty: bool,
    ) -> Result<()> {
        let Some(Frame::Node(subject)) = self.stack.last() else {
            return Err(ImportError::ManifestParse(
                "property element outside a node element".to_owned(),
            ));
        };
        let subject = subject.clone();
        let predicate = expand(ns, local);
        let attrs = self.scan_attributes(element)?;

        if let Some(uri) = attrs.resource {
            self.triples.push(Triple {
                subject: subject.clone(),
                predicate: predicate.clone(),
                object: Object::Node(Node::Resource(uri)),
            });
            if !is_empty {
                self.stack.push(Frame::Property {
                    subject,
                    predicate,
                    text: String::new(),
                    has_object: true,
                });
            }
        } else if is_empty {
            self.triples.push(Triple {
                subject,
                predicate,
                object: Object::Literal(String::new()),
            });
        } else {
            self.stack.push(Frame::Property {
                subject,
                predicate,
                text: String::new(),
                has_object: false,
            });
        }
        Ok(())
    }

    fn handle_end(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Property {
                subject,
                predicate,
                text,
                has_object,
            }) => {
                if !has_object {
                    self.triples.push(Triple {
                        subject,
                        predicate,
                        object: Object::Literal(text),
                    });
                }
                Ok(())
            }
            Some(Frame::Node(_) | Frame::Document) => Ok(()),
            None => Err(ImportError::ManifestParse(
                "closing tag without matching element".to_owned(),
            )),
        }
    }

    fn handle_text(&mut self, text: &str) {
        if let Some(Frame::Property {
            text: buffer,
            has_object: false,
            ..
        }) = self.stack.last_mut()
        {
            buffer.push_str(text);
        }
        // Character data in node position is ignored.
    }

    fn resolve_name(&self, element: &BytesStart<'_>) -> (Option<String>, String) {
        let (resolution, local) = self.reader.resolve_element(element.name());
        let ns = match resolution {
            ResolveResult::Bound(namespace) => {
                Some(String::from_utf8_lossy(namespace.as_ref()).into_owned())
            }
            ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
        };
        (ns, String::from_utf8_lossy(local.as_ref()).into_owned())
    }

    fn scan_attributes(&mut self, element: &BytesStart<'_>) -> Result<ElementAttrs> {
        let mut attrs = ElementAttrs {
            about: None,
            resource: None,
            properties: Vec::new(),
        };

        for attribute in element.attributes() {
            let attribute = attribute.map_err(parse_err)?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }

            let (resolution, local) = self.reader.resolve_attribute(attribute.key);
            let local = String::from_utf8_lossy(local.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(parse_err)?
                .into_owned();

            match (resolution, local.as_str()) {
                // rdf:about / about, any prefix — the subject anchor.
                (_, "about") => attrs.about = Some(value),
                // rdf:resource / resource — an object reference.
                (_, "resource") => attrs.resource = Some(value),
                // Any other namespaced attribute is a property attribute.
                (ResolveResult::Bound(namespace), _) => {
                    let namespace = String::from_utf8_lossy(namespace.as_ref()).into_owned();
                    if namespace != RDF_NS {
                        attrs.properties.push((format!("{namespace}{local}"), value));
                    }
                }
                _ => {}
            }
        }

        Ok(attrs)
    }

    fn fresh_blank(&mut self) -> Node {
        let node = Node::Blank(self.next_blank);
        self.next_blank += 1;
        node
    }
}

fn parse_err(err: impl std::fmt::Display) -> ImportError {
    ImportError::ManifestParse(err.to_string())
}

fn is_rdf_wrapper(ns: Option<&str>, local: &str) -> bool {
    local == "RDF" && ns.is_none_or(|n| n == RDF_NS)
}

fn is_description(ns: Option<&str>, local: &str) -> bool {
    local == "Description" && ns.is_none_or(|n| n == RDF_NS)
}

fn expand(ns: Option<&str>, local: &str) -> String {
    ns.map_or_else(|| local.to_owned(), |n| format!("{n}{local}"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"<?xml version="1.0"?>
<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
    <em:id>{abc-123}</em:id>
    <em:type>2</em:type>
    <em:name>Test</em:name>
    <em:version>1.0</em:version>
  </Description>
</RDF>"#;

    fn root(graph: &ManifestGraph) -> Node {
        graph.find_root().expect("root should resolve")
    }

    #[test]
    fn test_load_simple_manifest() {
        let graph = ManifestGraph::load(SIMPLE.as_bytes()).expect("should load");
        assert_eq!(graph.len(), 4);

        let root = root(&graph);
        assert_eq!(root, Node::Resource(MANIFEST_URI.to_owned()));
        assert_eq!(graph.literal("id", &root), Some("{abc-123}"));
        assert_eq!(graph.literal("type", &root), Some("2"));
        assert_eq!(graph.literal("name", &root), Some("Test"));
        assert_eq!(graph.literal("version", &root), Some("1.0"));
        assert_eq!(graph.literal("homepageURL", &root), None);
    }

    #[test]
    fn test_root_from_object_position() {
        // The manifest URI never occurs as a subject; something declares
        // itself to be the manifest instead.
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:x:anchor">
    <type resource="urn:mozilla:install-manifest"/>
    <em:id>{fallback}</em:id>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");

        let root = root(&graph);
        assert_eq!(root, Node::Resource("urn:x:anchor".to_owned()));
        assert_eq!(graph.literal("id", &root), Some("{fallback}"));
    }

    #[test]
    fn test_root_from_literal_object() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:x:anchor">
    <em:manifest>urn:mozilla:install-manifest</em:manifest>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");
        assert_eq!(root(&graph), Node::Resource("urn:x:anchor".to_owned()));
    }

    #[test]
    fn test_root_not_found() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:x:something-else">
    <em:id>{orphan}</em:id>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");
        assert!(matches!(graph.find_root(), Err(ImportError::RootNotFound)));
    }

    #[test]
    fn test_nested_blocks_become_blank_nodes() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
    <em:targetApplication>
      <Description>
        <em:id>{app-one}</em:id>
        <em:minVersion>1.0</em:minVersion>
        <em:maxVersion>2.0</em:maxVersion>
      </Description>
    </em:targetApplication>
    <em:targetApplication>
      <Description>
        <em:id>{app-two}</em:id>
      </Description>
    </em:targetApplication>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");

        let contexts = graph.objects_of("targetApplication");
        assert_eq!(contexts.len(), 2);
        assert_eq!(graph.literal("id", &contexts[0]), Some("{app-one}"));
        assert_eq!(graph.literal("minVersion", &contexts[0]), Some("1.0"));
        assert_eq!(graph.literal("maxVersion", &contexts[0]), Some("2.0"));
        assert_eq!(graph.literal("id", &contexts[1]), Some("{app-two}"));
    }

    #[test]
    fn test_property_attributes() {
        // Literal properties written as attributes on the node element.
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest"
               em:id="{attr-style}" em:version="0.9"/>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");

        let root = root(&graph);
        assert_eq!(graph.literal("id", &root), Some("{attr-style}"));
        assert_eq!(graph.literal("version", &root), Some("0.9"));
    }

    #[test]
    fn test_typed_node_element() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <em:Manifest about="urn:mozilla:install-manifest">
    <em:id>{typed}</em:id>
  </em:Manifest>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");

        let root = root(&graph);
        assert_eq!(graph.literal("id", &root), Some("{typed}"));
        // The typed element contributed an rdf:type triple too.
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_empty_property_element() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
    <em:id/>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");
        assert_eq!(graph.literal("id", &root(&graph)), Some(""));
    }

    #[test]
    fn test_malformed_document() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <Description about="urn:mozilla:install-manifest">
    <em:id>{broken}</wrong>
  </Description>"#;
        let result = ManifestGraph::load(doc.as_bytes());
        assert!(matches!(result, Err(ImportError::ManifestParse(_))));
    }

    #[test]
    fn test_truncated_document() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <Description about="urn:mozilla:install-manifest">"#;
        let result = ManifestGraph::load(doc.as_bytes());
        assert!(matches!(result, Err(ImportError::ManifestParse(_))));
    }

    #[test]
    fn test_document_without_elements() {
        let result = ManifestGraph::load(b"this is not a manifest");
        assert!(matches!(result, Err(ImportError::ManifestParse(_))));
    }

    #[test]
    fn test_empty_graph_has_no_root() {
        let graph = ManifestGraph::load(b"<RDF></RDF>").expect("should load");
        assert!(graph.is_empty());
        assert!(matches!(graph.find_root(), Err(ImportError::RootNotFound)));
    }

    #[test]
    fn test_entity_escapes_in_literals() {
        let doc = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
    <em:name>Fish &amp; Chips</em:name>
  </Description>
</RDF>"#;
        let graph = ManifestGraph::load(doc.as_bytes()).expect("should load");
        assert_eq!(graph.literal("name", &root(&graph)), Some("Fish & Chips"));
    }
}

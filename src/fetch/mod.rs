//! Retrieval of RFC documents from a document repository.
//!
//! [`DocumentSource`] abstracts the repository; [`HttpSource`] talks to the
//! RFC Editor over HTTP (feature `http`). [`fetch_primary`] picks the best
//! convertible variant of one document and [`fetch_recursive`] follows
//! citations breadth-first.

mod citations;
#[cfg(feature = "http")]
mod http;

use std::collections::{HashSet, VecDeque};
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::Format;

pub use citations::cited_rfcs;
#[cfg(feature = "http")]
pub use http::{HttpSource, HttpSourceConfig};

/// Normalized RFC identifier, displayed as `rfcN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RfcId(u32);

impl RfcId {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Parse user input such as `RFC 9514`, `rfc9514` or `9514`.
    ///
    /// ```
    /// use rfcmd::fetch::RfcId;
    ///
    /// assert_eq!(RfcId::parse("RFC 9514").unwrap().to_string(), "rfc9514");
    /// assert!(RfcId::parse("draft-foo").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let digits = compact.strip_prefix("rfc").unwrap_or(&compact);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RfcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rfc{}", self.0)
    }
}

/// Published renderings of one RFC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Variant {
    Xml,
    Html,
    Text,
    Pdf,
}

impl Variant {
    /// Extension of the saved file.
    pub fn extension(self) -> &'static str {
        match self {
            Variant::Xml => "xml",
            Variant::Html => "html",
            Variant::Text => "txt",
            Variant::Pdf => "pdf",
        }
    }

    /// Repository file names to try, in order.
    ///
    /// Older RFCs only publish a PDF rendering of the text version.
    pub fn file_names(self, id: RfcId) -> Vec<String> {
        let primary = format!("{id}.{}", self.extension());
        match self {
            Variant::Pdf => vec![primary, format!("{id}.txt.pdf")],
            _ => vec![primary],
        }
    }

    /// Local file name the variant is saved under.
    pub fn local_name(self, id: RfcId) -> String {
        format!("{id}.{}", self.extension())
    }

    /// The converter for this variant, if it is convertible.
    pub fn format(self) -> Option<Format> {
        match self {
            Variant::Xml => Some(Format::Xml),
            Variant::Html => Some(Format::Html),
            Variant::Text | Variant::Pdf => None,
        }
    }
}

/// A retrieved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: RfcId,
    pub variant: Variant,
    pub bytes: Vec<u8>,
}

/// Somewhere documents can be read from.
pub trait DocumentSource {
    /// Fetch one file by repository name. A missing file is `Ok(None)`.
    fn fetch_file(&self, name: &str) -> Result<Option<Vec<u8>>, FetchError>;

    /// Fetch a variant, trying each of its file names in turn.
    fn fetch(&self, id: RfcId, variant: Variant) -> Result<Option<Document>, FetchError> {
        for name in variant.file_names(id) {
            if let Some(bytes) = self.fetch_file(&name)? {
                return Ok(Some(Document { id, variant, bytes }));
            }
            debug!("{name} not found");
        }
        Ok(None)
    }
}

/// Fetch the convertible rendering of `id`: XML, or HTML for RFCs that
/// predate the XML format.
pub fn fetch_primary<S: DocumentSource + ?Sized>(
    source: &S,
    id: RfcId,
) -> Result<Document, FetchError> {
    if let Some(doc) = source.fetch(id, Variant::Xml)? {
        info!("Fetched {id} as XML ({} bytes)", doc.bytes.len());
        return Ok(doc);
    }
    info!("{id}: no XML rendering, trying HTML");
    if let Some(doc) = source.fetch(id, Variant::Html)? {
        info!("Fetched {id} as HTML ({} bytes)", doc.bytes.len());
        return Ok(doc);
    }
    Err(FetchError::NotFound(id.to_string()))
}

/// Fetch `root` and, breadth-first, the documents it cites.
///
/// Documents at depth `max_depth` are fetched but their citations are not
/// followed; `max_depth == 0` fetches only the root. Each RFC is fetched at
/// most once. Failure to fetch the root is an error; a cited document that
/// cannot be fetched is logged and skipped.
pub fn fetch_recursive<S, F>(
    source: &S,
    root: RfcId,
    max_depth: usize,
    mut list_citations: F,
) -> Result<Vec<Document>, FetchError>
where
    S: DocumentSource + ?Sized,
    F: FnMut(&Document) -> Vec<RfcId>,
{
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([(root, 0usize)]);
    let mut documents = Vec::new();

    while let Some((id, depth)) = queue.pop_front() {
        let doc = match fetch_primary(source, id) {
            Ok(doc) => doc,
            Err(err) if id == root => return Err(err),
            Err(err) => {
                warn!("Skipping cited {id}: {err}");
                continue;
            }
        };

        if depth < max_depth {
            let cited = list_citations(&doc);
            debug!("{id} cites {} RFC(s)", cited.len());
            for next in cited {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        documents.push(doc);
    }

    info!("Fetched {} document(s) starting from {root}", documents.len());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
        requests: RefCell<Vec<String>>,
    }

    impl MemorySource {
        fn with(mut self, name: &str, body: &str) -> Self {
            self.files.insert(name.to_string(), body.as_bytes().to_vec());
            self
        }
    }

    impl DocumentSource for MemorySource {
        fn fetch_file(&self, name: &str) -> Result<Option<Vec<u8>>, FetchError> {
            self.requests.borrow_mut().push(name.to_string());
            Ok(self.files.get(name).cloned())
        }
    }

    #[test]
    fn test_parse_rfc_id() {
        for input in ["RFC 9514", "rfc9514", "9514", " Rfc9514 ", "RFC9514"] {
            assert_eq!(RfcId::parse(input), Some(RfcId::new(9514)), "{input}");
        }
        assert_eq!(RfcId::parse("rfc"), None);
        assert_eq!(RfcId::parse("rfc95a"), None);
        assert_eq!(RfcId::parse(""), None);
        assert_eq!(RfcId::new(791).to_string(), "rfc791");
    }

    #[test]
    fn test_variant_file_names() {
        let id = RfcId::new(2119);
        assert_eq!(Variant::Xml.file_names(id), vec!["rfc2119.xml"]);
        assert_eq!(Variant::Text.file_names(id), vec!["rfc2119.txt"]);
        assert_eq!(
            Variant::Pdf.file_names(id),
            vec!["rfc2119.pdf", "rfc2119.txt.pdf"]
        );
        assert_eq!(Variant::Pdf.local_name(id), "rfc2119.pdf");
    }

    #[test]
    fn test_pdf_fallback() {
        let source = MemorySource::default().with("rfc791.txt.pdf", "%PDF");
        let doc = source.fetch(RfcId::new(791), Variant::Pdf).unwrap().unwrap();
        assert_eq!(doc.bytes, b"%PDF");
        assert_eq!(
            *source.requests.borrow(),
            vec!["rfc791.pdf", "rfc791.txt.pdf"]
        );
    }

    #[test]
    fn test_fetch_primary_falls_back_to_html() {
        let source = MemorySource::default().with("rfc791.html", "<pre>x</pre>");
        let doc = fetch_primary(&source, RfcId::new(791)).unwrap();
        assert_eq!(doc.variant, Variant::Html);

        let err = fetch_primary(&source, RfcId::new(1)).unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref id) if id == "rfc1"));
    }

    fn graph(doc: &Document) -> Vec<RfcId> {
        let ids: &[u32] = match doc.id.number() {
            1 => &[2, 3],
            2 => &[1, 3, 4],
            3 => &[5],
            4 => &[6],
            _ => &[],
        };
        ids.iter().copied().map(RfcId::new).collect()
    }

    fn full_source() -> MemorySource {
        (1..=6).fold(MemorySource::default(), |s, n| {
            s.with(&format!("rfc{n}.xml"), "<rfc/>")
        })
    }

    #[test]
    fn test_recursive_breadth_first_and_depth_limited() {
        let source = full_source();
        let docs = fetch_recursive(&source, RfcId::new(1), 1, graph).unwrap();
        let ids: Vec<u32> = docs.iter().map(|d| d.id.number()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let docs = fetch_recursive(&source, RfcId::new(1), 2, graph).unwrap();
        let ids: Vec<u32> = docs.iter().map(|d| d.id.number()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_recursive_visits_each_once() {
        let source = full_source();
        let docs = fetch_recursive(&source, RfcId::new(1), 10, graph).unwrap();
        assert_eq!(docs.len(), 6);
        let xml_requests = source
            .requests
            .borrow()
            .iter()
            .filter(|r| r.as_str() == "rfc3.xml")
            .count();
        assert_eq!(xml_requests, 1);
    }

    #[test]
    fn test_recursive_depth_zero_is_root_only() {
        let docs = fetch_recursive(&full_source(), RfcId::new(1), 0, graph).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_recursive_skips_missing_citations() {
        let source = MemorySource::default()
            .with("rfc1.xml", "<rfc/>")
            .with("rfc3.html", "<pre/>");
        let docs = fetch_recursive(&source, RfcId::new(1), 1, graph).unwrap();
        let found: Vec<(u32, Variant)> = docs.iter().map(|d| (d.id.number(), d.variant)).collect();
        assert_eq!(found, vec![(1, Variant::Xml), (3, Variant::Html)]);
    }

    #[test]
    fn test_recursive_missing_root_is_error() {
        let result = fetch_recursive(&MemorySource::default(), RfcId::new(1), 1, graph);
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}

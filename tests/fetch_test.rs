//! Fetching and citation following against an in-memory repository.

use std::cell::RefCell;
use std::collections::HashMap;

use rfcmd::fetch::{
    Document, DocumentSource, RfcId, Variant, cited_rfcs, fetch_primary, fetch_recursive,
};
use rfcmd::{Converter, FetchError, Format, HtmlConverter, XmlConverter};

#[derive(Default)]
struct Repository {
    files: HashMap<String, Vec<u8>>,
    broken: Vec<String>,
    requests: RefCell<Vec<String>>,
}

impl Repository {
    fn file(mut self, name: &str, body: &str) -> Self {
        self.files.insert(name.to_string(), body.as_bytes().to_vec());
        self
    }

    fn broken(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }
}

impl DocumentSource for Repository {
    fn fetch_file(&self, name: &str) -> Result<Option<Vec<u8>>, FetchError> {
        self.requests.borrow_mut().push(name.to_string());
        if self.broken.iter().any(|b| b == name) {
            return Err(FetchError::HttpStatus {
                status: 503,
                url: name.to_string(),
            });
        }
        Ok(self.files.get(name).cloned())
    }
}

const ROOT_XML: &str = r#"<rfc>
  <front><title>Root Document</title></front>
  <middle><section anchor="intro" pn="section-1"><name>Introduction</name>
    <t>Builds on <xref target="RFC2119"/>.</t></section></middle>
  <back><references><name>Normative References</name>
    <reference anchor="RFC2119"><front><title>Key words</title></front>
      <seriesInfo name="RFC" value="2119"/></reference>
    <reference anchor="RFC791"><front><title>Internet Protocol</title></front>
      <seriesInfo name="RFC" value="791"/></reference>
  </references></back>
</rfc>"#;

const RFC2119_XML: &str = r#"<rfc><front><title>Key words</title></front>
  <back><references><reference anchor="RFC791">
    <seriesInfo name="RFC" value="791"/></reference></references></back></rfc>"#;

const RFC791_HTML: &str = r#"<html><body><pre>
1.  Introduction

   The Internet Protocol.  See also <a href="./rfc760">RFC 760</a>.
</pre></body></html>"#;

fn repository() -> Repository {
    Repository::default()
        .file("rfc9000.xml", ROOT_XML)
        .file("rfc2119.xml", RFC2119_XML)
        .file("rfc791.html", RFC791_HTML)
}

fn numbers(docs: &[Document]) -> Vec<u32> {
    docs.iter().map(|d| d.id.number()).collect()
}

#[test]
fn test_recursive_fetch_follows_citations() {
    let repo = repository();
    let docs = fetch_recursive(&repo, RfcId::new(9000), 1, cited_rfcs).unwrap();
    assert_eq!(numbers(&docs), vec![9000, 2119, 791]);
    assert_eq!(docs[2].variant, Variant::Html);

    // RFC 791 is cited twice but requested once per variant.
    let requests = repo.requests.borrow();
    assert_eq!(requests.iter().filter(|r| *r == "rfc791.xml").count(), 1);
}

#[test]
fn test_recursive_fetch_respects_depth() {
    let repo = repository();
    let docs = fetch_recursive(&repo, RfcId::new(9000), 2, cited_rfcs).unwrap();
    // RFC 760 is cited at depth 2 but absent from the repository.
    assert_eq!(numbers(&docs), vec![9000, 2119, 791]);
    assert!(repo.requests.borrow().contains(&"rfc760.xml".to_string()));
}

#[test]
fn test_transport_failure_on_citation_is_skipped() {
    let repo = repository().broken("rfc2119.xml");
    let docs = fetch_recursive(&repo, RfcId::new(9000), 1, cited_rfcs).unwrap();
    assert_eq!(numbers(&docs), vec![9000, 791]);
}

#[test]
fn test_transport_failure_on_root_is_error() {
    let repo = repository().broken("rfc9000.xml");
    let err = fetch_recursive(&repo, RfcId::new(9000), 1, cited_rfcs).unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 503, .. }));
}

#[test]
fn test_fetched_documents_convert() {
    let repo = repository();
    let docs = fetch_recursive(&repo, RfcId::new(9000), 1, cited_rfcs).unwrap();

    for doc in &docs {
        let markdown = match doc.variant.format() {
            Some(Format::Xml) => XmlConverter::new().convert(&doc.bytes).unwrap(),
            Some(Format::Html) => HtmlConverter::new().convert(&doc.bytes).unwrap(),
            None => unreachable!("primary documents are convertible"),
        };
        assert!(!markdown.is_empty(), "{} converted to nothing", doc.id);
    }
}

#[test]
fn test_fetch_primary_prefers_xml() {
    let repo = repository().file("rfc2119.html", "<pre>old</pre>");
    let doc = fetch_primary(&repo, RfcId::new(2119)).unwrap();
    assert_eq!(doc.variant, Variant::Xml);
    assert_eq!(*repo.requests.borrow(), vec!["rfc2119.xml"]);
}

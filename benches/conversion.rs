//! Benchmarks for the RFC conversion pipelines.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use rfcmd::html::{collapse_blank_lines, extract_toc, remove_page_breaks};
use rfcmd::{Converter, HtmlConfig, HtmlConverter, SegmentMode, XmlConverter};

const XML_BYTES: &[u8] = include_bytes!("../tests/fixtures/deep_anchors.xml");
const HTML_BYTES: &[u8] = include_bytes!("../tests/fixtures/legacy_three_sections.html");

/// A long XML document: many sections with paragraphs, lists and a table.
fn large_xml(sections: usize) -> String {
    let mut xml = String::from("<rfc><front><title>Bench</title></front><middle>");
    for n in 1..=sections {
        xml.push_str(&format!(
            r#"<section anchor="s{n}" pn="section-{n}"><name>Section {n}</name>
              <t>Paragraph with <em>emphasis</em>, <tt>code</tt> and <xref target="s1"/>.</t>
              <ul><li>First</li><li>Second</li></ul>
              <table><thead><tr><th>A</th><th>B</th></tr></thead>
                <tbody><tr><td>1</td><td>2</td></tr></tbody></table>
              <sourcecode type="c">int main(void) {{ return {n}; }}</sourcecode>
            </section>"#
        ));
    }
    xml.push_str("</middle></rfc>");
    xml
}

/// A long legacy rendering: one numbered section per page.
fn large_html(pages: usize) -> String {
    let mut text = String::from("Table of Contents\n\n");
    for n in 1..=pages {
        text.push_str(&format!("   {n}. Section {n} ......................... {n}\n"));
    }
    text.push('\n');
    for n in 1..=pages {
        text.push_str(&format!(
            "{n}.  Section {n}\n\n   Body text for section {n}.\n\n\
             +------+------+\n| Name | Code |\n+------+------+\n| x    | {n}    |\n+------+------+\n\n\
             Author                    Informational                    [Page {n}]\n\x0c\n\
             RFC 9999                    Bench                    March 2024\n\n"
        ));
    }
    format!("<html><body><pre>{text}</pre></body></html>")
}

// ============================================================================
// XML Benchmarks
// ============================================================================

fn bench_xml_fixture(c: &mut Criterion) {
    let converter = XmlConverter::new();
    c.bench_function("xml_fixture", |b| {
        b.iter(|| converter.convert(XML_BYTES).unwrap());
    });
}

fn bench_xml_large(c: &mut Criterion) {
    let input = large_xml(200);
    let converter = XmlConverter::new();
    c.bench_function("xml_large", |b| {
        b.iter(|| converter.convert(input.as_bytes()).unwrap());
    });
}

// ============================================================================
// Legacy HTML Benchmarks
// ============================================================================

fn bench_html_fixture(c: &mut Criterion) {
    let converter = HtmlConverter::new();
    c.bench_function("html_fixture", |b| {
        b.iter(|| converter.convert(HTML_BYTES).unwrap());
    });
}

fn bench_html_large(c: &mut Criterion) {
    let input = large_html(200);
    let opaque = HtmlConverter::new();
    let classified =
        HtmlConverter::with_config(HtmlConfig::default().with_segment_mode(SegmentMode::Classified));

    c.bench_function("html_large_opaque", |b| {
        b.iter(|| opaque.convert(input.as_bytes()).unwrap());
    });
    c.bench_function("html_large_classified", |b| {
        b.iter(|| classified.convert(input.as_bytes()).unwrap());
    });
}

fn bench_text_passes(c: &mut Criterion) {
    let input = large_html(200);

    c.bench_function("text_passes", |b| {
        b.iter(|| {
            let text = collapse_blank_lines(&remove_page_breaks(&input));
            extract_toc(&text)
        });
    });
}

criterion_group!(
    benches,
    // XML
    bench_xml_fixture,
    bench_xml_large,
    // Legacy HTML
    bench_html_fixture,
    bench_html_large,
    bench_text_passes,
);
criterion_main!(benches);

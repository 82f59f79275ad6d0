//! End-to-end tests: PDF bytes through extraction, flattening and summarization.

mod common;

use common::{build_pdf, text, words, Text, WordModel};
use pdfbrief::{
    extract_bytes, extract_bytes_with_options, extract_file, flatten, parse_bytes, parse_file,
    summarize_document, ContentBlock, Error, ExtractOptions, GenerationParams, PageSelection,
    PdfBrief, SummarizeOptions,
};

/// A large heading followed by `lines` body lines of 20 words each.
fn report_page(lines: usize) -> Vec<Text> {
    let mut runs = vec![text("Executive Summary", 72, 720, 24)];
    let all = words(lines * 20);
    let all: Vec<&str> = all.split(' ').collect();
    for (i, chunk) in all.chunks(20).enumerate() {
        runs.push(text(&chunk.join(" "), 72, 690 - 14 * i as i64, 11));
    }
    runs
}

fn table_page() -> Vec<Text> {
    vec![
        text("Quarterly Results", 250, 740, 16),
        text("Region", 72, 700, 10),
        text("Revenue", 200, 700, 10),
        text("North", 72, 685, 10),
        text("10M", 200, 685, 10),
        text("South", 72, 670, 10),
        text("12M", 200, 670, 10),
    ]
}

#[test]
fn test_executive_summary_pdf() {
    let pdf = build_pdf(&[report_page(10)]);
    let doc = extract_bytes(&pdf).unwrap();

    assert_eq!(doc.page_count(), 1);
    let content = &doc.pages[0].content;
    assert_eq!(content.len(), 1);
    match &content[0] {
        ContentBlock::Paragraph(p) => {
            assert_eq!(p.section.as_deref(), Some("Executive Summary"));
            assert_eq!(p.text, words(200));
        }
        other => panic!("expected paragraph, got {other:?}"),
    }

    // 200 words is well under the budget: one call, max length floored to 50
    let model = WordModel::new(1024);
    summarize_document(&doc, &model, &SummarizeOptions::default()).unwrap();
    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, GenerationParams::greedy(50, 50));
}

#[test]
fn test_table_page() {
    let pdf = build_pdf(&[table_page()]);
    let doc = extract_bytes(&pdf).unwrap();
    let content = &doc.pages[0].content;

    assert_eq!(content.len(), 2);
    assert!(content[0].is_paragraph());
    match &content[1] {
        ContentBlock::Table(t) => {
            assert_eq!(t.section.as_deref(), Some("Quarterly Results"));
            assert_eq!(t.row_count(), 3);
            assert_eq!(t.rows[0], vec![Some("Region".into()), Some("Revenue".into())]);
            assert_eq!(t.rows[2], vec![Some("South".into()), Some("12M".into())]);
            assert_eq!(t.description, None);
        }
        other => panic!("expected table, got {other:?}"),
    }

    let flat = flatten(&doc);
    assert!(flat.ends_with("Table snippet: Region | Revenue ; North | 10M"));
}

#[test]
fn test_tables_disabled() {
    let pdf = build_pdf(&[table_page()]);
    let doc = extract_bytes_with_options(&pdf, ExtractOptions::new().with_tables(false)).unwrap();
    assert!(doc.pages[0].content.iter().all(|b| b.is_paragraph()));
}

#[test]
fn test_blank_page_has_no_content() {
    let pdf = build_pdf(&[report_page(2), Vec::new()]);
    let doc = extract_bytes(&pdf).unwrap();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[1].page_number, 2);
    assert!(doc.pages[1].content.is_empty());
}

#[test]
fn test_section_carries_to_next_page() {
    let second = vec![text(&words(15), 72, 700, 11)];
    let pdf = build_pdf(&[report_page(2), second]);

    let doc = extract_bytes(&pdf).unwrap();
    assert_eq!(doc.pages[1].content[0].section(), Some("Executive Summary"));

    let doc = extract_bytes_with_options(&pdf, ExtractOptions::new().per_page_sections()).unwrap();
    assert_eq!(doc.pages[1].content[0].section(), None);
}

#[test]
fn test_page_selection() {
    let pdf = build_pdf(&[report_page(1), report_page(1), report_page(1)]);
    let options = ExtractOptions::new().with_pages(PageSelection::parse("2-3").unwrap());
    let doc = extract_bytes_with_options(&pdf, options).unwrap();

    let numbers: Vec<u32> = doc.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![2, 3]);
}

#[test]
fn test_extract_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, build_pdf(&[report_page(3)])).unwrap();

    let doc = extract_file(&path).unwrap();
    assert_eq!(parse_file(&path), Some(doc));
}

#[test]
fn test_broken_input_is_absent() {
    assert!(parse_bytes(b"hello world").is_none());

    let mut truncated = build_pdf(&[report_page(3)]);
    truncated.truncate(40);
    assert!(parse_bytes(&truncated).is_none());

    assert!(matches!(
        extract_bytes(b"%PDF-x.y"),
        Err(Error::UnsupportedVersion(_))
    ));
}

#[test]
fn test_long_document_is_chunked() {
    // 3 pages of 400 words; budget 500 words -> 3 chunks + meta summary
    let pages: Vec<Vec<Text>> = (0..3).map(|_| report_page(20)).collect();
    let pdf = build_pdf(&pages);
    let doc = extract_bytes(&pdf).unwrap();
    let flat = flatten(&doc);
    assert_eq!(flat.lines().count(), 3);

    let model = WordModel::new(500);
    let summary = summarize_document(&doc, &model, &SummarizeOptions::default()).unwrap();

    let calls = model.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls[..3]
        .iter()
        .all(|(_, p)| *p == GenerationParams::greedy(50, 150)));
    assert_eq!(calls[3].1, GenerationParams::greedy(50, 500));
    assert_eq!(summary, calls[3].0.split_whitespace().take(500).collect::<Vec<_>>().join(" "));
}

#[test]
fn test_builder_pipeline() {
    let pdf = build_pdf(&[report_page(5)]);
    let brief = PdfBrief::new().with_min_length(10).extract_bytes(&pdf).unwrap();

    assert_eq!(brief.stats().paragraphs, 1);
    assert_eq!(brief.stats().words, 100);
    assert_eq!(brief.text(), words(100));

    let model = WordModel::new(1024);
    let summary = brief.summarize(&model).unwrap();
    // 100 words * 0.2 = 20 tokens
    assert_eq!(summary.split_whitespace().count(), 20);
}

//! Integration tests for the full normalization pipeline.

use docnorm::{
    normalize_batch, normalize_document, BatchDocument, ConversionStatus, ExtractedDocument,
    NormalizeOptions, PictureRecord, SpanningCell, TableRecord,
};

fn datasheet_markdown() -> String {
    [
        "Preamble before the first heading.",
        "",
        "<!-- image -->",
        "",
        "# 1 Overview",
        "",
        "Electrical limits are listed in Table 1. Timing is covered in",
        "Section 2.1, and the pinout appears in Figure 1.",
        "",
        "```",
        "// code sample mentioning Table 1 must stay unlinked",
        "```",
        "",
        "## Table 1 Absolute Maximum Ratings",
        "",
        "ratings prose",
        "",
        "# 2 Functional Description",
        "",
        "## 2.1 Timing",
        "",
        "timing prose",
        "",
        "## Figure 1 Pinout",
        "",
        "<!-- image -->",
        "",
    ]
    .join("\n")
}

fn datasheet_document() -> ExtractedDocument {
    ExtractedDocument::from_markdown(datasheet_markdown())
        .with_picture(
            PictureRecord::rendered("_images/ds_img_001.png").with_caption("Block diagram"),
        )
        .with_picture(PictureRecord::rendered("_images/ds_img_002.png").on_page(4))
        .with_table(
            TableRecord::new(2, 2)
                .with_cell(SpanningCell::at("Parameter", 0, 0))
                .with_cell(SpanningCell::at("Value", 0, 1))
                .with_cell(SpanningCell::at("VDD", 1, 0))
                .with_cell(SpanningCell::at("3.6 V", 1, 1))
                .on_page(3),
        )
}

#[test]
fn test_end_to_end_normalization() {
    let doc = normalize_document(
        "ds",
        "ds.pdf",
        &datasheet_document(),
        &NormalizeOptions::new(),
    )
    .unwrap();

    // Stage 1: placeholders became image references, in order.
    assert!(doc.markdown.contains("![Block diagram](_images/ds_img_001.png)"));
    assert!(doc.markdown.contains("![ds image 2](_images/ds_img_002.png)"));
    assert!(!doc.markdown.contains("<!-- image -->"));

    // Stage 2: every heading has an anchor marker before it.
    assert!(doc.markdown.contains("<a id=\"1-overview\"></a>\n# 1 Overview"));
    assert!(doc
        .markdown
        .contains("<a id=\"table-1-absolute-maximum-ratings\"></a>"));

    // Stage 3: references resolved against the registry.
    assert!(doc
        .markdown
        .contains("[Table 1](#table-1-absolute-maximum-ratings)"));
    assert!(doc.markdown.contains("[Section 2.1](#2-1-timing)"));
    assert!(doc.markdown.contains("[Figure 1](#figure-1-pinout)"));

    // Stage 3: the fenced code sample is untouched.
    assert!(doc
        .markdown
        .contains("// code sample mentioning Table 1 must stay unlinked"));

    // Stage 4: preamble plus five headings.
    assert_eq!(doc.sections.len(), 6);
    assert_eq!(doc.sections[0].title, "Document Start");
    assert_eq!(doc.sections[0].anchor, "document-start");

    // Stage 6 + meta.
    assert!(doc.tables_markdown.contains("## Table 1 (page 3)"));
    assert!(doc.tables_markdown.contains("| Parameter | Value |"));
    assert_eq!(doc.meta.tables_detected, 1);
    assert_eq!(doc.meta.tables_rendered, 1);
    assert_eq!(doc.meta.images, 2);
    assert_eq!(doc.meta.sections, 6);
    assert_eq!(doc.meta.status, "SUCCESS");
}

#[test]
fn test_anchor_uniqueness_across_document() {
    let markdown = "# Notes\n\na\n\n# Notes\n\nb\n\n# Notes\n\nc\n";
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown(markdown),
        &NormalizeOptions::new(),
    )
    .unwrap();

    let mut anchors: Vec<&str> = doc.sections.iter().map(|s| s.anchor.as_str()).collect();
    assert_eq!(anchors.len(), 3);
    anchors.sort_unstable();
    anchors.dedup();
    assert_eq!(anchors.len(), 3, "anchors must be pairwise distinct");
}

#[test]
fn test_registry_first_writer_wins() {
    let markdown = "# 4.2 Timing\n\nSee Section 4.2 here.\n\n# 4.2 Timing Duplicate\n\nbody\n";
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown(markdown),
        &NormalizeOptions::new(),
    )
    .unwrap();

    // Both headings carry the 4.2 prefix; the topmost one owns the key.
    assert!(doc.markdown.contains("[See Section 4.2](#4-2-timing)"));
}

#[test]
fn test_chunk_determinism() {
    let extracted = datasheet_document();
    let options = NormalizeOptions::new().with_chunk_limits(120, 24);

    let first = normalize_document("ds", "ds.pdf", &extracted, &options).unwrap();
    let second = normalize_document("ds", "ds.pdf", &extracted, &options).unwrap();

    assert_eq!(first.chunks, second.chunks);
    assert!(first.chunks.iter().all(|c| c.char_count == c.text.chars().count()));
}

#[test]
fn test_chunk_ids_follow_section_order() {
    let markdown = format!("# One\n\n{}\n\n# Two\n\nshort\n", "lorem ipsum ".repeat(40));
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown(markdown),
        &NormalizeOptions::new().with_chunk_limits(200, 20),
    )
    .unwrap();

    assert!(doc.chunks.len() > 2, "long section must split");
    assert_eq!(doc.chunks[0].chunk_id, "ds_s001_c001");
    assert_eq!(doc.chunks[1].chunk_id, "ds_s001_c002");
    let last = doc.chunks.last().unwrap();
    assert_eq!(last.chunk_id, "ds_s002_c001");
    assert_eq!(last.section_title, "Two");
}

#[test]
fn test_empty_document_yields_empty_artifacts() {
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown(""),
        &NormalizeOptions::new(),
    )
    .unwrap();

    assert!(doc.sections.is_empty());
    assert!(doc.chunks.is_empty());
    assert_eq!(doc.meta.sections, 0);
    assert!(doc.tables_markdown.contains("(No tables detected.)"));
}

#[test]
fn test_headingless_document_gets_whole_document_section() {
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown("plain content only\n"),
        &NormalizeOptions::new(),
    )
    .unwrap();

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].title, "Document");
    assert_eq!(doc.chunks[0].section_anchor, "document");
}

#[test]
fn test_missing_images_degrade_to_fallbacks() {
    let markdown = "# A\n\n<!-- image -->\n\n<!-- image -->\n";
    let doc = normalize_document(
        "ds",
        "ds.md",
        &ExtractedDocument::from_markdown(markdown),
        &NormalizeOptions::new(),
    )
    .unwrap();

    assert!(doc.markdown.contains("![image_001](#image_001)"));
    assert!(doc.markdown.contains("![image_002](#image_002)"));
    assert_eq!(doc.meta.images, 0);
}

#[test]
fn test_table_fidelity_warning() {
    // A detected table with no markdown table block in the exported text.
    let extracted = ExtractedDocument::from_markdown("# A\n\nno pipe tables here\n")
        .with_table(TableRecord::new(1, 1).with_cell(SpanningCell::at("x", 0, 0)));
    let doc =
        normalize_document("ds", "ds.md", &extracted, &NormalizeOptions::new()).unwrap();

    assert_eq!(doc.meta.tables_detected, 1);
    assert_eq!(doc.meta.table_blocks_in_markdown, 0);
    assert!(doc.meta.warnings.iter().any(|w| w.contains("table fidelity")));
}

#[test]
fn test_batch_parallel_outcomes() {
    let docs = vec![
        BatchDocument::new("alpha", "alpha.pdf", datasheet_document()),
        BatchDocument::new(
            "beta",
            "beta.pdf",
            ExtractedDocument::failed(
                ConversionStatus::Failure,
                vec!["pdfium: bad xref".to_string()],
            ),
        ),
        BatchDocument::new("alpha", "alpha-copy.pdf", datasheet_document()),
    ];

    let outcomes = normalize_batch(&docs, &NormalizeOptions::new()).unwrap();
    assert_eq!(outcomes.len(), 3);

    assert_eq!(outcomes[0].meta().doc_id, "alpha");
    assert_eq!(outcomes[2].meta().doc_id, "alpha_2");

    let failed = outcomes[1].meta();
    assert_eq!(failed.status, "FAILURE");
    assert!(failed
        .warnings
        .iter()
        .any(|w| w.starts_with("PDF backend hint")));

    // Each document owns its registry: identical inputs yield the same
    // structure. Caption-less image alts embed the doc id, so the raw
    // markdown may differ between "alpha" and "alpha_2".
    match (&outcomes[0], &outcomes[2]) {
        (
            docnorm::NormalizeOutcome::Normalized(a),
            docnorm::NormalizeOutcome::Normalized(b),
        ) => {
            let structure = |d: &docnorm::NormalizedDocument| {
                d.sections
                    .iter()
                    .map(|s| (s.title.clone(), s.anchor.clone(), s.level))
                    .collect::<Vec<_>>()
            };
            assert_eq!(structure(a), structure(b));
            assert_eq!(a.chunks.len(), b.chunks.len());
        }
        _ => panic!("expected both alpha documents to normalize"),
    }
}

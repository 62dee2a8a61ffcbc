//! Integration tests for pagination.

use notepager::layout::{pack, PackItem};
use notepager::{
    paginate, paginate_text, parse, Block, Diagnostic, FontMetricsProvider, Notepager,
    PageGeometry, Paginator, TextMetrics,
};

fn long_note(sections: usize) -> String {
    let mut note = String::new();
    for s in 0..sections {
        note.push_str(&format!("## Section {}\n\n", s));
        for p in 0..3 {
            note.push_str(&format!(
                "Paragraph {} of section {} with **some** text that wraps over several lines \
                 once the canvas gets narrow enough to force it.\n\n",
                p, s
            ));
        }
        note.push_str("- first item\n- second item\n\n");
    }
    note
}

#[test]
fn test_blocks_covered_once_in_order() {
    let doc = parse(&long_note(12));
    let pagination = paginate(&doc, &PageGeometry::default());

    assert!(pagination.page_count() > 1);
    let flattened: Vec<&Block> = pagination.blocks().collect();
    let original: Vec<&Block> = doc.iter().collect();
    assert_eq!(flattened, original);
}

#[test]
fn test_pages_fit_unless_forced() {
    let geometry = PageGeometry::default();
    let pagination = paginate_text(&long_note(12), &geometry);

    for page in &pagination.pages {
        assert!(!page.is_empty());
        if page.block_count() > 1 {
            assert!(page.estimated_height <= geometry.available_height());
        }
    }
}

#[test]
fn test_never_returns_no_pages() {
    let geometry = PageGeometry::default();
    for text in ["", "   ", "\n\n\n"] {
        let pagination = paginate_text(text, &geometry);
        assert_eq!(pagination.page_count(), 1);
        assert!(pagination.pages[0].is_empty());
        assert!(!pagination.has_diagnostics());
    }
}

#[test]
fn test_heading_backtracking_example() {
    let items = [
        PackItem::heading(40.0),
        PackItem::body(60.0),
        PackItem::body(60.0),
    ];
    let pages: Vec<Vec<usize>> = pack(&items, 150.0)
        .pages
        .into_iter()
        .map(|p| p.items)
        .collect();
    assert_eq!(pages, vec![vec![0, 1], vec![2]]);

    let pages: Vec<Vec<usize>> = pack(&items, 160.0)
        .pages
        .into_iter()
        .map(|p| p.items)
        .collect();
    assert_eq!(pages, vec![vec![0, 1, 2]]);
}

#[test]
fn test_heading_moves_with_following_content() {
    let items = [
        PackItem::body(100.0),
        PackItem::heading(20.0),
        PackItem::body(20.0),
        PackItem::body(40.0),
    ];
    let packing = pack(&items, 150.0);
    let pages: Vec<Vec<usize>> = packing.pages.iter().map(|p| p.items.clone()).collect();
    assert_eq!(pages, vec![vec![0], vec![1, 2, 3]]);
    assert!(packing.diagnostics.is_empty());
}

#[test]
fn test_oversized_block_forced() {
    let code: String = (0..200).map(|i| format!("line {}\n", i)).collect();
    let note = format!("```\n{}```\n\noutro", code);
    let pagination = paginate_text(&note, &PageGeometry::default());

    assert_eq!(pagination.page_count(), 2);
    assert_eq!(pagination.pages[0].block_count(), 1);
    assert!(matches!(pagination.pages[0].blocks[0], Block::CodeBlock { .. }));
    assert!(pagination.pages[0].estimated_height > PageGeometry::default().available_height());
    assert_eq!(pagination.pages[1].blocks, vec![Block::paragraph("outro")]);
    assert!(pagination
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::OversizedBlock { block: 0, .. })));
}

#[test]
fn test_degenerate_geometry() {
    let geometry = PageGeometry::default().with_padding(50.0, 50.0);
    let pagination = paginate_text("# Title\n\nBody", &geometry);

    assert_eq!(pagination.page_count(), 1);
    assert!(pagination.pages[0].is_empty());
    assert_eq!(pagination.diagnostics.len(), 1);
    assert!(matches!(
        pagination.diagnostics[0],
        Diagnostic::DegenerateGeometry { .. }
    ));
}

#[test]
fn test_smaller_canvas_gives_more_pages() {
    let note = long_note(6);
    let large = paginate_text(&note, &PageGeometry::default().with_size(1080, 1440));
    let small = paginate_text(&note, &PageGeometry::default().with_size(400, 500));
    assert!(small.page_count() > large.page_count());
}

#[test]
fn test_cjk_text_wraps_more_than_latin() {
    let geometry = PageGeometry::default().with_size(300, 2000);
    let latin = "a".repeat(300);
    let cjk = "中".repeat(300);
    let latin_height = paginate_text(&latin, &geometry).pages[0].estimated_height;
    let cjk_height = paginate_text(&cjk, &geometry).pages[0].estimated_height;
    assert!(cjk_height > latin_height);
}

/// Every glyph is half an em wide.
struct HalfEm;

impl FontMetricsProvider for HalfEm {
    fn measure_char(&self, _ch: char, font_size: f32, _font_family: &str) -> f32 {
        font_size * 0.5
    }
}

#[test]
fn test_custom_metrics_provider() {
    let paginator = Paginator::with_metrics(TextMetrics::with_provider(HalfEm));
    let doc = parse(&long_note(8));
    let pagination = paginator.paginate(&doc, &PageGeometry::default());
    assert_eq!(pagination.block_count(), doc.len());
}

#[test]
fn test_builder_paginates_parsed_document() {
    let note = long_note(6);
    let pager = Notepager::new().with_ratio("1:1").unwrap();
    let doc = parse(&note);
    assert_eq!(pager.paginate_document(&doc), pager.paginate(&note));
}

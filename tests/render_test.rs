//! Integration tests for file input and rendering.

use std::io::Write;

use notepager::render::{pagination_to_text, to_html, to_json};
use notepager::{paginate_file, Error, JsonFormat, Notepager, PageGeometry};
use tempfile::NamedTempFile;

fn note_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_paginate_file() {
    let file = note_file("# Title\n\n- **a**\n- b\n");
    let pagination = paginate_file(file.path(), &PageGeometry::default()).unwrap();
    assert_eq!(pagination.page_count(), 1);
    assert_eq!(pagination.block_count(), 2);
}

#[test]
fn test_paginate_missing_file() {
    let result = paginate_file("/nonexistent/notes.md", &PageGeometry::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_builder_from_file() {
    let file = note_file("## One\n\ntext\n");
    let pager = Notepager::new().with_ratio("1:1").unwrap();
    let pagination = pager.paginate_file(file.path()).unwrap();
    let html = pager.to_html(&pagination.pages[0]);
    assert!(html.contains("width: 200px; height: 200px;"));
    assert!(html.contains("<h2 style=\"font-size: 24px;\">One</h2>"));
    assert!(html.contains("<p style=\"font-size: 16px;\">text</p>"));
}

#[test]
fn test_render_outputs_agree() {
    let file = note_file("# T\n\nHello *there*\n\n> quoted\n");
    let geometry = PageGeometry::default();
    let pagination = paginate_file(file.path(), &geometry).unwrap();

    let json = to_json(&pagination, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pages"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));

    let text = pagination_to_text(&pagination);
    assert_eq!(text, "--- Page 1 ---\nT\n\nHello there\n\n> quoted");

    let html = to_html(&pagination.pages[0], &geometry);
    assert!(html.contains("<span class=\"italic\">there</span>"));
    assert!(html.contains("<blockquote style=\"font-size: 16px;\">quoted</blockquote>"));
}

#[test]
fn test_geometry_config_file() {
    let file = note_file(r#"{"width": 1080, "height": 1440, "font_family": "Arial"}"#);
    let json = std::fs::read_to_string(file.path()).unwrap();
    let geometry = PageGeometry::from_json(&json).unwrap();
    assert_eq!(geometry.width, 1080);
    assert_eq!(geometry.font_stack(), "Arial, sans-serif");
}

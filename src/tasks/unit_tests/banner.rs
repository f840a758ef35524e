use crate::{helper::banner, tasks::report::SEPARATOR_WIDTH};

#[test]
fn every_line_has_report_width() {
    let rendered = banner::render();
    for line in rendered.lines() {
        assert_eq!(line.chars().count(), SEPARATOR_WIDTH, "bad line: {line:?}");
    }
}

#[test]
fn shows_version() {
    let rendered = banner::render();
    assert!(rendered.contains(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    assert!(!rendered.contains("working..."));
}

#![no_main]

use changeset_html::render::{DOCUMENT_CLOSE, DOCUMENT_OPEN};
use changeset_html::{RenderOptions, render, render_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    for html in [render(&text), render_with(&text, &RenderOptions::escaped())] {
        assert!(html.starts_with(DOCUMENT_OPEN));
        assert!(html.ends_with(DOCUMENT_CLOSE));
        assert!(!html.contains("  "));
    }
});

#![no_main]

use folio_core::config::FragmentPaths;
use folio_core::fragment::chapter_path;
use folio_core::{Book, ChapterId};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    if token.len() > 256 {
        return;
    }

    let Some(chapter) = ChapterId::parse_token(token) else {
        return;
    };

    // Display is the canonical token.
    assert_eq!(ChapterId::parse_token(&chapter.to_string()), Some(chapter.clone()));

    // Fragment paths stay inside the chapter directory.
    let path = chapter_path(&FragmentPaths::default(), Book::Algorithms, &chapter);
    assert!(path.starts_with("chapters/algorithms/"));
    assert!(path.ends_with(".html"));
    assert!(!path.contains(".."));
    assert_eq!(path.matches('/').count(), 2);
});

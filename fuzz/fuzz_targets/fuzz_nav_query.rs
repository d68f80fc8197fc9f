#![no_main]

use folio_core::query::{encode_search, parse_location, parse_search};
use folio_core::Section;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // Parsing is total and always lands on a known section.
    let state = parse_search(text);
    assert!(Section::ALL.contains(&state.section));

    // Whatever was parsed encodes to something that parses back the same.
    let again = parse_search(&encode_search(state.section, &state.chapter));
    assert_eq!(again, state);

    // Full addresses may be rejected, but never panic.
    if let Ok(state) = parse_location(text) {
        assert!(Section::ALL.contains(&state.section));
    }
});

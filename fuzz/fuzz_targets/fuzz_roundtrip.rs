#![no_main]

use libfuzzer_sys::fuzz_target;
use rechnungsfilter::prelude::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → process → filter → serialize → parse must not panic.
        if let Ok(doc) = parse_document(s) {
            let processed = Processed::from_document(doc);
            let _ = processed.rows();
            let mut selection = processed.selection.clone();
            if !selection.is_empty() {
                let _ = selection.set(0, true);
            }
            if let Ok(filtered) =
                filter_selection(&processed.document, &processed.customers, &selection)
            {
                if let Ok(xml) = to_xml_string(&filtered) {
                    let _ = parse_document(&xml);
                }
            }
        }
    }
});

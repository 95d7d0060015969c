#![no_main]

use libfuzzer_sys::fuzz_target;

use turbo_apply::extractor::extract_job;
use turbo_apply::naming::make_folder_name;

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // The cascade should never panic regardless of input, on any host.
    let _ = extract_job(&html, "www.linkedin.com");
    if let Ok(record) = extract_job(&html, "example.com") {
        let _ = make_folder_name(&record.title, &record.company);
    }
});

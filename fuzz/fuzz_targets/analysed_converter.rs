#![no_main]
use libfuzzer_sys::fuzz_target;
use xmeta::{from_json_slice, to_xml};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = from_json_slice(data) {
        let _ = to_xml(&value, None);
    }
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use xmeta::{from_json_slice, Converter, Meta, Value};

// First line is the data, the rest is the description.
fuzz_target!(|data: &[u8]| {
    let mut parts = data.splitn(2, |&b| b == b'\n');
    let (Some(source), Some(meta)) = (parts.next(), parts.next()) else {
        return;
    };
    let source = from_json_slice(source).unwrap_or(Value::Null);
    if let Ok(meta) = from_json_slice(meta) {
        let _ = Converter::new(&source, Some(Meta::Value(meta)));
    }
});

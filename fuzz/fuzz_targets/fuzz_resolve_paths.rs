#![no_main]

use libfuzzer_sys::fuzz_target;
use rulebook::Value;
use rulebook::primitives::{expand_wildcards, resolve_path, wildcard_form};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between path and JSON value.
    let split = data[0] as usize % data.len().max(1);
    let (path_bytes, value_bytes) = data.split_at(split.min(data.len()));

    let path = String::from_utf8_lossy(path_bytes);

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) {
        let root = Value::from(value);
        let _ = resolve_path(&path, &root);
        for concrete in expand_wildcards(&path, &root) {
            assert!(concrete.split('.').all(|segment| segment != "*"));
            let _ = resolve_path(&wildcard_form(&concrete), &root);
        }
    }
});

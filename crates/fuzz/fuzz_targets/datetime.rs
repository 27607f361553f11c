#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_bridge::DateTime;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(dt) = DateTime::decode(text) else {
        return;
    };
    let formatted = dt.to_string();
    let out = DateTime::decode(&formatted).unwrap();
    assert_eq!(dt, out, "{text:?} formatted as {formatted:?}");
});

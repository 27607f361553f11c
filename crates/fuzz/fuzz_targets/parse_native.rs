#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut value = toml_bridge::parse_native_slice(data);
    std::hint::black_box(&mut value);
});

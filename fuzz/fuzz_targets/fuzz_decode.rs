#![no_main]

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use envbind::{FieldValue, Settings};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    raw: &'a str,
    list_separator: &'a str,
    key_value_separator: &'a str,
    byte_lists: bool,
}

fuzz_target!(|input: Input<'_>| {
    if input.list_separator.is_empty() || input.key_value_separator.is_empty() {
        return;
    }

    let settings = Settings::default()
        .with_list_separator(input.list_separator)
        .with_key_value_separator(input.key_value_separator)
        .with_byte_lists(input.byte_lists);

    // === Every decode returns, successfully or not ===
    let _ = true.decode(input.raw, &settings);
    let _ = 0i8.decode(input.raw, &settings);
    let _ = 0u64.decode(input.raw, &settings);
    let _ = 0f32.decode(input.raw, &settings);
    let _ = String::new().decode(input.raw, &settings);
    let _ = Duration::ZERO.decode(input.raw, &settings);
    let _ = Vec::<u8>::new().decode(input.raw, &settings);
    let _ = Vec::<i32>::new().decode(input.raw, &settings);
    let _ = Vec::<String>::new().decode(input.raw, &settings);
    let _ = HashMap::<String, String>::new().decode(input.raw, &settings);
    let _ = None::<IpAddr>.decode(input.raw, &settings);

    // === Lists split into one element per separator ===
    let mut list: Vec<String> = Vec::new();
    if list.decode(input.raw, &settings).is_ok() && !input.raw.trim().is_empty() {
        assert_eq!(list.len(), input.raw.split(input.list_separator).count());
    }
});

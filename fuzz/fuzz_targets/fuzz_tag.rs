#![no_main]

use libfuzzer_sys::fuzz_target;
use envbind::tag::Tag;

fuzz_target!(|data: (&str, bool, bool)| {
    let (raw, public, structured) = data;
    let tag = Tag::parse(raw);

    // === Accessors never panic ===
    let _ = tag.key();
    let _ = tag.is_required();
    let _ = tag.is_structured();
    let _ = tag.default_value();
    let _ = tag.prefix();

    // === Validation either passes or names the field ===
    if let Err(err) = tag.validate("envvar", "field", public, structured) {
        assert_eq!(err.field_name, "field");
        assert_eq!(err.tag_value, raw);
        let _ = err.to_string();
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use script::{Script, ScriptLimits};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(script) = Script::parse(text, &ScriptLimits::default()) else {
        return;
    };
    let _ = script.check_sequence();
    let _ = script.stats();

    // Anything that parsed must render to text that parses to the same script.
    let rendered = script.to_string();
    let reparsed = Script::parse(&rendered, &ScriptLimits::unlimited())
        .expect("rendered script must parse");
    assert_eq!(reparsed, script);
});

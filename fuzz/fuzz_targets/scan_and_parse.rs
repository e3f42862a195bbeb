#![no_main]

use jsminify::parser::Parser;
use jsminify::settings::Settings;
use libfuzzer_sys::fuzz_target;

// A synthesized replacement token/node is injected for every recoverable
// lexical or syntactic error, so `parse` must never panic no
// matter how malformed `data` is; this is the only property under test here.
fuzz_target!(|data: &str| {
    let settings = Settings::default();
    let parser = Parser::new(0, data, &settings);
    let _ = parser.parse();
});

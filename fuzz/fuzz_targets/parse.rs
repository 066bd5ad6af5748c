#![no_main]

use std::sync::OnceLock;

use controlfile::Registry;
use controlfile::format::format_agenda;
use controlfile::include::InMemoryResolver;
use controlfile::parser::{ParserConfig, parse};
use libfuzzer_sys::fuzz_target;

const MANIFEST: &str = include_str!("../../tests/fixtures/registry.json");

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry::from_json(MANIFEST).expect("fixture manifest is valid"))
}

fn resolver() -> InMemoryResolver {
    InMemoryResolver::new()
        .with_file("setup.arts", include_str!("../../tests/fixtures/includes/setup.arts"))
        .with_file("vectors.arts", include_str!("../../tests/fixtures/includes/vectors.arts"))
        .with_file("self.arts", "INCLUDE \"self.arts\"")
}

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let registry = registry();
    let config = ParserConfig::default().with_max_depth(16);
    let Ok(agenda) = parse("fuzz.arts", source, &registry.methods, &registry.variables, &resolver(), config.clone())
    else {
        return;
    };

    // Parsed strings never hold a quote or a line break, so the canonical
    // text of anything that parses must parse back to the same agenda.
    let printed = format_agenda(&agenda, "Arts", &registry.methods, &registry.variables);
    let reparsed = parse("printed.arts", &printed, &registry.methods, &registry.variables, &resolver(), config)
        .unwrap_or_else(|e| panic!("canonical text failed to parse: {e}\n{printed}"));
    assert!(reparsed.binds_like(&agenda), "round trip changed the agenda:\n{printed}");
});

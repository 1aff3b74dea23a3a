//! ESTree fixture tables shared by the integration suites.

use esz::{ParseOptions, parse, to_estree_json};
use serde::Deserialize;
use serde_json::Value;

/// A source, the options it is parsed with and its full expected ESTree.
#[derive(Debug, Deserialize)]
pub struct EstreeFixture {
    pub source: String,
    #[serde(default)]
    pub options: ParseOptions,
    pub ast: Value,
}

fn load_fixtures(json: &str) -> Vec<EstreeFixture> {
    match serde_json::from_str(json) {
        Ok(fixtures) => fixtures,
        Err(err) => panic!("malformed fixture table: {err}"),
    }
}

/// Parse every fixture and compare the serialized program field for field.
pub fn assert_fixtures(json: &str) {
    let fixtures = load_fixtures(json);
    assert!(!fixtures.is_empty());
    for fixture in &fixtures {
        let program = match parse(&fixture.source, &fixture.options) {
            Ok(program) => program,
            Err(diagnostic) => panic!("{:?} with {:?}: {diagnostic}", fixture.source, fixture.options),
        };
        assert_eq!(
            to_estree_json(&program),
            fixture.ast,
            "{:?} with {:?}",
            fixture.source,
            fixture.options
        );
    }
}

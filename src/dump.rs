//! JSON view of a parsed agenda.
//!
//! Each statement becomes an object with the resolved method name, its generic
//! base when it was reached through resolution, the source position, the bound
//! variable names, and either `keywords` (name to value) or a nested `agenda`.

use serde_json::{Map, Value as Json, json};

use controlfile_core::{MethodRegistry, Value, VariableRegistry};
use controlfile_syntax::ast::{Agenda, Statement, StatementBody};

pub fn agenda_to_json(agenda: &Agenda, methods: &MethodRegistry, variables: &VariableRegistry) -> Json {
    Json::Array(agenda.iter().map(|s| statement_to_json(s, methods, variables)).collect())
}

fn statement_to_json(statement: &Statement, methods: &MethodRegistry, variables: &VariableRegistry) -> Json {
    let descriptor = methods.get(statement.method);
    let names = |ids: &[controlfile_core::VarId]| -> Vec<&str> {
        ids.iter().map(|&id| variables.get(id).name.as_str()).collect()
    };

    let mut object = json!({
        "method": descriptor.name,
        "generic": methods.base_of(statement.method).map(|base| methods.get(base).name.as_str()),
        "position": statement.position.to_string(),
        "outputs": names(&statement.outputs),
        "inputs": names(&statement.inputs),
    });

    if let Json::Object(fields) = &mut object {
        match &statement.body {
            StatementBody::Keywords(values) => {
                let keywords: Map<String, Json> = descriptor
                    .keywords
                    .iter()
                    .zip(values)
                    .map(|(keyword, value)| (keyword.name.clone(), value_to_json(value)))
                    .collect();
                fields.insert("keywords".to_string(), Json::Object(keywords));
            }
            StatementBody::Agenda(agenda) => {
                fields.insert("agenda".to_string(), agenda_to_json(agenda, methods, variables));
            }
        }
    }
    object
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => json!(s),
        Value::Integer(i) => json!(i),
        Value::Float(x) => json!(x),
        Value::StringList(items) => json!(items),
        Value::IntegerList(items) => json!(items),
        Value::FloatList(items) => json!(items),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use controlfile_syntax::include::InMemoryResolver;
    use controlfile_syntax::parser::{ParserConfig, parse};

    use crate::manifest::Registry;

    const MANIFEST: &str = r#"{
        "groups": ["Vector"],
        "variables": [{ "name": "a", "group": "Vector" }, { "name": "b", "group": "Vector" }],
        "methods": [
            { "name": "Arts", "agenda": true },
            { "name": "Loop", "agenda": true },
            { "name": "Copy", "outputs": ["*"], "inputs": ["*"],
              "specializations": [{ "group": "Vector", "outputs": ["Vector"], "inputs": ["Vector"] }] },
            { "name": "Set", "outputs": ["Vector"], "keywords": [
                { "name": "value", "kind": "FloatList" },
                { "name": "tag", "kind": "String", "default": "\"none\"" }
            ] }
        ]
    }"#;

    fn dump(source: &str) -> Json {
        let registry = Registry::from_json(MANIFEST).unwrap();
        let agenda = parse(
            "main.arts",
            source,
            &registry.methods,
            &registry.variables,
            &InMemoryResolver::new(),
            ParserConfig::default(),
        )
        .unwrap();
        agenda_to_json(&agenda, &registry.methods, &registry.variables)
    }

    #[test]
    fn statements_carry_resolution_and_bindings() {
        let json = dump("Arts {\n  Copy(a, b)\n  Set(a) { value = [1, 2.5] }\n}\n");
        assert_eq!(
            json,
            json!([
                {
                    "method": "Copy_Vector",
                    "generic": "Copy",
                    "position": "main.arts:2:3",
                    "outputs": ["a"],
                    "inputs": ["b"],
                    "keywords": {}
                },
                {
                    "method": "Set",
                    "generic": null,
                    "position": "main.arts:3:3",
                    "outputs": ["a"],
                    "inputs": [],
                    "keywords": { "value": [1.0, 2.5], "tag": "none" }
                }
            ])
        );
    }

    #[test]
    fn nested_agendas_nest_in_json() {
        let json = dump("Arts{ Loop{ Copy(b,a) } }");
        assert_eq!(json[0]["method"], "Loop");
        assert_eq!(json[0]["agenda"][0]["method"], "Copy_Vector");
        assert!(json[0].get("keywords").is_none());
    }
}

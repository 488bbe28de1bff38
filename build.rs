use std::fs;

use toml::Value;

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Integer,
    Bool,
}

/// Every key `Config` reads from the bundled file, with the type serde expects.
const KEYS: [(&str, &str, Kind); 8] = [
    ("body", "font", Kind::Text),
    ("body", "size", Kind::Integer),
    ("body", "color", Kind::Text),
    ("heading", "font", Kind::Text),
    ("heading", "size", Kind::Integer),
    ("heading", "color", Kind::Text),
    ("code", "font", Kind::Text),
    ("links", "underline", Kind::Bool),
];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for (section, key, kind) in KEYS {
        let value = table
            .get(section)
            .and_then(Value::as_table)
            .and_then(|t| t.get(key));
        let ok = match (kind, value) {
            (Kind::Text, Some(Value::String(_))) => true,
            (Kind::Integer, Some(Value::Integer(n))) => *n > 0,
            (Kind::Bool, Some(Value::Boolean(_))) => true,
            _ => false,
        };
        if !ok {
            panic!(
                "default_config.toml: [{}] {} is missing or has the wrong type",
                section, key
            );
        }
    }
}

use std::env;
use std::fs;
use std::io::{self, Read};

use formtree::schema::ObjectSchema;
use formtree::session::EditorSession;
use formtree::value::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(schema_path) = args.next() else {
        eprintln!("usage: formtree <schema.yaml> [value.json] < paste.txt");
        eprintln!("Reads pasted text from stdin, folds it onto the value, prints the result.");
        return Ok(());
    };

    let schema: ObjectSchema = serde_yaml::from_str(&fs::read_to_string(&schema_path)?)?;
    let mut session = match args.next() {
        Some(value_path) => {
            let value: Value = serde_json::from_str(&fs::read_to_string(&value_path)?)?;
            EditorSession::with_value(schema, &value)
        }
        None => EditorSession::new(schema),
    };

    let mut pasted = String::new();
    io::stdin().read_to_string(&mut pasted)?;
    if !pasted.trim().is_empty() {
        session.paste(&pasted)?;
    }

    println!("{}", serde_json::to_string_pretty(session.value())?);
    Ok(())
}

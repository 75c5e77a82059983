use builder_api::Response;
use serde_json::Value;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_response_rows(response: &Response) -> Vec<FieldRow> {
    let mut rows = vec![
        row("Session ID", response.session_id.clone()),
        row("Request ID", response.request_id.clone()),
        row("Tree Version", response.tree_version.clone()),
        row("Response Type", response.response_type.clone()),
        row("Description", response.data.description.clone()),
        row("Error Code", response.data.error_code.clone()),
    ];

    let mut vars: Vec<_> = response.data.vars.iter().collect();
    vars.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (name, value) in vars {
        rows.push(row(name, render_value(value)));
    }

    rows
}

fn row(field: &str, value: String) -> FieldRow {
    FieldRow {
        field: field.to_string(),
        value,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// -- Table output --

pub fn print_response_table(response: &Response) {
    println!("{}", Table::new(build_response_rows(response)));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

//! Read-only schema browser pages.

use aura_store::browse::{ColumnInfo, TablePreview};

use super::{escape, layout};

/// Index of every user table with describe/view links.
pub fn index_page(names: &[String]) -> String {
    let mut rows = String::new();
    for name in names {
        let name = escape(name);
        rows.push_str(&format!(
            r#"<tr>
<td>{name}</td>
<td><a href="/describe/{name}">Describe</a></td>
<td><a href="/view/{name}">View rows</a></td>
</tr>
"#
        ));
    }
    let body = format!(
        r#"<h1>Tables</h1>
<table>
<tr><th>Table</th><th></th><th></th></tr>
{rows}</table>
"#
    );
    layout("Tables", &body)
}

/// Column layout of one table.
pub fn describe_page(table: &str, columns: &[ColumnInfo]) -> String {
    let mut rows = String::new();
    for column in columns {
        rows.push_str(&format!(
            r#"<tr>
<td>{name}</td>
<td>{declared}</td>
<td>{not_null}</td>
<td>{pk}</td>
</tr>
"#,
            name = escape(&column.name),
            declared = escape(&column.declared_type),
            not_null = if column.not_null { "Yes" } else { "No" },
            pk = if column.is_primary_key { "Yes" } else { "No" },
        ));
    }
    let table = escape(table);
    let body = format!(
        r#"<h1>Schema: {table}</h1>
<table>
<tr><th>Column</th><th>Type</th><th>Not null</th><th>Primary key</th></tr>
{rows}</table>
<p><a href="/view/{table}">View rows</a> <a href="/tables">Back to tables</a></p>
"#
    );
    layout(&format!("Schema: {table}"), &body)
}

/// Row preview of one table.
pub fn view_page(table: &str, preview: &TablePreview, limit: i64) -> String {
    let header: String = preview
        .columns
        .iter()
        .map(|column| format!("<th>{}</th>", escape(column)))
        .collect();

    let mut rows = String::new();
    for row in &preview.rows {
        rows.push_str("<tr>");
        for value in row {
            rows.push_str(&format!("<td>{}</td>", escape(value)));
        }
        rows.push_str("</tr>\n");
    }

    let table = escape(table);
    let body = format!(
        r#"<h1>Rows: {table}</h1>
<p>Showing up to {limit} rows.</p>
<table>
<tr>{header}</tr>
{rows}</table>
<p><a href="/describe/{table}">Describe</a> <a href="/tables">Back to tables</a></p>
"#
    );
    layout(&format!("Rows: {table}"), &body)
}

//! Shared pages for the four name-only reference kinds.
//!
//! One set of templates covers symptoms, triggers, pain locations, and
//! attack types; [`LookupKind`] supplies the headings and URL base.

use aura_core::LookupItem;
use aura_store::LookupKind;

use super::{escape, layout};

/// Plural page heading for a lookup kind.
pub fn heading(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::AttackType => "Attack types",
        LookupKind::Symptom => "Symptoms",
        LookupKind::Trigger => "Triggers",
        LookupKind::PainLocation => "Pain locations",
    }
}

/// Name-ordered table for one reference kind.
pub fn list_page(kind: LookupKind, items: &[LookupItem]) -> String {
    let base = kind.table();
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            r#"<tr>
<td>{name}</td>
<td><a href="/{base}/{id}/edit">Edit</a>
<form class="inline" method="post" action="/{base}/{id}/delete"><button>Delete</button></form></td>
</tr>
"#,
            name = escape(&item.name),
            id = item.id,
        ));
    }

    let title = heading(kind);
    let body = format!(
        r#"<h1>{title}</h1>
<p><a href="/{base}/new">New {entity}</a></p>
<table>
<tr><th>Name</th><th></th></tr>
{rows}</table>
"#,
        entity = kind.entity(),
    );
    layout(title, &body)
}

/// Create or edit form for one entry of a reference kind.
pub fn form_page(kind: LookupKind, existing: Option<&LookupItem>) -> String {
    let base = kind.table();
    let entity = kind.entity();
    let (title, action, value) = match existing {
        Some(item) => (
            format!("Edit {entity}"),
            format!("/{base}/{}/update", item.id),
            escape(&item.name),
        ),
        None => (
            format!("New {entity}"),
            format!("/{base}/create"),
            String::new(),
        ),
    };

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
<label>Name
<input type="text" name="name" value="{value}" required>
</label>
<p><button type="submit">Save</button></p>
</form>
<p><a href="/{base}">Back</a></p>
"#
    );
    layout(&title, &body)
}

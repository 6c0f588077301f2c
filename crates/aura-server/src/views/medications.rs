//! Medication pages: list plus the create/edit form.

use aura_core::Medication;

use super::{escape, layout};

/// Medications ordered by generic name.
pub fn list_page(medications: &[Medication]) -> String {
    let mut rows = String::new();
    for med in medications {
        let dose = med
            .milligrams
            .map(|mg| format!("{mg}"))
            .unwrap_or_default();
        rows.push_str(&format!(
            r#"<tr>
<td>{name}</td>
<td>{dose}</td>
<td>{route}</td>
<td><a href="/medications/{id}/edit">Edit</a>
<form class="inline" method="post" action="/medications/{id}/delete"><button>Delete</button></form></td>
</tr>
"#,
            name = escape(&med.generic_name),
            route = escape(&med.route),
            id = med.id,
        ));
    }

    let body = format!(
        r#"<h1>Medications</h1>
<p><a href="/medications/new">New medication</a></p>
<table>
<tr><th>Generic name</th><th>mg</th><th>Route</th><th></th></tr>
{rows}</table>
"#
    );
    layout("Medications", &body)
}

/// Create or edit form for a medication.
pub fn form_page(existing: Option<&Medication>) -> String {
    let (title, action) = match existing {
        Some(med) => (
            "Edit medication",
            format!("/medications/{}/update", med.id),
        ),
        None => ("New medication", "/medications/create".to_string()),
    };
    let name = existing
        .map(|med| escape(&med.generic_name))
        .unwrap_or_default();
    let dose = existing
        .and_then(|med| med.milligrams)
        .map(|mg| format!("{mg}"))
        .unwrap_or_default();
    let route = existing.map(|med| escape(&med.route)).unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
<label>Generic name
<input type="text" name="generic_name" value="{name}" required>
</label>
<label>Milligrams
<input type="number" name="milligrams" step="any" min="0" value="{dose}">
</label>
<label>Route
<input type="text" name="route" value="{route}" placeholder="oral, nasal, injection...">
</label>
<p><button type="submit">Save</button></p>
</form>
<p><a href="/medications">Back</a></p>
"#
    );
    layout(title, &body)
}

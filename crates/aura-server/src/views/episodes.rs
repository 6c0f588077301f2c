//! Episode pages: list, detail, and the create/edit form.

use chrono::NaiveDateTime;

use aura_core::{
    Episode, EpisodeDetail, EpisodeEditView, FormOptions, LookupItem, Medication, SelectedIds,
    format_datetime_input,
};

use super::{escape, layout};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

fn display_datetime(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

/// Episode list, newest first.
pub fn list_page(episodes: &[Episode]) -> String {
    let mut rows = String::new();
    for episode in episodes {
        let end = episode
            .end_time
            .as_ref()
            .map(display_datetime)
            .unwrap_or_default();
        rows.push_str(&format!(
            r#"<tr>
<td><a href="/episodes/{id}">{start}</a></td>
<td>{end}</td>
<td>{intensity}</td>
<td>{menses}</td>
<td><a href="/episodes/{id}/edit">Edit</a>
<form class="inline" method="post" action="/episodes/{id}/delete"><button>Delete</button></form></td>
</tr>
"#,
            id = episode.id,
            start = display_datetime(&episode.start_time),
            intensity = episode.intensity,
            menses = if episode.had_menses { "Yes" } else { "No" },
        ));
    }

    let body = format!(
        r#"<h1>Episodes</h1>
<p><a href="/episodes/new">Record an episode</a></p>
<table>
<tr><th>Start</th><th>End</th><th>Intensity</th><th>Menses</th><th></th></tr>
{rows}</table>
"#
    );
    layout("Episodes", &body)
}

/// Single episode with its association sets.
pub fn detail_page(detail: &EpisodeDetail) -> String {
    let episode = &detail.episode;
    let end = episode
        .end_time
        .as_ref()
        .map_or_else(|| "Not recorded".to_string(), display_datetime);
    let attack = detail
        .attack_type
        .as_deref()
        .map_or_else(|| "Not set".to_string(), escape);

    let body = format!(
        r#"<h1>Episode {id}</h1>
<dl>
<dt>Start</dt><dd>{start}</dd>
<dt>End</dt><dd>{end}</dd>
<dt>Intensity</dt><dd>{intensity} / 10</dd>
<dt>Attack type</dt><dd>{attack}</dd>
<dt>Menses</dt><dd>{menses}</dd>
<dt>Notes</dt><dd>{notes}</dd>
<dt>Recorded</dt><dd>{created}</dd>
</dl>
{locations}{symptoms}{triggers}{medications}<p><a href="/episodes/{id}/edit">Edit</a></p>
<form method="post" action="/episodes/{id}/delete"><button>Delete episode</button></form>
<p><a href="/episodes">Back to episodes</a></p>
"#,
        id = episode.id,
        start = display_datetime(&episode.start_time),
        intensity = episode.intensity,
        menses = if episode.had_menses { "Yes" } else { "No" },
        notes = escape(&episode.notes),
        created = display_datetime(&episode.created_at),
        locations = name_list("Pain locations", &detail.pain_locations),
        symptoms = name_list("Symptoms", &detail.symptoms),
        triggers = name_list("Triggers", &detail.triggers),
        medications = name_list("Medications", &detail.medications),
    );
    layout(&format!("Episode {}", episode.id), &body)
}

/// Blank form for recording a new episode.
pub fn new_page(options: &FormOptions) -> String {
    let selected = SelectedIds::default();
    let body = format!(
        "<h1>Record an episode</h1>\n{}",
        form_markup("/episodes/create", "Save episode", None, options, &selected)
    );
    layout("New episode", &body)
}

/// Pre-filled form for an existing episode.
pub fn edit_page(view: &EpisodeEditView) -> String {
    let action = format!("/episodes/{}/update", view.episode.id);
    let body = format!(
        "<h1>Edit episode {}</h1>\n{}",
        view.episode.id,
        form_markup(
            &action,
            "Save changes",
            Some(&view.episode),
            &view.options,
            &view.selected
        )
    );
    layout(&format!("Edit episode {}", view.episode.id), &body)
}

fn name_list(heading: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("<h2>{heading}</h2>\n<p>None recorded</p>\n");
    }
    let items: String = names
        .iter()
        .map(|name| format!("<li>{}</li>\n", escape(name)))
        .collect();
    format!("<h2>{heading}</h2>\n<ul>\n{items}</ul>\n")
}

fn form_markup(
    action: &str,
    submit: &str,
    episode: Option<&Episode>,
    options: &FormOptions,
    selected: &SelectedIds,
) -> String {
    let start = episode
        .map(|e| format_datetime_input(&e.start_time))
        .unwrap_or_default();
    let end = episode
        .and_then(|e| e.end_time.as_ref())
        .map(format_datetime_input)
        .unwrap_or_default();
    let intensity = episode
        .map(|e| e.intensity.to_string())
        .unwrap_or_default();
    let notes = episode.map(|e| escape(&e.notes)).unwrap_or_default();
    let menses_checked = if episode.is_some_and(|e| e.had_menses) {
        " checked"
    } else {
        ""
    };

    format!(
        r#"<form method="post" action="{action}">
<label>Start
<input type="datetime-local" name="start_datetime" value="{start}" required>
</label>
<label>End
<input type="datetime-local" name="end_datetime" value="{end}">
</label>
<label>Intensity (1-10)
<input type="number" name="intensity" min="1" max="10" value="{intensity}" required>
</label>
<label>Attack type
<select name="attack_type_id">
{attack_options}</select>
</label>
<label><input type="checkbox" name="had_menses" value="on"{menses_checked}> Menses during episode</label>
<label>Notes
<textarea name="notes" rows="4" cols="50">{notes}</textarea>
</label>
{locations}{symptoms}{triggers}{medications}<p><button type="submit">{submit}</button></p>
</form>
"#,
        attack_options = attack_type_options(
            &options.attack_types,
            episode.and_then(|e| e.attack_type_id)
        ),
        locations = multi_select(
            "pain_locations",
            "Pain locations",
            &lookup_entries(&options.pain_locations),
            &selected.pain_location_ids
        ),
        symptoms = multi_select(
            "symptoms",
            "Symptoms",
            &lookup_entries(&options.symptoms),
            &selected.symptom_ids
        ),
        triggers = multi_select(
            "triggers",
            "Triggers",
            &lookup_entries(&options.triggers),
            &selected.trigger_ids
        ),
        medications = multi_select(
            "medications",
            "Medications",
            &medication_entries(&options.medications),
            &selected.medication_ids
        ),
    )
}

fn attack_type_options(items: &[LookupItem], selected: Option<i64>) -> String {
    let mut out = String::from("<option value=\"\">(none)</option>\n");
    for item in items {
        let marker = if selected == Some(item.id) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>\n",
            item.id,
            escape(&item.name)
        ));
    }
    out
}

fn multi_select(name: &str, label: &str, entries: &[(i64, String)], selected: &[i64]) -> String {
    let mut options = String::new();
    for (id, text) in entries {
        let marker = if selected.contains(id) { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{id}\"{marker}>{}</option>\n",
            escape(text)
        ));
    }
    let size = entries.len().clamp(3, 8);
    format!(
        "<label>{label}\n<select name=\"{name}\" multiple size=\"{size}\">\n{options}</select>\n</label>\n"
    )
}

fn lookup_entries(items: &[LookupItem]) -> Vec<(i64, String)> {
    items.iter().map(|item| (item.id, item.name.clone())).collect()
}

fn medication_entries(items: &[Medication]) -> Vec<(i64, String)> {
    items.iter().map(|med| (med.id, med.display_label())).collect()
}

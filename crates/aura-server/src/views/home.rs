//! Landing page with summary statistics.

use aura_core::EpisodeStats;

use super::layout;

/// Dashboard with counts and the mean intensity.
pub fn page(stats: &EpisodeStats) -> String {
    let mean = stats
        .mean_intensity
        .map_or_else(|| "N/A".to_string(), |mean| format!("{mean}"));
    let body = format!(
        r#"<h1>Aura</h1>
<p>A personal migraine episode tracker.</p>
<ul>
<li>Total episodes: {total}</li>
<li>Episodes this month: {this_month}</li>
<li>Average intensity: {mean}</li>
</ul>
<p><a href="/episodes/new">Record an episode</a></p>
"#,
        total = stats.total,
        this_month = stats.this_month,
    );
    layout("Home", &body)
}

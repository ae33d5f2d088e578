// crates/pm_report/src/render_html.rs
//
// Self-contained HTML results page (no external assets). Party names and
// colors are user content and go through the template's auto-escaping.

use minijinja::{context, Environment};
use serde::Serialize;

use pm_core::{ElectionOutcome, Party};

use crate::{format_pct_2dp, ReportError};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ title }}</title>
<h1>{{ title }}</h1>
<p>System: {{ system }} | Threshold: {{ threshold }}% | Seats: {{ total_seats }}</p>
<p>Votes cast: {{ votes_cast }} | Valid: {{ valid_votes }} | Spoiled: {{ spoiled }}</p>

<table>
<thead><tr><th>Party</th><th>Votes</th><th>%</th><th>Seats</th></tr></thead>
<tbody>
{% for r in rows %}<tr><td><span style="color: {{ r.color }}">&#9632;</span> {{ r.name }}</td><td>{{ r.votes }}</td><td>{{ r.pct }}</td><td>{{ r.seats }}</td></tr>
{% endfor %}</tbody>
</table>

<p><small>{{ result_id }}</small></p>
</html>
"#;

/// Inputs for the results page.
#[derive(Clone, Copy, Debug)]
pub struct ResultsPage<'a> {
    pub title: &'a str,
    pub outcome: &'a ElectionOutcome,
    /// Used for display names and colors; rows follow `outcome.results`.
    pub parties: &'a [Party],
}

#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    color: &'a str,
    votes: u64,
    pct: String,
    seats: u32,
}

pub fn render_html(page: &ResultsPage<'_>) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("results.html", TEMPLATE)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template("results.html")
        .map_err(|e| ReportError::Template(e.to_string()))?;

    let o = page.outcome;
    let rows: Vec<Row<'_>> = o
        .results
        .iter()
        .map(|r| {
            let party = page.parties.iter().find(|p| p.id == r.party_id);
            Row {
                name: party.map(|p| p.name.as_str()).unwrap_or(r.party_id.as_str()),
                color: party.map(|p| p.color.as_str()).unwrap_or(""),
                votes: r.votes,
                pct: format_pct_2dp(r.percentage),
                seats: r.seats,
            }
        })
        .collect();

    tmpl.render(context! {
        title => page.title,
        system => o.system.label(),
        threshold => o.threshold_pct,
        total_seats => o.total_seats,
        votes_cast => o.votes_cast,
        valid_votes => o.valid_votes,
        spoiled => o.spoiled_ballots,
        rows => rows,
        result_id => &o.result_id,
    })
    .map_err(|e| ReportError::Template(e.to_string()))
}

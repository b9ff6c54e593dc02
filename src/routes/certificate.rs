//! `/api/certificate` route — the completion certificate.
//!
//! Shown only once every location is visited. Without a player name the
//! handler returns the name prompt instead.

use crate::error::TrailError;
use crate::routes::util::{error_fragment, escape_html};
use crate::session::{SessionStore, with_store};
use crate::trail::CertificateData;

// ── GET /api/certificate ───────────────────────────────────────────

/// Handle GET /api/certificate
pub fn handle_certificate_get(_query: &str) -> String {
    with_store(render_certificate)
}

/// Render the certificate, the name prompt, or the "keep exploring" notice.
pub fn render_certificate(store: &SessionStore) -> String {
    match store.certificate() {
        Ok(data) => render_completed(&data),
        Err(TrailError::PlayerNameUnset) => render_name_prompt(),
        Err(TrailError::HuntIncomplete { visited, total }) => format!(
            r#"<div class="p-6 text-center"><p class="font-bold">Keep exploring!</p><p class="text-sm">Visit all {} locations to earn your certificate ({} so far).</p></div>"#,
            total, visited
        ),
        Err(e) => error_fragment(&e.to_string()),
    }
}

fn render_name_prompt() -> String {
    r##"<div class="p-6">
  <h3 class="text-xl font-bold text-center">Enter your name for your official certificate</h3>
  <form hx-post="/api/player/name" hx-target="#modal" hx-swap="innerHTML">
    <input type="text" name="name" placeholder="Your name" maxlength="60" class="w-full border rounded-xl px-4 py-2 my-4">
    <button type="submit" class="w-full py-3 rounded-xl bg-orange-500 text-white font-bold">Get Certificate</button>
  </form>
</div>"##
        .to_string()
}

fn render_completed(data: &CertificateData<'_>) -> String {
    let stats = &data.stats;
    let completed_on = data
        .entries
        .iter()
        .map(|(_, record)| record.timestamp)
        .max()
        .map(|ts| ts.format("%B %-d, %Y").to_string())
        .unwrap_or_default();

    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div class="certificate max-w-2xl w-full bg-white rounded-2xl p-8 text-center">"#);
    html.push_str(r#"<div class="text-5xl">🐯</div>"#);
    html.push_str(r#"<h2 class="text-3xl font-bold">Certificate of Completion</h2>"#);
    html.push_str(r#"<p class="text-sm">This certifies that</p>"#);
    html.push_str(&format!(
        r#"<div class="text-4xl font-bold my-4" data-player-name>{}</div>"#,
        escape_html(data.player_name)
    ));
    let all_photographed = data
        .entries
        .iter()
        .all(|(_, record)| record.photo.is_some());
    html.push_str(&format!(
        r#"<p>has successfully explored all {} legendary locations{}, earning <span class="font-bold">{} points</span>.</p>"#,
        stats.catalog_size,
        if all_photographed {
            ", verified with photographic evidence"
        } else {
            ""
        },
        stats.total_points
    ));

    // Photo mosaic, catalog order
    html.push_str(r#"<div class="grid grid-cols-4 gap-2 my-6">"#);
    for (loc, record) in &data.entries {
        match &record.photo {
            Some(photo) => html.push_str(&format!(
                r#"<div class="aspect-square rounded-lg border-2 bg-cover bg-center" title="{}" style="background-image:url('{}')"></div>"#,
                escape_html(loc.name),
                escape_html(photo.as_str())
            )),
            None => html.push_str(&format!(
                r#"<div class="aspect-square rounded-lg border-2 flex items-center justify-center text-2xl" title="{}">{}</div>"#,
                escape_html(loc.name),
                loc.icon
            )),
        }
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="flex justify-around text-sm">"#);
    html.push_str(&format!(
        r#"<div><div class="font-bold">Locations</div><div>{}</div></div>"#,
        stats.visited_count
    ));
    html.push_str(&format!(
        r#"<div><div class="font-bold">Points</div><div>{}</div></div>"#,
        stats.total_points
    ));
    html.push_str(&format!(
        r#"<div><div class="font-bold">Rank</div><div>{}</div></div>"#,
        stats.tier
    ));
    html.push_str(&format!(
        r#"<div><div class="font-bold">Date</div><div>{}</div></div>"#,
        completed_on
    ));
    html.push_str("</div></div>");
    html
}

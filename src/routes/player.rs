//! `/api/profile` and `/api/player/*` routes — explorer profile, player
//! name, and saved-progress export/import.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::TrailResult;
use crate::routes::certificate::render_certificate;
use crate::routes::util::{error_fragment, escape_html, get_param, parse_form_body};
use crate::session::{SessionStore, with_store, with_store_mut};

// ── GET /api/profile ───────────────────────────────────────────────

/// Handle GET /api/profile
/// Returns tier badge, stats grid, next milestone and achievements.
pub fn handle_profile_get(_query: &str) -> String {
    with_store(render_profile)
}

// ── POST /api/player/name ──────────────────────────────────────────

/// Handle POST /api/player/name
/// Body: name={display name}
/// Sets the certificate name and returns the certificate (or the name
/// prompt again when the name was blank).
pub fn handle_name_post(body: &str) -> String {
    let params = parse_form_body(body);
    let name = get_param(&params, "name").unwrap_or("");
    with_store_mut(|store| store.set_player_name(name));
    with_store(render_certificate)
}

// ── GET /api/player/state ──────────────────────────────────────────

/// Handle GET /api/player/state
/// Returns the saved-progress JSON exactly as stored in localStorage.
pub fn handle_state_get(_query: &str) -> String {
    with_store(|store| store.export_json())
}

// ── GET /api/player/export ─────────────────────────────────────────

/// Handle GET /api/player/export
/// Returns a <script> tag that downloads the saved progress as a
/// URL-safe base64 text file.
pub fn handle_export_get(_query: &str) -> String {
    let state = URL_SAFE_NO_PAD.encode(with_store(|store| store.export_json()));
    format!(
        r#"<script>
(function() {{
  var b = new Blob(['{state}'], {{type: 'text/plain'}});
  var a = document.createElement('a');
  a.href = URL.createObjectURL(b);
  a.download = 'tiger-trails-progress.txt';
  a.click();
  URL.revokeObjectURL(a.href);
}})();
</script>"#,
        state = state
    )
}

// ── POST /api/player/import ────────────────────────────────────────

/// Handle POST /api/player/import
/// Body: state={base64 export} or the raw JSON itself.
pub fn handle_import_post(body: &str) -> String {
    let params;
    let raw = if body.trim_start().starts_with('{') {
        body.trim()
    } else {
        params = parse_form_body(body);
        get_param(&params, "state").unwrap_or(body).trim()
    };
    let result =
        decode_import(raw).and_then(|json| with_store_mut(|store| store.import_json(&json)));
    match result {
        Ok(()) => {
            r#"<span class="text-emerald-600">Progress imported successfully</span>"#.to_string()
        }
        Err(e) => error_fragment(&format!("Import failed: {}", e)),
    }
}

/// Accept either the JSON layout or its URL-safe base64 export.
fn decode_import(raw: &str) -> TrailResult<String> {
    if raw.starts_with('{') {
        return Ok(raw.to_string());
    }
    let bytes = URL_SAFE_NO_PAD.decode(raw)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_profile(store: &SessionStore) -> String {
    let stats = store.stats();
    let mut html = String::with_capacity(4096);

    html.push_str(r#"<div class="profile">"#);
    html.push_str(r#"<div class="text-center"><div class="text-6xl">🐯</div>"#);
    let title = if store.has_player_name() {
        escape_html(store.player_name())
    } else {
        "Campus Explorer".to_string()
    };
    html.push_str(&format!(r#"<h1 class="text-2xl font-bold">{}</h1>"#, title));
    html.push_str(&format!(
        r#"<div class="level-badge">{}</div></div>"#,
        stats.tier
    ));

    html.push_str(r#"<div class="grid grid-cols-3 gap-4 my-4">"#);
    html.push_str(&format!(
        r#"<div class="stat-card"><div>🪙</div><div class="stat-value">{}</div><div class="stat-label">Total Points</div></div>"#,
        stats.total_points
    ));
    html.push_str(&format!(
        r#"<div class="stat-card"><div>📍</div><div class="stat-value">{}/{}</div><div class="stat-label">Locations Visited</div></div>"#,
        stats.visited_count, stats.catalog_size
    ));
    html.push_str(&format!(
        r#"<div class="stat-card"><div>🎯</div><div class="stat-value">{}%</div><div class="stat-label">Completion</div></div>"#,
        stats.completion_percentage.round()
    ));
    html.push_str("</div>");

    if store.is_complete() {
        html.push_str(r#"<p class="progress-text">🎉 You've discovered all locations!</p>"#);
    } else {
        let remaining = stats.remaining();
        html.push_str(&format!(
            r#"<p class="progress-text">{} location{} remaining</p>"#,
            remaining,
            if remaining == 1 { "" } else { "s" }
        ));

        let next = stats.next_milestone;
        html.push_str(r#"<div class="milestone-card"><h2 class="font-bold">Next Milestone</h2>"#);
        html.push_str(&format!(
            r#"<h3>🏆 {}</h3><p>Visit {} more location{} to unlock</p>"#,
            next.tier,
            next.remaining,
            if next.remaining == 1 { "" } else { "s" }
        ));
        html.push_str("</div>");
    }

    html.push_str(r#"<h2 class="font-bold mt-4">Achievements</h2><div class="grid grid-cols-2 gap-2">"#);
    for badge in store.achievements() {
        html.push_str(&format!(
            r#"<div class="achievement {}"><p>{}</p><small>{}</small></div>"#,
            if badge.unlocked { "unlocked" } else { "locked" },
            badge.title,
            badge.description
        ));
    }
    html.push_str("</div></div>");
    html
}

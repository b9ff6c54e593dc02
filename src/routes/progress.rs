//! `/api/progress` routes — the expedition progress card.

use crate::routes::util::escape_html;
use crate::session::{SessionStore, with_store, with_store_mut};

// ── GET /api/progress ──────────────────────────────────────────────

/// Handle GET /api/progress
pub fn handle_progress_get(_query: &str) -> String {
    with_store(render_progress_card)
}

// ── POST /api/player/reset ─────────────────────────────────────────

/// Handle POST /api/player/reset
/// Clears every visit and the player name, then re-renders the card.
pub fn handle_reset_post(_body: &str) -> String {
    with_store_mut(|store| store.reset());
    with_store(render_progress_card)
}

/// Render the progress card from a stats snapshot.
pub fn render_progress_card(store: &SessionStore) -> String {
    let stats = store.stats();
    let mut html = String::with_capacity(2048);

    html.push_str(r#"<div id="progress-card" class="mb-6 p-6 bg-white rounded-2xl shadow-lg">"#);
    html.push_str(r#"<div class="flex justify-between gap-4 mb-4"><div>"#);
    html.push_str(r#"<h2 class="text-xl font-bold">Your Expedition Progress</h2>"#);
    if stats.visited_count == 0 {
        html.push_str(
            r#"<p class="text-sm">Start your adventure! Visit locations and take photos to prove you were there.</p>"#,
        );
    } else {
        html.push_str(&format!(
            r#"<p class="text-sm">{} of {} locations discovered</p>"#,
            stats.visited_count, stats.catalog_size
        ));
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="flex items-center gap-4">"#);
    html.push_str(&format!(
        r#"<div class="text-center"><div class="text-3xl font-bold" data-stat="points">{}</div><div class="text-xs">points earned</div></div>"#,
        stats.total_points
    ));
    html.push_str(&format!(
        r#"<div class="text-center"><div class="text-3xl font-bold" data-stat="visited">{}</div><div class="text-xs">locations</div></div>"#,
        stats.visited_count
    ));
    html.push_str("</div></div>");

    // Progress bar with one marker per location
    html.push_str(r#"<div class="relative h-4 rounded-full overflow-hidden bg-orange-100">"#);
    html.push_str(&format!(
        r#"<div class="absolute inset-y-0 left-0 rounded-full bg-orange-500" style="width:{}%"></div>"#,
        stats.completion_percentage
    ));
    for i in 1..=stats.catalog_size {
        html.push_str(&format!(
            r#"<div class="absolute top-0 bottom-0 w-0.5 bg-white/50" style="left:{}%"></div>"#,
            i as f64 / stats.catalog_size as f64 * 100.0
        ));
    }
    html.push_str("</div>");

    if store.is_complete() {
        html.push_str(
            r##"<button class="mt-4 w-full py-3 px-6 text-white font-bold rounded-xl bg-orange-500" hx-get="/api/certificate" hx-target="#modal" hx-swap="innerHTML">🎉 Congratulations! Claim Your Certificate</button>"##,
        );
    }

    if store.has_player_name() {
        html.push_str(&format!(
            r#"<p class="mt-2 text-xs text-right">Explorer: {}</p>"#,
            escape_html(store.player_name())
        ));
    }

    html.push_str("</div>");
    html
}

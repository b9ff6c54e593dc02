//! Tiger Trails in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the page's JS
//! bridge to call, and `init_session(config)` to open the progress store.
//! Uses `matchit` for URL routing. Responses are HTML fragments for HTMX to
//! swap into the DOM, except the JSON endpoints used by the map widget and
//! for saving progress.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod trail;

/// Open (or re-open) the progress store from a JSON config string.
/// An empty string uses the defaults. Returns "ok" or "error: ...".
#[wasm_bindgen]
pub fn init_session(config_json: &str) -> String {
    match config::StoreConfig::from_json(config_json) {
        Ok(config) => {
            session::init_session(config);
            "ok".to_string()
        }
        Err(e) => format!("error: {}", e),
    }
}

/// Process an HTTP-like request and return a response body.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/locations/blair")
/// * `query`  — Query string (e.g., "?category=Historic")
/// * `body`   — URL-encoded form body. Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/progress", "progress").ok();
    router.insert("/api/locations", "locations").ok();
    router.insert("/api/locations/{id}", "location_detail").ok();
    router.insert("/api/visit", "visit").ok();
    router.insert("/api/unvisit", "unvisit").ok();
    router.insert("/api/profile", "profile").ok();
    router.insert("/api/certificate", "certificate").ok();
    router.insert("/api/map/markers", "map_markers").ok();

    router.insert("/api/player/name", "player_name").ok();
    router.insert("/api/player/state", "player_state").ok();
    router.insert("/api/player/export", "player_export").ok();
    router.insert("/api/player/import", "player_import").ok();
    router.insert("/api/player/reset", "player_reset").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("progress", "GET") => routes::progress::handle_progress_get(query),
            ("locations", "GET") => routes::locations::handle_list_get(query),
            ("location_detail", "GET") => {
                let id = matched.params.get("id").unwrap_or("");
                routes::locations::handle_detail_get(id)
            }
            ("profile", "GET") => routes::player::handle_profile_get(query),
            ("certificate", "GET") => routes::certificate::handle_certificate_get(query),
            ("map_markers", "GET") => routes::map::handle_markers_get(query),
            ("player_state", "GET") => routes::player::handle_state_get(query),
            ("player_export", "GET") => routes::player::handle_export_get(query),

            ("visit", "POST") => routes::locations::handle_visit_post(body),
            ("unvisit", "POST") => routes::locations::handle_unvisit_post(body),
            ("player_name", "POST") => routes::player::handle_name_post(body),
            ("player_import", "POST") => routes::player::handle_import_post(body),
            ("player_reset", "POST") => routes::progress::handle_reset_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-700">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-700">405 — method not allowed</span>"#.to_string()
}

//! `/api/map/markers` route — marker data for the campus map widget.
//!
//! The map library draws tiles and markers on its own. It needs each
//! location's position plus whether (and with what photo) it was visited.
//! Marker clicks come back as `GET /api/locations/{id}`.

use serde::Serialize;

use crate::session::{SessionStore, with_store};

/// Campus center the widget opens on.
pub const MAP_CENTER: [f64; 2] = [40.3431, -74.6551];
pub const MAP_ZOOM: u8 = 16;

#[derive(Debug, Serialize)]
struct MapView<'a> {
    center: [f64; 2],
    zoom: u8,
    markers: Vec<Marker<'a>>,
}

#[derive(Debug, Serialize)]
struct Marker<'a> {
    id: &'a str,
    name: &'a str,
    icon: &'a str,
    lat: f64,
    lng: f64,
    points: u32,
    visited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<&'a str>,
}

// ── GET /api/map/markers ───────────────────────────────────────────

/// Handle GET /api/map/markers
/// Returns the map view as JSON.
pub fn handle_markers_get(_query: &str) -> String {
    with_store(render_markers)
}

fn render_markers(store: &SessionStore) -> String {
    let markers = store
        .catalog()
        .iter()
        .map(|loc| {
            let record = store.visit_record(loc.id);
            Marker {
                id: loc.id,
                name: loc.name,
                icon: loc.icon,
                lat: loc.lat,
                lng: loc.lng,
                points: loc.points,
                visited: record.is_some(),
                photo: record.and_then(|r| r.photo.as_ref()).map(|p| p.as_str()),
            }
        })
        .collect();
    let view = MapView {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        markers,
    };
    serde_json::to_string(&view).unwrap_or_else(|_| r#"{"markers":[]}"#.to_string())
}

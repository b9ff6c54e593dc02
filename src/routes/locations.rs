//! `/api/locations` and `/api/visit` routes — the location list, the detail
//! card and the visit/unvisit actions.
//!
//! Photos are read by the page (FileReader → data URI) and posted as the
//! `photo` form field, percent-encoded. The store never touches image bytes.

use crate::catalog::Location;
use crate::routes::util::{error_fragment, escape_html, get_param, parse_form_body, parse_query};
use crate::session::{SessionStore, with_store, with_store_mut};
use crate::trail::PhotoProof;

// ── GET /api/locations ─────────────────────────────────────────────

/// Handle GET /api/locations?category={name}
/// Returns category filter buttons and the filtered location grid.
pub fn handle_list_get(query: &str) -> String {
    let params = parse_query(query);
    let category = get_param(&params, "category").unwrap_or("All");
    with_store(|store| render_list(store, category))
}

// ── GET /api/locations/{id} ────────────────────────────────────────

/// Handle GET /api/locations/{id}
pub fn handle_detail_get(id: &str) -> String {
    with_store(|store| render_detail(store, id))
}

// ── POST /api/visit ────────────────────────────────────────────────

/// Handle POST /api/visit
/// Body: id={location}&photo={data URI, optional}
/// Returns the re-rendered detail card.
pub fn handle_visit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = get_param(&params, "id").unwrap_or("");
    if id.is_empty() {
        return error_fragment("Missing id parameter");
    }

    let proof = match get_param(&params, "photo") {
        Some(uri) if !uri.trim().is_empty() => match PhotoProof::from_data_uri(uri) {
            Ok(proof) => Some(proof),
            Err(e) => {
                let mut html = error_fragment(&e.to_string());
                html.push_str(&with_store(|store| render_detail(store, id)));
                return html;
            }
        },
        _ => None,
    };

    match with_store_mut(|store| store.visit(id, proof)) {
        Ok(()) => with_store(|store| render_detail(store, id)),
        Err(e) => error_fragment(&e.to_string()),
    }
}

// ── POST /api/unvisit ──────────────────────────────────────────────

/// Handle POST /api/unvisit
/// Body: id={location}
pub fn handle_unvisit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = get_param(&params, "id").unwrap_or("");
    if id.is_empty() {
        return error_fragment("Missing id parameter");
    }
    match with_store_mut(|store| store.unvisit(id)) {
        Ok(_) => with_store(|store| render_detail(store, id)),
        Err(e) => error_fragment(&e.to_string()),
    }
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_list(store: &SessionStore, category: &str) -> String {
    let catalog = store.catalog();
    let mut html = String::with_capacity(8192);

    html.push_str(r#"<div class="locations">"#);
    html.push_str(&format!(
        r#"<p class="text-sm mb-2">Explore {} locations across campus</p>"#,
        catalog.len()
    ));

    // Category filter buttons
    html.push_str(r#"<div class="flex flex-wrap gap-2 mb-4">"#);
    for cat in catalog.categories() {
        let active = cat.eq_ignore_ascii_case(category.trim())
            || (cat == crate::catalog::ALL_CATEGORIES && category.trim().is_empty());
        let class = if active {
            "bg-orange-500 text-white"
        } else {
            "bg-white text-orange-600"
        };
        html.push_str(&format!(
            r##"<button class="px-3 py-1 rounded-full border text-sm {class}" hx-get="/api/locations?category={query}" hx-target="#location-list" hx-swap="innerHTML">{label}</button>"##,
            class = class,
            query = cat.replace(' ', "+"),
            label = escape_html(cat),
        ));
    }
    html.push_str("</div>");

    let locations = catalog.filter_by_category(category);
    if locations.is_empty() {
        html.push_str(r#"<p class="text-sm text-slate-500">No locations in this category.</p>"#);
    }

    html.push_str(r#"<div class="grid md:grid-cols-2 gap-4">"#);
    for loc in locations {
        html.push_str(&render_list_card(store, loc));
    }
    html.push_str("</div></div>");
    html
}

fn render_list_card(store: &SessionStore, loc: &Location) -> String {
    let record = store.visit_record(loc.id);
    let visited = record.is_some();
    let border = if visited { "border-yellow-600" } else { "border-orange-200" };

    let thumb = match record.and_then(|r| r.photo.as_ref()) {
        Some(photo) => format!(
            r#"<img class="w-16 h-16 rounded-xl object-cover" src="{}" alt="">"#,
            escape_html(photo.as_str())
        ),
        None => format!(
            r#"<div class="w-16 h-16 rounded-xl flex items-center justify-center text-3xl bg-orange-50">{}</div>"#,
            loc.icon
        ),
    };

    let badge = match record {
        Some(r) if r.photo.is_some() => "📸 Photo captured".to_string(),
        Some(_) => "✓ Visited".to_string(),
        None => format!("{} pts", loc.points),
    };

    format!(
        r##"<button class="p-4 rounded-2xl text-left bg-white border-2 {border}" data-location="{id}" hx-get="/api/locations/{id}" hx-target="#location-detail" hx-swap="innerHTML">
  <div class="flex items-start gap-4">{thumb}<div class="flex-1">
    <h3 class="font-bold">{name}{check}</h3>
    <p class="text-xs">{category} · {difficulty}</p>
    <p class="text-sm">{hint}</p>
    <span class="text-xs font-bold">{badge}</span>
  </div></div>
</button>"##,
        border = border,
        id = loc.id,
        thumb = thumb,
        name = escape_html(loc.name),
        check = if visited { " ✓" } else { "" },
        category = escape_html(loc.category),
        difficulty = escape_html(loc.difficulty),
        hint = escape_html(loc.hint),
        badge = badge,
    )
}

fn render_detail(store: &SessionStore, id: &str) -> String {
    let loc = match store.catalog().find(id) {
        Some(loc) => loc,
        None => return error_fragment(&format!("Unknown location: {}", id)),
    };
    let record = store.visit_record(id);
    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        r#"<div class="location-detail" data-location="{}">"#,
        loc.id
    ));
    html.push_str(&format!(
        r#"<div class="flex justify-between"><span class="text-5xl">{}</span><span class="font-bold">{} pts</span></div>"#,
        loc.icon, loc.points
    ));
    html.push_str(&format!(
        r#"<h3 class="text-2xl font-bold">{}</h3><p class="text-sm">📍 {}</p>"#,
        escape_html(loc.name),
        escape_html(loc.hint)
    ));
    html.push_str(&format!(
        r#"<h4 class="font-bold mt-4">📖 The Story</h4><p>{}</p>"#,
        escape_html(loc.story)
    ));
    html.push_str(&format!(
        r#"<h4 class="font-bold mt-4">🔮 The Secret</h4><p>{}</p>"#,
        escape_html(loc.secret)
    ));

    match record {
        Some(r) => {
            if let Some(photo) = &r.photo {
                html.push_str(&format!(
                    r#"<img class="mt-4 w-full rounded-xl" src="{}" alt="Your photo at {}">"#,
                    escape_html(photo.as_str()),
                    escape_html(loc.name)
                ));
            }
            html.push_str(&format!(
                r#"<p class="mt-2 text-sm">Visited on {}</p>"#,
                r.timestamp.format("%B %-d, %Y")
            ));
            html.push_str(&format!(
                r##"<div class="flex gap-2 mt-4"><button class="flex-1 py-2 rounded-xl border" data-capture-photo="{id}">📸 Retake Photo</button><button class="flex-1 py-2 rounded-xl border" hx-post="/api/unvisit" hx-vals='{{"id":"{id}"}}' hx-target="#location-detail" hx-swap="innerHTML">Remove Visit</button></div>"##,
                id = loc.id
            ));
        }
        None => {
            html.push_str(&format!(
                r##"<div class="flex gap-2 mt-4"><button class="flex-1 py-2 rounded-xl bg-orange-500 text-white font-bold" data-capture-photo="{id}">📸 Take Photo to Check In</button><button class="flex-1 py-2 rounded-xl border" hx-post="/api/visit" hx-vals='{{"id":"{id}"}}' hx-target="#location-detail" hx-swap="innerHTML">Mark as Visited</button></div>"##,
                id = loc.id
            ));
        }
    }

    html.push_str("</div>");
    html
}

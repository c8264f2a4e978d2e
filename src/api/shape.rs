/// Response shaping
///
/// Records arrive either wrapped (`{ id, attributes: { .. } }`) or flattened
/// (`{ documentId, id, .. }`). Relations may be `null`, a single object, an
/// array, or any of those wrapped in `{ data: .. }`. Everything is normalised
/// here so that a missing relation is simply an empty list.

use serde_json::{Map, Value};

use crate::state::data::{
    Attribute, CatalogKind, CrossReference, Entity, EntityId, EntityRef, FacetKind, FacetValue,
    Header, MediaItem,
};

/// Members of a relation field, whatever its wire shape
pub fn relation(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
        Some(Value::Object(map)) if map.contains_key("data") => relation(map.get("data")),
        Some(object @ Value::Object(_)) => vec![object],
        Some(_) => Vec::new(),
    }
}

/// The field map of a record, unwrapping `attributes` when present
pub fn fields(record: &Value) -> Option<&Map<String, Value>> {
    match record.get("attributes") {
        Some(Value::Object(attributes)) => Some(attributes),
        _ => record.as_object(),
    }
}

/// Record identifier, preferring `documentId` over the numeric `id`
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("documentId").or_else(|| record.get("id"))? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Prefix relative media paths with the media origin
pub fn absolute_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        format!("{}/{}", origin, url)
    }
}

fn media(fields: &Map<String, Value>, key: &str, origin: &str) -> Vec<MediaItem> {
    relation(fields.get(key))
        .into_iter()
        .filter_map(|item| {
            let item = self::fields(item)?;
            let url = text(item, "url")?;
            Some(MediaItem {
                url: absolute_url(origin, &url),
                caption: text(item, "caption"),
            })
        })
        .collect()
}

fn first_media_url(fields: &Map<String, Value>, keys: &[&str], origin: &str) -> Option<String> {
    keys.iter()
        .find_map(|key| media(fields, key, origin).into_iter().next())
        .map(|m| m.url)
}

/// Facet values of a relation field, with icons from `image` or `symbol`
pub fn facet_values(fields: &Map<String, Value>, key: &str, origin: &str) -> Vec<FacetValue> {
    relation(fields.get(key))
        .into_iter()
        .filter_map(|value| facet_value(value, origin))
        .collect()
}

fn facet_value(record: &Value, origin: &str) -> Option<FacetValue> {
    let fields = fields(record)?;
    Some(FacetValue {
        label: text(fields, "name")?,
        icon: first_media_url(fields, &["image", "symbol"], origin),
    })
}

/// Option list of a facet collection response
pub fn facet_options(body: &Value, origin: &str) -> Vec<FacetValue> {
    relation(body.get("data"))
        .into_iter()
        .filter_map(|record| facet_value(record, origin))
        .collect()
}

fn references(fields: &Map<String, Value>, key: &str, kind: CatalogKind, origin: &str) -> Vec<EntityRef> {
    relation(fields.get(key))
        .into_iter()
        .filter_map(|record| {
            let item = self::fields(record)?;
            Some(EntityRef {
                id: EntityId(record_id(record)?),
                kind,
                name: text(item, "name")?,
                thumbnail: first_media_url(item, &["images"], origin),
            })
        })
        .collect()
}

fn joined(values: &[FacetValue]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(|v| v.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

fn facet_fields(kind: CatalogKind) -> &'static [(FacetKind, &'static str)] {
    match kind {
        CatalogKind::Characters => &[
            (FacetKind::Clan, "clan"),
            (FacetKind::Affiliation, "affiliations"),
            (FacetKind::Nature, "nature"),
            (FacetKind::KekkeiGenkai, "kekkei_genkai"),
        ],
        CatalogKind::Abilities => &[
            (FacetKind::Classification, "classification"),
            (FacetKind::Nature, "nature"),
            (FacetKind::KekkeiGenkai, "kekkei_genkai"),
        ],
    }
}

/// Shape one record into an entity; `None` when it lacks an id or a name
pub fn entity(kind: CatalogKind, record: &Value, origin: &str) -> Option<Entity> {
    let id = record_id(record)?;
    let fields = fields(record)?;
    let name = text(fields, "name")?;

    let mut entity = Entity::new(id, kind, name).with_media(media(fields, "images", origin));
    for (facet, key) in facet_fields(kind) {
        entity = entity.with_facet(*facet, facet_values(fields, key, origin));
    }
    entity.alias = text(fields, "alias");
    entity.description = text(fields, "description");

    entity.attributes = match kind {
        CatalogKind::Characters => vec![
            Attribute { label: "Status", value: text(fields, "status") },
            Attribute { label: "Gender", value: text(fields, "gender") },
            Attribute { label: "Occupation", value: text(fields, "occupation") },
            Attribute { label: "Rank", value: text(fields, "ninja_rank") },
            Attribute { label: "Affiliations", value: joined(entity.facet(FacetKind::Affiliation)) },
            Attribute { label: "Clan", value: joined(entity.facet(FacetKind::Clan)) },
        ],
        CatalogKind::Abilities => vec![
            Attribute { label: "Classification", value: joined(entity.facet(FacetKind::Classification)) },
            Attribute { label: "Nature", value: joined(entity.facet(FacetKind::Nature)) },
            Attribute { label: "Class", value: text(fields, "class") },
            Attribute { label: "Rank", value: text(fields, "rank") },
            Attribute { label: "Range", value: text(fields, "range") },
            Attribute { label: "Kekkei Genkai", value: joined(entity.facet(FacetKind::KekkeiGenkai)) },
        ],
    };

    let sections: &[(&str, &str, CatalogKind)] = match kind {
        CatalogKind::Characters => &[("Jutsus", "jutsus", CatalogKind::Abilities)],
        CatalogKind::Abilities => &[
            ("Parent Jutsu", "parent_jutsu", CatalogKind::Abilities),
            ("Derived Jutsu", "derived_jutsu", CatalogKind::Abilities),
            ("Users", "users", CatalogKind::Characters),
        ],
    };
    entity.references = sections
        .iter()
        .map(|(title, key, target)| CrossReference {
            title: (*title).to_owned(),
            entries: references(fields, key, *target, origin),
        })
        .filter(|section| !section.entries.is_empty())
        .collect();

    Some(entity)
}

/// Shape a collection response; malformed records are skipped with a warning
pub fn collection(kind: CatalogKind, body: &Value, origin: &str) -> Result<Vec<Entity>, String> {
    let data = body
        .get("data")
        .ok_or_else(|| "missing `data` field".to_owned())?;

    let records = relation(Some(data));
    let total = records.len();
    let entities: Vec<Entity> = records
        .into_iter()
        .filter_map(|record| entity(kind, record, origin))
        .collect();

    if entities.len() < total {
        log::warn!(
            "Skipped {} malformed {} records",
            total - entities.len(),
            kind
        );
    }
    Ok(entities)
}

/// Shape a single-entity detail response
pub fn detail(kind: CatalogKind, body: &Value, origin: &str) -> Result<Entity, String> {
    let record = relation(body.get("data"))
        .into_iter()
        .next()
        .ok_or_else(|| "missing `data` record".to_owned())?;
    entity(kind, record, origin).ok_or_else(|| "record has no id or name".to_owned())
}

/// Shape the landing page header
pub fn header(body: &Value, origin: &str) -> Result<Header, String> {
    let record = relation(body.get("data"))
        .into_iter()
        .next()
        .ok_or_else(|| "missing `data` record".to_owned())?;
    let fields = fields(record).ok_or_else(|| "header is not an object".to_owned())?;
    Ok(Header {
        title: text(fields, "title").ok_or_else(|| "header has no title".to_owned())?,
        subtitle: text(fields, "subtitle"),
        image: first_media_url(fields, &["image"], origin),
    })
}

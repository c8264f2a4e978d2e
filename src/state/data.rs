/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the fetch layer and the UI layer.

use std::collections::BTreeMap;
use std::fmt;

/// The two browsable catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogKind {
    Characters,
    Abilities,
}

impl CatalogKind {
    /// Facet groups offered by the filter panel for this catalog, in display order
    pub fn facet_kinds(&self) -> &'static [FacetKind] {
        match self {
            CatalogKind::Characters => &[FacetKind::Clan, FacetKind::Affiliation],
            CatalogKind::Abilities => &[
                FacetKind::Classification,
                FacetKind::Nature,
                FacetKind::KekkeiGenkai,
            ],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CatalogKind::Characters => "Characters",
            CatalogKind::Abilities => "Jutsus",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A categorical dimension an entity may belong to zero or more values of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetKind {
    Clan,
    Affiliation,
    Classification,
    Nature,
    KekkeiGenkai,
}

impl FacetKind {
    pub fn title(&self) -> &'static str {
        match self {
            FacetKind::Clan => "Clans",
            FacetKind::Affiliation => "Villages",
            FacetKind::Classification => "Classifications",
            FacetKind::Nature => "Natures",
            FacetKind::KekkeiGenkai => "Kekkei Genkais",
        }
    }
}

/// A labeled category instance, optionally with an icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetValue {
    pub label: String,
    pub icon: Option<String>,
}

impl FacetValue {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon = Some(url.into());
        self
    }
}

/// An image-like resource in an entity's media sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Absolute display URL
    pub url: String,
    pub caption: Option<String>,
}

/// Stable identifier of an entity within a collection snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lightweight pointer to another entity, used for cross-references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: CatalogKind,
    pub name: String,
    /// First media item of the referenced entity, if any
    pub thumbnail: Option<String>,
}

/// A titled group of cross-references (e.g. "Derived Jutsu")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    pub title: String,
    pub entries: Vec<EntityRef>,
}

/// A single labeled attribute shown on the detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub label: &'static str,
    pub value: Option<String>,
}

/// A single catalog record
///
/// Missing facet relationships are always represented as an absent key,
/// never as an empty-but-present list, so `facet()` is the only way to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: CatalogKind,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub facets: BTreeMap<FacetKind, Vec<FacetValue>>,
    /// Display order is array order
    pub media: Vec<MediaItem>,
    pub attributes: Vec<Attribute>,
    pub references: Vec<CrossReference>,
}

impl Entity {
    pub fn new(id: impl Into<String>, kind: CatalogKind, name: impl Into<String>) -> Self {
        Self {
            id: EntityId(id.into()),
            kind,
            name: name.into(),
            alias: None,
            description: None,
            facets: BTreeMap::new(),
            media: Vec::new(),
            attributes: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Values of one facet kind; empty when the entity has no such relationship
    pub fn facet(&self, kind: FacetKind) -> &[FacetValue] {
        self.facets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attach facet values, dropping the kind entirely when there are none
    pub fn with_facet(mut self, kind: FacetKind, values: Vec<FacetValue>) -> Self {
        if values.is_empty() {
            self.facets.remove(&kind);
        } else {
            self.facets.insert(kind, values);
        }
        self
    }

    pub fn with_media(mut self, media: Vec<MediaItem>) -> Self {
        self.media = media;
        self
    }

    /// Icon URLs of every facet value that has one
    pub fn facet_icons(&self) -> impl Iterator<Item = &str> {
        self.facets
            .values()
            .flatten()
            .filter_map(|value| value.icon.as_deref())
    }

    /// Image shown on list cards: the last media item
    pub fn cover(&self) -> Option<&MediaItem> {
        self.media.last()
    }
}

/// Landing page header record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
}

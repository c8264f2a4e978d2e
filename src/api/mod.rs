/// Remote content API
///
/// This module handles:
/// - Fetching collections, details, facet options and the landing header (client.rs)
/// - Shaping JSON responses into catalog entities (shape.rs)

pub mod client;
pub mod shape;

pub use client::CatalogClient;

use thiserror::Error;

use crate::state::data::{CatalogKind, FacetKind};

/// Failure of a remote fetch; cloneable so it can travel inside a `Message`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to fetch {resource}: HTTP {status}")]
    Status { resource: String, status: u16 },
    #[error("failed to fetch {resource}: {message}")]
    Transport { resource: String, message: String },
    #[error("unexpected response for {resource}: {message}")]
    Decode { resource: String, message: String },
}

/// API path of a catalog's full collection
pub fn collection_path(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Characters => "characters?populate=*",
        CatalogKind::Abilities => "jutsus?populate=*&sort=createdAt",
    }
}

/// API path of one entity with its cross-references and media expanded
pub fn detail_path(kind: CatalogKind, id: &str) -> String {
    match kind {
        CatalogKind::Characters => format!(
            "characters/{id}?populate[0]=*&populate[jutsus][populate]=images\
             &populate[clan][populate]=symbol&populate[nature][populate]=image\
             &populate[kekkei_genkai][populate]=image&populate[affiliations]=*&populate[images]=*"
        ),
        CatalogKind::Abilities => format!(
            "jutsus/{id}?populate[0]=*&populate[parent_jutsu][populate]=images\
             &populate[derived_jutsu][populate]=images&populate[classification]=*\
             &populate[nature][populate]=image&populate[kekkei_genkai][populate]=image\
             &populate[users][populate]=images&populate[images]=*"
        ),
    }
}

/// API path of the option list for one facet group
pub fn facet_path(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::Clan => "clans?populate=*",
        FacetKind::Affiliation => "villages?populate=*",
        FacetKind::Classification => "jutsu-types?populate=*",
        FacetKind::Nature => "nature-types?populate=*",
        FacetKind::KekkeiGenkai => "kekkei-genkais?populate=*",
    }
}

pub const HEADER_PATH: &str = "header?populate=*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_path_has_no_line_break_whitespace() {
        let path = detail_path(CatalogKind::Abilities, "7");
        assert!(path.starts_with("jutsus/7?"));
        assert!(!path.contains(char::is_whitespace));
        assert!(path.contains("&populate[users][populate]=images"));
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            resource: "characters".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "failed to fetch characters: HTTP 404");
    }
}

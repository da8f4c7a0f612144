//! Variables sent alongside each page request.
//!
//! The grid only owns the growing `first:` window. Everything else (sorting,
//! filters) is fixed for the lifetime of a grid and forwarded verbatim to the
//! data source.

use derive_setters::Setters;

/// A single GraphQL variable value.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Int(i64),
    String(String),
    Bool(bool),
    Null,
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Option<&str>> for QueryValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

/// Variables for an artist's artworks connection.
#[derive(Clone, Debug, PartialEq, Setters)]
#[setters(into)]
pub struct ArtistArtworksQuery {
    /// Sort order understood by the data source.
    pub sort: String,
    /// Optional artist-page filter, such as `IS_FOR_SALE`.
    #[setters(strip_option)]
    pub filter: Option<String>,
}

impl Default for ArtistArtworksQuery {
    fn default() -> Self {
        Self {
            sort: "partner_updated_at_desc".to_owned(),
            filter: None,
        }
    }
}

/// Variables for a gene's artworks connection. Only works for sale are listed.
#[derive(Clone, Debug, PartialEq, Setters)]
#[setters(into)]
pub struct GeneArtworksQuery {
    pub sort: String,
    pub medium: String,
    pub price_range: String,
}

impl Default for GeneArtworksQuery {
    fn default() -> Self {
        Self {
            sort: "-partner_updated_at".to_owned(),
            medium: "*".to_owned(),
            price_range: "*-*".to_owned(),
        }
    }
}

/// The query behind a grid.
#[derive(Clone, Debug, PartialEq)]
pub enum ArtworksQuery {
    Artist(ArtistArtworksQuery),
    Gene(GeneArtworksQuery),
}

impl Default for ArtworksQuery {
    fn default() -> Self {
        Self::Artist(ArtistArtworksQuery::default())
    }
}

impl From<ArtistArtworksQuery> for ArtworksQuery {
    fn from(query: ArtistArtworksQuery) -> Self {
        Self::Artist(query)
    }
}

impl From<GeneArtworksQuery> for ArtworksQuery {
    fn from(query: GeneArtworksQuery) -> Self {
        Self::Gene(query)
    }
}

impl ArtworksQuery {
    /// Flattens the query into named variables for a window of `total_size`
    /// items.
    pub fn variables(&self, total_size: usize) -> Vec<(&'static str, QueryValue)> {
        let first = QueryValue::Int(i64::try_from(total_size).unwrap_or(i64::MAX));
        match self {
            Self::Artist(query) => vec![
                ("totalSize", first),
                ("sort", query.sort.as_str().into()),
                ("filter", query.filter.as_deref().into()),
            ],
            Self::Gene(query) => vec![
                ("totalSize", first),
                ("sort", query.sort.as_str().into()),
                ("medium", query.medium.as_str().into()),
                ("priceRange", query.price_range.as_str().into()),
                ("forSale", QueryValue::Bool(true)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_variables_carry_window_and_filter() {
        let query = ArtworksQuery::from(ArtistArtworksQuery::default().filter("IS_FOR_SALE"));
        let variables = query.variables(30);
        assert_eq!(
            variables,
            vec![
                ("totalSize", QueryValue::Int(30)),
                ("sort", QueryValue::String("partner_updated_at_desc".into())),
                ("filter", QueryValue::String("IS_FOR_SALE".into())),
            ]
        );
    }

    #[test]
    fn gene_variables_default_to_wildcards_and_for_sale() {
        let variables = ArtworksQuery::from(GeneArtworksQuery::default()).variables(10);
        assert!(variables.contains(&("medium", QueryValue::String("*".into()))));
        assert!(variables.contains(&("priceRange", QueryValue::String("*-*".into()))));
        assert!(variables.contains(&("forSale", QueryValue::Bool(true))));
    }

    #[test]
    fn missing_filter_is_sent_as_null() {
        let variables = ArtworksQuery::default().variables(10);
        assert!(variables.contains(&("filter", QueryValue::Null)));
    }
}

//! Request shapes for the two catalog listings

use crate::types::QueryKey;
use url::Url;

/// Which catalog listing a query key pages through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryShape {
    /// Popular movies, most popular first
    Discover,
    /// Free-text title search
    Search { term: String },
}

impl QueryShape {
    /// Resolve the shape for a key
    pub fn for_key(key: &QueryKey) -> Self {
        match key.term() {
            Some(term) => Self::Search {
                term: term.to_string(),
            },
            None => Self::Discover,
        }
    }

    /// Search term, if this is a search
    pub fn term(&self) -> Option<&str> {
        match self {
            Self::Search { term } => Some(term),
            Self::Discover => None,
        }
    }

    /// URL of one page; `base` must end with a slash
    pub fn endpoint(&self, base: &Url, cursor: u32) -> Result<Url, url::ParseError> {
        let mut url = match self {
            Self::Search { .. } => base.join("search/movie")?,
            Self::Discover => base.join("discover/movie")?,
        };

        {
            let mut query = url.query_pairs_mut();
            match self {
                Self::Search { term } => {
                    query.append_pair("query", term);
                }
                Self::Discover => {
                    query.append_pair("sort_by", "popularity.desc");
                }
            }
            query.append_pair("page", &cursor.to_string());
        }

        Ok(url)
    }
}

use std::fmt;

use crate::catalog::CharacterId;

/// Screen addressed by a path. Unknown paths fall back to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Chat { id: Option<CharacterId> },
}

impl Route {
    pub fn chat(id: CharacterId) -> Self {
        Route::Chat { id: Some(id) }
    }

    /// Accepts `/`, `/chat`, `/chat/<id>` and `/chat?id=<id>`. An id that
    /// does not parse as an integer is treated as absent.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["chat"] => Route::Chat {
                id: query.and_then(query_id),
            },
            ["chat", id] => Route::Chat {
                id: id.parse().ok(),
            },
            _ => Route::Catalog,
        }
    }
}

fn query_id(query: &str) -> Option<CharacterId> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| value.parse().ok())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => write!(f, "/"),
            Route::Chat { id: Some(id) } => write!(f, "/chat/{id}"),
            Route::Chat { id: None } => write!(f, "/chat"),
        }
    }
}

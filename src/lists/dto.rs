use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of per-user lists. Anything else is rejected at the
/// deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Favorites,
    Watched,
}

impl ListType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListType::Favorites => "favorites",
            ListType::Watched => "watched",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for both add-to-list and remove-from-list.
#[derive(Debug, Deserialize)]
pub struct ListEntryRequest {
    pub movie_id: Uuid,
    pub list_type: ListType,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_type_roundtrips_through_json() {
        let t: ListType = serde_json::from_str(r#""favorites""#).unwrap();
        assert_eq!(t, ListType::Favorites);
        assert_eq!(serde_json::to_string(&ListType::Watched).unwrap(), r#""watched""#);
    }

    #[test]
    fn unknown_list_type_is_rejected() {
        assert!(serde_json::from_str::<ListType>(r#""queue""#).is_err());
        assert!(serde_json::from_str::<ListType>(r#""Favorites""#).is_err());
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(ListType::Favorites.to_string(), "favorites");
        assert_eq!(ListType::Watched.to_string(), "watched");
    }
}

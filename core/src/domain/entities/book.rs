//! Book and author entities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Stored as text, as submitted by clients
    #[serde(rename = "priceInPLNgr")]
    pub price_in_pln_gr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithAuthors {
    #[serde(flatten)]
    pub book: Book,
    pub authors: Vec<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub price_in_pln_gr: String,
    pub author_ids: Vec<i32>,
}

/// Partial update of a book. `author_ids`, when present, replaces the author set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub price_in_pln_gr: Option<String>,
    pub author_ids: Option<Vec<i32>>,
}

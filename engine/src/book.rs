//! Book records and their fixed vocabularies.

use crate::{error::Result, BookId, Error};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Genre of a book. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Biography,
    Mystery,
    Thriller,
    Horror,
}

impl Genre {
    /// Every genre, in the order pickers list them.
    pub const ALL: [Genre; 8] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::Mystery,
        Genre::Thriller,
        Genre::Horror,
    ];

    /// Display name, identical to the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Biography => "Biography",
            Genre::Mystery => "Mystery",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::UnknownGenre(s.to_string()))
    }
}

/// Lending status of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Available,
    Issued,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Available, Status::Issued];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Issued => "Issued",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// Publication year.
///
/// Kept as text so leading zeros survive. Values read from the record store
/// are taken as-is; [`Year::parse`] enforces the four-digit rule for input
/// coming from the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(String);

impl Year {
    /// Parse a year that must be exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self> {
        if is_four_digits(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidYear(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        string_or_number(deserializer).map(Year)
    }
}

pub(crate) fn is_four_digits(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Accept either a JSON string or a JSON number, yielding its text.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

/// Like [`string_or_number`], but absent, null or empty values become `None`.
pub(crate) fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) if !s.is_empty() => Some(s),
            Some(StringOrNumber::Number(n)) => Some(n.to_string()),
            _ => None,
        },
    )
}

/// A book record as held by the record store.
///
/// `id` is the sole equality key for the collection and never changes once
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "string_or_number")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub year: Year,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn genre_wire_names() {
        assert_eq!(
            serde_json::to_value(Genre::ScienceFiction).unwrap(),
            json!("Science Fiction")
        );
        assert_eq!(
            serde_json::from_value::<Genre>(json!("Non-Fiction")).unwrap(),
            Genre::NonFiction
        );
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn unknown_genre_and_status() {
        assert_eq!(
            "Poetry".parse::<Genre>(),
            Err(Error::UnknownGenre("Poetry".into()))
        );
        assert_eq!(
            "Lost".parse::<Status>(),
            Err(Error::UnknownStatus("Lost".into()))
        );
    }

    #[test]
    fn year_requires_four_digits() {
        assert!(Year::parse("1965").is_ok());
        assert!(Year::parse("0999").is_ok());
        assert!(Year::parse("965").is_err());
        assert!(Year::parse("19655").is_err());
        assert!(Year::parse("19a5").is_err());
        assert!(Year::parse("").is_err());
        assert!(Year::parse("١٩٦٥").is_err());
    }

    #[test]
    fn reads_numeric_id_and_year() {
        let book: Book = serde_json::from_value(json!({
            "id": 7,
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Science Fiction",
            "year": 1965,
            "status": "Available"
        }))
        .unwrap();

        assert_eq!(book.id, "7");
        assert_eq!(book.year.as_str(), "1965");
        assert_eq!(book.genre, Genre::ScienceFiction);
    }

    #[test]
    fn writes_year_as_text() {
        let book = Book {
            id: "abc".into(),
            title: "Emma".into(),
            author: "Jane Austen".into(),
            genre: Genre::Fiction,
            year: Year::parse("1815").unwrap(),
            status: Status::Issued,
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["year"], json!("1815"));
        assert_eq!(value["status"], json!("Issued"));
    }

    #[test]
    fn ignores_unknown_fields() {
        let book: Book = serde_json::from_value(json!({
            "id": "x1",
            "title": "Dracula",
            "author": "Bram Stoker",
            "genre": "Horror",
            "year": "1897",
            "status": "Issued",
            "shelf": "B4"
        }))
        .unwrap();
        assert_eq!(book.title, "Dracula");
    }
}

use crate::ScoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One normalized classified ad
///
/// Field order is the wire order. Every field has an explicit "not found"
/// sentinel: `""` for text, `0` for numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Permalink of the ad
    pub link: String,

    /// Thumbnail URL
    pub img_link: String,

    /// Posted date as shown by the site (`d.m.yyyy`), not parsed
    pub added: String,

    /// Free-text description
    pub description: String,

    /// Asking price, 0 when missing or not numeric ("Dohodou")
    pub price: u64,

    /// Whatever is left of the price label once the number is removed
    pub currency: String,

    /// Town name
    pub location: String,

    /// Postal code in `NNN NN` form
    pub post_code: String,

    /// View counter
    pub views: u64,
}

/// Names of the [`Listing`] fields, for column projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Link,
    ImgLink,
    Added,
    Description,
    Price,
    Currency,
    Location,
    PostCode,
    Views,
}

impl ListingField {
    /// All fields in wire order
    pub const ALL: [ListingField; 9] = [
        Self::Link,
        Self::ImgLink,
        Self::Added,
        Self::Description,
        Self::Price,
        Self::Currency,
        Self::Location,
        Self::PostCode,
        Self::Views,
    ];

    /// The field's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::ImgLink => "img_link",
            Self::Added => "added",
            Self::Description => "description",
            Self::Price => "price",
            Self::Currency => "currency",
            Self::Location => "location",
            Self::PostCode => "post_code",
            Self::Views => "views",
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingField {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ScoutError::UnknownField(s.to_string()))
    }
}

/// A single field value pulled out of a [`Listing`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(u64),
    Text(String),
}

impl Listing {
    /// Value of one named field
    pub fn get(&self, field: ListingField) -> FieldValue {
        match field {
            ListingField::Link => FieldValue::Text(self.link.clone()),
            ListingField::ImgLink => FieldValue::Text(self.img_link.clone()),
            ListingField::Added => FieldValue::Text(self.added.clone()),
            ListingField::Description => FieldValue::Text(self.description.clone()),
            ListingField::Price => FieldValue::Number(self.price),
            ListingField::Currency => FieldValue::Text(self.currency.clone()),
            ListingField::Location => FieldValue::Text(self.location.clone()),
            ListingField::PostCode => FieldValue::Text(self.post_code.clone()),
            ListingField::Views => FieldValue::Number(self.views),
        }
    }
}

//! Listing extraction
//!
//! Turns one `div.inzeraty.inzeratyflex` container into a [`Listing`]. The
//! markup of the results page is not a stable contract, so each field is
//! looked up independently and a missing element only blanks its own field.

use crate::extract::fields;
use crate::extract::node::Node;
use crate::output::Listing;

/// Heading holding the permalink anchor
const TITLE: &str = "h2";
/// Anchor used both as permalink (under the heading) and image wrapper
const ANCHOR: &str = "a";
/// Thumbnail image inside the first anchor
const THUMBNAIL: &str = "img";
/// First span of the container carries the posted date
const DATE: &str = "span";
const DESCRIPTION: &str = "div.popis";
const PRICE: &str = "div.inzeratycena";
const LOCATION: &str = "div.inzeratylok";
const VIEWS: &str = "div.inzeratyview";

/// Extracts every [`Listing`] field from one listing container
///
/// Never fails: absent sub-elements produce the field's empty/zero value.
pub fn extract_listing<N: Node>(container: &N) -> Listing {
    let permalink = container
        .find_child(TITLE)
        .and_then(|heading| heading.find_child(ANCHOR));
    let thumbnail = container
        .find_child(ANCHOR)
        .and_then(|anchor| anchor.find_child(THUMBNAIL));
    let date = container.find_child(DATE);
    let description = container.find_child(DESCRIPTION);
    let price = container.find_child(PRICE);
    let views = container.find_child(VIEWS);

    let price_text = fields::text(price.as_ref(), "");
    // town and postal code sit in separate fragments split by <br>
    let location_text = fields::text(container.find_child(LOCATION).as_ref(), " ");

    Listing {
        link: fields::attribute(permalink.as_ref(), "href"),
        img_link: fields::attribute(thumbnail.as_ref(), "src"),
        added: fields::date_chars(&fields::text(date.as_ref(), "")),
        description: fields::text(description.as_ref(), ""),
        price: fields::integer(price.as_ref()),
        currency: fields::complement(&price_text),
        location: fields::complement(&location_text),
        post_code: fields::postal_code(&location_text),
        views: fields::integer(views.as_ref()),
    }
}

//! Fixed enumerations offered by the details form. The event-type lists vary
//! with the ticketing structure; venues and industries do not.

use super::domain::TicketingType;

pub const TICKETED_EVENT_TYPES: &[&str] = &[
    "Exhibition",
    "Conference",
    "Conference + Exhibition",
    "Product Launch/Forum/Seminar/Summit",
    "Exhibition/Product Launch + Conference/Forum/Seminar/Summit",
    "Award Ceremony",
    "Award Ceremony + Conference",
    "Award Ceremony + Conference + Exhibition",
    "DJ Event",
    "Musical Event",
    "Comedy Show",
];

pub const NON_TICKETED_EVENT_TYPES: &[&str] = &[
    "Exhibition",
    "Conference/Forum/Meeting/Summit",
    "Conference + Exhibition",
    "Exhibition/Product Launch + Conference/Forum/Seminar/Summit",
    "Award Ceremony",
    "Award Ceremony + Conference",
    "Award Ceremony + Conference + Exhibition",
    "DJ Event",
    "Musical Event",
    "Comedy Show",
];

pub const DUBAI_VENUES: &[&str] = &[
    "Dubai Hotel 1",
    "Dubai Hotel 2",
    "Dubai Convention Center",
    "Emirates Palace",
    "Burj Al Arab",
    "Atlantis The Palm",
];

pub const INDUSTRIES: &[&str] = &[
    "IT & Technology",
    "Healthcare",
    "Finance & Banking",
    "Education",
    "Entertainment",
    "Sports",
    "Real Estate",
    "Automotive",
    "Fashion & Beauty",
    "Food & Beverage",
    "Other",
];

/// The catalog the operator may pick event types from, given the ticketing
/// structure chosen earlier in the conversation.
pub fn event_types_for(ticketing: TicketingType) -> &'static [&'static str] {
    if ticketing.is_ticketed() {
        TICKETED_EVENT_TYPES
    } else {
        NON_TICKETED_EVENT_TYPES
    }
}

pub fn is_known_venue(venue: &str) -> bool {
    DUBAI_VENUES.iter().any(|known| *known == venue)
}

pub fn is_known_industry(industry: &str) -> bool {
    INDUSTRIES.iter().any(|known| *known == industry)
}

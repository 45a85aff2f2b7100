//! Request and URI conventions shared by the registries and resources

/// Prefix of every resource URI
pub const URI_PREFIX: &str = "/ws/rest/v1";

/// Request parameter selecting the representation
pub const REQUEST_PROPERTY_FOR_REPRESENTATION: &str = "v";

/// Request parameter selecting a search handler explicitly
pub const REQUEST_PROPERTY_FOR_SEARCH_ID: &str = "s";

/// Request parameter for the page size
pub const REQUEST_PROPERTY_FOR_LIMIT: &str = "limit";

/// Request parameter for the first result index
pub const REQUEST_PROPERTY_FOR_START_INDEX: &str = "startIndex";

/// Request parameter asking for retired records as well
pub const REQUEST_PROPERTY_FOR_INCLUDE_ALL: &str = "includeAll";

/// Request parameter asking for the total result count
pub const REQUEST_PROPERTY_FOR_TOTAL_COUNT: &str = "totalCount";

/// Parameters that never discriminate between search handlers
pub const SPECIAL_REQUEST_PARAMETERS: [&str; 6] = [
    REQUEST_PROPERTY_FOR_REPRESENTATION,
    REQUEST_PROPERTY_FOR_SEARCH_ID,
    REQUEST_PROPERTY_FOR_LIMIT,
    REQUEST_PROPERTY_FOR_START_INDEX,
    REQUEST_PROPERTY_FOR_INCLUDE_ALL,
    REQUEST_PROPERTY_FOR_TOTAL_COUNT,
];

/// Order given to resources that do not declare one; lower orders win
pub const DEFAULT_ORDER: i32 = i32::MAX;

/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const GENERATE_ROUTE_COMPONENT: &str = "generate";
pub const GENERATE_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", GENERATE_ROUTE_COMPONENT);

pub const VIEW_ROUTE_COMPONENT: &str = "view";
pub const VIEW_ROUTE_PREFIX: &str = const_str::concat!("/", VIEW_ROUTE_COMPONENT);

pub const SUBSCRIBE_ROUTE_COMPONENT: &str = "subscribe";
pub const SUBSCRIBE_ROUTE_PREFIX: &str = const_str::concat!("/", SUBSCRIBE_ROUTE_COMPONENT);

/// File name the sealed-token route serves the rewritten feed under.
pub const CALENDAR_FILE_NAME: &str = "calendar.ics";

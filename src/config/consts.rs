// src/config/consts.rs

// Site layout
pub const AUTHOR_PAGE: &str = "create_collection.html";
pub const COLLECTION_PAGE: &str = "collection.html";
pub const SEARCH_PAGE: &str = "search.html";
pub const RECORD_PATH: &str = "orgs/";
pub const RECORD_PREFIX: &str = "org_";
pub const RECORD_SUFFIX: &str = ".html";
pub const FACET_TABLE_PATH: &str = "js/facets.json";

// Query string
pub const PARAM_TITLE: &str = "collTitle";
pub const PARAM_RECORDS: &str = "records";
pub const ID_SEP: char = ';';
pub const DEFAULT_ID_PATTERN: &str = r"\d+";
pub const PLACEHOLDER_TITLE: &str = "[No title provided]";
pub const MIN_TITLE_CHARS: usize = 3;
pub const SEARCH_RESULTS_TITLE: &str = "Search results";

// DOM contract (element ids)
pub const ID_RECORD_COLLECTION: &str = "recordCollection";
pub const ID_COLLECTION_TITLE: &str = "collectionTitle";
pub const ID_RECORD_IDS: &str = "recordIds";
pub const ID_COLLECTION_LINK: &str = "collectionLink";
pub const ID_COLLECTION_URI: &str = "collectionUri";
pub const ID_SS_RESULTS: &str = "ssResults";
pub const ID_VIEW_AS_COLLECTION: &str = "viewResultsAsCollection";

// DOM contract (markers)
pub const RECORD_CLASS: &str = "org";
pub const COUNTY_FIELDSET: &str = "County";
pub const CITY_FIELDSET: &str = "City";

// Net config
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_PREFIX: &str = "/";
pub const USER_AGENT: &str = "bbti_collect/0.3";
pub const MAX_REDIRECTS: usize = 5;

// Concurrency
pub const MAX_IN_FLIGHT: usize = 8;
pub const FETCH_TIMEOUT_MS: u64 = 15_000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "collection.html";

// Logging
pub const LOG_DIR: &str = ".bbti";
pub const LOG_FILE: &str = "debug.log";

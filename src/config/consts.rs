// src/config/consts.rs

// Domain
pub const DOMAIN: &str = "DTU";

// Net config
pub const ARCHIVE_HOST: &str = "https://kurser.dtu.dk";
pub const GRADES_HOST: &str = "https://karakterer.dtu.dk";
pub const EVALUATION_HOST: &str = "https://evaluering.dtu.dk";
pub const USER_AGENT: &str = "course_scrape/0.1";

// Archive listings are split into one page per initial letter.
pub const ARCHIVE_ALPHABET: [char; 29] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Æ', 'Ø', 'Å',
];

// Time model
pub const MIN_YEAR: u16 = 2000;
pub const MAX_YEAR: u16 = 2059; // two-digit names must stay unique
pub const TIMELESS_NAME: &str = "timeless";
pub const DEFAULT_OLDEST: &str = "F17";
pub const DEFAULT_NEWEST: &str = "F23";

// Identity keys
pub const KEY_SEPARATOR: char = '|';

// Local cache
pub const STORE_DIR: &str = ".store";
pub const RAW_SUBDIR: &str = "raw";
pub const PARSED_SUBDIR: &str = "parsed";
pub const LOG_FILE: &str = "debug.log";

// Retrieval
pub const DEFAULT_WAIT_SECS: u64 = 3;

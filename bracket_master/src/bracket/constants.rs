/// Smallest number of seed slots a bracket can have (a lone final).
pub const MIN_CAPACITY: usize = 2;

/// Maximum roster size for a single tournament.
pub const MAX_COMPETITORS: usize = 16;

/// Maximum number of tournaments kept in one book.
pub const MAX_TOURNAMENTS: usize = 10;

/// Tournament and competitor names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 64;

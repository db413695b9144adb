/// Complaints pending for more than this many whole days are overdue
pub const OVERDUE_AFTER_DAYS: i64 = 7;

/// Milliseconds in one day, the unit "days pending" is floored to
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Maximum accepted complaint photo size (10MB)
pub const MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024;

/// Photo formats accepted for complaint submissions
pub const ALLOWED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Longest complaint title accepted, in characters after trimming
pub const MAX_TITLE_LENGTH: usize = 200;

/// Name shown when a complaint's category or status no longer resolves
pub const UNKNOWN_NAME: &str = "Unknown";

/// Status assigned to new complaints when it exists
pub const DEFAULT_STATUS_NAME: &str = "Pending";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Regular citizen - submits and tracks own complaints
pub const ROLE_USER: &str = "user";

/// Administrator - triages complaints and manages categories/statuses
pub const ROLE_ADMIN: &str = "admin";

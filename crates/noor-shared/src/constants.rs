/// Well-known local storage key holding the serialized submission collection
pub const SUBMISSIONS_KEY: &str = "noorSubmissions";

/// Query parameter asking the remote store for published entries only
pub const PUBLISHED_QUERY: (&str, &str) = ("published", "true");

/// Pseudonym numeric suffix is drawn from `0..PSEUDONYM_NUMBER_RANGE`
pub const PSEUDONYM_NUMBER_RANGE: u32 = 10_000;

/// Shown for anonymous records that somehow lack a pseudonym
pub const ANONYMOUS_FALLBACK: &str = "Anonymous";

/// Shown for named records with an empty name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Prefix every drawing payload must carry (an embedded raster image)
pub const DRAWING_PREFIX: &str = "data:image/";

/// Separator between the media type and the base64 payload of a data URL
pub const BASE64_MARKER: &str = ";base64,";

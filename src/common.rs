// Default URLs
pub static DEFAULT_PRODUCTION_API_URL: &str = "https://api.dwolla.com";
pub static DEFAULT_PRODUCTION_AUTH_URL: &str = "https://www.dwolla.com/oauth/v2/authenticate";
pub static DEFAULT_SANDBOX_API_URL: &str = "https://api-sandbox.dwolla.com";
pub static DEFAULT_SANDBOX_AUTH_URL: &str = "https://sandbox.dwolla.com/oauth/v2/authenticate";

// Header names
pub static IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

// Content types
pub static HAL_CONTENT_TYPE: &str = "application/vnd.dwolla.v1.hal+json";
pub static FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Error codes with special meaning for the transport
pub static EXPIRED_ACCESS_TOKEN_CODE: &str = "ExpiredAccessToken";
pub static VALIDATION_ERROR_CODE: &str = "ValidationError";
pub static TRY_AGAIN_LATER_CODE: &str = "TryAgainLater";
pub static NOT_FOUND_CODE: &str = "NotFound";
pub static UNKNOWN_ERROR_CODE: &str = "UnknownError";

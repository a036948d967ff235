use http::header::HeaderName;

pub const HEADER_AUTH_KEY: HeaderName = HeaderName::from_static("authkey");
pub const HEADER_AUTH_TIME: HeaderName = HeaderName::from_static("authtime");
pub const HEADER_SIGNATURE: HeaderName = HeaderName::from_static("signature");

/// HTTP method baked into every canonical string.
pub const SIGNED_METHOD: &str = "POST";

pub const SHOP_API_PATH: &str = "api/shop";

pub const APPLICATION_JSON: &str = "application/json";

/// Prefix for environment overrides, e.g. `INKYBAY__INKYBAY__SECRET`.
pub const ENV_PREFIX: &str = "INKYBAY";
pub const ENV_SEPARATOR: &str = "__";

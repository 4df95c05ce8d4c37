//! Default values for apiex configuration.

/// Base URL of the Apigee management API.
pub const DEFAULT_APIGEE_URL: &str = "https://apigee.googleapis.com";

/// Base URL of the Apigee console, used for proxy dependency links.
pub const DEFAULT_CONSOLE_URL: &str = "https://console.cloud.google.com/apigee";

/// Environment variable holding the OAuth bearer token for the management API.
pub const TOKEN_ENV_VAR: &str = "APIGEE_TOKEN";

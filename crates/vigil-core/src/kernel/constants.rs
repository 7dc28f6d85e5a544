/// Application name
pub const APP_NAME: &str = "vigil";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Default messenger receiver drained by the consume command
pub const DEFAULT_RECEIVER: &str = "async";

/// Console command driving one bounded consumption cycle
pub const CONSUME_COMMAND: &str = "messenger:consume";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "vigil.yaml";

/// A new line was appended to the followed log file. Payload: the line.
pub const EVENT_LOG_UPDATE: &str = "log:update";

/// The log follower hit an unrecoverable read error. Payload: the error text.
pub const EVENT_LOG_ERROR: &str = "log:error";

/// The theme setting changed. Payload: `dark` or `light`.
pub const EVENT_SETTINGS_THEME: &str = "settings:theme";

//! Resting place for Presentation's [Config]

/// Configuration for the Presentation crate
pub struct Config {

    /// If false, skip replays that failed to be analysed and continue with the generation of the report
    pub stop_on_errors: bool,

    /// If true, logs the analysis failures found on the generation of the report
    pub log_errors: bool,

    /// Indented json (one field per line) or a compact one (one replay per line)
    pub pretty: bool,

}

impl Default for Config {
    fn default() -> Self {
        Self {
            stop_on_errors: false,
            log_errors: true,
            pretty: true,
        }
    }
}

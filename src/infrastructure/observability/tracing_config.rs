/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub const DEFAULT_FILTER: &'static str = "info,lipsync=debug,tower_http=debug";
}

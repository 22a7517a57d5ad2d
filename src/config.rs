use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Length of generated share codes
    #[serde(default = "default_share_code_length")]
    pub share_code_length: usize,

    /// How many collision re-rolls the issuer attempts before giving up
    #[serde(default = "default_share_code_max_attempts")]
    pub share_code_max_attempts: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_share_code_length() -> usize {
    9
}

fn default_share_code_max_attempts() -> u32 {
    16
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            share_code_length: default_share_code_length(),
            share_code_max_attempts: default_share_code_max_attempts(),
        }
    }
}

use anyhow::Result;
use dotenvy::dotenv;

const DEFAULT_PORT: u16 = 3000;
// 10 MB in bytes
const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value '{}': {}", raw, e))?,
            Err(_) => DEFAULT_PORT,
        };

        let max_file_size = match std::env::var("MAX_FILE_SIZE") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid MAX_FILE_SIZE value '{}': {}", raw, e))?,
            Err(_) => DEFAULT_MAX_FILE_SIZE,
        };

        Ok(Config {
            port,
            max_file_size,
        })
    }
}

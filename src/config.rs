/// Server configuration from command-line flags and environment

use clap::Parser;
use std::path::PathBuf;

use crate::query::ROW_LIMIT;
use crate::registry::DatasetRegistry;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATASETS_DIR: &str = "DATASETS_DIR";
pub const ENV_ROW_LIMIT: &str = "ROW_LIMIT";

#[derive(Debug, Clone, Parser)]
#[command(name = "carlist-server")]
#[command(version, about = "Browse and filter vehicle listing datasets", long_about = None)]
pub struct Config {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST, default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT, default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the dataset CSV files
    #[arg(long, short = 'd', env = ENV_DATASETS_DIR, default_value = "datasets")]
    pub datasets_dir: PathBuf,

    /// Maximum rows shown per page
    #[arg(long, env = ENV_ROW_LIMIT, default_value_t = ROW_LIMIT)]
    pub row_limit: usize,
}

impl Config {
    pub fn registry(&self) -> DatasetRegistry {
        DatasetRegistry::bundled(&self.datasets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "carlist-server",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--datasets-dir",
            "/srv/data",
            "--row-limit",
            "10",
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.row_limit, 10);
        assert_eq!(
            config.registry().path("cars.com").unwrap(),
            std::path::Path::new("/srv/data/classified_cars.csv")
        );
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Config::try_parse_from(["carlist-server", "--port", "web"]).is_err());
    }
}

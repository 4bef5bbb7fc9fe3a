use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_toys::mongodb::DEFAULT_COLLECTION;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Collection holding the listings (`MONGODB_COLLECTION`, default `Toys`)
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let app = app_info!();
        let mut mongodb = MongoConfig::from_env()?;

        // Tag driver connections with the service name unless overridden
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            environment,
            server,
            mongodb,
            collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

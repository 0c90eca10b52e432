mod config;
mod locks;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use locks::{EntityGuard, EntityLocks};
pub use repos::{
    DeleteResult, IMemoRepo, IMonitorRepo, IVerificationLogRepo, IVersionedRepo, Page, PageQuery,
    Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct DuewatchContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
    pub locks: EntityLocks,
}

impl DuewatchContext {
    pub fn create(config: Config) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            services: Services::from_config(&config),
            config,
            sys: Arc::new(RealSys {}),
            locks: EntityLocks::new(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> DuewatchContext {
    DuewatchContext::create(Config::new())
}

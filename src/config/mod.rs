//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::DisplayConfig;
pub use site::MenuItem;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::{ENV_CMS_TOKEN, ENV_CMS_URL};

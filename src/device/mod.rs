pub mod config;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod window;

pub(crate) mod buffer;
pub(crate) mod transfer;

#[cfg(test)]
mod test_support;

pub use config::{DEFAULT_RESET, DeviceBuilder, DeviceConfig, DeviceIdentity};
pub use error::{ConfigError, DeviceError, MapError};
pub use lifecycle::Device;
pub use session::{FileSession, SessionOps};
pub use window::{MmioMapper, MmioResource, MmioWindow, RegisterMapper, RegisterWindow};

pub mod prelude {
    pub use super::{
        ConfigError, DEFAULT_RESET, Device, DeviceBuilder, DeviceConfig, DeviceError,
        DeviceIdentity, FileSession, MapError, MmioMapper, MmioResource, MmioWindow,
        RegisterMapper, RegisterWindow, SessionOps,
    };
}

pub mod channel;
pub mod config;
pub mod l10n;
pub mod launch;
pub mod surface;

pub use channel::{
    read_frame, spawn_frame_reader, write_frame, FramedChannel, MemoryChannel, MemoryConnector,
    StdioConnector,
};
pub use config::{ConfigError, DialogConfig};
pub use l10n::CatalogLocalizer;
pub use launch::LaunchParams;
pub use surface::{BannerSlot, SandboxSurface, SurfaceSnapshot};

// src/model/mod.rs

pub mod config;
pub mod diagram;
pub mod kernel;
pub mod listener;
pub mod state;
pub mod statistics;

pub use self::config::DiagramConfig;
pub use self::diagram::{DiagramModel, SyncDiagramModel};
pub use self::kernel::{Kernel, KernelColor};
pub use self::listener::{DiagramListener, ListenerId};
pub use self::state::DiagramState;
pub use self::statistics::DiagramStatistics;

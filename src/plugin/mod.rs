// src/plugin/mod.rs

pub mod events;
pub mod plugin;
pub mod resource;

pub use self::events::{
    ClearDiagramRequest, DiagramClearedEvent, InsertKernelRequest, KernelAddedEvent,
    SetClipRectangleRequest,
};
pub use self::plugin::DiagramPlugin;
pub use self::resource::DiagramResource;

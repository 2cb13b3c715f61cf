//! Provides a Bevy `Plugin` that owns one `DiagramModel` and serialises all
//! mutations onto it.
//!
//! Requests arrive as events; the diagram answers with `KernelAddedEvent` and
//! `DiagramClearedEvent` once the rebuilt meshes are in place.

use super::{
    events::{
        ClearDiagramRequest, DiagramClearedEvent, InsertKernelRequest, KernelAddedEvent,
        SetClipRectangleRequest,
    },
    resource::DiagramResource,
};
use crate::{
    math::error::MathResult,
    model::{DiagramConfig, SyncDiagramModel},
};
use bevy::prelude::*;

/// A Bevy `Plugin` responsible for the global `DiagramResource`.
///
/// This plugin performs the following actions:
/// - Inserts the `DiagramResource` built from the validated config.
/// - Registers the request and notification events.
/// - Adds a system (`diagram_request_handler`) that applies requests in a fixed
///   order per frame: clears, then clip rectangle changes, then insertions.
pub struct DiagramPlugin {
    config: DiagramConfig,
}

impl DiagramPlugin {
    pub fn new(config: DiagramConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Plugin for DiagramPlugin {
    fn build(&self, app: &mut App) {
        let model = match SyncDiagramModel::with_config(self.config.clone()) {
            Ok(model) => model,
            Err(err) => {
                error!("DiagramPlugin could not create the diagram: {}", err);
                return;
            }
        };

        app.insert_resource(DiagramResource(model))
            .add_event::<InsertKernelRequest>()
            .add_event::<ClearDiagramRequest>()
            .add_event::<SetClipRectangleRequest>()
            .add_event::<KernelAddedEvent>()
            .add_event::<DiagramClearedEvent>()
            .add_systems(Update, diagram_request_handler);
    }
}

/// Applies all pending requests to the `DiagramResource`.
///
/// Failed requests are logged and dropped; the diagram keeps its last
/// consistent state and no notification is sent for them.
fn diagram_request_handler(
    mut diagram: ResMut<DiagramResource>,
    mut clear_requests: EventReader<ClearDiagramRequest>,
    mut clip_requests: EventReader<SetClipRectangleRequest>,
    mut insert_requests: EventReader<InsertKernelRequest>,
    mut kernel_added: EventWriter<KernelAddedEvent>,
    mut cleared: EventWriter<DiagramClearedEvent>,
) {
    for _ in clear_requests.read() {
        diagram.clear();
        cleared.send(DiagramClearedEvent);
    }

    for request in clip_requests.read() {
        if let Err(err) = diagram.set_clip_rectangle(request.corners) {
            warn!("Clip rectangle request rejected: {}", err);
        }
    }

    for request in insert_requests.read() {
        match diagram.insert(request.x, request.y) {
            Ok(point) => {
                kernel_added.send(KernelAddedEvent { point });
            }
            Err(err) => warn!(
                "Insert request at ({}, {}) rejected: {}",
                request.x, request.y, err
            ),
        }
    }
}

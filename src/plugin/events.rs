// src/plugin/events.rs

use crate::math::types::Point;
use bevy::prelude::*;

/// Anfrage: Kernel an `(x, y)` einfügen
#[derive(Event, Debug, Clone, Copy)]
pub struct InsertKernelRequest {
    pub x: f64,
    pub y: f64,
}

/// Anfrage: Diagramm leeren
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearDiagramRequest;

/// Anfrage: Clip-Rechteck setzen
#[derive(Event, Debug, Clone, Copy)]
pub struct SetClipRectangleRequest {
    pub corners: [Point; 4],
}

/// Ein Kernel wurde eingefügt, beide Meshes sind neu aufgebaut
#[derive(Event, Debug, Clone, Copy)]
pub struct KernelAddedEvent {
    pub point: Point,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DiagramClearedEvent;

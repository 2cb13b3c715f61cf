// src/plugin/resource.rs

use crate::model::SyncDiagramModel;
use bevy::prelude::*;

/// Das eine Diagramm der App. Alle Mutationen laufen über das Request-System
/// des [`DiagramPlugin`](super::DiagramPlugin); andere Systeme lesen nur.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct DiagramResource(pub SyncDiagramModel);

// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("No clip rectangle set, cannot build bounded cells for {kernel_count} kernel(s)")]
    MissingClipRectangle { kernel_count: usize },

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("Coordinates must be finite, got ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

pub type MathResult<T> = Result<T, MathError>;

// src/model/state.rs

use std::fmt;

/// Zustand eines Diagramms, abgeleitet aus der Anzahl der Kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramState {
    /// Keine Kernel
    Empty,
    /// 1-2 Kernel, Zellen aus den Sonderfällen
    Partial,
    /// Ab 3 Kerneln, allgemeiner Algorithmus
    Full,
}

impl DiagramState {
    pub fn from_kernel_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 | 2 => Self::Partial,
            _ => Self::Full,
        }
    }
}

impl fmt::Display for DiagramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Partial => "partial",
            Self::Full => "full",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kernel_count() {
        assert_eq!(DiagramState::from_kernel_count(0), DiagramState::Empty);
        assert_eq!(DiagramState::from_kernel_count(2), DiagramState::Partial);
        assert_eq!(DiagramState::from_kernel_count(3), DiagramState::Full);
    }
}

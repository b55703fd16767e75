//! Membership-change batch delivered by the external discovery.

use crate::backend::Kind;

/// One batch of membership changes for a single resource kind.
///
/// Names are canonical, fully-qualified bus names. A batch may carry any mix
/// of appeared and vanished names, including none of either.
#[derive(Clone, Debug)]
pub struct GraphBatch {
    /// Resource kind the batch applies to.
    pub kind: Kind,
    /// Names that newly appeared on the bus.
    pub appeared: Vec<String>,
    /// Names that vanished from the bus.
    pub vanished: Vec<String>,
}

impl GraphBatch {
    /// Creates a batch from both change lists.
    pub fn new(kind: Kind, appeared: Vec<String>, vanished: Vec<String>) -> Self {
        Self {
            kind,
            appeared,
            vanished,
        }
    }

    /// Convenience: a batch of appearances only.
    #[inline]
    pub fn appeared(kind: Kind, names: Vec<String>) -> Self {
        Self::new(kind, names, Vec::new())
    }

    /// Convenience: a batch of disappearances only.
    #[inline]
    pub fn vanished(kind: Kind, names: Vec<String>) -> Self {
        Self::new(kind, Vec::new(), names)
    }
}

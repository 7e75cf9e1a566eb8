//! Error types for classifying authored characters

use thiserror::Error;

use crate::assembly::types::PartType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Group '{group}' in character '{character}' has unknown label '{label}'")]
    UnknownLabel {
        character: String,
        group: String,
        label: String,
    },

    #[error("Part '{group}' in character '{character}' has no '{part_type}' attachment marker")]
    MissingAttachment {
        character: String,
        group: String,
        part_type: PartType,
    },
}

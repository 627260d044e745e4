use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid command format.")]
    invalid_format,

    #[error("Invalid variable name '{0}'.")]
    invalid_identifier(String),

    #[error("Vector '{0}' not found.")]
    not_found(char),

    #[error("One or both vectors not found for addition.")]
    addition_operands,

    #[error("One or both vectors not found for subtraction.")]
    subtraction_operands,

    #[error("Invalid scalar multiplication format.")]
    scaling_format,

    #[error("Invalid vectors for dot product.")]
    dot_operands,

    #[error("Invalid vectors for cross product.")]
    cross_operands,

    #[error("Unknown operator '{0}'.")]
    unknown_operator(String),

    #[error("Maximum number of vectors reached.")]
    capacity_exceeded,

    #[error("Missing filename for {0} command.")]
    missing_filename(&'static str),

    #[error("Could not open file '{}' for reading.", path.display())]
    file_unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open file '{}' for writing.", path.display())]
    file_unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read file '{}'; vectors left unchanged.", path.display())]
    read_failed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Skipping malformed line {line}: '{content}'")]
    malformed_record { line: usize, content: String },
}

pub type Result<T> = std::result::Result<T, CalcError>;

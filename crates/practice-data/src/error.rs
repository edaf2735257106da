//! Error types for the practice-data crate.

use thiserror::Error;

/// Errors raised while parsing or validating a practice registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry lists no patients.
    #[error("registry contains no patients")]
    EmptyPatients,

    /// A patient identifier is blank.
    #[error("patient at index {index} has an empty id")]
    EmptyPatientId {
        /// Index of the offending patient.
        index: usize,
    },

    /// Two patients share an identifier.
    #[error("duplicate patient id '{id}'")]
    DuplicatePatientId {
        /// The repeated identifier.
        id: String,
    },

    /// An appointment or record references a patient that does not exist.
    #[error("{owner} '{owner_id}' references unknown patient '{patient_id}'")]
    UnknownPatient {
        /// Kind of the referencing entry (`appointment` or `record`).
        owner: &'static str,
        /// Identifier of the referencing entry.
        owner_id: String,
        /// The unresolved patient identifier.
        patient_id: String,
    },

    /// A percentage field falls outside `0..=100`.
    #[error("{field} for '{id}' must be within 0..=100, found {value}")]
    PercentageOutOfRange {
        /// Field name (`progress` or `successRate`).
        field: &'static str,
        /// Identifier of the offending entry.
        id: String,
        /// The rejected value.
        value: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_patient_formats_owner_and_ids() {
        let err = RegistryError::UnknownPatient {
            owner: "appointment",
            owner_id: "7".to_owned(),
            patient_id: "42".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "appointment '7' references unknown patient '42'"
        );
    }

    #[test]
    fn percentage_error_names_field() {
        let err = RegistryError::PercentageOutOfRange {
            field: "successRate",
            id: "3".to_owned(),
            value: 140,
        };
        assert_eq!(
            err.to_string(),
            "successRate for '3' must be within 0..=100, found 140"
        );
    }
}

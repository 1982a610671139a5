//! The closed registry of coded, user-facing errors.
//!
//! Every failure the gate reports to a caller resolves to exactly one
//! [`ResponseError`]. Codes are stable and are what callers match on; the
//! messages are static and never carry request data, key material or
//! internal detail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad class of a [`ResponseError`], used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Unexpected failure inside the service (5xx-class).
    Internal,
    /// Caller is not allowed to perform the operation (403-class).
    Forbidden,
    /// Request failed basic structural checks (400-class).
    InputMalformed,
    /// A required signer is missing or its signature does not verify.
    SignatureInvalid,
}

/// A registered (code, message) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseError {
    /// Unexpected failure; details are only logged server-side.
    Internal,
    /// The caller lacks access to the operation.
    Forbidden,
    /// The request body is not valid JSON or not a signed card.
    RequestBodyInvalid,
    /// The content snapshot does not describe a well-formed card or revocation.
    ContentSnapshotInvalid,
    /// A revocation snapshot names a different card than the one addressed.
    CardIdMismatch,
    /// A required signature is missing or does not verify.
    ///
    /// Missing and invalid signatures deliberately share this code.
    SignatureValidationFailed,
}

impl ResponseError {
    /// Every registered error, in code order.
    pub const ALL: [ResponseError; 6] = [
        ResponseError::Internal,
        ResponseError::Forbidden,
        ResponseError::RequestBodyInvalid,
        ResponseError::ContentSnapshotInvalid,
        ResponseError::CardIdMismatch,
        ResponseError::SignatureValidationFailed,
    ];

    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Internal => 10000,
            Self::Forbidden => 20300,
            Self::RequestBodyInvalid => 30000,
            Self::ContentSnapshotInvalid => 30107,
            Self::CardIdMismatch => 30108,
            Self::SignatureValidationFailed => 30137,
        }
    }

    /// Static human-readable message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Internal => "Internal application error",
            Self::Forbidden => "Access to the requested operation is denied",
            Self::RequestBodyInvalid => "JSON specified as a request body is invalid",
            Self::ContentSnapshotInvalid => "Card content snapshot is malformed",
            Self::CardIdMismatch => "Card id does not match the revocation content snapshot",
            Self::SignatureValidationFailed => "Card signature validation failed",
        }
    }

    /// Class used by transports to map the error onto a status.
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::Internal => ErrorClass::Internal,
            Self::Forbidden => ErrorClass::Forbidden,
            Self::RequestBodyInvalid | Self::ContentSnapshotInvalid | Self::CardIdMismatch => {
                ErrorClass::InputMalformed
            }
            Self::SignatureValidationFailed => ErrorClass::SignatureInvalid,
        }
    }

    /// Look up a registered error by its code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    /// Serializable payload for this error.
    #[must_use]
    pub fn body(self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.message().to_owned(),
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for ResponseError {}

/// Wire form of a [`ResponseError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Registered error code.
    pub code: u32,
    /// Registered message.
    pub message: String,
}

//! Error handling for the ATT server core
use super::constants::*;
use thiserror::Error;

/// ATT protocol error codes from the Bluetooth Core Specification.
///
/// This is the closed set of outcomes a [`ValueHandler`](super::ValueHandler)
/// may report. The core propagates these codes without interpreting them;
/// translation to an on-wire error response belongs to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid handle
    InvalidHandle,
    /// Read not permitted
    ReadNotPermitted,
    /// Write not permitted
    WriteNotPermitted,
    /// Invalid PDU
    InvalidPdu,
    /// Insufficient authentication
    InsufficientAuthentication,
    /// Request not supported
    RequestNotSupported,
    /// Invalid offset
    InvalidOffset,
    /// Insufficient authorization
    InsufficientAuthorization,
    /// Prepare queue full
    PrepareQueueFull,
    /// Attribute not found
    AttributeNotFound,
    /// Attribute not long
    AttributeNotLong,
    /// Insufficient encryption key size
    InsufficientEncryptionKeySize,
    /// Invalid attribute value length
    InvalidAttributeValueLength,
    /// Unlikely error
    Unlikely,
    /// Insufficient encryption
    InsufficientEncryption,
    /// Unsupported group type
    UnsupportedGroupType,
    /// Insufficient resources
    InsufficientResources,
    /// Database out of sync
    DatabaseOutOfSync,
    /// Value not allowed
    ValueNotAllowed,
    /// Application error (0x80..=0x9F)
    Application(u8),
    /// Common profile and service error (0xE0..=0xFF)
    CommonProfile(u8),
    /// Reserved or unrecognized error code
    Unknown(u8),
}

impl From<u8> for ErrorCode {
    fn from(code: u8) -> Self {
        match code {
            ATT_ERROR_INVALID_HANDLE => ErrorCode::InvalidHandle,
            ATT_ERROR_READ_NOT_PERMITTED => ErrorCode::ReadNotPermitted,
            ATT_ERROR_WRITE_NOT_PERMITTED => ErrorCode::WriteNotPermitted,
            ATT_ERROR_INVALID_PDU => ErrorCode::InvalidPdu,
            ATT_ERROR_INSUFFICIENT_AUTHENTICATION => ErrorCode::InsufficientAuthentication,
            ATT_ERROR_REQUEST_NOT_SUPPORTED => ErrorCode::RequestNotSupported,
            ATT_ERROR_INVALID_OFFSET => ErrorCode::InvalidOffset,
            ATT_ERROR_INSUFFICIENT_AUTHORIZATION => ErrorCode::InsufficientAuthorization,
            ATT_ERROR_PREPARE_QUEUE_FULL => ErrorCode::PrepareQueueFull,
            ATT_ERROR_ATTRIBUTE_NOT_FOUND => ErrorCode::AttributeNotFound,
            ATT_ERROR_ATTRIBUTE_NOT_LONG => ErrorCode::AttributeNotLong,
            ATT_ERROR_INSUFFICIENT_ENCRYPTION_KEY_SIZE => ErrorCode::InsufficientEncryptionKeySize,
            ATT_ERROR_INVALID_ATTRIBUTE_VALUE_LENGTH => ErrorCode::InvalidAttributeValueLength,
            ATT_ERROR_UNLIKELY => ErrorCode::Unlikely,
            ATT_ERROR_INSUFFICIENT_ENCRYPTION => ErrorCode::InsufficientEncryption,
            ATT_ERROR_UNSUPPORTED_GROUP_TYPE => ErrorCode::UnsupportedGroupType,
            ATT_ERROR_INSUFFICIENT_RESOURCES => ErrorCode::InsufficientResources,
            ATT_ERROR_DATABASE_OUT_OF_SYNC => ErrorCode::DatabaseOutOfSync,
            ATT_ERROR_VALUE_NOT_ALLOWED => ErrorCode::ValueNotAllowed,
            c if (ATT_ERROR_APPLICATION_ERROR_START..=ATT_ERROR_APPLICATION_ERROR_END)
                .contains(&c) =>
            {
                ErrorCode::Application(c)
            }
            c if c >= ATT_ERROR_COMMON_PROFILE_ERROR_START => ErrorCode::CommonProfile(c),
            c => ErrorCode::Unknown(c),
        }
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidHandle => ATT_ERROR_INVALID_HANDLE,
            ErrorCode::ReadNotPermitted => ATT_ERROR_READ_NOT_PERMITTED,
            ErrorCode::WriteNotPermitted => ATT_ERROR_WRITE_NOT_PERMITTED,
            ErrorCode::InvalidPdu => ATT_ERROR_INVALID_PDU,
            ErrorCode::InsufficientAuthentication => ATT_ERROR_INSUFFICIENT_AUTHENTICATION,
            ErrorCode::RequestNotSupported => ATT_ERROR_REQUEST_NOT_SUPPORTED,
            ErrorCode::InvalidOffset => ATT_ERROR_INVALID_OFFSET,
            ErrorCode::InsufficientAuthorization => ATT_ERROR_INSUFFICIENT_AUTHORIZATION,
            ErrorCode::PrepareQueueFull => ATT_ERROR_PREPARE_QUEUE_FULL,
            ErrorCode::AttributeNotFound => ATT_ERROR_ATTRIBUTE_NOT_FOUND,
            ErrorCode::AttributeNotLong => ATT_ERROR_ATTRIBUTE_NOT_LONG,
            ErrorCode::InsufficientEncryptionKeySize => ATT_ERROR_INSUFFICIENT_ENCRYPTION_KEY_SIZE,
            ErrorCode::InvalidAttributeValueLength => ATT_ERROR_INVALID_ATTRIBUTE_VALUE_LENGTH,
            ErrorCode::Unlikely => ATT_ERROR_UNLIKELY,
            ErrorCode::InsufficientEncryption => ATT_ERROR_INSUFFICIENT_ENCRYPTION,
            ErrorCode::UnsupportedGroupType => ATT_ERROR_UNSUPPORTED_GROUP_TYPE,
            ErrorCode::InsufficientResources => ATT_ERROR_INSUFFICIENT_RESOURCES,
            ErrorCode::DatabaseOutOfSync => ATT_ERROR_DATABASE_OUT_OF_SYNC,
            ErrorCode::ValueNotAllowed => ATT_ERROR_VALUE_NOT_ALLOWED,
            ErrorCode::Application(code) => code,
            ErrorCode::CommonProfile(code) => code,
            ErrorCode::Unknown(code) => code,
        }
    }
}

/// Errors raised by this crate itself.
///
/// Handle resolution never lands here: a missed lookup is `None` and an
/// empty sub-range is an empty slice. These variants cover the writer's
/// capacity contract and the table-construction invariants, plus
/// pass-through of protocol outcomes from value handlers.
#[derive(Debug, Error)]
pub enum AttError {
    #[error("short write: {requested} bytes requested, {remaining} remaining")]
    ShortWrite { requested: usize, remaining: usize },

    #[error("non-contiguous handle: expected {expected:#06x}, found {found:#06x}")]
    NonContiguousHandle { expected: u16, found: u16 },

    #[error("group end {ending_handle:#06x} precedes handle {handle:#06x}")]
    GroupEndPrecedesHandle { handle: u16, ending_handle: u16 },

    #[error("handle space exhausted: base {base:#06x} cannot hold {count} attributes")]
    HandleSpaceExhausted { base: u16, count: usize },

    #[error("unknown handle: {0:#06x}")]
    UnknownHandle(u16),

    #[error("protocol error: {0:?}")]
    Protocol(ErrorCode),
}

impl From<ErrorCode> for AttError {
    fn from(code: ErrorCode) -> Self {
        AttError::Protocol(code)
    }
}

impl AttError {
    /// Default mapping to an ATT error code.
    ///
    /// A dispatcher building an error response can use this directly; a
    /// caller that would rather retry a short write with a smaller payload
    /// is free to ignore it.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            AttError::ShortWrite { .. } => ErrorCode::InsufficientResources,
            AttError::NonContiguousHandle { .. } => ErrorCode::InvalidHandle,
            AttError::GroupEndPrecedesHandle { .. } => ErrorCode::InvalidHandle,
            AttError::HandleSpaceExhausted { .. } => ErrorCode::InsufficientResources,
            AttError::UnknownHandle(_) => ErrorCode::InvalidHandle,
            AttError::Protocol(code) => *code,
        }
    }
}

/// ATT Result type
pub type AttResult<T> = Result<T, AttError>;

//! Attribute representation for the ATT server core
use super::error::ErrorCode;
use super::writer::ResponseWriter;
use crate::uuid::Uuid;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Produces the value of a dynamic attribute in response to a request.
///
/// Handlers run on the dispatcher's thread and may be shared across
/// connections, so implementations must be `Send + Sync`. A handler that
/// performs slow work should poll `ctx` and abandon the request once the
/// token is cancelled.
pub trait ValueHandler: Send + Sync {
    /// Serve one request, writing the response payload into `rsp`.
    fn handle(
        &self,
        ctx: &CancellationToken,
        req: &[u8],
        rsp: &mut ResponseWriter,
    ) -> Result<(), ErrorCode>;
}

impl<F> ValueHandler for F
where
    F: Fn(&CancellationToken, &[u8], &mut ResponseWriter) -> Result<(), ErrorCode> + Send + Sync,
{
    fn handle(
        &self,
        ctx: &CancellationToken,
        req: &[u8],
        rsp: &mut ResponseWriter,
    ) -> Result<(), ErrorCode> {
        self(ctx, req, rsp)
    }
}

/// The value side of an attribute: either bytes known at table-build time
/// or a handler invoked per request. Exactly one of the two exists for any
/// attribute.
#[derive(Clone)]
pub enum AttributeValue {
    /// Fixed payload returned verbatim
    Static(Vec<u8>),
    /// Payload produced on demand
    Dynamic(Arc<dyn ValueHandler>),
}

impl AttributeValue {
    /// Wrap a handler without spelling out the `Arc`.
    pub fn dynamic<H: ValueHandler + 'static>(handler: H) -> Self {
        AttributeValue::Dynamic(Arc::new(handler))
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Static(bytes) => {
                write!(f, "Static({})", hex::encode_upper(bytes))
            }
            AttributeValue::Dynamic(_) => write!(f, "Dynamic(..)"),
        }
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(bytes: Vec<u8>) -> Self {
        AttributeValue::Static(bytes)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(bytes: &[u8]) -> Self {
        AttributeValue::Static(bytes.to_vec())
    }
}

/// A single entry in an attribute table.
///
/// `ending_handle` is the last handle covered when this attribute opens a
/// group; for plain attributes it equals `handle`. Tables enforce
/// `ending_handle >= handle` when they are built.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub handle: u16,
    pub ending_handle: u16,
    pub attr_type: Uuid,
    pub value: AttributeValue,
}

impl Attribute {
    /// Create a plain attribute whose group is just itself.
    pub fn new(handle: u16, attr_type: Uuid, value: AttributeValue) -> Self {
        Attribute {
            handle,
            ending_handle: handle,
            attr_type,
            value,
        }
    }

    /// Create a grouping attribute covering `handle..=ending_handle`.
    pub fn grouped(handle: u16, ending_handle: u16, attr_type: Uuid, value: AttributeValue) -> Self {
        Attribute {
            handle,
            ending_handle,
            attr_type,
            value,
        }
    }

    /// Whether this attribute declares a group wider than itself.
    pub fn is_grouping(&self) -> bool {
        self.ending_handle > self.handle
    }

    /// The fixed payload, if this attribute is static.
    pub fn static_value(&self) -> Option<&[u8]> {
        match &self.value {
            AttributeValue::Static(bytes) => Some(bytes),
            AttributeValue::Dynamic(_) => None,
        }
    }

    /// The handler, if this attribute is dynamic.
    pub fn handler(&self) -> Option<&Arc<dyn ValueHandler>> {
        match &self.value {
            AttributeValue::Static(_) => None,
            AttributeValue::Dynamic(handler) => Some(handler),
        }
    }
}

//! Handle-indexed attribute table
use super::attribute::{Attribute, AttributeValue};
use super::constants::ATT_HANDLE_MAX;
use super::error::{AttError, AttResult};
use crate::uuid::Uuid;
use tracing::debug;

/// Where a probed handle falls relative to the table.
enum Idx {
    TooSmall,
    TooLarge,
    At(usize),
}

/// A contiguous run of attributes starting at a base handle.
///
/// Position in the backing vector encodes the handle: the attribute at
/// index `i` owns handle `base + i`. Construction checks that invariant
/// once, after which every lookup is a bounds check and a subtraction.
#[derive(Debug, Clone)]
pub struct AttributeRange {
    base: u16,
    attributes: Vec<Attribute>,
}

impl AttributeRange {
    /// Build a table from pre-assigned attributes.
    ///
    /// Fails if the run would overflow the 16-bit handle space, if any
    /// attribute's handle is not exactly `base + index`, or if a group
    /// ends before it starts.
    pub fn new(base: u16, attributes: Vec<Attribute>) -> AttResult<Self> {
        let space = usize::from(ATT_HANDLE_MAX) - usize::from(base) + 1;
        if attributes.len() > space {
            return Err(AttError::HandleSpaceExhausted {
                base,
                count: attributes.len(),
            });
        }
        for (i, attr) in attributes.iter().enumerate() {
            let expected = base + i as u16;
            if attr.handle != expected {
                return Err(AttError::NonContiguousHandle {
                    expected,
                    found: attr.handle,
                });
            }
            if attr.ending_handle < attr.handle {
                return Err(AttError::GroupEndPrecedesHandle {
                    handle: attr.handle,
                    ending_handle: attr.ending_handle,
                });
            }
        }
        debug!(base, count = attributes.len(), "attribute table built");
        Ok(AttributeRange { base, attributes })
    }

    /// The handle of the first attribute.
    pub fn base(&self) -> u16 {
        self.base
    }

    /// Number of attributes in the table.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the table holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The highest handle in the table, if any.
    pub fn last_handle(&self) -> Option<u16> {
        let len = self.attributes.len() as u32;
        if len == 0 {
            None
        } else {
            Some((u32::from(self.base) + len - 1) as u16)
        }
    }

    /// All attributes in handle order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Iterate over the attributes in handle order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    // Handles are widened to u32 so the exclusive probe `end + 1` cannot
    // wrap at 0xFFFF.
    fn idx(&self, handle: u32) -> Idx {
        let base = u32::from(self.base);
        if handle < base {
            return Idx::TooSmall;
        }
        if handle >= base + self.attributes.len() as u32 {
            return Idx::TooLarge;
        }
        Idx::At((handle - base) as usize)
    }

    /// Look up the attribute owning `handle`.
    pub fn at(&self, handle: u16) -> Option<&Attribute> {
        match self.idx(u32::from(handle)) {
            Idx::At(i) => Some(&self.attributes[i]),
            Idx::TooSmall | Idx::TooLarge => None,
        }
    }

    /// All attributes with handles in `start..=end`, clamped to the table.
    ///
    /// A window that misses the table entirely, or has `end < start`,
    /// yields an empty slice.
    pub fn subrange(&self, start: u16, end: u16) -> &[Attribute] {
        let lo = match self.idx(u32::from(start)) {
            Idx::TooSmall => 0,
            Idx::TooLarge => return &[],
            Idx::At(i) => i,
        };
        let hi = match self.idx(u32::from(end) + 1) {
            Idx::TooSmall => return &[],
            Idx::TooLarge => self.attributes.len(),
            Idx::At(i) => i,
        };
        if lo >= hi {
            return &[];
        }
        &self.attributes[lo..hi]
    }
}

impl<'a> IntoIterator for &'a AttributeRange {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Assembles an [`AttributeRange`] with sequentially assigned handles.
///
/// Each push takes the next free handle, so the contiguity invariant
/// holds by construction and [`RangeBuilder::build`] cannot fail.
#[derive(Debug)]
pub struct RangeBuilder {
    base: u16,
    attributes: Vec<Attribute>,
}

impl RangeBuilder {
    /// Start an empty table whose first attribute will own `base`.
    pub fn new(base: u16) -> Self {
        RangeBuilder {
            base,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, returning the handle it was assigned.
    pub fn push<V: Into<AttributeValue>>(&mut self, attr_type: Uuid, value: V) -> AttResult<u16> {
        let handle = u32::from(self.base) + self.attributes.len() as u32;
        if handle > u32::from(ATT_HANDLE_MAX) {
            return Err(AttError::HandleSpaceExhausted {
                base: self.base,
                count: self.attributes.len() + 1,
            });
        }
        let handle = handle as u16;
        self.attributes
            .push(Attribute::new(handle, attr_type, value.into()));
        Ok(handle)
    }

    /// Close the group opened at `handle`, ending it at the most recently
    /// assigned handle.
    pub fn end_group(&mut self, handle: u16) -> AttResult<()> {
        let last = match self.last_handle() {
            Some(last) if handle >= self.base && handle <= last => last,
            _ => return Err(AttError::UnknownHandle(handle)),
        };
        let i = usize::from(handle - self.base);
        self.attributes[i].ending_handle = last;
        Ok(())
    }

    /// The most recently assigned handle, if anything has been pushed.
    pub fn last_handle(&self) -> Option<u16> {
        self.attributes.last().map(|attr| attr.handle)
    }

    /// Number of attributes appended so far.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Finish the table. Handles were assigned sequentially, so no
    /// further validation is needed.
    pub fn build(self) -> AttributeRange {
        debug!(
            base = self.base,
            count = self.attributes.len(),
            "attribute table built"
        );
        AttributeRange {
            base: self.base,
            attributes: self.attributes,
        }
    }
}

//! Physical address type.
//!
//! Miss notifications arrive as raw 64-bit physical addresses. This module wraps
//! them in a strong type that knows how to:
//! 1. **Align:** Mask an address down to its cache block boundary.
//! 2. **Page:** Locate the page an address lives in and compare pages.

/// A physical address as seen by the cache hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Masks the address down to the start of its cache block.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Cache block size in bytes (power of two).
    #[must_use]
    #[inline(always)]
    pub const fn block_aligned(self, block_size: u64) -> Self {
        Self(self.0 & !(block_size - 1))
    }

    /// Returns the base address of the page containing this address.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Page size in bytes (power of two).
    #[must_use]
    #[inline(always)]
    pub const fn page_base(self, page_size: u64) -> Self {
        Self(self.0 & !(page_size - 1))
    }

    /// Returns `true` if both addresses fall in the same page.
    #[inline(always)]
    pub const fn same_page(self, other: Self, page_size: u64) -> bool {
        self.page_base(page_size).0 == other.page_base(page_size).0
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl From<PhysAddr> for u64 {
    fn from(addr: PhysAddr) -> Self {
        addr.0
    }
}

//! Physical memory snapshot.

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Physical memory usage at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryInfo {
    /// Free memory in bytes. Inactive pages the OS can reclaim count as free.
    pub free_bytes: u64,
    /// Memory in use, in bytes.
    pub used_bytes: u64,
    /// Total physical memory in bytes.
    pub total_bytes: u64,
}

impl MemoryInfo {
    /// Build a snapshot from the total and the reclaimable amount.
    #[must_use]
    pub const fn from_total_and_free(total_bytes: u64, free_bytes: u64) -> Self {
        let free_bytes = if free_bytes > total_bytes {
            total_bytes
        } else {
            free_bytes
        };
        Self {
            free_bytes,
            used_bytes: total_bytes - free_bytes,
            total_bytes,
        }
    }

    /// Free memory in megabytes.
    #[must_use]
    pub const fn free_mb(&self) -> u64 {
        self.free_bytes / BYTES_PER_MB
    }

    /// Used memory in megabytes.
    #[must_use]
    pub const fn used_mb(&self) -> u64 {
        self.used_bytes / BYTES_PER_MB
    }

    /// Total physical memory in megabytes.
    #[must_use]
    pub const fn total_mb(&self) -> u64 {
        self.total_bytes / BYTES_PER_MB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_truncate() {
        let info = MemoryInfo::from_total_and_free(2048 * BYTES_PER_MB, 512 * BYTES_PER_MB + 1);
        assert_eq!(info.total_mb(), 2048);
        assert_eq!(info.free_mb(), 512);
        assert_eq!(info.used_mb(), 1535);
    }

    #[test]
    fn free_never_exceeds_total() {
        let info = MemoryInfo::from_total_and_free(100, 300);
        assert_eq!(info.free_bytes, 100);
        assert_eq!(info.used_bytes, 0);
    }
}

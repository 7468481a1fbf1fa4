//! Memory, CPU and disk statistics via `sysinfo`, shared by every platform.

use std::path::Path;

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

use crate::{DeviceError, MemoryInfo, disk};

fn ensure_supported() -> Result<(), DeviceError> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(DeviceError::NotSupported)
    }
}

pub fn memory() -> Result<MemoryInfo, DeviceError> {
    ensure_supported()?;
    let system = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );

    let total = system.total_memory();
    // available_memory counts reclaimable pages; some kernels report 0 for it.
    let free = match system.available_memory() {
        0 => system.free_memory(),
        available => available,
    };
    log::debug!("memory: total={total} free={free}");
    Ok(MemoryInfo::from_total_and_free(total, free))
}

pub fn cpu_usage() -> Result<f64, DeviceError> {
    ensure_supported()?;
    let mut system = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
    );
    // Usage is a delta between two samples.
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_cpu_usage();

    Ok(f64::from(system.global_cpu_usage()))
}

pub fn free_disk_bytes(data_volume: &str) -> Result<u64, DeviceError> {
    ensure_supported()?;
    let disks = Disks::new_with_refreshed_list();
    let volumes = disks
        .list()
        .iter()
        .map(|disk| (disk.mount_point(), disk.available_space()));

    disk::free_space_on(volumes, Path::new(data_volume)).ok_or_else(|| {
        DeviceError::Platform(format!("no mounted volume holds {data_volume}"))
    })
}

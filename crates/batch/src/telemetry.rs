//! Host resource sampling

use std::fmt;
use sysinfo::System;

/// CPU and memory utilization at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    /// Global CPU usage in percent
    pub cpu_percent: f32,
    /// Used memory in percent of total
    pub memory_percent: f64,
}

impl fmt::Display for ResourceSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU: {:.1}% | RAM: {:.1}%",
            self.cpu_percent, self.memory_percent
        )
    }
}

/// Samples host utilization
///
/// CPU usage is measured between refreshes, so the first sample reports
/// usage since the monitor was created.
pub struct ResourceMonitor {
    system: System,
}

impl ResourceMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_memory();
        Self { system }
    }

    pub fn sample(&mut self) -> ResourceSample {
        self.system.refresh_cpu();
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            self.system.used_memory() as f64 / total as f64 * 100.0
        };

        ResourceSample {
            cpu_percent: self.system.global_cpu_info().cpu_usage(),
            memory_percent,
        }
    }
}

impl Default for ResourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

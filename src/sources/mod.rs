//! Metric providers
//!
//! One provider per telemetry value. Each provider queries the OS
//! synchronously and returns the already-formatted display string; the
//! collector gathers all of them into one snapshot per render iteration.

mod command;
mod cpu;
mod disk;
mod memory;
mod network;
mod system_temp;
mod uptime;

pub use command::QueryError;
pub use cpu::CpuSource;
pub use disk::DiskSource;
pub use memory::MemorySource;
pub use network::NetworkSource;
pub use system_temp::SystemTempSource;
pub use uptime::UptimeSource;

use log::trace;

/// One telemetry value, queried on demand.
///
/// Implementations may block for the duration of the external query; the
/// CPU sampler deliberately blocks for its whole sampling window. A failed
/// query is fatal by policy — there is no per-metric fallback value.
pub trait MetricProvider: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Query the OS and return the formatted value.
    fn sample(&self) -> Result<String, QueryError>;
}

/// Type-erased metric provider for dynamic dispatch.
pub type BoxedProvider = Box<dyn MetricProvider>;

/// The values rendered into one frame, gathered in a single iteration.
///
/// Never persisted and never mixed across iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub ip: String,
    pub cpu_percent: String,
    pub mem_used_gb: f64,
    pub mem_used_percent: String,
    pub disk_used: String,
    pub uptime: String,
    pub temperature: String,
}

/// The fixed provider set, gathered sequentially each active iteration.
pub struct Telemetry {
    network: BoxedProvider,
    cpu: BoxedProvider,
    memory: MemorySource,
    disk: BoxedProvider,
    uptime: BoxedProvider,
    temperature: BoxedProvider,
}

impl Telemetry {
    pub fn new(
        network: BoxedProvider,
        cpu: BoxedProvider,
        memory: MemorySource,
        disk: BoxedProvider,
        uptime: BoxedProvider,
        temperature: BoxedProvider,
    ) -> Self {
        Self {
            network,
            cpu,
            memory,
            disk,
            uptime,
            temperature,
        }
    }

    /// Build the real provider set, caching the memory total up front.
    pub fn probe() -> Result<Self, QueryError> {
        Ok(Self::new(
            Box::new(NetworkSource),
            Box::new(CpuSource),
            MemorySource::probe()?,
            Box::new(DiskSource),
            Box::new(UptimeSource),
            Box::new(SystemTempSource),
        ))
    }

    /// Memory total cached at startup, in GB.
    pub fn total_gb(&self) -> f64 {
        self.memory.total_gb()
    }

    /// Gather one snapshot. Queries run sequentially; the CPU sampler's
    /// blocking window dominates the latency of this call.
    pub fn snapshot(&self) -> Result<MetricSnapshot, QueryError> {
        let ip = sample(&self.network)?;
        let cpu_percent = sample(&self.cpu)?;
        let mem_used_gb = self.memory.used_gb()?;
        let mem_used_percent = self.memory.used_percent(mem_used_gb);
        let disk_used = sample(&self.disk)?;
        let uptime = sample(&self.uptime)?;
        let temperature = sample(&self.temperature)?;

        Ok(MetricSnapshot {
            ip,
            cpu_percent,
            mem_used_gb,
            mem_used_percent,
            disk_used,
            uptime,
            temperature,
        })
    }
}

fn sample(provider: &BoxedProvider) -> Result<String, QueryError> {
    let value = provider.sample()?;
    trace!("{}: {:?}", provider.name(), value);
    Ok(value)
}

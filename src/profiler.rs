//! Profiling agent started once at process startup.
//!
//! The agent is an opaque collaborator: the service hands it a profiling group
//! and a region, then never talks to it again. It is built in `main` and passed
//! into the server rather than living in a global.

use tracing::{info, warn};

use crate::error::ProfilerError;
use crate::metrics;

/// Profiling group the service reports into.
pub const PROFILING_GROUP_NAME: &str = "MyApp-Profiler";

/// Region of the profiling group.
pub const PROFILING_REGION: &str = "us-east-1";

/// Parameters handed to the agent on start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerSettings {
    /// Profiling group name.
    pub profiling_group_name: String,
    /// Region the profiling group lives in.
    pub region: String,
}

impl Default for ProfilerSettings {
    fn default() -> Self {
        Self {
            profiling_group_name: PROFILING_GROUP_NAME.to_string(),
            region: PROFILING_REGION.to_string(),
        }
    }
}

impl ProfilerSettings {
    /// Check that no setting is blank.
    pub fn validate(&self) -> Result<(), ProfilerError> {
        if self.profiling_group_name.trim().is_empty() {
            return Err(ProfilerError::MissingSetting("profiling_group_name"));
        }
        if self.region.trim().is_empty() {
            return Err(ProfilerError::MissingSetting("region"));
        }
        Ok(())
    }
}

/// A profiling agent that can be started once.
pub trait ProfilingAgent: Send + Sync {
    /// Human-readable agent name for logs.
    fn name(&self) -> &str;

    /// Start collecting samples.
    fn start(&self, settings: &ProfilerSettings) -> Result<(), ProfilerError>;
}

/// Agent that accepts the settings and collects nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProfiler;

impl ProfilingAgent for NoopProfiler {
    fn name(&self) -> &str {
        "noop"
    }

    fn start(&self, settings: &ProfilerSettings) -> Result<(), ProfilerError> {
        settings.validate()?;
        info!(
            group = %settings.profiling_group_name,
            region = %settings.region,
            "Profiling agent configured (no samples are collected)"
        );
        Ok(())
    }
}

/// Start the agent, logging instead of failing when it refuses.
///
/// Returns whether the agent started.
pub fn start_agent(agent: &dyn ProfilingAgent, settings: &ProfilerSettings) -> bool {
    match agent.start(settings) {
        Ok(()) => {
            info!(agent = agent.name(), "Profiling agent started");
            true
        }
        Err(e) => {
            warn!(agent = agent.name(), "Profiling agent failed to start: {}", e);
            metrics::inc_profiler_start_failures();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProfiler;

    impl ProfilingAgent for FailingProfiler {
        fn name(&self) -> &str {
            "failing"
        }

        fn start(&self, _settings: &ProfilerSettings) -> Result<(), ProfilerError> {
            Err(ProfilerError::StartFailed {
                agent: "failing".to_string(),
                reason: "no credentials".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct CountingProfiler {
        starts: AtomicUsize,
    }

    impl ProfilingAgent for CountingProfiler {
        fn name(&self) -> &str {
            "counting"
        }

        fn start(&self, _settings: &ProfilerSettings) -> Result<(), ProfilerError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn default_settings_use_fixed_group_and_region() {
        let settings = ProfilerSettings::default();
        assert_eq!(settings.profiling_group_name, "MyApp-Profiler");
        assert_eq!(settings.region, "us-east-1");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_region() {
        let settings = ProfilerSettings {
            region: " ".to_string(),
            ..ProfilerSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ProfilerError::MissingSetting("region"))
        );
    }

    #[test]
    fn noop_profiler_starts_with_defaults() {
        assert!(start_agent(&NoopProfiler, &ProfilerSettings::default()));
    }

    #[test]
    fn noop_profiler_rejects_invalid_settings() {
        let settings = ProfilerSettings {
            profiling_group_name: String::new(),
            ..ProfilerSettings::default()
        };
        assert!(!start_agent(&NoopProfiler, &settings));
    }

    #[test]
    fn failing_agent_does_not_abort_startup() {
        assert!(!start_agent(&FailingProfiler, &ProfilerSettings::default()));
    }

    #[test]
    fn agent_is_started_exactly_once() {
        let agent = CountingProfiler::default();
        start_agent(&agent, &ProfilerSettings::default());
        assert_eq!(agent.starts.load(Ordering::SeqCst), 1);
    }
}

//! Process-wide fault handling
//!
//! Every error or panic escaping an application callback ends up here. The
//! hook is registered once during startup with [`install`]; the engine reports
//! faults to it and asks how to proceed.
//!
//! Policy:
//! - with a debugger attached the hook answers [`FaultDisposition::Break`] and
//!   the run-loop stops so the debugger gets control;
//! - otherwise the fault is logged, counted as handled, and the game keeps
//!   running. A fault in the middle of a menu/play transition can leave the
//!   session stalled; nothing resets it.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

static GLOBAL_HOOK: OnceLock<Arc<FaultHook>> = OnceLock::new();

/// Fault hook registration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaultError {
    /// [`install`] was called more than once
    #[error("A fault hook is already installed for this process")]
    AlreadyInstalled,
}

/// How the hook treats faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultPolicy {
    /// Stop the run-loop so an attached debugger can inspect the fault
    pub break_on_fault: bool,
}

impl FaultPolicy {
    /// Policy derived from the debugger probe
    pub fn detect() -> Self {
        Self { break_on_fault: debugger_attached() }
    }
}

/// Where a fault surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultStage {
    /// Application start hook (scene bootstrap)
    Initialize,
    /// Per-frame update
    Update,
    /// Event delivery
    Event,
}

impl fmt::Display for FaultStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialize => "initialize",
            Self::Update => "update",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

/// An unhandled failure reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Callback the fault escaped from
    pub stage: FaultStage,
    /// Human readable description
    pub message: String,
    /// Whether the fault was a panic rather than an `Err`
    pub panicked: bool,
}

impl Fault {
    /// Fault from an error value
    pub fn error(stage: FaultStage, error: &dyn std::error::Error) -> Self {
        Self { stage, message: error.to_string(), panicked: false }
    }

    /// Fault from a caught panic payload
    pub fn panic(stage: FaultStage, payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self { stage, message, panicked: true }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.panicked { "panic" } else { "error" };
        write!(f, "{} during {}: {}", kind, self.stage, self.message)
    }
}

/// What the engine should do after reporting a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDisposition {
    /// Fault marked handled; keep running
    Handled,
    /// Stop for the debugger
    Break,
}

/// Fault sink shared by the engine
#[derive(Debug)]
pub struct FaultHook {
    policy: FaultPolicy,
    handled: AtomicU64,
    last_fault: Mutex<Option<Fault>>,
}

impl FaultHook {
    /// Create a hook with the given policy
    pub fn new(policy: FaultPolicy) -> Self {
        Self {
            policy,
            handled: AtomicU64::new(0),
            last_fault: Mutex::new(None),
        }
    }

    /// Report a fault and get the disposition
    pub fn report(&self, fault: Fault) -> FaultDisposition {
        let disposition = if self.policy.break_on_fault {
            log::error!("Unhandled {} (debugger attached, breaking)", fault);
            FaultDisposition::Break
        } else {
            log::error!("Unhandled {} (marked handled, continuing)", fault);
            self.handled.fetch_add(1, Ordering::Relaxed);
            FaultDisposition::Handled
        };

        if let Ok(mut last) = self.last_fault.lock() {
            *last = Some(fault);
        }
        disposition
    }

    /// Number of faults marked handled so far
    pub fn handled_count(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    /// Most recently reported fault
    pub fn last_fault(&self) -> Option<Fault> {
        self.last_fault.lock().ok().and_then(|last| last.clone())
    }
}

/// Register the process-wide fault hook
///
/// Must be called once during startup, before the engine runs.
pub fn install(policy: FaultPolicy) -> Result<Arc<FaultHook>, FaultError> {
    let hook = Arc::new(FaultHook::new(policy));
    GLOBAL_HOOK
        .set(Arc::clone(&hook))
        .map_err(|_| FaultError::AlreadyInstalled)?;
    log::info!("Fault hook installed (break_on_fault: {})", policy.break_on_fault);
    Ok(hook)
}

/// Probe for an attached debugger
///
/// Linux reports the tracer in `/proc/self/status`; other platforms assume
/// no debugger.
pub fn debugger_attached() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|status| tracer_pid(&status))
            .is_some_and(|pid| pid != 0)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handled_policy_counts_faults() {
        let hook = FaultHook::new(FaultPolicy { break_on_fault: false });
        let fault = Fault { stage: FaultStage::Update, message: "boom".into(), panicked: false };

        assert_eq!(hook.report(fault.clone()), FaultDisposition::Handled);
        assert_eq!(hook.handled_count(), 1);
        assert_eq!(hook.last_fault(), Some(fault));
    }

    #[test]
    fn test_break_policy() {
        let hook = FaultHook::new(FaultPolicy { break_on_fault: true });
        let fault = Fault { stage: FaultStage::Initialize, message: "boom".into(), panicked: false };

        assert_eq!(hook.report(fault), FaultDisposition::Break);
        assert_eq!(hook.handled_count(), 0);
        assert!(hook.last_fault().is_some());
    }

    #[test]
    fn test_panic_payload_messages() {
        let from_str: Box<dyn Any + Send> = Box::new("static message");
        let from_string: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        let opaque: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(Fault::panic(FaultStage::Update, from_str.as_ref()).message, "static message");
        assert_eq!(Fault::panic(FaultStage::Update, from_string.as_ref()).message, "owned message");
        assert!(Fault::panic(FaultStage::Event, opaque.as_ref()).panicked);
    }

    #[test]
    fn test_install_only_once() {
        // The global slot is shared by the whole test binary, so only the
        // second call's outcome is deterministic.
        let _ = install(FaultPolicy::default());
        assert_eq!(install(FaultPolicy::default()).err(), Some(FaultError::AlreadyInstalled));
        assert!(GLOBAL_HOOK.get().is_some());
    }

    #[test]
    fn test_tracer_pid_parsing() {
        let status = "Name:\tredball\nState:\tR (running)\nTracerPid:\t4242\nUid:\t0\n";
        assert_eq!(tracer_pid(status), Some(4242));
        assert_eq!(tracer_pid("TracerPid:\t0\n"), Some(0));
        assert_eq!(tracer_pid("Name:\tredball\n"), None);
    }
}

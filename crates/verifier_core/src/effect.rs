use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartPolling { cycle: crate::CycleId, interval: Duration },
    StopPolling { cycle: crate::CycleId },
    SendRequest(crate::VerificationRequest),
    /// A poll cycle spent its budget without finding the editor.
    ReportEditorMissing { cycle: crate::CycleId, attempts: u32 },
    ScheduleDismiss { generation: u64, after: Duration },
}

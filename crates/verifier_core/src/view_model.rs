use crate::{Kind, Treatment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    pub kind: Kind,
    pub treatment: Treatment,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentViewModel {
    pub active_cycles: usize,
    pub requests_sent: u64,
    pub notification: Option<NotificationView>,
    pub dirty: bool,
}

use std::fmt;

/// Onboarding flow state.
///
/// A projection of the consent, postcode and permission facts at the moment
/// of resolution. Nothing about previous states is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Data sharing has not been accepted yet.
    Initial,
    /// No partial postcode has been stored.
    PartialPostcode,
    /// Bluetooth or notification permission has not been asked for.
    Permissions,
    /// Bluetooth permission was refused.
    BluetoothDenied,
    /// Bluetooth permission is granted but the radio is off.
    BluetoothOff,
    /// Notification permission was refused.
    NotificationsDenied,
    /// Everything is in place; the flow is over.
    Done,
}

impl FlowState {
    pub const ALL: [FlowState; 7] = [
        FlowState::Initial,
        FlowState::PartialPostcode,
        FlowState::Permissions,
        FlowState::BluetoothDenied,
        FlowState::BluetoothOff,
        FlowState::NotificationsDenied,
        FlowState::Done,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, FlowState::Done)
    }

    /// Whether this state is one of the permission-denied recovery states.
    pub fn is_recovery(self) -> bool {
        matches!(
            self,
            FlowState::BluetoothDenied | FlowState::BluetoothOff | FlowState::NotificationsDenied
        )
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Initial => "initial",
            FlowState::PartialPostcode => "partial_postcode",
            FlowState::Permissions => "permissions",
            FlowState::BluetoothDenied => "bluetooth_denied",
            FlowState::BluetoothOff => "bluetooth_off",
            FlowState::NotificationsDenied => "notifications_denied",
            FlowState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Identifier of one state resolution request.
///
/// Issued from a monotonically increasing sequence; a larger id always
/// belongs to a more recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

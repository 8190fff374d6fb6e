//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Clock face input
    /// Confirm pressed on the clock face
    OpenMenu,
    /// Increment or Decrement pressed on the clock face
    AdjustBrightness,
    /// Cancel pressed on the clock face
    ToggleAlarm,

    // Alarm events
    /// Wall clock reached the enabled alarm time
    AlarmDue,
    /// Alarm session finished (disarmed, skipped or dismissed)
    SessionComplete,

    // Menu and editors
    /// Menu entry picked
    Chosen(MenuItem),
    /// Editor saved its value
    Saved,
    /// Menu, editor or debug screen left without saving
    Back,

    // Brightness panel
    /// Panel stepped the level and redraws
    BrightnessChanged,
    /// Panel closed without further input
    PanelClosed,
    /// Confirm and Cancel held through the panel
    EnterDebug,
}

impl Event {
    /// Check if this event comes straight from a button
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            Event::OpenMenu | Event::AdjustBrightness | Event::ToggleAlarm | Event::Chosen(_)
        )
    }
}

/// Settings menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    AlarmTime,
    Challenge,
    Snooze,
    ClockTime,
    Date,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::AlarmTime,
        MenuItem::Challenge,
        MenuItem::Snooze,
        MenuItem::ClockTime,
        MenuItem::Date,
    ];

    /// Labels in menu order, as shown by the choice editor
    pub const LABELS: [&'static str; 5] = [
        "SET ALARM",
        "ALARM CHALLENGE",
        "SNOOZE PERIOD",
        "SET TIME",
        "SET DATE",
    ];

    /// Entry at 1-based menu position `index`
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index.checked_sub(1)?)).copied()
    }

    /// Title shown above the editor
    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_index_is_one_based() {
        assert_eq!(MenuItem::from_index(0), None);
        assert_eq!(MenuItem::from_index(1), Some(MenuItem::AlarmTime));
        assert_eq!(MenuItem::from_index(5), Some(MenuItem::Date));
        assert_eq!(MenuItem::from_index(6), None);
    }

    #[test]
    fn test_labels_follow_order() {
        for (i, item) in MenuItem::ALL.into_iter().enumerate() {
            assert_eq!(item.label(), MenuItem::LABELS[i]);
        }
        assert_eq!(MenuItem::Snooze.label(), "SNOOZE PERIOD");
    }

    #[test]
    fn test_user_events() {
        assert!(Event::OpenMenu.is_user_event());
        assert!(Event::Chosen(MenuItem::Date).is_user_event());
        assert!(!Event::AlarmDue.is_user_event());
        assert!(!Event::PanelClosed.is_user_event());
    }
}

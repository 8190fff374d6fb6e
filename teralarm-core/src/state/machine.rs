//! Mode definitions and transitions

use super::events::{Event, MenuItem};

/// Screen that currently owns the display and the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle clock face
    Clock,
    /// Settings menu
    Menu,
    EditAlarmTime,
    EditChallenge,
    EditSnooze,
    EditClockTime,
    EditDate,
    /// Brightness panel
    Brightness,
    /// Diagnostics
    Debug,
    /// Alarm session running
    Alarm,
}

impl Mode {
    /// Check if this mode runs a settings editor
    pub fn is_editor(&self) -> bool {
        matches!(
            self,
            Mode::EditAlarmTime
                | Mode::EditChallenge
                | Mode::EditSnooze
                | Mode::EditClockTime
                | Mode::EditDate
        )
    }

    /// Check if the alarm trigger is watched in this mode
    pub fn watches_alarm(&self) -> bool {
        matches!(self, Mode::Clock)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            // Clock face
            (Clock, OpenMenu) => Menu,
            (Clock, AdjustBrightness) => Brightness,
            (Clock, AlarmDue) => Alarm,
            (Clock, ToggleAlarm) => Clock,

            // Menu
            (Menu, Chosen(item)) => Self::editor_for(item),
            (Menu, Back) => Clock,

            // Editors
            (mode, Saved | Back) if mode.is_editor() => Clock,

            // Brightness panel
            (Brightness, BrightnessChanged) => Brightness,
            (Brightness, PanelClosed) => Clock,
            (Brightness, EnterDebug) => Debug,

            // Debug
            (Debug, Back) => Clock,

            // Alarm
            (Alarm, SessionComplete) => Clock,

            // Default: stay in current mode
            _ => self,
        }
    }

    fn editor_for(item: MenuItem) -> Self {
        match item {
            MenuItem::AlarmTime => Mode::EditAlarmTime,
            MenuItem::Challenge => Mode::EditChallenge,
            MenuItem::Snooze => Mode::EditSnooze,
            MenuItem::ClockTime => Mode::EditClockTime,
            MenuItem::Date => Mode::EditDate,
        }
    }
}

//! Top-level application loop
//!
//! [`App::tick`] performs one cooperative step of whatever screen is active
//! and turns its outcome into a [`Mode`] transition. Settings changes are
//! persisted as soon as a screen reports them.

use core::task::Poll;

use teralarm_display::{CharLcd, Line};
use teralarm_hal::{DateTime, SettingsStore, StorageKey};

use crate::alarm::{AlarmSession, XorShift32};
use crate::board::{Board, ButtonId};
use crate::clockface;
use crate::context::{Activity, AppContext};
use crate::debug::DebugScreen;
use crate::editor::{ChallengeForm, ChoiceForm, DateForm, Edit, Editor, PeriodForm, TimeForm};
use crate::feedback;
use crate::panel::{step_level, BrightnessPanel, PanelOutcome};
use crate::settings::Settings;
use crate::state::{Event, MenuItem, Mode};

/// The activity behind the current mode
enum Screen {
    Clock,
    Menu(Editor<ChoiceForm>),
    Time(Editor<TimeForm>),
    Challenge(Editor<ChallengeForm>),
    Period(Editor<PeriodForm>),
    Date(Editor<DateForm>),
    Brightness(BrightnessPanel),
    Debug(DebugScreen),
    Alarm(AlarmSession<XorShift32>),
}

/// Alarm clock application state
pub struct App<S> {
    store: S,
    settings: Settings,
    mode: Mode,
    screen: Screen,
    /// Hour and minute the alarm last went off, so it fires once per minute
    fired: Option<(u8, u8)>,
}

impl<S: SettingsStore> App<S> {
    /// Load settings from `store` and start on the clock face
    pub fn new(mut store: S) -> Self {
        let settings = Settings::load(&mut store);
        Self {
            store,
            settings,
            mode: Mode::Clock,
            screen: Screen::Clock,
            fired: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One cooperative step of the active screen
    pub fn tick<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        match &mut self.screen {
            Screen::Clock => self.clock_tick(ctx),
            Screen::Menu(editor) => {
                if let Poll::Ready(edit) = editor.step(ctx) {
                    self.menu_done(ctx, edit);
                }
            }
            Screen::Time(editor) => {
                if let Poll::Ready(edit) = editor.step(ctx) {
                    self.time_done(ctx, edit);
                }
            }
            Screen::Challenge(editor) => {
                if let Poll::Ready(edit) = editor.step(ctx) {
                    if let Edit::Saved(count) = edit {
                        self.settings.challenge = count;
                        self.persist(&[StorageKey::AlarmChallenge]);
                    }
                    self.edit_done(ctx, edit.is_saved());
                }
            }
            Screen::Period(editor) => {
                if let Poll::Ready(edit) = editor.step(ctx) {
                    if let Edit::Saved((minutes, seconds)) = edit {
                        self.settings.snooze_minutes = minutes;
                        self.settings.snooze_seconds = seconds;
                        self.persist(&[StorageKey::SnoozeMinutes, StorageKey::SnoozeSeconds]);
                    }
                    self.edit_done(ctx, edit.is_saved());
                }
            }
            Screen::Date(editor) => {
                if let Poll::Ready(edit) = editor.step(ctx) {
                    let stored = match edit {
                        Edit::Saved((day, month, year)) => {
                            let now = ctx.board.wall_clock();
                            let date = clamped_date(now, day, month, year);
                            info!("Date set to {}-{}-{}", date.year, date.month, date.day);
                            ctx.board.set_wall_clock(date).is_ok()
                        }
                        Edit::Cancelled => false,
                    };
                    self.edit_done(ctx, stored);
                }
            }
            Screen::Brightness(panel) => {
                if let Poll::Ready(outcome) = panel.step(ctx) {
                    self.panel_done(ctx, outcome);
                }
            }
            Screen::Debug(screen) => {
                if screen.step(ctx).is_ready() {
                    self.go(ctx, Event::Back);
                }
            }
            Screen::Alarm(session) => {
                if let Poll::Ready(outcome) = session.step(ctx) {
                    info!("Alarm session finished: {}", outcome);
                    self.go(ctx, Event::SessionComplete);
                }
            }
        }
    }

    fn clock_tick<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        let time = clockface::draw(ctx, &self.settings);
        if self.alarm_due(&time) {
            self.fired = Some((time.hour, time.minute));
            self.go(ctx, Event::AlarmDue);
            return;
        }

        match ctx.poll() {
            Some(ButtonId::Confirm) => self.go(ctx, Event::OpenMenu),
            Some(ButtonId::Cancel) => {
                self.settings.alarm_enabled = !self.settings.alarm_enabled;
                info!("Alarm enabled: {}", self.settings.alarm_enabled);
                self.persist(&[StorageKey::AlarmState]);
                self.go(ctx, Event::ToggleAlarm);
            }
            Some(button @ (ButtonId::Increment | ButtonId::Decrement)) => {
                let level = step_level(self.settings.brightness, button == ButtonId::Increment);
                self.set_brightness(level);
                self.go(ctx, Event::AdjustBrightness);
            }
            None => {}
        }
    }

    fn alarm_due(&mut self, time: &DateTime) -> bool {
        let now = (time.hour, time.minute);
        if self.fired.is_some_and(|fired| fired != now) {
            self.fired = None;
        }
        self.mode.watches_alarm()
            && self.settings.alarm_enabled
            && now == (self.settings.alarm_hour, self.settings.alarm_minute)
            && self.fired.is_none()
    }

    fn menu_done<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, edit: Edit<u8>) {
        match edit {
            Edit::Saved(index) => match MenuItem::from_index(index) {
                Some(item) => {
                    ctx.consume_pending_press();
                    self.go(ctx, Event::Chosen(item));
                }
                None => self.go(ctx, Event::Back),
            },
            Edit::Cancelled => self.go(ctx, Event::Back),
        }
    }

    fn time_done<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, edit: Edit<(u8, u8)>) {
        let stored = match edit {
            Edit::Saved((hour, minute)) if self.mode == Mode::EditAlarmTime => {
                self.settings.alarm_hour = hour;
                self.settings.alarm_minute = minute;
                self.persist(&[StorageKey::AlarmHours, StorageKey::AlarmMinutes]);
                true
            }
            Edit::Saved((hour, minute)) => {
                let now = ctx.board.wall_clock();
                info!("Time set to {}:{}", hour, minute);
                ctx.board.set_wall_clock(now.with_time(hour, minute, 0)).is_ok()
            }
            Edit::Cancelled => false,
        };
        self.edit_done(ctx, stored);
    }

    /// Confirm chime if the edit was stored, cancel chime otherwise
    fn edit_done<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, saved: bool) {
        if saved {
            feedback::confirm(ctx);
            self.go(ctx, Event::Saved);
        } else {
            feedback::cancel(ctx);
            self.go(ctx, Event::Back);
        }
    }

    fn panel_done<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, outcome: PanelOutcome) {
        match outcome {
            PanelOutcome::Changed(level) => {
                self.set_brightness(level);
                self.screen = Screen::Brightness(BrightnessPanel::new(level));
                self.go(ctx, Event::BrightnessChanged);
            }
            PanelOutcome::Timeout => self.go(ctx, Event::PanelClosed),
            PanelOutcome::Debug => self.go(ctx, Event::EnterDebug),
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.settings.brightness = level;
        self.persist(&[StorageKey::Brightness]);
    }

    fn persist(&mut self, keys: &[StorageKey]) {
        self.settings.persist(&mut self.store, keys);
    }

    /// Apply `event` and set up the screen for the new mode
    fn go<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, event: Event) {
        let next = self.mode.transition(event);
        if next == self.mode {
            return;
        }
        debug!("Mode {} -> {} on {}", self.mode, next, event);
        self.mode = next;
        self.enter(ctx);
    }

    fn enter<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        ctx.display.clear();
        let s = self.settings;
        self.screen = match self.mode {
            Mode::Clock => Screen::Clock,
            Mode::Menu => {
                title(ctx, "MENU");
                Screen::Menu(Editor::new(ChoiceForm::new(&MenuItem::LABELS, 1)))
            }
            Mode::EditAlarmTime => {
                title(ctx, MenuItem::AlarmTime.label());
                Screen::Time(Editor::new(TimeForm::new(s.alarm_hour, s.alarm_minute)))
            }
            Mode::EditChallenge => {
                title(ctx, MenuItem::Challenge.label());
                Screen::Challenge(Editor::new(ChallengeForm::new(s.challenge)))
            }
            Mode::EditSnooze => {
                title(ctx, MenuItem::Snooze.label());
                Screen::Period(Editor::new(PeriodForm::new(s.snooze_minutes, s.snooze_seconds)))
            }
            Mode::EditClockTime => {
                title(ctx, MenuItem::ClockTime.label());
                let now = ctx.board.wall_clock();
                Screen::Time(Editor::new(TimeForm::new(now.hour, now.minute)))
            }
            Mode::EditDate => {
                title(ctx, MenuItem::Date.label());
                let now = ctx.board.wall_clock();
                Screen::Date(Editor::new(DateForm::new(now.day, now.month, now.year)))
            }
            Mode::Brightness => Screen::Brightness(BrightnessPanel::new(s.brightness)),
            Mode::Debug => {
                ctx.consume_pending_press();
                Screen::Debug(DebugScreen::new(s))
            }
            Mode::Alarm => {
                let seed = ctx.board.wall_clock().unix_time();
                Screen::Alarm(AlarmSession::new(s.alarm_config(), XorShift32::new(seed)))
            }
        };
    }
}

fn title<B: Board, D: CharLcd>(ctx: &mut AppContext<B, D>, text: &str) {
    ctx.display.write_at(0, 0, Line::<20>::centered(text));
}

/// `now` moved to the given date, with the day pulled into the month
pub fn clamped_date(now: DateTime, day: u8, month: u8, year: u16) -> DateTime {
    let last = DateTime::days_in_month(year, month).max(1);
    now.with_date(year, month, day.clamp(1, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Buzzer;
    use crate::settings::tests::MemoryStore;
    use crate::testing::{context, row, FakeBoard, TestContext};
    use crate::board::ButtonId::{Cancel, Confirm, Decrement, Increment};

    /// Taps of `buttons` 400 ms apart starting at 100 ms
    fn script(buttons: &[ButtonId]) -> FakeBoard {
        let mut board = FakeBoard::new();
        for (i, &b) in buttons.iter().enumerate() {
            let start = 100 + 400 * i as u32;
            board.press(b, start, start + 150);
        }
        board
    }

    fn run(app: &mut App<MemoryStore>, ctx: &mut TestContext, until: u32) {
        while ctx.board.now < until {
            app.tick(ctx);
        }
    }

    fn slot(app: &App<MemoryStore>, key: StorageKey) -> Option<u8> {
        app.store().slots[usize::from(key.as_u8())]
    }

    #[test]
    fn test_set_alarm_time_through_menu() {
        let board = script(&[Confirm, Confirm, Increment, Confirm, Decrement, Confirm]);
        let mut ctx = context(board);
        let mut app = App::new(MemoryStore::default());

        run(&mut app, &mut ctx, 700);
        assert_eq!(app.mode(), Mode::EditAlarmTime);
        assert_eq!(row(&ctx, 0), "     SET ALARM      ");

        run(&mut app, &mut ctx, 5_000);
        assert_eq!(app.mode(), Mode::Clock);
        assert_eq!(app.settings().alarm_hour, 8);
        assert_eq!(app.settings().alarm_minute, 59);
        assert_eq!(slot(&app, StorageKey::AlarmHours), Some(8));
        assert_eq!(slot(&app, StorageKey::AlarmMinutes), Some(59));
        assert_eq!(ctx.board.blue_on_log.len(), 2);
    }

    #[test]
    fn test_cancelled_edit_keeps_settings() {
        let board = script(&[Confirm, Decrement, Decrement, Decrement, Confirm, Increment, Cancel]);
        let mut ctx = context(board);
        let mut app = App::new(MemoryStore::default());

        run(&mut app, &mut ctx, 2_300);
        assert_eq!(app.mode(), Mode::EditSnooze);
        assert_eq!(row(&ctx, 0), "   SNOOZE PERIOD    ");

        run(&mut app, &mut ctx, 6_000);
        // the cancel chime is the only sound
        assert_eq!(ctx.board.buzzer_log.first().map(|&(_, b)| b), Some(Buzzer::On));
        assert_eq!(app.mode(), Mode::Clock);
        assert_eq!(app.settings(), &Settings::default());
        assert_eq!(app.store().writes, 0);
    }

    #[test]
    fn test_set_clock_time_writes_rtc() {
        let board = script(&[Confirm, Decrement, Decrement, Confirm, Increment, Confirm, Confirm]);
        let mut ctx = context(board);
        let mut app = App::new(MemoryStore::default());
        run(&mut app, &mut ctx, 6_000);
        assert_eq!(app.mode(), Mode::Clock);
        assert_eq!(
            ctx.board.written_time,
            Some(DateTime::new(2024, 3, 14, 7, 59, 0))
        );
    }

    #[test]
    fn test_rejected_clock_write_plays_cancel() {
        let mut board = script(&[Confirm, Decrement, Decrement, Confirm, Increment, Confirm, Confirm]);
        board.rtc_fails = true;
        let mut ctx = context(board);
        let mut app = App::new(MemoryStore::default());
        run(&mut app, &mut ctx, 6_000);
        assert_eq!(app.mode(), Mode::Clock);
        assert_eq!(ctx.board.written_time, None);
        assert_eq!(ctx.board.buzzer_log.first().map(|&(_, b)| b), Some(Buzzer::On));
        assert!(ctx.board.blue_on_log.is_empty());
    }

    #[test]
    fn test_cancel_toggles_alarm() {
        let mut ctx = context(script(&[Cancel]));
        let mut app = App::new(MemoryStore::default());
        run(&mut app, &mut ctx, 400);
        assert!(app.settings().alarm_enabled);
        assert_eq!(slot(&app, StorageKey::AlarmState), Some(1));
        assert_eq!(app.mode(), Mode::Clock);
        assert!(row(&ctx, 0).starts_with("07:00"));
    }

    #[test]
    fn test_arrow_on_clock_opens_brightness_panel() {
        let mut ctx = context(script(&[Increment]));
        let mut app = App::new(MemoryStore::default());
        run(&mut app, &mut ctx, 400);
        assert_eq!(app.mode(), Mode::Brightness);
        assert_eq!(app.settings().brightness, 1);
        assert_eq!(slot(&app, StorageKey::Brightness), Some(1));
        assert_eq!(ctx.board.backlight.last(), Some(&0));

        run(&mut app, &mut ctx, 3_000);
        assert_eq!(app.mode(), Mode::Clock);
    }

    #[test]
    fn test_alarm_fires_once_per_minute() {
        let mut store = MemoryStore::default();
        store.slots[usize::from(StorageKey::AlarmHours.as_u8())] = Some(7);
        store.slots[usize::from(StorageKey::AlarmMinutes.as_u8())] = Some(0);
        store.slots[usize::from(StorageKey::AlarmState.as_u8())] = Some(1);
        let mut board = FakeBoard::new();
        board.time = DateTime::new(2024, 3, 14, 7, 0, 0);
        board.press(Confirm, 500, 650);
        let mut ctx = context(board);
        let mut app = App::new(store);

        app.tick(&mut ctx);
        assert_eq!(app.mode(), Mode::Alarm);

        run(&mut app, &mut ctx, 4_000);
        assert_eq!(app.mode(), Mode::Clock);
        assert!(ctx.board.backlight.contains(&255));

        // still 07:00:00 on the fake RTC
        run(&mut app, &mut ctx, 6_000);
        assert_eq!(app.mode(), Mode::Clock);
        assert_eq!(ctx.board.buzzer, Buzzer::Silent);
    }

    #[test]
    fn test_alarm_fires_after_panel_covers_minute_start() {
        let mut store = MemoryStore::default();
        store.slots[usize::from(StorageKey::AlarmHours.as_u8())] = Some(7);
        store.slots[usize::from(StorageKey::AlarmMinutes.as_u8())] = Some(0);
        store.slots[usize::from(StorageKey::AlarmState.as_u8())] = Some(1);
        let mut board = FakeBoard::new();
        board.time = DateTime::new(2024, 3, 14, 6, 59, 59);
        board.press(Increment, 100, 250);
        let mut ctx = context(board);
        let mut app = App::new(store);

        run(&mut app, &mut ctx, 400);
        assert_eq!(app.mode(), Mode::Brightness);

        // 07:00:00 passes while the panel is up
        ctx.board.time = DateTime::new(2024, 3, 14, 7, 0, 0);
        run(&mut app, &mut ctx, 1_000);
        assert_eq!(app.mode(), Mode::Brightness);
        ctx.board.time = DateTime::new(2024, 3, 14, 7, 0, 2);

        run(&mut app, &mut ctx, 4_000);
        assert_eq!(app.mode(), Mode::Alarm);
    }

    #[test]
    fn test_alarm_not_due_outside_alarm_minute() {
        let mut store = MemoryStore::default();
        store.slots[usize::from(StorageKey::AlarmState.as_u8())] = Some(1);
        let mut board = FakeBoard::new();
        board.time = DateTime::new(2024, 3, 14, 7, 1, 0);
        let mut ctx = context(board);
        let mut app = App::new(store);
        run(&mut app, &mut ctx, 500);
        assert_eq!(app.mode(), Mode::Clock);
    }

    #[test]
    fn test_disabled_alarm_does_not_fire() {
        let mut board = FakeBoard::new();
        board.time = DateTime::new(2024, 3, 14, 7, 0, 0);
        let mut ctx = context(board);
        let mut app = App::new(MemoryStore::default());
        run(&mut app, &mut ctx, 100);
        assert_eq!(app.mode(), Mode::Clock);
    }

    #[test]
    fn test_clamped_date() {
        let now = DateTime::new(2024, 3, 31, 9, 15, 0);
        assert_eq!(clamped_date(now, 31, 2, 2023), DateTime::new(2023, 2, 28, 9, 15, 0));
        assert_eq!(clamped_date(now, 29, 2, 2024), DateTime::new(2024, 2, 29, 9, 15, 0));
        assert_eq!(clamped_date(now, 31, 4, 2024).day, 30);
        assert_eq!(clamped_date(now, 15, 6, 2030).weekday, 6);
    }
}

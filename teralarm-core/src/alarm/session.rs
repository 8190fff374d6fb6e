//! Alarm session state machine
//!
//! ```text
//! Challenge ──press──> Correct ──points reached──> Disarming
//!     ^  │                │                            │
//!     │  └──> Incorrect   └──> Challenge (new target)  ├─ no snooze ──> done
//!     └──────────┘                                     v
//!                                 Skipping <──all held── Countdown
//!                                    │                     │ elapsed
//!                                  done                    v
//!                                          done <── Dismissing <──press── Alert
//! ```
//!
//! While the challenge is open the alarm text blinks once a second and the
//! buzzer and LEDs alternate every 100 ms. The backlight is pinned at full
//! brightness while the alarm or the snooze alert demands attention.

use core::fmt::Write;
use core::task::Poll;

use teralarm_display::glyphs::{BAR_LEFT, BAR_RIGHT};
use teralarm_display::{CharLcd, Text};

use super::snooze::SnoozeCountdown;
use super::TargetSource;
use crate::board::{Board, Buzzer, Led};
use crate::chime::{Chime, ChimePlayer};
use crate::context::{Activity, AppContext};
use crate::time::{elapsed, Interval};

/// Redraw period of the challenge screen
const REDRAW_MS: u32 = 1000;

/// Buzzer and LED alternation period while ringing
const TOGGLE_MS: u32 = 100;

/// Frequency of the ringing tone
const RING_HZ: u16 = 2000;

/// Snooze status LED flashes for the last 200 ms of every 5 s
const COUNTDOWN_FLASH_CYCLE_MS: u32 = 5000;
const COUNTDOWN_FLASH_AT_MS: u32 = 4800;

/// Snooze alert buzzes for the first 200 ms of every 5 s
const ALERT_CYCLE_MS: u32 = 5000;
const ALERT_BUZZ_MS: u32 = 200;

/// Dismiss prompt blink
const PROMPT_CYCLE_MS: u32 = 1500;
const PROMPT_ON_MS: u32 = 750;

/// What the session needs from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// Correct answers required; 0 disarms on any press
    pub challenge: u8,
    /// Snooze length; 0 ends the session once disarmed
    pub snooze_ms: u32,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionOutcome {
    /// Disarmed with no snooze configured
    Disarmed,
    /// Snooze cut short by holding all four buttons
    SnoozeSkipped,
    /// Snooze ran out and the alert was dismissed
    Dismissed,
}

/// Observable session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionPhase {
    Challenge,
    Correct,
    Incorrect,
    Disarming,
    Countdown,
    Skipping,
    Alert,
    Dismissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Challenge,
    Answered { player: ChimePlayer, correct: bool },
    Disarming(ChimePlayer),
    Countdown { countdown: SnoozeCountdown, flash: bool },
    Skipping(ChimePlayer),
    Alert { started: u32, flash: bool },
    Dismissing(ChimePlayer),
}

/// A ringing alarm, from first beep to final dismissal
pub struct AlarmSession<T> {
    config: AlarmConfig,
    targets: T,
    phase: Phase,
    begun: bool,
    points: u8,
    target: u8,
    redraw: Interval,
    toggle: Interval,
    show_label: bool,
    buzzing: bool,
}

impl<T: TargetSource> AlarmSession<T> {
    pub fn new(config: AlarmConfig, targets: T) -> Self {
        Self {
            config,
            targets,
            phase: Phase::Challenge,
            begun: false,
            points: 0,
            target: 0,
            redraw: Interval::new(REDRAW_MS),
            toggle: Interval::new(TOGGLE_MS),
            show_label: false,
            buzzing: false,
        }
    }

    /// Correct answers banked
    pub fn points(&self) -> u8 {
        self.points
    }

    /// Button number currently asked for
    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Challenge => SessionPhase::Challenge,
            Phase::Answered { correct: true, .. } => SessionPhase::Correct,
            Phase::Answered { correct: false, .. } => SessionPhase::Incorrect,
            Phase::Disarming(_) => SessionPhase::Disarming,
            Phase::Countdown { .. } => SessionPhase::Countdown,
            Phase::Skipping(_) => SessionPhase::Skipping,
            Phase::Alert { .. } => SessionPhase::Alert,
            Phase::Dismissing(_) => SessionPhase::Dismissing,
        }
    }

    fn begin<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        info!(
            "Alarm ringing, challenge {}, snooze {} ms",
            self.config.challenge, self.config.snooze_ms
        );
        self.begun = true;
        ctx.brightness.override_max(&mut ctx.board);
        ctx.display.clear();
        self.target = self.targets.next_target();
        self.begin_round(ctx);
    }

    fn begin_round<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        ctx.board.set_buzzer(Buzzer::Silent);
        self.phase = Phase::Challenge;
        self.redraw.expire();
        self.toggle.expire();
        self.show_label = false;
        self.buzzing = false;
    }

    fn challenge<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        let now = ctx.now();
        if self.redraw.ready(now) {
            self.draw_challenge(ctx);
        }
        if self.toggle.ready(now) {
            self.toggle_ring(ctx);
        }

        let Some(pressed) = ctx.poll() else {
            return;
        };

        if self.config.challenge == 0 {
            ctx.board.set_buzzer(Buzzer::Silent);
            ctx.consume_pending_press();
            ctx.display.clear();
            self.disarm(ctx);
            return;
        }

        ctx.display.clear();
        let correct = pressed.number() == self.target;
        if correct {
            self.points = self.points.saturating_add(1);
            info!("Correct, {}/{}", self.points, self.config.challenge);
            ctx.display.write_at(6, 1, "CORRECT!");
            self.phase = Phase::Answered {
                player: ChimePlayer::new(Chime::CORRECT),
                correct,
            };
        } else {
            self.points = self.points.saturating_sub(1);
            info!(
                "Incorrect ({} for {}), {}/{}",
                pressed.number(),
                self.target,
                self.points,
                self.config.challenge
            );
            ctx.display.write_at(5, 1, "INCORRECT!");
            self.phase = Phase::Answered {
                player: ChimePlayer::new(Chime::INCORRECT),
                correct,
            };
        }
    }

    fn draw_challenge<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        let time = ctx.board.wall_clock();

        let label = if self.show_label { "ALARM!" } else { "      " };
        ctx.display.write_at(0, 0, label);
        self.show_label = !self.show_label;

        let mut clock: Text<8> = Text::new();
        let _ = write!(clock, "{:02}:{:02}:{:02}", time.hour, time.minute, time.second);
        ctx.display.write_at(6, 1, clock.as_bytes());

        if self.config.challenge > 0 {
            let mut prompt: Text<8> = Text::new();
            let _ = write!(prompt, "ENTER: {}", self.target);
            ctx.display.write_at(6, 3, prompt.as_bytes());

            let mut progress: Text<7> = Text::new();
            let _ = write!(
                progress,
                "{}/{}",
                u16::from(self.points) + 1,
                self.config.challenge
            );
            let col = 20u8.saturating_sub(progress.len() as u8);
            ctx.display.write_at(col, 0, progress.as_bytes());
        } else {
            ctx.display.write_at(2, 3, "PRESS ANY BUTTON");
        }
    }

    fn toggle_ring<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        if self.buzzing {
            ctx.board.set_buzzer(Buzzer::On);
            ctx.board.set_led(Led::Red, true);
            ctx.board.set_led(Led::Blue, false);
        } else {
            ctx.board.set_buzzer(Buzzer::Tone(RING_HZ));
            ctx.board.set_led(Led::Red, false);
            ctx.board.set_led(Led::Blue, true);
        }
        self.buzzing = !self.buzzing;
    }

    fn answered<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, correct: bool) {
        ctx.consume_pending_press();
        ctx.display.clear();
        if !correct {
            // same question again
            self.begin_round(ctx);
        } else if self.points >= self.config.challenge {
            self.disarm(ctx);
        } else {
            self.target = self.targets.next_target();
            self.begin_round(ctx);
        }
    }

    fn disarm<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        info!("Alarm disarmed");
        ctx.display.write_at(3, 1, "ALARM DISABLED!");
        ctx.board.set_led(Led::Red, false);
        ctx.board.set_led(Led::Blue, false);
        self.phase = Phase::Disarming(ChimePlayer::new(Chime::DISARM));
    }

    fn disarmed<B: Board, D: CharLcd>(
        &mut self,
        ctx: &mut AppContext<B, D>,
    ) -> Poll<SessionOutcome> {
        ctx.brightness.restore(&mut ctx.board);
        if self.config.snooze_ms == 0 {
            return Poll::Ready(SessionOutcome::Disarmed);
        }

        info!("Snoozing for {} ms", self.config.snooze_ms);
        ctx.display.clear();
        ctx.display.write_at(6, 0, "SNOOZING");
        ctx.display.write_at(0, 3, [BAR_LEFT]);
        ctx.display.write_at(19, 3, [BAR_RIGHT]);
        let now = ctx.now();
        self.phase = Phase::Countdown {
            countdown: SnoozeCountdown::new(now, self.config.snooze_ms),
            flash: true,
        };
        Poll::Pending
    }

    fn countdown<B: Board, D: CharLcd>(
        &mut self,
        ctx: &mut AppContext<B, D>,
        countdown: SnoozeCountdown,
        mut flash: bool,
    ) {
        let now = ctx.now();
        if countdown.is_elapsed(now) {
            self.start_alert(ctx);
            return;
        }
        let _ = ctx.poll();

        ctx.display
            .write_at(7, 2, countdown.remaining_text(now).as_bytes());
        ctx.display.write_at(1, 3, countdown.bar(now));

        let cycle = countdown.elapsed_ms(now) % COUNTDOWN_FLASH_CYCLE_MS;
        if cycle >= COUNTDOWN_FLASH_AT_MS && flash {
            ctx.board.set_led(Led::Blue, true);
            flash = false;
        } else if cycle < COUNTDOWN_FLASH_AT_MS && !flash {
            ctx.board.set_led(Led::Blue, false);
            flash = true;
        }

        if ctx.all_buttons_down() {
            info!("Snooze skipped");
            ctx.consume_pending_press();
            ctx.display.clear();
            ctx.display.write_at(2, 1, "SNOOZE SKIPPED!");
            self.phase = Phase::Skipping(ChimePlayer::new(Chime::SKIP));
            return;
        }
        self.phase = Phase::Countdown { countdown, flash };
    }

    fn start_alert<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) {
        info!("Snooze elapsed");
        ctx.brightness.override_max(&mut ctx.board);
        ctx.consume_pending_press();
        ctx.board.set_led(Led::Blue, false);
        ctx.display.clear();
        ctx.display.write_at(3, 0, "SNOOZE ELAPSED");
        let started = ctx.now();
        self.phase = Phase::Alert {
            started,
            flash: true,
        };
    }

    fn alert<B: Board, D: CharLcd>(
        &mut self,
        ctx: &mut AppContext<B, D>,
        started: u32,
        mut flash: bool,
    ) {
        let since = elapsed(ctx.now(), started);

        if ctx.poll().is_some() {
            info!("Snooze alert dismissed");
            ctx.consume_pending_press();
            ctx.board.set_buzzer(Buzzer::Silent);
            ctx.board.set_led(Led::Red, false);
            ctx.display.clear();
            ctx.display.write_at(5, 1, "DISMISSED!");
            self.phase = Phase::Dismissing(ChimePlayer::new(Chime::DISARM));
            return;
        }

        if since % PROMPT_CYCLE_MS >= PROMPT_ON_MS {
            ctx.display.write_at(2, 2, [b' '; 16]);
            ctx.display.write_at(5, 3, [b' '; 10]);
        } else {
            ctx.display.write_at(2, 2, "PRESS ANY BUTTON");
            ctx.display.write_at(5, 3, "TO DISMISS");
        }

        let beat = since % ALERT_CYCLE_MS;
        if beat < ALERT_BUZZ_MS && flash {
            ctx.board.set_buzzer(Buzzer::On);
            ctx.board.set_led(Led::Red, true);
            flash = false;
        } else if beat >= ALERT_BUZZ_MS && !flash {
            ctx.board.set_buzzer(Buzzer::Silent);
            ctx.board.set_led(Led::Red, false);
            flash = true;
        }
        self.phase = Phase::Alert { started, flash };
    }
}

impl<T: TargetSource> Activity for AlarmSession<T> {
    type Output = SessionOutcome;

    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<SessionOutcome> {
        if !self.begun {
            self.begin(ctx);
        }

        match self.phase {
            Phase::Challenge => self.challenge(ctx),
            Phase::Answered { mut player, correct } => {
                if player.step(ctx).is_ready() {
                    self.answered(ctx, correct);
                } else {
                    self.phase = Phase::Answered { player, correct };
                }
            }
            Phase::Disarming(mut player) => {
                if player.step(ctx).is_ready() {
                    return self.disarmed(ctx);
                }
                self.phase = Phase::Disarming(player);
            }
            Phase::Countdown { countdown, flash } => self.countdown(ctx, countdown, flash),
            Phase::Skipping(mut player) => {
                if player.step(ctx).is_ready() {
                    return Poll::Ready(SessionOutcome::SnoozeSkipped);
                }
                self.phase = Phase::Skipping(player);
            }
            Phase::Alert { started, flash } => self.alert(ctx, started, flash),
            Phase::Dismissing(mut player) => {
                if player.step(ctx).is_ready() {
                    ctx.brightness.restore(&mut ctx.board);
                    return Poll::Ready(SessionOutcome::Dismissed);
                }
                self.phase = Phase::Dismissing(player);
            }
        }
        Poll::Pending
    }
}

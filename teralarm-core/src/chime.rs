//! Buzzer and LED sequences
//!
//! A [`Chime`] is a fixed table of output states, each held for a time.
//! [`ChimePlayer`] plays one as an [`Activity`] so the caller keeps its
//! loop running; [`Chime::play`] is the blocking form for code that has
//! nothing else to do meanwhile. Both keep the background tasks running
//! and absorb presses while the chime sounds.

use core::task::Poll;

use teralarm_display::CharLcd;

use crate::board::{Board, Buzzer, Led};
use crate::context::{Activity, AppContext};
use crate::time::elapsed;

/// One output state of a chime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cue {
    pub buzzer: Buzzer,
    pub red: bool,
    pub blue: bool,
    /// How long the state lasts before the next cue
    pub hold_ms: u32,
}

impl Cue {
    const fn quiet(hold_ms: u32) -> Self {
        Self {
            buzzer: Buzzer::Silent,
            red: false,
            blue: false,
            hold_ms,
        }
    }

    const fn blue(buzzer: Buzzer, hold_ms: u32) -> Self {
        Self {
            buzzer,
            red: false,
            blue: true,
            hold_ms,
        }
    }

    const fn red(buzzer: Buzzer, hold_ms: u32) -> Self {
        Self {
            buzzer,
            red: true,
            blue: false,
            hold_ms,
        }
    }

    fn apply<B: Board>(&self, board: &mut B) {
        board.set_buzzer(self.buzzer);
        board.set_led(Led::Red, self.red);
        board.set_led(Led::Blue, self.blue);
    }
}

/// A sequence of cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chime {
    cues: &'static [Cue],
}

impl Chime {
    /// Rising two-tone with the blue LED
    pub const CORRECT: Chime = Chime {
        cues: &[
            Cue::blue(Buzzer::Tone(2000), 500),
            Cue::blue(Buzzer::Tone(1000), 500),
            Cue::quiet(0),
        ],
    };

    /// Falling two-tone with the red LED
    pub const INCORRECT: Chime = Chime {
        cues: &[
            Cue::red(Buzzer::Tone(1000), 500),
            Cue::red(Buzzer::Tone(2000), 500),
            Cue::quiet(0),
        ],
    };

    /// Three 400 ms buzzes after disarming or dismissing
    pub const DISARM: Chime = Chime {
        cues: &[
            Cue::quiet(400),
            Cue::blue(Buzzer::On, 400),
            Cue::quiet(400),
            Cue::blue(Buzzer::On, 400),
            Cue::quiet(400),
            Cue::blue(Buzzer::On, 400),
            Cue::quiet(0),
        ],
    };

    /// Three short buzzes and a pause when the snooze is skipped
    pub const SKIP: Chime = Chime {
        cues: &[
            Cue::quiet(200),
            Cue::blue(Buzzer::On, 200),
            Cue::quiet(200),
            Cue::blue(Buzzer::On, 200),
            Cue::quiet(200),
            Cue::blue(Buzzer::On, 200),
            Cue::quiet(800),
        ],
    };

    /// Settings saved
    pub const CONFIRM: Chime = Chime {
        cues: &[
            Cue::quiet(400),
            Cue::blue(Buzzer::On, 200),
            Cue::quiet(400),
            Cue::blue(Buzzer::On, 200),
            Cue::quiet(800),
        ],
    };

    /// Settings discarded
    pub const CANCEL: Chime = Chime {
        cues: &[Cue::red(Buzzer::On, 1000), Cue::quiet(1000)],
    };

    /// The cue table
    pub fn cues(&self) -> &'static [Cue] {
        self.cues
    }

    /// Total playing time
    pub fn duration_ms(&self) -> u32 {
        self.cues.iter().map(|c| c.hold_ms).sum()
    }

    /// Play to the end, keeping background tasks running
    pub fn play<B: Board, D: CharLcd>(self, ctx: &mut AppContext<B, D>) {
        for cue in self.cues {
            cue.apply(&mut ctx.board);
            ctx.run_for(cue.hold_ms);
        }
    }
}

/// Non-blocking chime playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChimePlayer {
    chime: Chime,
    index: usize,
    /// Start of the current cue, `None` before the first step
    cue_start: Option<u32>,
}

impl ChimePlayer {
    pub fn new(chime: Chime) -> Self {
        Self {
            chime,
            index: 0,
            cue_start: None,
        }
    }
}

impl Activity for ChimePlayer {
    type Output = ();

    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<()> {
        let cues = self.chime.cues;
        let Some(first) = cues.first() else {
            return Poll::Ready(());
        };

        let now = ctx.now();
        let mut start = match self.cue_start {
            Some(start) => start,
            None => {
                first.apply(&mut ctx.board);
                now
            }
        };

        while elapsed(now, start) >= cues[self.index].hold_ms {
            if self.index + 1 == cues.len() {
                return Poll::Ready(());
            }
            self.index += 1;
            cues[self.index].apply(&mut ctx.board);
            start = now;
        }
        self.cue_start = Some(start);

        let _ = ctx.poll();
        Poll::Pending
    }
}

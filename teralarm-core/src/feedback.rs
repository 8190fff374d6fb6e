//! Saved / discarded feedback shown after a settings screen closes

use teralarm_display::CharLcd;

use crate::board::Board;
use crate::chime::Chime;
use crate::context::AppContext;

/// Acknowledge saved values
///
/// Leaves whatever the caller drew on screen while the chime plays.
pub fn confirm<B: Board, D: CharLcd>(ctx: &mut AppContext<B, D>) {
    Chime::CONFIRM.play(ctx);
    ctx.consume_pending_press();
    ctx.display.clear();
}

/// Acknowledge discarded values
pub fn cancel<B: Board, D: CharLcd>(ctx: &mut AppContext<B, D>) {
    ctx.display.clear();
    ctx.display.write_at(5, 1, "CANCELLED!");
    Chime::CANCEL.play(ctx);
    ctx.consume_pending_press();
    ctx.display.clear();
}

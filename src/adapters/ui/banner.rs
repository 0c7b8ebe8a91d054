//! Neon welcome banner with a per-character gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

const TITLE: &str = "== CLASSROOM CLIENT ==";

/// Neon Purple (#bc13fe).
const NEON_PURPLE: (u8, u8, u8) = (0xbc, 0x13, 0xfe);
/// Cyber Green (#0ff0fc).
const CYBER_GREEN: (u8, u8, u8) = (0x0f, 0xf0, 0xfc);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Prints the title with a purple-to-green gradient, then the version and API root.
pub fn print_welcome(base_url: &str) {
    let mut out = stdout();
    let chars: Vec<char> = TITLE.chars().collect();
    let last = chars.len().saturating_sub(1).max(1);

    for (i, ch) in chars.iter().enumerate() {
        let (r, g, b) = lerp_rgb(NEON_PURPLE, CYBER_GREEN, i as f64 / last as f64);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(ch));
    }
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print("\r\n"));

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: CYBER_GREEN.0,
        g: CYBER_GREEN.1,
        b: CYBER_GREEN.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  ·  {}\r\n",
        env!("CARGO_PKG_VERSION"),
        base_url
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

//! Console output for the scripts: leveled, colorized `label message` lines and key/value helpers.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

use crate::lamports_to_sol;

#[derive(strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(&self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }
}

fn log(level: Level, label: impl Display, msg: impl Display) {
    let color = level.color();
    println!(
        "[{}] {} {}",
        level.to_string().color(color),
        label.to_string().color(LogColor::Debug),
        msg.to_string().bright_black()
    );
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Debug,
    Error,
    Warning,
    Header,
    Info,
    Gray,
    FadedGray,
}

/// Formats `key: value` with the key colored, defaulting to [`LogColor::Header`].
#[macro_export]
macro_rules! fmt_kv {
    ($key:expr, $value:expr) => {
        $crate::fmt_kv!($key, $value, $crate::logs::LogColor::Header)
    };
    ($key:expr, $value:expr, $color:expr) => {{
        use ::colored::Colorize as _;
        format!("{}: {}", $key.to_string().color($color), $value)
    }};
}

#[macro_export]
macro_rules! print_kv {
    ($key:expr, $value:expr) => {
        println!("{}", $crate::fmt_kv!($key, $value))
    };
    ($key:expr, $value:expr, $color:expr) => {
        println!("{}", $crate::fmt_kv!($key, $value, $color))
    };
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { log(Level::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { log(Level::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { log(Level::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { log(Level::Error, label, msg) }
    pub fn log_divider() { println!("{}", "-".repeat(80).color(LogColor::FadedGray)); }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight  => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Debug      => Color::TrueColor { r: 40,  g: 100, b: 153 },
                LogColor::Error      => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning    => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Header     => Color::TrueColor { r: 0,   g: 255, b: 0   },
                LogColor::Info       => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray       => Color::TrueColor { r: 192, g: 192, b: 192 },
                LogColor::FadedGray  => Color::TrueColor { r: 95,  g: 95,  b: 95  },
            }
        }
    }
}

pub use unformatted::*;

/// Logs a balance in both lamports and SOL.
pub fn log_balance(label: impl Display, lamports: u64) {
    log_info(
        label,
        format!("{lamports} lamports ({} SOL)", lamports_to_sol(lamports)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_kv_contains_key_and_value() {
        colored::control::set_override(false);
        assert_eq!(fmt_kv!("Mint", 42), "Mint: 42");
        assert_eq!(fmt_kv!("Payer", "abc", LogColor::Gray), "Payer: abc");
    }
}

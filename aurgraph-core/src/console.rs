use std::env;
use std::sync::OnceLock;

fn use_color() -> bool {
    static USE_COLOR: OnceLock<bool> = OnceLock::new();
    *USE_COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none())
}

fn paint(code: &str, text: &str) -> String {
    if use_color() {
        format!("\u{1b}[{}m{}\u{1b}[0m", code, text)
    } else {
        text.to_string()
    }
}

fn yellow(text: &str) -> String {
    paint("33", text)
}

fn red(text: &str) -> String {
    paint("31", text)
}

/// Diagnostics go to stderr so they never interleave with ordered output.
pub fn warn(message: &str) {
    eprintln!("{} {}", yellow("warning:"), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", red("error:"), message);
}

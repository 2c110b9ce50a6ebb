use owo_colors::OwoColorize;

/// Consistent colored user-facing messages; colors only on a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Plain user-facing line (no prefix), for output users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

use std::env;

use colored::{ColoredString, Colorize};

use crate::core::status::Status;

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Success,
    Warning,
    Error,
    Cyan,
    Magenta,
}

impl BoxStyle {
    /// Box tint for a reading status, matching the palette the HTML
    /// export uses: balanced green, too much amber, too little sky,
    /// unacknowledged violet.
    pub fn for_status(status: Status) -> BoxStyle {
        match status {
            Status::Balanced => BoxStyle::Success,
            Status::TooMuch => BoxStyle::Warning,
            Status::TooLittle => BoxStyle::Cyan,
            Status::Unacknowledged => BoxStyle::Magenta,
        }
    }

    fn emblem(&self) -> &'static str {
        match self {
            BoxStyle::Info | BoxStyle::Cyan => "💙",
            BoxStyle::Success => "💚",
            BoxStyle::Warning => "💛",
            BoxStyle::Error => "❤️",
            BoxStyle::Magenta => "💜",
        }
    }

    fn bright(&self, text: &str) -> ColoredString {
        match self {
            BoxStyle::Info | BoxStyle::Cyan => text.bright_cyan(),
            BoxStyle::Success => text.bright_green(),
            BoxStyle::Warning => text.bright_yellow(),
            BoxStyle::Error => text.bright_red(),
            BoxStyle::Magenta => text.bright_magenta(),
        }
    }

    fn dim(&self, text: &str) -> ColoredString {
        match self {
            BoxStyle::Info | BoxStyle::Cyan => text.cyan(),
            BoxStyle::Success => text.green(),
            BoxStyle::Warning => text.yellow(),
            BoxStyle::Error => text.red(),
            BoxStyle::Magenta => text.magenta(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Created,
    Preserved,
    Unchanged,
    Failed,
    Info,
    Pass,
    Fail,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Created => "✨",
            ItemStatus::Preserved => "📎",
            ItemStatus::Unchanged => "➖",
            ItemStatus::Failed => "💥",
            ItemStatus::Info => "💡",
            ItemStatus::Pass => "✅",
            ItemStatus::Fail => "❌",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            ItemStatus::Created | ItemStatus::Pass => text.bright_green(),
            ItemStatus::Preserved => text.bright_yellow(),
            ItemStatus::Unchanged => text.bright_black(),
            ItemStatus::Failed | ItemStatus::Fail => text.bright_red(),
            ItemStatus::Info => text.cyan(),
        }
    }
}

pub fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().max(MIN_BOX_WIDTH).min(MAX_BOX_WIDTH)
}

fn indent() -> usize {
    (terminal_width().saturating_sub(effective_width())) / 2
}

pub fn box_top(width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH).min(effective_width());
    format!("╔{}╗", "═".repeat(w.saturating_sub(2)))
}

pub fn box_bottom(width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH).min(effective_width());
    format!("╚{}╝", "═".repeat(w.saturating_sub(2)))
}

pub fn box_row(left: &str, content: &str, right: &str, width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH).min(effective_width());
    let content_len = content.chars().count();
    let padding = w.saturating_sub(2).saturating_sub(content_len);
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "{}{}{}{}{}",
        left,
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad),
        right
    )
}

pub fn render_box(title: &str, subtitle: &str, style: BoxStyle) {
    let width = effective_width();
    let indent_s = " ".repeat(indent());

    println!("{} {}", indent_s, style.emblem());
    println!("{}{}", indent_s, style.bright(&box_top(width)));
    println!(
        "{}{}",
        indent_s,
        style.bright(&box_row("║", title, "║", width)).bold()
    );
    if !subtitle.is_empty() {
        println!(
            "{}{}",
            indent_s,
            style.dim(&box_row("║", subtitle, "║", width))
        );
    }
    println!("{}{}", indent_s, style.bright(&box_bottom(width)));
}

pub fn print_item(item: &str, status: ItemStatus) {
    let indent_s = " ".repeat(indent() + 2);
    println!(
        "{} {} {}",
        indent_s,
        status.paint(status.icon()),
        item.bright_white()
    );
}

pub fn print_items_grid(items: &[(&str, ItemStatus)], cols: usize) {
    let width = effective_width();
    let indent_s = " ".repeat(indent() + 2);
    let available = width.saturating_sub(4);
    let col_width = (available / cols.max(1)).max(20);

    let mut col_pos = 0;
    for (item, status) in items {
        let line = format!("{} {}", status.icon(), item);
        print!(
            "{}{:<width$}",
            indent_s,
            status.paint(&line),
            width = col_width
        );
        col_pos += 1;
        if col_pos >= cols {
            println!();
            col_pos = 0;
        }
    }
    if col_pos > 0 {
        println!();
    }
}

pub fn print_section(title: &str) {
    let indent_s = " ".repeat(indent() + 2);
    println!();
    println!("{}{}", indent_s, title.bold());
}

pub fn print_status_line(message: &str, status: ItemStatus) {
    let indent_s = " ".repeat(indent() + 2);
    println!(
        "{}{} {}",
        indent_s,
        status.paint(status.icon()),
        message.bright_white()
    );
}

pub fn print_summary(pass: usize, fail: usize) {
    let width = effective_width();
    let indent_s = " ".repeat(indent());

    println!();
    println!("{}{}", indent_s, "📊".bold());
    println!("{}{}", indent_s, box_top(width));
    println!("{}{}", indent_s, box_row("║", "RESULTS", "║", width).bold());
    println!("{}{}", indent_s, box_bottom(width));
    println!();

    let indent_s2 = " ".repeat(indent() + 2);
    if fail == 0 {
        println!("{}  {} All gates passed!", indent_s2, "✅".bright_green());
    }
    println!("{}{:>6}  {}", indent_s2, pass, "✅".bright_green());
    if fail > 0 {
        println!("{}{:>6}  {}", indent_s2, fail, "❌".bright_red());
    }
    println!("{}{:>6}  total", indent_s2, pass + fail);
}

pub fn print_list(items: &[&str]) {
    let indent_s = " ".repeat(indent() + 2);
    for item in items {
        println!("{}  • {}", indent_s, item.bright_white());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_row_pads_to_width() {
        let row = box_row("║", "Drive", "║", 40);
        assert!(row.starts_with('║'));
        assert!(row.ends_with('║'));
        assert_eq!(row.chars().count(), 40);
    }

    #[test]
    fn test_status_styles() {
        assert_eq!(BoxStyle::for_status(Status::Balanced), BoxStyle::Success);
        assert_eq!(BoxStyle::for_status(Status::TooMuch), BoxStyle::Warning);
        assert_eq!(BoxStyle::for_status(Status::TooLittle), BoxStyle::Cyan);
        assert_eq!(
            BoxStyle::for_status(Status::Unacknowledged),
            BoxStyle::Magenta
        );
    }
}

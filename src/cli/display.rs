// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the quarry CLI.
//!
//! Everything is drawn inside fixed-width boxes. Colors are picked by what a
//! piece of text *is* (a rank, a score, a date) rather than by hue, so the
//! two palettes only have to agree on roles. `QUARRY_THEME=light` selects the
//! light palette; `NO_COLOR` or a non-TTY stdout turns colors off entirely.

use std::sync::OnceLock;

/// Inner width of every box, between the `│` borders.
pub const BOX_WIDTH: usize = 80;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// ROLES AND PALETTES
// ═══════════════════════════════════════════════════════════════════════════

/// What a colored span means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Box borders
    Frame,
    /// Double-line banner borders
    Banner,
    /// Section labels and banner titles
    Heading,
    /// Article titles
    Title,
    /// `#1`, `#2`, ...
    Rank,
    /// Dates and keys worth picking out
    Detail,
    /// Counts in the statistics report
    Count,
    /// Parser warnings
    Warn,
    /// Document ids and notices
    Muted,
    ScoreHigh,
    ScoreMid,
    ScoreLow,
}

type Rgb = (u8, u8, u8);

/// Colors per role, in `Role` declaration order.
struct Palette([Rgb; 12]);

// OneDark / One Light hues.
const DARK: Palette = Palette([
    (92, 99, 112),   // Frame
    (97, 175, 239),  // Banner
    (86, 182, 194),  // Heading
    (102, 217, 239), // Title
    (127, 200, 255), // Rank
    (198, 120, 221), // Detail
    (152, 195, 121), // Count
    (229, 192, 123), // Warn
    (92, 99, 112),   // Muted
    (166, 226, 46),  // ScoreHigh
    (152, 195, 121), // ScoreMid
    (229, 192, 123), // ScoreLow
]);

const LIGHT: Palette = Palette([
    (160, 161, 167),
    (64, 120, 242),
    (1, 132, 188),
    (1, 112, 158),
    (54, 100, 212),
    (166, 38, 164),
    (80, 161, 79),
    (193, 132, 1),
    (160, 161, 167),
    (68, 140, 39),
    (80, 161, 79),
    (193, 132, 1),
]);

fn palette() -> &'static Palette {
    static LIGHT_THEME: OnceLock<bool> = OnceLock::new();
    let light = *LIGHT_THEME.get_or_init(|| {
        std::env::var("QUARRY_THEME").is_ok_and(|t| t.eq_ignore_ascii_case("light"))
    });
    if light {
        &LIGHT
    } else {
        &DARK
    }
}

fn escape((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors are on unless `NO_COLOR` is set or stdout is not a terminal.
pub fn use_colors() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

/// `text` in the color for `role`, after any `modifiers`.
pub fn themed(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!(
            "{}{}{}{}",
            modifiers.concat(),
            escape(palette().0[role as usize]),
            text,
            RESET
        )
    } else {
        text.to_string()
    }
}

/// Opening escape for `role`, empty when colors are off.
fn paint(role: Role) -> String {
    if use_colors() {
        escape(palette().0[role as usize])
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Display width of `s`, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// `│ content          │`
pub fn row(content: &str) {
    let border = paint(Role::Frame);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

fn labelled_rule(left: char, right: char, label: &str) {
    let border = paint(Role::Frame);
    let label_part = format!("─ {} ", themed(Role::Heading, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}{}{}{}{}{}",
        border,
        left,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        right,
        reset()
    );
}

/// `┌─ LABEL ──────────┐`
pub fn section_top(label: &str) {
    labelled_rule('┌', '┐', label);
}

/// `├─ LABEL ──────────┤`
pub fn section_mid(label: &str) {
    labelled_rule('├', '┤', label);
}

/// `└──────────────────┘`
pub fn section_bot() {
    println!("{}└{}┘{}", paint(Role::Frame), "─".repeat(BOX_WIDTH), reset());
}

/// Three-line double-bordered banner around `text`.
pub fn banner(text: &str) {
    let border = paint(Role::Banner);
    let colored = themed(Role::Heading, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;

    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), reset());
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        reset(),
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad),
        border,
        reset()
    );
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Cut plain text to `max` characters, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if !line.is_empty() && line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn score_role(score: f64) -> Role {
    if score >= 0.05 {
        Role::ScoreHigh
    } else if score >= 0.01 {
        Role::ScoreMid
    } else if score > 0.0 {
        Role::ScoreLow
    } else {
        Role::Muted
    }
}

/// Term-frequency score, colored by band. Scores are fractions, usually well
/// under 0.1.
pub fn score_value(score: f64) -> String {
    themed(score_role(score), &[], &format!("{:>8.5}", score))
}

/// Rank badge: `#1`, `#2`, ...
pub fn rank_label(rank: usize) -> String {
    themed(Role::Rank, &[BOLD], &format!("#{:<2}", rank))
}

/// First `max` authors, then `et al.` if there are more
pub fn author_list(authors: &[String], max: usize) -> String {
    let shown: Vec<&str> = authors.iter().take(max).map(String::as_str).collect();
    let mut list = shown.join(", ");
    if authors.len() > max {
        list.push_str(", et al.");
    }
    list
}

pub fn warning(message: &str) -> String {
    themed(Role::Warn, &[], &format!("⚠ {}", message))
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════

//! Row formatting for the entity tables.
//!
//! Cell builders are pure so both the TUI screens and the CLI listings share
//! one source of truth for column content.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::{ChiefMinister, User};

pub const CM_HEADER: [&str; 8] = [
    "#", "Name", "Party", "State", "Term", "Current", "Age", "Gender",
];
pub const CM_WIDTHS: [usize; 8] = [3, 20, 16, 14, 15, 7, 3, 6];

pub const USER_HEADER: [&str; 6] = ["Avatar", "Username", "Full Name", "Email", "Role", "Verified"];
pub const USER_WIDTHS: [usize; 6] = [6, 16, 20, 26, 5, 8];

/// Cells for one CM table row; `index` is zero-based, the first column shows
/// `index + 1`.
pub fn cm_row_cells(index: usize, cm: &ChiefMinister) -> Vec<String> {
    vec![
        (index + 1).to_string(),
        cm.name.clone(),
        cm.party.clone(),
        cm.state.clone(),
        term_label(cm),
        if cm.is_current { "Yes" } else { "No" }.to_string(),
        cm.age.to_string(),
        cm.gender.as_str().to_string(),
    ]
}

/// Term column: start year → end year, "Present" for a sitting CM with no
/// end date, "-" when unknown.
pub fn term_label(cm: &ChiefMinister) -> String {
    let start = cm
        .term_start
        .map(|d| d.format("%Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let end = match cm.term_end {
        Some(d) => d.format("%Y").to_string(),
        None if cm.is_current => "Present".to_string(),
        None => "-".to_string(),
    };
    format!("{} -> {}", start, end)
}

pub fn user_row_cells(user: &User) -> Vec<String> {
    vec![
        if user.avatar.is_some() { "yes" } else { "-" }.to_string(),
        user.username.clone(),
        user.full_name.clone(),
        user.email.clone(),
        user.role.as_str().to_string(),
        if user.is_verified { "yes" } else { "no" }.to_string(),
    ]
}

/// Fit a cell to a display width: pad with spaces, or truncate with a
/// trailing ellipsis. Width-aware so CJK names do not break the columns.
pub fn fit_width(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0usize;
    let budget = width.saturating_sub(1);
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    format!("{}{}", out, " ".repeat(width.saturating_sub(used + 1)))
}

/// Join fitted cells into one table line.
pub fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit_width(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn format_header(header: &[&str], widths: &[usize]) -> String {
    let cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    format_row(&cells, widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::{TimeZone, Utc};

    fn cm(term_start: Option<(i32, u32, u32)>, term_end: Option<(i32, u32, u32)>, is_current: bool) -> ChiefMinister {
        let to_dt = |(y, m, d): (i32, u32, u32)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        ChiefMinister {
            id: "cm1".to_string(),
            name: "A. Sharma".to_string(),
            party: "Unity Party".to_string(),
            state: "Rajasthan".to_string(),
            age: 58,
            gender: Gender::Female,
            term_start: term_start.map(to_dt),
            term_end: term_end.map(to_dt),
            is_current,
        }
    }

    #[test]
    fn test_term_label_variants() {
        assert_eq!(term_label(&cm(Some((2019, 12, 17)), None, true)), "2019 -> Present");
        assert_eq!(
            term_label(&cm(Some((2014, 1, 1)), Some((2019, 12, 16)), false)),
            "2014 -> 2019"
        );
        assert_eq!(term_label(&cm(None, None, false)), "- -> -");
    }

    #[test]
    fn test_row_index_is_one_based() {
        let cells = cm_row_cells(0, &cm(None, None, false));
        assert_eq!(cells[0], "1");
        let cells = cm_row_cells(4, &cm(None, None, false));
        assert_eq!(cells[0], "5");
    }

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        // Wide characters count double
        assert_eq!(fit_width("日本語", 6), "日本語");
        assert_eq!(fit_width("日本語です", 6), "日本… ");
    }

    #[test]
    fn test_format_row_aligns_columns() {
        let cells = vec!["1".to_string(), "abc".to_string()];
        assert_eq!(format_row(&cells, &[3, 5]), "1   | abc  ");
    }
}

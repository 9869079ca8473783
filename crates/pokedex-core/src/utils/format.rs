/// Highest base stat any Pokémon has; stat bars are scaled against it
pub const MAX_BASE_STAT: u32 = 255;

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Height from decimetres, e.g. `7` -> `"0.7 m"`
pub fn format_height(decimetres: u32) -> String {
    format!("{} m", decimetres as f64 / 10.0)
}

/// Weight from hectograms, e.g. `69` -> `"6.9 kg"`
pub fn format_weight(hectograms: u32) -> String {
    format!("{} kg", hectograms as f64 / 10.0)
}

/// Share of `MAX_BASE_STAT` as a 0..=100 percentage
pub fn stat_percent(base_stat: u32) -> u16 {
    ((base_stat.min(MAX_BASE_STAT) * 100) / MAX_BASE_STAT) as u16
}

/// Pokédex number as shown on cards, e.g. `#025`
pub fn format_dex_number(id: u32) -> String {
    format!("#{:03}", id)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

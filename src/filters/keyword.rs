/// Case-insensitive substring match; a missing or empty keyword matches everything
pub fn matches_keyword(text: &str, keyword: Option<&str>) -> bool {
    match keyword {
        Some(keyword) if !keyword.is_empty() => {
            text.to_lowercase().contains(&keyword.to_lowercase())
        }
        _ => true,
    }
}

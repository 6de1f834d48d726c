pub fn truncate_label(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &name[..byte_index],
        None => name,
    }
}

pub fn format_rejections(count: u32) -> String {
    if count == 1 {
        "1 rejection".to_owned()
    } else {
        format!("{count} rejections")
    }
}

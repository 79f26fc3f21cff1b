use maud::{html, Markup};

/// Horizontal bar; `count / total` clamped to 100%.
pub fn progress_bar(count: i64, total: usize) -> Markup {
    let total = total.max(1) as f64;
    let percent = ((count.max(0) as f64 / total) * 100.0).min(100.0);

    html! {
        div class="bar" {
            div style=(format!("width: {percent:.0}%")) {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped() {
        assert!(progress_bar(3, 4).into_string().contains("width: 75%"));
        assert!(progress_bar(9, 4).into_string().contains("width: 100%"));
        assert!(progress_bar(2, 0).into_string().contains("width: 100%"));
    }
}

use maud::{html, Markup};

/// Sidebar panel. `variant` is appended to the `card` class.
pub fn card(title: &str, variant: Option<&str>, body: Markup) -> Markup {
    let class = match variant {
        Some(v) => format!("card {v}"),
        None => "card".to_string(),
    };

    html! {
        section class=(class) {
            h3 { (title) }
            (body)
        }
    }
}

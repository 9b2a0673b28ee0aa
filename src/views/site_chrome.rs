// ============================================================================
// SITE HEADER / FOOTER - Markup estático de navegación (sin estado)
// ============================================================================

const NAV_LINKS: [(&str, &str); 3] = [
    ("/index.html", "Home"),
    ("/about.html", "About"),
    ("/contact.html", "Contact"),
];

fn render_nav(active_href: Option<&str>) -> String {
    NAV_LINKS
        .iter()
        .map(|(href, label)| {
            if Some(*href) == active_href {
                format!(r#"<a href="{}" class="active" aria-current="page">{}</a>"#, href, label)
            } else {
                format!(r#"<a href="{}">{}</a>"#, href, label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_header(active_href: Option<&str>) -> String {
    format!(
        "<link rel=\"stylesheet\" href=\"/styles/all.css\">\n<header>\n<nav aria-label=\"Main\">\n{}\n</nav>\n</header>",
        render_nav(active_href)
    )
}

pub fn render_footer(year: i32) -> String {
    format!(
        "<link rel=\"stylesheet\" href=\"/components/site-footer.css\">\n<footer>\n<div class=\"container\">\n<p>&copy; {} Picognito. All rights reserved.</p>\n<slot></slot>\n</div>\n</footer>",
        year
    )
}

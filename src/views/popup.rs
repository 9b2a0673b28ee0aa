use crate::utils::html::escape;
use crate::viewmodels::PopupView;

/// HTML del popup de una foto (diálogo accesible)
pub fn render_popup(view: &PopupView) -> String {
    format!(
        r#"<div class="photo-popup" id="{dialog_id}" role="dialog" aria-labelledby="{heading_id}">
<button type="button" class="photo-popup-close" data-action="close-popup" aria-label="{close_label}">&times;</button>
<img src="{src}" alt="{alt}" loading="lazy">
<p class="photo-credit" id="{heading_id}">{credit}</p>
<a class="attribution-link" href="{href}" target="_blank" rel="noopener noreferrer">{link_text}</a>
</div>"#,
        dialog_id = escape(&view.dialog_id),
        heading_id = escape(&view.heading_id),
        close_label = escape(&view.close_label),
        src = escape(&view.thumb_src),
        alt = escape(&view.thumb_alt),
        credit = escape(&view.credit),
        href = escape(&view.attribution_href),
        link_text = escape(&view.link_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::photo_at;
    use crate::viewmodels::MapViewModel;

    #[test]
    fn popup_markup_is_accessible() {
        let html = render_popup(&MapViewModel::build_popup(&photo_at("abc", 1.0, 2.0)));
        assert!(html.contains(r#"role="dialog""#));
        assert!(html.contains(r#"aria-labelledby="photo-title-abc""#));
        assert!(html.contains(r#"id="photo-title-abc""#));
        assert!(html.contains(r#"alt="A photo of abc""#));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains("unsplash.com"));
        assert!(html.contains(r#"data-action="close-popup""#));
        assert!(html.contains("Photo by Tester"));
    }

    #[test]
    fn popup_escapes_photo_fields() {
        let mut photo = photo_at("evil", 1.0, 2.0);
        photo.author_name = "<script>alert(1)</script>".to_string();
        photo.alt_text = "\" onload=\"x".to_string();
        let html = render_popup(&MapViewModel::build_popup(&photo));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"alt="&quot; onload=&quot;x""#));
    }

    #[test]
    fn query_separator_is_escaped_in_href() {
        let html = render_popup(&MapViewModel::build_popup(&photo_at("q", 1.0, 2.0)));
        assert!(html.contains("utm_source=picognito&amp;utm_medium=referral"));
    }
}

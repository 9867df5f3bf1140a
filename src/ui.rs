use crate::navigator::{
    Article, ArticleContent, ArticleSet, ErrorAnchor, ErrorList, ErrorTargets, Field, FieldKind,
    Form,
};
use std::fmt::Write;
use v_htmlescape::escape;

/// Renders every article of the page. `current` is shown when the address
/// has no fragment; it defaults to the page's default article.
pub fn render_page(articles: &ArticleSet, targets: &ErrorTargets, current: Option<&str>) -> String {
    let current = current.unwrap_or(articles.get(articles.default_idx()).id.as_str());
    let mut body = String::new();
    for article in articles.iter() {
        render_article(&mut body, article, targets, current == article.id);
    }
    PAGE_HTML.replace("{{ARTICLES}}", &body)
}

fn render_article(out: &mut String, article: &Article, targets: &ErrorTargets, current: bool) {
    let class = if current { r#" class="current""# } else { "" };
    let _ = writeln!(out, r#"<article id="{}"{class}>"#, escape(&article.id));
    match &article.content {
        ArticleContent::Static(html) => out.push_str(html),
        ArticleContent::Form(form) => render_form(out, form, targets),
    }
    out.push_str("\n</article>\n");
}

fn render_form(out: &mut String, form: &Form, targets: &ErrorTargets) {
    let _ = writeln!(out, r#"<form method="post" action="{}">"#, escape(&form.action));
    for field in form.fields() {
        render_field(out, field);
        for list in form.errors() {
            if attached_to(&list.anchor, field, targets) {
                render_error_list(out, list);
            }
        }
    }

    let button = form.button();
    let _ = writeln!(
        out,
        r#"<p class="submit"><button type="submit" data-text="{}"><span>{}</span></button></p>"#,
        escape(button.label()),
        escape(button.label()),
    );
    // form-wide lists, plus any whose anchor matches no field on this form
    for list in form.errors() {
        let placed = form
            .fields()
            .iter()
            .any(|field| attached_to(&list.anchor, field, targets));
        if !placed {
            render_error_list(out, list);
        }
    }
    out.push_str("</form>");
}

fn attached_to(anchor: &ErrorAnchor, field: &Field, targets: &ErrorTargets) -> bool {
    match anchor {
        ErrorAnchor::Field(name) => *name == field.name,
        ErrorAnchor::Target(target) => targets.get(&field.name) == Some(target.as_str()),
        ErrorAnchor::FormWide => false,
    }
}

fn render_field(out: &mut String, field: &Field) {
    let name = escape(&field.name);
    let value = escape(&field.value);
    let disabled = if field.disabled { " disabled" } else { "" };
    let _ = match field.kind {
        FieldKind::Hidden => writeln!(out, r#"<input type="hidden" name="{name}" value="{value}">"#),
        FieldKind::Text => writeln!(
            out,
            r#"<input type="text" id="id_{name}" name="{name}" value="{value}"{disabled}>"#
        ),
        FieldKind::Url => writeln!(
            out,
            r#"<input type="url" id="id_{name}" name="{name}" value="{value}" placeholder="http://"{disabled}>"#
        ),
        FieldKind::Checkbox => {
            let checked = if field.checked { " checked" } else { "" };
            writeln!(
                out,
                r#"<label><input type="checkbox" id="id_{name}" name="{name}"{checked}{disabled}> Include the address</label>"#
            )
        }
        FieldKind::TextArea => writeln!(
            out,
            r#"<textarea id="id_{name}" name="{name}" placeholder="Enter your feedback here."{disabled}>{value}</textarea>"#
        ),
    };

    if let Some(reading) = field.counter() {
        let class = reading.level.css_class().unwrap_or("");
        let _ = writeln!(
            out,
            r#"<span id="count-id_{name}" class="counter {class}" data-max="{}">{}</span>"#,
            field.max_chars.unwrap_or_default(),
            reading.remaining,
        );
    }
}

fn render_error_list(out: &mut String, list: &ErrorList) {
    out.push_str(r#"<ul class="errorlist">"#);
    for message in &list.messages {
        let _ = write!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>\n");
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Firefox Feedback</title>
  <style>
    :root {
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      background: linear-gradient(135deg, #f8f3e6, #ffe9d4);
      overflow-x: hidden;
    }

    main {
      position: relative;
      width: min(720px, 100%);
      margin: 0 auto;
    }

    article {
      display: none;
      position: absolute;
      left: 0;
      right: 0;
      padding: 32px;
      background: var(--card);
      transition: left 400ms ease, right 400ms ease;
    }

    article.current,
    article:target {
      display: block;
    }

    main:has(article:target) > article.current:not(:target) {
      display: none;
    }

    textarea {
      width: 100%;
      min-height: 120px;
    }

    .counter.low {
      color: #c77800;
    }

    .counter.verylow {
      color: #c0392b;
    }

    .errorlist {
      color: #c0392b;
      margin: 4px 0 12px;
    }

    .submit button {
      background: var(--accent);
      color: #fff;
      border: 0;
      border-radius: 999px;
      padding: 10px 24px;
    }
  </style>
</head>
<body>
  <main>
{{ARTICLES}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{feedback_articles, feedback_error_targets};

    #[test]
    fn renders_each_article_once() {
        let articles = feedback_articles().unwrap();
        let html = render_page(&articles, &feedback_error_targets(), None);
        for article in articles.iter() {
            assert_eq!(html.matches(&format!(r#"<article id="{}""#, article.id)).count(), 1);
        }
        assert_eq!(html.matches(r#"class="current""#).count(), 1);
        assert!(html.contains(r#"<article id="intro" class="current">"#));
    }

    #[test]
    fn targeted_article_hides_current_one() {
        let articles = feedback_articles().unwrap();
        let html = render_page(&articles, &feedback_error_targets(), None);
        assert!(html.contains("main:has(article:target) > article.current:not(:target)"));
    }

    #[test]
    fn target_without_matching_field_falls_back_to_form_wide() {
        let mut articles = feedback_articles().unwrap();
        let idx = articles.position("idea").unwrap();
        let form = articles.get_mut(idx).form_mut().unwrap();
        form.attach_errors(
            ErrorAnchor::Target("error-target-url".to_string()),
            vec!["Enter a valid URL.".to_string()],
        );

        let html = render_page(&articles, &feedback_error_targets(), Some("idea"));
        let idea = &html[html.find(r#"<article id="idea""#).unwrap()..];
        let idea = &idea[..idea.find("</article>").unwrap()];
        let button = idea.find(r#"<p class="submit">"#).unwrap();
        let list = idea.find("<li>Enter a valid URL.</li>").unwrap();
        assert!(list > button);
    }

    #[test]
    fn escapes_submitted_values_and_errors() {
        let mut articles = feedback_articles().unwrap();
        let idx = articles.position("praise").unwrap();
        let form = articles.get_mut(idx).form_mut().unwrap();
        form.set_value("description", "<script>alert(1)</script>");
        form.attach_errors(ErrorAnchor::FormWide, vec!["Bad & wrong".to_string()]);

        let html = render_page(&articles, &feedback_error_targets(), Some("praise"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<li>Bad &amp; wrong</li>"));
        assert!(html.contains(r#"<article id="praise" class="current">"#));
    }
}

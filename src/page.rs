//! The release feedback page: which articles exist, in what order, and the
//! form each one carries. Both the HTML renderer and the navigator are built
//! from this one definition.

use crate::models::OpinionKind;
use crate::navigator::{
    ArticleContent, ArticleSet, ArticleSetError, ErrorTargets, Field, FieldKind, Form,
    SubmitButton,
};

pub const FEEDBACK_ACTION: &str = "/feedback";

const INTRO_HTML: &str = r##"<h2>How is Firefox treating you?</h2>
<ul class="choices">
  <li><a href="#praise">Firefox made me happy</a></li>
  <li><a href="#issue">Firefox made me sad</a></li>
  <li><a href="#idea">I have an idea</a></li>
  <li><a href="#broken">A website is broken</a></li>
</ul>"##;

const THANKS_HTML: &str = r##"<h2>Thank you!</h2>
<p>Your feedback has been received. <a href="#intro">Send more</a></p>"##;

pub fn feedback_articles() -> Result<ArticleSet, ArticleSetError> {
    let mut panels = vec![(
        "intro".to_string(),
        ArticleContent::Static(INTRO_HTML.to_string()),
    )];
    for kind in OpinionKind::ALL {
        panels.push((
            kind.article_id().to_string(),
            ArticleContent::Form(opinion_form(kind)),
        ));
    }
    panels.push((
        "thanks".to_string(),
        ArticleContent::Static(THANKS_HTML.to_string()),
    ));
    ArticleSet::new(panels)
}

pub fn feedback_error_targets() -> ErrorTargets {
    ErrorTargets::new().with("url", "error-target-url")
}

pub fn opinion_form(kind: OpinionKind) -> Form {
    let description = Field::new("description", FieldKind::TextArea).with_max_chars(kind.max_length());
    let form = Form::new(FEEDBACK_ACTION, SubmitButton::new("Submit", "Sending…"))
        .with_field(Field::hidden("type", kind.short()))
        .with_field(description);

    match kind {
        OpinionKind::Issue => form
            .with_field(Field::new("add_url", FieldKind::Checkbox))
            .with_field(Field::new("url", FieldKind::Url))
            .with_enable_binding("add_url", "url"),
        OpinionKind::BrokenWebsite => form.with_field(Field::new("url", FieldKind::Url)),
        OpinionKind::Praise | OpinionKind::Idea => form,
    }
}

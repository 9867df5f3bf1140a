use crate::models::{FeedbackSubmission, NewOpinion, OpinionKind};
use crate::navigator::form::{ErrorMap, FORM_WIDE_KEY};

const REQUIRED: &str = "This field is required.";
const INVALID_URL: &str = "Enter a valid URL.";

pub fn validate_submission(submission: &FeedbackSubmission) -> Result<NewOpinion, ErrorMap> {
    let mut errors = ErrorMap::new();

    let Some(kind) = OpinionKind::from_short(submission.kind.trim()) else {
        errors.insert(
            FORM_WIDE_KEY.to_string(),
            vec!["Unknown feedback type.".to_string()],
        );
        return Err(errors);
    };

    let description = submission.description.trim();
    let length = description.chars().count();
    if description.is_empty() {
        errors.insert("description".to_string(), vec![REQUIRED.to_string()]);
    } else if length > kind.max_length() {
        errors.insert(
            "description".to_string(),
            vec![format!(
                "Ensure this value has at most {} characters (it has {length}).",
                kind.max_length()
            )],
        );
    }

    let url = submission.url.trim();
    let url = match kind {
        OpinionKind::BrokenWebsite if url.is_empty() => {
            errors.insert("url".to_string(), vec![REQUIRED.to_string()]);
            None
        }
        OpinionKind::BrokenWebsite => Some(url),
        OpinionKind::Issue if submission.add_url.is_some() && !url.is_empty() => Some(url),
        _ => None,
    };
    if let Some(url) = url {
        if !is_valid_url(url) {
            errors.insert("url".to_string(), vec![INVALID_URL.to_string()]);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewOpinion {
        kind,
        description: description.to_string(),
        url: url.map(str::to_string),
    })
}

fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

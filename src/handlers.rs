use crate::errors::AppError;
use crate::models::{FeedbackSubmission, NewOpinion, Opinion, OpinionCount, OpinionKind, SubmitAck};
use crate::navigator::ErrorMap;
use crate::page::{feedback_articles, feedback_error_targets};
use crate::state::AppState;
use crate::storage::persist_log;
use crate::ui::render_page;
use crate::validation::validate_submission;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use tracing::{debug, info};

pub async fn index() -> Result<Html<String>, AppError> {
    let articles = feedback_articles()?;
    Ok(Html(render_page(&articles, &feedback_error_targets(), None)))
}

pub async fn get_count(State(state): State<AppState>) -> Json<OpinionCount> {
    let log = state.log.lock().await;
    Json(OpinionCount {
        count: log.opinions.len(),
    })
}

/// Background requests get JSON back; plain form posts get a redirect to the
/// thanks article or the page again with the errors filled in.
pub async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<FeedbackSubmission>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(submission) = form.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let background = is_background_request(&headers);

    match validate_submission(&submission) {
        Ok(opinion) => {
            let id = store_opinion(&state, opinion).await?;
            if background {
                Ok(Json(SubmitAck { id }).into_response())
            } else {
                Ok(Redirect::to("/#thanks").into_response())
            }
        }
        Err(errors) => {
            debug!("rejected '{}' submission: {} fields", submission.kind, errors.len());
            if background {
                Ok((StatusCode::BAD_REQUEST, Json(errors)).into_response())
            } else {
                Ok(Html(render_with_errors(&submission, &errors)?).into_response())
            }
        }
    }
}

fn is_background_request(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

async fn store_opinion(state: &AppState, opinion: NewOpinion) -> Result<u64, AppError> {
    let mut log = state.log.lock().await;
    let id = log.next_id();
    info!("storing {:?} opinion {id}", opinion.kind);
    log.opinions.push(Opinion {
        id,
        kind: opinion.kind,
        description: opinion.description,
        url: opinion.url,
        created: Utc::now(),
    });
    if let Err(err) = persist_log(&state.data_path, &log).await {
        log.opinions.pop();
        return Err(err);
    }
    Ok(id)
}

/// Page for a plain post-back: the submitted article keeps its values and
/// shows the errors where the navigator would have put them.
fn render_with_errors(submission: &FeedbackSubmission, errors: &ErrorMap) -> Result<String, AppError> {
    let mut articles = feedback_articles()?;
    let targets = feedback_error_targets();
    let Some(kind) = OpinionKind::from_short(submission.kind.trim()) else {
        return Ok(render_page(&articles, &targets, None));
    };

    let id = kind.article_id();
    if let Some(form) = articles
        .position(id)
        .and_then(|idx| articles.get_mut(idx).form_mut())
    {
        form.set_value("description", submission.description.as_str());
        form.set_value("url", submission.url.as_str());
        form.set_checked("add_url", submission.add_url.is_some());
        for (key, messages) in errors {
            let anchor = targets.anchor_for(form, key);
            form.attach_errors(anchor, messages.clone());
        }
    }
    Ok(render_page(&articles, &targets, Some(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedbackLog;
    use axum::http::HeaderValue;

    fn background_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        headers
    }

    fn praise(description: &str) -> FeedbackSubmission {
        FeedbackSubmission {
            kind: "praise".to_string(),
            description: description.to_string(),
            ..FeedbackSubmission::default()
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_log_untouched() {
        // a directory cannot be written as a file
        let state = AppState::new(std::env::temp_dir(), FeedbackLog::default());

        let err = submit_feedback(
            State(state.clone()),
            background_headers(),
            Ok(Form(praise("Smooth scrolling"))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.log.lock().await.opinions.is_empty());
    }

    #[tokio::test]
    async fn invalid_background_submit_is_bad_request() {
        let state = AppState::new(std::env::temp_dir(), FeedbackLog::default());

        let response = submit_feedback(State(state.clone()), background_headers(), Ok(Form(praise(""))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.log.lock().await.opinions.is_empty());
    }
}

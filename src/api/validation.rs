use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use crate::models::error::ServerError;

/// JSON body extractor used by every game route. Malformed bodies and
/// failed validation rules both come back as a 400 `ServerError`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejected_body)?;

        if let Err(errors) = body.validate() {
            let message = describe_errors(&errors);
            info!("Request body failed validation: {}", message);
            return Err(ServerError::Api(StatusCode::BAD_REQUEST, message));
        }

        debug!("Request body passed validation");
        Ok(ValidatedJson(body))
    }
}

fn rejected_body(rejection: JsonRejection) -> ServerError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => String::from("Expected JSON"),
        JsonRejection::JsonSyntaxError(_) => String::from("Invalid JSON"),
        other => format!("Invalid request body: {}", other.body_text()),
    };

    info!("Rejected request body: {}", message);
    ServerError::Api(StatusCode::BAD_REQUEST, message)
}

/// `field: message` per failed rule, ordered by field name.
fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .iter()
        .flat_map(|(field, rules)| {
            rules.iter().map(move |rule| match &rule.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: failed {}", field, rule.code),
            })
        })
        .collect();

    if messages.is_empty() {
        return String::from("Validation failed");
    }

    messages.join(", ")
}

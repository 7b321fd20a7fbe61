use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::error::{NetError, ensure_success};
use crate::portfolio::contact::ContactForm;
use crate::portfolio::content::Integrations;

#[cfg(not(target_arch = "wasm32"))]
use constants::portfolio::HTTP_TIMEOUT_SECS;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailTemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

/// Body of the email delivery call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: EmailTemplateParams,
}

impl EmailRequest {
    pub fn new(integrations: &Integrations, form: &ContactForm) -> Self {
        Self {
            service_id: integrations.email_service_id.clone(),
            template_id: integrations.email_template_id.clone(),
            user_id: integrations.email_public_key.clone(),
            template_params: EmailTemplateParams {
                from_name: form.name.clone(),
                from_email: form.email.clone(),
                message: form.message.clone(),
            },
        }
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, NetError> {
    serde_json::from_str(body).map_err(|e| NetError::Decode(e.to_string()))
}

/// GET `url` and decode the JSON body.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_json<T: DeserializeOwned>(url: String) -> Result<T, NetError> {
    let response = reqwest::Client::new()
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    ensure_success(response.status().as_u16())?;
    let body = response.text().await?;
    decode_json(&body)
}

/// POST `body` as JSON to `url`. Any 2xx is success; the reply is ignored.
#[cfg(target_arch = "wasm32")]
pub async fn post_json<B: Serialize>(url: String, body: B) -> Result<(), NetError> {
    let response = reqwest::Client::new().post(&url).json(&body).send().await?;
    ensure_success(response.status().as_u16())
}

#[cfg(not(target_arch = "wasm32"))]
fn blocking_client() -> Result<reqwest::blocking::Client, NetError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// GET `url` and decode the JSON body. Blocks the IO pool thread it runs on.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_json<T: DeserializeOwned>(url: String) -> Result<T, NetError> {
    let response = blocking_client()?
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()?;
    ensure_success(response.status().as_u16())?;
    let body = response.text()?;
    decode_json(&body)
}

/// POST `body` as JSON to `url`. Any 2xx is success; the reply is ignored.
#[cfg(not(target_arch = "wasm32"))]
pub async fn post_json<B: Serialize>(url: String, body: B) -> Result<(), NetError> {
    let response = blocking_client()?.post(&url).json(&body).send()?;
    ensure_success(response.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrations() -> Integrations {
        Integrations {
            profile_user: "someone".into(),
            email_service_id: "service_x".into(),
            email_template_id: "template_y".into(),
            email_public_key: "key_z".into(),
            chat_number: "15550001111".into(),
        }
    }

    #[test]
    fn email_body_matches_delivery_api_shape() {
        let form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hi!\nBye.".into(),
        };
        let body = serde_json::to_value(EmailRequest::new(&integrations(), &form))
            .expect("serializable");

        assert_eq!(
            body,
            serde_json::json!({
                "service_id": "service_x",
                "template_id": "template_y",
                "user_id": "key_z",
                "template_params": {
                    "from_name": "Ada",
                    "from_email": "ada@example.com",
                    "message": "Hi!\nBye."
                }
            })
        );
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let result: Result<Vec<u32>, NetError> = decode_json("{not json");
        assert!(matches!(result, Err(NetError::Decode(_))));
    }
}

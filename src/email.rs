// Enquiry and test-drive emails: rendering (askama) and delivery (Resend HTTP API)

use std::sync::Arc;

use askama::Template;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::models::{EnquiryRequest, Vehicle};

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const PLACEHOLDER_IMAGE: &str = "/luxury-car-sleek-design.png";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to render email template: {0}")]
    Render(#[from] askama::Error),

    #[error("Mail provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

// Car card shown at the top of the email. Empty strings mean "not known".
pub struct CarListing {
    pub image_url: String,
    pub alt: String,
    pub title: String,
    pub price: String,
    pub details: Vec<Detail>,
    pub listing_url: String,
}

#[derive(Template)]
#[template(path = "enquiry_email.html")]
pub struct EnquiryEmailTemplate<'a> {
    pub heading: &'a str,
    pub car: Option<CarListing>,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub message_lines: Vec<&'a str>,
    pub site_url: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

// 54995 -> "54,995"
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn subject_for(request: &EnquiryRequest) -> String {
    match request.subject.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(subject) => subject.to_string(),
        None if request.is_test_drive() => "Test Drive Request".to_string(),
        None => "New Enquiry".to_string(),
    }
}

// Absolute image URLs are kept; site-relative paths are joined onto the site
fn absolute_image_url(site_url: &str, image: Option<&str>) -> String {
    let image = image.unwrap_or(PLACEHOLDER_IMAGE);
    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    if image.starts_with('/') {
        format!("{}{}", site_url, image)
    } else {
        format!("{}/{}", site_url, image)
    }
}

fn listing_for(request: &EnquiryRequest, car: Option<&Vehicle>, site_url: &str) -> Option<CarListing> {
    if let Some(car) = car {
        let mut details = Vec::new();
        if car.mileage > 0 {
            details.push(Detail {
                label: "Mileage",
                value: format!("{} miles", group_thousands(car.mileage)),
            });
        }
        details.push(Detail { label: "Year", value: car.year.to_string() });
        for (label, value) in [
            ("Fuel Type", &car.fuel_type),
            ("Transmission", &car.transmission),
            ("Body Type", &car.body_type),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                details.push(Detail { label, value: value.to_string() });
            }
        }
        return Some(CarListing {
            image_url: absolute_image_url(site_url, car.images.first().map(String::as_str)),
            alt: format!("{} {}", car.make, car.model),
            title: car.title(),
            price: if car.price > 0 {
                format!("£{}", group_thousands(car.price))
            } else {
                String::new()
            },
            details,
            listing_url: format!("{}/stock/{}", site_url, car.id),
        });
    }

    let summary = request.car_details.as_ref()?;
    let make = summary.make.clone().unwrap_or_default();
    let model = summary.model.clone().unwrap_or_default();
    let year = summary.year.map(|y| y.to_string());
    Some(CarListing {
        image_url: absolute_image_url(site_url, None),
        alt: format!("{} {}", make, model),
        title: format!("{} {} {}", year.as_deref().unwrap_or("N/A"), make, model),
        price: String::new(),
        details: year.map(|value| vec![Detail { label: "Year", value }]).unwrap_or_default(),
        listing_url: String::new(),
    })
}

/// Build the email for an enquiry. `car` is the listing the enquiry refers
/// to, when it could be found in the current inventory.
pub fn compose_enquiry(
    request: &EnquiryRequest,
    car: Option<&Vehicle>,
    site_url: &str,
) -> Result<OutgoingEmail, MailError> {
    let template = EnquiryEmailTemplate {
        heading: if request.is_test_drive() { "🚗 Test Drive Request" } else { "📧 New Enquiry" },
        car: listing_for(request, car, site_url),
        name: request.name.trim(),
        email: request.email.trim(),
        phone: request.phone.trim(),
        message_lines: request
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(|m| m.lines().collect())
            .unwrap_or_default(),
        site_url,
    };

    Ok(OutgoingEmail {
        subject: subject_for(request),
        html: template.render()?,
        reply_to: request.email.trim().to_string(),
    })
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ProviderError {
    message: Option<String>,
}

// Prefer the provider's own `message`; fall back to the raw body
fn rejection(status: u16, body: String) -> MailError {
    let message = serde_json::from_str::<ProviderError>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);
    MailError::Rejected { status, message }
}

pub struct Mailer {
    http_client: Arc<Client>,
    api_key: String,
    from: String,
    to: Vec<String>,
}

impl Mailer {
    pub fn new(http_client: Arc<Client>, api_key: String, from: String, to: Vec<String>) -> Self {
        Self { http_client, api_key, from, to }
    }

    /// `None` when no provider key is configured.
    pub fn from_settings(settings: &Settings, http_client: Arc<Client>) -> Option<Self> {
        let api_key = settings.resend_api_key.clone().filter(|k| !k.trim().is_empty())?;
        let to = settings
            .enquiry_to
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self::new(http_client, api_key, settings.enquiry_from.clone(), to))
    }

    /// Deliver and return the provider's message id.
    pub async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: &self.to,
            subject: &email.subject,
            html: &email.html,
            reply_to: &email.reply_to,
        };

        let response = self
            .http_client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), body));
        }

        let sent: SendEmailResponse = response.json().await?;
        tracing::info!(id = %sent.id, subject = %email.subject, "Enquiry email sent");
        Ok(sent.id)
    }
}

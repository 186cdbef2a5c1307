//! Transactional email templates.

use legalconnect_types::integration::EmailMessage;
use legalconnect_types::provider::VerificationStatus;

pub const DIRECT_REQUEST_SUBJECT: &str = "You have a new direct service request on LegalConnect!";
pub const LOGIN_CODE_SUBJECT: &str = "Your LegalConnect login code";

/// Escape user-supplied text before it lands in an HTML body.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// One-time code that completes an email login.
pub fn login_code(to: &str, code: &str, ttl_minutes: u32) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: LOGIN_CODE_SUBJECT.to_string(),
        body: format!(
            "Your LegalConnect login code is <strong>{code}</strong>.<br><br>It expires in \
             {ttl_minutes} minutes. If you did not try to sign in, you can ignore this email.<br><br>\
             The LegalConnect Team"
        ),
    }
}

/// Sent to a provider when a customer addresses a request to them.
pub fn direct_request(to: &str, business_name: &str, request_title: &str) -> EmailMessage {
    let business_name = escape_html(business_name);
    let request_title = escape_html(request_title);
    EmailMessage {
        to: to.to_string(),
        subject: DIRECT_REQUEST_SUBJECT.to_string(),
        body: format!(
            "Hi {business_name},<br><br>A new service request titled \"<strong>{request_title}</strong>\" \
             has been submitted directly to you on LegalConnect.<br><br>Please log in to your provider \
             dashboard to view the details and respond to the client.<br><br>Thank you,<br>The LegalConnect Team"
        ),
    }
}

/// Sent to a provider after an admin verifies or rejects their profile.
pub fn verification_outcome(
    to: &str,
    business_name: &str,
    status: VerificationStatus,
    reason: Option<&str>,
) -> EmailMessage {
    let reason_line = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| format!("Reason: {}<br><br>", escape_html(r)))
        .unwrap_or_default();
    let business_name = escape_html(business_name);
    let next_steps = if status == VerificationStatus::Verified {
        "You can now receive service requests from clients. Congratulations!"
    } else {
        "Please review your profile and make the necessary changes."
    };
    EmailMessage {
        to: to.to_string(),
        subject: format!("Your LandLaw Connect Profile has been {status}"),
        body: format!(
            "Hi {business_name},<br><br>Your provider profile on LandLaw Connect has been reviewed and \
             its status is now: <strong>{status}</strong>.<br><br>{reason_line}{next_steps}<br><br>\
             Thank you,<br>The LandLaw Connect Team"
        ),
    }
}

// HTML pages. Rendering is deliberately bare: templates and journal data
// live outside this service, these only give every gated prefix a route.

use axum::{
    extract::Path,
    response::{Html, Json, Redirect},
};

use crate::middleware::guards::WalletStatus;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title} | DiaryVault</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body></html>\n"
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// Landing page; shows the connect banner until a wallet is attached
pub async fn home(status: WalletStatus) -> Html<String> {
    let banner = match (status.wallet_connected, status.wallet_address.as_deref()) {
        (true, Some(address)) => format!(
            "<p class=\"wallet-connected\">Connected as {}</p>",
            escape(address)
        ),
        (true, None) => "<p class=\"wallet-connected\">Wallet connected</p>".to_string(),
        (false, _) => {
            "<div class=\"connect-wallet-banner\"><a href=\"/signup/\">Connect your wallet</a> to start journaling.</div>"
                .to_string()
        }
    };
    page("Your private journal", &banner)
}

pub async fn signup() -> Html<String> {
    page("Sign up", "<p>Connect a wallet to create your DiaryVault.</p>")
}

pub async fn login() -> Html<String> {
    page("Log in", "<p>Reconnect your wallet to continue.</p>")
}

pub async fn privacy_policy() -> Html<String> {
    page("Privacy policy", "<p>Your entries are yours.</p>")
}

pub async fn dashboard() -> Html<String> {
    page("Dashboard", "<p>Recent entries and streaks.</p>")
}

pub async fn dashboard_section(Path(section): Path<String>) -> Html<String> {
    page("Dashboard", &format!("<p>Section: {}</p>", escape(&section)))
}

pub async fn library() -> Html<String> {
    page("Library", "<p>All of your journal entries.</p>")
}

pub async fn insights() -> Html<String> {
    page("Insights", "<p>Mood and writing trends.</p>")
}

pub async fn new_entry() -> Html<String> {
    page(
        "New entry",
        "<form method=\"post\" action=\"/new-entry/\"><textarea name=\"content\"></textarea><button>Save</button></form>",
    )
}

// Entry persistence belongs to the journal store; the form just lands in the library
pub async fn create_entry() -> Redirect {
    Redirect::to("/library/")
}

pub async fn account_settings() -> Html<String> {
    page("Account settings", "<p>Wallet, notifications and export.</p>")
}

// Called from in-page scripts with X-Requested-With, guarded by wallet_required
pub async fn compile_journal() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "queued"}))
}
